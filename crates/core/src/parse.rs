//! markdown-rs adapter.

use crate::{SourceLocation, TocError};
use markdown::mdast::Node;
use markdown::message::{Message, Place};

/// Which syntax extensions the parser recognises.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    /// Enable MDX constructs (JSX, ESM, expressions).
    pub mdx: bool,
    /// Enable GitHub Flavored Markdown constructs.
    pub gfm: bool,
    /// Enable math constructs (`$inline$` and `$$block$$`).
    pub math: bool,
}

impl ParseOptions {
    /// Plain Markdown (`.md`) documents.
    pub const fn markdown() -> Self {
        Self {
            mdx: false,
            gfm: true,
            math: false,
        }
    }

    /// MDX (`.mdx`) documents.
    pub const fn mdx() -> Self {
        Self {
            mdx: true,
            gfm: true,
            math: false,
        }
    }

    /// Picks options from a file extension; anything but `mdx` is Markdown.
    pub fn for_path(path: &str) -> Self {
        if path.rsplit('.').next().is_some_and(|ext| ext.eq_ignore_ascii_case("mdx")) {
            Self::mdx()
        } else {
            Self::markdown()
        }
    }

    fn to_markdown(self) -> markdown::ParseOptions {
        let mut constructs = markdown::Constructs {
            frontmatter: true,
            // MDX has no indented code and no raw HTML
            code_indented: !self.mdx,
            html_flow: !self.mdx,
            html_text: !self.mdx,
            ..Default::default()
        };

        if self.gfm {
            constructs.gfm_autolink_literal = true;
            constructs.gfm_footnote_definition = true;
            constructs.gfm_label_start_footnote = true;
            constructs.gfm_strikethrough = true;
            constructs.gfm_table = true;
            constructs.gfm_task_list_item = true;
        }

        if self.mdx {
            constructs.mdx_esm = true;
            constructs.mdx_expression_flow = true;
            constructs.mdx_expression_text = true;
            constructs.mdx_jsx_flow = true;
            constructs.mdx_jsx_text = true;
        }

        if self.math {
            constructs.math_flow = true;
            constructs.math_text = true;
        }

        markdown::ParseOptions {
            constructs,
            math_text_single_dollar: self.math,
            ..markdown::ParseOptions::default()
        }
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::markdown()
    }
}

/// Parses a document into an MDAST tree.
pub fn parse_mdast(input: &str, options: &ParseOptions) -> Result<Node, TocError> {
    markdown::to_mdast(input, &options.to_markdown()).map_err(|err| TocError::Markdown {
        message: err.to_string(),
        location: message_location(&err),
    })
}

fn message_location(message: &Message) -> SourceLocation {
    match message.place.as_deref() {
        Some(Place::Point(point)) => SourceLocation::new(point.line, point.column),
        Some(Place::Position(position)) => {
            SourceLocation::new(position.start.line, position.start.column)
        }
        None => SourceLocation::new(1, 1),
    }
}
