use thiserror::Error;

use crate::frontmatter::FrontmatterError;

/// Source location information for error reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// Optional file path
    pub file: Option<String>,
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

impl SourceLocation {
    /// Create a new source location
    pub fn new(line: usize, column: usize) -> Self {
        Self {
            file: None,
            line,
            column,
        }
    }

    /// Attach a file path to an existing location.
    pub fn in_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.file {
            Some(file) => write!(f, "{}:{}:{}", file, self.line, self.column),
            None => write!(f, "{}:{}", self.line, self.column),
        }
    }
}

/// Errors raised while validating TOC configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A heading level fell outside the supported window.
    #[error("{field} must be between {min} and {max}, got {value}")]
    LevelOutOfRange {
        /// Name of the offending setting.
        field: &'static str,
        /// Value that was supplied.
        value: i64,
        /// Smallest accepted level.
        min: u8,
        /// Largest accepted level.
        max: u8,
    },
    /// The minimum heading level is greater than the maximum.
    #[error("minimum heading level {min} is greater than maximum heading level {max}")]
    InvertedRange {
        /// Configured minimum.
        min: u8,
        /// Configured maximum.
        max: u8,
    },
    /// A frontmatter value had the wrong JSON type.
    #[error("{field} has an invalid type: expected {expected}")]
    InvalidType {
        /// Name of the offending key.
        field: &'static str,
        /// Human readable description of the accepted type.
        expected: &'static str,
    },
    /// Configuration JSON failed to deserialize.
    #[error("invalid TOC configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors surfaced while turning a document into a table of contents.
#[derive(Debug, Error)]
pub enum TocError {
    /// markdown-rs parser error surfaced through the adapter.
    #[error("Parse error at {location}: {message}")]
    Markdown {
        /// Error message
        message: String,
        /// Source location
        location: SourceLocation,
    },
    /// The document's frontmatter could not be read.
    #[error(transparent)]
    Frontmatter(#[from] FrontmatterError),
    /// Theme or page configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl TocError {
    /// Create a markdown parse error with location
    pub fn markdown(message: impl Into<String>, line: usize, column: usize) -> Self {
        Self::Markdown {
            message: message.into(),
            location: SourceLocation::new(line, column),
        }
    }

    /// Attaches the document path to a located error; other errors pass
    /// through unchanged.
    pub fn in_file(self, file: impl Into<String>) -> Self {
        match self {
            TocError::Markdown { message, location } => TocError::Markdown {
                message,
                location: location.in_file(file),
            },
            other => other,
        }
    }

    /// Returns the source location when the error points into the document.
    pub fn location(&self) -> Option<&SourceLocation> {
        match self {
            TocError::Markdown { location, .. } => Some(location),
            _ => None,
        }
    }
}
