//! Theme-level TOC configuration and per-page frontmatter overrides.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Shallowest heading level a table of contents may show; `h1` is the page
/// title.
pub const MIN_TOC_LEVEL: u8 = 2;
/// Deepest heading level a table of contents may show.
pub const MAX_TOC_LEVEL: u8 = 6;

/// Inclusive window of heading levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingLevelRange {
    /// Shallowest level kept.
    pub min: u8,
    /// Deepest level kept.
    pub max: u8,
}

impl HeadingLevelRange {
    /// Creates a window without validating it.
    pub const fn new(min: u8, max: u8) -> Self {
        Self { min, max }
    }

    /// Whether `level` falls inside the window.
    pub fn contains(&self, level: u8) -> bool {
        (self.min..=self.max).contains(&level)
    }

    /// Levels in the window, shallowest first.
    pub fn levels(&self) -> impl Iterator<Item = u8> {
        self.min..=self.max
    }
}

impl Default for HeadingLevelRange {
    fn default() -> Self {
        Self::new(MIN_TOC_LEVEL, 3)
    }
}

/// CSS classes used when rendering and highlighting the TOC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TocClasses {
    /// Class of the outermost `<ul>`.
    pub list: String,
    /// Class of every entry link.
    pub link: String,
    /// Class added to the link of the active heading.
    pub link_active: String,
}

impl Default for TocClasses {
    fn default() -> Self {
        Self {
            list: "table-of-contents table-of-contents__left-border".to_string(),
            link: "table-of-contents__link".to_string(),
            link_active: "table-of-contents__link--active".to_string(),
        }
    }
}

/// Navbar behaviour relevant to the reading anchor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NavbarConfig {
    /// A navbar that hides while scrolling does not cover headings, so the
    /// anchor offset is 0.
    pub hide_on_scroll: bool,
}

/// Site-wide table of contents settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TocConfig {
    /// Shallowest heading level shown (default 2).
    pub min_heading_level: u8,
    /// Deepest heading level shown (default 3).
    pub max_heading_level: u8,
    /// Rendering and highlighting classes.
    pub classes: TocClasses,
    /// Navbar behaviour.
    pub navbar: NavbarConfig,
}

impl Default for TocConfig {
    fn default() -> Self {
        let range = HeadingLevelRange::default();
        Self {
            min_heading_level: range.min,
            max_heading_level: range.max,
            classes: TocClasses::default(),
            navbar: NavbarConfig::default(),
        }
    }
}

impl TocConfig {
    /// Parses and validates a JSON configuration object. Missing keys take
    /// their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: TocConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that both levels lie in `2..=6` and form a non-empty window.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_level("minHeadingLevel", self.min_heading_level.into())?;
        check_level("maxHeadingLevel", self.max_heading_level.into())?;
        check_order(self.min_heading_level, self.max_heading_level)
    }

    /// Theme-level window.
    pub fn range(&self) -> HeadingLevelRange {
        HeadingLevelRange::new(self.min_heading_level, self.max_heading_level)
    }

    /// Window for a page: frontmatter values win over theme values.
    pub fn resolve_range(&self, page: &PageTocOptions) -> HeadingLevelRange {
        HeadingLevelRange::new(
            page.min_heading_level.unwrap_or(self.min_heading_level),
            page.max_heading_level.unwrap_or(self.max_heading_level),
        )
    }
}

/// TOC options a page sets in its frontmatter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageTocOptions {
    /// `hide_table_of_contents`
    pub hide: bool,
    /// `toc_min_heading_level`
    pub min_heading_level: Option<u8>,
    /// `toc_max_heading_level`
    pub max_heading_level: Option<u8>,
}

impl PageTocOptions {
    /// Reads the TOC keys from a frontmatter mapping. Unrelated keys are
    /// ignored; present TOC keys are validated like the theme settings.
    pub fn from_frontmatter(frontmatter: &JsonValue) -> Result<Self, ConfigError> {
        let hide = match frontmatter.get("hide_table_of_contents") {
            None | Some(JsonValue::Null) => false,
            Some(JsonValue::Bool(hide)) => *hide,
            Some(_) => {
                return Err(ConfigError::InvalidType {
                    field: "hide_table_of_contents",
                    expected: "a boolean",
                });
            }
        };
        let min_heading_level = read_level(frontmatter, "toc_min_heading_level")?;
        let max_heading_level = read_level(frontmatter, "toc_max_heading_level")?;
        if let (Some(min), Some(max)) = (min_heading_level, max_heading_level) {
            check_order(min, max)?;
        }

        Ok(Self {
            hide,
            min_heading_level,
            max_heading_level,
        })
    }

    /// A page shows its TOC unless hidden or there is nothing to list.
    pub fn should_render(&self, entries: usize) -> bool {
        !self.hide && entries > 0
    }
}

fn read_level(frontmatter: &JsonValue, field: &'static str) -> Result<Option<u8>, ConfigError> {
    match frontmatter.get(field) {
        None | Some(JsonValue::Null) => Ok(None),
        Some(JsonValue::Number(n)) => match n.as_i64() {
            Some(level) => check_level(field, level).map(Some),
            None => Err(ConfigError::InvalidType {
                field,
                expected: "an integer heading level",
            }),
        },
        Some(_) => Err(ConfigError::InvalidType {
            field,
            expected: "an integer heading level",
        }),
    }
}

fn check_level(field: &'static str, value: i64) -> Result<u8, ConfigError> {
    match u8::try_from(value) {
        Ok(level) if (MIN_TOC_LEVEL..=MAX_TOC_LEVEL).contains(&level) => Ok(level),
        _ => Err(ConfigError::LevelOutOfRange {
            field,
            value,
            min: MIN_TOC_LEVEL,
            max: MAX_TOC_LEVEL,
        }),
    }
}

fn check_order(min: u8, max: u8) -> Result<(), ConfigError> {
    if min > max {
        return Err(ConfigError::InvertedRange { min, max });
    }
    Ok(())
}
