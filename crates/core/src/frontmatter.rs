use serde_json::{Map, Value as JsonValue};
use thiserror::Error;

/// Leading YAML block of a document.
#[derive(Debug, Clone, PartialEq)]
pub struct Frontmatter {
    /// Parsed mapping, empty when the document has no frontmatter.
    pub value: JsonValue,
    /// Byte offset where the Markdown body starts.
    pub body_start: usize,
}

impl Frontmatter {
    fn absent() -> Self {
        Self {
            value: JsonValue::Object(Map::new()),
            body_start: 0,
        }
    }

    /// Looks up a top-level key.
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.value.get(key)
    }
}

/// Errors emitted while parsing or extracting frontmatter.
#[derive(Debug, Error)]
pub enum FrontmatterError {
    /// Opening `---` without a closing one.
    #[error("Unterminated YAML frontmatter block: expected closing '---'")]
    Unterminated,
    /// YAML failed to parse.
    #[error("Frontmatter parse error: {0}")]
    Parse(String),
    /// Top-level YAML node was not a mapping.
    #[error("Frontmatter must be a YAML mapping at the top level")]
    InvalidRootType,
}

/// Extracts a leading `---` fenced YAML block.
///
/// Blank lines and a byte-order mark before the fence are allowed. Documents
/// without a fence yield an empty mapping and a body starting at 0.
pub fn extract_frontmatter(input: &str) -> Result<Frontmatter, FrontmatterError> {
    let offset = if input.starts_with('\u{feff}') {
        '\u{feff}'.len_utf8()
    } else {
        0
    };

    let mut lines = input[offset..]
        .split_inclusive('\n')
        .scan(offset, |pos, line| {
            let start = *pos;
            *pos += line.len();
            Some((start, line))
        })
        .skip_while(|(_, line)| line.trim().is_empty());

    match lines.next() {
        Some((_, line)) if is_fence(line) => {}
        _ => return Ok(Frontmatter::absent()),
    }

    let mut block = String::new();
    for (start, line) in lines {
        if is_fence(line) {
            return Ok(Frontmatter {
                value: parse_block(&block)?,
                body_start: start + line.len(),
            });
        }
        block.push_str(line);
    }
    Err(FrontmatterError::Unterminated)
}

fn is_fence(line: &str) -> bool {
    line.trim_end_matches(['\r', '\n']) == "---"
}

fn parse_block(block: &str) -> Result<JsonValue, FrontmatterError> {
    if block.trim().is_empty() {
        return Ok(JsonValue::Object(Map::new()));
    }

    let yaml: serde_yaml::Value =
        serde_yaml::from_str(block).map_err(|err| FrontmatterError::Parse(err.to_string()))?;
    match serde_json::to_value(yaml).map_err(|err| FrontmatterError::Parse(err.to_string()))? {
        JsonValue::Null => Ok(JsonValue::Object(Map::new())),
        value @ JsonValue::Object(_) => Ok(value),
        _ => Err(FrontmatterError::InvalidRootType),
    }
}
