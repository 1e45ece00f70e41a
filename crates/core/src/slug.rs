//! Heading anchor ids.

use std::collections::HashMap;

/// Splits a trailing `{#custom-id}` off heading text.
///
/// The id must be non-empty and made of ASCII alphanumerics, `-` or `_`.
///
/// ```
/// use tocline_core::slug::split_custom_id;
///
/// assert_eq!(split_custom_id("Setup {#install}"), ("Setup", Some("install")));
/// assert_eq!(split_custom_id("Setup {#}"), ("Setup {#}", None));
/// ```
pub fn split_custom_id(text: &str) -> (&str, Option<&str>) {
    let trimmed = text.trim_end();
    let candidate = trimmed
        .strip_suffix('}')
        .and_then(|rest| rest.rfind("{#").map(|open| (open, &rest[open + 2..])));

    match candidate {
        Some((open, id))
            if !id.is_empty()
                && id
                    .bytes()
                    .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_') =>
        {
            (trimmed[..open].trim_end(), Some(id))
        }
        _ => (text, None),
    }
}

/// Per-document slug generator compatible with github-slugger.
///
/// Repeated headings get `-1`, `-2`, ... suffixes, skipping any suffixed
/// slug already taken; explicit ids can be reserved the same way.
#[derive(Debug, Default)]
pub struct Slugger {
    seen: HashMap<String, usize>,
}

impl Slugger {
    /// Creates an empty slugger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a unique slug for `text`.
    pub fn slug(&mut self, text: &str) -> String {
        let base = slug_base(text);
        let mut candidate = base.clone();
        while self.seen.contains_key(&candidate) {
            let count = self.seen.entry(base.clone()).or_insert(0);
            *count += 1;
            candidate = format!("{base}-{count}");
        }
        self.seen.insert(candidate.clone(), 0);
        candidate
    }

    /// Marks `slug` as taken.
    pub fn reserve(&mut self, slug: &str) {
        self.seen.entry(slug.to_string()).or_insert(0);
    }
}

/// Lowercases `text`, keeps letters, digits, `-`, `_` and combining marks,
/// turns spaces into hyphens and drops everything else. Hyphens are neither
/// collapsed nor trimmed. Text with nothing left becomes `heading`.
pub fn slug_base(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            ' ' => slug.push('-'),
            '-' | '_' => slug.push(ch),
            c if c.is_ascii_alphanumeric() => slug.push(c.to_ascii_lowercase()),
            c if !c.is_ascii() && (c.is_alphanumeric() || is_combining_mark(c)) => {
                slug.extend(c.to_lowercase())
            }
            _ => {}
        }
    }
    if slug.is_empty() {
        slug.push_str("heading");
    }
    slug
}

/// Combining marks (Mn/Mc/Me) of the scripts documentation sites commonly
/// use; virama, nukta and vowel signs must survive slugging.
fn is_combining_mark(ch: char) -> bool {
    const MARKS: &[(u32, u32)] = &[
        (0x0300, 0x036F),
        (0x0591, 0x05BD),
        (0x05BF, 0x05BF),
        (0x05C1, 0x05C2),
        (0x05C4, 0x05C5),
        (0x05C7, 0x05C7),
        (0x0610, 0x061A),
        (0x064B, 0x065F),
        (0x0670, 0x0670),
        (0x0900, 0x0903),
        (0x093A, 0x094F),
        (0x0951, 0x0957),
        (0x0962, 0x0963),
        (0x0980, 0x0983),
        (0x09BC, 0x09CD),
        (0x0A01, 0x0A03),
        (0x0A3C, 0x0A4D),
        (0x0A81, 0x0A83),
        (0x0ABC, 0x0ACD),
        (0x0B01, 0x0B03),
        (0x0BBE, 0x0BCD),
        (0x0E31, 0x0E3A),
        (0x0E47, 0x0E4E),
        (0x1AB0, 0x1AFF),
        (0x1DC0, 0x1DFF),
        (0x302A, 0x302F),
        (0x3099, 0x309A),
        (0xFE20, 0xFE2F),
    ];
    let cp = ch as u32;
    MARKS.iter().any(|&(lo, hi)| (lo..=hi).contains(&cp))
}
