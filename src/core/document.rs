use crate::domain::ports::Document;
use crate::utils::error::{CitiesError, Result};
use std::path::Path;

pub const DEFAULT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>Cities</title></head>
<body>
<ul id="resultList"></ul>
</body>
</html>
"#;

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// An HTML page kept as text. Only supports appending inside an element
/// located by its `id` attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlDocument {
    markup: String,
}

impl Default for HtmlDocument {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE)
    }
}

impl HtmlDocument {
    pub fn new(markup: impl Into<String>) -> Self {
        Self {
            markup: markup.into(),
        }
    }

    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let markup = tokio::fs::read_to_string(path).await?;
        Ok(Self::new(markup))
    }

    /// Number of `<li` start tags inside the element with `element_id`.
    pub fn count_items(&self, element_id: &str) -> Result<usize> {
        let (_, open_end, close_start) = self.locate(element_id)?;
        let inner = self.markup[open_end..close_start].to_ascii_lowercase();
        Ok(inner
            .match_indices("<li")
            .filter(|(idx, _)| is_tag_boundary(inner.as_bytes(), idx + 3))
            .count())
    }

    /// Returns (tag name, end of start tag, start of matching end tag).
    fn locate(&self, element_id: &str) -> Result<(String, usize, usize)> {
        let not_found = || CitiesError::ElementNotFound {
            id: element_id.to_string(),
        };

        let (tag, open_end) = find_start_tag(&self.markup, element_id).ok_or_else(not_found)?;

        if VOID_ELEMENTS.contains(&tag.as_str()) || self.markup[..open_end].ends_with("/>") {
            return Err(not_found());
        }

        let close_start = find_matching_close(&self.markup, &tag, open_end).ok_or_else(not_found)?;
        Ok((tag, open_end, close_start))
    }
}

impl Document for HtmlDocument {
    fn append_html(&mut self, element_id: &str, html: &str) -> Result<()> {
        let (_, _, close_start) = self.locate(element_id)?;
        self.markup.insert_str(close_start, html);
        Ok(())
    }

    fn markup(&self) -> &str {
        &self.markup
    }
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn is_tag_boundary(bytes: &[u8], idx: usize) -> bool {
    matches!(bytes.get(idx), Some(b'>' | b'/' | b' ' | b'\t' | b'\n' | b'\r'))
}

/// Finds the first start tag outside comments whose `id` attribute equals
/// `element_id`. Returns the lowercased tag name and the offset just past
/// its closing `>`.
fn find_start_tag(markup: &str, element_id: &str) -> Option<(String, usize)> {
    let mut cursor = 0;

    while let Some(rel) = markup[cursor..].find('<') {
        let at = cursor + rel;
        let rest = &markup[at..];

        if rest.starts_with("<!--") {
            cursor = at + rest.find("-->").map(|end| end + 3)?;
            continue;
        }

        let name_len = rest[1..]
            .bytes()
            .take_while(|b| b.is_ascii_alphanumeric() || *b == b'-')
            .count();
        if name_len == 0 || !rest.as_bytes()[1].is_ascii_alphabetic() {
            cursor = at + 1;
            continue;
        }

        let open_end = find_tag_end(markup, at)?;
        let attributes = &markup[at + 1 + name_len..open_end - 1];
        if attribute_value(attributes, "id") == Some(element_id) {
            let tag = rest[1..1 + name_len].to_ascii_lowercase();
            return Some((tag, open_end));
        }

        cursor = open_end;
    }

    None
}

/// Offset just past the `>` closing the tag that starts at `tag_start`.
/// A `>` inside a quoted attribute value does not end the tag.
fn find_tag_end(markup: &str, tag_start: usize) -> Option<usize> {
    let mut quote = None;

    for (offset, byte) in markup.as_bytes()[tag_start..].iter().enumerate() {
        match (quote, *byte) {
            (Some(q), b) if b == q => quote = None,
            (Some(_), _) => {}
            (None, b'"' | b'\'') => quote = Some(*byte),
            (None, b'>') => return Some(tag_start + offset + 1),
            _ => {}
        }
    }

    None
}

/// Value of attribute `wanted` in the attribute text of a start tag.
fn attribute_value<'a>(attributes: &'a str, wanted: &str) -> Option<&'a str> {
    let bytes = attributes.as_bytes();
    let len = bytes.len();
    let mut i = 0;

    while i < len {
        while i < len && (bytes[i].is_ascii_whitespace() || bytes[i] == b'/') {
            i += 1;
        }

        let name_start = i;
        while i < len && !bytes[i].is_ascii_whitespace() && !matches!(bytes[i], b'=' | b'/') {
            i += 1;
        }
        let name = &attributes[name_start..i];

        while i < len && bytes[i].is_ascii_whitespace() {
            i += 1;
        }

        let mut value = "";
        if i < len && bytes[i] == b'=' {
            i += 1;
            while i < len && bytes[i].is_ascii_whitespace() {
                i += 1;
            }

            if i < len && matches!(bytes[i], b'"' | b'\'') {
                let quote = bytes[i];
                let value_start = i + 1;
                i = value_start;
                while i < len && bytes[i] != quote {
                    i += 1;
                }
                value = &attributes[value_start..i];
                i = (i + 1).min(len);
            } else {
                let value_start = i;
                while i < len && !bytes[i].is_ascii_whitespace() {
                    i += 1;
                }
                value = &attributes[value_start..i];
            }
        }

        if !name.is_empty() && name.eq_ignore_ascii_case(wanted) {
            return Some(value);
        }
    }

    None
}

/// Scans forward from `from` for the end tag balancing one open `tag`.
fn find_matching_close(markup: &str, tag: &str, from: usize) -> Option<usize> {
    let lower = markup.to_ascii_lowercase();
    let bytes = lower.as_bytes();
    let open = format!("<{}", tag);
    let close = format!("</{}", tag);
    let mut depth = 1usize;
    let mut cursor = from;

    while let Some(rel) = lower[cursor..].find('<') {
        let at = cursor + rel;
        let rest = &lower[at..];

        if rest.starts_with("<!--") {
            cursor = at + rest.find("-->").map(|end| end + 3)?;
            continue;
        }

        if rest.starts_with(&close) && is_tag_boundary(bytes, at + close.len()) {
            depth -= 1;
            if depth == 0 {
                return Some(at);
            }
        } else if rest.starts_with(&open) && is_tag_boundary(bytes, at + open.len()) {
            let tag_end = find_tag_end(&lower, at)?;
            if !lower[..tag_end].ends_with("/>") {
                depth += 1;
            }
            cursor = tag_end;
            continue;
        }

        cursor = at + 1;
    }

    None
}
