//! Boundary to the values-file format.
//!
//! The generator never interprets string contents. It only needs the kind,
//! name and byte span of every top-level element of a `values*/**.xml` file,
//! which is what [`ValuesReader`] returns.

use crate::error::{CatalogError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use rescat_api::{ByteSpan, ResourceKind};
use std::collections::HashSet;
use std::ops::Range;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueEntry {
    pub kind: ResourceKind,
    pub name: String,
    pub span: ByteSpan,
}

pub trait ValuesReader: Send + Sync {
    fn read(&self, path: &Path, content: &str) -> Result<Vec<ValueEntry>>;
}

static TAG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<(/?)([A-Za-z_][\w.-]*)((?:[^>/]|/[^>])*)(/?)>").expect("valid tag regex")
});
static SKIP_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<!--.*?-->|<!\[CDATA\[.*?\]\]>|<\?.*?\?>").expect("valid skip regex")
});
static NAME_ATTR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?:^|\s)name\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("valid attribute regex")
});

/// Element-level reader for Android-style `<resources>` files.
///
/// Recognizes `<string>`, `<plurals>` and `<string-array>` children of the
/// root element and ignores everything below them.
#[derive(Debug, Default)]
pub struct XmlValuesReader;

impl XmlValuesReader {
    pub fn new() -> Self {
        Self
    }

    fn element_kind(tag: &str) -> std::result::Result<ResourceKind, String> {
        match tag {
            "string" => Ok(ResourceKind::String),
            "plurals" => Ok(ResourceKind::Plurals),
            "string-array" => Ok(ResourceKind::StringArray),
            "drawable" | "font" => Err(format!("Unknown string resource type: '{}'.", tag)),
            other => Err(format!("Unknown resource type: '{}'.", other)),
        }
    }
}

struct OpenElement {
    kind: ResourceKind,
    name: String,
    start: usize,
}

impl ValuesReader for XmlValuesReader {
    fn read(&self, path: &Path, content: &str) -> Result<Vec<ValueEntry>> {
        let invalid = |reason: &str| CatalogError::InvalidValues {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        };

        let skipped: Vec<Range<usize>> = SKIP_RE.find_iter(content).map(|m| m.range()).collect();
        let in_skipped = |pos: usize| skipped.iter().any(|r| r.contains(&pos));

        let mut entries = Vec::new();
        let mut seen: HashSet<(ResourceKind, String)> = HashSet::new();
        let mut stack: Vec<String> = Vec::new();
        let mut open: Option<OpenElement> = None;
        let mut saw_root = false;

        for caps in TAG_RE.captures_iter(content) {
            let Some(whole) = caps.get(0) else { continue };
            if in_skipped(whole.start()) {
                continue;
            }
            let closing = !caps[1].is_empty();
            let tag = caps[2].to_string();
            let attrs = caps.get(3).map_or("", |m| m.as_str());
            let self_closing = !caps[4].is_empty();

            if closing {
                match stack.pop() {
                    Some(expected) if expected == tag => {}
                    _ => return Err(invalid("Check the file content.")),
                }
                if stack.len() == 1 {
                    if let Some(element) = open.take() {
                        entries.push(ValueEntry {
                            kind: element.kind,
                            name: element.name,
                            span: ByteSpan {
                                offset: element.start as u64,
                                size: (whole.end() - element.start) as u64,
                            },
                        });
                    }
                }
                continue;
            }

            match stack.len() {
                0 => {
                    if tag != "resources" || saw_root {
                        return Err(invalid("Check the file content."));
                    }
                    saw_root = true;
                }
                1 => {
                    let kind = Self::element_kind(&tag).map_err(|reason| invalid(&reason))?;
                    let name = NAME_ATTR_RE
                        .captures(attrs)
                        .and_then(|c| c.get(1).or_else(|| c.get(2)))
                        .map(|m| m.as_str().to_string())
                        .ok_or_else(|| invalid("Attribute 'name' not found."))?;
                    if name.is_empty() {
                        return Err(invalid("Attribute 'name' is empty."));
                    }
                    if !seen.insert((kind, name.clone())) {
                        return Err(invalid(&format!("Duplicated key '{}'.", name)));
                    }
                    if self_closing {
                        entries.push(ValueEntry {
                            kind,
                            name,
                            span: ByteSpan {
                                offset: whole.start() as u64,
                                size: whole.len() as u64,
                            },
                        });
                    } else {
                        open = Some(OpenElement {
                            kind,
                            name,
                            start: whole.start(),
                        });
                    }
                }
                _ => {}
            }

            if !self_closing {
                stack.push(tag);
            }
        }

        if !saw_root || !stack.is_empty() {
            return Err(invalid("Check the file content."));
        }

        Ok(entries)
    }
}
