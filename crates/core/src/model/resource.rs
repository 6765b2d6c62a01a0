use super::qualifier::QualifierSet;
use rescat_api::{ByteSpan, ResourceKind};
use std::path::PathBuf;
use xxhash_rust::xxh3::Xxh3;

/// One cataloged entry found by the scanner: a whole file, or one element of
/// a values file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceFile {
    pub path: PathBuf,
    /// Path relative to the resource root, `/`-separated.
    pub relative_path: String,
    pub kind: ResourceKind,
    pub qualifiers: QualifierSet,
    pub name: String,
    pub span: Option<ByteSpan>,
    pub content_hash: Option<u64>,
}

impl ResourceFile {
    pub fn id(&self) -> String {
        format!("{}:{}", self.kind.as_str(), self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceItem {
    pub qualifiers: QualifierSet,
    pub path: PathBuf,
    pub relative_path: String,
    pub span: Option<ByteSpan>,
    pub content_hash: Option<u64>,
}

impl From<ResourceFile> for ResourceItem {
    fn from(file: ResourceFile) -> Self {
        Self {
            qualifiers: file.qualifiers,
            path: file.path,
            relative_path: file.relative_path,
            span: file.span,
            content_hash: file.content_hash,
        }
    }
}

/// A resource as exposed to application code, with all its qualified variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalResource {
    pub kind: ResourceKind,
    pub name: String,
    /// Accessor name in generated code. Unique per kind once identifiers are assigned.
    pub identifier: String,
    /// Sorted by qualifier precedence, never empty.
    pub items: Vec<ResourceItem>,
}

impl LogicalResource {
    /// Stable id handed to the runtime loader.
    pub fn id(&self) -> String {
        format!("{}:{}", self.kind.as_str(), self.name)
    }

    /// Combined hash of every variant, `None` unless all variants were hashed.
    pub fn content_hash(&self) -> Option<u64> {
        let mut hasher = Xxh3::new();
        for item in &self.items {
            hasher.update(&item.content_hash?.to_le_bytes());
        }
        Some(hasher.digest())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(path: &str, hash: Option<u64>) -> ResourceItem {
        ResourceItem {
            qualifiers: QualifierSet::empty(),
            path: PathBuf::from(path),
            relative_path: path.to_string(),
            span: None,
            content_hash: hash,
        }
    }

    #[test]
    fn test_content_hash_requires_all_items() {
        let mut resource = LogicalResource {
            kind: ResourceKind::Drawable,
            name: "icon".to_string(),
            identifier: "icon".to_string(),
            items: vec![item("drawable/icon.png", Some(1)), item("drawable-en/icon.png", None)],
        };
        assert_eq!(resource.content_hash(), None);

        resource.items[1].content_hash = Some(2);
        let first = resource.content_hash();
        assert!(first.is_some());

        resource.items[1].content_hash = Some(3);
        assert_ne!(resource.content_hash(), first);
    }

    #[test]
    fn test_id() {
        let resource = LogicalResource {
            kind: ResourceKind::StringArray,
            name: "planets".to_string(),
            identifier: "planets".to_string(),
            items: vec![item("values/arrays.xml", None)],
        };
        assert_eq!(resource.id(), "string-array:planets");
    }
}
