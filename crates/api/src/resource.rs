use crate::kind::ResourceKind;
use crate::qualifier::Qualifier;
use serde::Serialize;

/// Location of a value inside a shared file (e.g. one `<string>` in `strings.xml`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ByteSpan {
    pub offset: u64,
    pub size: u64,
}

/// One physical variant of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ResourceItem {
    pub qualifiers: &'static [Qualifier],
    /// Path relative to the packaged resource root, with `/` separators.
    pub path: &'static str,
    /// `None` when the item is the whole file.
    pub span: Option<ByteSpan>,
}

impl ResourceItem {
    pub fn is_default(&self) -> bool {
        self.qualifiers.is_empty()
    }
}

/// A logical resource as seen by application code.
///
/// `id` is `"<kind>:<key>"` and is stable across regenerations; loaders use it
/// as a cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Resource {
    pub id: &'static str,
    pub kind: ResourceKind,
    pub key: &'static str,
    pub items: &'static [ResourceItem],
}

impl Resource {
    /// The unqualified variant, if the resource has one.
    pub fn default_item(&self) -> Option<&'static ResourceItem> {
        self.items.iter().find(|item| item.is_default())
    }
}
