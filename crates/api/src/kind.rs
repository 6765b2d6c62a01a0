use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kinds of resource a catalog can expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceKind {
    Drawable,
    Font,
    String,
    Plurals,
    StringArray,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 5] = [
        ResourceKind::Drawable,
        ResourceKind::Font,
        ResourceKind::String,
        ResourceKind::Plurals,
        ResourceKind::StringArray,
    ];

    /// Prefix used in stable resource ids (`"drawable:icon"`).
    pub const fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Drawable => "drawable",
            ResourceKind::Font => "font",
            ResourceKind::String => "string",
            ResourceKind::Plurals => "plurals",
            ResourceKind::StringArray => "string-array",
        }
    }

    /// Name of the generated namespace module holding this kind's accessors.
    pub const fn module_name(&self) -> &'static str {
        match self {
            ResourceKind::Drawable => "drawable",
            ResourceKind::Font => "font",
            ResourceKind::String => "string",
            ResourceKind::Plurals => "plurals",
            ResourceKind::StringArray => "string_array",
        }
    }

    /// Name of the enum variant as it appears in generated code.
    pub const fn variant_name(&self) -> &'static str {
        match self {
            ResourceKind::Drawable => "Drawable",
            ResourceKind::Font => "Font",
            ResourceKind::String => "String",
            ResourceKind::Plurals => "Plurals",
            ResourceKind::StringArray => "StringArray",
        }
    }
}

/// Returned when a token does not name a [`ResourceKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKind(pub String);

impl fmt::Display for UnknownKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown resource kind '{}'", self.0)
    }
}

impl std::error::Error for UnknownKind {}

impl FromStr for ResourceKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
