use crate::error::{CatalogError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Resources per generated static table. Large tables slow down rustc's const
/// evaluation and IDE indexing long before any hard limit is reached.
pub const DEFAULT_MAX_SHARD_SIZE: usize = 500;

pub const DEFAULT_RUNTIME_CRATE: &str = "::rescat_api";

/// How resources are grouped before being cut into shards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShardGranularity {
    /// One shard sequence per resource kind (`drawable0.rs`, `string0.rs`, ...).
    #[default]
    PerType,
    /// One shard sequence over the whole catalog (`res0.rs`, ...).
    Namespace,
}

/// Visibility of the generated namespace modules and collector functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    #[default]
    Crate,
}

impl Visibility {
    pub fn keyword(&self) -> &'static str {
        match self {
            Visibility::Public => "pub",
            Visibility::Crate => "pub(crate)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    pub max_shard_size: usize,
    pub granularity: ShardGranularity,
    pub visibility: Visibility,
    /// Path of the crate providing `Resource` and friends, as written in generated code.
    pub runtime_crate: String,
    /// Prepended to every emitted item path.
    pub path_prefix: String,
    /// Annotate accessors with an xxh3 hash of the resource contents.
    pub content_hash: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_shard_size: DEFAULT_MAX_SHARD_SIZE,
            granularity: ShardGranularity::default(),
            visibility: Visibility::default(),
            runtime_crate: DEFAULT_RUNTIME_CRATE.to_string(),
            path_prefix: String::new(),
            content_hash: false,
        }
    }
}

impl GeneratorConfig {
    /// Load a JSON config file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| CatalogError::io(path, e))?;
        let config: GeneratorConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_shard_size == 0 {
            return Err(CatalogError::Config(
                "max_shard_size must be at least 1".to_string(),
            ));
        }

        let path = self
            .runtime_crate
            .strip_prefix("::")
            .unwrap_or(&self.runtime_crate);
        let valid_path = !path.is_empty()
            && path.split("::").all(|segment| {
                let mut chars = segment.chars();
                matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
                    && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
            });
        if !valid_path {
            return Err(CatalogError::Config(format!(
                "runtime_crate '{}' is not a valid Rust path",
                self.runtime_crate
            )));
        }

        if self.path_prefix.contains('\\') {
            return Err(CatalogError::Config(format!(
                "path_prefix '{}' must use '/' separators",
                self.path_prefix
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_defaults_are_valid() {
        let config = GeneratorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_shard_size, 500);
        assert_eq!(config.granularity, ShardGranularity::PerType);
    }

    #[test]
    fn test_load_partial_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rescat.json");
        fs::write(
            &path,
            r#"{ "max_shard_size": 100, "granularity": "namespace", "visibility": "public" }"#,
        )
        .unwrap();

        let config = GeneratorConfig::load(&path).unwrap();
        assert_eq!(config.max_shard_size, 100);
        assert_eq!(config.granularity, ShardGranularity::Namespace);
        assert_eq!(config.visibility, Visibility::Public);
        assert_eq!(config.runtime_crate, DEFAULT_RUNTIME_CRATE);
    }

    #[test]
    fn test_rejects_unknown_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rescat.json");
        fs::write(&path, r#"{ "shard_size": 100 }"#).unwrap();

        assert!(matches!(
            GeneratorConfig::load(&path),
            Err(CatalogError::Json(_))
        ));
    }

    #[test]
    fn test_rejects_zero_shard_size() {
        let config = GeneratorConfig {
            max_shard_size: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(CatalogError::Config(_))));
    }

    #[test]
    fn test_runtime_crate_paths() {
        let mut config = GeneratorConfig::default();
        config.runtime_crate = "crate::res::api".to_string();
        assert!(config.validate().is_ok());

        config.runtime_crate = "::1bad".to_string();
        assert!(config.validate().is_err());

        config.runtime_crate = "a::".to_string();
        assert!(config.validate().is_err());
    }
}
