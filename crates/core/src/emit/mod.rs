//! Code emission.
//!
//! Turns the shard list into in-memory files. Nothing here touches the file
//! system; [`writer::OutputWriter`] publishes the result.

pub mod code;
pub mod rust;
pub mod writer;

pub use writer::{OutputWriter, WriteOutcome};

use crate::config::GeneratorConfig;
use crate::partition::Shard;
use std::path::PathBuf;
use tracing::debug;

pub const ROOT_MODULE: &str = "mod.rs";

/// One emitted source file, relative to the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub contents: String,
}

pub struct CatalogEmitter {
    config: GeneratorConfig,
}

impl CatalogEmitter {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Emit one file per shard plus the root module, sorted by path.
    pub fn emit(&self, shards: &[Shard]) -> Vec<GeneratedFile> {
        let mut files: Vec<GeneratedFile> = shards
            .iter()
            .map(|shard| GeneratedFile {
                path: PathBuf::from(format!("{}.rs", shard.module_name())),
                contents: rust::render_shard(shard, &self.config),
            })
            .collect();

        files.push(GeneratedFile {
            path: PathBuf::from(ROOT_MODULE),
            contents: rust::render_root(shards, &self.config),
        });
        files.sort_by(|a, b| a.path.cmp(&b.path));

        debug!("Emitted {} files for {} shards", files.len(), shards.len());
        files
    }
}
