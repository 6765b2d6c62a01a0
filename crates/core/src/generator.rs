//! One-shot generation pipeline: scan, aggregate, name, partition, emit, publish.

use crate::aggregate::aggregate;
use crate::config::GeneratorConfig;
use crate::emit::{CatalogEmitter, GeneratedFile, OutputWriter, WriteOutcome};
use crate::error::Result;
use crate::naming::{Collision, CollisionPolicy, NumericSuffix, assign_identifiers, group_by_kind};
use crate::partition::{Shard, build_shards};
use crate::scan::{ResourceScanner, ValuesReader, XmlValuesReader};
use rescat_api::ResourceKind;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

pub struct Generator {
    root: PathBuf,
    out_dir: PathBuf,
    config: GeneratorConfig,
    values_reader: Arc<dyn ValuesReader>,
    collision_policy: Arc<dyn CollisionPolicy>,
}

/// Everything a run would publish, computed without touching the output directory.
#[derive(Debug, Clone)]
pub struct Plan {
    pub resources: BTreeMap<ResourceKind, usize>,
    pub shards: Vec<Shard>,
    pub collisions: Vec<Collision>,
    pub files: Vec<GeneratedFile>,
    pub ignored: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShardSummary {
    pub module: String,
    pub container: String,
    pub size: usize,
}

impl From<&Shard> for ShardSummary {
    fn from(shard: &Shard) -> Self {
        Self {
            module: shard.module_name(),
            container: shard.container_name(),
            size: shard.members.len(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    pub resources: BTreeMap<ResourceKind, usize>,
    pub shards: Vec<ShardSummary>,
    pub collisions: Vec<Collision>,
    pub files_written: usize,
    /// False when the output directory was already up to date.
    pub changed: bool,
    pub duration: Duration,
}

impl GenerationReport {
    pub fn total_resources(&self) -> usize {
        self.resources.values().sum()
    }
}

impl Generator {
    pub fn new(root: impl Into<PathBuf>, out_dir: impl Into<PathBuf>, config: GeneratorConfig) -> Self {
        Self {
            root: root.into(),
            out_dir: out_dir.into(),
            config,
            values_reader: Arc::new(XmlValuesReader::new()),
            collision_policy: Arc::new(NumericSuffix),
        }
    }

    pub fn with_values_reader(mut self, reader: Arc<dyn ValuesReader>) -> Self {
        self.values_reader = reader;
        self
    }

    pub fn with_collision_policy(mut self, policy: Arc<dyn CollisionPolicy>) -> Self {
        self.collision_policy = policy;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Run the pipeline up to emission.
    pub fn plan(&self) -> Result<Plan> {
        self.config.validate()?;

        let scan = ResourceScanner::new(&self.root, Arc::clone(&self.values_reader))
            .with_content_hash(self.config.content_hash)
            .scan()?;
        let ignored = scan.ignored.len();

        let mut catalog = aggregate(scan.files)?;
        let collisions = assign_identifiers(&mut catalog, self.collision_policy.as_ref());

        let grouped = group_by_kind(catalog);
        let resources: BTreeMap<ResourceKind, usize> =
            grouped.iter().map(|(kind, list)| (*kind, list.len())).collect();

        let shards = build_shards(grouped, self.config.granularity, self.config.max_shard_size)?;
        for shard in &shards {
            debug!("{}: {} resources", shard.container_name(), shard.members.len());
        }

        let files = CatalogEmitter::new(self.config.clone()).emit(&shards);

        Ok(Plan {
            resources,
            shards,
            collisions,
            files,
            ignored,
        })
    }

    pub fn run(&self) -> Result<GenerationReport> {
        let start = Instant::now();
        info!(
            "Generating resource catalog from {} into {}",
            self.root.display(),
            self.out_dir.display()
        );

        let plan = self.plan()?;
        let outcome = OutputWriter::new(&self.out_dir).publish(&plan.files)?;
        let (files_written, changed) = match outcome {
            WriteOutcome::UpToDate => (0, false),
            WriteOutcome::Written { files } => (files, true),
        };

        let report = GenerationReport {
            resources: plan.resources,
            shards: plan.shards.iter().map(ShardSummary::from).collect(),
            collisions: plan.collisions,
            files_written,
            changed,
            duration: start.elapsed(),
        };

        info!(
            "Catalog generated: {} resources in {} shards, {} collisions, {} files written in {:?}",
            report.total_resources(),
            report.shards.len(),
            report.collisions.len(),
            report.files_written,
            report.duration
        );

        Ok(report)
    }
}
