//! Shard partitioning.
//!
//! Shard membership is a pure function of the sorted resource list: shard `k`
//! holds positions `[k*M, min((k+1)*M, total))`. Inserting a resource only
//! moves the boundaries of the shard it lands in and of the shards after it.

use crate::config::ShardGranularity;
use crate::error::{CatalogError, Result};
use crate::model::LogicalResource;
use rescat_api::ResourceKind;
use std::collections::BTreeMap;
use std::fmt;

/// The resource sequence a shard was cut from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ShardGroup {
    Kind(ResourceKind),
    Namespace,
}

impl ShardGroup {
    /// Generated module (and file stem) for shard `index`: `drawable0`, `res3`.
    pub fn module_name(&self, index: usize) -> String {
        match self {
            ShardGroup::Kind(kind) => format!("{}{}", kind.module_name(), index),
            ShardGroup::Namespace => format!("res{}", index),
        }
    }

    /// Display name for logs and reports: `Drawable0`, `Res3`.
    pub fn container_name(&self, index: usize) -> String {
        match self {
            ShardGroup::Kind(kind) => format!("{}{}", kind.variant_name(), index),
            ShardGroup::Namespace => format!("Res{}", index),
        }
    }
}

impl fmt::Display for ShardGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShardGroup::Kind(kind) => f.write_str(kind.as_str()),
            ShardGroup::Namespace => f.write_str("namespace"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shard {
    pub group: ShardGroup,
    pub index: usize,
    pub members: Vec<LogicalResource>,
}

impl Shard {
    pub fn module_name(&self) -> String {
        self.group.module_name(self.index)
    }

    pub fn container_name(&self) -> String {
        self.group.container_name(self.index)
    }

    /// Kinds present in this shard, in kind order.
    pub fn kinds(&self) -> Vec<ResourceKind> {
        let mut kinds: Vec<ResourceKind> = self.members.iter().map(|r| r.kind).collect();
        kinds.sort();
        kinds.dedup();
        kinds
    }
}

/// Cut `items` into consecutive chunks of at most `max` elements, preserving order.
pub fn partition<T>(items: Vec<T>, max: usize) -> Result<Vec<Vec<T>>> {
    if max == 0 {
        return Err(CatalogError::Config(
            "max_shard_size must be at least 1".to_string(),
        ));
    }

    let mut chunks = Vec::with_capacity(items.len().div_ceil(max));
    let mut iter = items.into_iter().peekable();
    while iter.peek().is_some() {
        chunks.push(iter.by_ref().take(max).collect());
    }
    Ok(chunks)
}

/// Build every shard of the catalog.
///
/// `grouped` must hold each kind's resources in emission order. Kinds without
/// resources produce no shards.
pub fn build_shards(
    grouped: BTreeMap<ResourceKind, Vec<LogicalResource>>,
    granularity: ShardGranularity,
    max_shard_size: usize,
) -> Result<Vec<Shard>> {
    let sequences: Vec<(ShardGroup, Vec<LogicalResource>)> = match granularity {
        ShardGranularity::PerType => grouped
            .into_iter()
            .map(|(kind, resources)| (ShardGroup::Kind(kind), resources))
            .collect(),
        ShardGranularity::Namespace => {
            vec![(ShardGroup::Namespace, grouped.into_values().flatten().collect())]
        }
    };

    let mut shards = Vec::new();
    for (group, resources) in sequences {
        for (index, members) in partition(resources, max_shard_size)?.into_iter().enumerate() {
            shards.push(Shard {
                group,
                index,
                members,
            });
        }
    }
    Ok(shards)
}
