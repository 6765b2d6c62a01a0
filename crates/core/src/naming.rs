//! Accessor identifiers.
//!
//! Logical names come from file names and values keys, so they may contain
//! anything a file system accepts. Each is mapped to a Rust identifier; names
//! that map to the same identifier within one resource kind are told apart by
//! a [`CollisionPolicy`].

use crate::aggregate::ResourceKey;
use crate::model::LogicalResource;
use rescat_api::ResourceKind;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use tracing::warn;

const RUST_KEYWORDS: &[&str] = &[
    "Self", "abstract", "as", "async", "await", "become", "box", "break", "const", "continue",
    "crate", "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if",
    "impl", "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub",
    "ref", "return", "self", "static", "struct", "super", "trait", "true", "try", "type", "typeof",
    "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

/// Map a logical name to a valid Rust identifier.
///
/// Characters outside `[A-Za-z0-9_]` become `_`, a leading digit gets a `_`
/// prefix and keywords get a `_` suffix. Already-valid identifiers are
/// returned unchanged.
pub fn sanitize(name: &str) -> String {
    let mut identifier: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();

    if identifier.is_empty() || identifier == "_" {
        return "__".to_string();
    }
    if identifier.starts_with(|c: char| c.is_ascii_digit()) {
        identifier.insert(0, '_');
    }
    if RUST_KEYWORDS.contains(&identifier.as_str()) {
        identifier.push('_');
    }
    identifier
}

/// Produces replacement identifiers for names whose sanitized form is taken.
pub trait CollisionPolicy: Send + Sync {
    /// Candidate for the `attempt`-th try (starting at 1) at disambiguating
    /// `base`. Candidates already in use are skipped by the caller.
    fn candidate(&self, base: &str, attempt: usize) -> String;
}

/// `name_2`, `name_3`, ...
#[derive(Debug, Default, Clone, Copy)]
pub struct NumericSuffix;

impl CollisionPolicy for NumericSuffix {
    fn candidate(&self, base: &str, attempt: usize) -> String {
        format!("{}_{}", base, attempt + 1)
    }
}

/// A logical name that could not keep its sanitized identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Collision {
    pub kind: ResourceKind,
    pub name: String,
    pub base: String,
    pub assigned: String,
}

/// Assign every resource an identifier that is unique within its kind.
///
/// Within a group of names sharing one sanitized form, the name that already
/// equals it keeps it; otherwise the lexicographically smallest name does.
/// The others receive policy candidates in lexicographic order of their names.
pub fn assign_identifiers(
    resources: &mut BTreeMap<ResourceKey, LogicalResource>,
    policy: &dyn CollisionPolicy,
) -> Vec<Collision> {
    let mut by_kind: BTreeMap<ResourceKind, BTreeMap<String, Vec<ResourceKey>>> = BTreeMap::new();
    for (key, resource) in resources.iter_mut() {
        resource.identifier = sanitize(&resource.name);
        by_kind
            .entry(resource.kind)
            .or_default()
            .entry(resource.identifier.clone())
            .or_default()
            .push(key.clone());
    }

    let mut collisions = Vec::new();
    for (kind, groups) in by_kind {
        let mut taken: HashSet<String> = groups.keys().cloned().collect();

        for (base, mut keys) in groups {
            if keys.len() < 2 {
                continue;
            }
            // BTreeMap keys arrive sorted by name already; this moves the exact match first.
            keys.sort_by_key(|(_, name)| (name != &base, name.clone()));

            for key in keys.into_iter().skip(1) {
                let mut attempt = 1;
                let assigned = loop {
                    let candidate = sanitize(&policy.candidate(&base, attempt));
                    if taken.insert(candidate.clone()) {
                        break candidate;
                    }
                    attempt += 1;
                };

                warn!(
                    "Resource {}:{} collides on identifier '{}'; using '{}'. Rename the resource to avoid the suffix.",
                    kind.as_str(),
                    key.1,
                    base,
                    assigned
                );

                if let Some(resource) = resources.get_mut(&key) {
                    resource.identifier = assigned.clone();
                }
                collisions.push(Collision {
                    kind,
                    name: key.1.clone(),
                    base: base.clone(),
                    assigned,
                });
            }
        }
    }

    collisions
}

/// Resources of each kind in emission order: byte-lexicographic by identifier.
pub fn group_by_kind(
    resources: BTreeMap<ResourceKey, LogicalResource>,
) -> BTreeMap<ResourceKind, Vec<LogicalResource>> {
    let mut grouped: BTreeMap<ResourceKind, Vec<LogicalResource>> = BTreeMap::new();
    for (_, resource) in resources {
        grouped.entry(resource.kind).or_default().push(resource);
    }
    for list in grouped.values_mut() {
        list.sort_by(|a, b| a.identifier.cmp(&b.identifier));
    }
    grouped
}
