//! Resource tree scanner.
//!
//! Walks every first-level type directory of the resource root in parallel and
//! turns each file (or each values element) into a [`ResourceFile`]. The
//! combined inventory is sorted before it is returned, so the degree of
//! parallelism never shows in the output.

use super::directory::{DirectoryKind, ResourceDirectory};
use super::values::ValuesReader;
use super::{is_hidden, relative_path};
use crate::error::{CatalogError, Result};
use crate::model::{QualifierSet, ResourceFile};
use ignore::WalkBuilder;
use rayon::prelude::*;
use rescat_api::ResourceKind;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use xxhash_rust::xxh3::xxh3_64;

pub struct ResourceScanner {
    root: PathBuf,
    values_reader: Arc<dyn ValuesReader>,
    hash_contents: bool,
}

/// Inventory produced by one scan.
#[derive(Debug, Default, Clone)]
pub struct ScanResult {
    /// Sorted by relative path, then by position inside the file.
    pub files: Vec<ResourceFile>,
    /// Files that were seen but are not cataloged (raw files, stray files).
    pub ignored: Vec<PathBuf>,
    pub duration: Duration,
}

struct DirectoryScan {
    files: Vec<ResourceFile>,
    ignored: Vec<PathBuf>,
}

impl ResourceScanner {
    pub fn new(root: impl Into<PathBuf>, values_reader: Arc<dyn ValuesReader>) -> Self {
        Self {
            root: root.into(),
            values_reader,
            hash_contents: false,
        }
    }

    /// Hash every cataloged file (or values element) with xxh3.
    pub fn with_content_hash(mut self, enabled: bool) -> Self {
        self.hash_contents = enabled;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn scan(&self) -> Result<ScanResult> {
        let start = Instant::now();

        if !self.root.is_dir() {
            return Err(CatalogError::InvalidRoot(self.root.clone()));
        }

        let mut result = ScanResult::default();
        let mut directories = Vec::new();

        let entries = fs::read_dir(&self.root).map_err(|e| CatalogError::io(&self.root, e))?;
        for entry in entries {
            let entry = entry.map_err(|e| CatalogError::io(&self.root, e))?;
            let path = entry.path();
            if is_hidden(&path) {
                continue;
            }
            // Follows symlinks, so a linked type directory is scanned like any other.
            let metadata = fs::metadata(&path).map_err(|e| CatalogError::io(&path, e))?;
            if metadata.is_dir() {
                directories.push(ResourceDirectory::classify(&path)?);
            } else {
                debug!("Ignoring file outside of a type directory: {:?}", path);
                result.ignored.push(path);
            }
        }
        directories.sort_by(|a, b| a.name.cmp(&b.name));

        // Gathered in directory order so that the reported error does not
        // depend on scheduling.
        let scans = directories
            .par_iter()
            .map(|dir| self.scan_directory(dir))
            .collect::<Vec<Result<DirectoryScan>>>()
            .into_iter()
            .collect::<Result<Vec<_>>>()?;

        for scan in scans {
            result.files.extend(scan.files);
            result.ignored.extend(scan.ignored);
        }

        result.files.sort_by(|a, b| {
            a.relative_path
                .cmp(&b.relative_path)
                .then_with(|| a.span.map(|s| s.offset).cmp(&b.span.map(|s| s.offset)))
        });
        result.ignored.sort();
        result.duration = start.elapsed();

        info!(
            "Resource scan complete: {} entries from {} directories, {} ignored in {:?}",
            result.files.len(),
            directories.len(),
            result.ignored.len(),
            result.duration
        );

        Ok(result)
    }

    fn scan_directory(&self, dir: &ResourceDirectory) -> Result<DirectoryScan> {
        let dir_start = Instant::now();
        let mut scan = DirectoryScan {
            files: Vec::new(),
            ignored: Vec::new(),
        };

        for path in Self::collect_paths(&dir.path)? {
            match dir.kind {
                DirectoryKind::Files(kind) => {
                    scan.files.push(self.process_file(dir, kind, &path)?);
                }
                DirectoryKind::Values => {
                    if path.extension().and_then(|e| e.to_str()) == Some("xml") {
                        scan.files.extend(self.process_values(dir, &path)?);
                    } else {
                        warn!("Ignoring non-XML file in values directory: {:?}", path);
                        scan.ignored.push(path);
                    }
                }
                DirectoryKind::Raw => scan.ignored.push(path),
            }
        }

        debug!(
            "Directory {} yielded {} entries in {:?}",
            dir.name,
            scan.files.len(),
            dir_start.elapsed()
        );

        Ok(scan)
    }

    fn collect_paths(dir: &Path) -> Result<Vec<PathBuf>> {
        let mut paths = Vec::new();
        let walker = WalkBuilder::new(dir)
            .hidden(true)
            .ignore(false)
            .git_ignore(false)
            .git_global(false)
            .git_exclude(false)
            .parents(false)
            .follow_links(true)
            .build();

        for entry in walker {
            let entry = entry?;
            if entry.file_type().is_some_and(|t| t.is_file()) {
                paths.push(entry.into_path());
            }
        }
        paths.sort();
        Ok(paths)
    }

    fn process_file(
        &self,
        dir: &ResourceDirectory,
        kind: ResourceKind,
        path: &Path,
    ) -> Result<ResourceFile> {
        let (name, file_qualifiers) = parse_file_name(path)?;
        let qualifiers = if file_qualifiers.is_empty() {
            dir.qualifiers.clone()
        } else {
            dir.qualifiers.merge(&file_qualifiers, path)?
        };

        let content_hash = if self.hash_contents {
            let content = fs::read(path).map_err(|e| CatalogError::io(path, e))?;
            Some(xxh3_64(&content))
        } else {
            None
        };

        Ok(ResourceFile {
            path: path.to_path_buf(),
            relative_path: relative_path(&self.root, path),
            kind,
            qualifiers,
            name,
            span: None,
            content_hash,
        })
    }

    fn process_values(&self, dir: &ResourceDirectory, path: &Path) -> Result<Vec<ResourceFile>> {
        let content = fs::read_to_string(path).map_err(|e| CatalogError::io(path, e))?;
        let relative = relative_path(&self.root, path);

        let entries = self.values_reader.read(path, &content)?;
        Ok(entries
            .into_iter()
            .map(|entry| {
                let content_hash = self.hash_contents.then(|| {
                    let start = entry.span.offset as usize;
                    let end = start + entry.span.size as usize;
                    xxh3_64(content.as_bytes().get(start..end).unwrap_or_default())
                });
                ResourceFile {
                    path: path.to_path_buf(),
                    relative_path: relative.clone(),
                    kind: entry.kind,
                    qualifiers: dir.qualifiers.clone(),
                    name: entry.name,
                    span: Some(entry.span),
                    content_hash,
                }
            })
            .collect())
    }
}

/// Split `name[-qualifier...].ext` into the logical name and its qualifiers.
pub fn parse_file_name(path: &Path) -> Result<(String, QualifierSet)> {
    let malformed = |reason: &str| CatalogError::MalformedName {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    };

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| malformed("file name is not valid UTF-8"))?;

    let (stem, extension) = file_name
        .rsplit_once('.')
        .ok_or_else(|| malformed("expected 'name[-qualifier...].ext'"))?;
    if extension.is_empty() {
        return Err(malformed("empty file extension"));
    }

    let mut tokens = stem.split('-');
    let name = tokens.next().unwrap_or_default();
    if name.is_empty() {
        return Err(malformed("empty resource name"));
    }

    let qualifiers = QualifierSet::parse(tokens, path)?;
    Ok((name.to_string(), qualifiers))
}
