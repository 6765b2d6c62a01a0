//! All-or-nothing publication of the generated file set.

use super::GeneratedFile;
use crate::error::{CatalogError, Result};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The output directory already held exactly these files.
    UpToDate,
    Written { files: usize },
}

pub struct OutputWriter {
    out_dir: PathBuf,
}

impl OutputWriter {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// True when the output directory holds the same file set with the same bytes.
    pub fn is_up_to_date(&self, files: &[GeneratedFile]) -> Result<bool> {
        if !self.out_dir.is_dir() {
            return Ok(false);
        }

        let mut existing = BTreeSet::new();
        for entry in WalkDir::new(&self.out_dir).min_depth(1) {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(self.out_dir.as_path()).to_path_buf();
                CatalogError::io(&path, e.into())
            })?;
            if entry.file_type().is_file() {
                if let Ok(relative) = entry.path().strip_prefix(&self.out_dir) {
                    existing.insert(relative.to_path_buf());
                }
            }
        }

        let expected: BTreeSet<PathBuf> = files.iter().map(|f| f.path.clone()).collect();
        if existing != expected {
            return Ok(false);
        }

        for file in files {
            let path = self.out_dir.join(&file.path);
            let current = fs::read(&path).map_err(|e| CatalogError::io(&path, e))?;
            if current != file.contents.as_bytes() {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Replace the output directory with exactly `files`.
    ///
    /// Files are written to a sibling staging directory which is swapped in
    /// once complete. On failure the staging directory is removed and the
    /// previous output stays in place.
    pub fn publish(&self, files: &[GeneratedFile]) -> Result<WriteOutcome> {
        if self.is_up_to_date(files)? {
            info!("Output {} is up to date", self.out_dir.display());
            return Ok(WriteOutcome::UpToDate);
        }

        let staging = self.sibling("staging")?;
        if let Err(e) = self.stage(&staging, files).and_then(|_| self.swap(&staging)) {
            if staging.exists() {
                if let Err(cleanup) = fs::remove_dir_all(&staging) {
                    warn!(
                        "Failed to remove staging directory {}: {}",
                        staging.display(),
                        cleanup
                    );
                }
            }
            return Err(e);
        }

        info!(
            "Wrote {} files to {}",
            files.len(),
            self.out_dir.display()
        );
        Ok(WriteOutcome::Written { files: files.len() })
    }

    /// Remove the output directory. Returns false if there was nothing to remove.
    pub fn clean(&self) -> Result<bool> {
        if !self.out_dir.exists() {
            return Ok(false);
        }
        fs::remove_dir_all(&self.out_dir).map_err(|e| CatalogError::io(&self.out_dir, e))?;
        info!("Removed {}", self.out_dir.display());
        Ok(true)
    }

    fn sibling(&self, tag: &str) -> Result<PathBuf> {
        let name = self
            .out_dir
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                CatalogError::Config(format!(
                    "output directory '{}' has no usable name",
                    self.out_dir.display()
                ))
            })?;
        let file_name = format!(".{}.{}-{}", name, tag, std::process::id());
        Ok(match self.out_dir.parent() {
            Some(parent) => parent.join(file_name),
            None => PathBuf::from(file_name),
        })
    }

    fn stage(&self, staging: &Path, files: &[GeneratedFile]) -> Result<()> {
        if staging.exists() {
            fs::remove_dir_all(staging).map_err(|e| CatalogError::io(staging, e))?;
        }
        fs::create_dir_all(staging).map_err(|e| CatalogError::io(staging, e))?;

        for file in files {
            let path = staging.join(&file.path);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).map_err(|e| CatalogError::io(parent, e))?;
            }
            fs::write(&path, &file.contents).map_err(|e| CatalogError::io(&path, e))?;
        }
        debug!("Staged {} files in {}", files.len(), staging.display());
        Ok(())
    }

    fn swap(&self, staging: &Path) -> Result<()> {
        if !self.out_dir.exists() {
            return fs::rename(staging, &self.out_dir)
                .map_err(|e| CatalogError::io(&self.out_dir, e));
        }

        let backup = self.sibling("old")?;
        if backup.exists() {
            fs::remove_dir_all(&backup).map_err(|e| CatalogError::io(&backup, e))?;
        }
        fs::rename(&self.out_dir, &backup).map_err(|e| CatalogError::io(&self.out_dir, e))?;

        if let Err(e) = fs::rename(staging, &self.out_dir) {
            if let Err(restore) = fs::rename(&backup, &self.out_dir) {
                warn!(
                    "Failed to restore previous output from {}: {}",
                    backup.display(),
                    restore
                );
            }
            return Err(CatalogError::io(&self.out_dir, e));
        }

        if let Err(e) = fs::remove_dir_all(&backup) {
            warn!("Failed to remove {}: {}", backup.display(), e);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(path: &str, contents: &str) -> GeneratedFile {
        GeneratedFile {
            path: PathBuf::from(path),
            contents: contents.to_string(),
        }
    }

    fn leftovers(parent: &Path) -> Vec<String> {
        fs::read_dir(parent)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .filter(|n| n.starts_with('.'))
            .collect()
    }

    #[test]
    fn test_publish_then_up_to_date() {
        let dir = tempfile::tempdir().unwrap();
        let writer = OutputWriter::new(dir.path().join("generated"));
        let files = vec![file("mod.rs", "mod a;\n"), file("a.rs", "// a\n")];

        assert_eq!(writer.publish(&files).unwrap(), WriteOutcome::Written { files: 2 });
        assert_eq!(writer.publish(&files).unwrap(), WriteOutcome::UpToDate);
        assert_eq!(
            fs::read_to_string(writer.out_dir().join("a.rs")).unwrap(),
            "// a\n"
        );
        assert!(leftovers(dir.path()).is_empty());
    }

    #[test]
    fn test_publish_removes_stale_files() {
        let dir = tempfile::tempdir().unwrap();
        let writer = OutputWriter::new(dir.path().join("generated"));
        writer
            .publish(&[file("mod.rs", "x"), file("old0.rs", "x")])
            .unwrap();

        let files = vec![file("mod.rs", "x")];
        assert!(!writer.is_up_to_date(&files).unwrap());
        writer.publish(&files).unwrap();
        assert!(!writer.out_dir().join("old0.rs").exists());
        assert!(writer.is_up_to_date(&files).unwrap());
    }

    #[test]
    fn test_changed_contents_are_rewritten() {
        let dir = tempfile::tempdir().unwrap();
        let writer = OutputWriter::new(dir.path().join("generated"));
        writer.publish(&[file("mod.rs", "one")]).unwrap();
        assert_eq!(
            writer.publish(&[file("mod.rs", "two")]).unwrap(),
            WriteOutcome::Written { files: 1 }
        );
        assert_eq!(
            fs::read_to_string(writer.out_dir().join("mod.rs")).unwrap(),
            "two"
        );
    }

    #[test]
    fn test_failed_publish_keeps_previous_output() {
        let dir = tempfile::tempdir().unwrap();
        let writer = OutputWriter::new(dir.path().join("generated"));
        writer.publish(&[file("mod.rs", "previous")]).unwrap();

        // "a.rs" is written as a file, so "a.rs/b.rs" cannot be created.
        let broken = vec![file("a.rs", "x"), file("a.rs/b.rs", "y"), file("mod.rs", "next")];
        assert!(writer.publish(&broken).is_err());

        assert_eq!(
            fs::read_to_string(writer.out_dir().join("mod.rs")).unwrap(),
            "previous"
        );
        assert!(!writer.out_dir().join("a.rs").exists());
        assert!(leftovers(dir.path()).is_empty());
    }

    #[test]
    fn test_clean() {
        let dir = tempfile::tempdir().unwrap();
        let writer = OutputWriter::new(dir.path().join("generated"));
        assert!(!writer.clean().unwrap());
        writer.publish(&[file("mod.rs", "x")]).unwrap();
        assert!(writer.clean().unwrap());
        assert!(!writer.out_dir().exists());
    }
}
