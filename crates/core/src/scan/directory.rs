use crate::error::{CatalogError, Result};
use crate::model::QualifierSet;
use rescat_api::ResourceKind;
use std::path::{Path, PathBuf};

/// What a top-level directory of the resource root holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryKind {
    /// One resource per file (`drawable`, `font`).
    Files(ResourceKind),
    /// Values files declaring string-like resources.
    Values,
    /// Raw files read by path; never cataloged.
    Raw,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDirectory {
    pub path: PathBuf,
    pub name: String,
    pub kind: DirectoryKind,
    pub qualifiers: QualifierSet,
}

impl ResourceDirectory {
    /// Classify a first-level directory named `type[-qualifier...]`.
    pub fn classify(path: &Path) -> Result<Self> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| CatalogError::MalformedName {
                path: path.to_path_buf(),
                reason: "directory name is not valid UTF-8".to_string(),
            })?
            .to_string();

        let mut tokens = name.split('-');
        let type_token = tokens.next().unwrap_or_default();
        let qualifier_tokens: Vec<&str> = tokens.collect();

        let kind = match type_token {
            "drawable" => DirectoryKind::Files(ResourceKind::Drawable),
            "font" => DirectoryKind::Files(ResourceKind::Font),
            "values" => DirectoryKind::Values,
            "files" => DirectoryKind::Raw,
            "string" => return Err(CatalogError::ForbiddenDirectory(name)),
            other => {
                return Err(CatalogError::UnknownType {
                    name: other.to_string(),
                    path: path.to_path_buf(),
                });
            }
        };

        if kind == DirectoryKind::Raw && !qualifier_tokens.is_empty() {
            return Err(CatalogError::QualifiedFilesDirectory(name));
        }

        let qualifiers = QualifierSet::parse(qualifier_tokens, path)?;

        Ok(Self {
            path: path.to_path_buf(),
            name,
            kind,
            qualifiers,
        })
    }
}
