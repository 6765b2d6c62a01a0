use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Resource root '{0}' does not exist or is not a directory")]
    InvalidRoot(PathBuf),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("I/O error at '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Directory walk failed: {0}")]
    Walk(#[from] ignore::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unknown resource type: '{name}' ({path})")]
    UnknownType { name: String, path: PathBuf },
    #[error("The 'files' directory doesn't support qualifiers: '{0}'")]
    QualifiedFilesDirectory(String),
    #[error(
        "Forbidden directory name '{0}'! String resources should be declared in 'values/strings.xml'"
    )]
    ForbiddenDirectory(String),
    #[error("'{path}' contains unknown qualifier: '{token}'")]
    UnknownQualifier { path: PathBuf, token: String },
    #[error("'{path}' contains repetitive qualifiers: '{first}' and '{second}'")]
    RepetitiveQualifiers {
        path: PathBuf,
        first: String,
        second: String,
    },
    #[error("'{path}': Region qualifier must be declared after language: '{language}-r{region}'")]
    RegionBeforeLanguage {
        path: PathBuf,
        language: String,
        region: String,
    },
    #[error("'{0}': Region qualifier must be used only with language")]
    RegionWithoutLanguage(PathBuf),
    #[error("Malformed resource file name '{path}': {reason}")]
    MalformedName { path: PathBuf, reason: String },
    #[error("'{path}' is not valid. {reason}")]
    InvalidValues { path: PathBuf, reason: String },
    #[error("Duplicate resource variant '{id}' [{qualifiers}]: '{first}' and '{second}'")]
    DuplicateVariant {
        id: String,
        qualifiers: String,
        first: PathBuf,
        second: PathBuf,
    },
}

impl CatalogError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CatalogError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
