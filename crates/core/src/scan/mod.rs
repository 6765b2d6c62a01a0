pub mod directory;
pub mod scanner;
pub mod values;

pub use directory::{DirectoryKind, ResourceDirectory};
pub use scanner::{ResourceScanner, ScanResult};
pub use values::{ValueEntry, ValuesReader, XmlValuesReader};

use std::path::Path;

/// Hidden entries (`.DS_Store`, `.gitkeep`, editor swap files) never count as resources.
pub fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.starts_with('.'))
        .unwrap_or(false)
}

/// Path relative to `root` with `/` separators, as it appears in generated code.
pub fn relative_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
