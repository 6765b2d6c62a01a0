use rescat_core::config::GeneratorConfig;
use rescat_core::naming::NumericSuffix;
use rescat_core::scan::XmlValuesReader;
use rescat_core::{Generator, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Assembles a generator with the stock values reader and collision policy.
pub fn build_default_generator(
    root: impl Into<PathBuf>,
    out_dir: impl Into<PathBuf>,
    config: GeneratorConfig,
) -> Generator {
    Generator::new(root, out_dir, config)
        .with_values_reader(Arc::new(XmlValuesReader::new()))
        .with_collision_policy(Arc::new(NumericSuffix))
}

/// Resolve the effective configuration: the file at `path` if given, defaults otherwise.
pub fn load_config(path: Option<&Path>) -> Result<GeneratorConfig> {
    match path {
        Some(path) => {
            tracing::debug!("Loading generator config from {}", path.display());
            GeneratorConfig::load(path)
        }
        None => Ok(GeneratorConfig::default()),
    }
}

/// Initializes the logging system for a specific component.
/// This delegates to the core logging module.
pub fn init_logging(component: &str, to_stderr: bool) -> Option<impl Drop> {
    Some(rescat_core::logging::init_logging(component, to_stderr))
}
