pub mod error;
pub mod logging;

pub mod aggregate;
pub mod config;
pub mod emit;
pub mod generator;
pub mod model;
pub mod naming;
pub mod partition;
pub mod scan;

pub use config::GeneratorConfig;
pub use error::{CatalogError, Result};
pub use generator::{GenerationReport, Generator};
