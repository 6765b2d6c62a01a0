//! In-memory catalog model, rebuilt from scratch on every generation run.

pub mod qualifier;
pub mod resource;

pub use qualifier::{Dimension, Qualifier, QualifierSet};
pub use resource::{LogicalResource, ResourceFile, ResourceItem};
