//! Resource handle types shared between the rescat generator and the code it emits.
//!
//! Generated shard files build `static` tables of [`Resource`] values, so every
//! type in this crate is constructible in a const context and holds only
//! `'static` borrows. Turning a [`Resource`] into bytes is the job of a runtime
//! loader, which picks one [`ResourceItem`] for the current environment and
//! reads the file at its path.

pub mod kind;
pub mod qualifier;
pub mod resource;

pub use kind::{ResourceKind, UnknownKind};
pub use qualifier::{Density, Qualifier, Theme};
pub use resource::{ByteSpan, Resource, ResourceItem};
