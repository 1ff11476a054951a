//! Domain layer: the hierarchy container and its builder
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

mod arena;
pub mod builder;
pub mod display;
pub mod entities;
pub mod error;
pub mod hierarchy;

pub use arena::Children;
pub use builder::HierarchyBuilder;
pub use display::TreeConvert;
pub use entities::*;
pub use error::{DomainError, HierarchyResult};
pub use hierarchy::Hierarchy;
