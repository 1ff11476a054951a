//! Application layer: services and use cases
//!
//! This layer loads hierarchy descriptions and drives the domain builder.
//! It depends on I/O boundary traits, never on the filesystem directly.

pub mod error;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
