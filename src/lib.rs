//! Immutable hierarchies.
//!
//! A [`Hierarchy`](domain::Hierarchy) is a read-only tree over a flat set of
//! elements. It is assembled with a [`HierarchyBuilder`](domain::HierarchyBuilder),
//! validated once by `build()` and afterwards answers parent and children
//! queries in O(1) per lookup.
//!
//! Layers:
//! - `domain`: the container, its builder and errors (no I/O)
//! - `application`: loading hierarchy descriptions from TOML files
//! - `infrastructure`: filesystem boundary and service wiring
//! - `cli`: the `hierarchy` command-line tool

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
