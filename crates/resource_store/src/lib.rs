//! Storage for resource-planning records.
//!
//! This crate provides the [`ResourceStore`] abstraction over users,
//! projects, and assignments, plus the in-memory implementation backing
//! the service. Write paths validate structural invariants up front, and
//! assignment writes enforce the 100% overlap budget atomically so no
//! interleaving of writers can over-allocate an engineer.

mod error;
mod memory;
mod traits;
mod validate;

pub use error::*;
pub use memory::*;
pub use traits::*;
