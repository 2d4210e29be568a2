//! The allocation engine.
//!
//! Everything here derives its answers from the records in a
//! [`resource_store::ResourceStore`] at query time. No running totals are
//! cached anywhere, so a capacity or utilization figure can never drift
//! from the assignments it is computed from.
//!
//! The engine has four concerns: per-day engineer capacity, advisory
//! pre-checks for proposed assignments, project and department level
//! utilization aggregates, and skill analysis (gaps, distribution, and
//! staffing recommendations).

mod capacity;
mod error;
mod resolve;
mod skills;
mod utilization;
mod validator;

pub use capacity::*;
pub use error::*;
pub use skills::*;
pub use utilization::*;
pub use validator::*;
