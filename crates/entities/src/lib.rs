//! Core entity definitions for the resource planner.
//!
//! This crate defines the domain types shared across the application:
//! users (engineers and managers), projects, and the assignments that
//! allocate engineer capacity to projects over calendar-day ranges.

mod assignment;
mod project;
mod user;

pub use assignment::*;
pub use project::*;
pub use user::*;
