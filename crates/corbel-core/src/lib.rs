//! Corbel Core
//!
//! Value types and shared infrastructure for the corbel toolkit: integer
//! geometry, the generational storage behind the component tree, logging,
//! profiling and configuration.

pub mod alloc;
pub mod config;
pub mod geometry;
pub mod logging;
pub mod profiling;
