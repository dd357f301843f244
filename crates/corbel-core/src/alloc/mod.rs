//! Collections used across corbel.
//!
//! - Re-exports of AHash-backed hash collections
//! - [`SparseSet`](sparse_set::SparseSet), a generational slot store that
//!   backs the component tree

pub mod sparse_set;

pub use ahash::{AHashMap as HashMap, AHashSet as HashSet, RandomState};
pub use sparse_set::{IndexSlot, SparseSet};
