//! shelf-query
//!
//! The in-memory query pipeline over a loaded catalog: comparators, the
//! search/filter/sort stages and the `QueryEngine` that owns query state.
pub mod compare;
pub mod engine;
pub mod search;

pub use engine::QueryEngine;
pub use search::{filter_by_category, search, sort};
