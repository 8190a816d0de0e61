//! Persisted favourites and the local key-value stores behind them.
pub mod favourites;
pub mod store;

pub use favourites::{Favourites, SCHEMA_VERSION};
pub use store::{FileStore, MemoryStore};
