#![deny(dead_code)]
#![deny(unused_imports)]

pub mod catalog;
pub mod config;
pub mod error;
pub mod traits;
pub mod types;

pub use catalog::{load_from, Catalog, FileCatalogSource, RawCatalog};
pub use error::{Error, Result};
pub use traits::{CatalogSource, LocalStore, ViewAdapter};
pub use types::{CatalogItem, CategoryFilter, CategorySet, Intent, ItemId, QueryState, SortKey, ALL_CATEGORIES};
