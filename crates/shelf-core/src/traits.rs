use std::future::Future;

use crate::error::{Error, Result};
use crate::types::{CatalogItem, CategorySet};

/// Rendering boundary. The session pushes derived state into it after every intent.
pub trait ViewAdapter {
    fn render_items(&mut self, items: &[&CatalogItem]);
    fn render_categories(&mut self, categories: &CategorySet);
    fn render_favourites_count(&mut self, count: usize);
    fn render_error(&mut self, error: &Error) { tracing::warn!(%error, "unrendered error"); }
}

/// A single-namespace key-value store holding serialized strings.
pub trait LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Where the raw catalog document comes from. Fetched once at startup.
pub trait CatalogSource {
    fn fetch(&self) -> impl Future<Output = Result<Vec<u8>>> + Send;
}
