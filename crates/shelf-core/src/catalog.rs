//! Catalog loading and validation.
//!
//! The catalog document is `{ "products": [ ... ] }`. Entries are decoded as
//! untyped JSON first so that a bad entry can be reported by position. The
//! first invalid entry rejects the whole batch: a catalog is either fully
//! valid or not loaded at all.
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::future::Future;
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::traits::CatalogSource;
use crate::types::{CatalogItem, CategorySet, ItemId};

#[derive(Debug, Clone, Deserialize)]
pub struct RawCatalog {
    pub products: Vec<Value>,
}

/// The read-only, validated product list of a session.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<CatalogItem>,
    positions: HashMap<ItemId, usize>,
    categories: CategorySet,
}

impl Catalog {
    pub fn empty() -> Self { Self::default() }

    pub fn load(raw: RawCatalog) -> Result<Self> {
        let items = raw
            .products
            .iter()
            .enumerate()
            .map(|(index, entry)| validate_entry(index, entry))
            .collect::<Result<Vec<_>>>()?;
        Self::from_items(items)
    }

    pub fn from_json_slice(bytes: &[u8]) -> Result<Self> {
        let raw: RawCatalog = serde_json::from_slice(bytes).map_err(|e| Error::CatalogLoad(format!("undecodable catalog document: {e}")))?;
        Self::load(raw)
    }

    /// Build a catalog from already-typed items, enforcing unique ids and non-negative prices.
    pub fn from_items(items: Vec<CatalogItem>) -> Result<Self> {
        let mut positions = HashMap::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            check_price(index, item.price)?;
            if positions.insert(item.id, index).is_some() {
                return Err(Error::malformed(index, format!("duplicate id {}", item.id)));
            }
        }
        let categories = CategorySet::from_items(&items);
        tracing::debug!(items = items.len(), categories = categories.len(), "catalog built");
        Ok(Self { items, positions, categories })
    }

    pub fn items(&self) -> &[CatalogItem] { &self.items }

    pub fn get(&self, id: ItemId) -> Option<&CatalogItem> { self.positions.get(&id).map(|&i| &self.items[i]) }

    pub fn categories(&self) -> &CategorySet { &self.categories }

    pub fn len(&self) -> usize { self.items.len() }

    pub fn is_empty(&self) -> bool { self.items.is_empty() }
}

/// Fetch and validate a catalog from `source`.
pub async fn load_from<S: CatalogSource>(source: &S) -> Result<Catalog> {
    let bytes = source.fetch().await?;
    let catalog = Catalog::from_json_slice(&bytes)?;
    tracing::info!(items = catalog.len(), categories = catalog.categories().len(), "catalog loaded");
    Ok(catalog)
}

/// Reads the catalog document from a file.
#[derive(Debug, Clone)]
pub struct FileCatalogSource {
    path: PathBuf,
}

impl FileCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self { Self { path: path.into() } }
}

impl CatalogSource for FileCatalogSource {
    fn fetch(&self) -> impl Future<Output = Result<Vec<u8>>> + Send {
        let path = self.path.clone();
        async move {
            tokio::fs::read(&path)
                .await
                .map_err(|e| Error::CatalogLoad(format!("{}: {e}", path.display())))
        }
    }
}

fn validate_entry(index: usize, entry: &Value) -> Result<CatalogItem> {
    let fields = entry.as_object().ok_or_else(|| Error::malformed(index, "entry is not an object"))?;
    let id = required(fields, index, "id")?
        .as_i64()
        .ok_or_else(|| Error::malformed(index, "field 'id' is not an integer"))?;
    let price = required(fields, index, "price")?
        .as_f64()
        .ok_or_else(|| Error::malformed(index, "field 'price' is not a number"))?;
    check_price(index, price)?;
    let img = match fields.get("img") {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(img)) => img.clone(),
        Some(_) => return Err(Error::malformed(index, "field 'img' is not a string")),
    };
    Ok(CatalogItem {
        id,
        name: string_field(fields, index, "name")?,
        author: string_field(fields, index, "author")?,
        category: string_field(fields, index, "category")?,
        price,
        img,
    })
}

fn required<'a>(fields: &'a Map<String, Value>, index: usize, name: &str) -> Result<&'a Value> {
    match fields.get(name) {
        None | Some(Value::Null) => Err(Error::malformed(index, format!("missing field '{name}'"))),
        Some(value) => Ok(value),
    }
}

fn string_field(fields: &Map<String, Value>, index: usize, name: &str) -> Result<String> {
    required(fields, index, name)?
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| Error::malformed(index, format!("field '{name}' is not a string")))
}

fn check_price(index: usize, price: f64) -> Result<()> {
    if price.is_finite() && price >= 0.0 {
        Ok(())
    } else {
        Err(Error::malformed(index, format!("price {price} is not a non-negative number")))
    }
}
