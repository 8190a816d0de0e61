use serde::{Deserialize, Serialize};
use serde_json::Value;

use shelf_core::{Catalog, CatalogItem, Error, ItemId, LocalStore, Result};

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Serialize)]
struct Envelope<'a> {
    version: u32,
    items: &'a [CatalogItem],
}

/// Accepted stored shapes: the versioned envelope, or the bare item array
/// written by the legacy browser app. Legacy arrays may hold `null` where a
/// favourited id had no catalog match.
#[derive(Deserialize)]
#[serde(untagged)]
enum Stored {
    Versioned { version: u32, items: Value },
    Legacy(Vec<Option<CatalogItem>>),
}

enum Rejected {
    Malformed(String),
    NewerVersion(u32),
}

/// The user's favourites: full item snapshots, at most one per id, in the
/// order they were added, mirrored to a `LocalStore` entry.
///
/// The in-memory list only changes after the store write succeeded. An entry
/// written with a newer schema version is never overwritten.
#[derive(Debug)]
pub struct Favourites<S> {
    store: S,
    key: String,
    items: Vec<CatalogItem>,
    newer_version: Option<u32>,
}

impl<S: LocalStore> Favourites<S> {
    /// Read the persisted list. A missing, unreadable or malformed entry yields an empty list.
    pub fn load(store: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let mut newer_version = None;
        let items = match store.get(&key) {
            Ok(None) => Vec::new(),
            Ok(Some(raw)) => match decode(&raw) {
                Ok(items) => items,
                Err(Rejected::NewerVersion(version)) => {
                    tracing::warn!(key = %key, version, "favourites entry has a newer schema, leaving it untouched");
                    newer_version = Some(version);
                    Vec::new()
                }
                Err(Rejected::Malformed(reason)) => {
                    tracing::warn!(key = %key, %reason, "ignoring malformed favourites entry");
                    Vec::new()
                }
            },
            Err(error) => {
                tracing::warn!(key = %key, %error, "favourites store unreadable, starting empty");
                Vec::new()
            }
        };
        tracing::debug!(key = %key, count = items.len(), "favourites loaded");
        Self { store, key, items, newer_version }
    }

    /// Add the catalog item `id`. Adding an id that is already present is a no-op.
    pub fn add(&mut self, catalog: &Catalog, id: ItemId) -> Result<&[CatalogItem]> {
        let item = catalog.get(id).ok_or(Error::UnknownItem(id))?;
        if self.contains(id) {
            tracing::debug!(id, "already a favourite");
            return Ok(&self.items);
        }
        self.items.push(item.clone());
        if let Err(error) = self.persist() {
            self.items.pop();
            return Err(error);
        }
        tracing::info!(id, count = self.items.len(), "favourite added");
        Ok(&self.items)
    }

    pub fn count(&self) -> usize { self.items.len() }

    pub fn items(&self) -> &[CatalogItem] { &self.items }

    pub fn contains(&self, id: ItemId) -> bool { self.items.iter().any(|i| i.id == id) }

    pub fn store(&self) -> &S { &self.store }

    fn persist(&mut self) -> Result<()> {
        if let Some(version) = self.newer_version {
            return Err(Error::FavouritesPersistence(format!(
                "'{}' holds schema version {version}, refusing to overwrite it with version {SCHEMA_VERSION}",
                self.key
            )));
        }
        let encoded = serde_json::to_string(&Envelope { version: SCHEMA_VERSION, items: &self.items })
            .map_err(|e| Error::FavouritesPersistence(e.to_string()))?;
        self.store.set(&self.key, &encoded)
    }
}

fn decode(raw: &str) -> std::result::Result<Vec<CatalogItem>, Rejected> {
    let items = match serde_json::from_str::<Stored>(raw).map_err(|e| Rejected::Malformed(e.to_string()))? {
        Stored::Versioned { version, items } if version == SCHEMA_VERSION => {
            serde_json::from_value::<Vec<CatalogItem>>(items).map_err(|e| Rejected::Malformed(e.to_string()))?
        }
        Stored::Versioned { version, .. } if version > SCHEMA_VERSION => return Err(Rejected::NewerVersion(version)),
        Stored::Versioned { version, .. } => return Err(Rejected::Malformed(format!("unsupported schema version {version}"))),
        Stored::Legacy(entries) => {
            let total = entries.len();
            let items: Vec<CatalogItem> = entries.into_iter().flatten().collect();
            if items.len() < total {
                tracing::warn!(skipped = total - items.len(), "skipping null legacy favourites");
            }
            items
        }
    };
    let mut unique: Vec<CatalogItem> = Vec::with_capacity(items.len());
    for item in items {
        if !unique.iter().any(|u| u.id == item.id) {
            unique.push(item);
        }
    }
    Ok(unique)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn item(id: ItemId) -> CatalogItem {
        CatalogItem { id, name: format!("Book {id}"), author: "A".into(), category: "c".into(), price: 1.25, img: String::new() }
    }

    #[test]
    fn legacy_array_with_duplicates_is_collapsed() {
        let raw = serde_json::to_string(&vec![item(2), item(1), item(2)]).unwrap();
        let favourites = Favourites::load(MemoryStore::with_entry("favourites", &raw), "favourites");
        assert_eq!(favourites.items().iter().map(|i| i.id).collect::<Vec<_>>(), vec![2, 1]);
    }

    #[test]
    fn newer_schema_version_loads_empty_and_is_never_overwritten() {
        let stored = r#"{"version":2,"items":[{"sku":"x-1"}]}"#;
        let catalog = Catalog::from_items(vec![item(1)]).unwrap();
        let mut favourites = Favourites::load(MemoryStore::with_entry("favourites", stored), "favourites");
        assert_eq!(favourites.count(), 0);

        let err = favourites.add(&catalog, 1).unwrap_err();
        assert!(matches!(err, Error::FavouritesPersistence(_)), "got {err:?}");
        assert_eq!(favourites.count(), 0);
        assert_eq!(favourites.store().get("favourites").unwrap().as_deref(), Some(stored));
    }

    #[test]
    fn older_schema_version_is_malformed_and_replaced() {
        let catalog = Catalog::from_items(vec![item(1)]).unwrap();
        let mut favourites = Favourites::load(MemoryStore::with_entry("favourites", r#"{"version":0,"items":[]}"#), "favourites");
        assert_eq!(favourites.count(), 0);
        assert_eq!(favourites.add(&catalog, 1).unwrap().len(), 1);
    }

    #[test]
    fn legacy_null_entries_are_skipped() {
        let raw = format!("[null,{},null]", serde_json::to_string(&item(4)).unwrap());
        let favourites = Favourites::load(MemoryStore::with_entry("favourites", &raw), "favourites");
        assert_eq!(favourites.items(), &[item(4)]);
    }

    #[test]
    fn writes_versioned_envelope() {
        let catalog = Catalog::from_items(vec![item(1)]).unwrap();
        let mut favourites = Favourites::load(MemoryStore::new(), "favourites");
        favourites.add(&catalog, 1).unwrap();
        let stored = favourites.store().get("favourites").unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&stored).unwrap();
        assert_eq!(value["version"], 1);
        assert_eq!(value["items"][0]["name"], "Book 1");
    }
}
