//! Domain types shared by the query engine, the favourites store and the session.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

pub type ItemId = i64;

/// The literal value a view uses for the "no filtering" pseudo-category.
pub const ALL_CATEGORIES: &str = "all";

/// A purchasable catalog entry.
///
/// - `id`: unique within a catalog and stable for the session
/// - `category`: one of the catalog's `CategorySet` values
/// - `price`: finite and non-negative
/// - `img`: opaque image reference, passed through to the view
///
/// The same shape is used for the catalog document and for persisted
/// favourites snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: ItemId,
    pub name: String,
    pub author: String,
    pub category: String,
    pub price: f64,
    #[serde(default)]
    pub img: String,
}

/// Distinct categories of a catalog in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategorySet {
    categories: Vec<String>,
}

impl CategorySet {
    pub fn from_items<'a, I>(items: I) -> Self
    where
        I: IntoIterator<Item = &'a CatalogItem>,
    {
        let mut set = Self::default();
        for item in items {
            if !set.contains(&item.category) {
                set.categories.push(item.category.clone());
            }
        }
        set
    }

    pub fn contains(&self, category: &str) -> bool { self.categories.iter().any(|c| c == category) }

    pub fn iter(&self) -> impl Iterator<Item = &str> { self.categories.iter().map(String::as_str) }

    pub fn len(&self) -> usize { self.categories.len() }

    pub fn is_empty(&self) -> bool { self.categories.is_empty() }

    /// Resolve a category value coming from a view.
    ///
    /// `"all"` always maps to [`CategoryFilter::All`]; anything else must be a
    /// member of the set.
    pub fn resolve(&self, value: &str) -> Result<CategoryFilter> {
        if value == ALL_CATEGORIES {
            return Ok(CategoryFilter::All);
        }
        if self.contains(value) {
            Ok(CategoryFilter::Only(value.to_string()))
        } else {
            Err(Error::invalid_parameter("category", value))
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    pub fn admits(&self, item: &CatalogItem) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => item.category == *category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL_CATEGORIES),
            Self::Only(category) => f.write_str(category),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    None,
    PriceAscending,
    PriceDescending,
    Name,
    Author,
    Category,
}

impl SortKey {
    pub const ALL: [SortKey; 6] = [
        SortKey::None,
        SortKey::PriceAscending,
        SortKey::PriceDescending,
        SortKey::Name,
        SortKey::Author,
        SortKey::Category,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::PriceAscending => "price-ascending",
            Self::PriceDescending => "price-descending",
            Self::Name => "name",
            Self::Author => "author",
            Self::Category => "category",
        }
    }
}

impl FromStr for SortKey {
    type Err = Error;

    /// Accepts the canonical names plus `""` for `none` and the `low`/`high`
    /// values older sort selectors emit.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "" | "none" => Ok(Self::None),
            "price-ascending" | "low" => Ok(Self::PriceAscending),
            "price-descending" | "high" => Ok(Self::PriceDescending),
            "name" => Ok(Self::Name),
            "author" => Ok(Self::Author),
            "category" => Ok(Self::Category),
            other => Err(Error::invalid_parameter("sort key", other)),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// User-adjustable parameters that derive the rendered view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryState {
    pub search_text: String,
    pub sort_key: SortKey,
    pub category: CategoryFilter,
}

/// Intents a view raises into the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Search text changed while typing; subject to debouncing.
    SearchTextChanged(String),
    /// Search explicitly submitted; applied immediately.
    SearchSubmitted(String),
    SortKeyChanged(String),
    CategoryChanged(String),
    AddToFavourites(ItemId),
    /// Clear search text, sort key and category filter.
    Reset,
}
