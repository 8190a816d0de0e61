//! Total-order comparators for each sortable key.
//!
//! Text keys compare case-folded strings so "apple" and "Banana" order the
//! same way regardless of capitalisation. Prices use IEEE total ordering.
use std::cmp::Ordering;

use shelf_core::{CatalogItem, SortKey};

pub type Comparator = fn(&CatalogItem, &CatalogItem) -> Ordering;

pub fn by_price(a: &CatalogItem, b: &CatalogItem) -> Ordering { a.price.total_cmp(&b.price) }

pub fn by_price_descending(a: &CatalogItem, b: &CatalogItem) -> Ordering { b.price.total_cmp(&a.price) }

pub fn by_name(a: &CatalogItem, b: &CatalogItem) -> Ordering { folded(&a.name, &b.name) }

pub fn by_author(a: &CatalogItem, b: &CatalogItem) -> Ordering { folded(&a.author, &b.author) }

pub fn by_category(a: &CatalogItem, b: &CatalogItem) -> Ordering { folded(&a.category, &b.category) }

/// The comparator for `key`, or `None` when the key keeps the input order.
pub fn comparator(key: SortKey) -> Option<Comparator> {
    match key {
        SortKey::None => None,
        SortKey::PriceAscending => Some(by_price),
        SortKey::PriceDescending => Some(by_price_descending),
        SortKey::Name => Some(by_name),
        SortKey::Author => Some(by_author),
        SortKey::Category => Some(by_category),
    }
}

pub fn compare(key: SortKey, a: &CatalogItem, b: &CatalogItem) -> Ordering {
    comparator(key).map_or(Ordering::Equal, |cmp| cmp(a, b))
}

fn folded(a: &str, b: &str) -> Ordering {
    // Fast path: most catalog text is already ASCII.
    if a.is_ascii() && b.is_ascii() {
        return a.bytes().map(|c| c.to_ascii_lowercase()).cmp(b.bytes().map(|c| c.to_ascii_lowercase()));
    }
    a.to_lowercase().cmp(&b.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i64, name: &str, author: &str, category: &str, price: f64) -> CatalogItem {
        CatalogItem { id, name: name.into(), author: author.into(), category: category.into(), price, img: String::new() }
    }

    #[test]
    fn price_orders_numerically() {
        let cheap = item(1, "a", "a", "a", 8.0);
        let dear = item(2, "a", "a", "a", 12.0);
        assert_eq!(by_price(&cheap, &dear), Ordering::Less);
        assert_eq!(by_price_descending(&cheap, &dear), Ordering::Greater);
        assert_eq!(by_price(&cheap, &cheap), Ordering::Equal);
    }

    #[test]
    fn text_keys_ignore_case() {
        let a = item(1, "apple", "zed", "Fantasy", 0.0);
        let b = item(2, "Banana", "Adams", "fantasy", 0.0);
        assert_eq!(by_name(&a, &b), Ordering::Less);
        assert_eq!(by_author(&a, &b), Ordering::Greater);
        assert_eq!(by_category(&a, &b), Ordering::Equal);
    }

    #[test]
    fn non_ascii_text_is_case_folded() {
        let a = item(1, "Émile", "x", "x", 0.0);
        let b = item(2, "émile", "x", "x", 0.0);
        assert_eq!(by_name(&a, &b), Ordering::Equal);
    }

    #[test]
    fn none_key_is_all_equal() {
        let a = item(1, "a", "a", "a", 1.0);
        let b = item(2, "b", "b", "b", 2.0);
        assert!(comparator(SortKey::None).is_none());
        assert_eq!(compare(SortKey::None, &a, &b), Ordering::Equal);
        assert_eq!(compare(SortKey::Name, &a, &b), Ordering::Less);
    }
}
