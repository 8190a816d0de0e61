//! The three stages of the query pipeline.
//!
//! Every stage borrows its input and returns a new vector of references, so a
//! caller's collection is never reordered or narrowed in place.
use shelf_core::{CatalogItem, CategoryFilter, SortKey};

use crate::compare::comparator;

/// Case-insensitive substring search over name, author and category.
///
/// The needle is matched literally: characters such as `(` or `*` have no
/// special meaning. An empty needle keeps every item. Input order is preserved.
pub fn search<'a, I>(items: I, text: &str) -> Vec<&'a CatalogItem>
where
    I: IntoIterator<Item = &'a CatalogItem>,
{
    if text.is_empty() {
        return items.into_iter().collect();
    }
    let needle = text.to_lowercase();
    items.into_iter().filter(|item| matches(item, &needle)).collect()
}

/// `needle` must already be lower-cased.
pub fn matches(item: &CatalogItem, needle: &str) -> bool {
    [&item.name, &item.author, &item.category].into_iter().any(|field| field.to_lowercase().contains(needle))
}

/// Keep items of the selected category (exact, case-sensitive). `All` keeps everything.
pub fn filter_by_category<'a, I>(items: I, category: &CategoryFilter) -> Vec<&'a CatalogItem>
where
    I: IntoIterator<Item = &'a CatalogItem>,
{
    items.into_iter().filter(|item| category.admits(item)).collect()
}

/// Stable sort into a new vector; ties keep their input order.
pub fn sort<'a>(items: &[&'a CatalogItem], key: SortKey) -> Vec<&'a CatalogItem> {
    let mut sorted = items.to_vec();
    if let Some(cmp) = comparator(key) {
        sorted.sort_by(|a, b| cmp(a, b));
    }
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn books() -> Vec<CatalogItem> {
        vec![
            CatalogItem { id: 1, name: "Dune".into(), author: "Herbert".into(), category: "scifi".into(), price: 12.0, img: String::new() },
            CatalogItem { id: 2, name: "Hobbit".into(), author: "Tolkien".into(), category: "fantasy".into(), price: 8.0, img: String::new() },
            CatalogItem { id: 3, name: "Emma (Unabridged)".into(), author: "Austen".into(), category: "classics".into(), price: 8.0, img: String::new() },
        ]
    }

    fn ids(items: &[&CatalogItem]) -> Vec<i64> { items.iter().map(|i| i.id).collect() }

    #[test]
    fn search_matches_any_field_case_insensitively() {
        let books = books();
        assert_eq!(ids(&search(&books, "o")), vec![2]);
        assert_eq!(ids(&search(&books, "HERB")), vec![1]);
        assert_eq!(ids(&search(&books, "Fantasy")), vec![2]);
    }

    #[test]
    fn search_treats_metacharacters_literally() {
        let books = books();
        assert_eq!(ids(&search(&books, "(")), vec![3]);
        assert_eq!(ids(&search(&books, "(unabridged)")), vec![3]);
        assert!(search(&books, ".*").is_empty());
        assert!(search(&books, "[").is_empty());
    }

    #[test]
    fn empty_search_keeps_everything_in_order() {
        let books = books();
        assert_eq!(ids(&search(&books, "")), vec![1, 2, 3]);
    }

    #[test]
    fn filter_all_is_identity_and_only_is_exact() {
        let books = books();
        assert_eq!(ids(&filter_by_category(&books, &CategoryFilter::All)), vec![1, 2, 3]);
        assert_eq!(ids(&filter_by_category(&books, &CategoryFilter::Only("scifi".into()))), vec![1]);
        assert!(filter_by_category(&books, &CategoryFilter::Only("SciFi".into())).is_empty());
        assert!(filter_by_category(&books, &CategoryFilter::Only("sci".into())).is_empty());
    }

    #[test]
    fn sort_does_not_touch_input() {
        let books = books();
        let input: Vec<&CatalogItem> = books.iter().collect();
        let sorted = sort(&input, SortKey::PriceAscending);
        assert_eq!(ids(&sorted), vec![2, 3, 1], "ties keep input order");
        assert_eq!(ids(&input), vec![1, 2, 3]);
    }

    #[test]
    fn descending_price_keeps_tie_order() {
        let books = books();
        let input: Vec<&CatalogItem> = books.iter().collect();
        assert_eq!(ids(&sort(&input, SortKey::PriceDescending)), vec![1, 2, 3]);
        let reversed: Vec<&CatalogItem> = books.iter().rev().collect();
        assert_eq!(ids(&sort(&reversed, SortKey::PriceDescending)), vec![1, 3, 2]);
    }

    #[test]
    fn text_sorts() {
        let books = books();
        let input: Vec<&CatalogItem> = books.iter().collect();
        assert_eq!(ids(&sort(&input, SortKey::Name)), vec![1, 3, 2]);
        assert_eq!(ids(&sort(&input, SortKey::Author)), vec![3, 1, 2]);
        assert_eq!(ids(&sort(&input, SortKey::Category)), vec![3, 2, 1]);
        assert_eq!(ids(&sort(&input, SortKey::None)), vec![1, 2, 3]);
    }
}
