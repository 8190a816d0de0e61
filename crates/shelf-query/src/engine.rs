use shelf_core::{Catalog, CatalogItem, CategoryFilter, CategorySet, Error, QueryState, Result, SortKey};

use crate::search::{filter_by_category, search, sort};

/// Owns the catalog of a session and the query state that derives its view.
///
/// The view is always rebuilt from the full catalog as
/// search → category filter → sort, so the order in which the state fields
/// were changed never matters.
#[derive(Debug, Clone)]
pub struct QueryEngine {
    catalog: Catalog,
    state: QueryState,
}

impl QueryEngine {
    pub fn new(catalog: Catalog) -> Self { Self { catalog, state: QueryState::default() } }

    pub fn catalog(&self) -> &Catalog { &self.catalog }

    pub fn categories(&self) -> &CategorySet { self.catalog.categories() }

    pub fn state(&self) -> &QueryState { &self.state }

    pub fn current_view(&self) -> Vec<&CatalogItem> {
        let found = search(self.catalog.items(), &self.state.search_text);
        let narrowed = filter_by_category(found, &self.state.category);
        let view = sort(&narrowed, self.state.sort_key);
        tracing::debug!(
            search = %self.state.search_text,
            category = %self.state.category,
            sort = %self.state.sort_key,
            shown = view.len(),
            total = self.catalog.len(),
            "view recomputed"
        );
        view
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) -> Vec<&CatalogItem> {
        self.state.search_text = text.into();
        self.current_view()
    }

    /// Parse and apply a sort key coming from a view. Unknown keys leave the state untouched.
    pub fn set_sort_key(&mut self, value: &str) -> Result<Vec<&CatalogItem>> {
        let key: SortKey = value.parse()?;
        Ok(self.set_sort(key))
    }

    pub fn set_sort(&mut self, key: SortKey) -> Vec<&CatalogItem> {
        self.state.sort_key = key;
        self.current_view()
    }

    /// Apply a category coming from a view: `"all"` or a member of the catalog's categories.
    pub fn set_category(&mut self, value: &str) -> Result<Vec<&CatalogItem>> {
        let filter = self.catalog.categories().resolve(value)?;
        self.set_category_filter(filter)
    }

    pub fn set_category_filter(&mut self, filter: CategoryFilter) -> Result<Vec<&CatalogItem>> {
        if let CategoryFilter::Only(category) = &filter {
            if !self.catalog.categories().contains(category) {
                return Err(Error::invalid_parameter("category", category.as_str()));
            }
        }
        self.state.category = filter;
        Ok(self.current_view())
    }

    pub fn reset(&mut self) -> Vec<&CatalogItem> {
        self.state = QueryState::default();
        self.current_view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> QueryEngine {
        let items = vec![
            CatalogItem { id: 1, name: "Dune".into(), author: "Herbert".into(), category: "scifi".into(), price: 12.0, img: String::new() },
            CatalogItem { id: 2, name: "Hobbit".into(), author: "Tolkien".into(), category: "fantasy".into(), price: 8.0, img: String::new() },
        ];
        QueryEngine::new(Catalog::from_items(items).unwrap())
    }

    #[test]
    fn invalid_sort_key_leaves_state_unchanged() {
        let mut engine = engine();
        engine.set_sort(SortKey::Name);
        assert!(matches!(engine.set_sort_key("rating"), Err(Error::InvalidQueryParameter { parameter: "sort key", .. })));
        assert_eq!(engine.state().sort_key, SortKey::Name);
    }

    #[test]
    fn unknown_category_leaves_state_unchanged() {
        let mut engine = engine();
        engine.set_category("scifi").unwrap();
        assert!(engine.set_category("horror").is_err());
        assert!(engine.set_category_filter(CategoryFilter::Only("horror".into())).is_err());
        assert_eq!(engine.state().category, CategoryFilter::Only("scifi".into()));
    }

    #[test]
    fn reset_restores_defaults() {
        let mut engine = engine();
        engine.set_search_text("dune");
        engine.set_sort(SortKey::PriceDescending);
        engine.set_category("scifi").unwrap();
        assert_eq!(engine.reset().len(), 2);
        assert_eq!(engine.state(), &QueryState::default());
    }
}
