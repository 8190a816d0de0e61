use shelf_core::{load_from, Catalog, CatalogSource, Intent, LocalStore, Result, ViewAdapter};
use shelf_favourites::Favourites;
use shelf_query::QueryEngine;

/// One user's browsing session: the query engine, the favourites store and
/// the view they render into.
pub struct Session<A, S> {
    engine: QueryEngine,
    favourites: Favourites<S>,
    adapter: A,
}

impl<A, S> Session<A, S>
where
    A: ViewAdapter,
    S: LocalStore,
{
    /// Start a session over a loaded catalog and render its initial state.
    pub fn new(catalog: Catalog, favourites: Favourites<S>, adapter: A) -> Self {
        let mut session = Self { engine: QueryEngine::new(catalog), favourites, adapter };
        session.render_all();
        session
    }

    /// Fetch the catalog from `source`. A failed load is rendered as an error
    /// and the session continues with an empty catalog.
    pub async fn open<C: CatalogSource>(source: &C, favourites: Favourites<S>, mut adapter: A) -> Self {
        let catalog = match load_from(source).await {
            Ok(catalog) => catalog,
            Err(error) => {
                tracing::warn!(%error, "catalog unavailable, continuing with an empty catalog");
                adapter.render_error(&error);
                Catalog::empty()
            }
        };
        Self::new(catalog, favourites, adapter)
    }

    /// Apply one intent and render what it changed. On error nothing is rendered
    /// and the query state and favourites are unchanged.
    pub fn dispatch(&mut self, intent: Intent) -> Result<()> {
        match intent {
            Intent::SearchTextChanged(text) | Intent::SearchSubmitted(text) => {
                let view = self.engine.set_search_text(text);
                self.adapter.render_items(&view);
            }
            Intent::SortKeyChanged(key) => {
                let view = self.engine.set_sort_key(&key)?;
                self.adapter.render_items(&view);
            }
            Intent::CategoryChanged(category) => {
                let view = self.engine.set_category(&category)?;
                self.adapter.render_items(&view);
            }
            Intent::AddToFavourites(id) => {
                let count = self.favourites.add(self.engine.catalog(), id)?.len();
                self.adapter.render_favourites_count(count);
            }
            Intent::Reset => {
                let view = self.engine.reset();
                self.adapter.render_items(&view);
            }
        }
        Ok(())
    }

    /// Like [`Session::dispatch`], but hands errors to the view instead of returning them.
    pub fn apply(&mut self, intent: Intent) {
        if let Err(error) = self.dispatch(intent) {
            tracing::warn!(%error, "intent rejected");
            self.adapter.render_error(&error);
        }
    }

    pub fn render_all(&mut self) {
        self.adapter.render_categories(self.engine.categories());
        let view = self.engine.current_view();
        self.adapter.render_items(&view);
        self.adapter.render_favourites_count(self.favourites.count());
    }

    pub fn engine(&self) -> &QueryEngine { &self.engine }

    pub fn favourites(&self) -> &Favourites<S> { &self.favourites }

    pub fn adapter(&self) -> &A { &self.adapter }
}
