//! Plain-text `ViewAdapter` for terminals.
use std::fmt;
use std::io::Write;

use shelf_core::{CatalogItem, CategorySet, Error, ViewAdapter, ALL_CATEGORIES};

pub struct TerminalView<W: Write> {
    out: W,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W) -> Self { Self { out } }

    pub fn into_inner(self) -> W { self.out }

    pub fn list(&mut self, items: &[&CatalogItem]) {
        for item in items {
            self.emit(format_args!("{:>5}  {} by {} [{}] ${:.2}", item.id, item.name, item.author, item.category, item.price));
        }
    }

    fn emit(&mut self, line: fmt::Arguments<'_>) {
        if let Err(error) = writeln!(self.out, "{line}") {
            tracing::warn!(%error, "terminal write failed");
        }
    }
}

impl<W: Write> ViewAdapter for TerminalView<W> {
    fn render_items(&mut self, items: &[&CatalogItem]) {
        self.emit(format_args!("── {} item(s)", items.len()));
        self.list(items);
    }

    fn render_categories(&mut self, categories: &CategorySet) {
        let names: Vec<&str> = std::iter::once(ALL_CATEGORIES).chain(categories.iter()).collect();
        self.emit(format_args!("categories: {}", names.join(", ")));
    }

    fn render_favourites_count(&mut self, count: usize) { self.emit(format_args!("♥ {count}")); }

    fn render_error(&mut self, error: &Error) { self.emit(format_args!("error: {error}")); }
}
