use std::time::Duration;

use super::filter::{filter, genre_vocabulary, AvailabilityFilter, GenreFilter, QueryPredicate};
use super::provider::{BookProvider, CatalogSource};
use super::resolver::ResolvedCatalog;
use crate::models::BookRecord;

/// Navigation parameters a catalog page is opened with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedParams {
    /// Initial search text.
    pub search: Option<String>,
    /// Record to open in the detail view.
    pub book: Option<String>,
}

/// Filtered view over one resolved collection.
///
/// The collection and its genre menu are fixed at construction. Every
/// predicate change recomputes the visible list from the full collection.
#[derive(Debug, Clone)]
pub struct CatalogView {
    books: Vec<BookRecord>,
    source: CatalogSource,
    genres: Vec<String>,
    predicate: QueryPredicate,
    visible: Vec<BookRecord>,
}

impl CatalogView {
    pub fn new(resolved: ResolvedCatalog, seed: &SeedParams) -> Self {
        let genres = genre_vocabulary(&resolved.books);
        let predicate = QueryPredicate {
            search_text: seed.search.clone().unwrap_or_default(),
            ..Default::default()
        };

        let mut view = Self {
            books: resolved.books,
            source: resolved.source,
            genres,
            predicate,
            visible: Vec::new(),
        };
        view.refresh();
        view
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.predicate.search_text = text.into();
        self.refresh();
    }

    pub fn set_genre(&mut self, genre: GenreFilter) {
        self.predicate.genre = genre;
        self.refresh();
    }

    pub fn set_availability(&mut self, availability: AvailabilityFilter) {
        self.predicate.availability = availability;
        self.refresh();
    }

    fn refresh(&mut self) {
        self.visible = filter(&self.books, &self.predicate);
    }

    pub fn visible(&self) -> &[BookRecord] {
        &self.visible
    }

    pub fn books(&self) -> &[BookRecord] {
        &self.books
    }

    pub fn genres(&self) -> &[String] {
        &self.genres
    }

    pub fn predicate(&self) -> &QueryPredicate {
        &self.predicate
    }

    pub fn source(&self) -> CatalogSource {
        self.source
    }

    pub fn into_visible(self) -> Vec<BookRecord> {
        self.visible
    }
}

/// Point lookup behind the `book` parameter.
///
/// Waits `delay`, asks `provider` for `id` and hands the record to `on_open`
/// if it exists. A miss or a failing provider is logged and otherwise
/// ignored; `on_open` is simply not called.
pub async fn open_book<F>(provider: &dyn BookProvider, id: &str, delay: Duration, on_open: F)
where
    F: FnOnce(BookRecord),
{
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    match provider.fetch_book(id).await {
        Ok(Some(book)) => on_open(book),
        Ok(None) => tracing::debug!(id, "requested book not found"),
        Err(e) => tracing::debug!(id, "requested book lookup failed: {e:#}"),
    }
}
