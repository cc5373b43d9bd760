use anyhow::Result;

use super::provider::{BookProvider, CatalogSource};
use crate::models::BookRecord;

/// The collection a page works from, fetched once per load.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedCatalog {
    pub books: Vec<BookRecord>,
    pub source: CatalogSource,
}

/// Use `primary` when it yields at least one record, otherwise `fallback`.
///
/// A failing primary counts as empty: it is logged and never reaches the
/// caller. The two collections are never merged. A failing fallback is
/// returned as the error.
pub async fn resolve(
    primary: &dyn BookProvider,
    fallback: &dyn BookProvider,
) -> Result<ResolvedCatalog> {
    let books = match primary.fetch_books().await {
        Ok(books) => books,
        Err(e) => {
            tracing::warn!(source = ?primary.source(), "primary catalog fetch failed: {e:#}");
            Vec::new()
        }
    };

    if !books.is_empty() {
        tracing::debug!(source = ?primary.source(), count = books.len(), "catalog resolved");
        return Ok(ResolvedCatalog {
            books,
            source: primary.source(),
        });
    }

    tracing::info!(
        from = ?primary.source(),
        to = ?fallback.source(),
        "primary catalog empty, falling back"
    );
    let books = fallback.fetch_books().await?;
    Ok(ResolvedCatalog {
        books,
        source: fallback.source(),
    })
}
