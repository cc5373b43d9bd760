//! Catalog pipeline: providers → resolver → filter → view.

pub mod filter;
pub mod provider;
pub mod resolver;
pub mod view;

pub use filter::{
    filter, genre_vocabulary, AvailabilityFilter, FilterParseError, GenreFilter, QueryPredicate,
};
pub use provider::{BookProvider, CatalogSource, CmsBooks, SpreadsheetBooks};
pub use resolver::{resolve, ResolvedCatalog};
pub use view::{open_book, CatalogView, SeedParams};

#[cfg(test)]
pub(crate) mod test_support {
    use anyhow::{anyhow, Result};
    use async_trait::async_trait;

    use super::{BookProvider, CatalogSource};
    use crate::models::BookRecord;

    pub fn book(id: &str, title: &str, genre: &str, available: Option<bool>) -> BookRecord {
        BookRecord {
            title: Some(title.into()),
            genre: Some(genre.into()),
            is_available: available,
            ..BookRecord::new(id)
        }
    }

    /// Provider double returning a fixed list, or failing.
    pub struct StubProvider {
        pub source: CatalogSource,
        pub books: Option<Vec<BookRecord>>,
    }

    impl StubProvider {
        pub fn ok(source: CatalogSource, books: Vec<BookRecord>) -> Self {
            Self { source, books: Some(books) }
        }

        pub fn failing(source: CatalogSource) -> Self {
            Self { source, books: None }
        }
    }

    #[async_trait]
    impl BookProvider for StubProvider {
        fn source(&self) -> CatalogSource {
            self.source
        }

        async fn fetch_books(&self) -> Result<Vec<BookRecord>> {
            self.books.clone().ok_or_else(|| anyhow!("{:?} unavailable", self.source))
        }

        async fn fetch_book(&self, id: &str) -> Result<Option<BookRecord>> {
            let books = self.fetch_books().await?;
            Ok(books.into_iter().find(|b| b.id == id))
        }
    }
}
