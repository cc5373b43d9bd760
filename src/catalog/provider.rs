use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;

use crate::cms::{self, Cms, BOOK_CATALOG};
use crate::models::BookRecord;
use crate::sheets::{parse_values, SheetSource};

/// Which provider supplied a resolved collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogSource {
    Spreadsheet,
    Cms,
}

#[async_trait]
pub trait BookProvider: Send + Sync {
    fn source(&self) -> CatalogSource;
    async fn fetch_books(&self) -> Result<Vec<BookRecord>>;
    async fn fetch_book(&self, id: &str) -> Result<Option<BookRecord>>;
}

pub struct SpreadsheetBooks {
    sheet: Arc<dyn SheetSource>,
}

impl SpreadsheetBooks {
    pub fn new(sheet: Arc<dyn SheetSource>) -> Self {
        Self { sheet }
    }
}

#[async_trait]
impl BookProvider for SpreadsheetBooks {
    fn source(&self) -> CatalogSource {
        CatalogSource::Spreadsheet
    }

    async fn fetch_books(&self) -> Result<Vec<BookRecord>> {
        let values = self.sheet.fetch_values().await?;
        Ok(parse_values(&values))
    }

    // Row ids are positional, so a lookup means re-reading the sheet.
    // An unreadable sheet is a miss.
    async fn fetch_book(&self, id: &str) -> Result<Option<BookRecord>> {
        match self.fetch_books().await {
            Ok(books) => Ok(books.into_iter().find(|b| b.id == id)),
            Err(e) => {
                tracing::debug!(id, "spreadsheet lookup failed: {e:#}");
                Ok(None)
            }
        }
    }
}

pub struct CmsBooks {
    cms: Arc<dyn Cms>,
}

impl CmsBooks {
    pub fn new(cms: Arc<dyn Cms>) -> Self {
        Self { cms }
    }
}

#[async_trait]
impl BookProvider for CmsBooks {
    fn source(&self) -> CatalogSource {
        CatalogSource::Cms
    }

    async fn fetch_books(&self) -> Result<Vec<BookRecord>> {
        cms::fetch_all(self.cms.as_ref(), BOOK_CATALOG).await
    }

    async fn fetch_book(&self, id: &str) -> Result<Option<BookRecord>> {
        cms::fetch_by_id(self.cms.as_ref(), BOOK_CATALOG, id).await
    }
}
