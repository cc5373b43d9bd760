use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use crate::catalog::{resolve, BookProvider, CmsBooks, ResolvedCatalog, SpreadsheetBooks};
use crate::cms::{Cms, MemoryCms, MongoCms};
use crate::config::{AppConfig, SheetsConfig, SheetsMode};
use crate::sheets::{EmptySheet, FixtureSheet, HttpSheet, SheetSource};

pub struct AppState {
    pub cms: Arc<dyn Cms>,
    pub spreadsheet: Arc<dyn BookProvider>,
    pub cms_books: Arc<dyn BookProvider>,
    pub book_lookup_delay: Duration,
}

impl AppState {
    pub fn new(cms: Arc<dyn Cms>, sheet: Arc<dyn SheetSource>, book_lookup_delay: Duration) -> Self {
        Self {
            spreadsheet: Arc::new(SpreadsheetBooks::new(sheet)),
            cms_books: Arc::new(CmsBooks::new(cms.clone())),
            cms,
            book_lookup_delay,
        }
    }

    /// Spreadsheet first, `bookcatalog` when the sheet is empty or failing.
    /// Nothing is cached; every call resolves from scratch.
    pub async fn resolve_catalog(&self) -> Result<ResolvedCatalog> {
        resolve(self.spreadsheet.as_ref(), self.cms_books.as_ref()).await
    }
}

pub async fn init_state(cfg: &AppConfig) -> AppState {
    let cms: Arc<dyn Cms> = match &cfg.mongo_uri {
        Some(uri) => match MongoCms::connect(uri, &cfg.db_name).await {
            Ok(mongo) => {
                tracing::info!(db = %cfg.db_name, "using MongoDB CMS");
                Arc::new(mongo)
            }
            Err(e) => {
                tracing::error!("cannot set up MongoDB CMS, falling back to in-memory: {e:#}");
                Arc::new(MemoryCms::new())
            }
        },
        None => {
            tracing::warn!("MONGO_URI not set, CMS collections are empty");
            Arc::new(MemoryCms::new())
        }
    };

    AppState::new(cms, sheet_source(&cfg.sheets), cfg.book_lookup_delay)
}

fn sheet_source(cfg: &SheetsConfig) -> Arc<dyn SheetSource> {
    match cfg.mode {
        SheetsMode::Fixture => {
            tracing::info!("spreadsheet feed: built-in sample rows");
            Arc::new(FixtureSheet)
        }
        SheetsMode::Off => Arc::new(EmptySheet),
        SheetsMode::Http => match HttpSheet::new(cfg) {
            Ok(sheet) => Arc::new(sheet),
            Err(e) => {
                tracing::warn!("spreadsheet feed disabled: {e:#}");
                Arc::new(EmptySheet)
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogSource;
    use crate::cms::BOOK_CATALOG;
    use crate::models::BookRecord;

    fn state_with(sheet: Arc<dyn SheetSource>) -> AppState {
        let cms = MemoryCms::new();
        cms.insert_all(BOOK_CATALOG, &[BookRecord::new("cms-1"), BookRecord::new("cms-2")])
            .unwrap();
        AppState::new(Arc::new(cms), sheet, Duration::ZERO)
    }

    #[tokio::test]
    async fn fixture_sheet_takes_precedence() {
        let resolved = state_with(Arc::new(FixtureSheet)).resolve_catalog().await.unwrap();
        assert_eq!(resolved.source, CatalogSource::Spreadsheet);
        assert_eq!(resolved.books.len(), 2);
    }

    #[tokio::test]
    async fn empty_sheet_resolves_to_cms() {
        let resolved = state_with(Arc::new(EmptySheet)).resolve_catalog().await.unwrap();
        assert_eq!(resolved.source, CatalogSource::Cms);
        let ids: Vec<_> = resolved.books.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["cms-1", "cms-2"]);
    }

    #[tokio::test]
    async fn http_mode_without_credentials_degrades_to_empty() {
        let cfg = SheetsConfig {
            mode: SheetsMode::Http,
            api_url: "https://sheets.example.com".into(),
            spreadsheet_id: None,
            sheet_name: "Books".into(),
            api_key: None,
            timeout: Duration::from_secs(1),
        };
        let values = sheet_source(&cfg).fetch_values().await.unwrap();
        assert!(values.values.is_empty());
    }
}
