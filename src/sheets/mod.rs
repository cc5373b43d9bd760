//! Spreadsheet-backed catalog feed.
//!
//! Content owners maintain the catalog as a sheet whose first row is a
//! header and whose columns are, in order:
//! `Title, Author, Genre, Description, ISBN, Available, CoverImage`.
//! A [`SheetSource`] only delivers the raw rows; [`parse_values`] turns them
//! into [`BookRecord`]s.

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{BookRecord, SheetValues};

pub mod fixture_source;
pub mod http_source;

pub use fixture_source::{EmptySheet, FixtureSheet};
pub use http_source::HttpSheet;

const COL_TITLE: usize = 0;
const COL_AUTHOR: usize = 1;
const COL_GENRE: usize = 2;
const COL_DESCRIPTION: usize = 3;
const COL_ISBN: usize = 4;
const COL_AVAILABLE: usize = 5;
const COL_COVER: usize = 6;

#[async_trait]
pub trait SheetSource: Send + Sync {
    async fn fetch_values(&self) -> Result<SheetValues>;
}

/// Map data rows positionally onto book records. The header row is dropped;
/// ids are `book-<n>` with `n` counting data rows from 1. Missing cells
/// become empty strings.
pub fn parse_values(values: &SheetValues) -> Vec<BookRecord> {
    values
        .values
        .iter()
        .skip(1)
        .enumerate()
        .map(|(i, row)| parse_row(i + 1, row))
        .collect()
}

fn parse_row(n: usize, row: &[String]) -> BookRecord {
    let cell = |col: usize| Some(row.get(col).cloned().unwrap_or_default());

    BookRecord {
        id: format!("book-{n}"),
        title: cell(COL_TITLE),
        author: cell(COL_AUTHOR),
        genre: cell(COL_GENRE),
        description: cell(COL_DESCRIPTION),
        isbn: cell(COL_ISBN),
        is_available: Some(
            row.get(COL_AVAILABLE)
                .map(|v| v.to_lowercase() == "true")
                .unwrap_or(false),
        ),
        cover_image: cell(COL_COVER),
    }
}
