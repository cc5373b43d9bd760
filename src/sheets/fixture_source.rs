use anyhow::Result;
use async_trait::async_trait;

use super::SheetSource;
use crate::models::SheetValues;

/// Fixed sample payload standing in for the live sheet. Nothing is fetched.
pub struct FixtureSheet;

#[async_trait]
impl SheetSource for FixtureSheet {
    async fn fetch_values(&self) -> Result<SheetValues> {
        let rows: [[&str; 7]; 3] = [
            ["Title", "Author", "Genre", "Description", "ISBN", "Available", "CoverImage"],
            [
                "The Great Gatsby",
                "F. Scott Fitzgerald",
                "Fiction",
                "A classic American novel",
                "978-0743273565",
                "true",
                "https://example.com/gatsby.jpg",
            ],
            [
                "To Kill a Mockingbird",
                "Harper Lee",
                "Fiction",
                "A gripping tale of racial injustice",
                "978-0061120084",
                "true",
                "https://example.com/mockingbird.jpg",
            ],
        ];

        Ok(SheetValues {
            values: rows
                .iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        })
    }
}

/// No spreadsheet: always an empty payload.
pub struct EmptySheet;

#[async_trait]
impl SheetSource for EmptySheet {
    async fn fetch_values(&self) -> Result<SheetValues> { Ok(SheetValues::default()) }
}
