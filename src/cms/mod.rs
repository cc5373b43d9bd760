//! Content store access.
//!
//! The site reads three named collections. The store is addressed only by
//! collection name and record id; typed decoding happens on top of the raw
//! documents so a backend never needs to know the record schema.

use anyhow::{Context, Result};
use async_trait::async_trait;
use mongodb::bson::{self, Document};
use serde::de::DeserializeOwned;

pub mod memory;
pub mod mongo;

pub use memory::MemoryCms;
pub use mongo::MongoCms;

pub const BOOK_CATALOG: &str = "bookcatalog";
pub const LIBRARY_INFORMATION: &str = "libraryinformation";
pub const LIBRARY_PHOTOS: &str = "libraryphotos";

#[async_trait]
pub trait Cms: Send + Sync {
    /// Every record of `collection`, in store order.
    async fn get_all(&self, collection: &str) -> Result<Vec<Document>>;
    /// One record by id; `Ok(None)` when the id is unknown.
    async fn get_by_id(&self, collection: &str, id: &str) -> Result<Option<Document>>;
}

/// Fetch and decode a whole collection. Records that don't decode are
/// skipped with a warning instead of failing the listing.
pub async fn fetch_all<T: DeserializeOwned>(cms: &dyn Cms, collection: &str) -> Result<Vec<T>> {
    let docs = cms
        .get_all(collection)
        .await
        .with_context(|| format!("listing CMS collection `{collection}`"))?;

    let mut out = Vec::with_capacity(docs.len());
    for doc in docs {
        match decode(doc) {
            Ok(item) => out.push(item),
            Err(e) => tracing::warn!(collection, "skipping malformed record: {e:#}"),
        }
    }
    Ok(out)
}

pub async fn fetch_by_id<T: DeserializeOwned>(
    cms: &dyn Cms,
    collection: &str,
    id: &str,
) -> Result<Option<T>> {
    let doc = cms
        .get_by_id(collection, id)
        .await
        .with_context(|| format!("looking up `{id}` in CMS collection `{collection}`"))?;
    doc.map(decode::<T>).transpose()
}

fn decode<T: DeserializeOwned>(doc: Document) -> Result<T> {
    bson::from_document(normalize_id(doc)).context("decoding CMS record")
}

/// Records created by the store itself carry an ObjectId `_id`; the site
/// always works with string ids.
pub fn normalize_id(mut doc: Document) -> Document {
    if let Ok(oid) = doc.get_object_id("_id") {
        doc.insert("_id", oid.to_hex());
    }
    doc
}
