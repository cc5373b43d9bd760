use std::collections::HashMap;
use std::sync::RwLock;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use mongodb::bson::{self, Document};
use serde::Serialize;

use super::Cms;

/// Process-local store. Used when no `MONGO_URI` is configured and as the
/// CMS double in tests.
#[derive(Default)]
pub struct MemoryCms {
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl MemoryCms {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, collection: &str, doc: Document) -> Result<()> {
        let mut cols = self
            .collections
            .write()
            .map_err(|_| anyhow!("memory CMS lock poisoned"))?;
        cols.entry(collection.to_string()).or_default().push(doc);
        Ok(())
    }

    /// Serialize typed records into `collection`, preserving their order.
    pub fn insert_all<T: Serialize>(&self, collection: &str, items: &[T]) -> Result<()> {
        for item in items {
            let doc = bson::to_document(item).context("encoding record for memory CMS")?;
            self.insert(collection, doc)?;
        }
        Ok(())
    }
}

#[async_trait]
impl Cms for MemoryCms {
    async fn get_all(&self, collection: &str) -> Result<Vec<Document>> {
        let cols = self
            .collections
            .read()
            .map_err(|_| anyhow!("memory CMS lock poisoned"))?;
        Ok(cols.get(collection).cloned().unwrap_or_default())
    }

    async fn get_by_id(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        let cols = self
            .collections
            .read()
            .map_err(|_| anyhow!("memory CMS lock poisoned"))?;
        Ok(cols.get(collection).and_then(|docs| {
            docs.iter()
                .find(|d| d.get_str("_id").map(|s| s == id).unwrap_or(false))
                .cloned()
        }))
    }
}
