use anyhow::Result;
use async_trait::async_trait;
use futures_util::stream::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    options::ClientOptions,
    Client, Database,
};

use super::{normalize_id, Cms};

pub struct MongoCms {
    db: Database,
}

impl MongoCms {
    pub async fn connect(uri: &str, db_name: &str) -> Result<Self> {
        let mut opts = ClientOptions::parse(uri).await?;
        opts.app_name = Some("library-site".into());

        let client = Client::with_options(opts)?;
        Ok(Self {
            db: client.database(db_name),
        })
    }
}

#[async_trait]
impl Cms for MongoCms {
    async fn get_all(&self, collection: &str) -> Result<Vec<Document>> {
        let cursor = self.db.collection::<Document>(collection).find(doc! {}).await?;
        let docs: Vec<Document> = cursor.try_collect().await?;
        Ok(docs.into_iter().map(normalize_id).collect())
    }

    async fn get_by_id(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        // seeded records use string ids, records created in the store get ObjectIds
        let filter = match ObjectId::parse_str(id) {
            Ok(oid) => doc! { "$or": [ { "_id": id }, { "_id": oid } ] },
            Err(_) => doc! { "_id": id },
        };
        let found = self
            .db
            .collection::<Document>(collection)
            .find_one(filter)
            .await?;
        Ok(found.map(normalize_id))
    }
}
