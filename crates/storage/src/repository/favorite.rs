use mongodb::{
    Collection, Database,
    bson::{DateTime, Document, doc},
    options::ReturnDocument,
};

use super::collect;
use crate::error::{Result, StorageError};
use crate::models::{Favorite, FavoriteType, new_id};

pub const COLLECTION: &str = "favorites";

/// Favorites are keyed by (user, entity, type); every write is idempotent
pub struct FavoriteRepository<'a> {
    db: &'a Database,
}

impl<'a> FavoriteRepository<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<Favorite> {
        self.db.collection(COLLECTION)
    }

    pub async fn list_by_user(
        &self,
        user_id: &str,
        entity_type: Option<FavoriteType>,
    ) -> Result<Vec<Favorite>> {
        let mut query = doc! { "userId": user_id };
        if let Some(entity_type) = entity_type {
            query.insert("entityType", entity_type.as_str());
        }

        let cursor = self
            .collection()
            .find(query)
            .sort(doc! { "createdAt": -1 })
            .await?;

        collect(cursor).await
    }

    /// Insert the favorite unless it already exists; either way the stored
    /// record is returned
    pub async fn add(
        &self,
        user_id: &str,
        entity_id: &str,
        entity_type: FavoriteType,
    ) -> Result<Favorite> {
        let key = key_document(user_id, entity_id, entity_type);

        let upserted = self
            .collection()
            .find_one_and_update(
                key.clone(),
                doc! {
                    "$setOnInsert": { "_id": new_id(), "createdAt": DateTime::now() }
                },
            )
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await;

        match upserted {
            Ok(Some(favorite)) => Ok(favorite),
            Ok(None) => Err(StorageError::NotFound),
            // Two concurrent upserts race on the unique index; the loser reads
            // the winner's document
            Err(e) if StorageError::from(e.clone()).is_unique_violation() => self
                .collection()
                .find_one(key)
                .await?
                .ok_or(StorageError::NotFound),
            Err(e) => Err(e.into()),
        }
    }

    /// Remove the favorite; returns whether a record was deleted
    pub async fn remove(
        &self,
        user_id: &str,
        entity_id: &str,
        entity_type: FavoriteType,
    ) -> Result<bool> {
        let result = self
            .collection()
            .delete_one(key_document(user_id, entity_id, entity_type))
            .await?;

        Ok(result.deleted_count > 0)
    }

    pub async fn exists(
        &self,
        user_id: &str,
        entity_id: &str,
        entity_type: FavoriteType,
    ) -> Result<bool> {
        let count = self
            .collection()
            .count_documents(key_document(user_id, entity_id, entity_type))
            .await?;

        Ok(count > 0)
    }
}

pub(crate) fn key_document(user_id: &str, entity_id: &str, entity_type: FavoriteType) -> Document {
    doc! {
        "userId": user_id,
        "entityId": entity_id,
        "entityType": entity_type.as_str(),
    }
}
