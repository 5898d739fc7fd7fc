use mongodb::{
    Collection, Database,
    bson::{DateTime, Document, doc},
};

use super::{collect, search_any, search_term};
use crate::dto::referee::{CreateRefereeRequest, RefereeFilter, UpdateRefereeRequest};
use crate::error::{Result, StorageError};
use crate::models::{Referee, new_id};

pub const COLLECTION: &str = "referees";

const DUPLICATE_LICENSE: &str = "Referee license already exists";

pub struct RefereeRepository<'a> {
    db: &'a Database,
}

impl<'a> RefereeRepository<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<Referee> {
        self.db.collection(COLLECTION)
    }

    pub async fn list(&self, filter: &RefereeFilter) -> Result<(Vec<Referee>, u64)> {
        let query = filter_document(filter);
        let pagination = filter.pagination();

        let total = self.collection().count_documents(query.clone()).await?;
        let cursor = self
            .collection()
            .find(query)
            .sort(doc! { "surname": 1, "name": 1 })
            .skip(pagination.offset())
            .limit(pagination.limit())
            .await?;

        Ok((collect(cursor).await?, total))
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Referee> {
        self.collection()
            .find_one(doc! { "_id": id, "isActive": true })
            .await?
            .ok_or(StorageError::NotFound)
    }

    pub async fn create(&self, req: &CreateRefereeRequest) -> Result<Referee> {
        let now = DateTime::now();
        let referee = Referee {
            id: new_id(),
            license_number: req.license_number.clone(),
            name: req.name.trim().to_string(),
            surname: req.surname.trim().to_string(),
            island: req.island,
            email: req.email.as_ref().map(|e| e.to_lowercase()),
            phone: req.phone.clone(),
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        self.collection()
            .insert_one(&referee)
            .await
            .map_err(|e| StorageError::from(e).on_duplicate(DUPLICATE_LICENSE))?;

        Ok(referee)
    }

    pub async fn update(&self, existing: &Referee, req: &UpdateRefereeRequest) -> Result<Referee> {
        let referee = Referee {
            id: existing.id.clone(),
            license_number: req
                .license_number
                .clone()
                .unwrap_or_else(|| existing.license_number.clone()),
            name: req.name.clone().unwrap_or_else(|| existing.name.clone()),
            surname: req.surname.clone().unwrap_or_else(|| existing.surname.clone()),
            island: req.island.unwrap_or(existing.island),
            email: req
                .email
                .as_ref()
                .map(|e| e.to_lowercase())
                .or_else(|| existing.email.clone()),
            phone: req.phone.clone().or_else(|| existing.phone.clone()),
            is_active: existing.is_active,
            created_at: existing.created_at,
            updated_at: DateTime::now(),
        };

        let result = self
            .collection()
            .replace_one(doc! { "_id": referee.id.as_str() }, &referee)
            .await
            .map_err(|e| StorageError::from(e).on_duplicate(DUPLICATE_LICENSE))?;

        if result.matched_count == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(referee)
    }

    /// Soft delete
    pub async fn deactivate(&self, id: &str) -> Result<()> {
        let result = self
            .collection()
            .update_one(
                doc! { "_id": id, "isActive": true },
                doc! { "$set": { "isActive": false, "updatedAt": DateTime::now() } },
            )
            .await?;

        if result.matched_count == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}

pub(crate) fn filter_document(filter: &RefereeFilter) -> Document {
    let mut query = doc! { "isActive": true };

    if let Some(island) = filter.island {
        query.insert("island", island.as_str());
    }
    if let Some(term) = search_term(&filter.search) {
        query.extend(search_any(&["name", "surname", "licenseNumber"], term));
    }

    query
}
