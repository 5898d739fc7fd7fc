use mongodb::{
    Collection, Database,
    bson::{DateTime, Document, doc},
};

use super::{collect, search_any, search_term};
use crate::dto::wrestler::{CreateWrestlerRequest, UpdateWrestlerRequest, WrestlerFilter};
use crate::error::{Result, StorageError};
use crate::models::{Wrestler, new_id};

pub const COLLECTION: &str = "wrestlers";

const DUPLICATE_LICENSE: &str = "License number already exists";

pub struct WrestlerRepository<'a> {
    db: &'a Database,
}

impl<'a> WrestlerRepository<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<Wrestler> {
        self.db.collection(COLLECTION)
    }

    /// Active wrestlers matching the filter, ordered by surname then name
    pub async fn list(&self, filter: &WrestlerFilter) -> Result<(Vec<Wrestler>, u64)> {
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

    /// Whole active roster of a team
    pub async fn list_by_team(&self, team_id: &str) -> Result<Vec<Wrestler>> {
        let cursor = self
            .collection()
            .find(doc! { "teamId": team_id, "isActive": true })
            .sort(doc! { "surname": 1, "name": 1 })
            .await?;

        collect(cursor).await
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Wrestler> {
        self.collection()
            .find_one(doc! { "_id": id, "isActive": true })
            .await?
            .ok_or(StorageError::NotFound)
    }

    pub async fn find_by_license(&self, license_number: &str) -> Result<Wrestler> {
        self.collection()
            .find_one(doc! { "licenseNumber": license_number, "isActive": true })
            .await?
            .ok_or(StorageError::NotFound)
    }

    pub async fn create(&self, req: &CreateWrestlerRequest) -> Result<Wrestler> {
        let now = DateTime::now();
        let wrestler = Wrestler {
            id: new_id(),
            license_number: req.license_number.clone(),
            name: req.name.trim().to_string(),
            surname: req.surname.trim().to_string(),
            team_id: req.team_id.clone(),
            category: req.category,
            classification: req.classification,
            height: req.height,
            weight: req.weight,
            birth_date: req.birth_date,
            nickname: req.nickname.clone(),
            image_url: req.image_url.clone(),
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        self.collection()
            .insert_one(&wrestler)
            .await
            .map_err(|e| StorageError::from(e).on_duplicate(DUPLICATE_LICENSE))?;

        Ok(wrestler)
    }

    /// Update an existing wrestler, keeping stored values for omitted fields
    pub async fn update(&self, existing: &Wrestler, req: &UpdateWrestlerRequest) -> Result<Wrestler> {
        let wrestler = Wrestler {
            id: existing.id.clone(),
            license_number: req
                .license_number
                .clone()
                .unwrap_or_else(|| existing.license_number.clone()),
            name: req.name.clone().unwrap_or_else(|| existing.name.clone()),
            surname: req.surname.clone().unwrap_or_else(|| existing.surname.clone()),
            team_id: req.team_id.clone().unwrap_or_else(|| existing.team_id.clone()),
            category: req.category.unwrap_or(existing.category),
            classification: req.classification.unwrap_or(existing.classification),
            height: req.height.or(existing.height),
            weight: req.weight.or(existing.weight),
            birth_date: req.birth_date.or(existing.birth_date),
            nickname: req.nickname.clone().or_else(|| existing.nickname.clone()),
            image_url: req.image_url.clone().or_else(|| existing.image_url.clone()),
            is_active: existing.is_active,
            created_at: existing.created_at,
            updated_at: DateTime::now(),
        };

        let result = self
            .collection()
            .replace_one(doc! { "_id": wrestler.id.as_str() }, &wrestler)
            .await
            .map_err(|e| StorageError::from(e).on_duplicate(DUPLICATE_LICENSE))?;

        if result.matched_count == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(wrestler)
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

pub(crate) fn filter_document(filter: &WrestlerFilter) -> Document {
    let mut query = doc! { "isActive": true };

    if let Some(team_id) = filter.team_id.as_deref().filter(|t| !t.is_empty()) {
        query.insert("teamId", team_id);
    }
    if let Some(category) = filter.category {
        query.insert("category", category.as_str());
    }
    if let Some(classification) = filter.classification {
        query.insert("classification", classification.as_str());
    }
    if let Some(term) = search_term(&filter.search) {
        query.extend(search_any(
            &["name", "surname", "nickname", "licenseNumber"],
            term,
        ));
    }

    query
}
