use mongodb::{
    Collection, Database,
    bson::{DateTime, Document, doc},
};

use super::{collect, search_any, search_term};
use crate::dto::team::{CreateTeamRequest, TeamFilter, UpdateTeamRequest};
use crate::error::{Result, StorageError};
use crate::models::{Team, new_id};

pub const COLLECTION: &str = "teams";

/// Repository for Team documents
pub struct TeamRepository<'a> {
    db: &'a Database,
}

impl<'a> TeamRepository<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<Team> {
        self.db.collection(COLLECTION)
    }

    /// Active teams matching the filter, by name, with the total match count
    pub async fn list(&self, filter: &TeamFilter) -> Result<(Vec<Team>, u64)> {
        let query = filter_document(filter);
        let pagination = filter.pagination();

        let total = self.collection().count_documents(query.clone()).await?;
        let cursor = self
            .collection()
            .find(query)
            .sort(doc! { "name": 1 })
            .skip(pagination.offset())
            .limit(pagination.limit())
            .await?;

        Ok((collect(cursor).await?, total))
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Team> {
        self.collection()
            .find_one(doc! { "_id": id, "isActive": true })
            .await?
            .ok_or(StorageError::NotFound)
    }

    /// Active teams among `ids`, by name. Unknown ids are skipped.
    pub async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<Team>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let cursor = self
            .collection()
            .find(doc! { "_id": { "$in": ids.to_vec() }, "isActive": true })
            .sort(doc! { "name": 1 })
            .await?;

        collect(cursor).await
    }

    pub async fn create(&self, req: &CreateTeamRequest) -> Result<Team> {
        let now = DateTime::now();
        let team = Team {
            id: new_id(),
            name: req.name.trim().to_string(),
            image_url: req.image_url.clone(),
            island: req.island,
            venue: req.venue.clone(),
            division_category: req.division_category,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        self.collection().insert_one(&team).await?;

        Ok(team)
    }

    /// Update an existing team, keeping stored values for omitted fields
    pub async fn update(&self, existing: &Team, req: &UpdateTeamRequest) -> Result<Team> {
        let team = Team {
            id: existing.id.clone(),
            name: req
                .name
                .as_deref()
                .map(str::trim)
                .unwrap_or(&existing.name)
                .to_string(),
            image_url: req.image_url.clone().or_else(|| existing.image_url.clone()),
            island: req.island.unwrap_or(existing.island),
            venue: req.venue.clone().unwrap_or_else(|| existing.venue.clone()),
            division_category: req.division_category.unwrap_or(existing.division_category),
            is_active: existing.is_active,
            created_at: existing.created_at,
            updated_at: DateTime::now(),
        };

        let result = self
            .collection()
            .replace_one(doc! { "_id": team.id.as_str() }, &team)
            .await?;

        if result.matched_count == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(team)
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

pub(crate) fn filter_document(filter: &TeamFilter) -> Document {
    let mut query = doc! { "isActive": true };

    if let Some(island) = filter.island {
        query.insert("island", island.as_str());
    }
    if let Some(division) = filter.division {
        query.insert("divisionCategory", division.as_str());
    }
    if let Some(term) = search_term(&filter.search) {
        query.extend(search_any(&["name", "venue"], term));
    }

    query
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DivisionCategory, Island};

    #[test]
    fn test_default_filter_only_keeps_active_teams() {
        assert_eq!(filter_document(&TeamFilter::default()), doc! { "isActive": true });
    }

    #[test]
    fn test_filter_uses_stored_enum_names() {
        let filter = TeamFilter {
            island: Some(Island::GranCanaria),
            division: Some(DivisionCategory::Primera),
            ..Default::default()
        };
        let query = filter_document(&filter);

        assert_eq!(query.get_str("island").unwrap(), "GRAN_CANARIA");
        assert_eq!(query.get_str("divisionCategory").unwrap(), "PRIMERA");
        assert!(query.get_bool("isActive").unwrap());
    }

    #[test]
    fn test_search_matches_name_or_venue() {
        let filter = TeamFilter {
            search: Some("Tao".to_string()),
            ..Default::default()
        };
        let query = filter_document(&filter);
        assert_eq!(query.get_array("$or").unwrap().len(), 2);
    }
}
