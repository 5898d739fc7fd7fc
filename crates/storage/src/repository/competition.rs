use mongodb::{
    Collection, Database,
    bson::{DateTime, Document, doc},
};

use super::collect;
use crate::dto::competition::{
    CompetitionFilter, CreateCompetitionRequest, UpdateCompetitionRequest,
};
use crate::error::{Result, StorageError};
use crate::models::{Competition, new_id};

pub const COLLECTION: &str = "competitions";

/// Repository for Competition documents
pub struct CompetitionRepository<'a> {
    db: &'a Database,
}

impl<'a> CompetitionRepository<'a> {
    /// Create a new CompetitionRepository
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<Competition> {
        self.db.collection(COLLECTION)
    }

    /// Competitions matching the filter, latest season first
    pub async fn list(&self, filter: &CompetitionFilter) -> Result<(Vec<Competition>, u64)> {
        let query = filter_document(filter);
        let pagination = filter.pagination();

        let total = self.collection().count_documents(query.clone()).await?;
        let cursor = self
            .collection()
            .find(query)
            .sort(doc! { "season": -1, "name": 1 })
            .skip(pagination.offset())
            .limit(pagination.limit())
            .await?;

        Ok((collect(cursor).await?, total))
    }

    /// Get a competition by ID
    pub async fn find_by_id(&self, id: &str) -> Result<Competition> {
        self.collection()
            .find_one(doc! { "_id": id })
            .await?
            .ok_or(StorageError::NotFound)
    }

    /// Create a new competition
    pub async fn create(&self, req: &CreateCompetitionRequest) -> Result<Competition> {
        let now = DateTime::now();
        let competition = Competition {
            id: new_id(),
            name: req.name.trim().to_string(),
            age_category: req.age_category,
            division_category: req.division_category,
            island: req.island,
            season: req.season.clone(),
            team_ids: dedup(&req.team_ids),
            created_at: now,
            updated_at: now,
        };

        self.collection().insert_one(&competition).await?;

        Ok(competition)
    }

    /// Update an existing competition
    pub async fn update(
        &self,
        existing: &Competition,
        req: &UpdateCompetitionRequest,
    ) -> Result<Competition> {
        let competition = Competition {
            id: existing.id.clone(),
            name: req.name.clone().unwrap_or_else(|| existing.name.clone()),
            age_category: req.age_category.unwrap_or(existing.age_category),
            division_category: req.division_category.unwrap_or(existing.division_category),
            island: req.island.unwrap_or(existing.island),
            season: req.season.clone().unwrap_or_else(|| existing.season.clone()),
            team_ids: req
                .team_ids
                .as_deref()
                .map(dedup)
                .unwrap_or_else(|| existing.team_ids.clone()),
            created_at: existing.created_at,
            updated_at: DateTime::now(),
        };

        let result = self
            .collection()
            .replace_one(doc! { "_id": competition.id.as_str() }, &competition)
            .await?;

        if result.matched_count == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(competition)
    }

    /// Enrol a team; enrolling twice is a no-op
    pub async fn add_team(&self, id: &str, team_id: &str) -> Result<()> {
        let result = self
            .collection()
            .update_one(
                doc! { "_id": id },
                doc! {
                    "$addToSet": { "teamIds": team_id },
                    "$set": { "updatedAt": DateTime::now() },
                },
            )
            .await?;

        if result.matched_count == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }

    pub async fn remove_team(&self, id: &str, team_id: &str) -> Result<()> {
        let result = self
            .collection()
            .update_one(
                doc! { "_id": id },
                doc! {
                    "$pull": { "teamIds": team_id },
                    "$set": { "updatedAt": DateTime::now() },
                },
            )
            .await?;

        if result.matched_count == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }

    /// Delete a competition by ID
    pub async fn delete(&self, id: &str) -> Result<()> {
        let result = self.collection().delete_one(doc! { "_id": id }).await?;

        if result.deleted_count == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}

fn dedup(ids: &[String]) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(ids.len());
    for id in ids {
        if !unique.contains(id) {
            unique.push(id.clone());
        }
    }
    unique
}

pub(crate) fn filter_document(filter: &CompetitionFilter) -> Document {
    let mut query = Document::new();

    if let Some(season) = filter.season.as_deref().filter(|s| !s.is_empty()) {
        query.insert("season", season);
    }
    if let Some(island) = filter.island {
        query.insert("island", island.as_str());
    }
    if let Some(division) = filter.division {
        query.insert("divisionCategory", division.as_str());
    }
    if let Some(age_category) = filter.age_category {
        query.insert("ageCategory", age_category.as_str());
    }
    if let Some(team_id) = filter.team_id.as_deref().filter(|t| !t.is_empty()) {
        query.insert("teamIds", team_id);
    }

    query
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AgeCategory, Island};

    #[test]
    fn test_filter_by_team_matches_array_membership() {
        let filter = CompetitionFilter {
            season: Some("2024-2025".to_string()),
            island: Some(Island::Fuerteventura),
            age_category: Some(AgeCategory::Cadete),
            team_id: Some("t9".to_string()),
            ..Default::default()
        };

        assert_eq!(
            filter_document(&filter),
            doc! {
                "season": "2024-2025",
                "island": "FUERTEVENTURA",
                "ageCategory": "CADETE",
                "teamIds": "t9",
            }
        );
    }

    #[test]
    fn test_dedup_keeps_first_occurrence_order() {
        let ids = vec!["b".to_string(), "a".to_string(), "b".to_string()];
        assert_eq!(dedup(&ids), vec!["b".to_string(), "a".to_string()]);
    }
}
