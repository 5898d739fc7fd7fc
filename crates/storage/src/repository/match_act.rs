use mongodb::{
    Collection, Database,
    bson::{Document, doc},
};

use super::collect;
use crate::dto::match_act::MatchActFilter;
use crate::error::{Result, StorageError};
use crate::models::MatchAct;

pub const COLLECTION: &str = "match_acts";

const DUPLICATE_ACT: &str = "The match already has a match act";

/// Match acts are stored whole: scoring runs in memory and the document is
/// replaced, relying on MongoDB's per-document atomicity
pub struct MatchActRepository<'a> {
    db: &'a Database,
}

impl<'a> MatchActRepository<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<MatchAct> {
        self.db.collection(COLLECTION)
    }

    pub async fn list(&self, filter: &MatchActFilter) -> Result<(Vec<MatchAct>, u64)> {
        let query = filter_document(filter);
        let pagination = filter.pagination();

        let total = self.collection().count_documents(query.clone()).await?;
        let cursor = self
            .collection()
            .find(query)
            .sort(doc! { "date": -1 })
            .skip(pagination.offset())
            .limit(pagination.limit())
            .await?;

        Ok((collect(cursor).await?, total))
    }

    pub async fn find_by_id(&self, id: &str) -> Result<MatchAct> {
        self.collection()
            .find_one(doc! { "_id": id })
            .await?
            .ok_or(StorageError::NotFound)
    }

    pub async fn find_by_match(&self, match_id: &str) -> Result<MatchAct> {
        self.collection()
            .find_one(doc! { "matchId": match_id })
            .await?
            .ok_or(StorageError::NotFound)
    }

    pub async fn insert(&self, act: &MatchAct) -> Result<()> {
        self.collection()
            .insert_one(act)
            .await
            .map_err(|e| StorageError::from(e).on_duplicate(DUPLICATE_ACT))?;

        Ok(())
    }

    pub async fn replace(&self, act: &MatchAct) -> Result<()> {
        let result = self
            .collection()
            .replace_one(doc! { "_id": act.id.as_str() }, act)
            .await?;

        if result.matched_count == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        let result = self.collection().delete_one(doc! { "_id": id }).await?;

        if result.deleted_count == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}

pub(crate) fn filter_document(filter: &MatchActFilter) -> Document {
    let mut query = Document::new();

    if let Some(match_id) = filter.match_id.as_deref().filter(|m| !m.is_empty()) {
        query.insert("matchId", match_id);
    }
    if let Some(competition_id) = filter.competition_id.as_deref().filter(|c| !c.is_empty()) {
        query.insert("competitionId", competition_id);
    }
    if let Some(is_draft) = filter.is_draft {
        query.insert("isDraft", is_draft);
    }
    if let Some(is_completed) = filter.is_completed {
        query.insert("isCompleted", is_completed);
    }

    query
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_on_flags() {
        let filter = MatchActFilter {
            competition_id: Some("c1".to_string()),
            is_draft: Some(true),
            ..Default::default()
        };
        assert_eq!(
            filter_document(&filter),
            doc! { "competitionId": "c1", "isDraft": true }
        );
    }
}
