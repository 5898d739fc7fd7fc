use mongodb::{
    Collection, Database,
    bson::{DateTime, Document, doc},
};

use super::collect;
use crate::dto::matches::{CreateMatchRequest, MatchFilter, UpdateMatchRequest};
use crate::error::{Result, StorageError};
use crate::models::{Match, new_id};

pub const COLLECTION: &str = "matches";

pub struct MatchRepository<'a> {
    db: &'a Database,
}

impl<'a> MatchRepository<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<Match> {
        self.db.collection(COLLECTION)
    }

    /// Fixtures matching the filter, by round then kick-off
    pub async fn list(&self, filter: &MatchFilter) -> Result<(Vec<Match>, u64)> {
        let query = filter_document(filter);
        let pagination = filter.pagination();

        let total = self.collection().count_documents(query.clone()).await?;
        let cursor = self
            .collection()
            .find(query)
            .sort(doc! { "round": 1, "date": 1 })
            .skip(pagination.offset())
            .limit(pagination.limit())
            .await?;

        Ok((collect(cursor).await?, total))
    }

    /// Every fixture of a competition, unpaginated
    pub async fn list_by_competition(&self, competition_id: &str) -> Result<Vec<Match>> {
        let cursor = self
            .collection()
            .find(doc! { "competitionId": competition_id })
            .sort(doc! { "round": 1, "date": 1 })
            .await?;

        collect(cursor).await
    }

    pub async fn count_by_competition(&self, competition_id: &str) -> Result<u64> {
        Ok(self
            .collection()
            .count_documents(doc! { "competitionId": competition_id })
            .await?)
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Match> {
        self.collection()
            .find_one(doc! { "_id": id })
            .await?
            .ok_or(StorageError::NotFound)
    }

    pub async fn create(&self, req: &CreateMatchRequest) -> Result<Match> {
        let now = DateTime::now();
        let fixture = Match {
            id: new_id(),
            competition_id: req.competition_id.clone(),
            round: req.round,
            local_team_id: req.local_team_id.clone(),
            visitor_team_id: req.visitor_team_id.clone(),
            local_score: 0,
            visitor_score: 0,
            date: DateTime::from_chrono(req.date),
            venue: req.venue.clone(),
            completed: false,
            referee_id: req.referee_id.clone(),
            match_act_id: None,
            created_at: now,
            updated_at: now,
        };

        self.collection().insert_one(&fixture).await?;

        Ok(fixture)
    }

    pub async fn update(&self, existing: &Match, req: &UpdateMatchRequest) -> Result<Match> {
        let fixture = Match {
            round: req.round.unwrap_or(existing.round),
            local_team_id: req
                .local_team_id
                .clone()
                .unwrap_or_else(|| existing.local_team_id.clone()),
            visitor_team_id: req
                .visitor_team_id
                .clone()
                .unwrap_or_else(|| existing.visitor_team_id.clone()),
            date: req.date.map(DateTime::from_chrono).unwrap_or(existing.date),
            venue: req.venue.clone().unwrap_or_else(|| existing.venue.clone()),
            referee_id: req.referee_id.clone().or_else(|| existing.referee_id.clone()),
            updated_at: DateTime::now(),
            ..existing.clone()
        };

        let result = self
            .collection()
            .replace_one(doc! { "_id": fixture.id.as_str() }, &fixture)
            .await?;

        if result.matched_count == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(fixture)
    }

    /// Store the final score and close the fixture
    pub async fn record_result(&self, id: &str, local_score: u32, visitor_score: u32) -> Result<Match> {
        self.collection()
            .find_one_and_update(
                doc! { "_id": id },
                doc! {
                    "$set": {
                        "localScore": i64::from(local_score),
                        "visitorScore": i64::from(visitor_score),
                        "completed": true,
                        "updatedAt": DateTime::now(),
                    }
                },
            )
            .return_document(mongodb::options::ReturnDocument::After)
            .await?
            .ok_or(StorageError::NotFound)
    }

    pub async fn link_match_act(&self, id: &str, match_act_id: Option<&str>) -> Result<()> {
        self.collection()
            .update_one(
                doc! { "_id": id },
                doc! { "$set": { "matchActId": match_act_id, "updatedAt": DateTime::now() } },
            )
            .await?;

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

pub(crate) fn filter_document(filter: &MatchFilter) -> Document {
    let mut query = Document::new();

    if let Some(competition_id) = filter.competition_id.as_deref().filter(|c| !c.is_empty()) {
        query.insert("competitionId", competition_id);
    }
    if let Some(team_id) = filter.team_id.as_deref().filter(|t| !t.is_empty()) {
        query.insert(
            "$or",
            vec![
                doc! { "localTeamId": team_id },
                doc! { "visitorTeamId": team_id },
            ],
        );
    }
    if let Some(round) = filter.round {
        query.insert("round", i64::from(round));
    }
    if let Some(completed) = filter.completed {
        query.insert("completed", completed);
    }

    query
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_filter_matches_home_and_away() {
        let filter = MatchFilter {
            team_id: Some("t3".to_string()),
            completed: Some(false),
            ..Default::default()
        };

        assert_eq!(
            filter_document(&filter),
            doc! {
                "$or": [ { "localTeamId": "t3" }, { "visitorTeamId": "t3" } ],
                "completed": false,
            }
        );
    }

    #[test]
    fn test_round_and_competition_filter() {
        let filter = MatchFilter {
            competition_id: Some("c1".to_string()),
            round: Some(4),
            ..Default::default()
        };
        let query = filter_document(&filter);

        assert_eq!(query.get_str("competitionId").unwrap(), "c1");
        assert_eq!(query.get_i64("round").unwrap(), 4);
    }
}
