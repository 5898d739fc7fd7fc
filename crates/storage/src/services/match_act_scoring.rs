use std::collections::HashSet;

use bson::DateTime;

use crate::dto::match_act::UpdateMatchActRequest;
use crate::error::{Result, StorageError};
use crate::models::{Bout, BoutWinner, Match, MatchAct, SignatureParty, TeamRoster, new_id};

/// Falls a wrestler needs to take the bout
pub const FALLS_TO_WIN: u8 = 2;

/// Penalties ("amonestaciones") that disqualify a wrestler
pub const PENALTIES_FOR_DISQUALIFICATION: u8 = 3;

/// Decide the bout from its counters. Disqualification wins over falls; when
/// the counters do not decide it, the referee's recorded tag stands.
pub fn resolve_bout_winner(bout: &Bout) -> Option<BoutWinner> {
    let local_out = bout.local_penalties >= PENALTIES_FOR_DISQUALIFICATION;
    let visitor_out = bout.visitor_penalties >= PENALTIES_FOR_DISQUALIFICATION;

    match (local_out, visitor_out) {
        (true, true) => return Some(BoutWinner::Draw),
        (true, false) => return Some(BoutWinner::Visitor),
        (false, true) => return Some(BoutWinner::Local),
        (false, false) => {}
    }

    if bout.local_falls >= FALLS_TO_WIN {
        Some(BoutWinner::Local)
    } else if bout.visitor_falls >= FALLS_TO_WIN {
        Some(BoutWinner::Visitor)
    } else {
        bout.winner
    }
}

/// Check bouts against each other and against the team rosters
pub fn validate_bouts(bouts: &[Bout], local: &TeamRoster, visitor: &TeamRoster) -> Result<()> {
    let mut orders = HashSet::new();

    for bout in bouts {
        if bout.order == 0 {
            return Err(invalid("Bout order must start at 1"));
        }
        if !orders.insert(bout.order) {
            return Err(invalid(&format!("Duplicate bout order {}", bout.order)));
        }
        if bout.local_falls > FALLS_TO_WIN || bout.visitor_falls > FALLS_TO_WIN {
            return Err(invalid(&format!(
                "Bout {}: a bout is decided at {} falls",
                bout.order, FALLS_TO_WIN
            )));
        }
        if bout.local_falls == FALLS_TO_WIN && bout.visitor_falls == FALLS_TO_WIN {
            return Err(invalid(&format!(
                "Bout {}: both wrestlers cannot reach {} falls",
                bout.order, FALLS_TO_WIN
            )));
        }
        if bout.local_wrestler_id == bout.visitor_wrestler_id {
            return Err(invalid(&format!(
                "Bout {}: the same wrestler is on both sides",
                bout.order
            )));
        }
        if !local.wrestlers.is_empty() && !local.lists(&bout.local_wrestler_id) {
            return Err(invalid(&format!(
                "Bout {}: wrestler {} is not in the local roster",
                bout.order, bout.local_wrestler_id
            )));
        }
        if !visitor.wrestlers.is_empty() && !visitor.lists(&bout.visitor_wrestler_id) {
            return Err(invalid(&format!(
                "Bout {}: wrestler {} is not in the visitor roster",
                bout.order, bout.visitor_wrestler_id
            )));
        }
    }

    Ok(())
}

/// Resolve every bout and recompute the team scores. Bouts are kept in
/// order and get an id when they do not have one yet.
pub fn score_match_act(act: &mut MatchAct) {
    act.bouts.sort_by_key(|b| b.order);

    for bout in act.bouts.iter_mut() {
        if bout.id.is_empty() {
            bout.id = new_id();
        }
        bout.winner = resolve_bout_winner(bout);
    }

    let (local, visitor) = team_scores(&act.bouts);
    act.local_score = local;
    act.visitor_score = visitor;
    act.winner = if act.is_completed {
        Some(act_winner(local, visitor))
    } else {
        None
    };
}

/// Bouts won by each side; drawn and pending bouts score for nobody
pub fn team_scores(bouts: &[Bout]) -> (u32, u32) {
    bouts.iter().fold((0, 0), |(local, visitor), bout| match bout.winner {
        Some(BoutWinner::Local) => (local + 1, visitor),
        Some(BoutWinner::Visitor) => (local, visitor + 1),
        _ => (local, visitor),
    })
}

pub fn act_winner(local_score: u32, visitor_score: u32) -> BoutWinner {
    match local_score.cmp(&visitor_score) {
        std::cmp::Ordering::Greater => BoutWinner::Local,
        std::cmp::Ordering::Less => BoutWinner::Visitor,
        std::cmp::Ordering::Equal => BoutWinner::Draw,
    }
}

/// Rosters must name the fixture's own teams, on the same sides
pub fn check_rosters(fixture: &Match, local: &TeamRoster, visitor: &TeamRoster) -> Result<()> {
    if local.team_id != fixture.local_team_id || visitor.team_id != fixture.visitor_team_id {
        return Err(invalid("Rosters do not match the teams of the match"));
    }
    Ok(())
}

/// A completed act holds at least one bout and every bout is decided
pub fn ensure_decided(act: &MatchAct) -> Result<()> {
    if act.bouts.is_empty() {
        return Err(invalid("A completed match act needs at least one bout"));
    }
    if let Some(pending) = act.bouts.iter().find(|b| resolve_bout_winner(b).is_none()) {
        return Err(invalid(&format!("Bout {} has no result", pending.order)));
    }
    Ok(())
}

/// Any signature freezes the act
pub fn ensure_unsigned(act: &MatchAct, action: &str) -> Result<()> {
    if act.has_signatures() {
        return Err(StorageError::ConstraintViolation(format!(
            "Signed match acts cannot be {}",
            action
        )));
    }
    Ok(())
}

/// Apply an edit to an unsigned act and re-score it. Nothing is changed
/// when the edit is rejected.
pub fn apply_update(act: &mut MatchAct, req: &UpdateMatchActRequest, fixture: &Match) -> Result<()> {
    ensure_unsigned(act, "edited")?;

    let mut edited = act.clone();
    if let Some(venue) = &req.venue {
        edited.venue = venue.clone();
    }
    if let Some(date) = req.date {
        edited.date = DateTime::from_chrono(date);
    }
    if let Some(start_time) = &req.start_time {
        edited.start_time = Some(start_time.clone());
    }
    if let Some(end_time) = &req.end_time {
        edited.end_time = Some(end_time.clone());
    }
    if let Some(main_referee) = &req.main_referee {
        edited.main_referee = main_referee.clone();
    }
    if let Some(assistants) = &req.assistant_referees {
        edited.assistant_referees = assistants.clone();
    }
    if let Some(local_team) = &req.local_team {
        edited.local_team = local_team.clone();
    }
    if let Some(visitor_team) = &req.visitor_team {
        edited.visitor_team = visitor_team.clone();
    }
    if let Some(bouts) = &req.bouts {
        edited.bouts = bouts.clone();
    }
    if let Some(comments) = &req.comments {
        edited.comments = Some(comments.clone());
    }

    check_rosters(fixture, &edited.local_team, &edited.visitor_team)?;
    validate_bouts(&edited.bouts, &edited.local_team, &edited.visitor_team)?;
    if edited.is_completed {
        ensure_decided(&edited)?;
    }
    score_match_act(&mut edited);

    *act = edited;
    Ok(())
}

/// Score the fixture takes from its act, once the act is completed
pub fn fixture_result(act: &MatchAct) -> Option<(u32, u32)> {
    act.is_completed.then_some((act.local_score, act.visitor_score))
}

/// Close the act. Every bout must be decided first.
pub fn complete(act: &mut MatchAct) -> Result<()> {
    if act.is_completed {
        return Err(invalid("Match act is already completed"));
    }
    ensure_decided(act)?;

    act.is_completed = true;
    act.is_draft = false;
    score_match_act(act);

    Ok(())
}

/// Record one party's signature. The act is sealed when the third one lands.
pub fn sign(act: &mut MatchAct, party: SignatureParty, now: DateTime) -> Result<()> {
    if !act.is_completed {
        return Err(invalid("Only completed match acts can be signed"));
    }

    let slot = match party {
        SignatureParty::LocalCaptain => &mut act.local_captain_signed,
        SignatureParty::VisitorCaptain => &mut act.visitor_captain_signed,
        SignatureParty::MainReferee => &mut act.referee_signed,
    };
    if *slot {
        return Err(StorageError::ConstraintViolation(
            "This party has already signed the match act".to_string(),
        ));
    }
    *slot = true;

    if act.is_fully_signed() {
        act.signed_at = Some(now);
    }

    Ok(())
}

fn invalid(message: &str) -> StorageError {
    StorageError::InvalidInput(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AgeCategory, Island, RefereeInfo, RosterEntry};

    fn bout(order: u32, local_falls: u8, visitor_falls: u8) -> Bout {
        Bout {
            id: String::new(),
            order,
            local_wrestler_id: format!("l{}", order),
            visitor_wrestler_id: format!("v{}", order),
            local_falls,
            visitor_falls,
            local_penalties: 0,
            visitor_penalties: 0,
            winner: None,
        }
    }

    fn roster(team_id: &str, prefix: &str, size: u32) -> TeamRoster {
        TeamRoster {
            team_id: team_id.to_string(),
            team_name: format!("Club {}", team_id),
            captain_id: None,
            coach_name: None,
            wrestlers: (1..=size)
                .map(|i| RosterEntry {
                    wrestler_id: format!("{}{}", prefix, i),
                    name: format!("Luchador {}{}", prefix, i),
                    license_number: None,
                    classification: None,
                })
                .collect(),
        }
    }

    fn fixture() -> Match {
        let now = DateTime::now();
        Match {
            id: "m1".to_string(),
            competition_id: "c1".to_string(),
            round: 1,
            local_team_id: "t1".to_string(),
            visitor_team_id: "t2".to_string(),
            local_score: 0,
            visitor_score: 0,
            date: now,
            venue: "Terrero de Tacoronte".to_string(),
            completed: false,
            referee_id: None,
            match_act_id: Some("act".to_string()),
            created_at: now,
            updated_at: now,
        }
    }

    fn act(bouts: Vec<Bout>) -> MatchAct {
        let now = DateTime::now();
        MatchAct {
            id: "act".to_string(),
            match_id: "m1".to_string(),
            competition_id: "c1".to_string(),
            season: "2024-2025".to_string(),
            category: AgeCategory::Senior,
            island: Island::Tenerife,
            venue: "Terrero de Tacoronte".to_string(),
            date: now,
            start_time: None,
            end_time: None,
            main_referee: RefereeInfo {
                referee_id: None,
                name: "Juan".to_string(),
                license_number: None,
            },
            assistant_referees: vec![],
            local_team: roster("t1", "l", 12),
            visitor_team: roster("t2", "v", 12),
            bouts,
            local_score: 0,
            visitor_score: 0,
            winner: None,
            comments: None,
            is_draft: true,
            is_completed: false,
            local_captain_signed: false,
            visitor_captain_signed: false,
            referee_signed: false,
            signed_at: None,
            created_by: "u1".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_two_falls_win_the_bout() {
        assert_eq!(resolve_bout_winner(&bout(1, 2, 1)), Some(BoutWinner::Local));
        assert_eq!(resolve_bout_winner(&bout(1, 0, 2)), Some(BoutWinner::Visitor));
    }

    #[test]
    fn test_undecided_bout_keeps_recorded_tag() {
        let mut separated = bout(1, 1, 1);
        assert_eq!(resolve_bout_winner(&separated), None);

        separated.winner = Some(BoutWinner::Draw);
        assert_eq!(resolve_bout_winner(&separated), Some(BoutWinner::Draw));
    }

    #[test]
    fn test_disqualification_beats_falls() {
        let mut b = bout(1, 1, 0);
        b.local_penalties = PENALTIES_FOR_DISQUALIFICATION;
        assert_eq!(resolve_bout_winner(&b), Some(BoutWinner::Visitor));

        b.visitor_penalties = PENALTIES_FOR_DISQUALIFICATION;
        assert_eq!(resolve_bout_winner(&b), Some(BoutWinner::Draw));
    }

    #[test]
    fn test_stale_tag_is_overridden_by_falls() {
        let mut b = bout(1, 2, 0);
        b.winner = Some(BoutWinner::Visitor);
        assert_eq!(resolve_bout_winner(&b), Some(BoutWinner::Local));
    }

    #[test]
    fn test_score_counts_won_bouts_only() {
        let mut separated = bout(3, 1, 1);
        separated.winner = Some(BoutWinner::Draw);
        let mut a = act(vec![bout(2, 0, 2), bout(1, 2, 0), separated, bout(4, 2, 1)]);

        score_match_act(&mut a);

        assert_eq!((a.local_score, a.visitor_score), (2, 1));
        assert_eq!(
            a.bouts.iter().map(|b| b.order).collect::<Vec<_>>(),
            vec![1, 2, 3, 4]
        );
        assert!(a.bouts.iter().all(|b| !b.id.is_empty()));
        assert_eq!(a.winner, None);
    }

    #[test]
    fn test_validate_rejects_duplicate_orders() {
        let a = act(vec![bout(1, 0, 0), bout(1, 0, 0)]);
        let err = validate_bouts(&a.bouts, &a.local_team, &a.visitor_team).unwrap_err();
        assert!(matches!(err, StorageError::InvalidInput(_)));
    }

    #[test]
    fn test_validate_rejects_both_sides_at_two_falls() {
        let a = act(vec![bout(1, 2, 2)]);
        assert!(validate_bouts(&a.bouts, &a.local_team, &a.visitor_team).is_err());
    }

    #[test]
    fn test_validate_rejects_wrestler_outside_roster() {
        let mut b = bout(1, 0, 0);
        b.local_wrestler_id = "stranger".to_string();
        let a = act(vec![b]);
        assert!(validate_bouts(&a.bouts, &a.local_team, &a.visitor_team).is_err());
    }

    #[test]
    fn test_validate_accepts_any_wrestler_with_empty_roster() {
        let mut a = act(vec![bout(1, 0, 0)]);
        a.local_team.wrestlers.clear();
        a.bouts[0].local_wrestler_id = "anyone".to_string();
        assert!(validate_bouts(&a.bouts, &a.local_team, &a.visitor_team).is_ok());
    }

    #[test]
    fn test_complete_requires_decided_bouts() {
        let mut a = act(vec![bout(1, 2, 0), bout(2, 1, 0)]);
        assert!(complete(&mut a).is_err());
        assert!(!a.is_completed);
    }

    #[test]
    fn test_complete_sets_winner() {
        let mut a = act(vec![bout(1, 2, 0), bout(2, 0, 2), bout(3, 2, 1)]);
        complete(&mut a).unwrap();

        assert!(a.is_completed);
        assert!(!a.is_draft);
        assert_eq!(a.winner, Some(BoutWinner::Local));
    }

    #[test]
    fn test_complete_with_level_scores_is_a_draw() {
        let mut a = act(vec![bout(1, 2, 0), bout(2, 0, 2)]);
        complete(&mut a).unwrap();
        assert_eq!(a.winner, Some(BoutWinner::Draw));
    }

    #[test]
    fn test_sign_requires_completed_act() {
        let mut a = act(vec![bout(1, 2, 0)]);
        assert!(sign(&mut a, SignatureParty::MainReferee, DateTime::now()).is_err());
    }

    #[test]
    fn test_third_signature_seals_the_act() {
        let mut a = act(vec![bout(1, 2, 0)]);
        complete(&mut a).unwrap();

        sign(&mut a, SignatureParty::LocalCaptain, DateTime::now()).unwrap();
        sign(&mut a, SignatureParty::VisitorCaptain, DateTime::now()).unwrap();
        assert!(a.signed_at.is_none());

        sign(&mut a, SignatureParty::MainReferee, DateTime::now()).unwrap();
        assert!(a.is_fully_signed());
        assert!(a.signed_at.is_some());
    }

    #[test]
    fn test_party_cannot_sign_twice() {
        let mut a = act(vec![bout(1, 2, 0)]);
        complete(&mut a).unwrap();
        sign(&mut a, SignatureParty::LocalCaptain, DateTime::now()).unwrap();

        let err = sign(&mut a, SignatureParty::LocalCaptain, DateTime::now()).unwrap_err();
        assert!(matches!(err, StorageError::ConstraintViolation(_)));
    }

    #[test]
    fn test_rosters_must_follow_fixture_sides() {
        let a = act(vec![]);
        assert!(check_rosters(&fixture(), &a.local_team, &a.visitor_team).is_ok());
        assert!(matches!(
            check_rosters(&fixture(), &a.visitor_team, &a.local_team),
            Err(StorageError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_complete_requires_a_bout() {
        let mut a = act(vec![]);
        assert!(matches!(complete(&mut a), Err(StorageError::InvalidInput(_))));
    }

    #[test]
    fn test_completed_act_cannot_lose_its_bouts() {
        let mut a = act(vec![bout(1, 2, 0)]);
        complete(&mut a).unwrap();

        let req = UpdateMatchActRequest {
            bouts: Some(vec![]),
            ..Default::default()
        };
        let err = apply_update(&mut a, &req, &fixture()).unwrap_err();

        assert!(matches!(err, StorageError::InvalidInput(_)));
        assert_eq!(a.bouts.len(), 1);
        assert_eq!((a.local_score, a.visitor_score), (1, 0));
    }

    #[test]
    fn test_completed_act_cannot_gain_a_pending_bout() {
        let mut a = act(vec![bout(1, 2, 0)]);
        complete(&mut a).unwrap();

        let req = UpdateMatchActRequest {
            bouts: Some(vec![bout(1, 2, 0), bout(2, 1, 0)]),
            ..Default::default()
        };
        assert!(apply_update(&mut a, &req, &fixture()).is_err());
    }

    #[test]
    fn test_completed_act_edit_rescores_and_feeds_fixture() {
        let mut a = act(vec![bout(1, 2, 0), bout(2, 0, 2), bout(3, 2, 1)]);
        complete(&mut a).unwrap();
        assert_eq!(fixture_result(&a), Some((2, 1)));

        let req = UpdateMatchActRequest {
            bouts: Some(vec![bout(1, 2, 0), bout(2, 0, 2), bout(3, 1, 2)]),
            ..Default::default()
        };
        apply_update(&mut a, &req, &fixture()).unwrap();

        assert_eq!(a.winner, Some(BoutWinner::Visitor));
        assert_eq!(fixture_result(&a), Some((1, 2)));
    }

    #[test]
    fn test_draft_edit_leaves_fixture_alone() {
        let mut a = act(vec![]);
        let req = UpdateMatchActRequest {
            bouts: Some(vec![bout(1, 2, 0), bout(2, 1, 1)]),
            venue: Some("Terrero de La Laguna".to_string()),
            ..Default::default()
        };
        apply_update(&mut a, &req, &fixture()).unwrap();

        assert_eq!(a.venue, "Terrero de La Laguna");
        assert_eq!((a.local_score, a.visitor_score), (1, 0));
        assert_eq!(fixture_result(&a), None);
    }

    #[test]
    fn test_edit_rejects_rosters_of_other_teams() {
        let mut a = act(vec![]);
        let mut stranger = a.local_team.clone();
        stranger.team_id = "t9".to_string();
        let req = UpdateMatchActRequest {
            local_team: Some(stranger),
            ..Default::default()
        };

        assert!(apply_update(&mut a, &req, &fixture()).is_err());
        assert_eq!(a.local_team.team_id, "t1");
    }

    #[test]
    fn test_signed_act_is_frozen() {
        let mut a = act(vec![bout(1, 2, 0)]);
        complete(&mut a).unwrap();
        sign(&mut a, SignatureParty::MainReferee, DateTime::now()).unwrap();

        let req = UpdateMatchActRequest {
            comments: Some("late fix".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            apply_update(&mut a, &req, &fixture()),
            Err(StorageError::ConstraintViolation(_))
        ));
        assert!(matches!(
            ensure_unsigned(&a, "deleted"),
            Err(StorageError::ConstraintViolation(_))
        ));
        assert_eq!(a.comments, None);
    }

    #[test]
    fn test_unsigned_act_can_be_deleted() {
        let mut a = act(vec![bout(1, 2, 0)]);
        complete(&mut a).unwrap();
        assert!(ensure_unsigned(&a, "deleted").is_ok());
    }
}
