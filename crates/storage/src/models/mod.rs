mod competition;
mod enums;
mod favorite;
mod match_act;
mod matches;
mod referee;
mod team;
mod user;
mod wrestler;

pub use competition::Competition;
pub use enums::{
    AgeCategory, BoutWinner, DivisionCategory, FavoriteType, Island, Permission, SignatureParty,
    UserRole, WrestlerClassification,
};
pub use favorite::Favorite;
pub use match_act::{Bout, MatchAct, RefereeInfo, RosterEntry, TeamRoster};
pub use matches::Match;
pub use referee::Referee;
pub use team::Team;
pub use user::User;
pub use wrestler::Wrestler;

/// New document identifier
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
