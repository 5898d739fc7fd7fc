pub mod auth;
pub mod common;
pub mod competition;
pub mod favorite;
pub mod match_act;
pub mod matches;
pub mod referee;
pub mod team;
pub mod user;
pub mod wrestler;
