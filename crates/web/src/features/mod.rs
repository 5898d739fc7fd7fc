use storage::dto::common::PaginationParams;

use crate::error::{WebError, WebResult};

pub mod auth;
pub mod competitions;
pub mod favorites;
pub mod health;
pub mod match_acts;
pub mod matches;
pub mod referees;
pub mod teams;
pub mod users;
pub mod wrestlers;

/// Reject out-of-range `page`/`size` query values
pub(crate) fn check_pagination(params: PaginationParams) -> WebResult<()> {
    params.validate().map_err(WebError::BadRequest)
}
