//! Caller identity extraction.
//!
//! The service sits behind an authenticating proxy which verifies the user
//! and forwards the id in the `x-user-id` header (auth provider integration
//! itself is out of scope). A missing or malformed header is a 401; all
//! `/api` queries filter rows by this id.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use crate::error::AppError;

/// Header carrying the verified user id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// The authenticated caller's user id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserId(pub Uuid);

impl<S> FromRequestParts<S> for UserId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(USER_ID_HEADER)
            .ok_or_else(|| AppError::unauthorized(format!("missing {USER_ID_HEADER} header")))?;

        let s = value
            .to_str()
            .map_err(|_| AppError::unauthorized(format!("invalid {USER_ID_HEADER} header")))?;

        let id = Uuid::parse_str(s)
            .map_err(|_| AppError::unauthorized(format!("{USER_ID_HEADER} is not a valid UUID")))?;

        Ok(UserId(id))
    }
}
