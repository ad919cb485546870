//! Session-token authentication
//!
//! Requests carry an `Authorization: Bearer <token>` header. The token maps
//! to a row in the sessions table; expired or unknown tokens are rejected.
//! A missing or malformed header is rejected before any database access.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use uuid::Uuid;

use crate::db;
use crate::error::AppError;
use crate::AppState;

/// The authenticated user for the current request
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: String,
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(AppError::Unauthorized)?;

        let user = db::find_user_by_session(&state.db, token)
            .await?
            .ok_or(AppError::Unauthorized)?;

        Ok(CurrentUser {
            id: user.id,
            name: user.name,
            email: user.email,
        })
    }
}

/// Extract the bearer token from the Authorization header, if any
fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with_auth(value: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/api/reservations");
        if let Some(v) = value {
            builder = builder.header(AUTHORIZATION, v);
        }
        let (parts, _) = builder.body(()).unwrap().into_parts();
        parts
    }

    #[test]
    fn test_bearer_token_extracted() {
        let parts = parts_with_auth(Some("Bearer abc123"));
        assert_eq!(bearer_token(&parts), Some("abc123"));
    }

    #[test]
    fn test_missing_header_yields_none() {
        let parts = parts_with_auth(None);
        assert_eq!(bearer_token(&parts), None);
    }

    #[test]
    fn test_wrong_scheme_yields_none() {
        let parts = parts_with_auth(Some("Basic abc123"));
        assert_eq!(bearer_token(&parts), None);
    }

    #[test]
    fn test_empty_token_yields_none() {
        let parts = parts_with_auth(Some("Bearer "));
        assert_eq!(bearer_token(&parts), None);
    }
}
