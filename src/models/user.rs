//! User model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// User from the users table
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: String,
    pub created_at: DateTime<Utc>,
}
