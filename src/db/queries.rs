//! Database queries for listings and users

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::{Listing, ListingSummary, User};

/// Get a listing by id
pub async fn get_listing(pool: &PgPool, id: Uuid) -> Result<Listing> {
    let listing = sqlx::query_as::<_, Listing>(
        r#"
        SELECT
            id, title, description, image_url, category, location_value,
            guest_count, room_count, bathroom_count, price, created_at
        FROM listings
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::NotFound)?;

    Ok(listing)
}

/// Get listings with optional category filter
pub async fn get_listings(
    pool: &PgPool,
    category: Option<&str>,
    limit: i64,
    offset: i64,
) -> Result<Vec<ListingSummary>> {
    let listings = match category {
        Some(cat) => {
            sqlx::query_as::<_, ListingSummary>(
                r#"
                SELECT id, title, image_url, category, location_value, price
                FROM listings
                WHERE category = $1
                ORDER BY created_at DESC
                LIMIT $2 OFFSET $3
                "#,
            )
            .bind(cat)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, ListingSummary>(
                r#"
                SELECT id, title, image_url, category, location_value, price
                FROM listings
                ORDER BY created_at DESC
                LIMIT $1 OFFSET $2
                "#,
            )
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?
        }
    };

    Ok(listings)
}

/// Count listings (for pagination)
pub async fn count_listings(pool: &PgPool, category: Option<&str>) -> Result<i64> {
    let count: i64 = match category {
        Some(cat) => {
            sqlx::query_scalar(
                r#"
                SELECT COUNT(*)
                FROM listings
                WHERE category = $1
                "#,
            )
            .bind(cat)
            .fetch_one(pool)
            .await?
        }
        None => {
            sqlx::query_scalar(
                r#"
                SELECT COUNT(*)
                FROM listings
                "#,
            )
            .fetch_one(pool)
            .await?
        }
    };

    Ok(count)
}

/// Resolve the user owning an unexpired session token
pub async fn find_user_by_session(pool: &PgPool, token: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT u.id, u.name, u.email, u.created_at
        FROM sessions s
        JOIN users u ON u.id = s.user_id
        WHERE s.token = $1
          AND s.expires_at > $2
        "#,
    )
    .bind(token)
    .bind(Utc::now())
    .fetch_optional(pool)
    .await?;

    Ok(user)
}
