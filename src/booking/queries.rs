//! Database queries for the booking engine.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppError;

use super::models::{Reservation, ReservationSpan};

/// Get all reservation spans for a listing, earliest first
pub async fn reservation_spans(
    pool: &PgPool,
    listing_id: Uuid,
) -> Result<Vec<ReservationSpan>, AppError> {
    let spans = sqlx::query_as::<_, ReservationSpan>(
        r#"
        SELECT start_date, end_date
        FROM reservations
        WHERE listing_id = $1
        ORDER BY start_date
        "#,
    )
    .bind(listing_id)
    .fetch_all(pool)
    .await?;

    Ok(spans)
}

/// Insert a new reservation.
///
/// The reservations table carries an exclusion constraint on
/// `(listing_id, daterange(start_date, end_date, '[]'))`, so an insert that
/// overlaps an existing reservation fails with SQLSTATE 23P01 no matter how
/// the submissions interleave.
pub async fn insert_reservation(
    pool: &PgPool,
    listing_id: Uuid,
    user_id: Uuid,
    start_date: NaiveDate,
    end_date: NaiveDate,
    total_price: Decimal,
) -> Result<Reservation, AppError> {
    let reservation = sqlx::query_as::<_, Reservation>(
        r#"
        INSERT INTO reservations (listing_id, user_id, start_date, end_date, total_price)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, listing_id, user_id, start_date, end_date, total_price, created_at
        "#,
    )
    .bind(listing_id)
    .bind(user_id)
    .bind(start_date)
    .bind(end_date)
    .bind(total_price)
    .fetch_one(pool)
    .await?;

    Ok(reservation)
}

/// Get a user's reservations, newest first
pub async fn reservations_for_user(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<Reservation>, AppError> {
    let reservations = sqlx::query_as::<_, Reservation>(
        r#"
        SELECT id, listing_id, user_id, start_date, end_date, total_price, created_at
        FROM reservations
        WHERE user_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(reservations)
}

/// Listings with the most recent reservations (for cache warming)
pub async fn recently_reserved_listings(
    pool: &PgPool,
    limit: i64,
) -> Result<Vec<Uuid>, AppError> {
    let ids: Vec<Uuid> = sqlx::query_scalar(
        r#"
        SELECT listing_id
        FROM reservations
        GROUP BY listing_id
        ORDER BY MAX(created_at) DESC
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(ids)
}
