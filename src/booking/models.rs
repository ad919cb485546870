//! Database models for booking queries.
//!
//! These models use sqlx's FromRow derive for direct database deserialization.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

/// Reservation from the reservations table
#[derive(Debug, Clone, FromRow)]
pub struct Reservation {
    pub id: Uuid,
    pub listing_id: Uuid,
    pub user_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_price: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Slim start/end projection used by availability queries
#[derive(Debug, Clone, Copy, FromRow)]
pub struct ReservationSpan {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}
