//! Listing models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Listing from the listings table
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Listing {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub category: String,
    pub location_value: String,
    pub guest_count: i32,
    pub room_count: i32,
    pub bathroom_count: i32,
    /// Nightly price
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Slim listing row for browse pages
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ListingSummary {
    pub id: Uuid,
    pub title: String,
    pub image_url: Option<String>,
    pub category: String,
    pub location_value: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
}
