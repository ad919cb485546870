//! Response DTOs for booking API endpoints.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use super::models::Reservation;
use super::requests::default_currency;

/// Money value for JSON responses
#[derive(Debug, Clone, Serialize)]
pub struct MoneyResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub currency: String,
}

/// Response for a stay-price quote
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub nights: i64,
    pub nightly_price: MoneyResponse,
    pub total: MoneyResponse,
}

/// Response for listing availability
#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    pub listing_id: Uuid,
    pub blocked_dates: Vec<NaiveDate>,
}

/// A created or listed reservation
#[derive(Debug, Serialize)]
pub struct ReservationResponse {
    pub id: Uuid,
    pub listing_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_price: MoneyResponse,
    pub created_at: DateTime<Utc>,
}

impl From<Reservation> for ReservationResponse {
    fn from(r: Reservation) -> Self {
        Self {
            id: r.id,
            listing_id: r.listing_id,
            start_date: r.start_date,
            end_date: r.end_date,
            total_price: MoneyResponse {
                amount: r.total_price,
                currency: default_currency(),
            },
            created_at: r.created_at,
        }
    }
}
