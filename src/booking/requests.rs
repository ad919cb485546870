//! Request DTOs for booking API endpoints.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

/// Request for a stay-price quote
#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(with = "rust_decimal::serde::str")]
    pub nightly_price: Decimal,
    #[serde(default = "default_currency")]
    pub currency: String,
}

impl QuoteRequest {
    pub fn validate(&self) -> Result<(), String> {
        validate_range(self.start_date, self.end_date)?;
        if self.nightly_price.is_sign_negative() {
            return Err("nightly_price must not be negative".to_string());
        }
        Ok(())
    }
}

/// Request to create a reservation
#[derive(Debug, Deserialize)]
pub struct CreateReservationRequest {
    pub listing_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_price: Decimal,
}

impl CreateReservationRequest {
    pub fn validate(&self) -> Result<(), String> {
        validate_range(self.start_date, self.end_date)
    }
}

fn validate_range(start: NaiveDate, end: NaiveDate) -> Result<(), String> {
    if end < start {
        return Err(format!(
            "end_date {} precedes start_date {}",
            end, start
        ));
    }
    Ok(())
}

pub fn default_currency() -> String {
    "USD".to_string()
}
