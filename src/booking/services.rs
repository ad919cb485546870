//! Booking service functions with database access.
//!
//! These functions combine the pure calculators with the database and cache
//! to answer availability and drive the reservation submission flow.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::cache::AppCache;
use crate::db;
use crate::error::{AppError, Result};
use crate::models::Listing;

use super::calculators;
use super::models::Reservation;
use super::queries;
use super::requests::CreateReservationRequest;

/// Blocked-date set for a listing, cache-aside.
pub async fn blocked_dates_for_listing(
    pool: &PgPool,
    cache: &AppCache,
    listing_id: Uuid,
) -> Result<Arc<BTreeSet<NaiveDate>>> {
    if let Some(cached) = cache.availability.get(&listing_id).await {
        tracing::debug!("Cache HIT for availability: {}", listing_id);
        return Ok(cached);
    }
    tracing::debug!("Cache MISS for availability: {}", listing_id);

    // 404 for unknown listings rather than an empty set
    let _ = listing_by_id(pool, cache, listing_id).await?;

    let spans = queries::reservation_spans(pool, listing_id).await?;
    let dates = Arc::new(calculators::blocked_dates(&spans));

    cache
        .availability
        .insert(listing_id, Arc::clone(&dates))
        .await;

    Ok(dates)
}

/// Listing row, cache-aside.
pub async fn listing_by_id(
    pool: &PgPool,
    cache: &AppCache,
    listing_id: Uuid,
) -> Result<Arc<Listing>> {
    if let Some(cached) = cache.listings.get(&listing_id).await {
        return Ok(cached);
    }

    let listing = Arc::new(db::get_listing(pool, listing_id).await?);
    cache
        .listings
        .insert(listing_id, Arc::clone(&listing))
        .await;

    Ok(listing)
}

/// Create a reservation for an authenticated user.
///
/// Validates the range, recomputes the total from the listing's nightly
/// price (the submitted total must match), and checks the requested range
/// against the listing's existing spans. The check alone cannot guard two
/// concurrent submissions; the `reservations_no_overlap` exclusion
/// constraint rejects the race loser, which is reported as the same 409.
/// The availability cache entry for the listing is dropped after a
/// successful insert.
pub async fn create_reservation(
    pool: &PgPool,
    cache: &AppCache,
    user_id: Uuid,
    req: &CreateReservationRequest,
) -> Result<Reservation> {
    req.validate().map_err(AppError::Validation)?;

    let listing = listing_by_id(pool, cache, req.listing_id).await?;

    let expected = calculators::total_price(req.start_date, req.end_date, listing.price);
    if expected != req.total_price {
        return Err(AppError::Validation(format!(
            "total_price mismatch: expected {} for this stay",
            expected
        )));
    }

    let spans = queries::reservation_spans(pool, req.listing_id).await?;
    if let Some(existing) = calculators::find_conflict(&spans, req.start_date, req.end_date) {
        return Err(AppError::Conflict {
            existing_start: existing.start_date,
            existing_end: existing.end_date,
        });
    }

    let reservation = match queries::insert_reservation(
        pool,
        req.listing_id,
        user_id,
        req.start_date,
        req.end_date,
        req.total_price,
    )
    .await
    {
        Ok(reservation) => reservation,
        Err(AppError::Database(e))
            if is_exclusion_violation(e.as_database_error().and_then(|d| d.code()).as_deref()) =>
        {
            // A concurrent submission won the race after our check; report
            // its span the same way the check would have.
            return Err(conflict_for(pool, req).await?);
        }
        Err(e) => return Err(e),
    };

    cache.invalidate_availability(req.listing_id).await;

    info!(
        reservation_id = %reservation.id,
        listing_id = %reservation.listing_id,
        user_id = %user_id,
        "Reservation created"
    );

    Ok(reservation)
}

/// SQLSTATE 23P01: an exclusion constraint rejected the row
fn is_exclusion_violation(code: Option<&str>) -> bool {
    code == Some("23P01")
}

/// Build the Conflict error for a range the exclusion constraint rejected
async fn conflict_for(pool: &PgPool, req: &CreateReservationRequest) -> Result<AppError> {
    let spans = queries::reservation_spans(pool, req.listing_id).await?;
    let existing = calculators::find_conflict(&spans, req.start_date, req.end_date);

    // The winning row is committed by the time the constraint fires, so the
    // re-read finds it; if it was cancelled in between, echo the request.
    let (existing_start, existing_end) = match existing {
        Some(span) => (span.start_date, span.end_date),
        None => (req.start_date, req.end_date),
    };

    Ok(AppError::Conflict {
        existing_start,
        existing_end,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exclusion_violation_code_detected() {
        assert!(is_exclusion_violation(Some("23P01")));
    }

    #[test]
    fn test_other_codes_are_not_exclusion_violations() {
        assert!(!is_exclusion_violation(Some("23505"))); // unique violation
        assert!(!is_exclusion_violation(Some("23514"))); // check violation
        assert!(!is_exclusion_violation(None));
    }
}
