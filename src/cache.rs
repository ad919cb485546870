//! In-memory caching using moka
//!
//! Caches listing rows and per-listing blocked-date sets. Availability only
//! changes when a reservation is created, so entries are invalidated on
//! write and otherwise expire on TTL.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use moka::future::Cache;
use serde::Serialize;
use sqlx::PgPool;
use tokio::time::interval;
use tracing::{info, warn};
use uuid::Uuid;

use crate::booking;
use crate::models::Listing;

/// Application cache holding listings and availability data
#[derive(Clone)]
pub struct AppCache {
    /// Listing rows (id -> Listing)
    pub listings: Cache<Uuid, Arc<Listing>>,
    /// Blocked-date sets (listing id -> sorted dates)
    pub availability: Cache<Uuid, Arc<BTreeSet<NaiveDate>>>,
}

impl AppCache {
    /// Create a new cache instance with configured TTLs
    pub fn new() -> Self {
        Self {
            // Listings: 1000 entries, 30 min TTL, 10 min idle
            listings: Cache::builder()
                .max_capacity(1000)
                .time_to_live(Duration::from_secs(30 * 60))
                .time_to_idle(Duration::from_secs(10 * 60))
                .build(),

            // Availability: 1000 entries, 10 min TTL (invalidated on booking)
            availability: Cache::builder()
                .max_capacity(1000)
                .time_to_live(Duration::from_secs(10 * 60))
                .time_to_idle(Duration::from_secs(5 * 60))
                .build(),
        }
    }

    /// Get cache statistics for monitoring
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            listings_size: self.listings.entry_count(),
            availability_size: self.availability.entry_count(),
        }
    }

    /// Invalidate all caches
    pub fn invalidate_all(&self) {
        self.listings.invalidate_all();
        self.availability.invalidate_all();
        info!("All caches invalidated");
    }

    /// Invalidate availability for a single listing (after a new reservation)
    pub async fn invalidate_availability(&self, listing_id: Uuid) {
        self.availability.invalidate(&listing_id).await;
        info!("Availability cache invalidated for listing: {}", listing_id);
    }
}

impl Default for AppCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache statistics for monitoring endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub listings_size: u64,
    pub availability_size: u64,
}

/// Start background cache warmer
///
/// Warms the cache on startup and refreshes every 10 minutes.
pub async fn start_cache_warmer(cache: AppCache, db: PgPool) {
    // Initial warm-up
    warm_cache(&cache, &db).await;

    // Periodic refresh every 10 minutes
    let mut interval = interval(Duration::from_secs(10 * 60));
    loop {
        interval.tick().await;
        warm_cache(&cache, &db).await;
    }
}

/// Warm the cache with availability for recently booked listings
async fn warm_cache(cache: &AppCache, db: &PgPool) {
    info!("Starting cache warm-up...");

    let listing_ids = match booking::queries::recently_reserved_listings(db, 50).await {
        Ok(ids) => ids,
        Err(e) => {
            warn!("Failed to load recently reserved listings: {}", e);
            return;
        }
    };

    for listing_id in listing_ids {
        match booking::queries::reservation_spans(db, listing_id).await {
            Ok(spans) => {
                let dates = booking::calculators::blocked_dates(&spans);
                cache
                    .availability
                    .insert(listing_id, Arc::new(dates))
                    .await;
            }
            Err(e) => warn!("Failed to warm availability for {}: {}", listing_id, e),
        }
    }

    info!("Cache warm-up complete. Stats: {:?}", cache.stats());
}
