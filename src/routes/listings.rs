//! Listing browse and detail handlers

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::booking::services;
use crate::db;
use crate::error::Result;
use crate::models::{Listing, ListingSummary};
use crate::AppState;

/// Query parameters for the listing browse page
#[derive(Debug, Deserialize)]
pub struct ListingsQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default)]
    pub category: Option<String>,
}

fn default_page() -> i64 {
    1
}

const LISTINGS_PER_PAGE: i64 = 20;

/// Paginated browse response
#[derive(Debug, Serialize)]
pub struct ListingsPage {
    pub listings: Vec<ListingSummary>,
    pub page: i64,
    pub total_pages: i64,
    pub has_previous: bool,
    pub has_next: bool,
}

/// Router for listing endpoints, nested under /api
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/listings", get(list))
        .route("/listings/:id", get(detail))
}

/// Browse listings with optional category filter
async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListingsQuery>,
) -> Result<Json<ListingsPage>> {
    let page = query.page.max(1);
    let offset = (page - 1) * LISTINGS_PER_PAGE;
    let category = query.category.as_deref();

    let listings = db::get_listings(&state.db, category, LISTINGS_PER_PAGE, offset).await?;
    let total = db::count_listings(&state.db, category).await?;
    let total_pages = (total + LISTINGS_PER_PAGE - 1) / LISTINGS_PER_PAGE;

    Ok(Json(ListingsPage {
        listings,
        page,
        total_pages,
        has_previous: page > 1,
        has_next: page < total_pages,
    }))
}

/// Listing detail
async fn detail(
    State(state): State<AppState>,
    Path(listing_id): Path<Uuid>,
) -> Result<Json<Listing>> {
    let listing = services::listing_by_id(&state.db, &state.cache, listing_id).await?;

    Ok(Json((*listing).clone()))
}
