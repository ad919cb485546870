//! Booking engine module.
//!
//! Availability computation, stay pricing, and the reservation submission
//! flow for the marketplace API.

pub mod calculators;
pub mod models;
pub mod queries;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod services;

// Re-export commonly used items
pub use calculators::{blocked_dates, nights_between, round_money, total_price};
pub use routes::router;
