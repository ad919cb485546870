//! Database-backed read models

pub mod listing;
pub mod user;

pub use listing::{Listing, ListingSummary};
pub use user::User;
