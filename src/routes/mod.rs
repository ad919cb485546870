//! Marketplace route handlers

pub mod listings;
