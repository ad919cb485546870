//! Environment-driven configuration
//!
//! Values come from the process environment, after `dotenvy` has loaded any
//! local `.env` file. Only `DATABASE_URL` is required.

use std::{env, fmt::Display, str::FromStr};

use anyhow::Context;
use tracing::info;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: String,
    pub max_connections: u32,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            bind_addr: try_load("BIND_ADDR", "0.0.0.0:8080"),
            max_connections: try_load("DATABASE_MAX_CONNECTIONS", "10"),
        })
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    let raw = env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    match raw.parse() {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("Invalid {key} value ({e}), falling back to {default}");
            default.parse().unwrap_or_else(|e| panic!("bad default for {key}: {e}"))
        }
    }
}
