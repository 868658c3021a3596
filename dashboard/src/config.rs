//! Dashboard configuration loaded from environment variables.

use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the JSON substrate file
    pub storage_path: String,
    /// Substrate capacity in bytes
    pub quota_bytes: usize,
    /// Seed demo records into an empty store before rendering
    pub seed_demo_data: bool,
    /// How many activity-feed entries to show
    pub recent_limit: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Config {
            storage_path: env_or("STORAGE_PATH", "./donor_portal.json"),
            quota_bytes: env_or("STORAGE_QUOTA_BYTES", "5242880")
                .parse()
                .context("Invalid STORAGE_QUOTA_BYTES")?,
            seed_demo_data: env_or("SEED_DEMO_DATA", "false")
                .parse()
                .context("Invalid SEED_DEMO_DATA")?,
            recent_limit: env_or("RECENT_LIMIT", "10")
                .parse()
                .context("Invalid RECENT_LIMIT")?,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
