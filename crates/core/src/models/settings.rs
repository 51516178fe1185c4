use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::errors::CoreError;

pub const DEFAULT_API_BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// CoinGecko caps `per_page` on `/coins/markets` at 250.
pub const MAX_LISTING_PER_PAGE: u32 = 250;

/// Runtime configuration for the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Quote currency code sent upstream (e.g., "usd", "eur").
    pub vs_currency: String,

    /// Base URL of the market-data API, without a trailing slash.
    pub api_base_url: String,

    /// How many coins the market view requests in one listing call.
    pub listing_per_page: u32,

    /// Rows per page in the market list.
    pub page_size: usize,

    /// Directory holding the persisted watchlist (native only).
    pub data_dir: PathBuf,

    /// Per-request timeout (native only; browsers apply their own).
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            vs_currency: "usd".to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            listing_per_page: MAX_LISTING_PER_PAGE,
            page_size: 50,
            data_dir: PathBuf::from(".crypto-dash"),
            request_timeout_secs: 30,
        }
    }
}

impl Settings {
    /// Defaults overridden by `CRYPTO_DASH_*` environment variables.
    /// Unparseable numeric values are reported, not silently ignored.
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`Settings::from_env`] but reading from an arbitrary source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        if let Some(v) = lookup("CRYPTO_DASH_CURRENCY") {
            settings.vs_currency = v.trim().to_lowercase();
        }
        if let Some(v) = lookup("CRYPTO_DASH_API_URL") {
            settings.api_base_url = v.trim().trim_end_matches('/').to_string();
        }
        if let Some(v) = lookup("CRYPTO_DASH_PER_PAGE") {
            settings.listing_per_page = parse_number("CRYPTO_DASH_PER_PAGE", &v)?;
        }
        if let Some(v) = lookup("CRYPTO_DASH_PAGE_SIZE") {
            settings.page_size = parse_number("CRYPTO_DASH_PAGE_SIZE", &v)?;
        }
        if let Some(v) = lookup("CRYPTO_DASH_DATA_DIR") {
            settings.data_dir = PathBuf::from(v);
        }
        if let Some(v) = lookup("CRYPTO_DASH_TIMEOUT_SECS") {
            settings.request_timeout_secs = parse_number("CRYPTO_DASH_TIMEOUT_SECS", &v)?;
        }

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.vs_currency.trim().is_empty() {
            return Err(CoreError::ValidationError("Currency must not be empty".into()));
        }
        if self.api_base_url.trim().is_empty() {
            return Err(CoreError::ValidationError("API base URL must not be empty".into()));
        }
        if self.page_size == 0 {
            return Err(CoreError::ValidationError("Page size must be at least 1".into()));
        }
        if !(1..=MAX_LISTING_PER_PAGE).contains(&self.listing_per_page) {
            return Err(CoreError::ValidationError(format!(
                "Listing size {} out of range (expected 1..={MAX_LISTING_PER_PAGE})",
                self.listing_per_page
            )));
        }
        Ok(())
    }
}

fn parse_number<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, CoreError> {
    value.trim().parse().map_err(|_| {
        CoreError::ValidationError(format!("{name} must be a positive number, got '{value}'"))
    })
}
