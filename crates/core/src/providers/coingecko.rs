use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;
use tracing::{debug, warn};

use crate::errors::CoreError;
use crate::models::chart::{DayRange, MarketChartResponse, PriceSeries};
use crate::models::coin::{CoinDetail, CoinDetailResponse, CoinSummary};
use crate::models::settings::{Settings, DEFAULT_API_BASE_URL, MAX_LISTING_PER_PAGE};
use super::traits::MarketDataProvider;

const PROVIDER: &str = "CoinGecko";

/// CoinGecko public API provider.
///
/// - **Free**: No API key required for the public tier, rate limited.
/// - **Endpoints**: `/coins/markets`, `/coins/{id}`, `/coins/{id}/market_chart`
///
/// Note: CoinGecko ids are lowercase slugs like "bitcoin", "usd-coin".
pub struct CoinGeckoProvider {
    client: Client,
    base_url: String,
}

impl CoinGeckoProvider {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_API_BASE_URL, 30)
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::with_base_url(&settings.api_base_url, settings.request_timeout_secs)
    }

    #[cfg_attr(target_arch = "wasm32", allow(unused_variables))]
    pub fn with_base_url(base_url: &str, timeout_secs: u64) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(timeout_secs.max(1)));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `path` with `query`, mapping non-2xx statuses onto `CoreError`.
    /// `coin_id` turns a 404 into `CoinNotFound`.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        coin_id: Option<&str>,
    ) -> Result<T, CoreError> {
        let url = format!("{}{path}", self.base_url);
        debug!(%url, "GET");

        let resp = self.client.get(&url).query(query).send().await?;
        let status = resp.status();

        if !status.is_success() {
            return Err(match (status, coin_id) {
                (StatusCode::NOT_FOUND, Some(id)) => CoreError::CoinNotFound(id.to_string()),
                (StatusCode::TOO_MANY_REQUESTS, _) => CoreError::RateLimited {
                    provider: PROVIDER.into(),
                },
                _ => CoreError::Api {
                    provider: PROVIDER.into(),
                    message: format!("{path} returned HTTP {}", status.as_u16()),
                },
            });
        }

        resp.json().await.map_err(|e| CoreError::Api {
            provider: PROVIDER.into(),
            message: format!("Failed to parse response from {path}: {e}"),
        })
    }
}

impl Default for CoinGeckoProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// Coin ids go into the URL path; refuse anything that is not a plain slug.
fn validate_id(id: &str) -> Result<&str, CoreError> {
    let id = id.trim();
    let valid = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if valid {
        Ok(id)
    } else {
        Err(CoreError::ValidationError(format!("Invalid coin id '{id}'")))
    }
}

fn markets_query(currency: &str) -> Vec<(&'static str, String)> {
    vec![
        ("vs_currency", currency.to_lowercase()),
        ("order", "market_cap_desc".into()),
        ("sparkline", "false".into()),
        ("price_change_percentage", "24h".into()),
    ]
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl MarketDataProvider for CoinGeckoProvider {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn get_markets(
        &self,
        currency: &str,
        per_page: u32,
        page: u32,
    ) -> Result<Vec<CoinSummary>, CoreError> {
        let mut query = markets_query(currency);
        query.push(("per_page", per_page.to_string()));
        query.push(("page", page.max(1).to_string()));
        self.get_json("/coins/markets", &query, None).await
    }

    async fn get_markets_by_ids(
        &self,
        currency: &str,
        ids: &[String],
    ) -> Result<Vec<CoinSummary>, CoreError> {
        // A malformed stored id cannot match anything upstream; it just yields no row.
        let ids: Vec<&str> = ids
            .iter()
            .filter_map(|id| match validate_id(id) {
                Ok(id) => Some(id),
                Err(e) => {
                    warn!(error = %e, "skipping watchlist id");
                    None
                }
            })
            .collect();
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut query = markets_query(currency);
        query.push(("ids", ids.join(",")));
        query.push(("per_page", ids.len().min(MAX_LISTING_PER_PAGE as usize).to_string()));
        self.get_json("/coins/markets", &query, None).await
    }

    async fn get_coin_detail(&self, id: &str, currency: &str) -> Result<CoinDetail, CoreError> {
        let id = validate_id(id)?;
        let query = [
            ("localization", "false".to_string()),
            ("tickers", "false".into()),
            ("market_data", "true".into()),
            ("community_data", "false".into()),
            ("developer_data", "false".into()),
            ("sparkline", "false".into()),
        ];
        let resp: CoinDetailResponse = self
            .get_json(&format!("/coins/{id}"), &query, Some(id))
            .await?;
        resp.into_detail(currency)
    }

    async fn get_price_series(
        &self,
        id: &str,
        currency: &str,
        range: DayRange,
    ) -> Result<PriceSeries, CoreError> {
        let id = validate_id(id)?;
        let query = [
            ("vs_currency", currency.to_lowercase()),
            ("days", range.days().to_string()),
            ("interval", "daily".into()),
        ];
        let resp: MarketChartResponse = self
            .get_json(&format!("/coins/{id}/market_chart"), &query, Some(id))
            .await?;
        Ok(PriceSeries::from_raw_pairs(&resp.prices))
    }
}
