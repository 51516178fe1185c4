use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::chart::{DayRange, PriceSeries};
use crate::models::coin::{CoinDetail, CoinSummary};

/// Abstraction over the upstream market-data API.
///
/// The views only talk to this trait, so a different data source (or a
/// mock in tests) can be swapped in without touching them.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait MarketDataProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// One page of the listing, ordered by market cap descending.
    async fn get_markets(
        &self,
        currency: &str,
        per_page: u32,
        page: u32,
    ) -> Result<Vec<CoinSummary>, CoreError>;

    /// Listing rows for specific coins. Unknown or malformed ids produce no row;
    /// an empty `ids` slice returns an empty list without a request.
    async fn get_markets_by_ids(
        &self,
        currency: &str,
        ids: &[String],
    ) -> Result<Vec<CoinSummary>, CoreError>;

    /// Full detail for one coin, with prices in `currency`.
    async fn get_coin_detail(&self, id: &str, currency: &str) -> Result<CoinDetail, CoreError>;

    /// Daily price series for one coin over `range`.
    async fn get_price_series(
        &self,
        id: &str,
        currency: &str,
        range: DayRange,
    ) -> Result<PriceSeries, CoreError>;
}
