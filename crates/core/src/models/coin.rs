use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

use crate::errors::CoreError;

/// Deserialize a JSON `null` (or a missing field, with `#[serde(default)]`)
/// as the type's default value. CoinGecko sends `null` for numbers it
/// does not have, e.g. the 24h change of a freshly listed coin.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One row of the market listing.
///
/// Sourced wholesale from the upstream `/coins/markets` response and
/// never mutated locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinSummary {
    /// Stable upstream identifier (e.g., "bitcoin")
    pub id: String,

    /// Ticker symbol as sent upstream, usually lowercase (e.g., "btc")
    pub symbol: String,

    /// Display name (e.g., "Bitcoin")
    pub name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub image: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub current_price: f64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub market_cap: f64,

    /// Upstream ordinal by market cap. `None` for unranked coins.
    #[serde(default)]
    pub market_cap_rank: Option<u32>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub price_change_percentage_24h: f64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub total_volume: f64,
}

impl CoinSummary {
    /// Rank used for ordering: unranked coins go after every ranked one.
    pub fn sort_rank(&self) -> u32 {
        self.market_cap_rank.unwrap_or(u32::MAX)
    }

    /// Case-insensitive substring match against name or symbol.
    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.name.to_lowercase().contains(needle)
            || self.symbol.to_lowercase().contains(needle)
    }

    pub fn is_gainer(&self) -> bool {
        self.price_change_percentage_24h > 0.0
    }

    pub fn is_loser(&self) -> bool {
        self.price_change_percentage_24h < 0.0
    }
}

/// Full detail for a single coin, flattened for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinDetail {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub image: String,
    pub market_cap_rank: Option<u32>,
    pub current_price: f64,
    pub market_cap: f64,
    pub total_volume: f64,
    pub price_change_percentage_24h: f64,
    pub circulating_supply: f64,
    /// Not every coin publishes a total supply.
    pub total_supply: Option<f64>,
    /// `None` means uncapped.
    pub max_supply: Option<f64>,
    /// English description; may contain HTML and may be empty.
    pub description: String,
}

// ── CoinGecko `/coins/{id}` wire types ──────────────────────────────

#[derive(Debug, Deserialize)]
pub(crate) struct CoinDetailResponse {
    id: String,
    symbol: String,
    name: String,
    #[serde(default)]
    image: Option<ImageLinks>,
    #[serde(default)]
    market_cap_rank: Option<u32>,
    #[serde(default)]
    market_data: Option<MarketData>,
    #[serde(default)]
    description: Option<Description>,
}

#[derive(Debug, Deserialize)]
struct ImageLinks {
    #[serde(default)]
    large: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Description {
    #[serde(default)]
    en: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MarketData {
    #[serde(default)]
    current_price: HashMap<String, Option<f64>>,
    #[serde(default)]
    market_cap: HashMap<String, Option<f64>>,
    #[serde(default)]
    total_volume: HashMap<String, Option<f64>>,
    #[serde(default, deserialize_with = "null_as_default")]
    price_change_percentage_24h: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    circulating_supply: f64,
    #[serde(default)]
    total_supply: Option<f64>,
    #[serde(default)]
    max_supply: Option<f64>,
}

fn pick(map: &HashMap<String, Option<f64>>, currency: &str) -> f64 {
    map.get(&currency.to_lowercase())
        .copied()
        .flatten()
        .unwrap_or_default()
}

impl CoinDetailResponse {
    /// Flatten the nested payload, picking values for `currency`.
    pub(crate) fn into_detail(self, currency: &str) -> Result<CoinDetail, CoreError> {
        let market = self.market_data.ok_or_else(|| {
            CoreError::ValidationError(format!("No market data for coin {}", self.id))
        })?;

        Ok(CoinDetail {
            current_price: pick(&market.current_price, currency),
            market_cap: pick(&market.market_cap, currency),
            total_volume: pick(&market.total_volume, currency),
            price_change_percentage_24h: market.price_change_percentage_24h,
            circulating_supply: market.circulating_supply,
            total_supply: market.total_supply,
            max_supply: market.max_supply,
            image: self.image.and_then(|i| i.large).unwrap_or_default(),
            description: self.description.and_then(|d| d.en).unwrap_or_default(),
            market_cap_rank: self.market_cap_rank,
            id: self.id,
            symbol: self.symbol,
            name: self.name,
        })
    }
}
