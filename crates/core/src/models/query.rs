use serde::{Deserialize, Serialize};

/// Sort order for the market list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortKey {
    /// Upstream market-cap rank, ascending
    #[default]
    MarketCapRank,
    /// Highest price first
    PriceDesc,
    /// Lowest price first
    PriceAsc,
    /// Biggest 24h gain first
    ChangeDesc,
    /// Biggest 24h loss first
    ChangeAsc,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::MarketCapRank,
        SortKey::PriceDesc,
        SortKey::PriceAsc,
        SortKey::ChangeDesc,
        SortKey::ChangeAsc,
    ];

    /// Stable key used in URLs and on the command line.
    pub fn key(self) -> &'static str {
        match self {
            SortKey::MarketCapRank => "market_cap_rank",
            SortKey::PriceDesc => "price_desc",
            SortKey::PriceAsc => "price_asc",
            SortKey::ChangeDesc => "change_desc",
            SortKey::ChangeAsc => "change_asc",
        }
    }

    /// Unknown keys fall back to rank order.
    pub fn from_key(key: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|k| k.key() == key.trim())
            .unwrap_or_default()
    }

    pub fn label(self) -> &'static str {
        match self {
            SortKey::MarketCapRank => "Market Cap Rank",
            SortKey::PriceDesc => "Price (High to Low)",
            SortKey::PriceAsc => "Price (Low to High)",
            SortKey::ChangeDesc => "24h Change (High to Low)",
            SortKey::ChangeAsc => "24h Change (Low to High)",
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Restricts the market list by the sign of the 24h change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterKey {
    #[default]
    All,
    /// Strictly positive 24h change
    Gainers,
    /// Strictly negative 24h change
    Losers,
}

impl FilterKey {
    pub const ALL: [FilterKey; 3] = [FilterKey::All, FilterKey::Gainers, FilterKey::Losers];

    pub fn key(self) -> &'static str {
        match self {
            FilterKey::All => "all",
            FilterKey::Gainers => "gainers",
            FilterKey::Losers => "losers",
        }
    }

    /// Unknown keys fall back to `All`.
    pub fn from_key(key: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|k| k.key() == key.trim())
            .unwrap_or_default()
    }
}

impl std::fmt::Display for FilterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterKey::All => write!(f, "All"),
            FilterKey::Gainers => write!(f, "Gainers"),
            FilterKey::Losers => write!(f, "Losers"),
        }
    }
}

/// Everything the market list view model needs besides the source list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketQuery {
    pub search: String,
    pub sort: SortKey,
    pub filter: FilterKey,
    /// 1-based; clamped to the available pages when applied.
    pub page: usize,
}

impl Default for MarketQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            sort: SortKey::default(),
            filter: FilterKey::default(),
            page: 1,
        }
    }
}
