use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// A single point of a price series (timestamp → price).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
}

/// Historical window used when requesting a price series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayRange {
    OneDay,
    #[default]
    SevenDays,
    ThirtyDays,
    NinetyDays,
}

impl DayRange {
    /// Selector order.
    pub const ALL: [DayRange; 4] = [
        DayRange::OneDay,
        DayRange::SevenDays,
        DayRange::ThirtyDays,
        DayRange::NinetyDays,
    ];

    pub fn days(self) -> u32 {
        match self {
            DayRange::OneDay => 1,
            DayRange::SevenDays => 7,
            DayRange::ThirtyDays => 30,
            DayRange::NinetyDays => 90,
        }
    }

    pub fn from_days(days: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.days() == days)
    }
}

impl std::fmt::Display for DayRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}D", self.days())
    }
}

impl std::str::FromStr for DayRange {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_end_matches(['d', 'D']);
        trimmed
            .parse::<u32>()
            .ok()
            .and_then(Self::from_days)
            .ok_or_else(|| {
                CoreError::ValidationError(format!(
                    "Unsupported day range '{s}' (expected 1, 7, 30 or 90)"
                ))
            })
    }
}

/// Ordered price series for one coin and one day-range.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    pub points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Build from raw `[timestamp_ms, price]` pairs.
    /// Pairs that are short, null, or carry an out-of-range timestamp are dropped.
    pub fn from_raw_pairs(pairs: &[Vec<Option<f64>>]) -> Self {
        let mut points: Vec<PricePoint> = pairs
            .iter()
            .filter_map(|pair| {
                let ms = (*pair.first()?)?;
                let price = (*pair.get(1)?)?;
                let timestamp = DateTime::from_timestamp_millis(ms as i64)?;
                Some(PricePoint { timestamp, price })
            })
            .collect();
        points.sort_by_key(|p| p.timestamp);
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&PricePoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    /// Lowest and highest price in the series.
    pub fn min_max(&self) -> Option<(f64, f64)> {
        let first = self.points.first()?.price;
        Some(self.points.iter().fold((first, first), |(lo, hi), p| {
            (lo.min(p.price), hi.max(p.price))
        }))
    }

    /// Percentage change from the first to the last point.
    pub fn change_percent(&self) -> Option<f64> {
        let first = self.first()?.price;
        let last = self.last()?.price;
        if first == 0.0 {
            return None;
        }
        Some((last - first) / first * 100.0)
    }
}

/// CoinGecko `/coins/{id}/market_chart` payload. Only `prices` is used.
#[derive(Debug, Deserialize)]
pub(crate) struct MarketChartResponse {
    #[serde(default)]
    pub prices: Vec<Vec<Option<f64>>>,
}
