use crypto_dash_core::models::chart::{DayRange, PriceSeries};
use crypto_dash_core::models::coin::CoinSummary;
use crypto_dash_core::models::query::{FilterKey, MarketQuery, SortKey};
use crypto_dash_core::models::settings::{Settings, DEFAULT_API_BASE_URL};
use std::collections::HashMap;

// ═══════════════════════════════════════════════════════════════════
//  CoinSummary
// ═══════════════════════════════════════════════════════════════════

mod coin_summary {
    use super::*;

    const MARKETS_JSON: &str = r#"[
        {
            "id": "bitcoin", "symbol": "btc", "name": "Bitcoin",
            "image": "https://assets.example/bitcoin.png",
            "current_price": 65000.5, "market_cap": 1280000000000,
            "market_cap_rank": 1, "fully_diluted_valuation": 1365000000000,
            "total_volume": 31000000000, "high_24h": 66000, "low_24h": 64000,
            "price_change_24h": 1500.2, "price_change_percentage_24h": 2.36,
            "circulating_supply": 19700000, "max_supply": 21000000,
            "last_updated": "2024-05-01T12:00:00.000Z"
        },
        {
            "id": "fresh-token", "symbol": "FRSH", "name": "Fresh Token",
            "image": "https://assets.example/fresh.png",
            "current_price": 0.0042, "market_cap": null,
            "market_cap_rank": null, "total_volume": 1200,
            "price_change_percentage_24h": null
        }
    ]"#;

    #[test]
    fn parses_markets_payload_ignoring_extra_fields() {
        let coins: Vec<CoinSummary> = serde_json::from_str(MARKETS_JSON).unwrap();
        assert_eq!(coins.len(), 2);
        let btc = &coins[0];
        assert_eq!(btc.id, "bitcoin");
        assert_eq!(btc.market_cap_rank, Some(1));
        assert_eq!(btc.market_cap, 1_280_000_000_000.0);
        assert_eq!(btc.price_change_percentage_24h, 2.36);
    }

    #[test]
    fn nulls_become_defaults() {
        let coins: Vec<CoinSummary> = serde_json::from_str(MARKETS_JSON).unwrap();
        let fresh = &coins[1];
        assert_eq!(fresh.market_cap_rank, None);
        assert_eq!(fresh.market_cap, 0.0);
        assert_eq!(fresh.price_change_percentage_24h, 0.0);
        assert!(!fresh.is_gainer());
        assert!(!fresh.is_loser());
    }

    #[test]
    fn matches_expects_lowercase_needle() {
        let coins: Vec<CoinSummary> = serde_json::from_str(MARKETS_JSON).unwrap();
        assert!(coins[1].matches("frsh"));
        assert!(coins[1].matches("fresh"));
        assert!(coins[1].matches(""));
        assert!(!coins[0].matches("eth"));
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Sort / filter keys
// ═══════════════════════════════════════════════════════════════════

mod keys {
    use super::*;

    #[test]
    fn sort_keys_round_trip_through_strings() {
        for key in SortKey::ALL {
            assert_eq!(SortKey::from_key(key.key()), key);
        }
        assert_eq!(SortKey::ALL.len(), 5);
    }

    #[test]
    fn unknown_sort_key_defaults_to_rank() {
        assert_eq!(SortKey::from_key("volume_desc"), SortKey::MarketCapRank);
        assert_eq!(SortKey::default(), SortKey::MarketCapRank);
    }

    #[test]
    fn sort_labels() {
        assert_eq!(SortKey::PriceDesc.to_string(), "Price (High to Low)");
        assert_eq!(SortKey::ChangeAsc.label(), "24h Change (Low to High)");
    }

    #[test]
    fn filter_keys() {
        assert_eq!(FilterKey::from_key("gainers"), FilterKey::Gainers);
        assert_eq!(FilterKey::from_key("losers"), FilterKey::Losers);
        assert_eq!(FilterKey::from_key("anything"), FilterKey::All);
        assert_eq!(FilterKey::Losers.to_string(), "Losers");
        assert_eq!(FilterKey::ALL.len(), 3);
    }

    #[test]
    fn default_query_is_first_page_by_rank() {
        let q = MarketQuery::default();
        assert_eq!(q.page, 1);
        assert!(q.search.is_empty());
        assert_eq!(q.sort, SortKey::MarketCapRank);
        assert_eq!(q.filter, FilterKey::All);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  DayRange / PriceSeries
// ═══════════════════════════════════════════════════════════════════

mod chart {
    use super::*;

    #[test]
    fn day_range_values() {
        let days: Vec<u32> = DayRange::ALL.iter().map(|r| r.days()).collect();
        assert_eq!(days, vec![1, 7, 30, 90]);
        assert_eq!(DayRange::default(), DayRange::SevenDays);
        assert_eq!(DayRange::ThirtyDays.to_string(), "30D");
    }

    #[test]
    fn day_range_parsing() {
        assert_eq!("7".parse::<DayRange>().unwrap(), DayRange::SevenDays);
        assert_eq!("90d".parse::<DayRange>().unwrap(), DayRange::NinetyDays);
        assert_eq!("1D".parse::<DayRange>().unwrap(), DayRange::OneDay);
        assert!("14".parse::<DayRange>().is_err());
        assert!("week".parse::<DayRange>().is_err());
    }

    #[test]
    fn series_from_raw_pairs_sorts_and_drops_malformed() {
        let pairs = vec![
            vec![Some(1_714_608_000_000.0), Some(64_000.0)],
            vec![Some(1_714_521_600_000.0), Some(63_000.0)],
            vec![Some(1_714_694_400_000.0), None],
            vec![Some(1_714_780_800_000.0)],
            vec![],
        ];
        let series = PriceSeries::from_raw_pairs(&pairs);
        assert_eq!(series.len(), 2);
        assert_eq!(series.points[0].price, 63_000.0);
        assert_eq!(series.points[1].price, 64_000.0);
        assert!(series.points[0].timestamp < series.points[1].timestamp);
    }

    #[test]
    fn series_statistics() {
        let pairs = vec![
            vec![Some(1_000.0), Some(100.0)],
            vec![Some(2_000.0), Some(80.0)],
            vec![Some(3_000.0), Some(125.0)],
        ];
        let series = PriceSeries::from_raw_pairs(&pairs);
        assert_eq!(series.min_max(), Some((80.0, 125.0)));
        assert_eq!(series.change_percent(), Some(25.0));
    }

    #[test]
    fn empty_series() {
        let series = PriceSeries::default();
        assert!(series.is_empty());
        assert_eq!(series.min_max(), None);
        assert_eq!(series.change_percent(), None);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Settings
// ═══════════════════════════════════════════════════════════════════

mod settings {
    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn defaults() {
        let s = Settings::default();
        assert_eq!(s.vs_currency, "usd");
        assert_eq!(s.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(s.listing_per_page, 250);
        assert_eq!(s.page_size, 50);
        assert_eq!(s.request_timeout_secs, 30);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn overrides_from_lookup() {
        let s = Settings::from_lookup(lookup(&[
            ("CRYPTO_DASH_CURRENCY", " EUR "),
            ("CRYPTO_DASH_API_URL", "http://localhost:8080/api/v3/"),
            ("CRYPTO_DASH_PER_PAGE", "100"),
            ("CRYPTO_DASH_PAGE_SIZE", "25"),
            ("CRYPTO_DASH_DATA_DIR", "/tmp/dash"),
        ]))
        .unwrap();
        assert_eq!(s.vs_currency, "eur");
        assert_eq!(s.api_base_url, "http://localhost:8080/api/v3");
        assert_eq!(s.listing_per_page, 100);
        assert_eq!(s.page_size, 25);
        assert_eq!(s.data_dir, std::path::PathBuf::from("/tmp/dash"));
    }

    #[test]
    fn rejects_unparseable_numbers() {
        assert!(Settings::from_lookup(lookup(&[("CRYPTO_DASH_PAGE_SIZE", "lots")])).is_err());
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert!(Settings::from_lookup(lookup(&[("CRYPTO_DASH_PAGE_SIZE", "0")])).is_err());
        assert!(Settings::from_lookup(lookup(&[("CRYPTO_DASH_PER_PAGE", "500")])).is_err());
        assert!(Settings::from_lookup(lookup(&[("CRYPTO_DASH_CURRENCY", "  ")])).is_err());
    }

    #[test]
    fn serde_round_trip() {
        let s = Settings::default();
        let json = serde_json::to_string(&s).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(s, back);
    }
}
