// ═══════════════════════════════════════════════════════════════════
// Provider Tests — CoinGecko against a local mock HTTP server
// ═══════════════════════════════════════════════════════════════════

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crypto_dash_core::errors::CoreError;
use crypto_dash_core::models::chart::DayRange;
use crypto_dash_core::providers::coingecko::CoinGeckoProvider;
use crypto_dash_core::providers::traits::MarketDataProvider;

fn provider(server: &MockServer) -> CoinGeckoProvider {
    CoinGeckoProvider::with_base_url(&server.uri(), 5)
}

fn market_row(id: &str, symbol: &str, rank: u32, price: f64) -> serde_json::Value {
    json!({
        "id": id,
        "symbol": symbol,
        "name": id,
        "image": format!("https://img.example/{id}.png"),
        "current_price": price,
        "market_cap": price * 1000.0,
        "market_cap_rank": rank,
        "price_change_percentage_24h": 1.5,
        "total_volume": 42.0
    })
}

mod markets {
    use super::*;

    #[tokio::test]
    async fn sends_listing_query_and_parses_rows() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/coins/markets"))
            .and(query_param("vs_currency", "usd"))
            .and(query_param("order", "market_cap_desc"))
            .and(query_param("per_page", "250"))
            .and(query_param("page", "1"))
            .and(query_param("sparkline", "false"))
            .and(query_param("price_change_percentage", "24h"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                market_row("bitcoin", "btc", 1, 65000.0),
                market_row("ethereum", "eth", 2, 3200.0),
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let coins = provider(&server).get_markets("USD", 250, 1).await.unwrap();
        assert_eq!(coins.len(), 2);
        assert_eq!(coins[0].id, "bitcoin");
        assert_eq!(coins[1].market_cap_rank, Some(2));
    }

    #[tokio::test]
    async fn by_ids_joins_with_commas() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/coins/markets"))
            .and(query_param("ids", "solana,bitcoin"))
            .and(query_param("per_page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                market_row("bitcoin", "btc", 1, 65000.0),
                market_row("solana", "sol", 5, 150.0),
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let ids = vec!["solana".to_string(), "bitcoin".to_string()];
        let coins = provider(&server).get_markets_by_ids("usd", &ids).await.unwrap();
        assert_eq!(coins.len(), 2);
    }

    #[tokio::test]
    async fn by_ids_skips_malformed_ids() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/coins/markets"))
            .and(query_param("ids", "bitcoin"))
            .and(query_param("per_page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                market_row("bitcoin", "btc", 1, 65000.0),
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let ids = vec!["bitcoin".to_string(), "Bit Coin".to_string()];
        let coins = provider(&server).get_markets_by_ids("usd", &ids).await.unwrap();
        assert_eq!(coins.len(), 1);
    }

    #[tokio::test]
    async fn by_ids_only_malformed_skips_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(0)
            .mount(&server)
            .await;

        let ids = vec!["bad id".to_string(), "../x".to_string()];
        let coins = provider(&server).get_markets_by_ids("usd", &ids).await.unwrap();
        assert!(coins.is_empty());
    }

    #[tokio::test]
    async fn by_ids_empty_skips_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(0)
            .mount(&server)
            .await;

        let coins = provider(&server).get_markets_by_ids("usd", &[]).await.unwrap();
        assert!(coins.is_empty());
    }

    #[tokio::test]
    async fn server_error_is_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/coins/markets"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = provider(&server).get_markets("usd", 250, 1).await.unwrap_err();
        match err {
            CoreError::Api { provider, message } => {
                assert_eq!(provider, "CoinGecko");
                assert!(message.contains("503"), "message = {message}");
            }
            other => panic!("Expected Api, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn too_many_requests_is_rate_limited() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let err = provider(&server).get_markets("usd", 250, 1).await.unwrap_err();
        assert!(matches!(err, CoreError::RateLimited { .. }));
    }

    #[tokio::test]
    async fn malformed_body_is_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
            .mount(&server)
            .await;

        let err = provider(&server).get_markets("usd", 250, 1).await.unwrap_err();
        assert!(matches!(err, CoreError::Api { .. }));
    }
}

mod detail {
    use super::*;

    #[tokio::test]
    async fn parses_nested_detail() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/coins/bitcoin"))
            .and(query_param("localization", "false"))
            .and(query_param("tickers", "false"))
            .and(query_param("market_data", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "bitcoin",
                "symbol": "btc",
                "name": "Bitcoin",
                "image": {"thumb": "t.png", "large": "https://img.example/btc-large.png"},
                "market_cap_rank": 1,
                "market_data": {
                    "current_price": {"usd": 65000.0},
                    "market_cap": {"usd": 1.28e12},
                    "total_volume": {"usd": 3.1e10},
                    "price_change_percentage_24h": 2.36,
                    "circulating_supply": 19700000.0,
                    "total_supply": 21000000.0,
                    "max_supply": 21000000.0
                },
                "description": {"en": "Bitcoin is a decentralized currency."}
            })))
            .mount(&server)
            .await;

        let detail = provider(&server).get_coin_detail("bitcoin", "usd").await.unwrap();
        assert_eq!(detail.name, "Bitcoin");
        assert_eq!(detail.current_price, 65000.0);
        assert_eq!(detail.max_supply, Some(21_000_000.0));
        assert_eq!(detail.image, "https://img.example/btc-large.png");
        assert!(detail.description.starts_with("Bitcoin is"));
    }

    #[tokio::test]
    async fn not_found_maps_to_coin_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/coins/not-a-coin"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "coin not found"})))
            .mount(&server)
            .await;

        let err = provider(&server).get_coin_detail("not-a-coin", "usd").await.unwrap_err();
        assert!(matches!(err, CoreError::CoinNotFound(id) if id == "not-a-coin"));
    }

    #[tokio::test]
    async fn invalid_id_never_reaches_the_network() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = provider(&server).get_coin_detail("../admin", "usd").await.unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(_)));
    }
}

mod chart {
    use super::*;

    #[tokio::test]
    async fn requests_daily_series_for_range() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/coins/ethereum/market_chart"))
            .and(query_param("vs_currency", "usd"))
            .and(query_param("days", "30"))
            .and(query_param("interval", "daily"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "prices": [[1714521600000u64, 3000.0], [1714608000000u64, 3100.0]],
                "market_caps": [],
                "total_volumes": []
            })))
            .expect(1)
            .mount(&server)
            .await;

        let series = provider(&server)
            .get_price_series("ethereum", "usd", DayRange::ThirtyDays)
            .await
            .unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.last().map(|p| p.price), Some(3100.0));
    }

    #[tokio::test]
    async fn chart_failure_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let result = provider(&server)
            .get_price_series("ethereum", "usd", DayRange::OneDay)
            .await;
        assert!(result.is_err());
    }
}
