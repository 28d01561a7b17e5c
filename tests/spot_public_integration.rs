mod common;

use rust_decimal::Decimal;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use kraken_spot_rest::error::KrakenError;
use kraken_spot_rest::spot::rest::public::{
    AssetInfoRequest, OhlcRequest, OrderBookRequest, RecentSpreadsRequest, RecentTradesRequest,
};
use kraken_spot_rest::types::{BuySell, OhlcInterval};

use common::public_client;

#[tokio::test]
async fn test_get_server_time() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "error": [],
        "result": {
            "unixtime": 1_700_000_000,
            "rfc1123": "Fri, 01 Dec 2023 00:00:00 GMT"
        }
    });

    Mock::given(method("GET"))
        .and(path("/0/public/Time"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let client = public_client(&server);
    let time = client.get_server_time().await.unwrap().into_result().unwrap();
    assert_eq!(time.unixtime, 1_700_000_000);
    assert_eq!(time.rfc1123, "Fri, 01 Dec 2023 00:00:00 GMT");
}

#[tokio::test]
async fn test_get_assets_with_params() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "error": [],
        "result": {
            "XXBT": {
                "aclass": "currency",
                "altname": "XBT",
                "decimals": 10,
                "display_decimals": 5,
                "collateral_value": 1.0,
                "status": "enabled"
            }
        }
    });

    Mock::given(method("GET"))
        .and(path("/0/public/Assets"))
        .and(query_param("asset", "XBT"))
        .and(query_param("aclass", "currency"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let client = public_client(&server);
    let request = AssetInfoRequest {
        aclass: Some("currency".to_string()),
        ..AssetInfoRequest::for_assets("XBT")
    };
    let assets = client.get_assets(Some(&request)).await.unwrap().into_result().unwrap();
    assert_eq!(assets.len(), 1);
    assert_eq!(assets["XXBT"].altname, "XBT");
    assert_eq!(
        assets["XXBT"].collateral_value.as_ref().unwrap().to_decimal().unwrap(),
        Decimal::ONE
    );
}

#[tokio::test]
async fn test_get_ohlc_with_interval_and_since() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "error": [],
        "result": {
            "XXBTZUSD": [
                [1_688_671_200, "30306.1", "30306.2", "30305.7", "30305.7", "30306.1", "3.39243896", 23],
                [1_688_671_260, "30305.7", "30306.0", "30305.7", "30306.0", "30305.9", "0.10000000", 2]
            ],
            "last": 1_688_672_160
        }
    });

    Mock::given(method("GET"))
        .and(path("/0/public/OHLC"))
        .and(query_param("pair", "XBTUSD"))
        .and(query_param("interval", "60"))
        .and(query_param("since", "1688671200"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let client = public_client(&server);
    let request = OhlcRequest::new("XBTUSD")
        .interval(OhlcInterval::Hour1)
        .since(1_688_671_200);
    let ohlc = client.get_ohlc(&request).await.unwrap().into_result().unwrap();

    assert_eq!(ohlc.pair, "XXBTZUSD");
    assert_eq!(ohlc.last, 1_688_672_160);
    assert_eq!(ohlc.rows.len(), 2);
    assert_eq!(ohlc.rows[0].count, 23);
    assert_eq!(ohlc.rows[0].volume.as_str(), "3.39243896");
    assert_eq!(ohlc.rows[1].time, 1_688_671_260);
}

#[tokio::test]
async fn test_get_ohlc_short_row_is_rejected() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "error": [],
        "result": {
            "XXBTZUSD": [[1_688_671_200, "30306.1", "30306.2", "30305.7", "30305.7", "30306.1", "3.39243896"]],
            "last": 1_688_672_160
        }
    });

    Mock::given(method("GET"))
        .and(path("/0/public/OHLC"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let err = public_client(&server)
        .get_ohlc(&OhlcRequest::new("XBTUSD"))
        .await
        .unwrap_err();
    assert!(matches!(err.root(), KrakenError::Decode(_)), "got {err:?}");
    assert_eq!(err.operation(), Some("/0/public/OHLC"));
}

#[tokio::test]
async fn test_get_order_book() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "error": [],
        "result": {
            "XXBTZUSD": {
                "asks": [["30384.10000", "2.059", 1_688_671_659], ["30387.90000", "1.500", 1_688_671_380]],
                "bids": [["30297.00000", "0.115", 1_688_671_701], ["30296.70000", "0.002", 1_688_671_674]]
            }
        }
    });

    Mock::given(method("GET"))
        .and(path("/0/public/Depth"))
        .and(query_param("pair", "XBTUSD"))
        .and(query_param("count", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let client = public_client(&server);
    let book = client
        .get_order_book(&OrderBookRequest::new("XBTUSD").count(2))
        .await
        .unwrap()
        .into_result()
        .unwrap();

    assert_eq!(book.pair, "XXBTZUSD");
    assert_eq!(book.best_ask().unwrap().price.as_str(), "30384.10000");
    assert_eq!(book.best_bid().unwrap().volume.as_str(), "0.115");
    assert_eq!(book.bids[1].timestamp, 1_688_671_674);
}

#[tokio::test]
async fn test_get_recent_trades_parsing() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "error": [],
        "result": {
            "XXBTZUSD": [
                ["30243.40000", "0.34507674", 1688669597.8277369, "b", "m", "", 61_049_135],
                ["30243.30000", "0.00376960", 1688669598.2804799, "s", "l", "", 61_049_136]
            ],
            "last": "1688671969993150842"
        }
    });

    Mock::given(method("GET"))
        .and(path("/0/public/Trades"))
        .and(query_param("pair", "XBTUSD"))
        .and(query_param("count", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let client = public_client(&server);
    let request = RecentTradesRequest::new("XBTUSD").count(2);
    let trades = client.get_recent_trades(&request).await.unwrap().into_result().unwrap();

    assert_eq!(trades.last, "1688671969993150842");
    assert_eq!(trades.rows.len(), 2);
    let first = &trades.rows[0];
    assert_eq!(first.side(), Some(BuySell::Buy));
    assert_eq!(first.trade_id, 61_049_135);
    assert_eq!(first.time.unix_timestamp(), 1_688_669_597);
    assert!(!trades.rows[1].is_buy());
}

#[tokio::test]
async fn test_get_recent_spreads() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "error": [],
        "result": {
            "XXBTZUSD": [
                [1_688_671_834, "30292.10000", "30297.50000"],
                [1_688_671_834, "30292.10000", "30296.70000"]
            ],
            "last": 1_688_672_106
        }
    });

    Mock::given(method("GET"))
        .and(path("/0/public/Spread"))
        .and(query_param("since", "1688671834"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let client = public_client(&server);
    let request = RecentSpreadsRequest::new("XBTUSD").since(1_688_671_834);
    let spreads = client.get_recent_spreads(&request).await.unwrap().into_result().unwrap();

    assert_eq!(spreads.last, 1_688_672_106);
    assert_eq!(spreads.rows[1].ask.as_str(), "30296.70000");
}

#[tokio::test]
async fn test_get_ticker() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "error": [],
        "result": {
            "XXBTZUSD": {
                "a": ["30300.10000", "1", "1.000"],
                "b": ["30300.00000", "1", "1.000"],
                "c": ["30303.20000", "0.00067643"],
                "v": ["4083.67001100", "4412.73601799"],
                "p": ["30706.77771", "30689.13205"],
                "t": [34619, 38907],
                "l": ["29868.30000", "29868.30000"],
                "h": ["31631.00000", "31631.00000"],
                "o": "30502.80000"
            }
        }
    });

    Mock::given(method("GET"))
        .and(path("/0/public/Ticker"))
        .and(query_param("pair", "XBTUSD"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let tickers = public_client(&server)
        .get_ticker("XBTUSD")
        .await
        .unwrap()
        .into_result()
        .unwrap();
    let ticker = &tickers["XXBTZUSD"];
    assert_eq!(ticker.ask_price().unwrap().as_str(), "30300.10000");
    assert_eq!(ticker.last_price().unwrap().as_str(), "30303.20000");
}

#[tokio::test]
async fn test_rate_limit_error_mapping() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "error": ["EAPI:Rate limit exceeded"],
        "result": null
    });

    Mock::given(method("GET"))
        .and(path("/0/public/Time"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let client = public_client(&server);
    let response = client.get_server_time().await.unwrap();
    assert!(!response.envelope.is_success());

    match response.into_result().unwrap_err() {
        KrakenError::RateLimitExceeded(api) => assert!(api.is_rate_limit()),
        other => panic!("unexpected error: {other:?}"),
    }
}
