//! Example: Public market data through the positional-array codec.
//!
//! Run with: cargo run --example public_market_data

use kraken_spot_rest::spot::rest::SpotRestClient;
use kraken_spot_rest::spot::rest::public::{OhlcRequest, OrderBookRequest, RecentSpreadsRequest, RecentTradesRequest};
use kraken_spot_rest::types::OhlcInterval;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = SpotRestClient::new();

    println!("=== System Status ===");
    let status = client.get_system_status().await?.into_result()?;
    println!("Status: {} (online: {})", status.status, status.is_online());

    println!("\n=== OHLC (XBT/USD, 1 hour) ===");
    let ohlc = client
        .get_ohlc(&OhlcRequest::new("XBTUSD").interval(OhlcInterval::Hour1))
        .await?
        .into_result()?;
    println!("Pair: {}, candles: {}, next since: {}", ohlc.pair, ohlc.len(), ohlc.last);
    for candle in ohlc.rows.iter().rev().take(3) {
        println!(
            "  Time: {}, O: {}, H: {}, L: {}, C: {}, Vol: {}",
            candle.time, candle.open, candle.high, candle.low, candle.close, candle.volume
        );
    }

    println!("\n=== Order Book (XBT/USD, depth=5) ===");
    let book = client
        .get_order_book(&OrderBookRequest::new("XBTUSD").count(5))
        .await?
        .into_result()?;
    if let (Some(ask), Some(bid)) = (book.best_ask(), book.best_bid()) {
        println!("Best ask: {} @ {}", ask.volume, ask.price);
        println!("Best bid: {} @ {}", bid.volume, bid.price);
    }

    println!("\n=== Recent Trades (XBT/USD) ===");
    let trades = client
        .get_recent_trades(&RecentTradesRequest::new("XBTUSD").count(5))
        .await?
        .into_result()?;
    for trade in &trades.rows {
        let side = if trade.is_buy() { "buy" } else { "sell" };
        println!("  {side} {} @ {} ({})", trade.volume, trade.price, trade.time);
    }
    println!("Next since: {}", trades.last);

    println!("\n=== Recent Spreads (XBT/USD) ===");
    let spreads = client
        .get_recent_spreads(&RecentSpreadsRequest::new("XBTUSD"))
        .await?
        .into_result()?;
    for spread in spreads.rows.iter().take(5) {
        println!("  Bid: {} Ask: {} Time: {}", spread.bid, spread.ask, spread.time);
    }

    // The series re-encode to the same shape Kraken sent.
    println!("\nWire form of the last candle batch: {} bytes", ohlc.to_value().to_string().len());
    Ok(())
}
