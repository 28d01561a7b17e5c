//! Order, ledger and interval enums shared by requests and responses.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Implements `Display` through each enum's `as_str`.
macro_rules! display_as_str {
    ($($ty:ty),* $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuySell {
    Buy,
    Sell,
}

impl BuySell {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuySell::Buy => "buy",
            BuySell::Sell => "sell",
        }
    }

    /// Decode the single-letter side of market data rows (`b` / `s`).
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "b" | "buy" => Some(BuySell::Buy),
            "s" | "sell" => Some(BuySell::Sell),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderType {
    Market,
    Limit,
    /// Market order once the stop price is reached.
    StopLoss,
    TakeProfit,
    /// Limit order (at `price2`) once the stop price is reached.
    StopLossLimit,
    TakeProfitLimit,
    TrailingStop,
    TrailingStopLimit,
    SettlePosition,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Market => "market",
            OrderType::Limit => "limit",
            OrderType::StopLoss => "stop-loss",
            OrderType::TakeProfit => "take-profit",
            OrderType::StopLossLimit => "stop-loss-limit",
            OrderType::TakeProfitLimit => "take-profit-limit",
            OrderType::TrailingStop => "trailing-stop",
            OrderType::TrailingStopLimit => "trailing-stop-limit",
            OrderType::SettlePosition => "settle-position",
        }
    }

    /// Whether the order waits for a trigger price.
    pub fn is_triggered(&self) -> bool {
        !matches!(self, OrderType::Market | OrderType::Limit | OrderType::SettlePosition)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Open,
    Closed,
    Canceled,
    Expired,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Open => "open",
            OrderStatus::Closed => "closed",
            OrderStatus::Canceled => "canceled",
            OrderStatus::Expired => "expired",
        }
    }

    pub fn is_final(&self) -> bool {
        matches!(self, OrderStatus::Closed | OrderStatus::Canceled | OrderStatus::Expired)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeInForce {
    #[default]
    #[serde(rename = "GTC")]
    GoodTillCancelled,
    #[serde(rename = "IOC")]
    ImmediateOrCancel,
    #[serde(rename = "GTD")]
    GoodTillDate,
}

impl TimeInForce {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeInForce::GoodTillCancelled => "GTC",
            TimeInForce::ImmediateOrCancel => "IOC",
            TimeInForce::GoodTillDate => "GTD",
        }
    }
}

/// Price a triggered order watches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerType {
    #[default]
    Last,
    Index,
}

impl TriggerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerType::Last => "last",
            TriggerType::Index => "index",
        }
    }
}

/// Self trade prevention mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelfTradePrevent {
    #[default]
    CancelNewest,
    CancelOldest,
    CancelBoth,
}

impl SelfTradePrevent {
    pub fn as_str(&self) -> &'static str {
        match self {
            SelfTradePrevent::CancelNewest => "cancel-newest",
            SelfTradePrevent::CancelOldest => "cancel-oldest",
            SelfTradePrevent::CancelBoth => "cancel-both",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LedgerType {
    Trade,
    Deposit,
    Withdrawal,
    Transfer,
    Margin,
    Adjustment,
    Rollover,
    Credit,
    Settled,
    Staking,
    Dividend,
    Sale,
    Spend,
    Receive,
    Earn,
    Nft,
}

impl LedgerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LedgerType::Trade => "trade",
            LedgerType::Deposit => "deposit",
            LedgerType::Withdrawal => "withdrawal",
            LedgerType::Transfer => "transfer",
            LedgerType::Margin => "margin",
            LedgerType::Adjustment => "adjustment",
            LedgerType::Rollover => "rollover",
            LedgerType::Credit => "credit",
            LedgerType::Settled => "settled",
            LedgerType::Staking => "staking",
            LedgerType::Dividend => "dividend",
            LedgerType::Sale => "sale",
            LedgerType::Spend => "spend",
            LedgerType::Receive => "receive",
            LedgerType::Earn => "earn",
            LedgerType::Nft => "nft",
        }
    }
}

display_as_str!(BuySell, OrderType, OrderStatus, TimeInForce, TriggerType, SelfTradePrevent, LedgerType);

/// Candle width, sent to Kraken as a number of minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u32", try_from = "u32")]
pub enum OhlcInterval {
    Min1,
    Min5,
    Min15,
    Min30,
    Hour1,
    Hour4,
    Day1,
    Week1,
    Day15,
}

impl OhlcInterval {
    pub fn minutes(&self) -> u32 {
        u32::from(*self)
    }
}

impl From<OhlcInterval> for u32 {
    fn from(interval: OhlcInterval) -> u32 {
        match interval {
            OhlcInterval::Min1 => 1,
            OhlcInterval::Min5 => 5,
            OhlcInterval::Min15 => 15,
            OhlcInterval::Min30 => 30,
            OhlcInterval::Hour1 => 60,
            OhlcInterval::Hour4 => 240,
            OhlcInterval::Day1 => 1440,
            OhlcInterval::Week1 => 10080,
            OhlcInterval::Day15 => 21600,
        }
    }
}

impl TryFrom<u32> for OhlcInterval {
    type Error = String;

    fn try_from(minutes: u32) -> Result<Self, Self::Error> {
        Ok(match minutes {
            1 => OhlcInterval::Min1,
            5 => OhlcInterval::Min5,
            15 => OhlcInterval::Min15,
            30 => OhlcInterval::Min30,
            60 => OhlcInterval::Hour1,
            240 => OhlcInterval::Hour4,
            1440 => OhlcInterval::Day1,
            10080 => OhlcInterval::Week1,
            21600 => OhlcInterval::Day15,
            other => return Err(format!("unsupported OHLC interval of {other} minutes")),
        })
    }
}
