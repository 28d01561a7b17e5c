//! Kraken Spot REST paths.

pub const KRAKEN_BASE_URL: &str = "https://api.kraken.com";

/// Unsigned `GET` endpoints.
pub mod public {
    pub const TIME: &str = "/0/public/Time";
    pub const SYSTEM_STATUS: &str = "/0/public/SystemStatus";
    pub const ASSETS: &str = "/0/public/Assets";
    pub const ASSET_PAIRS: &str = "/0/public/AssetPairs";
    pub const TICKER: &str = "/0/public/Ticker";
    pub const OHLC: &str = "/0/public/OHLC";
    /// Order book.
    pub const DEPTH: &str = "/0/public/Depth";
    pub const TRADES: &str = "/0/public/Trades";
    pub const SPREAD: &str = "/0/public/Spread";
}

/// Signed `POST` endpoints.
pub mod private {
    // Account
    pub const BALANCE: &str = "/0/private/Balance";
    pub const BALANCE_EX: &str = "/0/private/BalanceEx";
    pub const TRADE_BALANCE: &str = "/0/private/TradeBalance";
    pub const OPEN_ORDERS: &str = "/0/private/OpenOrders";
    pub const CLOSED_ORDERS: &str = "/0/private/ClosedOrders";
    pub const QUERY_ORDERS: &str = "/0/private/QueryOrders";
    pub const TRADES_HISTORY: &str = "/0/private/TradesHistory";
    pub const QUERY_TRADES: &str = "/0/private/QueryTrades";
    pub const OPEN_POSITIONS: &str = "/0/private/OpenPositions";
    pub const LEDGERS: &str = "/0/private/Ledgers";
    pub const QUERY_LEDGERS: &str = "/0/private/QueryLedgers";
    pub const TRADE_VOLUME: &str = "/0/private/TradeVolume";

    // Exports
    pub const ADD_EXPORT: &str = "/0/private/AddExport";
    pub const EXPORT_STATUS: &str = "/0/private/ExportStatus";
    /// Answers with a zip archive rather than JSON.
    pub const RETRIEVE_EXPORT: &str = "/0/private/RetrieveExport";
    pub const REMOVE_EXPORT: &str = "/0/private/RemoveExport";

    // Trading
    pub const ADD_ORDER: &str = "/0/private/AddOrder";
    pub const CANCEL_ORDER: &str = "/0/private/CancelOrder";
    pub const CANCEL_ALL: &str = "/0/private/CancelAll";
    pub const CANCEL_ALL_ORDERS_AFTER: &str = "/0/private/CancelAllOrdersAfter";

    // Funding
    pub const DEPOSIT_METHODS: &str = "/0/private/DepositMethods";
    pub const DEPOSIT_ADDRESSES: &str = "/0/private/DepositAddresses";
    pub const DEPOSIT_STATUS: &str = "/0/private/DepositStatus";
    pub const WITHDRAW_METHODS: &str = "/0/private/WithdrawMethods";
    pub const WITHDRAW_ADDRESSES: &str = "/0/private/WithdrawAddresses";
    pub const WITHDRAW_INFO: &str = "/0/private/WithdrawInfo";
    pub const WITHDRAW: &str = "/0/private/Withdraw";
    pub const WITHDRAW_STATUS: &str = "/0/private/WithdrawStatus";
    pub const WITHDRAW_CANCEL: &str = "/0/private/WithdrawCancel";
    pub const WALLET_TRANSFER: &str = "/0/private/WalletTransfer";

    // Earn
    pub const EARN_ALLOCATE: &str = "/0/private/Earn/Allocate";
    pub const EARN_DEALLOCATE: &str = "/0/private/Earn/Deallocate";
    pub const EARN_ALLOCATE_STATUS: &str = "/0/private/Earn/AllocateStatus";
    pub const EARN_DEALLOCATE_STATUS: &str = "/0/private/Earn/DeallocateStatus";
    pub const EARN_STRATEGIES: &str = "/0/private/Earn/Strategies";
    pub const EARN_ALLOCATIONS: &str = "/0/private/Earn/Allocations";

    pub const GET_WEBSOCKETS_TOKEN: &str = "/0/private/GetWebSocketsToken";
}
