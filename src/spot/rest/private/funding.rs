//! Deposits, withdrawals and wallet transfers.

use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::Value;

use crate::error::KrakenError;
use crate::spot::rest::SpotRestClient;
use crate::spot::rest::endpoints::private;
use crate::types::serde_helpers::{empty_string_as_none, maybe_decimal};
use crate::types::{ApiResponse, DecimalString};

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize)]
pub struct DepositMethodsRequest {
    pub asset: String,
    pub aclass: Option<String>,
}

impl DepositMethodsRequest {
    pub fn new(asset: impl Into<String>) -> Self {
        Self {
            asset: asset.into(),
            aclass: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DepositMethod {
    pub method: String,
    /// `None` when Kraken reports no limit (`false`).
    #[serde(deserialize_with = "maybe_decimal::deserialize", default)]
    pub limit: Option<DecimalString>,
    #[serde(default)]
    pub fee: Option<DecimalString>,
    #[serde(default)]
    pub address_setup_fee: Option<DecimalString>,
    #[serde(default)]
    pub gen_address: Option<bool>,
    #[serde(default)]
    pub minimum: Option<DecimalString>,
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize)]
pub struct DepositAddressesRequest {
    pub asset: String,
    pub method: String,
    /// Ask Kraken to generate a fresh address.
    #[serde(rename = "new")]
    pub new_address: Option<bool>,
    pub amount: Option<DecimalString>,
}

impl DepositAddressesRequest {
    pub fn new(asset: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            asset: asset.into(),
            method: method.into(),
            new_address: None,
            amount: None,
        }
    }

    pub fn generate(mut self) -> Self {
        self.new_address = Some(true);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DepositAddress {
    pub address: String,
    pub expiretm: String,
    #[serde(default)]
    pub new: Option<bool>,
    #[serde(deserialize_with = "empty_string_as_none::deserialize", default)]
    pub memo: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none::deserialize", default)]
    pub tag: Option<String>,
}

/// Pagination cursor of the transfer status endpoints.
///
/// Requests send `true` to ask for the first page; responses carry either a
/// string to continue from or `false` on the last page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PageCursor {
    Next(String),
    Flag(bool),
}

impl PageCursor {
    pub fn next(&self) -> Option<&str> {
        match self {
            PageCursor::Next(cursor) => Some(cursor),
            PageCursor::Flag(_) => None,
        }
    }
}

/// Filter shared by `DepositStatus` and `WithdrawStatus`.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
pub struct TransferStatusRequest {
    pub asset: Option<String>,
    pub aclass: Option<String>,
    pub method: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub cursor: Option<PageCursor>,
    pub limit: Option<u32>,
}

impl TransferStatusRequest {
    pub fn for_asset(asset: impl Into<String>) -> Self {
        Self {
            asset: Some(asset.into()),
            ..Default::default()
        }
    }

    pub fn paginated(mut self) -> Self {
        self.cursor = Some(PageCursor::Flag(true));
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusProp {
    CancelPending,
    Canceled,
    CancelDenied,
    Return,
    #[serde(rename = "onhold")]
    OnHold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum TransferStatus {
    #[serde(alias = "initial")]
    Initial,
    #[serde(alias = "pending")]
    Pending,
    #[serde(alias = "settled")]
    Settled,
    #[serde(alias = "success")]
    Success,
    #[serde(alias = "failure")]
    Failure,
}

/// One deposit or withdrawal.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Transfer {
    pub method: String,
    pub aclass: String,
    pub asset: String,
    pub refid: String,
    pub txid: String,
    pub info: String,
    pub amount: DecimalString,
    #[serde(default)]
    pub fee: Option<DecimalString>,
    pub time: i64,
    pub status: TransferStatus,
    #[serde(rename = "status-prop", default)]
    pub status_prop: Option<StatusProp>,
    /// Kraken has sent this key misspelled as `orginators`.
    #[serde(default, alias = "orginators")]
    pub originators: Option<Vec<String>>,
}

/// Either a plain list or, when a cursor was requested, a page.
#[derive(Debug, Clone)]
pub enum TransferStatusResponse {
    List(Vec<Transfer>),
    Deposits { deposit: Vec<Transfer>, next_cursor: Option<PageCursor> },
    Withdrawals { withdrawals: Vec<Transfer>, next_cursor: Option<PageCursor> },
}

// Numbers buffered by an untagged enum lose their type under
// `arbitrary_precision`, so the shape is picked from a `Value` instead.
impl<'de> Deserialize<'de> for TransferStatusResponse {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Page {
            #[serde(default)]
            deposit: Option<Vec<Transfer>>,
            #[serde(default)]
            withdrawals: Option<Vec<Transfer>>,
            #[serde(default)]
            next_cursor: Option<PageCursor>,
        }

        let value = Value::deserialize(deserializer)?;
        if value.is_array() {
            return serde_json::from_value(value).map(Self::List).map_err(de::Error::custom);
        }
        let page: Page = serde_json::from_value(value).map_err(de::Error::custom)?;
        match (page.deposit, page.withdrawals) {
            (Some(deposit), _) => Ok(Self::Deposits {
                deposit,
                next_cursor: page.next_cursor,
            }),
            (None, Some(withdrawals)) => Ok(Self::Withdrawals {
                withdrawals,
                next_cursor: page.next_cursor,
            }),
            (None, None) => Err(de::Error::custom("transfer page without `deposit` or `withdrawals`")),
        }
    }
}

impl TransferStatusResponse {
    pub fn entries(&self) -> &[Transfer] {
        match self {
            Self::List(items) => items,
            Self::Deposits { deposit, .. } => deposit,
            Self::Withdrawals { withdrawals, .. } => withdrawals,
        }
    }

    pub fn next_cursor(&self) -> Option<&str> {
        match self {
            Self::Deposits { next_cursor, .. } | Self::Withdrawals { next_cursor, .. } => {
                next_cursor.as_ref().and_then(PageCursor::next)
            }
            Self::List(_) => None,
        }
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
pub struct WithdrawMethodsRequest {
    pub asset: Option<String>,
    pub aclass: Option<String>,
    pub network: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WithdrawMethod {
    pub asset: String,
    pub method: String,
    #[serde(default)]
    pub network: Option<String>,
    pub minimum: DecimalString,
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
pub struct WithdrawAddressesRequest {
    pub asset: Option<String>,
    pub aclass: Option<String>,
    pub method: Option<String>,
    pub key: Option<String>,
    pub verified: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WithdrawalAddress {
    pub address: String,
    pub asset: String,
    pub method: String,
    /// Name of the address as configured in the account.
    pub key: String,
    #[serde(deserialize_with = "empty_string_as_none::deserialize", default)]
    pub memo: Option<String>,
    pub verified: bool,
}

/// Asset, configured withdrawal key and amount: the shape of both
/// `WithdrawInfo` and `Withdraw`.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize)]
pub struct WithdrawRequest {
    pub asset: String,
    pub key: String,
    pub amount: DecimalString,
    pub address: Option<String>,
    pub max_fee: Option<DecimalString>,
}

impl WithdrawRequest {
    pub fn new(asset: impl Into<String>, key: impl Into<String>, amount: impl Into<DecimalString>) -> Self {
        Self {
            asset: asset.into(),
            key: key.into(),
            amount: amount.into(),
            address: None,
            max_fee: None,
        }
    }

    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Refuse the withdrawal if the fee would exceed `max_fee`.
    pub fn max_fee(mut self, max_fee: impl Into<DecimalString>) -> Self {
        self.max_fee = Some(max_fee.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WithdrawInfo {
    pub method: String,
    #[serde(deserialize_with = "maybe_decimal::deserialize", default)]
    pub limit: Option<DecimalString>,
    pub fee: DecimalString,
    pub amount: DecimalString,
}

#[derive(Debug, Clone, Serialize)]
pub struct WithdrawCancelRequest {
    pub asset: String,
    pub refid: String,
}

impl WithdrawCancelRequest {
    pub fn new(asset: impl Into<String>, refid: impl Into<String>) -> Self {
        Self {
            asset: asset.into(),
            refid: refid.into(),
        }
    }
}

/// Move funds between the spot and futures wallets.
#[derive(Debug, Clone, Serialize)]
pub struct WalletTransferRequest {
    pub asset: String,
    pub from: String,
    pub to: String,
    pub amount: DecimalString,
}

impl WalletTransferRequest {
    pub fn spot_to_futures(asset: impl Into<String>, amount: impl Into<DecimalString>) -> Self {
        Self {
            asset: asset.into(),
            from: "Spot Wallet".to_owned(),
            to: "Futures Wallet".to_owned(),
            amount: amount.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ConfirmationRefId {
    pub refid: String,
}

impl SpotRestClient {
    pub async fn get_deposit_methods(
        &self,
        request: &DepositMethodsRequest,
    ) -> Result<ApiResponse<Vec<DepositMethod>>, KrakenError> {
        self.private_post(private::DEPOSIT_METHODS, request).await
    }

    pub async fn get_deposit_addresses(
        &self,
        request: &DepositAddressesRequest,
    ) -> Result<ApiResponse<Vec<DepositAddress>>, KrakenError> {
        self.private_post(private::DEPOSIT_ADDRESSES, request).await
    }

    /// Recent deposits; ask for a cursor to page through older ones.
    pub async fn get_deposit_status(
        &self,
        request: Option<&TransferStatusRequest>,
    ) -> Result<ApiResponse<TransferStatusResponse>, KrakenError> {
        self.private_post(private::DEPOSIT_STATUS, &request).await
    }

    pub async fn get_withdraw_methods(
        &self,
        request: Option<&WithdrawMethodsRequest>,
    ) -> Result<ApiResponse<Vec<WithdrawMethod>>, KrakenError> {
        self.private_post(private::WITHDRAW_METHODS, &request).await
    }

    pub async fn get_withdraw_addresses(
        &self,
        request: Option<&WithdrawAddressesRequest>,
    ) -> Result<ApiResponse<Vec<WithdrawalAddress>>, KrakenError> {
        self.private_post(private::WITHDRAW_ADDRESSES, &request).await
    }

    /// Fee and limit for a prospective withdrawal.
    pub async fn get_withdraw_info(&self, request: &WithdrawRequest) -> Result<ApiResponse<WithdrawInfo>, KrakenError> {
        self.private_post(private::WITHDRAW_INFO, request).await
    }

    pub async fn withdraw_funds(&self, request: &WithdrawRequest) -> Result<ApiResponse<ConfirmationRefId>, KrakenError> {
        self.private_post(private::WITHDRAW, request).await
    }

    pub async fn get_withdraw_status(
        &self,
        request: Option<&TransferStatusRequest>,
    ) -> Result<ApiResponse<TransferStatusResponse>, KrakenError> {
        self.private_post(private::WITHDRAW_STATUS, &request).await
    }

    pub async fn withdraw_cancel(&self, request: &WithdrawCancelRequest) -> Result<ApiResponse<bool>, KrakenError> {
        self.private_post(private::WITHDRAW_CANCEL, request).await
    }

    pub async fn wallet_transfer(
        &self,
        request: &WalletTransferRequest,
    ) -> Result<ApiResponse<ConfirmationRefId>, KrakenError> {
        self.private_post(private::WALLET_TRANSFER, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deposit_method_without_limit() {
        let json = r#"[
            {"method":"Bitcoin","limit":false,"fee":"0.0000000000","gen-address":true,"minimum":"0.00010000"},
            {"method":"Bitcoin Lightning","limit":"10.00000000","fee":"0.00000000","minimum":"0.00001000"}
        ]"#;
        let methods: Vec<DepositMethod> = serde_json::from_str(json).unwrap();
        assert_eq!(methods[0].limit, None);
        assert_eq!(methods[0].gen_address, Some(true));
        assert_eq!(methods[1].limit.as_ref().map(DecimalString::as_str), Some("10.00000000"));
    }

    #[test]
    fn transfer_status_list_and_page() {
        let entry = r#"{"method":"Bitcoin","aclass":"currency","asset":"XXBT","refid":"FTQcuak-V6Za8qrWnhzTx67yYHz8Tg","txid":"6544b41b607d8b2512baf801755a3a87b6890eacdb451be8a94059fb11f0a8d9","info":"2Myd4eaAW96ojk38A2uDK4FbioCayvkEgVq","amount":"0.78125000","fee":"0.0000000000","time":1688992722,"status":"Success","status-prop":"return"}"#;

        let list: TransferStatusResponse = serde_json::from_str(&format!("[{entry}]")).unwrap();
        assert_eq!(list.entries().len(), 1);
        assert_eq!(list.entries()[0].status, TransferStatus::Success);
        assert_eq!(list.entries()[0].status_prop, Some(StatusProp::Return));
        assert_eq!(list.next_cursor(), None);

        let page: TransferStatusResponse =
            serde_json::from_str(&format!(r#"{{"deposit":[{entry}],"next_cursor":"MTY4ODk5"}}"#)).unwrap();
        assert_eq!(page.entries()[0].amount.as_str(), "0.78125000");
        assert_eq!(page.next_cursor(), Some("MTY4ODk5"));
    }

    #[test]
    fn first_page_request_sends_cursor_flag() {
        let request = TransferStatusRequest::for_asset("XBT").paginated();
        assert_eq!(serde_urlencoded::to_string(&request).unwrap(), "asset=XBT&cursor=true");
    }

    #[test]
    fn withdraw_request_form() {
        let request = WithdrawRequest::new("XBT", "btc_2709", "0.725").max_fee("0.0001");
        assert_eq!(
            serde_urlencoded::to_string(&request).unwrap(),
            "asset=XBT&key=btc_2709&amount=0.725&max_fee=0.0001"
        );
    }
}
