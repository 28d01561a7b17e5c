//! Earn: staking and opt-in rewards strategies.

use serde::{Deserialize, Serialize};

use crate::error::KrakenError;
use crate::spot::rest::SpotRestClient;
use crate::spot::rest::endpoints::private;
use crate::types::{ApiResponse, DecimalString};

/// Amount moved into or out of a strategy.
#[derive(Debug, Clone, Serialize)]
pub struct EarnAllocateRequest {
    pub amount: DecimalString,
    pub strategy_id: String,
}

impl EarnAllocateRequest {
    pub fn new(amount: impl Into<DecimalString>, strategy_id: impl Into<String>) -> Self {
        Self {
            amount: amount.into(),
            strategy_id: strategy_id.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EarnStatusRequest {
    pub strategy_id: String,
}

impl EarnStatusRequest {
    pub fn new(strategy_id: impl Into<String>) -> Self {
        Self {
            strategy_id: strategy_id.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct AllocationStatus {
    pub pending: bool,
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
pub struct EarnStrategiesRequest {
    pub ascending: Option<bool>,
    pub asset: Option<String>,
    pub cursor: Option<String>,
    pub limit: Option<u16>,
    pub lock_type: Option<LockType>,
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
pub struct EarnAllocationsRequest {
    pub ascending: Option<bool>,
    /// Asset the `converted` amounts are expressed in (Kraken defaults to USD).
    pub converted_asset: Option<String>,
    pub hide_zero_allocations: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YieldSourceType {
    Staking,
    OffChain,
    OptInRewards,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AutoCompoundType {
    Enabled,
    Disabled,
    Optional,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LockType {
    Flex,
    Bonded,
    Timed,
    Instant,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct YieldSource {
    #[serde(rename = "type")]
    pub kind: YieldSourceType,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AutoCompound {
    #[serde(rename = "type")]
    pub kind: AutoCompoundType,
    #[serde(default)]
    pub default: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AprEstimate {
    pub low: DecimalString,
    pub high: DecimalString,
}

/// Lock terms of a strategy. Periods are in seconds and only present for the
/// lock types they apply to.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LockTerms {
    #[serde(rename = "type")]
    pub kind: LockType,
    #[serde(default)]
    pub payout_frequency: Option<i64>,
    #[serde(default)]
    pub bonding_period: Option<i64>,
    #[serde(default)]
    pub bonding_period_variable: Option<bool>,
    #[serde(default)]
    pub bonding_rewards: Option<bool>,
    #[serde(default)]
    pub exit_queue_period: Option<i64>,
    #[serde(default)]
    pub unbonding_period: Option<i64>,
    #[serde(default)]
    pub unbonding_period_variable: Option<bool>,
    #[serde(default)]
    pub unbonding_rewards: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EarnStrategies {
    pub items: Vec<EarnStrategy>,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EarnStrategy {
    pub id: String,
    pub asset: String,
    /// Kraken sends fees as strings or bare numbers.
    pub allocation_fee: DecimalString,
    pub deallocation_fee: DecimalString,
    #[serde(default)]
    pub allocation_restriction_info: Vec<String>,
    #[serde(default)]
    pub apr_estimate: Option<AprEstimate>,
    pub auto_compound: AutoCompound,
    pub can_allocate: bool,
    pub can_deallocate: bool,
    pub lock_type: LockTerms,
    #[serde(default)]
    pub user_cap: Option<DecimalString>,
    #[serde(default)]
    pub user_min_allocation: Option<DecimalString>,
    pub yield_source: YieldSource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EarnAllocations {
    pub converted_asset: String,
    pub items: Vec<EarnAllocation>,
    pub total_allocated: DecimalString,
    pub total_rewarded: DecimalString,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EarnAllocation {
    pub strategy_id: String,
    pub native_asset: String,
    pub amount_allocated: AmountAllocated,
    pub total_rewarded: EarnAmount,
    #[serde(default)]
    pub payout: Option<Payout>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AmountAllocated {
    pub total: EarnAmount,
    #[serde(default)]
    pub pending: Option<EarnAmount>,
    #[serde(default)]
    pub bonding: Option<AllocationState>,
    #[serde(default)]
    pub exit_queue: Option<AllocationState>,
    #[serde(default)]
    pub unbonding: Option<AllocationState>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AllocationState {
    pub allocation_count: i64,
    pub allocations: Vec<Allocation>,
    pub converted: DecimalString,
    pub native: DecimalString,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Allocation {
    pub created_at: String,
    pub expires: String,
    pub converted: DecimalString,
    pub native: DecimalString,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Payout {
    pub period_start: String,
    pub period_end: String,
    pub accumulated_reward: EarnAmount,
    pub estimated_reward: EarnAmount,
}

/// The same amount in the strategy's asset and in the converted asset.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EarnAmount {
    pub converted: DecimalString,
    pub native: DecimalString,
}

impl SpotRestClient {
    /// Allocation is asynchronous; poll [`get_earn_allocation_status`](Self::get_earn_allocation_status).
    pub async fn earn_allocate(&self, request: &EarnAllocateRequest) -> Result<ApiResponse<bool>, KrakenError> {
        self.private_post(private::EARN_ALLOCATE, request).await
    }

    pub async fn earn_deallocate(&self, request: &EarnAllocateRequest) -> Result<ApiResponse<bool>, KrakenError> {
        self.private_post(private::EARN_DEALLOCATE, request).await
    }

    pub async fn get_earn_allocation_status(
        &self,
        request: &EarnStatusRequest,
    ) -> Result<ApiResponse<AllocationStatus>, KrakenError> {
        self.private_post(private::EARN_ALLOCATE_STATUS, request).await
    }

    pub async fn get_earn_deallocation_status(
        &self,
        request: &EarnStatusRequest,
    ) -> Result<ApiResponse<AllocationStatus>, KrakenError> {
        self.private_post(private::EARN_DEALLOCATE_STATUS, request).await
    }

    pub async fn list_earn_strategies(
        &self,
        request: Option<&EarnStrategiesRequest>,
    ) -> Result<ApiResponse<EarnStrategies>, KrakenError> {
        self.private_post(private::EARN_STRATEGIES, &request).await
    }

    pub async fn list_earn_allocations(
        &self,
        request: Option<&EarnAllocationsRequest>,
    ) -> Result<ApiResponse<EarnAllocations>, KrakenError> {
        self.private_post(private::EARN_ALLOCATIONS, &request).await
    }
}
