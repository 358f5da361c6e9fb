use cosmwasm_std::Uint128;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Restaking collaborator. Deposits are converted to strategy shares;
/// withdrawals must be queued and become claimable only after the protocol's
/// fixed block delay has passed.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ExecuteMsg {
    /// Stake the attached funds into `strategy`
    Deposit { strategy: String },
    /// Start unwinding `shares`. The assigned withdrawal id is returned in
    /// the response data as [`QueueWithdrawalResponse`].
    QueueWithdrawal { shares: Uint128 },
    /// Release a matured withdrawal; the protocol sends the underlying
    /// to the caller
    CompleteWithdrawal { request_id: u64 },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum QueryMsg {
    /// Blocks a queued withdrawal must wait before completion
    WithdrawalDelayBlocks {},
    /// Operator the caller's stake is delegated to
    DelegatedOperator { address: String },
    SharesToUnderlying { shares: Uint128 },
    UnderlyingToShares { amount: Uint128 },
}

/// Set as response data by `QueueWithdrawal`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct QueueWithdrawalResponse {
    pub request_id: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct WithdrawalDelayBlocksResponse {
    pub blocks: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct DelegatedOperatorResponse {
    pub operator: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct SharesToUnderlyingResponse {
    pub amount: Uint128,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct UnderlyingToSharesResponse {
    pub shares: Uint128,
}
