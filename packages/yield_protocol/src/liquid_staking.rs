use cosmwasm_std::Uint128;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Liquid-staking collaborator. Withdrawal requests are finalized by an
/// out-of-band actor at an unpredictable time; each request is bounded by the
/// protocol's per-request floor and ceiling.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ExecuteMsg {
    /// Exchange the attached staked funds for a withdrawal request. The
    /// assigned id is returned in the response data as
    /// [`RequestWithdrawalResponse`].
    RequestWithdrawal {},
    /// Claim a finalized request; the protocol sends the unstaked
    /// underlying to the caller
    Claim { request_id: Uint128 },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum QueryMsg {
    WithdrawalLimits {},
    WithdrawalStatus { request_id: Uint128 },
}

/// Set as response data by `RequestWithdrawal`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct RequestWithdrawalResponse {
    pub request_id: Uint128,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct WithdrawalLimitsResponse {
    pub min_amount: Uint128,
    pub max_amount: Uint128,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct WithdrawalStatusResponse {
    pub is_finalized: bool,
    pub claimable: Uint128,
}
