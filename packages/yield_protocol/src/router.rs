use cosmwasm_std::{Binary, Uint128};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// External protocol the deposit asset is routed into.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum YieldSource {
    /// Funds sit in a lending market; withdrawals are synchronous.
    LendingPool,
    /// Funds are restaked; withdrawals run through the two-stage
    /// restaking -> liquid-staking pipeline.
    Restaking,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct InstantiateMsg {
    pub gateway: String,
    pub lending_pool: String,
    pub restaking: String,
    pub liquid_staking: String,
    /// Strategy identifier passed through to the restaking protocol on deposit
    pub restaking_strategy: String,
    /// Operator the restaking position must be delegated to, checked once here
    pub operator: String,
    pub source_chain: String,
    pub source_address: String,
    /// Local denom of the asset deposited and paid out
    pub deposit_denom: String,
    /// Gateway-level symbol of the deposit asset
    pub deposit_symbol: String,
    /// Denom received from the restaking protocol and handed to the
    /// liquid-staking protocol during withdrawal
    pub lst_denom: String,
    pub yield_source: YieldSource,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ExecuteMsg {
    ////////////////////
    /// Gateway's operations
    ////////////////////

    /// Inbound cross-chain message without an accompanying token transfer.
    /// Carries unstake and reinit actions.
    Execute {
        command_id: Binary,
        source_chain: String,
        source_address: String,
        payload: Binary,
    },

    /// Inbound cross-chain message with a token transfer. Carries stake
    /// actions; the transferred funds must be attached to the call.
    ExecuteWithToken {
        command_id: Binary,
        source_chain: String,
        source_address: String,
        payload: Binary,
        symbol: String,
        amount: Uint128,
    },

    ////////////////////
    /// Permissionless operations
    ////////////////////

    /// Advance both withdrawal stages by at most one ready item each.
    /// Safe to call at any time; a no-op when nothing is ready.
    Reinit {},

    ////////////////////
    /// Owner's operations
    ////////////////////
    UpdateConfig {
        owner: Option<String>,
        source_chain: Option<String>,
        source_address: Option<String>,
        is_stake_enabled: Option<bool>,
        is_unstake_enabled: Option<bool>,
    },

    /// Move stray native funds out of the contract
    RescueFunds {
        denom: String,
        amount: Uint128,
        recipient: String,
    },

    /// Move stray cw20 tokens out of the contract
    RescueCw20 {
        token: String,
        amount: Uint128,
        recipient: String,
    },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum QueryMsg {
    Config {},
    Position {},
    RestakingQueue {},
    LstQueue {},
    RestakingQueueElement { index: u64 },
    LstQueueElement { index: u64 },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct MigrateMsg {}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct ConfigResponse {
    pub owner: String,
    pub gateway: String,
    pub lending_pool: String,
    pub restaking: String,
    pub liquid_staking: String,
    pub restaking_strategy: String,
    pub operator: String,
    pub source_chain: String,
    pub source_address: String,
    pub deposit_denom: String,
    pub deposit_symbol: String,
    pub lst_denom: String,
    pub yield_source: YieldSource,
    pub is_stake_enabled: bool,
    pub is_unstake_enabled: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct PositionResponse {
    pub total_shares: Uint128,
    pub total_lp_units: Uint128,
}

/// FIFO bounds of a withdrawal queue. Indexes are absolute and never reused:
/// `start` is the next element to be serviced, `end` the next to be assigned.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct QueueResponse {
    pub start: u64,
    pub end: u64,
    pub length: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct RestakingElementResponse {
    pub unstake_id: u64,
    pub request_id: u64,
    pub shares: Uint128,
    pub ready_at_block: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct LstElementResponse {
    pub unstake_id: u64,
    pub request_id: Uint128,
    pub amount: Uint128,
    pub last: bool,
}
