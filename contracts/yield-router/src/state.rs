use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use cosmwasm_std::{Addr, StdResult, Storage, Uint128};
use cw_storage_plus::{Item, Map, U64Key};

use yield_protocol::router::{ConfigResponse, YieldSource};

use crate::queue::Queue;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct Config {
    pub owner: Addr,
    pub gateway: Addr,
    pub lending_pool: Addr,
    pub restaking: Addr,
    pub liquid_staking: Addr,
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

impl Config {
    pub fn as_res(&self) -> ConfigResponse {
        ConfigResponse {
            owner: self.owner.to_string(),
            gateway: self.gateway.to_string(),
            lending_pool: self.lending_pool.to_string(),
            restaking: self.restaking.to_string(),
            liquid_staking: self.liquid_staking.to_string(),
            restaking_strategy: self.restaking_strategy.clone(),
            operator: self.operator.clone(),
            source_chain: self.source_chain.clone(),
            source_address: self.source_address.clone(),
            deposit_denom: self.deposit_denom.clone(),
            deposit_symbol: self.deposit_symbol.clone(),
            lst_denom: self.lst_denom.clone(),
            yield_source: self.yield_source,
            is_stake_enabled: self.is_stake_enabled,
            is_unstake_enabled: self.is_unstake_enabled,
        }
    }
}

/// Aggregate claim bookkeeping. `total_lp_units` is the outstanding
/// user-facing supply, `total_shares` the internal units held in the yield
/// source. Both are zero together or non-zero together: shares are burned in
/// the same proportion LP units are, at the moment a withdrawal is initiated.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema, Default)]
pub struct Position {
    pub total_shares: Uint128,
    pub total_lp_units: Uint128,
}

/// First withdrawal leg: shares queued with the restaking protocol, claimable
/// once the chain height reaches `ready_at_block`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct RestakingWithdrawal {
    pub unstake_id: u64,
    pub request_id: u64,
    pub shares: Uint128,
    pub ready_at_block: u64,
}

/// Second withdrawal leg: a request registered with the liquid-staking
/// protocol, claimable once finalized externally. A withdrawal split across
/// several requests shares one `unstake_id`; `last` marks the closing chunk.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct LstWithdrawal {
    pub unstake_id: u64,
    pub request_id: Uint128,
    pub amount: Uint128,
    pub last: bool,
}

/// Context bridging a restaking queue-withdrawal submsg to its reply
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct PendingRestakingWithdrawal {
    pub unstake_id: u64,
    pub shares: Uint128,
    pub ready_at_block: u64,
}

/// Context bridging liquid-staking request submsgs to their replies; one
/// chunk is consumed per reply, in submission order.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct PendingLstWithdrawals {
    pub unstake_id: u64,
    pub amounts: Vec<Uint128>,
}

pub const CONFIG: Item<Config> = Item::new("config");
pub const POSITION: Item<Position> = Item::new("position");

pub const RESTAKING_QUEUE: Queue<RestakingWithdrawal> =
    Queue::new("restaking_queue", "restaking_queue_range");
pub const LST_QUEUE: Queue<LstWithdrawal> = Queue::new("lst_queue", "lst_queue_range");

pub const PENDING_RESTAKING: Item<PendingRestakingWithdrawal> = Item::new("pending_restaking");
pub const PENDING_LST: Item<PendingLstWithdrawals> = Item::new("pending_lst");

/// unstake_id -> amount claimed by already-completed chunks
pub const CLAIMED_BY_UNSTAKE: Map<U64Key, Uint128> = Map::new("claimed_by_unstake");

pub fn add_claimed(storage: &mut dyn Storage, unstake_id: u64, amount: Uint128) -> StdResult<Uint128> {
    let claimed = CLAIMED_BY_UNSTAKE
        .may_load(storage, unstake_id.into())?
        .unwrap_or_default()
        + amount;
    CLAIMED_BY_UNSTAKE.save(storage, unstake_id.into(), &claimed)?;
    Ok(claimed)
}

pub fn clear_claimed(storage: &mut dyn Storage, unstake_id: u64) {
    CLAIMED_BY_UNSTAKE.remove(storage, unstake_id.into());
}
