use std::collections::HashMap;

use cosmwasm_std::testing::{MockApi, MockQuerier, MockStorage};
use cosmwasm_std::{
    from_binary, from_slice, to_binary, Coin, ContractResult, Empty, OwnedDeps, Querier,
    QuerierResult, QueryRequest, SystemError, SystemResult, Uint128, WasmQuery,
};

use yield_protocol::gateway::{IsApprovedResponse, QueryMsg as GatewayQueryMsg};
use yield_protocol::lending::{BalanceResponse, QueryMsg as LendingQueryMsg};
use yield_protocol::liquid_staking::{
    QueryMsg as LiquidStakingQueryMsg, WithdrawalLimitsResponse, WithdrawalStatusResponse,
};
use yield_protocol::restaking::{
    DelegatedOperatorResponse, QueryMsg as RestakingQueryMsg, SharesToUnderlyingResponse,
    UnderlyingToSharesResponse, WithdrawalDelayBlocksResponse,
};

pub const MOCK_CONTRACT_ADDR: &str = "cosmos2contract";
pub const GATEWAY_ADDR: &str = "gateway0000";
pub const LENDING_ADDR: &str = "lending0000";
pub const RESTAKING_ADDR: &str = "restaking0000";
pub const LIQUID_STAKING_ADDR: &str = "liquidstaking0000";
pub const OPERATOR: &str = "operator0000";

pub const DEFAULT_WITHDRAWAL_DELAY_BLOCKS: u64 = 100;

pub fn mock_dependencies(
    contract_balance: &[Coin],
) -> OwnedDeps<MockStorage, MockApi, WasmMockQuerier> {
    let custom_querier =
        WasmMockQuerier::new(MockQuerier::new(&[(MOCK_CONTRACT_ADDR, contract_balance)]));

    OwnedDeps {
        storage: MockStorage::default(),
        api: MockApi::default(),
        querier: custom_querier,
    }
}

/// Simulated restaking protocol: a linear share price plus the fixed
/// withdrawal delay and the delegated operator
pub struct RestakingQuerier {
    pub delay_blocks: u64,
    pub operator: String,
    /// underlying per share, as a ratio
    pub rate: (u128, u128),
}

impl Default for RestakingQuerier {
    fn default() -> Self {
        RestakingQuerier {
            delay_blocks: DEFAULT_WITHDRAWAL_DELAY_BLOCKS,
            operator: OPERATOR.to_string(),
            rate: (1, 1),
        }
    }
}

/// Simulated liquid-staking protocol: request limits and externally driven
/// finalization flags keyed by request id
pub struct LiquidStakingQuerier {
    pub min_amount: Uint128,
    pub max_amount: Uint128,
    pub statuses: HashMap<u128, (bool, Uint128)>,
}

impl Default for LiquidStakingQuerier {
    fn default() -> Self {
        LiquidStakingQuerier {
            min_amount: Uint128::new(100),
            max_amount: Uint128::new(1_000_000_000_000_000),
            statuses: HashMap::new(),
        }
    }
}

pub struct WasmMockQuerier {
    base: MockQuerier<Empty>,
    restaking: RestakingQuerier,
    liquid_staking: LiquidStakingQuerier,
    lending_balance: Uint128,
    gateway_approves: bool,
}

impl Querier for WasmMockQuerier {
    fn raw_query(&self, bin_request: &[u8]) -> QuerierResult {
        let request: QueryRequest<Empty> = match from_slice(bin_request) {
            Ok(v) => v,
            Err(e) => {
                return SystemResult::Err(SystemError::InvalidRequest {
                    error: format!("Parsing query request: {}", e),
                    request: bin_request.into(),
                })
            }
        };
        self.handle_query(&request)
    }
}

impl WasmMockQuerier {
    pub fn new(base: MockQuerier<Empty>) -> Self {
        WasmMockQuerier {
            base,
            restaking: RestakingQuerier::default(),
            liquid_staking: LiquidStakingQuerier::default(),
            lending_balance: Uint128::zero(),
            gateway_approves: true,
        }
    }

    pub fn handle_query(&self, request: &QueryRequest<Empty>) -> QuerierResult {
        match request {
            QueryRequest::Wasm(WasmQuery::Smart { contract_addr, msg }) => {
                match contract_addr.as_str() {
                    RESTAKING_ADDR => self.handle_restaking(msg),
                    LIQUID_STAKING_ADDR => self.handle_liquid_staking(msg),
                    LENDING_ADDR => self.handle_lending(msg),
                    GATEWAY_ADDR => self.handle_gateway(msg),
                    _ => SystemResult::Err(SystemError::NoSuchContract {
                        addr: contract_addr.clone(),
                    }),
                }
            }
            _ => self.base.handle_query(request),
        }
    }

    fn handle_restaking(&self, msg: &cosmwasm_std::Binary) -> QuerierResult {
        let (num, den) = self.restaking.rate;
        match from_binary(msg).unwrap() {
            RestakingQueryMsg::WithdrawalDelayBlocks {} => {
                SystemResult::Ok(ContractResult::from(to_binary(
                    &WithdrawalDelayBlocksResponse {
                        blocks: self.restaking.delay_blocks,
                    },
                )))
            }
            RestakingQueryMsg::DelegatedOperator { .. } => {
                SystemResult::Ok(ContractResult::from(to_binary(&DelegatedOperatorResponse {
                    operator: self.restaking.operator.clone(),
                })))
            }
            RestakingQueryMsg::SharesToUnderlying { shares } => {
                SystemResult::Ok(ContractResult::from(to_binary(&SharesToUnderlyingResponse {
                    amount: shares.multiply_ratio(num, den),
                })))
            }
            RestakingQueryMsg::UnderlyingToShares { amount } => {
                SystemResult::Ok(ContractResult::from(to_binary(&UnderlyingToSharesResponse {
                    shares: amount.multiply_ratio(den, num),
                })))
            }
        }
    }

    fn handle_liquid_staking(&self, msg: &cosmwasm_std::Binary) -> QuerierResult {
        match from_binary(msg).unwrap() {
            LiquidStakingQueryMsg::WithdrawalLimits {} => {
                SystemResult::Ok(ContractResult::from(to_binary(&WithdrawalLimitsResponse {
                    min_amount: self.liquid_staking.min_amount,
                    max_amount: self.liquid_staking.max_amount,
                })))
            }
            LiquidStakingQueryMsg::WithdrawalStatus { request_id } => {
                let (is_finalized, claimable) = self
                    .liquid_staking
                    .statuses
                    .get(&request_id.u128())
                    .copied()
                    .unwrap_or((false, Uint128::zero()));
                SystemResult::Ok(ContractResult::from(to_binary(&WithdrawalStatusResponse {
                    is_finalized,
                    claimable,
                })))
            }
        }
    }

    fn handle_lending(&self, msg: &cosmwasm_std::Binary) -> QuerierResult {
        match from_binary(msg).unwrap() {
            LendingQueryMsg::Balance { .. } => {
                SystemResult::Ok(ContractResult::from(to_binary(&BalanceResponse {
                    balance: self.lending_balance,
                })))
            }
        }
    }

    fn handle_gateway(&self, msg: &cosmwasm_std::Binary) -> QuerierResult {
        match from_binary(msg).unwrap() {
            GatewayQueryMsg::IsApproved { .. } => {
                SystemResult::Ok(ContractResult::from(to_binary(&IsApprovedResponse {
                    approved: self.gateway_approves,
                })))
            }
        }
    }

    pub fn set_restaking_rate(&mut self, underlying: u128, shares: u128) {
        self.restaking.rate = (underlying, shares);
    }

    pub fn set_withdrawal_delay(&mut self, blocks: u64) {
        self.restaking.delay_blocks = blocks;
    }

    pub fn set_delegated_operator(&mut self, operator: &str) {
        self.restaking.operator = operator.to_string();
    }

    pub fn set_withdrawal_limits(&mut self, min_amount: u128, max_amount: u128) {
        self.liquid_staking.min_amount = Uint128::new(min_amount);
        self.liquid_staking.max_amount = Uint128::new(max_amount);
    }

    pub fn set_withdrawal_status(&mut self, request_id: u128, is_finalized: bool, claimable: u128) {
        self.liquid_staking
            .statuses
            .insert(request_id, (is_finalized, Uint128::new(claimable)));
    }

    pub fn set_lending_balance(&mut self, balance: u128) {
        self.lending_balance = Uint128::new(balance);
    }

    pub fn set_gateway_approves(&mut self, approves: bool) {
        self.gateway_approves = approves;
    }
}
