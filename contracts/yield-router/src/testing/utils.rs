use std::convert::TryInto;

use cosmwasm_std::testing::{mock_env, mock_info, MockApi, MockStorage};
use cosmwasm_std::{
    coins, from_binary, to_binary, Binary, Coin, ContractResult, CosmosMsg, Env, OwnedDeps, Reply,
    Response, SubMsgExecutionResponse, Uint128, WasmMsg,
};

use yield_protocol::gateway;
use yield_protocol::liquid_staking::RequestWithdrawalResponse;
use yield_protocol::restaking::QueueWithdrawalResponse;
use yield_protocol::router::{
    ExecuteMsg, InstantiateMsg, PositionResponse, QueryMsg, QueueResponse, YieldSource,
};

use crate::contract::{execute, instantiate, query, reply};
use crate::reply::{QUEUE_WITHDRAWAL_REPLY_ID, REQUEST_WITHDRAWAL_REPLY_ID};
use crate::testing::mock_querier::{
    mock_dependencies, WasmMockQuerier, GATEWAY_ADDR, LENDING_ADDR, LIQUID_STAKING_ADDR, OPERATOR,
    RESTAKING_ADDR,
};
use crate::ContractError;

pub const OWNER: &str = "owner0000";
pub const SOURCE_CHAIN: &str = "remote-chain";
pub const SOURCE_ADDRESS: &str = "remote-contract-1";
pub const STRATEGY: &str = "strategy0000";
pub const DEPOSIT_DENOM: &str = "ueth";
pub const DEPOSIT_SYMBOL: &str = "ETH";
pub const LST_DENOM: &str = "usteth";

pub type TestDeps = OwnedDeps<MockStorage, MockApi, WasmMockQuerier>;

pub fn default_instantiate_msg(yield_source: YieldSource) -> InstantiateMsg {
    InstantiateMsg {
        gateway: GATEWAY_ADDR.to_string(),
        lending_pool: LENDING_ADDR.to_string(),
        restaking: RESTAKING_ADDR.to_string(),
        liquid_staking: LIQUID_STAKING_ADDR.to_string(),
        restaking_strategy: STRATEGY.to_string(),
        operator: OPERATOR.to_string(),
        source_chain: SOURCE_CHAIN.to_string(),
        source_address: SOURCE_ADDRESS.to_string(),
        deposit_denom: DEPOSIT_DENOM.to_string(),
        deposit_symbol: DEPOSIT_SYMBOL.to_string(),
        lst_denom: LST_DENOM.to_string(),
        yield_source,
    }
}

/// Instantiate with reasonable defaults against the mock collaborators
pub fn init(yield_source: YieldSource) -> TestDeps {
    let mut deps = mock_dependencies(&[]);
    let info = mock_info(OWNER, &[]);
    instantiate(
        deps.as_mut(),
        mock_env(),
        info,
        default_instantiate_msg(yield_source),
    )
    .unwrap();
    deps
}

pub fn env_at(height_delta: u64) -> Env {
    let mut env = mock_env();
    env.block.height += height_delta;
    env
}

pub fn command_id() -> Binary {
    Binary::from(vec![0u8; 32])
}

/// Inbound 32-byte action word as the remote chain packs it
pub fn action_word(action_type: u8, action_id: u64, amount: u128) -> Binary {
    let mut word = vec![0u8; 32];
    word[7..23].copy_from_slice(&amount.to_be_bytes());
    word[23..31].copy_from_slice(&action_id.to_be_bytes());
    word[31] = action_type;
    Binary::from(word)
}

pub fn execute_stake(
    deps: &mut TestDeps,
    env: &Env,
    action_id: u64,
    amount: u128,
) -> Result<Response, ContractError> {
    execute(
        deps.as_mut(),
        env.clone(),
        mock_info(GATEWAY_ADDR, &coins(amount, DEPOSIT_DENOM)),
        ExecuteMsg::ExecuteWithToken {
            command_id: command_id(),
            source_chain: SOURCE_CHAIN.to_string(),
            source_address: SOURCE_ADDRESS.to_string(),
            payload: action_word(0, action_id, 0),
            symbol: DEPOSIT_SYMBOL.to_string(),
            amount: Uint128::new(amount),
        },
    )
}

pub fn execute_unstake(
    deps: &mut TestDeps,
    env: &Env,
    unstake_id: u64,
    lp_units: u128,
) -> Result<Response, ContractError> {
    execute(
        deps.as_mut(),
        env.clone(),
        mock_info(GATEWAY_ADDR, &[]),
        ExecuteMsg::Execute {
            command_id: command_id(),
            source_chain: SOURCE_CHAIN.to_string(),
            source_address: SOURCE_ADDRESS.to_string(),
            payload: action_word(1, unstake_id, lp_units),
        },
    )
}

/// Local permissionless trigger, from an arbitrary sender
pub fn execute_reinit(deps: &mut TestDeps, env: &Env) -> Result<Response, ContractError> {
    execute(
        deps.as_mut(),
        env.clone(),
        mock_info("anyone0000", &[]),
        ExecuteMsg::Reinit {},
    )
}

/// Deliver the restaking protocol's answer to a queued withdrawal
pub fn queue_withdrawal_reply(deps: &mut TestDeps, request_id: u64) -> Response {
    reply(
        deps.as_mut(),
        mock_env(),
        Reply {
            id: QUEUE_WITHDRAWAL_REPLY_ID,
            result: ContractResult::Ok(SubMsgExecutionResponse {
                events: vec![],
                data: Some(to_binary(&QueueWithdrawalResponse { request_id }).unwrap()),
            }),
        },
    )
    .unwrap()
}

/// Deliver the liquid-staking protocol's answer to a withdrawal request
pub fn request_withdrawal_reply(deps: &mut TestDeps, request_id: u128) -> Response {
    reply(
        deps.as_mut(),
        mock_env(),
        Reply {
            id: REQUEST_WITHDRAWAL_REPLY_ID,
            result: ContractResult::Ok(SubMsgExecutionResponse {
                events: vec![],
                data: Some(
                    to_binary(&RequestWithdrawalResponse {
                        request_id: Uint128::new(request_id),
                    })
                    .unwrap(),
                ),
            }),
        },
    )
    .unwrap()
}

pub fn get_position(deps: &TestDeps) -> PositionResponse {
    from_binary(&query(deps.as_ref(), mock_env(), QueryMsg::Position {}).unwrap()).unwrap()
}

pub fn get_restaking_queue(deps: &TestDeps) -> QueueResponse {
    from_binary(&query(deps.as_ref(), mock_env(), QueryMsg::RestakingQueue {}).unwrap()).unwrap()
}

pub fn get_lst_queue(deps: &TestDeps) -> QueueResponse {
    from_binary(&query(deps.as_ref(), mock_env(), QueryMsg::LstQueue {}).unwrap()).unwrap()
}

/// Outbound reply payload, unpacked
#[derive(Debug, PartialEq)]
pub struct DecodedReply {
    pub action_type: u8,
    pub status: u8,
    pub action_id: u64,
    pub reinit_unstake_id: u64,
    pub amount: u128,
}

pub fn decode_reply(payload: &Binary) -> DecodedReply {
    let bytes = payload.as_slice();
    assert_eq!(bytes.len(), 34, "unexpected reply payload length");
    DecodedReply {
        action_type: bytes[0],
        status: bytes[1],
        action_id: u64::from_be_bytes(bytes[2..10].try_into().unwrap()),
        reinit_unstake_id: u64::from_be_bytes(bytes[10..18].try_into().unwrap()),
        amount: u128::from_be_bytes(bytes[18..34].try_into().unwrap()),
    }
}

/// The cross-chain reply carried by a response, if any: the decoded payload
/// plus the token transfer (symbol, amount, attached funds) when present
pub fn gateway_reply(res: &Response) -> Option<(DecodedReply, Option<(String, Uint128, Vec<Coin>)>)> {
    let mut found = None;
    for sub in &res.messages {
        if let CosmosMsg::Wasm(WasmMsg::Execute {
            contract_addr,
            msg,
            funds,
        }) = &sub.msg
        {
            if contract_addr.as_str() != GATEWAY_ADDR {
                continue;
            }
            assert!(found.is_none(), "more than one gateway reply in response");
            found = Some(match from_binary(msg).unwrap() {
                gateway::ExecuteMsg::CallContract {
                    destination_chain,
                    destination_address,
                    payload,
                } => {
                    assert_eq!(destination_chain, SOURCE_CHAIN);
                    assert_eq!(destination_address, SOURCE_ADDRESS);
                    (decode_reply(&payload), None)
                }
                gateway::ExecuteMsg::CallContractWithToken {
                    destination_chain,
                    destination_address,
                    payload,
                    symbol,
                    amount,
                } => {
                    assert_eq!(destination_chain, SOURCE_CHAIN);
                    assert_eq!(destination_address, SOURCE_ADDRESS);
                    (decode_reply(&payload), Some((symbol, amount, funds.clone())))
                }
            });
        }
    }
    found
}

/// Wasm execute messages addressed to `contract_addr`, with attached funds
pub fn messages_to(res: &Response, contract_addr: &str) -> Vec<(Binary, Vec<Coin>)> {
    res.messages
        .iter()
        .filter_map(|sub| match &sub.msg {
            CosmosMsg::Wasm(WasmMsg::Execute {
                contract_addr: addr,
                msg,
                funds,
            }) if addr.as_str() == contract_addr => Some((msg.clone(), funds.clone())),
            _ => None,
        })
        .collect()
}

pub fn has_event(res: &Response, ty: &str) -> bool {
    res.events.iter().any(|event| event.ty == ty)
}
