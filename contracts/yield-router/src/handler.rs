use cosmwasm_std::{
    to_binary, Binary, Coin, CosmosMsg, Deps, DepsMut, Env, Event, MessageInfo, Response, Uint128,
    WasmMsg,
};

use yield_protocol::gateway;

use crate::encoding::{decode_action_payload, encode_response_payload, ActionType, Status};
use crate::reinit::{advance_pipeline, PipelineOutcome};
use crate::stake::try_stake;
use crate::state::{Config, CONFIG};
use crate::unstake::try_unstake;
use crate::ContractError;

/// Inbound gateway message without tokens: unstake and reinit actions
pub fn execute_gateway_message(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    command_id: Binary,
    source_chain: String,
    source_address: String,
    payload: Binary,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    authenticate(
        deps.as_ref(),
        &config,
        &info,
        &command_id,
        &source_chain,
        &source_address,
        &payload,
    )?;

    let action = decode_action_payload(payload.as_slice())?;
    match action.action_type {
        ActionType::Unstake => dispatch_unstake(deps, env, config, action.action_id, action.amount),
        ActionType::Reinit => reinit_response(deps, env, config),
        // a stake must arrive with its token transfer
        ActionType::Stake => Err(ContractError::InvalidActionType {}),
    }
}

/// Inbound gateway message with a token transfer: stake actions
#[allow(clippy::too_many_arguments)]
pub fn execute_gateway_message_with_token(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    command_id: Binary,
    source_chain: String,
    source_address: String,
    payload: Binary,
    symbol: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    authenticate(
        deps.as_ref(),
        &config,
        &info,
        &command_id,
        &source_chain,
        &source_address,
        &payload,
    )?;

    let action = decode_action_payload(payload.as_slice())?;
    match action.action_type {
        ActionType::Stake => dispatch_stake(deps, env, info, config, action.action_id, symbol, amount),
        _ => Err(ContractError::InvalidActionType {}),
    }
}

/// Local permissionless pipeline trigger; the only operation that needs no
/// gateway-relayed authentication
pub fn execute_local_reinit(deps: DepsMut, env: Env) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    reinit_response(deps, env, config)
}

/// Message origin checks, all performed before any state is touched
fn authenticate(
    deps: Deps,
    config: &Config,
    info: &MessageInfo,
    command_id: &Binary,
    source_chain: &str,
    source_address: &str,
    payload: &Binary,
) -> Result<(), ContractError> {
    if info.sender != config.gateway {
        return Err(ContractError::Unauthorized {});
    }
    if source_chain != config.source_chain || source_address != config.source_address {
        return Err(ContractError::InvalidSourceChain {});
    }

    let res: gateway::IsApprovedResponse = deps.querier.query_wasm_smart(
        config.gateway.clone(),
        &gateway::QueryMsg::IsApproved {
            command_id: command_id.clone(),
            source_chain: source_chain.to_string(),
            source_address: source_address.to_string(),
            payload: payload.clone(),
        },
    )?;
    if !res.approved {
        return Err(ContractError::NotApprovedByGateway {});
    }
    Ok(())
}

fn dispatch_stake(
    mut deps: DepsMut,
    env: Env,
    info: MessageInfo,
    config: Config,
    action_id: u64,
    symbol: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    match try_stake(&mut deps, &env, &info, &config, &symbol, amount) {
        Ok(outcome) => {
            let (reinit_unstake_id, completed_amount) = completed_reply_parts(&outcome.pipeline);
            let payload = encode_response_payload(
                ActionType::Stake,
                Status::Success,
                action_id,
                reinit_unstake_id,
                outcome.lp_units,
            );
            Ok(Response::new()
                .add_submessages(outcome.pipeline.messages)
                .add_submessages(outcome.messages)
                .add_message(reply_msg(&config, payload, completed_amount)?)
                .add_attribute("action", "execute_stake")
                .add_attribute("action_id", action_id.to_string())
                .add_events(outcome.pipeline.events)
                .add_events(outcome.events))
        }
        Err(err) => fail_response(&config, ActionType::Stake, action_id, info.funds, symbol, err),
    }
}

fn dispatch_unstake(
    mut deps: DepsMut,
    env: Env,
    config: Config,
    unstake_id: u64,
    lp_units: Uint128,
) -> Result<Response, ContractError> {
    match try_unstake(&mut deps, &env, &config, unstake_id, lp_units) {
        Ok(outcome) => {
            let (reinit_unstake_id, completed_amount) = completed_reply_parts(&outcome.pipeline);
            // the lending source settles in place and its funds travel with
            // this very reply; a pipelined unstake reports only the id for
            // now and pays out at stage-2 completion
            let amount_context = outcome.released.unwrap_or(completed_amount);
            let payload = encode_response_payload(
                ActionType::Unstake,
                Status::Success,
                unstake_id,
                reinit_unstake_id,
                amount_context,
            );
            Ok(Response::new()
                .add_submessages(outcome.pipeline.messages)
                .add_submessages(outcome.messages)
                .add_message(reply_msg(&config, payload, amount_context)?)
                .add_attribute("action", "execute_unstake")
                .add_attribute("unstake_id", unstake_id.to_string())
                .add_events(outcome.pipeline.events)
                .add_events(outcome.events))
        }
        Err(err) => {
            let symbol = config.deposit_symbol.clone();
            fail_response(&config, ActionType::Unstake, unstake_id, vec![], symbol, err)
        }
    }
}

/// Shared by the gateway-carried reinit action and the local trigger: a
/// cross-chain reply is produced only when a withdrawal actually completed
fn reinit_response(mut deps: DepsMut, env: Env, config: Config) -> Result<Response, ContractError> {
    let pipeline = advance_pipeline(&mut deps, &env, &config)?;

    let mut response = Response::new()
        .add_attribute("action", "reinit")
        .add_submessages(pipeline.messages);

    if let Some(completed) = &pipeline.completed {
        let payload = encode_response_payload(
            ActionType::Reinit,
            Status::Success,
            0,
            completed.unstake_id,
            completed.amount,
        );
        response = response.add_message(reply_msg(&config, payload, completed.amount)?);
    }

    Ok(response.add_events(pipeline.events))
}

fn completed_reply_parts(pipeline: &PipelineOutcome) -> (u64, Uint128) {
    match &pipeline.completed {
        Some(completed) => (completed.unstake_id, completed.amount),
        None => (0, Uint128::zero()),
    }
}

/// Reply to the remote chain, with the given funds travelling along when
/// there are any
fn reply_msg(
    config: &Config,
    payload: Binary,
    token_amount: Uint128,
) -> Result<CosmosMsg, ContractError> {
    let msg = if token_amount.is_zero() {
        WasmMsg::Execute {
            contract_addr: config.gateway.to_string(),
            msg: to_binary(&gateway::ExecuteMsg::CallContract {
                destination_chain: config.source_chain.clone(),
                destination_address: config.source_address.clone(),
                payload,
            })?,
            funds: vec![],
        }
    } else {
        WasmMsg::Execute {
            contract_addr: config.gateway.to_string(),
            msg: to_binary(&gateway::ExecuteMsg::CallContractWithToken {
                destination_chain: config.source_chain.clone(),
                destination_address: config.source_address.clone(),
                payload,
                symbol: config.deposit_symbol.clone(),
                amount: token_amount,
            })?,
            funds: vec![Coin {
                denom: config.deposit_denom.clone(),
                amount: token_amount,
            }],
        }
    };
    Ok(msg.into())
}

/// A failed stake or unstake still completes the message delivery: the error
/// is reported back as a failure reply, with any received tokens refunded.
fn fail_response(
    config: &Config,
    action_type: ActionType,
    action_id: u64,
    refund: Vec<Coin>,
    symbol: String,
    err: ContractError,
) -> Result<Response, ContractError> {
    let payload = encode_response_payload(
        action_type,
        Status::Fail,
        action_id,
        0,
        Uint128::zero(),
    );

    let refund_amount: Uint128 = refund.iter().map(|coin| coin.amount).sum();
    let reply: CosmosMsg = if refund_amount.is_zero() {
        WasmMsg::Execute {
            contract_addr: config.gateway.to_string(),
            msg: to_binary(&gateway::ExecuteMsg::CallContract {
                destination_chain: config.source_chain.clone(),
                destination_address: config.source_address.clone(),
                payload,
            })?,
            funds: vec![],
        }
        .into()
    } else {
        WasmMsg::Execute {
            contract_addr: config.gateway.to_string(),
            msg: to_binary(&gateway::ExecuteMsg::CallContractWithToken {
                destination_chain: config.source_chain.clone(),
                destination_address: config.source_address.clone(),
                payload,
                symbol,
                amount: refund_amount,
            })?,
            funds: refund,
        }
        .into()
    };

    Ok(Response::new()
        .add_message(reply)
        .add_attribute("action", "request_failed")
        .add_event(
            Event::new("request_failed")
                .add_attribute("action_type", action_type.as_str())
                .add_attribute("action_id", action_id.to_string())
                .add_attribute("error", err.to_string()),
        ))
}
