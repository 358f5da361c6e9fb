#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{to_binary, Binary, Deps, DepsMut, Env, MessageInfo, Reply, Response, StdResult};
use cw2::set_contract_version;

use yield_protocol::restaking;
use yield_protocol::router::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};

use crate::config::{execute_rescue_cw20, execute_rescue_funds, execute_update_config};
use crate::handler::{
    execute_gateway_message, execute_gateway_message_with_token, execute_local_reinit,
};
use crate::query::{
    query_config, query_lst_element, query_lst_queue, query_position, query_restaking_element,
    query_restaking_queue,
};
use crate::reply::{
    handle_queue_withdrawal_reply, handle_request_withdrawal_reply, QUEUE_WITHDRAWAL_REPLY_ID,
    REQUEST_WITHDRAWAL_REPLY_ID,
};
use crate::state::{Config, Position, CONFIG, LST_QUEUE, POSITION, RESTAKING_QUEUE};
use crate::ContractError;

const CONTRACT_NAME: &str = "yield-router";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let config = Config {
        owner: info.sender.clone(),
        gateway: deps.api.addr_validate(&msg.gateway)?,
        lending_pool: deps.api.addr_validate(&msg.lending_pool)?,
        restaking: deps.api.addr_validate(&msg.restaking)?,
        liquid_staking: deps.api.addr_validate(&msg.liquid_staking)?,
        restaking_strategy: msg.restaking_strategy,
        operator: msg.operator,
        source_chain: msg.source_chain,
        source_address: msg.source_address,
        deposit_denom: msg.deposit_denom,
        deposit_symbol: msg.deposit_symbol,
        lst_denom: msg.lst_denom,
        yield_source: msg.yield_source,
        is_stake_enabled: true,
        is_unstake_enabled: true,
    };

    // the restaking position must already be delegated to the expected
    // operator; a router pointed at the wrong operator must not come up
    let delegated: restaking::DelegatedOperatorResponse = deps.querier.query_wasm_smart(
        config.restaking.clone(),
        &restaking::QueryMsg::DelegatedOperator {
            address: env.contract.address.to_string(),
        },
    )?;
    if delegated.operator != config.operator {
        return Err(ContractError::WrongOperator {
            expected: config.operator,
            actual: delegated.operator,
        });
    }

    CONFIG.save(deps.storage, &config)?;
    POSITION.save(deps.storage, &Position::default())?;
    RESTAKING_QUEUE.init(deps.storage)?;
    LST_QUEUE.init(deps.storage)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("owner", info.sender))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Execute {
            command_id,
            source_chain,
            source_address,
            payload,
        } => execute_gateway_message(
            deps,
            env,
            info,
            command_id,
            source_chain,
            source_address,
            payload,
        ),
        ExecuteMsg::ExecuteWithToken {
            command_id,
            source_chain,
            source_address,
            payload,
            symbol,
            amount,
        } => execute_gateway_message_with_token(
            deps,
            env,
            info,
            command_id,
            source_chain,
            source_address,
            payload,
            symbol,
            amount,
        ),
        ExecuteMsg::Reinit {} => execute_local_reinit(deps, env),
        ExecuteMsg::UpdateConfig {
            owner,
            source_chain,
            source_address,
            is_stake_enabled,
            is_unstake_enabled,
        } => execute_update_config(
            deps,
            info,
            owner,
            source_chain,
            source_address,
            is_stake_enabled,
            is_unstake_enabled,
        ),
        ExecuteMsg::RescueFunds {
            denom,
            amount,
            recipient,
        } => execute_rescue_funds(deps, info, denom, amount, recipient),
        ExecuteMsg::RescueCw20 {
            token,
            amount,
            recipient,
        } => execute_rescue_cw20(deps, info, token, amount, recipient),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(deps: DepsMut, _env: Env, msg: Reply) -> Result<Response, ContractError> {
    match msg.id {
        QUEUE_WITHDRAWAL_REPLY_ID => handle_queue_withdrawal_reply(deps, msg),
        REQUEST_WITHDRAWAL_REPLY_ID => handle_request_withdrawal_reply(deps, msg),
        id => Err(ContractError::UnrecognizedReply(id)),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_binary(&query_config(deps)?),
        QueryMsg::Position {} => to_binary(&query_position(deps)?),
        QueryMsg::RestakingQueue {} => to_binary(&query_restaking_queue(deps)?),
        QueryMsg::LstQueue {} => to_binary(&query_lst_queue(deps)?),
        QueryMsg::RestakingQueueElement { index } => {
            to_binary(&query_restaking_element(deps, index)?)
        }
        QueryMsg::LstQueueElement { index } => to_binary(&query_lst_element(deps, index)?),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(_deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    Ok(Response::default())
}
