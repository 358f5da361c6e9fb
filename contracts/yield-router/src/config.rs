use cosmwasm_std::{
    attr, to_binary, BankMsg, Coin, CosmosMsg, DepsMut, MessageInfo, Response, Uint128, WasmMsg,
};
use cw20::Cw20ExecuteMsg;

use crate::state::CONFIG;
use crate::ContractError;

/// Owner-gated configuration updates, including the stake/unstake
/// allow-listing of the deposit asset
pub fn execute_update_config(
    deps: DepsMut,
    info: MessageInfo,
    owner: Option<String>,
    source_chain: Option<String>,
    source_address: Option<String>,
    is_stake_enabled: Option<bool>,
    is_unstake_enabled: Option<bool>,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized {});
    }

    if let Some(owner) = owner {
        config.owner = deps.api.addr_validate(&owner)?;
    }
    if let Some(source_chain) = source_chain {
        config.source_chain = source_chain;
    }
    if let Some(source_address) = source_address {
        config.source_address = source_address;
    }
    if let Some(enabled) = is_stake_enabled {
        config.is_stake_enabled = enabled;
    }
    if let Some(enabled) = is_unstake_enabled {
        config.is_unstake_enabled = enabled;
    }

    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new().add_attributes(vec![attr("action", "update_config")]))
}

/// Send stray native funds to `recipient`; owner only
pub fn execute_rescue_funds(
    deps: DepsMut,
    info: MessageInfo,
    denom: String,
    amount: Uint128,
    recipient: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized {});
    }
    if amount.is_zero() {
        return Err(ContractError::ZeroAmount {});
    }
    let recipient = deps.api.addr_validate(&recipient)?;

    Ok(Response::new()
        .add_message(CosmosMsg::Bank(BankMsg::Send {
            to_address: recipient.to_string(),
            amount: vec![Coin { denom, amount }],
        }))
        .add_attributes(vec![
            attr("action", "rescue_funds"),
            attr("recipient", recipient),
            attr("amount", amount),
        ]))
}

/// Send stray cw20 tokens to `recipient`; owner only
pub fn execute_rescue_cw20(
    deps: DepsMut,
    info: MessageInfo,
    token: String,
    amount: Uint128,
    recipient: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized {});
    }
    if amount.is_zero() {
        return Err(ContractError::ZeroAmount {});
    }
    let token = deps.api.addr_validate(&token)?;
    let recipient = deps.api.addr_validate(&recipient)?;

    Ok(Response::new()
        .add_message(CosmosMsg::Wasm(WasmMsg::Execute {
            contract_addr: token.to_string(),
            msg: to_binary(&Cw20ExecuteMsg::Transfer {
                recipient: recipient.to_string(),
                amount,
            })?,
            funds: vec![],
        }))
        .add_attributes(vec![
            attr("action", "rescue_cw20"),
            attr("token", token),
            attr("recipient", recipient),
            attr("amount", amount),
        ]))
}
