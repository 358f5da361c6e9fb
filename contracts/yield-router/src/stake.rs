use cosmwasm_std::{to_binary, Coin, DepsMut, Env, Event, MessageInfo, StdError, SubMsg, Uint128, WasmMsg};
use cw0::must_pay;

use yield_protocol::lending;
use yield_protocol::restaking;
use yield_protocol::router::YieldSource;

use crate::ledger;
use crate::reinit::{advance_pipeline, PipelineOutcome};
use crate::state::{Config, POSITION};
use crate::ContractError;

pub struct StakeOutcome {
    pub lp_units: Uint128,
    pub pipeline: PipelineOutcome,
    pub messages: Vec<SubMsg>,
    pub events: Vec<Event>,
}

/// Credit a deposit arriving through the gateway: advance the withdrawal
/// pipeline, mint LP units at the current exchange rate and route the funds
/// into the configured yield source.
pub fn try_stake(
    deps: &mut DepsMut,
    env: &Env,
    info: &MessageInfo,
    config: &Config,
    symbol: &str,
    amount: Uint128,
) -> Result<StakeOutcome, ContractError> {
    if amount.is_zero() {
        return Err(ContractError::ZeroAmount {});
    }
    if symbol != config.deposit_symbol {
        return Err(ContractError::UnknownToken(symbol.to_string()));
    }
    if !config.is_stake_enabled {
        return Err(ContractError::NotAllowedToken(symbol.to_string()));
    }

    let paid = must_pay(info, &config.deposit_denom)
        .map_err(|error| StdError::generic_err(format!("{}", error)))?;
    if paid != amount {
        return Err(ContractError::WrongFundsAmount {
            expected: amount,
            actual: paid,
        });
    }

    let mut position = POSITION.load(deps.storage)?;

    // rate snapshot is taken before the deposit mutates anything; completing
    // withdrawals does not move it since their shares were burned up front
    let balance = ledger::live_balance(deps.as_ref(), env, config, &position)?;
    let shares_gained = match config.yield_source {
        YieldSource::Restaking => ledger::underlying_to_restaking_shares(deps.as_ref(), config, amount)?,
        YieldSource::LendingPool => {
            ledger::underlying_to_scaled_units(amount, position.total_shares, balance)
        }
    };

    let pipeline = advance_pipeline(deps, env, config)?;

    let lp_units = ledger::deposit(&mut position, amount, shares_gained, balance)?;
    POSITION.save(deps.storage, &position)?;

    let deposit_funds = vec![Coin {
        denom: config.deposit_denom.clone(),
        amount,
    }];
    let deposit_msg = match config.yield_source {
        YieldSource::Restaking => SubMsg::new(WasmMsg::Execute {
            contract_addr: config.restaking.to_string(),
            msg: to_binary(&restaking::ExecuteMsg::Deposit {
                strategy: config.restaking_strategy.clone(),
            })?,
            funds: deposit_funds,
        }),
        YieldSource::LendingPool => SubMsg::new(WasmMsg::Execute {
            contract_addr: config.lending_pool.to_string(),
            msg: to_binary(&lending::ExecuteMsg::Deposit {})?,
            funds: deposit_funds,
        }),
    };

    Ok(StakeOutcome {
        lp_units,
        pipeline,
        messages: vec![deposit_msg],
        events: vec![Event::new("stake")
            .add_attribute("amount", amount)
            .add_attribute("shares", shares_gained)
            .add_attribute("lp_units", lp_units)],
    })
}
