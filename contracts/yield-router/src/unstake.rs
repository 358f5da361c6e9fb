use cosmwasm_std::{to_binary, DepsMut, Env, Event, SubMsg, Uint128, WasmMsg};

use yield_protocol::lending;
use yield_protocol::liquid_staking;
use yield_protocol::restaking;
use yield_protocol::router::YieldSource;

use crate::ledger;
use crate::reinit::{advance_pipeline, PipelineOutcome};
use crate::reply::QUEUE_WITHDRAWAL_REPLY_ID;
use crate::state::{Config, PendingRestakingWithdrawal, PENDING_RESTAKING, POSITION};
use crate::ContractError;

pub struct UnstakeOutcome {
    pub pipeline: PipelineOutcome,
    pub messages: Vec<SubMsg>,
    pub events: Vec<Event>,
    /// Amount released synchronously; only the lending source settles here.
    /// Pipelined withdrawals report their amount at stage-2 completion.
    pub released: Option<Uint128>,
}

/// Start a withdrawal. LP units and the shares backing them are burned
/// immediately, so the same units cannot be unstaked twice; the funds follow
/// later through the pipeline (or at once for the lending source). There is
/// no way to cancel once this returns Ok.
pub fn try_unstake(
    deps: &mut DepsMut,
    env: &Env,
    config: &Config,
    unstake_id: u64,
    lp_units: Uint128,
) -> Result<UnstakeOutcome, ContractError> {
    if lp_units.is_zero() {
        return Err(ContractError::ZeroAmount {});
    }
    if !config.is_unstake_enabled {
        return Err(ContractError::NotAllowedToken(config.deposit_symbol.clone()));
    }

    let mut position = POSITION.load(deps.storage)?;
    if lp_units > position.total_lp_units {
        return Err(ContractError::InvalidUnstakeAmount {});
    }

    match config.yield_source {
        YieldSource::Restaking => {
            let shares = ledger::lp_to_shares(lp_units, position.total_shares, position.total_lp_units);
            let underlying = ledger::shares_to_underlying(deps.as_ref(), config, shares)?;

            let limits: liquid_staking::WithdrawalLimitsResponse = deps.querier.query_wasm_smart(
                config.liquid_staking.clone(),
                &liquid_staking::QueryMsg::WithdrawalLimits {},
            )?;
            if underlying < limits.min_amount {
                return Err(ContractError::LowWithdrawalAmount {
                    min: limits.min_amount,
                });
            }

            let delay: restaking::WithdrawalDelayBlocksResponse = deps.querier.query_wasm_smart(
                config.restaking.clone(),
                &restaking::QueryMsg::WithdrawalDelayBlocks {},
            )?;

            let pipeline = advance_pipeline(deps, env, config)?;

            ledger::withdraw(&mut position, lp_units)?;
            POSITION.save(deps.storage, &position)?;

            // the queue element is written by the reply once the restaking
            // protocol has assigned its withdrawal id
            PENDING_RESTAKING.save(
                deps.storage,
                &PendingRestakingWithdrawal {
                    unstake_id,
                    shares,
                    ready_at_block: env.block.height + delay.blocks,
                },
            )?;

            let queue_msg = SubMsg::reply_on_success(
                WasmMsg::Execute {
                    contract_addr: config.restaking.to_string(),
                    msg: to_binary(&restaking::ExecuteMsg::QueueWithdrawal { shares })?,
                    funds: vec![],
                },
                QUEUE_WITHDRAWAL_REPLY_ID,
            );

            Ok(UnstakeOutcome {
                pipeline,
                messages: vec![queue_msg],
                events: vec![Event::new("unstake")
                    .add_attribute("unstake_id", unstake_id.to_string())
                    .add_attribute("lp_units", lp_units)
                    .add_attribute("shares", shares)],
                released: None,
            })
        }
        YieldSource::LendingPool => {
            let balance = ledger::live_balance(deps.as_ref(), env, config, &position)?;
            let amount = ledger::lp_to_underlying(lp_units, position.total_lp_units, balance);

            let pipeline = advance_pipeline(deps, env, config)?;

            ledger::withdraw(&mut position, lp_units)?;
            POSITION.save(deps.storage, &position)?;

            let withdraw_msg = SubMsg::new(WasmMsg::Execute {
                contract_addr: config.lending_pool.to_string(),
                msg: to_binary(&lending::ExecuteMsg::Withdraw {
                    denom: config.deposit_denom.clone(),
                    amount,
                })?,
                funds: vec![],
            });

            Ok(UnstakeOutcome {
                pipeline,
                messages: vec![withdraw_msg],
                events: vec![Event::new("unstake")
                    .add_attribute("unstake_id", unstake_id.to_string())
                    .add_attribute("lp_units", lp_units)
                    .add_attribute("amount", amount)],
                released: Some(amount),
            })
        }
    }
}
