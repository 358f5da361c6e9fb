use cosmwasm_std::{to_binary, Coin, Deps, DepsMut, Env, Event, SubMsg, Uint128, WasmMsg};

use yield_protocol::liquid_staking;
use yield_protocol::restaking;
use yield_protocol::router::YieldSource;

use crate::ledger;
use crate::reply::REQUEST_WITHDRAWAL_REPLY_ID;
use crate::state::{
    add_claimed, clear_claimed, Config, PendingLstWithdrawals, RestakingWithdrawal, LST_QUEUE,
    PENDING_LST, RESTAKING_QUEUE,
};
use crate::ContractError;

/// A withdrawal that finished its last pipeline stage in this call. This is
/// the only externally reportable outcome of an advance.
pub struct CompletedUnstake {
    pub unstake_id: u64,
    pub amount: Uint128,
}

#[derive(Default)]
pub struct PipelineOutcome {
    pub completed: Option<CompletedUnstake>,
    pub messages: Vec<SubMsg>,
    pub events: Vec<Event>,
}

/// Advance both withdrawal stages by at most one ready head element each.
/// Never fails on a not-ready or unreachable head: the element stays in
/// place and the next call retries it. Elements behind the head are not
/// inspected, so settlement keeps the enqueue order even when later requests
/// finalize first.
pub fn advance_pipeline(
    deps: &mut DepsMut,
    env: &Env,
    config: &Config,
) -> Result<PipelineOutcome, ContractError> {
    let mut out = PipelineOutcome::default();

    if config.yield_source == YieldSource::LendingPool {
        // lending withdrawals settle synchronously, nothing is ever queued
        return Ok(out);
    }

    advance_restaking_stage(deps, env, config, &mut out)?;
    advance_lst_stage(deps, config, &mut out)?;

    Ok(out)
}

/// Stage 1: a matured restaking withdrawal is completed and its proceeds are
/// handed to the liquid-staking protocol, split across as many requests as
/// the per-request ceiling demands.
fn advance_restaking_stage(
    deps: &mut DepsMut,
    env: &Env,
    config: &Config,
    out: &mut PipelineOutcome,
) -> Result<(), ContractError> {
    let head = match RESTAKING_QUEUE.peek_front(deps.storage)? {
        Some((_, head)) if env.block.height >= head.ready_at_block => head,
        _ => return Ok(()),
    };

    // all collaborator reads happen before the pop so an unreachable
    // collaborator leaves the queue untouched
    let (amount, chunks) = match prepare_lst_requests(deps.as_ref(), config, &head) {
        Ok(prepared) => prepared,
        Err(_) => return Ok(()),
    };

    let _ = RESTAKING_QUEUE.pop_front(deps.storage)?;

    out.messages.push(SubMsg::new(WasmMsg::Execute {
        contract_addr: config.restaking.to_string(),
        msg: to_binary(&restaking::ExecuteMsg::CompleteWithdrawal {
            request_id: head.request_id,
        })?,
        funds: vec![],
    }));

    if chunks.is_empty() {
        // the shares matured to nothing; close the withdrawal out here since
        // there is no liquid-staking leg left to report it
        out.completed = Some(CompletedUnstake {
            unstake_id: head.unstake_id,
            amount: Uint128::zero(),
        });
    } else {
        PENDING_LST.save(
            deps.storage,
            &PendingLstWithdrawals {
                unstake_id: head.unstake_id,
                amounts: chunks.clone(),
            },
        )?;
        for chunk in &chunks {
            out.messages.push(SubMsg::reply_on_success(
                WasmMsg::Execute {
                    contract_addr: config.liquid_staking.to_string(),
                    msg: to_binary(&liquid_staking::ExecuteMsg::RequestWithdrawal {})?,
                    funds: vec![Coin {
                        denom: config.lst_denom.clone(),
                        amount: *chunk,
                    }],
                },
                REQUEST_WITHDRAWAL_REPLY_ID,
            ));
        }
    }

    out.events.push(
        Event::new("restaking_withdraw_complete")
            .add_attribute("unstake_id", head.unstake_id.to_string())
            .add_attribute("request_id", head.request_id.to_string())
            .add_attribute("shares", head.shares)
            .add_attribute("amount", amount)
            .add_attribute("requests", chunks.len().to_string()),
    );

    Ok(())
}

/// Stage 2: a finalized liquid-staking request is claimed. Partial claims of
/// a split withdrawal accumulate until the closing chunk lands.
fn advance_lst_stage(
    deps: &mut DepsMut,
    config: &Config,
    out: &mut PipelineOutcome,
) -> Result<(), ContractError> {
    let head = match LST_QUEUE.peek_front(deps.storage)? {
        Some((_, head)) => head,
        None => return Ok(()),
    };

    let status: liquid_staking::WithdrawalStatusResponse = match deps.querier.query_wasm_smart(
        config.liquid_staking.clone(),
        &liquid_staking::QueryMsg::WithdrawalStatus {
            request_id: head.request_id,
        },
    ) {
        Ok(status) => status,
        Err(_) => return Ok(()),
    };
    if !status.is_finalized {
        return Ok(());
    }

    let _ = LST_QUEUE.pop_front(deps.storage)?;

    out.messages.push(SubMsg::new(WasmMsg::Execute {
        contract_addr: config.liquid_staking.to_string(),
        msg: to_binary(&liquid_staking::ExecuteMsg::Claim {
            request_id: head.request_id,
        })?,
        funds: vec![],
    }));

    let total = add_claimed(deps.storage, head.unstake_id, status.claimable)?;
    if head.last {
        clear_claimed(deps.storage, head.unstake_id);
        out.completed = Some(CompletedUnstake {
            unstake_id: head.unstake_id,
            amount: total,
        });
        out.events.push(
            Event::new("unstake_complete")
                .add_attribute("unstake_id", head.unstake_id.to_string())
                .add_attribute("amount", total),
        );
    }

    Ok(())
}

fn prepare_lst_requests(
    deps: Deps,
    config: &Config,
    head: &RestakingWithdrawal,
) -> Result<(Uint128, Vec<Uint128>), ContractError> {
    let amount = ledger::shares_to_underlying(deps, config, head.shares)?;
    let limits: liquid_staking::WithdrawalLimitsResponse = deps.querier.query_wasm_smart(
        config.liquid_staking.clone(),
        &liquid_staking::QueryMsg::WithdrawalLimits {},
    )?;
    Ok((amount, split_amount(amount, limits.max_amount)))
}

/// Split `amount` into the minimal number of chunks not exceeding `max`,
/// sized within one unit of each other and summing exactly to `amount`
pub fn split_amount(amount: Uint128, max: Uint128) -> Vec<Uint128> {
    let total = amount.u128();
    if total == 0 {
        return vec![];
    }
    let cap = max.u128().max(1);
    let count = (total + cap - 1) / cap;
    let base = total / count;
    let remainder = total % count;

    (0..count)
        .map(|i| {
            if i < remainder {
                Uint128::new(base + 1)
            } else {
                Uint128::new(base)
            }
        })
        .collect()
}
