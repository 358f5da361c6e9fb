use cosmwasm_std::{Deps, Env, StdError, Uint128};

use yield_protocol::lending;
use yield_protocol::restaking;
use yield_protocol::router::YieldSource;

use crate::state::{Config, Position};
use crate::ContractError;

/// Live underlying value of the whole position, read from the configured
/// yield source. This is the balance all conversions are priced against; it
/// moves on its own (rebasing), so callers must query it once and reuse the
/// snapshot for every computation paired with a single mutation.
pub fn live_balance(deps: Deps, env: &Env, config: &Config, position: &Position) -> Result<Uint128, ContractError> {
    match config.yield_source {
        YieldSource::LendingPool => {
            let res: lending::BalanceResponse = deps.querier.query_wasm_smart(
                config.lending_pool.clone(),
                &lending::QueryMsg::Balance {
                    address: env.contract.address.to_string(),
                    denom: config.deposit_denom.clone(),
                },
            )?;
            Ok(res.balance)
        }
        YieldSource::Restaking => shares_to_underlying(deps, config, position.total_shares),
    }
}

/// Current underlying value of `shares` as priced by the restaking protocol
pub fn shares_to_underlying(deps: Deps, config: &Config, shares: Uint128) -> Result<Uint128, ContractError> {
    if shares.is_zero() {
        return Ok(Uint128::zero());
    }
    let res: restaking::SharesToUnderlyingResponse = deps.querier.query_wasm_smart(
        config.restaking.clone(),
        &restaking::QueryMsg::SharesToUnderlying { shares },
    )?;
    Ok(res.amount)
}

/// Shares the restaking protocol would issue for a deposit of `amount`
pub fn underlying_to_restaking_shares(
    deps: Deps,
    config: &Config,
    amount: Uint128,
) -> Result<Uint128, ContractError> {
    let res: restaking::UnderlyingToSharesResponse = deps.querier.query_wasm_smart(
        config.restaking.clone(),
        &restaking::QueryMsg::UnderlyingToShares { amount },
    )?;
    Ok(res.shares)
}

/// Scaled share units a lending-market deposit of `amount` represents at the
/// given balance snapshot; the market itself only reports the rebasing total
pub fn underlying_to_scaled_units(amount: Uint128, total_units: Uint128, balance: Uint128) -> Uint128 {
    if total_units.is_zero() || balance.is_zero() {
        return amount;
    }
    amount.multiply_ratio(total_units, balance)
}

/// LP units minted against a deposit of `amount`, at the pre-deposit balance
/// snapshot. The first deposit mints 1:1; later deposits mint
/// proportionally, rounding down so the depositor never gains on entry.
pub fn underlying_to_lp(amount: Uint128, total_lp: Uint128, balance: Uint128) -> Result<Uint128, ContractError> {
    if amount.is_zero() {
        return Err(ContractError::ZeroAmount {});
    }
    if total_lp.is_zero() || balance.is_zero() {
        return Ok(amount);
    }
    Ok(amount.multiply_ratio(total_lp, balance))
}

/// Underlying value of `lp_units` at the given balance snapshot, rounded down
pub fn lp_to_underlying(lp_units: Uint128, total_lp: Uint128, balance: Uint128) -> Uint128 {
    if total_lp.is_zero() {
        return Uint128::zero();
    }
    lp_units.multiply_ratio(balance, total_lp)
}

/// Internal shares backing `lp_units`. Burning the entire LP supply burns the
/// entire share balance, which keeps the totals zeroed together.
pub fn lp_to_shares(lp_units: Uint128, total_shares: Uint128, total_lp: Uint128) -> Uint128 {
    if total_lp.is_zero() {
        return Uint128::zero();
    }
    lp_units.multiply_ratio(total_shares, total_lp)
}

/// Credit a deposit: mint LP units at the pre-deposit `balance` snapshot and
/// add the source-issued `shares_gained`
pub fn deposit(
    position: &mut Position,
    amount: Uint128,
    shares_gained: Uint128,
    balance: Uint128,
) -> Result<Uint128, ContractError> {
    let lp_units = underlying_to_lp(amount, position.total_lp_units, balance)?;
    position.total_shares += shares_gained;
    position.total_lp_units += lp_units;
    Ok(lp_units)
}

/// Burn `lp_units` and the shares they back; returns the shares burned.
/// Totals reflect the commitment immediately, before any funds move.
pub fn withdraw(position: &mut Position, lp_units: Uint128) -> Result<Uint128, ContractError> {
    if lp_units.is_zero() {
        return Err(ContractError::ZeroAmount {});
    }
    if lp_units > position.total_lp_units {
        return Err(ContractError::InvalidUnstakeAmount {});
    }
    let shares = lp_to_shares(lp_units, position.total_shares, position.total_lp_units);
    position.total_shares = position
        .total_shares
        .checked_sub(shares)
        .map_err(StdError::from)?;
    position.total_lp_units = position
        .total_lp_units
        .checked_sub(lp_units)
        .map_err(StdError::from)?;
    Ok(shares)
}
