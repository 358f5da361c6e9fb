use cosmwasm_std::{Deps, StdError, StdResult};

use yield_protocol::router::{
    ConfigResponse, LstElementResponse, PositionResponse, QueueResponse, RestakingElementResponse,
};

use crate::state::{CONFIG, LST_QUEUE, POSITION, RESTAKING_QUEUE};

pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(config.as_res())
}

pub fn query_position(deps: Deps) -> StdResult<PositionResponse> {
    let position = POSITION.load(deps.storage)?;
    Ok(PositionResponse {
        total_shares: position.total_shares,
        total_lp_units: position.total_lp_units,
    })
}

pub fn query_restaking_queue(deps: Deps) -> StdResult<QueueResponse> {
    let range = RESTAKING_QUEUE.range(deps.storage)?;
    Ok(QueueResponse {
        start: range.start,
        end: range.end,
        length: range.length(),
    })
}

pub fn query_lst_queue(deps: Deps) -> StdResult<QueueResponse> {
    let range = LST_QUEUE.range(deps.storage)?;
    Ok(QueueResponse {
        start: range.start,
        end: range.end,
        length: range.length(),
    })
}

pub fn query_restaking_element(deps: Deps, index: u64) -> StdResult<RestakingElementResponse> {
    let element = RESTAKING_QUEUE
        .get(deps.storage, index)?
        .ok_or_else(|| StdError::not_found("restaking withdrawal"))?;
    Ok(RestakingElementResponse {
        unstake_id: element.unstake_id,
        request_id: element.request_id,
        shares: element.shares,
        ready_at_block: element.ready_at_block,
    })
}

pub fn query_lst_element(deps: Deps, index: u64) -> StdResult<LstElementResponse> {
    let element = LST_QUEUE
        .get(deps.storage, index)?
        .ok_or_else(|| StdError::not_found("liquid staking withdrawal"))?;
    Ok(LstElementResponse {
        unstake_id: element.unstake_id,
        request_id: element.request_id,
        amount: element.amount,
        last: element.last,
    })
}
