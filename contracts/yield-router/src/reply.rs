use cosmwasm_std::{from_binary, Binary, ContractResult, DepsMut, Event, Reply, Response};

use yield_protocol::liquid_staking::RequestWithdrawalResponse;
use yield_protocol::restaking::QueueWithdrawalResponse;

use crate::state::{LstWithdrawal, RestakingWithdrawal, LST_QUEUE, PENDING_LST, PENDING_RESTAKING, RESTAKING_QUEUE};
use crate::ContractError;

pub const QUEUE_WITHDRAWAL_REPLY_ID: u64 = 1;
pub const REQUEST_WITHDRAWAL_REPLY_ID: u64 = 2;

fn reply_data(msg: &Reply) -> Result<Binary, ContractError> {
    match &msg.result {
        ContractResult::Ok(response) => {
            response
                .data
                .clone()
                .ok_or_else(|| ContractError::ReplyParseFailure {
                    id: msg.id,
                    err: "missing response data".to_string(),
                })
        }
        ContractResult::Err(err) => Err(ContractError::SubMsgFailure(err.clone())),
    }
}

/// The restaking protocol accepted a queued withdrawal; record the stage-1
/// queue element under the id it assigned.
pub fn handle_queue_withdrawal_reply(deps: DepsMut, msg: Reply) -> Result<Response, ContractError> {
    let data = reply_data(&msg)?;
    let response: QueueWithdrawalResponse =
        from_binary(&data).map_err(|err| ContractError::ReplyParseFailure {
            id: msg.id,
            err: err.to_string(),
        })?;

    let pending = PENDING_RESTAKING.load(deps.storage)?;
    PENDING_RESTAKING.remove(deps.storage);

    let element = RestakingWithdrawal {
        unstake_id: pending.unstake_id,
        request_id: response.request_id,
        shares: pending.shares,
        ready_at_block: pending.ready_at_block,
    };
    let index = RESTAKING_QUEUE.push_back(deps.storage, &element)?;

    Ok(Response::new().add_event(
        Event::new("restaking_withdraw_queued")
            .add_attribute("unstake_id", element.unstake_id.to_string())
            .add_attribute("request_id", element.request_id.to_string())
            .add_attribute("index", index.to_string())
            .add_attribute("ready_at_block", element.ready_at_block.to_string()),
    ))
}

/// The liquid-staking protocol registered one withdrawal request; consume
/// the next pending chunk, in the order the requests were submitted.
pub fn handle_request_withdrawal_reply(deps: DepsMut, msg: Reply) -> Result<Response, ContractError> {
    let data = reply_data(&msg)?;
    let response: RequestWithdrawalResponse =
        from_binary(&data).map_err(|err| ContractError::ReplyParseFailure {
            id: msg.id,
            err: err.to_string(),
        })?;

    let mut pending = PENDING_LST.load(deps.storage)?;
    if pending.amounts.is_empty() {
        return Err(ContractError::ReplyParseFailure {
            id: msg.id,
            err: "no pending withdrawal chunk".to_string(),
        });
    }
    let amount = pending.amounts.remove(0);
    let last = pending.amounts.is_empty();
    if last {
        PENDING_LST.remove(deps.storage);
    } else {
        PENDING_LST.save(deps.storage, &pending)?;
    }

    let element = LstWithdrawal {
        unstake_id: pending.unstake_id,
        request_id: response.request_id,
        amount,
        last,
    };
    let index = LST_QUEUE.push_back(deps.storage, &element)?;

    Ok(Response::new().add_event(
        Event::new("lst_withdraw_requested")
            .add_attribute("unstake_id", element.unstake_id.to_string())
            .add_attribute("request_id", element.request_id)
            .add_attribute("amount", element.amount)
            .add_attribute("index", index.to_string())
            .add_attribute("last", last.to_string()),
    ))
}
