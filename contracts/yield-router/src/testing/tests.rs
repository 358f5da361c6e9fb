use cosmwasm_std::testing::{mock_env, mock_info};
use cosmwasm_std::{coins, from_binary, to_binary, CosmosMsg, SubMsg, Uint128, WasmMsg};

use yield_protocol::lending;
use yield_protocol::restaking;
use yield_protocol::router::{
    LstElementResponse, QueryMsg, RestakingElementResponse, YieldSource,
};

use crate::contract::{instantiate, query};
use crate::reply::QUEUE_WITHDRAWAL_REPLY_ID;
use crate::testing::mock_querier::{
    mock_dependencies, DEFAULT_WITHDRAWAL_DELAY_BLOCKS, LENDING_ADDR, LIQUID_STAKING_ADDR,
    OPERATOR, RESTAKING_ADDR,
};
use crate::testing::utils::*;
use crate::ContractError;

#[test]
fn proper_initialization() {
    let deps = init(YieldSource::Restaking);

    let config = from_binary::<yield_protocol::router::ConfigResponse>(
        &query(deps.as_ref(), mock_env(), QueryMsg::Config {}).unwrap(),
    )
    .unwrap();
    assert_eq!(config.owner, OWNER);
    assert_eq!(config.source_chain, SOURCE_CHAIN);
    assert_eq!(config.source_address, SOURCE_ADDRESS);
    assert_eq!(config.deposit_denom, DEPOSIT_DENOM);
    assert_eq!(config.yield_source, YieldSource::Restaking);
    assert!(config.is_stake_enabled);
    assert!(config.is_unstake_enabled);

    let position = get_position(&deps);
    assert_eq!(position.total_shares, Uint128::zero());
    assert_eq!(position.total_lp_units, Uint128::zero());

    for queue in &[get_restaking_queue(&deps), get_lst_queue(&deps)] {
        assert_eq!(queue.start, 0);
        assert_eq!(queue.end, 0);
        assert_eq!(queue.length, 0);
    }
}

#[test]
fn instantiate_rejects_wrong_operator() {
    let mut deps = mock_dependencies(&[]);
    deps.querier.set_delegated_operator("rogue0000");

    let err = instantiate(
        deps.as_mut(),
        mock_env(),
        mock_info(OWNER, &[]),
        default_instantiate_msg(YieldSource::Restaking),
    )
    .unwrap_err();
    assert_eq!(
        err,
        ContractError::WrongOperator {
            expected: OPERATOR.to_string(),
            actual: "rogue0000".to_string(),
        }
    );
}

#[test]
fn first_stake_mints_units_one_to_one() {
    let mut deps = init(YieldSource::Restaking);

    let res = execute_stake(&mut deps, &mock_env(), 1, 1_000_000).unwrap();

    // funds are routed into the restaking strategy
    assert_eq!(res.messages.len(), 2);
    assert_eq!(
        res.messages[0],
        SubMsg::new(CosmosMsg::Wasm(WasmMsg::Execute {
            contract_addr: RESTAKING_ADDR.to_string(),
            msg: to_binary(&restaking::ExecuteMsg::Deposit {
                strategy: STRATEGY.to_string(),
            })
            .unwrap(),
            funds: coins(1_000_000, DEPOSIT_DENOM),
        }))
    );

    let (reply, token) = gateway_reply(&res).unwrap();
    assert_eq!(reply.action_type, 0);
    assert_eq!(reply.status, 0);
    assert_eq!(reply.action_id, 1);
    assert_eq!(reply.reinit_unstake_id, 0);
    assert_eq!(reply.amount, 1_000_000);
    assert_eq!(token, None);

    let position = get_position(&deps);
    assert_eq!(position.total_shares, Uint128::new(1_000_000));
    assert_eq!(position.total_lp_units, Uint128::new(1_000_000));
}

#[test]
fn stake_after_rate_appreciation_mints_fewer_units() {
    let mut deps = init(YieldSource::Restaking);
    execute_stake(&mut deps, &mock_env(), 1, 1_000_000).unwrap();

    // the restaking position is now worth twice the deposited amount
    deps.querier.set_restaking_rate(2, 1);

    let res = execute_stake(&mut deps, &mock_env(), 2, 1_000_000).unwrap();
    let (reply, _) = gateway_reply(&res).unwrap();
    assert_eq!(reply.amount, 500_000);

    let position = get_position(&deps);
    assert_eq!(position.total_shares, Uint128::new(1_500_000));
    assert_eq!(position.total_lp_units, Uint128::new(1_500_000));
}

#[test]
fn unstake_burns_units_and_queues_restaking_withdrawal() {
    let mut deps = init(YieldSource::Restaking);
    execute_stake(&mut deps, &mock_env(), 1, 1_000_000).unwrap();

    let res = execute_unstake(&mut deps, &mock_env(), 1, 1_000_000).unwrap();

    // units and shares are burned at initiation, before any funds move
    let position = get_position(&deps);
    assert_eq!(position.total_shares, Uint128::zero());
    assert_eq!(position.total_lp_units, Uint128::zero());

    assert_eq!(res.messages.len(), 2);
    assert_eq!(
        res.messages[0],
        SubMsg::reply_on_success(
            CosmosMsg::Wasm(WasmMsg::Execute {
                contract_addr: RESTAKING_ADDR.to_string(),
                msg: to_binary(&restaking::ExecuteMsg::QueueWithdrawal {
                    shares: Uint128::new(1_000_000),
                })
                .unwrap(),
                funds: vec![],
            }),
            QUEUE_WITHDRAWAL_REPLY_ID,
        )
    );

    let (reply, token) = gateway_reply(&res).unwrap();
    assert_eq!(reply.action_type, 1);
    assert_eq!(reply.status, 0);
    assert_eq!(reply.action_id, 1);
    assert_eq!(reply.amount, 0);
    assert_eq!(token, None);

    // the queue element appears once the restaking protocol assigns its id
    assert_eq!(get_restaking_queue(&deps).length, 0);
    queue_withdrawal_reply(&mut deps, 5);

    let queue = get_restaking_queue(&deps);
    assert_eq!((queue.start, queue.end, queue.length), (0, 1, 1));

    let element: RestakingElementResponse = from_binary(
        &query(
            deps.as_ref(),
            mock_env(),
            QueryMsg::RestakingQueueElement { index: 0 },
        )
        .unwrap(),
    )
    .unwrap();
    assert_eq!(element.unstake_id, 1);
    assert_eq!(element.request_id, 5);
    assert_eq!(element.shares, Uint128::new(1_000_000));
    assert_eq!(
        element.ready_at_block,
        mock_env().block.height + DEFAULT_WITHDRAWAL_DELAY_BLOCKS
    );
}

#[test]
fn unstake_below_minimum_is_rejected_with_failure_reply() {
    let mut deps = init(YieldSource::Restaking);
    execute_stake(&mut deps, &mock_env(), 1, 1_000_000).unwrap();

    deps.querier.set_withdrawal_limits(2_000_000, 1_000_000_000);

    let res = execute_unstake(&mut deps, &mock_env(), 1, 1_000_000).unwrap();
    let (reply, token) = gateway_reply(&res).unwrap();
    assert_eq!(reply.action_type, 1);
    assert_eq!(reply.status, 1);
    assert_eq!(reply.action_id, 1);
    assert_eq!(token, None);
    assert!(has_event(&res, "request_failed"));

    // nothing was burned and nothing was queued
    let position = get_position(&deps);
    assert_eq!(position.total_lp_units, Uint128::new(1_000_000));
    assert_eq!(get_restaking_queue(&deps).length, 0);
}

#[test]
fn two_stage_withdrawal_lifecycle() {
    let mut deps = init(YieldSource::Restaking);
    execute_stake(&mut deps, &mock_env(), 1, 1_000_000).unwrap();
    execute_unstake(&mut deps, &mock_env(), 1, 1_000_000).unwrap();
    queue_withdrawal_reply(&mut deps, 5);

    // before the delay elapses a reinit must change nothing, as often as
    // it is called
    for _ in 0..2 {
        let res = execute_reinit(&mut deps, &mock_env()).unwrap();
        assert!(res.messages.is_empty());
        assert!(res.events.is_empty());
        assert_eq!(get_restaking_queue(&deps).length, 1);
    }

    // past the delay, stage one completes and hands the funds to the
    // liquid-staking protocol; no cross-chain reply yet
    let res = execute_reinit(&mut deps, &env_at(2 * DEFAULT_WITHDRAWAL_DELAY_BLOCKS)).unwrap();
    assert!(has_event(&res, "restaking_withdraw_complete"));
    assert!(gateway_reply(&res).is_none());
    assert_eq!(
        messages_to(&res, RESTAKING_ADDR),
        vec![(
            to_binary(&restaking::ExecuteMsg::CompleteWithdrawal { request_id: 5 }).unwrap(),
            vec![],
        )]
    );
    let lst_requests = messages_to(&res, LIQUID_STAKING_ADDR);
    assert_eq!(lst_requests.len(), 1);
    assert_eq!(lst_requests[0].1, coins(1_000_000, LST_DENOM));

    let queue = get_restaking_queue(&deps);
    assert_eq!((queue.start, queue.end, queue.length), (1, 1, 0));

    request_withdrawal_reply(&mut deps, 77);
    let queue = get_lst_queue(&deps);
    assert_eq!((queue.start, queue.end, queue.length), (0, 1, 1));

    // still waiting on external finalization
    let res = execute_reinit(&mut deps, &env_at(2 * DEFAULT_WITHDRAWAL_DELAY_BLOCKS + 1)).unwrap();
    assert!(res.messages.is_empty());

    // finalized: the claim is released and the completion is reported
    // cross-chain, with the funds travelling along
    deps.querier.set_withdrawal_status(77, true, 1_005_000);
    let res = execute_reinit(&mut deps, &env_at(2 * DEFAULT_WITHDRAWAL_DELAY_BLOCKS + 2)).unwrap();
    assert!(has_event(&res, "unstake_complete"));

    let (reply, token) = gateway_reply(&res).unwrap();
    assert_eq!(reply.action_type, 2);
    assert_eq!(reply.status, 0);
    assert_eq!(reply.reinit_unstake_id, 1);
    assert_eq!(reply.amount, 1_005_000);
    let (symbol, amount, funds) = token.unwrap();
    assert_eq!(symbol, DEPOSIT_SYMBOL);
    assert_eq!(amount, Uint128::new(1_005_000));
    assert_eq!(funds, coins(1_005_000, DEPOSIT_DENOM));

    let queue = get_lst_queue(&deps);
    assert_eq!((queue.start, queue.end, queue.length), (1, 1, 0));

    // nothing left to advance
    let res = execute_reinit(&mut deps, &env_at(2 * DEFAULT_WITHDRAWAL_DELAY_BLOCKS + 3)).unwrap();
    assert!(res.messages.is_empty());
}

#[test]
fn fifo_order_survives_out_of_order_finalization() {
    let mut deps = init(YieldSource::Restaking);
    execute_stake(&mut deps, &mock_env(), 1, 3_000_000).unwrap();

    execute_unstake(&mut deps, &mock_env(), 1, 1_000_000).unwrap();
    queue_withdrawal_reply(&mut deps, 10);
    execute_unstake(&mut deps, &mock_env(), 2, 2_000_000).unwrap();
    queue_withdrawal_reply(&mut deps, 11);

    assert_eq!(get_restaking_queue(&deps).length, 2);
    assert_eq!(get_position(&deps).total_lp_units, Uint128::zero());

    // one stage-one advance per call, in queue order
    execute_reinit(&mut deps, &env_at(200)).unwrap();
    request_withdrawal_reply(&mut deps, 77);
    execute_reinit(&mut deps, &env_at(201)).unwrap();
    request_withdrawal_reply(&mut deps, 88);

    let queue = get_lst_queue(&deps);
    assert_eq!((queue.start, queue.end, queue.length), (0, 2, 2));

    // the second request finalizes first, but the head is not ready, so
    // nothing may complete yet
    deps.querier.set_withdrawal_status(88, true, 2_000_000);
    let res = execute_reinit(&mut deps, &env_at(202)).unwrap();
    assert!(res.messages.is_empty());
    assert_eq!(get_lst_queue(&deps).length, 2);

    // once the head finalizes, completions drain strictly in enqueue order
    deps.querier.set_withdrawal_status(77, true, 1_000_000);
    let res = execute_reinit(&mut deps, &env_at(203)).unwrap();
    let (reply, _) = gateway_reply(&res).unwrap();
    assert_eq!(reply.reinit_unstake_id, 1);
    assert_eq!(reply.amount, 1_000_000);

    let res = execute_reinit(&mut deps, &env_at(204)).unwrap();
    let (reply, _) = gateway_reply(&res).unwrap();
    assert_eq!(reply.reinit_unstake_id, 2);
    assert_eq!(reply.amount, 2_000_000);

    assert_eq!(get_lst_queue(&deps).length, 0);
}

#[test]
fn oversized_withdrawal_splits_into_chained_requests() {
    let mut deps = init(YieldSource::Restaking);
    deps.querier.set_withdrawal_limits(100, 400_000);

    execute_stake(&mut deps, &mock_env(), 1, 1_000_000).unwrap();
    execute_unstake(&mut deps, &mock_env(), 9, 1_000_000).unwrap();
    queue_withdrawal_reply(&mut deps, 5);

    let res = execute_reinit(&mut deps, &env_at(200)).unwrap();
    let requests = messages_to(&res, LIQUID_STAKING_ADDR);
    assert_eq!(requests.len(), 3);

    let amounts: Vec<u128> = requests
        .iter()
        .map(|(_, funds)| {
            assert_eq!(funds.len(), 1);
            assert_eq!(funds[0].denom, LST_DENOM);
            funds[0].amount.u128()
        })
        .collect();
    assert_eq!(amounts.iter().sum::<u128>(), 1_000_000);
    assert!(amounts.iter().all(|amount| *amount <= 400_000));

    for (i, request_id) in [100u128, 101, 102].iter().enumerate() {
        request_withdrawal_reply(&mut deps, *request_id);
        let element: LstElementResponse = from_binary(
            &query(
                deps.as_ref(),
                mock_env(),
                QueryMsg::LstQueueElement { index: i as u64 },
            )
            .unwrap(),
        )
        .unwrap();
        assert_eq!(element.unstake_id, 9);
        assert_eq!(element.request_id, Uint128::new(*request_id));
        assert_eq!(element.amount, Uint128::new(amounts[i]));
        assert_eq!(element.last, i == 2);
    }

    // partial claims accumulate silently; only the closing chunk reports
    deps.querier.set_withdrawal_status(100, true, amounts[0]);
    let res = execute_reinit(&mut deps, &env_at(201)).unwrap();
    assert!(gateway_reply(&res).is_none());
    assert!(!has_event(&res, "unstake_complete"));

    deps.querier.set_withdrawal_status(101, true, amounts[1]);
    deps.querier.set_withdrawal_status(102, true, amounts[2]);
    let res = execute_reinit(&mut deps, &env_at(202)).unwrap();
    assert!(gateway_reply(&res).is_none());

    let res = execute_reinit(&mut deps, &env_at(203)).unwrap();
    let (reply, token) = gateway_reply(&res).unwrap();
    assert_eq!(reply.action_type, 2);
    assert_eq!(reply.reinit_unstake_id, 9);
    assert_eq!(reply.amount, 1_000_000);
    assert!(token.is_some());
}

#[test]
fn stake_drains_ready_pipeline() {
    let mut deps = init(YieldSource::Restaking);
    execute_stake(&mut deps, &mock_env(), 1, 1_000_000).unwrap();
    execute_unstake(&mut deps, &mock_env(), 1, 1_000_000).unwrap();
    queue_withdrawal_reply(&mut deps, 5);

    // a deposit after the delay pulls the matured withdrawal forward
    // before crediting the depositor
    let res = execute_stake(&mut deps, &env_at(200), 2, 1_000_000).unwrap();
    assert!(has_event(&res, "restaking_withdraw_complete"));
    assert_eq!(messages_to(&res, RESTAKING_ADDR).len(), 2); // complete + deposit
    assert_eq!(messages_to(&res, LIQUID_STAKING_ADDR).len(), 1);

    let (reply, token) = gateway_reply(&res).unwrap();
    assert_eq!(reply.action_type, 0);
    assert_eq!(reply.amount, 1_000_000);
    // stage two has not finished, so no completed unstake is folded in
    assert_eq!(reply.reinit_unstake_id, 0);
    assert_eq!(token, None);

    let queue = get_restaking_queue(&deps);
    assert_eq!((queue.start, queue.end, queue.length), (1, 1, 0));
}

#[test]
fn lending_source_round_trip() {
    let mut deps = init(YieldSource::LendingPool);

    let res = execute_stake(&mut deps, &mock_env(), 1, 1_000_000).unwrap();
    assert_eq!(
        messages_to(&res, LENDING_ADDR),
        vec![(
            to_binary(&lending::ExecuteMsg::Deposit {}).unwrap(),
            coins(1_000_000, DEPOSIT_DENOM),
        )]
    );
    let position = get_position(&deps);
    assert_eq!(position.total_shares, Uint128::new(1_000_000));
    assert_eq!(position.total_lp_units, Uint128::new(1_000_000));

    // interest accrued in place; half the units are now worth 750k
    deps.querier.set_lending_balance(1_500_000);

    let res = execute_unstake(&mut deps, &mock_env(), 3, 500_000).unwrap();
    assert_eq!(
        messages_to(&res, LENDING_ADDR),
        vec![(
            to_binary(&lending::ExecuteMsg::Withdraw {
                denom: DEPOSIT_DENOM.to_string(),
                amount: Uint128::new(750_000),
            })
            .unwrap(),
            vec![],
        )]
    );

    // a lending withdrawal settles in the same call, funds attached
    let (reply, token) = gateway_reply(&res).unwrap();
    assert_eq!(reply.action_type, 1);
    assert_eq!(reply.status, 0);
    assert_eq!(reply.action_id, 3);
    assert_eq!(reply.amount, 750_000);
    let (symbol, amount, funds) = token.unwrap();
    assert_eq!(symbol, DEPOSIT_SYMBOL);
    assert_eq!(amount, Uint128::new(750_000));
    assert_eq!(funds, coins(750_000, DEPOSIT_DENOM));

    let position = get_position(&deps);
    assert_eq!(position.total_shares, Uint128::new(500_000));
    assert_eq!(position.total_lp_units, Uint128::new(500_000));

    // nothing ever enters the queues on this source
    assert_eq!(get_restaking_queue(&deps).length, 0);
    assert_eq!(get_lst_queue(&deps).length, 0);
}
