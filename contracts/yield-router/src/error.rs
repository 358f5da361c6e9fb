use cosmwasm_std::{StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Unauthorized")]
    Unauthorized {},

    #[error("Zero amount")]
    ZeroAmount {},

    #[error("Unknown token: {0}")]
    UnknownToken(String),

    #[error("Token is not allowed: {0}")]
    NotAllowedToken(String),

    #[error("Cannot unstake more than the outstanding LP supply")]
    InvalidUnstakeAmount {},

    #[error("Withdrawal amount is below the minimum of {min}")]
    LowWithdrawalAmount { min: Uint128 },

    #[error("Message has invalid action type")]
    InvalidActionType {},

    #[error("Invalid message payload")]
    InvalidMessagePayload {},

    #[error("Message does not originate from the configured source chain")]
    InvalidSourceChain {},

    #[error("Message is not approved by the gateway")]
    NotApprovedByGateway {},

    #[error("Wrong funds attached: {actual}, expected: {expected}")]
    WrongFundsAmount { expected: Uint128, actual: Uint128 },

    #[error("Restaking position is delegated to {actual}, expected {expected}")]
    WrongOperator { expected: String, actual: String },

    #[error("Unrecognized reply id: {0}")]
    UnrecognizedReply(u64),

    #[error("Failure response from submsg: {0}")]
    SubMsgFailure(String),

    #[error("Invalid reply from sub-message {id}: {err}")]
    ReplyParseFailure { id: u64, err: String },
}
