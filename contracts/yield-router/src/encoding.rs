use std::convert::TryInto;

use cosmwasm_std::{Binary, Uint128};

use crate::ContractError;

/// Inbound actions, carried in the low byte of the 32-byte payload word
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActionType {
    Stake = 0,
    Unstake = 1,
    Reinit = 2,
}

impl ActionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::Stake => "stake",
            ActionType::Unstake => "unstake",
            ActionType::Reinit => "reinit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Status {
    Success = 0,
    Fail = 1,
}

#[derive(Debug, PartialEq)]
pub struct ActionPayload {
    pub action_type: ActionType,
    pub action_id: u64,
    pub amount: Uint128,
}

const ACTION_PAYLOAD_LEN: usize = 32;

/// Decode an inbound action word. The layout is a big-endian `uint256`
/// packed low-to-high:
///    1 byte   - ActionType
///    8 bytes  - ActionId
///    16 bytes - Amount
///    7 bytes  - not used
pub fn decode_action_payload(payload: &[u8]) -> Result<ActionPayload, ContractError> {
    if payload.len() != ACTION_PAYLOAD_LEN {
        return Err(ContractError::InvalidMessagePayload {});
    }

    let action_type = match payload[31] {
        0 => ActionType::Stake,
        1 => ActionType::Unstake,
        2 => ActionType::Reinit,
        _ => return Err(ContractError::InvalidActionType {}),
    };
    let action_id = u64::from_be_bytes(payload[23..31].try_into().unwrap());
    let amount = Uint128::new(u128::from_be_bytes(payload[7..23].try_into().unwrap()));

    Ok(ActionPayload {
        action_type,
        action_id,
        amount,
    })
}

/// Encode an outbound reply. All three actions share one layout:
///    1 byte   - ActionType
///    1 byte   - Status
///    8 bytes  - ActionId
///    8 bytes  - ReinitUnstakeId
///    16 bytes - Amount (minted LP units for stake, withdrawn amount context
///               for unstake and reinit)
pub fn encode_response_payload(
    action_type: ActionType,
    status: Status,
    action_id: u64,
    reinit_unstake_id: u64,
    amount: Uint128,
) -> Binary {
    let payload: Vec<u8> = [action_type as u8, status as u8]
        .iter()
        .copied()
        .chain(action_id.to_be_bytes().iter().copied())
        .chain(reinit_unstake_id.to_be_bytes().iter().copied())
        .chain(amount.u128().to_be_bytes().iter().copied())
        .collect();

    Binary::from(payload)
}
