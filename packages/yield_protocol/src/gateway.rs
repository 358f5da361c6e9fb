use cosmwasm_std::{Binary, Uint128};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Cross-chain messaging gateway. Inbound messages are relayed by the gateway
/// contract itself and must additionally be confirmed approved via
/// `IsApproved`; outbound replies go through `CallContract`, or
/// `CallContractWithToken` when funds travel with the payload.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ExecuteMsg {
    CallContract {
        destination_chain: String,
        destination_address: String,
        payload: Binary,
    },
    CallContractWithToken {
        destination_chain: String,
        destination_address: String,
        payload: Binary,
        symbol: String,
        amount: Uint128,
    },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum QueryMsg {
    IsApproved {
        command_id: Binary,
        source_chain: String,
        source_address: String,
        payload: Binary,
    },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct IsApprovedResponse {
    pub approved: bool,
}
