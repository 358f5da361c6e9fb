use cosmwasm_std::Uint128;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Lending-market collaborator. The market holds a yield-bearing balance for
/// each depositor which grows in place; `Balance` must therefore be read in
/// the same atomic step as any computation built on it.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ExecuteMsg {
    /// Supply the attached funds to the market
    Deposit {},
    /// Redeem `amount` of underlying back to the caller
    Withdraw { denom: String, amount: Uint128 },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum QueryMsg {
    /// Live yield-bearing balance of `address`, in underlying units
    Balance { address: String, denom: String },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct BalanceResponse {
    pub balance: Uint128,
}
