pub mod gateway;
pub mod lending;
pub mod liquid_staking;
pub mod restaking;
pub mod router;
