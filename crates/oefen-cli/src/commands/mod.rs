pub mod coverage;
pub mod dup_gate;
pub mod patch;
pub mod priority;
pub mod rebalance;
pub mod validate;
