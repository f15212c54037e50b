//! Simulator for a hybrid proof-of-work / hive-mined chain whose bee hash
//! target follows an EMA retarget rule.

pub mod api;
pub mod blockchain;
pub mod error;
pub mod hive;
pub mod sim;

pub use error::ConfigError;
pub use sim::{RunSummary, SimConfig, SimParams, Simulation};
