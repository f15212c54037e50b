//! Simulation driver: wires the retargeter, the hive solver, the ledger and
//! the bee pool together block by block.

pub mod config;
pub mod driver;
pub mod report;
pub mod telemetry;

pub use config::{SimConfig, SimParams};
pub use driver::{BlockOutcome, Simulation};
pub use report::RunSummary;
pub use telemetry::{BlockSample, NoTelemetry, TelemetryLog, TelemetrySink};
