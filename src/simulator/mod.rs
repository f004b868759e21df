//! Battle balance simulator for Monte Carlo analysis.
//!
//! Runs many seeded playthroughs through `BattleController` to see:
//! - how far a roster gets before the wipe/restart cycle stalls it
//! - how many ticks each chapter takes
//! - how drops distribute across rarities at the tuned chances

mod config;
mod report;
mod runner;

pub use config::SimConfig;
pub use report::SimReport;
pub use runner::{run_simulation, simulate_single_run, RunStats};
