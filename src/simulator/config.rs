//! Simulation configuration.

use crate::combat::hero::known_heroes;
use crate::core::config::EngineConfig;

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of simulation runs to perform
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Maximum ticks per run before timeout
    pub max_ticks_per_run: u64,

    /// A run succeeds once the party reaches this chapter
    pub target_chapter: u32,

    /// Heroes fielded in every run
    pub roster: Vec<String>,

    /// Equip drops that beat what a hero is wearing
    pub auto_equip: bool,

    /// Push to the next level after each clear instead of grinding
    pub auto_advance: bool,

    /// Engine tuning under test
    pub engine: EngineConfig,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per run)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 100,
            seed: None,
            max_ticks_per_run: 20_000,
            target_chapter: 3,
            roster: known_heroes().map(str::to_string).collect(),
            auto_equip: true,
            auto_advance: true,
            engine: EngineConfig::default(),
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Small batch for a quick balance check
    pub fn quick() -> Self {
        Self {
            num_runs: 20,
            max_ticks_per_run: 5_000,
            target_chapter: 2,
            ..Default::default()
        }
    }

    /// Many runs with nothing equipped, to read raw drop rates
    pub fn loot_analysis(num_runs: u32) -> Self {
        Self {
            num_runs,
            auto_equip: false,
            ..Default::default()
        }
    }

    /// Single hero, to probe how far an unsupported party gets
    pub fn solo(hero: &str) -> Self {
        Self {
            roster: vec![hero.to_string()],
            ..Default::default()
        }
    }
}
