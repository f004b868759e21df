//! Engine configuration.
//!
//! Every tuning number the controller reads at runtime lives here, with
//! defaults taken from `core::constants`. Configs are stored as JSON and
//! missing fields fall back to their defaults.

use super::constants::*;
use super::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Tick interval at normal speed, in milliseconds
    pub normal_interval_ms: u64,

    /// Tick interval at fast speed, in milliseconds
    pub fast_interval_ms: u64,

    /// Battle log entries kept after each commit
    pub max_log_entries: usize,

    /// Chance that a tick with at least one kill drops an item
    pub tick_drop_chance: f64,

    /// Chance per defeated enemy during the level-completion loot pass
    pub completion_drop_chance: f64,

    /// Experience awarded per kill is drawn from `kill_xp_min..=kill_xp_max`
    pub kill_xp_min: u32,
    pub kill_xp_max: u32,

    /// Slots in the reference inventory
    pub inventory_slots: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            normal_interval_ms: NORMAL_TICK_INTERVAL_MS,
            fast_interval_ms: FAST_TICK_INTERVAL_MS,
            max_log_entries: MAX_LOG_ENTRIES,
            tick_drop_chance: TICK_DROP_CHANCE,
            completion_drop_chance: COMPLETION_DROP_CHANCE_PER_ENEMY,
            kill_xp_min: KILL_XP_MIN,
            kill_xp_max: KILL_XP_MAX,
            inventory_slots: INVENTORY_SLOTS,
        }
    }
}

impl EngineConfig {
    /// Load and validate a config from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.normal_interval_ms == 0 || self.fast_interval_ms == 0 {
            return Err(EngineError::InvalidConfig(
                "tick intervals must be non-zero".to_string(),
            ));
        }
        if self.max_log_entries == 0 {
            return Err(EngineError::InvalidConfig(
                "max_log_entries must be at least 1".to_string(),
            ));
        }
        for (name, chance) in [
            ("tick_drop_chance", self.tick_drop_chance),
            ("completion_drop_chance", self.completion_drop_chance),
        ] {
            if !(0.0..=1.0).contains(&chance) {
                return Err(EngineError::InvalidConfig(format!(
                    "{name} must be within [0, 1], got {chance}"
                )));
            }
        }
        if self.kill_xp_min > self.kill_xp_max {
            return Err(EngineError::InvalidConfig(format!(
                "kill_xp_min ({}) exceeds kill_xp_max ({})",
                self.kill_xp_min, self.kill_xp_max
            )));
        }
        Ok(())
    }

    pub fn normal_interval(&self) -> Duration {
        Duration::from_millis(self.normal_interval_ms)
    }

    pub fn fast_interval(&self) -> Duration {
        Duration::from_millis(self.fast_interval_ms)
    }
}
