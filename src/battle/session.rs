//! Battle session state: position, enemy wave, turn counter, log, speed.

use crate::combat::wave::compute_wave;
use crate::core::constants::{BOSS_LEVEL, MAX_LOG_ENTRIES};
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Speed {
    #[default]
    Normal,
    Fast,
}

impl Speed {
    pub fn name(&self) -> &'static str {
        match self {
            Speed::Normal => "Normal",
            Speed::Fast => "Fast",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Speed::Normal => Speed::Fast,
            Speed::Fast => Speed::Normal,
        }
    }
}

/// Most recent battle messages, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleLog {
    entries: VecDeque<String>,
    cap: usize,
}

impl Default for BattleLog {
    fn default() -> Self {
        Self::with_cap(MAX_LOG_ENTRIES)
    }
}

impl BattleLog {
    pub fn with_cap(cap: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            cap: cap.max(1),
        }
    }

    /// Append without trimming. Entries past the cap are dropped on `trim`.
    pub fn push(&mut self, message: impl Into<String>) {
        self.entries.push_back(message.into());
    }

    /// Evict the oldest entries until the log fits its cap.
    pub fn trim(&mut self) {
        while self.entries.len() > self.cap {
            self.entries.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn last(&self) -> Option<&str> {
        self.entries.back().map(String::as_str)
    }
}

/// Cleared `(chapter, level)` keys. Never shrinks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionSet {
    cleared: HashSet<(u32, u32)>,
}

impl CompletionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the key was newly recorded.
    pub fn record(&mut self, chapter: u32, level: u32) -> bool {
        self.cleared.insert((chapter, level))
    }

    pub fn contains(&self, chapter: u32, level: u32) -> bool {
        self.cleared.contains(&(chapter, level))
    }

    /// Level 1 is always open; any other level needs its predecessor cleared.
    pub fn is_unlocked(&self, chapter: u32, level: u32) -> bool {
        level == 1 || (level > 1 && self.contains(chapter, level - 1))
    }

    pub fn len(&self) -> usize {
        self.cleared.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cleared.is_empty()
    }
}

/// How a level appears on the chapter grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelStatus {
    Current,
    Completed,
    Available,
    Locked,
}

/// The mutable record the controller updates every tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleSession {
    pub active: bool,
    pub level: u32,
    pub chapter: u32,
    pub enemies: Vec<u64>,
    pub turn: u64,
    pub log: BattleLog,
    pub speed: Speed,
    pub completed: CompletionSet,
    pub loot_dropped_this_tick: bool,
}

impl Default for BattleSession {
    fn default() -> Self {
        Self::with_log_cap(MAX_LOG_ENTRIES)
    }
}

impl BattleSession {
    pub fn with_log_cap(cap: usize) -> Self {
        Self {
            active: false,
            level: 1,
            chapter: 1,
            enemies: compute_wave(1, 1).spawn(),
            turn: 0,
            log: BattleLog::with_cap(cap),
            speed: Speed::Normal,
            completed: CompletionSet::new(),
            loot_dropped_this_tick: false,
        }
    }

    /// Replace the enemy array with a fresh wave for the current position.
    pub fn respawn_wave(&mut self) {
        self.enemies = compute_wave(self.level, self.chapter).spawn();
    }

    pub fn alive_enemies(&self) -> usize {
        self.enemies.iter().filter(|hp| **hp > 0).count()
    }

    pub fn is_current_completed(&self) -> bool {
        self.completed.contains(self.chapter, self.level)
    }

    pub fn can_advance(&self) -> bool {
        self.level < BOSS_LEVEL && self.is_current_completed()
    }

    pub fn level_status(&self, level: u32) -> LevelStatus {
        if level == self.level {
            LevelStatus::Current
        } else if self.completed.contains(self.chapter, level) {
            LevelStatus::Completed
        } else if self.completed.is_unlocked(self.chapter, level) {
            LevelStatus::Available
        } else {
            LevelStatus::Locked
        }
    }

    /// Status of every level in the current chapter, level 1 first.
    pub fn level_grid(&self) -> Vec<(u32, LevelStatus)> {
        (1..=BOSS_LEVEL)
            .map(|level| (level, self.level_status(level)))
            .collect()
    }
}

/// A battle can start once at least one hero is recruited.
pub fn can_start(roster: &[String]) -> bool {
    !roster.is_empty()
}
