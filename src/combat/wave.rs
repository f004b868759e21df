//! Enemy waves per (level, chapter).

use crate::core::constants::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wave {
    pub count: u32,
    pub hp: u64,
}

impl Wave {
    /// Fresh HP array for this wave.
    pub fn spawn(&self) -> Vec<u64> {
        vec![self.hp; self.count as usize]
    }
}

pub fn is_boss_level(level: u32) -> bool {
    level == BOSS_LEVEL
}

fn chapter_hp_multiplier(chapter: u32) -> f64 {
    ENEMY_HP_CHAPTER_GROWTH.powi(chapter.saturating_sub(1) as i32)
}

/// Size and per-enemy HP of the wave at `level` of `chapter`.
///
/// Levels 1-5 grow the wave by one enemy per level; 6-9 keep five enemies
/// and double their HP per level; level 10 is a single boss. Each chapter
/// scales the whole curve by 1.5.
pub fn compute_wave(level: u32, chapter: u32) -> Wave {
    let chapter_mult = chapter_hp_multiplier(chapter);
    let level = level.max(1);

    if is_boss_level(level) {
        Wave {
            count: 1,
            hp: (BOSS_BASE_HP * chapter_mult).floor() as u64,
        }
    } else if level <= LAST_REGULAR_SCALING_LEVEL {
        Wave {
            count: level,
            hp: (BASE_ENEMY_HP * chapter_mult).floor() as u64,
        }
    } else {
        let level_mult = ENEMY_HP_LEVEL_GROWTH.powi((level - LAST_REGULAR_SCALING_LEVEL) as i32);
        Wave {
            count: MAX_WAVE_SIZE,
            hp: (BASE_ENEMY_HP * level_mult * chapter_mult).floor() as u64,
        }
    }
}

/// Damage an enemy deals before jitter.
pub fn enemy_base_damage(level: u32, chapter: u32) -> f64 {
    let base = if is_boss_level(level) {
        BOSS_BASE_DAMAGE
    } else {
        ENEMY_BASE_DAMAGE
    };
    base * ENEMY_DAMAGE_CHAPTER_GROWTH.powi(chapter.saturating_sub(1) as i32)
}
