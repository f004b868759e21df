//! One simulated turn: hero strikes, enemy counter-attacks, experience.
//!
//! These functions only touch the hero and enemy arrays they are handed.
//! Sequencing, loot, completion and wipe handling live in
//! `battle::controller`.

use super::hero::Hero;
use super::wave::enemy_base_damage;
use crate::battle::collaborators::LootSinkError;
use crate::core::constants::*;
use crate::items::equipment::EquippedGear;
use crate::items::types::{DroppedItem, Rarity};
use rand::Rng;

/// Everything observable that happened during a tick, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum BattleEvent {
    HeroAttack {
        hero: String,
        damage: u32,
        targets: usize,
        critical: bool,
        message: String,
    },

    EnemyDefeated {
        hero: String,
        enemy_index: usize,
        xp_gained: u32,
        message: String,
    },

    HeroLevelUp {
        hero: String,
        new_level: u32,
        message: String,
    },

    EnemyAttack {
        enemy_index: usize,
        hero: String,
        damage: u32,
        message: String,
    },

    HeroDefeated {
        hero: String,
        message: String,
    },

    ItemDropped {
        item: DroppedItem,
        message: String,
    },

    /// A drop was due but the loot sink had no room.
    InventoryFull { message: String },

    /// The loot sink refused an item.
    LootFailed {
        error: LootSinkError,
        message: String,
    },

    LevelCompleted {
        level: u32,
        chapter: u32,
        message: String,
    },

    ChapterAdvanced { chapter: u32, message: String },

    PartyWiped { message: String },
}

impl BattleEvent {
    /// The battle-log line for this event.
    pub fn message(&self) -> &str {
        match self {
            BattleEvent::HeroAttack { message, .. }
            | BattleEvent::EnemyDefeated { message, .. }
            | BattleEvent::HeroLevelUp { message, .. }
            | BattleEvent::EnemyAttack { message, .. }
            | BattleEvent::HeroDefeated { message, .. }
            | BattleEvent::ItemDropped { message, .. }
            | BattleEvent::InventoryFull { message }
            | BattleEvent::LootFailed { message, .. }
            | BattleEvent::LevelCompleted { message, .. }
            | BattleEvent::ChapterAdvanced { message, .. }
            | BattleEvent::PartyWiped { message } => message,
        }
    }

    pub fn item_dropped(item: DroppedItem) -> Self {
        let rarity = item.gear.rarity;
        let message = format!("Found {} ({})!", item.gear.name, rarity.name());
        BattleEvent::ItemDropped { item, message }
    }

    pub fn inventory_full() -> Self {
        BattleEvent::InventoryFull {
            message: "Inventory is full! Sell items to make room.".to_string(),
        }
    }

    pub fn loot_failed(error: LootSinkError) -> Self {
        let message = format!("Loot lost: {}", error);
        BattleEvent::LootFailed { error, message }
    }
}

/// How a tick ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Both sides still standing.
    Continued,
    /// A regular level was cleared and its wave respawned.
    LevelCompleted { level: u32, chapter: u32 },
    /// The boss fell; the party moved on to level 1 of `chapter`.
    ChapterAdvanced { chapter: u32 },
    /// Every hero fell; the battle stopped and reset to level 1.
    PartyWiped,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TickResult {
    /// Turn counter after this tick.
    pub turn: u64,
    pub outcome: TickOutcome,
    pub events: Vec<BattleEvent>,
}

impl TickResult {
    pub fn dropped_items(&self) -> impl Iterator<Item = &DroppedItem> {
        self.events.iter().filter_map(|e| match e {
            BattleEvent::ItemDropped { item, .. } => Some(item),
            _ => None,
        })
    }

    pub fn dropped_rarities(&self) -> impl Iterator<Item = Rarity> + '_ {
        self.dropped_items().map(|item| item.gear.rarity)
    }
}

/// `floor(base × U(0.8, 1.2))`.
pub fn roll_damage(base: f64, rng: &mut impl Rng) -> u32 {
    let jitter = rng.gen_range(DAMAGE_JITTER_MIN..DAMAGE_JITTER_MAX);
    (base * jitter).floor().max(0.0) as u32
}

/// A single hero's attack before it is applied to the wave.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strike {
    pub damage: u32,
    pub critical: bool,
    pub targets: usize,
}

pub fn hero_strike(hero: &Hero, gear: &EquippedGear, rng: &mut impl Rng) -> Strike {
    let mut damage = roll_damage(hero.attack_power as f64, rng);
    let critical = gear.has_mythic_set();
    if critical {
        damage = (damage as f64 * MYTHIC_SET_CRIT_MULTIPLIER).floor() as u32;
    }
    Strike {
        damage,
        critical,
        targets: gear.target_count(),
    }
}

/// Apply `damage` to the first `targets` living enemies in index order.
/// Returns the indices of the enemies this hit brought down.
pub fn apply_strike(enemies: &mut [u64], damage: u32, targets: usize) -> Vec<usize> {
    let mut killed = Vec::new();
    let alive: Vec<usize> = enemies
        .iter()
        .enumerate()
        .filter(|(_, hp)| **hp > 0)
        .map(|(i, _)| i)
        .take(targets)
        .collect();
    for index in alive {
        enemies[index] = enemies[index].saturating_sub(damage as u64);
        if enemies[index] == 0 {
            killed.push(index);
        }
    }
    killed
}

/// Experience range for a single kill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KillXp {
    pub min: u32,
    pub max: u32,
}

impl Default for KillXp {
    fn default() -> Self {
        Self {
            min: KILL_XP_MIN,
            max: KILL_XP_MAX,
        }
    }
}

impl KillXp {
    pub fn roll(&self, rng: &mut impl Rng) -> u32 {
        if self.max <= self.min {
            return self.min;
        }
        rng.gen_range(self.min..=self.max)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeroPhase {
    pub kills: usize,
    pub events: Vec<BattleEvent>,
}

/// Every living hero strikes once. `loadouts[i]` is the gear of
/// `heroes[i]`; missing entries count as unequipped.
pub fn resolve_hero_phase(
    heroes: &mut [Hero],
    loadouts: &[EquippedGear],
    enemies: &mut [u64],
    kill_xp: KillXp,
    rng: &mut impl Rng,
) -> HeroPhase {
    let mut phase = HeroPhase::default();
    let unequipped = EquippedGear::default();

    for (i, hero) in heroes.iter_mut().enumerate() {
        if !hero.is_alive() {
            continue;
        }
        if enemies.iter().all(|hp| *hp == 0) {
            break;
        }

        let gear = loadouts.get(i).unwrap_or(&unequipped);
        let strike = hero_strike(hero, gear, rng);
        let message = match (strike.critical, strike.targets) {
            (true, 1) => format!("{} lands a critical hit for {}!", hero.name, strike.damage),
            (true, n) => format!(
                "{} lands a critical sweep for {} on {} enemies!",
                hero.name, strike.damage, n
            ),
            (false, 1) => format!("{} attacks for {} damage", hero.name, strike.damage),
            (false, n) => format!(
                "{} strikes up to {} enemies for {} damage",
                hero.name, n, strike.damage
            ),
        };
        phase.events.push(BattleEvent::HeroAttack {
            hero: hero.name.clone(),
            damage: strike.damage,
            targets: strike.targets,
            critical: strike.critical,
            message,
        });

        for enemy_index in apply_strike(enemies, strike.damage, strike.targets) {
            phase.kills += 1;
            let xp_gained = kill_xp.roll(rng);
            phase.events.push(BattleEvent::EnemyDefeated {
                hero: hero.name.clone(),
                enemy_index,
                xp_gained,
                message: format!(
                    "{} defeats enemy {} (+{} XP)",
                    hero.name,
                    enemy_index + 1,
                    xp_gained
                ),
            });

            let before = hero.level;
            if hero.gain_experience(xp_gained) > 0 {
                for new_level in before + 1..=hero.level {
                    phase.events.push(BattleEvent::HeroLevelUp {
                        hero: hero.name.clone(),
                        new_level,
                        message: format!("{} reached level {}!", hero.name, new_level),
                    });
                }
            }
        }
    }

    phase
}

/// Every living enemy hits the first living hero.
pub fn resolve_enemy_phase(
    heroes: &mut [Hero],
    enemies: &[u64],
    level: u32,
    chapter: u32,
    rng: &mut impl Rng,
) -> Vec<BattleEvent> {
    let mut events = Vec::new();
    let base = enemy_base_damage(level, chapter);

    for (enemy_index, _) in enemies.iter().enumerate().filter(|(_, hp)| **hp > 0) {
        let Some(target) = heroes.iter_mut().find(|h| h.is_alive()) else {
            break;
        };
        let damage = roll_damage(base, rng);
        target.take_damage(damage);
        events.push(BattleEvent::EnemyAttack {
            enemy_index,
            hero: target.name.clone(),
            damage,
            message: format!(
                "Enemy {} hits {} for {} damage",
                enemy_index + 1,
                target.name,
                damage
            ),
        });
        if !target.is_alive() {
            events.push(BattleEvent::HeroDefeated {
                hero: target.name.clone(),
                message: format!("{} has fallen!", target.name),
            });
        }
    }

    events
}

pub fn wave_cleared(enemies: &[u64]) -> bool {
    enemies.iter().all(|hp| *hp == 0)
}

pub fn party_defeated(heroes: &[Hero]) -> bool {
    heroes.iter().all(|h| !h.is_alive())
}
