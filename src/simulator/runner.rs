//! Simulation runner driving the real `BattleController`.
//!
//! Each run fields the configured roster, forces ticks back to back (no
//! wall clock), and plays a simple policy: grind each level a few times,
//! push on, restart after a wipe, equip upgrades and sell when storage
//! fills. Statistics are accumulated from `TickResult` events.

use super::config::SimConfig;
use super::report::SimReport;
use crate::battle::collaborators::{GearLookup, LootSink};
use crate::battle::controller::BattleController;
use crate::combat::logic::{BattleEvent, TickOutcome, TickResult};
use crate::items::equipment::EquippedGear;
use crate::items::inventory::Inventory;
use crate::items::types::DroppedItem;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::collections::HashMap;
use tracing::info;

/// Clears of a level before the simulated player moves on.
const CLEARS_BEFORE_ADVANCE: u32 = 3;

/// Statistics for a single run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunStats {
    pub final_chapter: u32,
    pub final_level: u32,
    pub total_ticks: u64,
    pub total_kills: u64,
    pub levels_completed: u64,
    pub chapters_advanced: u32,
    pub wipes: u64,
    /// Drops indexed by `Rarity::index()`
    pub drops_by_rarity: [u64; 6],
    pub inventory_full_events: u64,
    pub items_equipped: u64,
    pub gold_earned: u64,
    pub highest_hero_level: u32,
    pub reached_target: bool,
    pub ticks_to_target: Option<u64>,
}

impl RunStats {
    pub fn total_drops(&self) -> u64 {
        self.drops_by_rarity.iter().sum()
    }

    fn record(&mut self, result: &TickResult) {
        for event in &result.events {
            match event {
                BattleEvent::EnemyDefeated { .. } => self.total_kills += 1,
                BattleEvent::ItemDropped { item, .. } => {
                    self.drops_by_rarity[item.gear.rarity.index()] += 1;
                }
                BattleEvent::InventoryFull { .. } => self.inventory_full_events += 1,
                _ => {}
            }
        }
        match result.outcome {
            TickOutcome::LevelCompleted { .. } => self.levels_completed += 1,
            TickOutcome::ChapterAdvanced { .. } => {
                self.levels_completed += 1;
                self.chapters_advanced += 1;
            }
            TickOutcome::PartyWiped => self.wipes += 1,
            TickOutcome::Continued => {}
        }
    }
}

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    let mut runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(run_idx as u64)),
            None => ChaCha8Rng::from_entropy(),
        };

        let stats = simulate_single_run(config, &mut rng);
        if config.verbosity >= 2 {
            info!(
                run = run_idx + 1,
                chapter = stats.final_chapter,
                level = stats.final_level,
                kills = stats.total_kills,
                wipes = stats.wipes,
                drops = stats.total_drops(),
                "run finished"
            );
        }
        runs.push(stats);
    }

    SimReport::from_runs(runs, config)
}

fn gear_snapshot(inventory: &Inventory, roster: &[String]) -> HashMap<String, EquippedGear> {
    roster
        .iter()
        .map(|hero| (hero.clone(), inventory.equipped(hero)))
        .collect()
}

fn slot_score(inventory: &Inventory, hero: &str, item: &DroppedItem) -> u32 {
    inventory
        .equipped(hero)
        .get(item.gear.slot)
        .map_or(0, |gear| gear.total_stats())
}

/// Give each new drop to the hero with the weakest piece in that slot, if
/// it is an improvement. Returns how many items were equipped.
fn equip_upgrades(inventory: &mut Inventory, roster: &[String], drops: &[DroppedItem]) -> u64 {
    let mut equipped = 0;
    for item in drops {
        let Some(hero) = roster
            .iter()
            .min_by_key(|hero| slot_score(inventory, hero, item))
        else {
            continue;
        };
        if item.gear.total_stats() > slot_score(inventory, hero, item)
            && inventory.equip(&item.unique_id, hero)
        {
            equipped += 1;
        }
    }
    equipped
}

/// Simulate one run with the given rng.
pub fn simulate_single_run(config: &SimConfig, rng: &mut impl Rng) -> RunStats {
    let mut controller = BattleController::new(config.engine.clone());
    let mut inventory = Inventory::with_capacity(config.engine.inventory_slots);
    let mut gear = gear_snapshot(&inventory, &config.roster);
    let mut stats = RunStats::default();
    let mut clears_here = 0;

    if controller.start_battle(&config.roster, &gear) {
        while stats.total_ticks < config.max_ticks_per_run {
            let Some(result) = controller.tick(&gear, &mut inventory, rng) else {
                break;
            };
            stats.total_ticks += 1;
            stats.record(&result);

            match result.outcome {
                TickOutcome::PartyWiped => {
                    clears_here = 0;
                    controller.start_battle(&config.roster, &gear);
                }
                TickOutcome::LevelCompleted { .. } => {
                    clears_here += 1;
                    if config.auto_advance
                        && clears_here >= CLEARS_BEFORE_ADVANCE
                        && controller.advance_to_next_level()
                    {
                        clears_here = 0;
                    }
                }
                TickOutcome::ChapterAdvanced { chapter } => {
                    clears_here = 0;
                    if chapter >= config.target_chapter && !stats.reached_target {
                        stats.reached_target = true;
                        stats.ticks_to_target = Some(stats.total_ticks);
                    }
                }
                TickOutcome::Continued => {}
            }

            if config.auto_equip {
                let drops: Vec<DroppedItem> = result.dropped_items().cloned().collect();
                if !drops.is_empty() {
                    stats.items_equipped += equip_upgrades(&mut inventory, &config.roster, &drops);
                    gear = gear_snapshot(&inventory, &config.roster);
                }
            }
            if inventory.is_full() {
                stats.gold_earned += inventory.sell_all();
            }

            stats.highest_hero_level = controller
                .heroes()
                .iter()
                .map(|h| h.level)
                .max()
                .unwrap_or(1)
                .max(stats.highest_hero_level);

            if stats.reached_target {
                break;
            }
        }
    }

    stats.final_chapter = controller.session().chapter;
    stats.final_level = controller.session().level;
    stats
}
