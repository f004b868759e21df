//! Progression controller: owns the session, the party and the turn timer,
//! and runs one combat turn per timer tick.
//!
//! Collaborators (gear lookup, loot sink, rng) are passed into each call
//! rather than stored, so the controller never holds borrowed state.

use super::collaborators::{GearLookup, LootSink, LootSinkError};
use super::session::{BattleSession, Speed};
use super::timer::TickTimer;
use crate::combat::hero::Hero;
use crate::combat::logic::{
    party_defeated, resolve_enemy_phase, resolve_hero_phase, wave_cleared, BattleEvent, KillXp,
    TickOutcome, TickResult,
};
use crate::combat::wave::{compute_wave, is_boss_level};
use crate::core::config::EngineConfig;
use crate::core::constants::BOSS_LEVEL;
use crate::items::drops::{roll_drop, LootTable};
use crate::items::equipment::EquippedGear;
use rand::Rng;
use std::time::Duration;
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct BattleController {
    config: EngineConfig,
    session: BattleSession,
    roster: Vec<String>,
    heroes: Vec<Hero>,
    loot: LootTable,
    timer: TickTimer,
}

impl Default for BattleController {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl BattleController {
    pub fn new(config: EngineConfig) -> Self {
        Self::with_loot_table(config, LootTable::default())
    }

    pub fn with_loot_table(config: EngineConfig, loot: LootTable) -> Self {
        let session = BattleSession::with_log_cap(config.max_log_entries);
        let timer = TickTimer::new(config.normal_interval());
        Self {
            config,
            session,
            roster: Vec::new(),
            heroes: Vec::new(),
            loot,
            timer,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Read-only view of the session for presentation.
    pub fn session(&self) -> &BattleSession {
        &self.session
    }

    pub fn heroes(&self) -> &[Hero] {
        &self.heroes
    }

    pub fn roster(&self) -> &[String] {
        &self.roster
    }

    pub fn timer(&self) -> &TickTimer {
        &self.timer
    }

    pub fn loot_table(&self) -> &LootTable {
        &self.loot
    }

    pub fn is_active(&self) -> bool {
        self.session.active
    }

    pub fn interval_for(&self, speed: Speed) -> Duration {
        match speed {
            Speed::Normal => self.config.normal_interval(),
            Speed::Fast => self.config.fast_interval(),
        }
    }

    fn current_interval(&self) -> Duration {
        self.interval_for(self.session.speed)
    }

    fn kill_xp(&self) -> KillXp {
        KillXp {
            min: self.config.kill_xp_min,
            max: self.config.kill_xp_max,
        }
    }

    fn recruit_party(&mut self, gear: &impl GearLookup) {
        self.heroes = self
            .roster
            .iter()
            .map(|name| Hero::recruit(name, &gear.equipped(name)))
            .collect();
    }

    fn log_now(&mut self, message: impl Into<String>) {
        self.session.log.push(message);
        self.session.log.trim();
    }

    // ── External operations ─────────────────────────────────────

    /// Seed the party from `roster`, spawn the wave for the current position
    /// and start the timer. Ignored for an empty roster.
    pub fn start_battle(&mut self, roster: &[String], gear: &impl GearLookup) -> bool {
        if roster.is_empty() {
            return false;
        }

        self.roster = roster.to_vec();
        self.recruit_party(gear);
        self.session.respawn_wave();
        self.session.active = true;
        self.timer.reschedule(self.current_interval());

        let wave = compute_wave(self.session.level, self.session.chapter);
        info!(
            chapter = self.session.chapter,
            level = self.session.level,
            heroes = self.heroes.len(),
            "battle started"
        );
        self.log_now(format!(
            "Battle started! Chapter {} Level {}",
            self.session.chapter, self.session.level
        ));
        self.log_now(format!("{} enemies with {} HP each", wave.count, wave.hp));
        true
    }

    /// Move on to the next level once the current one has been cleared.
    pub fn advance_to_next_level(&mut self) -> bool {
        if self.heroes.is_empty() || !self.session.can_advance() {
            return false;
        }

        self.session.level += 1;
        self.session.respawn_wave();
        self.session.active = true;
        self.timer.reschedule(self.current_interval());

        info!(
            chapter = self.session.chapter,
            level = self.session.level,
            "advanced to next level"
        );
        self.log_now(format!("Starting level {}!", self.session.level));
        true
    }

    /// Jump to any unlocked level of the current chapter and start fighting.
    pub fn jump_to_level(&mut self, target: u32) -> bool {
        if self.heroes.is_empty()
            || !(1..=BOSS_LEVEL).contains(&target)
            || !self.session.completed.is_unlocked(self.session.chapter, target)
        {
            return false;
        }

        self.timer.cancel();
        self.session.level = target;
        self.session.respawn_wave();
        self.session.turn = 0;
        self.session.active = true;
        self.timer.reschedule(self.current_interval());

        info!(
            chapter = self.session.chapter,
            level = target,
            "jumped to level"
        );
        self.log_now(format!("Jumped to level {}!", target));
        true
    }

    /// Swap the tick interval. A running timer is restarted at the new
    /// interval; session state is untouched.
    pub fn set_speed(&mut self, speed: Speed) {
        self.session.speed = speed;
        if self.session.active {
            self.timer.reschedule(self.current_interval());
        }
        info!(speed = speed.name(), "battle speed changed");
    }

    /// Stop future ticks. Everything else is kept for resuming.
    pub fn stop_battle(&mut self) {
        self.timer.cancel();
        if self.session.active {
            info!(turn = self.session.turn, "battle stopped");
        }
        self.session.active = false;
    }

    // ── Tick driving ────────────────────────────────────────────

    /// Feed elapsed time to the timer and resolve every tick that came due.
    pub fn update(
        &mut self,
        elapsed: Duration,
        gear: &impl GearLookup,
        loot: &mut impl LootSink,
        rng: &mut impl Rng,
    ) -> Vec<TickResult> {
        let mut results = Vec::new();
        let mut delta = elapsed;
        while self.timer.advance(delta) {
            delta = Duration::ZERO;
            if let Some(result) = self.tick(gear, loot, rng) {
                results.push(result);
            }
        }
        results
    }

    /// Resolve one turn immediately. Returns None when the battle is not
    /// running.
    pub fn tick(
        &mut self,
        gear: &impl GearLookup,
        loot: &mut impl LootSink,
        rng: &mut impl Rng,
    ) -> Option<TickResult> {
        if !self.session.active || self.heroes.is_empty() {
            return None;
        }

        let mut events = Vec::new();
        let outcome = if wave_cleared(&self.session.enemies) {
            self.complete_level(loot, rng, &mut events)
        } else {
            self.fight(gear, loot, rng, &mut events)
        };

        self.session.turn += 1;
        for event in &events {
            self.session.log.push(event.message());
        }
        self.session.log.trim();
        self.session.loot_dropped_this_tick = false;

        debug!(
            turn = self.session.turn,
            enemies_alive = self.session.alive_enemies(),
            heroes_alive = self.heroes.iter().filter(|h| h.is_alive()).count(),
            "tick resolved"
        );

        Some(TickResult {
            turn: self.session.turn,
            outcome,
            events,
        })
    }

    fn fight(
        &mut self,
        gear: &impl GearLookup,
        loot: &mut impl LootSink,
        rng: &mut impl Rng,
        events: &mut Vec<BattleEvent>,
    ) -> TickOutcome {
        let loadouts: Vec<EquippedGear> =
            self.heroes.iter().map(|h| gear.equipped(&h.name)).collect();
        let kill_xp = self.kill_xp();
        let phase = resolve_hero_phase(
            &mut self.heroes,
            &loadouts,
            &mut self.session.enemies,
            kill_xp,
            rng,
        );
        events.extend(phase.events);

        if phase.kills > 0 && !self.session.loot_dropped_this_tick {
            self.session.loot_dropped_this_tick = true;
            if roll_drop(self.config.tick_drop_chance, rng) {
                if loot.is_full() {
                    events.push(BattleEvent::inventory_full());
                } else {
                    self.drop_item(self.session.level, loot, rng, events);
                }
            }
        }

        events.extend(resolve_enemy_phase(
            &mut self.heroes,
            &self.session.enemies,
            self.session.level,
            self.session.chapter,
            rng,
        ));

        if party_defeated(&self.heroes) {
            self.wipe(gear, events)
        } else {
            TickOutcome::Continued
        }
    }

    /// Generate one item for `level` and hand it to the sink.
    fn drop_item(
        &mut self,
        level: u32,
        loot: &mut impl LootSink,
        rng: &mut impl Rng,
        events: &mut Vec<BattleEvent>,
    ) {
        let Some(item) = self.loot.generate(level, rng) else {
            return;
        };
        match loot.deposit(item.clone()) {
            Ok(()) => {
                debug!(item = %item.gear.name, rarity = item.gear.rarity.name(), "item dropped");
                events.push(BattleEvent::item_dropped(item));
            }
            Err(LootSinkError::InventoryFull(capacity)) => {
                warn!(capacity, "loot sink full");
                events.push(BattleEvent::inventory_full());
            }
            Err(error) => {
                warn!(%error, "loot deposit failed");
                events.push(BattleEvent::loot_failed(error));
            }
        }
    }

    fn complete_level(
        &mut self,
        loot: &mut impl LootSink,
        rng: &mut impl Rng,
        events: &mut Vec<BattleEvent>,
    ) -> TickOutcome {
        let level = self.session.level;
        let chapter = self.session.chapter;
        let defeated = self.session.enemies.len();

        self.session.completed.record(chapter, level);
        events.push(BattleEvent::LevelCompleted {
            level,
            chapter,
            message: format!("Level {} completed!", level),
        });
        info!(chapter, level, turn = self.session.turn, "level completed");

        let outcome = if is_boss_level(level) {
            self.session.chapter += 1;
            self.session.level = 1;
            let next = self.session.chapter;
            events.push(BattleEvent::ChapterAdvanced {
                chapter: next,
                message: format!("Boss defeated! Advancing to chapter {}!", next),
            });
            info!(chapter = next, "chapter advanced");
            TickOutcome::ChapterAdvanced { chapter: next }
        } else {
            events.push(BattleEvent::LevelCompleted {
                level,
                chapter,
                message: format!("Auto-restarting level {} for grinding...", level),
            });
            TickOutcome::LevelCompleted { level, chapter }
        };

        for hero in &mut self.heroes {
            hero.heal_full();
        }
        self.session.respawn_wave();

        // One roll per enemy of the wave just cleared, at the cleared level's rates.
        if loot.is_full() {
            events.push(BattleEvent::inventory_full());
        } else {
            for _ in 0..defeated {
                if roll_drop(self.config.completion_drop_chance, rng) {
                    self.drop_item(level, loot, rng, events);
                }
            }
        }

        self.timer.reschedule(self.current_interval());
        outcome
    }

    fn wipe(&mut self, gear: &impl GearLookup, events: &mut Vec<BattleEvent>) -> TickOutcome {
        self.timer.cancel();
        self.session.level = 1;
        self.recruit_party(gear);
        self.session.respawn_wave();
        self.session.active = false;

        warn!(chapter = self.session.chapter, turn = self.session.turn, "party wiped");
        events.push(BattleEvent::PartyWiped {
            message: "All heroes defeated! Retreating to level 1.".to_string(),
        });
        TickOutcome::PartyWiped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::collaborators::{NoGear, VecLootSink};
    use crate::items::catalog::GearCatalog;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashMap;

    fn roster(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    fn started(names: &[&str]) -> BattleController {
        let mut controller = BattleController::default();
        assert!(controller.start_battle(&roster(names), &NoGear));
        controller
    }

    #[test]
    fn test_start_battle_with_empty_roster_is_noop() {
        let mut controller = BattleController::default();
        assert!(!controller.start_battle(&[], &NoGear));
        assert!(!controller.is_active());
        assert!(!controller.timer().is_armed());
        assert!(controller.session().log.is_empty());
    }

    #[test]
    fn test_start_battle_seeds_party_and_timer() {
        let catalog = GearCatalog::standard();
        let mut equipped = EquippedGear::new();
        equipped.equip(catalog.find("rare_sword_1").unwrap().clone());
        let mut gear = HashMap::new();
        gear.insert("Guan Yu".to_string(), equipped);

        let mut controller = BattleController::default();
        assert!(controller.start_battle(&roster(&["Liu Bei", "Guan Yu"]), &gear));

        assert!(controller.is_active());
        assert_eq!(controller.heroes().len(), 2);
        assert_eq!(controller.heroes()[1].attack_power, 30 + 12);
        assert_eq!(controller.session().enemies, vec![100]);
        assert!(controller.timer().is_armed());
        assert_eq!(controller.timer().interval(), Duration::from_millis(2000));
    }

    #[test]
    fn test_clear_level_one_then_complete_next_tick() {
        // One Liu Bei (25 attack) against a single 100 HP enemy.
        let mut controller = started(&["Liu Bei"]);
        let mut sink = VecLootSink::with_capacity(20);
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        let mut fights = 0;
        while controller.session().enemies[0] > 0 {
            let result = controller.tick(&NoGear, &mut sink, &mut rng).unwrap();
            assert_eq!(result.outcome, TickOutcome::Continued);
            fights += 1;
            assert!(fights <= 5);
        }
        assert!(fights >= 4);

        let result = controller.tick(&NoGear, &mut sink, &mut rng).unwrap();
        assert_eq!(
            result.outcome,
            TickOutcome::LevelCompleted {
                level: 1,
                chapter: 1
            }
        );
        assert!(!result
            .events
            .iter()
            .any(|e| matches!(e, BattleEvent::EnemyAttack { .. } | BattleEvent::HeroAttack { .. })));
        assert!(controller.session().completed.contains(1, 1));
        assert_eq!(controller.session().enemies, vec![100]);
        let hero = &controller.heroes()[0];
        assert_eq!(hero.health, hero.max_health);
        assert!(controller.is_active());
        assert_eq!(controller.session().turn, fights + 1);
    }

    #[test]
    fn test_boss_clear_advances_chapter() {
        let mut controller = started(&["Liu Bei"]);
        controller.session.level = 10;
        controller.session.enemies = vec![0];
        let mut sink = VecLootSink::with_capacity(20);
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let result = controller.tick(&NoGear, &mut sink, &mut rng).unwrap();

        assert_eq!(result.outcome, TickOutcome::ChapterAdvanced { chapter: 2 });
        assert_eq!(controller.session().chapter, 2);
        assert_eq!(controller.session().level, 1);
        assert_eq!(controller.session().enemies, vec![150]);
        assert!(controller.session().completed.contains(1, 10));
        assert!(controller.is_active());
    }

    #[test]
    fn test_party_wipe_resets_level_and_stops() {
        let mut controller = started(&["Zhuge Liang"]);
        controller.session.level = 10;
        controller.session.chapter = 3;
        controller.session.respawn_wave();
        controller.heroes[0].level = 4;
        controller.heroes[0].health = 1;
        let mut sink = VecLootSink::with_capacity(20);
        let mut rng = ChaCha8Rng::seed_from_u64(2);

        let result = controller.tick(&NoGear, &mut sink, &mut rng).unwrap();

        assert_eq!(result.outcome, TickOutcome::PartyWiped);
        assert!(!controller.is_active());
        assert!(!controller.timer().is_armed());
        assert_eq!(controller.session().level, 1);
        assert_eq!(controller.session().chapter, 3);
        assert_eq!(controller.session().enemies, vec![225]);
        let hero = &controller.heroes()[0];
        assert_eq!(hero.level, 1);
        assert_eq!(hero.experience, 0);
        assert_eq!(hero.health, 90);
        assert_eq!(hero.attack_power, 22);

        assert!(controller.tick(&NoGear, &mut sink, &mut rng).is_none());
    }

    #[test]
    fn test_advance_requires_completed_level() {
        let mut controller = started(&["Liu Bei"]);
        assert!(!controller.advance_to_next_level());
        assert_eq!(controller.session().level, 1);

        controller.session.completed.record(1, 1);
        assert!(controller.advance_to_next_level());
        assert_eq!(controller.session().level, 2);
        assert_eq!(controller.session().enemies, vec![100, 100]);
    }

    #[test]
    fn test_advance_without_party_is_noop() {
        let mut controller = BattleController::default();
        controller.session.completed.record(1, 1);
        assert!(!controller.advance_to_next_level());
        assert!(!controller.jump_to_level(1));
    }

    #[test]
    fn test_jump_to_locked_level_is_noop() {
        let mut controller = started(&["Liu Bei"]);
        controller.session.completed.record(1, 1);
        controller.session.completed.record(1, 2);
        controller.session.turn = 17;

        assert!(!controller.jump_to_level(4));
        assert!(!controller.jump_to_level(0));
        assert!(!controller.jump_to_level(11));
        assert_eq!(controller.session().turn, 17);

        assert!(controller.jump_to_level(3));
        assert_eq!(controller.session().level, 3);
        assert_eq!(controller.session().turn, 0);
        assert_eq!(controller.session().enemies.len(), 3);
        assert!(controller.is_active());
    }

    #[test]
    fn test_jump_restarts_stopped_battle() {
        let mut controller = started(&["Liu Bei"]);
        controller.stop_battle();
        assert!(controller.jump_to_level(1));
        assert!(controller.is_active());
        assert!(controller.timer().is_armed());
    }

    #[test]
    fn test_set_speed_preserves_session() {
        let mut controller = started(&["Liu Bei", "Guan Yu"]);
        let mut sink = VecLootSink::with_capacity(20);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        controller.tick(&NoGear, &mut sink, &mut rng);
        let before = controller.session().clone();

        controller.set_speed(Speed::Fast);

        let after = controller.session();
        assert_eq!(after.turn, before.turn);
        assert_eq!(after.enemies, before.enemies);
        assert_eq!(after.log, before.log);
        assert_eq!(after.speed, Speed::Fast);
        assert_eq!(controller.timer().interval(), Duration::from_millis(1000));
    }

    #[test]
    fn test_set_speed_while_stopped_does_not_arm_timer() {
        let mut controller = started(&["Liu Bei"]);
        controller.stop_battle();
        controller.set_speed(Speed::Fast);
        assert!(!controller.timer().is_armed());
        assert!(controller.start_battle(&roster(&["Liu Bei"]), &NoGear));
        assert_eq!(controller.timer().interval(), Duration::from_millis(1000));
    }

    #[test]
    fn test_stop_keeps_state() {
        let mut controller = started(&["Liu Bei"]);
        let mut sink = VecLootSink::with_capacity(20);
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        controller.tick(&NoGear, &mut sink, &mut rng);
        let enemies = controller.session().enemies.clone();

        controller.stop_battle();
        assert!(!controller.is_active());
        assert_eq!(controller.session().turn, 1);
        assert_eq!(controller.session().enemies, enemies);
        assert!(controller
            .update(Duration::from_secs(60), &NoGear, &mut sink, &mut rng)
            .is_empty());
    }

    #[test]
    fn test_update_fires_on_interval() {
        let mut controller = started(&["Liu Bei", "Guan Yu", "Zhang Fei"]);
        let mut sink = VecLootSink::with_capacity(20);
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        assert!(controller
            .update(Duration::from_millis(1999), &NoGear, &mut sink, &mut rng)
            .is_empty());
        let results = controller.update(Duration::from_millis(1), &NoGear, &mut sink, &mut rng);
        assert_eq!(results.len(), 1);
        assert_eq!(controller.session().turn, 1);
    }

    #[test]
    fn test_at_most_one_steady_state_drop_per_tick() {
        let config = EngineConfig {
            tick_drop_chance: 1.0,
            completion_drop_chance: 0.0,
            ..EngineConfig::default()
        };
        let mut controller = BattleController::new(config);
        controller.start_battle(&roster(&["Liu Bei", "Guan Yu"]), &NoGear);
        controller.session.level = 5;
        controller.session.enemies = vec![1, 1, 1, 1, 1];
        let mut sink = VecLootSink::with_capacity(20);
        let mut rng = ChaCha8Rng::seed_from_u64(6);

        let result = controller.tick(&NoGear, &mut sink, &mut rng).unwrap();
        assert_eq!(result.dropped_items().count(), 1);
        assert_eq!(sink.items.len(), 1);
        assert!(!controller.session().loot_dropped_this_tick);
    }

    #[test]
    fn test_full_sink_logs_instead_of_dropping() {
        let config = EngineConfig {
            tick_drop_chance: 1.0,
            ..EngineConfig::default()
        };
        let mut controller = BattleController::new(config);
        controller.start_battle(&roster(&["Guan Yu"]), &NoGear);
        controller.session.enemies = vec![1];
        let mut sink = VecLootSink::with_capacity(0);
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        let result = controller.tick(&NoGear, &mut sink, &mut rng).unwrap();
        assert!(result
            .events
            .iter()
            .any(|e| matches!(e, BattleEvent::InventoryFull { .. })));
        assert!(sink.items.is_empty());
        assert!(controller.is_active());
    }

    #[test]
    fn test_completion_pass_rolls_per_defeated_enemy() {
        let config = EngineConfig {
            completion_drop_chance: 1.0,
            ..EngineConfig::default()
        };
        let mut controller = BattleController::new(config);
        controller.start_battle(&roster(&["Liu Bei"]), &NoGear);
        controller.session.level = 4;
        controller.session.enemies = vec![0; 4];
        let mut sink = VecLootSink::with_capacity(20);
        let mut rng = ChaCha8Rng::seed_from_u64(8);

        let result = controller.tick(&NoGear, &mut sink, &mut rng).unwrap();
        assert_eq!(result.dropped_items().count(), 4);
        assert_eq!(sink.items.len(), 4);
    }

    #[test]
    fn test_log_capped_after_commit() {
        let mut controller = started(&["Liu Bei", "Guan Yu", "Zhang Fei", "Zhuge Liang"]);
        let mut sink = VecLootSink::with_capacity(20);
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        for _ in 0..200 {
            if controller.tick(&NoGear, &mut sink, &mut rng).is_none() {
                controller.start_battle(&roster(&["Liu Bei"]), &NoGear);
            }
            assert!(controller.session().log.len() <= 50);
        }
    }
}
