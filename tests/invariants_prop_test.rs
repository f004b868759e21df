//! Property-based tests for battle invariants.
//!
//! Random sequences of controller operations must never break HP bounds,
//! the log cap, completion monotonicity or the one-drop-per-tick rule.

use idle_warlords::battle::{BattleController, BattleLog, Speed, TickTimer, VecLootSink};
use idle_warlords::combat::{compute_wave, TickOutcome, TickResult};
use idle_warlords::core::EngineConfig;
use idle_warlords::items::{EquippedGear, GearCatalog};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::{HashMap, HashSet};
use std::time::Duration;

const HEROES: [&str; 5] = ["Liu Bei", "Guan Yu", "Zhang Fei", "Zhuge Liang", "Lu Bu"];

#[derive(Debug, Clone)]
enum Op {
    Tick,
    Update(u64),
    Advance,
    Jump(u32),
    ToggleSpeed,
    Stop,
    Start,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => Just(Op::Tick),
        3 => (0u64..7_000).prop_map(Op::Update),
        2 => Just(Op::Advance),
        1 => (0u32..12).prop_map(Op::Jump),
        1 => Just(Op::ToggleSpeed),
        1 => Just(Op::Stop),
        1 => Just(Op::Start),
    ]
}

fn party_gear(names: &[String], armed: bool) -> HashMap<String, EquippedGear> {
    if !armed {
        return HashMap::new();
    }
    let catalog = GearCatalog::standard();
    names
        .iter()
        .map(|name| {
            let mut gear = EquippedGear::new();
            if let Some(sword) = catalog.find("epic_sword_1") {
                gear.equip(sword.clone());
            }
            (name.clone(), gear)
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Waves are a pure function of position and stay inside the curve.
    #[test]
    fn prop_wave_shape(level in 1u32..=10, chapter in 1u32..=8) {
        let wave = compute_wave(level, chapter);
        prop_assert_eq!(wave, compute_wave(level, chapter));
        prop_assert!(wave.count >= 1 && wave.count <= 5);
        prop_assert_eq!(wave.spawn().len(), wave.count as usize);
        if level == 10 {
            prop_assert_eq!(wave.count, 1);
        } else if level <= 5 {
            prop_assert_eq!(wave.count, level);
        }
        prop_assert!(compute_wave(level, chapter + 1).hp >= wave.hp);
    }

    /// The timer yields exactly one tick per full interval fed to it.
    #[test]
    fn prop_timer_counts_whole_intervals(
        interval_ms in 1u64..3_000,
        frames in prop::collection::vec(0u64..5_000, 1..40)
    ) {
        let mut timer = TickTimer::new(Duration::from_millis(interval_ms));
        timer.reschedule(Duration::from_millis(interval_ms));
        let mut ticks = 0u64;
        for frame in &frames {
            let mut delta = Duration::from_millis(*frame);
            while timer.advance(delta) {
                delta = Duration::ZERO;
                ticks += 1;
            }
        }
        let total: u64 = frames.iter().sum();
        prop_assert_eq!(ticks, total / interval_ms);
    }

    /// After a trim the log holds the newest `cap` entries.
    #[test]
    fn prop_log_keeps_newest(cap in 1usize..20, pushes in 0usize..60) {
        let mut log = BattleLog::with_cap(cap);
        for i in 0..pushes {
            log.push(format!("entry {}", i));
        }
        log.trim();
        prop_assert_eq!(log.len(), pushes.min(cap));
        if pushes > 0 {
            let expected = format!("entry {}", pushes - 1);
            prop_assert_eq!(log.last(), Some(expected.as_str()));
        }
    }

    /// Arbitrary operation sequences keep every session invariant.
    #[test]
    fn prop_controller_invariants(
        seed in any::<u64>(),
        party_size in 1usize..=5,
        armed in any::<bool>(),
        ops in prop::collection::vec(op_strategy(), 1..120)
    ) {
        let config = EngineConfig {
            max_log_entries: 12,
            tick_drop_chance: 0.5,
            completion_drop_chance: 0.3,
            ..EngineConfig::default()
        };
        let roster: Vec<String> = HEROES[..party_size].iter().map(|h| h.to_string()).collect();
        let gear = party_gear(&roster, armed);
        let mut controller = BattleController::new(config);
        let mut sink = VecLootSink::with_capacity(8);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut cleared: HashSet<(u32, u32)> = HashSet::new();

        for op in ops {
            let results: Vec<TickResult> = match op {
                Op::Tick => controller.tick(&gear, &mut sink, &mut rng).into_iter().collect(),
                Op::Update(ms) => {
                    controller.update(Duration::from_millis(ms), &gear, &mut sink, &mut rng)
                }
                Op::Advance => {
                    controller.advance_to_next_level();
                    Vec::new()
                }
                Op::Jump(level) => {
                    controller.jump_to_level(level);
                    Vec::new()
                }
                Op::ToggleSpeed => {
                    let speed = controller.session().speed.toggled();
                    controller.set_speed(speed);
                    Vec::new()
                }
                Op::Stop => {
                    controller.stop_battle();
                    Vec::new()
                }
                Op::Start => {
                    controller.start_battle(&roster, &gear);
                    Vec::new()
                }
            };

            for result in &results {
                let drops = result.dropped_items().count();
                match result.outcome {
                    TickOutcome::Continued | TickOutcome::PartyWiped => {
                        prop_assert!(drops <= 1);
                    }
                    TickOutcome::LevelCompleted { level, chapter } => {
                        prop_assert!(drops <= compute_wave(level, chapter).count as usize);
                        cleared.insert((chapter, level));
                    }
                    TickOutcome::ChapterAdvanced { chapter } => {
                        prop_assert!(drops <= 1);
                        cleared.insert((chapter - 1, 10));
                    }
                }
            }

            let session = controller.session();
            prop_assert!(session.log.len() <= 12);
            prop_assert!((1..=10).contains(&session.level));
            prop_assert!(session.chapter >= 1);
            prop_assert!(!session.loot_dropped_this_tick);
            prop_assert_eq!(session.active, controller.timer().is_armed());
            if session.active {
                prop_assert_eq!(
                    controller.timer().interval(),
                    controller.interval_for(session.speed)
                );
            }

            let wave_hp = compute_wave(session.level, session.chapter).hp;
            prop_assert!(session.enemies.iter().all(|hp| *hp <= wave_hp));

            for hero in controller.heroes() {
                prop_assert!(hero.health <= hero.max_health);
            }

            for (chapter, level) in &cleared {
                prop_assert!(session.completed.contains(*chapter, *level));
            }
            prop_assert!(sink.items.len() <= 8);
        }
    }
}

#[test]
fn test_speed_names() {
    assert_eq!(Speed::Normal.toggled(), Speed::Fast);
    assert_eq!(Speed::Fast.toggled(), Speed::Normal);
}
