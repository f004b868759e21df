//! Headless battle runner: drives the controller in real time and prints
//! the battle log as it happens.

use idle_warlords::battle::{BattleController, GearLookup, LootSink, Speed};
use idle_warlords::build_info;
use idle_warlords::combat::hero::known_heroes;
use idle_warlords::combat::{TickOutcome, TickResult};
use idle_warlords::core::constants::RUNNER_POLL_INTERVAL_MS;
use idle_warlords::core::EngineConfig;
use idle_warlords::items::Inventory;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashMap;
use std::path::PathBuf;
use std::process;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
struct RunnerArgs {
    fast: bool,
    seconds: u64,
    seed: Option<u64>,
    config: Option<PathBuf>,
    heroes: Vec<String>,
    push: bool,
}

impl Default for RunnerArgs {
    fn default() -> Self {
        Self {
            fast: false,
            seconds: 30,
            seed: None,
            config: None,
            heroes: Vec::new(),
            push: false,
        }
    }
}

fn print_help() {
    println!("Idle Warlords - headless battle runner\n");
    println!("Usage: idle-warlords [options]\n");
    println!("Options:");
    println!("  --fast           Tick every second instead of every two");
    println!("  --seconds <N>    Stop after N seconds (default: 30)");
    println!("  --seed <S>       Seed the battle rng");
    println!("  --config <PATH>  Load engine tuning from a JSON file");
    println!("  --hero <NAME>    Add a hero to the party (repeatable; default: all)");
    println!("  --push           Advance to the next level after each clear");
    println!("  --version        Show version information");
    println!("  --help           Show this help message");
}

fn parse_args(args: &[String]) -> Result<RunnerArgs, String> {
    let mut parsed = RunnerArgs::default();
    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        let mut value = || {
            i += 1;
            args.get(i)
                .cloned()
                .ok_or_else(|| format!("{} needs a value", flag))
        };
        match flag {
            "--fast" => parsed.fast = true,
            "--push" => parsed.push = true,
            "--seconds" => {
                parsed.seconds = value()?
                    .parse()
                    .map_err(|_| "--seconds expects a number".to_string())?;
            }
            "--seed" => {
                parsed.seed = Some(
                    value()?
                        .parse()
                        .map_err(|_| "--seed expects a number".to_string())?,
                );
            }
            "--config" => parsed.config = Some(PathBuf::from(value()?)),
            "--hero" => parsed.heroes.push(value()?),
            "--version" | "-v" => {
                println!("{}", build_info::version_string());
                process::exit(0);
            }
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            other => return Err(format!("unknown option: {}", other)),
        }
        i += 1;
    }
    Ok(parsed)
}

fn print_result(result: &TickResult) {
    for event in &result.events {
        println!("[turn {:>4}] {}", result.turn, event.message());
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let args: Vec<String> = std::env::args().collect();
    let args = match parse_args(&args) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{}", message);
            eprintln!("Run 'idle-warlords --help' for usage.");
            process::exit(1);
        }
    };

    let config = match &args.config {
        Some(path) => match EngineConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                error!(path = %path.display(), error = %e, "failed to load config");
                process::exit(1);
            }
        },
        None => EngineConfig::default(),
    };

    let roster: Vec<String> = if args.heroes.is_empty() {
        known_heroes().map(str::to_string).collect()
    } else {
        args.heroes.clone()
    };

    let mut rng = match args.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    let mut inventory = Inventory::with_capacity(config.inventory_slots);
    let gear: HashMap<String, _> = roster
        .iter()
        .map(|hero| (hero.clone(), inventory.equipped(hero)))
        .collect();

    let mut controller = BattleController::new(config);
    if args.fast {
        controller.set_speed(Speed::Fast);
    }
    controller.start_battle(&roster, &gear);
    for line in controller.session().log.iter() {
        println!("{}", line);
    }

    let run_for = Duration::from_secs(args.seconds);
    let started = Instant::now();
    let mut last_update = Instant::now();

    while started.elapsed() < run_for {
        thread::sleep(Duration::from_millis(RUNNER_POLL_INTERVAL_MS));
        let now = Instant::now();
        let elapsed = now - last_update;
        last_update = now;

        for result in controller.update(elapsed, &gear, &mut inventory, &mut rng) {
            print_result(&result);
            match result.outcome {
                TickOutcome::PartyWiped => {
                    info!("regrouping after wipe");
                    controller.start_battle(&roster, &gear);
                }
                TickOutcome::LevelCompleted { .. } if args.push => {
                    controller.advance_to_next_level();
                }
                _ => {}
            }
        }
    }

    controller.stop_battle();
    let session = controller.session();
    println!();
    println!(
        "Stopped at chapter {} level {} after {} turns.",
        session.chapter, session.level, session.turn
    );
    println!(
        "Inventory: {}/{} items",
        inventory.item_count(),
        inventory.capacity()
    );
    for item in inventory.sorted_items() {
        println!(
            "  {:<10} {:<28} +{} atk +{} hp",
            item.gear.rarity.name(),
            item.gear.name,
            item.gear.attack_bonus,
            item.gear.health_bonus
        );
    }
}
