//! Battle balance simulator CLI.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                     # 100 runs, target chapter 3
//!   cargo run --bin simulate -- -n 20 -c 2       # 20 runs to chapter 2
//!   cargo run --bin simulate -- --seed 42 --json # Reproducible, save JSON

use idle_warlords::core::EngineConfig;
use idle_warlords::simulator::{run_simulation, SimConfig};
use std::env;
use std::path::Path;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let args: Vec<String> = env::args().collect();
    let config = match parse_args(&args) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("error: {}", message);
            process::exit(2);
        }
    };

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              IDLE WARLORDS BALANCE SIMULATOR                  ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Runs:           {}", config.num_runs);
    println!("  Roster:         {}", config.roster.join(", "));
    println!("  Target Chapter: {}", config.target_chapter);
    println!("  Max Ticks:      {}", config.max_ticks_per_run);
    println!("  Auto-equip:     {}", config.auto_equip);
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();

    let report = run_simulation(&config);
    println!("{}", report.to_text());

    if args.iter().any(|a| a == "--json") {
        let filename = format!(
            "sim_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        let saved = report
            .to_json()
            .and_then(|json| std::fs::write(&filename, json).map_err(Into::into));
        match saved {
            Ok(()) => println!("JSON report saved to: {}", filename),
            Err(e) => {
                eprintln!("failed to save JSON report: {}", e);
                process::exit(1);
            }
        }
    }
}

fn next_value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> Result<&'a str, String> {
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| format!("{} needs a value", flag))
}

fn parse_args(args: &[String]) -> Result<SimConfig, String> {
    let mut config = SimConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--runs" => {
                config.num_runs = next_value(args, &mut i, "--runs")?.parse().unwrap_or(100);
            }
            "-c" | "--chapter" => {
                config.target_chapter = next_value(args, &mut i, "--chapter")?.parse().unwrap_or(3);
            }
            "-s" | "--seed" => {
                config.seed = next_value(args, &mut i, "--seed")?.parse().ok();
            }
            "-t" | "--ticks" => {
                config.max_ticks_per_run =
                    next_value(args, &mut i, "--ticks")?.parse().unwrap_or(20_000);
            }
            "--hero" => {
                let hero = next_value(args, &mut i, "--hero")?;
                config.roster = vec![hero.to_string()];
            }
            "--config" => {
                let path = next_value(args, &mut i, "--config")?;
                config.engine = EngineConfig::load(Path::new(path)).map_err(|e| e.to_string())?;
            }
            "--no-equip" => {
                config.auto_equip = false;
            }
            "--grind" => {
                config.auto_advance = false;
            }
            "--quick" => {
                config = SimConfig::quick();
            }
            "-v" | "--verbose" => {
                config.verbosity = 2;
            }
            "-h" | "--help" => {
                print_help();
                process::exit(0);
            }
            _ => {}
        }
        i += 1;
    }

    Ok(config)
}

fn print_help() {
    println!("Idle Warlords Balance Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --runs <N>      Number of simulation runs (default: 100)");
    println!("    -c, --chapter <C>   Target chapter to reach (default: 3)");
    println!("    -s, --seed <S>      Random seed for reproducibility");
    println!("    -t, --ticks <T>     Max ticks per run (default: 20,000)");
    println!("    --hero <NAME>       Field a single hero instead of the full roster");
    println!("    --config <PATH>     Load engine tuning from a JSON file");
    println!("    --no-equip          Never equip drops");
    println!("    --grind             Stay on level 1 instead of advancing");
    println!("    --quick             Quick check (20 runs to chapter 2)");
    println!("    -v, --verbose       Log every run");
    println!("    --json              Save JSON report");
    println!("    -h, --help          Show this help");
}
