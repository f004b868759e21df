//! Simulation report generation.

use super::config::SimConfig;
use super::runner::RunStats;
use crate::core::error::Result;
use crate::items::types::Rarity;
use serde::Serialize;
use std::collections::BTreeMap;

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub target_chapter: u32,
    pub runs_reached_target: u32,
    pub runs_timed_out: u32,

    pub avg_final_chapter: f64,
    pub avg_ticks: f64,
    pub avg_ticks_to_target: f64,
    pub avg_kills: f64,
    pub avg_wipes: f64,
    pub avg_levels_completed: f64,
    pub avg_highest_hero_level: f64,
    pub avg_gold_earned: f64,

    /// Final chapter -> number of runs that ended there
    pub chapter_distribution: BTreeMap<u32, u32>,

    /// Average drops per run, keyed by rarity name
    pub avg_drops_by_rarity: BTreeMap<String, f64>,
    /// Drops per tick across all runs
    pub drops_per_tick: f64,

    pub run_stats: Vec<RunStats>,
}

fn mean(runs: &[RunStats], f: impl Fn(&RunStats) -> f64) -> f64 {
    if runs.is_empty() {
        return 0.0;
    }
    runs.iter().map(f).sum::<f64>() / runs.len() as f64
}

impl SimReport {
    pub fn from_runs(runs: Vec<RunStats>, config: &SimConfig) -> Self {
        let num_runs = runs.len() as u32;
        let runs_reached_target = runs.iter().filter(|r| r.reached_target).count() as u32;
        let runs_timed_out = runs
            .iter()
            .filter(|r| !r.reached_target && r.total_ticks >= config.max_ticks_per_run)
            .count() as u32;

        let reached: Vec<u64> = runs.iter().filter_map(|r| r.ticks_to_target).collect();
        let avg_ticks_to_target = if reached.is_empty() {
            0.0
        } else {
            reached.iter().sum::<u64>() as f64 / reached.len() as f64
        };

        let mut chapter_distribution = BTreeMap::new();
        for run in &runs {
            *chapter_distribution.entry(run.final_chapter).or_insert(0) += 1;
        }

        let avg_drops_by_rarity = Rarity::ALL
            .iter()
            .map(|rarity| {
                let avg = mean(&runs, |r| r.drops_by_rarity[rarity.index()] as f64);
                (rarity.name().to_string(), avg)
            })
            .collect();

        let total_ticks: u64 = runs.iter().map(|r| r.total_ticks).sum();
        let total_drops: u64 = runs.iter().map(|r| r.total_drops()).sum();
        let drops_per_tick = if total_ticks == 0 {
            0.0
        } else {
            total_drops as f64 / total_ticks as f64
        };

        Self {
            num_runs,
            target_chapter: config.target_chapter,
            runs_reached_target,
            runs_timed_out,
            avg_final_chapter: mean(&runs, |r| r.final_chapter as f64),
            avg_ticks: mean(&runs, |r| r.total_ticks as f64),
            avg_ticks_to_target,
            avg_kills: mean(&runs, |r| r.total_kills as f64),
            avg_wipes: mean(&runs, |r| r.wipes as f64),
            avg_levels_completed: mean(&runs, |r| r.levels_completed as f64),
            avg_highest_hero_level: mean(&runs, |r| r.highest_hero_level as f64),
            avg_gold_earned: mean(&runs, |r| r.gold_earned as f64),
            chapter_distribution,
            avg_drops_by_rarity,
            drops_per_tick,
            run_stats: runs,
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {} total, {} reached chapter {}, {} timed out\n\n",
            self.num_runs, self.runs_reached_target, self.target_chapter, self.runs_timed_out
        ));

        report.push_str("── PROGRESSION ──────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Final Chapter:   {:.2}\n", self.avg_final_chapter));
        report.push_str(&format!("  Avg Levels Cleared:  {:.1}\n", self.avg_levels_completed));
        report.push_str(&format!("  Avg Ticks:           {:.0}\n", self.avg_ticks));
        if self.runs_reached_target > 0 {
            report.push_str(&format!("  Avg Ticks to Target: {:.0}\n", self.avg_ticks_to_target));
        }
        report.push_str(&format!("  Avg Kills:           {:.0}\n", self.avg_kills));
        report.push_str(&format!("  Avg Wipes:           {:.1}\n", self.avg_wipes));
        report.push_str(&format!(
            "  Avg Best Hero Level: {:.1}\n\n",
            self.avg_highest_hero_level
        ));

        report.push_str("── LOOT ─────────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Drops per Tick:      {:.4}\n", self.drops_per_tick));
        for rarity in Rarity::ALL {
            let avg = self
                .avg_drops_by_rarity
                .get(rarity.name())
                .copied()
                .unwrap_or(0.0);
            report.push_str(&format!("  {:<10} {:>8.2}\n", rarity.name(), avg));
        }
        report.push_str(&format!("  Avg Gold from Sales: {:.0}\n\n", self.avg_gold_earned));

        report.push_str("── FINAL CHAPTER ────────────────────────────────────────────────\n");
        for (chapter, count) in &self.chapter_distribution {
            let pct = (*count as f64 / self.num_runs.max(1) as f64) * 100.0;
            let bar = "█".repeat((pct / 5.0) as usize);
            report.push_str(&format!("  Chapter {:2}: {:>5.1}% {}\n", chapter, pct, bar));
        }
        report.push('\n');

        report.push_str("── BALANCE ASSESSMENT ───────────────────────────────────────────\n");
        let wipe_rating = if self.avg_wipes < 1.0 {
            "TOO EASY - Party rarely falls"
        } else if self.avg_wipes < 10.0 {
            "GOOD - Challenging but fair"
        } else if self.avg_wipes < 40.0 {
            "HARD - Frequent wipes"
        } else {
            "TOO HARD - Party keeps wiping"
        };
        report.push_str(&format!("  Wipe Rating:     {}\n", wipe_rating));
        if self.runs_reached_target == 0 && self.num_runs > 0 {
            report.push_str("  ⚠️  No run reached the target chapter\n");
        }

        report
    }

    /// Pretty-printed JSON of the full report, including per-run stats.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
