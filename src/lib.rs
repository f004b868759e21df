//! Idle Warlords - battle simulation engine for an idle RPG.
//!
//! Heroes fight waves of enemies one timer tick at a time, level up from
//! kills, collect gear drops, and push through ten-level chapters that end
//! in a boss. Everything is deterministic given an rng, so the same engine
//! drives the headless runner, the balance simulator, and the tests.

pub mod battle;
pub mod build_info;
pub mod combat;
pub mod core;
pub mod items;
pub mod simulator;
