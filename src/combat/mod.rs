//! Heroes, enemy waves, and the per-turn combat resolver.

pub mod hero;
pub mod logic;
pub mod wave;

pub use hero::{base_stats, Hero};
pub use logic::{BattleEvent, TickOutcome, TickResult};
pub use wave::{compute_wave, Wave};
