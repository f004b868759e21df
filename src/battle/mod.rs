//! Battle progression: session state, turn timer, and the controller that
//! drives them.

pub mod collaborators;
pub mod controller;
pub mod session;
pub mod timer;

pub use collaborators::{GearLookup, LootSink, LootSinkError, NoGear, VecLootSink};
pub use controller::BattleController;
pub use session::{BattleLog, BattleSession, CompletionSet, LevelStatus, Speed};
pub use timer::TickTimer;
