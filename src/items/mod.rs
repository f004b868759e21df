//! Item system: types, catalog, equipment, drops, ids, and inventory.

pub mod catalog;
pub mod drops;
pub mod equipment;
pub mod ids;
pub mod inventory;
pub mod types;

pub use catalog::GearCatalog;
pub use drops::{drop_rates_for, select_item, select_rarity, DropRates, LootTable};
pub use equipment::EquippedGear;
pub use ids::ItemIdGenerator;
pub use inventory::Inventory;
pub use types::{DroppedItem, GearItem, GearSlot, Rarity, SpecialEffect};
