//! Interfaces to the subsystems the battle engine depends on but does not own.

use crate::items::equipment::EquippedGear;
use crate::items::types::DroppedItem;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LootSinkError {
    #[error("inventory full ({0} slots)")]
    InventoryFull(usize),

    #[error("item rejected: {0}")]
    Rejected(String),
}

/// Read-only view of what each hero currently has equipped.
pub trait GearLookup {
    fn equipped(&self, hero: &str) -> EquippedGear;
}

impl GearLookup for HashMap<String, EquippedGear> {
    fn equipped(&self, hero: &str) -> EquippedGear {
        self.get(hero).cloned().unwrap_or_default()
    }
}

/// A party with nothing equipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGear;

impl GearLookup for NoGear {
    fn equipped(&self, _hero: &str) -> EquippedGear {
        EquippedGear::default()
    }
}

/// Where dropped items go.
pub trait LootSink {
    fn deposit(&mut self, item: DroppedItem) -> Result<(), LootSinkError>;

    fn item_count(&self) -> usize;

    fn capacity(&self) -> usize;

    fn is_full(&self) -> bool {
        self.item_count() >= self.capacity()
    }
}

/// Loot sink that keeps everything in a Vec with a fixed capacity.
#[derive(Debug, Clone, Default)]
pub struct VecLootSink {
    pub items: Vec<DroppedItem>,
    pub capacity: usize,
}

impl VecLootSink {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::new(),
            capacity,
        }
    }
}

impl LootSink for VecLootSink {
    fn deposit(&mut self, item: DroppedItem) -> Result<(), LootSinkError> {
        if self.is_full() {
            return Err(LootSinkError::InventoryFull(self.capacity));
        }
        self.items.push(item);
        Ok(())
    }

    fn item_count(&self) -> usize {
        self.items.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }
}
