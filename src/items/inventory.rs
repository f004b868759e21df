//! Reference inventory: shared item storage plus per-hero loadouts.
//!
//! The battle engine only sees this through `LootSink` and `GearLookup`.

use super::equipment::EquippedGear;
use super::types::{DroppedItem, GearSlot};
use crate::battle::collaborators::{GearLookup, LootSink, LootSinkError};
use crate::core::constants::INVENTORY_SLOTS;
use std::cmp::Ordering;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
struct Loadout {
    weapon: Option<DroppedItem>,
    armor: Option<DroppedItem>,
}

impl Loadout {
    fn slot_mut(&mut self, slot: GearSlot) -> &mut Option<DroppedItem> {
        match slot {
            GearSlot::Weapon => &mut self.weapon,
            GearSlot::Armor => &mut self.armor,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Inventory {
    items: Vec<DroppedItem>,
    capacity: usize,
    loadouts: HashMap<String, Loadout>,
}

impl Default for Inventory {
    fn default() -> Self {
        Self::with_capacity(INVENTORY_SLOTS)
    }
}

/// Rarity first (best first), then weapons before armor, then total stats.
fn display_order(a: &DroppedItem, b: &DroppedItem) -> Ordering {
    b.gear
        .rarity
        .cmp(&a.gear.rarity)
        .then_with(|| match (a.gear.slot, b.gear.slot) {
            (GearSlot::Weapon, GearSlot::Armor) => Ordering::Less,
            (GearSlot::Armor, GearSlot::Weapon) => Ordering::Greater,
            _ => Ordering::Equal,
        })
        .then_with(|| b.gear.total_stats().cmp(&a.gear.total_stats()))
}

impl Inventory {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::new(),
            capacity,
            loadouts: HashMap::new(),
        }
    }

    /// Stored (unequipped) items in display order.
    pub fn sorted_items(&self) -> Vec<&DroppedItem> {
        let mut items: Vec<&DroppedItem> = self.items.iter().collect();
        items.sort_by(|a, b| display_order(a, b));
        items
    }

    pub fn contains(&self, unique_id: &str) -> bool {
        self.items.iter().any(|i| i.unique_id == unique_id)
    }

    /// Move a stored item onto `hero`. Whatever occupied the slot goes back
    /// into storage, even past capacity.
    pub fn equip(&mut self, unique_id: &str, hero: &str) -> bool {
        let Some(pos) = self.items.iter().position(|i| i.unique_id == unique_id) else {
            return false;
        };
        let item = self.items.remove(pos);
        let slot = item.gear.slot;
        let loadout = self.loadouts.entry(hero.to_string()).or_default();
        if let Some(previous) = loadout.slot_mut(slot).replace(item) {
            self.items.push(previous);
        }
        true
    }

    pub fn unequip(&mut self, hero: &str, slot: GearSlot) -> bool {
        let Some(item) = self
            .loadouts
            .get_mut(hero)
            .and_then(|loadout| loadout.slot_mut(slot).take())
        else {
            return false;
        };
        self.items.push(item);
        true
    }

    /// Equipping hero for an item, if any.
    pub fn equipped_by(&self, unique_id: &str) -> Option<&str> {
        self.loadouts.iter().find_map(|(hero, loadout)| {
            let holds = |slot: &Option<DroppedItem>| {
                slot.as_ref().is_some_and(|i| i.unique_id == unique_id)
            };
            (holds(&loadout.weapon) || holds(&loadout.armor)).then_some(hero.as_str())
        })
    }

    /// Sell one stored item, returning the gold it fetched.
    pub fn sell(&mut self, unique_id: &str) -> Option<u64> {
        let pos = self.items.iter().position(|i| i.unique_id == unique_id)?;
        Some(self.items.remove(pos).gear.rarity.sell_value())
    }

    /// Sell every stored item. Equipped gear is kept.
    pub fn sell_all(&mut self) -> u64 {
        self.items
            .drain(..)
            .map(|i| i.gear.rarity.sell_value())
            .sum()
    }

    /// Drop the lowest-ranked items until storage fits its capacity again.
    /// Returns how many items were discarded.
    pub fn enforce_capacity(&mut self) -> usize {
        if self.items.len() <= self.capacity {
            return 0;
        }
        self.items.sort_by(display_order);
        let removed = self.items.len() - self.capacity;
        self.items.truncate(self.capacity);
        removed
    }
}

impl LootSink for Inventory {
    fn deposit(&mut self, item: DroppedItem) -> Result<(), LootSinkError> {
        if self.is_full() {
            return Err(LootSinkError::InventoryFull(self.capacity));
        }
        if self.contains(&item.unique_id) {
            return Err(LootSinkError::Rejected(format!(
                "duplicate id {}",
                item.unique_id
            )));
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

impl GearLookup for Inventory {
    fn equipped(&self, hero: &str) -> EquippedGear {
        self.loadouts
            .get(hero)
            .map(|loadout| EquippedGear {
                weapon: loadout.weapon.as_ref().map(|i| i.gear.clone()),
                armor: loadout.armor.as_ref().map(|i| i.gear.clone()),
            })
            .unwrap_or_default()
    }
}
