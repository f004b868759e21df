use super::types::{GearItem, GearSlot, Rarity};
use crate::core::constants::{
    AOE_ARMOR_TARGETS, AOE_FULL_SET_TARGETS, AOE_WEAPON_TARGETS, SINGLE_TARGET,
};
use serde::{Deserialize, Serialize};

/// The two gear slots a hero can fill.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EquippedGear {
    pub weapon: Option<GearItem>,
    pub armor: Option<GearItem>,
}

impl EquippedGear {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: GearSlot) -> Option<&GearItem> {
        match slot {
            GearSlot::Weapon => self.weapon.as_ref(),
            GearSlot::Armor => self.armor.as_ref(),
        }
    }

    /// Put `item` into its slot, returning whatever was there before.
    pub fn equip(&mut self, item: GearItem) -> Option<GearItem> {
        match item.slot {
            GearSlot::Weapon => self.weapon.replace(item),
            GearSlot::Armor => self.armor.replace(item),
        }
    }

    pub fn unequip(&mut self, slot: GearSlot) -> Option<GearItem> {
        match slot {
            GearSlot::Weapon => self.weapon.take(),
            GearSlot::Armor => self.armor.take(),
        }
    }

    /// Attack granted by the weapon slot.
    pub fn attack_bonus(&self) -> u32 {
        self.weapon.as_ref().map_or(0, |w| w.attack_bonus)
    }

    /// Health granted by the armor slot.
    pub fn health_bonus(&self) -> u32 {
        self.armor.as_ref().map_or(0, |a| a.health_bonus)
    }

    /// Number of enemies each attack strikes.
    pub fn target_count(&self) -> usize {
        let weapon_aoe = self.weapon.as_ref().is_some_and(GearItem::has_aoe);
        let armor_aoe = self.armor.as_ref().is_some_and(GearItem::has_aoe);
        match (weapon_aoe, armor_aoe) {
            (true, true) => AOE_FULL_SET_TARGETS,
            (true, false) => AOE_WEAPON_TARGETS,
            (false, true) => AOE_ARMOR_TARGETS,
            (false, false) => SINGLE_TARGET,
        }
    }

    /// Mythic weapon and mythic armor together grant critical hits.
    pub fn has_mythic_set(&self) -> bool {
        let is_mythic = |slot: &Option<GearItem>| {
            slot.as_ref().is_some_and(|item| item.rarity == Rarity::Mythic)
        };
        is_mythic(&self.weapon) && is_mythic(&self.armor)
    }
}
