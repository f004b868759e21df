use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GearSlot {
    Weapon,
    Armor,
}

impl GearSlot {
    pub fn name(&self) -> &'static str {
        match self {
            GearSlot::Weapon => "Weapon",
            GearSlot::Armor => "Armor",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Common = 0,
    Uncommon = 1,
    Rare = 2,
    Epic = 3,
    Legendary = 4,
    Mythic = 5,
}

impl Rarity {
    /// All tiers, lowest first. Cumulative rarity selection walks this order.
    pub const ALL: [Rarity; 6] = [
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::Epic,
        Rarity::Legendary,
        Rarity::Mythic,
    ];

    /// Returns the display name for this rarity tier.
    pub fn name(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
            Rarity::Mythic => "Mythic",
        }
    }

    /// Gold received when an item of this tier is sold.
    pub fn sell_value(&self) -> u64 {
        match self {
            Rarity::Common => 10,
            Rarity::Uncommon => 15,
            Rarity::Rare => 25,
            Rarity::Epic => 50,
            Rarity::Legendary => 100,
            Rarity::Mythic => 200,
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// Special effect carried by a piece of gear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SpecialEffect {
    #[default]
    None,
    /// Hits several enemies per attack; the target count depends on which
    /// slots carry the effect (see `EquippedGear::target_count`).
    AreaOfEffect,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GearItem {
    /// Catalog id shared by every copy of this item
    pub id: String,
    pub name: String,
    pub slot: GearSlot,
    pub attack_bonus: u32,
    pub health_bonus: u32,
    pub rarity: Rarity,
    #[serde(default)]
    pub effect: SpecialEffect,
}

impl GearItem {
    pub fn has_aoe(&self) -> bool {
        self.effect == SpecialEffect::AreaOfEffect
    }

    pub fn total_stats(&self) -> u32 {
        self.attack_bonus + self.health_bonus
    }
}

/// A generated copy of a catalog item, distinguishable from identical stacks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DroppedItem {
    pub unique_id: String,
    pub gear: GearItem,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sword(effect: SpecialEffect) -> GearItem {
        GearItem {
            id: "test_sword".to_string(),
            name: "Test Sword".to_string(),
            slot: GearSlot::Weapon,
            attack_bonus: 12,
            health_bonus: 3,
            rarity: Rarity::Rare,
            effect,
        }
    }

    #[test]
    fn test_rarity_ordering() {
        assert!(Rarity::Common < Rarity::Uncommon);
        assert!(Rarity::Uncommon < Rarity::Rare);
        assert!(Rarity::Rare < Rarity::Epic);
        assert!(Rarity::Epic < Rarity::Legendary);
        assert!(Rarity::Legendary < Rarity::Mythic);
    }

    #[test]
    fn test_rarity_all_is_sorted() {
        let mut sorted = Rarity::ALL;
        sorted.sort();
        assert_eq!(sorted, Rarity::ALL);
        for (i, rarity) in Rarity::ALL.iter().enumerate() {
            assert_eq!(rarity.index(), i);
        }
    }

    #[test]
    fn test_rarity_name() {
        assert_eq!(Rarity::Common.name(), "Common");
        assert_eq!(Rarity::Uncommon.name(), "Uncommon");
        assert_eq!(Rarity::Mythic.name(), "Mythic");
    }

    #[test]
    fn test_sell_value_increases_with_rarity() {
        for pair in Rarity::ALL.windows(2) {
            assert!(pair[0].sell_value() < pair[1].sell_value());
        }
    }

    #[test]
    fn test_gear_item_aoe_flag() {
        assert!(sword(SpecialEffect::AreaOfEffect).has_aoe());
        assert!(!sword(SpecialEffect::None).has_aoe());
        assert_eq!(sword(SpecialEffect::None).total_stats(), 15);
    }

    #[test]
    fn test_missing_effect_deserializes_as_none() {
        let json = r#"{"id":"x","name":"X","slot":"Armor","attack_bonus":0,"health_bonus":5,"rarity":"Common"}"#;
        let item: GearItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.effect, SpecialEffect::None);
        assert_eq!(item.slot, GearSlot::Armor);
    }
}
