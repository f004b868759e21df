//! Static gear catalog that loot is drawn from.

use super::types::{GearItem, GearSlot, Rarity, SpecialEffect};

struct GearTemplate {
    id: &'static str,
    name: &'static str,
    slot: GearSlot,
    attack_bonus: u32,
    health_bonus: u32,
    rarity: Rarity,
    aoe: bool,
}

const fn weapon(
    id: &'static str,
    name: &'static str,
    attack_bonus: u32,
    health_bonus: u32,
    rarity: Rarity,
    aoe: bool,
) -> GearTemplate {
    GearTemplate {
        id,
        name,
        slot: GearSlot::Weapon,
        attack_bonus,
        health_bonus,
        rarity,
        aoe,
    }
}

const fn armor(
    id: &'static str,
    name: &'static str,
    attack_bonus: u32,
    health_bonus: u32,
    rarity: Rarity,
) -> GearTemplate {
    GearTemplate {
        id,
        name,
        slot: GearSlot::Armor,
        attack_bonus,
        health_bonus,
        rarity,
        aoe: false,
    }
}

// No uncommon gear exists yet; uncommon rolls fall back to the common tier.
const GEAR_TEMPLATES: &[GearTemplate] = &[
    weapon("common_sword_1", "Iron Sword", 5, 0, Rarity::Common, false),
    weapon("common_sword_2", "Steel Sword", 8, 0, Rarity::Common, false),
    weapon("common_sword_3", "Bronze Sword", 6, 0, Rarity::Common, false),
    weapon("common_sword_4", "Copper Sword", 4, 0, Rarity::Common, false),
    weapon("common_sword_5", "Stone Sword", 3, 0, Rarity::Common, false),
    armor("common_armor_1", "Leather Armor", 0, 10, Rarity::Common),
    armor("common_armor_2", "Cloth Armor", 0, 8, Rarity::Common),
    armor("common_armor_3", "Wooden Armor", 0, 12, Rarity::Common),
    armor("common_armor_4", "Bone Armor", 0, 15, Rarity::Common),
    armor("common_armor_5", "Hide Armor", 0, 9, Rarity::Common),
    weapon("rare_sword_1", "Silver Sword", 12, 0, Rarity::Rare, false),
    weapon("rare_sword_2", "Gold Sword", 15, 0, Rarity::Rare, false),
    weapon("rare_sword_3", "Crystal Sword", 18, 0, Rarity::Rare, false),
    weapon("rare_sword_4", "Obsidian Sword", 20, 0, Rarity::Rare, false),
    weapon("rare_sword_5", "Diamond Sword", 22, 0, Rarity::Rare, false),
    armor("rare_armor_1", "Chain Mail", 0, 25, Rarity::Rare),
    armor("rare_armor_2", "Scale Armor", 0, 30, Rarity::Rare),
    armor("rare_armor_3", "Plate Armor", 0, 35, Rarity::Rare),
    armor("rare_armor_4", "Mithril Armor", 0, 40, Rarity::Rare),
    armor("rare_armor_5", "Adamantine Armor", 0, 45, Rarity::Rare),
    weapon("epic_sword_1", "Thunder Sword", 30, 0, Rarity::Epic, true),
    weapon("epic_sword_2", "Fire Sword", 35, 0, Rarity::Epic, true),
    weapon("epic_sword_3", "Ice Sword", 32, 0, Rarity::Epic, true),
    weapon("epic_sword_4", "Lightning Sword", 38, 0, Rarity::Epic, true),
    weapon("epic_sword_5", "Shadow Sword", 40, 0, Rarity::Epic, true),
    armor("epic_armor_1", "Dragon Scale Armor", 0, 60, Rarity::Epic),
    armor("epic_armor_2", "Phoenix Armor", 0, 70, Rarity::Epic),
    armor("epic_armor_3", "Celestial Armor", 0, 80, Rarity::Epic),
    armor("epic_armor_4", "Void Armor", 0, 90, Rarity::Epic),
    armor("epic_armor_5", "Ethereal Armor", 0, 100, Rarity::Epic),
    weapon("legendary_sword_1", "Excalibur", 50, 20, Rarity::Legendary, true),
    weapon("legendary_sword_2", "Stormbringer", 55, 15, Rarity::Legendary, true),
    weapon("legendary_sword_3", "Frostmourne", 60, 10, Rarity::Legendary, true),
    weapon("legendary_sword_4", "Thunderfury", 65, 25, Rarity::Legendary, true),
    weapon("legendary_sword_5", "Ashbringer", 70, 30, Rarity::Legendary, true),
    armor("legendary_armor_1", "Aegis of the Titans", 10, 120, Rarity::Legendary),
    armor("legendary_armor_2", "Crown of the Eternal", 15, 130, Rarity::Legendary),
    armor("legendary_armor_3", "Shield of the Ancients", 20, 140, Rarity::Legendary),
    armor("legendary_armor_4", "Armor of the Gods", 25, 150, Rarity::Legendary),
    armor("legendary_armor_5", "Vestments of the Void", 30, 160, Rarity::Legendary),
    weapon("mythic_sword_1", "Blade of the Universe", 100, 50, Rarity::Mythic, true),
    weapon("mythic_sword_2", "Sword of Creation", 120, 60, Rarity::Mythic, true),
    weapon("mythic_sword_3", "Weapon of the Gods", 150, 80, Rarity::Mythic, true),
    weapon("mythic_sword_4", "Blade of Eternity", 200, 100, Rarity::Mythic, true),
    weapon("mythic_sword_5", "Ultimate Weapon", 300, 150, Rarity::Mythic, true),
    armor("mythic_armor_1", "Armor of the Cosmos", 50, 300, Rarity::Mythic),
    armor("mythic_armor_2", "Shield of Infinity", 60, 350, Rarity::Mythic),
    armor("mythic_armor_3", "Crown of the Universe", 70, 400, Rarity::Mythic),
    armor("mythic_armor_4", "Vestments of Creation", 80, 450, Rarity::Mythic),
    armor("mythic_armor_5", "Ultimate Armor", 100, 500, Rarity::Mythic),
];

impl GearTemplate {
    fn to_item(&self) -> GearItem {
        GearItem {
            id: self.id.to_string(),
            name: self.name.to_string(),
            slot: self.slot,
            attack_bonus: self.attack_bonus,
            health_bonus: self.health_bonus,
            rarity: self.rarity,
            effect: if self.aoe {
                SpecialEffect::AreaOfEffect
            } else {
                SpecialEffect::None
            },
        }
    }
}

/// The item pool loot is sampled from.
#[derive(Debug, Clone)]
pub struct GearCatalog {
    items: Vec<GearItem>,
}

impl Default for GearCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl GearCatalog {
    /// The built-in catalog of 50 items.
    pub fn standard() -> Self {
        Self {
            items: GEAR_TEMPLATES.iter().map(GearTemplate::to_item).collect(),
        }
    }

    /// Build a catalog from arbitrary items. A catalog is well-formed when it
    /// contains at least one common item.
    pub fn from_items(items: Vec<GearItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[GearItem] {
        &self.items
    }

    pub fn of_rarity(&self, rarity: Rarity) -> Vec<&GearItem> {
        self.items.iter().filter(|i| i.rarity == rarity).collect()
    }

    pub fn find(&self, id: &str) -> Option<&GearItem> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn is_well_formed(&self) -> bool {
        self.items.iter().any(|i| i.rarity == Rarity::Common)
    }
}
