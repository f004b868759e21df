use crate::core::constants::*;
use crate::items::equipment::EquippedGear;
use serde::{Deserialize, Serialize};

/// Level-1 stats of a recruitable hero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseStats {
    pub attack_power: u32,
    pub health: u32,
}

const HERO_BASE_STATS: [(&str, BaseStats); 4] = [
    (
        "Liu Bei",
        BaseStats {
            attack_power: 25,
            health: 120,
        },
    ),
    (
        "Guan Yu",
        BaseStats {
            attack_power: 30,
            health: 100,
        },
    ),
    (
        "Zhang Fei",
        BaseStats {
            attack_power: 28,
            health: 110,
        },
    ),
    (
        "Zhuge Liang",
        BaseStats {
            attack_power: 22,
            health: 90,
        },
    ),
];

/// Base stats for `name`; unknown heroes get the default line.
pub fn base_stats(name: &str) -> BaseStats {
    HERO_BASE_STATS
        .iter()
        .find(|(hero, _)| *hero == name)
        .map(|(_, stats)| *stats)
        .unwrap_or(BaseStats {
            attack_power: DEFAULT_HERO_ATTACK,
            health: DEFAULT_HERO_HEALTH,
        })
}

pub fn known_heroes() -> impl Iterator<Item = &'static str> {
    HERO_BASE_STATS.iter().map(|(name, _)| *name)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hero {
    pub name: String,
    pub health: u32,
    pub max_health: u32,
    pub attack_power: u32,
    pub level: u32,
    pub experience: u32,
    pub experience_to_next_level: u32,
}

impl Hero {
    /// A level-1 hero from the base-stat table plus gear bonuses, at full health.
    pub fn recruit(name: &str, gear: &EquippedGear) -> Self {
        let base = base_stats(name);
        let max_health = base.health + gear.health_bonus();
        Self {
            name: name.to_string(),
            health: max_health,
            max_health,
            attack_power: base.attack_power + gear.attack_bonus(),
            level: 1,
            experience: 0,
            experience_to_next_level: STARTING_XP_TO_NEXT_LEVEL,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn heal_full(&mut self) {
        self.health = self.max_health;
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
    }

    /// Add experience and apply every level-up it pays for. Returns the
    /// number of levels gained.
    pub fn gain_experience(&mut self, amount: u32) -> u32 {
        self.experience += amount;
        let mut levels = 0;
        while self.experience >= self.experience_to_next_level {
            self.experience -= self.experience_to_next_level;
            self.level_up();
            levels += 1;
        }
        levels
    }

    fn level_up(&mut self) {
        self.level += 1;
        let level = self.level as f64;
        self.experience_to_next_level =
            ((self.experience_to_next_level as f64 * XP_TO_NEXT_LEVEL_GROWTH).floor() as u32)
                .max(1);
        self.attack_power += (LEVEL_UP_ATTACK_BASE + level * LEVEL_UP_ATTACK_PER_LEVEL).floor() as u32;
        self.max_health += (LEVEL_UP_HEALTH_BASE + level * LEVEL_UP_HEALTH_PER_LEVEL).floor() as u32;
        self.heal_full();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::catalog::GearCatalog;

    #[test]
    fn test_base_stats_table() {
        assert_eq!(base_stats("Liu Bei").attack_power, 25);
        assert_eq!(base_stats("Liu Bei").health, 120);
        assert_eq!(base_stats("Guan Yu").attack_power, 30);
        assert_eq!(base_stats("Zhuge Liang").health, 90);
        assert_eq!(known_heroes().count(), 4);
    }

    #[test]
    fn test_unknown_hero_gets_defaults() {
        let stats = base_stats("Cao Cao");
        assert_eq!(stats.attack_power, 20);
        assert_eq!(stats.health, 100);
    }

    #[test]
    fn test_recruit_applies_gear() {
        let catalog = GearCatalog::standard();
        let mut gear = EquippedGear::new();
        gear.equip(catalog.find("rare_sword_2").unwrap().clone());
        gear.equip(catalog.find("rare_armor_1").unwrap().clone());

        let hero = Hero::recruit("Zhang Fei", &gear);
        assert_eq!(hero.attack_power, 28 + 15);
        assert_eq!(hero.max_health, 110 + 25);
        assert_eq!(hero.health, hero.max_health);
        assert_eq!(hero.level, 1);
        assert_eq!(hero.experience, 0);
        assert_eq!(hero.experience_to_next_level, 10);
    }

    #[test]
    fn test_take_damage_clamps_at_zero() {
        let mut hero = Hero::recruit("Liu Bei", &EquippedGear::new());
        hero.take_damage(50);
        assert_eq!(hero.health, 70);
        hero.take_damage(500);
        assert_eq!(hero.health, 0);
        assert!(!hero.is_alive());
        hero.heal_full();
        assert_eq!(hero.health, 120);
    }

    #[test]
    fn test_level_up_growth() {
        let mut hero = Hero::recruit("Liu Bei", &EquippedGear::new());
        hero.take_damage(30);

        assert_eq!(hero.gain_experience(13), 1);
        assert_eq!(hero.level, 2);
        assert_eq!(hero.experience, 3);
        assert_eq!(hero.experience_to_next_level, 15);
        // floor(3 + 2 * 0.5) = 4
        assert_eq!(hero.attack_power, 29);
        // floor(15 + 2 * 2) = 19
        assert_eq!(hero.max_health, 139);
        assert_eq!(hero.health, 139);
    }

    #[test]
    fn test_below_threshold_no_level_up() {
        let mut hero = Hero::recruit("Guan Yu", &EquippedGear::new());
        assert_eq!(hero.gain_experience(9), 0);
        assert_eq!(hero.level, 1);
        assert_eq!(hero.experience, 9);
    }

    #[test]
    fn test_multiple_level_ups_at_once() {
        let mut hero = Hero::recruit("Guan Yu", &EquippedGear::new());
        // 10 for level 2, 15 for level 3, 22 for level 4
        assert_eq!(hero.gain_experience(48), 3);
        assert_eq!(hero.level, 4);
        assert_eq!(hero.experience, 1);
        assert_eq!(hero.experience_to_next_level, 33);
        assert!(hero.experience < hero.experience_to_next_level);
    }
}
