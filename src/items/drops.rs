use super::catalog::GearCatalog;
use super::ids::ItemIdGenerator;
use super::types::{DroppedItem, GearItem, Rarity};
use rand::Rng;

/// Probability of each rarity for one drop, indexed by `Rarity::index()`.
///
/// The values need not sum to 1; whatever mass is left over resolves to
/// common (see `select_rarity`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropRates([f64; 6]);

impl DropRates {
    pub const fn new(rates: [f64; 6]) -> Self {
        Self(rates)
    }

    pub fn get(&self, rarity: Rarity) -> f64 {
        self.0[rarity.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Rarity, f64)> + '_ {
        Rarity::ALL.iter().map(move |r| (*r, self.get(*r)))
    }

    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }
}

// (minimum level, [common, uncommon, rare, epic, legendary, mythic])
const DROP_RATE_TIERS: [(u32, DropRates); 8] = [
    (15, DropRates::new([0.35, 0.25, 0.20, 0.12, 0.05, 0.03])),
    (12, DropRates::new([0.40, 0.25, 0.18, 0.10, 0.04, 0.03])),
    (10, DropRates::new([0.45, 0.25, 0.16, 0.08, 0.03, 0.03])),
    (8, DropRates::new([0.48, 0.25, 0.15, 0.07, 0.03, 0.02])),
    (6, DropRates::new([0.50, 0.25, 0.15, 0.07, 0.02, 0.01])),
    (4, DropRates::new([0.55, 0.25, 0.15, 0.04, 0.01, 0.0])),
    (2, DropRates::new([0.60, 0.25, 0.12, 0.03, 0.0, 0.0])),
    (0, DropRates::new([0.65, 0.25, 0.10, 0.0, 0.0, 0.0])),
];

/// Rarity distribution for drops at `level`. Mass shifts toward rarer tiers
/// at levels 2, 4, 6, 8, 10, 12 and 15.
pub fn drop_rates_for(level: u32) -> DropRates {
    DROP_RATE_TIERS
        .iter()
        .find(|(min_level, _)| level >= *min_level)
        .map(|(_, rates)| *rates)
        .unwrap_or(DROP_RATE_TIERS[DROP_RATE_TIERS.len() - 1].1)
}

/// Pick the first rarity whose running cumulative probability reaches `roll`.
/// Falls back to common when the rates leave `roll` uncovered.
pub fn select_rarity(rates: &DropRates, roll: f64) -> Rarity {
    let mut cumulative = 0.0;
    for (rarity, rate) in rates.iter() {
        cumulative += rate;
        if roll <= cumulative {
            return rarity;
        }
    }
    Rarity::Common
}

pub fn roll_rarity(rates: &DropRates, rng: &mut impl Rng) -> Rarity {
    select_rarity(rates, rng.gen::<f64>())
}

/// Uniformly pick a catalog item of `rarity`, falling back to the common tier
/// when that rarity has no items. Returns None only for a catalog with no
/// common items.
pub fn select_item(catalog: &GearCatalog, rarity: Rarity, rng: &mut impl Rng) -> Option<GearItem> {
    let mut pool = catalog.of_rarity(rarity);
    if pool.is_empty() {
        pool = catalog.of_rarity(Rarity::Common);
    }
    if pool.is_empty() {
        return None;
    }
    Some(pool[rng.gen_range(0..pool.len())].clone())
}

pub fn roll_drop(chance: f64, rng: &mut impl Rng) -> bool {
    rng.gen::<f64>() < chance
}

/// Rarity selection, item sampling and id assignment for battle loot.
#[derive(Debug, Clone, Default)]
pub struct LootTable {
    catalog: GearCatalog,
    ids: ItemIdGenerator,
}

impl LootTable {
    pub fn new(catalog: GearCatalog, ids: ItemIdGenerator) -> Self {
        Self { catalog, ids }
    }

    pub fn catalog(&self) -> &GearCatalog {
        &self.catalog
    }

    pub fn ids(&self) -> &ItemIdGenerator {
        &self.ids
    }

    pub fn ids_mut(&mut self) -> &mut ItemIdGenerator {
        &mut self.ids
    }

    /// Generate one item appropriate for `level`.
    pub fn generate(&mut self, level: u32, rng: &mut impl Rng) -> Option<DroppedItem> {
        let rarity = roll_rarity(&drop_rates_for(level), rng);
        let gear = select_item(&self.catalog, rarity, rng)?;
        let unique_id = self.ids.next_id(&gear.id, rng);
        Some(DroppedItem { unique_id, gear })
    }
}
