// Tick timing
pub const NORMAL_TICK_INTERVAL_MS: u64 = 2000;
pub const FAST_TICK_INTERVAL_MS: u64 = 1000;
/// Poll cadence of the real-time runner; ticks still fire on the speed interval.
pub const RUNNER_POLL_INTERVAL_MS: u64 = 100;

// Battle log
pub const MAX_LOG_ENTRIES: usize = 50;

// Level structure
pub const BOSS_LEVEL: u32 = 10;
pub const LAST_REGULAR_SCALING_LEVEL: u32 = 5;
pub const MAX_WAVE_SIZE: u32 = 5;

// Enemy wave HP
pub const BASE_ENEMY_HP: f64 = 100.0;
pub const BOSS_BASE_HP: f64 = 5000.0;
pub const ENEMY_HP_LEVEL_GROWTH: f64 = 2.0;
pub const ENEMY_HP_CHAPTER_GROWTH: f64 = 1.5;

// Enemy damage
pub const ENEMY_BASE_DAMAGE: f64 = 15.0;
pub const BOSS_BASE_DAMAGE: f64 = 100.0;
pub const ENEMY_DAMAGE_CHAPTER_GROWTH: f64 = 1.2;

// Damage jitter: base * U(MIN, MAX)
pub const DAMAGE_JITTER_MIN: f64 = 0.8;
pub const DAMAGE_JITTER_MAX: f64 = 1.2;

// Gear effects
pub const MYTHIC_SET_CRIT_MULTIPLIER: f64 = 2.0;
pub const AOE_WEAPON_TARGETS: usize = 3;
pub const AOE_ARMOR_TARGETS: usize = 2;
pub const AOE_FULL_SET_TARGETS: usize = 5;
pub const SINGLE_TARGET: usize = 1;

// Experience and leveling
pub const KILL_XP_MIN: u32 = 5;
pub const KILL_XP_MAX: u32 = 10;
pub const STARTING_XP_TO_NEXT_LEVEL: u32 = 10;
pub const XP_TO_NEXT_LEVEL_GROWTH: f64 = 1.5;
pub const LEVEL_UP_ATTACK_BASE: f64 = 3.0;
pub const LEVEL_UP_ATTACK_PER_LEVEL: f64 = 0.5;
pub const LEVEL_UP_HEALTH_BASE: f64 = 15.0;
pub const LEVEL_UP_HEALTH_PER_LEVEL: f64 = 2.0;

// Heroes not in the base-stat table
pub const DEFAULT_HERO_ATTACK: u32 = 20;
pub const DEFAULT_HERO_HEALTH: u32 = 100;

// Loot
pub const TICK_DROP_CHANCE: f64 = 0.05;
pub const COMPLETION_DROP_CHANCE_PER_ENEMY: f64 = 0.01;
pub const INVENTORY_SLOTS: usize = 20;
