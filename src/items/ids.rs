//! Unique identifiers for generated items.
//!
//! Ids combine a monotonic counter, a strictly increasing nanosecond
//! timestamp and a random salt. Every issued id is remembered; a collision
//! with a remembered id is resolved by appending more salt.

use chrono::Utc;
use rand::Rng;
use std::collections::HashSet;

const SALT_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const SALT_LEN: usize = 9;

#[derive(Debug, Clone, Default)]
pub struct ItemIdGenerator {
    counter: u64,
    last_timestamp: i64,
    issued: HashSet<String>,
}

impl ItemIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new id for an item generated from catalog entry `prefix`.
    pub fn next_id(&mut self, prefix: &str, rng: &mut impl Rng) -> String {
        let now = Utc::now()
            .timestamp_nanos_opt()
            .unwrap_or(self.last_timestamp + 1);
        self.next_id_at(prefix, now, rng)
    }

    /// Issue an id using an explicit timestamp (nanoseconds).
    pub fn next_id_at(&mut self, prefix: &str, timestamp: i64, rng: &mut impl Rng) -> String {
        self.counter += 1;

        // Timestamps never repeat even if the clock stalls or goes backwards.
        let timestamp = timestamp.max(self.last_timestamp + 1);
        self.last_timestamp = timestamp;

        let mut id = format!("{}_{}_{}_{}", prefix, self.counter, timestamp, salt(rng));
        while self.issued.contains(&id) {
            id.push('_');
            id.push_str(&salt(rng));
        }

        self.issued.insert(id.clone());
        id
    }

    /// Remember an id issued elsewhere (e.g. an item restored into the
    /// inventory) so it is never handed out again. Returns false if it was
    /// already known.
    pub fn register(&mut self, id: &str) -> bool {
        self.issued.insert(id.to_string())
    }

    pub fn is_issued(&self, id: &str) -> bool {
        self.issued.contains(id)
    }

    pub fn issued_count(&self) -> usize {
        self.issued.len()
    }
}

fn salt(rng: &mut impl Rng) -> String {
    (0..SALT_LEN)
        .map(|_| SALT_ALPHABET[rng.gen_range(0..SALT_ALPHABET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_ids_are_unique_across_many_calls() {
        let mut ids = ItemIdGenerator::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut seen = HashSet::new();
        for _ in 0..1000 {
            assert!(seen.insert(ids.next_id("common_sword_1", &mut rng)));
        }
        assert_eq!(ids.issued_count(), 1000);
    }

    #[test]
    fn test_id_format() {
        let mut ids = ItemIdGenerator::new();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let id = ids.next_id_at("rare_armor_2", 5_000, &mut rng);
        assert!(id.starts_with("rare_armor_2_1_5000_"), "{id}");
        let salt_part = id.rsplit('_').next().unwrap();
        assert_eq!(salt_part.len(), SALT_LEN);
        assert!(ids.is_issued(&id));
    }

    #[test]
    fn test_timestamp_is_strictly_increasing() {
        let mut ids = ItemIdGenerator::new();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let first = ids.next_id_at("x", 100, &mut rng);
        // Clock went backwards: timestamp is bumped past the last one.
        let second = ids.next_id_at("x", 50, &mut rng);
        assert!(first.starts_with("x_1_100_"));
        assert!(second.starts_with("x_2_101_"), "{second}");
    }

    #[test]
    fn test_collision_is_resolved_by_extra_salt() {
        let mut rng_a = ChaCha8Rng::seed_from_u64(9);
        let mut rng_b = ChaCha8Rng::seed_from_u64(9);

        let mut first = ItemIdGenerator::new();
        let taken = first.next_id_at("epic_sword_1", 777, &mut rng_a);

        let mut second = ItemIdGenerator::new();
        assert!(second.register(&taken));
        let fresh = second.next_id_at("epic_sword_1", 777, &mut rng_b);

        assert_ne!(fresh, taken);
        assert!(fresh.starts_with(&taken), "salt is appended: {fresh}");
        assert!(second.is_issued(&taken));
        assert!(second.is_issued(&fresh));
    }

    #[test]
    fn test_register_reports_duplicates() {
        let mut ids = ItemIdGenerator::new();
        assert!(ids.register("restored_1"));
        assert!(!ids.register("restored_1"));
    }
}
