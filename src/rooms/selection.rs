//! Weighted draw of room offers.

use super::types::RoomArchetype;
use crate::core::constants::RARITY_WEIGHT_DIVISOR;
use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::Rng;

/// Draw weight for a rarity level: 1 / 3^rarity.
pub fn rarity_weight(rarity: u8) -> f64 {
    1.0 / RARITY_WEIGHT_DIVISOR.powi(i32::from(rarity))
}

/// Draws `k` room offers from `catalog`.
///
/// The exit room is never offered. Small pools are returned whole, in
/// catalog order. Larger pools are sampled with replacement by rarity
/// weight, so an offer may contain duplicates. If nothing offered is free
/// and the pool has a free room, the first slot is swapped for a random
/// free room.
pub fn draw_choices<R: Rng>(
    catalog: &[RoomArchetype],
    k: usize,
    rng: &mut R,
) -> Vec<RoomArchetype> {
    let pool: Vec<&RoomArchetype> = catalog.iter().filter(|room| !room.is_exit()).collect();

    let mut choices: Vec<RoomArchetype> = if pool.len() <= k {
        pool.iter().map(|room| (*room).clone()).collect()
    } else {
        let weights: Vec<f64> = pool.iter().map(|room| rarity_weight(room.rarity)).collect();
        match WeightedIndex::new(&weights) {
            Ok(dist) => (0..k).map(|_| pool[dist.sample(rng)].clone()).collect(),
            Err(err) => {
                log::error!("room weights rejected ({}), falling back to catalog order", err);
                pool.iter().take(k).map(|room| (*room).clone()).collect()
            }
        }
    };

    ensure_free_choice(&pool, &mut choices, rng);
    choices
}

/// Guarantees a zero-cost option when the pool has one.
fn ensure_free_choice<R: Rng>(
    pool: &[&RoomArchetype],
    choices: &mut [RoomArchetype],
    rng: &mut R,
) {
    if choices.is_empty() || choices.iter().any(RoomArchetype::is_free) {
        return;
    }

    let free: Vec<&RoomArchetype> = pool.iter().copied().filter(|room| room.is_free()).collect();
    if let Some(room) = free.choose(rng) {
        log::debug!("no free room drawn, offering {} in slot 0", room.name);
        choices[0] = (*room).clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rooms::catalog::{antechamber, catalog};
    use crate::rooms::types::RoomType;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn create_test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(12345)
    }

    fn costly(name: &str, rarity: u8) -> RoomArchetype {
        RoomArchetype::new(name, RoomType::Neutral)
            .with_cost(1)
            .with_rarity(rarity)
    }

    #[test]
    fn test_rarity_weight_exact() {
        assert_eq!(rarity_weight(0), 1.0);
        assert_eq!(rarity_weight(1), 1.0 / 3.0);
        assert_eq!(rarity_weight(2), 1.0 / 9.0);
        assert_eq!(rarity_weight(3), 1.0 / 27.0);
    }

    #[test]
    fn test_rarity_weight_strictly_decreasing() {
        for r in 0..3u8 {
            assert!(rarity_weight(r) > rarity_weight(r + 1));
        }
    }

    #[test]
    fn test_draw_returns_k_members_of_pool() {
        let mut rng = create_test_rng();
        for _ in 0..200 {
            let choices = draw_choices(catalog(), 3, &mut rng);
            assert_eq!(choices.len(), 3);
            for choice in &choices {
                assert!(catalog().contains(choice), "{} not in catalog", choice.name);
            }
        }
    }

    #[test]
    fn test_draw_always_offers_free_room() {
        let mut rng = create_test_rng();
        for _ in 0..500 {
            let choices = draw_choices(catalog(), 3, &mut rng);
            assert!(choices.iter().any(|c| c.gem_cost == 0));
        }
    }

    #[test]
    fn test_exit_never_offered() {
        let mut pool = catalog().to_vec();
        pool.push(antechamber());
        pool.push(antechamber().with_rarity(0));

        let mut rng = create_test_rng();
        for _ in 0..500 {
            let choices = draw_choices(&pool, 3, &mut rng);
            assert!(choices.iter().all(|c| !c.is_exit()));
        }
    }

    #[test]
    fn test_small_pool_returned_in_order() {
        let pool = vec![
            costly("A", 0),
            antechamber(),
            RoomArchetype::new("B", RoomType::Neutral),
        ];
        let mut rng = create_test_rng();
        let choices = draw_choices(&pool, 3, &mut rng);
        let names: Vec<&str> = choices.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn test_free_room_substituted_into_first_slot() {
        // The free room is legendary, so most raw draws miss it
        let mut pool: Vec<RoomArchetype> = (0..6).map(|i| costly(&format!("C{}", i), 0)).collect();
        pool.push(RoomArchetype::new("Free", RoomType::Neutral).with_rarity(3));

        let mut rng = create_test_rng();
        let mut substituted = 0;
        for _ in 0..200 {
            let choices = draw_choices(&pool, 3, &mut rng);
            assert!(choices.iter().any(|c| c.is_free()));
            if choices[0].name == "Free" && !choices[1..].iter().any(|c| c.is_free()) {
                substituted += 1;
            }
        }
        assert!(substituted > 100, "substituted only {} times", substituted);
    }

    #[test]
    fn test_no_free_room_in_pool_means_no_substitution() {
        let pool: Vec<RoomArchetype> = (0..6).map(|i| costly(&format!("C{}", i), 0)).collect();
        let mut rng = create_test_rng();
        for _ in 0..50 {
            let choices = draw_choices(&pool, 3, &mut rng);
            assert_eq!(choices.len(), 3);
            assert!(choices.iter().all(|c| c.gem_cost == 1));
        }
    }

    #[test]
    fn test_common_rooms_drawn_more_often() {
        let pool = vec![
            RoomArchetype::new("Common", RoomType::Neutral),
            RoomArchetype::new("Rare", RoomType::Neutral).with_rarity(1),
            RoomArchetype::new("Epic", RoomType::Neutral).with_rarity(2),
            RoomArchetype::new("Legendary", RoomType::Neutral).with_rarity(3),
        ];
        let mut rng = create_test_rng();
        let mut counts = [0u32; 4];
        for _ in 0..3000 {
            for choice in draw_choices(&pool, 3, &mut rng) {
                counts[usize::from(choice.rarity)] += 1;
            }
        }
        assert!(counts[0] > counts[1], "{:?}", counts);
        assert!(counts[1] > counts[2], "{:?}", counts);
        assert!(counts[2] > counts[3], "{:?}", counts);
    }

    #[test]
    fn test_zero_sized_offer() {
        let mut rng = create_test_rng();
        assert!(draw_choices(catalog(), 0, &mut rng).is_empty());
    }
}
