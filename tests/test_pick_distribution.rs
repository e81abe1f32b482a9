use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use recipe_roulette::{
    Difficulty, DifficultyFilter, RecipePool, RecipeRecord, SelectionController,
};
use std::collections::HashMap;
use std::sync::Arc;

const TRIALS: usize = 10_000;
const TOLERANCE: f64 = 0.02;

fn record(id: usize, difficulty: Difficulty) -> RecipeRecord {
    RecipeRecord {
        id: id.to_string(),
        name: format!("Recipe {}", id),
        instructions: "Cook it.".to_string(),
        ingredients: vec!["1 egg".to_string()],
        difficulty,
    }
}

fn assert_uniform(counts: &HashMap<String, usize>, candidates: usize) {
    assert_eq!(counts.len(), candidates, "every candidate should be picked");
    let expected = 1.0 / candidates as f64;
    for (id, count) in counts {
        let observed = *count as f64 / TRIALS as f64;
        assert!(
            (observed - expected).abs() < TOLERANCE,
            "recipe {} picked with frequency {:.4}, expected {:.4}",
            id,
            observed,
            expected
        );
    }
}

#[test]
fn test_pick_random_is_uniform_over_whole_pool() {
    for size in [1, 2, 4, 7] {
        let pool = RecipePool::with_records((0..size).map(|i| record(i, Difficulty::Easy)).collect());
        let mut rng = ChaCha8Rng::seed_from_u64(size as u64);

        let mut counts = HashMap::new();
        for _ in 0..TRIALS {
            let picked = pool.pick_random(DifficultyFilter::All, &mut rng);
            *counts.entry(picked.id).or_insert(0) += 1;
        }

        assert_uniform(&counts, size);
    }
}

#[test]
fn test_pick_random_is_uniform_within_filter() {
    let mut records: Vec<RecipeRecord> = (0..5).map(|i| record(i, Difficulty::Easy)).collect();
    records.extend((5..8).map(|i| record(i, Difficulty::Hard)));
    let pool = RecipePool::with_records(records);
    let mut rng = ChaCha8Rng::seed_from_u64(2024);

    let mut counts = HashMap::new();
    for _ in 0..TRIALS {
        let picked = pool.pick_random(DifficultyFilter::Only(Difficulty::Hard), &mut rng);
        assert_eq!(picked.difficulty, Difficulty::Hard);
        *counts.entry(picked.id).or_insert(0) += 1;
    }

    assert_uniform(&counts, 3);
}

#[test]
fn test_controller_picks_are_uniform() {
    let pool = Arc::new(RecipePool::with_records(
        (0..4).map(|i| record(i, Difficulty::Medium)).collect(),
    ));
    let controller = SelectionController::with_seed(pool, 5);

    let mut counts = HashMap::new();
    for _ in 0..TRIALS {
        *counts.entry(controller.pick_one().id).or_insert(0) += 1;
    }

    assert_uniform(&counts, 4);
}

#[test]
fn test_sentinel_for_empty_and_unmatched_pools() {
    let mut rng = ChaCha8Rng::seed_from_u64(0);

    let empty = RecipePool::new();
    assert!(empty.pick_random(DifficultyFilter::All, &mut rng).is_sentinel());

    let mild = RecipePool::with_records(vec![
        record(1, Difficulty::Easy),
        record(2, Difficulty::Medium),
    ]);
    let picked = mild.pick_random(DifficultyFilter::Only(Difficulty::Hard), &mut rng);
    assert!(picked.is_sentinel());
    assert_eq!(picked.name, "No Recipe Available");
    assert!(picked.ingredients.is_empty());
}
