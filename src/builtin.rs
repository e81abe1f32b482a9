//! Small embedded recipe list adopted when a refresh yields nothing usable.
//!
//! These carry hand-assigned difficulties rather than classified ones.

use crate::model::{Difficulty, RecipeRecord};

const BUILT_IN: &[(&str, &str, Difficulty)] = &[
    (
        "Scrambled Eggs",
        "Beat eggs, cook in butter, season, enjoy!",
        Difficulty::Easy,
    ),
    (
        "Boiled Eggs",
        "Boil eggs for 6-10 minutes, cool, peel, and serve.",
        Difficulty::Easy,
    ),
    (
        "Omelette",
        "Beat eggs, add fillings, cook on medium heat.",
        Difficulty::Medium,
    ),
    (
        "Egg Salad",
        "Boiled eggs, mayo, mustard, mix and serve.",
        Difficulty::Medium,
    ),
    (
        "Soufflé",
        "Separate eggs, whip whites, fold into yolks, bake.",
        Difficulty::Hard,
    ),
    (
        "Eggs Benedict",
        "Poach eggs, hollandaise sauce, toasted muffin.",
        Difficulty::Hard,
    ),
];

pub fn built_in_recipes() -> Vec<RecipeRecord> {
    BUILT_IN
        .iter()
        .enumerate()
        .map(|(i, (name, instructions, difficulty))| RecipeRecord {
            id: format!("builtin-{}", i + 1),
            name: name.to_string(),
            instructions: instructions.to_string(),
            ingredients: Vec::new(),
            difficulty: *difficulty,
        })
        .collect()
}
