use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

use crate::model::{Difficulty, RecipeRecord};

const EASY_MAX_INSTRUCTION_CHARS: usize = 200;
const MEDIUM_MAX_INSTRUCTION_CHARS: usize = 400;
const EASY_MAX_INGREDIENTS: usize = 9;
const MEDIUM_MAX_INGREDIENTS: usize = 13;

/// How a record's difficulty is derived. Fixed per deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifficultyPolicy {
    /// Longer preparation text means a harder recipe
    #[default]
    ByInstructionLength,
    /// More ingredients means a harder recipe
    ByIngredientCount,
}

impl DifficultyPolicy {
    pub fn classify_parts(&self, instructions: &str, ingredient_count: usize) -> Difficulty {
        match self {
            DifficultyPolicy::ByInstructionLength => {
                let length = instructions.chars().count();
                if length <= EASY_MAX_INSTRUCTION_CHARS {
                    Difficulty::Easy
                } else if length <= MEDIUM_MAX_INSTRUCTION_CHARS {
                    Difficulty::Medium
                } else {
                    Difficulty::Hard
                }
            }
            DifficultyPolicy::ByIngredientCount => {
                if ingredient_count <= EASY_MAX_INGREDIENTS {
                    Difficulty::Easy
                } else if ingredient_count <= MEDIUM_MAX_INGREDIENTS {
                    Difficulty::Medium
                } else {
                    Difficulty::Hard
                }
            }
        }
    }
}

impl fmt::Display for DifficultyPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DifficultyPolicy::ByInstructionLength => f.write_str("by_instruction_length"),
            DifficultyPolicy::ByIngredientCount => f.write_str("by_ingredient_count"),
        }
    }
}

impl FromStr for DifficultyPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "by_instruction_length" | "instructions" => Ok(DifficultyPolicy::ByInstructionLength),
            "by_ingredient_count" | "ingredients" => Ok(DifficultyPolicy::ByIngredientCount),
            other => Err(format!("Unknown difficulty policy: {}", other)),
        }
    }
}

/// Derive the difficulty of `record` under `policy`
pub fn classify(record: &RecipeRecord, policy: DifficultyPolicy) -> Difficulty {
    policy.classify_parts(&record.instructions, record.ingredients.len())
}
