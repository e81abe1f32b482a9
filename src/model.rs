use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::classifier::DifficultyPolicy;

/// Title shown when no recipe matches the active filter
pub const SENTINEL_NAME: &str = "No Recipe Available";

/// Instructions shown alongside the sentinel record
pub const SENTINEL_INSTRUCTIONS: &str =
    "No recipes match this filter yet. Try another difficulty or refresh the recipe list.";

const SENTINEL_ID: &str = "none";

/// Coarse difficulty derived from a recipe's content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("Unknown difficulty: {}", other)),
        }
    }
}

/// Filter applied when picking from the pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DifficultyFilter {
    #[default]
    All,
    Only(Difficulty),
}

impl DifficultyFilter {
    pub fn matches(&self, difficulty: Difficulty) -> bool {
        match self {
            DifficultyFilter::All => true,
            DifficultyFilter::Only(wanted) => *wanted == difficulty,
        }
    }
}

impl From<Difficulty> for DifficultyFilter {
    fn from(difficulty: Difficulty) -> Self {
        DifficultyFilter::Only(difficulty)
    }
}

impl fmt::Display for DifficultyFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DifficultyFilter::All => f.write_str("all"),
            DifficultyFilter::Only(difficulty) => difficulty.fmt(f),
        }
    }
}

impl FromStr for DifficultyFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(DifficultyFilter::All);
        }
        s.parse::<Difficulty>()
            .map(DifficultyFilter::Only)
            .map_err(|_| format!("Unknown filter '{}', expected all, easy, medium or hard", s))
    }
}

/// Minimal reference returned by an ingredient query
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MealStub {
    #[serde(rename = "idMeal")]
    pub id: String,
}

/// A normalized, classified recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipeRecord {
    pub id: String,
    pub name: String,
    pub instructions: String,
    pub ingredients: Vec<String>,
    pub difficulty: Difficulty,
}

impl RecipeRecord {
    /// Build a record and derive its difficulty under `policy`
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        instructions: impl Into<String>,
        ingredients: Vec<String>,
        policy: DifficultyPolicy,
    ) -> Self {
        let instructions = instructions.into();
        let difficulty = policy.classify_parts(&instructions, ingredients.len());
        RecipeRecord {
            id: id.into(),
            name: name.into(),
            instructions,
            ingredients,
            difficulty,
        }
    }

    /// Placeholder returned when no record matches `filter`
    pub fn sentinel(filter: DifficultyFilter) -> Self {
        let difficulty = match filter {
            DifficultyFilter::All => Difficulty::Easy,
            DifficultyFilter::Only(difficulty) => difficulty,
        };
        RecipeRecord {
            id: SENTINEL_ID.to_string(),
            name: SENTINEL_NAME.to_string(),
            instructions: SENTINEL_INSTRUCTIONS.to_string(),
            ingredients: Vec::new(),
            difficulty,
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.id == SENTINEL_ID && self.name == SENTINEL_NAME
    }
}
