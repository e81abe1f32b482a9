use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;
use std::sync::{Arc, PoisonError, RwLock};

use crate::model::{DifficultyFilter, RecipeRecord};

/// Holds the current batch of recipes.
///
/// The batch is an immutable snapshot; [`replace`](RecipePool::replace) swaps
/// the whole snapshot so a reader sees either the old set or the new one.
#[derive(Debug, Default)]
pub struct RecipePool {
    records: RwLock<Arc<Vec<RecipeRecord>>>,
}

impl RecipePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a pool already holding `records`
    pub fn with_records(records: Vec<RecipeRecord>) -> Self {
        let pool = Self::new();
        pool.replace(records);
        pool
    }

    /// Swap in a new batch. Duplicate ids keep the first record seen.
    pub fn replace(&self, records: Vec<RecipeRecord>) {
        let mut seen = HashSet::new();
        let unique: Vec<RecipeRecord> = records
            .into_iter()
            .filter(|record| seen.insert(record.id.clone()))
            .collect();
        debug!("Replacing recipe pool with {} records", unique.len());

        let snapshot = Arc::new(unique);
        *self.records.write().unwrap_or_else(PoisonError::into_inner) = snapshot;
    }

    /// The current batch
    pub fn snapshot(&self) -> Arc<Vec<RecipeRecord>> {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }

    /// Number of records matching `filter`
    pub fn count(&self, filter: DifficultyFilter) -> usize {
        self.snapshot()
            .iter()
            .filter(|record| filter.matches(record.difficulty))
            .count()
    }

    /// Pick uniformly among records matching `filter`.
    ///
    /// Returns the sentinel record when nothing matches; callers display it
    /// like any other recipe.
    pub fn pick_random<R: Rng + ?Sized>(
        &self,
        filter: DifficultyFilter,
        rng: &mut R,
    ) -> RecipeRecord {
        let snapshot = self.snapshot();
        let candidates: Vec<&RecipeRecord> = snapshot
            .iter()
            .filter(|record| filter.matches(record.difficulty))
            .collect();

        candidates
            .choose(rng)
            .map(|record| (*record).clone())
            .unwrap_or_else(|| RecipeRecord::sentinel(filter))
    }
}
