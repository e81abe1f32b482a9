use log::{debug, info, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::{Arc, Mutex, PoisonError};

use crate::builtin::built_in_recipes;
use crate::config::TotalFailurePolicy;
use crate::error::{FetchError, RouletteError};
use crate::fetcher::RecipeFetcher;
use crate::model::{DifficultyFilter, RecipeRecord};
use crate::pool::RecipePool;
use crate::presentation::Presenter;

/// Result of a successful refresh
#[derive(Debug)]
pub enum RefreshOutcome {
    /// The pool now holds this many fetched recipes
    Fetched(usize),
    /// The fetch failed and the built-in recipes were adopted instead
    BuiltIn { count: usize, reason: FetchError },
}

/// Owns the recipe pool, the active filter and the picker's randomness
pub struct SelectionController {
    pool: Arc<RecipePool>,
    filter: Mutex<DifficultyFilter>,
    rng: Mutex<ChaCha8Rng>,
    refresh_gate: tokio::sync::Mutex<()>,
}

impl SelectionController {
    pub fn new(pool: Arc<RecipePool>) -> Self {
        Self::with_seed(pool, rand::random())
    }

    /// Create a controller whose picks are reproducible for a given seed
    pub fn with_seed(pool: Arc<RecipePool>, seed: u64) -> Self {
        SelectionController {
            pool,
            filter: Mutex::new(DifficultyFilter::All),
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
            refresh_gate: tokio::sync::Mutex::new(()),
        }
    }

    pub fn pool(&self) -> &Arc<RecipePool> {
        &self.pool
    }

    /// Set the filter used by the next pick
    pub fn set_filter(&self, filter: DifficultyFilter) {
        debug!("Active filter set to {}", filter);
        *self.filter.lock().unwrap_or_else(PoisonError::into_inner) = filter;
    }

    pub fn filter(&self) -> DifficultyFilter {
        *self.filter.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Pick one recipe under the active filter, or the sentinel if none match
    pub fn pick_one(&self) -> RecipeRecord {
        let filter = self.filter();
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        self.pool.pick_random(filter, &mut *rng)
    }

    /// Pick one recipe and hand it to `presenter`
    pub fn show_one(&self, presenter: &mut dyn Presenter) -> Result<RecipeRecord, RouletteError> {
        let record = self.pick_one();
        presenter
            .present(&record.name, &record.instructions, &record.ingredients)
            .map_err(|e| RouletteError::Presentation(e.to_string()))?;
        Ok(record)
    }

    /// Fetch a new batch and adopt it into the pool.
    ///
    /// Only one refresh runs at a time; a second call while one is in flight
    /// gets [`RouletteError::RefreshInProgress`]. When the fetch fails, the
    /// pool is left untouched under [`TotalFailurePolicy::Error`] and replaced
    /// by the built-in recipes under [`TotalFailurePolicy::BuiltIn`].
    pub async fn refresh<S: AsRef<str>>(
        &self,
        fetcher: &RecipeFetcher,
        ingredients: &[S],
        on_total_failure: TotalFailurePolicy,
    ) -> Result<RefreshOutcome, RouletteError> {
        let _guard = self
            .refresh_gate
            .try_lock()
            .map_err(|_| RouletteError::RefreshInProgress)?;

        match fetcher.fetch(ingredients).await {
            Ok(records) => {
                self.pool.replace(records);
                let count = self.pool.len();
                info!("Recipe pool refreshed with {} recipes", count);
                Ok(RefreshOutcome::Fetched(count))
            }
            Err(reason) => match on_total_failure {
                TotalFailurePolicy::Error => {
                    warn!("Refresh failed, keeping current pool: {}", reason);
                    Err(reason.into())
                }
                TotalFailurePolicy::BuiltIn => {
                    warn!("Refresh failed, using built-in recipes: {}", reason);
                    self.pool.replace(built_in_recipes());
                    Ok(RefreshOutcome::BuiltIn {
                        count: self.pool.len(),
                        reason,
                    })
                }
            },
        }
    }
}
