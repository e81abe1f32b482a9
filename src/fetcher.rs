use futures::future::join_all;
use log::{debug, info, warn};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use crate::api::{MealDetail, RecipeApi, MAX_INGREDIENT_SLOTS};
use crate::classifier::DifficultyPolicy;
use crate::config::LookupFailurePolicy;
use crate::error::{ApiError, FetchError};
use crate::model::RecipeRecord;

const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

/// Queries the recipe API and turns the answers into classified records.
///
/// A fetch never touches shared state: it returns a batch which the caller
/// adopts into a [`RecipePool`](crate::pool::RecipePool).
pub struct RecipeFetcher {
    api: Arc<dyn RecipeApi>,
    difficulty_policy: DifficultyPolicy,
    lookup_failure: LookupFailurePolicy,
    lookup_timeout: Duration,
}

impl RecipeFetcher {
    pub fn new(api: Arc<dyn RecipeApi>) -> Self {
        RecipeFetcher {
            api,
            difficulty_policy: DifficultyPolicy::default(),
            lookup_failure: LookupFailurePolicy::default(),
            lookup_timeout: DEFAULT_LOOKUP_TIMEOUT,
        }
    }

    pub fn with_difficulty_policy(mut self, policy: DifficultyPolicy) -> Self {
        self.difficulty_policy = policy;
        self
    }

    pub fn with_lookup_failure(mut self, policy: LookupFailurePolicy) -> Self {
        self.lookup_failure = policy;
        self
    }

    pub fn with_lookup_timeout(mut self, timeout: Duration) -> Self {
        self.lookup_timeout = timeout;
        self
    }

    pub fn difficulty_policy(&self) -> DifficultyPolicy {
        self.difficulty_policy
    }

    /// Fetch every meal matching any of `ingredient_filters`.
    ///
    /// # Errors
    /// Returns `FetchError` if:
    /// - No non-blank filter was given
    /// - Every ingredient query failed, or none returned a meal
    /// - Every detail lookup failed
    /// - Any query or lookup failed under [`LookupFailurePolicy::FailFast`]
    pub async fn fetch<S: AsRef<str>>(
        &self,
        ingredient_filters: &[S],
    ) -> Result<Vec<RecipeRecord>, FetchError> {
        let filters = unique_filters(ingredient_filters);
        if filters.is_empty() {
            return Err(FetchError::NoFilters);
        }

        let ids = self.collect_candidate_ids(&filters).await?;
        if ids.is_empty() {
            return Err(FetchError::NoCandidates);
        }
        debug!(
            "Looking up {} unique meals from {}",
            ids.len(),
            self.api.api_name()
        );

        let lookups = join_all(ids.iter().map(|id| self.lookup_with_timeout(id))).await;

        let mut records = Vec::with_capacity(ids.len());
        let mut failures = 0;
        for (id, lookup) in ids.iter().zip(lookups) {
            match lookup.and_then(|detail| self.normalize(detail)) {
                Ok(record) => records.push(record),
                Err(e) => match self.lookup_failure {
                    LookupFailurePolicy::FailFast => {
                        return Err(FetchError::LookupFailed {
                            id: id.clone(),
                            reason: e.to_string(),
                        });
                    }
                    LookupFailurePolicy::BestEffort => {
                        warn!("Dropping meal {}: {}", id, e);
                        failures += 1;
                    }
                },
            }
        }

        if records.is_empty() {
            return Err(FetchError::NoUsableRecords(failures));
        }

        info!(
            "Fetched {} recipes for [{}] ({} lookups dropped)",
            records.len(),
            filters.join(", "),
            failures
        );
        Ok(records)
    }

    /// Run every ingredient query and merge the stub ids, first seen wins
    async fn collect_candidate_ids(&self, filters: &[String]) -> Result<Vec<String>, FetchError> {
        let results = join_all(
            filters
                .iter()
                .map(|ingredient| self.api.list_by_ingredient(ingredient)),
        )
        .await;

        let mut seen = HashSet::new();
        let mut ids = Vec::new();
        let mut query_failures = Vec::new();

        for (ingredient, result) in filters.iter().zip(results) {
            match result {
                Ok(stubs) => {
                    debug!("Ingredient '{}' matched {} meals", ingredient, stubs.len());
                    for stub in stubs {
                        if seen.insert(stub.id.clone()) {
                            ids.push(stub.id);
                        }
                    }
                }
                Err(e) => {
                    if self.lookup_failure == LookupFailurePolicy::FailFast {
                        return Err(FetchError::QueryFailed {
                            ingredient: ingredient.clone(),
                            reason: e.to_string(),
                        });
                    }
                    warn!("Ingredient query '{}' failed: {}", ingredient, e);
                    query_failures.push(format!("{}: {}", ingredient, e));
                }
            }
        }

        if query_failures.len() == filters.len() {
            return Err(FetchError::AllQueriesFailed(query_failures));
        }

        Ok(ids)
    }

    async fn lookup_with_timeout(&self, id: &str) -> Result<MealDetail, ApiError> {
        match tokio::time::timeout(self.lookup_timeout, self.api.lookup_meal(id)).await {
            Ok(result) => result,
            Err(_) => Err(ApiError::Timeout(self.lookup_timeout)),
        }
    }

    fn normalize(&self, detail: MealDetail) -> Result<RecipeRecord, ApiError> {
        let name = detail
            .name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| ApiError::Malformed(format!("meal {} has no name", detail.id)))?
            .to_string();
        let ingredients = normalize_ingredients(&detail);
        let instructions = detail.instructions.unwrap_or_default();

        Ok(RecipeRecord::new(
            detail.id,
            name,
            instructions,
            ingredients,
            self.difficulty_policy,
        ))
    }
}

/// Format the filled ingredient slots as `"<measure> <ingredient>"` or `"<ingredient>"`
pub fn normalize_ingredients(detail: &MealDetail) -> Vec<String> {
    (1..=MAX_INGREDIENT_SLOTS)
        .filter_map(|slot| {
            let (ingredient, measure) = detail.slot(slot);
            let ingredient = ingredient.map(str::trim).filter(|i| !i.is_empty())?;
            match measure.map(str::trim).filter(|m| !m.is_empty()) {
                Some(measure) => Some(format!("{} {}", measure, ingredient)),
                None => Some(ingredient.to_string()),
            }
        })
        .collect()
}

fn unique_filters<S: AsRef<str>>(filters: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    filters
        .iter()
        .map(|f| f.as_ref().trim())
        .filter(|f| !f.is_empty() && seen.insert(f.to_string()))
        .map(str::to_string)
        .collect()
}
