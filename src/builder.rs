use std::sync::Arc;
use std::time::Duration;

use crate::api::{MealDbClient, RecipeApi};
use crate::classifier::DifficultyPolicy;
use crate::config::{LookupFailurePolicy, RouletteConfig, TotalFailurePolicy};
use crate::controller::{RefreshOutcome, SelectionController};
use crate::error::RouletteError;
use crate::fetcher::RecipeFetcher;
use crate::model::{DifficultyFilter, RecipeRecord};
use crate::pool::RecipePool;
use crate::presentation::Presenter;

/// Builder for configuring a [`RecipeRoulette`]
#[derive(Default)]
pub struct RecipeRouletteBuilder {
    config: RouletteConfig,
    ingredients: Option<Vec<String>>,
    timeout: Option<Duration>,
    lookup_timeout: Option<Duration>,
    api: Option<Arc<dyn RecipeApi>>,
}

impl RecipeRouletteBuilder {
    /// Start from a loaded configuration. Later builder calls override it.
    ///
    /// # Example
    /// ```
    /// use recipe_roulette::{RecipeRoulette, RouletteConfig};
    ///
    /// let builder = RecipeRoulette::builder().with_config(RouletteConfig::default());
    /// ```
    pub fn with_config(mut self, config: RouletteConfig) -> Self {
        self.config = config;
        self
    }

    /// Add an ingredient filter queried on every refresh
    ///
    /// # Example
    /// ```
    /// use recipe_roulette::RecipeRoulette;
    ///
    /// let builder = RecipeRoulette::builder()
    ///     .ingredient("chicken")
    ///     .ingredient("chicken_breast");
    /// ```
    pub fn ingredient(mut self, ingredient: impl Into<String>) -> Self {
        self.ingredients
            .get_or_insert_with(Vec::new)
            .push(ingredient.into());
        self
    }

    /// Replace the ingredient filters
    pub fn ingredients<I, S>(mut self, ingredients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ingredients = Some(ingredients.into_iter().map(Into::into).collect());
        self
    }

    pub fn difficulty_policy(mut self, policy: DifficultyPolicy) -> Self {
        self.config.difficulty_policy = policy;
        self
    }

    pub fn lookup_failure(mut self, policy: LookupFailurePolicy) -> Self {
        self.config.lookup_failure = policy;
        self
    }

    pub fn total_failure(mut self, policy: TotalFailurePolicy) -> Self {
        self.config.total_failure = policy;
        self
    }

    /// Set a client-wide timeout for HTTP requests
    ///
    /// # Example
    /// ```
    /// use recipe_roulette::RecipeRoulette;
    /// use std::time::Duration;
    ///
    /// let builder = RecipeRoulette::builder().timeout(Duration::from_secs(10));
    /// ```
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Set the timeout for each detail lookup
    pub fn lookup_timeout(mut self, duration: Duration) -> Self {
        self.lookup_timeout = Some(duration);
        self
    }

    /// Point the HTTP client at another TheMealDB-compatible API
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.api.base_url = base_url.into();
        self
    }

    /// Seed the picker so results are reproducible
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Use a custom API implementation instead of the HTTP client
    pub fn api(mut self, api: Arc<dyn RecipeApi>) -> Self {
        self.api = Some(api);
        self
    }

    /// Build the roulette. Nothing is fetched until [`RecipeRoulette::refresh`].
    ///
    /// # Errors
    /// Returns `RouletteError` if:
    /// - No ingredient filter is configured
    /// - The HTTP client cannot be created
    pub fn build(self) -> Result<RecipeRoulette, RouletteError> {
        let config = self.config;
        let ingredients: Vec<String> = self
            .ingredients
            .unwrap_or_else(|| config.ingredients.clone())
            .into_iter()
            .filter(|i| !i.trim().is_empty())
            .collect();
        if ingredients.is_empty() {
            return Err(RouletteError::Builder(
                "No ingredient filters specified. Use .ingredient()".to_string(),
            ));
        }

        let api: Arc<dyn RecipeApi> = match self.api {
            Some(api) => api,
            None => {
                let timeout = self
                    .timeout
                    .unwrap_or(Duration::from_secs(config.api.timeout_secs));
                Arc::new(MealDbClient::new(config.api.base_url.clone(), timeout)?)
            }
        };

        let lookup_timeout = self
            .lookup_timeout
            .unwrap_or(Duration::from_secs(config.api.lookup_timeout_secs));
        let fetcher = RecipeFetcher::new(api)
            .with_difficulty_policy(config.difficulty_policy)
            .with_lookup_failure(config.lookup_failure)
            .with_lookup_timeout(lookup_timeout);

        let pool = Arc::new(RecipePool::new());
        let controller = match config.seed {
            Some(seed) => SelectionController::with_seed(pool, seed),
            None => SelectionController::new(pool),
        };

        Ok(RecipeRoulette {
            fetcher,
            controller,
            ingredients,
            total_failure: config.total_failure,
        })
    }
}

/// A configured fetcher and controller pair
pub struct RecipeRoulette {
    fetcher: RecipeFetcher,
    controller: SelectionController,
    ingredients: Vec<String>,
    total_failure: TotalFailurePolicy,
}

impl RecipeRoulette {
    /// Creates a new builder
    ///
    /// # Example
    /// ```
    /// use recipe_roulette::RecipeRoulette;
    ///
    /// let builder = RecipeRoulette::builder();
    /// ```
    pub fn builder() -> RecipeRouletteBuilder {
        RecipeRouletteBuilder::default()
    }

    /// Fetch the configured ingredients and replace the pool
    ///
    /// # Example
    /// ```no_run
    /// # use recipe_roulette::RecipeRoulette;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let roulette = RecipeRoulette::builder().ingredient("eggs").build()?;
    /// roulette.refresh().await?;
    /// println!("{}", roulette.pick_one().name);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn refresh(&self) -> Result<RefreshOutcome, RouletteError> {
        self.controller
            .refresh(&self.fetcher, self.ingredients.as_slice(), self.total_failure)
            .await
    }

    pub fn set_filter(&self, filter: DifficultyFilter) {
        self.controller.set_filter(filter);
    }

    pub fn pick_one(&self) -> RecipeRecord {
        self.controller.pick_one()
    }

    pub fn show_one(&self, presenter: &mut dyn Presenter) -> Result<RecipeRecord, RouletteError> {
        self.controller.show_one(presenter)
    }

    pub fn ingredients(&self) -> &[String] {
        &self.ingredients
    }

    pub fn controller(&self) -> &SelectionController {
        &self.controller
    }

    pub fn fetcher(&self) -> &RecipeFetcher {
        &self.fetcher
    }
}
