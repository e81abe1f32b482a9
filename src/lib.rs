pub mod api;
pub mod builder;
pub mod builtin;
pub mod classifier;
pub mod config;
pub mod controller;
pub mod error;
pub mod fetcher;
pub mod model;
pub mod pool;
pub mod presentation;

pub use api::{MealDbClient, MealDetail, RecipeApi};
pub use builder::{RecipeRoulette, RecipeRouletteBuilder};
pub use builtin::built_in_recipes;
pub use classifier::{classify, DifficultyPolicy};
pub use config::{LookupFailurePolicy, RouletteConfig, TotalFailurePolicy};
pub use controller::{RefreshOutcome, SelectionController};
pub use error::{ApiError, FetchError, RouletteError};
pub use fetcher::RecipeFetcher;
pub use model::{Difficulty, DifficultyFilter, MealStub, RecipeRecord};
pub use pool::RecipePool;
pub use presentation::{Presenter, TextPresenter};

use std::sync::Arc;
use std::time::Duration;

/// Fetch and classify every meal using any of `ingredients` from TheMealDB,
/// with default policies.
pub async fn fetch_recipes(ingredients: &[&str]) -> Result<Vec<RecipeRecord>, RouletteError> {
    let config = RouletteConfig::default();
    let client = MealDbClient::new(
        config.api.base_url,
        Duration::from_secs(config.api.timeout_secs),
    )?;
    let fetcher = RecipeFetcher::new(Arc::new(client));
    Ok(fetcher.fetch(ingredients).await?)
}
