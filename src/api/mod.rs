mod meal_db;

pub use meal_db::{MealDbClient, MealDetail, MAX_INGREDIENT_SLOTS};

use async_trait::async_trait;

use crate::error::ApiError;
use crate::model::MealStub;

/// Read-only queries against a recipe API
#[async_trait]
pub trait RecipeApi: Send + Sync {
    /// Get the API name for logging (e.g., "themealdb")
    fn api_name(&self) -> &str;

    /// List meal stubs that use `ingredient`. An unknown ingredient yields an empty list.
    async fn list_by_ingredient(&self, ingredient: &str) -> Result<Vec<MealStub>, ApiError>;

    /// Look up the full meal record for `id`
    async fn lookup_meal(&self, id: &str) -> Result<MealDetail, ApiError>;
}
