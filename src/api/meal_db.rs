use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;

use super::RecipeApi;
use crate::error::ApiError;
use crate::model::MealStub;

/// Number of numbered ingredient/measure field pairs on a meal record
pub const MAX_INGREDIENT_SLOTS: usize = 20;

const USER_AGENT: &str = "Mozilla/5.0 (compatible; RecipeRoulette/0.3)";

/// TheMealDB wraps every answer in `{"meals": [...]}`, with `null` for no results
#[derive(Debug, Deserialize)]
struct MealsEnvelope<T> {
    meals: Option<Vec<T>>,
}

/// Full meal record as returned by a detail lookup
#[derive(Debug, Clone, Deserialize)]
pub struct MealDetail {
    #[serde(rename = "idMeal")]
    pub id: String,
    #[serde(rename = "strMeal")]
    pub name: Option<String>,
    #[serde(rename = "strInstructions")]
    pub instructions: Option<String>,
    /// Remaining fields, including `strIngredient1..20` and `strMeasure1..20`
    #[serde(flatten)]
    pub fields: HashMap<String, Value>,
}

impl MealDetail {
    /// Raw `(ingredient, measure)` pair for 1-based `slot`
    pub fn slot(&self, slot: usize) -> (Option<&str>, Option<&str>) {
        let ingredient = self
            .fields
            .get(&format!("strIngredient{}", slot))
            .and_then(Value::as_str);
        let measure = self
            .fields
            .get(&format!("strMeasure{}", slot))
            .and_then(Value::as_str);
        (ingredient, measure)
    }
}

/// Client for TheMealDB-compatible HTTP APIs
pub struct MealDbClient {
    client: Client,
    base_url: String,
}

impl MealDbClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(MealDbClient {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn get_meals<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &str,
    ) -> Result<Vec<T>, ApiError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!("GET {}?i={}", url, query);

        let envelope: MealsEnvelope<T> = self
            .client
            .get(&url)
            .query(&[("i", query)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(envelope.meals.unwrap_or_default())
    }
}

#[async_trait]
impl RecipeApi for MealDbClient {
    fn api_name(&self) -> &str {
        "themealdb"
    }

    async fn list_by_ingredient(&self, ingredient: &str) -> Result<Vec<MealStub>, ApiError> {
        self.get_meals("filter.php", ingredient).await
    }

    async fn lookup_meal(&self, id: &str) -> Result<MealDetail, ApiError> {
        let meals: Vec<MealDetail> = self.get_meals("lookup.php", id).await?;
        meals
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::NotFound(id.to_string()))
    }
}
