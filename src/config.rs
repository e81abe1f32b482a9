use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

use crate::classifier::DifficultyPolicy;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct RouletteConfig {
    /// Recipe API connection settings
    #[serde(default)]
    pub api: ApiConfig,
    /// Ingredient filters queried on every refresh
    #[serde(default = "default_ingredients")]
    pub ingredients: Vec<String>,
    /// How difficulty is derived from fetched meals
    #[serde(default)]
    pub difficulty_policy: DifficultyPolicy,
    /// What a failed detail lookup does to the whole fetch
    #[serde(default)]
    pub lookup_failure: LookupFailurePolicy,
    /// What a refresh does when no usable recipes were fetched
    #[serde(default)]
    pub total_failure: TotalFailurePolicy,
    /// Fixed seed for the picker; random when absent
    #[serde(default)]
    pub seed: Option<u64>,
    /// Display settings for the text presenter
    #[serde(default)]
    pub display: DisplayConfig,
}

impl Default for RouletteConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            ingredients: default_ingredients(),
            difficulty_policy: DifficultyPolicy::default(),
            lookup_failure: LookupFailurePolicy::default(),
            total_failure: TotalFailurePolicy::default(),
            seed: None,
            display: DisplayConfig::default(),
        }
    }
}

/// Configuration for the recipe API
#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Base URL the `filter.php` and `lookup.php` paths are appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Client-wide request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Per detail lookup timeout in seconds
    #[serde(default = "default_lookup_timeout_secs")]
    pub lookup_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            lookup_timeout_secs: default_lookup_timeout_secs(),
        }
    }
}

/// Configuration for the text presenter
#[derive(Debug, Deserialize, Clone, Default)]
pub struct DisplayConfig {
    /// Truncate instructions longer than this many characters
    #[serde(default)]
    pub max_instruction_chars: Option<usize>,
}

/// Per-lookup failure handling during a fetch
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum LookupFailurePolicy {
    /// Drop the failed meal and keep the rest
    #[default]
    BestEffort,
    /// Any failed query or lookup fails the whole fetch
    FailFast,
}

/// Refresh behaviour when the fetch yields nothing usable
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TotalFailurePolicy {
    /// Return the fetch error to the caller and keep the current pool
    Error,
    /// Adopt the built-in recipe list
    #[default]
    BuiltIn,
}

// Default value functions
fn default_base_url() -> String {
    "https://www.themealdb.com/api/json/v1/1".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_lookup_timeout_secs() -> u64 {
    5
}

fn default_ingredients() -> Vec<String> {
    vec!["eggs".to_string()]
}

impl RouletteConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with ROULETTE__ prefix
    /// 2. roulette.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: ROULETTE__API__BASE_URL, ROULETTE__INGREDIENTS=chicken,beef
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    /// Parse configuration from a TOML string, ignoring the environment
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}

/// Load configuration from file and environment variables
///
/// See [`RouletteConfig::load`] for the source priority.
pub fn load_config() -> Result<RouletteConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("roulette").required(false))
        // Use double underscore for nested: ROULETTE__API__BASE_URL
        .add_source(
            Environment::with_prefix("ROULETTE")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("ingredients")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
