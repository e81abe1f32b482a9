use thiserror::Error;

/// Errors from a single call to the recipe API
#[derive(Error, Debug)]
pub enum ApiError {
    /// Transport or HTTP status failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered but had no meal for this id
    #[error("Meal not found: {0}")]
    NotFound(String),

    /// The API answered with a meal missing required fields
    #[error("Malformed meal record: {0}")]
    Malformed(String),

    /// The request did not finish within the per-request timeout
    #[error("Request timed out after {0:?}")]
    Timeout(std::time::Duration),
}

/// Raised when a fetch produced no usable recipes
#[derive(Error, Debug)]
pub enum FetchError {
    /// No non-blank ingredient filter was supplied
    #[error("No ingredient filters given")]
    NoFilters,

    /// Every ingredient query failed
    #[error("All ingredient queries failed: {}", .0.join("; "))]
    AllQueriesFailed(Vec<String>),

    /// An ingredient query failed under the fail-fast policy
    #[error("Ingredient query '{ingredient}' failed: {reason}")]
    QueryFailed { ingredient: String, reason: String },

    /// Queries succeeded but matched nothing
    #[error("No meals matched the ingredient filters")]
    NoCandidates,

    /// A detail lookup failed under the fail-fast policy
    #[error("Lookup for meal {id} failed: {reason}")]
    LookupFailed { id: String, reason: String },

    /// Every detail lookup failed
    #[error("All {0} meal lookups failed")]
    NoUsableRecords(usize),
}

/// Top-level error for building and driving a recipe roulette
#[derive(Error, Debug)]
pub enum RouletteError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// HTTP client could not be created
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// A refresh was requested while another is still running
    #[error("A refresh is already in progress")]
    RefreshInProgress,

    /// Builder configuration error
    #[error("Builder error: {0}")]
    Builder(String),

    /// The presentation adapter failed to render a recipe
    #[error("Presentation failed: {0}")]
    Presentation(String),
}
