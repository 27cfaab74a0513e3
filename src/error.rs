use thiserror::Error;

/// Errors that can occur while looking up, saving or removing recipes
#[derive(Error, Debug)]
pub enum RecipeError {
    /// A required field is missing or blank in a create request
    #[error("Invalid recipe: {message}")]
    Validation { field: String, message: String },

    /// A recipe with this name is already saved
    #[error("Recipe already saved: {0}")]
    DuplicateName(String),

    /// No saved recipe has this identifier
    #[error("Recipe not found: {0}")]
    NotFound(String),

    /// The backing store could not be reached or failed the operation
    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[from] sqlx::Error),

    /// Failed to reach the external recipe source
    #[error("Failed to fetch recipes: {0}")]
    Fetch(#[from] reqwest::Error),

    /// The external recipe source answered with something unusable
    #[error("Recipe lookup failed: {0}")]
    Upstream(String),

    /// The external recipe source had no match for the query
    #[error("No recipes found for '{0}'")]
    NoResults(String),

    /// Failed to encode or decode stored JSON
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl RecipeError {
    pub(crate) fn validation(field: &str, message: impl Into<String>) -> Self {
        RecipeError::Validation {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn missing(field: &str) -> Self {
        Self::validation(field, format!("`{field}` is required"))
    }
}
