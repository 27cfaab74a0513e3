mod mealdb;
mod raw;

pub use mealdb::MealDbSource;
pub use raw::{RawMatch, MAX_INGREDIENTS};

use crate::RecipeError;
use async_trait::async_trait;

/// A remote service that can look recipes up by name
#[async_trait]
pub trait RecipeSource: Send + Sync {
    /// Get the source name (e.g., "mealdb")
    fn source_name(&self) -> &str;

    /// Return every candidate the source has for `name`, in the source's order.
    ///
    /// An empty vector means the source answered but had no match.
    async fn search(&self, name: &str) -> Result<Vec<RawMatch>, RecipeError>;
}
