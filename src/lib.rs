pub mod api;
pub mod config;
pub mod error;
pub mod model;
pub mod normalizer;
pub mod source;
pub mod store;

use log::debug;

pub use config::AppConfig;
pub use error::RecipeError;
pub use model::{Ingredient, NewRecipe, Recipe, RecipeSummary};
pub use normalizer::{normalize, NormalizedRecipe};
pub use source::{MealDbSource, RawMatch, RecipeSource};
pub use store::RecipeStore;

/// Look `name` up on `source` and normalize every match.
///
/// # Errors
/// - `Validation` if `name` is blank
/// - `NoResults` if the source has no match
/// - `Fetch` / `Upstream` if the source could not be queried
pub async fn search_recipes(
    source: &dyn RecipeSource,
    name: &str,
) -> Result<Vec<NormalizedRecipe>, RecipeError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(RecipeError::validation("name", "Please enter a recipe name"));
    }

    let matches = source.search(name).await?;
    if matches.is_empty() {
        return Err(RecipeError::NoResults(name.to_string()));
    }

    debug!(
        "{} match(es) for {:?} from {}",
        matches.len(),
        name,
        source.source_name()
    );
    Ok(matches.iter().map(normalize).collect())
}

/// The match to display for a search: the first one the source returns
pub async fn search_first(
    source: &dyn RecipeSource,
    name: &str,
) -> Result<NormalizedRecipe, RecipeError> {
    search_recipes(source, name)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| RecipeError::NoResults(name.to_string()))
}

/// Search TheMealDB as configured by [`AppConfig::load`] and return the first match
pub async fn lookup_recipe(name: &str) -> Result<NormalizedRecipe, RecipeError> {
    let source = MealDbSource::new(&AppConfig::load()?)?;
    search_first(&source, name).await
}
