use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::api::{ApiError, AppState, DeletedResponse, SavedResponse};
use crate::model::{Ingredient, NewRecipe, Recipe};
use crate::normalizer::NormalizedRecipe;
use crate::RecipeError;

/// Body of `POST /api/recipes`.
///
/// Every field is optional at the JSON level so a missing one is reported
/// by name instead of as a generic decoding failure.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CreateRecipeRequest {
    pub name: Option<String>,
    pub ingredients: Option<Vec<IngredientPayload>>,
    pub instructions: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct IngredientPayload {
    pub item: Option<String>,
    pub quantity: Option<String>,
}

impl CreateRecipeRequest {
    /// Check presence of every required field and build the save candidate
    pub fn into_new_recipe(self) -> Result<NewRecipe, RecipeError> {
        let name = self.name.ok_or_else(|| RecipeError::missing("name"))?;
        let ingredients = self
            .ingredients
            .ok_or_else(|| RecipeError::missing("ingredients"))?;
        let instructions = self
            .instructions
            .ok_or_else(|| RecipeError::missing("instructions"))?;
        let image = self.image.ok_or_else(|| RecipeError::missing("image"))?;

        let ingredients = ingredients
            .into_iter()
            .enumerate()
            .map(|(position, ingredient)| {
                let item = ingredient.item.ok_or_else(|| {
                    RecipeError::validation(
                        "ingredients",
                        format!("ingredient {} has no item", position + 1),
                    )
                })?;
                Ok(Ingredient::new(item, ingredient.quantity.unwrap_or_default()))
            })
            .collect::<Result<Vec<_>, RecipeError>>()?;

        let recipe = NewRecipe {
            name,
            ingredients,
            instructions,
            image,
        };
        recipe.validate()?;
        Ok(recipe)
    }
}

impl From<NewRecipe> for CreateRecipeRequest {
    fn from(recipe: NewRecipe) -> Self {
        Self {
            name: Some(recipe.name),
            ingredients: Some(
                recipe
                    .ingredients
                    .into_iter()
                    .map(|ingredient| IngredientPayload {
                        item: Some(ingredient.item),
                        quantity: Some(ingredient.quantity),
                    })
                    .collect(),
            ),
            instructions: Some(recipe.instructions),
            image: Some(recipe.image),
        }
    }
}

pub(super) async fn list_recipes(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Recipe>>, ApiError> {
    let recipes = state
        .store
        .list()
        .await
        .map_err(ApiError::context("Error fetching saved recipes"))?;

    debug!("Listing {} saved recipe(s)", recipes.len());
    Ok(Json(recipes))
}

pub(super) async fn create_recipe(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateRecipeRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SavedResponse>), ApiError> {
    let on_error = ApiError::context("Error saving recipe");

    let Json(request) = payload
        .map_err(|rejection| RecipeError::validation("body", rejection.body_text()))
        .map_err(&on_error)?;
    let candidate = request.into_new_recipe().map_err(&on_error)?;

    let recipe = state.store.create(&candidate).await.map_err(&on_error)?;

    Ok((StatusCode::CREATED, Json(SavedResponse::new(recipe))))
}

pub(super) async fn delete_recipe(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let summary = state
        .store
        .delete_by_id(&id)
        .await
        .map_err(ApiError::context("Error deleting recipe"))?;

    Ok(Json(DeletedResponse::new(summary)))
}

pub(super) async fn search_recipes(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<Vec<NormalizedRecipe>>, ApiError> {
    let matches = crate::search_recipes(state.source.as_ref(), &name)
        .await
        .map_err(ApiError::context("Error fetching recipes"))?;

    Ok(Json(matches))
}
