//! HTTP surface of the recipe box.
//!
//! | Method | Path                          | Outcome                               |
//! |--------|-------------------------------|---------------------------------------|
//! | GET    | `/api/recipes`                | saved recipes, newest first           |
//! | POST   | `/api/recipes`                | 201 saved, 400 invalid or duplicate   |
//! | DELETE | `/api/recipes/:id`            | 200 deleted, 404 unknown id           |
//! | GET    | `/api/recipes/search/:name`   | normalized matches, 404 when none     |

mod recipes;
mod response;

pub use recipes::{CreateRecipeRequest, IngredientPayload};
pub use response::{ApiError, DeletedResponse, SavedResponse};

use std::sync::Arc;

use axum::{
    routing::{delete, get},
    Router,
};

use crate::source::RecipeSource;
use crate::store::RecipeStore;

/// Everything a request handler may touch
pub struct AppState {
    pub store: RecipeStore,
    pub source: Arc<dyn RecipeSource>,
}

impl AppState {
    pub fn new(store: RecipeStore, source: Arc<dyn RecipeSource>) -> Arc<Self> {
        Arc::new(Self { store, source })
    }
}

/// Build the router for all recipe endpoints
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/api/recipes",
            get(recipes::list_recipes).post(recipes::create_recipe),
        )
        .route("/api/recipes/:id", delete(recipes::delete_recipe))
        .route("/api/recipes/search/:name", get(recipes::search_recipes))
        .with_state(state)
}
