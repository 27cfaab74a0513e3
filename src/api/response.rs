use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::{error, warn};
use serde::Serialize;
use serde_json::json;

use crate::model::{Recipe, RecipeSummary};
use crate::RecipeError;

/// Body of a successful save
#[derive(Debug, Serialize)]
pub struct SavedResponse {
    pub message: &'static str,
    pub recipe: Recipe,
}

impl SavedResponse {
    pub fn new(recipe: Recipe) -> Self {
        Self {
            message: "Recipe saved successfully",
            recipe,
        }
    }
}

/// Body of a successful delete
#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub message: &'static str,
    pub recipe: RecipeSummary,
}

impl DeletedResponse {
    pub fn new(recipe: RecipeSummary) -> Self {
        Self {
            message: "Recipe deleted successfully",
            recipe,
        }
    }
}

/// A failed request: the error plus what the handler was doing when it failed
#[derive(Debug)]
pub struct ApiError {
    context: &'static str,
    error: RecipeError,
}

impl ApiError {
    /// Adapter for `map_err`, tagging server-side failures with `context`
    pub fn context(context: &'static str) -> impl Fn(RecipeError) -> ApiError {
        move |error| ApiError { context, error }
    }

    pub fn status(&self) -> StatusCode {
        match &self.error {
            RecipeError::Validation { .. } | RecipeError::DuplicateName(_) => {
                StatusCode::BAD_REQUEST
            }
            RecipeError::NotFound(_) | RecipeError::NoResults(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self.error {
            RecipeError::Validation { field, message } => {
                json!({ "message": message, "field": field })
            }
            RecipeError::DuplicateName(_) => json!({ "message": "Recipe already saved" }),
            RecipeError::NotFound(_) => json!({ "message": "Recipe not found" }),
            RecipeError::NoResults(_) => json!({ "message": "No recipes found" }),
            other => {
                error!("{}: {}", self.context, other);
                json!({ "message": self.context, "error": other.to_string() })
            }
        };

        if status.is_client_error() {
            warn!("{}: {}", self.context, self.error);
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (RecipeError::missing("name"), StatusCode::BAD_REQUEST),
            (RecipeError::DuplicateName("Pho".into()), StatusCode::BAD_REQUEST),
            (RecipeError::NotFound("1".into()), StatusCode::NOT_FOUND),
            (RecipeError::NoResults("xyz".into()), StatusCode::NOT_FOUND),
            (
                RecipeError::Upstream("bad gateway".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                RecipeError::StoreUnavailable(sqlx::Error::PoolTimedOut),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            let api_error = ApiError::context("Error saving recipe")(error);
            assert_eq!(api_error.status(), expected);
        }
    }
}
