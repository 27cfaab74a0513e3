use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::RecipeError;

/// One line of a recipe's ingredient list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub item: String,
    #[serde(default)]
    pub quantity: String,
}

impl Ingredient {
    pub fn new(item: impl Into<String>, quantity: impl Into<String>) -> Self {
        Self {
            item: item.into(),
            quantity: quantity.into(),
        }
    }
}

/// A saved recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: Uuid,
    pub name: String,
    pub ingredients: Vec<Ingredient>,
    pub instructions: String,
    pub image: String,
    pub created_at: DateTime<Utc>,
}

/// A recipe that has not been saved yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRecipe {
    pub name: String,
    pub ingredients: Vec<Ingredient>,
    pub instructions: String,
    pub image: String,
}

impl NewRecipe {
    /// Check that every required field carries text.
    ///
    /// Quantities may be empty; items, name, instructions and image may not.
    pub fn validate(&self) -> Result<(), RecipeError> {
        for (field, value) in [
            ("name", &self.name),
            ("instructions", &self.instructions),
            ("image", &self.image),
        ] {
            if value.trim().is_empty() {
                return Err(RecipeError::missing(field));
            }
        }

        if let Some(position) = self
            .ingredients
            .iter()
            .position(|ingredient| ingredient.item.trim().is_empty())
        {
            return Err(RecipeError::validation(
                "ingredients",
                format!("ingredient {} has no item", position + 1),
            ));
        }

        Ok(())
    }
}

/// What is left of a recipe after it has been deleted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeSummary {
    pub id: Uuid,
    pub name: String,
}

impl From<&Recipe> for RecipeSummary {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id,
            name: recipe.name.clone(),
        }
    }
}
