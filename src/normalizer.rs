use crate::model::{Ingredient, NewRecipe};
use crate::source::{RawMatch, MAX_INGREDIENTS};
use serde::Serialize;

/// A search match flattened into the shape the rest of the app works with
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedRecipe {
    /// Identifier on the external source, if it sent one
    pub id: Option<String>,
    pub name: String,
    pub ingredients: Vec<Ingredient>,
    pub instructions: String,
    pub image: String,
}

impl NormalizedRecipe {
    /// The save request for this match
    pub fn into_new_recipe(self) -> NewRecipe {
        NewRecipe {
            name: self.name,
            ingredients: self.ingredients,
            instructions: self.instructions,
            image: self.image,
        }
    }
}

/// Flatten one raw match.
///
/// Indices 1 to 20 are visited in ascending order. An index is kept only when
/// its ingredient text is non-blank; quantities are optional and default to
/// an empty string. Never fails: absent scalar fields become empty strings.
pub fn normalize(raw: &RawMatch) -> NormalizedRecipe {
    NormalizedRecipe {
        id: raw.id().map(str::to_string),
        name: raw.name().unwrap_or_default().to_string(),
        ingredients: ingredients(raw),
        instructions: raw.instructions().unwrap_or_default().to_string(),
        image: raw.image().unwrap_or_default().to_string(),
    }
}

fn ingredients(raw: &RawMatch) -> Vec<Ingredient> {
    (1..=MAX_INGREDIENTS)
        .filter_map(|index| {
            let item = raw.ingredient(index).map(str::trim).filter(|s| !s.is_empty())?;
            let quantity = raw.quantity(index).map(str::trim).unwrap_or_default();
            Some(Ingredient::new(item, quantity))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> RawMatch {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_sparse_indices_keep_ascending_order() {
        let raw = raw(json!({
            "idMeal": "1",
            "strMeal": "Sparse",
            "strIngredient9": "  Basil ",
            "strMeasure9": "a handful",
            "strIngredient2": "Garlic",
            "strMeasure2": " 2 cloves ",
            "strIngredient5": "Olive Oil",
            "strIngredient1": "",
            "strIngredient3": null,
            "strIngredient4": "   "
        }));

        let recipe = normalize(&raw);

        assert_eq!(
            recipe.ingredients,
            vec![
                Ingredient::new("Garlic", "2 cloves"),
                Ingredient::new("Olive Oil", ""),
                Ingredient::new("Basil", "a handful"),
            ]
        );
    }

    #[test]
    fn test_blank_ingredient_ignores_quantity() {
        let raw = raw(json!({
            "strIngredient1": " \t ",
            "strMeasure1": "1 cup",
            "strIngredient2": "Sugar",
            "strMeasure2": "   "
        }));

        let recipe = normalize(&raw);

        assert_eq!(recipe.ingredients, vec![Ingredient::new("Sugar", "")]);
    }

    #[test]
    fn test_indices_past_twenty_are_ignored() {
        let raw = raw(json!({
            "strIngredient20": "Salt",
            "strIngredient21": "Pepper",
            "strIngredient0": "Water"
        }));

        let recipe = normalize(&raw);

        assert_eq!(recipe.ingredients, vec![Ingredient::new("Salt", "")]);
    }

    #[test]
    fn test_duplicate_items_are_kept() {
        let raw = raw(json!({
            "strIngredient1": "Butter",
            "strMeasure1": "1 tbsp",
            "strIngredient2": "Butter",
            "strMeasure2": "2 tbsp"
        }));

        let recipe = normalize(&raw);

        assert_eq!(recipe.ingredients.len(), 2);
        assert_eq!(recipe.ingredients[1].quantity, "2 tbsp");
    }

    #[test]
    fn test_scalar_fields() {
        let raw = raw(json!({
            "idMeal": "52771",
            "strMeal": "Spicy Arrabiata Penne",
            "strInstructions": "Boil. Simmer.",
            "strMealThumb": "https://example.com/penne.jpg"
        }));

        let recipe = normalize(&raw);

        assert_eq!(recipe.id.as_deref(), Some("52771"));
        assert_eq!(recipe.name, "Spicy Arrabiata Penne");
        assert_eq!(recipe.instructions, "Boil. Simmer.");
        assert_eq!(recipe.image, "https://example.com/penne.jpg");
        assert!(recipe.ingredients.is_empty());
    }

    #[test]
    fn test_empty_match_does_not_fail() {
        let recipe = normalize(&RawMatch::default());

        assert_eq!(recipe.id, None);
        assert_eq!(recipe.name, "");
        assert!(recipe.ingredients.is_empty());
    }

    #[test]
    fn test_into_new_recipe() {
        let raw = RawMatch::default()
            .with("strMeal", "Tomato Soup")
            .with("strInstructions", "Simmer.")
            .with("strMealThumb", "http://x/img.png")
            .with("strIngredient1", "Tomato")
            .with("strMeasure1", "2 cups");

        let new_recipe = normalize(&raw).into_new_recipe();

        assert_eq!(new_recipe.name, "Tomato Soup");
        assert_eq!(new_recipe.ingredients, vec![Ingredient::new("Tomato", "2 cups")]);
        assert_eq!(new_recipe.image, "http://x/img.png");
    }
}
