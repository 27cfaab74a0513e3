use serde::Deserialize;
use serde_json::{Map, Value};

/// Highest ingredient index TheMealDB fills in
pub const MAX_INGREDIENTS: usize = 20;

/// One unnormalized candidate as TheMealDB returns it.
///
/// Kept as the raw JSON object since the ingredient list is spread over
/// `strIngredient1..20` / `strMeasure1..20` and any of them may be missing,
/// null or blank.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct RawMatch(Map<String, Value>);

impl RawMatch {
    pub fn id(&self) -> Option<&str> {
        self.text("idMeal")
    }

    pub fn name(&self) -> Option<&str> {
        self.text("strMeal")
    }

    pub fn instructions(&self) -> Option<&str> {
        self.text("strInstructions")
    }

    pub fn image(&self) -> Option<&str> {
        self.text("strMealThumb")
    }

    /// Ingredient text at a 1-based index
    pub fn ingredient(&self, index: usize) -> Option<&str> {
        self.text(&format!("strIngredient{index}"))
    }

    /// Measure text at a 1-based index
    pub fn quantity(&self, index: usize) -> Option<&str> {
        self.text(&format!("strMeasure{index}"))
    }

    /// Set a raw field, mostly useful to build matches by hand
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), Value::String(value.into()));
        self
    }

    // Null and non-string values read as absent
    fn text(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }
}

impl From<Map<String, Value>> for RawMatch {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}
