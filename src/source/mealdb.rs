use crate::config::AppConfig;
use crate::source::{RawMatch, RecipeSource};
use crate::RecipeError;
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    // TheMealDB answers `{"meals": null}` when nothing matches
    meals: Option<Vec<RawMatch>>,
}

/// Client for TheMealDB's search-by-name endpoint
pub struct MealDbSource {
    client: Client,
    base_url: String,
}

impl MealDbSource {
    /// Create a new source from configuration
    pub fn new(config: &AppConfig) -> Result<Self, RecipeError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent("Mozilla/5.0 (compatible; RecipeBox/0.1)")
            .build()?;

        Ok(Self::with_client(client, &config.mealdb_url))
    }

    #[doc(hidden)]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), &base_url.into())
    }

    fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl RecipeSource for MealDbSource {
    fn source_name(&self) -> &str {
        "mealdb"
    }

    async fn search(&self, name: &str) -> Result<Vec<RawMatch>, RecipeError> {
        let response = self
            .client
            .get(format!("{}/search.php", self.base_url))
            .query(&[("s", name)])
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        let parsed: SearchResponse = serde_json::from_str(&body)
            .map_err(|e| RecipeError::Upstream(format!("unexpected response from TheMealDB: {e}")))?;

        let meals = parsed.meals.unwrap_or_default();
        debug!("TheMealDB returned {} match(es) for {:?}", meals.len(), name);
        Ok(meals)
    }
}
