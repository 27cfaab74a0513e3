//! SQLite-backed collection of saved recipes.
//!
//! The store owns its connection pool: it is opened once at startup with
//! [`RecipeStore::connect`] (or [`RecipeStore::connect_with_retry`]) and
//! released with [`RecipeStore::close`]. Names are unique; the check done
//! before an insert is backed by a `UNIQUE` constraint on the table so two
//! racing saves of the same name still leave a single row.

use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use log::{debug, info, warn};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::model::{Ingredient, NewRecipe, Recipe, RecipeSummary};
use crate::RecipeError;

const SCHEMA: [&str; 2] = [
    r"
    CREATE TABLE IF NOT EXISTS recipes (
        id           TEXT PRIMARY KEY,
        name         TEXT NOT NULL UNIQUE,
        ingredients  TEXT NOT NULL,
        instructions TEXT NOT NULL,
        image        TEXT NOT NULL,
        created_at   TEXT NOT NULL
    )
    ",
    "CREATE INDEX IF NOT EXISTS idx_recipes_created_at ON recipes (created_at)",
];

/// Saved recipes, keyed by name
#[derive(Debug, Clone)]
pub struct RecipeStore {
    pool: SqlitePool,
}

impl RecipeStore {
    /// Open the store described by `config` and make sure the schema exists
    pub async fn connect(config: &AppConfig) -> Result<Self, RecipeError> {
        let in_memory = config.database_url.contains(":memory:");
        let options = SqliteConnectOptions::from_str(&config.database_url)?
            .create_if_missing(true)
            .busy_timeout(config.timeout());

        // Every in-memory connection is its own database, so those pools keep
        // exactly one connection alive for their whole life.
        let max_connections = if in_memory { 1 } else { config.max_connections.max(1) };
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(config.timeout())
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.migrate().await?;

        info!("Recipe store ready at {}", config.database_url);
        Ok(store)
    }

    /// Like [`RecipeStore::connect`], retrying while the store is unreachable.
    ///
    /// Makes `startup.connect_retries + 1` attempts in total and returns the
    /// last error once they are used up.
    pub async fn connect_with_retry(config: &AppConfig) -> Result<Self, RecipeError> {
        let delay = Duration::from_millis(config.startup.retry_delay_ms);
        let mut retries_left = config.startup.connect_retries;

        loop {
            match Self::connect(config).await {
                Ok(store) => return Ok(store),
                Err(e) if retries_left > 0 => {
                    warn!(
                        "Recipe store connection failed: {e}. Retrying in {delay:?} ({retries_left} attempts left)"
                    );
                    retries_left -= 1;
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn migrate(&self) -> Result<(), RecipeError> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// All saved recipes, most recently created first
    pub async fn list(&self) -> Result<Vec<Recipe>, RecipeError> {
        let rows = sqlx::query(
            r"
            SELECT id, name, ingredients, instructions, image, created_at
            FROM recipes
            ORDER BY created_at DESC, rowid DESC
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_recipe).collect()
    }

    /// Look a recipe up by its exact name
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Recipe>, RecipeError> {
        let row = sqlx::query(
            r"
            SELECT id, name, ingredients, instructions, image, created_at
            FROM recipes
            WHERE name = $1
            ",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_recipe).transpose()
    }

    /// Save a new recipe.
    ///
    /// # Errors
    ///
    /// `Validation` if a required field is blank, `DuplicateName` if a recipe
    /// with the same name is already saved, `StoreUnavailable` otherwise.
    pub async fn create(&self, candidate: &NewRecipe) -> Result<Recipe, RecipeError> {
        candidate.validate()?;

        if self.find_by_name(&candidate.name).await?.is_some() {
            return Err(RecipeError::DuplicateName(candidate.name.clone()));
        }

        let recipe = Recipe {
            id: Uuid::new_v4(),
            name: candidate.name.clone(),
            ingredients: candidate.ingredients.clone(),
            instructions: candidate.instructions.clone(),
            image: candidate.image.clone(),
            // Stored with microsecond precision, so round here to hand back
            // exactly what a later read returns
            created_at: Utc::now().trunc_subsecs(6),
        };
        let ingredients_json = serde_json::to_string(&recipe.ingredients)?;

        sqlx::query(
            r"
            INSERT INTO recipes (id, name, ingredients, instructions, image, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(recipe.id.to_string())
        .bind(&recipe.name)
        .bind(&ingredients_json)
        .bind(&recipe.instructions)
        .bind(&recipe.image)
        .bind(format_timestamp(&recipe.created_at))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                RecipeError::DuplicateName(candidate.name.clone())
            } else {
                RecipeError::StoreUnavailable(e)
            }
        })?;

        debug!("Saved recipe {:?} as {}", recipe.name, recipe.id);
        Ok(recipe)
    }

    /// Remove a recipe for good.
    ///
    /// Identifiers that are not UUIDs cannot name a saved recipe and are
    /// reported as `NotFound` like any other unknown id.
    pub async fn delete_by_id(&self, id: &str) -> Result<RecipeSummary, RecipeError> {
        let not_found = || RecipeError::NotFound(id.to_string());
        let uuid = Uuid::parse_str(id).map_err(|_| not_found())?;

        let row = sqlx::query("DELETE FROM recipes WHERE id = $1 RETURNING id, name")
            .bind(uuid.to_string())
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(not_found)?;

        let summary = RecipeSummary {
            id: parse_id(&row)?,
            name: row.try_get("name")?,
        };
        debug!("Deleted recipe {:?} ({})", summary.name, summary.id);
        Ok(summary)
    }

    /// Release every pooled connection
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Recipe store closed");
    }
}

fn is_unique_violation(error: &sqlx::Error) -> bool {
    error
        .as_database_error()
        .is_some_and(|db_error| db_error.is_unique_violation())
}

fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_id(row: &SqliteRow) -> Result<Uuid, RecipeError> {
    let id: String = row.try_get("id")?;
    Uuid::parse_str(&id).map_err(|e| sqlx::Error::Decode(Box::new(e)).into())
}

fn row_to_recipe(row: &SqliteRow) -> Result<Recipe, RecipeError> {
    let ingredients: String = row.try_get("ingredients")?;
    let ingredients: Vec<Ingredient> = serde_json::from_str(&ingredients)?;

    let created_at: String = row.try_get("created_at")?;
    let created_at = DateTime::parse_from_rfc3339(&created_at)
        .map_err(|e| sqlx::Error::Decode(Box::new(e)))?
        .with_timezone(&Utc);

    Ok(Recipe {
        id: parse_id(row)?,
        name: row.try_get("name")?,
        ingredients,
        instructions: row.try_get("instructions")?,
        image: row.try_get("image")?,
        created_at,
    })
}
