// ABOUTME: SQLite implementation of the ingredient and meal catalog
// ABOUTME: Creates its tables on migrate() and maps rows to domain models
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrilog Contributors

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use nutrilog_core::errors::{AppError, AppResult, ErrorCode};
use nutrilog_core::models::{Ingredient, Meal, MealIngredient, MealType, NutritionFacts};
use sqlx::sqlite::{SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use tracing::{debug, info};
use uuid::Uuid;

use super::Catalog;
use crate::config::DatabaseUrl;
use crate::logging::AppLogger;

const INGREDIENT_COLUMNS: &str = "id, name, calories, protein, carbs, fat, \
     serving_size, serving_unit, unit, is_staple, notes";

const MEAL_COLUMNS: &str =
    "id, name, meal_type, calories, protein, carbs, fat, notes, instructions, logged_at";

/// Catalog persisted in `SQLite`
#[derive(Clone)]
pub struct SqliteCatalog {
    pool: SqlitePool,
}

impl SqliteCatalog {
    /// Connect to the database and run migrations
    ///
    /// File databases are created if missing, along with their parent
    /// directory. In-memory databases use a single connection so every query
    /// sees the same data.
    ///
    /// # Errors
    ///
    /// Returns a database error if the connection or migration fails
    pub async fn connect(url: &DatabaseUrl) -> AppResult<Self> {
        let pool = match url {
            DatabaseUrl::Memory => SqlitePoolOptions::new()
                .max_connections(1)
                .connect("sqlite::memory:")
                .await
                .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?,
            DatabaseUrl::SQLite { path } => {
                ensure_parent_dir(path).await?;
                SqlitePoolOptions::new()
                    .connect(&format!("{}?mode=rwc", url.to_connection_string()))
                    .await
                    .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?
            }
        };

        let catalog = Self { pool };
        catalog.migrate().await?;
        info!(in_memory = url.is_memory(), "Catalog store ready");
        Ok(catalog)
    }

    /// Wrap an existing pool; call [`Self::migrate`] before use
    #[must_use]
    pub const fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a reference to the database pool
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create tables if they do not exist
    ///
    /// # Errors
    ///
    /// Returns a database error if a statement fails
    pub async fn migrate(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS ingredients (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                calories REAL NOT NULL DEFAULT 0,
                protein REAL NOT NULL DEFAULT 0,
                carbs REAL NOT NULL DEFAULT 0,
                fat REAL NOT NULL DEFAULT 0,
                serving_size REAL,
                serving_unit TEXT,
                unit TEXT,
                is_staple INTEGER NOT NULL DEFAULT 0,
                notes TEXT,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create ingredients table: {e}")))?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS meals (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                meal_type TEXT NOT NULL DEFAULT 'composed',
                calories REAL NOT NULL DEFAULT 0,
                protein REAL NOT NULL DEFAULT 0,
                carbs REAL NOT NULL DEFAULT 0,
                fat REAL NOT NULL DEFAULT 0,
                notes TEXT,
                instructions TEXT,
                logged_at TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create meals table: {e}")))?;

        // ingredient_id carries no foreign key: references to deleted
        // ingredients must survive for later reconciliation
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS meal_ingredients (
                meal_id TEXT NOT NULL REFERENCES meals(id) ON DELETE CASCADE,
                position INTEGER NOT NULL,
                ingredient_id TEXT NOT NULL,
                quantity REAL NOT NULL,
                PRIMARY KEY (meal_id, position)
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::database(format!("Failed to create meal_ingredients table: {e}"))
        })?;

        debug!("Catalog migrations applied");
        Ok(())
    }

    fn row_to_ingredient(row: &SqliteRow) -> AppResult<Ingredient> {
        Ok(Ingredient {
            id: parse_uuid(&get::<String>(row, "id")?)?,
            name: get(row, "name")?,
            nutrition: NutritionFacts::new(
                get(row, "calories")?,
                get(row, "protein")?,
                get(row, "carbs")?,
                get(row, "fat")?,
            ),
            serving_size: get(row, "serving_size")?,
            serving_unit: get(row, "serving_unit")?,
            unit: get(row, "unit")?,
            is_staple: get(row, "is_staple")?,
            notes: get(row, "notes")?,
        })
    }

    fn row_to_meal(row: &SqliteRow) -> AppResult<Meal> {
        let logged_at: Option<String> = get(row, "logged_at")?;
        Ok(Meal {
            id: parse_uuid(&get::<String>(row, "id")?)?,
            name: get(row, "name")?,
            meal_type: MealType::parse(&get::<String>(row, "meal_type")?)?,
            totals: NutritionFacts::new(
                get(row, "calories")?,
                get(row, "protein")?,
                get(row, "carbs")?,
                get(row, "fat")?,
            ),
            ingredients: Vec::new(),
            notes: get(row, "notes")?,
            instructions: get(row, "instructions")?,
            logged_at: logged_at.as_deref().map(parse_timestamp).transpose()?,
        })
    }

    /// Ingredient references for the given meals, keyed by meal id, in order
    async fn fetch_meal_ingredients(
        &self,
        meal_id: Option<Uuid>,
    ) -> AppResult<HashMap<Uuid, Vec<MealIngredient>>> {
        let rows = match meal_id {
            Some(id) => {
                sqlx::query(
                    r"
                    SELECT meal_id, ingredient_id, quantity
                    FROM meal_ingredients
                    WHERE meal_id = $1
                    ORDER BY position ASC
                    ",
                )
                .bind(id.to_string())
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query(
                    r"
                    SELECT meal_id, ingredient_id, quantity
                    FROM meal_ingredients
                    ORDER BY meal_id ASC, position ASC
                    ",
                )
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| AppError::database(format!("Failed to fetch meal ingredients: {e}")))?;

        let mut by_meal: HashMap<Uuid, Vec<MealIngredient>> = HashMap::new();
        for row in &rows {
            let meal_id = parse_uuid(&get::<String>(row, "meal_id")?)?;
            by_meal.entry(meal_id).or_default().push(MealIngredient::new(
                parse_uuid(&get::<String>(row, "ingredient_id")?)?,
                get(row, "quantity")?,
            ));
        }
        Ok(by_meal)
    }
}

#[async_trait]
impl Catalog for SqliteCatalog {
    async fn list_ingredients(&self) -> AppResult<Vec<Ingredient>> {
        let rows = sqlx::query(&format!(
            "SELECT {INGREDIENT_COLUMNS} FROM ingredients ORDER BY name COLLATE NOCASE ASC, id ASC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list ingredients: {e}")))?;

        let ingredients = rows
            .iter()
            .map(Self::row_to_ingredient)
            .collect::<AppResult<Vec<_>>>()?;
        AppLogger::log_database_operation("list", "ingredients", ingredients.len());
        Ok(ingredients)
    }

    async fn list_meals(&self) -> AppResult<Vec<Meal>> {
        let rows = sqlx::query(&format!(
            "SELECT {MEAL_COLUMNS} FROM meals ORDER BY name COLLATE NOCASE ASC, id ASC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list meals: {e}")))?;

        let mut references = self.fetch_meal_ingredients(None).await?;
        let mut meals = Vec::with_capacity(rows.len());
        for row in &rows {
            let mut meal = Self::row_to_meal(row)?;
            meal.ingredients = references.remove(&meal.id).unwrap_or_default();
            meals.push(meal);
        }

        AppLogger::log_database_operation("list", "meals", meals.len());
        Ok(meals)
    }

    async fn get_ingredient(&self, id: Uuid) -> AppResult<Ingredient> {
        let row = sqlx::query(&format!(
            "SELECT {INGREDIENT_COLUMNS} FROM ingredients WHERE id = $1"
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to fetch ingredient: {e}")))?
        .ok_or_else(|| AppError::lookup("Ingredient", id))?;

        Self::row_to_ingredient(&row)
    }

    async fn get_meal(&self, id: Uuid) -> AppResult<Meal> {
        let row = sqlx::query(&format!("SELECT {MEAL_COLUMNS} FROM meals WHERE id = $1"))
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to fetch meal: {e}")))?
            .ok_or_else(|| AppError::lookup("Meal", id))?;

        let mut meal = Self::row_to_meal(&row)?;
        meal.ingredients = self
            .fetch_meal_ingredients(Some(id))
            .await?
            .remove(&id)
            .unwrap_or_default();
        Ok(meal)
    }

    async fn create_ingredient(&self, ingredient: &Ingredient) -> AppResult<()> {
        ingredient.validate()?;

        sqlx::query(
            r"
            INSERT INTO ingredients (
                id, name, calories, protein, carbs, fat,
                serving_size, serving_unit, unit, is_staple, notes, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            ",
        )
        .bind(ingredient.id.to_string())
        .bind(&ingredient.name)
        .bind(ingredient.nutrition.calories)
        .bind(ingredient.nutrition.protein)
        .bind(ingredient.nutrition.carbs)
        .bind(ingredient.nutrition.fat)
        .bind(ingredient.serving_size)
        .bind(&ingredient.serving_unit)
        .bind(&ingredient.unit)
        .bind(ingredient.is_staple)
        .bind(&ingredient.notes)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::new(
                    ErrorCode::ResourceAlreadyExists,
                    format!("Ingredient {} already exists", ingredient.id),
                )
                .with_resource_id(ingredient.id.to_string())
            } else {
                AppError::database(format!("Failed to create ingredient: {e}"))
            }
        })?;

        AppLogger::log_database_operation("insert", "ingredients", 1);
        Ok(())
    }

    async fn save_meal(&self, meal: &Meal) -> AppResult<()> {
        meal.validate()?;
        let now = Utc::now().to_rfc3339();
        let meal_id = meal.id.to_string();

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        sqlx::query(
            r"
            INSERT INTO meals (
                id, name, meal_type, calories, protein, carbs, fat,
                notes, instructions, logged_at, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $11)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                meal_type = excluded.meal_type,
                calories = excluded.calories,
                protein = excluded.protein,
                carbs = excluded.carbs,
                fat = excluded.fat,
                notes = excluded.notes,
                instructions = excluded.instructions,
                logged_at = excluded.logged_at,
                updated_at = excluded.updated_at
            ",
        )
        .bind(&meal_id)
        .bind(&meal.name)
        .bind(meal.meal_type.as_str())
        .bind(meal.totals.calories)
        .bind(meal.totals.protein)
        .bind(meal.totals.carbs)
        .bind(meal.totals.fat)
        .bind(&meal.notes)
        .bind(&meal.instructions)
        .bind(meal.logged_at.map(|t| t.to_rfc3339()))
        .bind(&now)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to save meal: {e}")))?;

        sqlx::query("DELETE FROM meal_ingredients WHERE meal_id = $1")
            .bind(&meal_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to clear meal ingredients: {e}")))?;

        for (position, item) in meal.ingredients.iter().enumerate() {
            let position = i64::try_from(position)
                .map_err(|_| AppError::invalid_input("Too many ingredients in meal"))?;
            sqlx::query(
                r"
                INSERT INTO meal_ingredients (meal_id, position, ingredient_id, quantity)
                VALUES ($1, $2, $3, $4)
                ",
            )
            .bind(&meal_id)
            .bind(position)
            .bind(item.ingredient_id.to_string())
            .bind(item.quantity)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to save meal ingredient: {e}")))?;
        }

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit meal: {e}")))?;

        AppLogger::log_database_operation("upsert", "meals", 1);
        Ok(())
    }

    async fn health_check(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Database health check failed: {e}")))?;
        Ok(())
    }
}

fn get<'r, T>(row: &'r SqliteRow, column: &str) -> AppResult<T>
where
    T: sqlx::Decode<'r, sqlx::Sqlite> + sqlx::Type<sqlx::Sqlite>,
{
    row.try_get(column)
        .map_err(|e| AppError::database(format!("Failed to read column {column}: {e}")))
}

fn parse_uuid(value: &str) -> AppResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|e| AppError::database(format!("Invalid id '{value}' in catalog: {e}")))
}

fn parse_timestamp(value: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| AppError::database(format!("Invalid timestamp '{value}' in catalog: {e}")))
}

fn is_unique_violation(error: &sqlx::Error) -> bool {
    matches!(error, sqlx::Error::Database(db) if db.is_unique_violation())
}

async fn ensure_parent_dir(path: &Path) -> AppResult<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| {
                AppError::database(format!(
                    "Failed to create database directory {}: {e}",
                    parent.display()
                ))
            }),
        _ => Ok(()),
    }
}
