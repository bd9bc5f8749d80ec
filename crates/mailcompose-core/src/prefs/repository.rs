//! Inventory property storage.

use sqlx::Row;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use super::inventory::{InventoryProperty, PropertySource};
use crate::Result;

/// Repository for inventory property definitions.
pub struct InventoryRepository {
    pool: SqlitePool,
}

impl InventoryRepository {
    /// Create a new repository with the given database path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails or schema creation fails.
    pub async fn new(database_path: &str) -> Result<Self> {
        let url = format!("sqlite:{database_path}?mode=rwc");
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&url)
            .await?;

        let repo = Self { pool };
        repo.initialize().await?;
        Ok(repo)
    }

    /// Create an in-memory repository for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails or schema creation fails.
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;

        let repo = Self { pool };
        repo.initialize().await?;
        Ok(repo)
    }

    async fn initialize(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS properties (
                property_id INTEGER PRIMARY KEY AUTOINCREMENT,
                property TEXT NOT NULL UNIQUE,
                sort_weight INTEGER NOT NULL DEFAULT 0
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Adds a property and returns its id. Existing names keep their id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn add(&self, name: &str, sort_weight: i64) -> Result<i64> {
        let row = sqlx::query(
            r"
            INSERT INTO properties (property, sort_weight)
            VALUES (?, ?)
            ON CONFLICT(property) DO UPDATE SET sort_weight = excluded.sort_weight
            RETURNING property_id
            ",
        )
        .bind(name.trim())
        .bind(sort_weight)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.get("property_id"))
    }

    /// Lists properties by sort weight, then name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<InventoryProperty>> {
        let rows = sqlx::query(
            r"
            SELECT property_id, property
            FROM properties
            ORDER BY sort_weight ASC, property ASC
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| InventoryProperty {
                id: row.get("property_id"),
                name: row.get("property"),
            })
            .collect())
    }

    /// Deletes a property.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn delete(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM properties WHERE property_id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

impl PropertySource for InventoryRepository {
    async fn properties(&self) -> Result<Vec<InventoryProperty>> {
        self.list().await
    }
}
