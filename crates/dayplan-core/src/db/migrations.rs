//! Database schema initialization and migrations.

use crate::error::{DatabaseResultExt, Result};

impl super::Database {
    /// Initializes the database schema using the embedded SQL file.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        self.connection
            .execute("PRAGMA foreign_keys = ON", [])
            .db_context("Failed to enable foreign keys")?;

        let schema_sql = include_str!("../../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .db_context("Failed to initialize database schema")?;

        self.apply_migrations()?;

        Ok(())
    }

    /// Brings databases created by earlier releases up to date.
    fn apply_migrations(&self) -> Result<()> {
        // Early databases had no editability flag on events
        let has_editable_column: bool = self
            .connection
            .query_row(
                "SELECT COUNT(*) FROM pragma_table_info('events') WHERE name = 'is_editable'",
                [],
                |row| row.get(0),
            )
            .map(|count: i64| count > 0)
            .unwrap_or(false);

        if !has_editable_column {
            self.connection
                .execute(
                    "ALTER TABLE events ADD COLUMN is_editable INTEGER NOT NULL DEFAULT 1",
                    [],
                )
                .db_context("Failed to add is_editable column to events table")?;
        }

        Ok(())
    }

    /// Whether a table exists; used to check schema initialization.
    pub fn has_table(&self, name: &str) -> Result<bool> {
        self.connection
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1)",
                [name],
                |row| row.get(0),
            )
            .db_context("Failed to inspect schema")
    }
}
