//! Builder for creating and configuring DayStore instances.

use std::path::{Path, PathBuf};

use log::debug;
use tokio::task;

use super::DayStore;
use crate::{
    db::Database,
    error::{PlannerError, Result},
};

/// Builder for creating and configuring DayStore instances.
#[derive(Debug, Clone, Default)]
pub struct DayStoreBuilder {
    database_path: Option<PathBuf>,
}

impl DayStoreBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses the XDG Base Directory specification:
    /// `$XDG_DATA_HOME/dayplan/dayplan.db` or `~/.local/share/dayplan/dayplan.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Builds the store, creating the database file and schema if needed.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::FileSystem` if the parent directory cannot be
    /// created and `PlannerError::Database` if schema initialization fails.
    pub async fn build(self) -> Result<DayStore> {
        let db_path = match self.database_path {
            Some(path) => path,
            None => Self::default_database_path()?,
        };

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| PlannerError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        debug!("Opening day store at {}", db_path.display());
        let init_path = db_path.clone();
        task::spawn_blocking(move || Database::new(&init_path).map(drop))
            .await
            .map_err(PlannerError::join)??;

        Ok(DayStore::new(db_path))
    }

    /// Returns the default database path following the XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("dayplan")
            .place_data_file("dayplan.db")
            .map_err(|e| PlannerError::XdgDirectory(e.to_string()))
    }
}
