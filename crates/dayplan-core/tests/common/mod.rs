#![allow(dead_code)]

use dayplan_core::{
    models::NewEvent,
    store::{DayStore, DayStoreBuilder},
    time::TimeRange,
};
use jiff::civil::{date, Date};
use tempfile::TempDir;

/// The date every test plans.
pub fn test_date() -> Date {
    date(2025, 1, 15)
}

/// Helper function to create a store backed by a temporary database
pub async fn create_test_store() -> (TempDir, DayStore) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let store = DayStoreBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create store");
    (temp_dir, store)
}

pub fn new_event(title: &str, resource: &str, start: &str, end: &str) -> NewEvent {
    NewEvent {
        title: title.to_string(),
        date: test_date(),
        resource_id: resource.to_string(),
        range: TimeRange::parse(start, end).expect("valid range"),
        color: "#3b82f6".to_string(),
    }
}
