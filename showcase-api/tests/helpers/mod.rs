//! Shared fixtures for showcase-api integration tests

#![allow(dead_code)]

use chrono::{DateTime, Duration, Utc};
use showcase_api::ingest::NewWork;
use showcase_api::store::ContentStore;
use showcase_common::db::{init_database, Work};
use tempfile::TempDir;

/// Fresh database in a temp dir; keep the TempDir alive for the test
pub async fn test_store() -> (TempDir, ContentStore) {
    let dir = TempDir::new().expect("Should create temp dir");
    let pool = init_database(&dir.path().join("showcase.db"), 8)
        .await
        .expect("Should initialize test database");
    (dir, ContentStore::new(pool))
}

/// Fixed base instant so ordering tests do not depend on wall-clock speed
pub fn base_time() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).expect("valid timestamp")
}

/// Work with every required field set
pub fn work(id: &str, owner: &str, title: &str, category: Option<&str>, minutes: i64) -> Work {
    Work {
        id: id.to_string(),
        user_id: owner.to_string(),
        title: title.to_string(),
        description: format!("{} description", title),
        image: format!("https://img.example/{}.png", id),
        live_site_url: format!("https://{}.example", id),
        github_url: format!("https://github.com/example/{}", id),
        category: category.map(str::to_string),
        created_at: base_time() + Duration::minutes(minutes),
    }
}

/// Insert a work directly through the store
pub async fn seed(store: &ContentStore, work: &Work) {
    store.insert_work(work).await.expect("Should insert work");
}

/// Submission with every required field present
pub fn complete_submission() -> NewWork {
    NewWork {
        title: Some("Portfolio".to_string()),
        description: Some("A personal site".to_string()),
        image: Some("https://img.example/p.png".to_string()),
        live_site_url: Some("https://p.example".to_string()),
        github_url: Some("https://github.com/example/p".to_string()),
        category: None,
    }
}
