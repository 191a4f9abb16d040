//! Database models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};

use crate::time::from_millis;

/// A showcased content item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Work {
    pub id: String,
    /// Owner identity, opaque to this service
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub image: String,
    pub live_site_url: String,
    pub github_url: String,
    /// `None` when omitted at creation; `Some("")` is a distinct stored value
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl<'r> FromRow<'r, SqliteRow> for Work {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            image: row.try_get("image")?,
            live_site_url: row.try_get("live_site_url")?,
            github_url: row.try_get("github_url")?,
            category: row.try_get("category")?,
            created_at: from_millis(row.try_get("created_at")?),
        })
    }
}
