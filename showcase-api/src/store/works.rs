//! Work records

use showcase_common::db::Work;
use showcase_common::time::to_millis;
use sqlx::{QueryBuilder, Sqlite};

use super::ContentStore;
use crate::feed::FeedFilter;

const WORK_COLUMNS: &str =
    "id, user_id, title, description, image, live_site_url, github_url, category, created_at";

impl ContentStore {
    /// Persist a new work
    pub async fn insert_work(&self, work: &Work) -> sqlx::Result<()> {
        sqlx::query(
            "INSERT INTO works (id, user_id, title, title_folded, description, image, live_site_url, github_url, category, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&work.id)
        .bind(&work.user_id)
        .bind(&work.title)
        .bind(work.title.to_lowercase())
        .bind(&work.description)
        .bind(&work.image)
        .bind(&work.live_site_url)
        .bind(&work.github_url)
        .bind(&work.category)
        .bind(to_millis(work.created_at))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Look up one work by identifier
    pub async fn find_work(&self, work_id: &str) -> sqlx::Result<Option<Work>> {
        sqlx::query_as::<_, Work>(&format!("SELECT {WORK_COLUMNS} FROM works WHERE id = ?"))
            .bind(work_id)
            .fetch_optional(&self.pool)
            .await
    }

    /// One page of works matching `filter`, newest first
    pub async fn find_works(
        &self,
        filter: &FeedFilter,
        limit: i64,
        offset: i64,
    ) -> sqlx::Result<Vec<Work>> {
        let mut qb = QueryBuilder::<Sqlite>::new(format!("SELECT {WORK_COLUMNS} FROM works"));
        filter.push_predicates(&mut qb);
        qb.push(" ORDER BY created_at DESC, seq DESC LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        qb.build_query_as::<Work>().fetch_all(&self.pool).await
    }

    /// Number of works matching `filter`
    pub async fn count_works(&self, filter: &FeedFilter) -> sqlx::Result<u64> {
        let mut qb = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM works");
        filter.push_predicates(&mut qb);

        let count: i64 = qb.build_query_scalar().fetch_one(&self.pool).await?;
        Ok(count.max(0) as u64)
    }

    /// Works the user has bookmarked, newest work first
    pub async fn find_bookmarked_works(&self, user_id: &str) -> sqlx::Result<Vec<Work>> {
        sqlx::query_as::<_, Work>(
            "SELECT w.id, w.user_id, w.title, w.description, w.image, w.live_site_url,
                    w.github_url, w.category, w.created_at
             FROM works w
             JOIN bookmarks b ON b.work_id = w.id
             WHERE b.user_id = ?
             ORDER BY w.created_at DESC, w.seq DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }
}
