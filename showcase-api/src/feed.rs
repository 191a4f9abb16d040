//! Feed query builder
//!
//! Composes owner, title-search and category predicates with recency
//! ordering and fixed-size pages. The page query and the count query share
//! [`FeedFilter::push_predicates`], so page counts always agree with pages.

use showcase_common::db::Work;
use sqlx::{QueryBuilder, Sqlite};
use tracing::{debug, error};

use crate::error::{Result, ServiceError};
use crate::pagination::PAGE_SIZE;
use crate::store::ContentStore;

/// Active filter set for a feed read
///
/// `None` means "no predicate". `Some("")` is a literal value: for
/// `category` it matches only works stored with an empty category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedFilter {
    /// Exact owner match
    pub owner_id: Option<String>,
    /// Case-insensitive substring of the title
    pub title_contains: Option<String>,
    /// Exact category match
    pub category: Option<String>,
    /// Row offset. Any value is accepted; [`query_feed`] is the one place
    /// that clamps negatives to 0, for HTTP and in-process callers alike.
    pub offset: i64,
}

impl FeedFilter {
    /// Append a `WHERE` clause for every present predicate
    ///
    /// Offset is not a predicate and is ignored here.
    pub fn push_predicates(&self, qb: &mut QueryBuilder<'_, Sqlite>) {
        let mut separator = " WHERE ";

        if let Some(owner_id) = &self.owner_id {
            qb.push(separator).push("user_id = ").push_bind(owner_id.clone());
            separator = " AND ";
        }

        if let Some(title) = &self.title_contains {
            // instr() rather than LIKE: search text is matched literally.
            // Both sides are folded in Rust so non-ASCII letters match too.
            qb.push(separator)
                .push("instr(title_folded, ")
                .push_bind(title.to_lowercase())
                .push(") > 0");
            separator = " AND ";
        }

        if let Some(category) = &self.category {
            qb.push(separator).push("category = ").push_bind(category.clone());
        }
    }
}

/// One page (at most 12 works) matching `filter`, newest first
pub async fn query_feed(store: &ContentStore, filter: &FeedFilter) -> Result<Vec<Work>> {
    let offset = filter.offset.max(0);

    let works = store
        .find_works(filter, PAGE_SIZE, offset)
        .await
        .map_err(|e| {
            error!("query_feed failed (filter={:?}): {}", filter, e);
            ServiceError::store("query_feed")(e)
        })?;

    debug!("query_feed returned {} works at offset {}", works.len(), offset);
    Ok(works)
}

/// Total number of works matching `filter` (offset ignored)
pub async fn count_feed(store: &ContentStore, filter: &FeedFilter) -> Result<u64> {
    store.count_works(filter).await.map_err(|e| {
        error!("count_feed failed (filter={:?}): {}", filter, e);
        ServiceError::store("count_feed")(e)
    })
}

/// Works the viewer has bookmarked, newest work first
pub async fn saved_works(store: &ContentStore, viewer_id: Option<&str>) -> Result<Vec<Work>> {
    let viewer_id = viewer_id
        .filter(|v| !v.trim().is_empty())
        .ok_or(ServiceError::Unauthenticated)?;

    store.find_bookmarked_works(viewer_id).await.map_err(|e| {
        error!("saved_works failed (viewer={}): {}", viewer_id, e);
        ServiceError::store("saved_works")(e)
    })
}

/// Single work by identifier
pub async fn get_work(store: &ContentStore, work_id: &str) -> Result<Work> {
    if work_id.trim().is_empty() {
        return Err(ServiceError::InvalidArgument("Work ID required".to_string()));
    }

    store
        .find_work(work_id)
        .await
        .map_err(|e| {
            error!("get_work failed (work={}): {}", work_id, e);
            ServiceError::store("get_work")(e)
        })?
        .ok_or_else(|| ServiceError::NotFound(format!("work {}", work_id)))
}
