//! Integration tests for the toggle engine and snapshot resolver
//!
//! - Toggle pairs restore the original count
//! - At most one edge per (work, viewer) under concurrent toggles
//! - Snapshot counts match distinct viewers with an edge
//! - Validation order: identity, then work id

mod helpers;

use helpers::{seed, test_store, work};
use showcase_api::engagement::{snapshot, toggle, EngagementKind, EngagementSnapshot};
use showcase_api::error::ServiceError;
use tokio::task::JoinSet;

#[tokio::test]
async fn test_toggle_pair_restores_count() {
    let (_dir, store) = test_store().await;
    seed(&store, &work("w1", "owner", "Shop", None, 0)).await;

    // Someone else's like should survive the pair
    toggle(&store, EngagementKind::Like, "w1", Some("other")).await.unwrap();
    let before = snapshot(&store, "w1", None).await.unwrap().likes_count;

    let first = toggle(&store, EngagementKind::Like, "w1", Some("u1")).await.unwrap();
    assert!(first.active);
    assert_eq!(first.count, before + 1);

    let second = toggle(&store, EngagementKind::Like, "w1", Some("u1")).await.unwrap();
    assert!(!second.active);
    assert_eq!(second.count, before);
}

#[tokio::test]
async fn test_like_and_bookmark_are_independent() {
    let (_dir, store) = test_store().await;

    toggle(&store, EngagementKind::Bookmark, "w1", Some("u1")).await.unwrap();

    let snap = snapshot(&store, "w1", Some("u1")).await.unwrap();
    assert_eq!(
        snap,
        EngagementSnapshot {
            likes_count: 0,
            bookmarks_count: 1,
            is_liked: false,
            is_bookmarked: true,
        }
    );
}

#[tokio::test]
async fn test_toggle_requires_identity_before_work_id() {
    let (_dir, store) = test_store().await;

    let anonymous = toggle(&store, EngagementKind::Like, "", None).await;
    assert!(matches!(anonymous, Err(ServiceError::Unauthenticated)));

    let blank_viewer = toggle(&store, EngagementKind::Like, "w1", Some("  ")).await;
    assert!(matches!(blank_viewer, Err(ServiceError::Unauthenticated)));

    let missing_work = toggle(&store, EngagementKind::Bookmark, "", Some("u1")).await;
    assert!(matches!(missing_work, Err(ServiceError::InvalidArgument(_))));

    // Nothing was written by the rejected calls
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM likes")
        .fetch_one(store.pool())
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_concurrent_toggles_keep_single_edge() {
    let (_dir, store) = test_store().await;
    const TOGGLES: usize = 7;

    let mut join_set = JoinSet::new();
    for _ in 0..TOGGLES {
        let store = store.clone();
        join_set.spawn(async move {
            toggle(&store, EngagementKind::Like, "w1", Some("u1")).await
        });
    }

    let mut completed = 0;
    while let Some(result) = join_set.join_next().await {
        let outcome = result.expect("task panicked").expect("toggle failed");
        assert!(outcome.count <= 1, "count observed above 1: {:?}", outcome);
        completed += 1;
    }
    assert_eq!(completed, TOGGLES);

    let edges: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM likes WHERE work_id = 'w1' AND user_id = 'u1'")
        .fetch_one(store.pool())
        .await
        .unwrap();
    assert!(edges <= 1);
    // Completed toggles, not arrival order, decide the final state
    assert_eq!(edges as usize, TOGGLES % 2);
}

#[tokio::test]
async fn test_snapshot_counts_distinct_viewers() {
    let (_dir, store) = test_store().await;

    for viewer in ["a", "b", "c", "d"] {
        toggle(&store, EngagementKind::Like, "w1", Some(viewer)).await.unwrap();
    }
    // "b" un-likes
    toggle(&store, EngagementKind::Like, "w1", Some("b")).await.unwrap();
    // Likes on another work do not leak into w1
    toggle(&store, EngagementKind::Like, "w2", Some("a")).await.unwrap();

    let snap = snapshot(&store, "w1", Some("b")).await.unwrap();
    assert_eq!(snap.likes_count, 3);
    assert!(!snap.is_liked);

    let snap = snapshot(&store, "w1", Some("c")).await.unwrap();
    assert!(snap.is_liked);
}

#[tokio::test]
async fn test_snapshot_zero_state_for_unknown_work() {
    let (_dir, store) = test_store().await;

    let snap = snapshot(&store, "does-not-exist", Some("u1")).await.unwrap();
    assert_eq!(snap, EngagementSnapshot::default());
}

#[tokio::test]
async fn test_snapshot_requires_work_id() {
    let (_dir, store) = test_store().await;

    let result = snapshot(&store, " ", None).await;
    assert!(matches!(result, Err(ServiceError::InvalidArgument(_))));
}

#[tokio::test]
async fn test_store_fault_reported_as_store_unavailable() {
    let (_dir, store) = test_store().await;
    store.pool().close().await;

    let result = toggle(&store, EngagementKind::Like, "w1", Some("u1")).await;
    assert!(matches!(
        result,
        Err(ServiceError::StoreUnavailable { operation: "toggle", .. })
    ));
}
