//! Integration tests for feed queries and work ingestion
//!
//! - Predicate composition (owner, title search, category)
//! - Newest-first ordering with a stable tiebreak
//! - Page size, offsets, and count agreement
//! - Ingestion field order and invalidation signals

mod helpers;

use helpers::{complete_submission, seed, test_store, work};
use showcase_api::error::{RequiredField, ServiceError};
use showcase_api::feed::{count_feed, get_work, query_feed, saved_works, FeedFilter};
use showcase_api::engagement::{toggle, EngagementKind};
use showcase_api::ingest::{create_work, NewWork};
use showcase_api::pagination::{total_pages, PAGE_SIZE};
use showcase_common::events::{EventBus, ShowcaseEvent};

fn ids(works: &[showcase_common::db::Work]) -> Vec<&str> {
    works.iter().map(|w| w.id.as_str()).collect()
}

#[tokio::test]
async fn test_unfiltered_feed_newest_first_across_categories() {
    let (_dir, store) = test_store().await;
    seed(&store, &work("old", "u1", "Old", Some("Art"), 0)).await;
    seed(&store, &work("new", "u2", "New", Some("Streetwear"), 20)).await;
    seed(&store, &work("mid", "u3", "Mid", None, 10)).await;

    let works = query_feed(&store, &FeedFilter::default()).await.unwrap();
    assert_eq!(ids(&works), vec!["new", "mid", "old"]);
}

#[tokio::test]
async fn test_category_filter_is_exact() {
    let (_dir, store) = test_store().await;
    seed(&store, &work("a", "u1", "A", Some("Streetwear"), 0)).await;
    seed(&store, &work("b", "u1", "B", Some("streetwear"), 1)).await;
    seed(&store, &work("c", "u1", "C", Some("Streetwear Pro"), 2)).await;
    seed(&store, &work("d", "u1", "D", None, 3)).await;

    let filter = FeedFilter {
        category: Some("Streetwear".to_string()),
        ..FeedFilter::default()
    };
    let works = query_feed(&store, &filter).await.unwrap();
    assert_eq!(ids(&works), vec!["a"]);
}

#[tokio::test]
async fn test_empty_category_matches_only_empty_category() {
    let (_dir, store) = test_store().await;
    seed(&store, &work("empty", "u1", "E", Some(""), 0)).await;
    seed(&store, &work("none", "u1", "N", None, 1)).await;
    seed(&store, &work("art", "u1", "A", Some("Art"), 2)).await;

    let filter = FeedFilter {
        category: Some(String::new()),
        ..FeedFilter::default()
    };
    let works = query_feed(&store, &filter).await.unwrap();
    assert_eq!(ids(&works), vec!["empty"]);
    assert_eq!(count_feed(&store, &filter).await.unwrap(), 1);

    // Absent category is no filter at all
    assert_eq!(count_feed(&store, &FeedFilter::default()).await.unwrap(), 3);
}

#[tokio::test]
async fn test_title_search_is_case_insensitive_substring() {
    let (_dir, store) = test_store().await;
    seed(&store, &work("a", "u1", "Coffee Shop Landing", None, 0)).await;
    seed(&store, &work("b", "u1", "ESHOP dashboard", None, 1)).await;
    seed(&store, &work("c", "u1", "Portfolio", None, 2)).await;
    seed(&store, &work("d", "u1", "100% Pure_CSS", None, 3)).await;

    let filter = FeedFilter {
        title_contains: Some("shop".to_string()),
        ..FeedFilter::default()
    };
    assert_eq!(ids(&query_feed(&store, &filter).await.unwrap()), vec!["b", "a"]);

    // LIKE wildcards in the search text are literal characters
    let filter = FeedFilter {
        title_contains: Some("0%".to_string()),
        ..FeedFilter::default()
    };
    assert_eq!(ids(&query_feed(&store, &filter).await.unwrap()), vec!["d"]);

    let filter = FeedFilter {
        title_contains: Some("_".to_string()),
        ..FeedFilter::default()
    };
    assert_eq!(ids(&query_feed(&store, &filter).await.unwrap()), vec!["d"]);
}

#[tokio::test]
async fn test_title_search_folds_non_ascii_case() {
    let (_dir, store) = test_store().await;
    seed(&store, &work("a", "u1", "ÉCOLE Portfolio", None, 0)).await;
    seed(&store, &work("b", "u1", "Straße Café", None, 1)).await;
    seed(&store, &work("c", "u1", "Ecole", None, 2)).await;

    let filter = FeedFilter {
        title_contains: Some("école".to_string()),
        ..FeedFilter::default()
    };
    assert_eq!(ids(&query_feed(&store, &filter).await.unwrap()), vec!["a"]);
    assert_eq!(count_feed(&store, &filter).await.unwrap(), 1);

    let filter = FeedFilter {
        title_contains: Some("CAFÉ".to_string()),
        ..FeedFilter::default()
    };
    assert_eq!(ids(&query_feed(&store, &filter).await.unwrap()), vec!["b"]);
}

#[tokio::test]
async fn test_filters_compose() {
    let (_dir, store) = test_store().await;
    seed(&store, &work("a", "u1", "Shop", Some("Art"), 0)).await;
    seed(&store, &work("b", "u2", "Shop", Some("Art"), 1)).await;
    seed(&store, &work("c", "u1", "Blog", Some("Art"), 2)).await;
    seed(&store, &work("d", "u1", "Shop", Some("Web"), 3)).await;

    let filter = FeedFilter {
        owner_id: Some("u1".to_string()),
        title_contains: Some("SHOP".to_string()),
        category: Some("Art".to_string()),
        offset: 0,
    };
    assert_eq!(ids(&query_feed(&store, &filter).await.unwrap()), vec!["a"]);
    assert_eq!(count_feed(&store, &filter).await.unwrap(), 1);
}

#[tokio::test]
async fn test_pages_hold_twelve_and_tie_break_is_stable() {
    let (_dir, store) = test_store().await;
    // 25 works sharing one timestamp: only insertion order can order them
    for i in 0..25 {
        seed(&store, &work(&format!("w{:02}", i), "u1", "Same", None, 0)).await;
    }

    let total = count_feed(&store, &FeedFilter::default()).await.unwrap();
    assert_eq!(total, 25);
    assert_eq!(total_pages(total), 3);

    let mut seen = Vec::new();
    for page in 0..3 {
        let filter = FeedFilter {
            offset: page * PAGE_SIZE,
            ..FeedFilter::default()
        };
        let works = query_feed(&store, &filter).await.unwrap();
        assert!(works.len() <= PAGE_SIZE as usize);
        seen.extend(works.into_iter().map(|w| w.id));
    }

    let expected: Vec<String> = (0..25).rev().map(|i| format!("w{:02}", i)).collect();
    assert_eq!(seen, expected);

    // Repeating a page yields the same rows
    let filter = FeedFilter {
        offset: 12,
        ..FeedFilter::default()
    };
    let again = query_feed(&store, &filter).await.unwrap();
    assert_eq!(ids(&again), expected[12..24].iter().map(String::as_str).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_negative_offset_treated_as_zero() {
    let (_dir, store) = test_store().await;
    seed(&store, &work("a", "u1", "A", None, 0)).await;

    let filter = FeedFilter {
        offset: -10,
        ..FeedFilter::default()
    };
    assert_eq!(ids(&query_feed(&store, &filter).await.unwrap()), vec!["a"]);
}

#[tokio::test]
async fn test_create_work_then_owner_feed() {
    let (_dir, store) = test_store().await;
    let events = EventBus::new(16);

    let created = create_work(&store, &events, Some("u1"), complete_submission())
        .await
        .unwrap();
    assert_eq!(created.user_id, "u1");
    assert!(!created.id.is_empty());

    let filter = FeedFilter {
        owner_id: Some("u1".to_string()),
        ..FeedFilter::default()
    };
    let works = query_feed(&store, &filter).await.unwrap();
    assert_eq!(works, vec![created.clone()]);

    assert_eq!(get_work(&store, &created.id).await.unwrap(), created);
}

#[tokio::test]
async fn test_create_work_missing_fields_reported_in_order() {
    let (_dir, store) = test_store().await;
    let events = EventBus::new(16);

    let unauthenticated = create_work(&store, &events, None, NewWork::default()).await;
    assert!(matches!(unauthenticated, Err(ServiceError::Unauthenticated)));

    let cases = [
        (NewWork { image: Some(String::new()), ..complete_submission() }, RequiredField::Image),
        (NewWork { title: None, description: None, ..complete_submission() }, RequiredField::Title),
        (NewWork { description: Some(String::new()), ..complete_submission() }, RequiredField::Description),
        (NewWork { github_url: None, live_site_url: None, ..complete_submission() }, RequiredField::Source),
        (NewWork { live_site_url: Some(String::new()), ..complete_submission() }, RequiredField::LiveSite),
    ];

    for (fields, expected) in cases {
        match create_work(&store, &events, Some("u1"), fields).await {
            Err(ServiceError::MissingField(field)) => assert_eq!(field, expected),
            other => panic!("expected MissingField({}), got {:?}", expected, other),
        }
    }

    // No failed submission reached the store
    assert_eq!(count_feed(&store, &FeedFilter::default()).await.unwrap(), 0);
}

#[tokio::test]
async fn test_create_work_signals_invalidation() {
    let (_dir, store) = test_store().await;
    let events = EventBus::new(16);
    let mut rx = events.subscribe();

    let fields = NewWork {
        category: Some("Streetwear".to_string()),
        ..complete_submission()
    };
    create_work(&store, &events, Some("u1"), fields).await.unwrap();

    let mut paths = Vec::new();
    while let Ok(ShowcaseEvent::CacheInvalidated { path, .. }) = rx.try_recv() {
        paths.push(path);
    }
    assert_eq!(paths, vec!["/".to_string(), "/?category=Streetwear".to_string()]);
}

#[tokio::test]
async fn test_create_work_succeeds_without_invalidation_subscribers() {
    let (_dir, store) = test_store().await;
    let events = EventBus::new(16);
    assert_eq!(events.subscriber_count(), 0);

    let created = create_work(&store, &events, Some("u1"), complete_submission()).await;
    assert!(created.is_ok());
}

#[tokio::test]
async fn test_get_work_not_found() {
    let (_dir, store) = test_store().await;

    let result = get_work(&store, "missing").await;
    assert!(matches!(result, Err(ServiceError::NotFound(_))));
}

#[tokio::test]
async fn test_saved_works_lists_only_viewer_bookmarks() {
    let (_dir, store) = test_store().await;
    seed(&store, &work("a", "owner", "A", None, 0)).await;
    seed(&store, &work("b", "owner", "B", None, 10)).await;
    seed(&store, &work("c", "owner", "C", None, 20)).await;

    toggle(&store, EngagementKind::Bookmark, "a", Some("viewer")).await.unwrap();
    toggle(&store, EngagementKind::Bookmark, "c", Some("viewer")).await.unwrap();
    toggle(&store, EngagementKind::Bookmark, "b", Some("someone-else")).await.unwrap();
    // Likes are not saves
    toggle(&store, EngagementKind::Like, "b", Some("viewer")).await.unwrap();

    let works = saved_works(&store, Some("viewer")).await.unwrap();
    assert_eq!(ids(&works), vec!["c", "a"]);

    let anonymous = saved_works(&store, None).await;
    assert!(matches!(anonymous, Err(ServiceError::Unauthenticated)));
}
