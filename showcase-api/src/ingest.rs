//! Work ingestion
//!
//! Validates submitted fields in a fixed order, persists the Work, then
//! signals view-cache invalidation. Invalidation is best-effort: the write
//! has already succeeded by the time it runs.

use serde::Deserialize;
use showcase_common::db::Work;
use showcase_common::events::{EventBus, ShowcaseEvent};
use showcase_common::time::{from_millis, now, to_millis};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::error::{RequiredField, Result, ServiceError};
use crate::store::ContentStore;

/// View key for the unfiltered feed
pub const FEED_VIEW: &str = "/";

/// Submitted Work fields; every field may be absent on the wire
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWork {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub live_site_url: Option<String>,
    pub github_url: Option<String>,
    pub category: Option<String>,
}

/// Take a required field, treating absent and empty the same
fn required(value: Option<String>, field: RequiredField) -> Result<String> {
    value
        .filter(|v| !v.is_empty())
        .ok_or(ServiceError::MissingField(field))
}

/// Validate, persist, and announce a new work
///
/// Checks run owner, image, title, description, source link, live site;
/// the first failure is returned and nothing is written.
pub async fn create_work(
    store: &ContentStore,
    events: &EventBus,
    owner_id: Option<&str>,
    fields: NewWork,
) -> Result<Work> {
    let owner_id = owner_id
        .filter(|o| !o.trim().is_empty())
        .ok_or(ServiceError::Unauthenticated)?;
    let image = required(fields.image, RequiredField::Image)?;
    let title = required(fields.title, RequiredField::Title)?;
    let description = required(fields.description, RequiredField::Description)?;
    let github_url = required(fields.github_url, RequiredField::Source)?;
    let live_site_url = required(fields.live_site_url, RequiredField::LiveSite)?;

    let work = Work {
        id: Uuid::new_v4().to_string(),
        user_id: owner_id.to_string(),
        title,
        description,
        image,
        live_site_url,
        github_url,
        category: fields.category,
        // Stored at millisecond precision; return exactly what is stored
        created_at: from_millis(to_millis(now())),
    };

    store.insert_work(&work).await.map_err(|e| {
        error!("create_work failed (owner={}): {}", owner_id, e);
        ServiceError::store("create_work")(e)
    })?;

    info!("Created work {} for {}", work.id, work.user_id);

    for path in invalidation_paths(work.category.as_deref()) {
        signal_invalidation(events, path);
    }

    Ok(work)
}

/// View keys made stale by a new work in `category`
///
/// Always the unfiltered feed; plus the category view when the category is
/// non-blank.
pub fn invalidation_paths(category: Option<&str>) -> Vec<String> {
    let mut paths = vec![FEED_VIEW.to_string()];
    if let Some(category) = category.filter(|c| !c.trim().is_empty()) {
        paths.push(format!("/?category={}", urlencoding::encode(category)));
    }
    paths
}

fn signal_invalidation(events: &EventBus, path: String) {
    match events.emit(ShowcaseEvent::invalidate(path.clone())) {
        Ok(receivers) => debug!("Invalidated {} ({} subscribers)", path, receivers),
        Err(_) => warn!("Cache invalidation for {} not delivered: no subscribers", path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalidation_paths_without_category() {
        assert_eq!(invalidation_paths(None), vec!["/".to_string()]);
        assert_eq!(invalidation_paths(Some("")), vec!["/".to_string()]);
        assert_eq!(invalidation_paths(Some("   ")), vec!["/".to_string()]);
    }

    #[test]
    fn test_invalidation_paths_encode_category() {
        assert_eq!(
            invalidation_paths(Some("Street wear & co")),
            vec!["/".to_string(), "/?category=Street%20wear%20%26%20co".to_string()]
        );
    }

    #[test]
    fn test_required_rejects_empty() {
        assert!(matches!(
            required(Some(String::new()), RequiredField::Title),
            Err(ServiceError::MissingField(RequiredField::Title))
        ));
        assert!(matches!(
            required(None, RequiredField::Image),
            Err(ServiceError::MissingField(RequiredField::Image))
        ));
        assert_eq!(required(Some("x".into()), RequiredField::Image).unwrap(), "x");
    }
}
