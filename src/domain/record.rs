use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Bookkeeping fields every persisted record carries.
///
/// `id` is assigned once at creation and never changes; `updatedAt` is
/// refreshed on every mutation. Records stored without `updatedAt` read back
/// with it equal to `createdAt`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredMeta")]
pub struct RecordMeta {
    pub id: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize)]
struct StoredMeta {
    id: String,
    #[serde(rename = "createdAt")]
    created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt", default)]
    updated_at: Option<DateTime<Utc>>,
}

impl From<StoredMeta> for RecordMeta {
    fn from(stored: StoredMeta) -> Self {
        Self {
            id: stored.id,
            created_at: stored.created_at,
            updated_at: stored.updated_at.unwrap_or(stored.created_at),
        }
    }
}

impl RecordMeta {
    /// Metadata for a seed record, stamped with the current time.
    pub fn seed(id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Records addressable by a URL slug.
pub trait HasSlug {
    fn slug(&self) -> &str;
}

/// Records that can be highlighted on the home page.
pub trait Featurable {
    fn is_featured(&self) -> bool;
}

/// Flagged items when there are at least `limit` of them, otherwise the first
/// `limit` items in collection order.
pub fn featured<T: Featurable>(items: Vec<T>, limit: usize) -> Vec<T> {
    let flagged = items.iter().filter(|item| item.is_featured()).count();
    if flagged >= limit {
        items.into_iter().filter(|item| item.is_featured()).take(limit).collect()
    } else {
        items.into_iter().take(limit).collect()
    }
}

pub(crate) fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Item(bool, u8);

    impl Featurable for Item {
        fn is_featured(&self) -> bool {
            self.0
        }
    }

    #[test]
    fn test_featured_prefers_flagged_items() {
        let items = vec![Item(false, 1), Item(true, 2), Item(true, 3), Item(false, 4)];
        let picked: Vec<u8> = featured(items, 2).into_iter().map(|i| i.1).collect();
        assert_eq!(picked, vec![2, 3]);
    }

    #[test]
    fn test_featured_falls_back_to_first_items() {
        let items = vec![Item(false, 1), Item(true, 2), Item(false, 3), Item(false, 4)];
        let picked: Vec<u8> = featured(items, 3).into_iter().map(|i| i.1).collect();
        assert_eq!(picked, vec![1, 2, 3]);
    }

    #[test]
    fn test_meta_uses_camel_case_timestamps() {
        let meta = RecordMeta::seed("svc_1");
        let json = serde_json::to_value(&meta).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        assert_eq!(json["id"], "svc_1");
    }

    #[test]
    fn test_missing_updated_at_defaults_to_created_at() {
        let meta: RecordMeta = serde_json::from_str(
            r#"{"id":"sub_1","createdAt":"2025-01-01T00:00:00Z","created_at":"2025-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(meta.id, "sub_1");
        assert_eq!(meta.updated_at, meta.created_at);
    }
}
