//! Domain entities mirrored from persistent storage.

use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRecord {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub markdown: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Listing projection of a post; the markdown body is never loaded for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct PostSummary {
    pub slug: String,
    pub title: String,
}

impl From<&PostRecord> for PostSummary {
    fn from(record: &PostRecord) -> Self {
        Self {
            slug: record.slug.clone(),
            title: record.title.clone(),
        }
    }
}
