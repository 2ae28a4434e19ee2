use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Metadata row for an uploaded lesson file. The bytes themselves live with
/// the external storage collaborator; this backend only tracks the record.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LessonResource {
    pub id: Uuid,
    pub lesson_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub filename: String,
    pub original_name: String,
    pub mimetype: String,
    pub size: i64,
    pub file_path: String,
    pub file_url: Option<String>,
    pub resource_type: ResourceType,
    pub download_count: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "resource_type", rename_all = "snake_case")]
pub enum ResourceType {
    Document,
    Video,
    Audio,
    Image,
    Archive,
    Other,
}

impl ResourceType {
    pub fn from_mimetype(mimetype: &str) -> Self {
        if mimetype.starts_with("image/") {
            return ResourceType::Image;
        }
        if mimetype.starts_with("video/") {
            return ResourceType::Video;
        }
        if mimetype.starts_with("audio/") {
            return ResourceType::Audio;
        }
        if mimetype.contains("pdf")
            || mimetype.contains("document")
            || mimetype.contains("text")
            || mimetype.contains("spreadsheet")
            || mimetype.contains("presentation")
        {
            return ResourceType::Document;
        }
        if mimetype.contains("zip") || mimetype.contains("rar") {
            return ResourceType::Archive;
        }
        ResourceType::Other
    }
}
