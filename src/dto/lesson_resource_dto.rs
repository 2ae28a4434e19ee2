use crate::models::lesson_resource::{LessonResource, ResourceType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Metadata reported by the external storage collaborator after it has
/// stored the file; this backend never sees the bytes.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateLessonResourceDto {
    pub lesson_id: Uuid,
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    pub description: Option<String>,
    #[validate(length(min = 1))]
    pub filename: String,
    #[validate(length(min = 1))]
    pub original_name: String,
    #[validate(length(min = 1))]
    pub mimetype: String,
    #[validate(range(min = 0))]
    pub size: i64,
    #[validate(length(min = 1))]
    pub file_path: String,
    #[validate(url)]
    pub file_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateLessonResourceDto {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LessonResourceResponseDto {
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

impl From<LessonResource> for LessonResourceResponseDto {
    fn from(resource: LessonResource) -> Self {
        Self {
            id: resource.id,
            lesson_id: resource.lesson_id,
            title: resource.title,
            description: resource.description,
            filename: resource.filename,
            original_name: resource.original_name,
            mimetype: resource.mimetype,
            size: resource.size,
            file_path: resource.file_path,
            file_url: resource.file_url,
            resource_type: resource.resource_type,
            download_count: resource.download_count,
            is_active: resource.is_active,
            created_at: resource.created_at,
        }
    }
}
