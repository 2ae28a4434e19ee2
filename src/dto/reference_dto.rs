use crate::models::reference::Reference;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateReferenceDto {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(url)]
    pub url: Option<String>,
    pub description: Option<String>,
    pub module_id: Option<Uuid>,
    pub lesson_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateReferenceDto {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    #[validate(url)]
    pub url: Option<String>,
    pub description: Option<String>,
    pub module_id: Option<Uuid>,
    pub lesson_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceResponseDto {
    pub id: Uuid,
    pub title: String,
    pub url: Option<String>,
    pub description: Option<String>,
    pub module_id: Option<Uuid>,
    pub lesson_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Reference> for ReferenceResponseDto {
    fn from(reference: Reference) -> Self {
        Self {
            id: reference.id,
            title: reference.title,
            url: reference.url,
            description: reference.description,
            module_id: reference.module_id,
            lesson_id: reference.lesson_id,
            created_at: reference.created_at,
            updated_at: reference.updated_at,
        }
    }
}
