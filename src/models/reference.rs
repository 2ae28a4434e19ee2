use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Supplementary study material attached to a module and/or lesson.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Reference {
    pub id: Uuid,
    pub title: String,
    pub url: Option<String>,
    pub description: Option<String>,
    pub module_id: Option<Uuid>,
    pub lesson_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
