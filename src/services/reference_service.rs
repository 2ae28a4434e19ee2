use crate::dto::reference_dto::{CreateReferenceDto, ReferenceResponseDto, UpdateReferenceDto};
use crate::error::{Error, Result};
use crate::models::reference::Reference;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

const REFERENCE_COLUMNS: &str =
    "id, title, url, description, module_id, lesson_id, created_at, updated_at";

#[derive(Clone)]
pub struct ReferenceService {
    pool: PgPool,
}

impl ReferenceService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, dto: CreateReferenceDto) -> Result<ReferenceResponseDto> {
        dto.validate()?;

        let reference = sqlx::query_as::<_, Reference>(&format!(
            r#"
            INSERT INTO course_references (title, url, description, module_id, lesson_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {REFERENCE_COLUMNS}
            "#,
        ))
        .bind(&dto.title)
        .bind(&dto.url)
        .bind(&dto.description)
        .bind(dto.module_id)
        .bind(dto.lesson_id)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(reference_id = %reference.id, "Reference created");
        Ok(reference.into())
    }

    pub async fn list(&self) -> Result<Vec<ReferenceResponseDto>> {
        let references = sqlx::query_as::<_, Reference>(&format!(
            "SELECT {REFERENCE_COLUMNS} FROM course_references ORDER BY created_at DESC",
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(references.into_iter().map(Into::into).collect())
    }

    pub async fn get(&self, id: Uuid) -> Result<ReferenceResponseDto> {
        let reference = sqlx::query_as::<_, Reference>(&format!(
            "SELECT {REFERENCE_COLUMNS} FROM course_references WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Reference {} not found", id)))?;
        Ok(reference.into())
    }

    pub async fn list_by_module(&self, module_id: Uuid) -> Result<Vec<ReferenceResponseDto>> {
        let references = sqlx::query_as::<_, Reference>(&format!(
            r#"
            SELECT {REFERENCE_COLUMNS}
            FROM course_references
            WHERE module_id = $1
            ORDER BY created_at DESC
            "#,
        ))
        .bind(module_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(references.into_iter().map(Into::into).collect())
    }

    pub async fn list_by_lesson(&self, lesson_id: Uuid) -> Result<Vec<ReferenceResponseDto>> {
        let references = sqlx::query_as::<_, Reference>(&format!(
            r#"
            SELECT {REFERENCE_COLUMNS}
            FROM course_references
            WHERE lesson_id = $1
            ORDER BY created_at DESC
            "#,
        ))
        .bind(lesson_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(references.into_iter().map(Into::into).collect())
    }

    pub async fn update(&self, id: Uuid, dto: UpdateReferenceDto) -> Result<ReferenceResponseDto> {
        dto.validate()?;

        let reference = sqlx::query_as::<_, Reference>(&format!(
            r#"
            UPDATE course_references
            SET
                title = COALESCE($2, title),
                url = COALESCE($3, url),
                description = COALESCE($4, description),
                module_id = COALESCE($5, module_id),
                lesson_id = COALESCE($6, lesson_id),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {REFERENCE_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(&dto.title)
        .bind(&dto.url)
        .bind(&dto.description)
        .bind(dto.module_id)
        .bind(dto.lesson_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Reference {} not found", id)))?;

        Ok(reference.into())
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM course_references WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!("Reference {} not found", id)));
        }
        tracing::info!(reference_id = %id, "Reference deleted");
        Ok(())
    }
}
