use crate::dto::common_dto::DateRangeFilterDto;
use crate::dto::lesson_resource_dto::{
    CreateLessonResourceDto, LessonResourceResponseDto, UpdateLessonResourceDto,
};
use crate::error::{Error, Result};
use crate::models::lesson_resource::{LessonResource, ResourceType};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

const RESOURCE_COLUMNS: &str = "id, lesson_id, title, description, filename, original_name, \
     mimetype, size, file_path, file_url, resource_type, download_count, is_active, created_at";

#[derive(Debug, serde::Serialize)]
pub struct PaginatedResources {
    pub items: Vec<LessonResourceResponseDto>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

/// Metadata CRUD for lesson files. The file bytes live with the external
/// storage collaborator; rows are soft-deleted via `is_active` so download
/// links can be revoked without losing history.
#[derive(Clone)]
pub struct LessonResourceService {
    pool: PgPool,
}

impl LessonResourceService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, dto: CreateLessonResourceDto) -> Result<LessonResourceResponseDto> {
        dto.validate()?;
        let resource_type = ResourceType::from_mimetype(&dto.mimetype);

        let resource = sqlx::query_as::<_, LessonResource>(&format!(
            r#"
            INSERT INTO lesson_resources
                (lesson_id, title, description, filename, original_name, mimetype, size,
                 file_path, file_url, resource_type)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {RESOURCE_COLUMNS}
            "#,
        ))
        .bind(dto.lesson_id)
        .bind(&dto.title)
        .bind(&dto.description)
        .bind(&dto.filename)
        .bind(&dto.original_name)
        .bind(&dto.mimetype)
        .bind(dto.size)
        .bind(&dto.file_path)
        .bind(&dto.file_url)
        .bind(resource_type)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(
            resource_id = %resource.id,
            lesson_id = %resource.lesson_id,
            resource_type = ?resource.resource_type,
            "Lesson resource registered"
        );
        Ok(resource.into())
    }

    pub async fn list(
        &self,
        page: Option<i64>,
        per_page: Option<i64>,
        filters: &DateRangeFilterDto,
    ) -> Result<PaginatedResources> {
        let page = page.unwrap_or(1).max(1);
        let per_page = per_page.unwrap_or(20).clamp(1, 100);
        let offset = (page - 1) * per_page;

        let items = sqlx::query_as::<_, LessonResource>(&format!(
            r#"
            SELECT {RESOURCE_COLUMNS}
            FROM lesson_resources
            WHERE is_active = TRUE
              AND ($1::timestamptz IS NULL OR created_at >= $1)
              AND ($2::timestamptz IS NULL OR created_at <= $2)
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "#,
        ))
        .bind(filters.start_date)
        .bind(filters.end_date)
        .bind(per_page)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM lesson_resources
            WHERE is_active = TRUE
              AND ($1::timestamptz IS NULL OR created_at >= $1)
              AND ($2::timestamptz IS NULL OR created_at <= $2)
            "#,
        )
        .bind(filters.start_date)
        .bind(filters.end_date)
        .fetch_one(&self.pool)
        .await?;

        let total_pages = ((total as f64) / (per_page as f64)).ceil() as i64;

        Ok(PaginatedResources {
            items: items.into_iter().map(Into::into).collect(),
            total,
            page,
            per_page,
            total_pages,
        })
    }

    pub async fn get(&self, id: Uuid) -> Result<LessonResourceResponseDto> {
        let resource = self.get_active(id).await?;
        Ok(resource.into())
    }

    pub async fn list_by_lesson(
        &self,
        lesson_id: Uuid,
        filters: &DateRangeFilterDto,
    ) -> Result<Vec<LessonResourceResponseDto>> {
        let items = sqlx::query_as::<_, LessonResource>(&format!(
            r#"
            SELECT {RESOURCE_COLUMNS}
            FROM lesson_resources
            WHERE lesson_id = $1
              AND is_active = TRUE
              AND ($2::timestamptz IS NULL OR created_at >= $2)
              AND ($3::timestamptz IS NULL OR created_at <= $3)
            ORDER BY created_at DESC
            "#,
        ))
        .bind(lesson_id)
        .bind(filters.start_date)
        .bind(filters.end_date)
        .fetch_all(&self.pool)
        .await?;

        Ok(items.into_iter().map(Into::into).collect())
    }

    pub async fn list_by_resource_type(
        &self,
        resource_type: ResourceType,
    ) -> Result<Vec<LessonResourceResponseDto>> {
        let items = sqlx::query_as::<_, LessonResource>(&format!(
            r#"
            SELECT {RESOURCE_COLUMNS}
            FROM lesson_resources
            WHERE resource_type = $1 AND is_active = TRUE
            ORDER BY created_at DESC
            "#,
        ))
        .bind(resource_type)
        .fetch_all(&self.pool)
        .await?;

        Ok(items.into_iter().map(Into::into).collect())
    }

    pub async fn update(
        &self,
        id: Uuid,
        dto: UpdateLessonResourceDto,
    ) -> Result<LessonResourceResponseDto> {
        dto.validate()?;

        let resource = sqlx::query_as::<_, LessonResource>(&format!(
            r#"
            UPDATE lesson_resources
            SET
                title = COALESCE($2, title),
                description = COALESCE($3, description)
            WHERE id = $1 AND is_active = TRUE
            RETURNING {RESOURCE_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(&dto.title)
        .bind(&dto.description)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Lesson resource {} not found", id)))?;

        Ok(resource.into())
    }

    /// Hides the row from readers; the record (and the stored file) stays.
    pub async fn soft_delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("UPDATE lesson_resources SET is_active = FALSE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!("Lesson resource {} not found", id)));
        }
        tracing::info!(resource_id = %id, "Lesson resource deactivated");
        Ok(())
    }

    /// Drops the row entirely. Deleting the stored file is the storage
    /// collaborator's job, keyed by the filename this returns.
    pub async fn permanent_delete(&self, id: Uuid) -> Result<String> {
        let resource = self.get_active(id).await?;

        sqlx::query("DELETE FROM lesson_resources WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        tracing::info!(resource_id = %id, filename = %resource.filename, "Lesson resource deleted");
        Ok(resource.filename)
    }

    pub async fn increment_download_count(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query(
            "UPDATE lesson_resources SET download_count = download_count + 1 WHERE id = $1",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!("Lesson resource {} not found", id)));
        }
        Ok(())
    }

    async fn get_active(&self, id: Uuid) -> Result<LessonResource> {
        sqlx::query_as::<_, LessonResource>(&format!(
            "SELECT {RESOURCE_COLUMNS} FROM lesson_resources WHERE id = $1 AND is_active = TRUE",
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Lesson resource {} not found", id)))
    }
}

#[cfg(test)]
mod tests {
    use crate::models::lesson_resource::ResourceType;

    #[test]
    fn classifies_resource_type_from_mimetype() {
        assert_eq!(ResourceType::from_mimetype("image/png"), ResourceType::Image);
        assert_eq!(ResourceType::from_mimetype("video/mp4"), ResourceType::Video);
        assert_eq!(ResourceType::from_mimetype("audio/mpeg"), ResourceType::Audio);
        assert_eq!(
            ResourceType::from_mimetype("application/pdf"),
            ResourceType::Document
        );
        assert_eq!(
            ResourceType::from_mimetype("text/plain"),
            ResourceType::Document
        );
        assert_eq!(
            ResourceType::from_mimetype("application/zip"),
            ResourceType::Archive
        );
        assert_eq!(
            ResourceType::from_mimetype("application/octet-stream"),
            ResourceType::Other
        );
    }
}
