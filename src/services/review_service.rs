use crate::dto::common_dto::DateRangeFilterDto;
use crate::dto::review_dto::{CreateReviewDto, ReviewResponseDto, UpdateReviewDto};
use crate::error::{Error, Result};
use crate::models::review::Review;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

const REVIEW_COLUMNS: &str = "id, course_id, user_id, rating, comment, created_at, updated_at";

/// Course reviews, at most one per (user, course).
#[derive(Clone)]
pub struct ReviewService {
    pool: PgPool,
}

impl ReviewService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_review(
        &self,
        user_id: Uuid,
        course_id: Uuid,
        dto: CreateReviewDto,
    ) -> Result<ReviewResponseDto> {
        dto.validate()?;

        let existing = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM reviews WHERE user_id = $1 AND course_id = $2",
        )
        .bind(user_id)
        .bind(course_id)
        .fetch_optional(&self.pool)
        .await?;
        if existing.is_some() {
            return Err(Error::BadRequest(
                "You have already reviewed this course".to_string(),
            ));
        }

        let review = sqlx::query_as::<_, Review>(&format!(
            r#"
            INSERT INTO reviews (course_id, user_id, rating, comment)
            VALUES ($1, $2, $3, $4)
            RETURNING {REVIEW_COLUMNS}
            "#,
        ))
        .bind(course_id)
        .bind(user_id)
        .bind(dto.rating)
        .bind(&dto.comment)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(review_id = %review.id, course_id = %course_id, "Review created");
        Ok(review.into())
    }

    pub async fn list_course_reviews(
        &self,
        course_id: Uuid,
        filters: &DateRangeFilterDto,
    ) -> Result<Vec<ReviewResponseDto>> {
        let reviews = sqlx::query_as::<_, Review>(&format!(
            r#"
            SELECT {REVIEW_COLUMNS}
            FROM reviews
            WHERE course_id = $1
              AND ($2::timestamptz IS NULL OR created_at >= $2)
              AND ($3::timestamptz IS NULL OR created_at <= $3)
            ORDER BY created_at DESC
            "#,
        ))
        .bind(course_id)
        .bind(filters.start_date)
        .bind(filters.end_date)
        .fetch_all(&self.pool)
        .await?;

        Ok(reviews.into_iter().map(Into::into).collect())
    }

    pub async fn get_my_review(&self, user_id: Uuid, course_id: Uuid) -> Result<ReviewResponseDto> {
        let review = sqlx::query_as::<_, Review>(&format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews WHERE user_id = $1 AND course_id = $2",
        ))
        .bind(user_id)
        .bind(course_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| {
            Error::NotFound(format!("No review by user {} for course {}", user_id, course_id))
        })?;

        Ok(review.into())
    }

    pub async fn update_review(
        &self,
        user_id: Uuid,
        course_id: Uuid,
        dto: UpdateReviewDto,
    ) -> Result<ReviewResponseDto> {
        dto.validate()?;

        let review = sqlx::query_as::<_, Review>(&format!(
            r#"
            UPDATE reviews
            SET
                rating = COALESCE($3, rating),
                comment = COALESCE($4, comment),
                updated_at = NOW()
            WHERE user_id = $1 AND course_id = $2
            RETURNING {REVIEW_COLUMNS}
            "#,
        ))
        .bind(user_id)
        .bind(course_id)
        .bind(dto.rating)
        .bind(&dto.comment)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| {
            Error::NotFound(format!("No review by user {} for course {}", user_id, course_id))
        })?;

        Ok(review.into())
    }

    pub async fn delete_review(&self, user_id: Uuid, course_id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM reviews WHERE user_id = $1 AND course_id = $2")
            .bind(user_id)
            .bind(course_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!(
                "No review by user {} for course {}",
                user_id, course_id
            )));
        }
        tracing::info!(user_id = %user_id, course_id = %course_id, "Review deleted");
        Ok(())
    }
}
