use crate::services::quiz_validation_service::SubmissionError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    /// Caller mistake outside quiz submission (e.g. authoring a quiz with a
    /// contradictory answer key). Client-facing 400-equivalent.
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Structural violation in a quiz submission. Carries the violated rule
    /// and offending ids. Client-facing 400-equivalent.
    #[error("Invalid submission: {0}")]
    Submission(#[from] SubmissionError),

    /// Quiz data that cannot be graded (no questions). A data-integrity
    /// fault, 500-equivalent — never silently scored as 0%.
    #[error("Invalid quiz state: {0}")]
    InvalidQuizState(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Error::NotFound("Resource not found".to_string()),
            other => Error::Database(other),
        }
    }
}
