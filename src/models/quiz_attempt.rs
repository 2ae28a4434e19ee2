use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One graded submission of a quiz by a user. At most one row exists per
/// (user_id, quiz_id); resubmission replaces score, flag, timestamp and the
/// response set while keeping the attempt id.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct QuizAttempt {
    pub id: Uuid,
    pub quiz_id: Uuid,
    pub user_id: Uuid,
    pub score: i32,
    pub passed: bool,
    pub submitted_at: DateTime<Utc>,
    #[sqlx(skip)]
    pub responses: Vec<UserQuestionResponse>,
}

/// Per-question detail of an attempt, in quiz question order. Immutable
/// after creation; `is_correct` is derived at grading time.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserQuestionResponse {
    pub id: Uuid,
    pub attempt_id: Uuid,
    pub question_id: Uuid,
    pub selected_answer_ids: Vec<Uuid>,
    pub is_correct: bool,
    pub position: i32,
}

#[derive(Debug, Clone)]
pub struct NewQuizAttempt {
    pub quiz_id: Uuid,
    pub user_id: Uuid,
    pub score: i32,
    pub passed: bool,
    pub responses: Vec<NewUserQuestionResponse>,
}

#[derive(Debug, Clone)]
pub struct NewUserQuestionResponse {
    pub question_id: Uuid,
    pub selected_answer_ids: Vec<Uuid>,
    pub is_correct: bool,
}
