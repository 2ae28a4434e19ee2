use crate::error::Result;
use crate::models::quiz::{NewQuiz, Quiz};
use crate::models::quiz_attempt::{NewQuizAttempt, QuizAttempt};
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use uuid::Uuid;

pub mod postgres;

/// Data access for quiz aggregates. `get_quiz_with_questions_and_answers`
/// loads the full aggregate including the answer key; callers decide what
/// to expose.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait QuizRepository: Send + Sync {
    async fn create_quiz(&self, quiz: NewQuiz) -> Result<Quiz>;

    async fn list_quizzes(&self) -> Result<Vec<Quiz>>;

    async fn list_quizzes_by_lesson(&self, lesson_id: Uuid) -> Result<Vec<Quiz>>;

    async fn get_quiz_with_questions_and_answers(&self, quiz_id: Uuid) -> Result<Option<Quiz>>;

    /// Returns false when no quiz with that id existed.
    async fn delete_quiz(&self, quiz_id: Uuid) -> Result<bool>;
}

/// Data access for attempts. `save_attempt` must be atomic: the attempt row
/// and all its response rows are written together or not at all, and a
/// resubmission by the same user for the same quiz replaces the previous
/// attempt in that same unit of work.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AttemptRepository: Send + Sync {
    async fn save_attempt(&self, attempt: NewQuizAttempt) -> Result<Uuid>;

    async fn get_attempt(&self, user_id: Uuid, quiz_id: Uuid) -> Result<Option<QuizAttempt>>;
}
