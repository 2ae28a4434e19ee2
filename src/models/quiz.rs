use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::HashSet;
use uuid::Uuid;

/// A quiz aggregate. `questions` is populated by the repository when the
/// full aggregate is loaded and left empty for list queries.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Quiz {
    pub id: Uuid,
    pub lesson_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub pass_threshold: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[sqlx(skip)]
    pub questions: Vec<Question>,
}

impl Quiz {
    pub fn question(&self, question_id: Uuid) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == question_id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Question {
    pub id: Uuid,
    pub quiz_id: Uuid,
    pub text: String,
    pub allows_multiple_answers: bool,
    pub position: i32,
    #[sqlx(skip)]
    pub answers: Vec<Answer>,
}

impl Question {
    pub fn answer(&self, answer_id: Uuid) -> Option<&Answer> {
        self.answers.iter().find(|a| a.id == answer_id)
    }

    pub fn correct_answer_ids(&self) -> HashSet<Uuid> {
        self.answers
            .iter()
            .filter(|a| a.is_correct)
            .map(|a| a.id)
            .collect()
    }
}

/// Answer `position` orders options for display only; correctness is
/// decided purely by `is_correct`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Answer {
    pub id: Uuid,
    pub question_id: Uuid,
    pub text: String,
    pub is_correct: bool,
    pub position: i32,
}

#[derive(Debug, Clone)]
pub struct NewQuiz {
    pub lesson_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub pass_threshold: i32,
    pub questions: Vec<NewQuestion>,
}

#[derive(Debug, Clone)]
pub struct NewQuestion {
    pub text: String,
    pub allows_multiple_answers: bool,
    pub answers: Vec<NewAnswer>,
}

#[derive(Debug, Clone)]
pub struct NewAnswer {
    pub text: String,
    pub is_correct: bool,
}
