use crate::models::quiz::{Answer, Question, Quiz};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateQuizDto {
    pub lesson_id: Uuid,
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    pub description: Option<String>,
    #[validate(range(min = 0, max = 100))]
    pub pass_threshold: i32,
    pub questions: Vec<CreateQuestionDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateQuestionDto {
    pub text: String,
    pub allows_multiple_answers: bool,
    pub answers: Vec<CreateAnswerDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAnswerDto {
    pub text: String,
    pub is_correct: bool,
}

/// Quiz as shown to clients. Answers are listed without their correctness
/// flag so the answer key never leaves the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizResponseDto {
    pub id: Uuid,
    pub lesson_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub pass_threshold: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub questions: Vec<QuestionResponseDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionResponseDto {
    pub id: Uuid,
    pub text: String,
    pub allows_multiple_answers: bool,
    pub answers: Vec<AnswerOptionDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerOptionDto {
    pub id: Uuid,
    pub text: String,
}

impl From<Quiz> for QuizResponseDto {
    fn from(quiz: Quiz) -> Self {
        Self {
            id: quiz.id,
            lesson_id: quiz.lesson_id,
            title: quiz.title,
            description: quiz.description,
            pass_threshold: quiz.pass_threshold,
            created_at: quiz.created_at,
            questions: quiz.questions.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<Question> for QuestionResponseDto {
    fn from(question: Question) -> Self {
        Self {
            id: question.id,
            text: question.text,
            allows_multiple_answers: question.allows_multiple_answers,
            answers: question.answers.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<Answer> for AnswerOptionDto {
    fn from(answer: Answer) -> Self {
        Self {
            id: answer.id,
            text: answer.text,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SubmitQuizDto {
    pub quiz_id: Uuid,
    pub user_id: Uuid,
    pub answers: Vec<QuestionAnswersDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionAnswersDto {
    pub question_id: Uuid,
    pub selected_answer_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizResultDto {
    pub attempt_id: Uuid,
    pub quiz_id: Uuid,
    pub score: i32,
    pub passed: bool,
    pub questions: Vec<QuestionResultDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionResultDto {
    pub question_id: Uuid,
    pub selected_answer_ids: Vec<Uuid>,
    pub is_correct: bool,
}
