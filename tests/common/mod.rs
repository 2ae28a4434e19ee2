#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use lms_backend::dto::quiz_dto::QuestionAnswersDto;
use lms_backend::error::Result;
use lms_backend::models::quiz::{Answer, NewQuiz, Question, Quiz};
use lms_backend::models::quiz_attempt::{NewQuizAttempt, QuizAttempt, UserQuestionResponse};
use lms_backend::repository::{AttemptRepository, QuizRepository};
use lms_backend::services::quiz_service::QuizService;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// In-memory stand-in for the Postgres quiz store.
#[derive(Default)]
pub struct InMemoryQuizRepository {
    quizzes: Mutex<HashMap<Uuid, Quiz>>,
}

impl InMemoryQuizRepository {
    pub fn seed(&self, quiz: Quiz) {
        self.quizzes.lock().unwrap().insert(quiz.id, quiz);
    }
}

#[async_trait]
impl QuizRepository for InMemoryQuizRepository {
    async fn create_quiz(&self, quiz: NewQuiz) -> Result<Quiz> {
        let quiz_id = Uuid::new_v4();
        let questions = quiz
            .questions
            .into_iter()
            .enumerate()
            .map(|(position, question)| {
                let question_id = Uuid::new_v4();
                Question {
                    id: question_id,
                    quiz_id,
                    text: question.text,
                    allows_multiple_answers: question.allows_multiple_answers,
                    position: position as i32,
                    answers: question
                        .answers
                        .into_iter()
                        .enumerate()
                        .map(|(answer_position, answer)| Answer {
                            id: Uuid::new_v4(),
                            question_id,
                            text: answer.text,
                            is_correct: answer.is_correct,
                            position: answer_position as i32,
                        })
                        .collect(),
                }
            })
            .collect();
        let created = Quiz {
            id: quiz_id,
            lesson_id: quiz.lesson_id,
            title: quiz.title,
            description: quiz.description,
            pass_threshold: quiz.pass_threshold,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            questions,
        };
        self.seed(created.clone());
        Ok(created)
    }

    async fn list_quizzes(&self) -> Result<Vec<Quiz>> {
        Ok(self.quizzes.lock().unwrap().values().cloned().collect())
    }

    async fn list_quizzes_by_lesson(&self, lesson_id: Uuid) -> Result<Vec<Quiz>> {
        Ok(self
            .quizzes
            .lock()
            .unwrap()
            .values()
            .filter(|q| q.lesson_id == lesson_id)
            .cloned()
            .collect())
    }

    async fn get_quiz_with_questions_and_answers(&self, quiz_id: Uuid) -> Result<Option<Quiz>> {
        Ok(self.quizzes.lock().unwrap().get(&quiz_id).cloned())
    }

    async fn delete_quiz(&self, quiz_id: Uuid) -> Result<bool> {
        Ok(self.quizzes.lock().unwrap().remove(&quiz_id).is_some())
    }
}

/// In-memory attempt store with the same overwrite-on-resubmission
/// semantics as the Postgres upsert: one entry per (user, quiz), original
/// attempt id kept across resubmissions.
#[derive(Default)]
pub struct InMemoryAttemptRepository {
    attempts: Mutex<HashMap<(Uuid, Uuid), QuizAttempt>>,
}

impl InMemoryAttemptRepository {
    pub fn len(&self) -> usize {
        self.attempts.lock().unwrap().len()
    }
}

#[async_trait]
impl AttemptRepository for InMemoryAttemptRepository {
    async fn save_attempt(&self, attempt: NewQuizAttempt) -> Result<Uuid> {
        let mut attempts = self.attempts.lock().unwrap();
        let key = (attempt.user_id, attempt.quiz_id);
        let attempt_id = attempts.get(&key).map(|a| a.id).unwrap_or_else(Uuid::new_v4);

        let responses = attempt
            .responses
            .iter()
            .enumerate()
            .map(|(position, response)| UserQuestionResponse {
                id: Uuid::new_v4(),
                attempt_id,
                question_id: response.question_id,
                selected_answer_ids: response.selected_answer_ids.clone(),
                is_correct: response.is_correct,
                position: position as i32,
            })
            .collect();

        attempts.insert(
            key,
            QuizAttempt {
                id: attempt_id,
                quiz_id: attempt.quiz_id,
                user_id: attempt.user_id,
                score: attempt.score,
                passed: attempt.passed,
                submitted_at: Utc::now(),
                responses,
            },
        );
        Ok(attempt_id)
    }

    async fn get_attempt(&self, user_id: Uuid, quiz_id: Uuid) -> Result<Option<QuizAttempt>> {
        Ok(self
            .attempts
            .lock()
            .unwrap()
            .get(&(user_id, quiz_id))
            .cloned())
    }
}

pub fn setup() -> (
    QuizService,
    Arc<InMemoryQuizRepository>,
    Arc<InMemoryAttemptRepository>,
) {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
        .try_init()
        .ok();
    let quizzes = Arc::new(InMemoryQuizRepository::default());
    let attempts = Arc::new(InMemoryAttemptRepository::default());
    let service = QuizService::new(quizzes.clone(), attempts.clone());
    (service, quizzes, attempts)
}

pub fn answer(question_id: Uuid, is_correct: bool, position: i32) -> Answer {
    Answer {
        id: Uuid::new_v4(),
        question_id,
        text: format!("option {}", position),
        is_correct,
        position,
    }
}

/// Q1 single-answer with correct answer A1 of {A1, A2}; Q2 multi-select
/// with correct answers {B1, B2} of {B1, B2, B3}.
pub fn two_question_quiz(pass_threshold: i32) -> Quiz {
    let quiz_id = Uuid::new_v4();
    let q1_id = Uuid::new_v4();
    let q2_id = Uuid::new_v4();
    Quiz {
        id: quiz_id,
        lesson_id: Uuid::new_v4(),
        title: "Unit assessment".into(),
        description: None,
        pass_threshold,
        created_at: Utc::now(),
        updated_at: Utc::now(),
        questions: vec![
            Question {
                id: q1_id,
                quiz_id,
                text: "Pick one".into(),
                allows_multiple_answers: false,
                position: 0,
                answers: vec![answer(q1_id, true, 0), answer(q1_id, false, 1)],
            },
            Question {
                id: q2_id,
                quiz_id,
                text: "Pick all that apply".into(),
                allows_multiple_answers: true,
                position: 1,
                answers: vec![
                    answer(q2_id, true, 0),
                    answer(q2_id, true, 1),
                    answer(q2_id, false, 2),
                ],
            },
        ],
    }
}

/// The exact correct-answer selection for every question of the quiz.
pub fn correct_selections_for(quiz: &Quiz) -> Vec<QuestionAnswersDto> {
    quiz.questions
        .iter()
        .map(|question| QuestionAnswersDto {
            question_id: question.id,
            selected_answer_ids: question
                .answers
                .iter()
                .filter(|a| a.is_correct)
                .map(|a| a.id)
                .collect(),
        })
        .collect()
}
