use crate::dto::quiz_dto::{
    CreateQuizDto, QuestionResultDto, QuizResponseDto, QuizResultDto, SubmitQuizDto,
};
use crate::error::{Error, Result};
use crate::models::quiz::{NewAnswer, NewQuestion, NewQuiz};
use crate::models::quiz_attempt::{NewQuizAttempt, NewUserQuestionResponse, QuizAttempt};
use crate::repository::{AttemptRepository, QuizRepository};
use crate::services::grading_service::GradingService;
use crate::services::quiz_validation_service::QuizValidationService;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

/// Quiz authoring plus attempt submission. Repositories are injected so the
/// orchestration can be exercised against fakes.
#[derive(Clone)]
pub struct QuizService {
    quizzes: Arc<dyn QuizRepository>,
    attempts: Arc<dyn AttemptRepository>,
}

impl QuizService {
    pub fn new(quizzes: Arc<dyn QuizRepository>, attempts: Arc<dyn AttemptRepository>) -> Self {
        Self { quizzes, attempts }
    }

    pub async fn create_quiz(&self, dto: CreateQuizDto) -> Result<QuizResponseDto> {
        dto.validate()?;
        if dto.questions.is_empty() {
            return Err(Error::BadRequest(
                "A quiz needs at least one question".to_string(),
            ));
        }
        for (index, question) in dto.questions.iter().enumerate() {
            if question.text.trim().is_empty() {
                return Err(Error::BadRequest(format!(
                    "Question {} has no text",
                    index + 1
                )));
            }
            if question.answers.len() < 2 {
                return Err(Error::BadRequest(format!(
                    "Question {} needs at least two answers",
                    index + 1
                )));
            }
            let correct = question.answers.iter().filter(|a| a.is_correct).count();
            if correct == 0 {
                return Err(Error::BadRequest(format!(
                    "Question {} has no correct answer",
                    index + 1
                )));
            }
            if !question.allows_multiple_answers && correct > 1 {
                return Err(Error::BadRequest(format!(
                    "Question {} accepts a single answer but declares {} correct answers",
                    index + 1,
                    correct
                )));
            }
        }

        let quiz = self
            .quizzes
            .create_quiz(NewQuiz {
                lesson_id: dto.lesson_id,
                title: dto.title,
                description: dto.description,
                pass_threshold: dto.pass_threshold,
                questions: dto
                    .questions
                    .into_iter()
                    .map(|q| NewQuestion {
                        text: q.text,
                        allows_multiple_answers: q.allows_multiple_answers,
                        answers: q
                            .answers
                            .into_iter()
                            .map(|a| NewAnswer {
                                text: a.text,
                                is_correct: a.is_correct,
                            })
                            .collect(),
                    })
                    .collect(),
            })
            .await?;

        tracing::info!(quiz_id = %quiz.id, lesson_id = %quiz.lesson_id, "Quiz created");
        Ok(quiz.into())
    }

    pub async fn list_quizzes(&self) -> Result<Vec<QuizResponseDto>> {
        let quizzes = self.quizzes.list_quizzes().await?;
        Ok(quizzes.into_iter().map(Into::into).collect())
    }

    pub async fn get_quiz(&self, quiz_id: Uuid) -> Result<QuizResponseDto> {
        let quiz = self
            .quizzes
            .get_quiz_with_questions_and_answers(quiz_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Quiz {} not found", quiz_id)))?;
        Ok(quiz.into())
    }

    pub async fn list_quizzes_by_lesson(&self, lesson_id: Uuid) -> Result<Vec<QuizResponseDto>> {
        let quizzes = self.quizzes.list_quizzes_by_lesson(lesson_id).await?;
        Ok(quizzes.into_iter().map(Into::into).collect())
    }

    pub async fn delete_quiz(&self, quiz_id: Uuid) -> Result<()> {
        if !self.quizzes.delete_quiz(quiz_id).await? {
            return Err(Error::NotFound(format!("Quiz {} not found", quiz_id)));
        }
        tracing::info!(quiz_id = %quiz_id, "Quiz deleted");
        Ok(())
    }

    /// Validates, grades and records a submission. Nothing is persisted
    /// unless grading succeeds, and the attempt plus its responses are
    /// written as one atomic unit by the repository.
    pub async fn submit_quiz(&self, dto: SubmitQuizDto) -> Result<QuizResultDto> {
        dto.validate()?;
        let quiz = self
            .quizzes
            .get_quiz_with_questions_and_answers(dto.quiz_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Quiz {} not found", dto.quiz_id)))?;

        let submission = QuizValidationService::validate(&quiz, &dto).map_err(|err| {
            tracing::warn!(
                quiz_id = %quiz.id,
                user_id = %dto.user_id,
                error = %err,
                "Rejected quiz submission"
            );
            Error::Submission(err)
        })?;

        let graded = GradingService::grade(&quiz, &submission)?;

        let responses = graded
            .questions
            .iter()
            .map(|q| NewUserQuestionResponse {
                question_id: q.question_id,
                selected_answer_ids: q.selected_answer_ids.clone(),
                is_correct: q.is_correct,
            })
            .collect();

        let attempt_id = self
            .attempts
            .save_attempt(NewQuizAttempt {
                quiz_id: quiz.id,
                user_id: dto.user_id,
                score: graded.score,
                passed: graded.passed,
                responses,
            })
            .await?;

        tracing::info!(
            attempt_id = %attempt_id,
            quiz_id = %quiz.id,
            user_id = %dto.user_id,
            score = graded.score,
            passed = graded.passed,
            "Quiz attempt recorded"
        );

        Ok(QuizResultDto {
            attempt_id,
            quiz_id: quiz.id,
            score: graded.score,
            passed: graded.passed,
            questions: graded
                .questions
                .into_iter()
                .map(|q| QuestionResultDto {
                    question_id: q.question_id,
                    selected_answer_ids: q.selected_answer_ids,
                    is_correct: q.is_correct,
                })
                .collect(),
        })
    }

    pub async fn get_user_quiz_attempt(
        &self,
        user_id: Uuid,
        quiz_id: Uuid,
    ) -> Result<Option<QuizAttempt>> {
        self.attempts.get_attempt(user_id, quiz_id).await
    }

    /// False (not an error) when the user has never attempted the quiz.
    pub async fn has_user_passed_quiz(&self, user_id: Uuid, quiz_id: Uuid) -> Result<bool> {
        let attempt = self.attempts.get_attempt(user_id, quiz_id).await?;
        Ok(attempt.map(|a| a.passed).unwrap_or(false))
    }
}
