use crate::error::Result;
use crate::models::quiz::{Answer, NewQuiz, Question, Quiz};
use crate::models::quiz_attempt::{NewQuizAttempt, QuizAttempt, UserQuestionResponse};
use crate::repository::{AttemptRepository, QuizRepository};
use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

const QUIZ_COLUMNS: &str = "id, lesson_id, title, description, pass_threshold, created_at, updated_at";

#[derive(Clone)]
pub struct PgQuizRepository {
    pool: PgPool,
}

impl PgQuizRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fills in `questions` (with their answers) for the given quizzes.
    async fn attach_questions(&self, mut quizzes: Vec<Quiz>) -> Result<Vec<Quiz>> {
        if quizzes.is_empty() {
            return Ok(quizzes);
        }
        let quiz_ids: Vec<Uuid> = quizzes.iter().map(|q| q.id).collect();

        let questions = sqlx::query_as::<_, Question>(
            r#"
            SELECT id, quiz_id, text, allows_multiple_answers, position
            FROM questions
            WHERE quiz_id = ANY($1)
            ORDER BY quiz_id, position
            "#,
        )
        .bind(&quiz_ids)
        .fetch_all(&self.pool)
        .await?;

        let question_ids: Vec<Uuid> = questions.iter().map(|q| q.id).collect();
        let answers = sqlx::query_as::<_, Answer>(
            r#"
            SELECT id, question_id, text, is_correct, position
            FROM answers
            WHERE question_id = ANY($1)
            ORDER BY question_id, position
            "#,
        )
        .bind(&question_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut answers_by_question: HashMap<Uuid, Vec<Answer>> = HashMap::new();
        for answer in answers {
            answers_by_question
                .entry(answer.question_id)
                .or_default()
                .push(answer);
        }

        let mut questions_by_quiz: HashMap<Uuid, Vec<Question>> = HashMap::new();
        for mut question in questions {
            question.answers = answers_by_question.remove(&question.id).unwrap_or_default();
            questions_by_quiz
                .entry(question.quiz_id)
                .or_default()
                .push(question);
        }

        for quiz in &mut quizzes {
            quiz.questions = questions_by_quiz.remove(&quiz.id).unwrap_or_default();
        }
        Ok(quizzes)
    }
}

#[async_trait]
impl QuizRepository for PgQuizRepository {
    async fn create_quiz(&self, quiz: NewQuiz) -> Result<Quiz> {
        let mut tx = self.pool.begin().await?;

        let mut created = sqlx::query_as::<_, Quiz>(&format!(
            r#"
            INSERT INTO quizzes (lesson_id, title, description, pass_threshold)
            VALUES ($1, $2, $3, $4)
            RETURNING {QUIZ_COLUMNS}
            "#,
        ))
        .bind(quiz.lesson_id)
        .bind(&quiz.title)
        .bind(&quiz.description)
        .bind(quiz.pass_threshold)
        .fetch_one(&mut *tx)
        .await?;

        for (position, question) in quiz.questions.iter().enumerate() {
            let mut created_question = sqlx::query_as::<_, Question>(
                r#"
                INSERT INTO questions (quiz_id, text, allows_multiple_answers, position)
                VALUES ($1, $2, $3, $4)
                RETURNING id, quiz_id, text, allows_multiple_answers, position
                "#,
            )
            .bind(created.id)
            .bind(&question.text)
            .bind(question.allows_multiple_answers)
            .bind(position as i32)
            .fetch_one(&mut *tx)
            .await?;

            for (answer_position, answer) in question.answers.iter().enumerate() {
                let created_answer = sqlx::query_as::<_, Answer>(
                    r#"
                    INSERT INTO answers (question_id, text, is_correct, position)
                    VALUES ($1, $2, $3, $4)
                    RETURNING id, question_id, text, is_correct, position
                    "#,
                )
                .bind(created_question.id)
                .bind(&answer.text)
                .bind(answer.is_correct)
                .bind(answer_position as i32)
                .fetch_one(&mut *tx)
                .await?;
                created_question.answers.push(created_answer);
            }
            created.questions.push(created_question);
        }

        tx.commit().await?;
        Ok(created)
    }

    async fn list_quizzes(&self) -> Result<Vec<Quiz>> {
        let quizzes = sqlx::query_as::<_, Quiz>(&format!(
            "SELECT {QUIZ_COLUMNS} FROM quizzes ORDER BY created_at DESC",
        ))
        .fetch_all(&self.pool)
        .await?;
        self.attach_questions(quizzes).await
    }

    async fn list_quizzes_by_lesson(&self, lesson_id: Uuid) -> Result<Vec<Quiz>> {
        let quizzes = sqlx::query_as::<_, Quiz>(&format!(
            "SELECT {QUIZ_COLUMNS} FROM quizzes WHERE lesson_id = $1 ORDER BY created_at DESC",
        ))
        .bind(lesson_id)
        .fetch_all(&self.pool)
        .await?;
        self.attach_questions(quizzes).await
    }

    async fn get_quiz_with_questions_and_answers(&self, quiz_id: Uuid) -> Result<Option<Quiz>> {
        let quiz = sqlx::query_as::<_, Quiz>(&format!(
            "SELECT {QUIZ_COLUMNS} FROM quizzes WHERE id = $1",
        ))
        .bind(quiz_id)
        .fetch_optional(&self.pool)
        .await?;

        match quiz {
            Some(quiz) => {
                let mut loaded = self.attach_questions(vec![quiz]).await?;
                Ok(loaded.pop())
            }
            None => Ok(None),
        }
    }

    async fn delete_quiz(&self, quiz_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM quizzes WHERE id = $1")
            .bind(quiz_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[derive(Clone)]
pub struct PgAttemptRepository {
    pool: PgPool,
}

impl PgAttemptRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttemptRepository for PgAttemptRepository {
    /// Single transaction: upsert keyed on (user_id, quiz_id) — never a
    /// read-then-write, so concurrent resubmissions cannot lose updates —
    /// then rewrite the response rows under the surviving attempt id.
    async fn save_attempt(&self, attempt: NewQuizAttempt) -> Result<Uuid> {
        let mut tx = self.pool.begin().await?;

        let attempt_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO quiz_attempts (quiz_id, user_id, score, passed, submitted_at)
            VALUES ($1, $2, $3, $4, NOW())
            ON CONFLICT (user_id, quiz_id)
            DO UPDATE SET
                score = EXCLUDED.score,
                passed = EXCLUDED.passed,
                submitted_at = EXCLUDED.submitted_at
            RETURNING id
            "#,
        )
        .bind(attempt.quiz_id)
        .bind(attempt.user_id)
        .bind(attempt.score)
        .bind(attempt.passed)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM user_question_responses WHERE attempt_id = $1")
            .bind(attempt_id)
            .execute(&mut *tx)
            .await?;

        for (position, response) in attempt.responses.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO user_question_responses
                    (attempt_id, question_id, selected_answer_ids, is_correct, position)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(attempt_id)
            .bind(response.question_id)
            .bind(&response.selected_answer_ids)
            .bind(response.is_correct)
            .bind(position as i32)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(attempt_id)
    }

    async fn get_attempt(&self, user_id: Uuid, quiz_id: Uuid) -> Result<Option<QuizAttempt>> {
        let attempt = sqlx::query_as::<_, QuizAttempt>(
            r#"
            SELECT id, quiz_id, user_id, score, passed, submitted_at
            FROM quiz_attempts
            WHERE user_id = $1 AND quiz_id = $2
            "#,
        )
        .bind(user_id)
        .bind(quiz_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(mut attempt) = attempt else {
            return Ok(None);
        };

        attempt.responses = sqlx::query_as::<_, UserQuestionResponse>(
            r#"
            SELECT id, attempt_id, question_id, selected_answer_ids, is_correct, position
            FROM user_question_responses
            WHERE attempt_id = $1
            ORDER BY position
            "#,
        )
        .bind(attempt.id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(attempt))
    }
}
