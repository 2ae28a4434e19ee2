use crate::error::{Error, Result};
use crate::models::quiz::Quiz;
use crate::services::quiz_validation_service::ValidatedSubmission;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct GradedQuestion {
    pub question_id: Uuid,
    pub selected_answer_ids: Vec<Uuid>,
    pub is_correct: bool,
}

#[derive(Debug, Clone)]
pub struct GradedResult {
    pub score: i32,
    pub passed: bool,
    pub questions: Vec<GradedQuestion>,
}

pub struct GradingService;

impl GradingService {
    /// Grades every question of the quiz, answered or not. A question is
    /// correct iff the selected set equals the correct-answer set exactly —
    /// no partial credit for subsets or supersets. Reads the quiz only;
    /// nothing is mutated.
    pub fn grade(quiz: &Quiz, submission: &ValidatedSubmission) -> Result<GradedResult> {
        if quiz.questions.is_empty() {
            return Err(Error::InvalidQuizState(format!(
                "quiz {} has no questions",
                quiz.id
            )));
        }

        let mut questions = Vec::with_capacity(quiz.questions.len());
        let mut correct_count = 0usize;

        for question in &quiz.questions {
            let correct_ids = question.correct_answer_ids();
            let selected = submission
                .selected_for(question.id)
                .cloned()
                .unwrap_or_default();

            let is_correct = selected == correct_ids;
            if is_correct {
                correct_count += 1;
            }

            let mut selected_answer_ids: Vec<Uuid> = selected.into_iter().collect();
            selected_answer_ids.sort();

            questions.push(GradedQuestion {
                question_id: question.id,
                selected_answer_ids,
                is_correct,
            });
        }

        let score = percentage_round_half_up(correct_count, quiz.questions.len());
        let passed = score >= quiz.pass_threshold;

        Ok(GradedResult {
            score,
            passed,
            questions,
        })
    }
}

/// Integer percentage with ties rounding up, e.g. 1/8 -> 13.
fn percentage_round_half_up(correct: usize, total: usize) -> i32 {
    ((correct * 200 + total) / (2 * total)) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::quiz_dto::{QuestionAnswersDto, SubmitQuizDto};
    use crate::models::quiz::{Answer, Question};
    use crate::services::quiz_validation_service::QuizValidationService;
    use chrono::Utc;

    fn answer(question_id: Uuid, is_correct: bool, position: i32) -> Answer {
        Answer {
            id: Uuid::new_v4(),
            question_id,
            text: format!("option {}", position),
            is_correct,
            position,
        }
    }

    /// Q1: single-answer, correct = first of two answers.
    /// Q2: multi-select, correct = first two of three answers.
    fn sample_quiz(pass_threshold: i32) -> Quiz {
        let quiz_id = Uuid::new_v4();
        let q1_id = Uuid::new_v4();
        let q2_id = Uuid::new_v4();
        Quiz {
            id: quiz_id,
            lesson_id: Uuid::new_v4(),
            title: "quiz".into(),
            description: None,
            pass_threshold,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            questions: vec![
                Question {
                    id: q1_id,
                    quiz_id,
                    text: "single".into(),
                    allows_multiple_answers: false,
                    position: 0,
                    answers: vec![answer(q1_id, true, 0), answer(q1_id, false, 1)],
                },
                Question {
                    id: q2_id,
                    quiz_id,
                    text: "multi".into(),
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

    fn grade_selections(quiz: &Quiz, answers: Vec<QuestionAnswersDto>) -> GradedResult {
        let dto = SubmitQuizDto {
            quiz_id: quiz.id,
            user_id: Uuid::new_v4(),
            answers,
        };
        let validated = QuizValidationService::validate(quiz, &dto).expect("valid submission");
        GradingService::grade(quiz, &validated).expect("gradable quiz")
    }

    #[test]
    fn exact_answers_score_one_hundred() {
        let quiz = sample_quiz(100);
        let q1 = &quiz.questions[0];
        let q2 = &quiz.questions[1];
        let result = grade_selections(
            &quiz,
            vec![
                QuestionAnswersDto {
                    question_id: q1.id,
                    selected_answer_ids: vec![q1.answers[0].id],
                },
                QuestionAnswersDto {
                    question_id: q2.id,
                    selected_answer_ids: vec![q2.answers[0].id, q2.answers[1].id],
                },
            ],
        );

        assert_eq!(result.score, 100);
        assert!(result.passed);
        assert!(result.questions.iter().all(|q| q.is_correct));
    }

    #[test]
    fn wrong_answers_score_zero() {
        let quiz = sample_quiz(50);
        let q1 = &quiz.questions[0];
        let q2 = &quiz.questions[1];
        let result = grade_selections(
            &quiz,
            vec![
                QuestionAnswersDto {
                    question_id: q1.id,
                    selected_answer_ids: vec![q1.answers[1].id],
                },
                QuestionAnswersDto {
                    question_id: q2.id,
                    selected_answer_ids: vec![q2.answers[0].id],
                },
            ],
        );

        assert_eq!(result.score, 0);
        assert!(!result.passed);
        assert!(result.questions.iter().all(|q| !q.is_correct));
    }

    #[test]
    fn partial_multi_select_earns_no_credit() {
        let quiz = sample_quiz(50);
        let q1 = &quiz.questions[0];
        let q2 = &quiz.questions[1];
        // Q1 exact, Q2 a strict subset of the correct set.
        let result = grade_selections(
            &quiz,
            vec![
                QuestionAnswersDto {
                    question_id: q1.id,
                    selected_answer_ids: vec![q1.answers[0].id],
                },
                QuestionAnswersDto {
                    question_id: q2.id,
                    selected_answer_ids: vec![q2.answers[0].id],
                },
            ],
        );

        assert_eq!(result.score, 50);
        assert!(result.passed, "threshold 50 is met by score 50");
        assert!(result.questions[0].is_correct);
        assert!(!result.questions[1].is_correct);
    }

    #[test]
    fn superset_of_correct_answers_is_incorrect() {
        let quiz = sample_quiz(50);
        let q2 = &quiz.questions[1];
        let result = grade_selections(
            &quiz,
            vec![QuestionAnswersDto {
                question_id: q2.id,
                selected_answer_ids: vec![
                    q2.answers[0].id,
                    q2.answers[1].id,
                    q2.answers[2].id,
                ],
            }],
        );

        assert!(!result.questions[1].is_correct);
    }

    #[test]
    fn unanswered_questions_are_graded_incorrect() {
        let quiz = sample_quiz(0);
        let result = grade_selections(&quiz, vec![]);

        assert_eq!(result.score, 0);
        assert!(result.passed, "threshold 0 is met by an empty sheet");
        assert_eq!(result.questions.len(), 2);
        assert!(result.questions.iter().all(|q| !q.is_correct));
        assert!(result
            .questions
            .iter()
            .all(|q| q.selected_answer_ids.is_empty()));
    }

    #[test]
    fn quiz_without_questions_cannot_be_graded() {
        let mut quiz = sample_quiz(50);
        quiz.questions.clear();
        let dto = SubmitQuizDto {
            quiz_id: quiz.id,
            user_id: Uuid::new_v4(),
            answers: vec![],
        };
        let validated = QuizValidationService::validate(&quiz, &dto).expect("structurally valid");

        let err = GradingService::grade(&quiz, &validated).unwrap_err();
        assert!(matches!(err, Error::InvalidQuizState(_)));
    }

    #[test]
    fn breakdown_follows_quiz_question_order() {
        let quiz = sample_quiz(50);
        let q2 = &quiz.questions[1];
        // Only the second question answered; breakdown still lists both in order.
        let result = grade_selections(
            &quiz,
            vec![QuestionAnswersDto {
                question_id: q2.id,
                selected_answer_ids: vec![q2.answers[0].id, q2.answers[1].id],
            }],
        );

        let ids: Vec<Uuid> = result.questions.iter().map(|q| q.question_id).collect();
        let expected: Vec<Uuid> = quiz.questions.iter().map(|q| q.id).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn rounds_half_up() {
        assert_eq!(percentage_round_half_up(1, 3), 33);
        assert_eq!(percentage_round_half_up(2, 3), 67);
        assert_eq!(percentage_round_half_up(1, 8), 13);
        assert_eq!(percentage_round_half_up(0, 5), 0);
        assert_eq!(percentage_round_half_up(5, 5), 100);
        assert_eq!(percentage_round_half_up(1, 2), 50);
    }
}
