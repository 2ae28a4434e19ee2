use crate::dto::quiz_dto::SubmitQuizDto;
use crate::models::quiz::Quiz;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// Structural violation in a submitted answer sheet. Each variant names the
/// broken rule and the offending id(s) so callers can surface an actionable
/// message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    #[error("submission targets quiz {submitted} but quiz {expected} was supplied")]
    QuizMismatch { submitted: Uuid, expected: Uuid },

    #[error("question {0} appears more than once in the submission")]
    DuplicateQuestion(Uuid),

    #[error("question {0} does not belong to the quiz")]
    UnknownQuestion(Uuid),

    #[error("answer {answer_id} does not belong to question {question_id}")]
    UnknownAnswer { question_id: Uuid, answer_id: Uuid },

    #[error("question {question_id} accepts a single answer but {selected} were selected")]
    MultipleAnswersNotAllowed { question_id: Uuid, selected: usize },
}

/// A submission whose structure has been checked against its quiz: every
/// question belongs to the quiz, every selected answer belongs to its
/// question, no duplicates, no over-selection. Only
/// [`QuizValidationService::validate`] constructs one, so grading can rely
/// on membership without re-checking.
#[derive(Debug, Clone)]
pub struct ValidatedSubmission {
    quiz_id: Uuid,
    user_id: Uuid,
    selections: HashMap<Uuid, HashSet<Uuid>>,
}

impl ValidatedSubmission {
    pub fn quiz_id(&self) -> Uuid {
        self.quiz_id
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    /// Selected answers for a question, `None` when the question was left
    /// unanswered.
    pub fn selected_for(&self, question_id: Uuid) -> Option<&HashSet<Uuid>> {
        self.selections.get(&question_id)
    }

    pub fn answered_count(&self) -> usize {
        self.selections.len()
    }
}

pub struct QuizValidationService;

impl QuizValidationService {
    /// Checks a raw submission against the quiz aggregate, failing fast on
    /// the first violation. Unanswered questions are not an error; they are
    /// graded as incorrect downstream.
    pub fn validate(
        quiz: &Quiz,
        submission: &SubmitQuizDto,
    ) -> Result<ValidatedSubmission, SubmissionError> {
        if submission.quiz_id != quiz.id {
            return Err(SubmissionError::QuizMismatch {
                submitted: submission.quiz_id,
                expected: quiz.id,
            });
        }

        let mut selections: HashMap<Uuid, HashSet<Uuid>> =
            HashMap::with_capacity(submission.answers.len());

        for entry in &submission.answers {
            if selections.contains_key(&entry.question_id) {
                return Err(SubmissionError::DuplicateQuestion(entry.question_id));
            }
            let question = quiz
                .question(entry.question_id)
                .ok_or(SubmissionError::UnknownQuestion(entry.question_id))?;

            let mut selected = HashSet::with_capacity(entry.selected_answer_ids.len());
            for &answer_id in &entry.selected_answer_ids {
                if question.answer(answer_id).is_none() {
                    return Err(SubmissionError::UnknownAnswer {
                        question_id: entry.question_id,
                        answer_id,
                    });
                }
                selected.insert(answer_id);
            }

            if !question.allows_multiple_answers && selected.len() > 1 {
                return Err(SubmissionError::MultipleAnswersNotAllowed {
                    question_id: entry.question_id,
                    selected: selected.len(),
                });
            }

            selections.insert(entry.question_id, selected);
        }

        Ok(ValidatedSubmission {
            quiz_id: quiz.id,
            user_id: submission.user_id,
            selections,
        })
    }
}
