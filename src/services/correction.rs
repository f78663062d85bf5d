use std::collections::HashMap;

use crate::core::state::AppState;
use crate::domain::models::{CorrectionResult, NewCorrectionResult, Question, QuestionDetail};
use crate::domain::types::UserRole;
use crate::services::errors::ServiceError;
use crate::services::invalidation;
use crate::store::{AnswerKeyStore, CorrectionResultStore, ExamStore, StoreError, SubmissionStore};

#[derive(Debug, Clone)]
pub struct GradeOutcome {
    pub correct_count: u32,
    pub wrong_count: u32,
    pub final_score: f64,
    pub question_details: Vec<QuestionDetail>,
}

/// Score one set of answers against the answer key, walking the questions in
/// exam order. A blank answer earns zero points but is not counted as wrong.
pub fn grade(
    questions: &[Question],
    key: &HashMap<String, String>,
    answers: &HashMap<String, String>,
) -> GradeOutcome {
    let mut correct_count = 0u32;
    let mut wrong_count = 0u32;
    let mut final_score = 0.0f64;
    let mut question_details = Vec::with_capacity(questions.len());

    for question in questions {
        let expected = key.get(&question.id);
        let given = answers.get(&question.id);
        let correct = matches!((expected, given), (Some(want), Some(got)) if want == got);

        let points_awarded = if correct { question.points } else { 0.0 };
        if correct {
            correct_count += 1;
            final_score += question.points;
        } else if given.is_some() {
            wrong_count += 1;
        }

        question_details.push(QuestionDetail {
            question_id: question.id.clone(),
            correct,
            student_answer: given.cloned(),
            expected_answer: expected.cloned(),
            points_awarded,
        });
    }

    GradeOutcome { correct_count, wrong_count, final_score, question_details }
}

/// Grade a submission exactly once. The persisted result marks the submission
/// corrected and drops the exam's cached aggregates.
pub async fn correct_submission(
    state: &AppState,
    submission_id: &str,
    user_id: &str,
    role: UserRole,
) -> Result<CorrectionResult, ServiceError> {
    if role != UserRole::Professor {
        return Err(ServiceError::AccessDenied);
    }

    let store = state.store();
    let submission = store
        .find_submission(submission_id)
        .await?
        .ok_or_else(|| ServiceError::submission_not_found(submission_id))?;
    let exam = store
        .find_exam(&submission.exam_id)
        .await?
        .ok_or_else(|| ServiceError::exam_not_found(&submission.exam_id))?;
    if exam.professor_id != user_id {
        return Err(ServiceError::AccessDenied);
    }

    if store.result_exists(submission_id).await? {
        return Err(ServiceError::already_corrected(submission_id));
    }
    let key = store
        .find_answer_key(&submission.exam_id)
        .await?
        .ok_or_else(|| ServiceError::answer_key_not_found(&submission.exam_id))?;

    let outcome = grade(&exam.questions, &key.answers, &submission.answers);
    let result = store
        .insert_result(NewCorrectionResult {
            submission_id: submission.id.clone(),
            correct_count: outcome.correct_count,
            wrong_count: outcome.wrong_count,
            final_score: outcome.final_score,
            question_details: outcome.question_details,
        })
        .await
        .map_err(|err| match err {
            // A concurrent correction won the insert; report it as already done.
            StoreError::Duplicate(_) => ServiceError::already_corrected(submission_id),
            other => ServiceError::Store(other),
        })?;
    if let Err(err) = store.mark_corrected(&submission.id, result.final_score).await {
        // Remove the orphan result so the submission stays gradable.
        if let Err(rollback_err) = store.delete_result(&submission.id).await {
            tracing::warn!(
                submission_id = %submission.id,
                error = %rollback_err,
                "Failed to roll back correction result"
            );
        }
        return Err(err.into());
    }

    invalidation::invalidate_exam_caches(state, &submission.exam_id).await?;

    tracing::info!(
        submission_id = %submission.id,
        exam_id = %submission.exam_id,
        score = result.final_score,
        "Submission corrected"
    );
    metrics::counter!("corrections_total").increment(1);

    Ok(result)
}

/// Fetch a submission's correction result. Students may only read their own
/// result; professors only results of exams they own.
pub async fn get_result(
    state: &AppState,
    submission_id: &str,
    user_id: &str,
    role: UserRole,
) -> Result<CorrectionResult, ServiceError> {
    let store = state.store();
    let submission = store
        .find_submission(submission_id)
        .await?
        .ok_or_else(|| ServiceError::submission_not_found(submission_id))?;

    match role {
        UserRole::Student => {
            if submission.student_id != user_id {
                return Err(ServiceError::AccessDenied);
            }
        }
        UserRole::Professor => {
            let exam = store
                .find_exam(&submission.exam_id)
                .await?
                .ok_or_else(|| ServiceError::exam_not_found(&submission.exam_id))?;
            if exam.professor_id != user_id {
                return Err(ServiceError::AccessDenied);
            }
        }
    }

    store
        .find_result(submission_id)
        .await?
        .ok_or_else(|| ServiceError::correction_not_found(submission_id))
}
