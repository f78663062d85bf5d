use std::collections::BTreeMap;

use crate::core::state::AppState;
use crate::core::time::primitive_now_utc;
use crate::domain::models::{ExamStatistics, NewExamStatistics};
use crate::domain::types::UserRole;
use crate::services::errors::ServiceError;
use crate::services::{issue_detection, round2};
use crate::store::{
    CorrectionResultStore, ExamStatisticsStore, ExamStore, IssueStore, SubmissionStore,
};

const BUCKETS: usize = 10;

fn bucket_label(index: usize) -> String {
    format!("{}-{}%", index * 10, (index + 1) * 10)
}

/// Map a score to its decile bucket; a full score lands in the top bucket.
fn bucket_index(score: f64, total_points: f64) -> usize {
    if total_points <= 0.0 {
        return 0;
    }
    let percentage = score / total_points * 100.0;
    ((percentage / 10.0) as usize).min(BUCKETS - 1)
}

/// Return the exam's statistics, serving the cached row when one exists.
///
/// A fresh computation persists the statistics first and only then runs issue
/// detection, so the flagged list reflects issues known before this call.
pub async fn get_statistics(
    state: &AppState,
    exam_id: &str,
    user_id: &str,
    role: UserRole,
) -> Result<ExamStatistics, ServiceError> {
    let store = state.store();
    let exam = store
        .find_exam(exam_id)
        .await?
        .ok_or_else(|| ServiceError::exam_not_found(exam_id))?;
    if role != UserRole::Professor || exam.professor_id != user_id {
        return Err(ServiceError::AccessDenied);
    }

    if let Some(cached) = store.find_statistics(exam_id).await? {
        tracing::debug!(exam_id = %exam_id, "Serving cached exam statistics");
        return Ok(cached);
    }

    let corrected = store.list_corrected(exam_id).await?;
    if corrected.is_empty() {
        return Err(ServiceError::no_corrected_submissions(exam_id));
    }
    let submission_ids: Vec<String> =
        corrected.iter().map(|submission| submission.id.clone()).collect();
    let results = store.list_results(&submission_ids).await?;

    let mut accuracy_by_question = BTreeMap::new();
    for question in &exam.questions {
        let hits = results
            .iter()
            .filter(|result| {
                result
                    .question_details
                    .iter()
                    .any(|detail| detail.question_id == question.id && detail.correct)
            })
            .count();
        let accuracy = round2(hits as f64 / corrected.len() as f64 * 100.0);
        accuracy_by_question.insert(question.id.clone(), accuracy);
    }

    let total_points = exam.total_points();
    let mut score_distribution: BTreeMap<String, u32> =
        (0..BUCKETS).map(|index| (bucket_label(index), 0)).collect();
    for score in corrected.iter().filter_map(|submission| submission.score) {
        let label = bucket_label(bucket_index(score, total_points));
        if let Some(count) = score_distribution.get_mut(&label) {
            *count += 1;
        }
    }

    let mut flagged_questions = Vec::new();
    for issue in store.issues_for_exam(exam_id).await? {
        if !flagged_questions.contains(&issue.question_id) {
            flagged_questions.push(issue.question_id.clone());
        }
    }

    let statistics = store
        .save_statistics(NewExamStatistics {
            exam_id: exam_id.to_string(),
            accuracy_by_question,
            score_distribution,
            flagged_questions,
            generated_at: primitive_now_utc(),
        })
        .await?;

    tracing::info!(
        exam_id = %exam_id,
        corrected = corrected.len(),
        "Exam statistics generated"
    );
    metrics::counter!("exam_statistics_generated_total").increment(1);

    let min_submissions = state.settings().correction().min_submissions_for_issue;
    if corrected.len() as u32 >= min_submissions {
        if let Err(err) =
            issue_detection::run(state, &exam, &statistics.accuracy_by_question, &corrected).await
        {
            tracing::warn!(exam_id = %exam.id, error = %err, "Issue detection failed");
        }
    }

    Ok(statistics)
}
