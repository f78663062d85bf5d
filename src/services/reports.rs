use crate::core::state::AppState;
use crate::core::time::primitive_now_utc;
use crate::domain::models::{ExamReport, NewExamReport};
use crate::domain::types::UserRole;
use crate::services::errors::ServiceError;
use crate::services::round2;
use crate::store::{ExamReportStore, ExamStore, SubmissionStore};

/// Return the exam's score report, serving the cached row when one exists and
/// otherwise aggregating over the corrected submissions.
pub async fn get_report(
    state: &AppState,
    exam_id: &str,
    user_id: &str,
    role: UserRole,
) -> Result<ExamReport, ServiceError> {
    let store = state.store();
    let exam = store
        .find_exam(exam_id)
        .await?
        .ok_or_else(|| ServiceError::exam_not_found(exam_id))?;
    if role != UserRole::Professor || exam.professor_id != user_id {
        return Err(ServiceError::AccessDenied);
    }

    if let Some(cached) = store.find_report(exam_id).await? {
        tracing::debug!(exam_id = %exam_id, "Serving cached exam report");
        return Ok(cached);
    }

    let corrected = store.list_corrected(exam_id).await?;
    let scores: Vec<f64> = corrected.iter().filter_map(|submission| submission.score).collect();
    if scores.is_empty() {
        return Err(ServiceError::no_corrected_submissions(exam_id));
    }

    let mean_score = round2(scores.iter().sum::<f64>() / scores.len() as f64);
    let highest_score = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let lowest_score = scores.iter().copied().fold(f64::INFINITY, f64::min);
    let report = store
        .save_report(NewExamReport {
            exam_id: exam_id.to_string(),
            mean_score,
            highest_score,
            lowest_score,
            total_submissions: scores.len() as u32,
            generated_at: primitive_now_utc(),
        })
        .await?;

    tracing::info!(
        exam_id = %exam_id,
        total_submissions = report.total_submissions,
        mean_score = report.mean_score,
        "Exam report generated"
    );
    metrics::counter!("exam_reports_generated_total").increment(1);

    Ok(report)
}
