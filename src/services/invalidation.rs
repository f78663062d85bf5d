use crate::core::state::AppState;
use crate::services::errors::ServiceError;
use crate::store::{ExamReportStore, ExamStatisticsStore};

/// Drop the exam's cached report and statistics rows. Safe to call when no
/// cache exists.
pub async fn invalidate_exam_caches(state: &AppState, exam_id: &str) -> Result<(), ServiceError> {
    let store = state.store();
    store.delete_report(exam_id).await?;
    store.delete_statistics(exam_id).await?;
    tracing::debug!(exam_id = %exam_id, "Exam caches invalidated");
    Ok(())
}
