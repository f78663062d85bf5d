use async_trait::async_trait;
use thiserror::Error;

use crate::domain::models::{
    AnswerKey, CorrectionResult, Exam, ExamReport, ExamStatistics, NewCorrectionResult,
    NewExamReport, NewExamStatistics, NewQuestionIssue, QuestionIssue, Submission,
};
use crate::domain::types::IssueOrigin;

pub mod memory;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("duplicate record for {0}")]
    Duplicate(&'static str),
    #[error("record not found: {0}")]
    Missing(&'static str),
    #[error("storage backend failure: {0}")]
    Backend(String),
}

#[async_trait]
pub trait ExamStore: Send + Sync {
    async fn find_exam(&self, exam_id: &str) -> Result<Option<Exam>, StoreError>;
    async fn find_exam_by_question(&self, question_id: &str) -> Result<Option<Exam>, StoreError>;
}

#[async_trait]
pub trait AnswerKeyStore: Send + Sync {
    async fn find_answer_key(&self, exam_id: &str) -> Result<Option<AnswerKey>, StoreError>;
}

#[async_trait]
pub trait SubmissionStore: Send + Sync {
    async fn find_submission(&self, submission_id: &str) -> Result<Option<Submission>, StoreError>;
    async fn list_corrected(&self, exam_id: &str) -> Result<Vec<Submission>, StoreError>;
    async fn mark_corrected(&self, submission_id: &str, score: f64) -> Result<(), StoreError>;
}

/// One correction result per submission; `insert_result` must reject a second
/// row for the same submission id. `delete_result` removes at most one row and
/// is a no-op when none exists.
#[async_trait]
pub trait CorrectionResultStore: Send + Sync {
    async fn result_exists(&self, submission_id: &str) -> Result<bool, StoreError>;
    async fn insert_result(
        &self,
        result: NewCorrectionResult,
    ) -> Result<CorrectionResult, StoreError>;
    async fn delete_result(&self, submission_id: &str) -> Result<(), StoreError>;
    async fn find_result(
        &self,
        submission_id: &str,
    ) -> Result<Option<CorrectionResult>, StoreError>;
    async fn list_results(
        &self,
        submission_ids: &[String],
    ) -> Result<Vec<CorrectionResult>, StoreError>;
}

#[async_trait]
pub trait ExamReportStore: Send + Sync {
    async fn find_report(&self, exam_id: &str) -> Result<Option<ExamReport>, StoreError>;
    async fn save_report(&self, report: NewExamReport) -> Result<ExamReport, StoreError>;
    async fn delete_report(&self, exam_id: &str) -> Result<(), StoreError>;
}

#[async_trait]
pub trait ExamStatisticsStore: Send + Sync {
    async fn find_statistics(&self, exam_id: &str) -> Result<Option<ExamStatistics>, StoreError>;
    async fn save_statistics(
        &self,
        statistics: NewExamStatistics,
    ) -> Result<ExamStatistics, StoreError>;
    async fn delete_statistics(&self, exam_id: &str) -> Result<(), StoreError>;
}

#[async_trait]
pub trait IssueStore: Send + Sync {
    async fn issues_for_question(
        &self,
        question_id: &str,
    ) -> Result<Vec<QuestionIssue>, StoreError>;
    async fn issues_for_exam(&self, exam_id: &str) -> Result<Vec<QuestionIssue>, StoreError>;
    async fn find_issue(
        &self,
        question_id: &str,
        kind: &str,
        origin: IssueOrigin,
    ) -> Result<Option<QuestionIssue>, StoreError>;
    async fn insert_issue(&self, issue: NewQuestionIssue) -> Result<QuestionIssue, StoreError>;
    async fn update_issue(&self, issue: &QuestionIssue) -> Result<(), StoreError>;
}

/// The full storage surface the correction core depends on.
pub trait Store:
    ExamStore
    + AnswerKeyStore
    + SubmissionStore
    + CorrectionResultStore
    + ExamReportStore
    + ExamStatisticsStore
    + IssueStore
{
}

impl<T> Store for T where
    T: ExamStore
        + AnswerKeyStore
        + SubmissionStore
        + CorrectionResultStore
        + ExamReportStore
        + ExamStatisticsStore
        + IssueStore
{
}
