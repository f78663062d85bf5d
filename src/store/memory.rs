use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::domain::models::{
    AnswerKey, CorrectionResult, Exam, ExamReport, ExamStatistics, NewCorrectionResult,
    NewExamReport, NewExamStatistics, NewQuestionIssue, QuestionIssue, Submission,
};
use crate::domain::types::IssueOrigin;
use crate::store::{
    AnswerKeyStore, CorrectionResultStore, ExamReportStore, ExamStatisticsStore, ExamStore,
    IssueStore, StoreError, SubmissionStore,
};

/// In-memory storage backend. A single lock over all records keeps the
/// uniqueness checks atomic with the inserts that depend on them.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Records>,
}

#[derive(Default)]
struct Records {
    exams: Vec<Exam>,
    answer_keys: Vec<AnswerKey>,
    submissions: Vec<Submission>,
    results: Vec<CorrectionResult>,
    reports: Vec<ExamReport>,
    statistics: Vec<ExamStatistics>,
    issues: Vec<QuestionIssue>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn seed_exam(&self, exam: Exam) -> Result<(), StoreError> {
        let mut records = self.inner.lock().await;
        if records.exams.iter().any(|existing| existing.id == exam.id) {
            return Err(StoreError::Duplicate("exam id"));
        }
        records.exams.push(exam);
        Ok(())
    }

    pub async fn seed_answer_key(&self, key: AnswerKey) -> Result<(), StoreError> {
        let mut records = self.inner.lock().await;
        if records.answer_keys.iter().any(|existing| existing.exam_id == key.exam_id) {
            return Err(StoreError::Duplicate("answer key exam id"));
        }
        records.answer_keys.push(key);
        Ok(())
    }

    pub async fn seed_submission(&self, submission: Submission) -> Result<(), StoreError> {
        let mut records = self.inner.lock().await;
        let taken = records.submissions.iter().any(|existing| {
            existing.exam_id == submission.exam_id && existing.student_id == submission.student_id
        });
        if taken {
            return Err(StoreError::Duplicate("submission exam and student"));
        }
        records.submissions.push(submission);
        Ok(())
    }
}

#[async_trait]
impl ExamStore for MemoryStore {
    async fn find_exam(&self, exam_id: &str) -> Result<Option<Exam>, StoreError> {
        let records = self.inner.lock().await;
        Ok(records.exams.iter().find(|exam| exam.id == exam_id).cloned())
    }

    async fn find_exam_by_question(&self, question_id: &str) -> Result<Option<Exam>, StoreError> {
        let records = self.inner.lock().await;
        Ok(records
            .exams
            .iter()
            .find(|exam| exam.questions.iter().any(|question| question.id == question_id))
            .cloned())
    }
}

#[async_trait]
impl AnswerKeyStore for MemoryStore {
    async fn find_answer_key(&self, exam_id: &str) -> Result<Option<AnswerKey>, StoreError> {
        let records = self.inner.lock().await;
        Ok(records.answer_keys.iter().find(|key| key.exam_id == exam_id).cloned())
    }
}

#[async_trait]
impl SubmissionStore for MemoryStore {
    async fn find_submission(
        &self,
        submission_id: &str,
    ) -> Result<Option<Submission>, StoreError> {
        let records = self.inner.lock().await;
        Ok(records.submissions.iter().find(|submission| submission.id == submission_id).cloned())
    }

    async fn list_corrected(&self, exam_id: &str) -> Result<Vec<Submission>, StoreError> {
        let records = self.inner.lock().await;
        Ok(records
            .submissions
            .iter()
            .filter(|submission| submission.exam_id == exam_id && submission.corrected)
            .cloned()
            .collect())
    }

    async fn mark_corrected(&self, submission_id: &str, score: f64) -> Result<(), StoreError> {
        let mut records = self.inner.lock().await;
        let submission = records
            .submissions
            .iter_mut()
            .find(|submission| submission.id == submission_id)
            .ok_or(StoreError::Missing("submission"))?;
        submission.corrected = true;
        submission.score = Some(score);
        Ok(())
    }
}

#[async_trait]
impl CorrectionResultStore for MemoryStore {
    async fn result_exists(&self, submission_id: &str) -> Result<bool, StoreError> {
        let records = self.inner.lock().await;
        Ok(records.results.iter().any(|result| result.submission_id == submission_id))
    }

    async fn insert_result(
        &self,
        result: NewCorrectionResult,
    ) -> Result<CorrectionResult, StoreError> {
        let mut records = self.inner.lock().await;
        if records.results.iter().any(|existing| existing.submission_id == result.submission_id) {
            return Err(StoreError::Duplicate("correction result submission id"));
        }
        let stored = CorrectionResult {
            id: Uuid::new_v4().to_string(),
            submission_id: result.submission_id,
            correct_count: result.correct_count,
            wrong_count: result.wrong_count,
            final_score: result.final_score,
            question_details: result.question_details,
        };
        records.results.push(stored.clone());
        Ok(stored)
    }

    async fn delete_result(&self, submission_id: &str) -> Result<(), StoreError> {
        let mut records = self.inner.lock().await;
        records.results.retain(|result| result.submission_id != submission_id);
        Ok(())
    }

    async fn find_result(
        &self,
        submission_id: &str,
    ) -> Result<Option<CorrectionResult>, StoreError> {
        let records = self.inner.lock().await;
        Ok(records.results.iter().find(|result| result.submission_id == submission_id).cloned())
    }

    async fn list_results(
        &self,
        submission_ids: &[String],
    ) -> Result<Vec<CorrectionResult>, StoreError> {
        if submission_ids.is_empty() {
            return Ok(Vec::new());
        }

        let records = self.inner.lock().await;
        Ok(records
            .results
            .iter()
            .filter(|result| submission_ids.contains(&result.submission_id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ExamReportStore for MemoryStore {
    async fn find_report(&self, exam_id: &str) -> Result<Option<ExamReport>, StoreError> {
        let records = self.inner.lock().await;
        Ok(records.reports.iter().find(|report| report.exam_id == exam_id).cloned())
    }

    async fn save_report(&self, report: NewExamReport) -> Result<ExamReport, StoreError> {
        let mut records = self.inner.lock().await;
        records.reports.retain(|existing| existing.exam_id != report.exam_id);
        let stored = ExamReport {
            id: Uuid::new_v4().to_string(),
            exam_id: report.exam_id,
            mean_score: report.mean_score,
            highest_score: report.highest_score,
            lowest_score: report.lowest_score,
            total_submissions: report.total_submissions,
            generated_at: report.generated_at,
        };
        records.reports.push(stored.clone());
        Ok(stored)
    }

    async fn delete_report(&self, exam_id: &str) -> Result<(), StoreError> {
        let mut records = self.inner.lock().await;
        records.reports.retain(|report| report.exam_id != exam_id);
        Ok(())
    }
}

#[async_trait]
impl ExamStatisticsStore for MemoryStore {
    async fn find_statistics(&self, exam_id: &str) -> Result<Option<ExamStatistics>, StoreError> {
        let records = self.inner.lock().await;
        Ok(records.statistics.iter().find(|statistics| statistics.exam_id == exam_id).cloned())
    }

    async fn save_statistics(
        &self,
        statistics: NewExamStatistics,
    ) -> Result<ExamStatistics, StoreError> {
        let mut records = self.inner.lock().await;
        records.statistics.retain(|existing| existing.exam_id != statistics.exam_id);
        let stored = ExamStatistics {
            id: Uuid::new_v4().to_string(),
            exam_id: statistics.exam_id,
            accuracy_by_question: statistics.accuracy_by_question,
            score_distribution: statistics.score_distribution,
            flagged_questions: statistics.flagged_questions,
            generated_at: statistics.generated_at,
        };
        records.statistics.push(stored.clone());
        Ok(stored)
    }

    async fn delete_statistics(&self, exam_id: &str) -> Result<(), StoreError> {
        let mut records = self.inner.lock().await;
        records.statistics.retain(|statistics| statistics.exam_id != exam_id);
        Ok(())
    }
}

#[async_trait]
impl IssueStore for MemoryStore {
    async fn issues_for_question(
        &self,
        question_id: &str,
    ) -> Result<Vec<QuestionIssue>, StoreError> {
        let records = self.inner.lock().await;
        Ok(records
            .issues
            .iter()
            .filter(|issue| issue.question_id == question_id)
            .cloned()
            .collect())
    }

    async fn issues_for_exam(&self, exam_id: &str) -> Result<Vec<QuestionIssue>, StoreError> {
        let records = self.inner.lock().await;
        Ok(records.issues.iter().filter(|issue| issue.exam_id == exam_id).cloned().collect())
    }

    async fn find_issue(
        &self,
        question_id: &str,
        kind: &str,
        origin: IssueOrigin,
    ) -> Result<Option<QuestionIssue>, StoreError> {
        let records = self.inner.lock().await;
        Ok(records
            .issues
            .iter()
            .find(|issue| {
                issue.question_id == question_id && issue.kind == kind && issue.origin == origin
            })
            .cloned())
    }

    async fn insert_issue(&self, issue: NewQuestionIssue) -> Result<QuestionIssue, StoreError> {
        let mut records = self.inner.lock().await;
        let stored = QuestionIssue {
            id: Uuid::new_v4().to_string(),
            question_id: issue.question_id,
            exam_id: issue.exam_id,
            kind: issue.kind,
            severity: issue.severity,
            description: issue.description,
            origin: issue.origin,
            detected_at: issue.detected_at,
        };
        records.issues.push(stored.clone());
        Ok(stored)
    }

    async fn update_issue(&self, issue: &QuestionIssue) -> Result<(), StoreError> {
        let mut records = self.inner.lock().await;
        let stored = records
            .issues
            .iter_mut()
            .find(|existing| existing.id == issue.id)
            .ok_or(StoreError::Missing("question issue"))?;
        *stored = issue.clone();
        Ok(())
    }
}
