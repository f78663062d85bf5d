use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use time::PrimitiveDateTime;

use crate::domain::types::{ExamStatus, IssueOrigin, IssueSeverity, QuestionType};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub statement: String,
    pub kind: QuestionType,
    pub alternatives: Vec<String>,
    pub points: f64,
    pub position: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exam {
    pub id: String,
    pub title: String,
    pub professor_id: String,
    pub status: ExamStatus,
    pub questions: Vec<Question>,
}

impl Exam {
    pub fn total_points(&self) -> f64 {
        self.questions.iter().map(|question| question.points).sum()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerKey {
    pub id: String,
    pub exam_id: String,
    pub answers: HashMap<String, String>,
}

/// A student's answers for one exam. An absent entry in `answers` means the
/// question was left blank.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    pub id: String,
    pub exam_id: String,
    pub student_id: String,
    pub answers: HashMap<String, String>,
    pub score: Option<f64>,
    pub corrected: bool,
    pub submitted_at: PrimitiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionDetail {
    pub question_id: String,
    pub correct: bool,
    pub student_answer: Option<String>,
    pub expected_answer: Option<String>,
    pub points_awarded: f64,
}

/// Graded outcome of one submission, unique per submission id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrectionResult {
    pub id: String,
    pub submission_id: String,
    pub correct_count: u32,
    pub wrong_count: u32,
    pub final_score: f64,
    pub question_details: Vec<QuestionDetail>,
}

#[derive(Debug, Clone)]
pub struct NewCorrectionResult {
    pub submission_id: String,
    pub correct_count: u32,
    pub wrong_count: u32,
    pub final_score: f64,
    pub question_details: Vec<QuestionDetail>,
}

/// Cached per-exam score aggregate, recomputed on demand after invalidation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamReport {
    pub id: String,
    pub exam_id: String,
    pub mean_score: f64,
    pub highest_score: f64,
    pub lowest_score: f64,
    pub total_submissions: u32,
    pub generated_at: PrimitiveDateTime,
}

#[derive(Debug, Clone)]
pub struct NewExamReport {
    pub exam_id: String,
    pub mean_score: f64,
    pub highest_score: f64,
    pub lowest_score: f64,
    pub total_submissions: u32,
    pub generated_at: PrimitiveDateTime,
}

/// Cached per-exam question statistics, same lifecycle as [`ExamReport`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamStatistics {
    pub id: String,
    pub exam_id: String,
    pub accuracy_by_question: BTreeMap<String, f64>,
    pub score_distribution: BTreeMap<String, u32>,
    pub flagged_questions: Vec<String>,
    pub generated_at: PrimitiveDateTime,
}

#[derive(Debug, Clone)]
pub struct NewExamStatistics {
    pub exam_id: String,
    pub accuracy_by_question: BTreeMap<String, f64>,
    pub score_distribution: BTreeMap<String, u32>,
    pub flagged_questions: Vec<String>,
    pub generated_at: PrimitiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionIssue {
    pub id: String,
    pub question_id: String,
    pub exam_id: String,
    pub kind: String,
    pub severity: IssueSeverity,
    pub description: String,
    pub origin: IssueOrigin,
    pub detected_at: PrimitiveDateTime,
}

#[derive(Debug, Clone)]
pub struct NewQuestionIssue {
    pub question_id: String,
    pub exam_id: String,
    pub kind: String,
    pub severity: IssueSeverity,
    pub description: String,
    pub origin: IssueOrigin,
    pub detected_at: PrimitiveDateTime,
}
