use serde::Serialize;

use crate::domain::models::{CorrectionResult, QuestionDetail};

#[derive(Debug, Serialize)]
pub struct QuestionDetailResponse {
    pub question_id: String,
    pub correct: bool,
    pub student_answer: Option<String>,
    pub expected_answer: Option<String>,
    pub points_awarded: f64,
}

impl QuestionDetailResponse {
    pub fn from_model(detail: QuestionDetail) -> Self {
        Self {
            question_id: detail.question_id,
            correct: detail.correct,
            student_answer: detail.student_answer,
            expected_answer: detail.expected_answer,
            points_awarded: detail.points_awarded,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CorrectionResultResponse {
    pub id: String,
    pub submission_id: String,
    pub correct_count: u32,
    pub wrong_count: u32,
    pub final_score: f64,
    pub question_details: Vec<QuestionDetailResponse>,
}

impl CorrectionResultResponse {
    pub fn from_model(result: CorrectionResult) -> Self {
        Self {
            id: result.id,
            submission_id: result.submission_id,
            correct_count: result.correct_count,
            wrong_count: result.wrong_count,
            final_score: result.final_score,
            question_details: result
                .question_details
                .into_iter()
                .map(QuestionDetailResponse::from_model)
                .collect(),
        }
    }
}
