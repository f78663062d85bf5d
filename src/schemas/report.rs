use std::collections::BTreeMap;

use serde::Serialize;

use crate::core::time::format_primitive;
use crate::domain::models::{ExamReport, ExamStatistics};

#[derive(Debug, Serialize)]
pub struct ExamReportResponse {
    pub id: String,
    pub exam_id: String,
    pub mean_score: f64,
    pub highest_score: f64,
    pub lowest_score: f64,
    pub total_submissions: u32,
    pub generated_at: String,
}

impl ExamReportResponse {
    pub fn from_model(report: ExamReport) -> Self {
        Self {
            id: report.id,
            exam_id: report.exam_id,
            mean_score: report.mean_score,
            highest_score: report.highest_score,
            lowest_score: report.lowest_score,
            total_submissions: report.total_submissions,
            generated_at: format_primitive(report.generated_at),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ExamStatisticsResponse {
    pub id: String,
    pub exam_id: String,
    pub accuracy_by_question: BTreeMap<String, f64>,
    pub score_distribution: BTreeMap<String, u32>,
    pub flagged_questions: Vec<String>,
    pub generated_at: String,
}

impl ExamStatisticsResponse {
    pub fn from_model(statistics: ExamStatistics) -> Self {
        Self {
            id: statistics.id,
            exam_id: statistics.exam_id,
            accuracy_by_question: statistics.accuracy_by_question,
            score_distribution: statistics.score_distribution,
            flagged_questions: statistics.flagged_questions,
            generated_at: format_primitive(statistics.generated_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn report_response_formats_the_timestamp() {
        let response = ExamReportResponse::from_model(ExamReport {
            id: "report-1".to_string(),
            exam_id: "exam-1".to_string(),
            mean_score: 2.33,
            highest_score: 3.0,
            lowest_score: 1.0,
            total_submissions: 3,
            generated_at: datetime!(2025-03-10 14:30:00),
        });

        let value = serde_json::to_value(&response).expect("serialize");
        assert_eq!(value["mean_score"], 2.33);
        assert_eq!(value["generated_at"], "2025-03-10T14:30:00Z");
    }
}
