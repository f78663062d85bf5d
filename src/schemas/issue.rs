use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::core::time::format_primitive;
use crate::domain::models::QuestionIssue;
use crate::domain::types::{IssueOrigin, IssueSeverity};

#[derive(Debug, Deserialize, Validate)]
pub struct QuestionIssueRequest {
    #[validate(
        length(min = 1, max = 64, message = "kind must be 1 to 64 characters"),
        custom(function = validate_not_blank)
    )]
    pub kind: String,
    pub severity: IssueSeverity,
    #[validate(
        length(min = 1, max = 2000, message = "description must be 1 to 2000 characters"),
        custom(function = validate_not_blank)
    )]
    pub description: String,
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("must_not_be_blank"));
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct QuestionIssueResponse {
    pub id: String,
    pub question_id: String,
    pub exam_id: String,
    pub kind: String,
    pub severity: IssueSeverity,
    pub description: String,
    pub origin: IssueOrigin,
    pub detected_at: String,
}

impl QuestionIssueResponse {
    pub fn from_model(issue: QuestionIssue) -> Self {
        Self {
            id: issue.id,
            question_id: issue.question_id,
            exam_id: issue.exam_id,
            kind: issue.kind,
            severity: issue.severity,
            description: issue.description,
            origin: issue.origin,
            detected_at: format_primitive(issue.detected_at),
        }
    }
}
