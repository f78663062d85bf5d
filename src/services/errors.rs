use thiserror::Error;

use crate::store::StoreError;

/// Stable machine-readable codes carried by every failure; consumers match on
/// these, not on messages.
pub mod codes {
    pub const ALREADY_CORRECTED: &str = "ALREADY_CORRECTED";
    pub const ANSWER_KEY_NOT_FOUND: &str = "ANSWER_KEY_NOT_FOUND";
    pub const NO_CORRECTED_SUBMISSIONS: &str = "NO_CORRECTED_SUBMISSIONS";
    pub const SUBMISSION_NOT_FOUND: &str = "SUBMISSION_NOT_FOUND";
    pub const EXAM_NOT_FOUND: &str = "EXAM_NOT_FOUND";
    pub const CORRECTION_NOT_FOUND: &str = "CORRECTION_NOT_FOUND";
    pub const QUESTION_NOT_FOUND: &str = "QUESTION_NOT_FOUND";
    pub const ACCESS_DENIED: &str = "ACCESS_DENIED";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const STORE_ERROR: &str = "STORE_ERROR";
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{message}")]
    NotFound { code: &'static str, message: String },
    #[error("{message}")]
    BusinessRule { code: &'static str, message: String },
    #[error("access denied")]
    AccessDenied,
    #[error("invalid request: {0}")]
    Validation(#[from] validator::ValidationErrors),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ServiceError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound { code, .. } | Self::BusinessRule { code, .. } => code,
            Self::AccessDenied => codes::ACCESS_DENIED,
            Self::Validation(_) => codes::VALIDATION_ERROR,
            Self::Store(_) => codes::STORE_ERROR,
        }
    }

    pub(crate) fn submission_not_found(submission_id: &str) -> Self {
        Self::NotFound {
            code: codes::SUBMISSION_NOT_FOUND,
            message: format!("Submission not found: {submission_id}"),
        }
    }

    pub(crate) fn exam_not_found(exam_id: &str) -> Self {
        Self::NotFound { code: codes::EXAM_NOT_FOUND, message: format!("Exam not found: {exam_id}") }
    }

    pub(crate) fn question_not_found(question_id: &str) -> Self {
        Self::NotFound {
            code: codes::QUESTION_NOT_FOUND,
            message: format!("Question not found: {question_id}"),
        }
    }

    pub(crate) fn correction_not_found(submission_id: &str) -> Self {
        Self::NotFound {
            code: codes::CORRECTION_NOT_FOUND,
            message: format!("No correction found for submission: {submission_id}"),
        }
    }

    pub(crate) fn answer_key_not_found(exam_id: &str) -> Self {
        Self::BusinessRule {
            code: codes::ANSWER_KEY_NOT_FOUND,
            message: format!("No answer key registered for exam: {exam_id}"),
        }
    }

    pub(crate) fn already_corrected(submission_id: &str) -> Self {
        Self::BusinessRule {
            code: codes::ALREADY_CORRECTED,
            message: format!("Submission already corrected: {submission_id}"),
        }
    }

    pub(crate) fn no_corrected_submissions(exam_id: &str) -> Self {
        Self::BusinessRule {
            code: codes::NO_CORRECTED_SUBMISSIONS,
            message: format!("Exam has no corrected submissions: {exam_id}"),
        }
    }
}
