use serde::Serialize;

use crate::services::errors::ServiceError;

/// Wire shape for any failed operation: a stable machine code plus a
/// human-readable message.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl ErrorBody {
    pub fn from_error(error: &ServiceError) -> Self {
        Self { code: error.code().to_string(), message: error.to_string() }
    }
}
