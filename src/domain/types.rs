use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    #[serde(rename = "PROFESSOR")]
    Professor,
    #[serde(rename = "ALUNO")]
    Student,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExamStatus {
    #[serde(rename = "RASCUNHO")]
    Draft,
    #[serde(rename = "PUBLICADA")]
    Published,
    #[serde(rename = "ENCERRADA")]
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestionType {
    #[serde(rename = "OBJETIVA")]
    Objective,
    #[serde(rename = "VERDADEIRO_FALSO")]
    TrueFalse,
}

/// Ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IssueSeverity {
    #[serde(rename = "BAIXA")]
    Low,
    #[serde(rename = "MEDIA")]
    Medium,
    #[serde(rename = "ALTA")]
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IssueOrigin {
    #[serde(rename = "SISTEMA")]
    System,
    #[serde(rename = "PROFESSOR")]
    Professor,
}

impl IssueSeverity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "BAIXA",
            Self::Medium => "MEDIA",
            Self::High => "ALTA",
        }
    }
}

impl IssueOrigin {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::System => "SISTEMA",
            Self::Professor => "PROFESSOR",
        }
    }
}
