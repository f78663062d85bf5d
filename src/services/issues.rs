use validator::Validate;

use crate::core::state::AppState;
use crate::core::time::primitive_now_utc;
use crate::domain::models::{NewQuestionIssue, QuestionIssue};
use crate::domain::types::{IssueOrigin, UserRole};
use crate::schemas::issue::QuestionIssueRequest;
use crate::services::errors::ServiceError;
use crate::store::{ExamStore, IssueStore};

/// File a professor-reported issue against a question of an owned exam.
pub async fn report_issue(
    state: &AppState,
    question_id: &str,
    user_id: &str,
    role: UserRole,
    payload: QuestionIssueRequest,
) -> Result<QuestionIssue, ServiceError> {
    if role != UserRole::Professor {
        return Err(ServiceError::AccessDenied);
    }
    payload.validate()?;

    let store = state.store();
    let exam = store
        .find_exam_by_question(question_id)
        .await?
        .ok_or_else(|| ServiceError::question_not_found(question_id))?;
    if exam.professor_id != user_id {
        return Err(ServiceError::AccessDenied);
    }

    let issue = store
        .insert_issue(NewQuestionIssue {
            question_id: question_id.to_string(),
            exam_id: exam.id.clone(),
            kind: payload.kind,
            severity: payload.severity,
            description: payload.description,
            origin: IssueOrigin::Professor,
            detected_at: primitive_now_utc(),
        })
        .await?;

    tracing::info!(
        question_id = %question_id,
        kind = %issue.kind,
        severity = issue.severity.as_str(),
        "Question issue reported"
    );
    metrics::counter!("question_issues_total", "origin" => "professor").increment(1);

    Ok(issue)
}

/// List every issue on a question, system-detected and professor-reported
/// alike. Restricted to the professor who owns the exam.
pub async fn list_for_question(
    state: &AppState,
    question_id: &str,
    user_id: &str,
    role: UserRole,
) -> Result<Vec<QuestionIssue>, ServiceError> {
    if role != UserRole::Professor {
        return Err(ServiceError::AccessDenied);
    }

    let store = state.store();
    let exam = store
        .find_exam_by_question(question_id)
        .await?
        .ok_or_else(|| ServiceError::question_not_found(question_id))?;
    if exam.professor_id != user_id {
        return Err(ServiceError::AccessDenied);
    }

    Ok(store.issues_for_question(question_id).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::IssueSeverity;
    use crate::services::errors::codes;
    use crate::test_support::{setup_test_context, two_question_exam};

    fn request(kind: &str, description: &str) -> QuestionIssueRequest {
        QuestionIssueRequest {
            kind: kind.to_string(),
            severity: IssueSeverity::Medium,
            description: description.to_string(),
        }
    }

    #[tokio::test]
    async fn report_issue_persists_with_professor_origin() {
        let ctx = setup_test_context();
        let exam = two_question_exam("prof-1");
        ctx.store.seed_exam(exam.clone()).await.expect("seed exam");

        let issue = report_issue(
            &ctx.state,
            "q1",
            "prof-1",
            UserRole::Professor,
            request("ENUNCIADO_AMBIGUO", "The statement reads two ways"),
        )
        .await
        .expect("report");

        assert_eq!(issue.origin, IssueOrigin::Professor);
        assert_eq!(issue.exam_id, exam.id);
        assert_eq!(issue.kind, "ENUNCIADO_AMBIGUO");
        let stored = ctx.store.issues_for_question("q1").await.expect("issues");
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, issue.id);
    }

    #[tokio::test]
    async fn report_issue_rejects_invalid_payloads() {
        let ctx = setup_test_context();
        let exam = two_question_exam("prof-1");
        ctx.store.seed_exam(exam.clone()).await.expect("seed exam");

        let empty_kind = report_issue(
            &ctx.state,
            "q1",
            "prof-1",
            UserRole::Professor,
            request("", "Valid description"),
        )
        .await
        .expect_err("empty kind must fail");
        assert_eq!(empty_kind.code(), codes::VALIDATION_ERROR);

        let blank_kind = report_issue(
            &ctx.state,
            "q1",
            "prof-1",
            UserRole::Professor,
            request("   ", "Valid description"),
        )
        .await
        .expect_err("whitespace-only kind must fail");
        assert_eq!(blank_kind.code(), codes::VALIDATION_ERROR);

        let long_description = report_issue(
            &ctx.state,
            "q1",
            "prof-1",
            UserRole::Professor,
            request("ENUNCIADO_AMBIGUO", &"x".repeat(2001)),
        )
        .await
        .expect_err("oversized description must fail");
        assert_eq!(long_description.code(), codes::VALIDATION_ERROR);
        assert!(ctx.store.issues_for_question("q1").await.expect("issues").is_empty());
    }

    #[tokio::test]
    async fn report_issue_requires_a_known_question_and_ownership() {
        let ctx = setup_test_context();
        let exam = two_question_exam("prof-1");
        ctx.store.seed_exam(exam.clone()).await.expect("seed exam");

        let unknown = report_issue(
            &ctx.state,
            "missing",
            "prof-1",
            UserRole::Professor,
            request("ENUNCIADO_AMBIGUO", "Valid description"),
        )
        .await
        .expect_err("unknown question must fail");
        assert_eq!(unknown.code(), codes::QUESTION_NOT_FOUND);

        let other = report_issue(
            &ctx.state,
            "q1",
            "prof-2",
            UserRole::Professor,
            request("ENUNCIADO_AMBIGUO", "Valid description"),
        )
        .await;
        assert!(matches!(other, Err(ServiceError::AccessDenied)));
        let student = report_issue(
            &ctx.state,
            "q1",
            "student-1",
            UserRole::Student,
            request("ENUNCIADO_AMBIGUO", "Valid description"),
        )
        .await;
        assert!(matches!(student, Err(ServiceError::AccessDenied)));
    }

    #[tokio::test]
    async fn list_for_question_returns_both_origins() {
        let ctx = setup_test_context();
        let exam = two_question_exam("prof-1");
        ctx.store.seed_exam(exam.clone()).await.expect("seed exam");
        ctx.store
            .insert_issue(NewQuestionIssue {
                question_id: "q1".to_string(),
                exam_id: exam.id.clone(),
                kind: "MUITO_BAIXO_ACERTO".to_string(),
                severity: IssueSeverity::High,
                description: "Accuracy rate too low: 5.0%".to_string(),
                origin: IssueOrigin::System,
                detected_at: primitive_now_utc(),
            })
            .await
            .expect("seed system issue");
        report_issue(
            &ctx.state,
            "q1",
            "prof-1",
            UserRole::Professor,
            request("ENUNCIADO_AMBIGUO", "The statement reads two ways"),
        )
        .await
        .expect("report");

        let issues = list_for_question(&ctx.state, "q1", "prof-1", UserRole::Professor)
            .await
            .expect("list");

        assert_eq!(issues.len(), 2);
        assert!(issues.iter().any(|issue| issue.origin == IssueOrigin::System));
        assert!(issues.iter().any(|issue| issue.origin == IssueOrigin::Professor));
    }

    #[tokio::test]
    async fn list_for_question_enforces_ownership() {
        let ctx = setup_test_context();
        let exam = two_question_exam("prof-1");
        ctx.store.seed_exam(exam.clone()).await.expect("seed exam");

        let other = list_for_question(&ctx.state, "q1", "prof-2", UserRole::Professor).await;
        assert!(matches!(other, Err(ServiceError::AccessDenied)));
        let unknown =
            list_for_question(&ctx.state, "missing", "prof-1", UserRole::Professor).await;
        assert_eq!(unknown.expect_err("must fail").code(), codes::QUESTION_NOT_FOUND);
    }
}
