use std::collections::BTreeMap;

use anyhow::Context;

use crate::core::state::AppState;
use crate::core::time::primitive_now_utc;
use crate::domain::models::{Exam, NewQuestionIssue, Question, Submission};
use crate::domain::types::{IssueOrigin, IssueSeverity};
use crate::store::IssueStore;

pub const ISSUE_LOW_ACCURACY: &str = "MUITO_BAIXO_ACERTO";
pub const ISSUE_HIGH_ACCURACY: &str = "MUITO_ALTO_ACERTO";
pub const ISSUE_HIGH_BLANK: &str = "ALTO_INDICE_BRANCO";

/// Sweep an exam's questions against the configured thresholds and upsert one
/// system issue per (question, rule). Issues are refreshed in place on repeat
/// detections and never removed here, even once the numbers recover.
pub async fn run(
    state: &AppState,
    exam: &Exam,
    accuracy_by_question: &BTreeMap<String, f64>,
    corrected: &[Submission],
) -> anyhow::Result<()> {
    if corrected.is_empty() {
        return Ok(());
    }
    let thresholds = state.settings().correction();

    for question in &exam.questions {
        // Questions absent from the accuracy map count as 0% accurate.
        let accuracy = accuracy_by_question.get(&question.id).copied().unwrap_or(0.0);

        if accuracy < thresholds.threshold_low_accuracy {
            upsert_system_issue(
                state,
                &exam.id,
                question,
                ISSUE_LOW_ACCURACY,
                IssueSeverity::High,
                format!("Accuracy rate too low: {accuracy:.1}%"),
            )
            .await?;
        }
        if accuracy > thresholds.threshold_high_accuracy {
            upsert_system_issue(
                state,
                &exam.id,
                question,
                ISSUE_HIGH_ACCURACY,
                IssueSeverity::Low,
                format!("Accuracy rate too high: {accuracy:.1}%"),
            )
            .await?;
        }

        let blank = corrected
            .iter()
            .filter(|submission| !submission.answers.contains_key(&question.id))
            .count();
        let blank_rate = blank as f64 / corrected.len() as f64 * 100.0;
        if blank_rate > thresholds.threshold_high_blank {
            upsert_system_issue(
                state,
                &exam.id,
                question,
                ISSUE_HIGH_BLANK,
                IssueSeverity::Medium,
                format!("Blank answer rate too high: {blank_rate:.1}%"),
            )
            .await?;
        }
    }

    Ok(())
}

async fn upsert_system_issue(
    state: &AppState,
    exam_id: &str,
    question: &Question,
    kind: &str,
    severity: IssueSeverity,
    description: String,
) -> anyhow::Result<()> {
    let store = state.store();
    let existing = store
        .find_issue(&question.id, kind, IssueOrigin::System)
        .await
        .context("Failed to look up existing issue")?;

    match existing {
        Some(mut issue) => {
            issue.severity = severity;
            issue.description = description;
            issue.detected_at = primitive_now_utc();
            store.update_issue(&issue).await.context("Failed to refresh issue")?;
            tracing::info!(question_id = %question.id, kind = %kind, "Question issue refreshed");
        }
        None => {
            store
                .insert_issue(NewQuestionIssue {
                    question_id: question.id.clone(),
                    exam_id: exam_id.to_string(),
                    kind: kind.to_string(),
                    severity,
                    description,
                    origin: IssueOrigin::System,
                    detected_at: primitive_now_utc(),
                })
                .await
                .context("Failed to create issue")?;
            tracing::info!(
                question_id = %question.id,
                kind = %kind,
                severity = severity.as_str(),
                "Question issue created"
            );
            metrics::counter!("question_issues_total", "origin" => "system").increment(1);
        }
    }

    Ok(())
}
