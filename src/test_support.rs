use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

use crate::core::config::{CorrectionSettings, Settings, TelemetrySettings};
use crate::core::state::AppState;
use crate::core::time::primitive_now_utc;
use crate::domain::models::{AnswerKey, Exam, Question, Submission};
use crate::domain::types::{ExamStatus, QuestionType, UserRole};
use crate::services::correction;
use crate::store::memory::MemoryStore;

pub(crate) struct TestContext {
    pub(crate) state: AppState,
    pub(crate) store: Arc<MemoryStore>,
}

/// Serializes tests that touch process environment variables.
pub(crate) async fn env_lock() -> OwnedMutexGuard<()> {
    static LOCK: OnceLock<Arc<Mutex<()>>> = OnceLock::new();
    let lock = LOCK.get_or_init(|| Arc::new(Mutex::new(()))).clone();
    lock.lock_owned().await
}

pub(crate) fn test_settings() -> Settings {
    Settings::new(
        CorrectionSettings {
            min_submissions_for_issue: 2,
            threshold_low_accuracy: 20.0,
            threshold_high_accuracy: 90.0,
            threshold_high_blank: 30.0,
        },
        TelemetrySettings { log_level: "info".to_string(), json: false },
    )
    .expect("test settings")
}

pub(crate) fn setup_test_context() -> TestContext {
    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(test_settings(), store.clone());
    TestContext { state, store }
}

pub(crate) fn question(id: &str, points: f64) -> Question {
    Question {
        id: id.to_string(),
        statement: format!("Question {id}"),
        kind: QuestionType::Objective,
        alternatives: vec![
            "A".to_string(),
            "B".to_string(),
            "C".to_string(),
            "D".to_string(),
        ],
        points,
        position: 0,
    }
}

pub(crate) fn true_false_question(id: &str, points: f64) -> Question {
    Question {
        id: id.to_string(),
        statement: format!("Question {id}"),
        kind: QuestionType::TrueFalse,
        alternatives: vec!["V".to_string(), "F".to_string()],
        points,
        position: 0,
    }
}

pub(crate) fn exam_with_questions(professor_id: &str, mut questions: Vec<Question>) -> Exam {
    for (index, question) in questions.iter_mut().enumerate() {
        question.position = index as i32 + 1;
    }
    Exam {
        id: Uuid::new_v4().to_string(),
        title: "Midterm exam".to_string(),
        professor_id: professor_id.to_string(),
        status: ExamStatus::Published,
        questions,
    }
}

/// Objective q1 worth 2.0 points plus true/false q2 worth 1.0.
pub(crate) fn two_question_exam(professor_id: &str) -> Exam {
    exam_with_questions(professor_id, vec![question("q1", 2.0), true_false_question("q2", 1.0)])
}

pub(crate) fn string_map(entries: &[(&str, &str)]) -> HashMap<String, String> {
    entries.iter().map(|(key, value)| (key.to_string(), value.to_string())).collect()
}

pub(crate) fn answer_key(exam: &Exam, answers: &[(&str, &str)]) -> AnswerKey {
    AnswerKey {
        id: Uuid::new_v4().to_string(),
        exam_id: exam.id.clone(),
        answers: string_map(answers),
    }
}

pub(crate) fn submission(exam: &Exam, student_id: &str, answers: &[(&str, &str)]) -> Submission {
    Submission {
        id: Uuid::new_v4().to_string(),
        exam_id: exam.id.clone(),
        student_id: student_id.to_string(),
        answers: string_map(answers),
        score: None,
        corrected: false,
        submitted_at: primitive_now_utc(),
    }
}

/// Seed a two-question exam keyed {q1: B, q2: V} and grade one submission per
/// answer set, for students numbered from 1.
pub(crate) async fn seed_graded_exam(
    ctx: &TestContext,
    professor_id: &str,
    answers_per_student: &[&[(&str, &str)]],
) -> Exam {
    let exam = two_question_exam(professor_id);
    ctx.store.seed_exam(exam.clone()).await.expect("seed exam");
    ctx.store
        .seed_answer_key(answer_key(&exam, &[("q1", "B"), ("q2", "V")]))
        .await
        .expect("seed answer key");

    for (index, answers) in answers_per_student.iter().enumerate() {
        let sub = submission(&exam, &format!("student-{}", index + 1), answers);
        ctx.store.seed_submission(sub.clone()).await.expect("seed submission");
        correction::correct_submission(&ctx.state, &sub.id, professor_id, UserRole::Professor)
            .await
            .expect("correct submission");
    }

    exam
}
