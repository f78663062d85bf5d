pub mod correction;
pub mod errors;
pub mod invalidation;
pub mod issue_detection;
pub mod issues;
pub mod reports;
pub mod statistics;

/// Round to two decimal places, halves away from zero.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
