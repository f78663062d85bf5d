use std::env;

use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Settings {
    correction: CorrectionSettings,
    telemetry: TelemetrySettings,
}

/// Thresholds driving automatic question-issue detection, all percentages in 0-100.
#[derive(Debug, Clone)]
pub struct CorrectionSettings {
    pub min_submissions_for_issue: u32,
    pub threshold_low_accuracy: f64,
    pub threshold_high_accuracy: f64,
    pub threshold_high_blank: f64,
}

#[derive(Debug, Clone)]
pub struct TelemetrySettings {
    pub log_level: String,
    pub json: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {field}: {value}")]
    InvalidValue { field: &'static str, value: String },
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        let min_submissions_for_issue = parse_u32(
            "CORRECTION_MIN_SUBMISSIONS_FOR_ISSUE",
            env_or_default("CORRECTION_MIN_SUBMISSIONS_FOR_ISSUE", "5"),
        )?;
        let threshold_low_accuracy = parse_f64(
            "CORRECTION_THRESHOLD_LOW_ACCURACY",
            env_or_default("CORRECTION_THRESHOLD_LOW_ACCURACY", "20.0"),
        )?;
        let threshold_high_accuracy = parse_f64(
            "CORRECTION_THRESHOLD_HIGH_ACCURACY",
            env_or_default("CORRECTION_THRESHOLD_HIGH_ACCURACY", "90.0"),
        )?;
        let threshold_high_blank = parse_f64(
            "CORRECTION_THRESHOLD_HIGH_BLANK",
            env_or_default("CORRECTION_THRESHOLD_HIGH_BLANK", "30.0"),
        )?;

        let log_level = env_or_default("CORRECTION_LOG_LEVEL", "info");
        let json =
            env_optional("CORRECTION_LOG_JSON").map(|value| parse_bool(&value)).unwrap_or(false);

        Self::new(
            CorrectionSettings {
                min_submissions_for_issue,
                threshold_low_accuracy,
                threshold_high_accuracy,
                threshold_high_blank,
            },
            TelemetrySettings { log_level, json },
        )
    }

    pub fn new(
        correction: CorrectionSettings,
        telemetry: TelemetrySettings,
    ) -> Result<Self, ConfigError> {
        let settings = Self { correction, telemetry };
        settings.validate()?;
        Ok(settings)
    }

    pub fn correction(&self) -> &CorrectionSettings {
        &self.correction
    }

    pub fn telemetry(&self) -> &TelemetrySettings {
        &self.telemetry
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let thresholds = [
            ("CORRECTION_THRESHOLD_LOW_ACCURACY", self.correction.threshold_low_accuracy),
            ("CORRECTION_THRESHOLD_HIGH_ACCURACY", self.correction.threshold_high_accuracy),
            ("CORRECTION_THRESHOLD_HIGH_BLANK", self.correction.threshold_high_blank),
        ];

        for (field, value) in thresholds {
            if !(0.0..=100.0).contains(&value) {
                return Err(ConfigError::InvalidValue { field, value: value.to_string() });
            }
        }

        Ok(())
    }
}

fn env_optional(key: &str) -> Option<String> {
    env::var(key).ok().map(|value| value.trim().to_string()).filter(|value| !value.is_empty())
}

fn env_or_default(key: &str, default: &str) -> String {
    env_optional(key).unwrap_or_else(|| default.to_string())
}

fn parse_u32(field: &'static str, value: String) -> Result<u32, ConfigError> {
    value.parse::<u32>().map_err(|_| ConfigError::InvalidValue { field, value })
}

fn parse_f64(field: &'static str, value: String) -> Result<f64, ConfigError> {
    value.parse::<f64>().map_err(|_| ConfigError::InvalidValue { field, value })
}

fn parse_bool(value: &str) -> bool {
    matches!(value, "1" | "true" | "TRUE" | "yes" | "YES" | "on" | "ON")
}
