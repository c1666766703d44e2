//! Error types for Synheart Workout

use thiserror::Error;

/// Errors that can occur while resolving, building or summarizing a workout
#[derive(Debug, Error)]
pub enum WorkoutError {
    #[error("Unknown workout type code: {0}")]
    UnknownActivity(String),

    #[error("Invalid workout parameters: {0}")]
    InvalidParameters(#[from] ParameterError),

    #[error("Failed to parse workout record: {0}")]
    ParseError(String),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

/// Why a parameter list was rejected for a given activity
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParameterError {
    #[error("{activity} expects {expected} values, got {actual}")]
    Count {
        activity: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("field {index} is not a number: {raw:?}")]
    Malformed { index: usize, raw: String },

    #[error("{name} must be a finite number")]
    NonFinite { name: &'static str },

    #[error("{name} must not be negative (got {value})")]
    Negative { name: &'static str, value: f64 },

    #[error("{name} must be greater than zero (got {value})")]
    NonPositive { name: &'static str, value: f64 },

    #[error("derived {metric} is not a finite number")]
    MetricOverflow { metric: &'static str },
}
