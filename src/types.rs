//! Core types for Synheart Workout
//!
//! This module defines the data structures that flow through the engine:
//! activity kinds, validated readings, summary records and batch reports.

use crate::error::{ParameterError, WorkoutError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Activity kind (closed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Running,
    Walking,
    Swimming,
}

impl ActivityKind {
    /// Wire code used in input records
    pub fn code(&self) -> &'static str {
        match self {
            ActivityKind::Running => "RUN",
            ActivityKind::Walking => "WLK",
            ActivityKind::Swimming => "SWM",
        }
    }

    /// Name shown in the summary message
    pub fn display_name(&self) -> &'static str {
        match self {
            ActivityKind::Running => "Running",
            ActivityKind::Walking => "SportsWalking",
            ActivityKind::Swimming => "Swimming",
        }
    }

    /// Ordered parameter names expected for this kind
    pub fn parameter_names(&self) -> &'static [&'static str] {
        match self {
            ActivityKind::Running => &["action", "duration_hours", "weight_kg"],
            ActivityKind::Walking => &["action", "duration_hours", "weight_kg", "height_cm"],
            ActivityKind::Swimming => &[
                "action",
                "duration_hours",
                "weight_kg",
                "pool_length_m",
                "pool_lap_count",
            ],
        }
    }

    /// Number of numeric parameters required
    pub fn arity(&self) -> usize {
        self.parameter_names().len()
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Activity-specific measurements
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Activity {
    Running,
    Walking {
        /// Athlete height (cm)
        height_cm: f64,
    },
    Swimming {
        /// Pool length (meters)
        pool_length_m: f64,
        /// Number of pool lengths swum
        pool_lap_count: f64,
    },
}

impl Activity {
    pub fn kind(&self) -> ActivityKind {
        match self {
            Activity::Running => ActivityKind::Running,
            Activity::Walking { .. } => ActivityKind::Walking,
            Activity::Swimming { .. } => ActivityKind::Swimming,
        }
    }
}

/// A validated workout reading.
///
/// Built only by [`crate::registry::build_reading`], which guarantees a
/// positive duration and non-negative, finite measurements.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ActivityReading {
    action: f64,
    duration_hours: f64,
    weight_kg: f64,
    activity: Activity,
}

impl ActivityReading {
    pub(crate) fn new(action: f64, duration_hours: f64, weight_kg: f64, activity: Activity) -> Self {
        Self {
            action,
            duration_hours,
            weight_kg,
            activity,
        }
    }

    pub fn kind(&self) -> ActivityKind {
        self.activity.kind()
    }

    /// Steps (running, walking) or strokes (swimming)
    pub fn action(&self) -> f64 {
        self.action
    }

    pub fn duration_hours(&self) -> f64 {
        self.duration_hours
    }

    pub fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    pub fn activity(&self) -> &Activity {
        &self.activity
    }
}

/// Summary of a single workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRecord {
    pub activity_name: String,
    pub duration_hours: f64,
    pub distance_km: f64,
    pub mean_speed_kmh: f64,
    pub calories_kcal: f64,
}

impl SummaryRecord {
    /// Render the fixed human-readable message
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SummaryRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Activity type: {}; Duration: {:.3} h.; Distance: {:.3} km; \
             Mean speed: {:.3} km/h; Calories burned: {:.3}.",
            self.activity_name,
            self.duration_hours,
            self.distance_km,
            self.mean_speed_kmh,
            self.calories_kcal
        )
    }
}

/// One input record in NDJSON form.
///
/// `data` is kept as raw JSON so a bad entry is reported per field and the
/// workout code survives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutPackage {
    pub workout_type: String,
    pub data: Vec<serde_json::Value>,
}

impl WorkoutPackage {
    /// Numeric parameters, failing on the first entry that is not a number
    pub fn values(&self) -> Result<Vec<f64>, WorkoutError> {
        self.data
            .iter()
            .enumerate()
            .map(|(idx, value)| {
                value.as_f64().ok_or_else(|| {
                    let raw = match value {
                        serde_json::Value::String(s) => s.clone(),
                        other => other.to_string(),
                    };
                    WorkoutError::from(ParameterError::Malformed {
                        index: idx + 1,
                        raw,
                    })
                })
            })
            .collect()
    }
}

/// Report producer metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Producer {
    pub name: String,
    pub version: String,
    pub instance_id: String,
}

/// A record that was skipped during batch processing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordError {
    /// 1-based line number in the input
    pub line: usize,
    /// Workout code, when one could be read
    pub code: Option<String>,
    pub message: String,
}

/// A summarized record together with its source line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSummary {
    pub line: usize,
    pub summary: SummaryRecord,
}

/// Result of processing one batch of records
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub producer: Producer,
    pub generated_at_utc: String,
    pub total_records: usize,
    pub summaries: Vec<LineSummary>,
    pub errors: Vec<RecordError>,
}

impl BatchReport {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
