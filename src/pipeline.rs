//! Pipeline orchestration
//!
//! This module provides the public API for Synheart Workout.
//! It runs records through the registry and calculator and collects results.

use crate::calculator::MetricCalculator;
use crate::config::InputConfig;
use crate::error::WorkoutError;
use crate::input::{InputFormat, ParsedRecord, RecordReader};
use crate::registry::{read_package, resolve};
use crate::types::{BatchReport, LineSummary, Producer, RecordError, SummaryRecord};
use crate::{PRODUCER_NAME, WORKOUT_VERSION};
use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Summarize a single workout package.
///
/// # Arguments
/// * `code` - Workout type code ("RUN", "WLK" or "SWM")
/// * `params` - Ordered numeric parameters for that workout type
///
/// # Example
/// ```ignore
/// let summary = summarize_package("RUN", &[15000.0, 1.0, 75.0])?;
/// println!("{}", summary.message());
/// ```
pub fn summarize_package(code: &str, params: &[f64]) -> Result<SummaryRecord, WorkoutError> {
    let reading = read_package(code, params)?;
    let summary = MetricCalculator::summarize(&reading);
    debug!(
        code,
        distance_km = summary.distance_km,
        calories_kcal = summary.calories_kcal,
        "summarized workout"
    );
    Ok(summary)
}

/// Summarize a package and render its message line
pub fn workout_message(code: &str, params: &[f64]) -> Result<String, WorkoutError> {
    summarize_package(code, params).map(|summary| summary.message())
}

/// Built-in sample packages, one per activity
pub fn demo_packages() -> Vec<(&'static str, Vec<f64>)> {
    vec![
        ("SWM", vec![720.0, 1.0, 80.0, 25.0, 40.0]),
        ("RUN", vec![15000.0, 1.0, 75.0]),
        ("WLK", vec![9000.0, 1.0, 75.0, 180.0]),
    ]
}

/// Stateful processor for batches of records.
///
/// Keeps running totals across calls; a failing record is reported in the
/// batch and never aborts it.
pub struct WorkoutProcessor {
    config: InputConfig,
    instance_id: String,
    processed: usize,
    failed: usize,
}

impl Default for WorkoutProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkoutProcessor {
    /// Create a new processor with default settings
    pub fn new() -> Self {
        Self::with_config(InputConfig::default())
    }

    /// Create a processor with specific input settings
    pub fn with_config(config: InputConfig) -> Self {
        Self {
            config,
            instance_id: Uuid::new_v4().to_string(),
            processed: 0,
            failed: 0,
        }
    }

    pub fn config(&self) -> &InputConfig {
        &self.config
    }

    /// Records summarized so far
    pub fn processed(&self) -> usize {
        self.processed
    }

    /// Records skipped so far
    pub fn failed(&self) -> usize {
        self.failed
    }

    /// Process raw input text
    pub fn process_text(&mut self, input: &str, format: InputFormat) -> BatchReport {
        let records = RecordReader::read(input, format, &self.config);
        self.process_records(records)
    }

    /// Process already-parsed records
    pub fn process_records(&mut self, records: Vec<ParsedRecord>) -> BatchReport {
        let total_records = records.len();
        let mut summaries = Vec::new();
        let mut errors = Vec::new();

        for record in records {
            let ParsedRecord { line, code, params } = record;
            match summarize_record(code.as_deref(), params) {
                Ok(summary) => summaries.push(LineSummary { line, summary }),
                Err(e) => {
                    warn!(line, code = ?code, error = %e, "skipping record");
                    errors.push(RecordError {
                        line,
                        code,
                        message: e.to_string(),
                    });
                }
            }
        }

        self.processed += summaries.len();
        self.failed += errors.len();
        info!(
            total = total_records,
            summarized = summaries.len(),
            skipped = errors.len(),
            "batch processed"
        );

        BatchReport {
            producer: Producer {
                name: PRODUCER_NAME.to_string(),
                version: WORKOUT_VERSION.to_string(),
                instance_id: self.instance_id.clone(),
            },
            generated_at_utc: Utc::now().to_rfc3339(),
            total_records,
            summaries,
            errors,
        }
    }
}

fn summarize_record(
    code: Option<&str>,
    params: Result<Vec<f64>, WorkoutError>,
) -> Result<SummaryRecord, WorkoutError> {
    let Some(code) = code else {
        // keep the reader's own error for records it could not split
        return Err(params.err().unwrap_or_else(|| {
            WorkoutError::ParseError("missing workout type code".to_string())
        }));
    };

    // an unknown code is reported ahead of malformed values
    resolve(code)?;
    summarize_package(code, &params?)
}
