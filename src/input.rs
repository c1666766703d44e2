//! Record readers
//!
//! Splits raw input text into per-line workout records. Each record keeps its
//! line number so failures can be reported without stopping the batch.

use crate::config::InputConfig;
use crate::error::WorkoutError;
use crate::registry::parse_params;
use crate::types::WorkoutPackage;
use csv::{Position, ReaderBuilder, Trim};
use serde::{Deserialize, Serialize};

/// Supported input encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    /// `CODE,v1,v2,...` rows
    Csv,
    /// One `{"workout_type": ..., "data": [...]}` object per line
    Ndjson,
}

impl InputFormat {
    pub fn parse(name: &str) -> Result<Self, WorkoutError> {
        match name.to_ascii_lowercase().as_str() {
            "csv" => Ok(InputFormat::Csv),
            "ndjson" => Ok(InputFormat::Ndjson),
            other => Err(WorkoutError::ConfigError(format!(
                "unsupported input format: {other}"
            ))),
        }
    }
}

/// A single input record, parsed as far as possible
#[derive(Debug)]
pub struct ParsedRecord {
    /// 1-based line number
    pub line: usize,
    /// Workout code, when the line had one
    pub code: Option<String>,
    /// Numeric parameters, or why they could not be read
    pub params: Result<Vec<f64>, WorkoutError>,
}

/// Reader for workout record streams
pub struct RecordReader;

impl RecordReader {
    /// Read records in the given format
    pub fn read(input: &str, format: InputFormat, config: &InputConfig) -> Vec<ParsedRecord> {
        match format {
            InputFormat::Csv => Self::parse_delimited(input, config),
            InputFormat::Ndjson => Self::parse_ndjson(input),
        }
    }

    /// Parse delimited rows; blank lines, comments and the optional header are skipped.
    ///
    /// Fields may be quoted and surrounding whitespace is ignored.
    pub fn parse_delimited(input: &str, config: &InputConfig) -> Vec<ParsedRecord> {
        let mut reader = ReaderBuilder::new()
            .delimiter(config.delimiter_byte())
            .has_headers(config.has_header)
            .comment(config.comment_byte())
            .flexible(true)
            .trim(Trim::All)
            .from_reader(input.as_bytes());

        let mut records = Vec::new();
        for result in reader.records() {
            let record = match result {
                Ok(record) => record,
                Err(e) => {
                    let line = source_line(input, e.position(), config);
                    records.push(ParsedRecord {
                        line,
                        code: None,
                        params: Err(WorkoutError::ParseError(format!(
                            "invalid record on line {}: {}",
                            line, e
                        ))),
                    });
                    continue;
                }
            };

            // whitespace-only lines come through as a single empty field
            if record.len() == 1 && record[0].is_empty() {
                continue;
            }

            let line = source_line(input, record.position(), config);
            let code = record.get(0).unwrap_or_default();
            let values: Vec<&str> = record.iter().skip(1).collect();

            records.push(if code.is_empty() {
                ParsedRecord {
                    line,
                    code: None,
                    params: Err(WorkoutError::ParseError(
                        "missing workout type code".to_string(),
                    )),
                }
            } else {
                ParsedRecord {
                    line,
                    code: Some(code.to_string()),
                    params: parse_params(&values),
                }
            });
        }

        records
    }

    /// Parse NDJSON packages, one per line
    pub fn parse_ndjson(input: &str) -> Vec<ParsedRecord> {
        let mut records = Vec::new();

        for (line_num, line) in input.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let record = match serde_json::from_str::<WorkoutPackage>(trimmed) {
                Ok(package) => ParsedRecord {
                    line: line_num + 1,
                    params: package.values(),
                    code: Some(package.workout_type),
                },
                Err(e) => ParsedRecord {
                    line: line_num + 1,
                    code: None,
                    params: Err(WorkoutError::ParseError(format!(
                        "invalid package on line {}: {}",
                        line_num + 1,
                        e
                    ))),
                },
            };
            records.push(record);
        }

        records
    }
}

/// 1-based line where the record at `position` starts.
///
/// The reader reports the offset just past the previous record, so blank and
/// comment lines in between are stepped over here.
fn source_line(input: &str, position: Option<&Position>, config: &InputConfig) -> usize {
    let Some(position) = position else {
        return 0;
    };

    let mut line = usize::try_from(position.line()).unwrap_or(usize::MAX);
    let start = usize::try_from(position.byte())
        .unwrap_or(usize::MAX)
        .min(input.len());
    let rest = input.get(start..).unwrap_or_default();

    for text in rest.lines() {
        if !text.trim().is_empty() && !config.is_comment(text) {
            break;
        }
        line = line.saturating_add(1);
    }
    line
}
