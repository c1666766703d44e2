//! Input configuration
//!
//! Controls how delimited workout records are read. Loadable from a JSON file
//! and overridable field by field by the CLI.

use crate::error::WorkoutError;
use serde::{Deserialize, Serialize};

/// Default field delimiter for text records
pub const DEFAULT_DELIMITER: char = ',';

/// Default character marking a comment line
pub const DEFAULT_COMMENT: char = '#';

/// Settings for reading delimited records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Field separator between the code and each value (single ASCII character)
    pub delimiter: char,
    /// Whether the first non-comment line is a header to skip
    pub has_header: bool,
    /// Lines starting with this character are ignored (`None` disables)
    pub comment: Option<char>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            has_header: false,
            comment: Some(DEFAULT_COMMENT),
        }
    }
}

impl InputConfig {
    /// Load configuration from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, WorkoutError> {
        let config: InputConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that cannot split a record
    pub fn validate(&self) -> Result<(), WorkoutError> {
        if !self.delimiter.is_ascii() {
            return Err(WorkoutError::ConfigError(format!(
                "delimiter {:?} must be a single ASCII character",
                self.delimiter
            )));
        }
        if self.delimiter == '.' || self.delimiter == '-' || self.delimiter.is_ascii_digit() {
            return Err(WorkoutError::ConfigError(format!(
                "delimiter {:?} clashes with numeric fields",
                self.delimiter
            )));
        }
        if self.delimiter == '\n' || self.delimiter == '\r' || self.delimiter == '"' {
            return Err(WorkoutError::ConfigError(format!(
                "delimiter {:?} is reserved",
                self.delimiter
            )));
        }
        if let Some(comment) = self.comment {
            if !comment.is_ascii() || comment == self.delimiter {
                return Err(WorkoutError::ConfigError(format!(
                    "comment character {:?} must be ASCII and differ from the delimiter",
                    comment
                )));
            }
        }
        Ok(())
    }

    pub(crate) fn delimiter_byte(&self) -> u8 {
        // validated ASCII, so the cast is lossless
        self.delimiter as u8
    }

    pub(crate) fn comment_byte(&self) -> Option<u8> {
        self.comment.map(|c| c as u8)
    }

    pub(crate) fn is_comment(&self, line: &str) -> bool {
        self.comment.is_some_and(|c| line.starts_with(c))
    }
}
