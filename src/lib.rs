//! Synheart Workout - Workout metric engine
//!
//! Workout turns raw training readings into derived metrics through a small,
//! deterministic pipeline: code resolution → parameter validation → metric
//! calculation → summary formatting.
//!
//! ## Modules
//!
//! - **Registry**: Map workout codes (RUN, WLK, SWM) to activity kinds and build readings
//! - **Calculator**: Distance, mean speed and calories for each activity
//! - **Pipeline**: Single-package API and batch processing with per-record recovery

pub mod calculator;
pub mod config;
pub mod error;
pub mod input;
pub mod pipeline;
pub mod registry;
pub mod types;

// FFI bindings for C interop (on by default for cdylib/staticlib builds)
#[cfg(feature = "ffi")]
pub mod ffi;

pub use calculator::MetricCalculator;
pub use config::InputConfig;
pub use error::{ParameterError, WorkoutError};
pub use input::InputFormat;
pub use pipeline::{summarize_package, workout_message, WorkoutProcessor};
pub use registry::{build_reading, read_package, resolve};
pub use types::{ActivityKind, ActivityReading, SummaryRecord};

/// Library version embedded in batch reports
pub const WORKOUT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for batch reports
pub const PRODUCER_NAME: &str = "synheart-workout";
