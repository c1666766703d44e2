//! Formula registry
//!
//! Maps workout type codes to activity kinds and turns ordered parameter lists
//! into validated [`ActivityReading`]s.

use crate::calculator;
use crate::error::{ParameterError, WorkoutError};
use crate::types::{Activity, ActivityKind, ActivityReading};

/// Supported workout codes
pub const WORKOUT_TYPES: [(&str, ActivityKind); 3] = [
    ("RUN", ActivityKind::Running),
    ("WLK", ActivityKind::Walking),
    ("SWM", ActivityKind::Swimming),
];

/// Registry entry describing one activity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityEntry {
    pub code: &'static str,
    pub kind: ActivityKind,
    pub parameters: &'static [&'static str],
}

/// List every registered activity with its parameter layout
pub fn supported_activities() -> Vec<ActivityEntry> {
    WORKOUT_TYPES
        .iter()
        .map(|&(code, kind)| ActivityEntry {
            code,
            kind,
            parameters: kind.parameter_names(),
        })
        .collect()
}

/// Resolve a workout code to its activity kind
pub fn resolve(code: &str) -> Result<ActivityKind, WorkoutError> {
    WORKOUT_TYPES
        .iter()
        .find(|(known, _)| *known == code)
        .map(|&(_, kind)| kind)
        .ok_or_else(|| WorkoutError::UnknownActivity(code.to_string()))
}

/// Build a validated reading for `kind` from its ordered parameters
pub fn build_reading(kind: ActivityKind, params: &[f64]) -> Result<ActivityReading, WorkoutError> {
    if params.len() != kind.arity() {
        return Err(ParameterError::Count {
            activity: kind.display_name(),
            expected: kind.arity(),
            actual: params.len(),
        }
        .into());
    }

    for (&name, &value) in kind.parameter_names().iter().zip(params) {
        check_non_negative(name, value)?;
    }

    let (action, duration_hours, weight_kg) = (params[0], params[1], params[2]);
    check_positive("duration_hours", duration_hours)?;

    let activity = match kind {
        ActivityKind::Running => Activity::Running,
        ActivityKind::Walking => {
            // height is a divisor in the walking calorie formula
            check_positive("height_cm", params[3])?;
            Activity::Walking {
                height_cm: params[3],
            }
        }
        ActivityKind::Swimming => Activity::Swimming {
            pool_length_m: params[3],
            pool_lap_count: params[4],
        },
    };

    let reading = ActivityReading::new(action, duration_hours, weight_kg, activity);
    check_metrics(&reading)?;
    Ok(reading)
}

/// Resolve `code` and build its reading in one step
pub fn read_package(code: &str, params: &[f64]) -> Result<ActivityReading, WorkoutError> {
    let kind = resolve(code)?;
    build_reading(kind, params)
}

/// Parse textual parameter fields into numbers
pub fn parse_params<S: AsRef<str>>(fields: &[S]) -> Result<Vec<f64>, WorkoutError> {
    fields
        .iter()
        .enumerate()
        .map(|(idx, field)| {
            let raw = field.as_ref().trim();
            raw.parse::<f64>().map_err(|_| {
                WorkoutError::from(ParameterError::Malformed {
                    index: idx + 1,
                    raw: raw.to_string(),
                })
            })
        })
        .collect()
}

fn check_non_negative(name: &'static str, value: f64) -> Result<(), ParameterError> {
    if !value.is_finite() {
        return Err(ParameterError::NonFinite { name });
    }
    if value < 0.0 {
        return Err(ParameterError::Negative { name, value });
    }
    Ok(())
}

fn check_positive(name: &'static str, value: f64) -> Result<(), ParameterError> {
    if value <= 0.0 {
        return Err(ParameterError::NonPositive { name, value });
    }
    Ok(())
}

/// Finite inputs can still overflow the formulas (huge counts over tiny durations)
fn check_metrics(reading: &ActivityReading) -> Result<(), ParameterError> {
    let metrics = [
        ("distance_km", calculator::distance_km(reading)),
        ("mean_speed_kmh", calculator::mean_speed_kmh(reading)),
        ("calories_kcal", calculator::calories_kcal(reading)),
    ];
    match metrics.iter().find(|(_, value)| !value.is_finite()) {
        Some(&(metric, _)) => Err(ParameterError::MetricOverflow { metric }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_resolve_known_codes() {
        assert_eq!(resolve("RUN").unwrap(), ActivityKind::Running);
        assert_eq!(resolve("WLK").unwrap(), ActivityKind::Walking);
        assert_eq!(resolve("SWM").unwrap(), ActivityKind::Swimming);
    }

    #[test]
    fn test_resolve_unknown_code() {
        assert!(matches!(
            resolve("XYZ"),
            Err(WorkoutError::UnknownActivity(code)) if code == "XYZ"
        ));
        // codes are case-sensitive
        assert!(matches!(resolve("run"), Err(WorkoutError::UnknownActivity(_))));
    }

    #[test]
    fn test_build_reading_arity() {
        assert!(build_reading(ActivityKind::Running, &[15000.0, 1.0, 75.0]).is_ok());

        let err = build_reading(ActivityKind::Running, &[15000.0, 1.0]).unwrap_err();
        match err {
            WorkoutError::InvalidParameters(ParameterError::Count {
                expected, actual, ..
            }) => {
                assert_eq!(expected, 3);
                assert_eq!(actual, 2);
            }
            other => panic!("unexpected error: {other:?}"),
        }

        for (kind, len) in [
            (ActivityKind::Walking, 3),
            (ActivityKind::Walking, 5),
            (ActivityKind::Swimming, 4),
        ] {
            let params = vec![1.0; len];
            assert!(matches!(
                build_reading(kind, &params),
                Err(WorkoutError::InvalidParameters(ParameterError::Count { .. }))
            ));
        }
    }

    #[test]
    fn test_build_reading_extras() {
        let walk = build_reading(ActivityKind::Walking, &[9000.0, 1.0, 75.0, 180.0]).unwrap();
        assert_eq!(walk.activity(), &Activity::Walking { height_cm: 180.0 });

        let swim = read_package("SWM", &[720.0, 1.0, 80.0, 25.0, 40.0]).unwrap();
        assert_eq!(
            swim.activity(),
            &Activity::Swimming {
                pool_length_m: 25.0,
                pool_lap_count: 40.0
            }
        );
        assert_eq!(swim.kind(), ActivityKind::Swimming);
        assert_eq!(swim.weight_kg(), 80.0);
    }

    #[test]
    fn test_build_reading_domain_checks() {
        assert!(matches!(
            read_package("RUN", &[15000.0, 0.0, 75.0]),
            Err(WorkoutError::InvalidParameters(ParameterError::NonPositive {
                name: "duration_hours",
                ..
            }))
        ));
        assert!(matches!(
            read_package("RUN", &[-1.0, 1.0, 75.0]),
            Err(WorkoutError::InvalidParameters(ParameterError::Negative { name: "action", .. }))
        ));
        assert!(matches!(
            read_package("WLK", &[9000.0, 1.0, 75.0, 0.0]),
            Err(WorkoutError::InvalidParameters(ParameterError::NonPositive {
                name: "height_cm",
                ..
            }))
        ));
        assert!(matches!(
            read_package("SWM", &[720.0, 1.0, f64::NAN, 25.0, 40.0]),
            Err(WorkoutError::InvalidParameters(ParameterError::NonFinite { name: "weight_kg" }))
        ));
    }

    #[test]
    fn test_build_reading_rejects_overflowing_metrics() {
        // every input is finite, only the calorie product overflows
        let err = read_package("RUN", &[1e300, 1e-10, 75.0]).unwrap_err();
        assert!(matches!(
            err,
            WorkoutError::InvalidParameters(ParameterError::MetricOverflow {
                metric: "calories_kcal"
            })
        ));
        assert!(err.to_string().contains("calories_kcal is not a finite number"));

        match read_package("SWM", &[720.0, 1.0, 80.0, 1e300, 1e300]) {
            Err(WorkoutError::InvalidParameters(ParameterError::MetricOverflow { metric })) => {
                assert_eq!(metric, "mean_speed_kmh");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_parse_params() {
        assert_eq!(parse_params(&["15000", " 1 ", "75.5"]).unwrap(), vec![15000.0, 1.0, 75.5]);

        let err = parse_params(&["15000", "abc"]).unwrap_err();
        assert!(matches!(
            err,
            WorkoutError::InvalidParameters(ParameterError::Malformed { index: 2, .. })
        ));
    }

    #[test]
    fn test_supported_activities() {
        let specs = supported_activities();
        let arities: Vec<(&str, usize)> = specs.iter().map(|s| (s.code, s.parameters.len())).collect();
        assert_eq!(arities, vec![("RUN", 3), ("WLK", 4), ("SWM", 5)]);
    }
}
