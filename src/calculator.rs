//! Metric calculation
//!
//! This module derives workout metrics from a validated reading:
//! - Distance covered
//! - Mean speed over the whole session
//! - Calories burned, with an activity-specific formula

use crate::types::{Activity, ActivityReading, SummaryRecord};

/// Meters in a kilometer
pub const M_IN_KM: f64 = 1000.0;
/// Minutes in an hour
pub const MIN_IN_H: f64 = 60.0;
/// Step length for running and walking (meters)
pub const STEP_LENGTH_M: f64 = 0.65;
/// Stroke length for swimming (meters)
pub const STROKE_LENGTH_M: f64 = 1.38;

const RUN_SPEED_MULTIPLIER: f64 = 18.0;
const RUN_SPEED_SHIFT: f64 = 1.79;

const WALK_WEIGHT_MULTIPLIER: f64 = 0.035;
const WALK_SPEED_HEIGHT_MULTIPLIER: f64 = 0.029;
/// km/h to m/s
const KMH_IN_MSEC: f64 = 0.278;
const CM_IN_M: f64 = 100.0;

const SWIM_SPEED_SHIFT: f64 = 1.1;
const SWIM_WEIGHT_MULTIPLIER: f64 = 2.0;

/// Calculator producing summary records from readings
pub struct MetricCalculator;

impl MetricCalculator {
    /// Compute all metrics for a reading and package them
    pub fn summarize(reading: &ActivityReading) -> SummaryRecord {
        SummaryRecord {
            activity_name: reading.kind().display_name().to_string(),
            duration_hours: reading.duration_hours(),
            distance_km: distance_km(reading),
            mean_speed_kmh: mean_speed_kmh(reading),
            calories_kcal: calories_kcal(reading),
        }
    }
}

/// Distance covered (km)
pub fn distance_km(reading: &ActivityReading) -> f64 {
    let step_length = match reading.activity() {
        Activity::Running | Activity::Walking { .. } => STEP_LENGTH_M,
        Activity::Swimming { .. } => STROKE_LENGTH_M,
    };
    reading.action() * step_length / M_IN_KM
}

/// Mean speed over the session (km/h)
pub fn mean_speed_kmh(reading: &ActivityReading) -> f64 {
    match *reading.activity() {
        Activity::Running | Activity::Walking { .. } => {
            distance_km(reading) / reading.duration_hours()
        }
        // pool distance is measured in laps, not strokes
        Activity::Swimming {
            pool_length_m,
            pool_lap_count,
        } => pool_length_m * pool_lap_count / M_IN_KM / reading.duration_hours(),
    }
}

/// Calories burned (kcal)
pub fn calories_kcal(reading: &ActivityReading) -> f64 {
    let speed = mean_speed_kmh(reading);
    let weight = reading.weight_kg();
    let duration = reading.duration_hours();

    match *reading.activity() {
        Activity::Running => {
            (RUN_SPEED_MULTIPLIER * speed + RUN_SPEED_SHIFT) * weight / M_IN_KM
                * duration
                * MIN_IN_H
        }
        Activity::Walking { height_cm } => {
            (WALK_WEIGHT_MULTIPLIER * weight
                + (speed * KMH_IN_MSEC).powi(2) / (height_cm / CM_IN_M)
                    * WALK_SPEED_HEIGHT_MULTIPLIER
                    * weight)
                * duration
                * MIN_IN_H
        }
        Activity::Swimming { .. } => {
            (speed + SWIM_SPEED_SHIFT) * SWIM_WEIGHT_MULTIPLIER * weight * duration
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::read_package;
    use pretty_assertions::assert_eq;

    fn approx(actual: f64, expected: f64) -> bool {
        (actual - expected).abs() < 0.001
    }

    #[test]
    fn test_running_metrics() {
        let reading = read_package("RUN", &[15000.0, 1.0, 75.0]).unwrap();

        assert!(approx(distance_km(&reading), 9.75));
        assert!(approx(mean_speed_kmh(&reading), 9.75));
        // (18 * 9.75 + 1.79) * 75 / 1000 * 1 * 60
        assert!(approx(calories_kcal(&reading), 797.805));
    }

    #[test]
    fn test_running_half_hour() {
        let reading = read_package("RUN", &[5000.0, 0.5, 60.0]).unwrap();

        assert!(approx(distance_km(&reading), 3.25));
        assert!(approx(mean_speed_kmh(&reading), 6.5));
        assert!(approx(calories_kcal(&reading), 213.822));
    }

    #[test]
    fn test_walking_metrics() {
        let reading = read_package("WLK", &[9000.0, 1.0, 75.0, 180.0]).unwrap();

        assert!(approx(distance_km(&reading), 5.85));
        assert!(approx(mean_speed_kmh(&reading), 5.85));
        assert!(approx(calories_kcal(&reading), 349.252));

        let longer = read_package("WLK", &[12000.0, 2.0, 90.0, 165.0]).unwrap();
        assert!(approx(mean_speed_kmh(&longer), 3.9));
        assert!(approx(calories_kcal(&longer), 601.129));
    }

    #[test]
    fn test_swimming_metrics() {
        let reading = read_package("SWM", &[720.0, 1.0, 80.0, 25.0, 40.0]).unwrap();

        // 720 strokes * 1.38 m
        assert!(approx(distance_km(&reading), 0.9936));
        // 25 m * 40 laps / 1000 / 1 h
        assert!(approx(mean_speed_kmh(&reading), 1.0));
        // (1.0 + 1.1) * 2 * 80 * 1
        assert!(approx(calories_kcal(&reading), 336.0));
    }

    #[test]
    fn test_swimming_speed_ignores_strokes() {
        let few = read_package("SWM", &[100.0, 1.5, 72.0, 50.0, 30.0]).unwrap();
        let many = read_package("SWM", &[5000.0, 1.5, 72.0, 50.0, 30.0]).unwrap();

        assert_eq!(mean_speed_kmh(&few), mean_speed_kmh(&many));
        assert!(approx(calories_kcal(&many), 453.6));
    }

    #[test]
    fn test_summarize() {
        let reading = read_package("WLK", &[9000.0, 1.0, 75.0, 180.0]).unwrap();
        let summary = MetricCalculator::summarize(&reading);

        assert_eq!(summary.activity_name, "SportsWalking");
        assert_eq!(summary.duration_hours, 1.0);
        assert!(approx(summary.distance_km, 5.85));
        assert!(approx(summary.mean_speed_kmh, 5.85));
        assert!(approx(summary.calories_kcal, 349.252));
    }

    #[test]
    fn test_summarize_is_idempotent() {
        let reading = read_package("SWM", &[720.0, 1.0, 80.0, 25.0, 40.0]).unwrap();

        let first = MetricCalculator::summarize(&reading);
        let second = MetricCalculator::summarize(&reading);
        assert_eq!(first, second);
    }

    #[test]
    fn test_summary_message() {
        let reading = read_package("RUN", &[15000.0, 1.0, 75.0]).unwrap();
        let summary = MetricCalculator::summarize(&reading);

        assert_eq!(
            summary.message(),
            "Activity type: Running; Duration: 1.000 h.; Distance: 9.750 km; \
             Mean speed: 9.750 km/h; Calories burned: 797.805."
        );
    }
}
