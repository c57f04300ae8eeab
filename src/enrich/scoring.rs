use crate::models::{ComfortLevel, SeverityLevel};
use crate::utils::constants::*;

use super::features::bucket;

const COMFORT_BINS: [(f64, ComfortLevel); 4] = [
    (20.0, ComfortLevel::VeryUncomfortable),
    (40.0, ComfortLevel::Uncomfortable),
    (60.0, ComfortLevel::Moderate),
    (80.0, ComfortLevel::Comfortable),
];

const SEVERITY_BINS: [(f64, SeverityLevel); 3] = [
    (0.2, SeverityLevel::Mild),
    (0.4, SeverityLevel::Moderate),
    (0.6, SeverityLevel::Severe),
];

/// Thermal comfort on a [0, 100] scale, anchored at 21 °C / 50 % humidity /
/// 5 m/s wind. Undefined when temperature or humidity is absent; a missing
/// wind reading contributes as zero.
pub fn comfort_index(
    temperature: Option<f64>,
    humidity: Option<f64>,
    wind_speed: Option<f64>,
) -> Option<f64> {
    let temp = temperature?;
    let humidity = humidity?;
    let wind = wind_speed.unwrap_or(0.0);

    let temp_score = (100.0 - (temp - IDEAL_TEMPERATURE).abs() * COMFORT_TEMP_PENALTY).max(0.0);
    let humidity_penalty = (humidity - IDEAL_HUMIDITY).abs() * COMFORT_HUMIDITY_PENALTY;
    let wind_penalty = (wind - IDEAL_WIND_SPEED).abs() * COMFORT_WIND_PENALTY;

    Some((temp_score - humidity_penalty - wind_penalty).clamp(0.0, 100.0))
}

pub fn comfort_level(index: Option<f64>) -> ComfortLevel {
    match index {
        None => ComfortLevel::Unknown,
        Some(value) => bucket(value, &COMFORT_BINS, ComfortLevel::VeryComfortable),
    }
}

/// Weighted deviation-from-benign score, non-negative and unbounded above.
/// Always defined: an absent temperature or humidity contributes zero
/// deviation, absent wind and cloud coverage enter as zero readings.
pub fn severity_score(
    temperature: Option<f64>,
    humidity: Option<f64>,
    wind_speed: Option<f64>,
    cloud_coverage: Option<f64>,
) -> f64 {
    let temp_term = temperature
        .map(|t| (t - IDEAL_TEMPERATURE).abs() / SEVERITY_TEMP_SCALE)
        .unwrap_or(0.0);
    let wind_term = (wind_speed.unwrap_or(0.0) - IDEAL_WIND_SPEED).abs() / SEVERITY_WIND_SCALE;
    let humidity_term = humidity
        .map(|h| (h - IDEAL_HUMIDITY).abs() / SEVERITY_HUMIDITY_SCALE)
        .unwrap_or(0.0);
    let cloud_term = (100.0 - cloud_coverage.unwrap_or(0.0)) / SEVERITY_CLOUD_SCALE;

    SEVERITY_TEMP_WEIGHT * temp_term
        + SEVERITY_WIND_WEIGHT * wind_term
        + SEVERITY_HUMIDITY_WEIGHT * humidity_term
        + SEVERITY_CLOUD_WEIGHT * cloud_term
}

pub fn severity_level(score: f64) -> SeverityLevel {
    bucket(score, &SEVERITY_BINS, SeverityLevel::Extreme)
}
