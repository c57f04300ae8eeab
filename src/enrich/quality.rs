use crate::models::{QualityFlag, RawObservation};
use crate::utils::constants::{MAX_VALID_TEMP, MIN_VALID_TEMP};

/// Flags raw observations whose temperature reading is physically implausible.
///
/// The gate is a pure function of the record: a present temperature outside
/// the configured band is flagged EXTREME_TEMPERATURE, everything else is
/// VALID. An absent temperature is not a quality failure; it degrades to
/// UNKNOWN categories downstream instead.
pub struct QualityGate {
    min_temp: f64,
    max_temp: f64,
}

impl QualityGate {
    pub fn new() -> Self {
        Self {
            min_temp: MIN_VALID_TEMP,
            max_temp: MAX_VALID_TEMP,
        }
    }

    pub fn with_bounds(min_temp: f64, max_temp: f64) -> Self {
        Self { min_temp, max_temp }
    }

    pub fn assess(&self, observation: &RawObservation) -> QualityFlag {
        match observation.temperature {
            Some(t) if t < self.min_temp || t > self.max_temp => QualityFlag::ExtremeTemperature,
            _ => QualityFlag::Valid,
        }
    }
}

impl Default for QualityGate {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn observation_with_temp(temperature: Option<f64>) -> RawObservation {
        RawObservation {
            city_id: "1".to_string(),
            city_name: "Test City".to_string(),
            country_code: "GB".to_string(),
            latitude: Some(51.5),
            longitude: Some(-0.13),
            timestamp: NaiveDate::from_ymd_opt(2024, 1, 15)
                .unwrap()
                .and_hms_opt(9, 0, 0),
            weather_main: "Clear".to_string(),
            weather_description: "clear sky".to_string(),
            temperature,
            feels_like: None,
            temp_min: None,
            temp_max: None,
            pressure: None,
            humidity: Some(50.0),
            wind_speed: None,
            wind_deg: None,
            cloud_coverage: None,
            ingestion_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        }
    }

    #[test]
    fn test_plausible_temperature_is_valid() {
        let gate = QualityGate::new();
        assert_eq!(gate.assess(&observation_with_temp(Some(21.0))), QualityFlag::Valid);
        // Boundaries are inside the valid band
        assert_eq!(gate.assess(&observation_with_temp(Some(-50.0))), QualityFlag::Valid);
        assert_eq!(gate.assess(&observation_with_temp(Some(60.0))), QualityFlag::Valid);
    }

    #[test]
    fn test_extreme_temperature_is_flagged() {
        let gate = QualityGate::new();
        assert_eq!(
            gate.assess(&observation_with_temp(Some(-60.0))),
            QualityFlag::ExtremeTemperature
        );
        assert_eq!(
            gate.assess(&observation_with_temp(Some(60.1))),
            QualityFlag::ExtremeTemperature
        );
    }

    #[test]
    fn test_missing_temperature_is_not_a_quality_failure() {
        let gate = QualityGate::new();
        assert_eq!(gate.assess(&observation_with_temp(None)), QualityFlag::Valid);
    }

    #[test]
    fn test_custom_bounds() {
        let gate = QualityGate::with_bounds(-10.0, 40.0);
        assert_eq!(
            gate.assess(&observation_with_temp(Some(-20.0))),
            QualityFlag::ExtremeTemperature
        );
    }
}
