use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::closed_category;
use crate::models::enriched::{ClimateZone, Hemisphere};

closed_category!(
    /// Day-level verdict on how much the temperature moved.
    TemperatureStability {
        Stable => "STABLE",
        Moderate => "MODERATE",
        Variable => "VARIABLE",
        Unknown => "UNKNOWN",
    }
);

closed_category!(
    /// Day-level comfort verdict from the mean comfort index.
    ComfortCategory {
        Comfortable => "COMFORTABLE",
        Moderate => "MODERATE",
        Uncomfortable => "UNCOMFORTABLE",
        Unknown => "UNKNOWN",
    }
);

/// Statistical rollup of one city's enriched observations for one date.
///
/// Recomputed in full on every aggregation pass; never updated incrementally.
/// Climate zone and hemisphere are constant per city and travel as part of the
/// grouping key rather than being recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub city_id: String,
    pub city_name: String,
    pub country_code: String,
    pub date: NaiveDate,
    pub climate_zone: ClimateZone,
    pub hemisphere: Hemisphere,

    /// Number of enriched observations in the group, independent of which
    /// metrics were present on each.
    pub hourly_readings: u32,

    pub avg_temperature: Option<f64>,
    pub min_temperature: Option<f64>,
    pub max_temperature: Option<f64>,
    /// Sample standard deviation; None for a single reading.
    pub temperature_variability: Option<f64>,

    pub avg_humidity: Option<f64>,
    pub min_humidity: Option<f64>,
    pub max_humidity: Option<f64>,

    pub avg_wind_speed: f64,
    pub max_wind_speed: f64,

    pub avg_pressure: Option<f64>,

    /// Mean comfort index over readings where it was defined.
    pub avg_comfort_index: Option<f64>,

    /// Most frequent condition text; ties break to the condition seen first
    /// in group order.
    pub dominant_weather: String,
    pub weather_changes_count: u32,

    pub daily_temp_range: Option<f64>,
    pub temperature_stability: TemperatureStability,
    pub comfort_category: ComfortCategory,
}

impl DailySummary {
    /// Daily range must agree with the min/max pair it was derived from.
    pub fn validate_range(&self) -> bool {
        match (self.min_temperature, self.max_temperature, self.daily_temp_range) {
            (Some(min), Some(max), Some(range)) => {
                (range - (max - min)).abs() < f64::EPSILON && range >= 0.0
            }
            (None, None, None) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stability_labels() {
        assert_eq!(
            TemperatureStability::parse("STABLE"),
            Some(TemperatureStability::Stable)
        );
        assert_eq!(TemperatureStability::Variable.as_str(), "VARIABLE");
        assert_eq!(TemperatureStability::parse("WILD"), None);
    }

    #[test]
    fn test_comfort_category_labels() {
        assert_eq!(
            ComfortCategory::parse("UNCOMFORTABLE"),
            Some(ComfortCategory::Uncomfortable)
        );
        assert_eq!(ComfortCategory::Unknown.as_str(), "UNKNOWN");
    }
}
