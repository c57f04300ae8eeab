use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::models::closed_category;
use crate::models::observation::QualityFlag;

closed_category!(
    /// Meteorological season derived from the observation month.
    Season {
        Winter => "WINTER",
        Spring => "SPRING",
        Summer => "SUMMER",
        Autumn => "AUTUMN",
    }
);

closed_category!(
    Hemisphere {
        Northern => "NORTHERN",
        Southern => "SOUTHERN",
        Equatorial => "EQUATORIAL",
        Unknown => "UNKNOWN",
    }
);

closed_category!(
    /// Latitude band, inclusive on the lower boundary (23.5 is still tropical).
    ClimateZone {
        Tropical => "TROPICAL",
        Subtropical => "SUBTROPICAL",
        Temperate => "TEMPERATE",
        Polar => "POLAR",
        Unknown => "UNKNOWN",
    }
);

closed_category!(
    TemperatureCategory {
        Freezing => "FREEZING",
        Cold => "COLD",
        Cool => "COOL",
        Warm => "WARM",
        Hot => "HOT",
        Unknown => "UNKNOWN",
    }
);

closed_category!(
    HumidityCategory {
        Dry => "DRY",
        Comfortable => "COMFORTABLE",
        Humid => "HUMID",
        VeryHumid => "VERY_HUMID",
        Unknown => "UNKNOWN",
    }
);

closed_category!(
    ComfortLevel {
        VeryComfortable => "VERY_COMFORTABLE",
        Comfortable => "COMFORTABLE",
        Moderate => "MODERATE",
        Uncomfortable => "UNCOMFORTABLE",
        VeryUncomfortable => "VERY_UNCOMFORTABLE",
        Unknown => "UNKNOWN",
    }
);

closed_category!(
    /// Severity is always defined, so there is no Unknown band.
    SeverityLevel {
        Mild => "MILD",
        Moderate => "MODERATE",
        Severe => "SEVERE",
        Extreme => "EXTREME",
    }
);

/// A raw observation that passed the quality gate, carrying every derived
/// temporal, geographic, categorical, and scored feature.
///
/// Wind speed, wind direction, and cloud coverage are zero-filled here; the
/// temporal fields are None when the source timestamp was absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedObservation {
    pub city_id: String,
    pub city_name: String,
    pub country_code: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub timestamp: Option<NaiveDateTime>,
    pub weather_main: String,
    pub weather_description: String,
    pub temperature: Option<f64>,
    pub feels_like: Option<f64>,
    pub temp_min: Option<f64>,
    pub temp_max: Option<f64>,
    pub pressure: Option<f64>,
    pub humidity: Option<f64>,
    pub wind_speed: f64,
    pub wind_deg: f64,
    pub cloud_coverage: f64,

    pub quality_flag: QualityFlag,

    pub date: Option<NaiveDate>,
    pub hour: Option<u32>,
    pub day_of_week: Option<String>,
    pub month: Option<u32>,
    pub season: Option<Season>,

    pub hemisphere: Hemisphere,
    pub climate_zone: ClimateZone,
    pub temperature_category: TemperatureCategory,
    pub humidity_category: HumidityCategory,

    pub comfort_index: Option<f64>,
    pub comfort_level: ComfortLevel,
    pub severity_score: f64,
    pub severity_level: SeverityLevel,

    pub ingestion_date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_match_warehouse_values() {
        assert_eq!(HumidityCategory::VeryHumid.as_str(), "VERY_HUMID");
        assert_eq!(ComfortLevel::VeryUncomfortable.as_str(), "VERY_UNCOMFORTABLE");
        assert_eq!(ClimateZone::Subtropical.as_str(), "SUBTROPICAL");
        assert_eq!(SeverityLevel::Extreme.to_string(), "EXTREME");
    }

    #[test]
    fn test_parse_is_inverse_of_as_str() {
        for zone in [
            ClimateZone::Tropical,
            ClimateZone::Subtropical,
            ClimateZone::Temperate,
            ClimateZone::Polar,
            ClimateZone::Unknown,
        ] {
            assert_eq!(ClimateZone::parse(zone.as_str()), Some(zone));
        }
        assert_eq!(ClimateZone::parse("EQUATORIAL"), None);
    }

    #[test]
    fn test_serde_uses_screaming_snake_case() {
        let json = serde_json::to_string(&Season::Autumn).unwrap();
        assert_eq!(json, "\"AUTUMN\"");
        let back: Season = serde_json::from_str("\"WINTER\"").unwrap();
        assert_eq!(back, Season::Winter);
    }
}
