use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Verdict on whether a raw observation is usable downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QualityFlag {
    Valid,
    ExtremeTemperature,
}

impl QualityFlag {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "VALID" => Some(QualityFlag::Valid),
            "EXTREME_TEMPERATURE" => Some(QualityFlag::ExtremeTemperature),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QualityFlag::Valid => "VALID",
            QualityFlag::ExtremeTemperature => "EXTREME_TEMPERATURE",
        }
    }

    pub fn is_usable(&self) -> bool {
        matches!(self, QualityFlag::Valid)
    }
}

/// One raw per-city observation as delivered by the acquisition layer.
///
/// Timestamp, temperature, and humidity are genuinely nullable; the other
/// numeric fields are nullable at the edge and zero-filled downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct RawObservation {
    pub city_id: String,
    pub city_name: String,
    pub country_code: String,

    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,

    #[serde(with = "timestamp_format")]
    pub timestamp: Option<NaiveDateTime>,

    pub weather_main: String,
    pub weather_description: String,

    pub temperature: Option<f64>,
    pub feels_like: Option<f64>,
    pub temp_min: Option<f64>,
    pub temp_max: Option<f64>,
    pub pressure: Option<f64>,

    #[validate(range(min = 0.0, max = 100.0))]
    pub humidity: Option<f64>,

    pub wind_speed: Option<f64>,
    pub wind_deg: Option<f64>,

    #[validate(range(min = 0.0, max = 100.0))]
    pub cloud_coverage: Option<f64>,

    pub ingestion_date: NaiveDate,
}

impl RawObservation {
    pub fn wind_speed_or_zero(&self) -> f64 {
        self.wind_speed.unwrap_or(0.0)
    }

    pub fn wind_deg_or_zero(&self) -> f64 {
        self.wind_deg.unwrap_or(0.0)
    }

    pub fn cloud_coverage_or_zero(&self) -> f64 {
        self.cloud_coverage.unwrap_or(0.0)
    }
}

/// Timestamps arrive as naive warehouse timestamps ("2024-01-15 12:00:00") or
/// ISO-8601; unparseable values coerce to None rather than failing the batch.
mod timestamp_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const WRITE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
    const READ_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

    pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(ts) => serializer.serialize_str(&ts.format(WRITE_FORMAT).to_string()),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        let Some(raw) = raw else {
            return Ok(None);
        };
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }

        Ok(READ_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok()))
    }
}
