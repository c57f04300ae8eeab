use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

use crate::models::{ClimateZone, Hemisphere, HumidityCategory, Season, TemperatureCategory};
use crate::utils::constants::{SUBTROPICAL_MAX_LAT, TEMPERATE_MAX_LAT, TROPICAL_MAX_LAT};

/// Ordered threshold table consulted with exclusive upper bounds: the first
/// entry whose bound exceeds the value wins, otherwise the top label.
///
/// Every categorical dimension goes through this one function (or its
/// inclusive sibling), so a boundary can only ever belong to one bin.
pub(crate) fn bucket<L: Copy>(value: f64, table: &[(f64, L)], top: L) -> L {
    table
        .iter()
        .find(|(upper, _)| value < *upper)
        .map(|(_, label)| *label)
        .unwrap_or(top)
}

/// Inclusive variant: bounds belong to the band below them (23.5° is still
/// tropical).
pub(crate) fn bucket_inclusive<L: Copy>(value: f64, table: &[(f64, L)], top: L) -> L {
    table
        .iter()
        .find(|(upper, _)| value <= *upper)
        .map(|(_, label)| *label)
        .unwrap_or(top)
}

const TEMPERATURE_BINS: [(f64, TemperatureCategory); 4] = [
    (0.0, TemperatureCategory::Freezing),
    (10.0, TemperatureCategory::Cold),
    (20.0, TemperatureCategory::Cool),
    (30.0, TemperatureCategory::Warm),
];

const HUMIDITY_BINS: [(f64, HumidityCategory); 3] = [
    (30.0, HumidityCategory::Dry),
    (60.0, HumidityCategory::Comfortable),
    (80.0, HumidityCategory::Humid),
];

const CLIMATE_BINS: [(f64, ClimateZone); 3] = [
    (TROPICAL_MAX_LAT, ClimateZone::Tropical),
    (SUBTROPICAL_MAX_LAT, ClimateZone::Subtropical),
    (TEMPERATE_MAX_LAT, ClimateZone::Temperate),
];

/// Temporal features of one observation. All None when the source timestamp
/// was absent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TemporalFeatures {
    pub date: Option<NaiveDate>,
    pub hour: Option<u32>,
    pub day_of_week: Option<String>,
    pub month: Option<u32>,
    pub season: Option<Season>,
}

pub fn temporal_features(timestamp: Option<NaiveDateTime>) -> TemporalFeatures {
    let Some(ts) = timestamp else {
        return TemporalFeatures::default();
    };

    TemporalFeatures {
        date: Some(ts.date()),
        hour: Some(ts.hour()),
        day_of_week: Some(ts.format("%A").to_string()),
        month: Some(ts.month()),
        season: Some(season_of_month(ts.month())),
    }
}

pub fn season_of_month(month: u32) -> Season {
    match month {
        12 | 1 | 2 => Season::Winter,
        3..=5 => Season::Spring,
        6..=8 => Season::Summer,
        _ => Season::Autumn,
    }
}

pub fn hemisphere_of(latitude: Option<f64>) -> Hemisphere {
    match latitude {
        None => Hemisphere::Unknown,
        Some(lat) if lat > 0.0 => Hemisphere::Northern,
        Some(lat) if lat < 0.0 => Hemisphere::Southern,
        Some(_) => Hemisphere::Equatorial,
    }
}

pub fn climate_zone_of(latitude: Option<f64>) -> ClimateZone {
    match latitude {
        None => ClimateZone::Unknown,
        Some(lat) => bucket_inclusive(lat.abs(), &CLIMATE_BINS, ClimateZone::Polar),
    }
}

pub fn temperature_category(temperature: Option<f64>) -> TemperatureCategory {
    match temperature {
        None => TemperatureCategory::Unknown,
        Some(t) => bucket(t, &TEMPERATURE_BINS, TemperatureCategory::Hot),
    }
}

pub fn humidity_category(humidity: Option<f64>) -> HumidityCategory {
    match humidity {
        None => HumidityCategory::Unknown,
        Some(h) => bucket(h, &HUMIDITY_BINS, HumidityCategory::VeryHumid),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_season_covers_all_months() {
        assert_eq!(season_of_month(12), Season::Winter);
        assert_eq!(season_of_month(1), Season::Winter);
        assert_eq!(season_of_month(2), Season::Winter);
        assert_eq!(season_of_month(3), Season::Spring);
        assert_eq!(season_of_month(5), Season::Spring);
        assert_eq!(season_of_month(6), Season::Summer);
        assert_eq!(season_of_month(8), Season::Summer);
        assert_eq!(season_of_month(9), Season::Autumn);
        assert_eq!(season_of_month(11), Season::Autumn);
    }

    #[test]
    fn test_hemisphere_is_total() {
        assert_eq!(hemisphere_of(Some(51.5)), Hemisphere::Northern);
        assert_eq!(hemisphere_of(Some(-33.9)), Hemisphere::Southern);
        assert_eq!(hemisphere_of(Some(0.0)), Hemisphere::Equatorial);
        assert_eq!(hemisphere_of(Some(90.0)), Hemisphere::Northern);
        assert_eq!(hemisphere_of(Some(-90.0)), Hemisphere::Southern);
        assert_eq!(hemisphere_of(None), Hemisphere::Unknown);
    }

    #[test]
    fn test_climate_zone_boundaries_are_inclusive_below() {
        assert_eq!(climate_zone_of(Some(0.0)), ClimateZone::Tropical);
        assert_eq!(climate_zone_of(Some(23.5)), ClimateZone::Tropical);
        assert_eq!(climate_zone_of(Some(23.51)), ClimateZone::Subtropical);
        assert_eq!(climate_zone_of(Some(35.0)), ClimateZone::Subtropical);
        assert_eq!(climate_zone_of(Some(55.0)), ClimateZone::Temperate);
        assert_eq!(climate_zone_of(Some(55.01)), ClimateZone::Polar);
        assert_eq!(climate_zone_of(Some(90.0)), ClimateZone::Polar);
        // Southern latitudes classify by absolute value
        assert_eq!(climate_zone_of(Some(-23.5)), ClimateZone::Tropical);
        assert_eq!(climate_zone_of(Some(-67.0)), ClimateZone::Polar);
        assert_eq!(climate_zone_of(None), ClimateZone::Unknown);
    }

    #[test]
    fn test_temperature_bins_partition_with_no_gaps() {
        assert_eq!(temperature_category(Some(-10.0)), TemperatureCategory::Freezing);
        assert_eq!(temperature_category(Some(-0.01)), TemperatureCategory::Freezing);
        assert_eq!(temperature_category(Some(0.0)), TemperatureCategory::Cold);
        assert_eq!(temperature_category(Some(9.99)), TemperatureCategory::Cold);
        assert_eq!(temperature_category(Some(10.0)), TemperatureCategory::Cool);
        assert_eq!(temperature_category(Some(20.0)), TemperatureCategory::Warm);
        assert_eq!(temperature_category(Some(29.99)), TemperatureCategory::Warm);
        assert_eq!(temperature_category(Some(30.0)), TemperatureCategory::Hot);
        assert_eq!(temperature_category(None), TemperatureCategory::Unknown);
    }

    #[test]
    fn test_humidity_bins() {
        assert_eq!(humidity_category(Some(10.0)), HumidityCategory::Dry);
        assert_eq!(humidity_category(Some(30.0)), HumidityCategory::Comfortable);
        assert_eq!(humidity_category(Some(59.9)), HumidityCategory::Comfortable);
        assert_eq!(humidity_category(Some(60.0)), HumidityCategory::Humid);
        assert_eq!(humidity_category(Some(80.0)), HumidityCategory::VeryHumid);
        assert_eq!(humidity_category(Some(100.0)), HumidityCategory::VeryHumid);
        assert_eq!(humidity_category(None), HumidityCategory::Unknown);
    }

    #[test]
    fn test_temporal_features_from_timestamp() {
        let ts = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(14, 30, 0);
        let features = temporal_features(ts);

        assert_eq!(features.date, NaiveDate::from_ymd_opt(2024, 1, 15));
        assert_eq!(features.hour, Some(14));
        assert_eq!(features.day_of_week.as_deref(), Some("Monday"));
        assert_eq!(features.month, Some(1));
        assert_eq!(features.season, Some(Season::Winter));
    }

    #[test]
    fn test_temporal_features_without_timestamp() {
        assert_eq!(temporal_features(None), TemporalFeatures::default());
    }
}
