use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::enrich::features::bucket;
use crate::error::Result;
use crate::models::{
    ClimateZone, ComfortCategory, DailySummary, EnrichedObservation, Hemisphere,
    TemperatureStability,
};
use crate::report::{AggregationReport, RunStatus};
use crate::utils::stats;

const STABILITY_BINS: [(f64, TemperatureStability); 2] = [
    (2.0, TemperatureStability::Stable),
    (5.0, TemperatureStability::Moderate),
];

const DAILY_COMFORT_BINS: [(f64, ComfortCategory); 2] = [
    (50.0, ComfortCategory::Uncomfortable),
    (70.0, ComfortCategory::Moderate),
];

/// Grouping key for one city-day. Climate zone and hemisphere are constant
/// per city; carrying them in the key passes them through to the summary
/// without recomputation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct GroupKey {
    city_id: String,
    city_name: String,
    country_code: String,
    date: NaiveDate,
    climate_zone: ClimateZone,
    hemisphere: Hemisphere,
}

/// Result of one aggregation pass: the daily summaries plus their counts.
#[derive(Debug, Clone)]
pub struct AggregationPass {
    pub summaries: Vec<DailySummary>,
    pub report: AggregationReport,
}

/// Rolls an enriched batch into one summary per (city, date) group.
///
/// The whole group must be materialized before any statistic is emitted, so
/// this is a full-batch barrier rather than a streaming fold. Summaries are
/// recomputed from scratch on every pass.
pub struct DailyAggregator;

impl DailyAggregator {
    pub fn new() -> Self {
        Self
    }

    /// Aggregate an enriched batch into daily summaries.
    ///
    /// An empty batch is reported as WARNING with zero counts, mirroring the
    /// enrichment pass. Records without a derived date cannot be keyed to a
    /// day and are skipped with a warning.
    pub fn aggregate(&self, batch: &[EnrichedObservation]) -> Result<AggregationPass> {
        if batch.is_empty() {
            warn!("no enriched observations in batch, nothing to aggregate");
            return Ok(AggregationPass {
                summaries: Vec::new(),
                report: AggregationReport::empty(),
            });
        }

        let mut groups: HashMap<GroupKey, Vec<&EnrichedObservation>> = HashMap::new();
        let mut skipped_undated = 0usize;

        for record in batch {
            let Some(date) = record.date else {
                skipped_undated += 1;
                continue;
            };
            let key = GroupKey {
                city_id: record.city_id.clone(),
                city_name: record.city_name.clone(),
                country_code: record.country_code.clone(),
                date,
                climate_zone: record.climate_zone,
                hemisphere: record.hemisphere,
            };
            groups.entry(key).or_default().push(record);
        }

        if skipped_undated > 0 {
            warn!(skipped_undated, "records without a timestamp were excluded from daily grouping");
        }

        let mut summaries: Vec<DailySummary> = groups
            .into_iter()
            .map(|(key, members)| self.summarize_group(key, &members))
            .collect();

        summaries.sort_by(|a, b| {
            a.city_id
                .cmp(&b.city_id)
                .then_with(|| a.date.cmp(&b.date))
        });

        info!(
            input = batch.len(),
            groups = summaries.len(),
            skipped_undated,
            "aggregation pass complete"
        );

        Ok(AggregationPass {
            report: AggregationReport {
                status: RunStatus::Success,
                input: batch.len(),
                groups: summaries.len(),
                skipped_undated,
            },
            summaries,
        })
    }

    fn summarize_group(&self, key: GroupKey, members: &[&EnrichedObservation]) -> DailySummary {
        let temperatures: Vec<f64> = members.iter().filter_map(|r| r.temperature).collect();
        let humidities: Vec<f64> = members.iter().filter_map(|r| r.humidity).collect();
        let pressures: Vec<f64> = members.iter().filter_map(|r| r.pressure).collect();
        let comfort: Vec<f64> = members.iter().filter_map(|r| r.comfort_index).collect();
        let winds: Vec<f64> = members.iter().map(|r| r.wind_speed).collect();

        let min_temperature = stats::min(&temperatures);
        let max_temperature = stats::max(&temperatures);
        let temperature_variability = stats::sample_std_dev(&temperatures);
        let avg_comfort_index = stats::mean(&comfort);

        let (dominant_weather, weather_changes_count) = dominant_condition(members);

        DailySummary {
            city_id: key.city_id,
            city_name: key.city_name,
            country_code: key.country_code,
            date: key.date,
            climate_zone: key.climate_zone,
            hemisphere: key.hemisphere,
            hourly_readings: members.len() as u32,
            avg_temperature: stats::mean(&temperatures),
            min_temperature,
            max_temperature,
            temperature_variability,
            avg_humidity: stats::mean(&humidities),
            min_humidity: stats::min(&humidities),
            max_humidity: stats::max(&humidities),
            // Wind is zero-filled upstream, and a group is never empty
            avg_wind_speed: stats::mean(&winds).unwrap_or(0.0),
            max_wind_speed: stats::max(&winds).unwrap_or(0.0),
            avg_pressure: stats::mean(&pressures),
            avg_comfort_index,
            dominant_weather,
            weather_changes_count,
            daily_temp_range: match (min_temperature, max_temperature) {
                (Some(min), Some(max)) => Some(max - min),
                _ => None,
            },
            temperature_stability: match temperature_variability {
                None => TemperatureStability::Unknown,
                Some(v) => bucket(v, &STABILITY_BINS, TemperatureStability::Variable),
            },
            comfort_category: match avg_comfort_index {
                None => ComfortCategory::Unknown,
                Some(c) => bucket(c, &DAILY_COMFORT_BINS, ComfortCategory::Comfortable),
            },
        }
    }
}

impl Default for DailyAggregator {
    fn default() -> Self {
        Self::new()
    }
}

/// Most frequent condition text and the number of distinct conditions seen.
/// Frequency ties break to whichever condition appeared first in group order.
fn dominant_condition(members: &[&EnrichedObservation]) -> (String, u32) {
    let mut tally: HashMap<&str, (usize, usize)> = HashMap::new();

    for (position, record) in members.iter().enumerate() {
        let entry = tally
            .entry(record.weather_main.as_str())
            .or_insert((0, position));
        entry.0 += 1;
    }

    let dominant = tally
        .iter()
        .max_by(|a, b| a.1 .0.cmp(&b.1 .0).then(b.1 .1.cmp(&a.1 .1)))
        .map(|(condition, _)| condition.to_string())
        .unwrap_or_else(|| "UNKNOWN".to_string());

    (dominant, tally.len() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrich::Enricher;
    use crate::models::RawObservation;
    use chrono::NaiveDateTime;

    fn enriched(
        city: &str,
        ts: &str,
        temperature: Option<f64>,
        condition: &str,
    ) -> EnrichedObservation {
        let timestamp = NaiveDateTime::parse_from_str(ts, "%Y-%m-%d %H:%M:%S").ok();
        let raw = RawObservation {
            city_id: city.to_string(),
            city_name: format!("City {}", city),
            country_code: "GB".to_string(),
            latitude: Some(51.5),
            longitude: Some(-0.13),
            timestamp,
            weather_main: condition.to_string(),
            weather_description: condition.to_lowercase(),
            temperature,
            feels_like: None,
            temp_min: None,
            temp_max: None,
            pressure: Some(1010.0),
            humidity: Some(60.0),
            wind_speed: Some(4.0),
            wind_deg: Some(180.0),
            cloud_coverage: Some(75.0),
            ingestion_date: NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
        };
        Enricher::new().enrich_record(&raw).unwrap()
    }

    #[test]
    fn test_two_readings_roll_into_one_summary() {
        let batch = vec![
            enriched("1", "2024-06-10 06:00:00", Some(10.0), "Clouds"),
            enriched("1", "2024-06-10 14:00:00", Some(20.0), "Clear"),
        ];

        let pass = DailyAggregator::new().aggregate(&batch).unwrap();
        assert_eq!(pass.report.status, RunStatus::Success);
        assert_eq!(pass.report.groups, 1);

        let summary = &pass.summaries[0];
        assert_eq!(summary.hourly_readings, 2);
        assert_eq!(summary.avg_temperature, Some(15.0));
        assert_eq!(summary.min_temperature, Some(10.0));
        assert_eq!(summary.max_temperature, Some(20.0));
        assert_eq!(summary.daily_temp_range, Some(10.0));
        assert!(summary.validate_range());
        assert_eq!(summary.weather_changes_count, 2);
        // Tie on frequency: first encountered wins
        assert_eq!(summary.dominant_weather, "Clouds");
    }

    #[test]
    fn test_group_counts_sum_to_batch_size() {
        let batch = vec![
            enriched("1", "2024-06-10 06:00:00", Some(12.0), "Rain"),
            enriched("1", "2024-06-10 09:00:00", Some(13.0), "Rain"),
            enriched("1", "2024-06-11 06:00:00", Some(14.0), "Clear"),
            enriched("2", "2024-06-10 06:00:00", Some(22.0), "Clear"),
            enriched("2", "2024-06-10 18:00:00", Some(18.0), "Clouds"),
        ];

        let pass = DailyAggregator::new().aggregate(&batch).unwrap();
        assert_eq!(pass.report.groups, 3);

        let total: u32 = pass.summaries.iter().map(|s| s.hourly_readings).sum();
        assert_eq!(total as usize, batch.len());

        // Deterministic output order: (city_id, date)
        let keys: Vec<(String, NaiveDate)> = pass
            .summaries
            .iter()
            .map(|s| (s.city_id.clone(), s.date))
            .collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }

    #[test]
    fn test_single_reading_has_unknown_stability() {
        let batch = vec![enriched("1", "2024-06-10 06:00:00", Some(12.0), "Rain")];
        let pass = DailyAggregator::new().aggregate(&batch).unwrap();

        let summary = &pass.summaries[0];
        assert_eq!(summary.temperature_variability, None);
        assert_eq!(summary.temperature_stability, TemperatureStability::Unknown);
        assert_eq!(summary.daily_temp_range, Some(0.0));
    }

    #[test]
    fn test_stability_bins() {
        // Variability sqrt(0.5) < 2 over readings 12/13
        let stable = vec![
            enriched("1", "2024-06-10 06:00:00", Some(12.0), "Rain"),
            enriched("1", "2024-06-10 12:00:00", Some(13.0), "Rain"),
        ];
        let pass = DailyAggregator::new().aggregate(&stable).unwrap();
        assert_eq!(
            pass.summaries[0].temperature_stability,
            TemperatureStability::Stable
        );

        // Variability sqrt(112.5) > 5 over readings 5/20
        let swingy = vec![
            enriched("1", "2024-06-10 06:00:00", Some(5.0), "Rain"),
            enriched("1", "2024-06-10 12:00:00", Some(20.0), "Clear"),
        ];
        let pass = DailyAggregator::new().aggregate(&swingy).unwrap();
        assert_eq!(
            pass.summaries[0].temperature_stability,
            TemperatureStability::Variable
        );
    }

    #[test]
    fn test_comfort_category_from_mean_comfort() {
        // 21C / 60% humidity / 4 m/s wind: comfort 95 -> COMFORTABLE day
        let comfy = vec![
            enriched("1", "2024-06-10 06:00:00", Some(21.0), "Clear"),
            enriched("1", "2024-06-10 12:00:00", Some(21.0), "Clear"),
        ];
        let pass = DailyAggregator::new().aggregate(&comfy).unwrap();
        assert_eq!(pass.summaries[0].comfort_category, ComfortCategory::Comfortable);

        // Missing temperature everywhere: comfort undefined for the whole day
        let unknown = vec![enriched("1", "2024-06-10 06:00:00", None, "Clear")];
        let pass = DailyAggregator::new().aggregate(&unknown).unwrap();
        assert_eq!(pass.summaries[0].avg_comfort_index, None);
        assert_eq!(pass.summaries[0].comfort_category, ComfortCategory::Unknown);
    }

    #[test]
    fn test_empty_batch_is_a_warning() {
        let pass = DailyAggregator::new().aggregate(&[]).unwrap();
        assert_eq!(pass.report, AggregationReport::empty());
        assert!(pass.summaries.is_empty());
    }

    #[test]
    fn test_undated_records_are_skipped_with_count() {
        let mut undated = enriched("1", "2024-06-10 06:00:00", Some(12.0), "Rain");
        undated.timestamp = None;
        undated.date = None;
        let dated = enriched("1", "2024-06-10 12:00:00", Some(14.0), "Rain");

        let pass = DailyAggregator::new().aggregate(&[undated, dated]).unwrap();
        assert_eq!(pass.report.skipped_undated, 1);
        assert_eq!(pass.report.groups, 1);
        assert_eq!(pass.summaries[0].hourly_readings, 1);
    }
}
