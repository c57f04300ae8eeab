use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use tracing::{debug, warn};
use validator::Validate;

use crate::error::Result;
use crate::models::RawObservation;

/// Reads raw-observation batches from CSV extracts of the raw table.
///
/// The ingestion-date window is applied here, at the edge: the enrichment
/// core always sees the already-filtered batch. Coordinate validation is
/// advisory — an implausible value is logged, not dropped, because the
/// quality gate owns rejection.
pub struct ObservationReader {
    since: Option<NaiveDate>,
}

impl ObservationReader {
    pub fn new() -> Self {
        Self { since: None }
    }

    /// Keep only observations with ingestion_date >= since.
    pub fn with_window_since(mut self, since: NaiveDate) -> Self {
        self.since = Some(since);
        self
    }

    pub fn read_observations(&self, path: &Path) -> Result<Vec<RawObservation>> {
        let file = File::open(path)?;
        self.read_from(file)
    }

    pub fn read_from<R: Read>(&self, reader: R) -> Result<Vec<RawObservation>> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut observations = Vec::new();
        let mut outside_window = 0usize;

        for row in csv_reader.deserialize() {
            let observation: RawObservation = row?;

            if let Some(since) = self.since {
                if observation.ingestion_date < since {
                    outside_window += 1;
                    continue;
                }
            }

            if let Err(errors) = observation.validate() {
                warn!(
                    city = %observation.city_name,
                    %errors,
                    "observation has implausible coordinates or percentages"
                );
            }

            observations.push(observation);
        }

        debug!(
            read = observations.len(),
            outside_window, "raw observation batch loaded"
        );

        Ok(observations)
    }
}

impl Default for ObservationReader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "city_id,city_name,country_code,latitude,longitude,timestamp,\
                          weather_main,weather_description,temperature,feels_like,temp_min,\
                          temp_max,pressure,humidity,wind_speed,wind_deg,cloud_coverage,\
                          ingestion_date";

    #[test]
    fn test_read_batch() {
        let csv = format!(
            "{}\n\
             2643743,London,GB,51.5074,-0.1278,2024-01-15 12:00:00,Clouds,overcast clouds,\
             8.5,6.2,7.0,9.8,1012,81,4.1,250,90,2024-01-15\n\
             2147714,Sydney,AU,-33.8688,151.2093,2024-01-15 22:00:00,Clear,clear sky,\
             24.0,24.5,22.0,26.0,1018,55,6.0,120,10,2024-01-15\n",
            HEADER
        );

        let batch = ObservationReader::new().read_from(csv.as_bytes()).unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].city_name, "London");
        assert_eq!(batch[0].temperature, Some(8.5));
        assert_eq!(batch[1].latitude, Some(-33.8688));
    }

    #[test]
    fn test_window_filter() {
        let csv = format!(
            "{}\n\
             1,Old,GB,51.5,0,2024-01-01 12:00:00,Clear,clear sky,8,,,,,,,,,2024-01-01\n\
             2,New,GB,51.5,0,2024-01-15 12:00:00,Clear,clear sky,9,,,,,,,,,2024-01-15\n",
            HEADER
        );

        let reader = ObservationReader::new()
            .with_window_since(NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
        let batch = reader.read_from(csv.as_bytes()).unwrap();

        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].city_name, "New");
    }

    #[test]
    fn test_missing_numerics_read_as_none() {
        let csv = format!(
            "{}\n1,Sparse,GB,,,,,Haze,,,,,,,,,,2024-01-15\n",
            HEADER
        );

        let batch = ObservationReader::new().read_from(csv.as_bytes()).unwrap();
        assert_eq!(batch.len(), 1);
        let obs = &batch[0];
        assert_eq!(obs.latitude, None);
        assert_eq!(obs.timestamp, None);
        assert_eq!(obs.temperature, None);
        assert_eq!(obs.humidity, None);
    }
}
