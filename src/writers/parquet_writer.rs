use crate::error::{RefineryError, Result};
use crate::models::{
    ClimateZone, ComfortCategory, ComfortLevel, DailySummary, EnrichedObservation, Hemisphere,
    HumidityCategory, QualityFlag, Season, SeverityLevel, TemperatureCategory,
    TemperatureStability,
};
use crate::utils::constants::DEFAULT_ROW_GROUP_SIZE;
use arrow::array::*;
use arrow::datatypes::{DataType, Field, Schema, TimeUnit};
use arrow::record_batch::RecordBatch;
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ArrowWriter;
use parquet::basic::{Compression, GzipLevel};
use parquet::file::properties::WriterProperties;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

/// Append-side persistence collaborator: whole-batch Parquet files for
/// enriched observations and daily summaries.
///
/// Each pass writes one complete file; nothing is merged into an existing
/// file, so re-running a window produces a new artifact rather than
/// duplicated rows inside one table.
pub struct ParquetWriter {
    compression: Compression,
    row_group_size: usize,
}

impl ParquetWriter {
    pub fn new() -> Self {
        Self {
            compression: Compression::SNAPPY,
            row_group_size: DEFAULT_ROW_GROUP_SIZE,
        }
    }

    pub fn with_compression(mut self, compression: &str) -> Result<Self> {
        self.compression = match compression.to_lowercase().as_str() {
            "snappy" => Compression::SNAPPY,
            "gzip" => Compression::GZIP(GzipLevel::default()),
            "lz4" => Compression::LZ4,
            "zstd" => Compression::ZSTD(parquet::basic::ZstdLevel::default()),
            "none" => Compression::UNCOMPRESSED,
            _ => {
                return Err(RefineryError::Config(format!(
                    "Unsupported compression: {}",
                    compression
                )))
            }
        };
        Ok(self)
    }

    pub fn with_row_group_size(mut self, size: usize) -> Self {
        self.row_group_size = size;
        self
    }

    /// Write enriched observations to a Parquet file.
    pub fn write_enriched(&self, records: &[EnrichedObservation], path: &Path) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }

        let schema = enriched_schema();
        let batch = enriched_to_batch(records, schema.clone())?;
        self.write_batch(batch, schema, path)
    }

    /// Write daily summaries to a Parquet file.
    pub fn write_summaries(&self, summaries: &[DailySummary], path: &Path) -> Result<()> {
        if summaries.is_empty() {
            return Ok(());
        }

        let schema = summary_schema();
        let batch = summaries_to_batch(summaries, schema.clone())?;
        self.write_batch(batch, schema, path)
    }

    fn write_batch(&self, batch: RecordBatch, schema: Arc<Schema>, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        let props = WriterProperties::builder()
            .set_compression(self.compression)
            .set_max_row_group_size(self.row_group_size)
            .build();

        let mut writer = ArrowWriter::try_new(file, schema, Some(props))?;
        writer.write(&batch)?;
        writer.close()?;
        Ok(())
    }

    /// Read enriched observations back; limit 0 reads every record.
    pub fn read_enriched(&self, path: &Path, limit: usize) -> Result<Vec<EnrichedObservation>> {
        let file = File::open(path)?;
        let reader = ParquetRecordBatchReaderBuilder::try_new(file)?
            .with_batch_size(8192)
            .build()?;

        let mut records = Vec::new();
        for batch_result in reader {
            let batch = batch_result?;
            batch_to_enriched(&batch, &mut records)?;
            if limit > 0 && records.len() >= limit {
                records.truncate(limit);
                break;
            }
        }

        Ok(records)
    }

    /// Read daily summaries back; limit 0 reads every record.
    pub fn read_summaries(&self, path: &Path, limit: usize) -> Result<Vec<DailySummary>> {
        let file = File::open(path)?;
        let reader = ParquetRecordBatchReaderBuilder::try_new(file)?
            .with_batch_size(8192)
            .build()?;

        let mut summaries = Vec::new();
        for batch_result in reader {
            let batch = batch_result?;
            batch_to_summaries(&batch, &mut summaries)?;
            if limit > 0 && summaries.len() >= limit {
                summaries.truncate(limit);
                break;
            }
        }

        Ok(summaries)
    }

    pub fn get_file_info(&self, path: &Path) -> Result<ParquetFileInfo> {
        use parquet::file::reader::{FileReader, SerializedFileReader};

        let file = File::open(path)?;
        let reader = SerializedFileReader::new(file)?;
        let metadata = reader.metadata();

        let total_rows = metadata.file_metadata().num_rows();
        let row_groups = metadata.num_row_groups();
        let file_size = std::fs::metadata(path)?.len();

        Ok(ParquetFileInfo {
            total_rows,
            row_groups: row_groups as i32,
            file_size,
            compression: self.compression,
        })
    }
}

impl Default for ParquetWriter {
    fn default() -> Self {
        Self::new()
    }
}

pub struct ParquetFileInfo {
    pub total_rows: i64,
    pub row_groups: i32,
    pub file_size: u64,
    pub compression: Compression,
}

impl ParquetFileInfo {
    pub fn summary(&self) -> String {
        format!(
            "Parquet File Summary:\n\
            - Total rows: {}\n\
            - Row groups: {}\n\
            - File size: {:.2} MB\n\
            - Compression: {:?}",
            self.total_rows,
            self.row_groups,
            self.file_size as f64 / 1_048_576.0, // Convert to MB
            self.compression,
        )
    }
}

fn enriched_schema() -> Arc<Schema> {
    let fields = vec![
        Field::new("city_id", DataType::Utf8, false),
        Field::new("city_name", DataType::Utf8, false),
        Field::new("country_code", DataType::Utf8, false),
        Field::new("latitude", DataType::Float64, true),
        Field::new("longitude", DataType::Float64, true),
        Field::new("timestamp", DataType::Timestamp(TimeUnit::Second, None), true),
        Field::new("weather_main", DataType::Utf8, false),
        Field::new("weather_description", DataType::Utf8, false),
        Field::new("temperature", DataType::Float64, true),
        Field::new("feels_like", DataType::Float64, true),
        Field::new("temp_min", DataType::Float64, true),
        Field::new("temp_max", DataType::Float64, true),
        Field::new("pressure", DataType::Float64, true),
        Field::new("humidity", DataType::Float64, true),
        Field::new("wind_speed", DataType::Float64, false),
        Field::new("wind_deg", DataType::Float64, false),
        Field::new("cloud_coverage", DataType::Float64, false),
        Field::new("quality_flag", DataType::Utf8, false),
        Field::new("date", DataType::Date32, true),
        Field::new("hour", DataType::UInt32, true),
        Field::new("day_of_week", DataType::Utf8, true),
        Field::new("month", DataType::UInt32, true),
        Field::new("season", DataType::Utf8, true),
        Field::new("hemisphere", DataType::Utf8, false),
        Field::new("climate_zone", DataType::Utf8, false),
        Field::new("temperature_category", DataType::Utf8, false),
        Field::new("humidity_category", DataType::Utf8, false),
        Field::new("comfort_index", DataType::Float64, true),
        Field::new("comfort_level", DataType::Utf8, false),
        Field::new("severity_score", DataType::Float64, false),
        Field::new("severity_level", DataType::Utf8, false),
        Field::new("ingestion_date", DataType::Date32, false),
    ];

    Arc::new(Schema::new(fields))
}

fn summary_schema() -> Arc<Schema> {
    let fields = vec![
        Field::new("city_id", DataType::Utf8, false),
        Field::new("city_name", DataType::Utf8, false),
        Field::new("country_code", DataType::Utf8, false),
        Field::new("date", DataType::Date32, false),
        Field::new("climate_zone", DataType::Utf8, false),
        Field::new("hemisphere", DataType::Utf8, false),
        Field::new("hourly_readings", DataType::UInt32, false),
        Field::new("avg_temperature", DataType::Float64, true),
        Field::new("min_temperature", DataType::Float64, true),
        Field::new("max_temperature", DataType::Float64, true),
        Field::new("temperature_variability", DataType::Float64, true),
        Field::new("avg_humidity", DataType::Float64, true),
        Field::new("min_humidity", DataType::Float64, true),
        Field::new("max_humidity", DataType::Float64, true),
        Field::new("avg_wind_speed", DataType::Float64, false),
        Field::new("max_wind_speed", DataType::Float64, false),
        Field::new("avg_pressure", DataType::Float64, true),
        Field::new("avg_comfort_index", DataType::Float64, true),
        Field::new("dominant_weather", DataType::Utf8, false),
        Field::new("weather_changes_count", DataType::UInt32, false),
        Field::new("daily_temp_range", DataType::Float64, true),
        Field::new("temperature_stability", DataType::Utf8, false),
        Field::new("comfort_category", DataType::Utf8, false),
    ];

    Arc::new(Schema::new(fields))
}

fn date_to_days(date: NaiveDate) -> i32 {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).expect("epoch is a valid date");
    (date - epoch).num_days() as i32
}

fn days_to_date(days: i32) -> Result<NaiveDate> {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).expect("epoch is a valid date");
    epoch
        .checked_add_signed(Duration::days(days as i64))
        .ok_or_else(|| RefineryError::InvalidFormat(format!("date out of range: {} days", days)))
}

fn timestamp_to_secs(ts: NaiveDateTime) -> i64 {
    ts.and_utc().timestamp()
}

fn secs_to_timestamp(secs: i64) -> Result<NaiveDateTime> {
    DateTime::from_timestamp(secs, 0)
        .map(|dt| dt.naive_utc())
        .ok_or_else(|| RefineryError::InvalidFormat(format!("timestamp out of range: {}", secs)))
}

fn enriched_to_batch(
    records: &[EnrichedObservation],
    schema: Arc<Schema>,
) -> Result<RecordBatch> {
    let city_ids: Vec<&str> = records.iter().map(|r| r.city_id.as_str()).collect();
    let city_names: Vec<&str> = records.iter().map(|r| r.city_name.as_str()).collect();
    let countries: Vec<&str> = records.iter().map(|r| r.country_code.as_str()).collect();
    let latitudes: Vec<Option<f64>> = records.iter().map(|r| r.latitude).collect();
    let longitudes: Vec<Option<f64>> = records.iter().map(|r| r.longitude).collect();
    let timestamps: Vec<Option<i64>> = records
        .iter()
        .map(|r| r.timestamp.map(timestamp_to_secs))
        .collect();
    let conditions: Vec<&str> = records.iter().map(|r| r.weather_main.as_str()).collect();
    let descriptions: Vec<&str> = records
        .iter()
        .map(|r| r.weather_description.as_str())
        .collect();
    let temperatures: Vec<Option<f64>> = records.iter().map(|r| r.temperature).collect();
    let feels_like: Vec<Option<f64>> = records.iter().map(|r| r.feels_like).collect();
    let temp_mins: Vec<Option<f64>> = records.iter().map(|r| r.temp_min).collect();
    let temp_maxs: Vec<Option<f64>> = records.iter().map(|r| r.temp_max).collect();
    let pressures: Vec<Option<f64>> = records.iter().map(|r| r.pressure).collect();
    let humidities: Vec<Option<f64>> = records.iter().map(|r| r.humidity).collect();
    let wind_speeds: Vec<f64> = records.iter().map(|r| r.wind_speed).collect();
    let wind_degs: Vec<f64> = records.iter().map(|r| r.wind_deg).collect();
    let clouds: Vec<f64> = records.iter().map(|r| r.cloud_coverage).collect();
    let quality_flags: Vec<&str> = records.iter().map(|r| r.quality_flag.as_str()).collect();
    let dates: Vec<Option<i32>> = records.iter().map(|r| r.date.map(date_to_days)).collect();
    let hours: Vec<Option<u32>> = records.iter().map(|r| r.hour).collect();
    let days_of_week: Vec<Option<&str>> = records
        .iter()
        .map(|r| r.day_of_week.as_deref())
        .collect();
    let months: Vec<Option<u32>> = records.iter().map(|r| r.month).collect();
    let seasons: Vec<Option<&str>> = records
        .iter()
        .map(|r| r.season.map(|s| s.as_str()))
        .collect();
    let hemispheres: Vec<&str> = records.iter().map(|r| r.hemisphere.as_str()).collect();
    let zones: Vec<&str> = records.iter().map(|r| r.climate_zone.as_str()).collect();
    let temp_categories: Vec<&str> = records
        .iter()
        .map(|r| r.temperature_category.as_str())
        .collect();
    let humidity_categories: Vec<&str> = records
        .iter()
        .map(|r| r.humidity_category.as_str())
        .collect();
    let comfort_indices: Vec<Option<f64>> = records.iter().map(|r| r.comfort_index).collect();
    let comfort_levels: Vec<&str> = records.iter().map(|r| r.comfort_level.as_str()).collect();
    let severity_scores: Vec<f64> = records.iter().map(|r| r.severity_score).collect();
    let severity_levels: Vec<&str> = records
        .iter()
        .map(|r| r.severity_level.as_str())
        .collect();
    let ingestion_dates: Vec<i32> = records
        .iter()
        .map(|r| date_to_days(r.ingestion_date))
        .collect();

    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(city_ids)),
        Arc::new(StringArray::from(city_names)),
        Arc::new(StringArray::from(countries)),
        Arc::new(Float64Array::from(latitudes)),
        Arc::new(Float64Array::from(longitudes)),
        Arc::new(TimestampSecondArray::from(timestamps)),
        Arc::new(StringArray::from(conditions)),
        Arc::new(StringArray::from(descriptions)),
        Arc::new(Float64Array::from(temperatures)),
        Arc::new(Float64Array::from(feels_like)),
        Arc::new(Float64Array::from(temp_mins)),
        Arc::new(Float64Array::from(temp_maxs)),
        Arc::new(Float64Array::from(pressures)),
        Arc::new(Float64Array::from(humidities)),
        Arc::new(Float64Array::from(wind_speeds)),
        Arc::new(Float64Array::from(wind_degs)),
        Arc::new(Float64Array::from(clouds)),
        Arc::new(StringArray::from(quality_flags)),
        Arc::new(Date32Array::from(dates)),
        Arc::new(UInt32Array::from(hours)),
        Arc::new(StringArray::from(days_of_week)),
        Arc::new(UInt32Array::from(months)),
        Arc::new(StringArray::from(seasons)),
        Arc::new(StringArray::from(hemispheres)),
        Arc::new(StringArray::from(zones)),
        Arc::new(StringArray::from(temp_categories)),
        Arc::new(StringArray::from(humidity_categories)),
        Arc::new(Float64Array::from(comfort_indices)),
        Arc::new(StringArray::from(comfort_levels)),
        Arc::new(Float64Array::from(severity_scores)),
        Arc::new(StringArray::from(severity_levels)),
        Arc::new(Date32Array::from(ingestion_dates)),
    ];

    Ok(RecordBatch::try_new(schema, columns)?)
}

fn summaries_to_batch(summaries: &[DailySummary], schema: Arc<Schema>) -> Result<RecordBatch> {
    let city_ids: Vec<&str> = summaries.iter().map(|s| s.city_id.as_str()).collect();
    let city_names: Vec<&str> = summaries.iter().map(|s| s.city_name.as_str()).collect();
    let countries: Vec<&str> = summaries.iter().map(|s| s.country_code.as_str()).collect();
    let dates: Vec<i32> = summaries.iter().map(|s| date_to_days(s.date)).collect();
    let zones: Vec<&str> = summaries.iter().map(|s| s.climate_zone.as_str()).collect();
    let hemispheres: Vec<&str> = summaries.iter().map(|s| s.hemisphere.as_str()).collect();
    let readings: Vec<u32> = summaries.iter().map(|s| s.hourly_readings).collect();
    let avg_temps: Vec<Option<f64>> = summaries.iter().map(|s| s.avg_temperature).collect();
    let min_temps: Vec<Option<f64>> = summaries.iter().map(|s| s.min_temperature).collect();
    let max_temps: Vec<Option<f64>> = summaries.iter().map(|s| s.max_temperature).collect();
    let variabilities: Vec<Option<f64>> = summaries
        .iter()
        .map(|s| s.temperature_variability)
        .collect();
    let avg_humidities: Vec<Option<f64>> = summaries.iter().map(|s| s.avg_humidity).collect();
    let min_humidities: Vec<Option<f64>> = summaries.iter().map(|s| s.min_humidity).collect();
    let max_humidities: Vec<Option<f64>> = summaries.iter().map(|s| s.max_humidity).collect();
    let avg_winds: Vec<f64> = summaries.iter().map(|s| s.avg_wind_speed).collect();
    let max_winds: Vec<f64> = summaries.iter().map(|s| s.max_wind_speed).collect();
    let avg_pressures: Vec<Option<f64>> = summaries.iter().map(|s| s.avg_pressure).collect();
    let avg_comforts: Vec<Option<f64>> = summaries.iter().map(|s| s.avg_comfort_index).collect();
    let dominants: Vec<&str> = summaries
        .iter()
        .map(|s| s.dominant_weather.as_str())
        .collect();
    let change_counts: Vec<u32> = summaries.iter().map(|s| s.weather_changes_count).collect();
    let ranges: Vec<Option<f64>> = summaries.iter().map(|s| s.daily_temp_range).collect();
    let stabilities: Vec<&str> = summaries
        .iter()
        .map(|s| s.temperature_stability.as_str())
        .collect();
    let comfort_categories: Vec<&str> = summaries
        .iter()
        .map(|s| s.comfort_category.as_str())
        .collect();

    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(city_ids)),
        Arc::new(StringArray::from(city_names)),
        Arc::new(StringArray::from(countries)),
        Arc::new(Date32Array::from(dates)),
        Arc::new(StringArray::from(zones)),
        Arc::new(StringArray::from(hemispheres)),
        Arc::new(UInt32Array::from(readings)),
        Arc::new(Float64Array::from(avg_temps)),
        Arc::new(Float64Array::from(min_temps)),
        Arc::new(Float64Array::from(max_temps)),
        Arc::new(Float64Array::from(variabilities)),
        Arc::new(Float64Array::from(avg_humidities)),
        Arc::new(Float64Array::from(min_humidities)),
        Arc::new(Float64Array::from(max_humidities)),
        Arc::new(Float64Array::from(avg_winds)),
        Arc::new(Float64Array::from(max_winds)),
        Arc::new(Float64Array::from(avg_pressures)),
        Arc::new(Float64Array::from(avg_comforts)),
        Arc::new(StringArray::from(dominants)),
        Arc::new(UInt32Array::from(change_counts)),
        Arc::new(Float64Array::from(ranges)),
        Arc::new(StringArray::from(stabilities)),
        Arc::new(StringArray::from(comfort_categories)),
    ];

    Ok(RecordBatch::try_new(schema, columns)?)
}

fn column<'a, A: 'static>(batch: &'a RecordBatch, index: usize, name: &str) -> Result<&'a A> {
    batch
        .column(index)
        .as_any()
        .downcast_ref::<A>()
        .ok_or_else(|| RefineryError::InvalidFormat(format!("unexpected type for column {}", name)))
}

fn opt_f64(array: &Float64Array, row: usize) -> Option<f64> {
    if array.is_null(row) {
        None
    } else {
        Some(array.value(row))
    }
}

fn opt_u32(array: &UInt32Array, row: usize) -> Option<u32> {
    if array.is_null(row) {
        None
    } else {
        Some(array.value(row))
    }
}

fn opt_str<'a>(array: &'a StringArray, row: usize) -> Option<&'a str> {
    if array.is_null(row) {
        None
    } else {
        Some(array.value(row))
    }
}

fn parse_label<T>(value: &str, name: &str, parse: fn(&str) -> Option<T>) -> Result<T> {
    parse(value).ok_or_else(|| {
        RefineryError::InvalidFormat(format!("unknown {} label: {}", name, value))
    })
}

fn batch_to_enriched(batch: &RecordBatch, out: &mut Vec<EnrichedObservation>) -> Result<()> {
    if batch.num_columns() != 32 {
        return Err(RefineryError::InvalidFormat(format!(
            "expected 32 enriched-observation columns, found {}",
            batch.num_columns()
        )));
    }

    let city_ids: &StringArray = column(batch, 0, "city_id")?;
    let city_names: &StringArray = column(batch, 1, "city_name")?;
    let countries: &StringArray = column(batch, 2, "country_code")?;
    let latitudes: &Float64Array = column(batch, 3, "latitude")?;
    let longitudes: &Float64Array = column(batch, 4, "longitude")?;
    let timestamps: &TimestampSecondArray = column(batch, 5, "timestamp")?;
    let conditions: &StringArray = column(batch, 6, "weather_main")?;
    let descriptions: &StringArray = column(batch, 7, "weather_description")?;
    let temperatures: &Float64Array = column(batch, 8, "temperature")?;
    let feels_like: &Float64Array = column(batch, 9, "feels_like")?;
    let temp_mins: &Float64Array = column(batch, 10, "temp_min")?;
    let temp_maxs: &Float64Array = column(batch, 11, "temp_max")?;
    let pressures: &Float64Array = column(batch, 12, "pressure")?;
    let humidities: &Float64Array = column(batch, 13, "humidity")?;
    let wind_speeds: &Float64Array = column(batch, 14, "wind_speed")?;
    let wind_degs: &Float64Array = column(batch, 15, "wind_deg")?;
    let clouds: &Float64Array = column(batch, 16, "cloud_coverage")?;
    let quality_flags: &StringArray = column(batch, 17, "quality_flag")?;
    let dates: &Date32Array = column(batch, 18, "date")?;
    let hours: &UInt32Array = column(batch, 19, "hour")?;
    let days_of_week: &StringArray = column(batch, 20, "day_of_week")?;
    let months: &UInt32Array = column(batch, 21, "month")?;
    let seasons: &StringArray = column(batch, 22, "season")?;
    let hemispheres: &StringArray = column(batch, 23, "hemisphere")?;
    let zones: &StringArray = column(batch, 24, "climate_zone")?;
    let temp_categories: &StringArray = column(batch, 25, "temperature_category")?;
    let humidity_categories: &StringArray = column(batch, 26, "humidity_category")?;
    let comfort_indices: &Float64Array = column(batch, 27, "comfort_index")?;
    let comfort_levels: &StringArray = column(batch, 28, "comfort_level")?;
    let severity_scores: &Float64Array = column(batch, 29, "severity_score")?;
    let severity_levels: &StringArray = column(batch, 30, "severity_level")?;
    let ingestion_dates: &Date32Array = column(batch, 31, "ingestion_date")?;

    for row in 0..batch.num_rows() {
        let timestamp = if timestamps.is_null(row) {
            None
        } else {
            Some(secs_to_timestamp(timestamps.value(row))?)
        };
        let date = if dates.is_null(row) {
            None
        } else {
            Some(days_to_date(dates.value(row))?)
        };
        let season = match opt_str(seasons, row) {
            None => None,
            Some(s) => Some(parse_label(s, "season", Season::parse)?),
        };

        out.push(EnrichedObservation {
            city_id: city_ids.value(row).to_string(),
            city_name: city_names.value(row).to_string(),
            country_code: countries.value(row).to_string(),
            latitude: opt_f64(latitudes, row),
            longitude: opt_f64(longitudes, row),
            timestamp,
            weather_main: conditions.value(row).to_string(),
            weather_description: descriptions.value(row).to_string(),
            temperature: opt_f64(temperatures, row),
            feels_like: opt_f64(feels_like, row),
            temp_min: opt_f64(temp_mins, row),
            temp_max: opt_f64(temp_maxs, row),
            pressure: opt_f64(pressures, row),
            humidity: opt_f64(humidities, row),
            wind_speed: wind_speeds.value(row),
            wind_deg: wind_degs.value(row),
            cloud_coverage: clouds.value(row),
            quality_flag: parse_label(quality_flags.value(row), "quality_flag", QualityFlag::parse)?,
            date,
            hour: opt_u32(hours, row),
            day_of_week: opt_str(days_of_week, row).map(|s| s.to_string()),
            month: opt_u32(months, row),
            season,
            hemisphere: parse_label(hemispheres.value(row), "hemisphere", Hemisphere::parse)?,
            climate_zone: parse_label(zones.value(row), "climate_zone", ClimateZone::parse)?,
            temperature_category: parse_label(
                temp_categories.value(row),
                "temperature_category",
                TemperatureCategory::parse,
            )?,
            humidity_category: parse_label(
                humidity_categories.value(row),
                "humidity_category",
                HumidityCategory::parse,
            )?,
            comfort_index: opt_f64(comfort_indices, row),
            comfort_level: parse_label(
                comfort_levels.value(row),
                "comfort_level",
                ComfortLevel::parse,
            )?,
            severity_score: severity_scores.value(row),
            severity_level: parse_label(
                severity_levels.value(row),
                "severity_level",
                SeverityLevel::parse,
            )?,
            ingestion_date: days_to_date(ingestion_dates.value(row))?,
        });
    }

    Ok(())
}

fn batch_to_summaries(batch: &RecordBatch, out: &mut Vec<DailySummary>) -> Result<()> {
    if batch.num_columns() != 23 {
        return Err(RefineryError::InvalidFormat(format!(
            "expected 23 daily-summary columns, found {}",
            batch.num_columns()
        )));
    }

    let city_ids: &StringArray = column(batch, 0, "city_id")?;
    let city_names: &StringArray = column(batch, 1, "city_name")?;
    let countries: &StringArray = column(batch, 2, "country_code")?;
    let dates: &Date32Array = column(batch, 3, "date")?;
    let zones: &StringArray = column(batch, 4, "climate_zone")?;
    let hemispheres: &StringArray = column(batch, 5, "hemisphere")?;
    let readings: &UInt32Array = column(batch, 6, "hourly_readings")?;
    let avg_temps: &Float64Array = column(batch, 7, "avg_temperature")?;
    let min_temps: &Float64Array = column(batch, 8, "min_temperature")?;
    let max_temps: &Float64Array = column(batch, 9, "max_temperature")?;
    let variabilities: &Float64Array = column(batch, 10, "temperature_variability")?;
    let avg_humidities: &Float64Array = column(batch, 11, "avg_humidity")?;
    let min_humidities: &Float64Array = column(batch, 12, "min_humidity")?;
    let max_humidities: &Float64Array = column(batch, 13, "max_humidity")?;
    let avg_winds: &Float64Array = column(batch, 14, "avg_wind_speed")?;
    let max_winds: &Float64Array = column(batch, 15, "max_wind_speed")?;
    let avg_pressures: &Float64Array = column(batch, 16, "avg_pressure")?;
    let avg_comforts: &Float64Array = column(batch, 17, "avg_comfort_index")?;
    let dominants: &StringArray = column(batch, 18, "dominant_weather")?;
    let change_counts: &UInt32Array = column(batch, 19, "weather_changes_count")?;
    let ranges: &Float64Array = column(batch, 20, "daily_temp_range")?;
    let stabilities: &StringArray = column(batch, 21, "temperature_stability")?;
    let comfort_categories: &StringArray = column(batch, 22, "comfort_category")?;

    for row in 0..batch.num_rows() {
        out.push(DailySummary {
            city_id: city_ids.value(row).to_string(),
            city_name: city_names.value(row).to_string(),
            country_code: countries.value(row).to_string(),
            date: days_to_date(dates.value(row))?,
            climate_zone: parse_label(zones.value(row), "climate_zone", ClimateZone::parse)?,
            hemisphere: parse_label(hemispheres.value(row), "hemisphere", Hemisphere::parse)?,
            hourly_readings: readings.value(row),
            avg_temperature: opt_f64(avg_temps, row),
            min_temperature: opt_f64(min_temps, row),
            max_temperature: opt_f64(max_temps, row),
            temperature_variability: opt_f64(variabilities, row),
            avg_humidity: opt_f64(avg_humidities, row),
            min_humidity: opt_f64(min_humidities, row),
            max_humidity: opt_f64(max_humidities, row),
            avg_wind_speed: avg_winds.value(row),
            max_wind_speed: max_winds.value(row),
            avg_pressure: opt_f64(avg_pressures, row),
            avg_comfort_index: opt_f64(avg_comforts, row),
            dominant_weather: dominants.value(row).to_string(),
            weather_changes_count: change_counts.value(row),
            daily_temp_range: opt_f64(ranges, row),
            temperature_stability: parse_label(
                stabilities.value(row),
                "temperature_stability",
                TemperatureStability::parse,
            )?,
            comfort_category: parse_label(
                comfort_categories.value(row),
                "comfort_category",
                ComfortCategory::parse,
            )?,
        });
    }

    Ok(())
}
