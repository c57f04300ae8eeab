/// Plausible surface temperature range; readings outside are rejected
pub const MIN_VALID_TEMP: f64 = -50.0;
pub const MAX_VALID_TEMP: f64 = 60.0;

/// Comfort index reference points
pub const IDEAL_TEMPERATURE: f64 = 21.0;
pub const IDEAL_HUMIDITY: f64 = 50.0;
pub const IDEAL_WIND_SPEED: f64 = 5.0;

/// Comfort index penalties per unit of deviation from the ideal
pub const COMFORT_TEMP_PENALTY: f64 = 5.0;
pub const COMFORT_HUMIDITY_PENALTY: f64 = 0.3;
pub const COMFORT_WIND_PENALTY: f64 = 2.0;

/// Severity score term weights and normalization scales
pub const SEVERITY_TEMP_WEIGHT: f64 = 0.4;
pub const SEVERITY_TEMP_SCALE: f64 = 40.0;
pub const SEVERITY_WIND_WEIGHT: f64 = 0.3;
pub const SEVERITY_WIND_SCALE: f64 = 20.0;
pub const SEVERITY_HUMIDITY_WEIGHT: f64 = 0.2;
pub const SEVERITY_HUMIDITY_SCALE: f64 = 100.0;
pub const SEVERITY_CLOUD_WEIGHT: f64 = 0.1;
pub const SEVERITY_CLOUD_SCALE: f64 = 100.0;

/// Climate zone latitude bands (absolute latitude, inclusive upper bounds)
pub const TROPICAL_MAX_LAT: f64 = 23.5;
pub const SUBTROPICAL_MAX_LAT: f64 = 35.0;
pub const TEMPERATE_MAX_LAT: f64 = 55.0;

/// Processing defaults
pub const DEFAULT_LOOKBACK_DAYS: u32 = 7;
pub const DEFAULT_ROW_GROUP_SIZE: usize = 10000;

/// Parquet compression options
pub const COMPRESSION_SNAPPY: &str = "snappy";
pub const COMPRESSION_GZIP: &str = "gzip";
pub const COMPRESSION_LZ4: &str = "lz4";
pub const COMPRESSION_ZSTD: &str = "zstd";
pub const COMPRESSION_NONE: &str = "none";
