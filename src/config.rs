use std::path::Path;

use serde::Deserialize;
use validator::Validate;

use crate::error::Result;
use crate::utils::constants::{COMPRESSION_SNAPPY, DEFAULT_LOOKBACK_DAYS};

/// Engine configuration, passed explicitly to every entry point.
///
/// The core never reads ambient state: settings come from an optional TOML
/// file plus REFINERY_-prefixed environment variables, resolved once at the
/// edge by [`RefineryConfig::load`].
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RefineryConfig {
    /// Ingestion-date window for re-transformation passes, in days back from
    /// today. The window is applied by the reader, never inside the core.
    #[validate(range(min = 1, max = 365))]
    pub lookback_days: u32,

    #[validate(range(min = 1, max = 256))]
    pub max_workers: usize,

    /// Parquet compression codec for the persistence outputs.
    pub compression: String,
}

impl Default for RefineryConfig {
    fn default() -> Self {
        Self {
            lookback_days: DEFAULT_LOOKBACK_DAYS,
            max_workers: num_cpus::get(),
            compression: COMPRESSION_SNAPPY.to_string(),
        }
    }
}

impl RefineryConfig {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder()
            .set_default("lookback_days", DEFAULT_LOOKBACK_DAYS as i64)?
            .set_default("max_workers", num_cpus::get() as i64)?
            .set_default("compression", COMPRESSION_SNAPPY)?;

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }
        builder = builder.add_source(config::Environment::with_prefix("REFINERY"));

        let settings: Self = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = RefineryConfig::default();
        assert_eq!(cfg.lookback_days, DEFAULT_LOOKBACK_DAYS);
        assert_eq!(cfg.compression, "snappy");
        assert!(cfg.max_workers >= 1);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let cfg = RefineryConfig::load(None).unwrap();
        assert_eq!(cfg.lookback_days, DEFAULT_LOOKBACK_DAYS);
    }

    #[test]
    fn test_validation_rejects_zero_workers() {
        let cfg = RefineryConfig {
            max_workers: 0,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }
}
