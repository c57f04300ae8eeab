use chrono::Local;

/// Generate default filename for an enriched observation file: weather-enriched-{YYMMDD}.parquet
pub fn default_enriched_filename() -> String {
    let date = Local::now().format("%y%m%d");
    format!("weather-enriched-{}.parquet", date)
}

/// Generate default filename for a daily summary file: weather-daily-{YYMMDD}.parquet
pub fn default_summary_filename() -> String {
    let date = Local::now().format("%y%m%d");
    format!("weather-daily-{}.parquet", date)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filenames() {
        let enriched = default_enriched_filename();
        assert!(enriched.starts_with("weather-enriched-"));
        assert!(enriched.ends_with(".parquet"));
        assert_eq!(enriched.len(), "weather-enriched-".len() + 6 + ".parquet".len());

        let summary = default_summary_filename();
        assert!(summary.starts_with("weather-daily-"));
        assert!(summary.ends_with(".parquet"));
    }
}
