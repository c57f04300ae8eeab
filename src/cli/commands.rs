use std::path::{Path, PathBuf};

use chrono::{Duration, Local};
use tracing_subscriber::EnvFilter;

use crate::aggregate::DailyAggregator;
use crate::cli::args::{Cli, Commands};
use crate::config::RefineryConfig;
use crate::enrich::Enricher;
use crate::error::{RefineryError, Result};
use crate::readers::ObservationReader;
use crate::utils::filename::{default_enriched_filename, default_summary_filename};
use crate::utils::progress::ProgressReporter;
use crate::writers::ParquetWriter;

pub async fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose);

    let config = RefineryConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Enrich {
            input,
            output,
            compression,
            lookback_days,
            max_workers,
            json,
        } => {
            let output = output.unwrap_or_else(|| PathBuf::from(default_enriched_filename()));
            let result = enrich_command(
                &input,
                &output,
                compression.as_deref().unwrap_or(&config.compression),
                lookback_days.unwrap_or(config.lookback_days),
                max_workers.unwrap_or(config.max_workers),
                json,
            );
            finish(result, json)
        }

        Commands::Aggregate {
            input,
            output,
            compression,
            json,
        } => {
            let output = output.unwrap_or_else(|| PathBuf::from(default_summary_filename()));
            let result = aggregate_command(
                &input,
                &output,
                compression.as_deref().unwrap_or(&config.compression),
                json,
            );
            finish(result, json)
        }

        Commands::Run {
            input,
            enriched_output,
            summary_output,
            compression,
            lookback_days,
            max_workers,
            json,
        } => {
            let enriched_output =
                enriched_output.unwrap_or_else(|| PathBuf::from(default_enriched_filename()));
            let summary_output =
                summary_output.unwrap_or_else(|| PathBuf::from(default_summary_filename()));
            let compression = compression.as_deref().unwrap_or(&config.compression);

            let result = enrich_command(
                &input,
                &enriched_output,
                compression,
                lookback_days.unwrap_or(config.lookback_days),
                max_workers.unwrap_or(config.max_workers),
                json,
            )
            .and_then(|_| {
                if enriched_output.exists() {
                    aggregate_command(&enriched_output, &summary_output, compression, json)
                } else {
                    // Empty window: the enrichment pass wrote nothing
                    println!("No enriched output produced, skipping aggregation");
                    Ok(())
                }
            });
            finish(result, json)
        }

        Commands::Info { file, sample } => info_command(&file, sample),
    }
}

fn init_logging(verbose: bool) {
    let default_directive = if verbose {
        "weather_refinery=debug"
    } else {
        "weather_refinery=info"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    // A second init (e.g. from tests) is not an error worth failing over
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// Print a FAILED report on the same channel a success report would have used.
fn finish(result: Result<()>, json: bool) -> Result<()> {
    if let Err(ref error) = result {
        if json {
            println!(
                "{}",
                serde_json::json!({ "status": "FAILED", "error": error.to_string() })
            );
        } else {
            eprintln!("Run FAILED: {}", error);
        }
    }
    result
}

fn enrich_command(
    input: &Path,
    output: &Path,
    compression: &str,
    lookback_days: u32,
    max_workers: usize,
    json: bool,
) -> Result<()> {
    let progress = ProgressReporter::new_spinner("Reading raw observations...", json);

    let mut reader = ObservationReader::new();
    if lookback_days > 0 {
        let since = Local::now().date_naive() - Duration::days(lookback_days as i64);
        reader = reader.with_window_since(since);
    }
    let observations = reader.read_observations(input)?;

    progress.set_message("Enriching observations...");
    let enricher = Enricher::new().with_max_workers(max_workers);
    let pass = enricher.enrich_batch(&observations)?;
    progress.finish_with_message(&pass.report.summary());

    if !pass.records.is_empty() {
        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let writer = ParquetWriter::new().with_compression(compression)?;
        writer.write_enriched(&pass.records, output)?;

        let file_info = writer.get_file_info(output)?;
        progress.println(&format!("\n{}", file_info.summary()));
    }

    if json {
        println!("{}", serde_json::to_string(&pass.report)?);
    } else {
        println!("{}", pass.report.summary());
    }
    Ok(())
}

fn aggregate_command(input: &Path, output: &Path, compression: &str, json: bool) -> Result<()> {
    let progress = ProgressReporter::new_spinner("Reading enriched observations...", json);

    let writer = ParquetWriter::new().with_compression(compression)?;
    let enriched = writer.read_enriched(input, 0)?;

    progress.set_message("Aggregating daily summaries...");
    let pass = DailyAggregator::new().aggregate(&enriched)?;
    progress.finish_with_message(&pass.report.summary());

    if !pass.summaries.is_empty() {
        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        writer.write_summaries(&pass.summaries, output)?;

        let file_info = writer.get_file_info(output)?;
        progress.println(&format!("\n{}", file_info.summary()));
    }

    if json {
        println!("{}", serde_json::to_string(&pass.report)?);
    } else {
        println!("{}", pass.report.summary());
    }
    Ok(())
}

fn info_command(file: &Path, sample: usize) -> Result<()> {
    println!("Analyzing Parquet file: {}", file.display());

    let writer = ParquetWriter::new();
    let file_info = writer.get_file_info(file)?;
    println!("\n{}", file_info.summary());

    if sample == 0 {
        return Ok(());
    }

    // The file is either an enriched batch or a daily summary table; probe
    // the enriched layout first and fall back on schema mismatch.
    match writer.read_enriched(file, sample) {
        Ok(records) => {
            println!("\nSample Records (showing {}):", records.len());
            for (i, record) in records.iter().enumerate() {
                println!(
                    "{}. {} ({}) at {}: temp={}, comfort={}, severity={:.3} ({})",
                    i + 1,
                    record.city_name,
                    record.country_code,
                    record
                        .timestamp
                        .map(|t| t.to_string())
                        .unwrap_or_else(|| "unknown time".to_string()),
                    record
                        .temperature
                        .map(|t| format!("{:.1}°C", t))
                        .unwrap_or_else(|| "n/a".to_string()),
                    record.comfort_level,
                    record.severity_score,
                    record.quality_flag.as_str(),
                );
            }
            Ok(())
        }
        Err(RefineryError::InvalidFormat(_)) | Err(RefineryError::Arrow(_)) => {
            let summaries = writer.read_summaries(file, sample)?;
            println!("\nSample Daily Summaries (showing {}):", summaries.len());
            for (i, summary) in summaries.iter().enumerate() {
                println!(
                    "{}. {} on {}: {} readings, avg={}, range={}, {} ({})",
                    i + 1,
                    summary.city_name,
                    summary.date,
                    summary.hourly_readings,
                    summary
                        .avg_temperature
                        .map(|t| format!("{:.1}°C", t))
                        .unwrap_or_else(|| "n/a".to_string()),
                    summary
                        .daily_temp_range
                        .map(|r| format!("{:.1}°C", r))
                        .unwrap_or_else(|| "n/a".to_string()),
                    summary.dominant_weather,
                    summary.comfort_category,
                );
            }
            Ok(())
        }
        Err(other) => Err(other),
    }
}
