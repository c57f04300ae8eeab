use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "weather-refinery")]
#[command(about = "Weather observation enrichment and daily aggregation engine")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Configuration file path (TOML)")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Enrich raw observations from a CSV extract
    Enrich {
        #[arg(short, long, help = "Input CSV file of raw observations")]
        input: PathBuf,

        #[arg(
            short,
            long,
            help = "Output Parquet file path [default: weather-enriched-{YYMMDD}.parquet]"
        )]
        output: Option<PathBuf>,

        #[arg(short, long, help = "Parquet compression codec [default: from config]")]
        compression: Option<String>,

        #[arg(
            long,
            help = "Ingestion-date window in days back from today (0 = no window) [default: from config]"
        )]
        lookback_days: Option<u32>,

        #[arg(long, help = "Worker threads for the enrichment pass [default: from config]")]
        max_workers: Option<usize>,

        #[arg(long, default_value = "false", help = "Print the run report as JSON")]
        json: bool,
    },

    /// Aggregate an enriched Parquet file into daily summaries
    Aggregate {
        #[arg(short, long, help = "Input Parquet file of enriched observations")]
        input: PathBuf,

        #[arg(
            short,
            long,
            help = "Output Parquet file path [default: weather-daily-{YYMMDD}.parquet]"
        )]
        output: Option<PathBuf>,

        #[arg(short, long, help = "Parquet compression codec [default: from config]")]
        compression: Option<String>,

        #[arg(long, default_value = "false", help = "Print the run report as JSON")]
        json: bool,
    },

    /// Run the full pass: enrich raw observations, then aggregate daily summaries
    Run {
        #[arg(short, long, help = "Input CSV file of raw observations")]
        input: PathBuf,

        #[arg(
            long,
            help = "Enriched Parquet output path [default: weather-enriched-{YYMMDD}.parquet]"
        )]
        enriched_output: Option<PathBuf>,

        #[arg(
            long,
            help = "Daily summary Parquet output path [default: weather-daily-{YYMMDD}.parquet]"
        )]
        summary_output: Option<PathBuf>,

        #[arg(short, long, help = "Parquet compression codec [default: from config]")]
        compression: Option<String>,

        #[arg(
            long,
            help = "Ingestion-date window in days back from today (0 = no window) [default: from config]"
        )]
        lookback_days: Option<u32>,

        #[arg(long, help = "Worker threads for the enrichment pass [default: from config]")]
        max_workers: Option<usize>,

        #[arg(long, default_value = "false", help = "Print the run reports as JSON")]
        json: bool,
    },

    /// Display information about a Parquet output file
    Info {
        #[arg(short, long)]
        file: PathBuf,

        #[arg(short, long, default_value = "10")]
        sample: usize,
    },
}
