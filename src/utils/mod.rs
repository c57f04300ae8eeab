pub mod constants;
pub mod filename;
pub mod progress;
pub mod stats;

pub use constants::*;
pub use filename::{default_enriched_filename, default_summary_filename};
pub use progress::ProgressReporter;
