pub mod aggregate;
pub mod cli;
pub mod config;
pub mod enrich;
pub mod error;
pub mod models;
pub mod readers;
pub mod report;
pub mod utils;
pub mod writers;

pub use error::{RefineryError, Result};
