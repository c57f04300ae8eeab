pub mod features;
pub mod pipeline;
pub mod quality;
pub mod scoring;

pub use pipeline::{EnrichmentPass, Enricher};
pub use quality::QualityGate;
