use rayon::prelude::*;
use tracing::{info, warn};

use crate::enrich::features::{
    climate_zone_of, hemisphere_of, humidity_category, temperature_category, temporal_features,
};
use crate::enrich::quality::QualityGate;
use crate::enrich::scoring::{comfort_index, comfort_level, severity_level, severity_score};
use crate::error::{RefineryError, Result};
use crate::models::{EnrichedObservation, RawObservation};
use crate::report::{EnrichmentReport, RunStatus};

/// Result of one enrichment pass: the enriched batch plus its counts.
#[derive(Debug, Clone)]
pub struct EnrichmentPass {
    pub records: Vec<EnrichedObservation>,
    pub report: EnrichmentReport,
}

/// Composes quality gate, feature derivation, and scoring into a single
/// record-at-a-time transform over a bounded batch.
///
/// Every per-record step is a pure function, so the batch is mapped in
/// parallel with output order matching input order. Running the same batch
/// twice produces identical output.
pub struct Enricher {
    gate: QualityGate,
    max_workers: usize,
}

impl Enricher {
    pub fn new() -> Self {
        Self {
            gate: QualityGate::new(),
            max_workers: num_cpus::get(),
        }
    }

    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = max_workers.max(1);
        self
    }

    pub fn with_gate(mut self, gate: QualityGate) -> Self {
        self.gate = gate;
        self
    }

    /// Enrich a batch of raw observations.
    ///
    /// An empty batch is an expected steady state, reported as WARNING with
    /// zero counts rather than an error.
    pub fn enrich_batch(&self, batch: &[RawObservation]) -> Result<EnrichmentPass> {
        if batch.is_empty() {
            warn!("no raw observations in batch, nothing to enrich");
            return Ok(EnrichmentPass {
                records: Vec::new(),
                report: EnrichmentReport::empty(),
            });
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.max_workers)
            .build()
            .map_err(|e| RefineryError::Config(e.to_string()))?;

        // Order-preserving parallel map; None marks a gated-out record
        let enriched: Vec<Option<EnrichedObservation>> =
            pool.install(|| batch.par_iter().map(|raw| self.enrich_record(raw)).collect());

        let records: Vec<EnrichedObservation> = enriched.into_iter().flatten().collect();
        let valid = records.len();
        let rejected = batch.len() - valid;

        info!(
            input = batch.len(),
            valid, rejected, "enrichment pass complete"
        );

        Ok(EnrichmentPass {
            report: EnrichmentReport {
                status: RunStatus::Success,
                input: batch.len(),
                valid,
                rejected,
            },
            records,
        })
    }

    /// Transform one raw observation, or None when the quality gate rejects it.
    pub fn enrich_record(&self, raw: &RawObservation) -> Option<EnrichedObservation> {
        let quality_flag = self.gate.assess(raw);
        if !quality_flag.is_usable() {
            return None;
        }

        let temporal = temporal_features(raw.timestamp);
        let index = comfort_index(raw.temperature, raw.humidity, raw.wind_speed);
        let severity = severity_score(
            raw.temperature,
            raw.humidity,
            raw.wind_speed,
            raw.cloud_coverage,
        );

        Some(EnrichedObservation {
            city_id: raw.city_id.clone(),
            city_name: raw.city_name.clone(),
            country_code: raw.country_code.clone(),
            latitude: raw.latitude,
            longitude: raw.longitude,
            timestamp: raw.timestamp,
            weather_main: raw.weather_main.clone(),
            weather_description: raw.weather_description.clone(),
            temperature: raw.temperature,
            feels_like: raw.feels_like,
            temp_min: raw.temp_min,
            temp_max: raw.temp_max,
            pressure: raw.pressure,
            humidity: raw.humidity,
            wind_speed: raw.wind_speed_or_zero(),
            wind_deg: raw.wind_deg_or_zero(),
            cloud_coverage: raw.cloud_coverage_or_zero(),
            quality_flag,
            date: temporal.date,
            hour: temporal.hour,
            day_of_week: temporal.day_of_week,
            month: temporal.month,
            season: temporal.season,
            hemisphere: hemisphere_of(raw.latitude),
            climate_zone: climate_zone_of(raw.latitude),
            temperature_category: temperature_category(raw.temperature),
            humidity_category: humidity_category(raw.humidity),
            comfort_index: index,
            comfort_level: comfort_level(index),
            severity_score: severity,
            severity_level: severity_level(severity),
            ingestion_date: raw.ingestion_date,
        })
    }
}

impl Default for Enricher {
    fn default() -> Self {
        Self::new()
    }
}
