use serde::{Deserialize, Serialize};

/// Outcome status shared by every engine entry point.
///
/// Warning marks the empty-batch condition: an expected steady state (no new
/// data in the window), never a fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunStatus {
    Success,
    Warning,
    Failed,
}

impl RunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Success => "SUCCESS",
            RunStatus::Warning => "WARNING",
            RunStatus::Failed => "FAILED",
        }
    }
}

/// Counts for one enrichment pass. Rejected records are excluded from the
/// output but still accounted for here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichmentReport {
    pub status: RunStatus,
    pub input: usize,
    pub valid: usize,
    pub rejected: usize,
}

impl EnrichmentReport {
    pub fn empty() -> Self {
        Self {
            status: RunStatus::Warning,
            input: 0,
            valid: 0,
            rejected: 0,
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "Enrichment: {} ({} input, {} valid, {} rejected)",
            self.status.as_str(),
            self.input,
            self.valid,
            self.rejected
        )
    }
}

/// Counts for one aggregation pass. Undated records cannot be keyed to a day
/// and are skipped with a warning rather than failing the pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationReport {
    pub status: RunStatus,
    pub input: usize,
    pub groups: usize,
    pub skipped_undated: usize,
}

impl AggregationReport {
    pub fn empty() -> Self {
        Self {
            status: RunStatus::Warning,
            input: 0,
            groups: 0,
            skipped_undated: 0,
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "Aggregation: {} ({} input, {} daily groups, {} undated skipped)",
            self.status.as_str(),
            self.input,
            self.groups,
            self.skipped_undated
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_to_warehouse_values() {
        assert_eq!(serde_json::to_string(&RunStatus::Success).unwrap(), "\"SUCCESS\"");
        assert_eq!(serde_json::to_string(&RunStatus::Warning).unwrap(), "\"WARNING\"");
        assert_eq!(RunStatus::Failed.as_str(), "FAILED");
    }

    #[test]
    fn test_empty_reports_are_warnings_with_zero_counts() {
        let e = EnrichmentReport::empty();
        assert_eq!(e.status, RunStatus::Warning);
        assert_eq!((e.input, e.valid, e.rejected), (0, 0, 0));

        let a = AggregationReport::empty();
        assert_eq!(a.status, RunStatus::Warning);
        assert_eq!((a.input, a.groups), (0, 0));
    }
}
