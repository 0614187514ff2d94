use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Wall-clock cost of one processing step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub label: String,
    pub elapsed_ms: f64,
    /// Rows reported through the progress handlers while the step ran.
    /// Steps that run several passes count each pass.
    #[serde(default)]
    pub rows: usize,
}

impl StageTiming {
    pub fn new(label: impl Into<String>, elapsed_ms: f64, rows: usize) -> Self {
        Self {
            label: label.into(),
            elapsed_ms,
            rows,
        }
    }
}

/// Per-step timings of one run, plus the end-to-end total.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    pub fn push(&mut self, label: impl Into<String>, elapsed_ms: f64, rows: usize) {
        self.stages.push(StageTiming::new(label, elapsed_ms, rows));
    }

    /// Record a stage that started at `start` and ends now.
    pub fn record(&mut self, label: impl Into<String>, start: Instant, rows: usize) {
        self.push(label, elapsed_ms(start), rows);
    }

    /// Sum of the recorded stages; `total_ms` may be larger (I/O, decode).
    pub fn stages_ms(&self) -> f64 {
        self.stages.iter().map(|s| s.elapsed_ms).sum()
    }
}

pub fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}
