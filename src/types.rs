use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Environment variable handed to the target unless overridden.
pub const DEFAULT_ENV_VAR: &str = "OMP_NUM_THREADS";

/// All samples collected for one thread count, plus their mean.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigurationResult {
    pub threads: u32,
    pub samples: Vec<f64>,
    pub average: f64,
}

impl ConfigurationResult {
    /// Build a result from a non-empty sample list. Returns `None` for no samples.
    pub fn from_samples(threads: u32, samples: Vec<f64>) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }
        let average = samples.iter().sum::<f64>() / samples.len() as f64;
        Some(Self {
            threads,
            samples,
            average,
        })
    }

    /// Executions per second, the quantity plotted on the y axis.
    pub fn speed(&self) -> f64 {
        1.0 / self.average
    }
}

/// Configuration results in the order the thread counts were requested.
pub type SweepResult = Vec<ConfigurationResult>;

/// A finished sweep plus the metadata needed to reproduce it.
#[derive(Debug, Clone, Serialize)]
pub struct SweepReport {
    pub script: PathBuf,
    pub script_args: Vec<String>,
    pub env_var: String,
    pub repeat: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub results: SweepResult,
}
