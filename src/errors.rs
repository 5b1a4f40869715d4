use std::path::PathBuf;
use std::process::ExitStatus;

#[derive(thiserror::Error, Debug)]
pub enum OmpsweepError {
    #[error("Failed to start '{program}': {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("Target script failed with {status} at {threads} threads:\n{stderr}")]
    Execution {
        threads: u32,
        status: ExitStatus,
        stderr: String,
    },

    #[error("Unexpected output (no float found):\n{stdout}")]
    Parse { stdout: String },

    #[error("Invalid thread list '{input}': {detail}")]
    InvalidThreadList { input: String, detail: String },

    #[error("Invalid thread range (min {min}, max {max}, step {step})")]
    InvalidRange { min: u32, max: u32, step: u32 },

    #[error("Nothing to benchmark: {detail}")]
    InvalidPlan { detail: String },

    #[error("Failed to load config {path}: {detail}")]
    Config { path: PathBuf, detail: String },

    #[error("Could not split pass-args {input:?}: unbalanced quotes")]
    PassArgs { input: String },
}
