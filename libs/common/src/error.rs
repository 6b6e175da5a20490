//! Unified error type for the HF tasks.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Config error: {0}")]
    Config(String),

    #[error("ambiguous PID mode: tpc_only={tpc_only} tpc_tof_combined={tpc_tof_combined}")]
    PidMode {
        tpc_only: bool,
        tpc_tof_combined: bool,
    },

    #[error("Track index {index} out of range for {table} table (len={len})")]
    TrackIndex {
        table: &'static str,
        index: i64,
        len: usize,
    },

    #[error("Histogram mismatch for {name}: {reason}")]
    HistogramMismatch { name: String, reason: String },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}
