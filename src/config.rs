//! Configuration loader: merges .env, config.toml, and environment overrides.

use common::Error;
use serde::{Deserialize, Serialize};
use std::path::Path;

use vertexer_hf::VertexerConfig;
use xipi_selector::SelectorConfig;

/// Top-level configuration of the HF tasks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HfTasksConfig {
    /// Directory for the JSONL journal and QA dumps.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Ξπ candidate selection.
    #[serde(default)]
    pub selector: SelectorConfig,

    /// Secondary vertexing.
    #[serde(default)]
    pub vertexer: VertexerConfig,
}

fn default_output_dir() -> String {
    "output".into()
}

impl Default for HfTasksConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            selector: SelectorConfig::default(),
            vertexer: VertexerConfig::default(),
        }
    }
}

// ── Config loader ─────────────────────────────────────────────────────

/// Load configuration from `.env`, the TOML file at `path` (if present),
/// and `HF_*` environment variables, then validate it.
pub fn load_config(path: &Path) -> Result<HfTasksConfig, Error> {
    if let Err(e) = dotenvy::dotenv() {
        tracing::debug!("No .env file loaded: {}", e);
    }

    let mut config = HfTasksConfig::default();

    if path.exists() {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        config = toml::from_str(&contents)?;
    } else {
        tracing::debug!("{} not found, using defaults", path.display());
    }

    apply_overrides(&mut config, |key| std::env::var(key).ok())?;

    config.selector.validate()?;
    Ok(config)
}

/// Environment overrides take precedence over the file.
fn apply_overrides(
    config: &mut HfTasksConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<(), Error> {
    if let Some(raw) = lookup("HF_USE_PID_TPC_ONLY") {
        config.selector.pid.use_pid_tpc_only = parse_flag("HF_USE_PID_TPC_ONLY", &raw)?;
    }
    if let Some(raw) = lookup("HF_USE_PID_TPC_TOF_COMBINED") {
        config.selector.pid.use_pid_tpc_tof_combined =
            parse_flag("HF_USE_PID_TPC_TOF_COMBINED", &raw)?;
    }
    if let Some(raw) = lookup("HF_OUTPUT_DIR") {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            config.output_dir = trimmed.to_string();
        }
    }
    Ok(())
}

fn parse_flag(key: &str, raw: &str) -> Result<bool, Error> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        other => Err(Error::Config(format!("{}: expected a boolean, got '{}'", key, other))),
    }
}
