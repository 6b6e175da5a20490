//! HF analysis tasks entry point.
//!
//! Two subcommands:
//! 1. `select`: Ξc0 / Ωc0 → Ξπ candidate selection over a JSON batch
//! 2. `vertex`: track QA, pairwise secondary vertexing and 2-prong candidates

mod batch;
mod config;
mod journal;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use common::Error;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{error, info};
use vertexer_hf::VertexingInput;
use xipi_selector::{CandidateSelector, SelectorInput};

use crate::config::{load_config, HfTasksConfig};
use crate::journal::RunJournal;

#[derive(Debug, Parser)]
#[command(name = "hf-tasks", about = "Heavy-flavour candidate selection and vertexing")]
struct Cli {
    /// TOML configuration file.
    #[arg(long, global = true, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Select Ξπ candidates.
    Select {
        #[arg(long)]
        input: PathBuf,

        /// Number of blocking worker shards.
        #[arg(long, default_value_t = 1)]
        shards: usize,
    },
    /// Find two-prong secondary vertices.
    Vertex {
        #[arg(long)]
        input: PathBuf,
    },
}

fn read_input<T: DeserializeOwned>(path: &Path) -> Result<T, Error> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
    Ok(serde_json::from_str(&contents)?)
}

async fn run_select(
    cfg: HfTasksConfig,
    journal: &mut RunJournal,
    input: &Path,
    shards: usize,
) -> Result<(), Error> {
    let selector = Arc::new(CandidateSelector::new(cfg.selector)?);
    let input: SelectorInput = read_input(input)?;
    info!(
        "Loaded {} candidates, {} tracks, {} LF tracks",
        input.candidates.len(),
        input.tracks.len(),
        input.lf_tracks.len()
    );

    let (records, qa) = batch::run_sharded(selector, Arc::new(input), shards).await?;

    for record in &records {
        journal.write_record("selection", record);
    }
    let selected = records.iter().filter(|r| r.is_fully_selected()).count();
    let qa_path = journal.write_qa("select", qa.registry())?;
    journal.write_event(
        "run_end",
        json!({
            "task": "select",
            "records": records.len(),
            "fully_selected": selected,
            "qa": qa_path.display().to_string(),
        }),
    );
    info!(
        "Selection done: {} records, {} fully selected, QA at {}",
        records.len(),
        selected,
        qa_path.display()
    );
    Ok(())
}

fn run_vertex(cfg: HfTasksConfig, journal: &mut RunJournal, input: &Path) -> Result<(), Error> {
    let input: VertexingInput = read_input(input)?;
    let out = vertexer_hf::workflow::run(&input, cfg.vertexer.build_fitter())?;

    for vertex in &out.vertices {
        journal.write_record("secondary_vertex", vertex);
    }
    for cand in &out.candidates {
        journal.write_record("cand_2prong", cand);
    }
    let qa_path = journal.write_qa("vertex", &out.qa)?;
    journal.write_event(
        "run_end",
        json!({
            "task": "vertex",
            "tracks": input.tracks.len(),
            "vertices": out.vertices.len(),
            "candidates": out.candidates.len(),
            "qa": qa_path.display().to_string(),
        }),
    );
    info!(
        "Vertexing done: {} vertices, QA at {}",
        out.vertices.len(),
        qa_path.display()
    );
    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "hf_tasks=info,xipi_selector=info,vertexer_hf=info".into()
            }),
        )
        .init();

    let cli = Cli::parse();
    let cfg = match load_config(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            error!("Config error: {}", e);
            std::process::exit(1);
        }
    };

    let mut journal = match RunJournal::open(PathBuf::from(&cfg.output_dir)) {
        Ok(journal) => journal,
        Err(e) => {
            error!("Failed to initialize run journal: {}", e);
            std::process::exit(1);
        }
    };
    info!(
        "Run {} writing to {}",
        journal.run_id(),
        journal.path().display()
    );

    let result = match cli.command {
        Command::Select { input, shards } => {
            journal.write_event("run_start", json!({ "task": "select", "shards": shards }));
            run_select(cfg, &mut journal, &input, shards).await
        }
        Command::Vertex { input } => {
            journal.write_event("run_start", json!({ "task": "vertex" }));
            run_vertex(cfg, &mut journal, &input)
        }
    };

    if let Err(e) = result {
        error!("Run failed: {}", e);
        journal.write_event("run_failed", json!({ "error": e.to_string() }));
        std::process::exit(1);
    }
}
