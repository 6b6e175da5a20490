//! Sharded batch evaluation on the blocking pool.

use std::sync::Arc;

use common::{Error, Result};
use tokio::task::JoinSet;
use tracing::debug;
use xipi_selector::{CandidateSelector, SelectionQa, SelectionRecord, SelectorInput};

/// Evaluate `input` split into up to `shards` contiguous chunks.
///
/// Each shard runs with its own QA accumulator. Records come back in input
/// order and the shard QAs are merged, so the result equals a sequential run.
pub async fn run_sharded(
    selector: Arc<CandidateSelector>,
    input: Arc<SelectorInput>,
    shards: usize,
) -> Result<(Vec<SelectionRecord>, SelectionQa)> {
    let n = input.candidates.len();
    let shards = shards.clamp(1, n.max(1));
    let chunk = n.div_ceil(shards).max(1);

    let mut set = JoinSet::new();
    for (shard, start) in (0..n).step_by(chunk).enumerate() {
        let end = (start + chunk).min(n);
        let selector = Arc::clone(&selector);
        let input = Arc::clone(&input);
        set.spawn_blocking(move || {
            debug!("shard {}: candidates {}..{}", shard, start, end);
            let mut qa = SelectionQa::new();
            let records = selector.process_candidates(
                &input.candidates[start..end],
                &input.tracks,
                &input.lf_tracks,
                &mut qa,
            )?;
            Ok::<_, Error>((shard, records, qa))
        });
    }

    let mut parts = Vec::with_capacity(shards);
    while let Some(joined) = set.join_next().await {
        let part = joined.map_err(|e| Error::Other(format!("shard task failed: {}", e)))??;
        parts.push(part);
    }
    parts.sort_by_key(|(shard, _, _)| *shard);

    let mut records = Vec::with_capacity(n);
    let mut qa = SelectionQa::new();
    for (_, shard_records, shard_qa) in parts {
        records.extend(shard_records);
        qa.merge(&shard_qa)?;
    }
    Ok((records, qa))
}
