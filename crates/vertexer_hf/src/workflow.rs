//! Track QA → vertexer → candidate builder over a flat track table.

use std::collections::BTreeMap;

use common::{HistogramRegistry, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::candidate_builder::{Cand2Prong, CandidateBuilder2Prong};
use crate::fitter::DcaFitter;
use crate::track::TrackParCov;
use crate::track_qa::TrackQa;
use crate::vertexer::{IndexedTrack, SecondaryVertex, VertexerHf};

/// A row of the track table. Its global index is its position in the table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HfTrack {
    pub collision_id: i64,
    #[serde(flatten)]
    pub par: TrackParCov,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VertexingInput {
    pub tracks: Vec<HfTrack>,
}

#[derive(Debug)]
pub struct VertexingOutput {
    pub vertices: Vec<SecondaryVertex>,
    pub candidates: Vec<Cand2Prong>,
    pub qa: HistogramRegistry,
}

/// Track indices grouped by collision id, in ascending collision order.
pub fn group_by_collision(tracks: &[HfTrack]) -> BTreeMap<i64, Vec<usize>> {
    let mut groups: BTreeMap<i64, Vec<usize>> = BTreeMap::new();
    for (index, track) in tracks.iter().enumerate() {
        groups.entry(track.collision_id).or_default().push(index);
    }
    groups
}

pub fn run<F: DcaFitter>(input: &VertexingInput, fitter: F) -> Result<VertexingOutput> {
    let mut track_qa = TrackQa::new();
    let mut vertexer = VertexerHf::new(fitter);
    let mut vertices = Vec::new();

    let groups = group_by_collision(&input.tracks);
    info!(
        collisions = groups.len(),
        tracks = input.tracks.len(),
        "vertexing"
    );

    for indices in groups.values() {
        let coll: Vec<IndexedTrack<'_>> = indices
            .iter()
            .map(|&index| IndexedTrack {
                index,
                par: &input.tracks[index].par,
            })
            .collect();
        track_qa.process_collision(coll.iter().map(|t| t.par));
        vertices.extend(vertexer.process_collision(&coll));
    }

    let table: Vec<TrackParCov> = input.tracks.iter().map(|t| t.par).collect();
    let candidates = CandidateBuilder2Prong::new().process(&vertices, &table)?;

    let mut qa = track_qa.registry().clone();
    qa.merge(vertexer.registry())?;

    info!(
        vertices = vertices.len(),
        candidates = candidates.len(),
        "vertexing done"
    );
    Ok(VertexingOutput {
        vertices,
        candidates,
        qa,
    })
}
