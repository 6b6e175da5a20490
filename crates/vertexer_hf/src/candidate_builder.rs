//! Two-prong candidate building from secondary vertices.

use common::constants::MASS_PI_PLUS;
use common::{Error, Result};
use serde::Serialize;
use tracing::info;

use nalgebra::Vector3;

use crate::track::TrackParCov;
use crate::vertexer::SecondaryVertex;

/// A two-prong candidate under the pion-pion mass hypothesis.
#[derive(Debug, Clone, Serialize)]
pub struct Cand2Prong {
    pub index0: i64,
    pub index1: i64,
    pub pos_x: f64,
    pub pos_y: f64,
    pub mass: f64,
}

/// Invariant mass of two momenta, both with mass `m`.
pub fn inv_mass_2prong(p0: &Vector3<f64>, p1: &Vector3<f64>, m: f64) -> f64 {
    let e0 = (p0.norm_squared() + m * m).sqrt();
    let e1 = (p1.norm_squared() + m * m).sqrt();
    let e = e0 + e1;
    (e * e - (p0 + p1).norm_squared()).max(0.0).sqrt()
}

#[derive(Debug, Default)]
pub struct CandidateBuilder2Prong;

impl CandidateBuilder2Prong {
    pub fn new() -> Self {
        Self
    }

    /// Looks up both prongs in the full track table and builds one candidate per vertex.
    pub fn process(
        &self,
        vertices: &[SecondaryVertex],
        tracks: &[TrackParCov],
    ) -> Result<Vec<Cand2Prong>> {
        let mut candidates = Vec::with_capacity(vertices.len());
        for vtx in vertices {
            let t0 = lookup(tracks, vtx.index0)?;
            let t1 = lookup(tracks, vtx.index1)?;
            info!(
                "Secondary vertex: x = {:.6}, y = {:.6}, track_y0 = {:.6}, track 0 y = {:.6}",
                vtx.pos_x, vtx.pos_y, vtx.track_y0, t0.y
            );
            candidates.push(Cand2Prong {
                index0: vtx.index0,
                index1: vtx.index1,
                pos_x: vtx.pos_x,
                pos_y: vtx.pos_y,
                mass: inv_mass_2prong(&t0.momentum(), &t1.momentum(), MASS_PI_PLUS),
            });
        }
        Ok(candidates)
    }
}

fn lookup(tracks: &[TrackParCov], index: i64) -> Result<&TrackParCov> {
    usize::try_from(index)
        .ok()
        .and_then(|i| tracks.get(i))
        .ok_or(Error::TrackIndex {
            table: "tracks",
            index,
            len: tracks.len(),
        })
}
