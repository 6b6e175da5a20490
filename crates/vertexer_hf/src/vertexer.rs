//! Pairwise secondary-vertex finder.

use common::HistogramRegistry;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::fitter::{DcaFitter, LinearDcaFitter};
use crate::track::TrackParCov;

/// DCA fitter settings for the vertexer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VertexerConfig {
    /// Max distance of closest approach between the two tracks (cm).
    #[serde(default = "default_max_dca")]
    pub max_dca: f64,

    /// Max transverse radius of an accepted vertex (cm).
    #[serde(default = "default_max_r")]
    pub max_r: f64,

    /// Unweighted midpoint instead of covariance-weighted.
    #[serde(default = "default_true")]
    pub use_abs_dca: bool,
}

fn default_max_dca() -> f64 {
    5.0
}
fn default_max_r() -> f64 {
    10.0
}
fn default_true() -> bool {
    true
}

impl Default for VertexerConfig {
    fn default() -> Self {
        Self {
            max_dca: default_max_dca(),
            max_r: default_max_r(),
            use_abs_dca: true,
        }
    }
}

impl VertexerConfig {
    pub fn build_fitter(&self) -> LinearDcaFitter {
        let mut fitter = LinearDcaFitter::new(self.max_dca, self.max_r);
        fitter.set_use_abs_dca(self.use_abs_dca);
        fitter
    }
}

/// A two-prong secondary vertex. The third prong slot is unused (-1).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecondaryVertex {
    pub pos_x: f64,
    pub pos_y: f64,
    pub index0: i64,
    pub index1: i64,
    pub index2: i64,
    pub track_y0: f64,
    pub track_y1: f64,
    pub track_y2: f64,
}

/// A track of one collision together with its index in the track table.
#[derive(Debug, Clone, Copy)]
pub struct IndexedTrack<'a> {
    pub index: usize,
    pub par: &'a TrackParCov,
}

pub const H_VTX_X: &str = "hvtx_x";
pub const H_VTX_Y: &str = "hvtx_y";
pub const H_VTX_Z: &str = "hvtx_z";
pub const H_INDEX_0_COLL: &str = "hindex_0_coll";

/// Fits every track pair of a collision and emits the found vertices.
pub struct VertexerHf<F = LinearDcaFitter> {
    fitter: F,
    registry: HistogramRegistry,
}

impl<F: DcaFitter> VertexerHf<F> {
    pub fn new(fitter: F) -> Self {
        let mut registry = HistogramRegistry::new();
        registry.add(H_VTX_X, "2-track vtx", 100, -0.1, 0.1);
        registry.add(H_VTX_Y, "2-track vtx", 100, -0.1, 0.1);
        registry.add(H_VTX_Z, "2-track vtx", 100, -0.1, 0.1);
        registry.add(
            H_INDEX_0_COLL,
            "track 0 index coll",
            1_000_000,
            -0.5,
            999_999.5,
        );
        Self { fitter, registry }
    }

    /// All unordered pairs (i < j) of the collision's tracks.
    pub fn process_collision(&mut self, tracks: &[IndexedTrack<'_>]) -> Vec<SecondaryVertex> {
        info!("Tracks for collision: {}", tracks.len());
        let mut vertices = Vec::new();

        for (i, track_0) in tracks.iter().enumerate() {
            self.registry.fill(H_INDEX_0_COLL, track_0.index as f64);

            for track_1 in &tracks[i + 1..] {
                for vtx in self.fitter.process(track_0.par, track_1.par) {
                    debug!("vertex x {:.6}", vtx.x);
                    self.registry.fill(H_VTX_X, vtx.x);
                    self.registry.fill(H_VTX_Y, vtx.y);
                    self.registry.fill(H_VTX_Z, vtx.z);
                    vertices.push(SecondaryVertex {
                        pos_x: vtx.x,
                        pos_y: vtx.y,
                        index0: track_0.index as i64,
                        index1: track_1.index as i64,
                        index2: -1,
                        track_y0: track_0.par.y,
                        track_y1: track_1.par.y,
                        track_y2: -1.0,
                    });
                }
            }
        }

        vertices
    }

    pub fn registry(&self) -> &HistogramRegistry {
        &self.registry
    }
}
