//! Track QA: pT and tgl spectra before any cut.

use common::HistogramRegistry;
use tracing::{debug, info};

use crate::track::TrackParCov;

pub const H_PT_NOCUTS: &str = "hpt_nocuts";
pub const H_TGL_NOCUTS: &str = "htgl_nocuts";

pub struct TrackQa {
    registry: HistogramRegistry,
}

impl TrackQa {
    pub fn new() -> Self {
        let mut registry = HistogramRegistry::new();
        registry.add(H_PT_NOCUTS, "pt tracks (#GeV)", 100, 0.0, 10.0);
        registry.add(H_TGL_NOCUTS, "tgl tracks (#GeV)", 100, 0.0, 10.0);
        Self { registry }
    }

    pub fn process_collision<'a>(
        &mut self,
        tracks: impl ExactSizeIterator<Item = &'a TrackParCov>,
    ) {
        info!("Tracks for collision: {}", tracks.len());
        for track in tracks {
            self.registry.fill(H_PT_NOCUTS, track.pt());
            self.registry.fill(H_TGL_NOCUTS, track.tgl);
            debug!("track tgl {:.6}", track.tgl);
        }
    }

    pub fn registry(&self) -> &HistogramRegistry {
        &self.registry
    }
}

impl Default for TrackQa {
    fn default() -> Self {
        Self::new()
    }
}
