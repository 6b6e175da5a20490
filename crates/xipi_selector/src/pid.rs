//! Track-level PID: nσ windows per detector, with TPC/TOF combination.

use crate::config::SpeciesPidConfig;
use crate::types::{PidTrack, Species};

/// Verdict of a PID check, ordered from least to most favourable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PidStatus {
    /// The detector can't be used for this track (missing or out of pT range).
    NotApplicable,
    Rejected,
    /// Outside the standalone window but inside the window used when the
    /// other detector also answers.
    Conditional,
    Accepted,
}

/// Species-specific PID scoring.
pub trait PidSelector: Send + Sync {
    fn status_tpc(&self, track: &PidTrack) -> PidStatus;

    fn status_tof(&self, track: &PidTrack) -> PidStatus;

    /// TPC, falling back to TOF.
    fn status_tpc_or_tof(&self, track: &PidTrack) -> PidStatus {
        let tpc = self.status_tpc(track);
        let tof = self.status_tof(track);
        if tpc == PidStatus::Accepted || tof == PidStatus::Accepted {
            return PidStatus::Accepted;
        }
        if tpc == PidStatus::Conditional && tof == PidStatus::Conditional {
            return PidStatus::Accepted;
        }
        if tpc == PidStatus::NotApplicable && tof == PidStatus::NotApplicable {
            return PidStatus::NotApplicable;
        }
        PidStatus::Rejected
    }
}

/// Closed interval; bounds beyond ±999 disable the cut.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

const DISABLED_BOUND: f64 = 999.0;

impl Range {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn symmetric(half_width: f64) -> Self {
        Self::new(-half_width, half_width)
    }

    pub fn contains(&self, x: f64) -> bool {
        self.min <= x && x <= self.max
    }

    pub fn is_disabled(&self) -> bool {
        self.min < -DISABLED_BOUND && self.max > DISABLED_BOUND
    }
}

/// nσ-window PID selector for one particle species.
#[derive(Debug, Clone)]
pub struct TrackSelectorPid {
    species: Species,
    pt_tpc: Range,
    n_sigma_tpc: Range,
    n_sigma_tpc_cond_tof: Range,
    pt_tof: Range,
    n_sigma_tof: Range,
    n_sigma_tof_cond_tpc: Range,
}

impl TrackSelectorPid {
    pub fn new(species: Species, cfg: &SpeciesPidConfig) -> Self {
        Self {
            species,
            pt_tpc: Range::new(cfg.pt_pid_tpc_min, cfg.pt_pid_tpc_max),
            n_sigma_tpc: Range::symmetric(cfg.n_sigma_tpc_max),
            n_sigma_tpc_cond_tof: Range::symmetric(cfg.n_sigma_tpc_combined_max),
            pt_tof: Range::new(cfg.pt_pid_tof_min, cfg.pt_pid_tof_max),
            n_sigma_tof: Range::symmetric(cfg.n_sigma_tof_max),
            n_sigma_tof_cond_tpc: Range::symmetric(cfg.n_sigma_tof_combined_max),
        }
    }

    fn status(n_sigma: f64, window: Range, conditional: Range) -> PidStatus {
        if window.is_disabled() || window.contains(n_sigma) {
            PidStatus::Accepted
        } else if conditional.is_disabled() || conditional.contains(n_sigma) {
            PidStatus::Conditional
        } else {
            PidStatus::Rejected
        }
    }
}

impl PidSelector for TrackSelectorPid {
    fn status_tpc(&self, track: &PidTrack) -> PidStatus {
        if !track.has_tpc || !self.pt_tpc.contains(track.pt) {
            return PidStatus::NotApplicable;
        }
        Self::status(
            track.tpc_n_sigma(self.species),
            self.n_sigma_tpc,
            self.n_sigma_tpc_cond_tof,
        )
    }

    fn status_tof(&self, track: &PidTrack) -> PidStatus {
        if !track.has_tof || !self.pt_tof.contains(track.pt) {
            return PidStatus::NotApplicable;
        }
        Self::status(
            track.tof_n_sigma(self.species),
            self.n_sigma_tof,
            self.n_sigma_tof_cond_tpc,
        )
    }
}
