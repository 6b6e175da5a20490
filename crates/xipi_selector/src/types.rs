//! Candidate, track, and selection-record types.

use serde::{Deserialize, Serialize};

// ── Input Types ───────────────────────────────────────────────────────

/// A reconstructed charm baryon → Ξπ candidate (Ξ → Λπ, Λ → pπ).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct XiPiCandidate {
    /// Positive V0 daughter, index into the LF track table.
    pub pos_track_id: i64,
    /// Negative V0 daughter, index into the LF track table.
    pub neg_track_id: i64,
    /// Pion from the cascade, index into the LF track table.
    pub bachelor_id: i64,
    /// Pion from the charm baryon, index into the primary track table.
    pub bachelor_from_charm_baryon_id: i64,
    /// Sign of the pion from the cascade.
    pub sign_decay: i8,

    pub x_decay_vtx_v0: f64,
    pub y_decay_vtx_v0: f64,
    pub x_decay_vtx_cascade: f64,
    pub y_decay_vtx_cascade: f64,

    pub cos_pa_v0: f64,
    pub cos_pa_casc: f64,

    pub dca_casc_dau: f64,
    pub dca_v0_dau: f64,
    pub dca_charm_baryon_dau: f64,

    pub dca_xy_to_pv_v0_dau0: f64,
    pub dca_xy_to_pv_v0_dau1: f64,
    pub dca_xy_to_pv_casc_dau: f64,

    pub impact_par_bach_from_charm_baryon_xy: f64,
    pub impact_par_bach_from_charm_baryon_z: f64,
    pub impact_par_casc_xy: f64,
    pub impact_par_casc_z: f64,

    pub px_bach_from_casc: f64,
    pub py_bach_from_casc: f64,
    pub px_bach_from_charm_baryon: f64,
    pub py_bach_from_charm_baryon: f64,

    pub eta_v0_pos_dau: f64,
    pub eta_v0_neg_dau: f64,
    pub eta_bach_from_casc: f64,
    pub eta_bach_from_charm_baryon: f64,

    pub inv_mass_lambda: f64,
    pub inv_mass_cascade: f64,
    pub inv_mass_charm_baryon: f64,
}

impl XiPiCandidate {
    pub fn radius_v0(&self) -> f64 {
        self.x_decay_vtx_v0.hypot(self.y_decay_vtx_v0)
    }

    pub fn radius_cascade(&self) -> f64 {
        self.x_decay_vtx_cascade.hypot(self.y_decay_vtx_cascade)
    }

    pub fn pt_pi_from_casc(&self) -> f64 {
        self.px_bach_from_casc.hypot(self.py_bach_from_casc)
    }

    pub fn pt_pi_from_charm_baryon(&self) -> f64 {
        self.px_bach_from_charm_baryon
            .hypot(self.py_bach_from_charm_baryon)
    }
}

/// Track record with detector bookkeeping and PID response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PidTrack {
    pub pt: f64,
    #[serde(default)]
    pub has_tpc: bool,
    #[serde(default)]
    pub has_tof: bool,

    #[serde(default)]
    pub tpc_n_cls_findable: i32,
    #[serde(default)]
    pub tpc_n_cls_findable_minus_found: i32,
    #[serde(default)]
    pub tpc_n_cls_findable_minus_crossed_rows: i32,
    #[serde(default)]
    pub tpc_chi2_n_cl: f64,

    /// One bit per ITS layer, layer 0 in the lowest bit.
    #[serde(default)]
    pub its_cluster_map: u8,
    #[serde(default)]
    pub its_chi2_n_cl: f64,

    #[serde(default)]
    pub tpc_n_sigma_pi: f64,
    #[serde(default)]
    pub tpc_n_sigma_pr: f64,
    #[serde(default)]
    pub tof_n_sigma_pi: f64,
    #[serde(default)]
    pub tof_n_sigma_pr: f64,
}

/// ITS inner barrel = layers 0..3.
const ITS_INNER_BARREL_MASK: u8 = 0b0000_0111;

impl PidTrack {
    pub fn tpc_n_cls_found(&self) -> i32 {
        self.tpc_n_cls_findable - self.tpc_n_cls_findable_minus_found
    }

    pub fn tpc_n_cls_crossed_rows(&self) -> i32 {
        self.tpc_n_cls_findable - self.tpc_n_cls_findable_minus_crossed_rows
    }

    /// Crossed rows over findable clusters; 0 when nothing is findable.
    pub fn tpc_crossed_rows_over_findable_cls(&self) -> f64 {
        if self.tpc_n_cls_findable <= 0 {
            return 0.0;
        }
        self.tpc_n_cls_crossed_rows() as f64 / self.tpc_n_cls_findable as f64
    }

    pub fn its_n_cls(&self) -> i32 {
        self.its_cluster_map.count_ones() as i32
    }

    pub fn its_n_cls_inner_barrel(&self) -> i32 {
        (self.its_cluster_map & ITS_INNER_BARREL_MASK).count_ones() as i32
    }
}

/// Particle hypothesis used for PID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Species {
    Pion,
    Proton,
}

impl PidTrack {
    pub fn tpc_n_sigma(&self, species: Species) -> f64 {
        match species {
            Species::Pion => self.tpc_n_sigma_pi,
            Species::Proton => self.tpc_n_sigma_pr,
        }
    }

    pub fn tof_n_sigma(&self, species: Species) -> f64 {
        match species {
            Species::Pion => self.tof_n_sigma_pi,
            Species::Proton => self.tof_n_sigma_pr,
        }
    }
}

/// Logical role of a track in the decay chain. The discriminant is the bit
/// position in the detector-presence masks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackRole {
    PiFromLam = 0,
    PrFromLam = 1,
    PiFromCasc = 2,
    PiFromCharm = 3,
}

impl TrackRole {
    pub const ALL: [TrackRole; 4] = [
        TrackRole::PiFromLam,
        TrackRole::PrFromLam,
        TrackRole::PiFromCasc,
        TrackRole::PiFromCharm,
    ];

    pub fn bit(self) -> i32 {
        1 << (self as i32)
    }

    pub fn species(self) -> Species {
        match self {
            TrackRole::PrFromLam => Species::Proton,
            _ => Species::Pion,
        }
    }
}

/// The four tracks of a candidate after sign-based role assignment.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedTracks<'a> {
    pub pi_from_lam: &'a PidTrack,
    pub pr_from_lam: &'a PidTrack,
    pub pi_from_casc: &'a PidTrack,
    pub pi_from_charm: &'a PidTrack,
}

impl<'a> ResolvedTracks<'a> {
    /// Assign V0 daughters to proton/pion from the cascade decay sign.
    ///
    /// `sign_decay > 0` is the antiparticle decay: positive daughter is the
    /// pion. Zero keeps the particle-decay assignment.
    pub fn assign(
        sign_decay: i8,
        v0_pos: &'a PidTrack,
        v0_neg: &'a PidTrack,
        pi_from_casc: &'a PidTrack,
        pi_from_charm: &'a PidTrack,
    ) -> Self {
        let (pi_from_lam, pr_from_lam) = if sign_decay > 0 {
            (v0_pos, v0_neg)
        } else {
            (v0_neg, v0_pos)
        };
        Self {
            pi_from_lam,
            pr_from_lam,
            pi_from_casc,
            pi_from_charm,
        }
    }

    pub fn get(&self, role: TrackRole) -> &'a PidTrack {
        match role {
            TrackRole::PiFromLam => self.pi_from_lam,
            TrackRole::PrFromLam => self.pr_from_lam,
            TrackRole::PiFromCasc => self.pi_from_casc,
            TrackRole::PiFromCharm => self.pi_from_charm,
        }
    }
}

// ── Output Types ──────────────────────────────────────────────────────

/// Selection outcome for one candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionRecord {
    pub status_pid_lambda: bool,
    pub status_pid_cascade: bool,
    pub status_pid_charm_baryon: bool,
    pub status_inv_mass_lambda: bool,
    pub status_inv_mass_cascade: bool,
    pub status_inv_mass_charm_baryon: bool,
    /// All topological, kinematic, and track-quality cuts passed.
    pub result_selections: bool,
    /// Bit `TrackRole as i32` set when that track has TPC information.
    pub pid_tpc_info_stored: i32,
    /// Bit `TrackRole as i32` set when that track has TOF information.
    pub pid_tof_info_stored: i32,

    pub tpc_n_sigma_pi_from_charm_baryon: f64,
    pub tpc_n_sigma_pi_from_casc: f64,
    pub tpc_n_sigma_pi_from_lambda: f64,
    pub tpc_n_sigma_pr_from_lambda: f64,
    pub tof_n_sigma_pi_from_charm_baryon: f64,
    pub tof_n_sigma_pi_from_casc: f64,
    pub tof_n_sigma_pi_from_lambda: f64,
    pub tof_n_sigma_pr_from_lambda: f64,
}

impl SelectionRecord {
    /// Every gate passed: topology, the three PID levels, the three mass windows.
    pub fn is_fully_selected(&self) -> bool {
        self.result_selections
            && self.status_pid_lambda
            && self.status_pid_cascade
            && self.status_pid_charm_baryon
            && self.status_inv_mass_lambda
            && self.status_inv_mass_cascade
            && self.status_inv_mass_charm_baryon
    }
}

/// One batch of selector input: candidates plus the two track tables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelectorInput {
    pub candidates: Vec<XiPiCandidate>,
    /// Primary tracks (pion from the charm baryon).
    #[serde(default)]
    pub tracks: Vec<PidTrack>,
    /// LF tracks (V0 daughters and pion from the cascade).
    #[serde(default)]
    pub lf_tracks: Vec<PidTrack>,
}
