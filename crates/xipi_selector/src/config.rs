//! Configuration structs for the Ξπ candidate selector.

use common::Error;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Topological, kinematic, and track-quality thresholds plus PID and mass-window settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectorConfig {
    // LF analysis selections
    #[serde(default = "default_radius_casc_min")]
    pub radius_casc_min: f64,

    #[serde(default = "default_radius_v0_min")]
    pub radius_v0_min: f64,

    #[serde(default = "default_cos_pa_min")]
    pub cos_pa_v0_min: f64,

    #[serde(default = "default_cos_pa_min")]
    pub cos_pa_casc_min: f64,

    #[serde(default = "default_dca_lf_dau_max")]
    pub dca_casc_dau_max: f64,

    #[serde(default = "default_dca_lf_dau_max")]
    pub dca_v0_dau_max: f64,

    #[serde(default = "default_dca_bach_to_pv_min")]
    pub dca_bach_to_pv_min: f64,

    #[serde(default = "default_dca_v0_dau_to_pv_min")]
    pub dca_neg_to_pv_min: f64,

    #[serde(default = "default_dca_v0_dau_to_pv_min")]
    pub dca_pos_to_pv_min: f64,

    #[serde(default = "default_mass_window")]
    pub v0_mass_window: f64,

    #[serde(default = "default_mass_window")]
    pub cascade_mass_window: f64,

    /// Apply TPC quality cuts to the V0 and cascade daughters too.
    #[serde(default = "default_true")]
    pub apply_trk_sel_lf: bool,

    // charm baryon invariant mass interval (2.4 for Omegac0 only)
    #[serde(default = "default_inv_mass_charm_baryon_min")]
    pub inv_mass_charm_baryon_min: f64,

    #[serde(default = "default_inv_mass_charm_baryon_max")]
    pub inv_mass_charm_baryon_max: f64,

    // kinematic selections
    #[serde(default = "default_eta_track_charm_bach_max")]
    pub eta_track_charm_bach_max: f64,

    #[serde(default = "default_eta_track_lf_dau_max")]
    pub eta_track_lf_dau_max: f64,

    #[serde(default = "default_pt_pi_from_casc_min")]
    pub pt_pi_from_casc_min: f64,

    #[serde(default = "default_pt_pi_from_charm_baryon_min")]
    pub pt_pi_from_charm_baryon_min: f64,

    #[serde(default)]
    pub impact_parameter_xy_pi_from_charm_baryon_min: f64,

    #[serde(default = "default_impact_parameter_max")]
    pub impact_parameter_xy_pi_from_charm_baryon_max: f64,

    #[serde(default)]
    pub impact_parameter_z_pi_from_charm_baryon_min: f64,

    #[serde(default = "default_impact_parameter_max")]
    pub impact_parameter_z_pi_from_charm_baryon_max: f64,

    #[serde(default)]
    pub impact_parameter_xy_casc_min: f64,

    #[serde(default = "default_impact_parameter_max")]
    pub impact_parameter_xy_casc_max: f64,

    #[serde(default)]
    pub impact_parameter_z_casc_min: f64,

    #[serde(default = "default_impact_parameter_max")]
    pub impact_parameter_z_casc_max: f64,

    #[serde(default = "default_dca_charm_baryon_dau_max")]
    pub dca_charm_baryon_dau_max: f64,

    /// PID mode and per-species nσ windows.
    #[serde(default)]
    pub pid: PidConfig,

    /// Detector track-quality thresholds.
    #[serde(default)]
    pub quality: TrackQualityConfig,
}

/// PID mode switches and per-species settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PidConfig {
    #[serde(default)]
    pub use_pid_tpc_only: bool,

    #[serde(default = "default_true")]
    pub use_pid_tpc_tof_combined: bool,

    #[serde(default)]
    pub pion: SpeciesPidConfig,

    #[serde(default)]
    pub proton: SpeciesPidConfig,
}

/// Track pT validity ranges and symmetric nσ bounds for one species.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeciesPidConfig {
    #[serde(default = "default_pt_pid_min")]
    pub pt_pid_tpc_min: f64,

    #[serde(default = "default_pt_pid_max")]
    pub pt_pid_tpc_max: f64,

    #[serde(default = "default_n_sigma_max")]
    pub n_sigma_tpc_max: f64,

    /// TPC bound applied when TOF is available too.
    #[serde(default)]
    pub n_sigma_tpc_combined_max: f64,

    #[serde(default = "default_pt_pid_min")]
    pub pt_pid_tof_min: f64,

    #[serde(default = "default_pt_pid_max")]
    pub pt_pid_tof_max: f64,

    #[serde(default = "default_n_sigma_max")]
    pub n_sigma_tof_max: f64,

    /// TOF bound applied when TPC is available too.
    #[serde(default)]
    pub n_sigma_tof_combined_max: f64,
}

/// TPC and ITS track-quality requirements.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackQualityConfig {
    #[serde(default = "default_n_clusters_tpc_min")]
    pub n_clusters_tpc_min: i32,

    #[serde(default = "default_n_tpc_crossed_rows_min")]
    pub n_tpc_crossed_rows_min: i32,

    #[serde(default = "default_crossed_rows_ratio_min")]
    pub tpc_crossed_rows_over_findable_clusters_ratio_min: f64,

    #[serde(default = "default_tpc_chi2_per_cluster_max")]
    pub tpc_chi2_per_cluster_max: f64,

    /// Applied to the pion from the charm baryon only.
    #[serde(default = "default_n_clusters_its_min")]
    pub n_clusters_its_min: i32,

    /// Applied to the pion from the charm baryon only.
    #[serde(default = "default_n_clusters_its_inn_barr_min")]
    pub n_clusters_its_inn_barr_min: i32,

    /// Applied to the pion from the charm baryon only.
    #[serde(default = "default_its_chi2_per_cluster_max")]
    pub its_chi2_per_cluster_max: f64,
}

/// Which PID combination to evaluate. Built only from a validated `PidConfig`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PidMode {
    TpcOnly,
    TpcOrTof,
}

impl PidConfig {
    /// Resolve the mode switches; exactly one must be set.
    pub fn mode(&self) -> Result<PidMode, Error> {
        match (self.use_pid_tpc_only, self.use_pid_tpc_tof_combined) {
            (true, false) => Ok(PidMode::TpcOnly),
            (false, true) => Ok(PidMode::TpcOrTof),
            (tpc_only, tpc_tof_combined) => Err(Error::PidMode {
                tpc_only,
                tpc_tof_combined,
            }),
        }
    }
}

impl SelectorConfig {
    /// Reject configurations that can't be evaluated.
    ///
    /// Degenerate mass cuts are legal: they only make the matching status flag
    /// false for every candidate.
    pub fn validate(&self) -> Result<(), Error> {
        self.pid.mode()?;

        if self.inv_mass_charm_baryon_min > self.inv_mass_charm_baryon_max {
            warn!(
                "charm baryon mass interval [{}, {}] is empty",
                self.inv_mass_charm_baryon_min, self.inv_mass_charm_baryon_max
            );
        }
        if self.v0_mass_window < 0.0 || self.cascade_mass_window < 0.0 {
            warn!(
                "negative mass window (v0 {}, cascade {}), no candidate will pass",
                self.v0_mass_window, self.cascade_mass_window
            );
        }
        Ok(())
    }
}

// ── Defaults ──────────────────────────────────────────────────────────

fn default_true() -> bool {
    true
}
fn default_radius_casc_min() -> f64 {
    0.6
}
fn default_radius_v0_min() -> f64 {
    1.2
}
fn default_cos_pa_min() -> f64 {
    0.97
}
fn default_dca_lf_dau_max() -> f64 {
    1.0
}
fn default_dca_bach_to_pv_min() -> f64 {
    0.04
}
fn default_dca_v0_dau_to_pv_min() -> f64 {
    0.06
}
fn default_mass_window() -> f64 {
    0.01
}
fn default_inv_mass_charm_baryon_min() -> f64 {
    2.0
}
fn default_inv_mass_charm_baryon_max() -> f64 {
    3.1
}
fn default_eta_track_charm_bach_max() -> f64 {
    0.8
}
fn default_eta_track_lf_dau_max() -> f64 {
    1.0
}
fn default_pt_pi_from_casc_min() -> f64 {
    0.15
}
fn default_pt_pi_from_charm_baryon_min() -> f64 {
    0.2
}
fn default_impact_parameter_max() -> f64 {
    10.0
}
fn default_dca_charm_baryon_dau_max() -> f64 {
    2.0
}
fn default_pt_pid_min() -> f64 {
    -1.0
}
fn default_pt_pid_max() -> f64 {
    9999.9
}
fn default_n_sigma_max() -> f64 {
    3.0
}
fn default_n_clusters_tpc_min() -> i32 {
    70
}
fn default_n_tpc_crossed_rows_min() -> i32 {
    70
}
fn default_crossed_rows_ratio_min() -> f64 {
    0.8
}
fn default_tpc_chi2_per_cluster_max() -> f64 {
    4.0
}
fn default_n_clusters_its_min() -> i32 {
    3
}
fn default_n_clusters_its_inn_barr_min() -> i32 {
    1
}
fn default_its_chi2_per_cluster_max() -> f64 {
    36.0
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            radius_casc_min: default_radius_casc_min(),
            radius_v0_min: default_radius_v0_min(),
            cos_pa_v0_min: default_cos_pa_min(),
            cos_pa_casc_min: default_cos_pa_min(),
            dca_casc_dau_max: default_dca_lf_dau_max(),
            dca_v0_dau_max: default_dca_lf_dau_max(),
            dca_bach_to_pv_min: default_dca_bach_to_pv_min(),
            dca_neg_to_pv_min: default_dca_v0_dau_to_pv_min(),
            dca_pos_to_pv_min: default_dca_v0_dau_to_pv_min(),
            v0_mass_window: default_mass_window(),
            cascade_mass_window: default_mass_window(),
            apply_trk_sel_lf: true,
            inv_mass_charm_baryon_min: default_inv_mass_charm_baryon_min(),
            inv_mass_charm_baryon_max: default_inv_mass_charm_baryon_max(),
            eta_track_charm_bach_max: default_eta_track_charm_bach_max(),
            eta_track_lf_dau_max: default_eta_track_lf_dau_max(),
            pt_pi_from_casc_min: default_pt_pi_from_casc_min(),
            pt_pi_from_charm_baryon_min: default_pt_pi_from_charm_baryon_min(),
            impact_parameter_xy_pi_from_charm_baryon_min: 0.0,
            impact_parameter_xy_pi_from_charm_baryon_max: default_impact_parameter_max(),
            impact_parameter_z_pi_from_charm_baryon_min: 0.0,
            impact_parameter_z_pi_from_charm_baryon_max: default_impact_parameter_max(),
            impact_parameter_xy_casc_min: 0.0,
            impact_parameter_xy_casc_max: default_impact_parameter_max(),
            impact_parameter_z_casc_min: 0.0,
            impact_parameter_z_casc_max: default_impact_parameter_max(),
            dca_charm_baryon_dau_max: default_dca_charm_baryon_dau_max(),
            pid: PidConfig::default(),
            quality: TrackQualityConfig::default(),
        }
    }
}

impl Default for PidConfig {
    fn default() -> Self {
        Self {
            use_pid_tpc_only: false,
            use_pid_tpc_tof_combined: true,
            pion: SpeciesPidConfig::default(),
            proton: SpeciesPidConfig::default(),
        }
    }
}

impl Default for SpeciesPidConfig {
    fn default() -> Self {
        Self {
            pt_pid_tpc_min: default_pt_pid_min(),
            pt_pid_tpc_max: default_pt_pid_max(),
            n_sigma_tpc_max: default_n_sigma_max(),
            n_sigma_tpc_combined_max: 0.0,
            pt_pid_tof_min: default_pt_pid_min(),
            pt_pid_tof_max: default_pt_pid_max(),
            n_sigma_tof_max: default_n_sigma_max(),
            n_sigma_tof_combined_max: 0.0,
        }
    }
}

impl Default for TrackQualityConfig {
    fn default() -> Self {
        Self {
            n_clusters_tpc_min: default_n_clusters_tpc_min(),
            n_tpc_crossed_rows_min: default_n_tpc_crossed_rows_min(),
            tpc_crossed_rows_over_findable_clusters_ratio_min: default_crossed_rows_ratio_min(),
            tpc_chi2_per_cluster_max: default_tpc_chi2_per_cluster_max(),
            n_clusters_its_min: default_n_clusters_its_min(),
            n_clusters_its_inn_barr_min: default_n_clusters_its_inn_barr_min(),
            its_chi2_per_cluster_max: default_its_chi2_per_cluster_max(),
        }
    }
}
