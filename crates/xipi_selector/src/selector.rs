//! Candidate selector: topological, kinematic, quality, PID and mass-window cuts.
//!
//! Every candidate is evaluated on its own and yields exactly one
//! `SelectionRecord`. The topological/kinematic/quality cuts are AND-reduced
//! into `result_selections`; PID and mass windows are computed independently
//! of that result.

use common::constants::{MASS_LAMBDA0, MASS_XI_MINUS};
use common::Error;
use tracing::{debug, info};

use crate::config::{PidMode, SelectorConfig};
use crate::pid::{PidSelector, PidStatus, TrackSelectorPid};
use crate::qa::{Check, SelectionQa, StatusGate};
use crate::quality::{is_selected_track_its_quality, is_selected_track_tpc_quality};
use crate::types::{
    PidTrack, ResolvedTracks, SelectionRecord, SelectorInput, Species, TrackRole, XiPiCandidate,
};

/// Running AND over the cut list, tallying each cut as it goes.
///
/// Cuts are stated as rejection conditions, so a NaN comparison never rejects.
struct CutFlow<'q> {
    qa: &'q mut SelectionQa,
    passed: bool,
}

impl<'q> CutFlow<'q> {
    fn new(qa: &'q mut SelectionQa) -> Self {
        Self { qa, passed: true }
    }

    fn reject(&mut self, check: Check, failed: bool) {
        if failed {
            self.passed = false;
        }
        self.qa.record(check, !failed);
    }
}

fn outside_abs_range(value: f64, min: f64, max: f64) -> bool {
    let abs = value.abs();
    abs < min || abs > max
}

/// Ξc0 / Ωc0 → Ξπ candidate selector.
pub struct CandidateSelector<P = TrackSelectorPid> {
    config: SelectorConfig,
    pid_mode: PidMode,
    pion: P,
    proton: P,
}

impl CandidateSelector<TrackSelectorPid> {
    /// Build the selector with nσ-window PID from the config.
    ///
    /// Fails on an invalid config, in particular when the PID mode is
    /// ambiguous; no candidate can be evaluated without a valid mode.
    pub fn new(config: SelectorConfig) -> Result<Self, Error> {
        let pion = TrackSelectorPid::new(Species::Pion, &config.pid.pion);
        let proton = TrackSelectorPid::new(Species::Proton, &config.pid.proton);
        Self::with_pid_selectors(config, pion, proton)
    }
}

impl<P: PidSelector> CandidateSelector<P> {
    pub fn with_pid_selectors(config: SelectorConfig, pion: P, proton: P) -> Result<Self, Error> {
        config.validate()?;
        let pid_mode = config.pid.mode()?;
        info!(
            "Candidate selector ready: pid_mode={:?} apply_trk_sel_lf={}",
            pid_mode, config.apply_trk_sel_lf
        );
        Ok(Self {
            config,
            pid_mode,
            pion,
            proton,
        })
    }

    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    /// Look up the four tracks of a candidate and assign roles.
    pub fn resolve<'a>(
        candidate: &XiPiCandidate,
        tracks: &'a [PidTrack],
        lf_tracks: &'a [PidTrack],
    ) -> Result<ResolvedTracks<'a>, Error> {
        let v0_pos = lookup(lf_tracks, "lf", candidate.pos_track_id)?;
        let v0_neg = lookup(lf_tracks, "lf", candidate.neg_track_id)?;
        let pi_from_casc = lookup(lf_tracks, "lf", candidate.bachelor_id)?;
        let pi_from_charm = lookup(tracks, "primary", candidate.bachelor_from_charm_baryon_id)?;
        Ok(ResolvedTracks::assign(
            candidate.sign_decay,
            v0_pos,
            v0_neg,
            pi_from_casc,
            pi_from_charm,
        ))
    }

    /// Evaluate every candidate of a batch, in input order.
    ///
    /// All track references are resolved before any candidate is evaluated,
    /// so a dangling reference fails the batch without partial output.
    pub fn process(
        &self,
        input: &SelectorInput,
        qa: &mut SelectionQa,
    ) -> Result<Vec<SelectionRecord>, Error> {
        self.process_candidates(&input.candidates, &input.tracks, &input.lf_tracks, qa)
    }

    /// Like [`process`](Self::process) for a slice of a batch's candidates.
    pub fn process_candidates(
        &self,
        candidates: &[XiPiCandidate],
        tracks: &[PidTrack],
        lf_tracks: &[PidTrack],
        qa: &mut SelectionQa,
    ) -> Result<Vec<SelectionRecord>, Error> {
        let resolved = candidates
            .iter()
            .map(|cand| Self::resolve(cand, tracks, lf_tracks))
            .collect::<Result<Vec<_>, _>>()?;

        let records: Vec<SelectionRecord> = candidates
            .iter()
            .zip(resolved)
            .map(|(cand, tracks)| self.evaluate(cand, &tracks, qa))
            .collect();

        let selected = records.iter().filter(|r| r.is_fully_selected()).count();
        info!(
            "Processed {} candidates: {} fully selected",
            records.len(),
            selected
        );
        Ok(records)
    }

    /// Evaluate one candidate with already resolved tracks.
    pub fn evaluate(
        &self,
        candidate: &XiPiCandidate,
        tracks: &ResolvedTracks<'_>,
        qa: &mut SelectionQa,
    ) -> SelectionRecord {
        if candidate.sign_decay > 0 {
            qa.record(Check::SignDecay, true); // anti-particle decay
        } else if candidate.sign_decay < 0 {
            qa.record(Check::SignDecay, false); // particle decay
        }

        let result_selections = self.apply_topological_cuts(candidate, tracks, qa);

        // PID
        let status_of = |role: TrackRole| self.pid_status(role, tracks.get(role));
        let pr_from_lam = status_of(TrackRole::PrFromLam) == PidStatus::Accepted;
        let pi_from_lam = status_of(TrackRole::PiFromLam) == PidStatus::Accepted;
        let pi_from_casc = status_of(TrackRole::PiFromCasc) == PidStatus::Accepted;
        let pi_from_charm = status_of(TrackRole::PiFromCharm) == PidStatus::Accepted;

        let status_pid_lambda = pr_from_lam && pi_from_lam;
        let status_pid_cascade = status_pid_lambda && pi_from_casc;
        let status_pid_charm_baryon = status_pid_cascade && pi_from_charm;

        let mut pid_tpc_info_stored = 0;
        let mut pid_tof_info_stored = 0;
        for role in TrackRole::ALL {
            let track = tracks.get(role);
            if track.has_tpc {
                pid_tpc_info_stored |= role.bit();
            }
            if track.has_tof {
                pid_tof_info_stored |= role.bit();
            }
        }

        if result_selections {
            if status_pid_lambda {
                qa.record_status_gate(StatusGate::PidLambda);
            }
            if status_pid_cascade {
                qa.record_status_gate(StatusGate::PidCascade);
            }
            if status_pid_charm_baryon {
                qa.record_status_gate(StatusGate::PidCharmBaryon);
            }
        }
        let all_pid = status_pid_lambda && status_pid_cascade && status_pid_charm_baryon;

        // invariant mass windows
        let status_inv_mass_lambda =
            (candidate.inv_mass_lambda - MASS_LAMBDA0).abs() < self.config.v0_mass_window;
        qa.record(Check::MassLam, status_inv_mass_lambda);
        if status_inv_mass_lambda && all_pid && result_selections {
            qa.record_status_gate(StatusGate::MassLambda);
        }

        let status_inv_mass_cascade =
            (candidate.inv_mass_cascade - MASS_XI_MINUS).abs() < self.config.cascade_mass_window;
        qa.record(Check::MassCasc, status_inv_mass_cascade);
        if status_inv_mass_cascade && status_inv_mass_lambda && all_pid && result_selections {
            qa.record_status_gate(StatusGate::MassCascade);
        }

        let status_inv_mass_charm_baryon = candidate.inv_mass_charm_baryon
            >= self.config.inv_mass_charm_baryon_min
            && candidate.inv_mass_charm_baryon <= self.config.inv_mass_charm_baryon_max;
        qa.record(Check::MassCharmBaryon, status_inv_mass_charm_baryon);
        if status_inv_mass_charm_baryon
            && status_inv_mass_cascade
            && status_inv_mass_lambda
            && all_pid
            && result_selections
        {
            qa.record_status_gate(StatusGate::MassCharmBaryon);
        }

        let record = SelectionRecord {
            status_pid_lambda,
            status_pid_cascade,
            status_pid_charm_baryon,
            status_inv_mass_lambda,
            status_inv_mass_cascade,
            status_inv_mass_charm_baryon,
            result_selections,
            pid_tpc_info_stored,
            pid_tof_info_stored,
            tpc_n_sigma_pi_from_charm_baryon: tracks.pi_from_charm.tpc_n_sigma_pi,
            tpc_n_sigma_pi_from_casc: tracks.pi_from_casc.tpc_n_sigma_pi,
            tpc_n_sigma_pi_from_lambda: tracks.pi_from_lam.tpc_n_sigma_pi,
            tpc_n_sigma_pr_from_lambda: tracks.pr_from_lam.tpc_n_sigma_pr,
            tof_n_sigma_pi_from_charm_baryon: tracks.pi_from_charm.tof_n_sigma_pi,
            tof_n_sigma_pi_from_casc: tracks.pi_from_casc.tof_n_sigma_pi,
            tof_n_sigma_pi_from_lambda: tracks.pi_from_lam.tof_n_sigma_pi,
            tof_n_sigma_pr_from_lambda: tracks.pr_from_lam.tof_n_sigma_pr,
        };

        if result_selections {
            qa.record_pid_summary([
                status_pid_lambda,
                status_pid_cascade,
                status_pid_charm_baryon,
                status_inv_mass_lambda,
                status_inv_mass_cascade,
                status_inv_mass_charm_baryon,
            ]);
        }
        if record.is_fully_selected() {
            qa.record_inv_mass_charm_baryon(candidate.inv_mass_charm_baryon);
        }

        debug!(
            "candidate sign={} topo={} pid=({},{},{}) mass=({},{},{})",
            candidate.sign_decay,
            result_selections,
            status_pid_lambda,
            status_pid_cascade,
            status_pid_charm_baryon,
            status_inv_mass_lambda,
            status_inv_mass_cascade,
            status_inv_mass_charm_baryon
        );

        record
    }

    fn pid_status(&self, role: TrackRole, track: &PidTrack) -> PidStatus {
        let selector = match role.species() {
            Species::Pion => &self.pion,
            Species::Proton => &self.proton,
        };
        match self.pid_mode {
            PidMode::TpcOnly => selector.status_tpc(track),
            PidMode::TpcOrTof => selector.status_tpc_or_tof(track),
        }
    }

    fn apply_topological_cuts(
        &self,
        cand: &XiPiCandidate,
        tracks: &ResolvedTracks<'_>,
        qa: &mut SelectionQa,
    ) -> bool {
        let cfg = &self.config;
        let quality = &cfg.quality;
        let mut flow = CutFlow::new(qa);

        // eta
        flow.reject(
            Check::EtaPosV0Dau,
            cand.eta_v0_pos_dau.abs() > cfg.eta_track_lf_dau_max,
        );
        flow.reject(
            Check::EtaNegV0Dau,
            cand.eta_v0_neg_dau.abs() > cfg.eta_track_lf_dau_max,
        );
        flow.reject(
            Check::EtaPiFromCasc,
            cand.eta_bach_from_casc.abs() > cfg.eta_track_lf_dau_max,
        );
        flow.reject(
            Check::EtaPiFromCharm,
            cand.eta_bach_from_charm_baryon.abs() > cfg.eta_track_charm_bach_max,
        );

        // minimum decay radius
        flow.reject(Check::RadiusCasc, cand.radius_cascade() < cfg.radius_casc_min);
        flow.reject(Check::RadiusV0, cand.radius_v0() < cfg.radius_v0_min);

        // cosPA
        flow.reject(Check::CosPaCasc, cand.cos_pa_casc < cfg.cos_pa_casc_min);
        flow.reject(Check::CosPaV0, cand.cos_pa_v0 < cfg.cos_pa_v0_min);

        // daughters DCA
        flow.reject(Check::DcaCascDau, cand.dca_casc_dau > cfg.dca_casc_dau_max);
        flow.reject(Check::DcaV0Dau, cand.dca_v0_dau > cfg.dca_v0_dau_max);
        flow.reject(
            Check::DcaCharmDau,
            cand.dca_charm_baryon_dau > cfg.dca_charm_baryon_dau_max,
        );

        // DCA to PV of the LF daughters
        flow.reject(
            Check::DcaXyToPvV0Daughters,
            cand.dca_xy_to_pv_v0_dau0.abs() < cfg.dca_pos_to_pv_min
                || cand.dca_xy_to_pv_v0_dau1.abs() < cfg.dca_neg_to_pv_min,
        );
        flow.reject(
            Check::DcaXyToPvPiFromCasc,
            cand.dca_xy_to_pv_casc_dau.abs() < cfg.dca_bach_to_pv_min,
        );

        // impact parameters
        flow.reject(
            Check::DcaXyPrimPi,
            outside_abs_range(
                cand.impact_par_bach_from_charm_baryon_xy,
                cfg.impact_parameter_xy_pi_from_charm_baryon_min,
                cfg.impact_parameter_xy_pi_from_charm_baryon_max,
            ),
        );
        flow.reject(
            Check::DcaZPrimPi,
            outside_abs_range(
                cand.impact_par_bach_from_charm_baryon_z,
                cfg.impact_parameter_z_pi_from_charm_baryon_min,
                cfg.impact_parameter_z_pi_from_charm_baryon_max,
            ),
        );
        flow.reject(
            Check::DcaXyCasc,
            outside_abs_range(
                cand.impact_par_casc_xy,
                cfg.impact_parameter_xy_casc_min,
                cfg.impact_parameter_xy_casc_max,
            ),
        );
        flow.reject(
            Check::DcaZCasc,
            outside_abs_range(
                cand.impact_par_casc_z,
                cfg.impact_parameter_z_casc_min,
                cfg.impact_parameter_z_casc_max,
            ),
        );

        // pT
        flow.reject(
            Check::PtPiFromCasc,
            cand.pt_pi_from_casc() < cfg.pt_pi_from_casc_min,
        );
        flow.reject(
            Check::PtPiFromCharm,
            cand.pt_pi_from_charm_baryon() < cfg.pt_pi_from_charm_baryon_min,
        );

        // TPC clusters
        if cfg.apply_trk_sel_lf {
            flow.reject(
                Check::TpcQualityPiFromLam,
                !is_selected_track_tpc_quality(tracks.pi_from_lam, quality),
            );
            flow.reject(
                Check::TpcQualityPrFromLam,
                !is_selected_track_tpc_quality(tracks.pr_from_lam, quality),
            );
            flow.reject(
                Check::TpcQualityPiFromCasc,
                !is_selected_track_tpc_quality(tracks.pi_from_casc, quality),
            );
        }
        flow.reject(
            Check::TpcQualityPiFromCharm,
            !is_selected_track_tpc_quality(tracks.pi_from_charm, quality),
        );

        // ITS clusters
        flow.reject(
            Check::ItsQualityPiFromCharm,
            !is_selected_track_its_quality(tracks.pi_from_charm, quality)
                || tracks.pi_from_charm.its_n_cls_inner_barrel()
                    < quality.n_clusters_its_inn_barr_min,
        );

        flow.passed
    }
}

fn lookup<'a>(
    table: &'a [PidTrack],
    name: &'static str,
    index: i64,
) -> Result<&'a PidTrack, Error> {
    usize::try_from(index)
        .ok()
        .and_then(|i| table.get(i))
        .ok_or(Error::TrackIndex {
            table: name,
            index,
            len: table.len(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qa::{H_INV_MASS_CHARM_BARYON, H_SEL_PID, H_STATUS_CHECK};

    fn make_track(n_sigma: f64) -> PidTrack {
        PidTrack {
            pt: 1.0,
            has_tpc: true,
            has_tof: true,
            tpc_n_cls_findable: 120,
            tpc_n_cls_findable_minus_found: 10,
            tpc_n_cls_findable_minus_crossed_rows: 5,
            tpc_chi2_n_cl: 1.5,
            its_cluster_map: 0b0111_1111,
            its_chi2_n_cl: 2.0,
            tpc_n_sigma_pi: n_sigma,
            tpc_n_sigma_pr: n_sigma,
            tof_n_sigma_pi: n_sigma,
            tof_n_sigma_pr: n_sigma,
        }
    }

    /// LF tracks: 0 = V0 positive, 1 = V0 negative, 2 = pion from cascade.
    /// Primary tracks: 0 = pion from charm baryon.
    fn make_candidate() -> XiPiCandidate {
        XiPiCandidate {
            pos_track_id: 0,
            neg_track_id: 1,
            bachelor_id: 2,
            bachelor_from_charm_baryon_id: 0,
            sign_decay: -1,
            x_decay_vtx_v0: 3.0,
            y_decay_vtx_v0: 4.0,
            x_decay_vtx_cascade: 1.0,
            y_decay_vtx_cascade: 1.0,
            cos_pa_v0: 0.99,
            cos_pa_casc: 0.99,
            dca_casc_dau: 0.5,
            dca_v0_dau: 0.5,
            dca_charm_baryon_dau: 0.5,
            dca_xy_to_pv_v0_dau0: 0.2,
            dca_xy_to_pv_v0_dau1: -0.2,
            dca_xy_to_pv_casc_dau: 0.1,
            impact_par_bach_from_charm_baryon_xy: 0.01,
            impact_par_bach_from_charm_baryon_z: -0.01,
            impact_par_casc_xy: 0.02,
            impact_par_casc_z: 0.02,
            px_bach_from_casc: 0.3,
            py_bach_from_casc: 0.4,
            px_bach_from_charm_baryon: 0.6,
            py_bach_from_charm_baryon: 0.8,
            eta_v0_pos_dau: 0.1,
            eta_v0_neg_dau: -0.1,
            eta_bach_from_casc: 0.2,
            eta_bach_from_charm_baryon: 0.3,
            inv_mass_lambda: MASS_LAMBDA0,
            inv_mass_cascade: MASS_XI_MINUS,
            inv_mass_charm_baryon: 2.47,
        }
    }

    fn make_input(candidates: Vec<XiPiCandidate>) -> SelectorInput {
        SelectorInput {
            candidates,
            tracks: vec![make_track(0.5)],
            lf_tracks: vec![make_track(0.5), make_track(0.5), make_track(0.5)],
        }
    }

    fn selector() -> CandidateSelector {
        CandidateSelector::new(SelectorConfig::default()).unwrap()
    }

    fn evaluate_one(
        sel: &CandidateSelector,
        cand: &XiPiCandidate,
        qa: &mut SelectionQa,
    ) -> SelectionRecord {
        let input = make_input(vec![cand.clone()]);
        sel.process(&input, qa).unwrap().remove(0)
    }

    #[test]
    fn test_good_candidate_passes_everything() {
        let mut qa = SelectionQa::new();
        let rec = evaluate_one(&selector(), &make_candidate(), &mut qa);
        assert!(rec.is_fully_selected());
        assert_eq!(rec.pid_tpc_info_stored, 0b1111);
        assert_eq!(rec.pid_tof_info_stored, 0b1111);

        let status = qa.registry().get(H_STATUS_CHECK).unwrap();
        for gate in 0..6 {
            assert_eq!(status.bin(gate), 1.0, "gate {}", gate);
        }
        assert_eq!(qa.registry().get(H_INV_MASS_CHARM_BARYON).unwrap().integral(), 1.0);
    }

    #[test]
    fn test_ambiguous_pid_mode_fails_construction() {
        let mut cfg = SelectorConfig::default();
        cfg.pid.use_pid_tpc_only = true;
        assert!(matches!(
            CandidateSelector::new(cfg),
            Err(Error::PidMode { .. })
        ));

        let mut cfg = SelectorConfig::default();
        cfg.pid.use_pid_tpc_tof_combined = false;
        assert!(CandidateSelector::new(cfg).is_err());
    }

    #[test]
    fn test_small_cascade_radius_fails_only_that_cut() {
        let sel = selector();
        let mut qa = SelectionQa::new();
        let cand = XiPiCandidate {
            x_decay_vtx_cascade: 0.5,
            y_decay_vtx_cascade: 0.0,
            ..make_candidate()
        };
        let rec = evaluate_one(&sel, &cand, &mut qa);

        assert!(!rec.result_selections);
        assert_eq!(qa.tally(Check::RadiusCasc), (1, 0));
        for check in Check::ALL {
            if matches!(check, Check::RadiusCasc | Check::SignDecay) {
                continue;
            }
            assert_eq!(qa.tally(check).0, 0, "{:?} should not fail", check);
        }
        // PID and mass flags are still computed.
        assert!(rec.status_pid_charm_baryon);
        assert!(rec.status_inv_mass_lambda);
        assert!(rec.status_inv_mass_cascade);
        assert!(rec.status_inv_mass_charm_baryon);
        // No summary or spectrum entries without topological selection.
        assert_eq!(qa.registry().get(H_SEL_PID).unwrap().entries, 0);
        assert_eq!(qa.registry().get(H_INV_MASS_CHARM_BARYON).unwrap().entries, 0);
    }

    #[test]
    fn test_every_cut_can_fail_alone() {
        let with = |edit: fn(&mut XiPiCandidate)| {
            let mut cand = make_candidate();
            edit(&mut cand);
            cand
        };
        let variants: Vec<(Check, XiPiCandidate)> = vec![
            (Check::EtaPosV0Dau, with(|c| c.eta_v0_pos_dau = 1.1)),
            (Check::EtaNegV0Dau, with(|c| c.eta_v0_neg_dau = -1.1)),
            (Check::EtaPiFromCasc, with(|c| c.eta_bach_from_casc = 1.5)),
            (Check::EtaPiFromCharm, with(|c| c.eta_bach_from_charm_baryon = 0.9)),
            (
                Check::RadiusV0,
                with(|c| {
                    c.x_decay_vtx_v0 = 0.5;
                    c.y_decay_vtx_v0 = 0.5;
                }),
            ),
            (Check::CosPaCasc, with(|c| c.cos_pa_casc = 0.9)),
            (Check::CosPaV0, with(|c| c.cos_pa_v0 = 0.9)),
            (Check::DcaCascDau, with(|c| c.dca_casc_dau = 1.5)),
            (Check::DcaV0Dau, with(|c| c.dca_v0_dau = 1.5)),
            (Check::DcaCharmDau, with(|c| c.dca_charm_baryon_dau = 2.5)),
            (Check::DcaXyToPvV0Daughters, with(|c| c.dca_xy_to_pv_v0_dau1 = 0.01)),
            (Check::DcaXyToPvPiFromCasc, with(|c| c.dca_xy_to_pv_casc_dau = -0.01)),
            (
                Check::DcaXyPrimPi,
                with(|c| c.impact_par_bach_from_charm_baryon_xy = -11.0),
            ),
            (
                Check::DcaZPrimPi,
                with(|c| c.impact_par_bach_from_charm_baryon_z = 12.0),
            ),
            (Check::DcaXyCasc, with(|c| c.impact_par_casc_xy = 10.5)),
            (Check::DcaZCasc, with(|c| c.impact_par_casc_z = -10.5)),
            (
                Check::PtPiFromCasc,
                with(|c| {
                    c.px_bach_from_casc = 0.1;
                    c.py_bach_from_casc = 0.0;
                }),
            ),
            (
                Check::PtPiFromCharm,
                with(|c| {
                    c.px_bach_from_charm_baryon = 0.1;
                    c.py_bach_from_charm_baryon = 0.1;
                }),
            ),
        ];

        let sel = selector();
        for (failing, cand) in variants {
            let mut qa = SelectionQa::new();
            let rec = evaluate_one(&sel, &cand, &mut qa);
            assert!(!rec.result_selections, "{:?}", failing);
            for check in Check::ALL {
                let (fail, _) = qa.tally(check);
                let expected = if check == failing || check == Check::SignDecay {
                    fail
                } else {
                    0
                };
                assert_eq!(fail, expected, "{:?} failing changed {:?}", failing, check);
            }
            assert_eq!(qa.tally(failing), (1, 0), "{:?}", failing);
        }
    }

    #[test]
    fn test_impact_parameter_lower_bound() {
        let cfg = SelectorConfig {
            impact_parameter_xy_casc_min: 0.05,
            ..SelectorConfig::default()
        };
        let sel = CandidateSelector::new(cfg).unwrap();
        let mut qa = SelectionQa::new();
        let rec = evaluate_one(&sel, &make_candidate(), &mut qa);
        assert!(!rec.result_selections);
        assert_eq!(qa.tally(Check::DcaXyCasc), (1, 0));
    }

    #[test]
    fn test_lf_track_quality_switch() {
        let mut input = make_input(vec![make_candidate()]);
        input.lf_tracks[2].tpc_chi2_n_cl = 10.0;

        let sel = selector();
        let mut qa = SelectionQa::new();
        let rec = sel.process(&input, &mut qa).unwrap().remove(0);
        assert!(!rec.result_selections);
        assert_eq!(qa.tally(Check::TpcQualityPiFromCasc), (1, 0));

        let cfg = SelectorConfig {
            apply_trk_sel_lf: false,
            ..SelectorConfig::default()
        };
        let sel = CandidateSelector::new(cfg).unwrap();
        let mut qa = SelectionQa::new();
        let rec = sel.process(&input, &mut qa).unwrap().remove(0);
        assert!(rec.result_selections);
        assert_eq!(qa.tally(Check::TpcQualityPiFromCasc), (0, 0));
        assert_eq!(qa.tally(Check::TpcQualityPiFromCharm), (0, 1));
    }

    #[test]
    fn test_its_inner_barrel_requirement() {
        let mut input = make_input(vec![make_candidate()]);
        // four outer layers only: enough clusters, none in the inner barrel
        input.tracks[0].its_cluster_map = 0b0111_1000;

        let mut qa = SelectionQa::new();
        let rec = selector().process(&input, &mut qa).unwrap().remove(0);
        assert!(!rec.result_selections);
        assert_eq!(qa.tally(Check::ItsQualityPiFromCharm), (1, 0));
    }

    #[test]
    fn test_sign_decides_proton_and_pion() {
        let mut input = make_input(vec![make_candidate()]);
        input.lf_tracks[0].tpc_n_sigma_pr = 0.1;
        input.lf_tracks[0].tpc_n_sigma_pi = 7.0;
        input.lf_tracks[1].tpc_n_sigma_pr = 7.0;
        input.lf_tracks[1].tpc_n_sigma_pi = 0.2;
        for t in &mut input.lf_tracks[..2] {
            t.has_tof = false;
        }

        // particle decay: positive daughter is the proton
        let sel = selector();
        let mut qa = SelectionQa::new();
        let rec = sel.process(&input, &mut qa).unwrap().remove(0);
        assert!(rec.status_pid_lambda);
        assert_eq!(rec.tpc_n_sigma_pr_from_lambda, 0.1);
        assert_eq!(rec.tpc_n_sigma_pi_from_lambda, 0.2);
        assert_eq!(qa.tally(Check::SignDecay), (1, 0));

        // anti-particle decay: positive daughter is the pion
        input.candidates[0].sign_decay = 1;
        let mut qa = SelectionQa::new();
        let rec = sel.process(&input, &mut qa).unwrap().remove(0);
        assert!(!rec.status_pid_lambda);
        assert_eq!(rec.tpc_n_sigma_pi_from_lambda, 7.0);
        assert_eq!(rec.tpc_n_sigma_pr_from_lambda, 7.0);
        assert_eq!(
            rec.pid_tof_info_stored,
            TrackRole::PiFromCasc.bit() | TrackRole::PiFromCharm.bit()
        );
        assert_eq!(qa.tally(Check::SignDecay), (0, 1));
    }

    #[test]
    fn test_zero_sign_keeps_default_roles_without_tally() {
        let cand = XiPiCandidate {
            sign_decay: 0,
            ..make_candidate()
        };
        let mut qa = SelectionQa::new();
        let rec = evaluate_one(&selector(), &cand, &mut qa);
        assert!(rec.status_pid_lambda);
        assert_eq!(qa.tally(Check::SignDecay), (0, 0));
    }

    #[test]
    fn test_pid_flags_are_nested() {
        let sel = selector();
        // each track in turn fails PID
        for (table, idx) in [("lf", 0), ("lf", 1), ("lf", 2), ("primary", 0)] {
            let mut input = make_input(vec![make_candidate()]);
            let track = match table {
                "lf" => &mut input.lf_tracks[idx],
                _ => &mut input.tracks[idx],
            };
            track.tpc_n_sigma_pi = 5.0;
            track.tpc_n_sigma_pr = 5.0;
            track.tof_n_sigma_pi = 5.0;
            track.tof_n_sigma_pr = 5.0;

            let mut qa = SelectionQa::new();
            let rec = sel.process(&input, &mut qa).unwrap().remove(0);
            assert!(!rec.status_pid_charm_baryon, "{} {}", table, idx);
            assert!(!rec.status_pid_cascade || rec.status_pid_lambda);
            assert!(!rec.status_pid_charm_baryon || rec.status_pid_cascade);
            if table == "primary" {
                assert!(rec.status_pid_cascade);
            }
            if idx == 2 && table == "lf" {
                assert!(rec.status_pid_lambda);
                assert!(!rec.status_pid_cascade);
            }
            // topology untouched by PID
            assert!(rec.result_selections);
        }
    }

    #[test]
    fn test_tpc_only_mode_ignores_tof() {
        let mut cfg = SelectorConfig::default();
        cfg.pid.use_pid_tpc_only = true;
        cfg.pid.use_pid_tpc_tof_combined = false;
        let sel = CandidateSelector::new(cfg).unwrap();

        let mut input = make_input(vec![make_candidate()]);
        input.tracks[0].tpc_n_sigma_pi = 4.0;
        input.tracks[0].tof_n_sigma_pi = 0.0;

        let mut qa = SelectionQa::new();
        let rec = sel.process(&input, &mut qa).unwrap().remove(0);
        assert!(!rec.status_pid_charm_baryon);

        let combined = selector();
        let mut qa = SelectionQa::new();
        let rec = combined.process(&input, &mut qa).unwrap().remove(0);
        assert!(rec.status_pid_charm_baryon);
    }

    #[test]
    fn test_mass_window_is_strict() {
        let sel = selector();
        let window = sel.config().v0_mass_window;

        let inside = XiPiCandidate {
            inv_mass_lambda: MASS_LAMBDA0 + 0.5 * window,
            inv_mass_cascade: MASS_XI_MINUS - 0.5 * window,
            ..make_candidate()
        };
        let mut qa = SelectionQa::new();
        let rec = evaluate_one(&sel, &inside, &mut qa);
        assert!(rec.status_inv_mass_lambda);
        assert!(rec.status_inv_mass_cascade);

        let outside = XiPiCandidate {
            inv_mass_lambda: MASS_LAMBDA0 - 1.5 * window,
            inv_mass_cascade: MASS_XI_MINUS + 1.5 * window,
            ..make_candidate()
        };
        let rec = evaluate_one(&sel, &outside, &mut qa);
        assert!(!rec.status_inv_mass_lambda);
        assert!(!rec.status_inv_mass_cascade);
        // other flags unaffected
        assert!(rec.result_selections);
        assert!(rec.status_inv_mass_charm_baryon);
    }

    #[test]
    fn test_mass_window_boundary_excluded() {
        // An exact match with a zero window sits on the boundary.
        let cfg = SelectorConfig {
            v0_mass_window: 0.0,
            cascade_mass_window: 0.0,
            ..SelectorConfig::default()
        };
        let sel = CandidateSelector::new(cfg).unwrap();
        let mut qa = SelectionQa::new();
        let rec = evaluate_one(&sel, &make_candidate(), &mut qa);
        assert!(!rec.status_inv_mass_lambda);
        assert!(!rec.status_inv_mass_cascade);
    }

    #[test]
    fn test_charm_mass_interval_is_closed() {
        let sel = selector();
        let mut qa = SelectionQa::new();
        for (mass, expected) in [(2.0, true), (3.1, true), (1.99, false), (3.11, false)] {
            let cand = XiPiCandidate {
                inv_mass_charm_baryon: mass,
                ..make_candidate()
            };
            let rec = evaluate_one(&sel, &cand, &mut qa);
            assert_eq!(rec.status_inv_mass_charm_baryon, expected, "mass {}", mass);
        }
    }

    #[test]
    fn test_mass_window_boundary_with_nonzero_window() {
        let lambda = 1.125;
        let cascade = 1.3;
        let cand = XiPiCandidate {
            inv_mass_lambda: lambda,
            inv_mass_cascade: cascade,
            ..make_candidate()
        };
        let on_edge = SelectorConfig {
            v0_mass_window: (lambda - MASS_LAMBDA0).abs(),
            cascade_mass_window: (cascade - MASS_XI_MINUS).abs(),
            ..SelectorConfig::default()
        };
        let sel = CandidateSelector::new(on_edge.clone()).unwrap();
        let mut qa = SelectionQa::new();
        let rec = evaluate_one(&sel, &cand, &mut qa);
        assert!(!rec.status_inv_mass_lambda);
        assert!(!rec.status_inv_mass_cascade);

        let wider = SelectorConfig {
            v0_mass_window: 2.0 * on_edge.v0_mass_window,
            cascade_mass_window: 2.0 * on_edge.cascade_mass_window,
            ..on_edge
        };
        let sel = CandidateSelector::new(wider).unwrap();
        let rec = evaluate_one(&sel, &cand, &mut qa);
        assert!(rec.status_inv_mass_lambda);
        assert!(rec.status_inv_mass_cascade);
    }

    #[test]
    fn test_inverted_charm_mass_interval_selects_nothing() {
        let cfg = SelectorConfig {
            inv_mass_charm_baryon_min: 3.2,
            inv_mass_charm_baryon_max: 3.1,
            ..SelectorConfig::default()
        };
        let sel = CandidateSelector::new(cfg).unwrap();
        let cands: Vec<XiPiCandidate> = [2.0, 2.47, 3.1, 3.15, 3.2, 3.5]
            .into_iter()
            .map(|mass| XiPiCandidate {
                inv_mass_charm_baryon: mass,
                ..make_candidate()
            })
            .collect();
        let mut qa = SelectionQa::new();
        let records = sel.process(&make_input(cands), &mut qa).unwrap();
        assert_eq!(records.len(), 6);
        for rec in &records {
            assert!(rec.result_selections);
            assert!(!rec.status_inv_mass_charm_baryon);
        }
    }

    #[test]
    fn test_nan_observables_are_not_rejected() {
        let cand = XiPiCandidate {
            cos_pa_casc: f64::NAN,
            eta_v0_pos_dau: f64::NAN,
            ..make_candidate()
        };
        let mut qa = SelectionQa::new();
        let rec = evaluate_one(&selector(), &cand, &mut qa);
        assert!(rec.result_selections);
        assert_eq!(qa.tally(Check::CosPaCasc), (0, 1));
        assert_eq!(qa.tally(Check::EtaPosV0Dau), (0, 1));
    }

    #[test]
    fn test_output_cardinality_and_order() {
        let mut cands = Vec::new();
        for i in 0..7 {
            cands.push(XiPiCandidate {
                cos_pa_v0: if i % 2 == 0 { 0.99 } else { 0.5 },
                ..make_candidate()
            });
        }
        let input = make_input(cands);
        let mut qa = SelectionQa::new();
        let records = selector().process(&input, &mut qa).unwrap();
        assert_eq!(records.len(), 7);
        for (i, rec) in records.iter().enumerate() {
            assert_eq!(rec.result_selections, i % 2 == 0);
        }
        assert_eq!(qa.tally(Check::CosPaV0), (3, 4));
    }

    #[test]
    fn test_dangling_track_reference_fails_batch() {
        let bad = XiPiCandidate {
            bachelor_from_charm_baryon_id: 5,
            ..make_candidate()
        };
        let input = make_input(vec![make_candidate(), bad]);
        let mut qa = SelectionQa::new();
        let err = selector().process(&input, &mut qa).unwrap_err();
        assert!(matches!(
            err,
            Error::TrackIndex {
                table: "primary",
                index: 5,
                len: 1
            }
        ));
        // nothing evaluated
        assert_eq!(qa.tally(Check::RadiusCasc), (0, 0));

        let negative = XiPiCandidate {
            pos_track_id: -1,
            ..make_candidate()
        };
        let input = make_input(vec![negative]);
        assert!(selector().process(&input, &mut qa).is_err());
    }

    struct AlwaysRejected;

    impl PidSelector for AlwaysRejected {
        fn status_tpc(&self, _track: &PidTrack) -> PidStatus {
            PidStatus::Rejected
        }
        fn status_tof(&self, _track: &PidTrack) -> PidStatus {
            PidStatus::Rejected
        }
    }

    #[test]
    fn test_custom_pid_selector() {
        let sel = CandidateSelector::with_pid_selectors(
            SelectorConfig::default(),
            AlwaysRejected,
            AlwaysRejected,
        )
        .unwrap();
        let input = make_input(vec![make_candidate()]);
        let mut qa = SelectionQa::new();
        let rec = sel.process(&input, &mut qa).unwrap().remove(0);
        assert!(!rec.status_pid_lambda);
        assert!(!rec.status_pid_cascade);
        assert!(!rec.status_pid_charm_baryon);
        // nσ values are recorded regardless of the verdict
        assert_eq!(rec.tpc_n_sigma_pi_from_charm_baryon, 0.5);
        assert_eq!(rec.tof_n_sigma_pr_from_lambda, 0.5);
        assert!(rec.result_selections);
    }
}
