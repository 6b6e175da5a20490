//! Detector track-quality checks.

use crate::config::TrackQualityConfig;
use crate::types::PidTrack;

/// TPC found clusters, crossed rows, crossed-rows/findable ratio and χ²/cluster.
pub fn is_selected_track_tpc_quality(track: &PidTrack, cfg: &TrackQualityConfig) -> bool {
    if track.tpc_n_cls_found() < cfg.n_clusters_tpc_min {
        return false;
    }
    if track.tpc_n_cls_crossed_rows() < cfg.n_tpc_crossed_rows_min {
        return false;
    }
    if track.tpc_crossed_rows_over_findable_cls()
        < cfg.tpc_crossed_rows_over_findable_clusters_ratio_min
    {
        return false;
    }
    if track.tpc_chi2_n_cl > cfg.tpc_chi2_per_cluster_max {
        return false;
    }
    true
}

/// ITS cluster count and χ²/cluster.
pub fn is_selected_track_its_quality(track: &PidTrack, cfg: &TrackQualityConfig) -> bool {
    if track.its_n_cls() < cfg.n_clusters_its_min {
        return false;
    }
    if track.its_chi2_n_cl > cfg.its_chi2_per_cluster_max {
        return false;
    }
    true
}
