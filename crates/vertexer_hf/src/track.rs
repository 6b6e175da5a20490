//! Track parametrization at a reference point, with covariance.

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Track parameters in the local frame rotated by `alpha`:
/// `y`, `z` at reference `x`, sine of the local azimuth, dip tangent and q/pT.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackParCov {
    pub x: f64,
    pub alpha: f64,
    pub y: f64,
    pub z: f64,
    pub snp: f64,
    pub tgl: f64,
    pub signed_1pt: f64,
    /// Lower-triangular covariance: YY, ZY, ZZ, SnpY, SnpZ, SnpSnp, TglY,
    /// TglZ, TglSnp, TglTgl, 1PtY, 1PtZ, 1PtSnp, 1PtTgl, 1Pt1Pt.
    #[serde(default)]
    pub cov: [f64; 15],
}

impl TrackParCov {
    /// Transverse momentum (GeV/c); infinite for a straight track.
    pub fn pt(&self) -> f64 {
        if self.signed_1pt == 0.0 {
            return f64::INFINITY;
        }
        1.0 / self.signed_1pt.abs()
    }

    /// Reference point in the global frame (cm).
    pub fn position(&self) -> Point3<f64> {
        let (sin_a, cos_a) = self.alpha.sin_cos();
        Point3::new(
            self.x * cos_a - self.y * sin_a,
            self.x * sin_a + self.y * cos_a,
            self.z,
        )
    }

    /// Direction of flight in the global frame (not normalized).
    pub fn direction(&self) -> Vector3<f64> {
        let cos_phi = (1.0 - self.snp * self.snp).max(0.0).sqrt();
        let (sin_a, cos_a) = self.alpha.sin_cos();
        Vector3::new(
            cos_phi * cos_a - self.snp * sin_a,
            cos_phi * sin_a + self.snp * cos_a,
            self.tgl,
        )
    }

    /// Global momentum (GeV/c); zero for a straight track.
    pub fn momentum(&self) -> Vector3<f64> {
        let pt = self.pt();
        if !pt.is_finite() {
            return Vector3::zeros();
        }
        self.direction() * pt
    }

    /// σ²(y) + σ²(z) at the reference point.
    pub fn sigma2_position(&self) -> f64 {
        self.cov[0] + self.cov[2]
    }
}
