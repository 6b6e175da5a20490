//! Two-track DCA fitting.

use nalgebra::Point3;

use crate::track::TrackParCov;

/// Finds points of closest approach between two tracks.
pub trait DcaFitter: Send + Sync {
    /// Candidate vertices for the pair; empty when no vertex is found.
    fn process(&self, t0: &TrackParCov, t1: &TrackParCov) -> Vec<Point3<f64>>;
}

/// Straight-line DCA fitter.
///
/// Each track is linearized at its reference point. The vertex is the
/// midpoint of the two closest points, weighted by the inverse positional
/// variances unless `use_abs_dca` is set.
#[derive(Debug, Clone)]
pub struct LinearDcaFitter {
    max_dca: f64,
    max_r: f64,
    use_abs_dca: bool,
}

/// |sin θ|² below which two directions count as parallel.
const PARALLEL_EPS: f64 = 1e-12;

impl LinearDcaFitter {
    pub fn new(max_dca: f64, max_r: f64) -> Self {
        Self {
            max_dca,
            max_r,
            use_abs_dca: false,
        }
    }

    pub fn set_use_abs_dca(&mut self, use_abs_dca: bool) {
        self.use_abs_dca = use_abs_dca;
    }

    pub fn use_abs_dca(&self) -> bool {
        self.use_abs_dca
    }

    fn weights(&self, t0: &TrackParCov, t1: &TrackParCov) -> (f64, f64) {
        if self.use_abs_dca {
            return (0.5, 0.5);
        }
        let (s0, s1) = (t0.sigma2_position(), t1.sigma2_position());
        if s0 <= 0.0 || s1 <= 0.0 {
            return (0.5, 0.5);
        }
        let (w0, w1) = (1.0 / s0, 1.0 / s1);
        (w0 / (w0 + w1), w1 / (w0 + w1))
    }
}

impl DcaFitter for LinearDcaFitter {
    fn process(&self, t0: &TrackParCov, t1: &TrackParCov) -> Vec<Point3<f64>> {
        let (p0, d0) = (t0.position(), t0.direction());
        let (p1, d1) = (t1.position(), t1.direction());

        let w = p0 - p1;
        let a = d0.norm_squared();
        let b = d0.dot(&d1);
        let c = d1.norm_squared();
        let d = d0.dot(&w);
        let e = d1.dot(&w);
        let denom = a * c - b * b;
        if denom <= PARALLEL_EPS * a * c {
            return Vec::new();
        }

        let s0 = (b * e - c * d) / denom;
        let s1 = (a * e - b * d) / denom;
        let q0 = p0 + d0 * s0;
        let q1 = p1 + d1 * s1;

        if (q0 - q1).norm() > self.max_dca {
            return Vec::new();
        }

        let (w0, w1) = self.weights(t0, t1);
        let vertex = Point3::from(q0.coords * w0 + q1.coords * w1);
        if vertex.x.hypot(vertex.y) > self.max_r {
            return Vec::new();
        }
        vec![vertex]
    }
}
