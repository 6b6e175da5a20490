//! Selection QA: per-check pass/fail tallies and summary histograms.

use common::{HistogramRegistry, Result};

/// A single tallied check. Each one owns a two-bin status histogram
/// (bin 0 = failed, bin 1 = passed).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    SignDecay,
    EtaPosV0Dau,
    EtaNegV0Dau,
    EtaPiFromCasc,
    EtaPiFromCharm,
    RadiusCasc,
    RadiusV0,
    CosPaCasc,
    CosPaV0,
    DcaCascDau,
    DcaV0Dau,
    DcaCharmDau,
    DcaXyToPvV0Daughters,
    DcaXyToPvPiFromCasc,
    DcaXyPrimPi,
    DcaZPrimPi,
    DcaXyCasc,
    DcaZCasc,
    PtPiFromCasc,
    PtPiFromCharm,
    TpcQualityPiFromLam,
    TpcQualityPrFromLam,
    TpcQualityPiFromCasc,
    TpcQualityPiFromCharm,
    ItsQualityPiFromCharm,
    MassLam,
    MassCasc,
    MassCharmBaryon,
}

impl Check {
    pub const ALL: [Check; 28] = [
        Check::SignDecay,
        Check::EtaPosV0Dau,
        Check::EtaNegV0Dau,
        Check::EtaPiFromCasc,
        Check::EtaPiFromCharm,
        Check::RadiusCasc,
        Check::RadiusV0,
        Check::CosPaCasc,
        Check::CosPaV0,
        Check::DcaCascDau,
        Check::DcaV0Dau,
        Check::DcaCharmDau,
        Check::DcaXyToPvV0Daughters,
        Check::DcaXyToPvPiFromCasc,
        Check::DcaXyPrimPi,
        Check::DcaZPrimPi,
        Check::DcaXyCasc,
        Check::DcaZCasc,
        Check::PtPiFromCasc,
        Check::PtPiFromCharm,
        Check::TpcQualityPiFromLam,
        Check::TpcQualityPrFromLam,
        Check::TpcQualityPiFromCasc,
        Check::TpcQualityPiFromCharm,
        Check::ItsQualityPiFromCharm,
        Check::MassLam,
        Check::MassCasc,
        Check::MassCharmBaryon,
    ];

    pub fn hist_name(self) -> &'static str {
        match self {
            Check::SignDecay => "hSelSignDec",
            Check::EtaPosV0Dau => "hSelEtaPosV0Dau",
            Check::EtaNegV0Dau => "hSelEtaNegV0Dau",
            Check::EtaPiFromCasc => "hSelEtaPiFromCasc",
            Check::EtaPiFromCharm => "hSelEtaPiFromCharm",
            Check::RadiusCasc => "hSelRadCasc",
            Check::RadiusV0 => "hSelRadV0",
            Check::CosPaCasc => "hSelCosPACasc",
            Check::CosPaV0 => "hSelCosPAV0",
            Check::DcaCascDau => "hSelDCACascDau",
            Check::DcaV0Dau => "hSelDCAV0Dau",
            Check::DcaCharmDau => "hSelDCACharmDau",
            Check::DcaXyToPvV0Daughters => "hSelDcaXYToPvV0Daughters",
            Check::DcaXyToPvPiFromCasc => "hSelDcaXYToPvPiFromCasc",
            Check::DcaXyPrimPi => "hSelDCAXYPrimPi",
            Check::DcaZPrimPi => "hSelDCAZPrimPi",
            Check::DcaXyCasc => "hSelDCAXYCasc",
            Check::DcaZCasc => "hSelDCAZCasc",
            Check::PtPiFromCasc => "hSelPtPiFromCasc",
            Check::PtPiFromCharm => "hSelPtPiFromCharm",
            Check::TpcQualityPiFromLam => "hSelTPCQualityPiFromLam",
            Check::TpcQualityPrFromLam => "hSelTPCQualityPrFromLam",
            Check::TpcQualityPiFromCasc => "hSelTPCQualityPiFromCasc",
            Check::TpcQualityPiFromCharm => "hSelTPCQualityPiFromCharm",
            Check::ItsQualityPiFromCharm => "hSelITSQualityPiFromCharm",
            Check::MassLam => "hSelMassLam",
            Check::MassCasc => "hSelMassCasc",
            Check::MassCharmBaryon => "hSelMassCharmBaryon",
        }
    }
}

pub const H_SEL_PID: &str = "hSelPID";
pub const H_STATUS_CHECK: &str = "hStatusCheck";
pub const H_INV_MASS_CHARM_BARYON: &str = "hInvMassCharmBaryon";

/// Gates of the consecutive-selection histogram, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusGate {
    PidLambda = 0,
    PidCascade = 1,
    PidCharmBaryon = 2,
    MassLambda = 3,
    MassCascade = 4,
    MassCharmBaryon = 5,
}

/// Accumulates selection QA. One instance per evaluation shard; shards are
/// combined with [`SelectionQa::merge`].
#[derive(Debug, Clone)]
pub struct SelectionQa {
    registry: HistogramRegistry,
}

impl SelectionQa {
    pub fn new() -> Self {
        let mut registry = HistogramRegistry::new();
        for check in Check::ALL {
            let name = check.hist_name();
            registry.add(name, &format!("{};status;entries", name), 2, -0.5, 1.5);
        }
        registry.add(H_SEL_PID, "hSelPID;status;entries", 12, 0.0, 12.0);
        registry.add(
            H_STATUS_CHECK,
            "Check consecutive selections status;status;entries",
            12,
            0.0,
            12.0,
        );
        registry.add(
            H_INV_MASS_CHARM_BARYON,
            "Charm baryon invariant mass;inv mass;entries",
            500,
            2.2,
            3.1,
        );
        Self { registry }
    }

    pub fn record(&mut self, check: Check, passed: bool) {
        let filled = self
            .registry
            .fill(check.hist_name(), if passed { 1.0 } else { 0.0 });
        debug_assert!(filled, "unregistered check {:?}", check);
    }

    pub fn record_status_gate(&mut self, gate: StatusGate) {
        self.registry
            .fill(H_STATUS_CHECK, gate as i32 as f64 + 0.5);
    }

    /// `hSelPID` summary: bins (2k, 2k+1) = (failed, passed) for the k-th
    /// PID / mass flag.
    pub fn record_pid_summary(&mut self, flags: [bool; 6]) {
        for (k, passed) in flags.into_iter().enumerate() {
            let bin = 2 * k + usize::from(passed);
            self.registry.fill(H_SEL_PID, bin as f64 + 0.5);
        }
    }

    pub fn record_inv_mass_charm_baryon(&mut self, mass: f64) {
        self.registry.fill(H_INV_MASS_CHARM_BARYON, mass);
    }

    /// (failed, passed) counts of a check.
    pub fn tally(&self, check: Check) -> (u64, u64) {
        self.registry
            .get(check.hist_name())
            .map(|h| (h.bin(0) as u64, h.bin(1) as u64))
            .unwrap_or((0, 0))
    }

    pub fn registry(&self) -> &HistogramRegistry {
        &self.registry
    }

    pub fn merge(&mut self, other: &SelectionQa) -> Result<()> {
        self.registry.merge(&other.registry)
    }
}

impl Default for SelectionQa {
    fn default() -> Self {
        Self::new()
    }
}
