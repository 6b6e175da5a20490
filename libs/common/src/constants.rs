//! PDG reference masses (GeV/c²).

pub const MASS_LAMBDA0: f64 = 1.115683;
pub const MASS_XI_MINUS: f64 = 1.32171;
pub const MASS_PI_PLUS: f64 = 0.13957039;
