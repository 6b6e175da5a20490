//! Shared error type, physics constants, and QA histograms for the HF tasks.

pub mod constants;
pub mod error;
pub mod histogram;

pub use error::Error;
pub use histogram::{Histogram1D, HistogramRegistry};

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, Error>;
