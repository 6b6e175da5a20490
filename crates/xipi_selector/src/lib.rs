//! Ξc0 / Ωc0 → Ξπ candidate selection.
//!
//! Applies topological, kinematic, detector-quality, PID and invariant-mass
//! cuts to reconstructed charm-baryon candidates and produces one
//! `SelectionRecord` per candidate, with QA tallies on the side.

pub mod config;
pub mod pid;
pub mod qa;
pub mod quality;
pub mod selector;
pub mod types;

pub use config::{PidConfig, PidMode, SelectorConfig, SpeciesPidConfig, TrackQualityConfig};
pub use pid::{PidSelector, PidStatus, TrackSelectorPid};
pub use qa::{Check, SelectionQa};
pub use selector::CandidateSelector;
pub use types::{PidTrack, SelectionRecord, SelectorInput, Species, TrackRole, XiPiCandidate};
