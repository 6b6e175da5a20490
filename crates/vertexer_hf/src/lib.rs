//! Heavy-flavour secondary vertexing.
//!
//! Per collision: pT/tgl QA on all tracks, a DCA fit of every track pair,
//! and a two-prong candidate with its pion-pion invariant mass for each
//! vertex found.

pub mod candidate_builder;
pub mod fitter;
pub mod track;
pub mod track_qa;
pub mod vertexer;
pub mod workflow;

pub use candidate_builder::{Cand2Prong, CandidateBuilder2Prong};
pub use fitter::{DcaFitter, LinearDcaFitter};
pub use track::TrackParCov;
pub use track_qa::TrackQa;
pub use vertexer::{SecondaryVertex, VertexerConfig, VertexerHf};
pub use workflow::{HfTrack, VertexingInput, VertexingOutput};
