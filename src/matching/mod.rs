//! # Match Generation
//!
//! Runs the alignment scorer over every ordered pair of spectra in a job and assembles the
//! match table: for each base spectrum, the neighbors scoring at or above the cosine
//! threshold, best first, truncated to the top K.
//!
//! A base spectrum with no qualifying neighbor contributes exactly one sentinel record
//! (score 0, no neighbor) so it is still accounted for downstream.
//!
//! With the `parallel` feature the outer loop over base spectra runs on the Rayon thread
//! pool. Each base produces an independent list; lists are concatenated in base order.

mod generator;
mod record;


pub use generator::generate_all_matches;
pub use record::{MatchRecord, SourceTag};
