//! # Spectral Alignment
//!
//! Mass-tolerant peak matching and the greedy one-to-one assignment that turns peak
//! correspondences into a single similarity score.
//!
//! ## Algorithm
//!
//! 1. Both spectra are square-root normalized ([`crate::spectrum::sqrt_normalize`]).
//! 2. Candidate peak pairs are collected for an unshifted pass and for precursor-shifted
//!    passes (one per considered charge state), each pass using a binary search over the
//!    m/z-sorted peaks of the second spectrum.
//! 3. Candidates are scored by the product of their weights and sorted descending.
//! 4. The sorted list is walked greedily; a candidate is accepted when neither of its peaks
//!    has been used yet.
//!
//! The greedy walk is an approximation of maximum-weight bipartite matching, traded for speed.

mod matcher;
mod scorer;


pub use matcher::{
    collect_candidates, find_matching_peaks, shift_passes, AlignmentCandidate, TOLERANCE_EPSILON,
};
pub use scorer::{align, align_normalized, Alignment, PeakMatch};
