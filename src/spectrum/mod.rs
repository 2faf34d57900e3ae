//! # Spectrum Model
//!
//! The normalized in-memory representation of fragmentation (MS2) spectra as consumed by
//! the alignment and networking core.
//!
//! Spectra are loaded once per job and are immutable afterwards. Peaks are kept sorted by
//! ascending m/z, which the peak matcher relies on for tolerant range search.

mod normalize;
mod types;


pub use normalize::{sqrt_normalize, NormalizedPeak};
pub use types::{Peak, Spectrum, SpectrumBuilder};
