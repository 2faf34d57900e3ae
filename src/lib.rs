//! # specnet - Spectral Alignment and Molecular Networking
//!
//! `specnet` compares tandem (MS2) spectra pairwise, keeps the most similar neighbors of
//! each spectrum and assembles them into a molecular network whose connected components
//! stay below a size bound.
//!
//! ## Key Features
//!
//! - **Shift-tolerant alignment**: peaks match directly or after a precursor mass shift,
//!   so analogs differing by a modification still align.
//!
//! - **Greedy one-to-one scoring**: each peak contributes to at most one match, which keeps
//!   every score within `[0, 1]` and makes it symmetric.
//!
//! - **Bounded components**: the weakest edges of oversized components are removed until
//!   every component fits.
//!
//! - **Plain outputs**: CSV match tables, JSON node/edge listings and GraphML.
//!
//! ## Quick Start
//!
//! ```rust
//! use specnet::prelude::*;
//!
//! let spectra = vec![
//!     SpectrumBuilder::new("1")
//!         .precursor_mz(300.0)
//!         .add_peak(100.0, 50.0)
//!         .add_peak(150.0, 100.0)
//!         .build(),
//!     SpectrumBuilder::new("2")
//!         .precursor_mz(300.0)
//!         .add_peak(100.01, 60.0)
//!         .add_peak(150.01, 90.0)
//!         .build(),
//! ];
//!
//! let config = NetworkConfig::new(0.02, 0.7, 10, 5);
//! let mut job = NetworkJob::new(config, spectra)?;
//! let stats = job.run()?;
//! assert_eq!(stats.edges, 1);
//! # Ok::<(), specnet::job::JobError>(())
//! ```
//!
//! ## Pipeline
//!
//! ```text
//! spectra ──► match generator ──► match table ──► network builder ──► pruner ──► exporter
//!             (normalizer, peak matcher, scorer)
//! ```
//!
//! ## Architecture
//!
//! The library is organized into the following modules:
//!
//! - [`spectrum`]: spectrum model and square-root intensity normalization
//! - [`alignment`]: tolerant peak matching and greedy alignment scoring
//! - [`matching`]: all-pairs match generation into a match table
//! - [`network`]: network construction and component-size pruning
//! - [`export`]: CSV, JSON and GraphML writers
//! - [`config`]: validated job configuration
//! - [`job`]: per-job context running the full pipeline
//! - [`mgf`]: MGF reader and writer
//! - [`filter`]: characteristic ion / neutral-loss spectrum filter
//! - [`neutral_loss`]: tolerance-merged neutral-loss and common-ion tables
//!
//! ## Match Table Columns
//!
//! | Column | Type | Description |
//! |--------|------|-------------|
//! | baseId | String | Base spectrum identifier |
//! | neighborId | String | Neighbor identifier, empty for a spectrum without neighbors |
//! | cosineScore | Float64 | Alignment score in `[0, 1]` |
//! | massA | Float64 | Base precursor m/z |
//! | rtA | Float64 | Base retention time (s) |
//! | massB | Float64 | Neighbor precursor m/z |
//! | rtB | Float64 | Neighbor retention time (s) |
//! | massDelta | Float64 | Precursor mass difference |
//! | intensitySum | Float64 | Summed neighbor intensity |
//! | sourceTag | String | `classical_molecular` or `csmn` |
//! | peakMatchingRate | Float64 | Always empty |

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod alignment;
pub mod config;
pub mod export;
pub mod filter;
pub mod job;
pub mod matching;
pub mod mgf;
pub mod network;
pub mod neutral_loss;
pub mod spectrum;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::alignment::{align, Alignment, PeakMatch};
    pub use crate::config::{ConfigError, NetworkConfig};
    pub use crate::export::{write_graphml, write_match_table, ExportError, GraphExport};
    pub use crate::filter::{filter_spectra, Classification, FilterConfig, FilterMode};
    pub use crate::job::{JobError, JobStats, NetworkJob};
    pub use crate::matching::{generate_all_matches, MatchRecord, SourceTag};
    pub use crate::mgf::{MgfError, MgfReader, MgfWriter};
    pub use crate::network::{bound_component_size, build_network, MolecularNetwork, PruneStats};
    pub use crate::neutral_loss::{common_ions, common_neutral_losses, neutral_losses, NeutralLoss};
    pub use crate::spectrum::{Peak, Spectrum, SpectrumBuilder};
}
