//! # MGF Input and Output
//!
//! Minimal Mascot Generic Format support for feeding spectra into a job and for writing
//! filtered spectra back out.
//!
//! ```rust,no_run
//! use specnet::mgf::MgfReader;
//!
//! let spectra = MgfReader::open("spectra.mgf")?.read_all()?;
//! println!("Loaded {} spectra", spectra.len());
//! # Ok::<(), specnet::mgf::MgfError>(())
//! ```

mod error;
mod reader;
mod writer;


pub use error::MgfError;
pub use reader::MgfReader;
pub use writer::MgfWriter;
