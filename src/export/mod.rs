//! # Exporter
//!
//! Serializable views of the match table and the network for external writers and
//! renderers. Nothing here renders; it only lays the data out.
//!
//! - [`write_match_table`]: CSV, one row per [`crate::matching::MatchRecord`]
//! - [`GraphExport`]: node/edge listing, written as JSON or GraphML

mod error;
mod graph;
mod table;


pub use error::ExportError;
pub use graph::{write_graphml, EdgeRecord, GraphExport, NodeRecord};
pub use table::{write_match_table, write_match_table_file, MatchTableRow};
