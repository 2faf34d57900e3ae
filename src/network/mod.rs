//! # Molecular Network
//!
//! Turns a materialized match table into an undirected similarity graph and bounds the size
//! of its connected components.
//!
//! ## Construction
//!
//! - Endpoint identifiers are canonicalized: numeric-looking identifiers become integer
//!   strings (`"12.0"` → `"12"`), anything else is invalid and the record is left out of the
//!   graph (it stays in the match table).
//! - A node is added the first time its identifier is seen, carrying that record's mass and
//!   retention time. A sentinel record therefore still contributes its base spectrum as an
//!   isolated node.
//! - An edge is added when the score passes the threshold and the node pair has no edge yet.
//!   The first record seen for a pair wins, not the best-scoring one.
//!
//! ## Pruning
//!
//! Components larger than the bound lose their lowest-scoring edges one at a time until
//! every fragment fits or runs out of edges. Nodes are never removed.

mod builder;
mod graph;
mod node_id;
mod pruner;

#[cfg(test)]
mod tests;

pub use builder::build_network;
pub use graph::{DisplayColor, Edge, EdgeStyle, MolecularNetwork, Node, NodeIndex};
pub use node_id::canonicalize_node_id;
pub use pruner::{bound_component_size, PruneStats};
