use log::{debug, info};

use super::graph::{DisplayColor, Edge, EdgeStyle, MolecularNetwork, Node};
use super::node_id::canonicalize_node_id;
use crate::matching::{MatchRecord, SourceTag};

/// Build the network from a fully materialized match table.
///
/// Records are processed in table order. Records with an invalid endpoint identifier are
/// skipped. When `display_mass_cutoff` is set, nodes whose mass exceeds it are highlighted.
pub fn build_network(
    table: &[MatchRecord],
    cosine_threshold: f64,
    display_mass_cutoff: Option<f64>,
) -> MolecularNetwork {
    let mut network = MolecularNetwork::new();
    let mut excluded = 0usize;
    let mut duplicates = 0usize;

    for record in table {
        let Some(base_id) = canonicalize_node_id(&record.base_id) else {
            debug!("Excluding record with invalid base identifier {:?}", record.base_id);
            excluded += 1;
            continue;
        };
        let neighbor_id = match record.neighbor_id.as_deref() {
            Some(raw) => match canonicalize_node_id(raw) {
                Some(id) => Some(id),
                None => {
                    debug!("Excluding record with invalid neighbor identifier {:?}", raw);
                    excluded += 1;
                    continue;
                }
            },
            None => None,
        };

        let (base, _) = network.add_node(Node {
            id: base_id,
            mass: record.mass_a,
            retention_time: Some(record.rt_a),
            color: node_color(record.mass_a, record.source, display_mass_cutoff),
        });

        let Some(neighbor_id) = neighbor_id else {
            continue;
        };
        let (neighbor, _) = network.add_node(Node {
            id: neighbor_id,
            mass: record.mass_b,
            retention_time: record.rt_b,
            color: node_color(record.mass_b, record.source, display_mass_cutoff),
        });

        if record.cosine_score < cosine_threshold {
            continue;
        }
        let added = network.add_edge(Edge {
            source: base,
            target: neighbor,
            cosine_score: record.cosine_score,
            mass_delta: record.mass_delta,
            source_tag: record.source,
            style: EdgeStyle::for_source(record.source),
        });
        if !added {
            duplicates += 1;
        }
    }

    info!(
        "Built network with {} nodes and {} edges ({} records excluded, {} duplicate edges skipped)",
        network.node_count(),
        network.edge_count(),
        excluded,
        duplicates
    );

    network
}

fn node_color(mass: Option<f64>, source: SourceTag, cutoff: Option<f64>) -> DisplayColor {
    match (mass, cutoff) {
        (Some(mass), Some(cutoff)) if mass > cutoff => DisplayColor::Highlight,
        _ => DisplayColor::for_source(source),
    }
}
