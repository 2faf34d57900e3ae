use std::fmt;

use log::{debug, info};

use super::graph::{MolecularNetwork, NodeIndex};

/// Statistics from a pruning pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PruneStats {
    /// Components that exceeded the bound before pruning
    pub oversized_components: usize,
    /// Edges removed in total
    pub edges_removed: usize,
}

impl fmt::Display for PruneStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Removed {} edges from {} oversized components",
            self.edges_removed, self.oversized_components
        )
    }
}

/// Remove the weakest edges until no connected component has more than
/// `max_component_size` nodes.
///
/// Each oversized component is pruned on its own: its lowest-scoring edge is removed, and
/// when that disconnects it, each fragment still over the bound is pruned in turn. Equal
/// scores are removed in edge insertion order. Nodes are never removed.
pub fn bound_component_size(network: &mut MolecularNetwork, max_component_size: usize) -> PruneStats {
    let mut stats = PruneStats::default();
    let mut worklist: Vec<Vec<NodeIndex>> = network
        .components()
        .into_iter()
        .filter(|c| c.len() > max_component_size)
        .collect();
    stats.oversized_components = worklist.len();

    while let Some(component) = worklist.pop() {
        let mut ranked: Vec<(NodeIndex, NodeIndex, f64)> = network
            .edges_within(&component)
            .into_iter()
            .map(|e| (e.source, e.target, e.cosine_score))
            .collect();
        ranked.sort_by(|a, b| a.2.total_cmp(&b.2));

        for (a, b, score) in ranked {
            network.remove_edge(a, b);
            stats.edges_removed += 1;

            // Still one piece: keep removing from the same ranked list
            if network.connected(a, b) {
                continue;
            }

            debug!(
                "Component of {} nodes split after removing edge with cosine {:.4}",
                component.len(),
                score
            );
            for fragment in [network.reachable(a), network.reachable(b)] {
                if fragment.len() > max_component_size {
                    worklist.push(fragment);
                }
            }
            break;
        }
    }

    if stats.oversized_components > 0 {
        info!("{}", stats);
    }
    stats
}
