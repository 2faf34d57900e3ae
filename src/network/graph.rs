use std::collections::{BTreeMap, HashMap, VecDeque};

use serde::{Deserialize, Serialize};

use crate::matching::SourceTag;

/// Position of a node in the network
pub type NodeIndex = usize;

type EdgeId = usize;

/// Presentation color of a node or edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayColor {
    /// Light sky blue, classical cosine network
    #[serde(rename = "#87CEFA")]
    Classical,
    /// Indian red, characteristic network or precursor above the display cutoff
    #[serde(rename = "#CD5C5C")]
    Highlight,
}

impl DisplayColor {
    /// Hex color code
    pub fn as_hex(&self) -> &'static str {
        match self {
            DisplayColor::Classical => "#87CEFA",
            DisplayColor::Highlight => "#CD5C5C",
        }
    }

    /// Base color for a similarity lineage
    pub fn for_source(source: SourceTag) -> Self {
        match source {
            SourceTag::ClassicalMolecular => DisplayColor::Classical,
            SourceTag::Characteristic => DisplayColor::Highlight,
        }
    }
}

/// Presentation line style of an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeStyle {
    /// Solid line
    Solid,
    /// Dashed line
    Dashed,
}

impl EdgeStyle {
    /// Line style for a similarity lineage
    pub fn for_source(source: SourceTag) -> Self {
        match source {
            SourceTag::ClassicalMolecular => EdgeStyle::Solid,
            SourceTag::Characteristic => EdgeStyle::Dashed,
        }
    }

    /// Style name as written to graph files
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeStyle::Solid => "solid",
            EdgeStyle::Dashed => "dashed",
        }
    }
}

/// A spectrum in the network
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Canonical identifier
    pub id: String,
    /// Precursor m/z
    pub mass: Option<f64>,
    /// Retention time in seconds
    pub retention_time: Option<f64>,
    /// Presentation color
    pub color: DisplayColor,
}

/// An accepted similarity between two nodes
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    /// First endpoint (the base spectrum of the record that created the edge)
    pub source: NodeIndex,
    /// Second endpoint
    pub target: NodeIndex,
    /// Alignment score
    pub cosine_score: f64,
    /// Precursor mass difference
    pub mass_delta: Option<f64>,
    /// Similarity lineage
    pub source_tag: SourceTag,
    /// Presentation line style
    pub style: EdgeStyle,
}

/// Undirected simple graph of spectra
///
/// Edges are stored in insertion order; removing an edge leaves the order of the others
/// untouched.
#[derive(Debug, Clone, Default)]
pub struct MolecularNetwork {
    nodes: Vec<Node>,
    node_lookup: HashMap<String, NodeIndex>,
    edges: Vec<Option<Edge>>,
    adjacency: Vec<BTreeMap<NodeIndex, EdgeId>>,
    edge_count: usize,
}

impl MolecularNetwork {
    /// Create an empty network
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node unless one with the same identifier exists.
    ///
    /// Returns the index of the node with that identifier and whether it was inserted.
    pub fn add_node(&mut self, node: Node) -> (NodeIndex, bool) {
        if let Some(&index) = self.node_lookup.get(&node.id) {
            return (index, false);
        }
        let index = self.nodes.len();
        self.node_lookup.insert(node.id.clone(), index);
        self.nodes.push(node);
        self.adjacency.push(BTreeMap::new());
        (index, true)
    }

    /// Look up a node by canonical identifier
    pub fn node_index(&self, id: &str) -> Option<NodeIndex> {
        self.node_lookup.get(id).copied()
    }

    /// Get a node by index
    pub fn node(&self, index: NodeIndex) -> Option<&Node> {
        self.nodes.get(index)
    }

    /// All nodes in insertion order
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Add an edge unless the pair is already connected.
    ///
    /// Self-loops and unknown endpoints are rejected. Returns whether the edge was added.
    pub fn add_edge(&mut self, edge: Edge) -> bool {
        let (a, b) = (edge.source, edge.target);
        if a == b || a >= self.nodes.len() || b >= self.nodes.len() || self.has_edge(a, b) {
            return false;
        }
        let id = self.edges.len();
        self.edges.push(Some(edge));
        self.adjacency[a].insert(b, id);
        self.adjacency[b].insert(a, id);
        self.edge_count += 1;
        true
    }

    /// Whether `a` and `b` are directly connected, in either direction
    pub fn has_edge(&self, a: NodeIndex, b: NodeIndex) -> bool {
        self.adjacency
            .get(a)
            .map(|neighbors| neighbors.contains_key(&b))
            .unwrap_or(false)
    }

    /// The edge connecting `a` and `b`, if any
    pub fn edge_between(&self, a: NodeIndex, b: NodeIndex) -> Option<&Edge> {
        let id = *self.adjacency.get(a)?.get(&b)?;
        self.edges[id].as_ref()
    }

    /// Remove the edge connecting `a` and `b`, returning it
    pub fn remove_edge(&mut self, a: NodeIndex, b: NodeIndex) -> Option<Edge> {
        let id = self.adjacency.get_mut(a)?.remove(&b)?;
        self.adjacency[b].remove(&a);
        self.edge_count -= 1;
        self.edges[id].take()
    }

    /// All edges in insertion order
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter().flatten()
    }

    /// Direct neighbors of a node, ascending by index
    pub fn neighbors(&self, index: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.adjacency
            .get(index)
            .into_iter()
            .flat_map(|neighbors| neighbors.keys().copied())
    }

    /// Number of edges touching a node
    pub fn degree(&self, index: NodeIndex) -> usize {
        self.adjacency.get(index).map(BTreeMap::len).unwrap_or(0)
    }

    /// Nodes reachable from `start`, including itself, ascending by index
    pub fn reachable(&self, start: NodeIndex) -> Vec<NodeIndex> {
        let mut visited = vec![false; self.nodes.len()];
        let mut component = self.traverse(start, &mut visited, None);
        component.sort_unstable();
        component
    }

    /// Whether a path connects `a` and `b`
    pub fn connected(&self, a: NodeIndex, b: NodeIndex) -> bool {
        if a == b {
            return a < self.nodes.len();
        }
        let mut visited = vec![false; self.nodes.len()];
        self.traverse(a, &mut visited, Some(b)).contains(&b)
    }

    /// Connected components, each ascending by index, ordered by their smallest node
    pub fn components(&self) -> Vec<Vec<NodeIndex>> {
        let mut visited = vec![false; self.nodes.len()];
        let mut components = Vec::new();
        for start in 0..self.nodes.len() {
            if visited[start] {
                continue;
            }
            let mut component = self.traverse(start, &mut visited, None);
            component.sort_unstable();
            components.push(component);
        }
        components
    }

    /// Edges with both endpoints inside `members`, in insertion order
    pub fn edges_within(&self, members: &[NodeIndex]) -> Vec<&Edge> {
        let mut inside = vec![false; self.nodes.len()];
        for &m in members {
            if m < inside.len() {
                inside[m] = true;
            }
        }
        self.edges()
            .filter(|e| inside[e.source] && inside[e.target])
            .collect()
    }

    /// Breadth-first traversal from `start`, stopping early once `stop_at` is reached
    fn traverse(
        &self,
        start: NodeIndex,
        visited: &mut [bool],
        stop_at: Option<NodeIndex>,
    ) -> Vec<NodeIndex> {
        if start >= self.nodes.len() || visited[start] {
            return Vec::new();
        }
        let mut order = vec![start];
        let mut queue = VecDeque::from([start]);
        visited[start] = true;

        while let Some(current) = queue.pop_front() {
            for &next in self.adjacency[current].keys() {
                if visited[next] {
                    continue;
                }
                visited[next] = true;
                order.push(next);
                if Some(next) == stop_at {
                    return order;
                }
                queue.push_back(next);
            }
        }
        order
    }
}
