use super::*;
use crate::config::NetworkConfig;
use crate::matching::{generate_all_matches, MatchRecord, SourceTag};
use crate::spectrum::{Spectrum, SpectrumBuilder};
use proptest::prelude::*;

fn record(base: &str, neighbor: Option<&str>, score: f64) -> MatchRecord {
    MatchRecord {
        base_id: base.to_string(),
        neighbor_id: neighbor.map(str::to_string),
        cosine_score: score,
        matched_peaks: 1,
        mass_a: Some(300.0),
        rt_a: 12.0,
        mass_b: neighbor.map(|_| 320.0),
        rt_b: neighbor.map(|_| 15.0),
        mass_delta: neighbor.map(|_| 20.0),
        intensity_sum: 100.0,
        source: SourceTag::ClassicalMolecular,
        peak_matching_rate: None,
    }
}

fn node(id: &str) -> Node {
    Node {
        id: id.to_string(),
        mass: Some(100.0),
        retention_time: Some(1.0),
        color: DisplayColor::Classical,
    }
}

fn edge(source: NodeIndex, target: NodeIndex, score: f64) -> Edge {
    Edge {
        source,
        target,
        cosine_score: score,
        mass_delta: Some(0.0),
        source_tag: SourceTag::ClassicalMolecular,
        style: EdgeStyle::Solid,
    }
}

/// Complete graph on `n` nodes, scored by `score(i, j)`
fn complete_graph(n: usize, score: impl Fn(usize, usize) -> f64) -> MolecularNetwork {
    let mut network = MolecularNetwork::new();
    for i in 0..n {
        network.add_node(node(&(i + 1).to_string()));
    }
    for i in 0..n {
        for j in (i + 1)..n {
            network.add_edge(edge(i, j, score(i, j)));
        }
    }
    network
}

fn spectrum(id: &str, precursor: f64, peaks: &[(f64, f64)]) -> Spectrum {
    let mut builder = SpectrumBuilder::new(id).precursor_mz(precursor);
    for &(mz, intensity) in peaks {
        builder = builder.add_peak(mz, intensity);
    }
    builder.build()
}

#[test]
fn test_graph_edge_operations() {
    let mut network = MolecularNetwork::new();
    let (a, inserted) = network.add_node(node("1"));
    assert!(inserted);
    let (b, _) = network.add_node(node("2"));
    let (again, inserted) = network.add_node(node("1"));
    assert_eq!(again, a);
    assert!(!inserted);

    assert!(network.add_edge(edge(a, b, 0.9)));
    assert!(!network.add_edge(edge(b, a, 0.95)));
    assert!(!network.add_edge(edge(a, a, 1.0)));
    assert!(!network.add_edge(edge(a, 7, 1.0)));
    assert_eq!(network.edge_count(), 1);
    assert!(network.has_edge(b, a));
    assert_eq!(network.edge_between(b, a).map(|e| e.cosine_score), Some(0.9));
    assert_eq!(network.degree(a), 1);

    let removed = network.remove_edge(b, a).unwrap();
    assert_eq!(removed.cosine_score, 0.9);
    assert_eq!(network.edge_count(), 0);
    assert!(network.remove_edge(a, b).is_none());
    assert_eq!(network.components(), vec![vec![a], vec![b]]);
}

#[test]
fn test_only_matching_pair_gets_an_edge() {
    let spectra = vec![
        spectrum("1", 300.0, &[(100.0, 50.0), (150.0, 100.0), (200.0, 30.0)]),
        spectrum("2", 300.0, &[(100.01, 60.0), (150.01, 90.0), (200.01, 20.0)]),
        spectrum("3", 500.0, &[(120.0, 10.0), (310.0, 40.0)]),
    ];
    let config = NetworkConfig::new(0.02, 0.7, 10, 5);
    let table = generate_all_matches(&spectra, &config).unwrap();
    let network = build_network(&table, config.cosine_threshold, None);

    assert_eq!(network.edge_count(), 1);
    let only = network.edges().next().unwrap();
    let ends = [
        network.node(only.source).unwrap().id.as_str(),
        network.node(only.target).unwrap().id.as_str(),
    ];
    assert!(ends.contains(&"1") && ends.contains(&"2"));

    // The spectrum without neighbors is kept as an isolated node
    let isolated = network.node_index("3").unwrap();
    assert_eq!(network.degree(isolated), 0);
    assert_eq!(network.node(isolated).unwrap().mass, Some(500.0));
    assert_eq!(network.node_count(), 3);
}

#[test]
fn test_first_seen_edge_wins() {
    let table = vec![
        record("1", Some("2"), 0.75),
        record("2", Some("1"), 0.95),
    ];
    let network = build_network(&table, 0.7, None);

    assert_eq!(network.edge_count(), 1);
    let kept = network.edges().next().unwrap();
    assert_eq!(kept.cosine_score, 0.75);
    assert_eq!(network.node(kept.source).unwrap().id, "1");
}

#[test]
fn test_identifiers_are_canonicalized() {
    let table = vec![record("5.0", Some("6"), 0.9), record("6.0", Some("5"), 0.9)];
    let network = build_network(&table, 0.7, None);

    assert_eq!(network.node_count(), 2);
    assert!(network.node_index("5").is_some());
    assert_eq!(network.edge_count(), 1);
}

#[test]
fn test_invalid_identifiers_are_excluded() {
    let table = vec![
        record("abc", Some("2"), 0.9),
        record("1", Some(""), 0.9),
        record("", None, 0.0),
        record("3", Some("4"), 0.9),
    ];
    let network = build_network(&table, 0.7, None);

    assert_eq!(network.node_count(), 2);
    assert!(network.node_index("1").is_none());
    assert!(network.node_index("2").is_none());
    assert_eq!(network.edge_count(), 1);
}

#[test]
fn test_below_threshold_adds_nodes_without_edge() {
    let network = build_network(&[record("1", Some("2"), 0.5)], 0.7, None);
    assert_eq!(network.node_count(), 2);
    assert_eq!(network.edge_count(), 0);
}

#[test]
fn test_display_colors() {
    let mut characteristic = record("3", Some("4"), 0.9);
    characteristic.source = SourceTag::Characteristic;
    let table = vec![record("1", Some("2"), 0.9), characteristic];

    let network = build_network(&table, 0.7, Some(310.0));
    let color = |id: &str| network.node(network.node_index(id).unwrap()).unwrap().color;

    // mass_a = 300 stays below the cutoff, mass_b = 320 exceeds it
    assert_eq!(color("1"), DisplayColor::Classical);
    assert_eq!(color("2"), DisplayColor::Highlight);
    assert_eq!(color("3"), DisplayColor::Highlight);

    let dashed = network.edges().find(|e| e.source_tag == SourceTag::Characteristic);
    assert_eq!(dashed.map(|e| e.style), Some(EdgeStyle::Dashed));
    assert_eq!(DisplayColor::Highlight.as_hex(), "#CD5C5C");
}

#[test]
fn test_prune_complete_graph_of_six() {
    // Edges touching node index 5 are the five weakest
    let mut network = complete_graph(6, |i, j| {
        if j == 5 {
            0.70 + 0.01 * i as f64
        } else {
            0.90 + 0.001 * (i * 6 + j) as f64
        }
    });
    assert_eq!(network.edge_count(), 15);

    let stats = bound_component_size(&mut network, 5);

    assert_eq!(stats.oversized_components, 1);
    assert_eq!(stats.edges_removed, 5);
    assert_eq!(network.edge_count(), 10);
    assert_eq!(network.degree(5), 0);
    let sizes: Vec<usize> = network.components().iter().map(Vec::len).collect();
    assert_eq!(sizes, vec![5, 1]);
}

#[test]
fn test_prune_cuts_weak_bridge() {
    // Two triangles joined by one weak edge
    let mut network = MolecularNetwork::new();
    for i in 0..6 {
        network.add_node(node(&i.to_string()));
    }
    for &(a, b) in &[(0, 1), (1, 2), (0, 2), (3, 4), (4, 5), (3, 5)] {
        network.add_edge(edge(a, b, 0.95));
    }
    network.add_edge(edge(2, 3, 0.71));

    let stats = bound_component_size(&mut network, 4);

    assert_eq!(stats.edges_removed, 1);
    assert!(!network.has_edge(2, 3));
    assert_eq!(network.components().len(), 2);
}

#[test]
fn test_prune_fragment_still_oversized() {
    // A path 0-1-2-3-4-5 whose weakest edge splits off one node first
    let mut network = MolecularNetwork::new();
    for i in 0..6 {
        network.add_node(node(&i.to_string()));
    }
    let scores = [0.70, 0.90, 0.80, 0.95, 0.85];
    for (i, &score) in scores.iter().enumerate() {
        network.add_edge(edge(i, i + 1, score));
    }

    let stats = bound_component_size(&mut network, 3);

    // 0.70 leaves {1..5} of size 5, then 0.80 leaves {1,2} and {3,4,5}
    assert_eq!(stats.edges_removed, 2);
    assert!(network.components().iter().all(|c| c.len() <= 3));
}

#[test]
fn test_prune_leaves_small_components_untouched() {
    let mut network = complete_graph(3, |_, _| 0.8);
    let stats = bound_component_size(&mut network, 5);
    assert_eq!(stats, PruneStats::default());
    assert_eq!(network.edge_count(), 3);
}

proptest! {
    #[test]
    fn prop_pruned_components_fit(
        node_count in 1usize..25,
        raw_edges in prop::collection::vec((0usize..25, 0usize..25, 0.0f64..1.0), 0..80),
        max_size in 1usize..8,
    ) {
        let mut network = MolecularNetwork::new();
        for i in 0..node_count {
            network.add_node(node(&i.to_string()));
        }
        for (a, b, score) in raw_edges {
            network.add_edge(edge(a % node_count, b % node_count, score));
        }
        let before = network.edge_count();

        let stats = bound_component_size(&mut network, max_size);

        prop_assert_eq!(before - network.edge_count(), stats.edges_removed);
        prop_assert_eq!(network.node_count(), node_count);
        for component in network.components() {
            prop_assert!(
                component.len() <= max_size || network.edges_within(&component).is_empty()
            );
        }
    }
}
