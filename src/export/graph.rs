use std::io::Write;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde::{Deserialize, Serialize};

use super::ExportError;
use crate::matching::SourceTag;
use crate::network::{EdgeStyle, MolecularNetwork};

const GRAPHML_NS: &str = "http://graphml.graphdrawing.org/xmlns";

/// Node attributes handed to graph writers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeRecord {
    /// Canonical identifier
    pub id: String,
    /// Precursor m/z
    pub mass: Option<f64>,
    /// Retention time in seconds
    pub retention_time: Option<f64>,
    /// Hex color code
    pub display_color: String,
}

/// Edge attributes handed to graph writers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeRecord {
    /// Identifier of the first endpoint
    pub source: String,
    /// Identifier of the second endpoint
    pub target: String,
    /// Precursor mass difference
    pub mass_delta: Option<f64>,
    /// Alignment score
    pub cosine_score: f64,
    /// Index of the connected component holding the edge
    pub component_id: usize,
    /// Similarity lineage
    pub source_tag: SourceTag,
    /// Line style
    pub display_style: EdgeStyle,
}

/// Node/edge listing of a network
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphExport {
    /// Nodes in insertion order
    pub nodes: Vec<NodeRecord>,
    /// Edges in insertion order
    pub edges: Vec<EdgeRecord>,
}

impl GraphExport {
    /// Lay out a network for export.
    ///
    /// Component ids follow [`MolecularNetwork::components`] order.
    pub fn from_network(network: &MolecularNetwork) -> Self {
        let mut component_of = vec![0usize; network.node_count()];
        for (component_id, members) in network.components().iter().enumerate() {
            for &member in members {
                component_of[member] = component_id;
            }
        }

        let nodes = network
            .nodes()
            .iter()
            .map(|node| NodeRecord {
                id: node.id.clone(),
                mass: node.mass,
                retention_time: node.retention_time,
                display_color: node.color.as_hex().to_string(),
            })
            .collect();

        let id_of = |index: usize| {
            network
                .node(index)
                .map(|n| n.id.clone())
                .unwrap_or_default()
        };
        let edges = network
            .edges()
            .map(|edge| EdgeRecord {
                source: id_of(edge.source),
                target: id_of(edge.target),
                mass_delta: edge.mass_delta,
                cosine_score: edge.cosine_score,
                component_id: component_of[edge.source],
                source_tag: edge.source_tag,
                display_style: edge.style,
            })
            .collect();

        Self { nodes, edges }
    }

    /// Write the listing as pretty-printed JSON
    pub fn write_json<W: Write>(&self, mut writer: W) -> Result<(), ExportError> {
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }
}

/// GraphML attribute keys: (id, domain, name, type)
const GRAPHML_KEYS: [(&str, &str, &str, &str); 8] = [
    ("d0", "node", "mz", "double"),
    ("d1", "node", "retention_time", "double"),
    ("d2", "node", "color", "string"),
    ("d3", "edge", "mass_difference", "double"),
    ("d4", "edge", "cosine_score", "double"),
    ("d5", "edge", "component", "long"),
    ("d6", "edge", "EdgeType", "string"),
    ("d7", "edge", "style", "string"),
];

/// Write the listing as an undirected GraphML document
pub fn write_graphml<W: Write>(graph: &GraphExport, writer: W) -> Result<(), ExportError> {
    let mut xml = Writer::new_with_indent(writer, b' ', 2);

    xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    xml.write_event(Event::Start(
        BytesStart::new("graphml").with_attributes([("xmlns", GRAPHML_NS)]),
    ))?;

    for (id, domain, name, kind) in GRAPHML_KEYS {
        xml.write_event(Event::Empty(BytesStart::new("key").with_attributes([
            ("id", id),
            ("for", domain),
            ("attr.name", name),
            ("attr.type", kind),
        ])))?;
    }

    xml.write_event(Event::Start(
        BytesStart::new("graph").with_attributes([("edgedefault", "undirected")]),
    ))?;

    for node in &graph.nodes {
        xml.write_event(Event::Start(
            BytesStart::new("node").with_attributes([("id", node.id.as_str())]),
        ))?;
        if let Some(mass) = node.mass {
            write_data(&mut xml, "d0", &mass.to_string())?;
        }
        if let Some(rt) = node.retention_time {
            write_data(&mut xml, "d1", &rt.to_string())?;
        }
        write_data(&mut xml, "d2", &node.display_color)?;
        xml.write_event(Event::End(BytesEnd::new("node")))?;
    }

    for edge in &graph.edges {
        xml.write_event(Event::Start(BytesStart::new("edge").with_attributes([
            ("source", edge.source.as_str()),
            ("target", edge.target.as_str()),
        ])))?;
        if let Some(delta) = edge.mass_delta {
            write_data(&mut xml, "d3", &delta.to_string())?;
        }
        write_data(&mut xml, "d4", &edge.cosine_score.to_string())?;
        write_data(&mut xml, "d5", &edge.component_id.to_string())?;
        write_data(&mut xml, "d6", edge.source_tag.as_str())?;
        write_data(&mut xml, "d7", edge.display_style.as_str())?;
        xml.write_event(Event::End(BytesEnd::new("edge")))?;
    }

    xml.write_event(Event::End(BytesEnd::new("graph")))?;
    xml.write_event(Event::End(BytesEnd::new("graphml")))?;
    xml.into_inner().flush()?;
    Ok(())
}

fn write_data<W: Write>(xml: &mut Writer<W>, key: &str, value: &str) -> Result<(), ExportError> {
    xml.write_event(Event::Start(
        BytesStart::new("data").with_attributes([("key", key)]),
    ))?;
    xml.write_event(Event::Text(BytesText::new(value)))?;
    xml.write_event(Event::End(BytesEnd::new("data")))?;
    Ok(())
}
