use serde::{Deserialize, Serialize};
use std::fmt;

/// Similarity lineage that produced a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceTag {
    /// Classical MS2 cosine molecular networking
    #[serde(rename = "classical_molecular")]
    ClassicalMolecular,
    /// Characteristic-ion / neutral-loss network added by a collaborating module
    #[serde(rename = "csmn")]
    Characteristic,
}

impl SourceTag {
    /// Tag string as written to match tables and graph files
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceTag::ClassicalMolecular => "classical_molecular",
            SourceTag::Characteristic => "csmn",
        }
    }
}

impl fmt::Display for SourceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the match table: base spectrum A compared against neighbor B
#[derive(Debug, Clone, PartialEq)]
pub struct MatchRecord {
    /// Identifier of the base spectrum
    pub base_id: String,
    /// Identifier of the neighbor, `None` for a sentinel record
    pub neighbor_id: Option<String>,
    /// Alignment score in `[0, 1]`
    pub cosine_score: f64,
    /// Number of matched peak pairs
    pub matched_peaks: usize,
    /// Base precursor m/z
    pub mass_a: Option<f64>,
    /// Base retention time (seconds)
    pub rt_a: f64,
    /// Neighbor precursor m/z
    pub mass_b: Option<f64>,
    /// Neighbor retention time (seconds)
    pub rt_b: Option<f64>,
    /// `|mass_a - mass_b|`
    pub mass_delta: Option<f64>,
    /// Summed peak intensity of the neighbor (of the base for a sentinel)
    pub intensity_sum: f64,
    /// Similarity lineage
    pub source: SourceTag,
    /// Reserved for a peak-matching rate computed by collaborators; always `None` here
    pub peak_matching_rate: Option<f64>,
}

impl MatchRecord {
    /// Whether this is the placeholder emitted for a base spectrum without neighbors
    pub fn is_sentinel(&self) -> bool {
        self.neighbor_id.is_none()
    }
}
