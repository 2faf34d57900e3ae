use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::ExportError;
use crate::matching::{MatchRecord, SourceTag};

/// One CSV row of the match table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchTableRow {
    /// Base spectrum identifier
    pub base_id: String,
    /// Neighbor identifier, empty for a sentinel
    pub neighbor_id: Option<String>,
    /// Alignment score
    pub cosine_score: f64,
    /// Base precursor m/z
    pub mass_a: Option<f64>,
    /// Base retention time
    pub rt_a: f64,
    /// Neighbor precursor m/z
    pub mass_b: Option<f64>,
    /// Neighbor retention time
    pub rt_b: Option<f64>,
    /// Precursor mass difference
    pub mass_delta: Option<f64>,
    /// Summed neighbor intensity
    pub intensity_sum: f64,
    /// Similarity lineage
    pub source_tag: SourceTag,
    /// Placeholder column, always empty
    pub peak_matching_rate: Option<f64>,
}

impl From<&MatchRecord> for MatchTableRow {
    fn from(record: &MatchRecord) -> Self {
        Self {
            base_id: record.base_id.clone(),
            neighbor_id: record.neighbor_id.clone(),
            cosine_score: record.cosine_score,
            mass_a: record.mass_a,
            rt_a: record.rt_a,
            mass_b: record.mass_b,
            rt_b: record.rt_b,
            mass_delta: record.mass_delta,
            intensity_sum: record.intensity_sum,
            source_tag: record.source,
            peak_matching_rate: record.peak_matching_rate,
        }
    }
}

/// Write the match table as CSV with a header row
pub fn write_match_table<W: Write>(records: &[MatchRecord], writer: W) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in records {
        csv_writer.serialize(MatchTableRow::from(record))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write the match table to a CSV file
pub fn write_match_table_file<P: AsRef<Path>>(
    records: &[MatchRecord],
    path: P,
) -> Result<(), ExportError> {
    let file = File::create(path)?;
    write_match_table(records, BufWriter::new(file))
}
