use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, warn};

use super::MgfError;
use crate::spectrum::{Peak, Spectrum, SpectrumBuilder};

/// Streaming reader yielding one [`Spectrum`] per `BEGIN IONS` block
pub struct MgfReader<R: BufRead> {
    reader: R,
    source_file: String,
    line_number: usize,
    blocks_read: usize,
    line: String,
}

impl MgfReader<BufReader<File>> {
    /// Open an MGF file, recording its file name on every spectrum
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, MgfError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let source_file = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::new(BufReader::with_capacity(64 * 1024, file)).with_source_file(source_file))
    }
}

/// Header fields collected inside one block
#[derive(Default)]
struct BlockHeader {
    precursor_mz: Option<f64>,
    charge: u16,
    retention_time: f64,
    scans: Option<String>,
    title: Option<String>,
}

impl<R: BufRead> MgfReader<R> {
    /// Create a reader over any buffered input
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            source_file: String::new(),
            line_number: 0,
            blocks_read: 0,
            line: String::new(),
        }
    }

    /// Set the source file name stored on each spectrum
    pub fn with_source_file(mut self, source_file: impl Into<String>) -> Self {
        self.source_file = source_file.into();
        self
    }

    /// Read every remaining spectrum
    pub fn read_all(self) -> Result<Vec<Spectrum>, MgfError> {
        self.collect()
    }

    /// Read the next spectrum, or `None` at end of input
    pub fn next_spectrum(&mut self) -> Result<Option<Spectrum>, MgfError> {
        // Skip anything between blocks
        loop {
            if !self.read_line()? {
                return Ok(None);
            }
            if self.line.trim().eq_ignore_ascii_case("BEGIN IONS") {
                break;
            }
        }

        let opened_at = self.line_number;
        self.blocks_read += 1;
        let mut header = BlockHeader::default();
        let mut peaks = Vec::new();

        loop {
            if !self.read_line()? {
                return Err(MgfError::UnterminatedBlock { line: opened_at });
            }
            let line = self.line.trim();
            if line.is_empty() || line.starts_with(['#', ';', '!', '/']) {
                continue;
            }
            if line.eq_ignore_ascii_case("END IONS") {
                break;
            }

            match line.split_once('=') {
                Some((key, value)) if line.starts_with(|c: char| c.is_ascii_alphabetic()) => {
                    let (key, value) = (key.trim().to_ascii_uppercase(), value.trim());
                    self.parse_header(&mut header, &key, value)?;
                }
                _ => peaks.push(self.parse_peak(line)?),
            }
        }

        Ok(Some(self.finish_block(header, peaks)))
    }

    fn read_line(&mut self) -> Result<bool, MgfError> {
        self.line.clear();
        let read = self.reader.read_line(&mut self.line)?;
        if read > 0 {
            self.line_number += 1;
        }
        Ok(read > 0)
    }

    fn parse_header(&self, header: &mut BlockHeader, key: &str, value: &str) -> Result<(), MgfError> {
        match key {
            "PEPMASS" => {
                let first = value.split_whitespace().next().unwrap_or_default();
                header.precursor_mz = Some(self.parse_number(first)?);
            }
            "RTINSECONDS" => header.retention_time = self.parse_number(value)?,
            "CHARGE" => {
                // "2+", "2+ and 3+": keep the first state
                let first = value.split_whitespace().next().unwrap_or_default();
                match first.trim_matches(['+', '-']).parse::<u16>() {
                    Ok(charge) => header.charge = charge,
                    Err(_) => debug!("Ignoring charge {:?} on line {}", value, self.line_number),
                }
            }
            "SCANS" => header.scans = Some(value.to_string()),
            "TITLE" | "FEATURE_ID" => {
                if header.title.is_none() {
                    header.title = Some(value.to_string());
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn parse_peak(&self, line: &str) -> Result<Peak, MgfError> {
        let mut fields = line.split_whitespace();
        let (Some(mz), Some(intensity)) = (fields.next(), fields.next()) else {
            return Err(MgfError::InvalidNumber {
                line: self.line_number,
                value: line.to_string(),
            });
        };
        Ok(Peak::new(self.parse_number(mz)?, self.parse_number(intensity)?))
    }

    fn parse_number(&self, value: &str) -> Result<f64, MgfError> {
        value.parse::<f64>().map_err(|_| MgfError::InvalidNumber {
            line: self.line_number,
            value: value.to_string(),
        })
    }

    fn finish_block(&self, header: BlockHeader, peaks: Vec<Peak>) -> Spectrum {
        let id = header
            .scans
            .or_else(|| header.title.clone())
            .unwrap_or_else(|| self.blocks_read.to_string());

        if header.precursor_mz.is_none() {
            warn!("Spectrum {} has no PEPMASS; it will not match any partner", id);
        }
        if peaks.is_empty() {
            debug!("Spectrum {} has no peaks", id);
        }

        let mut builder = SpectrumBuilder::new(id)
            .retention_time(header.retention_time)
            .charge(header.charge)
            .source_file(self.source_file.clone())
            .peaks(peaks);
        if let Some(mz) = header.precursor_mz {
            builder = builder.precursor_mz(mz);
        }
        if let Some(title) = header.title {
            builder = builder.title(title);
        }
        builder.build()
    }
}

impl<R: BufRead> Iterator for MgfReader<R> {
    type Item = Result<Spectrum, MgfError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_spectrum() {
            Ok(Some(spectrum)) => Some(Ok(spectrum)),
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        }
    }
}
