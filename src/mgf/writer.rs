use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::MgfError;
use crate::spectrum::Spectrum;

/// Writes spectra as MGF blocks
pub struct MgfWriter<W: Write> {
    writer: W,
    spectra_written: usize,
}

impl MgfWriter<BufWriter<File>> {
    /// Create (or truncate) an MGF file
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, MgfError> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> MgfWriter<W> {
    /// Wrap any writer
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            spectra_written: 0,
        }
    }

    /// Write one spectrum.
    ///
    /// The identifier is written as `SCANS` and the title, if any, as `TITLE`, so reading
    /// the file back yields the same identifiers.
    pub fn write_spectrum(&mut self, spectrum: &Spectrum) -> Result<(), MgfError> {
        let w = &mut self.writer;
        writeln!(w, "BEGIN IONS")?;
        if let Some(title) = &spectrum.title {
            writeln!(w, "TITLE={}", title)?;
        }
        if let Some(mz) = spectrum.precursor_mz {
            writeln!(w, "PEPMASS={}", mz)?;
        }
        if spectrum.charge > 0 {
            writeln!(w, "CHARGE={}+", spectrum.charge)?;
        }
        writeln!(w, "RTINSECONDS={}", spectrum.retention_time)?;
        writeln!(w, "SCANS={}", spectrum.id)?;
        for peak in spectrum.peaks() {
            writeln!(w, "{} {}", peak.mz, peak.intensity)?;
        }
        writeln!(w, "END IONS")?;
        writeln!(w)?;
        self.spectra_written += 1;
        Ok(())
    }

    /// Write a batch of spectra
    pub fn write_spectra<'a, I>(&mut self, spectra: I) -> Result<(), MgfError>
    where
        I: IntoIterator<Item = &'a Spectrum>,
    {
        for spectrum in spectra {
            self.write_spectrum(spectrum)?;
        }
        Ok(())
    }

    /// Flush and return the number of spectra written
    pub fn finish(mut self) -> Result<usize, MgfError> {
        self.writer.flush()?;
        Ok(self.spectra_written)
    }
}
