use serde::{Deserialize, Serialize};

/// A single fragment peak
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Peak {
    /// Mass-to-charge ratio
    pub mz: f64,
    /// Peak intensity (non-negative)
    pub intensity: f64,
}

impl Peak {
    /// Create a new peak
    pub fn new(mz: f64, intensity: f64) -> Self {
        Self { mz, intensity }
    }
}

impl From<(f64, f64)> for Peak {
    fn from((mz, intensity): (f64, f64)) -> Self {
        Self { mz, intensity }
    }
}

/// One fragmentation spectrum with its precursor metadata and m/z-sorted peaks
///
/// A spectrum with zero peaks, zero total intensity or no precursor mass is still a valid
/// member of a job; it simply scores 0 against every partner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spectrum {
    /// Stable identifier, typically the scan number
    pub id: String,

    /// Feature title (`TITLE` or `FEATURE_ID`) when the source record carried one
    #[serde(default)]
    pub title: Option<String>,

    /// Precursor m/z, `None` when the source record did not provide one
    pub precursor_mz: Option<f64>,

    /// Retention time in seconds
    pub retention_time: f64,

    /// Precursor charge state (0 = unknown)
    pub charge: u16,

    /// File the spectrum was read from
    pub source_file: String,

    peaks: Vec<Peak>,
}

impl Spectrum {
    /// Create a spectrum from an identifier, precursor m/z and peaks.
    ///
    /// Peaks are sorted by ascending m/z.
    pub fn new(id: impl Into<String>, precursor_mz: Option<f64>, peaks: Vec<Peak>) -> Self {
        let mut spectrum = Self {
            id: id.into(),
            title: None,
            precursor_mz,
            retention_time: 0.0,
            charge: 0,
            source_file: String::new(),
            peaks,
        };
        spectrum.sort_peaks();
        spectrum
    }

    /// Identifier used to join against feature tables: the title, else the id
    pub fn feature_id(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.id)
    }

    /// Peaks sorted by ascending m/z
    pub fn peaks(&self) -> &[Peak] {
        &self.peaks
    }

    /// Replace the peak list, restoring m/z order
    pub fn set_peaks(&mut self, peaks: Vec<Peak>) {
        self.peaks = peaks;
        self.sort_peaks();
    }

    /// Get the number of peaks in this spectrum
    pub fn peak_count(&self) -> usize {
        self.peaks.len()
    }

    /// Whether the spectrum has no peaks
    pub fn is_empty(&self) -> bool {
        self.peaks.is_empty()
    }

    /// Sum of all peak intensities
    pub fn total_intensity(&self) -> f64 {
        self.peaks.iter().map(|p| p.intensity).sum()
    }

    /// Whether this spectrum can produce a non-zero score against anything
    pub fn is_scorable(&self) -> bool {
        self.precursor_mz.is_some() && self.peaks.iter().any(|p| p.intensity > 0.0)
    }

    fn sort_peaks(&mut self) {
        self.peaks.sort_by(|a, b| a.mz.total_cmp(&b.mz));
    }
}

/// Builder for constructing Spectrum objects fluently
#[derive(Debug)]
pub struct SpectrumBuilder {
    spectrum: Spectrum,
}

impl SpectrumBuilder {
    /// Create a new spectrum builder with the required identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            spectrum: Spectrum {
                id: id.into(),
                title: None,
                precursor_mz: None,
                retention_time: 0.0,
                charge: 0,
                source_file: String::new(),
                peaks: Vec::new(),
            },
        }
    }

    /// Set the precursor m/z
    pub fn precursor_mz(mut self, mz: f64) -> Self {
        self.spectrum.precursor_mz = Some(mz);
        self
    }

    /// Set the feature title
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.spectrum.title = Some(title.into());
        self
    }

    /// Set the retention time in seconds
    pub fn retention_time(mut self, rt: f64) -> Self {
        self.spectrum.retention_time = rt;
        self
    }

    /// Set the precursor charge state
    pub fn charge(mut self, charge: u16) -> Self {
        self.spectrum.charge = charge;
        self
    }

    /// Set the source file name
    pub fn source_file(mut self, source_file: impl Into<String>) -> Self {
        self.spectrum.source_file = source_file.into();
        self
    }

    /// Set all peaks at once
    pub fn peaks(mut self, peaks: Vec<Peak>) -> Self {
        self.spectrum.peaks = peaks;
        self
    }

    /// Add a single peak with m/z and intensity
    pub fn add_peak(mut self, mz: f64, intensity: f64) -> Self {
        self.spectrum.peaks.push(Peak { mz, intensity });
        self
    }

    /// Build the spectrum, sorting peaks by m/z
    pub fn build(mut self) -> Spectrum {
        self.spectrum.sort_peaks();
        self.spectrum
    }
}
