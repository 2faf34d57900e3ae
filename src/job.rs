//! Per-job working state.
//!
//! A [`NetworkJob`] owns everything one networking run touches: the validated
//! configuration, the immutable spectrum collection, the materialized match table and the
//! network. Nothing is shared between jobs.
//!
//! ```rust,no_run
//! use specnet::config::NetworkConfig;
//! use specnet::job::NetworkJob;
//!
//! let config = NetworkConfig::new(0.02, 0.7, 10, 5);
//! let mut job = NetworkJob::from_mgf(config, "spectra.mgf")?;
//! let stats = job.run()?;
//! println!("{}", stats);
//! job.write_outputs("results")?;
//! # Ok::<(), specnet::job::JobError>(())
//! ```

use std::fmt;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use log::info;

use crate::config::{ConfigError, NetworkConfig};
use crate::export::{write_graphml, write_match_table_file, ExportError, GraphExport};
use crate::matching::{generate_all_matches, MatchRecord};
use crate::mgf::{MgfError, MgfReader};
use crate::network::{bound_component_size, build_network, MolecularNetwork};
use crate::spectrum::Spectrum;

/// File name of the match table written by [`NetworkJob::write_outputs`]
pub const MATCH_TABLE_FILE: &str = "matches.csv";
/// File name of the JSON graph listing
pub const NETWORK_JSON_FILE: &str = "network.json";
/// File name of the GraphML document
pub const NETWORK_GRAPHML_FILE: &str = "network.graphml";

/// Errors that can occur while running a job
#[derive(Debug, thiserror::Error)]
pub enum JobError {
    /// Configuration rejected
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Spectrum input could not be read
    #[error("MGF error: {0}")]
    Mgf(#[from] MgfError),

    /// Results could not be written
    #[error("Export error: {0}")]
    Export(#[from] ExportError),
}

/// Summary of a finished run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobStats {
    /// Spectra in the job
    pub spectra: usize,
    /// Match table rows, sentinels included
    pub records: usize,
    /// Base spectra without any neighbor
    pub sentinels: usize,
    /// Network nodes
    pub nodes: usize,
    /// Network edges after pruning
    pub edges: usize,
    /// Edges removed by the component bound
    pub edges_pruned: usize,
    /// Connected components after pruning
    pub components: usize,
}

impl fmt::Display for JobStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Spectra:        {}", self.spectra)?;
        writeln!(f, "Match records:  {} ({} without neighbors)", self.records, self.sentinels)?;
        writeln!(f, "Nodes:          {}", self.nodes)?;
        writeln!(f, "Edges:          {} ({} pruned)", self.edges, self.edges_pruned)?;
        write!(f, "Components:     {}", self.components)
    }
}

/// One networking run
#[derive(Debug)]
pub struct NetworkJob {
    config: NetworkConfig,
    spectra: Vec<Spectrum>,
    matches: Vec<MatchRecord>,
    network: MolecularNetwork,
}

impl NetworkJob {
    /// Create a job over `spectra`, rejecting an invalid configuration
    pub fn new(config: NetworkConfig, spectra: Vec<Spectrum>) -> Result<Self, JobError> {
        config.validate()?;
        Ok(Self {
            config,
            spectra,
            matches: Vec::new(),
            network: MolecularNetwork::new(),
        })
    }

    /// Create a job over the spectra of an MGF file
    pub fn from_mgf<P: AsRef<Path>>(config: NetworkConfig, path: P) -> Result<Self, JobError> {
        config.validate()?;
        let spectra = MgfReader::open(path)?.read_all()?;
        info!("Loaded {} spectra", spectra.len());
        Self::new(config, spectra)
    }

    /// Run match generation, network building and component pruning in order.
    ///
    /// Running again replaces the previous results.
    pub fn run(&mut self) -> Result<JobStats, JobError> {
        self.matches = generate_all_matches(&self.spectra, &self.config)?;
        self.network = build_network(
            &self.matches,
            self.config.cosine_threshold,
            self.config.display_mass_cutoff,
        );
        let pruned = bound_component_size(&mut self.network, self.config.max_component_size);

        Ok(JobStats {
            spectra: self.spectra.len(),
            records: self.matches.len(),
            sentinels: self.matches.iter().filter(|r| r.is_sentinel()).count(),
            nodes: self.network.node_count(),
            edges: self.network.edge_count(),
            edges_pruned: pruned.edges_removed,
            components: self.network.components().len(),
        })
    }

    /// Validated configuration
    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    /// Input spectra
    pub fn spectra(&self) -> &[Spectrum] {
        &self.spectra
    }

    /// Match table of the last run
    pub fn matches(&self) -> &[MatchRecord] {
        &self.matches
    }

    /// Network of the last run
    pub fn network(&self) -> &MolecularNetwork {
        &self.network
    }

    /// Node/edge listing of the last run
    pub fn graph_export(&self) -> GraphExport {
        GraphExport::from_network(&self.network)
    }

    /// Write the match table, JSON listing and GraphML document into `dir`
    pub fn write_outputs<P: AsRef<Path>>(&self, dir: P) -> Result<(), JobError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir).map_err(ExportError::from)?;

        write_match_table_file(&self.matches, dir.join(MATCH_TABLE_FILE))?;

        let graph = self.graph_export();
        let json = File::create(dir.join(NETWORK_JSON_FILE)).map_err(ExportError::from)?;
        graph.write_json(BufWriter::new(json))?;
        let graphml = File::create(dir.join(NETWORK_GRAPHML_FILE)).map_err(ExportError::from)?;
        write_graphml(&graph, BufWriter::new(graphml))?;

        info!("Wrote results to {}", dir.display());
        Ok(())
    }
}
