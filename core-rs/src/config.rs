//! Per-run generator settings
//!
//! Every option is resolved once into a [`GeneratorConfig`] before any query
//! runs. There are no config files; the binary fills this from its arguments.

use clap::ValueEnum;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::label::WrapOptions;
use crate::ontology::{
    OntologyError, OxigraphEngine, QueryEngine, SparqlCliEngine, DEFAULT_EXTERNAL_PREFIXES,
    DEFAULT_LAYER_PREDICATE,
};
use crate::render::{LayoutEngine, OutputFormat, RenderOptions};

/// Graphviz executable used for image output
pub const DEFAULT_GRAPHVIZ_PROGRAM: &str = "dot";

/// Which SPARQL backend answers the view queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum QueryEngineKind {
    /// In-process oxigraph store
    #[default]
    Embedded,
    /// External `sparql` executable
    SparqlCli,
}

impl QueryEngineKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryEngineKind::Embedded => "embedded",
            QueryEngineKind::SparqlCli => "sparql-cli",
        }
    }

    /// Build the engine for `path`. The embedded store loads the file here;
    /// the CLI engine hands the path to `sparql` untouched, so a missing file
    /// surfaces as a failed query.
    pub fn open(&self, path: &Path) -> Result<Box<dyn QueryEngine>, OntologyError> {
        debug!("[Config] Opening {:?} with the {} engine", path, self.as_str());
        match self {
            QueryEngineKind::Embedded => Ok(Box::new(OxigraphEngine::open(path)?)),
            QueryEngineKind::SparqlCli => Ok(Box::new(SparqlCliEngine::new(path))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub engine: LayoutEngine,
    pub clustering: bool,
    /// Subject URI prefix filter
    pub namespace: Option<String>,
    pub format: OutputFormat,
    pub query_engine: QueryEngineKind,
    pub rank_roots: bool,
    pub wrap: WrapOptions,
    /// URI prefixes treated as external vocabularies by the mappings view
    pub external_prefixes: Vec<String>,
    pub layer_predicate: String,
    pub graphviz_program: String,
}

impl GeneratorConfig {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            engine: LayoutEngine::Dot,
            clustering: true,
            namespace: None,
            format: OutputFormat::Dot,
            query_engine: QueryEngineKind::Embedded,
            rank_roots: true,
            wrap: WrapOptions::default(),
            external_prefixes: DEFAULT_EXTERNAL_PREFIXES.iter().map(|p| p.to_string()).collect(),
            layer_predicate: DEFAULT_LAYER_PREDICATE.to_string(),
            graphviz_program: DEFAULT_GRAPHVIZ_PROGRAM.to_string(),
        }
    }

    /// Namespace filter with blank values treated as "no filter"
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref().map(str::trim).filter(|ns| !ns.is_empty())
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            engine: self.engine,
            clustering: self.clustering,
            rank_roots: self.rank_roots,
            wrap: self.wrap,
        }
    }
}
