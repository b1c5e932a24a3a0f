/**
 * engine.rs
 * SPARQL query boundary: the ontology file goes in, tabular rows come out
 *
 * - OxigraphEngine: embedded store, loaded once per run
 * - SparqlCliEngine: external `sparql` executable (Apache Jena), TSV results
 * - StaticEngine: canned responses, used when the ontology could not be opened
 */

use oxigraph::io::RdfFormat;
use oxigraph::model::Term;
use oxigraph::sparql::results::{QueryResultsFormat, QueryResultsParser, ReaderQueryResultsParserOutput};
use oxigraph::sparql::{QueryResults, QuerySolution};
use oxigraph::store::Store;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::ontology::query::{QueryResult, SparqlQuery};

#[derive(Error, Debug)]
pub enum OntologyError {
    #[error("Failed to load ontology: {0}")]
    LoadError(String),

    #[error("Failed to parse query results: {0}")]
    ParseError(String),

    #[error("Ontology not found: {0}")]
    NotFound(String),

    #[error("Query error: {0}")]
    QueryError(String),

    #[error("SPARQL process failed: {0}")]
    ProcessError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Oxigraph error: {0}")]
    StoreError(String),
}

/// Executes read-only SELECT queries against one ontology
pub trait QueryEngine {
    /// Short name used in diagnostics
    fn name(&self) -> &'static str;

    /// Run the query, surfacing any failure to the caller
    fn try_select(&self, query: &SparqlQuery) -> Result<Vec<QueryResult>, OntologyError>;

    /// Run the query; a failure is logged and treated as "no rows"
    fn select(&self, query: &SparqlQuery) -> Vec<QueryResult> {
        match self.try_select(query) {
            Ok(rows) => rows,
            Err(e) => {
                error!(engine = self.name(), "SPARQL query failed: {}", e);
                Vec::new()
            }
        }
    }
}

/// Pick the RDF syntax from the file extension; OWL files default to RDF/XML
pub fn rdf_format_for(path: &Path) -> RdfFormat {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "ttl" | "turtle" => RdfFormat::Turtle,
        "nt" => RdfFormat::NTriples,
        "nq" => RdfFormat::NQuads,
        "trig" => RdfFormat::TriG,
        "n3" => RdfFormat::N3,
        _ => RdfFormat::RdfXml,
    }
}

/// Bare string value of a bound term: IRIs without brackets, literals by
/// lexical value, blank nodes as `_:id`
pub fn term_value(term: &Term) -> String {
    match term {
        Term::NamedNode(node) => node.as_str().to_string(),
        Term::BlankNode(node) => format!("_:{}", node.as_str()),
        Term::Literal(literal) => literal.value().to_string(),
        #[allow(unreachable_patterns)]
        other => other.to_string(),
    }
}

fn solution_to_row(solution: &QuerySolution) -> QueryResult {
    solution
        .iter()
        .map(|(var, term)| (var.as_str().to_string(), term_value(term)))
        .collect()
}

/// Embedded oxigraph store holding a single ontology in its default graph
pub struct OxigraphEngine {
    store: Store,
}

impl OxigraphEngine {
    /// Load the ontology file into a fresh in-memory store
    pub fn open(path: &Path) -> Result<Self, OntologyError> {
        if !path.exists() {
            return Err(OntologyError::NotFound(format!("File not found: {:?}", path)));
        }

        if path.is_dir() {
            return Err(OntologyError::LoadError(format!("Path is a directory: {:?}", path)));
        }

        let store = Store::new().map_err(|e| OntologyError::StoreError(e.to_string()))?;
        let format = rdf_format_for(path);
        info!("[OxigraphEngine] Loading ontology {:?} as {:?}", path, format);

        let reader = BufReader::new(File::open(path)?);
        store
            .load_from_reader(format, reader)
            .map_err(|e| OntologyError::LoadError(format!("{}: {}", path.display(), e)))?;

        let triples = store.len().map_err(|e| OntologyError::StoreError(e.to_string()))?;
        info!("[OxigraphEngine] Loaded {} triples", triples);

        Ok(Self { store })
    }

    /// Build a store from in-memory RDF text
    pub fn from_content(content: &str, format: RdfFormat) -> Result<Self, OntologyError> {
        let store = Store::new().map_err(|e| OntologyError::StoreError(e.to_string()))?;
        store
            .load_from_reader(format, content.as_bytes())
            .map_err(|e| OntologyError::LoadError(e.to_string()))?;

        Ok(Self { store })
    }
}

impl QueryEngine for OxigraphEngine {
    fn name(&self) -> &'static str {
        "oxigraph"
    }

    fn try_select(&self, query: &SparqlQuery) -> Result<Vec<QueryResult>, OntologyError> {
        debug!("[OxigraphEngine] Executing query:{}", query.as_str());

        let results = self
            .store
            .query(query.as_str())
            .map_err(|e| OntologyError::QueryError(e.to_string()))?;

        match results {
            QueryResults::Solutions(solutions) => {
                let mut rows = Vec::new();

                for solution in solutions {
                    let solution = solution.map_err(|e| OntologyError::QueryError(e.to_string()))?;
                    rows.push(solution_to_row(&solution));
                }

                debug!("[OxigraphEngine] {} rows", rows.len());
                Ok(rows)
            }
            QueryResults::Boolean(_) => Err(OntologyError::QueryError(
                "Expected SELECT query, got ASK".to_string(),
            )),
            QueryResults::Graph(_) => Err(OntologyError::QueryError(
                "Expected SELECT query, got CONSTRUCT/DESCRIBE".to_string(),
            )),
        }
    }
}

/// Shells out to an external `sparql` executable for every query
pub struct SparqlCliEngine {
    program: String,
    data: PathBuf,
}

impl SparqlCliEngine {
    pub const DEFAULT_PROGRAM: &'static str = "sparql";

    pub fn new(data: &Path) -> Self {
        Self::with_program(Self::DEFAULT_PROGRAM, data)
    }

    pub fn with_program(program: impl Into<String>, data: &Path) -> Self {
        Self {
            program: program.into(),
            data: data.to_path_buf(),
        }
    }

    /// Parse a SPARQL TSV result document into rows
    pub fn parse_tsv(output: &[u8]) -> Result<Vec<QueryResult>, OntologyError> {
        let parser = QueryResultsParser::from_format(QueryResultsFormat::Tsv);
        let parsed = parser
            .for_reader(output)
            .map_err(|e| OntologyError::ParseError(e.to_string()))?;

        match parsed {
            ReaderQueryResultsParserOutput::Solutions(solutions) => {
                let mut rows = Vec::new();
                for solution in solutions {
                    let solution = solution.map_err(|e| OntologyError::ParseError(e.to_string()))?;
                    rows.push(solution_to_row(&solution));
                }
                Ok(rows)
            }
            ReaderQueryResultsParserOutput::Boolean(_) => Err(OntologyError::ParseError(
                "Expected solutions, got a boolean result".to_string(),
            )),
        }
    }
}

impl QueryEngine for SparqlCliEngine {
    fn name(&self) -> &'static str {
        "sparql-cli"
    }

    fn try_select(&self, query: &SparqlQuery) -> Result<Vec<QueryResult>, OntologyError> {
        let mut query_file = tempfile::Builder::new()
            .prefix("owlviz-query-")
            .suffix(".rq")
            .tempfile()?;
        query_file.write_all(query.as_str().as_bytes())?;
        query_file.flush()?;

        debug!(
            "[SparqlCliEngine] {} --data {:?} --query {:?}",
            self.program,
            self.data,
            query_file.path()
        );

        let output = Command::new(&self.program)
            .arg("--data")
            .arg(&self.data)
            .arg("--query")
            .arg(query_file.path())
            .arg("--results=TSV")
            .output()
            .map_err(|e| OntologyError::ProcessError(format!("failed to spawn {}: {}", self.program, e)))?;

        if !output.status.success() {
            return Err(OntologyError::ProcessError(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Self::parse_tsv(&output.stdout)
    }
}

/// Replays canned responses in call order; exhausted engines return no rows
#[derive(Default)]
pub struct StaticEngine {
    responses: RefCell<VecDeque<Result<Vec<QueryResult>, String>>>,
}

impl StaticEngine {
    pub fn new(responses: Vec<Vec<QueryResult>>) -> Self {
        Self {
            responses: RefCell::new(responses.into_iter().map(Ok).collect()),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Every query fails with the given message
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            responses: RefCell::new(VecDeque::from(vec![Err(message.into())])),
        }
    }
}

impl QueryEngine for StaticEngine {
    fn name(&self) -> &'static str {
        "static"
    }

    fn try_select(&self, _query: &SparqlQuery) -> Result<Vec<QueryResult>, OntologyError> {
        let mut responses = self.responses.borrow_mut();
        match responses.front() {
            Some(Err(message)) => Err(OntologyError::QueryError(message.clone())),
            Some(Ok(_)) => match responses.pop_front() {
                Some(Ok(rows)) => Ok(rows),
                _ => Ok(Vec::new()),
            },
            None => Ok(Vec::new()),
        }
    }
}
