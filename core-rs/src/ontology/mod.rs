/**
 * ontology module
 *
 * - engine: SPARQL execution against an ontology file (oxigraph or `sparql` CLI)
 * - query: SPARQL query builders for each view
 * - rows: typed records over raw query rows
 */

pub mod engine;
pub mod query;
pub mod rows;

pub use engine::{OntologyError, OxigraphEngine, QueryEngine, SparqlCliEngine, StaticEngine};
pub use query::{QueryResult, SparqlQuery, DEFAULT_EXTERNAL_PREFIXES, DEFAULT_LAYER_PREDICATE};
pub use rows::{HierarchyRow, LayerRow, MappingKind, MappingRow, PropertyRow};
