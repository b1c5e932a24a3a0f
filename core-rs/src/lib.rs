//! # owl-viz - OWL ontology to Graphviz DOT
//!
//! Reads an OWL ontology, runs read-only SPARQL queries against it and renders
//! the result as a Graphviz graph description.
//!
//! ## Pipeline
//!
//! ```text
//! ontology file ──► query rows ──► relation set ──► DOT text ──► file
//!   (ontology)       (ontology)     (relation)       (render)    (render::output)
//! ```
//!
//! Each view (class hierarchy, object properties, data properties, external
//! mappings, layers) is a fixed query set, an extractor and a graph style; see
//! [`views`].
//!
//! ## Example
//!
//! ```no_run
//! use owlviz_core::{generate, GeneratorConfig, View};
//!
//! let config = GeneratorConfig::new("ontology.owl", "classes.dot");
//! let report = generate(View::Hierarchy, &config)?;
//! println!("{} nodes", report.nodes);
//! # Ok::<(), owlviz_core::VizError>(())
//! ```

pub mod config;
pub mod errors;
pub mod label;
pub mod ontology;
pub mod relation;
pub mod render;
pub mod views;

pub use config::{GeneratorConfig, QueryEngineKind};
pub use errors::{Result, VizError};
pub use label::{local_name, resolve, wrap, LabelCandidates, WrapOptions};
pub use ontology::{OntologyError, OxigraphEngine, QueryEngine, QueryResult, SparqlCliEngine, SparqlQuery, StaticEngine};
pub use relation::{Cluster, Edge, Node, NodeRole, RelationKind, RelationSet};
pub use render::{DotRenderer, GraphStyle, LayoutEngine, OutputFormat, RenderOptions};
pub use views::{generate, generate_with, DiagramType, GenerationReport, View};

/// Crate version, reported by the CLI
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
