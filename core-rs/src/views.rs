//! Views: query set + extractor + graph style
//!
//! `generate` runs one view end to end: open the ontology, query, extract the
//! relation set, render DOT and write it (or convert it) to the output path.
//! Hierarchy and property views degrade to an empty graph when querying
//! fails; mappings and layers surface the failure.

use clap::ValueEnum;
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::PathBuf;
use tracing::{debug, error, info};

use crate::config::GeneratorConfig;
use crate::errors::Result;
use crate::ontology::{QueryEngine, QueryResult, SparqlQuery, StaticEngine};
use crate::relation::extract::{self, LayerMode};
use crate::relation::RelationSet;
use crate::render::{convert_with_graphviz, write_output, DotRenderer, GraphStyle, LayoutEngine, OutputFormat};

const OBJECT_PROPERTY: &str = "owl:ObjectProperty";
const DATATYPE_PROPERTY: &str = "owl:DatatypeProperty";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum View {
    Hierarchy,
    ObjectProperties,
    DataProperties,
    Mappings,
    Layers,
    /// Hierarchy, object and data properties merged into one graph
    All,
}

/// `--type` values of the consolidated `generate` command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum DiagramType {
    #[default]
    Classes,
    Objproperties,
    Dataproperties,
    All,
}

impl From<DiagramType> for View {
    fn from(kind: DiagramType) -> Self {
        match kind {
            DiagramType::Classes => View::Hierarchy,
            DiagramType::Objproperties => View::ObjectProperties,
            DiagramType::Dataproperties => View::DataProperties,
            DiagramType::All => View::All,
        }
    }
}

impl View {
    /// Name used in log and confirmation messages
    pub fn name(&self) -> &'static str {
        match self {
            View::Hierarchy => "class hierarchy",
            View::ObjectProperties => "object properties",
            View::DataProperties => "data properties",
            View::Mappings => "external mappings",
            View::Layers => "layers",
            View::All => "ontology",
        }
    }

    pub fn style(&self) -> GraphStyle {
        match self {
            View::Hierarchy => GraphStyle::new("Class Hierarchy", "TB", "Arial")
                .spacing(0.5, 1.0)
                .with_root_rank(),
            View::ObjectProperties => GraphStyle::new("Object Properties", "TB", "Arial").spacing(0.8, 1.0),
            View::DataProperties => GraphStyle::new("Data Properties", "LR", "Helvetica").spacing(1.0, 1.5),
            View::Mappings => GraphStyle::new("External Mappings", "LR", "Helvetica").spacing(0.9, 1.2),
            View::Layers => GraphStyle::new("Layers Overview", "LR", "Helvetica").spacing(0.8, 1.2),
            View::All => GraphStyle::new("Ontology", "TB", "Arial")
                .spacing(0.8, 1.2)
                .with_root_rank(),
        }
    }

    /// Query failures abort these views instead of yielding an empty graph
    pub fn is_strict(&self) -> bool {
        matches!(self, View::Mappings | View::Layers)
    }

    fn run(&self, engine: &dyn QueryEngine, query: &SparqlQuery) -> Result<Vec<QueryResult>> {
        if self.is_strict() {
            Ok(engine.try_select(query)?)
        } else {
            Ok(engine.select(query))
        }
    }

    /// Query `engine` and build this view's relation set
    pub fn extract(&self, engine: &dyn QueryEngine, config: &GeneratorConfig) -> Result<RelationSet> {
        let namespace = config.namespace();

        let set = match self {
            View::Hierarchy => extract::class_hierarchy(&self.run(engine, &SparqlQuery::class_hierarchy(namespace))?),
            View::ObjectProperties => {
                let props = self.run(engine, &SparqlQuery::object_properties(namespace))?;
                let subprops = self.run(engine, &SparqlQuery::subproperties(OBJECT_PROPERTY, namespace))?;
                extract::object_properties(&props, &subprops)
            }
            View::DataProperties => {
                let props = self.run(engine, &SparqlQuery::data_properties(namespace))?;
                let subprops = self.run(engine, &SparqlQuery::subproperties(DATATYPE_PROPERTY, namespace))?;
                extract::data_properties(&props, &subprops)
            }
            View::Mappings => {
                let query = SparqlQuery::external_mappings(namespace, &config.external_prefixes);
                extract::external_mappings(&self.run(engine, &query)?)
            }
            View::Layers => {
                let query = SparqlQuery::layers(&config.layer_predicate, namespace);
                let mode = if config.render_options().clusters_active() {
                    LayerMode::Clusters
                } else {
                    LayerMode::Edges
                };
                extract::layers(&self.run(engine, &query)?, mode)
            }
            View::All => {
                let mut set = View::Hierarchy.extract(engine, config)?;
                set.merge(View::ObjectProperties.extract(engine, config)?);
                set.merge(View::DataProperties.extract(engine, config)?);
                set
            }
        };

        info!(
            "[{}] Extracted {} nodes, {} edges, {} clusters",
            self.name(),
            set.nodes.len(),
            set.edges.len(),
            set.clusters.len()
        );
        Ok(set)
    }
}

/// What one `generate` call produced
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationReport {
    pub view: View,
    pub output: PathBuf,
    pub engine: LayoutEngine,
    pub format: OutputFormat,
    pub nodes: usize,
    pub edges: usize,
    pub roots: usize,
}

#[derive(Serialize)]
struct GraphSnapshot<'a> {
    view: &'a str,
    #[serde(flatten)]
    relations: &'a RelationSet,
    roots: BTreeSet<String>,
}

/// Open the input with the configured query engine and run `view`.
///
/// When the ontology cannot be opened, lenient views render an empty graph.
pub fn generate(view: View, config: &GeneratorConfig) -> Result<GenerationReport> {
    let engine: Box<dyn QueryEngine> = match config.query_engine.open(&config.input) {
        Ok(engine) => engine,
        Err(e) if view.is_strict() => return Err(e.into()),
        Err(e) => {
            error!("[{}] Could not query {:?}: {}", view.name(), config.input, e);
            Box::new(StaticEngine::empty())
        }
    };

    generate_with(view, engine.as_ref(), config)
}

/// Run `view` against an already opened engine
pub fn generate_with(view: View, engine: &dyn QueryEngine, config: &GeneratorConfig) -> Result<GenerationReport> {
    let set = view.extract(engine, config)?;
    let style = view.style();
    let roots = set.roots();
    debug!("[{}] Roots: {:?}, leaves: {:?}", view.name(), roots, set.leaves());

    match config.format {
        OutputFormat::Json => {
            let snapshot = GraphSnapshot {
                view: &style.name,
                relations: &set,
                roots: roots.clone(),
            };
            write_output(&config.output, &serde_json::to_string_pretty(&snapshot)?)?;
        }
        format => {
            let dot = DotRenderer::new(config.render_options()).render(&set, &style);
            if format.needs_graphviz() {
                convert_with_graphviz(&config.graphviz_program, &dot, &config.output, format, config.engine)?;
            } else {
                write_output(&config.output, &dot)?;
            }
        }
    }

    Ok(GenerationReport {
        view,
        output: config.output.clone(),
        engine: config.engine,
        format: config.format,
        nodes: set.nodes.len(),
        edges: set.edges.len(),
        roots: roots.len(),
    })
}
