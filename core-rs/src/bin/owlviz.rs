//! owlviz - OWL ontology visualizer
//!
//! Command-line front end: one subcommand per view plus the consolidated
//! `generate` command.

use anyhow::Context;
use clap::{ArgAction, Args, Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use owlviz_core::ontology::{DEFAULT_EXTERNAL_PREFIXES, DEFAULT_LAYER_PREDICATE};
use owlviz_core::{
    generate, DiagramType, GenerationReport, GeneratorConfig, LayoutEngine, OutputFormat, QueryEngineKind,
    View, VizError, VERSION,
};

#[derive(Parser)]
#[command(name = "owlviz")]
#[command(version = VERSION)]
#[command(about = "Render OWL ontologies as Graphviz graphs", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every view
#[derive(Args, Debug, Clone)]
struct CommonArgs {
    /// Graphviz layout engine
    #[arg(long, value_enum, default_value_t = LayoutEngine::Dot)]
    engine: LayoutEngine,

    /// Do not group nodes into clusters
    #[arg(long)]
    no_clustering: bool,

    /// Only include subjects whose URI starts with this prefix
    #[arg(long)]
    namespace: Option<String>,

    /// Output format (image formats need Graphviz installed)
    #[arg(long, value_enum, default_value_t = OutputFormat::Dot)]
    format: OutputFormat,

    /// SPARQL backend
    #[arg(long, value_enum, default_value_t = QueryEngineKind::Embedded)]
    query_engine: QueryEngineKind,

    /// Do not pin hierarchy roots to the top rank
    #[arg(long)]
    no_root_rank: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Class hierarchy (rdfs:subClassOf)
    Hierarchy {
        /// Ontology file (.owl, .rdf, .ttl, ...)
        input: PathBuf,
        /// Output file
        output: PathBuf,
        #[command(flatten)]
        common: CommonArgs,
    },
    /// Object properties with their domains and ranges
    ObjectProperties {
        input: PathBuf,
        output: PathBuf,
        #[command(flatten)]
        common: CommonArgs,
    },
    /// Data properties grouped by domain class
    DataProperties {
        input: PathBuf,
        output: PathBuf,
        #[command(flatten)]
        common: CommonArgs,
    },
    /// Alignments to external vocabularies (PROV-O, SOSA, SKOS, ...)
    Mappings {
        input: PathBuf,
        output: PathBuf,
        #[command(flatten)]
        common: CommonArgs,
        /// External vocabulary URI prefix; repeatable, replaces the defaults
        #[arg(long = "external-prefix")]
        external_prefixes: Vec<String>,
    },
    /// Classes grouped by architectural layer
    Layers {
        input: PathBuf,
        output: PathBuf,
        #[command(flatten)]
        common: CommonArgs,
        /// Predicate linking a class to its layer
        #[arg(long, default_value = DEFAULT_LAYER_PREDICATE)]
        layer_predicate: String,
    },
    /// Generate a diagram selected by --type
    Generate {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
        /// Diagram type
        #[arg(long = "type", value_enum, default_value_t = DiagramType::Classes)]
        diagram_type: DiagramType,
        #[command(flatten)]
        common: CommonArgs,
    },
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn build_config(input: PathBuf, output: PathBuf, common: CommonArgs) -> GeneratorConfig {
    let mut config = GeneratorConfig::new(input, output);
    config.engine = common.engine;
    config.clustering = !common.no_clustering;
    config.namespace = common.namespace;
    config.format = common.format;
    config.query_engine = common.query_engine;
    config.rank_roots = !common.no_root_rank;
    config
}

/// Resolve a subcommand into the view to run and its configuration
fn plan(command: Commands) -> (View, GeneratorConfig) {
    match command {
        Commands::Hierarchy { input, output, common } => (View::Hierarchy, build_config(input, output, common)),
        Commands::ObjectProperties { input, output, common } => {
            (View::ObjectProperties, build_config(input, output, common))
        }
        Commands::DataProperties { input, output, common } => {
            (View::DataProperties, build_config(input, output, common))
        }
        Commands::Mappings {
            input,
            output,
            common,
            external_prefixes,
        } => {
            let mut config = build_config(input, output, common);
            config.external_prefixes = if external_prefixes.is_empty() {
                DEFAULT_EXTERNAL_PREFIXES.iter().map(|p| p.to_string()).collect()
            } else {
                external_prefixes
            };
            (View::Mappings, config)
        }
        Commands::Layers {
            input,
            output,
            common,
            layer_predicate,
        } => {
            let mut config = build_config(input, output, common);
            config.layer_predicate = layer_predicate;
            (View::Layers, config)
        }
        Commands::Generate {
            input,
            output,
            diagram_type,
            common,
        } => (View::from(diagram_type), build_config(input, output, common)),
    }
}

fn run(command: Commands) -> anyhow::Result<GenerationReport> {
    let (view, config) = plan(command);
    generate(view, &config).with_context(|| format!("Failed to generate {} visualization", view.name()))
}

/// Query failures in strict views exit with 2, everything else with 1
fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<VizError>() {
        Some(VizError::Ontology(_)) => 2,
        _ => 1,
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli.command) {
        Ok(report) => {
            let message = format!(
                "Generated {} visualization: {} (engine: {})",
                report.view.name(),
                report.output.display(),
                report.engine
            );
            println!("{}", message.green());
        }
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            std::process::exit(exit_code(&e));
        }
    }
}
