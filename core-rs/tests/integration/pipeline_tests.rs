//! Integration tests for the ontology → DOT pipeline
//!
//! Each test writes a small ontology into a temp directory and runs a full
//! view through the embedded oxigraph engine:
//! - Turtle and RDF/XML input
//! - every view, including the merged `all` diagram
//! - soft vs. strict failure on unreadable input

use owlviz_core::{generate, DiagramType, GeneratorConfig, LayoutEngine, OutputFormat, View, VizError};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const ONTOLOGY_TTL: &str = r#"
@prefix rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
@prefix owl: <http://www.w3.org/2002/07/owl#> .
@prefix xsd: <http://www.w3.org/2001/XMLSchema#> .
@prefix prov: <http://www.w3.org/ns/prov#> .
@prefix cds: <http://connectdigitalstudy.com/ontology#> .
@prefix ex: <http://ex.org/onto#> .

ex:Device a owl:Class ;
    rdfs:label "Device"@en ;
    cds:belongsToLayer ex:PhysicalLayer .

ex:Sensor a owl:Class ;
    rdfs:subClassOf ex:Device ;
    rdfs:label "Sensor"@en , "Capteur"@fr ;
    cds:belongsToLayer ex:PhysicalLayer .

ex:Station a owl:Class ;
    rdfs:subClassOf owl:Thing ;
    rdfs:label "Environmental Monitoring Station"@en .

ex:Observation a owl:Class ;
    rdfs:subClassOf prov:Entity .

ex:PhysicalLayer rdfs:label "Physical Layer"@en .

ex:observes a owl:ObjectProperty ;
    rdfs:domain ex:Sensor ;
    rdfs:range ex:Observation .

ex:measures a owl:ObjectProperty ;
    rdfs:subPropertyOf ex:observes .

ex:generatedBy a owl:ObjectProperty ;
    rdfs:subPropertyOf prov:wasGeneratedBy .

ex:hasValue a owl:DatatypeProperty ;
    rdfs:label "has value"@en ;
    rdfs:domain ex:Observation ;
    rdfs:range xsd:double .
"#;

const ONTOLOGY_RDF_XML: &str = r#"<?xml version="1.0"?>
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
         xmlns:rdfs="http://www.w3.org/2000/01/rdf-schema#"
         xmlns:owl="http://www.w3.org/2002/07/owl#">
  <owl:Class rdf:about="http://ex.org/onto#Device">
    <rdfs:label xml:lang="en">Device</rdfs:label>
  </owl:Class>
  <owl:Class rdf:about="http://ex.org/onto#Sensor">
    <rdfs:subClassOf rdf:resource="http://ex.org/onto#Device"/>
    <rdfs:label xml:lang="en">Sensor</rdfs:label>
  </owl:Class>
</rdf:RDF>
"#;

fn write_fixture(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn turtle_config(temp: &TempDir, output: &str) -> GeneratorConfig {
    let input = write_fixture(temp.path(), "onto.ttl", ONTOLOGY_TTL);
    GeneratorConfig::new(input, temp.path().join(output))
}

#[test]
fn test_hierarchy_from_rdf_xml() {
    let temp = TempDir::new().unwrap();
    let input = write_fixture(temp.path(), "onto.owl", ONTOLOGY_RDF_XML);
    let config = GeneratorConfig::new(input, temp.path().join("out").join("classes.dot"));

    let report = generate(View::Hierarchy, &config).unwrap();
    assert_eq!(report.nodes, 2);
    assert_eq!(report.edges, 1);

    let dot = fs::read_to_string(&config.output).unwrap();
    assert!(dot.starts_with("digraph \"Class Hierarchy\" {"));
    assert_eq!(dot.matches("\"Sensor\" -> \"Device\"").count(), 1);
    assert!(dot.contains("{ rank=min; \"Device\"; }"));
}

#[test]
fn test_hierarchy_from_turtle() {
    let temp = TempDir::new().unwrap();
    let config = turtle_config(&temp, "classes.dot");

    generate(View::Hierarchy, &config).unwrap();
    let dot = fs::read_to_string(&config.output).unwrap();

    // Multilingual labels must not duplicate the edge
    assert_eq!(dot.matches("\"Sensor\" -> \"Device\"").count(), 1);
    assert!(dot.contains("\"Sensor\" [label=\"Sensor\""));
    assert!(dot.contains("\"Observation\" -> \"Entity\""));
    assert!(dot.contains("{ rank=min; \"Device\"; \"Entity\"; }"));

    // owl:Thing is never a parent
    assert!(!dot.contains("Thing"));
    assert!(!dot.contains("Station"));
}

#[test]
fn test_hierarchy_with_sfdp_engine() {
    let temp = TempDir::new().unwrap();
    let mut config = turtle_config(&temp, "classes.dot");
    config.engine = LayoutEngine::Sfdp;

    let report = generate(View::Hierarchy, &config).unwrap();
    assert_eq!(report.engine, LayoutEngine::Sfdp);

    let dot = fs::read_to_string(&config.output).unwrap();
    assert!(dot.contains("layout=sfdp;"));
    assert!(dot.contains("overlap=prism;"));
    assert!(!dot.contains("rankdir"));
}

#[test]
fn test_object_properties_view() {
    let temp = TempDir::new().unwrap();
    let config = turtle_config(&temp, "objprops.dot");

    let report = generate(View::ObjectProperties, &config).unwrap();
    assert_eq!(report.nodes, 5);
    assert_eq!(report.edges, 3);

    let dot = fs::read_to_string(&config.output).unwrap();
    assert!(dot.contains("\"observes\" -> \"Sensor\" [label=\"domain\""));
    assert!(dot.contains("\"observes\" -> \"Observation\" [label=\"range\""));
    assert!(dot.contains("\"measures\" -> \"observes\" [label=\"subPropertyOf\""));
    assert!(dot.contains("\"generatedBy\" [label=\"generatedBy\""));
    assert!(!dot.contains("wasGeneratedBy"));
}

#[test]
fn test_data_properties_view() {
    let temp = TempDir::new().unwrap();
    let config = turtle_config(&temp, "dataprops.dot");

    generate(View::DataProperties, &config).unwrap();
    let dot = fs::read_to_string(&config.output).unwrap();

    assert!(dot.contains("rankdir=LR;"));
    assert!(dot.contains("label=\"Observation Properties\""));
    assert!(dot.contains("\"hasValue\" [label=\"has value\\n(double)\""));
    assert!(dot.contains("\"hasValue\" -> \"Observation\""));
}

#[test]
fn test_mappings_view() {
    let temp = TempDir::new().unwrap();
    let config = turtle_config(&temp, "mappings.dot");

    let report = generate(View::Mappings, &config).unwrap();
    assert_eq!(report.edges, 2);

    let dot = fs::read_to_string(&config.output).unwrap();
    assert!(dot.contains("\"Observation\" -> \"Entity\" [style=solid];"));
    assert!(dot.contains("\"generatedBy\" -> \"wasGeneratedBy\" [style=dashed];"));
    assert!(dot.contains("label=\"Ontology\""));
    assert!(dot.contains("label=\"External\""));
    assert!(!dot.contains("\"Sensor\" -> \"Device\""));
}

#[test]
fn test_mappings_with_custom_prefix() {
    let temp = TempDir::new().unwrap();
    let mut config = turtle_config(&temp, "mappings.dot");
    config.external_prefixes = vec!["http://purl.org/dc/terms/".to_string()];

    let report = generate(View::Mappings, &config).unwrap();
    assert_eq!(report.edges, 0);
}

#[test]
fn test_layers_view() {
    let temp = TempDir::new().unwrap();
    let config = turtle_config(&temp, "layers.dot");

    let report = generate(View::Layers, &config).unwrap();
    assert_eq!(report.nodes, 2);

    let dot = fs::read_to_string(&config.output).unwrap();
    assert!(dot.contains("subgraph cluster_0 {"));
    assert!(dot.contains("label=\"Physical Layer\""));
    assert!(dot.contains("\"Sensor\" [label=\"Sensor\""));
    assert!(dot.contains("\"Device\" [label=\"Device\""));
}

#[test]
fn test_layers_view_without_clusters() {
    let temp = TempDir::new().unwrap();
    let mut config = turtle_config(&temp, "layers.dot");
    config.clustering = false;

    generate(View::Layers, &config).unwrap();
    let dot = fs::read_to_string(&config.output).unwrap();

    assert!(!dot.contains("subgraph"));
    assert!(dot.contains("\"layer_PhysicalLayer\" [label=\"Physical Layer\""));
    assert!(dot.contains("\"Sensor\" -> \"layer_PhysicalLayer\""));
}

#[test]
fn test_generate_all_merges_views() {
    let temp = TempDir::new().unwrap();
    let config = turtle_config(&temp, "all.dot");

    let report = generate(View::from(DiagramType::All), &config).unwrap();
    assert_eq!(report.view, View::All);

    let dot = fs::read_to_string(&config.output).unwrap();
    assert!(dot.starts_with("digraph \"Ontology\" {"));
    assert!(dot.contains("\"Sensor\" -> \"Device\""));
    assert!(dot.contains("\"observes\" -> \"Sensor\""));
    assert!(dot.contains("\"hasValue\" -> \"Observation\""));
}

#[test]
fn test_namespace_filter() {
    let temp = TempDir::new().unwrap();
    let mut config = turtle_config(&temp, "objprops.dot");
    config.namespace = Some("http://other.org/".to_string());

    let report = generate(View::ObjectProperties, &config).unwrap();
    assert_eq!(report.nodes, 0);
}

#[test]
fn test_json_output() {
    let temp = TempDir::new().unwrap();
    let mut config = turtle_config(&temp, "classes.json");
    config.format = OutputFormat::Json;

    generate(View::Hierarchy, &config).unwrap();
    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&config.output).unwrap()).unwrap();

    assert_eq!(json["view"], "Class Hierarchy");
    assert_eq!(json["nodes"]["Sensor"]["uri"], "http://ex.org/onto#Sensor");
    assert_eq!(json["roots"], serde_json::json!(["Device", "Entity"]));
}

#[test]
fn test_unreadable_input_soft_for_hierarchy() {
    let temp = TempDir::new().unwrap();
    let input = write_fixture(temp.path(), "broken.ttl", "this is not turtle");
    let config = GeneratorConfig::new(input, temp.path().join("classes.dot"));

    let report = generate(View::Hierarchy, &config).unwrap();
    assert_eq!(report.nodes, 0);

    let dot = fs::read_to_string(&config.output).unwrap();
    assert!(dot.starts_with("digraph \"Class Hierarchy\" {"));
    assert!(dot.ends_with("}\n"));
    assert!(!dot.contains("->"));
}

#[test]
fn test_unreadable_input_strict_for_mappings() {
    let temp = TempDir::new().unwrap();
    let input = write_fixture(temp.path(), "broken.ttl", "this is not turtle");
    let config = GeneratorConfig::new(input, temp.path().join("mappings.dot"));

    let result = generate(View::Mappings, &config);
    assert!(matches!(result, Err(VizError::Ontology(_))));
    assert!(!config.output.exists());
}
