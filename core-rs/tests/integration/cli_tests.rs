//! Integration tests for the `owlviz` binary
//!
//! Runs the compiled CLI against temp-dir fixtures and checks stdout, the
//! written file and the exit status.

use std::fs;
use std::process::{Command, Output};
use tempfile::TempDir;

const ONTOLOGY_TTL: &str = r#"
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
@prefix owl: <http://www.w3.org/2002/07/owl#> .
@prefix ex: <http://ex.org/onto#> .

ex:Device a owl:Class ; rdfs:label "Device"@en .
ex:Sensor a owl:Class ; rdfs:subClassOf ex:Device ; rdfs:label "Sensor"@en .
"#;

fn owlviz(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_owlviz"))
        .args(args)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run owlviz")
}

fn fixture(temp: &TempDir) -> String {
    let path = temp.path().join("onto.ttl");
    fs::write(&path, ONTOLOGY_TTL).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn test_cli_version_output() {
    let output = owlviz(&["--version"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("owlviz"));
    assert!(stdout.contains(owlviz_core::VERSION));
}

#[test]
fn test_hierarchy_command() {
    let temp = TempDir::new().unwrap();
    let input = fixture(&temp);
    let out = temp.path().join("classes.dot");
    let out_str = out.to_string_lossy().into_owned();

    let output = owlviz(&["hierarchy", &input, &out_str]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Generated class hierarchy visualization:"));
    assert!(stdout.contains("classes.dot"));
    assert!(stdout.contains("(engine: dot)"));

    let dot = fs::read_to_string(&out).unwrap();
    assert_eq!(dot.matches("\"Sensor\" -> \"Device\"").count(), 1);
}

#[test]
fn test_generate_command_with_engine() {
    let temp = TempDir::new().unwrap();
    let input = fixture(&temp);
    let out = temp.path().join("classes.dot");
    let out_str = out.to_string_lossy().into_owned();

    let output = owlviz(&[
        "generate", "--input", &input, "--output", &out_str, "--type", "classes", "--engine", "neato",
    ]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("(engine: neato)"));
    assert!(fs::read_to_string(&out).unwrap().contains("layout=neato;"));
}

#[test]
fn test_missing_input_is_soft_for_hierarchy() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("classes.dot");
    let out_str = out.to_string_lossy().into_owned();

    let output = owlviz(&["hierarchy", "/nonexistent/onto.owl", &out_str]);
    assert!(output.status.success());
    assert!(!fs::read_to_string(&out).unwrap().contains("->"));
}

#[test]
fn test_missing_input_exits_2_for_mappings_and_layers() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("out.dot");
    let out_str = out.to_string_lossy().into_owned();

    for command in ["mappings", "layers"] {
        let output = owlviz(&[command, "/nonexistent/onto.owl", &out_str]);
        assert_eq!(output.status.code(), Some(2), "{} should fail hard", command);
        assert!(!out.exists());
    }
}

#[test]
fn test_unwritable_output_exits_1() {
    let temp = TempDir::new().unwrap();
    let input = fixture(&temp);
    let blocker = temp.path().join("not-a-dir");
    fs::write(&blocker, "").unwrap();
    let out_str = blocker.join("classes.dot").to_string_lossy().into_owned();

    let output = owlviz(&["hierarchy", &input, &out_str]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error:"));
}

#[test]
fn test_invalid_engine_is_usage_error() {
    let output = owlviz(&["hierarchy", "a.owl", "b.dot", "--engine", "graphviz"]);
    assert!(!output.status.success());
}
