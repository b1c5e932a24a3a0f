//! Typed views over raw query rows
//!
//! Each query has a fixed record. Required columns are plain `String`s and a
//! row missing one of them is rejected by `from_row`; everything else is an
//! `Option`. Blank strings count as unbound.

use crate::label::LabelCandidates;
use crate::ontology::query::QueryResult;

fn column(row: &QueryResult, name: &str) -> Option<String> {
    row.get(name)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn labels(row: &QueryResult, prefix: &str) -> LabelCandidates {
    LabelCandidates {
        en: column(row, &format!("{}LabelEn", prefix)),
        any: column(row, &format!("{}LabelAny", prefix))
            .or_else(|| column(row, &format!("{}Label", prefix))),
    }
}

/// `?child rdfs:subClassOf ?parent` / `?child rdfs:subPropertyOf ?parent`
#[derive(Debug, Clone, PartialEq)]
pub struct HierarchyRow {
    pub child: String,
    pub parent: String,
    pub child_labels: LabelCandidates,
    pub parent_labels: LabelCandidates,
}

impl HierarchyRow {
    pub fn from_row(row: &QueryResult) -> Option<Self> {
        Some(Self {
            child: column(row, "child")?,
            parent: column(row, "parent")?,
            child_labels: labels(row, "child"),
            parent_labels: labels(row, "parent"),
        })
    }
}

/// A property with its optional domain and range
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyRow {
    pub prop: String,
    pub domain: Option<String>,
    pub range: Option<String>,
    pub prop_labels: LabelCandidates,
    pub domain_labels: LabelCandidates,
    pub range_labels: LabelCandidates,
}

impl PropertyRow {
    pub fn from_row(row: &QueryResult) -> Option<Self> {
        Some(Self {
            prop: column(row, "prop")?,
            domain: column(row, "domain"),
            range: column(row, "range"),
            prop_labels: labels(row, "prop"),
            domain_labels: labels(row, "domain"),
            range_labels: labels(row, "range"),
        })
    }
}

/// How an internal term is aligned with the external one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingKind {
    Class,
    Property,
}

/// An internal term aligned with an external vocabulary term
#[derive(Debug, Clone, PartialEq)]
pub struct MappingRow {
    pub internal: String,
    pub external: String,
    pub kind: MappingKind,
    pub internal_labels: LabelCandidates,
    pub external_labels: LabelCandidates,
}

impl MappingRow {
    pub fn from_row(row: &QueryResult) -> Option<Self> {
        let kind = match column(row, "kind")?.as_str() {
            "class" => MappingKind::Class,
            "property" => MappingKind::Property,
            _ => return None,
        };

        Some(Self {
            internal: column(row, "odim")?,
            external: column(row, "ext")?,
            kind,
            internal_labels: labels(row, "odim"),
            external_labels: labels(row, "ext"),
        })
    }
}

/// A class and the layer it belongs to
#[derive(Debug, Clone, PartialEq)]
pub struct LayerRow {
    pub class: String,
    pub layer: String,
    pub class_labels: LabelCandidates,
    pub layer_labels: LabelCandidates,
}

impl LayerRow {
    pub fn from_row(row: &QueryResult) -> Option<Self> {
        Some(Self {
            class: column(row, "cls")?,
            layer: column(row, "layer")?,
            class_labels: labels(row, "cls"),
            layer_labels: labels(row, "layer"),
        })
    }
}
