//! In-memory relation set extracted from query rows
//!
//! Nodes are keyed by local name (see [`crate::label::local_name`]), so two
//! URIs sharing a trailing segment collapse into one node. Edges are kept in
//! collection order and never deduplicated.

pub mod analyzer;
pub mod extract;

use serde::Serialize;
use std::collections::BTreeMap;

use crate::label::{local_name, LabelCandidates};

/// Typed relation between two nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelationKind {
    SubClassOf,
    SubPropertyOf,
    Domain,
    Range,
    LayerMembership,
    ClassMapping,
    PropertyMapping,
}

impl RelationKind {
    /// Child → parent relations; their sources are never roots
    pub fn is_hierarchy(&self) -> bool {
        matches!(self, RelationKind::SubClassOf | RelationKind::SubPropertyOf)
    }
}

/// What a node stands for; selects its shape and fill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeRole {
    Class,
    ObjectProperty,
    DataProperty,
    /// Term of the ontology being mapped
    Internal,
    /// Term of an external vocabulary
    External,
    Layer,
    /// "+N more" placeholder
    Overflow,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub key: String,
    /// Source URI; synthetic nodes have none
    pub uri: Option<String>,
    pub label: String,
    /// True once `label` came from an `rdfs:label` rather than the local name
    pub explicit_label: bool,
    pub role: NodeRole,
    /// Second label line, e.g. the datatype of a data property
    pub annotation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
    pub kind: RelationKind,
}

/// Labelled group of nodes rendered as a `subgraph cluster_N`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cluster {
    pub key: String,
    pub label: String,
    pub members: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RelationSet {
    pub nodes: BTreeMap<String, Node>,
    pub edges: Vec<Edge>,
    pub clusters: Vec<Cluster>,
}

impl RelationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the entity behind `uri` and return its node key.
    ///
    /// The first explicit label for a key sticks; a later explicit label only
    /// replaces a local-name fallback. The role is overwritten on every call.
    pub fn add_entity(&mut self, uri: &str, labels: &LabelCandidates, role: NodeRole) -> String {
        let key = local_name(uri).to_string();
        let explicit = labels.explicit();

        match self.nodes.get_mut(&key) {
            Some(node) => {
                if let (false, Some(label)) = (node.explicit_label, explicit) {
                    node.label = label.to_string();
                    node.explicit_label = true;
                }
                node.role = role;
                node.uri = Some(uri.to_string());
            }
            None => {
                self.nodes.insert(
                    key.clone(),
                    Node {
                        key: key.clone(),
                        uri: Some(uri.to_string()),
                        label: explicit.unwrap_or(&key).to_string(),
                        explicit_label: explicit.is_some(),
                        role,
                        annotation: None,
                    },
                );
            }
        }

        key
    }

    /// Record a node that has no URI of its own
    pub fn add_synthetic(&mut self, key: &str, label: &str, role: NodeRole) {
        self.nodes.insert(
            key.to_string(),
            Node {
                key: key.to_string(),
                uri: None,
                label: label.to_string(),
                explicit_label: true,
                role,
                annotation: None,
            },
        );
    }

    /// Set the annotation line unless one is already recorded
    pub fn annotate(&mut self, key: &str, annotation: &str) {
        if let Some(node) = self.nodes.get_mut(key) {
            if node.annotation.is_none() && !annotation.is_empty() {
                node.annotation = Some(annotation.to_string());
            }
        }
    }

    pub fn add_edge(&mut self, source: &str, target: &str, kind: RelationKind) {
        self.edges.push(Edge {
            source: source.to_string(),
            target: target.to_string(),
            kind,
        });
    }

    pub fn add_cluster(&mut self, key: &str, label: &str, members: Vec<String>) {
        self.clusters.push(Cluster {
            key: key.to_string(),
            label: label.to_string(),
            members,
        });
    }

    /// Display label of a node, falling back to its key
    pub fn label_of<'a>(&'a self, key: &'a str) -> &'a str {
        self.nodes.get(key).map(|n| n.label.as_str()).unwrap_or(key)
    }

    /// Append another set. Nodes follow the same rules as `add_entity`
    /// (first explicit label sticks, last role wins); edges and clusters are
    /// concatenated.
    pub fn merge(&mut self, other: RelationSet) {
        for (key, node) in other.nodes {
            match self.nodes.get_mut(&key) {
                Some(existing) => {
                    if !existing.explicit_label && node.explicit_label {
                        existing.label = node.label;
                        existing.explicit_label = true;
                    }
                    if existing.annotation.is_none() {
                        existing.annotation = node.annotation;
                    }
                    existing.role = node.role;
                }
                None => {
                    self.nodes.insert(key, node);
                }
            }
        }
        self.edges.extend(other.edges);
        self.clusters.extend(other.clusters);
    }
}
