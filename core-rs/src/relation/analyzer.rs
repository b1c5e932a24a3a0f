//! Structural facts over a relation set

use std::collections::BTreeSet;

use super::{Edge, RelationSet};

/// `nodes − {e.source}`. Sorted; empty when every node has an outgoing edge.
pub fn roots<'a, I>(nodes: I, edges: &[Edge]) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a String>,
{
    let sources: BTreeSet<&str> = edges.iter().map(|e| e.source.as_str()).collect();
    nodes
        .into_iter()
        .filter(|n| !sources.contains(n.as_str()))
        .cloned()
        .collect()
}

/// `nodes − {e.target}`
pub fn leaves<'a, I>(nodes: I, edges: &[Edge]) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a String>,
{
    let targets: BTreeSet<&str> = edges.iter().map(|e| e.target.as_str()).collect();
    nodes
        .into_iter()
        .filter(|n| !targets.contains(n.as_str()))
        .cloned()
        .collect()
}

impl RelationSet {
    fn hierarchy_edges(&self) -> Vec<Edge> {
        self.edges
            .iter()
            .filter(|e| e.kind.is_hierarchy())
            .cloned()
            .collect()
    }

    /// Nodes that never appear as the child of a hierarchy edge.
    ///
    /// Only nodes taking part in a hierarchy edge are considered; with no
    /// hierarchy edges at all the result is empty.
    pub fn roots(&self) -> BTreeSet<String> {
        let edges = self.hierarchy_edges();
        let participants: BTreeSet<String> = edges
            .iter()
            .flat_map(|e| [e.source.clone(), e.target.clone()])
            .filter(|k| self.nodes.contains_key(k))
            .collect();
        roots(&participants, &edges)
    }

    /// Hierarchy nodes without children
    pub fn leaves(&self) -> BTreeSet<String> {
        let edges = self.hierarchy_edges();
        let participants: BTreeSet<String> = edges
            .iter()
            .flat_map(|e| [e.source.clone(), e.target.clone()])
            .filter(|k| self.nodes.contains_key(k))
            .collect();
        leaves(&participants, &edges)
    }
}
