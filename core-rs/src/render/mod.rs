//! Relation set → Graphviz DOT text
//!
//! Output is a pure function of the relation set and options: nodes are
//! emitted in key order and edges are stably sorted, so rendering the same
//! set twice is byte-identical.

pub mod output;

use clap::ValueEnum;
use std::collections::BTreeSet;
use std::fmt::Write as _;

use crate::label::{escape_dot, wrap, WrapOptions, LINE_BREAK};
use crate::relation::{Edge, Node, NodeRole, RelationKind, RelationSet};

pub use output::{convert_with_graphviz, write_output, OutputFormat};

/// Graphviz layout engines accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LayoutEngine {
    /// Hierarchical layout
    Dot,
    Sfdp,
    Neato,
    Fdp,
    Circo,
    Twopi,
    Osage,
    Patchwork,
}

impl LayoutEngine {
    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutEngine::Dot => "dot",
            LayoutEngine::Sfdp => "sfdp",
            LayoutEngine::Neato => "neato",
            LayoutEngine::Fdp => "fdp",
            LayoutEngine::Circo => "circo",
            LayoutEngine::Twopi => "twopi",
            LayoutEngine::Osage => "osage",
            LayoutEngine::Patchwork => "patchwork",
        }
    }

    pub fn is_hierarchical(&self) -> bool {
        matches!(self, LayoutEngine::Dot)
    }

    /// Engine-specific graph directives; pass-through engines get none
    pub fn directives(&self, rankdir: &str) -> Vec<String> {
        match self {
            LayoutEngine::Dot => vec![format!("rankdir={}", rankdir)],
            LayoutEngine::Sfdp => vec![
                "layout=sfdp".to_string(),
                "overlap=prism".to_string(),
                "splines=true".to_string(),
                "K=1.5".to_string(),
            ],
            LayoutEngine::Neato | LayoutEngine::Fdp => vec![
                format!("layout={}", self.as_str()),
                "overlap=false".to_string(),
                "splines=true".to_string(),
            ],
            LayoutEngine::Circo | LayoutEngine::Twopi | LayoutEngine::Osage | LayoutEngine::Patchwork => {
                Vec::new()
            }
        }
    }
}

impl std::fmt::Display for LayoutEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-view graph styling
#[derive(Debug, Clone, PartialEq)]
pub struct GraphStyle {
    pub name: String,
    /// `TB` or `LR`, used by the hierarchical engine
    pub rankdir: &'static str,
    pub font: &'static str,
    pub nodesep: f32,
    pub ranksep: f32,
    /// Pin hierarchy roots to the top rank
    pub rank_roots: bool,
}

impl GraphStyle {
    pub fn new(name: impl Into<String>, rankdir: &'static str, font: &'static str) -> Self {
        Self {
            name: name.into(),
            rankdir,
            font,
            nodesep: 0.5,
            ranksep: 1.0,
            rank_roots: false,
        }
    }

    pub fn spacing(mut self, nodesep: f32, ranksep: f32) -> Self {
        self.nodesep = nodesep;
        self.ranksep = ranksep;
        self
    }

    pub fn with_root_rank(mut self) -> Self {
        self.rank_roots = true;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    pub engine: LayoutEngine,
    pub clustering: bool,
    pub rank_roots: bool,
    pub wrap: WrapOptions,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            engine: LayoutEngine::Dot,
            clustering: true,
            rank_roots: true,
            wrap: WrapOptions::default(),
        }
    }
}

impl RenderOptions {
    /// Clusters are only drawn by the hierarchical engine
    pub fn clusters_active(&self) -> bool {
        self.clustering && self.engine.is_hierarchical()
    }
}

fn node_attributes(role: NodeRole) -> &'static str {
    match role {
        NodeRole::Class => "shape=box, style=filled, fillcolor=lightblue",
        NodeRole::ObjectProperty => "shape=ellipse, style=filled, fillcolor=lightgreen",
        NodeRole::DataProperty => "shape=ellipse, style=filled, fillcolor=lightyellow",
        NodeRole::Internal => "shape=box, style=filled, fillcolor=white",
        NodeRole::External => "shape=box, style=\"filled,dashed\", fillcolor=lightgrey",
        NodeRole::Layer => "shape=folder, style=filled, fillcolor=\"#f7f7f7\"",
        NodeRole::Overflow => "shape=plaintext, fontcolor=gray50",
    }
}

fn edge_attributes(kind: RelationKind) -> &'static str {
    match kind {
        RelationKind::SubClassOf => "color=darkgreen",
        RelationKind::SubPropertyOf => "label=\"subPropertyOf\", style=dashed, color=darkgreen",
        RelationKind::Domain => "label=\"domain\", style=dashed, color=blue",
        RelationKind::Range => "label=\"range\", style=dotted, color=red",
        RelationKind::LayerMembership => "style=dotted, color=gray50, arrowhead=none",
        RelationKind::ClassMapping => "style=solid",
        RelationKind::PropertyMapping => "style=dashed",
    }
}

fn quoted(key: &str) -> String {
    format!("\"{}\"", escape_dot(key))
}

/// Serializes relation sets as DOT
pub struct DotRenderer {
    options: RenderOptions,
}

impl DotRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    fn node_label(&self, node: &Node) -> String {
        let mut label = wrap(&node.label, self.options.wrap);
        if let Some(annotation) = &node.annotation {
            label.push_str(LINE_BREAK);
            label.push('(');
            label.push_str(&escape_dot(annotation));
            label.push(')');
        }
        label
    }

    fn node_line(&self, node: &Node, indent: &str) -> String {
        format!(
            "{}{} [label=\"{}\", {}];\n",
            indent,
            quoted(&node.key),
            self.node_label(node),
            node_attributes(node.role)
        )
    }

    pub fn render(&self, set: &RelationSet, style: &GraphStyle) -> String {
        let mut out = String::new();
        let engine = self.options.engine;

        // 1. header
        let _ = writeln!(out, "digraph {} {{", quoted(&style.name));

        // 2. engine directives
        let directives = engine.directives(style.rankdir);
        if !directives.is_empty() {
            out.push_str("  // Layout configuration\n");
            for directive in directives {
                let _ = writeln!(out, "  {};", directive);
            }
        }

        // 3. defaults
        let _ = writeln!(
            out,
            "  graph [splines=true, nodesep={:.1}, ranksep={:.1}];",
            style.nodesep, style.ranksep
        );
        let _ = writeln!(out, "  node [fontname=\"{}\", fontsize=12];", style.font);
        let _ = writeln!(out, "  edge [fontname=\"{}\", fontsize=10];", style.font);

        // 4. clusters
        let mut declared: BTreeSet<&str> = BTreeSet::new();
        if self.options.clusters_active() && !set.clusters.is_empty() {
            out.push('\n');
            for (index, cluster) in set.clusters.iter().enumerate() {
                let _ = writeln!(out, "  subgraph cluster_{} {{", index);
                let _ = writeln!(
                    out,
                    "    label=\"{}\"; style=filled; color=lightgrey; fillcolor=\"#f7f7f7\";",
                    escape_dot(&cluster.label)
                );
                for member in &cluster.members {
                    if declared.contains(member.as_str()) {
                        continue;
                    }
                    if let Some(node) = set.nodes.get(member) {
                        out.push_str(&self.node_line(node, "    "));
                        declared.insert(member.as_str());
                    }
                }
                out.push_str("  }\n");
            }
        }

        // 5. remaining nodes
        let remaining: Vec<&Node> = set
            .nodes
            .values()
            .filter(|n| !declared.contains(n.key.as_str()))
            .collect();
        if !remaining.is_empty() {
            out.push('\n');
            for node in remaining {
                out.push_str(&self.node_line(node, "  "));
            }
        }

        // 6. edges
        let mut edges: Vec<&Edge> = set.edges.iter().collect();
        edges.sort_by(|a, b| {
            (a.source.as_str(), a.target.as_str(), a.kind).cmp(&(b.source.as_str(), b.target.as_str(), b.kind))
        });
        if !edges.is_empty() {
            out.push('\n');
            for edge in edges {
                let _ = writeln!(
                    out,
                    "  {} -> {} [{}];",
                    quoted(&edge.source),
                    quoted(&edge.target),
                    edge_attributes(edge.kind)
                );
            }
        }

        // 7. root rank hint
        if style.rank_roots && self.options.rank_roots {
            let roots = set.roots();
            if !roots.is_empty() {
                out.push_str("\n  // Root nodes at top\n  { rank=min; ");
                for root in &roots {
                    let _ = write!(out, "{}; ", quoted(root));
                }
                out.push_str("}\n");
            }
        }

        // 8. footer
        out.push_str("}\n");
        out
    }
}
