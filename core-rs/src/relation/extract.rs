//! Query rows → relation sets, one extractor per view

use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

use super::{NodeRole, RelationKind, RelationSet};
use crate::label::{local_name, resolve};
use crate::ontology::query::QueryResult;
use crate::ontology::rows::{HierarchyRow, LayerRow, MappingKind, MappingRow, PropertyRow};

/// Declared members per layer cluster before the rest collapse into "+N more"
pub const LAYER_EXEMPLARS: usize = 6;

/// How layer membership is expressed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerMode {
    /// One cluster per layer
    Clusters,
    /// Layer nodes with membership edges, for layouts without clusters
    Edges,
}

fn parse_rows<T>(rows: &[QueryResult], parse: fn(&QueryResult) -> Option<T>, what: &str) -> Vec<T> {
    let parsed: Vec<T> = rows.iter().filter_map(parse).collect();
    if parsed.len() < rows.len() {
        debug!(
            "[Extractor] Skipped {} {} rows with blank required columns",
            rows.len() - parsed.len(),
            what
        );
    }
    parsed
}

/// Subclass pairs → child → parent edges between class nodes
pub fn class_hierarchy(rows: &[QueryResult]) -> RelationSet {
    let mut set = RelationSet::new();

    for row in parse_rows(rows, HierarchyRow::from_row, "hierarchy") {
        let child = set.add_entity(&row.child, &row.child_labels, NodeRole::Class);
        let parent = set.add_entity(&row.parent, &row.parent_labels, NodeRole::Class);
        set.add_edge(&child, &parent, RelationKind::SubClassOf);
    }

    set
}

fn add_subproperties(set: &mut RelationSet, rows: &[QueryResult], role: NodeRole) {
    for row in parse_rows(rows, HierarchyRow::from_row, "subproperty") {
        let child = set.add_entity(&row.child, &row.child_labels, role);
        let parent = set.add_entity(&row.parent, &row.parent_labels, role);
        set.add_edge(&child, &parent, RelationKind::SubPropertyOf);
    }
}

/// Object properties with prop → domain and prop → range edges, plus
/// subproperty edges
pub fn object_properties(property_rows: &[QueryResult], subproperty_rows: &[QueryResult]) -> RelationSet {
    let mut set = RelationSet::new();

    for row in parse_rows(property_rows, PropertyRow::from_row, "object property") {
        let prop = set.add_entity(&row.prop, &row.prop_labels, NodeRole::ObjectProperty);

        if let Some(domain) = &row.domain {
            let domain = set.add_entity(domain, &row.domain_labels, NodeRole::Class);
            set.add_edge(&prop, &domain, RelationKind::Domain);
        }

        if let Some(range) = &row.range {
            let range = set.add_entity(range, &row.range_labels, NodeRole::Class);
            set.add_edge(&prop, &range, RelationKind::Range);
        }
    }

    add_subproperties(&mut set, subproperty_rows, NodeRole::ObjectProperty);
    set
}

/// Data properties annotated with their datatype, prop → domain edges,
/// subproperty edges, and one cluster per domain class
pub fn data_properties(property_rows: &[QueryResult], subproperty_rows: &[QueryResult]) -> RelationSet {
    let mut set = RelationSet::new();
    // domain key → properties whose first domain it is
    let mut by_domain: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    let mut first_domain: BTreeMap<String, String> = BTreeMap::new();

    for row in parse_rows(property_rows, PropertyRow::from_row, "data property") {
        let prop = set.add_entity(&row.prop, &row.prop_labels, NodeRole::DataProperty);

        if let Some(range) = &row.range {
            set.annotate(&prop, local_name(range));
        }

        if let Some(domain) = &row.domain {
            let domain = set.add_entity(domain, &row.domain_labels, NodeRole::Class);
            set.add_edge(&prop, &domain, RelationKind::Domain);
            by_domain.entry(domain.clone()).or_default();
            first_domain.entry(prop).or_insert(domain);
        }
    }

    for (prop, domain) in first_domain {
        if let Some(members) = by_domain.get_mut(&domain) {
            members.insert(prop);
        }
    }

    for (domain, props) in by_domain {
        let label = format!("{} Properties", set.label_of(&domain));
        let mut members = vec![domain.clone()];
        members.extend(props.into_iter().filter(|p| p != &domain));
        set.add_cluster(&domain, &label, members);
    }

    add_subproperties(&mut set, subproperty_rows, NodeRole::DataProperty);
    set
}

/// Internal → external alignment edges, grouped into an internal and an
/// external cluster
pub fn external_mappings(rows: &[QueryResult]) -> RelationSet {
    let mut set = RelationSet::new();
    let mut internal = BTreeSet::new();
    let mut external = BTreeSet::new();

    for row in parse_rows(rows, MappingRow::from_row, "mapping") {
        let from = set.add_entity(&row.internal, &row.internal_labels, NodeRole::Internal);
        let to = set.add_entity(&row.external, &row.external_labels, NodeRole::External);

        let kind = match row.kind {
            MappingKind::Class => RelationKind::ClassMapping,
            MappingKind::Property => RelationKind::PropertyMapping,
        };
        set.add_edge(&from, &to, kind);

        internal.insert(from);
        external.insert(to);
    }

    // A key can land on both sides after a local-name collision; its final
    // role decides where it is declared
    let internal: Vec<String> = internal
        .into_iter()
        .filter(|k| set.nodes.get(k).map(|n| n.role) == Some(NodeRole::Internal))
        .collect();
    let external: Vec<String> = external
        .into_iter()
        .filter(|k| set.nodes.get(k).map(|n| n.role) == Some(NodeRole::External))
        .collect();

    if !internal.is_empty() {
        set.add_cluster("internal", "Ontology", internal);
    }
    if !external.is_empty() {
        set.add_cluster("external", "External", external);
    }

    set
}

/// Classes grouped by layer. At most [`LAYER_EXEMPLARS`] classes are declared
/// per layer; the remainder becomes a `<layer>_more` overflow node.
pub fn layers(rows: &[QueryResult], mode: LayerMode) -> RelationSet {
    let mut set = RelationSet::new();
    let mut members: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    let mut layer_labels: BTreeMap<String, String> = BTreeMap::new();
    let mut layer_uris: BTreeMap<String, String> = BTreeMap::new();
    // Every class is recorded in a scratch set so labels and collisions
    // follow the usual node rules, then only exemplars are copied over
    let mut classes = RelationSet::new();

    for row in parse_rows(rows, LayerRow::from_row, "layer") {
        let layer = local_name(&row.layer).to_string();
        let class = classes.add_entity(&row.class, &row.class_labels, NodeRole::Class);

        members.entry(layer.clone()).or_default().insert(class);
        layer_uris.entry(layer.clone()).or_insert_with(|| row.layer.clone());
        if let Some(label) = row.layer_labels.explicit() {
            layer_labels.entry(layer.clone()).or_insert_with(|| label.to_string());
        }
    }

    let mut ordered: Vec<(String, String)> = members
        .keys()
        .map(|layer| {
            let label = layer_labels
                .get(layer)
                .cloned()
                .unwrap_or_else(|| resolve(&layer_uris[layer], &Default::default()));
            (label, layer.clone())
        })
        .collect();
    ordered.sort();

    for (label, layer) in ordered {
        let classes_in_layer = &members[&layer];
        let mut declared: Vec<String> = Vec::new();

        for class in classes_in_layer.iter().take(LAYER_EXEMPLARS) {
            if let Some(node) = classes.nodes.get(class) {
                set.nodes.insert(class.clone(), node.clone());
                declared.push(class.clone());
            }
        }

        let extra = classes_in_layer.len().saturating_sub(LAYER_EXEMPLARS);
        if extra > 0 {
            let overflow = format!("{}_more", layer);
            set.add_synthetic(&overflow, &format!("+{} more", extra), NodeRole::Overflow);
            declared.push(overflow);
        }

        match mode {
            LayerMode::Clusters => set.add_cluster(&layer, &label, declared),
            LayerMode::Edges => {
                let layer_key = format!("layer_{}", layer);
                set.add_synthetic(&layer_key, &label, NodeRole::Layer);
                for member in declared {
                    set.add_edge(&member, &layer_key, RelationKind::LayerMembership);
                }
            }
        }
    }

    set
}
