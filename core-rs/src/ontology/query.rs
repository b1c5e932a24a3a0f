/**
 * query.rs
 * Query types and builders for SPARQL
 */

use std::collections::HashMap;

/// One solution row: variable name (without `?`) to bound value.
/// Unbound variables are simply absent.
pub type QueryResult = HashMap<String, String>;

/// External vocabularies that the mappings view treats as "outside" terms
pub const DEFAULT_EXTERNAL_PREFIXES: &[&str] = &[
    "http://www.w3.org/ns/prov#",
    "http://www.w3.org/ns/sosa/",
    "http://www.w3.org/2004/02/skos/core#",
    "http://qudt.org/schema/qudt/",
    "http://purl.org/dc/terms/",
    "http://purl.obolibrary.org/obo/",
];

/// Annotation property linking a class to the architectural layer it belongs to
pub const DEFAULT_LAYER_PREDICATE: &str = "http://connectdigitalstudy.com/ontology#belongsToLayer";

const PREFIXES: &str = r#"
            PREFIX rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#>
            PREFIX rdfs: <http://www.w3.org/2000/01/rdf-schema#>
            PREFIX owl: <http://www.w3.org/2002/07/owl#>"#;

#[derive(Debug, Clone, PartialEq)]
pub struct SparqlQuery {
    query: String,
}

impl SparqlQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.query
    }

    /// Named subclass pairs, `owl:Thing` excluded as a parent
    pub fn class_hierarchy(namespace: Option<&str>) -> Self {
        Self::new(format!(
            r#"{}

            SELECT ?child ?parent {} {}
            WHERE {{
                ?child rdfs:subClassOf ?parent .
                FILTER(isIRI(?child) && isIRI(?parent))
                FILTER(?parent != owl:Thing)
                {}
                {}
                {}
            }}
            GROUP BY ?child ?parent
            "#,
            PREFIXES,
            label_columns("child"),
            label_columns("parent"),
            namespace_filter("child", namespace),
            label_patterns("child"),
            label_patterns("parent")
        ))
    }

    /// Object properties with optional domain and range classes
    pub fn object_properties(namespace: Option<&str>) -> Self {
        Self::new(format!(
            r#"{}

            SELECT ?prop ?domain ?range {} {} {}
            WHERE {{
                ?prop rdf:type owl:ObjectProperty .
                FILTER(isIRI(?prop))
                {}
                OPTIONAL {{
                    ?prop rdfs:domain ?domain .
                    FILTER(isIRI(?domain))
                    {}
                }}
                OPTIONAL {{
                    ?prop rdfs:range ?range .
                    FILTER(isIRI(?range))
                    {}
                }}
                {}
            }}
            GROUP BY ?prop ?domain ?range
            "#,
            PREFIXES,
            label_columns("prop"),
            label_columns("domain"),
            label_columns("range"),
            namespace_filter("prop", namespace),
            label_patterns("domain"),
            label_patterns("range"),
            label_patterns("prop")
        ))
    }

    /// Data properties with optional domain class and datatype range
    pub fn data_properties(namespace: Option<&str>) -> Self {
        Self::new(format!(
            r#"{}

            SELECT ?prop ?domain ?range {} {}
            WHERE {{
                ?prop rdf:type owl:DatatypeProperty .
                FILTER(isIRI(?prop))
                {}
                OPTIONAL {{
                    ?prop rdfs:domain ?domain .
                    FILTER(isIRI(?domain))
                    {}
                }}
                OPTIONAL {{ ?prop rdfs:range ?range }}
                {}
            }}
            GROUP BY ?prop ?domain ?range
            "#,
            PREFIXES,
            label_columns("prop"),
            label_columns("domain"),
            namespace_filter("prop", namespace),
            label_patterns("domain"),
            label_patterns("prop")
        ))
    }

    /// Named `rdfs:subPropertyOf` pairs between properties of the given OWL type
    /// (`owl:ObjectProperty` or `owl:DatatypeProperty`), self references excluded
    pub fn subproperties(property_type: &str, namespace: Option<&str>) -> Self {
        Self::new(format!(
            r#"{}

            SELECT DISTINCT ?child ?parent
            WHERE {{
                ?child rdf:type {} .
                ?parent rdf:type {} .
                ?child rdfs:subPropertyOf ?parent .
                FILTER(isIRI(?child) && isIRI(?parent))
                FILTER(?child != ?parent)
                {}
            }}
            "#,
            PREFIXES,
            property_type,
            property_type,
            namespace_filter("child", namespace)
        ))
    }

    /// Internal terms declared as subclasses/subproperties of external vocabulary terms
    pub fn external_mappings(namespace: Option<&str>, external_prefixes: &[String]) -> Self {
        let external = if external_prefixes.is_empty() {
            "false".to_string()
        } else {
            external_prefixes
                .iter()
                .map(|p| format!("STRSTARTS(STR(?ext), \"{}\")", escape_literal(p)))
                .collect::<Vec<_>>()
                .join(" || ")
        };

        // Without an explicit namespace, "internal" means "not itself external"
        let internal = match namespace.filter(|ns| !ns.is_empty()) {
            Some(ns) => format!("FILTER(STRSTARTS(STR(?odim), \"{}\"))", escape_literal(ns)),
            None if external_prefixes.is_empty() => String::new(),
            None => format!(
                "FILTER(!({}))",
                external_prefixes
                    .iter()
                    .map(|p| format!("STRSTARTS(STR(?odim), \"{}\")", escape_literal(p)))
                    .collect::<Vec<_>>()
                    .join(" || ")
            ),
        };

        Self::new(format!(
            r#"{}

            SELECT ?odim ?ext ?kind {} {}
            WHERE {{
                {{ ?odim rdfs:subClassOf ?ext . BIND("class" AS ?kind) }}
                UNION
                {{ ?odim rdfs:subPropertyOf ?ext . BIND("property" AS ?kind) }}
                FILTER(isIRI(?odim) && isIRI(?ext))
                {}
                FILTER({})
                {}
                {}
            }}
            GROUP BY ?odim ?ext ?kind
            "#,
            PREFIXES,
            label_columns("odim"),
            label_columns("ext"),
            internal,
            external,
            label_patterns("odim"),
            label_patterns("ext")
        ))
    }

    /// Classes annotated with a layer membership predicate
    pub fn layers(layer_predicate: &str, namespace: Option<&str>) -> Self {
        Self::new(format!(
            r#"{}

            SELECT ?cls ?layer {} {}
            WHERE {{
                ?cls a owl:Class ;
                     <{}> ?layer .
                FILTER(isIRI(?cls))
                {}
                {}
                {}
            }}
            GROUP BY ?cls ?layer
            "#,
            PREFIXES,
            label_columns("cls"),
            label_columns("layer"),
            layer_predicate,
            namespace_filter("cls", namespace),
            label_patterns("cls"),
            label_patterns("layer")
        ))
    }
}

/// One row per relation: every `rdfs:label` match is folded into a single
/// sampled `<var>LabelEn` / `<var>LabelAny` pair
fn label_columns(variable: &str) -> String {
    format!(
        "(SAMPLE(?{v}En) AS ?{v}LabelEn) (SAMPLE(?{v}Any) AS ?{v}LabelAny)",
        v = variable
    )
}

fn label_patterns(variable: &str) -> String {
    format!(
        r#"OPTIONAL {{ ?{v} rdfs:label ?{v}En FILTER(langMatches(lang(?{v}En), "en")) }}
                OPTIONAL {{ ?{v} rdfs:label ?{v}Any }}"#,
        v = variable
    )
}

fn namespace_filter(variable: &str, namespace: Option<&str>) -> String {
    match namespace {
        Some(ns) if !ns.is_empty() => {
            format!("FILTER(STRSTARTS(STR(?{}), \"{}\"))", variable, escape_literal(ns))
        }
        _ => String::new(),
    }
}

fn escape_literal(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
