//! Entity URI → display name

/// Candidate labels found for one entity in one query row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelCandidates {
    /// `rdfs:label` whose language matches `en`
    pub en: Option<String>,
    /// Any `rdfs:label`, regardless of language
    pub any: Option<String>,
}

impl LabelCandidates {
    pub fn new(en: Option<&str>, any: Option<&str>) -> Self {
        Self {
            en: en.map(str::to_string),
            any: any.map(str::to_string),
        }
    }

    /// First non-empty candidate in priority order, if any
    pub fn explicit(&self) -> Option<&str> {
        [self.en.as_deref(), self.any.as_deref()]
            .into_iter()
            .flatten()
            .find(|label| !label.is_empty())
    }
}

/// Short node key for a URI: after the last `#`, else after the last `/`,
/// else the URI itself.
///
/// Two URIs that differ only before that separator map to the same key.
///
/// ```
/// use owlviz_core::local_name;
///
/// assert_eq!(local_name("http://ex.org/a/b#Foo"), "Foo");
/// assert_eq!(local_name("http://ex.org/a/Bar"), "Bar");
/// assert_eq!(local_name("urn:thing"), "urn:thing");
/// ```
pub fn local_name(uri: &str) -> &str {
    if let Some(pos) = uri.rfind('#') {
        &uri[pos + 1..]
    } else if let Some(pos) = uri.rfind('/') {
        &uri[pos + 1..]
    } else {
        uri
    }
}

/// Display name for an entity: `en` label, any label, then the local name
pub fn resolve(uri: &str, candidates: &LabelCandidates) -> String {
    candidates
        .explicit()
        .map(str::to_string)
        .unwrap_or_else(|| local_name(uri).to_string())
}
