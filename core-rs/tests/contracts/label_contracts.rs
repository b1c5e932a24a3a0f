// Label Contract Tests
//
// Node keys and display labels are what users see and what downstream
// tooling greps for in the generated DOT. These rules must stay fixed.

use owlviz_core::label::{escape_dot, wrap_default, LINE_BREAK};
use owlviz_core::{local_name, resolve, LabelCandidates};

/// WHY: Node keys are local names
/// RULE: after the last '#', else after the last '/', else the whole URI
/// BREAKS: every edge reference in existing DOT files if the key changes
#[test]
fn local_name_rule_is_fixed() {
    assert_eq!(local_name("http://ex.org/onto#Sensor"), "Sensor");
    assert_eq!(local_name("http://ex.org/onto/Sensor"), "Sensor");
    assert_eq!(local_name("http://ex.org/a/b#c/d"), "c/d");
    assert_eq!(local_name("Sensor"), "Sensor");
    assert_eq!(local_name("http://ex.org/onto#"), "");
}

/// WHY: Labels prefer English, then any language, then the local name
/// BREAKS: localized ontologies would render in an arbitrary language
#[test]
fn label_priority_is_en_then_any_then_local_name() {
    let uri = "http://ex.org/onto#Sensor";

    assert_eq!(resolve(uri, &LabelCandidates::new(Some("Sensor EN"), Some("Capteur"))), "Sensor EN");
    assert_eq!(resolve(uri, &LabelCandidates::new(None, Some("Capteur"))), "Capteur");
    assert_eq!(resolve(uri, &LabelCandidates::new(Some(""), Some(""))), "Sensor");
    assert_eq!(resolve(uri, &LabelCandidates::default()), "Sensor");
}

/// WHY: Short labels are emitted as-is (after escaping)
/// LIMIT: 20 characters
#[test]
fn short_labels_are_not_wrapped() {
    assert_eq!(wrap_default("Sensor"), "Sensor");
    assert_eq!(wrap_default("twenty chars exactly"), "twenty chars exactly");
}

/// WHY: Long labels wrap greedily at word boundaries around 15 characters
/// BREAKS: node sizes and layouts of every rendered graph
#[test]
fn long_labels_wrap_at_word_boundaries() {
    assert_eq!(
        wrap_default("Environmental Monitoring Station"),
        format!("Environmental{0}Monitoring{0}Station", LINE_BREAK)
    );
    assert_eq!(wrap_default("Supercalifragilisticexpialidocious"), "Supercalifragilisticexpialidocious");
}

/// WHY: The line break marker is the two characters '\' 'n', not a newline
/// REASON: DOT interprets "\n" inside a quoted label as a centered line break
#[test]
fn line_break_marker_is_backslash_n() {
    assert_eq!(LINE_BREAK, "\\n");
    assert!(!wrap_default("Environmental Monitoring Station").contains('\n'));
}

/// WHY: Quotes are escaped before the length check
/// BREAKS: DOT syntax if a label contains a raw double quote
#[test]
fn quotes_are_escaped() {
    assert_eq!(escape_dot("a \"quoted\" label"), "a \\\"quoted\\\" label");
    assert_eq!(wrap_default("say \"hi\""), "say \\\"hi\\\"");
}

/// WHY: A backslash is escaped before the quote that follows it
/// BREAKS: DOT syntax if a label ends in `\`, which would swallow the closing quote
#[test]
fn backslashes_are_escaped() {
    assert_eq!(escape_dot("path C:\\"), "path C:\\\\");
    assert_eq!(escape_dot("\\\""), "\\\\\\\"");
}
