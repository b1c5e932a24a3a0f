//! DOT-safe label text: escaping and word wrapping

/// Line-break marker understood inside DOT string literals
pub const LINE_BREAK: &str = "\\n";

/// Lines are packed up to this many characters
pub const DEFAULT_SOFT_LIMIT: usize = 15;

/// Labels up to this many characters are never wrapped
pub const DEFAULT_HARD_TRIGGER: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WrapOptions {
    pub soft_limit: usize,
    pub hard_trigger: usize,
}

impl Default for WrapOptions {
    fn default() -> Self {
        Self {
            soft_limit: DEFAULT_SOFT_LIMIT,
            hard_trigger: DEFAULT_HARD_TRIGGER,
        }
    }
}

/// `\` → `\\`, then `"` → `\"`
pub fn escape_dot(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Escape, then greedily wrap at whitespace when longer than the hard trigger.
///
/// Escaping happens first and breaks only occur between words, so an escape
/// sequence is never split. A word longer than the soft limit keeps its own line.
pub fn wrap(label: &str, options: WrapOptions) -> String {
    let escaped = escape_dot(label);
    if escaped.chars().count() <= options.hard_trigger {
        return escaped;
    }

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in escaped.split_whitespace() {
        let word_len = word.chars().count();

        if current.is_empty() {
            current.push_str(word);
            current_len = word_len;
        } else if current_len + 1 + word_len > options.soft_limit {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
        } else {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines.join(LINE_BREAK)
}

/// `wrap` with the default 15/20 limits
pub fn wrap_default(label: &str) -> String {
    wrap(label, WrapOptions::default())
}
