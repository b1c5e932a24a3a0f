//! Label handling
//!
//! - resolver: URI → local name / display name
//! - formatter: escaping and wrapping for DOT string literals

pub mod formatter;
pub mod resolver;

pub use formatter::{escape_dot, wrap, wrap_default, WrapOptions, LINE_BREAK};
pub use resolver::{local_name, resolve, LabelCandidates};
