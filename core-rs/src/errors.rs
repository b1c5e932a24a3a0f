//! Error types for owl-viz

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VizError {
    #[error("Ontology error: {0}")]
    Ontology(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Conversion error: {0}")]
    Conversion(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl From<crate::ontology::engine::OntologyError> for VizError {
    fn from(err: crate::ontology::engine::OntologyError) -> Self {
        VizError::Ontology(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, VizError>;
