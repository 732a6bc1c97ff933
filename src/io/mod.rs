//! XML input and output around the aggregation core.

/// Output document rendering.
pub mod export;
/// Generation report loading with per-generator diagnostics.
pub mod generation;
/// Reference factor loading.
pub mod reference;
pub mod xml;

use std::path::PathBuf;

use thiserror::Error;

use crate::error::ValidationError;

/// External data could not be turned into a domain entity.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("cannot read \"{}\": {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed XML: {0}")]
    Xml(String),
    #[error("Missing or empty element: {0}")]
    MissingElement(String),
    #[error("Invalid double value for element: {0}")]
    InvalidNumber(String),
    #[error("Invalid date value for element: {0}")]
    InvalidDate(String),
    #[error("Factors element is missing in the XML")]
    MissingFactors,
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
