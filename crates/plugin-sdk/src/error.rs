//! SDK errors

use crate::diag::Diagnostics;
use thiserror::Error;

/// Errors raised while validating or reading resource data
#[derive(Debug, Error)]
pub enum SdkError {
    /// No data source registered under the name
    #[error("Unknown data source: {0}")]
    UnknownDataSource(String),

    /// Attribute not declared in the schema
    #[error("Unknown attribute: {0}")]
    UnknownAttribute(String),

    /// Required attribute missing from the configuration
    #[error("Missing required attribute: {0}")]
    MissingRequired(String),

    /// Attribute value does not match its declared type
    #[error("Attribute {key} must be of type {expected}")]
    TypeMismatch { key: String, expected: String },

    /// Data source has no read function
    #[error("Data source {0} has no read function")]
    NoReader(String),

    /// The read reported error diagnostics
    #[error("{0}")]
    Diagnostics(Diagnostics),
}
