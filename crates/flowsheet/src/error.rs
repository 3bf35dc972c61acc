//! Error types for schematic generation.
//!
//! Malformed references in a model (unknown classes, dangling connections,
//! unknown ports) are not errors: they degrade into a still-valid drawing.
//! [`FlowsheetError`] covers what cannot degrade: unusable configuration,
//! non-numeric model data and failed I/O. Callers that opt into
//! [`validate`](crate::validate) can raise the report as
//! [`FlowsheetError::Validation`].

use std::io;

use thiserror::Error;

use crate::{sink::ExportError, validate::ValidationReport};

/// The main error type for Flowsheet operations.
#[derive(Debug, Error)]
pub enum FlowsheetError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Model error: {0}")]
    Model(String),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("Model validation failed with {} issue(s)", .0.len())]
    Validation(ValidationReport),
}
