//! Error adapter for converting FlowsheetError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.
//!
//! # Multi-Error Support
//!
//! A [`FlowsheetError::Validation`] carries a whole report; each issue in it
//! is rendered independently.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use flowsheet::{FlowsheetError, ValidationIssue};

const VALIDATION_CODE: &str = "flowsheet::validation";

/// Adapter for a single validation issue.
pub struct IssueAdapter<'a> {
    issue: &'a ValidationIssue,
}

impl<'a> IssueAdapter<'a> {
    pub fn new(issue: &'a ValidationIssue) -> Self {
        Self { issue }
    }
}

impl fmt::Debug for IssueAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IssueAdapter")
            .field("issue", &self.issue)
            .finish()
    }
}

impl fmt::Display for IssueAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.issue, f)
    }
}

impl std::error::Error for IssueAdapter<'_> {}

impl MietteDiagnostic for IssueAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(VALIDATION_CODE))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match self.issue {
            ValidationIssue::UnknownClass { .. } => {
                "a placeholder symbol would be drawn; check the class name"
            }
            ValidationIssue::DuplicateId { .. } => {
                "only the first equipment with this id is tagged and connected"
            }
            ValidationIssue::DanglingConnection { .. } => {
                "this connection would be left out of the drawing"
            }
            ValidationIssue::UnknownPort { .. } => {
                "the pipe would attach to the equipment center instead"
            }
        };
        Some(Box::new(help))
    }
}

/// Adapter for [`FlowsheetError`] variants without per-item detail.
pub struct ErrorAdapter<'a>(pub &'a FlowsheetError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            FlowsheetError::Io(_) => "flowsheet::io",
            FlowsheetError::Config(_) => "flowsheet::config",
            FlowsheetError::Model(_) => "flowsheet::model",
            FlowsheetError::Export(_) => "flowsheet::export",
            FlowsheetError::Validation(_) => VALIDATION_CODE,
        };
        Some(Box::new(code))
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// One issue from a validation report.
    Issue(IssueAdapter<'a>),
    /// Any other error.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Issue(i) => fmt::Display::fmt(i, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Issue(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Issue(i) => i.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Issue(i) => i.help(),
            Reportable::Error(e) => e.help(),
        }
    }
}

/// Convert a [`FlowsheetError`] into a list of reportable errors.
///
/// A non-empty [`FlowsheetError::Validation`] yields one [`Reportable`] per
/// issue; everything else yields a single one.
pub fn to_reportables(err: &FlowsheetError) -> Vec<Reportable<'_>> {
    match err {
        FlowsheetError::Validation(report) if !report.is_empty() => report
            .issues()
            .iter()
            .map(|issue| Reportable::Issue(IssueAdapter::new(issue)))
            .collect(),
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}
