//! Error types for Flowsheet operations.
//!
//! This module provides the main error type [`FlowsheetError`] which wraps
//! the error conditions that can occur while converting a sheet.

use std::io;

use thiserror::Error;

use flowsheet_parser::error::ParseError;

/// The main error type for Flowsheet operations.
///
/// The `Parse` variant keeps the sheet text next to the diagnostics so that
/// callers can render labelled source snippets.
#[derive(Debug, Error)]
pub enum FlowsheetError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),
}

impl From<crate::export::Error> for FlowsheetError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl FlowsheetError {
    /// Create a new `Parse` error with the associated sheet text.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
