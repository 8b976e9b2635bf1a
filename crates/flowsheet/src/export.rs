//! Export of laid-out process documents.
//!
//! This module provides the [`Exporter`] trait, the final stage of the
//! conversion pipeline.
//!
//! # Pipeline Position
//!
//! ```text
//! Sheet Text
//!     ↓ parse
//! Shapes + Flows
//!     ↓ structure
//! Leveled Flow Graph
//!     ↓ layout
//! ProcessDocument
//!     ↓ export (this module)
//! BPMN XML
//! ```
//!
//! # Available Backends
//!
//! - [`bpmn`]: BPMN 2.0 XML with diagram interchange, via [`bpmn::BpmnExporter`]
//!
//! # Error Handling
//!
//! Export operations return [`Error`], covering formatting failures and I/O
//! errors. [`Error`] converts into [`FlowsheetError::Export`] at the crate
//! boundary.
//!
//! [`FlowsheetError::Export`]: crate::FlowsheetError::Export

pub mod bpmn;

use crate::layout::ProcessDocument;

/// Abstraction for document export backends.
pub trait Exporter {
    /// Writes `document` in the backend's output format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the document cannot be formatted, or
    /// [`Error::Io`] if writing the output fails.
    fn export_document(&mut self, document: &ProcessDocument) -> Result<(), Error>;
}

/// Errors that can occur during export.
#[derive(Debug)]
pub enum Error {
    /// A formatting failure described by `message`.
    Render(String),
    /// An I/O error encountered while writing output.
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}

impl From<std::fmt::Error> for Error {
    fn from(_: std::fmt::Error) -> Self {
        Self::Render("failed to format document".to_string())
    }
}
