//! # Flowsheet Parser
//!
//! Reads a Lucid-style flowchart CSV export into [`Shape`]s and [`Flow`]s.
//!
//! ## Usage
//!
//! ```
//! # use flowsheet_parser::{parse, ColumnNames, error::ParseError};
//!
//! fn main() -> Result<(), ParseError> {
//!     let source = "\
//! Id,Name,Text Area 1,Line Source,Line Destination
//! 1,Terminator,Start,,
//! 2,Process,Review,,
//! 3,Line,,1,2
//! ";
//!
//!     let sheet = parse(source, &ColumnNames::default())?;
//!     assert_eq!(sheet.shapes().len(), 2);
//!     assert_eq!(sheet.flows().len(), 1);
//!     Ok(())
//! }
//! ```

pub mod error;

mod annotation;
mod classify;
mod columns;
mod connections;
mod rows;
mod span;

pub use annotation::{MalformedAnnotation, parse_annotation};
pub use columns::ColumnNames;
pub use rows::Row;
pub use span::{Span, Spanned};

use log::{debug, info};

use flowsheet_core::semantic::{Flow, Shape};

use error::{Diagnostic, DiagnosticCollector, ParseError};

/// The shapes and flows of a sheet, before layout.
#[derive(Debug)]
pub struct ParsedSheet {
    shapes: Vec<Shape>,
    flows: Vec<Spanned<Flow>>,
    warnings: Vec<Diagnostic>,
}

impl ParsedSheet {
    /// Shapes in row order.
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Flows in connector-row order, endpoints not yet validated.
    pub fn flows(&self) -> &[Spanned<Flow>] {
        &self.flows
    }

    /// Recovered problems found while parsing.
    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    /// Splits the sheet into shapes, flows and warnings.
    pub fn into_parts(self) -> (Vec<Shape>, Vec<Spanned<Flow>>, Vec<Diagnostic>) {
        (self.shapes, self.flows, self.warnings)
    }
}

/// Parse sheet text into shapes and flows.
///
/// 1. **Rows** - Split the text into header-keyed rows
/// 2. **Classify** - Turn every non-structural row into a typed shape
/// 3. **Connect** - Turn connector rows into flows and fill in each shape's
///    incoming and outgoing references
///
/// Flows are returned even when an endpoint is missing. Dropping them is up
/// to the caller, which knows the final shape set.
///
/// # Arguments
///
/// * `source` - The raw CSV text
/// * `columns` - Header names of the columns to read
///
/// # Errors
///
/// Returns a [`ParseError`] when the input is empty, has no data rows, or
/// lacks the id or kind column. Malformed annotations and duplicate shape
/// ids are not errors; they are reported through
/// [`ParsedSheet::warnings`].
pub fn parse(source: &str, columns: &ColumnNames) -> Result<ParsedSheet, ParseError> {
    info!(bytes = source.len(); "Parsing sheet");

    // Step 1: Split rows
    let rows = rows::read_rows(source, columns)?;

    // Step 2: Classify shape rows
    let mut collector = DiagnosticCollector::new();
    let mut shapes = classify::classify(&rows, columns, &mut collector);

    // Step 3: Connect
    let flows = connections::connect(&rows, columns, &mut shapes);

    let warnings = collector.finish()?;
    debug!(
        shapes = shapes.len(),
        flows = flows.len(),
        warnings = warnings.len();
        "Sheet parsed"
    );

    Ok(ParsedSheet {
        shapes,
        flows,
        warnings,
    })
}
