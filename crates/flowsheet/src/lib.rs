//! Flowsheet - converts flowchart CSV exports into BPMN 2.0 documents.
//!
//! A sheet exported from Lucidchart lists shapes and connector lines as rows.
//! This crate reads those rows, arranges the shapes in columns by their
//! distance from the first start shape, and writes a BPMN process with
//! diagram interchange so that BPMN modelers can open it directly.

pub mod config;
pub mod export;
pub mod layout;
pub mod structure;

mod error;

pub use flowsheet_core::{geometry, identifier, semantic};
pub use flowsheet_parser::error::{Diagnostic, ErrorCode, ParseError, Severity};

pub use error::FlowsheetError;

use std::io;

use log::{debug, info, trace};

use config::AppConfig;
use export::{Exporter, bpmn::BpmnExporter};
use layout::{ColumnLayout, ProcessDocument};
use structure::FlowGraph;

/// The outcome of a successful conversion.
///
/// Warnings describe rows that were skipped or repaired on the way; they do
/// not make the document invalid.
#[derive(Debug)]
pub struct Conversion {
    document: ProcessDocument,
    warnings: Vec<Diagnostic>,
}

impl Conversion {
    pub fn document(&self) -> &ProcessDocument {
        &self.document
    }

    /// Warning diagnostics in pipeline order.
    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    pub fn into_parts(self) -> (ProcessDocument, Vec<Diagnostic>) {
        (self.document, self.warnings)
    }
}

/// Builder for converting sheets into BPMN documents.
///
/// # Examples
///
/// ```rust
/// use flowsheet::{DocumentBuilder, config::AppConfig};
///
/// let sheet = "\
/// Id,Name,Text Area 1,Line Source,Line Destination
/// 1,Terminator,Start,,
/// 2,Process,Review,,
/// 3,Line,,1,2
/// ";
///
/// let builder = DocumentBuilder::new(AppConfig::default());
///
/// // Parse and lay out
/// let conversion = builder.build(sheet).expect("Failed to convert");
/// assert_eq!(conversion.document().shapes().len(), 2);
///
/// // Write XML
/// let xml = builder
///     .render_xml(conversion.document())
///     .expect("Failed to render");
/// assert!(xml.contains("bpmn:sequenceFlow"));
/// ```
#[derive(Default)]
pub struct DocumentBuilder {
    config: AppConfig,
}

impl DocumentBuilder {
    /// Create a new document builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Column names, spacing and edge anchoring settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse and lay out a sheet.
    ///
    /// 1. **Parse** - rows into shapes and flows
    /// 2. **Level** - assign every shape a column by breadth-first distance
    /// 3. **Place** - turn columns into coordinates
    /// 4. **Validate** - drop flows whose endpoints are not shapes
    /// 5. **Route** - pick the two anchor points of every remaining flow
    ///
    /// # Errors
    ///
    /// Returns [`FlowsheetError::Parse`] when the sheet is empty, has no data
    /// rows, or lacks a required column.
    pub fn build(&self, source: &str) -> Result<Conversion, FlowsheetError> {
        info!("Converting sheet");

        let columns = self.config.columns().to_column_names();
        let sheet = flowsheet_parser::parse(source, &columns)
            .map_err(|err| FlowsheetError::new_parse_error(err, source))?;
        let (mut shapes, flows, mut warnings) = sheet.into_parts();
        debug!(shapes = shapes.len(), flows = flows.len(); "Sheet parsed");

        let mut graph = FlowGraph::new(&shapes, flows.iter().map(|flow| flow.inner()));
        graph.assign_levels();

        ColumnLayout::new(self.config.layout()).apply(&graph, &mut shapes);

        let (flows, dangling) = structure::validate_flows(&mut shapes, flows);
        warnings.extend(dangling);

        let document = ProcessDocument::new(shapes, flows, self.config.layout().anchor_mode());
        trace!(document:?; "Laid out document");
        info!(
            shapes = document.shapes().len(),
            flows = document.flows().len(),
            warnings = warnings.len();
            "Sheet converted"
        );

        Ok(Conversion { document, warnings })
    }

    /// Render a laid-out document as a BPMN XML string.
    ///
    /// # Errors
    ///
    /// Returns [`FlowsheetError::Export`] if formatting fails.
    pub fn render_xml(&self, document: &ProcessDocument) -> Result<String, FlowsheetError> {
        Ok(export::bpmn::render(document)?)
    }

    /// Write a laid-out document as BPMN XML to `out`.
    ///
    /// # Errors
    ///
    /// Returns [`FlowsheetError::Export`] if formatting or writing fails.
    pub fn write_xml(
        &self,
        document: &ProcessDocument,
        out: impl io::Write,
    ) -> Result<(), FlowsheetError> {
        let mut exporter = BpmnExporter::new(out);
        exporter.export_document(document)?;
        Ok(())
    }

    /// Convert a sheet straight to BPMN XML, discarding warnings.
    ///
    /// # Errors
    ///
    /// See [`DocumentBuilder::build`] and [`DocumentBuilder::render_xml`].
    pub fn convert(&self, source: &str) -> Result<String, FlowsheetError> {
        let conversion = self.build(source)?;
        self.render_xml(conversion.document())
    }
}

/// Convert a sheet to BPMN XML with the default configuration.
///
/// # Examples
///
/// ```rust
/// let xml = flowsheet::convert("Id,Name\n1,Process\n").expect("Failed to convert");
/// assert!(xml.contains(r#"<bpmn:task id="Shape_1" name="" />"#));
/// ```
///
/// # Errors
///
/// Returns [`FlowsheetError::Parse`] for input without data rows or required
/// columns.
pub fn convert(source: &str) -> Result<String, FlowsheetError> {
    DocumentBuilder::default().convert(source)
}
