//! CLI logic for the Flowsheet converter.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;
pub use config::{ConfigError, load_config};

use std::{
    fs::{self, File},
    io::BufWriter,
};

use log::{info, warn};

use flowsheet::{DocumentBuilder, FlowsheetError};

use error_adapter::{render, warning_reportables};

/// Run the Flowsheet CLI application
///
/// Reads the input sheet, converts it, reports any warnings, and writes the
/// BPMN document to the output path. Nothing is written when conversion
/// fails.
///
/// # Errors
///
/// Returns `FlowsheetError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Sheets without data rows or required columns
/// - Export errors
pub fn run(args: &Args) -> Result<(), FlowsheetError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing sheet"
    );

    let app_config = load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;

    let builder = DocumentBuilder::new(app_config);
    let conversion = builder.build(&source)?;

    for reportable in warning_reportables(conversion.warnings(), &source) {
        warn!("{}", render(&reportable));
    }

    let file = File::create(&args.output)?;
    builder.write_xml(conversion.document(), BufWriter::new(file))?;

    info!(
        output_file = args.output,
        warnings = conversion.warnings().len();
        "BPMN exported successfully"
    );

    Ok(())
}
