//! Command-line argument definitions for the Flowsheet CLI.

use clap::Parser;

/// Convert a Lucidchart CSV export into a BPMN 2.0 diagram
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input CSV file
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output BPMN file
    #[arg(short, long, default_value = "out.bpmn")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
