//! Error and diagnostic system for the sheet parser.
//!
//! A [`Diagnostic`] is a single error or warning with an optional error code,
//! labeled source spans and help text. Fatal problems are returned as a
//! [`ParseError`] wrapping one or more error diagnostics. Recoverable
//! problems (a malformed comment, a repeated row id, a connector with a
//! missing endpoint) are kept as warnings next to the parsed result.
//!
//! # Example
//!
//! ```
//! # use flowsheet_parser::error::{Diagnostic, ErrorCode};
//! # use flowsheet_parser::Span;
//!
//! let row = Span::new(40..61);
//! let first = Span::new(12..33);
//!
//! let diag = Diagnostic::warning("shape id `Shape_3` is defined more than once")
//!     .with_code(ErrorCode::E202)
//!     .with_label(row, "duplicate row ignored")
//!     .with_secondary_label(first, "first defined here")
//!     .with_help("give every row a unique `Id`");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
