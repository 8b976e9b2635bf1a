//! Error codes for the Flowsheet diagnostic system.
//!
//! Error codes are organized by phase:
//! - `E1xx` - Sheet structure errors (fatal)
//! - `E2xx` - Row content problems (recovered, reported as warnings)

use std::fmt;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Sheet Structure Errors (E1xx)
    // =========================================================================
    /// Empty input.
    ///
    /// The input contains no non-blank line, so there is not even a header.
    E100,

    /// No data rows.
    ///
    /// The input has a header line but nothing after it.
    E101,

    /// Missing required column.
    ///
    /// The header lacks the row identifier column or the kind column, so no
    /// shape or connector can be extracted.
    E102,

    // =========================================================================
    // Row Content Problems (E2xx)
    // =========================================================================
    /// Dangling connection.
    ///
    /// A connector references a source or target row that is not a shape.
    /// The connection is left out of the output.
    E200,

    /// Malformed annotation.
    ///
    /// A comment opens a `[` group that is never closed. Complete groups
    /// before it are still read.
    E201,

    /// Duplicate shape id.
    ///
    /// Two shape rows share the same `Id`. Only the first one is kept.
    E202,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E100").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E100.to_string(), "E100");
        assert_eq!(ErrorCode::E202.to_string(), "E202");
    }
}
