//! Labeled source spans for diagnostic messages.

use crate::span::Span;

/// A message attached to a span of the source sheet.
///
/// A primary label marks the row or cell at fault. Secondary labels point at
/// related rows, such as the first definition of a repeated id:
///
/// ```text
/// warning[E202]: shape id `Shape_3` is defined more than once
///   |
/// 2 | 3,Process,Review,
///   | ----------------- first defined here
/// 5 | 3,Process,Approve,
///   | ^^^^^^^^^^^^^^^^^ duplicate row ignored
/// ```
#[derive(Debug, Clone)]
pub struct Label {
    span: Span,
    message: String,
    is_primary: bool,
}

impl Label {
    /// Create a new primary label.
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            is_primary: true,
        }
    }

    /// Create a new secondary label.
    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            is_primary: false,
        }
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_primary(&self) -> bool {
        self.is_primary
    }

    pub fn is_secondary(&self) -> bool {
        !self.is_primary
    }
}
