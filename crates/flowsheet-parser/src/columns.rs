//! Names of the sheet columns the parser reads.

/// Header names of the columns the parser reads.
///
/// The defaults match a Lucidchart "Export as CSV" file. Any other column is
/// carried along in the row but otherwise ignored.
///
/// # Examples
///
/// ```
/// # use flowsheet_parser::ColumnNames;
/// let columns = ColumnNames::default().with_comments("Notes");
/// assert_eq!(columns.id(), "Id");
/// assert_eq!(columns.comments(), "Notes");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnNames {
    id: String,
    kind: String,
    label: String,
    comments: String,
    line_source: String,
    line_destination: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            id: "Id".to_string(),
            kind: "Name".to_string(),
            label: "Text Area 1".to_string(),
            comments: "comments".to_string(),
            line_source: "Line Source".to_string(),
            line_destination: "Line Destination".to_string(),
        }
    }
}

impl ColumnNames {
    /// Column holding the row identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Column holding the shape kind (`Process`, `Line`, ...).
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Column holding the shape or connector label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Column holding bracketed custom-property annotations.
    pub fn comments(&self) -> &str {
        &self.comments
    }

    /// Column holding a connector's source row id.
    pub fn line_source(&self) -> &str {
        &self.line_source
    }

    /// Column holding a connector's target row id.
    pub fn line_destination(&self) -> &str {
        &self.line_destination
    }

    pub fn with_id(mut self, name: impl Into<String>) -> Self {
        self.id = name.into();
        self
    }

    pub fn with_kind(mut self, name: impl Into<String>) -> Self {
        self.kind = name.into();
        self
    }

    pub fn with_label(mut self, name: impl Into<String>) -> Self {
        self.label = name.into();
        self
    }

    pub fn with_comments(mut self, name: impl Into<String>) -> Self {
        self.comments = name.into();
        self
    }

    pub fn with_line_source(mut self, name: impl Into<String>) -> Self {
        self.line_source = name.into();
        self
    }

    pub fn with_line_destination(mut self, name: impl Into<String>) -> Self {
        self.line_destination = name.into();
        self
    }
}
