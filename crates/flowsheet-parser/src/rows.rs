//! Splitting raw sheet text into header-keyed rows.
//!
//! The format is deliberately naive, matching what Lucidchart produces for
//! simple diagrams: lines are split on `\n`, cells on `,`, and there is no
//! support for quoted cells containing commas. Blank lines are skipped
//! anywhere in the input.

use indexmap::IndexMap;
use log::{debug, trace};

use crate::{
    ColumnNames,
    error::{Diagnostic, ErrorCode},
    span::Span,
};

/// One data row of the sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    line: usize,
    span: Span,
    cells: IndexMap<String, String>,
    cell_spans: IndexMap<String, Span>,
}

impl Row {
    /// 1-based line number of the row in the source text.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Byte span of the whole line, without its line break.
    pub fn span(&self) -> Span {
        self.span
    }

    /// Returns the trimmed cell under `column`, or `""` if the row has none.
    pub fn get(&self, column: &str) -> &str {
        self.cells.get(column).map(String::as_str).unwrap_or_default()
    }

    /// Byte span of the trimmed cell under `column`.
    ///
    /// A cell missing from a short row has an empty span at the end of the
    /// line.
    pub fn cell_span(&self, column: &str) -> Option<Span> {
        self.cell_spans.get(column).copied()
    }

    /// All cells keyed by header name, in header order.
    pub fn cells(&self) -> &IndexMap<String, String> {
        &self.cells
    }
}

/// Splits `source` into rows keyed by the header line.
///
/// Short rows are padded with empty cells and cells beyond the header width
/// are dropped. When a header name repeats, the column keeps its first
/// position and takes the value of the last cell with that name.
///
/// # Errors
///
/// Returns an error diagnostic when the input has no non-blank line
/// ([`ErrorCode::E100`]), when the header is not followed by any data row
/// ([`ErrorCode::E101`]), or when the header lacks the id or kind column
/// ([`ErrorCode::E102`]).
pub(crate) fn read_rows(source: &str, columns: &ColumnNames) -> Result<Vec<Row>, Diagnostic> {
    let mut lines = numbered_lines(source).filter(|(_, _, text)| !text.trim().is_empty());

    let Some((_, header_span, header_text)) = lines.next() else {
        return Err(Diagnostic::error("input contains no header line")
            .with_code(ErrorCode::E100)
            .with_help("the first non-blank line must name the sheet columns"));
    };

    let header: Vec<&str> = header_text.split(',').map(str::trim).collect();
    trace!(header:?; "Read header");

    let rows: Vec<Row> = lines
        .map(|(line, span, text)| {
            let values = split_cells(text, span.start());
            let line_end = Span::new(span.end()..span.end());
            let mut cells = IndexMap::with_capacity(header.len());
            let mut cell_spans = IndexMap::with_capacity(header.len());
            for (idx, name) in header.iter().enumerate() {
                let (value, cell_span) = values.get(idx).copied().unwrap_or(("", line_end));
                cells.insert(name.to_string(), value.to_string());
                cell_spans.insert(name.to_string(), cell_span);
            }
            Row {
                line,
                span,
                cells,
                cell_spans,
            }
        })
        .collect();

    if rows.is_empty() {
        return Err(Diagnostic::error("sheet has a header but no data rows")
            .with_code(ErrorCode::E101)
            .with_label(header_span, "header line"));
    }

    for required in [columns.id(), columns.kind()] {
        if !header.contains(&required) {
            return Err(
                Diagnostic::error(format!("header has no `{required}` column"))
                    .with_code(ErrorCode::E102)
                    .with_label(header_span, "header line")
                    .with_help("shapes and connectors cannot be told apart without it"),
            );
        }
    }

    debug!(rows = rows.len(), columns = header.len(); "Read sheet rows");
    Ok(rows)
}

/// Splits a line on `,` into trimmed cells with their byte spans.
fn split_cells(text: &str, line_start: usize) -> Vec<(&str, Span)> {
    let mut offset = line_start;
    text.split(',')
        .map(|raw| {
            let leading = raw.len() - raw.trim_start().len();
            let value = raw.trim();
            let start = offset + leading;
            offset += raw.len() + 1;
            (value, Span::new(start..start + value.len()))
        })
        .collect()
}

/// Yields `(line number, span, text)` for every line, blank ones included.
fn numbered_lines(source: &str) -> impl Iterator<Item = (usize, Span, &str)> {
    let mut offset = 0;
    source.split('\n').enumerate().map(move |(idx, text)| {
        let start = offset;
        offset += text.len() + 1;
        (idx + 1, Span::new(start..start + text.len()), text)
    })
}
