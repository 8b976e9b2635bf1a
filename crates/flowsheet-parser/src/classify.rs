//! Turning shape rows into typed [`Shape`]s.

use indexmap::IndexMap;
use log::{trace, warn};

use flowsheet_core::{
    identifier::ShapeId,
    semantic::{Shape, ShapeKind},
};

use crate::{
    ColumnNames,
    annotation::{MalformedAnnotation, parse_annotation_groups},
    error::{Diagnostic, DiagnosticCollector, ErrorCode},
    rows::Row,
    span::Span,
};

/// Kind value of connector rows.
pub(crate) const CONNECTOR_KIND: &str = "Line";

/// Row kinds that never become shapes.
const STRUCTURAL_KINDS: [&str; 3] = [CONNECTOR_KIND, "Document", "Page"];

/// Returns `true` for connector, document and page rows.
pub(crate) fn is_structural(kind: &str) -> bool {
    STRUCTURAL_KINDS.contains(&kind)
}

/// Creates one shape per non-structural row, in row order.
///
/// A `Terminator` becomes the start event when it is the first shape of the
/// sheet and an end event otherwise. Rows repeating an already used id are
/// skipped with a warning.
pub(crate) fn classify(
    rows: &[Row],
    columns: &ColumnNames,
    collector: &mut DiagnosticCollector,
) -> Vec<Shape> {
    let mut shapes: Vec<Shape> = Vec::new();
    let mut first_seen: IndexMap<ShapeId, Span> = IndexMap::new();

    for row in rows {
        let kind_name = row.get(columns.kind());
        if is_structural(kind_name) {
            continue;
        }

        let id = ShapeId::from_row_id(row.get(columns.id()));
        if let Some(first) = first_seen.get(&id) {
            warn!(shape_id:% = id, line = row.line(); "Skipping row with duplicate shape id");
            collector.emit(
                Diagnostic::warning(format!("shape id `{id}` is defined more than once"))
                    .with_code(ErrorCode::E202)
                    .with_label(row.span(), "duplicate row ignored")
                    .with_secondary_label(*first, "first defined here")
                    .with_help("give every shape row a unique id"),
            );
            continue;
        }
        first_seen.insert(id.clone(), row.span());

        let kind = match kind_name {
            "Terminator" if shapes.is_empty() => ShapeKind::Start,
            "Terminator" => ShapeKind::End,
            "Process" => ShapeKind::Task,
            "Decision" => ShapeKind::Gateway,
            "Note" => ShapeKind::Annotation,
            _ => ShapeKind::Unknown,
        };

        let (properties, malformed) = parse_annotation_groups(row.get(columns.comments()));
        if let Some(err) = malformed {
            warn!(shape_id:% = id, err:%; "Ignoring unclosed annotation group");
            collector.emit(
                Diagnostic::warning(format!("annotation of `{id}` has an unclosed `[`"))
                    .with_code(ErrorCode::E201)
                    .with_label(bracket_span(row, columns, &err), "unclosed group")
                    .with_help("close the group with `]`; text after the last `]` is ignored"),
            );
        }

        trace!(shape_id:% = id, kind:?; "Classified shape row");
        shapes.push(Shape::new(id, kind, row.get(columns.label()), properties));
    }

    shapes
}

/// Locates the unmatched `[` of a comment cell inside the row's line.
fn bracket_span(row: &Row, columns: &ColumnNames, err: &MalformedAnnotation) -> Span {
    row.cell_span(columns.comments())
        .map(|cell| cell.sub_span(err.offset, 1))
        .unwrap_or(row.span())
}
