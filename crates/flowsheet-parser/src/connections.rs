//! Resolving connector rows into [`Flow`]s.

use indexmap::IndexMap;
use log::{debug, trace};

use flowsheet_core::{
    identifier::{FlowId, ShapeId},
    semantic::{Flow, Shape},
};

use crate::{
    ColumnNames,
    classify::CONNECTOR_KIND,
    rows::Row,
    span::Spanned,
};

/// Flow references collected for one shape id.
#[derive(Debug, Default)]
struct References {
    incoming: Vec<FlowId>,
    outgoing: Vec<FlowId>,
}

/// Creates one flow per connector row and records it on its endpoints.
///
/// Endpoints are not checked here. A connector naming a row that is not a
/// shape gets a placeholder entry so the lookup always succeeds; such flows
/// are dropped later, once the final shape set is known.
pub(crate) fn connect(
    rows: &[Row],
    columns: &ColumnNames,
    shapes: &mut [Shape],
) -> Vec<Spanned<Flow>> {
    let mut references: IndexMap<ShapeId, References> = shapes
        .iter()
        .map(|shape| (shape.id().clone(), References::default()))
        .collect();
    let mut flows = Vec::new();

    for row in rows.iter().filter(|row| row.get(columns.kind()) == CONNECTOR_KIND) {
        let flow = Flow::new(
            FlowId::from_row_id(row.get(columns.id())),
            ShapeId::from_row_id(row.get(columns.line_source())),
            ShapeId::from_row_id(row.get(columns.line_destination())),
            row.get(columns.label()),
        );
        trace!(
            flow_id:% = flow.id(),
            source:% = flow.source(),
            target:% = flow.target();
            "Resolved connector row"
        );

        references
            .entry(flow.source().clone())
            .or_default()
            .outgoing
            .push(flow.id().clone());
        references
            .entry(flow.target().clone())
            .or_default()
            .incoming
            .push(flow.id().clone());

        flows.push(Spanned::new(flow, row.span()));
    }

    for shape in shapes.iter_mut() {
        if let Some(refs) = references.swap_remove(shape.id()) {
            shape.set_references(refs.incoming, refs.outgoing);
        }
    }

    debug!(flows = flows.len(), placeholders = references.len(); "Connected shapes");
    flows
}
