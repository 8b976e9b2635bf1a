//! Dropping flows whose endpoints are not shapes.

use std::collections::HashSet;

use log::{debug, warn};

use flowsheet_core::{
    identifier::{FlowId, ShapeId},
    semantic::{Flow, Shape},
};
use flowsheet_parser::{
    Spanned,
    error::{Diagnostic, ErrorCode},
};

/// Keeps the flows whose source and target are both among `shapes`.
///
/// Each dropped flow is logged and reported as an `E200` warning labelled
/// with its connector row. References to dropped flows are removed from the
/// shapes, so every reference left on a shape names a kept flow.
pub fn validate_flows(
    shapes: &mut [Shape],
    flows: Vec<Spanned<Flow>>,
) -> (Vec<Flow>, Vec<Diagnostic>) {
    let shape_ids: HashSet<&ShapeId> = shapes.iter().map(Shape::id).collect();
    let mut kept = Vec::with_capacity(flows.len());
    let mut warnings = Vec::new();

    for flow in flows {
        let missing: Vec<&ShapeId> = [flow.source(), flow.target()]
            .into_iter()
            .filter(|id| !shape_ids.contains(id))
            .collect();

        if missing.is_empty() {
            kept.push(flow.into_inner());
            continue;
        }

        warn!(
            flow_id:% = flow.id(),
            source:% = flow.source(),
            target:% = flow.target();
            "Dropping flow with a missing endpoint"
        );
        let names = missing
            .iter()
            .map(|id| format!("`{}`", id.row_id()))
            .collect::<Vec<_>>()
            .join(" and ");
        warnings.push(
            Diagnostic::warning(format!(
                "connector `{}` references no shape row {names}",
                flow.id().row_id()
            ))
            .with_code(ErrorCode::E200)
            .with_label(flow.span(), "connector dropped")
            .with_help("point the connector at an existing shape row"),
        );
    }

    let kept_ids: HashSet<FlowId> = kept.iter().map(|flow| flow.id().clone()).collect();
    for shape in shapes.iter_mut() {
        shape.retain_references(|id| kept_ids.contains(id));
    }

    debug!(kept = kept.len(), dropped = warnings.len(); "Flows validated");
    (kept, warnings)
}
