//! Placing shapes and routing flows.
//!
//! [`ColumnLayout`] turns graph levels into shape positions and
//! [`connection_points`] picks where each flow leaves and enters its shapes.
//! The result of both is a [`ProcessDocument`].

mod anchor;
mod columns;

pub use anchor::connection_points;
pub use columns::ColumnLayout;

use flowsheet_core::{
    geometry::Point,
    identifier::{FlowId, ShapeId},
    semantic::{Flow, Shape},
};

use crate::config::AnchorMode;

/// The two-point route of one flow.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeRoute {
    flow_id: FlowId,
    start: Point,
    end: Point,
}

impl EdgeRoute {
    pub fn new(flow_id: FlowId, start: Point, end: Point) -> Self {
        Self {
            flow_id,
            start,
            end,
        }
    }

    pub fn flow_id(&self) -> &FlowId {
        &self.flow_id
    }

    /// Where the edge leaves its source shape.
    pub fn start(&self) -> Point {
        self.start
    }

    /// Where the edge enters its target shape.
    pub fn end(&self) -> Point {
        self.end
    }
}

/// A laid-out process, ready to be exported.
///
/// Shapes carry their final bounds, and every flow has exactly one route.
/// Each flow's endpoints are shapes of the document.
#[derive(Debug, Clone, Default)]
pub struct ProcessDocument {
    shapes: Vec<Shape>,
    flows: Vec<Flow>,
    edges: Vec<EdgeRoute>,
}

impl ProcessDocument {
    /// Routes every flow between its positioned shapes.
    pub fn new(shapes: Vec<Shape>, flows: Vec<Flow>, anchor_mode: AnchorMode) -> Self {
        let edges = flows
            .iter()
            .map(|flow| {
                let (start, end) = connection_points(
                    find_shape(&shapes, flow.source()),
                    find_shape(&shapes, flow.target()),
                    anchor_mode,
                );
                EdgeRoute::new(flow.id().clone(), start, end)
            })
            .collect();

        Self {
            shapes,
            flows,
            edges,
        }
    }

    /// Shapes in row order.
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Flows in connector-row order.
    pub fn flows(&self) -> &[Flow] {
        &self.flows
    }

    /// Routes in the same order as [`ProcessDocument::flows`].
    pub fn edges(&self) -> &[EdgeRoute] {
        &self.edges
    }

    pub fn shape(&self, id: &ShapeId) -> Option<&Shape> {
        find_shape(&self.shapes, id)
    }
}

fn find_shape<'a>(shapes: &'a [Shape], id: &ShapeId) -> Option<&'a Shape> {
    shapes.iter().find(|shape| shape.id() == id)
}
