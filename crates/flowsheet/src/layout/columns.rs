//! Column placement of leveled shapes.

use indexmap::IndexMap;
use log::{debug, trace};

use flowsheet_core::{geometry::Point, identifier::ShapeId, semantic::Shape};

use crate::{config::LayoutConfig, structure::FlowGraph};

/// Places each level of a [`FlowGraph`] in its own column.
///
/// Column `c` sits at `x = c * horizontal_spacing + offset_x`. The `n`
/// shapes of a column are stacked `vertical_spacing` apart and centered on
/// zero before `offset_y` is added, so the `i`-th shape gets
/// `y = -(n * vertical_spacing) / 2 + i * vertical_spacing + offset_y`.
/// Coordinates are top-left corners; shape sizes play no part.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnLayout {
    horizontal_spacing: f32,
    vertical_spacing: f32,
    offset: Point,
}

impl ColumnLayout {
    pub fn new(config: &LayoutConfig) -> Self {
        Self {
            horizontal_spacing: config.horizontal_spacing(),
            vertical_spacing: config.vertical_spacing(),
            offset: Point::new(config.offset_x(), config.offset_y()),
        }
    }

    /// Computes the top-left corner of every leveled node.
    pub fn positions(&self, graph: &FlowGraph) -> IndexMap<ShapeId, Point> {
        let mut positions = IndexMap::with_capacity(graph.len());

        for (level, column) in graph.columns().into_iter().enumerate() {
            let x = level as f32 * self.horizontal_spacing;
            let top = -(column.len() as f32 * self.vertical_spacing) / 2.0;

            for (i, id) in column.into_iter().enumerate() {
                let y = top + i as f32 * self.vertical_spacing;
                let position = Point::new(x, y).add_point(self.offset);
                trace!(shape_id:% = id, level, x = position.x(), y = position.y(); "Placed shape");
                positions.insert(id.clone(), position);
            }
        }

        positions
    }

    /// Moves every shape to its computed position.
    ///
    /// Shapes that are not nodes of `graph` keep their current position.
    pub fn apply(&self, graph: &FlowGraph, shapes: &mut [Shape]) {
        let positions = self.positions(graph);
        for shape in shapes.iter_mut() {
            if let Some(position) = positions.get(shape.id()) {
                shape.set_position(*position);
            }
        }
        debug!(placed = positions.len(); "Shapes positioned");
    }
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self::new(&LayoutConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowsheet_core::{
        identifier::FlowId,
        semantic::{Flow, Properties, ShapeKind},
    };

    fn task(id: &str) -> Shape {
        Shape::new(ShapeId::from_row_id(id), ShapeKind::Task, id, Properties::new())
    }

    fn flow(source: &str, target: &str) -> Flow {
        Flow::new(
            FlowId::from_row_id(&format!("{source}{target}")),
            ShapeId::from_row_id(source),
            ShapeId::from_row_id(target),
            "",
        )
    }

    fn leveled(shapes: &[Shape], flows: &[Flow]) -> FlowGraph {
        let mut graph = FlowGraph::new(shapes, flows);
        graph.assign_levels();
        graph
    }

    #[test]
    fn test_chain_is_one_row() {
        let shapes = vec![task("1"), task("2"), task("3")];
        let graph = leveled(&shapes, &[flow("1", "2"), flow("2", "3")]);

        let positions = ColumnLayout::default().positions(&graph);

        let xs: Vec<f32> = positions.values().map(|p| p.x()).collect();
        assert_eq!(xs, [100.0, 350.0, 600.0]);
        assert!(positions.values().all(|p| p.y() == 25.0));
    }

    #[test]
    fn test_unconnected_shapes_share_column() {
        let shapes = vec![task("1"), task("2")];
        let graph = leveled(&shapes, &[]);

        let positions = ColumnLayout::default().positions(&graph);

        assert_eq!(positions[0], Point::new(100.0, -50.0));
        assert_eq!(positions[1], Point::new(100.0, 100.0));
    }

    #[test]
    fn test_custom_spacing() {
        let config = LayoutConfig::default()
            .with_spacing(100.0, 40.0)
            .with_offset(0.0, 0.0);
        let shapes = vec![task("1"), task("2"), task("3")];
        let graph = leveled(&shapes, &[flow("1", "2"), flow("1", "3")]);

        let positions = ColumnLayout::new(&config).positions(&graph);

        assert_eq!(positions[&ShapeId::from_row_id("1")], Point::new(0.0, -20.0));
        assert_eq!(positions[&ShapeId::from_row_id("2")], Point::new(100.0, -40.0));
        assert_eq!(positions[&ShapeId::from_row_id("3")], Point::new(100.0, 0.0));
    }

    #[test]
    fn test_apply_moves_shapes() {
        let mut shapes = vec![task("1"), task("2")];
        let graph = leveled(&shapes, &[flow("1", "2")]);

        ColumnLayout::default().apply(&graph, &mut shapes);

        assert_eq!(shapes[0].bounds().min_point(), Point::new(100.0, 25.0));
        assert_eq!(shapes[1].bounds().min_point(), Point::new(350.0, 25.0));
        assert_eq!(shapes[1].bounds().width(), 100.0);
    }
}
