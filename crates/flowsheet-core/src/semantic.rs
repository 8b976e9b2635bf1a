//! Semantic model of a flowchart sheet.
//!
//! The parser produces [`Shape`]s and [`Flow`]s from sheet rows; the layout
//! stage moves shapes into place and the exporter writes both out as BPMN.
//!
//! # Overview
//!
//! - [`ShapeKind`] - BPMN element kind assigned to a shape row
//! - [`Shape`] - a diagram node with geometry and flow references
//! - [`Flow`] - a directed connection between two shapes
//! - [`Properties`] / [`PropertyValue`] - custom properties parsed from row comments

use indexmap::IndexMap;

use crate::{
    geometry::{Bounds, Point, Size},
    identifier::{FlowId, ShapeId},
};

/// Custom properties of a shape, in the order their keys first appeared.
pub type Properties = IndexMap<String, PropertyValue>;

/// The value of a single custom property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    /// A plain text value, e.g. `Owner: Finance`.
    Text(String),
    /// A single-entry nested mapping, e.g. `Input: amount = 100`.
    Entry { key: String, value: String },
}

impl PropertyValue {
    /// Returns the text value, or `None` for a nested entry.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropertyValue::Text(text) => Some(text),
            PropertyValue::Entry { .. } => None,
        }
    }
}

/// The BPMN element kind of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Start,
    End,
    Task,
    Gateway,
    Annotation,
    /// A row kind with no BPMN counterpart. Kept so that no shape row is lost.
    Unknown,
}

impl ShapeKind {
    /// Returns the element tag written to the process body.
    pub fn bpmn_tag(self) -> &'static str {
        match self {
            ShapeKind::Start => "bpmn:startEvent",
            ShapeKind::End => "bpmn:endEvent",
            ShapeKind::Task => "bpmn:task",
            ShapeKind::Gateway => "bpmn:exclusiveGateway",
            ShapeKind::Annotation => "bpmn:textAnnotation",
            ShapeKind::Unknown => "unknown",
        }
    }

    /// Returns the default size of shapes of this kind.
    ///
    /// # Examples
    ///
    /// ```
    /// # use flowsheet_core::{geometry::Size, semantic::ShapeKind};
    /// assert_eq!(ShapeKind::Start.default_size(), Size::new(36.0, 36.0));
    /// assert_eq!(ShapeKind::Task.default_size(), Size::new(100.0, 80.0));
    /// ```
    pub fn default_size(self) -> Size {
        match self {
            ShapeKind::Start | ShapeKind::End => Size::new(36.0, 36.0),
            ShapeKind::Gateway => Size::new(50.0, 50.0),
            ShapeKind::Annotation => Size::new(120.0, 30.0),
            ShapeKind::Task | ShapeKind::Unknown => Size::new(100.0, 80.0),
        }
    }
}

/// A diagram node created from one shape row.
///
/// The shape starts at the origin with the default size of its kind. Its
/// final position is assigned during layout, and its flow references are
/// filled in while connector rows are resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    id: ShapeId,
    kind: ShapeKind,
    label: String,
    bounds: Bounds,
    incoming: Vec<FlowId>,
    outgoing: Vec<FlowId>,
    properties: Properties,
}

impl Shape {
    /// Creates a shape at the origin with the default size of `kind`.
    pub fn new(
        id: ShapeId,
        kind: ShapeKind,
        label: impl Into<String>,
        properties: Properties,
    ) -> Self {
        Self {
            id,
            kind,
            label: label.into(),
            bounds: Bounds::new_from_top_left(Point::default(), kind.default_size()),
            incoming: Vec::new(),
            outgoing: Vec::new(),
            properties,
        }
    }

    pub fn id(&self) -> &ShapeId {
        &self.id
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Flows ending at this shape, in connector-row order.
    pub fn incoming(&self) -> &[FlowId] {
        &self.incoming
    }

    /// Flows starting at this shape, in connector-row order.
    pub fn outgoing(&self) -> &[FlowId] {
        &self.outgoing
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    /// Moves the shape so its top-left corner is at `top_left`.
    pub fn set_position(&mut self, top_left: Point) {
        self.bounds = self.bounds.with_top_left(top_left);
    }

    /// Replaces both flow reference lists.
    pub fn set_references(&mut self, incoming: Vec<FlowId>, outgoing: Vec<FlowId>) {
        self.incoming = incoming;
        self.outgoing = outgoing;
    }

    /// Drops every flow reference for which `keep` returns `false`.
    pub fn retain_references(&mut self, mut keep: impl FnMut(&FlowId) -> bool) {
        self.incoming.retain(|id| keep(id));
        self.outgoing.retain(|id| keep(id));
    }
}

/// A directed connection created from one connector row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flow {
    id: FlowId,
    source: ShapeId,
    target: ShapeId,
    label: String,
}

impl Flow {
    pub fn new(id: FlowId, source: ShapeId, target: ShapeId, label: impl Into<String>) -> Self {
        Self {
            id,
            source,
            target,
            label: label.into(),
        }
    }

    pub fn id(&self) -> &FlowId {
        &self.id
    }

    pub fn source(&self) -> &ShapeId {
        &self.source
    }

    pub fn target(&self) -> &ShapeId {
        &self.target
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(kind: ShapeKind) -> Shape {
        Shape::new(ShapeId::from_row_id("1"), kind, "Label", Properties::new())
    }

    #[test]
    fn test_shape_starts_at_origin_with_kind_size() {
        let gateway = shape(ShapeKind::Gateway);

        assert_eq!(gateway.bounds().min_point(), Point::default());
        assert_eq!(gateway.bounds().to_size(), Size::new(50.0, 50.0));
        assert!(gateway.incoming().is_empty());
        assert!(gateway.outgoing().is_empty());
    }

    #[test]
    fn test_annotation_size() {
        assert_eq!(
            shape(ShapeKind::Annotation).bounds().to_size(),
            Size::new(120.0, 30.0)
        );
        assert_eq!(shape(ShapeKind::Unknown).bounds().to_size(), Size::new(100.0, 80.0));
    }

    #[test]
    fn test_bpmn_tags() {
        assert_eq!(ShapeKind::Start.bpmn_tag(), "bpmn:startEvent");
        assert_eq!(ShapeKind::End.bpmn_tag(), "bpmn:endEvent");
        assert_eq!(ShapeKind::Task.bpmn_tag(), "bpmn:task");
        assert_eq!(ShapeKind::Gateway.bpmn_tag(), "bpmn:exclusiveGateway");
        assert_eq!(ShapeKind::Annotation.bpmn_tag(), "bpmn:textAnnotation");
        assert_eq!(ShapeKind::Unknown.bpmn_tag(), "unknown");
    }

    #[test]
    fn test_set_position_keeps_size() {
        let mut task = shape(ShapeKind::Task);
        task.set_position(Point::new(350.0, 25.0));

        assert_eq!(task.bounds().min_x(), 350.0);
        assert_eq!(task.bounds().min_y(), 25.0);
        assert_eq!(task.bounds().to_size(), Size::new(100.0, 80.0));
    }

    #[test]
    fn test_retain_references() {
        let mut task = shape(ShapeKind::Task);
        task.set_references(
            vec![FlowId::from_row_id("1"), FlowId::from_row_id("2")],
            vec![FlowId::from_row_id("3")],
        );

        task.retain_references(|id| *id != "Flow_2");

        assert_eq!(task.incoming(), &[FlowId::from_row_id("1")]);
        assert_eq!(task.outgoing(), &[FlowId::from_row_id("3")]);
    }

    #[test]
    fn test_property_value_as_text() {
        let text = PropertyValue::Text("Finance".to_string());
        assert_eq!(text.as_text(), Some("Finance"));
        let entry = PropertyValue::Entry {
            key: "amount".to_string(),
            value: "100".to_string(),
        };
        assert_eq!(entry.as_text(), None);
    }
}
