//! BPMN 2.0 XML backend.
//!
//! The document has two halves under one `bpmn:definitions` root: the
//! process body (`bpmn:process`) listing elements and sequence flows, and the
//! diagram interchange section (`bpmndi:BPMNDiagram`) giving every element
//! its bounds and every flow its waypoints.

use std::{
    collections::HashSet,
    fmt::{self, Write},
    io,
};

use log::{debug, warn};

use flowsheet_core::{
    geometry::Point,
    semantic::{Flow, PropertyValue, Shape},
};

use super::{Error, Exporter};
use crate::layout::{EdgeRoute, ProcessDocument};

const NAMESPACES: [(&str, &str); 6] = [
    ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
    ("xmlns:bpmn", "http://www.omg.org/spec/BPMN/20100524/MODEL"),
    ("xmlns:bpmndi", "http://www.omg.org/spec/BPMN/20100524/DI"),
    ("xmlns:dc", "http://www.omg.org/spec/DD/20100524/DC"),
    ("xmlns:di", "http://www.omg.org/spec/DD/20100524/DI"),
    ("xmlns:custom", "http://custom/ns"),
];

const DEFINITIONS_ID: &str = "Definitions_1";
const TARGET_NAMESPACE: &str = "http://bpmn.io/schema/bpmn";
const PROCESS_ID: &str = "Process_1";
const DIAGRAM_ID: &str = "BPMNDiagram_1";
const PLANE_ID: &str = "BPMNPlane_1";

/// Writes documents as BPMN XML to an [`io::Write`] sink.
///
/// # Examples
///
/// ```
/// # use flowsheet::{config::AnchorMode, export::{Exporter, bpmn::BpmnExporter}, layout::ProcessDocument};
/// let document = ProcessDocument::new(Vec::new(), Vec::new(), AnchorMode::Horizontal);
/// let mut exporter = BpmnExporter::new(Vec::new());
/// exporter.export_document(&document).unwrap();
///
/// let xml = String::from_utf8(exporter.into_inner()).unwrap();
/// assert!(xml.starts_with("<?xml"));
/// ```
#[derive(Debug)]
pub struct BpmnExporter<W: io::Write> {
    out: W,
}

impl<W: io::Write> BpmnExporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Returns the underlying sink.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: io::Write> Exporter for BpmnExporter<W> {
    fn export_document(&mut self, document: &ProcessDocument) -> Result<(), Error> {
        let xml = render(document)?;
        self.out.write_all(xml.as_bytes()).map_err(Error::Io)?;
        self.out.flush().map_err(Error::Io)
    }
}

/// Renders `document` as a BPMN XML string.
///
/// # Errors
///
/// Returns [`Error::Render`] if formatting fails.
pub fn render(document: &ProcessDocument) -> Result<String, Error> {
    let mut xml = XmlWriter::new();
    xml.declaration()?;

    let mut root: Vec<(&str, &str)> = NAMESPACES.to_vec();
    root.push(("id", DEFINITIONS_ID));
    root.push(("targetNamespace", TARGET_NAMESPACE));
    xml.open("bpmn:definitions", &root)?;

    write_process(&mut xml, document)?;
    write_diagram(&mut xml, document)?;

    xml.close("bpmn:definitions")?;

    debug!(
        shapes = document.shapes().len(),
        flows = document.flows().len(),
        bytes = xml.out.len();
        "BPMN document rendered"
    );
    Ok(xml.finish())
}

fn write_process(xml: &mut XmlWriter, document: &ProcessDocument) -> fmt::Result {
    xml.open("bpmn:process", &[("id", PROCESS_ID), ("isExecutable", "false")])?;

    for shape in document.shapes() {
        write_shape_element(xml, shape)?;
    }
    for flow in document.flows() {
        write_sequence_flow(xml, flow)?;
    }

    xml.close("bpmn:process")
}

fn write_shape_element(xml: &mut XmlWriter, shape: &Shape) -> fmt::Result {
    let custom = custom_attributes(shape);
    let mut attrs: Vec<(&str, &str)> = vec![("id", shape.id().as_str()), ("name", shape.label())];
    attrs.extend(custom.iter().map(|(name, value)| (name.as_str(), value.as_str())));

    let tag = shape.kind().bpmn_tag();
    if shape.incoming().is_empty() && shape.outgoing().is_empty() {
        return xml.empty(tag, &attrs);
    }

    xml.open(tag, &attrs)?;
    for id in shape.incoming() {
        xml.text_element("bpmn:incoming", id.as_str())?;
    }
    for id in shape.outgoing() {
        xml.text_element("bpmn:outgoing", id.as_str())?;
    }
    xml.close(tag)
}

fn write_sequence_flow(xml: &mut XmlWriter, flow: &Flow) -> fmt::Result {
    xml.empty(
        "bpmn:sequenceFlow",
        &[
            ("id", flow.id().as_str()),
            ("sourceRef", flow.source().as_str()),
            ("targetRef", flow.target().as_str()),
            ("name", flow.label()),
        ],
    )
}

fn write_diagram(xml: &mut XmlWriter, document: &ProcessDocument) -> fmt::Result {
    xml.open("bpmndi:BPMNDiagram", &[("id", DIAGRAM_ID)])?;
    xml.open(
        "bpmndi:BPMNPlane",
        &[("id", PLANE_ID), ("bpmnElement", PROCESS_ID)],
    )?;

    for shape in document.shapes() {
        let id = shape.id().as_str();
        let di_id = format!("{id}_di");
        let bounds = shape.bounds();
        let [x, y, width, height] = [
            bounds.min_x(),
            bounds.min_y(),
            bounds.width(),
            bounds.height(),
        ]
        .map(format_coordinate);

        xml.open("bpmndi:BPMNShape", &[("id", di_id.as_str()), ("bpmnElement", id)])?;
        xml.empty(
            "dc:Bounds",
            &[
                ("x", x.as_str()),
                ("y", y.as_str()),
                ("width", width.as_str()),
                ("height", height.as_str()),
            ],
        )?;
        xml.close("bpmndi:BPMNShape")?;
    }

    for edge in document.edges() {
        write_edge(xml, edge)?;
    }

    xml.close("bpmndi:BPMNPlane")?;
    xml.close("bpmndi:BPMNDiagram")
}

fn write_edge(xml: &mut XmlWriter, edge: &EdgeRoute) -> fmt::Result {
    let id = edge.flow_id().as_str();
    let di_id = format!("{id}_di");

    xml.open("bpmndi:BPMNEdge", &[("id", di_id.as_str()), ("bpmnElement", id)])?;
    for point in [edge.start(), edge.end()] {
        let (x, y) = waypoint(point);
        let (x, y) = (x.to_string(), y.to_string());
        xml.empty("di:waypoint", &[("x", x.as_str()), ("y", y.as_str())])?;
    }
    xml.close("bpmndi:BPMNEdge")
}

/// Rounds a waypoint to whole units, halves toward positive infinity.
///
/// The addition is done in `f64`, where `v + 0.5` is exact for every `f32`.
fn waypoint(point: Point) -> (i64, i64) {
    let round = |v: f32| (f64::from(v) + 0.5).floor() as i64;
    (round(point.x()), round(point.y()))
}

/// Formats a coordinate without a trailing `.0` and without negative zero.
fn format_coordinate(v: f32) -> String {
    if v == 0.0 { "0".to_string() } else { v.to_string() }
}

/// Builds one `custom:` attribute per property.
///
/// Keys are reduced to XML name characters. A property whose reduced key
/// repeats an earlier one is skipped.
fn custom_attributes(shape: &Shape) -> Vec<(String, String)> {
    let mut seen = HashSet::new();
    let mut attrs = Vec::with_capacity(shape.properties().len());

    for (key, value) in shape.properties() {
        let name = format!("custom:{}", sanitize_name(key));
        if !seen.insert(name.clone()) {
            warn!(shape_id:% = shape.id(), key; "Skipping property with a clashing attribute name");
            continue;
        }
        let value = match value {
            PropertyValue::Text(text) => text.clone(),
            PropertyValue::Entry { key, value } => format!("{key}={value}"),
        };
        attrs.push((name, value));
    }

    attrs
}

/// Turns an arbitrary key into a valid unprefixed XML name.
///
/// Characters other than ASCII letters, digits, `_`, `-` and `.` become
/// `_`, and a name that would not start with a letter or `_` gets a leading
/// `_`.
fn sanitize_name(key: &str) -> String {
    let mut name: String = key
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if !name.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_') {
        name.insert(0, '_');
    }
    name
}

fn escape_into(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '\n' => out.push_str("&#10;"),
            '\r' => out.push_str("&#13;"),
            '\t' => out.push_str("&#9;"),
            // Not allowed in XML 1.0 documents.
            c if c < '\u{20}' => {}
            c => out.push(c),
        }
    }
}

/// Indenting XML writer over a `String`.
struct XmlWriter {
    out: String,
    depth: usize,
}

impl XmlWriter {
    fn new() -> Self {
        Self {
            out: String::new(),
            depth: 0,
        }
    }

    fn declaration(&mut self) -> fmt::Result {
        writeln!(self.out, r#"<?xml version="1.0" encoding="UTF-8"?>"#)
    }

    fn start_tag(&mut self, tag: &str, attrs: &[(&str, &str)]) -> fmt::Result {
        write!(self.out, "{:width$}<{tag}", "", width = self.depth * 2)?;
        for (name, value) in attrs {
            write!(self.out, " {name}=\"")?;
            escape_into(&mut self.out, value);
            self.out.push('"');
        }
        Ok(())
    }

    fn open(&mut self, tag: &str, attrs: &[(&str, &str)]) -> fmt::Result {
        self.start_tag(tag, attrs)?;
        writeln!(self.out, ">")?;
        self.depth += 1;
        Ok(())
    }

    fn empty(&mut self, tag: &str, attrs: &[(&str, &str)]) -> fmt::Result {
        self.start_tag(tag, attrs)?;
        writeln!(self.out, " />")
    }

    fn text_element(&mut self, tag: &str, text: &str) -> fmt::Result {
        self.start_tag(tag, &[])?;
        self.out.push('>');
        escape_into(&mut self.out, text);
        writeln!(self.out, "</{tag}>")
    }

    fn close(&mut self, tag: &str) -> fmt::Result {
        self.depth = self.depth.saturating_sub(1);
        writeln!(self.out, "{:width$}</{tag}>", "", width = self.depth * 2)
    }

    fn finish(self) -> String {
        self.out
    }
}
