use flowsheet::{
    DocumentBuilder, ErrorCode, FlowsheetError,
    config::{AnchorMode, AppConfig, LayoutConfig},
    convert,
};
use roxmltree::{Document, Node};

const BPMN: &str = "http://www.omg.org/spec/BPMN/20100524/MODEL";
const BPMNDI: &str = "http://www.omg.org/spec/BPMN/20100524/DI";
const DC: &str = "http://www.omg.org/spec/DD/20100524/DC";
const DI: &str = "http://www.omg.org/spec/DD/20100524/DI";
const CUSTOM: &str = "http://custom/ns";

const HEADER: &str = "Id,Name,Text Area 1,comments,Line Source,Line Destination";

fn sheet(rows: &[&str]) -> String {
    let mut text = String::from(HEADER);
    for row in rows {
        text.push('\n');
        text.push_str(row);
    }
    text.push('\n');
    text
}

fn elements<'a, 'input>(
    doc: &'a Document<'input>,
    namespace: &str,
    name: &str,
) -> Vec<Node<'a, 'input>> {
    doc.descendants()
        .filter(|node| node.has_tag_name((namespace, name)))
        .collect()
}

fn by_id<'a, 'input>(doc: &'a Document<'input>, id: &str) -> Node<'a, 'input> {
    doc.descendants()
        .find(|node| node.attribute("id") == Some(id))
        .unwrap_or_else(|| panic!("no element with id {id}"))
}

fn bounds(doc: &Document, shape_id: &str) -> (f32, f32, f32, f32) {
    let shape = by_id(doc, &format!("{shape_id}_di"));
    let bounds = shape
        .children()
        .find(|node| node.has_tag_name((DC, "Bounds")))
        .unwrap();
    let attr = |name: &str| bounds.attribute(name).unwrap().parse::<f32>().unwrap();
    (attr("x"), attr("y"), attr("width"), attr("height"))
}

fn waypoints(doc: &Document, flow_id: &str) -> Vec<(i64, i64)> {
    by_id(doc, &format!("{flow_id}_di"))
        .children()
        .filter(|node| node.has_tag_name((DI, "waypoint")))
        .map(|node| {
            (
                node.attribute("x").unwrap().parse().unwrap(),
                node.attribute("y").unwrap().parse().unwrap(),
            )
        })
        .collect()
}

fn child_texts<'a>(node: Node<'a, '_>, name: &str) -> Vec<&'a str> {
    node.children()
        .filter(|child| child.has_tag_name((BPMN, name)))
        .filter_map(|child| child.text())
        .collect()
}

#[test]
fn test_linear_process() {
    let xml = convert(&sheet(&[
        "1,Page,,,,",
        "2,Terminator,Start,,,",
        "3,Process,Task,,,",
        "4,Terminator,End,,,",
        "5,Line,,,2,3",
        "6,Line,,,3,4",
    ]))
    .unwrap();
    let doc = Document::parse(&xml).unwrap();

    assert_eq!(elements(&doc, BPMN, "startEvent").len(), 1);
    assert_eq!(elements(&doc, BPMN, "task").len(), 1);
    assert_eq!(elements(&doc, BPMN, "endEvent").len(), 1);
    assert_eq!(elements(&doc, BPMN, "sequenceFlow").len(), 2);
    assert_eq!(elements(&doc, BPMNDI, "BPMNShape").len(), 3);
    assert_eq!(elements(&doc, BPMNDI, "BPMNEdge").len(), 2);

    assert_eq!(bounds(&doc, "Shape_2"), (100.0, 25.0, 36.0, 36.0));
    assert_eq!(bounds(&doc, "Shape_3"), (350.0, 25.0, 100.0, 80.0));
    assert_eq!(bounds(&doc, "Shape_4"), (600.0, 25.0, 36.0, 36.0));

    assert_eq!(waypoints(&doc, "Flow_5"), [(136, 43), (350, 65)]);
    assert_eq!(waypoints(&doc, "Flow_6"), [(450, 65), (600, 43)]);

    let task = by_id(&doc, "Shape_3");
    assert_eq!(task.attribute("name"), Some("Task"));
    assert_eq!(child_texts(task, "incoming"), ["Flow_5"]);
    assert_eq!(child_texts(task, "outgoing"), ["Flow_6"]);

    let flow = by_id(&doc, "Flow_5");
    assert_eq!(flow.attribute("sourceRef"), Some("Shape_2"));
    assert_eq!(flow.attribute("targetRef"), Some("Shape_3"));
}

#[test]
fn test_root_attributes() {
    let xml = convert(&sheet(&["1,Process,Only,,,"])).unwrap();
    let doc = Document::parse(&xml).unwrap();

    let root = doc.root_element();
    assert!(root.has_tag_name((BPMN, "definitions")));
    assert_eq!(root.attribute("id"), Some("Definitions_1"));
    assert_eq!(
        root.attribute("targetNamespace"),
        Some("http://bpmn.io/schema/bpmn")
    );
    for prefix in ["xsi", "bpmn", "bpmndi", "dc", "di", "custom"] {
        assert!(root.lookup_namespace_uri(Some(prefix)).is_some(), "{prefix}");
    }

    let process = by_id(&doc, "Process_1");
    assert_eq!(process.attribute("isExecutable"), Some("false"));
    let plane = by_id(&doc, "BPMNPlane_1");
    assert_eq!(plane.attribute("bpmnElement"), Some("Process_1"));
}

#[test]
fn test_dangling_connector_is_dropped() {
    let conversion = DocumentBuilder::default()
        .build(&sheet(&[
            "1,Terminator,Start,,,",
            "2,Process,Task,,,",
            "3,Line,,,1,2",
            "4,Line,,,2,99",
        ]))
        .unwrap();

    assert_eq!(conversion.document().shapes().len(), 2);
    assert_eq!(conversion.warnings().len(), 1);
    let warning = &conversion.warnings()[0];
    assert_eq!(warning.code(), Some(ErrorCode::E200));
    assert!(warning.severity().is_warning());

    let xml = DocumentBuilder::default()
        .render_xml(conversion.document())
        .unwrap();
    let doc = Document::parse(&xml).unwrap();

    assert_eq!(elements(&doc, BPMN, "sequenceFlow").len(), 1);
    assert_eq!(elements(&doc, BPMNDI, "BPMNEdge").len(), 1);
    assert!(!xml.contains("Flow_4"));
    assert_eq!(child_texts(by_id(&doc, "Shape_2"), "incoming"), ["Flow_3"]);
    assert!(child_texts(by_id(&doc, "Shape_2"), "outgoing").is_empty());
}

#[test]
fn test_unconnected_tasks_share_a_column() {
    let xml = convert(&sheet(&["1,Process,A,,,", "2,Process,B,,,"])).unwrap();
    let doc = Document::parse(&xml).unwrap();

    let (x1, y1, ..) = bounds(&doc, "Shape_1");
    let (x2, y2, ..) = bounds(&doc, "Shape_2");
    assert_eq!(x1, 100.0);
    assert_eq!(x2, 100.0);
    assert_eq!(y2 - y1, 150.0);
    assert!(elements(&doc, BPMN, "sequenceFlow").is_empty());
}

#[test]
fn test_unparseable_input() {
    for source in ["", "\n\n", HEADER] {
        let err = convert(source).unwrap_err();
        assert!(matches!(err, FlowsheetError::Parse { .. }), "{source:?}");
    }
}

#[test]
fn test_custom_properties() {
    let xml = convert(&sheet(&[
        "1,Process,Pay,[Owner: Finance; Input: amount = 100] [Due Date: \"Friday\"],,",
        "2,Process,Ship,note [broken,,",
    ]))
    .unwrap();
    let doc = Document::parse(&xml).unwrap();

    let pay = by_id(&doc, "Shape_1");
    assert_eq!(pay.attribute((CUSTOM, "Owner")), Some("Finance"));
    assert_eq!(pay.attribute((CUSTOM, "Input")), Some("amount=100"));
    assert_eq!(pay.attribute((CUSTOM, "Due_Date")), Some("Friday"));

    let ship = by_id(&doc, "Shape_2");
    assert_eq!(
        ship.attributes().filter(|attr| attr.namespace() == Some(CUSTOM)).count(),
        0
    );
}

#[test]
fn test_unclosed_annotation_keeps_complete_groups() {
    let builder = DocumentBuilder::default();
    let conversion = builder
        .build(&sheet(&["1,Process,Pay,[Owner: Finance] [Team: Ops,,"]))
        .unwrap();
    let xml = builder.render_xml(conversion.document()).unwrap();
    let doc = Document::parse(&xml).unwrap();

    let pay = by_id(&doc, "Shape_1");
    assert_eq!(pay.attribute((CUSTOM, "Owner")), Some("Finance"));
    assert_eq!(pay.attribute((CUSTOM, "Team")), None);
    assert_eq!(conversion.warnings()[0].code(), Some(ErrorCode::E201));
}

#[test]
fn test_labels_are_escaped() {
    let xml = convert(&sheet(&[
        "1,Terminator,Tom & \"Jerry\" <3,,,",
        "2,Decision,It's ok?,,,",
        "3,Line,a<b,,1,2",
    ]))
    .unwrap();
    let doc = Document::parse(&xml).unwrap();

    assert_eq!(
        by_id(&doc, "Shape_1").attribute("name"),
        Some("Tom & \"Jerry\" <3")
    );
    assert_eq!(by_id(&doc, "Shape_2").attribute("name"), Some("It's ok?"));
    assert_eq!(by_id(&doc, "Flow_3").attribute("name"), Some("a<b"));
}

#[test]
fn test_shape_kinds() {
    let xml = convert(&sheet(&[
        "1,Terminator,Begin,,,",
        "2,Decision,Check,,,",
        "3,Note,Remember,,,",
        "4,Cloud,Other,,,",
        "5,Document,,,,",
        "6,Terminator,Finish,,,",
    ]))
    .unwrap();
    let doc = Document::parse(&xml).unwrap();

    assert!(by_id(&doc, "Shape_1").has_tag_name((BPMN, "startEvent")));
    assert!(by_id(&doc, "Shape_2").has_tag_name((BPMN, "exclusiveGateway")));
    assert!(by_id(&doc, "Shape_3").has_tag_name((BPMN, "textAnnotation")));
    assert_eq!(by_id(&doc, "Shape_4").tag_name().name(), "unknown");
    assert!(by_id(&doc, "Shape_6").has_tag_name((BPMN, "endEvent")));
    assert_eq!(elements(&doc, BPMNDI, "BPMNShape").len(), 5);

    assert_eq!(bounds(&doc, "Shape_2").2, 50.0);
    assert_eq!(bounds(&doc, "Shape_3"), (100.0, -275.0 + 150.0 * 2.0, 120.0, 30.0));
}

#[test]
fn test_duplicate_shape_row_is_skipped() {
    let conversion = DocumentBuilder::default()
        .build(&sheet(&["1,Process,First,,,", "1,Process,Second,,,"]))
        .unwrap();

    assert_eq!(conversion.document().shapes().len(), 1);
    assert_eq!(conversion.document().shapes()[0].label(), "First");
    assert_eq!(conversion.warnings()[0].code(), Some(ErrorCode::E202));
}

#[test]
fn test_adaptive_anchors_for_vertical_edges() {
    let source = sheet(&[
        "1,Process,Root,,,",
        "2,Process,A,,,",
        "3,Process,B,,,",
        "4,Line,,,1,2",
        "5,Line,,,1,3",
        "6,Line,,,2,3",
    ]);
    let config = AppConfig::new(
        LayoutConfig::default().with_anchor_mode(AnchorMode::Adaptive),
        Default::default(),
    );

    let adaptive = DocumentBuilder::new(config).convert(&source).unwrap();
    let horizontal = convert(&source).unwrap();

    // Shapes 2 and 3 share column 1 at y = -50 and y = 100.
    let doc = Document::parse(&adaptive).unwrap();
    assert_eq!(waypoints(&doc, "Flow_6"), [(400, 30), (400, 100)]);
    let doc = Document::parse(&horizontal).unwrap();
    assert_eq!(waypoints(&doc, "Flow_6"), [(450, -10), (350, 140)]);
}

#[test]
fn test_conversion_is_deterministic() {
    let source = sheet(&[
        "1,Terminator,Start,,,",
        "2,Decision,Ok?,,,",
        "3,Process,Yes,,,",
        "4,Process,No,,,",
        "5,Line,,,1,2",
        "6,Line,yes,,2,3",
        "7,Line,no,,2,4",
    ]);

    assert_eq!(convert(&source).unwrap(), convert(&source).unwrap());
}
