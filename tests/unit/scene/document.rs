use super::*;

const DOC: &str = r#"{
    "root": {
        "size": [12, 8, 2],
        "plane": "xy",
        "props": { "flexDirection": "column", "alignItems": "flex-start", "p": 1 }
    },
    "boxes": [
        { "id": "title", "content": [6, 1, 0.2] },
        {
            "id": "row",
            "props": { "flexDirection": "row", "gap": 0.5 },
            "children": [
                { "id": "a", "content": { "x": 2, "y": 2, "z": 0 } },
                { "id": "b", "content": [3, 1, 0] }
            ]
        }
    ]
}"#;

#[test]
fn mounts_boxes_in_document_order() {
    let doc = SceneDocument::from_reader(DOC.as_bytes()).unwrap();
    let mut mounted = doc.mount().unwrap();
    let names: Vec<_> = mounted
        .named_boxes()
        .iter()
        .map(|(n, _)| n.as_str())
        .collect();
    assert_eq!(names, vec!["title", "row", "a", "b"]);

    let report = mounted.reflow().unwrap();
    assert_eq!(report.positioned, 4);

    let layouts = mounted.layouts();
    let rect = |name: &str| layouts.iter().find(|l| l.id == name).unwrap().rect;
    assert_eq!((rect("title").left, rect("title").top), (1.0, 1.0));
    assert_eq!((rect("row").left, rect("row").top), (1.0, 2.0));
    assert_eq!(rect("row").width, 5.5);
    assert_eq!(rect("b").left, 2.5);
    assert_eq!(report.extent.width, 7.0);
    assert_eq!(report.extent.height, 4.0);
}

#[test]
fn duplicate_ids_are_rejected() {
    let doc = SceneDocument::from_reader(
        r#"{ "root": { "size": [1, 1, 1] }, "boxes": [ { "id": "x" }, { "id": "x" } ] }"#
            .as_bytes(),
    )
    .unwrap();
    let err = doc.mount().err().unwrap();
    assert!(matches!(err, FlexError::Config(_)));
}

#[test]
fn bad_content_and_unknown_fields_are_errors() {
    let doc = SceneDocument::from_reader(
        r#"{ "root": { "size": [1, 1, 1] }, "boxes": [ { "id": "x", "content": [-1, 1, 1] } ] }"#
            .as_bytes(),
    )
    .unwrap();
    assert!(doc.mount().is_err());

    let err = SceneDocument::from_reader(r#"{ "root": { "size": [1, 1, 1], "colour": 1 } }"#.as_bytes())
        .unwrap_err();
    assert!(matches!(err, FlexError::Serde(_)));

    let err = SceneDocument::from_reader(
        r#"{ "root": { "size": [1, 1, 1] }, "boxes": [ { "id": "x", "props": { "flexDirektion": "row" } } ] }"#
            .as_bytes(),
    )
    .unwrap_err();
    assert!(err.to_string().contains("flexDirektion"));
}
