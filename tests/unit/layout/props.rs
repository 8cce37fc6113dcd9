use super::*;
use crate::layout::recording::RecordingSolver;

#[test]
fn margin_is_scaled_before_reaching_the_solver() {
    let props = FlexProps::new().with("marginLeft", 2.0).unwrap();
    let mut solver = RecordingSolver::default();
    let node = solver.create_node().unwrap();
    apply_props(&mut solver, node, &props, 0.5).unwrap();
    assert_eq!(
        solver.properties_of(node),
        vec![LayoutProperty::Margin(Edge::Left, 1.0)]
    );
}

#[test]
fn direction_string_becomes_enum() {
    let props = FlexProps::new().with("flexDirection", "column").unwrap();
    let mut solver = RecordingSolver::default();
    let node = solver.create_node().unwrap();
    apply_props(&mut solver, node, &props, 1.0).unwrap();
    assert_eq!(
        solver.properties_of(node),
        vec![LayoutProperty::FlexDirection(FlexDirection::Column)]
    );
}

#[test]
fn aliases_resolve_to_the_same_key() {
    for name in ["flexDirection", "flex-direction", "flexDir", "dir"] {
        assert_eq!(PropKey::from_str(name).unwrap(), PropKey::FlexDirection);
    }
    assert_eq!(PropKey::from_str("mt").unwrap(), PropKey::Margin(Edge::Top));
    assert_eq!(
        PropKey::from_str("px").unwrap(),
        PropKey::Padding(Edge::Horizontal)
    );
    assert_eq!(
        PropKey::from_str("justify").unwrap(),
        PropKey::JustifyContent
    );
}

#[test]
fn unknown_keys_are_rejected() {
    let err = FlexProps::new().with("flexDirektion", "row").unwrap_err();
    assert!(matches!(err, FlexError::Config(_)));
    assert!(err.to_string().contains("flexDirektion"));
}

#[test]
fn value_kinds_are_checked_per_key() {
    assert!(FlexProps::new().with("centerAnchor", true).is_ok());
    assert!(FlexProps::new().with("centerAnchor", 1.0).is_err());
    assert!(FlexProps::new().with("flexGrow", true).is_err());
    assert!(FlexProps::new().with("flexDirection", 2.0).is_err());
    assert!(FlexProps::new().with("margin", "auto").is_err());
    assert!(FlexProps::new().with("alignItems", "sideways").is_err());
}

#[test]
fn booleans_and_factors_are_never_scaled() {
    let props = FlexProps::new()
        .with("centerAnchor", true)
        .unwrap()
        .with("flexGrow", 1.0)
        .unwrap()
        .with("flexShrink", 2.0)
        .unwrap();
    let calls = layout_properties(&props, 10.0);
    assert_eq!(
        calls,
        vec![LayoutProperty::FlexGrow(1.0), LayoutProperty::FlexShrink(2.0)]
    );
    assert!(props.center_anchor);
}

#[test]
fn dimensions_parse_auto_percent_and_points() {
    let props = FlexProps::new()
        .with("width", "100%")
        .unwrap()
        .with("height", "auto")
        .unwrap()
        .with("minHeight", 3.0)
        .unwrap()
        .with("maxWidth", "6")
        .unwrap();
    let calls = layout_properties(&props, 2.0);
    assert_eq!(
        calls,
        vec![
            LayoutProperty::Width(Dimension::Percent(100.0)),
            LayoutProperty::Height(Dimension::Auto),
            LayoutProperty::MinHeight(Dimension::Points(6.0)),
            LayoutProperty::MaxWidth(Dimension::Points(12.0)),
        ]
    );
}

#[test]
fn shorthand_edges_are_applied_before_specific_edges() {
    let props = FlexProps::new()
        .with("mt", 3.0)
        .unwrap()
        .with("margin", 1.0)
        .unwrap()
        .with("mx", 2.0)
        .unwrap();
    let calls = layout_properties(&props, 1.0);
    assert_eq!(
        calls,
        vec![
            LayoutProperty::Margin(Edge::All, 1.0),
            LayoutProperty::Margin(Edge::Horizontal, 2.0),
            LayoutProperty::Margin(Edge::Top, 3.0),
        ]
    );
}

#[test]
fn deserializes_from_json_object() {
    let props: FlexProps = serde_json::from_str(
        r#"{
            "flexDirection": "row",
            "flexWrap": "wrap",
            "justifyContent": "space-between",
            "alignItems": "flex-end",
            "p": 0.5,
            "centerAnchor": true
        }"#,
    )
    .unwrap();
    assert_eq!(props.flex_direction, Some(FlexDirection::Row));
    assert_eq!(props.flex_wrap, Some(FlexWrap::Wrap));
    assert_eq!(props.justify_content, Some(JustifyContent::SpaceBetween));
    assert_eq!(props.align_items, Some(AlignItems::FlexEnd));
    assert_eq!(props.padding.all, Some(0.5));
    assert!(props.center_anchor);

    let err = serde_json::from_str::<FlexProps>(r#"{ "colour": "red" }"#).unwrap_err();
    assert!(err.to_string().contains("colour"));
}

#[test]
fn projection_options_never_reach_the_solver() {
    let props = FlexProps::new()
        .with("depthOffset", 4.0)
        .unwrap()
        .with("centerAnchor", true)
        .unwrap();
    assert!(layout_properties(&props, 1.0).is_empty());
    assert_eq!(props.depth_offset, Some(4.0));
}

#[test]
fn keys_report_their_value_kind() {
    assert_eq!(PropKey::Margin(Edge::Left).kind(), ValueKind::Length);
    assert_eq!(PropKey::Width.kind(), ValueKind::Dimension);
    assert_eq!(PropKey::FlexGrow.kind(), ValueKind::Factor);
    assert_eq!(PropKey::CenterAnchor.kind(), ValueKind::Bool);
    assert_eq!(PropKey::Display.kind(), ValueKind::Enum);
}
