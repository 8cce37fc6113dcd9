use super::*;

fn sized_root(solver: &mut TaffySolver, w: f32, h: f32) -> NodeId {
    let root = solver.create_node().unwrap();
    solver
        .set_property(root, LayoutProperty::Width(DimensionProp::Points(w)))
        .unwrap();
    solver
        .set_property(root, LayoutProperty::Height(DimensionProp::Points(h)))
        .unwrap();
    root
}

#[test]
fn intrinsic_size_drives_auto_leaf() {
    let mut solver = TaffySolver::new();
    let root = sized_root(&mut solver, 20.0, 10.0);
    solver
        .set_property(
            root,
            LayoutProperty::AlignItems(AlignItemsProp::FlexStart),
        )
        .unwrap();
    let leaf = solver.create_node().unwrap();
    solver.insert_child(root, leaf, 0).unwrap();
    solver.set_intrinsic_size(leaf, 3.5, 1.25).unwrap();

    solver.calculate_layout(root, 20.0, 10.0).unwrap();
    let rect = solver.computed_layout(leaf).unwrap();
    assert_eq!(
        rect,
        ComputedRect {
            left: 0.0,
            top: 0.0,
            width: 3.5,
            height: 1.25,
        }
    );
}

#[test]
fn explicit_size_wins_over_intrinsic() {
    let mut solver = TaffySolver::new();
    let root = sized_root(&mut solver, 20.0, 10.0);
    solver
        .set_property(
            root,
            LayoutProperty::AlignItems(AlignItemsProp::FlexStart),
        )
        .unwrap();
    let leaf = solver.create_node().unwrap();
    solver.insert_child(root, leaf, 0).unwrap();
    solver.set_intrinsic_size(leaf, 3.0, 3.0).unwrap();
    solver
        .set_property(leaf, LayoutProperty::Width(DimensionProp::Points(5.0)))
        .unwrap();

    solver.calculate_layout(root, 20.0, 10.0).unwrap();
    let rect = solver.computed_layout(leaf).unwrap();
    assert_eq!(rect.width, 5.0);
    assert_eq!(rect.height, 3.0);
}

#[test]
fn edge_selectors_override_in_order() {
    let mut solver = TaffySolver::new();
    let root = sized_root(&mut solver, 20.0, 10.0);
    solver
        .set_property(root, LayoutProperty::Padding(Edge::All, 1.0))
        .unwrap();
    solver
        .set_property(root, LayoutProperty::Padding(Edge::Left, 4.0))
        .unwrap();
    solver
        .set_property(
            root,
            LayoutProperty::AlignItems(AlignItemsProp::FlexStart),
        )
        .unwrap();
    let leaf = solver.create_node().unwrap();
    solver.insert_child(root, leaf, 0).unwrap();
    solver.set_intrinsic_size(leaf, 1.0, 1.0).unwrap();

    solver.calculate_layout(root, 20.0, 10.0).unwrap();
    let rect = solver.computed_layout(leaf).unwrap();
    assert_eq!((rect.left, rect.top), (4.0, 1.0));
}

#[test]
fn percent_width_resolves_against_parent() {
    let mut solver = TaffySolver::new();
    let root = sized_root(&mut solver, 20.0, 10.0);
    let leaf = solver.create_node().unwrap();
    solver.insert_child(root, leaf, 0).unwrap();
    solver
        .set_property(leaf, LayoutProperty::Width(DimensionProp::Percent(50.0)))
        .unwrap();

    solver.calculate_layout(root, 20.0, 10.0).unwrap();
    assert_eq!(solver.computed_layout(leaf).unwrap().width, 10.0);
}

#[test]
fn invalid_numbers_are_solver_errors() {
    let mut solver = TaffySolver::new();
    let node = solver.create_node().unwrap();
    let err = solver
        .set_property(node, LayoutProperty::Width(DimensionProp::Points(-1.0)))
        .unwrap_err();
    assert!(matches!(err, FlexError::Solver(_)));
    let err = solver
        .set_property(node, LayoutProperty::Margin(Edge::Top, f32::NAN))
        .unwrap_err();
    assert!(matches!(err, FlexError::Solver(_)));
    assert!(solver.set_intrinsic_size(node, f32::INFINITY, 1.0).is_err());
    assert!(solver.calculate_layout(node, -5.0, 1.0).is_err());
}

#[test]
fn remove_child_updates_child_count() {
    let mut solver = TaffySolver::new();
    let root = solver.create_node().unwrap();
    let a = solver.create_node().unwrap();
    let b = solver.create_node().unwrap();
    solver.insert_child(root, a, 0).unwrap();
    solver.insert_child(root, b, 1).unwrap();
    assert_eq!(solver.child_count(root), 2);
    solver.remove_child(root, a).unwrap();
    assert_eq!(solver.child_count(root), 1);
    solver.release_node(a).unwrap();
    assert_eq!(solver.total_node_count(), 2);
}
