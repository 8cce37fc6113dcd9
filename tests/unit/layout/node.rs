use super::*;
use crate::foundation::core::Plane;
use crate::layout::recording::RecordingSolver;

fn tree_with_root(solver: &mut RecordingSolver) -> LayoutTree<usize> {
    let root = solver.create_node().unwrap();
    LayoutTree::new(LayoutNode::new(root, FlexProps::new(), SceneHandle(0)))
}

fn add(tree: &mut LayoutTree<usize>, solver: &mut RecordingSolver, handle: u32) -> BoxId {
    let n = solver.create_node().unwrap();
    tree.insert(LayoutNode::new(n, FlexProps::new(), SceneHandle(handle)))
}

#[test]
fn attach_appends_in_insertion_order() {
    let mut solver = RecordingSolver::default();
    let mut tree = tree_with_root(&mut solver);
    let a = add(&mut tree, &mut solver, 1);
    let b = add(&mut tree, &mut solver, 2);
    let root = tree.root();
    tree.attach(&mut solver, a, root).unwrap();
    tree.attach(&mut solver, b, root).unwrap();

    assert_eq!(tree.node(root).unwrap().children(), &[a, b]);
    assert_eq!(solver.children[0], vec![1, 2]);
    assert_eq!(tree.node(b).unwrap().parent(), Some(root));
    assert_eq!(tree.walk(), vec![root, a, b]);
}

#[test]
fn attaching_twice_is_a_tree_error() {
    let mut solver = RecordingSolver::default();
    let mut tree = tree_with_root(&mut solver);
    let a = add(&mut tree, &mut solver, 1);
    let root = tree.root();
    tree.attach(&mut solver, a, root).unwrap();
    let err = tree.attach(&mut solver, a, root).unwrap_err();
    assert!(matches!(err, FlexError::Tree(_)));
    assert_eq!(solver.child_count(0), 1);
}

#[test]
fn attach_rejects_cycles() {
    let mut solver = RecordingSolver::default();
    let mut tree = tree_with_root(&mut solver);
    let a = add(&mut tree, &mut solver, 1);
    let b = add(&mut tree, &mut solver, 2);
    tree.attach(&mut solver, a, tree.root()).unwrap();
    tree.attach(&mut solver, b, a).unwrap();
    tree.detach(&mut solver, a).unwrap();
    assert!(tree.attach(&mut solver, a, b).is_err());
}

#[test]
fn detach_twice_leaves_parent_unchanged() {
    let mut solver = RecordingSolver::default();
    let mut tree = tree_with_root(&mut solver);
    let a = add(&mut tree, &mut solver, 1);
    let b = add(&mut tree, &mut solver, 2);
    let root = tree.root();
    tree.attach(&mut solver, a, root).unwrap();
    tree.attach(&mut solver, b, root).unwrap();

    assert!(tree.detach(&mut solver, a).unwrap());
    assert_eq!(solver.child_count(0), 1);
    assert!(!tree.detach(&mut solver, a).unwrap());
    assert_eq!(solver.child_count(0), 1);
    assert_eq!(tree.node(root).unwrap().children(), &[b]);
}

#[test]
fn measure_writes_main_and_cross_extents() {
    let mut solver = RecordingSolver::default();
    let mut tree = tree_with_root(&mut solver);
    let a = add(&mut tree, &mut solver, 1);
    tree.attach(&mut solver, a, tree.root()).unwrap();

    let bounds = Aabb3::from_center_size(Vec3::ZERO, Vec3::new(2.0, 3.0, 4.0));
    assert!(
        tree.measure_self(&mut solver, a, bounds, Plane::Xz.axes())
            .unwrap()
    );
    assert_eq!(solver.intrinsic[&1], (2.0, 4.0));
    assert_eq!(
        tree.node(a).unwrap().content_size(),
        Some(Vec3::new(2.0, 3.0, 4.0))
    );
    assert!(
        !tree
            .measure_self(&mut solver, a, bounds, Plane::Xz.axes())
            .unwrap()
    );
}

#[test]
fn containers_are_not_measured() {
    let mut solver = RecordingSolver::default();
    let mut tree = tree_with_root(&mut solver);
    let a = add(&mut tree, &mut solver, 1);
    let b = add(&mut tree, &mut solver, 2);
    tree.attach(&mut solver, a, tree.root()).unwrap();
    tree.attach(&mut solver, b, a).unwrap();

    let bounds = Aabb3::from_center_size(Vec3::ZERO, Vec3::ONE);
    assert!(
        !tree
            .measure_self(&mut solver, a, bounds, AxisMapping::default())
            .unwrap()
    );
    assert!(solver.intrinsic.is_empty());
}

#[test]
fn remove_releases_the_subtree() {
    let mut solver = RecordingSolver::default();
    let mut tree = tree_with_root(&mut solver);
    let a = add(&mut tree, &mut solver, 1);
    let b = add(&mut tree, &mut solver, 2);
    let root = tree.root();
    tree.attach(&mut solver, a, root).unwrap();
    tree.attach(&mut solver, b, a).unwrap();

    assert!(tree.remove(&mut solver, a).unwrap());
    assert!(tree.get(a).is_none());
    assert!(tree.get(b).is_none());
    assert_eq!(solver.child_count(0), 0);
    let mut released = solver.released.clone();
    released.sort();
    assert_eq!(released, vec![1, 2]);

    assert!(!tree.remove(&mut solver, a).unwrap());
    assert!(tree.remove(&mut solver, root).is_err());
}

#[test]
fn removed_slots_are_reused() {
    let mut solver = RecordingSolver::default();
    let mut tree = tree_with_root(&mut solver);
    let root = tree.root();
    let a = add(&mut tree, &mut solver, 1);
    let b = add(&mut tree, &mut solver, 2);
    tree.attach(&mut solver, a, root).unwrap();
    tree.attach(&mut solver, b, a).unwrap();
    assert_eq!(tree.subtree(a), vec![a, b]);

    tree.remove(&mut solver, a).unwrap();
    let slots = tree.nodes.len();
    for _ in 0..4 {
        let c = add(&mut tree, &mut solver, 3);
        tree.attach(&mut solver, c, root).unwrap();
        assert!(c == a || c == b);
        tree.remove(&mut solver, c).unwrap();
    }
    assert_eq!(tree.nodes.len(), slots);

    let c = add(&mut tree, &mut solver, 3);
    let d = add(&mut tree, &mut solver, 4);
    let e = add(&mut tree, &mut solver, 5);
    assert_eq!(tree.nodes.len(), slots + 1);
    assert_eq!(tree.node(e).unwrap().target(), SceneHandle(5));
    assert_ne!(c, d);
}

#[test]
fn container_bounds_skip_the_solver() {
    let mut solver = RecordingSolver::default();
    let mut tree = tree_with_root(&mut solver);
    let a = add(&mut tree, &mut solver, 1);
    let b = add(&mut tree, &mut solver, 2);
    tree.attach(&mut solver, a, tree.root()).unwrap();
    tree.attach(&mut solver, b, a).unwrap();

    let bounds = Aabb3::from_center_size(Vec3::ZERO, Vec3::new(6.0, 4.0, 1.0));
    assert!(tree.record_bounds(a, bounds).unwrap());
    assert!(!tree.record_bounds(a, bounds).unwrap());
    assert_eq!(
        tree.node(a).unwrap().content_size(),
        Some(Vec3::new(6.0, 4.0, 1.0))
    );
    assert!(solver.intrinsic.is_empty());
}
