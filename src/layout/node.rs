//! Layout Node Wrapper: the arena of boxes mirroring the solver tree.

use serde::Serialize;

use crate::foundation::core::{Aabb3, AxisMapping, Vec3};
use crate::foundation::error::{FlexError, FlexResult};
use crate::layout::props::FlexProps;
use crate::layout::solver::LayoutSolver;
use crate::scene::graph::SceneHandle;

/// Stable identifier of a box inside one [`crate::FlexRoot`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct BoxId(pub(crate) u32);

impl BoxId {
    /// Raw index of the box.
    pub fn index(self) -> u32 {
        self.0
    }
}

/// One flex container: its solver node, tree links and the scene node it positions.
#[derive(Clone, Debug)]
pub struct LayoutNode<N> {
    pub(crate) solver_node: N,
    pub(crate) parent: Option<BoxId>,
    pub(crate) children: Vec<BoxId>,
    pub(crate) props: FlexProps,
    pub(crate) target: SceneHandle,
    pub(crate) content_size: Option<Vec3>,
}

impl<N> LayoutNode<N> {
    pub(crate) fn new(solver_node: N, props: FlexProps, target: SceneHandle) -> Self {
        Self {
            solver_node,
            parent: None,
            children: Vec::new(),
            props,
            target,
            content_size: None,
        }
    }

    /// Parent box, `None` for the root and for detached boxes.
    pub fn parent(&self) -> Option<BoxId> {
        self.parent
    }

    /// Layout children in solver order.
    pub fn children(&self) -> &[BoxId] {
        &self.children
    }

    /// Options this box was configured with.
    pub fn props(&self) -> &FlexProps {
        &self.props
    }

    /// Scene node positioned by this box.
    pub fn target(&self) -> SceneHandle {
        self.target
    }

    /// Last measured content size. Recorded for leaves, and for `centerAnchor` containers
    /// from their rendered bounds.
    pub fn content_size(&self) -> Option<Vec3> {
        self.content_size
    }

    /// A box without layout children is measured from its rendered content.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Arena of [`LayoutNode`]s; slot 0 is always the root.
///
/// Slots of removed boxes are reused by later inserts, so a removed [`BoxId`] may come to name
/// a new box.
#[derive(Clone, Debug)]
pub(crate) struct LayoutTree<N> {
    nodes: Vec<Option<LayoutNode<N>>>,
    free: Vec<u32>,
}

impl<N: Copy + Eq + std::fmt::Debug> LayoutTree<N> {
    pub(crate) fn new(root: LayoutNode<N>) -> Self {
        Self {
            nodes: vec![Some(root)],
            free: Vec::new(),
        }
    }

    pub(crate) fn root(&self) -> BoxId {
        BoxId(0)
    }

    pub(crate) fn insert(&mut self, node: LayoutNode<N>) -> BoxId {
        if let Some(slot) = self.free.pop() {
            self.nodes[slot as usize] = Some(node);
            return BoxId(slot);
        }
        self.nodes.push(Some(node));
        BoxId((self.nodes.len() - 1) as u32)
    }

    pub(crate) fn get(&self, id: BoxId) -> Option<&LayoutNode<N>> {
        self.nodes.get(id.0 as usize).and_then(Option::as_ref)
    }

    pub(crate) fn get_mut(&mut self, id: BoxId) -> Option<&mut LayoutNode<N>> {
        self.nodes.get_mut(id.0 as usize).and_then(Option::as_mut)
    }

    pub(crate) fn node(&self, id: BoxId) -> FlexResult<&LayoutNode<N>> {
        self.get(id)
            .ok_or_else(|| FlexError::tree(format!("unknown box {}", id.0)))
    }

    fn node_mut(&mut self, id: BoxId) -> FlexResult<&mut LayoutNode<N>> {
        self.get_mut(id)
            .ok_or_else(|| FlexError::tree(format!("unknown box {}", id.0)))
    }

    /// Whether `id` is `ancestor` or lies below it.
    pub(crate) fn is_within(&self, id: BoxId, ancestor: BoxId) -> bool {
        let mut cur = Some(id);
        while let Some(c) = cur {
            if c == ancestor {
                return true;
            }
            cur = self.get(c).and_then(|n| n.parent);
        }
        false
    }

    /// Boxes reachable from the root in depth-first pre-order, root first.
    pub(crate) fn walk(&self) -> Vec<BoxId> {
        let mut out = Vec::new();
        let mut stack = vec![self.root()];
        while let Some(id) = stack.pop() {
            let Some(node) = self.get(id) else { continue };
            out.push(id);
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }

    /// `id` and every box below it, in depth-first pre-order.
    pub(crate) fn subtree(&self, id: BoxId) -> Vec<BoxId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(cur) = stack.pop() {
            let Some(node) = self.get(cur) else { continue };
            out.push(cur);
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }

    /// Insert `child` as the last child of `parent`, in both trees.
    pub(crate) fn attach<S>(&mut self, solver: &mut S, child: BoxId, parent: BoxId) -> FlexResult<()>
    where
        S: LayoutSolver<Node = N>,
    {
        if child == self.root() {
            return Err(FlexError::tree("the root box cannot be attached"));
        }
        let child_node = self.node(child)?;
        if let Some(p) = child_node.parent {
            return Err(FlexError::tree(format!(
                "box {} is already attached to box {}",
                child.0, p.0
            )));
        }
        let child_solver = child_node.solver_node;
        if self.is_within(parent, child) {
            return Err(FlexError::tree(format!(
                "attaching box {} under box {} would create a cycle",
                child.0, parent.0
            )));
        }
        let parent_node = self.node(parent)?;
        let index = parent_node.children.len();
        solver.insert_child(parent_node.solver_node, child_solver, index)?;

        self.node_mut(parent)?.children.push(child);
        self.node_mut(child)?.parent = Some(parent);
        Ok(())
    }

    /// Remove `child` from its parent. Returns `false` when it was not attached.
    pub(crate) fn detach<S>(&mut self, solver: &mut S, child: BoxId) -> FlexResult<bool>
    where
        S: LayoutSolver<Node = N>,
    {
        let child_node = self.node(child)?;
        let Some(parent) = child_node.parent else {
            return Ok(false);
        };
        let child_solver = child_node.solver_node;
        let parent_solver = self.node(parent)?.solver_node;
        solver.remove_child(parent_solver, child_solver)?;

        self.node_mut(parent)?.children.retain(|c| *c != child);
        self.node_mut(child)?.parent = None;
        Ok(true)
    }

    /// Feed a leaf's rendered bounds to the solver as its intrinsic size.
    ///
    /// Returns whether the measured size changed. Containers are sized by their children and
    /// are left alone.
    pub(crate) fn measure_self<S>(
        &mut self,
        solver: &mut S,
        id: BoxId,
        bounds: Aabb3,
        axes: AxisMapping,
    ) -> FlexResult<bool>
    where
        S: LayoutSolver<Node = N>,
    {
        let node = self.node_mut(id)?;
        if !node.is_leaf() {
            return Ok(false);
        }
        let size = bounds.size();
        if node.content_size == Some(size) {
            return Ok(false);
        }
        let (width, height) = (axes.main().of(size), axes.cross().of(size));
        solver.set_intrinsic_size(node.solver_node, width, height)?;
        node.content_size = Some(size);
        tracing::trace!(box_id = id.0, width, height, "measured leaf");
        Ok(true)
    }

    /// Store a container's rendered size for projection only; the solver keeps sizing it from
    /// its children. Returns whether the size changed.
    pub(crate) fn record_bounds(&mut self, id: BoxId, bounds: Aabb3) -> FlexResult<bool> {
        let node = self.node_mut(id)?;
        let size = bounds.size();
        if node.content_size == Some(size) {
            return Ok(false);
        }
        node.content_size = Some(size);
        tracing::trace!(box_id = id.0, %size, "recorded container bounds");
        Ok(true)
    }

    /// Detach `id` and release it together with its whole subtree.
    ///
    /// Returns `false` when the box was already removed.
    pub(crate) fn remove<S>(&mut self, solver: &mut S, id: BoxId) -> FlexResult<bool>
    where
        S: LayoutSolver<Node = N>,
    {
        if id == self.root() {
            return Err(FlexError::tree("the root box cannot be removed"));
        }
        if self.get(id).is_none() {
            return Ok(false);
        }
        self.detach(solver, id)?;

        let mut stack = vec![id];
        while let Some(cur) = stack.pop() {
            let Some(node) = self.nodes.get_mut(cur.0 as usize).and_then(Option::take) else {
                continue;
            };
            stack.extend(node.children.iter().copied());
            self.free.push(cur.0);
            solver.release_node(node.solver_node)?;
        }
        Ok(true)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/node.rs"]
mod tests;
