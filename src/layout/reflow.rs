//! Reflow Coordinator: owns one flex root and drives measure, resolve and apply.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::foundation::core::{Plane, Vec3, Vec3Def};
use crate::foundation::error::{FlexError, FlexResult};
use crate::layout::node::{BoxId, LayoutNode, LayoutTree};
use crate::layout::projector::{RootContext, project};
use crate::layout::props::{FlexProps, apply_props};
use crate::layout::solver::{ComputedRect, Dimension, LayoutProperty, LayoutSolver};
use crate::layout::taffy_bridge::TaffySolver;
use crate::scene::graph::{SceneGraph, SceneHandle};

fn default_scale() -> f32 {
    1.0
}

/// Configuration of a flex root.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RootConfig {
    /// Overall size along x, y and z.
    pub size: Vec3Def,
    /// Layout plane; decides the main, cross and depth axes.
    #[serde(default)]
    pub plane: Plane,
    /// Corner solved rectangles are measured from; the origin when omitted.
    #[serde(default)]
    pub start: Option<Vec3Def>,
    /// Multiplier applied to every world-unit length in box options.
    #[serde(default = "default_scale")]
    pub scale_factor: f32,
    /// Options of the root container itself.
    #[serde(default)]
    pub props: FlexProps,
}

impl RootConfig {
    /// Root of the given size on the default plane.
    pub fn new(size: Vec3) -> Self {
        Self {
            size: size.into(),
            plane: Plane::default(),
            start: None,
            scale_factor: 1.0,
            props: FlexProps::default(),
        }
    }
}

/// Size of the content laid out under a root, from the root origin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct ContentExtent {
    /// Furthest right edge along the main axis.
    pub width: f32,
    /// Furthest bottom edge along the cross axis.
    pub height: f32,
}

/// Outcome of [`FlexRoot::apply`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ReflowReport {
    /// Number of scene nodes whose position was written.
    pub positioned: usize,
    /// Content extent after this pass.
    pub extent: ContentExtent,
    /// Whether the extent differs from the previously reported one.
    pub changed: bool,
}

/// Resolved placement of one box.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Placement {
    id: BoxId,
    target: SceneHandle,
    rect: ComputedRect,
    local: Vec3,
}

type ReflowListener = Box<dyn FnMut(ContentExtent)>;
type BoxListener = Box<dyn FnMut(ComputedRect)>;

/// A per-box size listener and the size it last saw.
struct BoxWatch {
    id: BoxId,
    reported: Option<(f32, f32)>,
    listener: BoxListener,
}

/// A top-level flex region mapped onto a 3D scene.
///
/// Edits (adding, moving or removing boxes, changing options or the root size) mark the layout
/// stale. [`FlexRoot::measure`] feeds leaf content sizes to the solver, [`FlexRoot::resolve`]
/// solves the tree and computes every position, and [`FlexRoot::apply`] writes them to the
/// scene and notifies reflow listeners. [`FlexRoot::reflow`] runs the three phases in order.
///
/// A [`BoxId`] released by [`FlexRoot::remove_box`] may be handed out again by a later
/// [`FlexRoot::add_box`].
pub struct FlexRoot<S: LayoutSolver = TaffySolver> {
    solver: S,
    tree: LayoutTree<S::Node>,
    ctx: RootContext,
    scale: f32,
    revision: u64,
    resolved: Option<u64>,
    placements: Vec<Placement>,
    index: HashMap<BoxId, usize>,
    extent: ContentExtent,
    reported: Option<ContentExtent>,
    listeners: Vec<ReflowListener>,
    watches: Vec<BoxWatch>,
}

impl FlexRoot {
    /// Create a root backed by [`TaffySolver`], positioning under scene node `target`.
    pub fn new(config: RootConfig, target: SceneHandle) -> FlexResult<Self> {
        Self::with_solver(TaffySolver::new(), config, target)
    }
}

impl<S: LayoutSolver> FlexRoot<S> {
    /// Create a root over an arbitrary solver.
    pub fn with_solver(mut solver: S, config: RootConfig, target: SceneHandle) -> FlexResult<Self> {
        let scale = config.scale_factor;
        if !scale.is_finite() || scale <= 0.0 {
            return Err(FlexError::config(format!(
                "scale factor must be positive and finite, got {scale}"
            )));
        }
        let ctx = RootContext {
            axes: config.plane.axes(),
            size: validated_size(config.size.into())?,
            start: config.start.map(Vec3::from).unwrap_or(Vec3::ZERO),
        };
        let node = solver.create_node()?;
        let tree = LayoutTree::new(LayoutNode::new(node, config.props, target));

        let mut root = Self {
            solver,
            tree,
            ctx,
            scale,
            revision: 0,
            resolved: None,
            placements: Vec::new(),
            index: HashMap::new(),
            extent: ContentExtent::default(),
            reported: None,
            listeners: Vec::new(),
            watches: Vec::new(),
        };
        root.configure(root.tree.root())?;
        Ok(root)
    }

    /// The root box.
    pub fn root(&self) -> BoxId {
        self.tree.root()
    }

    /// Projection frame of this root.
    pub fn context(&self) -> &RootContext {
        &self.ctx
    }

    /// Look up a live box.
    pub fn node(&self, id: BoxId) -> Option<&LayoutNode<S::Node>> {
        self.tree.get(id)
    }

    /// Boxes attached under the root, depth-first in child order, root first.
    pub fn boxes(&self) -> Vec<BoxId> {
        self.tree.walk()
    }

    /// The underlying solver.
    pub fn solver(&self) -> &S {
        &self.solver
    }

    /// Whether the tree changed since the last successful [`FlexRoot::resolve`].
    pub fn is_stale(&self) -> bool {
        self.resolved != Some(self.revision)
    }

    /// Create a box and append it to `parent`.
    pub fn add_box(
        &mut self,
        parent: BoxId,
        props: FlexProps,
        target: SceneHandle,
    ) -> FlexResult<BoxId> {
        self.tree.node(parent)?;
        let node = self.solver.create_node()?;
        if let Err(e) = apply_props(&mut self.solver, node, &props, self.scale) {
            self.solver.release_node(node)?;
            return Err(e);
        }
        let id = self.tree.insert(LayoutNode::new(node, props, target));
        self.tree.attach(&mut self.solver, id, parent)?;
        self.touch();
        Ok(id)
    }

    /// Append a detached box to `parent`. Attaching an attached box is a tree error.
    pub fn attach(&mut self, id: BoxId, parent: BoxId) -> FlexResult<()> {
        self.tree.attach(&mut self.solver, id, parent)?;
        self.touch();
        Ok(())
    }

    /// Detach a box from its parent; `false` if it was not attached.
    pub fn detach(&mut self, id: BoxId) -> FlexResult<bool> {
        let changed = self.tree.detach(&mut self.solver, id)?;
        if changed {
            self.touch();
        }
        Ok(changed)
    }

    /// Remove a box and its subtree; `false` if it was already removed.
    ///
    /// Size listeners of the removed boxes are dropped.
    pub fn remove_box(&mut self, id: BoxId) -> FlexResult<bool> {
        let gone = self.tree.subtree(id);
        let removed = self.tree.remove(&mut self.solver, id)?;
        if removed {
            self.watches.retain(|w| !gone.contains(&w.id));
            self.touch();
        }
        Ok(removed)
    }

    /// Replace the options of a box.
    ///
    /// Options the solver rejects leave the box on its previous options; the layout is stale
    /// either way.
    pub fn set_props(&mut self, id: BoxId, props: FlexProps) -> FlexResult<()> {
        let node = self
            .tree
            .get_mut(id)
            .ok_or_else(|| FlexError::tree(format!("unknown box {}", id.index())))?;
        let previous = std::mem::replace(&mut node.props, props);
        let outcome = self.configure(id);
        if let Err(e) = &outcome {
            tracing::debug!(box_id = id.index(), error = %e, "box options rejected");
            if let Some(node) = self.tree.get_mut(id) {
                node.props = previous;
            }
            self.configure(id)?;
        }
        self.touch();
        outcome
    }

    /// Resize the root region.
    pub fn set_root_size(&mut self, size: Vec3) -> FlexResult<()> {
        let size = validated_size(size)?;
        let previous = std::mem::replace(&mut self.ctx.size, size);
        let outcome = self.configure(self.root());
        if outcome.is_err() {
            self.ctx.size = previous;
            self.configure(self.root())?;
        }
        self.touch();
        outcome
    }

    /// Register a listener for content extent changes.
    pub fn on_reflow(&mut self, listener: impl FnMut(ContentExtent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Register a listener for the solved size of one box.
    ///
    /// It is called from [`FlexRoot::apply`] with the box's rectangle on the first apply that
    /// positions the box, and again whenever its width or height changes.
    pub fn on_box_reflow(
        &mut self,
        id: BoxId,
        listener: impl FnMut(ComputedRect) + 'static,
    ) -> FlexResult<()> {
        self.tree.node(id)?;
        self.watches.push(BoxWatch {
            id,
            reported: None,
            listener: Box::new(listener),
        });
        Ok(())
    }

    /// Measure every attached leaf from its rendered bounds, and record the bounds of
    /// `centerAnchor` containers for projection. Returns the number of boxes whose size
    /// changed.
    #[tracing::instrument(skip(self, scene))]
    pub fn measure<G: SceneGraph + ?Sized>(&mut self, scene: &G) -> FlexResult<usize> {
        let root = self.root();
        let mut changed = 0;
        for id in self.tree.walk() {
            let node = self.tree.node(id)?;
            if id == root || !(node.is_leaf() || node.props.center_anchor) {
                continue;
            }
            let bounds = scene.bounding_box(node.target)?;
            let resized = if node.is_leaf() {
                self.tree
                    .measure_self(&mut self.solver, id, bounds, self.ctx.axes)?
            } else {
                self.tree.record_bounds(id, bounds)?
            };
            if resized {
                changed += 1;
            }
        }
        if changed > 0 {
            self.touch();
        }
        Ok(changed)
    }

    /// Solve the tree and compute every box position.
    #[tracing::instrument(skip(self))]
    pub fn resolve(&mut self) -> FlexResult<()> {
        let root_node = self.tree.node(self.root())?.solver_node;
        self.solver.calculate_layout(
            root_node,
            self.ctx.main_size(),
            self.ctx.cross_size(),
        )?;
        let (placements, extent) = self.place()?;
        self.index = placements
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id, i))
            .collect();
        self.placements = placements;
        self.extent = extent;
        self.resolved = Some(self.revision);
        Ok(())
    }

    /// Write the resolved positions into `scene`, then notify size listeners of boxes whose size
    /// changed and extent listeners when the content extent changed.
    #[tracing::instrument(skip(self, scene))]
    pub fn apply<G: SceneGraph + ?Sized>(&mut self, scene: &mut G) -> FlexResult<ReflowReport> {
        if self.is_stale() {
            return Err(FlexError::tree(
                "layout is stale; resolve before applying positions",
            ));
        }
        for p in &self.placements {
            scene.set_position(p.target, p.local)?;
        }

        for watch in &mut self.watches {
            let Some(p) = self.index.get(&watch.id).and_then(|i| self.placements.get(*i)) else {
                continue;
            };
            let size = (p.rect.width, p.rect.height);
            if watch.reported != Some(size) {
                watch.reported = Some(size);
                (watch.listener)(p.rect);
            }
        }

        let extent = self.extent;
        let changed = self.reported != Some(extent);
        if changed {
            tracing::debug!(width = extent.width, height = extent.height, "content extent changed");
            self.reported = Some(extent);
            for listener in &mut self.listeners {
                listener(extent);
            }
        }
        Ok(ReflowReport {
            positioned: self.placements.len(),
            extent,
            changed,
        })
    }

    /// Measure, resolve and apply in one pass.
    pub fn reflow<G: SceneGraph + ?Sized>(&mut self, scene: &mut G) -> FlexResult<ReflowReport> {
        self.measure(&*scene)?;
        self.resolve()?;
        self.apply(scene)
    }

    /// Parent-relative solved rectangle; `None` while stale or for unattached boxes.
    pub fn computed_rect(&self, id: BoxId) -> Option<ComputedRect> {
        self.placement(id).map(|p| p.rect)
    }

    /// Local position computed for a box; `None` while stale or for unattached boxes.
    pub fn position(&self, id: BoxId) -> Option<Vec3> {
        self.placement(id).map(|p| p.local)
    }

    /// Content extent of the last resolve; `None` while stale.
    pub fn content_extent(&self) -> Option<ContentExtent> {
        (!self.is_stale()).then_some(self.extent)
    }

    fn placement(&self, id: BoxId) -> Option<&Placement> {
        if self.is_stale() {
            return None;
        }
        self.index.get(&id).and_then(|i| self.placements.get(*i))
    }

    fn touch(&mut self) {
        self.revision += 1;
    }

    /// Push the stored options of `id` into its solver node from a clean style.
    fn configure(&mut self, id: BoxId) -> FlexResult<()> {
        let node = self.tree.node(id)?;
        let solver_node = node.solver_node;
        self.solver.reset_properties(solver_node)?;
        apply_props(&mut self.solver, solver_node, &node.props, self.scale)?;

        if id == self.root() {
            if node.props.width.is_none() {
                self.solver.set_property(
                    solver_node,
                    LayoutProperty::Width(Dimension::Points(self.ctx.main_size())),
                )?;
            }
            if node.props.height.is_none() {
                self.solver.set_property(
                    solver_node,
                    LayoutProperty::Height(Dimension::Points(self.ctx.cross_size())),
                )?;
            }
        }
        Ok(())
    }

    /// Walk the attached tree, accumulating parent offsets, and project every box.
    fn place(&self) -> FlexResult<(Vec<Placement>, ContentExtent)> {
        let mut placements = Vec::new();
        let mut extent = ContentExtent::default();

        // (box, parent's absolute left/top, parent's world position)
        let root = self.tree.node(self.root())?;
        let mut stack: Vec<(BoxId, f32, f32, Vec3)> = root
            .children
            .iter()
            .rev()
            .map(|c| (*c, 0.0, 0.0, Vec3::ZERO))
            .collect();

        while let Some((id, left, top, parent_world)) = stack.pop() {
            let node = self.tree.node(id)?;
            let rect = self.solver.computed_layout(node.solver_node)?;
            let abs = rect.offset(left, top);
            let world = project(abs, &self.ctx, &node.props, node.content_size);

            extent.width = extent.width.max(abs.right());
            extent.height = extent.height.max(abs.bottom());
            placements.push(Placement {
                id,
                target: node.target,
                rect,
                local: world - parent_world,
            });
            stack.extend(
                node.children
                    .iter()
                    .rev()
                    .map(|c| (*c, abs.left, abs.top, world)),
            );
        }
        Ok((placements, extent))
    }
}

fn validated_size(size: Vec3) -> FlexResult<Vec3> {
    if !size.is_finite() || size.min_element() < 0.0 {
        return Err(FlexError::config(format!(
            "root size must be finite and non-negative, got {size}"
        )));
    }
    Ok(size)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/reflow.rs"]
mod tests;
