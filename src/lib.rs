//! flex3d lays out retained 3D scene graphs with flexbox semantics.
//!
//! Every box of a [`FlexRoot`] owns one node of a 2D flex solver (by default [`TaffySolver`]).
//! Leaves are measured from their rendered bounds, the solver resolves the tree, and each solved
//! rectangle is projected into a 3D position along the root's main, cross and depth axes.
//!
//! # Reflow phases
//!
//! 1. **Measure**: rendered bounds of every leaf become its intrinsic size.
//! 2. **Resolve**: the solver computes every rectangle; positions are projected.
//! 3. **Apply**: positions are written to the [`SceneGraph`] and reflow listeners receive the
//!    new [`ContentExtent`] if it changed.
//!
//! Box options are declared with [`FlexProps`], whose keys follow CSS flexbox naming.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;
mod layout;
mod scene;
mod scroll;

pub use foundation::core::{Aabb3, Axis, AxisMapping, Plane, Vec3, Vec3Def};
pub use foundation::error::{FlexError, FlexResult};
pub use layout::node::{BoxId, LayoutNode};
pub use layout::projector::{RootContext, project};
pub use layout::props::{
    EdgeValues, FlexProps, Insets, PropKey, PropValue, ValueKind, apply_props, layout_properties,
};
pub use layout::reflow::{ContentExtent, FlexRoot, ReflowReport, RootConfig};
pub use layout::solver::{
    AlignItems, ComputedRect, Dimension, Display, Edge, FlexDirection, FlexWrap, Gutter,
    JustifyContent, LayoutProperty, LayoutSolver, PositionType,
};
pub use layout::taffy_bridge::TaffySolver;
pub use scene::document::{BoxDef, BoxLayout, MountedScene, SceneDocument};
pub use scene::graph::{SceneGraph, SceneHandle};
pub use scene::memory::MemoryScene;
pub use scroll::{ScrollConfig, ScrollRig};
