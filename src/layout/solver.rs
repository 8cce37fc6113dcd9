//! Capability interface of the external flex solver.
//!
//! The layout subsystem talks to the solver only through [`LayoutSolver`]: node creation,
//! child insertion/removal, typed property setters, intrinsic sizes, one layout pass and the
//! computed rectangles. Every setter is a variant of [`LayoutProperty`], so the property mapper
//! is a closed table rather than a name lookup.

use crate::foundation::error::FlexResult;
use serde::{Deserialize, Serialize};

/// Main-axis direction of a flex container.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FlexDirection {
    /// Children flow left to right.
    #[default]
    Row,
    /// Children flow top to bottom.
    Column,
    /// Children flow right to left.
    RowReverse,
    /// Children flow bottom to top.
    ColumnReverse,
}

/// Line wrapping of a flex container.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FlexWrap {
    /// Single line.
    #[default]
    NoWrap,
    /// Wrap onto additional lines.
    Wrap,
    /// Wrap onto additional lines in reverse cross order.
    WrapReverse,
}

/// Alignment of items along the cross axis (`align-items` / `align-self`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AlignItems {
    /// Align to the start of the cross axis.
    Start,
    /// Align to the end of the cross axis.
    End,
    /// Align to the flex start edge.
    FlexStart,
    /// Align to the flex end edge.
    FlexEnd,
    /// Center on the cross axis.
    Center,
    /// Align baselines.
    Baseline,
    /// Stretch to fill the line.
    Stretch,
}

/// Distribution of space along an axis (`justify-content` / `align-content`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum JustifyContent {
    /// Pack toward the start.
    Start,
    /// Pack toward the end.
    End,
    /// Pack toward the flex start edge.
    FlexStart,
    /// Pack toward the flex end edge.
    FlexEnd,
    /// Pack around the center.
    Center,
    /// Stretch lines to fill (only meaningful for `align-content`).
    Stretch,
    /// Even space between items, none at the edges.
    SpaceBetween,
    /// Even space around each item.
    SpaceAround,
    /// Even space between items and edges.
    SpaceEvenly,
}

/// Positioning scheme of a box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PositionType {
    /// Positioned by the flex algorithm, then offset by insets.
    #[default]
    Relative,
    /// Taken out of flow and positioned by insets against the parent.
    Absolute,
}

/// Whether a box participates in layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Display {
    /// Flex container.
    #[default]
    Flex,
    /// Removed from layout; the box resolves to a zero rectangle.
    None,
}

/// Box edge addressed by margin, padding and inset setters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    /// Left edge.
    Left,
    /// Right edge.
    Right,
    /// Top edge.
    Top,
    /// Bottom edge.
    Bottom,
    /// Left and right edges.
    Horizontal,
    /// Top and bottom edges.
    Vertical,
    /// All four edges.
    All,
}

impl Edge {
    /// `(left, right, top, bottom)` flags covered by this edge selector.
    pub fn covers(self) -> (bool, bool, bool, bool) {
        match self {
            Self::Left => (true, false, false, false),
            Self::Right => (false, true, false, false),
            Self::Top => (false, false, true, false),
            Self::Bottom => (false, false, false, true),
            Self::Horizontal => (true, true, false, false),
            Self::Vertical => (false, false, true, true),
            Self::All => (true, true, true, true),
        }
    }
}

/// Gap direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Gutter {
    /// Space between columns (along layout x).
    Column,
    /// Space between rows (along layout y).
    Row,
    /// Both directions.
    All,
}

/// A length that may be automatic, absolute (world units) or a percentage of the parent.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Dimension {
    /// Sized by content or the flex algorithm.
    #[default]
    Auto,
    /// Absolute length in world units.
    Points(f32),
    /// Percentage of the parent, `100.0` is the full parent.
    Percent(f32),
}

impl Dimension {
    /// Multiply absolute lengths by `factor`; `Auto` and percentages are unchanged.
    pub fn scaled(self, factor: f32) -> Self {
        match self {
            Self::Points(v) => Self::Points(v * factor),
            other => other,
        }
    }
}

/// One typed setter call against a solver node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LayoutProperty {
    /// `flex-direction`.
    FlexDirection(FlexDirection),
    /// `flex-wrap`.
    FlexWrap(FlexWrap),
    /// `justify-content`.
    JustifyContent(JustifyContent),
    /// `align-items`.
    AlignItems(AlignItems),
    /// `align-content`.
    AlignContent(JustifyContent),
    /// `align-self`.
    AlignSelf(AlignItems),
    /// Margin on an edge, in world units.
    Margin(Edge, f32),
    /// Padding on an edge, in world units.
    Padding(Edge, f32),
    /// Gap between items, in world units.
    Gap(Gutter, f32),
    /// Preferred width.
    Width(Dimension),
    /// Preferred height.
    Height(Dimension),
    /// Minimum width.
    MinWidth(Dimension),
    /// Minimum height.
    MinHeight(Dimension),
    /// Maximum width.
    MaxWidth(Dimension),
    /// Maximum height.
    MaxHeight(Dimension),
    /// `flex-basis`.
    FlexBasis(Dimension),
    /// `flex-grow` factor.
    FlexGrow(f32),
    /// `flex-shrink` factor.
    FlexShrink(f32),
    /// Width / height ratio, `None` clears it.
    AspectRatio(Option<f32>),
    /// Positioning scheme.
    PositionType(PositionType),
    /// Inset on an edge (`left`, `right`, `top`, `bottom`).
    Inset(Edge, Dimension),
    /// Participation in layout.
    Display(Display),
}

/// A solved rectangle in 2D layout space, relative to the parent's border box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ComputedRect {
    /// Offset of the left edge from the parent's left edge.
    pub left: f32,
    /// Offset of the top edge from the parent's top edge (y grows downward).
    pub top: f32,
    /// Resolved width.
    pub width: f32,
    /// Resolved height.
    pub height: f32,
}

impl ComputedRect {
    /// Rectangle shifted by a parent offset.
    pub fn offset(self, left: f32, top: f32) -> Self {
        Self {
            left: self.left + left,
            top: self.top + top,
            ..self
        }
    }

    /// Left edge plus width.
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    /// Top edge plus height.
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

/// Operations the layout subsystem needs from a flex solver.
///
/// The solver owns the node tree; callers keep node handles and mirror the tree structure.
/// Implementations reject invalid numeric input (non-finite values, negative sizes) with
/// [`crate::FlexError::Solver`].
pub trait LayoutSolver {
    /// Handle of a solver node.
    type Node: Copy + Eq + core::fmt::Debug;

    /// Create a detached node with the default style.
    fn create_node(&mut self) -> FlexResult<Self::Node>;

    /// Free a node. The node must already be detached from its parent.
    fn release_node(&mut self, node: Self::Node) -> FlexResult<()>;

    /// Insert `child` into `parent` at `index` (`index == child_count` appends).
    fn insert_child(
        &mut self,
        parent: Self::Node,
        child: Self::Node,
        index: usize,
    ) -> FlexResult<()>;

    /// Remove `child` from `parent`.
    fn remove_child(&mut self, parent: Self::Node, child: Self::Node) -> FlexResult<()>;

    /// Number of children currently registered under `parent`.
    fn child_count(&self, parent: Self::Node) -> usize;

    /// Restore the default style on `node`. Intrinsic sizes are kept.
    fn reset_properties(&mut self, node: Self::Node) -> FlexResult<()>;

    /// Apply one typed property.
    fn set_property(&mut self, node: Self::Node, property: LayoutProperty) -> FlexResult<()>;

    /// Record the measured content size used when the node's style leaves a size automatic.
    fn set_intrinsic_size(&mut self, node: Self::Node, width: f32, height: f32)
    -> FlexResult<()>;

    /// Solve the subtree under `root` within the given available space.
    fn calculate_layout(
        &mut self,
        root: Self::Node,
        available_width: f32,
        available_height: f32,
    ) -> FlexResult<()>;

    /// Rectangle computed by the last [`LayoutSolver::calculate_layout`].
    fn computed_layout(&self, node: Self::Node) -> FlexResult<ComputedRect>;
}
