use crate::foundation::error::{FlexError, FlexResult};
use crate::layout::solver::{
    AlignItems as AlignItemsProp, ComputedRect, Dimension as DimensionProp,
    Display as DisplayProp, Edge, FlexDirection as FlexDirectionProp, FlexWrap as FlexWrapProp,
    Gutter, JustifyContent as JustifyContentProp, LayoutProperty, LayoutSolver,
    PositionType as PositionTypeProp,
};
use taffy::TraversePartialTree;
use taffy::prelude::{AvailableSpace, NodeId, Rect, Size};
use taffy::style::{
    AlignContent, AlignItems, Dimension, Display, FlexDirection, FlexWrap, LengthPercentage,
    LengthPercentageAuto, Position, Style,
};

#[derive(Debug, Clone, Copy, Default)]
struct MeasuredCtx {
    intrinsic: Size<f32>,
}

/// [`LayoutSolver`] backed by a [`taffy::TaffyTree`].
///
/// Rounding is disabled because layout units are 3D world units, not pixels. Measured content
/// sizes live in the node context and are fed back through the measure callback, so explicit
/// style sizes always win over measurements.
#[derive(Debug)]
pub struct TaffySolver {
    taffy: taffy::TaffyTree<MeasuredCtx>,
}

impl Default for TaffySolver {
    fn default() -> Self {
        Self::new()
    }
}

impl TaffySolver {
    /// Create an empty solver tree.
    pub fn new() -> Self {
        let mut taffy = taffy::TaffyTree::new();
        taffy.disable_rounding();
        Self { taffy }
    }

    /// Number of live nodes in the solver tree.
    pub fn total_node_count(&self) -> usize {
        self.taffy.total_node_count()
    }

    fn update_style(
        &mut self,
        node: NodeId,
        f: impl FnOnce(&mut Style) -> FlexResult<()>,
    ) -> FlexResult<()> {
        let mut style = self.taffy.style(node).map_err(taffy_err)?.clone();
        f(&mut style)?;
        self.taffy.set_style(node, style).map_err(taffy_err)
    }
}

impl LayoutSolver for TaffySolver {
    type Node = NodeId;

    fn create_node(&mut self) -> FlexResult<NodeId> {
        self.taffy
            .new_leaf_with_context(Style::default(), MeasuredCtx::default())
            .map_err(taffy_err)
    }

    fn release_node(&mut self, node: NodeId) -> FlexResult<()> {
        self.taffy.remove(node).map(|_| ()).map_err(taffy_err)
    }

    fn insert_child(&mut self, parent: NodeId, child: NodeId, index: usize) -> FlexResult<()> {
        self.taffy
            .insert_child_at_index(parent, index, child)
            .map_err(taffy_err)
    }

    fn remove_child(&mut self, parent: NodeId, child: NodeId) -> FlexResult<()> {
        self.taffy
            .remove_child(parent, child)
            .map(|_| ())
            .map_err(taffy_err)
    }

    fn child_count(&self, parent: NodeId) -> usize {
        self.taffy.child_count(parent)
    }

    fn reset_properties(&mut self, node: NodeId) -> FlexResult<()> {
        self.taffy
            .set_style(node, Style::default())
            .map_err(taffy_err)
    }

    fn set_property(&mut self, node: NodeId, property: LayoutProperty) -> FlexResult<()> {
        self.update_style(node, |style| apply_property(style, property))
    }

    fn set_intrinsic_size(&mut self, node: NodeId, width: f32, height: f32) -> FlexResult<()> {
        let width = non_negative("intrinsic width", width)?;
        let height = non_negative("intrinsic height", height)?;
        self.taffy
            .set_node_context(
                node,
                Some(MeasuredCtx {
                    intrinsic: Size { width, height },
                }),
            )
            .map_err(taffy_err)?;
        self.taffy.mark_dirty(node).map_err(taffy_err)
    }

    fn calculate_layout(
        &mut self,
        root: NodeId,
        available_width: f32,
        available_height: f32,
    ) -> FlexResult<()> {
        let available = Size {
            width: AvailableSpace::Definite(non_negative("available width", available_width)?),
            height: AvailableSpace::Definite(non_negative(
                "available height",
                available_height,
            )?),
        };
        self.taffy
            .compute_layout_with_measure(
                root,
                available,
                |known_dimensions, _available_space, _node_id, node_context, _style| {
                    let intrinsic = node_context
                        .as_ref()
                        .map(|c| c.intrinsic)
                        .unwrap_or(Size::ZERO);
                    Size {
                        width: known_dimensions.width.unwrap_or(intrinsic.width),
                        height: known_dimensions.height.unwrap_or(intrinsic.height),
                    }
                },
            )
            .map_err(taffy_err)
    }

    fn computed_layout(&self, node: NodeId) -> FlexResult<ComputedRect> {
        let l = self.taffy.layout(node).map_err(taffy_err)?;
        Ok(ComputedRect {
            left: l.location.x,
            top: l.location.y,
            width: l.size.width,
            height: l.size.height,
        })
    }
}

fn taffy_err(e: taffy::TaffyError) -> FlexError {
    FlexError::solver(e.to_string())
}

fn finite(what: &str, v: f32) -> FlexResult<f32> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(FlexError::solver(format!("{what} must be finite, got {v}")))
    }
}

fn non_negative(what: &str, v: f32) -> FlexResult<f32> {
    let v = finite(what, v)?;
    if v < 0.0 {
        return Err(FlexError::solver(format!(
            "{what} must be non-negative, got {v}"
        )));
    }
    Ok(v)
}

fn apply_property(style: &mut Style, property: LayoutProperty) -> FlexResult<()> {
    match property {
        LayoutProperty::FlexDirection(d) => {
            style.flex_direction = match d {
                FlexDirectionProp::Row => FlexDirection::Row,
                FlexDirectionProp::Column => FlexDirection::Column,
                FlexDirectionProp::RowReverse => FlexDirection::RowReverse,
                FlexDirectionProp::ColumnReverse => FlexDirection::ColumnReverse,
            };
        }
        LayoutProperty::FlexWrap(w) => {
            style.flex_wrap = match w {
                FlexWrapProp::NoWrap => FlexWrap::NoWrap,
                FlexWrapProp::Wrap => FlexWrap::Wrap,
                FlexWrapProp::WrapReverse => FlexWrap::WrapReverse,
            };
        }
        LayoutProperty::JustifyContent(j) => {
            style.justify_content = Some(align_content(j));
        }
        LayoutProperty::AlignContent(j) => {
            style.align_content = Some(align_content(j));
        }
        LayoutProperty::AlignItems(a) => {
            style.align_items = Some(align_items(a));
        }
        LayoutProperty::AlignSelf(a) => {
            style.align_self = Some(align_items(a));
        }
        LayoutProperty::Margin(edge, v) => {
            let v = LengthPercentageAuto::length(finite("margin", v)?);
            set_edges(&mut style.margin, edge, v);
        }
        LayoutProperty::Padding(edge, v) => {
            let v = LengthPercentage::length(non_negative("padding", v)?);
            set_edges(&mut style.padding, edge, v);
        }
        LayoutProperty::Gap(gutter, v) => {
            let v = LengthPercentage::length(non_negative("gap", v)?);
            match gutter {
                Gutter::Column => style.gap.width = v,
                Gutter::Row => style.gap.height = v,
                Gutter::All => style.gap = Size { width: v, height: v },
            }
        }
        LayoutProperty::Width(d) => style.size.width = dimension("width", d)?,
        LayoutProperty::Height(d) => style.size.height = dimension("height", d)?,
        LayoutProperty::MinWidth(d) => style.min_size.width = dimension("min width", d)?,
        LayoutProperty::MinHeight(d) => style.min_size.height = dimension("min height", d)?,
        LayoutProperty::MaxWidth(d) => style.max_size.width = dimension("max width", d)?,
        LayoutProperty::MaxHeight(d) => style.max_size.height = dimension("max height", d)?,
        LayoutProperty::FlexBasis(d) => style.flex_basis = dimension("flex basis", d)?,
        LayoutProperty::FlexGrow(v) => style.flex_grow = non_negative("flex grow", v)?,
        LayoutProperty::FlexShrink(v) => style.flex_shrink = non_negative("flex shrink", v)?,
        LayoutProperty::AspectRatio(r) => {
            style.aspect_ratio = match r {
                Some(r) if r > 0.0 && r.is_finite() => Some(r),
                Some(r) => {
                    return Err(FlexError::solver(format!(
                        "aspect ratio must be positive and finite, got {r}"
                    )));
                }
                None => None,
            };
        }
        LayoutProperty::PositionType(p) => {
            style.position = match p {
                PositionTypeProp::Relative => Position::Relative,
                PositionTypeProp::Absolute => Position::Absolute,
            };
        }
        LayoutProperty::Inset(edge, d) => {
            let v = match d {
                DimensionProp::Auto => LengthPercentageAuto::auto(),
                DimensionProp::Points(v) => LengthPercentageAuto::length(finite("inset", v)?),
                DimensionProp::Percent(p) => {
                    LengthPercentageAuto::percent(finite("inset", p)? / 100.0)
                }
            };
            set_edges(&mut style.inset, edge, v);
        }
        LayoutProperty::Display(d) => {
            style.display = match d {
                DisplayProp::Flex => Display::Flex,
                DisplayProp::None => Display::None,
            };
        }
    }
    Ok(())
}

fn set_edges<T: Copy>(rect: &mut Rect<T>, edge: Edge, v: T) {
    let (left, right, top, bottom) = edge.covers();
    if left {
        rect.left = v;
    }
    if right {
        rect.right = v;
    }
    if top {
        rect.top = v;
    }
    if bottom {
        rect.bottom = v;
    }
}

fn dimension(what: &str, d: DimensionProp) -> FlexResult<Dimension> {
    Ok(match d {
        DimensionProp::Auto => Dimension::auto(),
        DimensionProp::Points(v) => Dimension::length(non_negative(what, v)?),
        DimensionProp::Percent(p) => Dimension::percent(non_negative(what, p)? / 100.0),
    })
}

fn align_items(a: AlignItemsProp) -> AlignItems {
    match a {
        AlignItemsProp::Start => AlignItems::Start,
        AlignItemsProp::End => AlignItems::End,
        AlignItemsProp::FlexStart => AlignItems::FlexStart,
        AlignItemsProp::FlexEnd => AlignItems::FlexEnd,
        AlignItemsProp::Center => AlignItems::Center,
        AlignItemsProp::Baseline => AlignItems::Baseline,
        AlignItemsProp::Stretch => AlignItems::Stretch,
    }
}

fn align_content(j: JustifyContentProp) -> AlignContent {
    match j {
        JustifyContentProp::Start => AlignContent::Start,
        JustifyContentProp::End => AlignContent::End,
        JustifyContentProp::FlexStart => AlignContent::FlexStart,
        JustifyContentProp::FlexEnd => AlignContent::FlexEnd,
        JustifyContentProp::Center => AlignContent::Center,
        JustifyContentProp::Stretch => AlignContent::Stretch,
        JustifyContentProp::SpaceBetween => AlignContent::SpaceBetween,
        JustifyContentProp::SpaceAround => AlignContent::SpaceAround,
        JustifyContentProp::SpaceEvenly => AlignContent::SpaceEvenly,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/taffy_bridge.rs"]
mod tests;
