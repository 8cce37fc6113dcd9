//! Layout Projector: solved 2D rectangles to 3D positions.

use crate::foundation::core::{AxisMapping, Vec3};
use crate::layout::props::FlexProps;
use crate::layout::solver::ComputedRect;

/// Per-root projection frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RootContext {
    /// Which scene axes carry the layout's main, cross and depth directions.
    pub axes: AxisMapping,
    /// Overall root size along x, y and z.
    pub size: Vec3,
    /// Corner every solved rectangle is measured from.
    pub start: Vec3,
}

impl RootContext {
    /// Root extent along the main axis.
    pub fn main_size(&self) -> f32 {
        self.axes.main().of(self.size)
    }

    /// Root extent along the cross axis.
    pub fn cross_size(&self) -> f32 {
        self.axes.cross().of(self.size)
    }
}

/// Project `rect`, given in root coordinates, into the scene.
///
/// The node's origin lands on the midpoint of its rectangle. With `center_anchor`, the solved
/// width and height are replaced by the measured `content` size, so only the top-left corner of
/// the solved rectangle is used. Depth is shared by all boxes of a root unless `depth_offset`
/// overrides it.
pub fn project(
    rect: ComputedRect,
    ctx: &RootContext,
    props: &FlexProps,
    content: Option<Vec3>,
) -> Vec3 {
    let axes = ctx.axes;
    let (w, h) = if props.center_anchor {
        let content = content.unwrap_or(Vec3::ZERO);
        (axes.main().of(content), axes.cross().of(content))
    } else {
        (rect.width, rect.height)
    };
    let depth_offset = props
        .depth_offset
        .unwrap_or_else(|| axes.depth().of(ctx.size) / 2.0);

    axes.compose(
        axes.main().of(ctx.start) - (rect.left + w / 2.0),
        axes.cross().of(ctx.start) - (rect.top + h / 2.0),
        axes.depth().of(ctx.start) - depth_offset,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/layout/projector.rs"]
mod tests;
