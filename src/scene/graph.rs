use serde::{Deserialize, Serialize};

use crate::foundation::core::{Aabb3, Vec3};
use crate::foundation::error::FlexResult;

/// Opaque handle of a node owned by a [`SceneGraph`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SceneHandle(pub u32);

/// The retained 3D scene the layout writes into.
///
/// The layout only ever reads a node's rendered bounds and writes its local position; every
/// other aspect of rendering stays with the implementor.
pub trait SceneGraph {
    /// Rendered bounds of `handle` and its descendants, in the node's local frame.
    fn bounding_box(&self, handle: SceneHandle) -> FlexResult<Aabb3>;

    /// Write the local position of `handle` relative to its scene parent.
    fn set_position(&mut self, handle: SceneHandle, position: Vec3) -> FlexResult<()>;
}
