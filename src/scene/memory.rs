use crate::foundation::core::{Aabb3, Vec3};
use crate::foundation::error::{FlexError, FlexResult};
use crate::scene::graph::{SceneGraph, SceneHandle};

#[derive(Clone, Debug, Default)]
struct SceneNode {
    parent: Option<SceneHandle>,
    children: Vec<SceneHandle>,
    position: Vec3,
    content: Option<Aabb3>,
}

/// Retained scene graph kept entirely in memory.
///
/// Handle `0` is the scene root. Bounds are reported in each node's local frame: the node's own
/// content united with every child's bounds moved by that child's position.
#[derive(Clone, Debug)]
pub struct MemoryScene {
    nodes: Vec<SceneNode>,
}

impl Default for MemoryScene {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryScene {
    /// Scene holding only the root group.
    pub fn new() -> Self {
        Self {
            nodes: vec![SceneNode::default()],
        }
    }

    /// The root group.
    pub fn root(&self) -> SceneHandle {
        SceneHandle(0)
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the scene holds no nodes. The root group exists from construction, so a
    /// constructed scene is never empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Add a child of `parent` with optional rendered content bounds.
    pub fn add_node(
        &mut self,
        parent: SceneHandle,
        content: Option<Aabb3>,
    ) -> FlexResult<SceneHandle> {
        self.get(parent)?;
        let handle = SceneHandle(self.nodes.len() as u32);
        self.nodes.push(SceneNode {
            parent: Some(parent),
            content,
            ..SceneNode::default()
        });
        self.get_mut(parent)?.children.push(handle);
        Ok(handle)
    }

    /// Replace the rendered content bounds of a node.
    pub fn set_content(&mut self, handle: SceneHandle, content: Option<Aabb3>) -> FlexResult<()> {
        self.get_mut(handle)?.content = content;
        Ok(())
    }

    /// Local position of a node.
    pub fn position(&self, handle: SceneHandle) -> FlexResult<Vec3> {
        Ok(self.get(handle)?.position)
    }

    /// Position of a node in the root group's frame.
    pub fn world_position(&self, handle: SceneHandle) -> FlexResult<Vec3> {
        let mut node = self.get(handle)?;
        let mut pos = node.position;
        while let Some(parent) = node.parent {
            node = self.get(parent)?;
            pos += node.position;
        }
        Ok(pos)
    }

    /// Scene parent of a node.
    pub fn parent(&self, handle: SceneHandle) -> FlexResult<Option<SceneHandle>> {
        Ok(self.get(handle)?.parent)
    }

    /// Scene children in insertion order.
    pub fn children(&self, handle: SceneHandle) -> FlexResult<&[SceneHandle]> {
        Ok(&self.get(handle)?.children)
    }

    fn get(&self, handle: SceneHandle) -> FlexResult<&SceneNode> {
        self.nodes
            .get(handle.0 as usize)
            .ok_or_else(|| FlexError::tree(format!("unknown scene node {}", handle.0)))
    }

    fn get_mut(&mut self, handle: SceneHandle) -> FlexResult<&mut SceneNode> {
        self.nodes
            .get_mut(handle.0 as usize)
            .ok_or_else(|| FlexError::tree(format!("unknown scene node {}", handle.0)))
    }
}

impl SceneGraph for MemoryScene {
    fn bounding_box(&self, handle: SceneHandle) -> FlexResult<Aabb3> {
        let node = self.get(handle)?;
        let mut bounds = node.content.unwrap_or(Aabb3::EMPTY);
        for child in &node.children {
            let child_bounds = self.bounding_box(*child)?;
            bounds = bounds.union(&child_bounds.translated(self.get(*child)?.position));
        }
        Ok(bounds)
    }

    fn set_position(&mut self, handle: SceneHandle, position: Vec3) -> FlexResult<()> {
        if !position.is_finite() {
            return Err(FlexError::tree(format!(
                "non-finite position {position} for scene node {}",
                handle.0
            )));
        }
        self.get_mut(handle)?.position = position;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/memory.rs"]
mod tests;
