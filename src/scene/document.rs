//! JSON scene documents: a flex root plus a tree of boxes with content sizes.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::foundation::core::{Aabb3, Vec3, Vec3Def};
use crate::foundation::error::{FlexError, FlexResult};
use crate::layout::node::BoxId;
use crate::layout::props::FlexProps;
use crate::layout::reflow::{FlexRoot, ReflowReport, RootConfig};
use crate::layout::solver::ComputedRect;
use crate::scene::graph::SceneHandle;
use crate::scene::memory::MemoryScene;

/// A flex root and the boxes laid out under it.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneDocument {
    /// Root region.
    pub root: RootConfig,
    /// Top-level boxes in child order.
    #[serde(default)]
    pub boxes: Vec<BoxDef>,
}

/// One box of a [`SceneDocument`].
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoxDef {
    /// Unique name of the box.
    pub id: String,
    /// Flex options.
    #[serde(default)]
    pub props: FlexProps,
    /// Size of the rendered content, centered on the node origin.
    #[serde(default)]
    pub content: Option<Vec3Def>,
    /// Child boxes in order.
    #[serde(default)]
    pub children: Vec<BoxDef>,
}

/// Resolved layout of one named box.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BoxLayout {
    /// Name from the document.
    pub id: String,
    /// Parent-relative solved rectangle.
    pub rect: ComputedRect,
    /// Local position written to the scene node.
    pub position: Vec3Def,
}

impl SceneDocument {
    /// Parse a document from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> FlexResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| FlexError::serde(format!("parse scene document JSON: {e}")))
    }

    /// Parse a document from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> FlexResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            FlexError::serde(format!("open scene document '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Build the scene graph and flex tree described by this document.
    pub fn mount(&self) -> FlexResult<MountedScene> {
        let mut scene = MemoryScene::new();
        let mut root = FlexRoot::new(self.root.clone(), scene.root())?;
        let mut ids = Vec::new();
        let mut seen = BTreeSet::new();

        let (root_box, root_node) = (root.root(), scene.root());
        for def in &self.boxes {
            mount_box(
                def,
                root_box,
                root_node,
                &mut scene,
                &mut root,
                &mut ids,
                &mut seen,
            )?;
        }
        Ok(MountedScene { scene, root, ids })
    }
}

fn mount_box(
    def: &BoxDef,
    parent: BoxId,
    parent_node: SceneHandle,
    scene: &mut MemoryScene,
    root: &mut FlexRoot,
    ids: &mut Vec<(String, BoxId)>,
    seen: &mut BTreeSet<String>,
) -> FlexResult<()> {
    if !seen.insert(def.id.clone()) {
        return Err(FlexError::config(format!("duplicate box id '{}'", def.id)));
    }
    let content = def
        .content
        .map(|size| content_bounds(&def.id, size.into()))
        .transpose()?;
    let node = scene.add_node(parent_node, content)?;
    let id = root.add_box(parent, def.props.clone(), node)?;
    ids.push((def.id.clone(), id));

    for child in &def.children {
        mount_box(child, id, node, scene, root, ids, seen)?;
    }
    Ok(())
}

fn content_bounds(name: &str, size: Vec3) -> FlexResult<Aabb3> {
    if !size.is_finite() || size.min_element() < 0.0 {
        return Err(FlexError::config(format!(
            "box '{name}': content size must be finite and non-negative, got {size}"
        )));
    }
    Ok(Aabb3::from_center_size(Vec3::ZERO, size))
}

/// A mounted [`SceneDocument`]: the scene, its flex root and the document's box names.
pub struct MountedScene {
    /// Scene graph holding one node per box.
    pub scene: MemoryScene,
    /// Flex root positioning the scene.
    pub root: FlexRoot,
    ids: Vec<(String, BoxId)>,
}

impl MountedScene {
    /// Box mounted for a document id.
    pub fn box_id(&self, name: &str) -> Option<BoxId> {
        self.ids.iter().find(|(n, _)| n == name).map(|(_, id)| *id)
    }

    /// Document ids and their boxes in document order.
    pub fn named_boxes(&self) -> &[(String, BoxId)] {
        &self.ids
    }

    /// Measure, resolve and apply the layout.
    pub fn reflow(&mut self) -> FlexResult<ReflowReport> {
        self.root.reflow(&mut self.scene)
    }

    /// Resolved layout of every attached named box, in document order.
    pub fn layouts(&self) -> Vec<BoxLayout> {
        self.ids
            .iter()
            .filter_map(|(name, id)| {
                let rect = self.root.computed_rect(*id)?;
                let position = self.root.position(*id)?;
                Some(BoxLayout {
                    id: name.clone(),
                    rect,
                    position: position.into(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/document.rs"]
mod tests;
