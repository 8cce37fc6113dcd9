//! Solver double that records every call.

use std::collections::HashMap;

use crate::foundation::error::{FlexError, FlexResult};
use crate::layout::solver::{ComputedRect, LayoutProperty, LayoutSolver};

#[derive(Debug, Default)]
pub(crate) struct RecordingSolver {
    pub(crate) children: Vec<Vec<usize>>,
    pub(crate) released: Vec<usize>,
    pub(crate) properties: Vec<(usize, LayoutProperty)>,
    pub(crate) resets: Vec<usize>,
    pub(crate) intrinsic: HashMap<usize, (f32, f32)>,
    pub(crate) rects: HashMap<usize, ComputedRect>,
    pub(crate) solves: usize,
    pub(crate) fail_next_solve: bool,
}

impl RecordingSolver {
    pub(crate) fn properties_of(&self, node: usize) -> Vec<LayoutProperty> {
        self.properties
            .iter()
            .filter(|(n, _)| *n == node)
            .map(|(_, p)| *p)
            .collect()
    }
}

impl LayoutSolver for RecordingSolver {
    type Node = usize;

    fn create_node(&mut self) -> FlexResult<usize> {
        self.children.push(Vec::new());
        Ok(self.children.len() - 1)
    }

    fn release_node(&mut self, node: usize) -> FlexResult<()> {
        self.released.push(node);
        Ok(())
    }

    fn insert_child(&mut self, parent: usize, child: usize, index: usize) -> FlexResult<()> {
        let list = self
            .children
            .get_mut(parent)
            .ok_or_else(|| FlexError::solver("no such parent"))?;
        if index > list.len() {
            return Err(FlexError::solver("child index out of bounds"));
        }
        list.insert(index, child);
        Ok(())
    }

    fn remove_child(&mut self, parent: usize, child: usize) -> FlexResult<()> {
        let list = self
            .children
            .get_mut(parent)
            .ok_or_else(|| FlexError::solver("no such parent"))?;
        let pos = list
            .iter()
            .position(|c| *c == child)
            .ok_or_else(|| FlexError::solver("not a child"))?;
        list.remove(pos);
        Ok(())
    }

    fn child_count(&self, parent: usize) -> usize {
        self.children.get(parent).map_or(0, Vec::len)
    }

    fn reset_properties(&mut self, node: usize) -> FlexResult<()> {
        self.resets.push(node);
        Ok(())
    }

    fn set_property(&mut self, node: usize, property: LayoutProperty) -> FlexResult<()> {
        self.properties.push((node, property));
        Ok(())
    }

    fn set_intrinsic_size(&mut self, node: usize, width: f32, height: f32) -> FlexResult<()> {
        self.intrinsic.insert(node, (width, height));
        Ok(())
    }

    fn calculate_layout(&mut self, _root: usize, _w: f32, _h: f32) -> FlexResult<()> {
        if self.fail_next_solve {
            self.fail_next_solve = false;
            return Err(FlexError::solver("injected failure"));
        }
        self.solves += 1;
        Ok(())
    }

    fn computed_layout(&self, node: usize) -> FlexResult<ComputedRect> {
        Ok(self.rects.get(&node).copied().unwrap_or_default())
    }
}
