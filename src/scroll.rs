//! Scroll-driven sticky positioning built on a root's reported content height.
//!
//! A host scroll region is sized in "pages" from the content extent. While the eased page is
//! below the sticky threshold the rig follows the scroll along y; past it the rig holds its y
//! and moves along depth instead.

use serde::Deserialize;

use crate::foundation::core::Vec3;
use crate::foundation::error::{FlexError, FlexResult};

/// Tuning of a [`ScrollRig`].
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScrollConfig {
    /// Pages appended after the content.
    pub extra_pages: f32,
    /// Lowest sticky threshold, in pages.
    pub threshold_floor: f32,
    /// Threshold pages per unit of summed section height.
    pub threshold_ratio: f32,
    /// Easing factor of the page toward the scroll offset.
    pub page_ease: f32,
    /// Easing factor of the position toward its target.
    pub position_ease: f32,
    /// Depth travelled per page once sticky.
    pub depth_speed: f32,
    /// Fade starts at this multiple of the threshold.
    pub fade_start: f32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            extra_pages: 5.5,
            threshold_floor: 4.0,
            threshold_ratio: 4.0 / (15.8 * 3.0),
            page_ease: 0.2,
            position_ease: 0.1,
            depth_speed: 1.25,
            fade_start: 1.7,
        }
    }
}

impl ScrollConfig {
    /// Length of the scroll region, in viewport pages, for `content_height` world units.
    pub fn pages(&self, content_height: f32, viewport_height: f32) -> FlexResult<f32> {
        if !viewport_height.is_finite() || viewport_height <= 0.0 {
            return Err(FlexError::config(format!(
                "viewport height must be positive and finite, got {viewport_height}"
            )));
        }
        Ok(content_height / viewport_height + self.extra_pages)
    }

    /// Sticky threshold in pages for the given section heights.
    pub fn sticky_threshold(&self, section_heights: &[f32]) -> f32 {
        let sum: f32 = section_heights.iter().sum();
        self.threshold_floor.max(self.threshold_ratio * sum)
    }

    /// Opacity of a layer at `page`: opaque until the fade start, then linear to zero.
    pub fn fade(&self, page: f32, threshold: f32) -> f32 {
        let start = threshold * self.fade_start;
        if page < start {
            1.0
        } else {
            (1.0 - (page - start)).clamp(0.0, 1.0)
        }
    }
}

/// Eased scroll follower; call [`ScrollRig::step`] once per frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollRig {
    config: ScrollConfig,
    threshold: f32,
    page: f32,
    position: Vec3,
}

impl ScrollRig {
    /// Rig at rest at page zero.
    pub fn new(config: ScrollConfig, threshold: f32) -> Self {
        Self {
            config,
            threshold,
            page: 0.0,
            position: Vec3::ZERO,
        }
    }

    /// Tuning.
    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    /// Current sticky threshold in pages.
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Replace the threshold, usually after a reflow changed section heights.
    pub fn set_threshold(&mut self, threshold: f32) {
        self.threshold = threshold;
    }

    /// Eased page.
    pub fn page(&self) -> f32 {
        self.page
    }

    /// Eased position.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Opacity at the current page.
    pub fn opacity(&self) -> f32 {
        self.config.fade(self.page, self.threshold)
    }

    /// Advance one frame for a scroll offset of `scroll_top` pixels in a viewport of
    /// `viewport_px` pixels that spans `viewport_height` world units.
    pub fn step(
        &mut self,
        scroll_top: f32,
        viewport_px: f32,
        viewport_height: f32,
    ) -> FlexResult<Vec3> {
        if !viewport_px.is_finite() || viewport_px <= 0.0 {
            return Err(FlexError::config(format!(
                "viewport pixel height must be positive and finite, got {viewport_px}"
            )));
        }
        let target_page = scroll_top / viewport_px;
        self.page = lerp(self.page, target_page, self.config.page_ease);

        let target = if self.page < self.threshold {
            Vec3::new(0.0, self.page * viewport_height, 0.0)
        } else {
            Vec3::new(
                0.0,
                self.threshold * viewport_height,
                self.page * self.config.depth_speed,
            )
        };
        self.position = self.position.lerp(target, self.config.position_ease);
        Ok(self.position)
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[cfg(test)]
#[path = "../tests/unit/scroll.rs"]
mod tests;
