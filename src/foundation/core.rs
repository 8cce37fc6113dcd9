use crate::foundation::error::{FlexError, FlexResult};
use serde::{Deserialize, Serialize};

pub use glam::Vec3;

/// One of the three spatial axes of the 3D scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    /// The x axis.
    X,
    /// The y axis.
    Y,
    /// The z axis.
    Z,
}

impl Axis {
    /// Component index of this axis in a [`Vec3`].
    pub fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }

    /// Read this axis' component of `v`.
    pub fn of(self, v: Vec3) -> f32 {
        v[self.index()]
    }
}

/// Which spatial axes carry the 2D layout axes of a flex root.
///
/// The main axis receives layout x (left/width), the cross axis receives layout y (top/height)
/// and the remaining depth axis gets a fixed offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AxisMapping {
    main: Axis,
    cross: Axis,
    depth: Axis,
}

impl AxisMapping {
    /// Map layout x onto `main` and layout y onto `cross`; depth is the remaining axis.
    pub fn new(main: Axis, cross: Axis) -> FlexResult<Self> {
        if main == cross {
            return Err(FlexError::config(
                "main and cross axes of a flex root must differ",
            ));
        }
        let depth = [Axis::X, Axis::Y, Axis::Z]
            .into_iter()
            .find(|a| *a != main && *a != cross)
            .ok_or_else(|| FlexError::config("no depth axis left for flex root"))?;
        Ok(Self { main, cross, depth })
    }

    /// Axis receiving layout left/width.
    pub fn main(self) -> Axis {
        self.main
    }

    /// Axis receiving layout top/height.
    pub fn cross(self) -> Axis {
        self.cross
    }

    /// Axis receiving the fixed depth offset.
    pub fn depth(self) -> Axis {
        self.depth
    }

    /// Build a vector from per-role components.
    pub fn compose(self, main: f32, cross: f32, depth: f32) -> Vec3 {
        let mut v = Vec3::ZERO;
        v[self.main.index()] = main;
        v[self.cross.index()] = cross;
        v[self.depth.index()] = depth;
        v
    }
}

impl Default for AxisMapping {
    fn default() -> Self {
        Plane::Xy.axes()
    }
}

impl From<Plane> for AxisMapping {
    fn from(plane: Plane) -> Self {
        plane.axes()
    }
}

/// Layout plane of a flex root, named main axis first (`Xy` lays rows out along x).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Plane {
    /// main = x, cross = y, depth = z.
    #[default]
    Xy,
    /// main = y, cross = x, depth = z.
    Yx,
    /// main = x, cross = z, depth = y.
    Xz,
    /// main = z, cross = x, depth = y.
    Zx,
    /// main = y, cross = z, depth = x.
    Yz,
    /// main = z, cross = y, depth = x.
    Zy,
}

impl Plane {
    /// Axis mapping for this plane.
    pub fn axes(self) -> AxisMapping {
        let (main, cross, depth) = match self {
            Self::Xy => (Axis::X, Axis::Y, Axis::Z),
            Self::Yx => (Axis::Y, Axis::X, Axis::Z),
            Self::Xz => (Axis::X, Axis::Z, Axis::Y),
            Self::Zx => (Axis::Z, Axis::X, Axis::Y),
            Self::Yz => (Axis::Y, Axis::Z, Axis::X),
            Self::Zy => (Axis::Z, Axis::Y, Axis::X),
        };
        AxisMapping { main, cross, depth }
    }
}

/// Axis-aligned bounding box in 3D space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb3 {
    /// Minimum corner of the box.
    pub min: Vec3,
    /// Maximum corner of the box.
    pub max: Vec3,
}

impl Aabb3 {
    /// An empty box; unions with it return the other operand.
    pub const EMPTY: Self = Self {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };

    /// Create a box from min and max corners.
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create a box from center position and size.
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Return `true` when the box contains no points.
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Extents along every axis; zero for an empty box.
    pub fn size(&self) -> Vec3 {
        if self.is_empty() {
            return Vec3::ZERO;
        }
        self.max - self.min
    }

    /// Midpoint of the box; the origin for an empty box.
    pub fn center(&self) -> Vec3 {
        if self.is_empty() {
            return Vec3::ZERO;
        }
        (self.min + self.max) * 0.5
    }

    /// Smallest box containing both operands.
    pub fn union(&self, other: &Self) -> Self {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Box shifted by `offset`.
    pub fn translated(&self, offset: Vec3) -> Self {
        if self.is_empty() {
            return *self;
        }
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }
}

impl Default for Aabb3 {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Serde shape for vectors: `[x, y, z]` or `{ "x": .., "y": .., "z": .. }`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Vec3Def {
    /// x component.
    pub x: f32,
    /// y component.
    pub y: f32,
    /// z component.
    pub z: f32,
}

impl<'de> Deserialize<'de> for Vec3Def {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Arr([f32; 3]),
            Obj { x: f32, y: f32, z: f32 },
        }

        match Repr::deserialize(deserializer)? {
            Repr::Arr([x, y, z]) => Ok(Self { x, y, z }),
            Repr::Obj { x, y, z } => Ok(Self { x, y, z }),
        }
    }
}

impl From<Vec3Def> for Vec3 {
    fn from(v: Vec3Def) -> Self {
        Vec3::new(v.x, v.y, v.z)
    }
}

impl From<Vec3> for Vec3Def {
    fn from(v: Vec3) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
