//! Flex container configuration and the property mapper.
//!
//! [`FlexProps`] is the declarative options object attached to every box. Keys are resolved
//! through one exhaustive table ([`PropKey`]), values are checked against the kind each key
//! expects, and [`layout_properties`] turns the result into typed solver setter calls with the
//! root's scale factor applied to world-unit lengths.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::foundation::error::{FlexError, FlexResult};
use crate::layout::solver::{
    AlignItems, Dimension, Display, Edge, FlexDirection, FlexWrap, Gutter, JustifyContent,
    LayoutProperty, LayoutSolver, PositionType,
};

/// A raw option value as written by a caller or a JSON document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropValue {
    /// Boolean flag.
    Bool(bool),
    /// Number in world units (lengths) or a plain factor.
    Number(f32),
    /// Enum name, `"auto"`, `"<n>%"` or a numeric string.
    Str(String),
}

impl From<bool> for PropValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<f32> for PropValue {
    fn from(v: f32) -> Self {
        Self::Number(v)
    }
}

impl From<f64> for PropValue {
    fn from(v: f64) -> Self {
        Self::Number(v as f32)
    }
}

impl From<&str> for PropValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for PropValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

/// Kind of value a [`PropKey`] accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueKind {
    /// A named enum value (string).
    Enum,
    /// A world-unit length (number), scaled by the root's scale factor.
    Length,
    /// A [`Dimension`]: number (scaled), `"auto"` or a percentage.
    Dimension,
    /// A plain number that is never scaled.
    Factor,
    /// A boolean flag, never scaled.
    Bool,
}

/// Every recognized configuration key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PropKey {
    /// `flexDirection`, `flexDir`, `dir`.
    FlexDirection,
    /// `flexWrap`, `wrap`.
    FlexWrap,
    /// `justifyContent`, `justify`.
    JustifyContent,
    /// `alignItems`, `align`.
    AlignItems,
    /// `alignContent`.
    AlignContent,
    /// `alignSelf`.
    AlignSelf,
    /// `margin`, `m`, `mx`, `my`, `ml`, `mr`, `mt`, `mb` and long forms.
    Margin(Edge),
    /// `padding`, `p`, `px`, `py`, `pl`, `pr`, `pt`, `pb` and long forms.
    Padding(Edge),
    /// `gap`, `rowGap`, `columnGap`.
    Gap(Gutter),
    /// `width`.
    Width,
    /// `height`.
    Height,
    /// `minWidth`.
    MinWidth,
    /// `minHeight`.
    MinHeight,
    /// `maxWidth`.
    MaxWidth,
    /// `maxHeight`.
    MaxHeight,
    /// `flexBasis`.
    FlexBasis,
    /// `flexGrow`.
    FlexGrow,
    /// `flexShrink`.
    FlexShrink,
    /// `aspectRatio`.
    AspectRatio,
    /// `position`, `positionType`.
    PositionType,
    /// `left`, `right`, `top`, `bottom`.
    Inset(Edge),
    /// `display`.
    Display,
    /// `centerAnchor`.
    CenterAnchor,
    /// `depthOffset`.
    DepthOffset,
}

impl PropKey {
    /// Value kind accepted by this key.
    pub fn kind(self) -> ValueKind {
        match self {
            Self::FlexDirection
            | Self::FlexWrap
            | Self::JustifyContent
            | Self::AlignItems
            | Self::AlignContent
            | Self::AlignSelf
            | Self::PositionType
            | Self::Display => ValueKind::Enum,
            Self::Margin(_) | Self::Padding(_) | Self::Gap(_) => ValueKind::Length,
            Self::Width
            | Self::Height
            | Self::MinWidth
            | Self::MinHeight
            | Self::MaxWidth
            | Self::MaxHeight
            | Self::FlexBasis
            | Self::Inset(_) => ValueKind::Dimension,
            Self::FlexGrow | Self::FlexShrink | Self::AspectRatio | Self::DepthOffset => {
                ValueKind::Factor
            }
            Self::CenterAnchor => ValueKind::Bool,
        }
    }
}

impl FromStr for PropKey {
    type Err = FlexError;

    /// Accepts camelCase, kebab-case and snake_case spellings plus the short aliases.
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let norm: String = name
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();
        let key = match norm.as_str() {
            "flexdirection" | "flexdir" | "dir" => Self::FlexDirection,
            "flexwrap" | "wrap" => Self::FlexWrap,
            "justifycontent" | "justify" => Self::JustifyContent,
            "alignitems" | "align" => Self::AlignItems,
            "aligncontent" => Self::AlignContent,
            "alignself" => Self::AlignSelf,

            "margin" | "m" => Self::Margin(Edge::All),
            "marginx" | "mx" => Self::Margin(Edge::Horizontal),
            "marginy" | "my" => Self::Margin(Edge::Vertical),
            "marginleft" | "ml" => Self::Margin(Edge::Left),
            "marginright" | "mr" => Self::Margin(Edge::Right),
            "margintop" | "mt" => Self::Margin(Edge::Top),
            "marginbottom" | "mb" => Self::Margin(Edge::Bottom),

            "padding" | "p" => Self::Padding(Edge::All),
            "paddingx" | "px" => Self::Padding(Edge::Horizontal),
            "paddingy" | "py" => Self::Padding(Edge::Vertical),
            "paddingleft" | "pl" => Self::Padding(Edge::Left),
            "paddingright" | "pr" => Self::Padding(Edge::Right),
            "paddingtop" | "pt" => Self::Padding(Edge::Top),
            "paddingbottom" | "pb" => Self::Padding(Edge::Bottom),

            "gap" => Self::Gap(Gutter::All),
            "rowgap" => Self::Gap(Gutter::Row),
            "columngap" => Self::Gap(Gutter::Column),

            "width" => Self::Width,
            "height" => Self::Height,
            "minwidth" => Self::MinWidth,
            "minheight" => Self::MinHeight,
            "maxwidth" => Self::MaxWidth,
            "maxheight" => Self::MaxHeight,
            "flexbasis" => Self::FlexBasis,
            "flexgrow" => Self::FlexGrow,
            "flexshrink" => Self::FlexShrink,
            "aspectratio" => Self::AspectRatio,

            "position" | "positiontype" => Self::PositionType,
            "left" => Self::Inset(Edge::Left),
            "right" => Self::Inset(Edge::Right),
            "top" => Self::Inset(Edge::Top),
            "bottom" => Self::Inset(Edge::Bottom),
            "display" => Self::Display,

            "centeranchor" => Self::CenterAnchor,
            "depthoffset" => Self::DepthOffset,
            _ => return Err(FlexError::config(format!("unknown flex property '{name}'"))),
        };
        Ok(key)
    }
}

/// Per-edge spacing values; the most specific edge wins when applied.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EdgeValues {
    /// All edges.
    pub all: Option<f32>,
    /// Left and right.
    pub horizontal: Option<f32>,
    /// Top and bottom.
    pub vertical: Option<f32>,
    /// Left edge.
    pub left: Option<f32>,
    /// Right edge.
    pub right: Option<f32>,
    /// Top edge.
    pub top: Option<f32>,
    /// Bottom edge.
    pub bottom: Option<f32>,
}

impl EdgeValues {
    fn slot(&mut self, edge: Edge) -> &mut Option<f32> {
        match edge {
            Edge::All => &mut self.all,
            Edge::Horizontal => &mut self.horizontal,
            Edge::Vertical => &mut self.vertical,
            Edge::Left => &mut self.left,
            Edge::Right => &mut self.right,
            Edge::Top => &mut self.top,
            Edge::Bottom => &mut self.bottom,
        }
    }

    /// Set values in application order: all, axis pairs, then single edges.
    fn ordered(&self) -> [(Edge, Option<f32>); 7] {
        [
            (Edge::All, self.all),
            (Edge::Horizontal, self.horizontal),
            (Edge::Vertical, self.vertical),
            (Edge::Left, self.left),
            (Edge::Right, self.right),
            (Edge::Top, self.top),
            (Edge::Bottom, self.bottom),
        ]
    }
}

/// Inset values for absolute/relative offsets.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Insets {
    /// `left`.
    pub left: Option<Dimension>,
    /// `right`.
    pub right: Option<Dimension>,
    /// `top`.
    pub top: Option<Dimension>,
    /// `bottom`.
    pub bottom: Option<Dimension>,
}

/// Declarative flex options of one container (the `FlexContainerConfig`).
///
/// Unset options keep the solver default. Build it with [`FlexProps::set`] or deserialize it
/// from a JSON object whose keys are any spelling [`PropKey`] accepts.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FlexProps {
    /// `flex-direction`.
    pub flex_direction: Option<FlexDirection>,
    /// `flex-wrap`.
    pub flex_wrap: Option<FlexWrap>,
    /// `justify-content`.
    pub justify_content: Option<JustifyContent>,
    /// `align-items`.
    pub align_items: Option<AlignItems>,
    /// `align-content`.
    pub align_content: Option<JustifyContent>,
    /// `align-self`.
    pub align_self: Option<AlignItems>,
    /// Margins in world units.
    pub margin: EdgeValues,
    /// Padding in world units.
    pub padding: EdgeValues,
    /// Gap in both directions.
    pub gap: Option<f32>,
    /// Gap between rows.
    pub row_gap: Option<f32>,
    /// Gap between columns.
    pub column_gap: Option<f32>,
    /// Preferred width.
    pub width: Option<Dimension>,
    /// Preferred height.
    pub height: Option<Dimension>,
    /// Minimum width.
    pub min_width: Option<Dimension>,
    /// Minimum height.
    pub min_height: Option<Dimension>,
    /// Maximum width.
    pub max_width: Option<Dimension>,
    /// Maximum height.
    pub max_height: Option<Dimension>,
    /// `flex-basis`.
    pub flex_basis: Option<Dimension>,
    /// `flex-grow`.
    pub flex_grow: Option<f32>,
    /// `flex-shrink`.
    pub flex_shrink: Option<f32>,
    /// Width / height ratio.
    pub aspect_ratio: Option<f32>,
    /// Positioning scheme.
    pub position_type: Option<PositionType>,
    /// Insets.
    pub inset: Insets,
    /// Participation in layout.
    pub display: Option<Display>,
    /// Skip the solved size and center the box on its own measured content.
    pub center_anchor: bool,
    /// Override of the depth offset subtracted from the root start corner.
    pub depth_offset: Option<f32>,
}

impl FlexProps {
    /// Empty options: every property keeps its solver default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`FlexProps::set`].
    pub fn with(mut self, name: &str, value: impl Into<PropValue>) -> FlexResult<Self> {
        self.set(name, value)?;
        Ok(self)
    }

    /// Set an option by name. Unknown names and values of the wrong kind are config errors.
    pub fn set(&mut self, name: &str, value: impl Into<PropValue>) -> FlexResult<()> {
        let key = PropKey::from_str(name)?;
        self.set_key(key, value.into()).map_err(|e| match e {
            FlexError::Config(msg) => FlexError::config(format!("property '{name}': {msg}")),
            other => other,
        })
    }

    /// Set an option by resolved key.
    pub fn set_key(&mut self, key: PropKey, value: PropValue) -> FlexResult<()> {
        match key {
            PropKey::FlexDirection
            | PropKey::FlexWrap
            | PropKey::JustifyContent
            | PropKey::AlignItems
            | PropKey::AlignContent
            | PropKey::AlignSelf
            | PropKey::PositionType
            | PropKey::Display => {
                let s = match value {
                    PropValue::Str(s) => s,
                    other => return Err(wrong_kind("a name", &other)),
                };
                self.set_enum(key, &s)?;
            }
            PropKey::Margin(edge) => *self.margin.slot(edge) = Some(number(value)?),
            PropKey::Padding(edge) => *self.padding.slot(edge) = Some(number(value)?),
            PropKey::Gap(Gutter::All) => self.gap = Some(number(value)?),
            PropKey::Gap(Gutter::Row) => self.row_gap = Some(number(value)?),
            PropKey::Gap(Gutter::Column) => self.column_gap = Some(number(value)?),
            PropKey::Width => self.width = Some(parse_dimension(value)?),
            PropKey::Height => self.height = Some(parse_dimension(value)?),
            PropKey::MinWidth => self.min_width = Some(parse_dimension(value)?),
            PropKey::MinHeight => self.min_height = Some(parse_dimension(value)?),
            PropKey::MaxWidth => self.max_width = Some(parse_dimension(value)?),
            PropKey::MaxHeight => self.max_height = Some(parse_dimension(value)?),
            PropKey::FlexBasis => self.flex_basis = Some(parse_dimension(value)?),
            PropKey::Inset(edge) => {
                let d = parse_dimension(value)?;
                let (left, right, top, bottom) = edge.covers();
                for (covered, slot) in [
                    (left, &mut self.inset.left),
                    (right, &mut self.inset.right),
                    (top, &mut self.inset.top),
                    (bottom, &mut self.inset.bottom),
                ] {
                    if covered {
                        *slot = Some(d);
                    }
                }
            }
            PropKey::FlexGrow => self.flex_grow = Some(number(value)?),
            PropKey::FlexShrink => self.flex_shrink = Some(number(value)?),
            PropKey::AspectRatio => self.aspect_ratio = Some(number(value)?),
            PropKey::DepthOffset => self.depth_offset = Some(number(value)?),
            PropKey::CenterAnchor => {
                self.center_anchor = match value {
                    PropValue::Bool(b) => b,
                    other => return Err(wrong_kind("a boolean", &other)),
                };
            }
        }
        Ok(())
    }

    fn set_enum(&mut self, key: PropKey, raw: &str) -> FlexResult<()> {
        let name = raw.trim().to_ascii_lowercase().replace('_', "-");
        let bad = || FlexError::config(format!("unsupported value '{raw}'"));
        match key {
            PropKey::FlexDirection => {
                self.flex_direction = Some(match name.as_str() {
                    "row" => FlexDirection::Row,
                    "column" => FlexDirection::Column,
                    "row-reverse" => FlexDirection::RowReverse,
                    "column-reverse" => FlexDirection::ColumnReverse,
                    _ => return Err(bad()),
                });
            }
            PropKey::FlexWrap => {
                self.flex_wrap = Some(match name.as_str() {
                    "no-wrap" | "nowrap" => FlexWrap::NoWrap,
                    "wrap" => FlexWrap::Wrap,
                    "wrap-reverse" => FlexWrap::WrapReverse,
                    _ => return Err(bad()),
                });
            }
            PropKey::JustifyContent => {
                self.justify_content = Some(parse_justify(&name).ok_or_else(bad)?);
            }
            PropKey::AlignContent => {
                self.align_content = Some(parse_justify(&name).ok_or_else(bad)?);
            }
            PropKey::AlignItems => {
                self.align_items = Some(parse_align(&name).ok_or_else(bad)?);
            }
            PropKey::AlignSelf => {
                self.align_self = Some(parse_align(&name).ok_or_else(bad)?);
            }
            PropKey::PositionType => {
                self.position_type = Some(match name.as_str() {
                    "relative" => PositionType::Relative,
                    "absolute" => PositionType::Absolute,
                    _ => return Err(bad()),
                });
            }
            PropKey::Display => {
                self.display = Some(match name.as_str() {
                    "flex" => Display::Flex,
                    "none" => Display::None,
                    _ => return Err(bad()),
                });
            }
            other => {
                return Err(FlexError::config(format!("{other:?} does not take a name")));
            }
        }
        Ok(())
    }
}

impl<'de> Deserialize<'de> for FlexProps {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = BTreeMap::<String, PropValue>::deserialize(deserializer)?;
        let mut props = Self::default();
        for (name, value) in raw {
            props.set(&name, value).map_err(serde::de::Error::custom)?;
        }
        Ok(props)
    }
}

fn wrong_kind(expected: &str, got: &PropValue) -> FlexError {
    let got = match got {
        PropValue::Bool(_) => "a boolean",
        PropValue::Number(_) => "a number",
        PropValue::Str(_) => "a string",
    };
    FlexError::config(format!("expected {expected}, got {got}"))
}

fn number(value: PropValue) -> FlexResult<f32> {
    match value {
        PropValue::Number(v) => Ok(v),
        other => Err(wrong_kind("a number", &other)),
    }
}

fn parse_dimension(value: PropValue) -> FlexResult<Dimension> {
    let s = match value {
        PropValue::Number(v) => return Ok(Dimension::Points(v)),
        PropValue::Str(s) => s,
        other => return Err(wrong_kind("a number, \"auto\" or a percentage", &other)),
    };
    let t = s.trim();
    if t.eq_ignore_ascii_case("auto") {
        return Ok(Dimension::Auto);
    }
    if let Some(p) = t.strip_suffix('%') {
        return p
            .trim()
            .parse::<f32>()
            .map(Dimension::Percent)
            .map_err(|_| FlexError::config(format!("invalid percentage '{s}'")));
    }
    t.parse::<f32>()
        .map(Dimension::Points)
        .map_err(|_| FlexError::config(format!("invalid dimension '{s}'")))
}

fn parse_justify(name: &str) -> Option<JustifyContent> {
    Some(match name {
        "start" => JustifyContent::Start,
        "end" => JustifyContent::End,
        "flex-start" => JustifyContent::FlexStart,
        "flex-end" => JustifyContent::FlexEnd,
        "center" => JustifyContent::Center,
        "stretch" => JustifyContent::Stretch,
        "space-between" => JustifyContent::SpaceBetween,
        "space-around" => JustifyContent::SpaceAround,
        "space-evenly" => JustifyContent::SpaceEvenly,
        _ => return None,
    })
}

fn parse_align(name: &str) -> Option<AlignItems> {
    Some(match name {
        "start" => AlignItems::Start,
        "end" => AlignItems::End,
        "flex-start" => AlignItems::FlexStart,
        "flex-end" => AlignItems::FlexEnd,
        "center" => AlignItems::Center,
        "baseline" => AlignItems::Baseline,
        "stretch" => AlignItems::Stretch,
        _ => return None,
    })
}

/// Translate `props` into the ordered list of solver setter calls.
///
/// World-unit lengths (margin, padding, gap, insets and point-valued sizes) are multiplied by
/// `scale`; percentages, factors and flags are passed through unchanged. `center_anchor` and
/// `depth_offset` are projection options and never reach the solver.
pub fn layout_properties(props: &FlexProps, scale: f32) -> Vec<LayoutProperty> {
    let mut out = Vec::new();

    if let Some(v) = props.display {
        out.push(LayoutProperty::Display(v));
    }
    if let Some(v) = props.position_type {
        out.push(LayoutProperty::PositionType(v));
    }
    if let Some(v) = props.flex_direction {
        out.push(LayoutProperty::FlexDirection(v));
    }
    if let Some(v) = props.flex_wrap {
        out.push(LayoutProperty::FlexWrap(v));
    }
    if let Some(v) = props.justify_content {
        out.push(LayoutProperty::JustifyContent(v));
    }
    if let Some(v) = props.align_items {
        out.push(LayoutProperty::AlignItems(v));
    }
    if let Some(v) = props.align_content {
        out.push(LayoutProperty::AlignContent(v));
    }
    if let Some(v) = props.align_self {
        out.push(LayoutProperty::AlignSelf(v));
    }

    for (edge, v) in props.margin.ordered() {
        if let Some(v) = v {
            out.push(LayoutProperty::Margin(edge, v * scale));
        }
    }
    for (edge, v) in props.padding.ordered() {
        if let Some(v) = v {
            out.push(LayoutProperty::Padding(edge, v * scale));
        }
    }
    for (gutter, v) in [
        (Gutter::All, props.gap),
        (Gutter::Row, props.row_gap),
        (Gutter::Column, props.column_gap),
    ] {
        if let Some(v) = v {
            out.push(LayoutProperty::Gap(gutter, v * scale));
        }
    }

    let sizes: [(fn(Dimension) -> LayoutProperty, Option<Dimension>); 7] = [
        (LayoutProperty::Width, props.width),
        (LayoutProperty::Height, props.height),
        (LayoutProperty::MinWidth, props.min_width),
        (LayoutProperty::MinHeight, props.min_height),
        (LayoutProperty::MaxWidth, props.max_width),
        (LayoutProperty::MaxHeight, props.max_height),
        (LayoutProperty::FlexBasis, props.flex_basis),
    ];
    for (setter, d) in sizes {
        if let Some(d) = d {
            out.push(setter(d.scaled(scale)));
        }
    }

    if let Some(v) = props.flex_grow {
        out.push(LayoutProperty::FlexGrow(v));
    }
    if let Some(v) = props.flex_shrink {
        out.push(LayoutProperty::FlexShrink(v));
    }
    if let Some(v) = props.aspect_ratio {
        out.push(LayoutProperty::AspectRatio(Some(v)));
    }

    for (edge, d) in [
        (Edge::Left, props.inset.left),
        (Edge::Right, props.inset.right),
        (Edge::Top, props.inset.top),
        (Edge::Bottom, props.inset.bottom),
    ] {
        if let Some(d) = d {
            out.push(LayoutProperty::Inset(edge, d.scaled(scale)));
        }
    }

    out
}

/// Apply `props` to `node`. The first rejected setter aborts the application.
pub fn apply_props<S: LayoutSolver>(
    solver: &mut S,
    node: S::Node,
    props: &FlexProps,
    scale: f32,
) -> FlexResult<()> {
    for property in layout_properties(props, scale) {
        solver.set_property(node, property)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/layout/props.rs"]
mod tests;
