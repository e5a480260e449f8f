use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::geometry::{Axis, Point, Rect};

/// Why the host refused a node mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NodeError {
    #[error("node is locked by the host")]
    Locked,
    #[error("node has no position fields")]
    NoPosition,
    #[error("node cannot be resized")]
    NotResizable,
    #[error("node has no constraints")]
    NoConstraints,
    #[error("frame has no shared item spacing")]
    NoItemSpacing,
}

/// Anchoring of a child edge within its parent frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Anchor {
    #[default]
    Min,
    Max,
    Center,
    Stretch,
    Scale,
}

/// Per-child layout constraints, one anchor per axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Constraints {
    pub horizontal: Anchor,
    pub vertical: Anchor,
}

impl Constraints {
    /// Neutral top/left anchoring installed while a frame is being resized
    /// so the host's own constraint handling does not fight the engine.
    pub const NEUTRAL: Constraints = Constraints {
        horizontal: Anchor::Min,
        vertical: Anchor::Min,
    };
}

/// Stacking direction a frame declares for its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutMode {
    #[default]
    None,
    Horizontal,
    Vertical,
}

/// Geometry capabilities of a child as a closed set of variants. Host
/// node classes either expose direct position/size fields, expose only an
/// absolute render rectangle, or expose nothing measurable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeGeometry {
    Placed {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        resizable: bool,
    },
    RenderBounds { bounds: Rect },
    None,
}

/// A node nested directly under a frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildNode {
    pub name: String,
    #[serde(default = "yes")]
    pub visible: bool,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub constraints: Option<Constraints>,
    pub geometry: NodeGeometry,
}

impl ChildNode {
    pub fn placed(name: &str, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            name: name.to_string(),
            visible: true,
            locked: false,
            constraints: Some(Constraints::default()),
            geometry: NodeGeometry::Placed {
                x,
                y,
                width,
                height,
                resizable: true,
            },
        }
    }

    pub fn render_only(name: &str, bounds: Rect) -> Self {
        Self {
            name: name.to_string(),
            visible: true,
            locked: false,
            constraints: None,
            geometry: NodeGeometry::RenderBounds { bounds },
        }
    }

    pub fn bare(name: &str) -> Self {
        Self {
            name: name.to_string(),
            visible: true,
            locked: false,
            constraints: None,
            geometry: NodeGeometry::None,
        }
    }

    pub fn has_position(&self) -> bool {
        matches!(self.geometry, NodeGeometry::Placed { .. })
    }

    pub fn is_resizable(&self) -> bool {
        matches!(self.geometry, NodeGeometry::Placed { resizable: true, .. })
    }

    pub fn position(&self) -> Option<Point> {
        match self.geometry {
            NodeGeometry::Placed { x, y, .. } => Some(Point::new(x, y)),
            _ => None,
        }
    }

    pub fn size(&self) -> Option<(f64, f64)> {
        match self.geometry {
            NodeGeometry::Placed { width, height, .. } => Some((width, height)),
            _ => None,
        }
    }

    pub fn render_bounds(&self) -> Option<Rect> {
        match self.geometry {
            NodeGeometry::RenderBounds { bounds } => Some(bounds),
            _ => None,
        }
    }

    /// Whether the vertical constraint ties this child to the frame's
    /// bottom edge.
    pub fn is_bottom_anchored(&self) -> bool {
        self.constraints.map_or(false, |c| c.vertical == Anchor::Max)
    }

    pub fn set_position(&mut self, x: f64, y: f64) -> Result<(), NodeError> {
        if self.locked {
            return Err(NodeError::Locked);
        }
        match &mut self.geometry {
            NodeGeometry::Placed { x: px, y: py, .. } => {
                *px = x;
                *py = y;
                Ok(())
            }
            _ => Err(NodeError::NoPosition),
        }
    }

    pub fn shift_along(&mut self, axis: Axis, delta: f64) -> Result<(), NodeError> {
        if self.locked {
            return Err(NodeError::Locked);
        }
        match &mut self.geometry {
            NodeGeometry::Placed { x, y, .. } => {
                match axis {
                    Axis::X => *x += delta,
                    Axis::Y => *y += delta,
                }
                Ok(())
            }
            _ => Err(NodeError::NoPosition),
        }
    }

    pub fn resize_without_constraints(&mut self, width: f64, height: f64) -> Result<(), NodeError> {
        if self.locked {
            return Err(NodeError::Locked);
        }
        match &mut self.geometry {
            NodeGeometry::Placed {
                width: w,
                height: h,
                resizable: true,
                ..
            } => {
                *w = width;
                *h = height;
                Ok(())
            }
            _ => Err(NodeError::NotResizable),
        }
    }

    pub fn set_constraints(&mut self, constraints: Constraints) -> Result<(), NodeError> {
        if self.locked {
            return Err(NodeError::Locked);
        }
        match &mut self.constraints {
            Some(slot) => {
                *slot = constraints;
                Ok(())
            }
            None => Err(NodeError::NoConstraints),
        }
    }
}

/// A container node holding an ordered list of children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub name: String,
    pub x: f64,
    pub y: f64,
    width: f64,
    height: f64,
    #[serde(default)]
    pub rotation: f64,
    #[serde(default)]
    pub layout_mode: LayoutMode,
    #[serde(default)]
    item_spacing: Option<f64>,
    /// Translation of the parent's world transform; the frame's own
    /// absolute translation is `parent_offset + origin`.
    #[serde(default)]
    pub parent_offset: Point,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    relaunch_data: FxHashMap<String, String>,
    #[serde(default)]
    pub children: Vec<ChildNode>,
}

impl Frame {
    pub fn new(name: &str, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            name: name.to_string(),
            x,
            y,
            width,
            height,
            rotation: 0.0,
            layout_mode: LayoutMode::None,
            item_spacing: None,
            parent_offset: Point::default(),
            locked: false,
            relaunch_data: FxHashMap::default(),
            children: Vec::new(),
        }
    }

    /// Construction-time setter for stacked frames; runtime mutation goes
    /// through [`Frame::set_item_spacing`].
    pub fn with_item_spacing(mut self, spacing: f64) -> Self {
        self.item_spacing = Some(spacing);
        self
    }

    pub fn width(&self) -> f64 { self.width }

    pub fn height(&self) -> f64 { self.height }

    pub fn origin(&self) -> Point { Point::new(self.x, self.y) }

    /// Translation components of the frame's world transform.
    pub fn absolute_translation(&self) -> Point {
        Point::new(self.parent_offset.x + self.x, self.parent_offset.y + self.y)
    }

    pub fn item_spacing(&self) -> Option<f64> { self.item_spacing }

    /// Whether the shared spacing scalar is meaningful for this frame.
    pub fn supports_item_spacing(&self) -> bool {
        self.layout_mode != LayoutMode::None && self.item_spacing.is_some()
    }

    pub fn set_item_spacing(&mut self, spacing: f64) -> Result<(), NodeError> {
        if self.locked {
            return Err(NodeError::Locked);
        }
        if !self.supports_item_spacing() {
            return Err(NodeError::NoItemSpacing);
        }
        self.item_spacing = Some(spacing);
        Ok(())
    }

    pub fn resize_without_constraints(&mut self, width: f64, height: f64) -> Result<(), NodeError> {
        if self.locked {
            return Err(NodeError::Locked);
        }
        self.width = width;
        self.height = height;
        Ok(())
    }

    /// Host affordance for re-invoking the extension from the node.
    pub fn set_relaunch_data(&mut self, key: &str, value: &str) {
        self.relaunch_data.insert(key.to_string(), value.to_string());
    }

    pub fn relaunch_data(&self, key: &str) -> Option<&str> {
        self.relaunch_data.get(key).map(String::as_str)
    }
}

/// Anything that can appear in the user's selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SceneNode {
    Frame(Frame),
    Other(OtherNode),
}

/// A selected node the engine never processes (text, vectors, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OtherNode {
    pub name: String,
}

impl SceneNode {
    pub fn other(name: &str) -> Self {
        SceneNode::Other(OtherNode { name: name.to_string() })
    }

    pub fn is_frame(&self) -> bool { matches!(self, SceneNode::Frame(_)) }

    pub fn as_frame(&self) -> Option<&Frame> {
        match self {
            SceneNode::Frame(frame) => Some(frame),
            SceneNode::Other(_) => None,
        }
    }

    pub fn as_frame_mut(&mut self) -> Option<&mut Frame> {
        match self {
            SceneNode::Frame(frame) => Some(frame),
            SceneNode::Other(_) => None,
        }
    }
}

fn yes() -> bool { true }
