pub mod geometry;
pub mod node;

pub use geometry::{Axis, Bounds, Point, Rect};
pub use node::{
    Anchor, ChildNode, Constraints, Frame, LayoutMode, NodeError, NodeGeometry, OtherNode,
    SceneNode,
};
