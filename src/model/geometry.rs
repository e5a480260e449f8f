use serde::{Deserialize, Serialize};

/// 2-D point, document or frame space depending on context.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self { Self { x, y } }
}

/// Axis-aligned rectangle as origin plus size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn max_x(&self) -> f64 { self.x + self.width }

    pub fn max_y(&self) -> f64 { self.y + self.height }
}

/// The two perpendicular document axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    X,
    Y,
}

/// Axis-aligned extent as min/max corners; the working form for all
/// bounds math in the engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self { min_x, min_y, max_x, max_y }
    }

    pub fn from_rect(rect: Rect) -> Self {
        Self {
            min_x: rect.x,
            min_y: rect.y,
            max_x: rect.max_x(),
            max_y: rect.max_y(),
        }
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self {
            min_x: self.min_x + dx,
            min_y: self.min_y + dy,
            max_x: self.max_x + dx,
            max_y: self.max_y + dy,
        }
    }

    pub fn width(&self) -> f64 { self.max_x - self.min_x }

    pub fn height(&self) -> f64 { self.max_y - self.min_y }

    /// Leading edge on the given axis.
    pub fn start(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.min_x,
            Axis::Y => self.min_y,
        }
    }

    /// Trailing edge on the given axis.
    pub fn end(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.max_x,
            Axis::Y => self.max_y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_from_rect_uses_far_corner() {
        let bounds = Bounds::from_rect(Rect::new(10.0, 20.0, 30.0, 40.0));
        assert_eq!(bounds, Bounds::new(10.0, 20.0, 40.0, 60.0));
        assert_eq!(bounds.width(), 30.0);
        assert_eq!(bounds.height(), 40.0);
    }

    #[test]
    fn axis_accessors_select_the_right_edges() {
        let bounds = Bounds::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(bounds.start(Axis::X), 1.0);
        assert_eq!(bounds.end(Axis::X), 3.0);
        assert_eq!(bounds.start(Axis::Y), 2.0);
        assert_eq!(bounds.end(Axis::Y), 4.0);
    }

    #[test]
    fn translated_moves_both_corners() {
        let bounds = Bounds::new(0.0, 0.0, 10.0, 10.0).translated(-3.0, 5.0);
        assert_eq!(bounds, Bounds::new(-3.0, 5.0, 7.0, 15.0));
    }
}
