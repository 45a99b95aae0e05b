use crate::geometry::Point;
use crate::rendering::primitives::Shape;
use serde::{Deserialize, Serialize};

/// Declarative description of one rendered chart wheel.
///
/// Built from scratch on every render; shapes are in paint order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WheelScene {
    pub width: f64,
    pub height: f64,
    pub center: Point,
    pub radius: f64,
    pub shapes: Vec<Shape>,
}

impl WheelScene {
    /// Create a new empty scene
    pub fn new(width: f64, height: f64, radius: f64) -> Self {
        Self {
            width,
            height,
            center: Point::new(width / 2.0, height / 2.0),
            radius,
            shapes: Vec::new(),
        }
    }

    pub fn spokes(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter().filter(|s| s.is_spoke())
    }

    pub fn markers(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter().filter(|s| s.is_marker())
    }

    pub fn labels(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter().filter(|s| s.is_label())
    }

    /// Marker center for a body, if it was drawn
    pub fn marker_for(&self, body: &str) -> Option<Point> {
        self.shapes.iter().find_map(|s| match s {
            Shape::BodyMarker { body_id, center, .. } if body_id == body => Some(*center),
            _ => None,
        })
    }
}
