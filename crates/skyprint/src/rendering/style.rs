use crate::geometry::Point;
use crate::rendering::primitives::{Color, Stroke};

/// Canvas size and styling of the chart wheel
#[derive(Debug, Clone, PartialEq)]
pub struct WheelStyle {
    /// Square canvas edge in pixels
    pub size: f64,
    pub radius: f64,
    pub background_fill: Color,
    pub background_stroke: Stroke,
    pub spoke_stroke: Stroke,
    pub marker_radius: f64,
    pub marker_fill: Color,
    /// Label offset from its marker (x right, y down)
    pub label_offset: (f64, f64),
    pub label_size: f64,
}

impl WheelStyle {
    pub fn center(&self) -> Point {
        Point::new(self.size / 2.0, self.size / 2.0)
    }
}

impl Default for WheelStyle {
    fn default() -> Self {
        Self {
            size: 320.0,
            radius: 150.0,
            background_fill: Color::WHITE,
            background_stroke: Stroke {
                color: Color::from_hex("#ddd").unwrap_or(Color::WHITE),
                width: 1.0,
            },
            spoke_stroke: Stroke {
                color: Color::from_hex("#eee").unwrap_or(Color::WHITE),
                width: 1.0,
            },
            marker_radius: 6.0,
            marker_fill: Color::BLACK,
            label_offset: (8.0, 4.0),
            label_size: 10.0,
        }
    }
}
