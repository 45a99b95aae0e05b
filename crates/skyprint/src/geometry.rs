//! Polar wheel geometry.
//!
//! Zodiac convention: 0° sits at 12 o'clock and angles grow clockwise in
//! screen space (y grows downwards), so every angle is shifted by -90° before
//! the usual cosine/sine projection.

use serde::{Deserialize, Serialize};

/// Number of house divisions on the wheel
pub const HOUSE_COUNT: usize = 12;

/// Width of one equal house in degrees
pub const HOUSE_SPAN: f64 = 30.0;

/// Point in 2D screen space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn offset(&self, dx: f64, dy: f64) -> Point {
        Point {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Map a zodiac angle onto the circle of `radius` around `center`.
///
/// No range checks: any finite angle lands on the circle, NaN yields a NaN point.
pub fn angle_to_point(angle_degrees: f64, center: Point, radius: f64) -> Point {
    let radians = (angle_degrees - 90.0).to_radians();
    Point {
        x: center.x + radius * radians.cos(),
        y: center.y + radius * radians.sin(),
    }
}

/// Spoke angles for an equal-house wheel starting at the ascendant.
///
/// Angles are not wrapped into [0, 360); the projection is periodic.
pub fn house_spoke_angles(ascendant: f64) -> [f64; HOUSE_COUNT] {
    let mut angles = [0.0; HOUSE_COUNT];
    for (i, angle) in angles.iter_mut().enumerate() {
        *angle = ascendant + i as f64 * HOUSE_SPAN;
    }
    angles
}

#[cfg(test)]
mod tests {
    use super::*;

    const CENTER: Point = Point::new(160.0, 160.0);

    #[test]
    fn zero_degrees_is_top() {
        let p = angle_to_point(0.0, CENTER, 150.0);
        assert!((p.x - 160.0).abs() < 1e-9);
        assert!((p.y - 10.0).abs() < 1e-9);
    }

    #[test]
    fn ninety_degrees_is_right() {
        let p = angle_to_point(90.0, CENTER, 150.0);
        assert!((p.x - 310.0).abs() < 1e-9);
        assert!((p.y - 160.0).abs() < 1e-9);
    }

    #[test]
    fn one_eighty_is_bottom() {
        let p = angle_to_point(180.0, CENTER, 150.0);
        assert!((p.x - 160.0).abs() < 1e-9);
        assert!((p.y - 310.0).abs() < 1e-9);
    }

    #[test]
    fn nan_does_not_panic() {
        let p = angle_to_point(f64::NAN, CENTER, 150.0);
        assert!(p.x.is_nan());
    }

    #[test]
    fn spokes_step_by_thirty() {
        let angles = house_spoke_angles(0.0);
        let expected: Vec<f64> = (0..12).map(|i| i as f64 * 30.0).collect();
        assert_eq!(angles.to_vec(), expected);
    }

    #[test]
    fn spokes_are_not_wrapped() {
        let angles = house_spoke_angles(350.0);
        assert_eq!(angles[1], 380.0);
    }
}
