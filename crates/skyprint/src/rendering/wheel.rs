use crate::chart::{HouseCusps, Planets};
use crate::geometry::{angle_to_point, house_spoke_angles};
use crate::rendering::primitives::Shape;
use crate::rendering::scene::WheelScene;
use crate::rendering::style::WheelStyle;

/// Builds a [`WheelScene`] from chart positions
pub struct WheelRenderer {
    style: WheelStyle,
}

impl WheelRenderer {
    /// Create a renderer with the default 320px wheel
    pub fn new() -> Self {
        Self {
            style: WheelStyle::default(),
        }
    }

    pub fn with_style(style: WheelStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &WheelStyle {
        &self.style
    }

    /// Render background, 12 equal-house spokes from H1, then one marker and
    /// one label per body in `planets` order.
    pub fn render(&self, planets: &Planets, houses: &HouseCusps) -> WheelScene {
        let style = &self.style;
        let mut scene = WheelScene::new(style.size, style.size, style.radius);
        let center = scene.center;

        scene.shapes.push(Shape::Circle {
            center,
            radius: style.radius,
            fill: Some(style.background_fill),
            stroke: Some(style.background_stroke),
        });

        for (i, angle) in house_spoke_angles(houses.ascendant()).iter().enumerate() {
            scene.shapes.push(Shape::Spoke {
                house: (i + 1) as u8,
                from: center,
                to: angle_to_point(*angle, center, style.radius),
                stroke: style.spoke_stroke,
            });
        }

        // Overlapping longitudes are drawn on top of each other.
        for (body, position) in planets.iter() {
            let pos = angle_to_point(position.lon, center, style.radius);
            scene.shapes.push(Shape::BodyMarker {
                body_id: body.to_string(),
                center: pos,
                radius: style.marker_radius,
                fill: style.marker_fill,
            });
            scene.shapes.push(Shape::Label {
                body_id: body.to_string(),
                position: pos.offset(style.label_offset.0, style.label_offset.1),
                content: abbreviate(body),
                size: style.label_size,
            });
        }

        scene
    }
}

impl Default for WheelRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// First character of a body name ("Mars" and "Mercury" both become "M").
pub fn abbreviate(body: &str) -> String {
    body.chars().next().map(String::from).unwrap_or_default()
}

/// Render with the default style.
pub fn render_wheel(planets: &Planets, houses: &HouseCusps) -> WheelScene {
    WheelRenderer::new().render(planets, houses)
}
