pub mod primitives;
pub mod scene;
pub mod style;
pub mod svg;
pub mod wheel;

pub use primitives::{Color, Shape, Stroke};
pub use scene::WheelScene;
pub use style::WheelStyle;
pub use svg::to_svg;
pub use wheel::{abbreviate, render_wheel, WheelRenderer};
