//! SVG materialisation of a [`WheelScene`].

use crate::rendering::primitives::{Color, Shape, Stroke};
use crate::rendering::scene::WheelScene;
use std::fmt::Write;

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Serialize a scene to a standalone SVG document.
pub fn to_svg(scene: &WheelScene) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_svg(&mut out, scene);
    out
}

fn write_svg(out: &mut String, scene: &WheelScene) -> std::fmt::Result {
    writeln!(
        out,
        r#"<svg xmlns="{}" width="{}" height="{}">"#,
        SVG_NS,
        fmt_num(scene.width),
        fmt_num(scene.height)
    )?;
    for shape in &scene.shapes {
        match shape {
            Shape::Circle {
                center,
                radius,
                fill,
                stroke,
            } => {
                writeln!(
                    out,
                    r#"  <circle cx="{}" cy="{}" r="{}" fill="{}"{}/>"#,
                    fmt_num(center.x),
                    fmt_num(center.y),
                    fmt_num(*radius),
                    fill.map(|c| c.to_css_string()).unwrap_or_else(|| "none".to_string()),
                    stroke_attrs(stroke.as_ref())
                )?;
            }
            Shape::Spoke { from, to, stroke, .. } => {
                writeln!(
                    out,
                    r#"  <line x1="{}" y1="{}" x2="{}" y2="{}"{}/>"#,
                    fmt_num(from.x),
                    fmt_num(from.y),
                    fmt_num(to.x),
                    fmt_num(to.y),
                    stroke_attrs(Some(stroke))
                )?;
            }
            Shape::BodyMarker {
                center,
                radius,
                fill,
                ..
            } => {
                writeln!(
                    out,
                    r#"  <circle cx="{}" cy="{}" r="{}" fill="{}"/>"#,
                    fmt_num(center.x),
                    fmt_num(center.y),
                    fmt_num(*radius),
                    fill_css(*fill)
                )?;
            }
            Shape::Label {
                position,
                content,
                size,
                ..
            } => {
                writeln!(
                    out,
                    r#"  <text x="{}" y="{}" font-size="{}">{}</text>"#,
                    fmt_num(position.x),
                    fmt_num(position.y),
                    fmt_num(*size),
                    escape(content)
                )?;
            }
        }
    }
    out.push_str("</svg>\n");
    Ok(())
}

fn stroke_attrs(stroke: Option<&Stroke>) -> String {
    match stroke {
        Some(s) => format!(
            r#" stroke="{}" stroke-width="{}""#,
            s.color.to_css_string(),
            fmt_num(s.width)
        ),
        None => String::new(),
    }
}

fn fill_css(color: Color) -> String {
    color.to_css_string()
}

/// Trim float noise so coordinates stay readable.
fn fmt_num(v: f64) -> String {
    let s = format!("{:.3}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
