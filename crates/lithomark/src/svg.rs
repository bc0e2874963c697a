//! SVG preview serializer.
//!
//! Converts the composed polygon set into an SVG string with one
//! `<path>` element per polygon over a white background. Geometry is
//! uniformly scaled and y-flipped (layout y grows upward, SVG y grows
//! downward). This is a pure function with no I/O -- it returns a
//! `String`.

use std::fmt::Write;

use lm_core::{Poly, bounding_box};

pub fn render_preview(polys: &[Poly], scale: f64) -> String {
    let bbox = bounding_box(polys);
    let (min_x, max_y, width, height) = match bbox {
        Some(b) => (b.min.x, b.max.y, b.width() * scale, b.height() * scale),
        None => (0.0, 0.0, 0.0, 0.0),
    };

    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    let _ = writeln!(
        out,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" \
         viewBox=\"0 0 {width} {height}\">"
    );
    let _ = writeln!(
        out,
        "  <rect x=\"0\" y=\"0\" width=\"{width}\" height=\"{height}\" fill=\"#ffffff\"/>"
    );

    for poly in polys {
        if poly.points.is_empty() {
            continue;
        }
        out.push_str("  <path d=\"");
        for (i, p) in poly.points.iter().enumerate() {
            let x = (p.x - min_x) * scale;
            let y = (max_y - p.y) * scale;
            let cmd = if i == 0 { 'M' } else { 'L' };
            let _ = write!(out, "{cmd}{x} {y} ");
        }
        out.push_str("Z\" fill=\"#000000\"/>\n");
    }

    out.push_str("</svg>\n");
    out
}
