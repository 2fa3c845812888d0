//! PNG export of the whole diagram.
//!
//! The diagram is described as an SVG scene covering its bounding box plus a
//! margin, rasterized with resvg onto a background-filled pixmap, flattened to
//! RGB and encoded as PNG.

use std::fmt::Write as _;
use std::fs;
use std::io::Cursor;
use std::path::Path;

use egui::{Color32, Rect};
use image::{ImageFormat, RgbImage};

use crate::error::ExportError;
use crate::geometry::{edge_bounds, edge_segment};
use crate::graph::GraphModel;
use crate::style;

pub type ExportResult<T> = Result<T, ExportError>;

/// Bounding box of every node rectangle and every edge (arrowheads included).
///
/// An empty model yields a zero-sized rectangle at the origin.
pub fn scene_bounds(model: &GraphModel) -> Rect {
    let nodes = model.nodes().map(|node| node.rect());
    let edges = model
        .edges()
        .filter_map(|edge| edge_segment(model, edge))
        .map(|segment| edge_bounds(&segment));
    nodes
        .chain(edges)
        .reduce(|a, b| a.union(b))
        .unwrap_or(Rect::ZERO)
}

/// The scene area that ends up in the image: the bounds plus the export margin.
pub fn export_rect(model: &GraphModel) -> Rect {
    if model.node_count() == 0 {
        return Rect::ZERO;
    }
    scene_bounds(model).expand(style::EXPORT_MARGIN)
}

/// Pixel dimensions for `rect`, never smaller than 1x1.
pub fn image_size(rect: Rect) -> (u32, u32) {
    let side = |len: f32| (len.ceil() as u32).max(1);
    (side(rect.width()), side(rect.height()))
}

/// Rasterize the diagram into an RGB image.
pub fn render_image(model: &GraphModel) -> ExportResult<RgbImage> {
    let rect = export_rect(model);
    let (width, height) = image_size(rect);
    let svg = build_svg(model, rect, width, height);

    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();
    let tree = usvg::Tree::from_str(&svg, &options)?;

    let mut pixmap =
        tiny_skia::Pixmap::new(width, height).ok_or(ExportError::PixmapAlloc { width, height })?;
    let bg = style::BACKGROUND;
    pixmap.fill(tiny_skia::Color::from_rgba8(bg.r(), bg.g(), bg.b(), 255));
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    // The background is opaque, so dropping alpha loses nothing.
    let rgb: Vec<u8> = pixmap
        .data()
        .chunks_exact(4)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect();
    RgbImage::from_raw(width, height, rgb).ok_or(ExportError::PixmapAlloc { width, height })
}

/// Render the diagram and write it to `path` as PNG.
pub fn export_png(model: &GraphModel, path: &Path) -> ExportResult<()> {
    let image = render_image(model)?;
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    fs::write(path, bytes)?;
    log::info!(
        "Exported {}x{} image to {}",
        image.width(),
        image.height(),
        path.display()
    );
    Ok(())
}

/// SVG description of the diagram, with the viewBox placed on `rect`.
///
/// Edges come first so that nodes are painted over them.
pub fn build_svg(model: &GraphModel, rect: Rect, width: u32, height: u32) -> String {
    let mut svg = String::new();
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="{} {} {width} {height}">"#,
        rect.min.x, rect.min.y
    );

    let edge_color = svg_color(style::EDGE_COLOR);
    for edge in model.edges() {
        let Some(segment) = edge_segment(model, edge) else {
            continue;
        };
        let _ = write!(
            svg,
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{edge_color}" stroke-width="{}"/>"#,
            segment.start.x,
            segment.start.y,
            segment.end.x,
            segment.end.y,
            style::EDGE_WIDTH
        );
        let points = segment
            .arrow_head()
            .points()
            .iter()
            .map(|p| format!("{},{}", p.x, p.y))
            .collect::<Vec<_>>()
            .join(" ");
        let _ = write!(
            svg,
            r#"<polygon points="{points}" fill="{edge_color}" stroke="{edge_color}" stroke-width="1"/>"#
        );
    }

    for node in model.nodes() {
        let r = node.rect();
        let clip_id = format!("clip-{}", node.id());
        let _ = write!(
            svg,
            r#"<clipPath id="{clip_id}"><rect x="{}" y="{}" width="{}" height="{}"/></clipPath>"#,
            r.min.x,
            r.min.y,
            r.width(),
            r.height()
        );
        let _ = write!(
            svg,
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}" stroke="{}" stroke-width="{}"/>"#,
            r.min.x,
            r.min.y,
            r.width(),
            r.height(),
            svg_color(style::NODE_FILL),
            svg_color(style::NODE_BORDER),
            style::NODE_BORDER_WIDTH
        );
        let _ = write!(
            svg,
            r#"<text clip-path="url(#{clip_id})" xml:space="preserve" font-family="sans-serif" font-size="{}" fill="{}">"#,
            style::FONT_SIZE,
            svg_color(style::NODE_TEXT)
        );
        let x = r.min.x + style::NODE_TEXT_INSET;
        for (i, line) in wrap_text(&node.text).iter().enumerate() {
            let y = r.min.y + style::NODE_TEXT_INSET + style::FONT_SIZE * (1.0 + 1.2 * i as f32);
            let _ = write!(svg, r#"<tspan x="{x}" y="{y}">{}</tspan>"#, escape_xml(line));
        }
        svg.push_str("</text>");
    }

    svg.push_str("</svg>");
    svg
}

/// Characters that fit on one label line, estimated from the font size.
fn chars_per_line() -> usize {
    ((style::NODE_TEXT_WRAP_WIDTH / (style::FONT_SIZE * AVERAGE_GLYPH_WIDTH)) as usize).max(1)
}

/// Average advance of a sans-serif glyph, as a fraction of the font size.
const AVERAGE_GLYPH_WIDTH: f32 = 0.55;

/// Split a label into the lines drawn inside its node: hard breaks first,
/// then word wrapping at the label width.
fn wrap_text(text: &str) -> Vec<String> {
    let max = chars_per_line();
    text.lines().flat_map(|line| wrap_line(line, max)).collect()
}

/// Greedy word wrap of a single line. Spaces are kept as typed; words longer
/// than a line are split.
fn wrap_line(line: &str, max: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for (i, word) in line.split(' ').enumerate() {
        if i == 0 {
            current.push_str(word);
            continue;
        }
        let len = current.chars().count() + 1 + word.chars().count();
        if len <= max || current.trim().is_empty() {
            current.push(' ');
            current.push_str(word);
        } else {
            push_chunks(&mut lines, &current, max);
            current = word.to_owned();
        }
    }
    push_chunks(&mut lines, &current, max);
    lines
}

fn push_chunks(lines: &mut Vec<String>, text: &str, max: usize) {
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        lines.push(String::new());
        return;
    }
    lines.extend(chars.chunks(max).map(|chunk| chunk.iter().collect()));
}

fn svg_color(color: Color32) -> String {
    format!("rgb({},{},{})", color.r(), color.g(), color.b())
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn test_empty_model_clamps_to_one_pixel() {
        let model = GraphModel::new();
        assert_eq!(export_rect(&model), Rect::ZERO);
        assert_eq!(image_size(export_rect(&model)), (1, 1));
    }

    #[test]
    fn test_bounds_cover_nodes_plus_margin() {
        let mut model = GraphModel::new();
        model.add_node(pos2(0.0, 0.0), "A");
        model.add_node(pos2(200.0, 100.0), "B");

        let rect = export_rect(&model);
        assert_eq!(rect.min, pos2(-20.0, -20.0));
        assert_eq!(rect.max, pos2(380.0, 180.0));
        assert_eq!(image_size(rect), (400, 200));
    }

    #[test]
    fn test_svg_escapes_node_text() {
        let mut model = GraphModel::new();
        model.add_node(pos2(0.0, 0.0), "a < b & \"c\"");
        let svg = build_svg(&model, export_rect(&model), 200, 100);
        assert!(svg.contains("a &lt; b &amp; &quot;c&quot;"));
        assert!(!svg.contains("a < b"));
    }

    #[test]
    fn test_long_labels_wrap_within_node() {
        let mut model = GraphModel::new();
        model.add_node(
            pos2(0.0, 0.0),
            "alpha beta gamma delta epsilon zeta eta theta iota kappa lambda",
        );
        let svg = build_svg(&model, export_rect(&model), 200, 100);
        assert!(svg.matches("<tspan").count() > 1);
    }

    #[test]
    fn test_wrap_line_breaks_at_words_and_splits_long_words() {
        assert_eq!(wrap_line("aaaa bbbb cccc", 9), vec!["aaaa bbbb", "cccc"]);
        assert_eq!(wrap_line("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert_eq!(wrap_line("", 4), vec![""]);
        assert_eq!(wrap_text("one\n\ntwo"), vec!["one", "", "two"]);
    }

    #[test]
    fn test_label_whitespace_is_preserved() {
        let mut model = GraphModel::new();
        model.add_node(pos2(0.0, 0.0), "  a  b");
        let svg = build_svg(&model, export_rect(&model), 200, 100);
        assert!(svg.contains(r#"xml:space="preserve""#));
        assert!(svg.contains(">  a  b</tspan>"));
    }

    #[test]
    fn test_edges_are_painted_before_nodes() {
        let mut model = GraphModel::new();
        let a = model.add_node(pos2(0.0, 0.0), "A").id();
        let b = model.add_node(pos2(300.0, 0.0), "B").id();
        model.add_edge(a, b).unwrap();

        let svg = build_svg(&model, export_rect(&model), 500, 100);
        let line = svg.find("<line").unwrap();
        let first_rect = svg.find("<rect x").unwrap();
        assert!(line < first_rect);
    }
}
