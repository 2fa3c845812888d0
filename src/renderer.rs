use egui::{FontId, Painter, Pos2, Rect, Shape, Stroke, Vec2};

use crate::geometry::{Segment, edge_segment};
use crate::graph::{Edge, GraphModel, Node};
use crate::selection::Selection;
use crate::state::EditorContext;
use crate::style;

/// Paints the diagram and the in-progress gestures onto the canvas.
///
/// Scene coordinates are relative to the canvas' top-left corner; `render`
/// shifts everything by that corner.
#[derive(Debug, Default)]
pub struct Renderer {
    offset: Vec2,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders the current frame
    ///
    /// Args:
    ///     painter (egui::Painter): The painter to draw with
    ///     rect (egui::Rect): The canvas rectangle in screen space
    ///     context (EditorContext): The graph, selection and gesture to draw
    pub fn render(&mut self, painter: &Painter, rect: Rect, context: &EditorContext) {
        self.offset = rect.min.to_vec2();
        let painter = painter.with_clip_rect(rect);
        painter.rect_filled(rect, 0.0, style::BACKGROUND);

        let model = context.model();
        let selection = context.selection();

        for edge in model.edges() {
            self.draw_edge(&painter, model, edge, selection);
        }
        for node in model.nodes() {
            self.draw_node(&painter, node, selection.contains_node(node.id()));
        }

        if let Some(preview) = context.connection_preview() {
            self.draw_preview(&painter, &preview);
        }
        if let Some(band) = context.rubber_band() {
            let band = band.translate(self.offset);
            painter.rect_filled(band, 0.0, style::RUBBER_BAND_FILL);
            painter.rect_stroke(band, 0.0, Stroke::new(1.0, style::SELECTION_COLOR));
        }
    }

    fn to_screen(&self, pos: Pos2) -> Pos2 {
        pos + self.offset
    }

    fn draw_edge(&self, painter: &Painter, model: &GraphModel, edge: &Edge, selection: &Selection) {
        let Some(segment) = edge_segment(model, edge) else {
            return;
        };
        let color = if selection.contains_edge(edge.id()) {
            style::SELECTION_COLOR
        } else {
            style::EDGE_COLOR
        };
        painter.line_segment(
            [self.to_screen(segment.start), self.to_screen(segment.end)],
            Stroke::new(style::EDGE_WIDTH, color),
        );
        let points = segment
            .arrow_head()
            .points()
            .iter()
            .map(|p| self.to_screen(*p))
            .collect();
        painter.add(Shape::convex_polygon(points, color, Stroke::new(1.0, color)));
    }

    fn draw_node(&self, painter: &Painter, node: &Node, selected: bool) {
        let rect = node.rect().translate(self.offset);
        let border = if selected {
            style::SELECTION_COLOR
        } else {
            style::NODE_BORDER
        };
        painter.rect_filled(rect, 0.0, style::NODE_FILL);
        painter.rect_stroke(rect, 0.0, Stroke::new(style::NODE_BORDER_WIDTH, border));

        let galley = painter.layout(
            node.text.clone(),
            FontId::proportional(style::FONT_SIZE),
            style::NODE_TEXT,
            style::NODE_TEXT_WRAP_WIDTH,
        );
        let text_pos = rect.min + Vec2::splat(style::NODE_TEXT_INSET);
        painter
            .with_clip_rect(rect.intersect(painter.clip_rect()))
            .galley(text_pos, galley, style::NODE_TEXT);
    }

    fn draw_preview(&self, painter: &Painter, preview: &Segment) {
        let points = [self.to_screen(preview.start), self.to_screen(preview.end)];
        painter.extend(Shape::dashed_line(
            &points,
            Stroke::new(style::PREVIEW_WIDTH, style::PREVIEW_COLOR),
            style::PREVIEW_DASH,
            style::PREVIEW_GAP,
        ));
    }
}
