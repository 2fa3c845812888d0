//! Fixed look of the diagram, shared by the on-screen renderer and the PNG export.

use egui::{Color32, Vec2};

pub const NODE_WIDTH: f32 = 160.0;
pub const NODE_HEIGHT: f32 = 60.0;
pub const NODE_SIZE: Vec2 = Vec2::new(NODE_WIDTH, NODE_HEIGHT);

pub const NODE_FILL: Color32 = Color32::from_rgb(60, 60, 60);
pub const NODE_BORDER: Color32 = Color32::from_rgb(200, 200, 200);
pub const NODE_BORDER_WIDTH: f32 = 2.0;
pub const NODE_TEXT: Color32 = Color32::from_rgb(240, 240, 240);
/// Offset of the label from the node's top-left corner.
pub const NODE_TEXT_INSET: f32 = 5.0;
pub const NODE_TEXT_WRAP_WIDTH: f32 = NODE_WIDTH - 10.0;
pub const FONT_SIZE: f32 = 14.0;

pub const EDGE_COLOR: Color32 = Color32::from_rgb(240, 240, 240);
pub const EDGE_WIDTH: f32 = 2.0;
pub const ARROW_LENGTH: f32 = 10.0;
/// Half-angle between the two prongs of an arrowhead (30 degrees).
pub const ARROW_SPREAD: f32 = std::f32::consts::PI / 6.0;

pub const PREVIEW_COLOR: Color32 = Color32::from_rgb(200, 200, 200);
pub const PREVIEW_WIDTH: f32 = 2.0;
pub const PREVIEW_DASH: f32 = 6.0;
pub const PREVIEW_GAP: f32 = 4.0;

pub const SELECTION_COLOR: Color32 = Color32::from_rgb(90, 160, 255);
pub const RUBBER_BAND_FILL: Color32 = Color32::from_rgba_premultiplied(30, 60, 110, 60);

pub const BACKGROUND: Color32 = Color32::from_rgb(30, 30, 30);

/// How close (in scene units) a click must be to an edge to pick it.
pub const EDGE_HIT_TOLERANCE: f32 = 6.0;

/// Empty border around the exported image.
pub const EXPORT_MARGIN: f32 = 20.0;
