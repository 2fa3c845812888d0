use egui::{Pos2, Rect};

use super::{Segment, edge_segment};
use crate::graph::{Edge, GraphModel};

/// Distance from `point` to the closest point of the segment `line_start..line_end`.
pub fn distance_to_line_segment(point: Pos2, line_start: Pos2, line_end: Pos2) -> f32 {
    let line_vec = line_end - line_start;
    let point_vec = point - line_start;

    let line_len = line_vec.length();
    if line_len == 0.0 {
        return point_vec.length();
    }

    let t = (point_vec.dot(line_vec) / line_len).clamp(0.0, line_len);
    let projection = line_start + (line_vec * t / line_len);
    (point - projection).length()
}

/// Topmost edge passing within `tolerance` of `pos`.
pub fn edge_at(model: &GraphModel, pos: Pos2, tolerance: f32) -> Option<&Edge> {
    model.edges().rev().find(|edge| {
        edge_segment(model, edge)
            .is_some_and(|s| distance_to_line_segment(pos, s.start, s.end) <= tolerance)
    })
}

/// Whether any part of `segment` lies inside `rect`.
pub fn segment_intersects_rect(segment: &Segment, rect: Rect) -> bool {
    if rect.contains(segment.start) || rect.contains(segment.end) {
        return true;
    }
    if !segment.bounding_rect().intersects(rect) {
        return false;
    }
    let corners = [
        rect.left_top(),
        rect.right_top(),
        rect.right_bottom(),
        rect.left_bottom(),
    ];
    (0..4).any(|i| segments_cross(segment.start, segment.end, corners[i], corners[(i + 1) % 4]))
}

fn segments_cross(a: Pos2, b: Pos2, c: Pos2, d: Pos2) -> bool {
    let orient = |p: Pos2, q: Pos2, r: Pos2| (q - p).x * (r - p).y - (q - p).y * (r - p).x;
    let d1 = orient(c, d, a);
    let d2 = orient(c, d, b);
    let d3 = orient(a, b, c);
    let d4 = orient(a, b, d);
    (d1 * d2 <= 0.0) && (d3 * d4 <= 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn test_distance_to_line_segment() {
        let a = pos2(0.0, 0.0);
        let b = pos2(10.0, 0.0);
        assert_eq!(distance_to_line_segment(pos2(5.0, 3.0), a, b), 3.0);
        assert_eq!(distance_to_line_segment(pos2(-4.0, 3.0), a, b), 5.0);
        assert_eq!(distance_to_line_segment(pos2(3.0, 4.0), a, a), 5.0);
    }

    #[test]
    fn test_segment_crossing_rect_without_endpoints_inside() {
        let segment = Segment::new(pos2(-10.0, 5.0), pos2(20.0, 5.0));
        let rect = Rect::from_min_max(pos2(0.0, 0.0), pos2(10.0, 10.0));
        assert!(segment_intersects_rect(&segment, rect));

        let above = Segment::new(pos2(-10.0, -5.0), pos2(20.0, -5.0));
        assert!(!segment_intersects_rect(&above, rect));
    }
}
