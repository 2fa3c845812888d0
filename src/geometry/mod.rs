//! Edge geometry derived from the current node positions.
//!
//! Nothing here is cached: an edge's segment is recomputed from its two nodes
//! every time it is asked for, so moving a node needs no follow-up step to
//! keep its edges attached.

pub mod hit_testing;

use egui::{Pos2, Rect, Vec2};

use crate::graph::{Edge, GraphModel};
use crate::style::{ARROW_LENGTH, ARROW_SPREAD};

/// A straight line between two scene points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Pos2,
    pub end: Pos2,
}

impl Segment {
    pub fn new(start: Pos2, end: Pos2) -> Self {
        Self { start, end }
    }

    /// Direction of travel from `start` to `end`, in radians.
    pub fn angle(&self) -> f32 {
        let d = self.end - self.start;
        d.y.atan2(d.x)
    }

    pub fn bounding_rect(&self) -> Rect {
        Rect::from_two_pos(self.start, self.end)
    }

    /// Arrowhead pointing at `end`.
    pub fn arrow_head(&self) -> ArrowHead {
        let angle = self.angle();
        let prong = |a: f32| self.end - ARROW_LENGTH * Vec2::angled(a);
        ArrowHead {
            tip: self.end,
            left: prong(angle - ARROW_SPREAD),
            right: prong(angle + ARROW_SPREAD),
        }
    }
}

/// The filled triangle drawn at an edge's target end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowHead {
    pub tip: Pos2,
    pub left: Pos2,
    pub right: Pos2,
}

impl ArrowHead {
    pub fn points(&self) -> [Pos2; 3] {
        [self.tip, self.left, self.right]
    }

    pub fn bounding_rect(&self) -> Rect {
        Rect::from_points(&self.points())
    }
}

/// Segment between the centers of an edge's source and target nodes.
///
/// `None` only if one of the endpoints is missing from `model`, which the
/// graph's invariants rule out during normal operation.
pub fn edge_segment(model: &GraphModel, edge: &Edge) -> Option<Segment> {
    let source = model.node(edge.source())?;
    let target = model.node(edge.target())?;
    Some(Segment::new(source.center(), target.center()))
}

/// Everything an edge covers on screen: its line plus the arrowhead.
pub fn edge_bounds(segment: &Segment) -> Rect {
    segment.bounding_rect().union(segment.arrow_head().bounding_rect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    fn approx(a: Pos2, b: Pos2) -> bool {
        (a - b).length() < 1e-3
    }

    #[test]
    fn test_arrow_head_points_back_along_segment() {
        let segment = Segment::new(pos2(0.0, 0.0), pos2(100.0, 0.0));
        let head = segment.arrow_head();
        let dx = ARROW_LENGTH * ARROW_SPREAD.cos();
        let dy = ARROW_LENGTH * ARROW_SPREAD.sin();

        assert_eq!(head.tip, pos2(100.0, 0.0));
        assert!(approx(head.left, pos2(100.0 - dx, dy)));
        assert!(approx(head.right, pos2(100.0 - dx, -dy)));
    }

    #[test]
    fn test_edge_bounds_include_arrow_head() {
        let segment = Segment::new(pos2(0.0, 0.0), pos2(100.0, 0.0));
        let bounds = edge_bounds(&segment);
        assert!(bounds.height() > 0.0);
        assert_eq!(bounds.max.x, 100.0);
    }
}
