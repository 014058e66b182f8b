//! Hit testing: point → element lookup.
//!
//! Walks the element list front-to-back in collection order and reports
//! the first element under the pointer, together with where on the
//! element the pointer sits (a resize handle or `Inside`).

use lc_core::Point;
use lc_core::geometry::{Position, distance};
use lc_core::model::{Coords, Element, Shape};

/// How close (per axis, exclusive) a point must be to a corner or endpoint.
pub const HANDLE_TOLERANCE: f64 = 5.0;

/// Triangle-inequality slack for a point to count as on a line.
pub const LINE_TOLERANCE: f64 = 1.0;

/// Looser slack for freehand stroke segments.
pub const STROKE_TOLERANCE: f64 = 5.0;

/// An element under the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit<'a> {
    pub element: &'a Element,
    pub position: Position,
}

fn near_point(x: f64, y: f64, px: f64, py: f64, position: Position) -> Option<Position> {
    ((x - px).abs() < HANDLE_TOLERANCE && (y - py).abs() < HANDLE_TOLERANCE).then_some(position)
}

fn on_line(a: Point, b: Point, c: Point, max_distance: f64) -> bool {
    let offset = distance(a, b) - (distance(a, c) + distance(b, c));
    offset.abs() < max_distance
}

fn within_box(x: f64, y: f64, c: &Coords) -> bool {
    x >= c.x1 && x <= c.x2 && y >= c.y1 && y <= c.y2
}

/// Where (x, y) lies on `element`, or `None` if it misses.
///
/// Rectangles report a corner when the point is within the handle
/// tolerance of it, but a point inside the box wins over every corner
/// except the top-left one. Lines and circles report their endpoints
/// first, then `Inside` when the point is colinear with them.
pub fn position_within_element(x: f64, y: f64, element: &Element) -> Option<Position> {
    match &element.shape {
        Shape::Rectangle(c) => near_point(x, y, c.x1, c.y1, Position::TopLeft)
            .or_else(|| within_box(x, y, c).then_some(Position::Inside))
            .or_else(|| near_point(x, y, c.x2, c.y1, Position::TopRight))
            .or_else(|| near_point(x, y, c.x1, c.y2, Position::BottomLeft))
            .or_else(|| near_point(x, y, c.x2, c.y2, Position::BottomRight)),
        Shape::Line(c) | Shape::Circle(c) => near_point(x, y, c.x1, c.y1, Position::Start)
            .or_else(|| near_point(x, y, c.x2, c.y2, Position::End))
            .or_else(|| {
                on_line(c.start(), c.end(), Point::new(x, y), LINE_TOLERANCE)
                    .then_some(Position::Inside)
            }),
        Shape::Pencil { points } => {
            let c = Point::new(x, y);
            let hit = match points.as_slice() {
                [only] => near_point(x, y, only.x, only.y, Position::Inside).is_some(),
                _ => points
                    .windows(2)
                    .any(|seg| on_line(seg[0], seg[1], c, STROKE_TOLERANCE)),
            };
            hit.then_some(Position::Inside)
        }
        Shape::Text(t) => within_box(x, y, &t.coords()).then_some(Position::Inside),
    }
}

/// First element (in collection order) under (x, y).
///
/// Earlier elements win over later ones when hit regions overlap.
pub fn get_element_at_position(x: f64, y: f64, elements: &[Element]) -> Option<Hit<'_>> {
    elements.iter().find_map(|element| {
        position_within_element(x, y, element).map(|position| Hit { element, position })
    })
}

/// CSS cursor for hovering at `position`.
pub fn cursor_for_position(position: Option<Position>) -> &'static str {
    match position {
        Some(Position::TopLeft | Position::BottomRight | Position::Start | Position::End) => {
            "nwse-resize"
        }
        Some(Position::TopRight | Position::BottomLeft) => "nesw-resize",
        Some(Position::Inside) => "move",
        None => "default",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lc_core::id::ElementId;
    use lc_core::model::{ElementKind, Stroke};
    use pretty_assertions::assert_eq;

    fn element(id: usize, kind: ElementKind, x1: f64, y1: f64, x2: f64, y2: f64) -> Element {
        Element::new(ElementId::new(id), x1, y1, x2, y2, kind, Stroke::default())
    }

    #[test]
    fn rectangle_corners_inside_and_miss() {
        let rect = element(0, ElementKind::Rectangle, 0.0, 0.0, 100.0, 100.0);
        assert_eq!(position_within_element(2.0, 2.0, &rect), Some(Position::TopLeft));
        assert_eq!(position_within_element(50.0, 50.0, &rect), Some(Position::Inside));
        assert_eq!(position_within_element(200.0, 200.0, &rect), None);
    }

    #[test]
    fn rectangle_inside_beats_other_corners() {
        let rect = element(0, ElementKind::Rectangle, 0.0, 0.0, 100.0, 100.0);
        assert_eq!(position_within_element(98.0, 2.0, &rect), Some(Position::Inside));
        assert_eq!(position_within_element(102.0, -2.0, &rect), Some(Position::TopRight));
        assert_eq!(position_within_element(-3.0, 103.0, &rect), Some(Position::BottomLeft));
        assert_eq!(position_within_element(104.0, 104.0, &rect), Some(Position::BottomRight));
    }

    #[test]
    fn rectangle_edges_are_inclusive() {
        let rect = element(0, ElementKind::Rectangle, 0.0, 0.0, 100.0, 100.0);
        assert_eq!(position_within_element(100.0, 50.0, &rect), Some(Position::Inside));
        assert_eq!(position_within_element(50.0, 0.0, &rect), Some(Position::Inside));
    }

    #[test]
    fn handle_tolerance_is_exclusive() {
        let rect = element(0, ElementKind::Rectangle, 0.0, 0.0, 100.0, 100.0);
        assert_eq!(position_within_element(-5.0, -1.0, &rect), None);
        assert_eq!(position_within_element(-4.9, -1.0, &rect), Some(Position::TopLeft));
    }

    #[test]
    fn line_colinearity() {
        let line = element(0, ElementKind::Line, 0.0, 0.0, 10.0, 10.0);
        assert_eq!(position_within_element(5.0, 5.0, &line), Some(Position::Inside));
        // Slack at (5, 6) is ~0.07, so it still counts as on the line.
        assert_eq!(position_within_element(5.0, 6.0, &line), Some(Position::Inside));
        // Slack at (5, 9) is ~1.25.
        assert_eq!(position_within_element(5.0, 9.0, &line), None);
    }

    #[test]
    fn line_endpoints_take_precedence() {
        let line = element(0, ElementKind::Line, 0.0, 0.0, 100.0, 0.0);
        assert_eq!(position_within_element(1.0, 1.0, &line), Some(Position::Start));
        assert_eq!(position_within_element(99.0, 0.0, &line), Some(Position::End));
        assert_eq!(position_within_element(50.0, 0.0, &line), Some(Position::Inside));
    }

    #[test]
    fn circle_hits_along_radius() {
        let circle = element(0, ElementKind::Circle, 50.0, 50.0, 80.0, 50.0);
        assert_eq!(position_within_element(50.0, 50.0, &circle), Some(Position::Start));
        assert_eq!(position_within_element(65.0, 50.0, &circle), Some(Position::Inside));
        assert_eq!(position_within_element(50.0, 80.0, &circle), None);
    }

    #[test]
    fn pencil_hits_near_segments() {
        let mut pencil = element(0, ElementKind::Pencil, 0.0, 0.0, 0.0, 0.0);
        pencil.shape = Shape::Pencil {
            points: vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0)],
        };
        assert_eq!(position_within_element(50.0, 1.0, &pencil), Some(Position::Inside));
        assert_eq!(position_within_element(50.0, 40.0, &pencil), None);

        let dot = element(1, ElementKind::Pencil, 10.0, 10.0, 10.0, 10.0);
        assert_eq!(position_within_element(12.0, 12.0, &dot), Some(Position::Inside));
        assert_eq!(position_within_element(30.0, 30.0, &dot), None);
    }

    #[test]
    fn text_hits_its_box() {
        let text = element(0, ElementKind::Text, 10.0, 10.0, 70.0, 34.0);
        assert_eq!(position_within_element(40.0, 20.0, &text), Some(Position::Inside));
        assert_eq!(position_within_element(80.0, 20.0, &text), None);
    }

    #[test]
    fn first_match_in_collection_order_wins() {
        let elements = vec![
            element(0, ElementKind::Rectangle, 0.0, 0.0, 100.0, 100.0),
            element(1, ElementKind::Rectangle, 40.0, 40.0, 60.0, 60.0),
        ];
        let hit = get_element_at_position(50.0, 50.0, &elements).unwrap();
        assert_eq!(hit.element.id, ElementId::new(0));
        assert_eq!(hit.position, Position::Inside);

        assert!(get_element_at_position(500.0, 500.0, &elements).is_none());
        assert!(get_element_at_position(0.0, 0.0, &[]).is_none());
    }

    #[test]
    fn cursors() {
        assert_eq!(cursor_for_position(Some(Position::TopLeft)), "nwse-resize");
        assert_eq!(cursor_for_position(Some(Position::End)), "nwse-resize");
        assert_eq!(cursor_for_position(Some(Position::BottomLeft)), "nesw-resize");
        assert_eq!(cursor_for_position(Some(Position::Inside)), "move");
        assert_eq!(cursor_for_position(None), "default");
    }
}
