//! Coordinate helpers shared by hit testing and the interaction layer.
//!
//! Positions name where a pointer sits relative to an element: one of
//! the rectangle corners, one of the endpoints of a line or circle, or
//! anywhere else on the element (`Inside`).

use crate::model::{Coords, Element, Shape};
use kurbo::Point;
use std::fmt;

/// Where a point lies on an element. Corner and endpoint variants are
/// resize handles; `Inside` means the element is grabbed for moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Start,
    End,
    Inside,
}

impl Position {
    /// Short tag used by the page: `"tl"`, `"tr"`, `"bl"`, `"br"`,
    /// `"start"`, `"end"`, `"inside"`.
    pub fn as_tag(self) -> &'static str {
        match self {
            Position::TopLeft => "tl",
            Position::TopRight => "tr",
            Position::BottomLeft => "bl",
            Position::BottomRight => "br",
            Position::Start => "start",
            Position::End => "end",
            Position::Inside => "inside",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "tl" => Some(Position::TopLeft),
            "tr" => Some(Position::TopRight),
            "bl" => Some(Position::BottomLeft),
            "br" => Some(Position::BottomRight),
            "start" => Some(Position::Start),
            "end" => Some(Position::End),
            "inside" => Some(Position::Inside),
            _ => None,
        }
    }

    /// Whether grabbing here resizes rather than moves.
    pub fn is_handle(self) -> bool {
        self != Position::Inside
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

pub fn distance(a: Point, b: Point) -> f64 {
    a.distance(b)
}

/// Point halfway between `p1` and `p2`.
pub fn mid_point_btw(p1: Point, p2: Point) -> Point {
    Point::new(p1.x + (p2.x - p1.x) / 2.0, p1.y + (p2.y - p1.y) / 2.0)
}

/// Normalize corner coordinates after a draw or resize gesture.
///
/// Rectangles become (min, min)-(max, max). Everything else keeps its
/// two points but orders them so (x1, y1) is the lexicographically
/// smaller one (by x, then y). Pencil strokes have no corners and
/// yield `None`.
pub fn adjust_element_coordinates(element: &Element) -> Option<Coords> {
    let c = element.coords()?;
    Some(match element.shape {
        Shape::Rectangle(_) => Coords::new(
            c.x1.min(c.x2),
            c.y1.min(c.y2),
            c.x1.max(c.x2),
            c.y1.max(c.y2),
        ),
        _ => {
            if c.x1 < c.x2 || (c.x1 == c.x2 && c.y1 < c.y2) {
                c
            } else {
                Coords::new(c.x2, c.y2, c.x1, c.y1)
            }
        }
    })
}

/// New corner coordinates after dragging `handle` to (x, y).
///
/// Returns `None` for `Inside`, which is not a resize handle.
pub fn resized_coordinates(x: f64, y: f64, handle: Position, coords: Coords) -> Option<Coords> {
    let Coords { x1, y1, x2, y2 } = coords;
    match handle {
        Position::TopLeft | Position::Start => Some(Coords::new(x, y, x2, y2)),
        Position::TopRight => Some(Coords::new(x1, y, x, y2)),
        Position::BottomLeft => Some(Coords::new(x, y1, x2, y)),
        Position::BottomRight | Position::End => Some(Coords::new(x1, y1, x, y)),
        Position::Inside => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::ElementId;
    use crate::model::{ElementKind, Stroke};
    use pretty_assertions::assert_eq;

    fn element(kind: ElementKind, x1: f64, y1: f64, x2: f64, y2: f64) -> Element {
        Element::new(ElementId::new(0), x1, y1, x2, y2, kind, Stroke::default())
    }

    #[test]
    fn adjust_rectangle_to_min_max() {
        let rect = element(ElementKind::Rectangle, 10.0, 10.0, 0.0, 0.0);
        assert_eq!(
            adjust_element_coordinates(&rect),
            Some(Coords::new(0.0, 0.0, 10.0, 10.0))
        );

        let mixed = element(ElementKind::Rectangle, 10.0, 0.0, 0.0, 10.0);
        assert_eq!(
            adjust_element_coordinates(&mixed),
            Some(Coords::new(0.0, 0.0, 10.0, 10.0))
        );
    }

    #[test]
    fn adjust_line_orders_endpoints() {
        let backwards = element(ElementKind::Line, 20.0, 5.0, 10.0, 50.0);
        assert_eq!(
            adjust_element_coordinates(&backwards),
            Some(Coords::new(10.0, 50.0, 20.0, 5.0))
        );

        let vertical = element(ElementKind::Line, 3.0, 9.0, 3.0, 1.0);
        assert_eq!(
            adjust_element_coordinates(&vertical),
            Some(Coords::new(3.0, 1.0, 3.0, 9.0))
        );

        let forwards = element(ElementKind::Line, 0.0, 0.0, 1.0, 1.0);
        assert_eq!(
            adjust_element_coordinates(&forwards),
            Some(Coords::new(0.0, 0.0, 1.0, 1.0))
        );
    }

    #[test]
    fn adjust_pencil_has_no_corners() {
        let pencil = element(ElementKind::Pencil, 1.0, 1.0, 1.0, 1.0);
        assert_eq!(adjust_element_coordinates(&pencil), None);
    }

    #[test]
    fn resize_top_left_moves_first_corner() {
        let c = Coords::new(10.0, 10.0, 50.0, 50.0);
        assert_eq!(
            resized_coordinates(0.0, 5.0, Position::TopLeft, c),
            Some(Coords::new(0.0, 5.0, 50.0, 50.0))
        );
        assert_eq!(
            resized_coordinates(0.0, 5.0, Position::Start, c),
            Some(Coords::new(0.0, 5.0, 50.0, 50.0))
        );
    }

    #[test]
    fn resize_other_handles() {
        let c = Coords::new(10.0, 10.0, 50.0, 50.0);
        assert_eq!(
            resized_coordinates(60.0, 0.0, Position::TopRight, c),
            Some(Coords::new(10.0, 0.0, 60.0, 50.0))
        );
        assert_eq!(
            resized_coordinates(0.0, 70.0, Position::BottomLeft, c),
            Some(Coords::new(0.0, 10.0, 50.0, 70.0))
        );
        assert_eq!(
            resized_coordinates(80.0, 90.0, Position::BottomRight, c),
            Some(Coords::new(10.0, 10.0, 80.0, 90.0))
        );
        assert_eq!(
            resized_coordinates(80.0, 90.0, Position::End, c),
            Some(Coords::new(10.0, 10.0, 80.0, 90.0))
        );
    }

    #[test]
    fn resize_with_non_handle_is_noop() {
        let c = Coords::new(10.0, 10.0, 50.0, 50.0);
        assert_eq!(resized_coordinates(1.0, 1.0, Position::Inside, c), None);
        let unknown = Position::from_tag("middle");
        assert_eq!(unknown, None);
        assert_eq!(
            unknown.and_then(|p| resized_coordinates(1.0, 1.0, p, c)),
            None
        );
    }

    #[test]
    fn position_tags_roundtrip() {
        for p in [
            Position::TopLeft,
            Position::TopRight,
            Position::BottomLeft,
            Position::BottomRight,
            Position::Start,
            Position::End,
            Position::Inside,
        ] {
            assert_eq!(Position::from_tag(p.as_tag()), Some(p));
        }
    }

    #[test]
    fn midpoint_and_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(6.0, 8.0);
        assert_eq!(distance(a, b), 10.0);
        assert_eq!(mid_point_btw(a, b), Point::new(3.0, 4.0));
    }
}
