//! Element list → drawing-surface calls.
//!
//! A full redraw clears the surface, draws the underlay image, then
//! strokes every element in collection order. Pencil strokes are
//! smoothed by curving through the midpoints between samples.

use crate::surface::DrawingSurface;
use lc_core::geometry::{distance, mid_point_btw};
use lc_core::id::ElementId;
use lc_core::model::{Element, Shape};
use lc_core::Point;

/// Per-frame inputs to `render_scene` besides the elements themselves.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions<'a> {
    /// Element to leave out (the text element currently being typed).
    pub hidden: Option<ElementId>,
    /// Underlay image source, drawn beneath everything.
    pub underlay: Option<&'a str>,
    /// CSS font for text elements.
    pub font: &'a str,
}

impl Default for RenderOptions<'_> {
    fn default() -> Self {
        Self {
            hidden: None,
            underlay: None,
            font: "24px sans-serif",
        }
    }
}

/// Redraw the whole canvas.
pub fn render_scene(
    surface: &mut dyn DrawingSurface,
    elements: &[Element],
    options: &RenderOptions<'_>,
) {
    surface.clear();

    if let Some(src) = options.underlay {
        surface.draw_underlay(src);
    }

    for element in elements {
        if options.hidden == Some(element.id) {
            continue;
        }
        draw_element(surface, element, options.font);
    }
}

/// Draw a single element with its own stroke.
pub fn draw_element(surface: &mut dyn DrawingSurface, element: &Element, font: &str) {
    log::trace!("PAINT {} {}", element.kind(), element.id);
    surface.set_stroke(&element.stroke);

    match &element.shape {
        Shape::Line(c) => {
            surface.begin_path();
            surface.move_to(c.start());
            surface.line_to(c.end());
            surface.stroke();
        }
        Shape::Rectangle(c) => {
            surface.begin_path();
            surface.rect(c.x1, c.y1, c.width(), c.height());
            surface.stroke();
        }
        Shape::Circle(c) => {
            let radius = distance(c.start(), c.end());
            surface.begin_path();
            surface.arc(c.start(), radius);
            surface.stroke();
        }
        Shape::Pencil { points } => draw_freehand(surface, points),
        Shape::Text(t) => {
            surface.fill_text(&t.text, Point::new(t.x1, t.y1), element.stroke.color, font);
        }
    }
}

fn draw_freehand(surface: &mut dyn DrawingSurface, points: &[Point]) {
    let Some((&first, rest)) = points.split_first() else {
        return;
    };

    surface.begin_path();
    surface.move_to(first);
    let mut prev = first;
    for &p in rest {
        surface.quadratic_curve_to(prev, mid_point_btw(prev, p));
        prev = p;
    }
    // Finish on the last sample; a lone point becomes a round dot.
    surface.line_to(prev);
    surface.stroke();
}

/// Live preview of one freshly sampled pencil segment, drawn straight
/// onto the surface without a full redraw.
pub fn stroke_sketch_segment(surface: &mut dyn DrawingSurface, prev: Point, p: Point) {
    surface.quadratic_curve_to(prev, mid_point_btw(prev, p));
    surface.line_to(p);
    surface.stroke();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCall, RecordingSurface};
    use lc_core::model::{ElementKind, Stroke};
    use pretty_assertions::assert_eq;

    fn element(id: usize, kind: ElementKind, x1: f64, y1: f64, x2: f64, y2: f64) -> Element {
        Element::new(ElementId::new(id), x1, y1, x2, y2, kind, Stroke::default())
    }

    #[test]
    fn rectangle_draws_outline() {
        let mut surface = RecordingSurface::new();
        draw_element(
            &mut surface,
            &element(0, ElementKind::Rectangle, 10.0, 20.0, 50.0, 80.0),
            "24px sans-serif",
        );
        assert_eq!(
            surface.calls,
            vec![
                DrawCall::SetStroke(Stroke::default()),
                DrawCall::BeginPath,
                DrawCall::Rect(10.0, 20.0, 40.0, 60.0),
                DrawCall::Stroke,
            ]
        );
    }

    #[test]
    fn circle_radius_reaches_second_point() {
        let mut surface = RecordingSurface::new();
        draw_element(
            &mut surface,
            &element(0, ElementKind::Circle, 0.0, 0.0, 3.0, 4.0),
            "24px sans-serif",
        );
        assert!(surface.calls.contains(&DrawCall::Arc(Point::new(0.0, 0.0), 5.0)));
    }

    #[test]
    fn pencil_curves_through_midpoints() {
        let mut el = element(0, ElementKind::Pencil, 0.0, 0.0, 0.0, 0.0);
        el.shape = Shape::Pencil {
            points: vec![
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(10.0, 10.0),
            ],
        };
        let mut surface = RecordingSurface::new();
        draw_element(&mut surface, &el, "24px sans-serif");
        assert_eq!(
            surface.calls[1..].to_vec(),
            vec![
                DrawCall::BeginPath,
                DrawCall::MoveTo(Point::new(0.0, 0.0)),
                DrawCall::QuadraticCurveTo(Point::new(0.0, 0.0), Point::new(5.0, 0.0)),
                DrawCall::QuadraticCurveTo(Point::new(10.0, 0.0), Point::new(10.0, 5.0)),
                DrawCall::LineTo(Point::new(10.0, 10.0)),
                DrawCall::Stroke,
            ]
        );
    }

    #[test]
    fn scene_clears_draws_underlay_and_skips_hidden() {
        let elements = vec![
            element(0, ElementKind::Line, 0.0, 0.0, 10.0, 10.0),
            element(1, ElementKind::Text, 5.0, 5.0, 5.0, 5.0),
        ];
        let mut surface = RecordingSurface::new();
        render_scene(
            &mut surface,
            &elements,
            &RenderOptions {
                hidden: Some(ElementId::new(1)),
                underlay: Some("blob:photo"),
                ..RenderOptions::default()
            },
        );
        assert_eq!(surface.calls[0], DrawCall::Clear);
        assert_eq!(surface.calls[1], DrawCall::Underlay("blob:photo".to_string()));
        assert!(
            !surface
                .calls
                .iter()
                .any(|c| matches!(c, DrawCall::FillText(..)))
        );
        assert_eq!(surface.stroke_count(), 1);
    }

    #[test]
    fn text_is_filled_at_top_left() {
        let mut el = element(0, ElementKind::Text, 7.0, 9.0, 7.0, 9.0);
        if let Shape::Text(t) = &mut el.shape {
            t.text = "hello".to_string();
        }
        let mut surface = RecordingSurface::new();
        draw_element(&mut surface, &el, "24px sans-serif");
        assert_eq!(
            surface.calls.last(),
            Some(&DrawCall::FillText("hello".to_string(), Point::new(7.0, 9.0)))
        );
    }
}
