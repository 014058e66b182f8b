//! Drawing-surface abstraction.
//!
//! The controller and the render pass draw through `DrawingSurface`
//! instead of reaching for a global canvas. The browser bridge backs it
//! with `CanvasRenderingContext2d`; tests use `RecordingSurface`.

use lc_core::model::{Color, Stroke};
use lc_core::Point;

/// An immediate-mode 2D drawing target, modeled on the Canvas2D API.
pub trait DrawingSurface {
    /// Erase everything.
    fn clear(&mut self);

    /// Set color, width, and compositing for subsequent strokes.
    /// Implementations use round caps and joins.
    fn set_stroke(&mut self, stroke: &Stroke);

    fn begin_path(&mut self);
    fn move_to(&mut self, p: Point);
    fn line_to(&mut self, p: Point);
    fn quadratic_curve_to(&mut self, ctrl: Point, end: Point);
    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    /// Full circle around `center`.
    fn arc(&mut self, center: Point, radius: f64);
    fn stroke(&mut self);
    fn close_path(&mut self);

    /// Fill `text` with its top-left corner at `at`.
    fn fill_text(&mut self, text: &str, at: Point, color: Color, font: &str);

    /// Advance width of `text` in `font`.
    fn measure_text(&mut self, text: &str, font: &str) -> f64;

    /// Draw the underlay image identified by `source` at the origin.
    /// Surfaces that have not finished loading it draw nothing.
    fn draw_underlay(&mut self, source: &str);
}

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear,
    SetStroke(Stroke),
    BeginPath,
    MoveTo(Point),
    LineTo(Point),
    QuadraticCurveTo(Point, Point),
    Rect(f64, f64, f64, f64),
    Arc(Point, f64),
    Stroke,
    ClosePath,
    FillText(String, Point),
    Underlay(String),
}

/// A surface that records calls instead of drawing. Text is measured
/// with a fixed advance per character.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    pub calls: Vec<DrawCall>,
    pub char_width: f64,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            char_width: 12.0,
        }
    }

    /// Drain and return everything recorded so far.
    pub fn take(&mut self) -> Vec<DrawCall> {
        std::mem::take(&mut self.calls)
    }

    /// Number of `Stroke` calls recorded.
    pub fn stroke_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Stroke))
            .count()
    }
}

impl DrawingSurface for RecordingSurface {
    fn clear(&mut self) {
        self.calls.push(DrawCall::Clear);
    }

    fn set_stroke(&mut self, stroke: &Stroke) {
        self.calls.push(DrawCall::SetStroke(*stroke));
    }

    fn begin_path(&mut self) {
        self.calls.push(DrawCall::BeginPath);
    }

    fn move_to(&mut self, p: Point) {
        self.calls.push(DrawCall::MoveTo(p));
    }

    fn line_to(&mut self, p: Point) {
        self.calls.push(DrawCall::LineTo(p));
    }

    fn quadratic_curve_to(&mut self, ctrl: Point, end: Point) {
        self.calls.push(DrawCall::QuadraticCurveTo(ctrl, end));
    }

    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.calls.push(DrawCall::Rect(x, y, width, height));
    }

    fn arc(&mut self, center: Point, radius: f64) {
        self.calls.push(DrawCall::Arc(center, radius));
    }

    fn stroke(&mut self) {
        self.calls.push(DrawCall::Stroke);
    }

    fn close_path(&mut self) {
        self.calls.push(DrawCall::ClosePath);
    }

    fn fill_text(&mut self, text: &str, at: Point, _color: Color, _font: &str) {
        self.calls.push(DrawCall::FillText(text.to_string(), at));
    }

    fn measure_text(&mut self, text: &str, _font: &str) -> f64 {
        text.chars().count() as f64 * self.char_width
    }

    fn draw_underlay(&mut self, source: &str) {
        self.calls.push(DrawCall::Underlay(source.to_string()));
    }
}
