//! Canvas2D drawing surface.
//!
//! Backs `DrawingSurface` with an HTML `<canvas>` through
//! `CanvasRenderingContext2d`. Strokes use round caps and joins; eraser
//! strokes composite with `destination-out`.

use lc_core::model::{Color, Stroke};
use lc_core::Point;
use lc_render::surface::DrawingSurface;
use std::cell::Cell;
use std::f64::consts::TAU;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

/// The underlay image currently loaded (or loading).
struct Underlay {
    source: String,
    image: HtmlImageElement,
    _onload: Closure<dyn FnMut()>,
}

pub struct Canvas2dSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    underlay: Option<Underlay>,
    /// Raised by an underlay image's `onload`.
    underlay_loaded: Rc<Cell<bool>>,
}

impl Canvas2dSurface {
    pub fn new(canvas: HtmlCanvasElement, ctx: CanvasRenderingContext2d) -> Self {
        Self {
            canvas,
            ctx,
            underlay: None,
            underlay_loaded: Rc::new(Cell::new(false)),
        }
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Whether an underlay image finished loading since the last call.
    pub fn take_underlay_loaded(&self) -> bool {
        self.underlay_loaded.replace(false)
    }

    fn load_underlay(&mut self, source: &str) -> Option<&HtmlImageElement> {
        let stale = self
            .underlay
            .as_ref()
            .is_none_or(|underlay| underlay.source != source);
        if stale {
            let image = match HtmlImageElement::new() {
                Ok(image) => image,
                Err(e) => {
                    log::warn!("Failed to create underlay image: {e:?}");
                    return None;
                }
            };
            let loaded = Rc::clone(&self.underlay_loaded);
            let onload = Closure::<dyn FnMut()>::new(move || loaded.set(true));
            image.set_onload(Some(onload.as_ref().unchecked_ref()));
            image.set_src(source);
            self.underlay = Some(Underlay {
                source: source.to_string(),
                image,
                _onload: onload,
            });
        }
        self.underlay
            .as_ref()
            .map(|underlay| &underlay.image)
            .filter(|image| image.complete() && image.natural_width() > 0)
    }
}

impl DrawingSurface for Canvas2dSurface {
    fn clear(&mut self) {
        self.ctx.clear_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
    }

    fn set_stroke(&mut self, stroke: &Stroke) {
        let composite = if stroke.erase {
            "destination-out"
        } else {
            "source-over"
        };
        let _ = self.ctx.set_global_composite_operation(composite);
        self.ctx.set_stroke_style_str(&stroke.color.to_hex());
        self.ctx.set_line_width(stroke.width);
        self.ctx.set_line_cap("round");
        self.ctx.set_line_join("round");
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn move_to(&mut self, p: Point) {
        self.ctx.move_to(p.x, p.y);
    }

    fn line_to(&mut self, p: Point) {
        self.ctx.line_to(p.x, p.y);
    }

    fn quadratic_curve_to(&mut self, ctrl: Point, end: Point) {
        self.ctx.quadratic_curve_to(ctrl.x, ctrl.y, end.x, end.y);
    }

    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.rect(x, y, width, height);
    }

    fn arc(&mut self, center: Point, radius: f64) {
        let _ = self.ctx.arc(center.x, center.y, radius, 0.0, TAU);
    }

    fn stroke(&mut self) {
        self.ctx.stroke();
    }

    fn close_path(&mut self) {
        self.ctx.close_path();
    }

    fn fill_text(&mut self, text: &str, at: Point, color: Color, font: &str) {
        self.ctx.set_font(font);
        self.ctx.set_text_baseline("top");
        self.ctx.set_fill_style_str(&color.to_hex());
        let _ = self.ctx.fill_text(text, at.x, at.y);
    }

    fn measure_text(&mut self, text: &str, font: &str) -> f64 {
        self.ctx.set_font(font);
        match self.ctx.measure_text(text) {
            Ok(metrics) => metrics.width(),
            Err(e) => {
                log::warn!("measureText failed: {e:?}");
                0.0
            }
        }
    }

    fn draw_underlay(&mut self, source: &str) {
        let Some(image) = self.load_underlay(source).cloned() else {
            return;
        };
        let _ = self.ctx.set_global_composite_operation("source-over");
        let _ = self
            .ctx
            .draw_image_with_html_image_element(&image, 0.0, 0.0);
    }
}
