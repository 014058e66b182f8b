//! WASM bridge for the lesson page canvas.
//!
//! Compiled via `wasm-pack build --target web` and loaded by the lesson
//! page. The page forwards DOM events here and calls `frame()` from
//! `requestAnimationFrame`.

mod canvas2d;
mod local_storage;

use canvas2d::Canvas2dSurface;
use lc_core::config::CanvasConfig;
use lc_core::model::Element;
use lc_editor::controller::CanvasController;
use lc_editor::input::{InputEvent, Modifiers};
use lc_editor::storage::MemoryStore;
use local_storage::LocalStorage;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlAnchorElement, HtmlCanvasElement};

/// The main WASM-facing canvas.
///
/// Holds the controller, the Canvas2D surface it draws on, and the store
/// it persists to.
#[wasm_bindgen]
pub struct LessonCanvas {
    controller: CanvasController,
    surface: Canvas2dSurface,
    storage: Option<LocalStorage>,
}

#[wasm_bindgen]
impl LessonCanvas {
    /// Attach to `canvas`. `config_json` is an optional partial
    /// `CanvasConfig` object.
    #[wasm_bindgen(constructor)]
    pub fn new(
        canvas: HtmlCanvasElement,
        config_json: Option<String>,
    ) -> Result<LessonCanvas, JsValue> {
        console_error_panic_hook_setup();
        console_logger_setup();

        let config = match config_json.as_deref() {
            Some(json) => CanvasConfig::from_json(json).map_err(|e| JsValue::from_str(&e))?,
            None => CanvasConfig::default(),
        };

        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| JsValue::from_str("2d context is not a CanvasRenderingContext2d"))?;

        let storage = LocalStorage::from_window();
        let controller = match &storage {
            Some(store) => CanvasController::restore(config, store),
            None => {
                log::warn!("localStorage unavailable; drawings will not persist");
                CanvasController::restore(config, &MemoryStore::new())
            }
        };

        Ok(Self {
            controller,
            surface: Canvas2dSurface::new(canvas, ctx),
            storage,
        })
    }

    // ─── Pointer, keyboard, text ─────────────────────────────────────────

    /// Handle pointer down. Returns `true` if state changed.
    pub fn handle_pointer_down(&mut self, x: f64, y: f64) -> bool {
        self.controller
            .handle(&InputEvent::PointerDown { x, y }, &mut self.surface)
    }

    /// Handle pointer move. Returns `true` if state changed.
    pub fn handle_pointer_move(&mut self, x: f64, y: f64) -> bool {
        self.controller
            .handle(&InputEvent::PointerMove { x, y }, &mut self.surface)
    }

    /// Handle pointer up. Returns `true` if state changed.
    pub fn handle_pointer_up(&mut self, x: f64, y: f64) -> bool {
        self.controller
            .handle(&InputEvent::PointerUp { x, y }, &mut self.surface)
    }

    /// Handle a keydown. Returns the triggered action's name, or an empty
    /// string if the key is unbound (the page should not prevent default).
    pub fn handle_key(
        &mut self,
        key: &str,
        shift: bool,
        ctrl: bool,
        alt: bool,
        meta: bool,
    ) -> String {
        let modifiers = Modifiers {
            shift,
            ctrl,
            alt,
            meta,
        };
        self.controller
            .key(key, modifiers)
            .map(|action| action.name().to_string())
            .unwrap_or_default()
    }

    /// The text-entry overlay lost focus with `text`.
    pub fn handle_text_blur(&mut self, text: &str) -> bool {
        self.controller.handle(
            &InputEvent::TextBlur {
                text: text.to_string(),
            },
            &mut self.surface,
        )
    }

    /// Where the page should show its text-entry overlay, as JSON
    /// `{"x":..,"y":..,"text":"..","color":"..","font":".."}`, or `"null"` when not
    /// writing.
    pub fn writing_overlay(&self) -> String {
        overlay_json(self.controller.writing_target(), &self.controller.config().font)
    }

    // ─── Tools and paint state ───────────────────────────────────────────

    pub fn set_tool(&mut self, name: &str) -> bool {
        self.controller.set_tool_by_name(name)
    }

    pub fn get_tool(&self) -> String {
        self.controller.tool().name().to_string()
    }

    /// CSS cursor for the canvas element.
    pub fn get_cursor(&self) -> String {
        self.controller.cursor().to_string()
    }

    pub fn set_color(&mut self, color: &str) -> bool {
        self.controller.set_color(color)
    }

    pub fn set_primary_color(&mut self, color: &str) -> bool {
        self.controller.set_primary_color(color)
    }

    pub fn set_secondary_color(&mut self, color: &str) -> bool {
        self.controller.set_secondary_color(color)
    }

    pub fn use_primary(&mut self) {
        self.controller.use_primary();
    }

    pub fn use_secondary(&mut self) {
        self.controller.use_secondary();
    }

    /// Palette colors from the config, as a JSON array of hex strings.
    pub fn palette(&self) -> String {
        let hex: Vec<String> = self
            .controller
            .config()
            .palette
            .iter()
            .map(|c| c.to_hex())
            .collect();
        serde_json::to_string(&hex).unwrap_or_else(|_| "[]".to_string())
    }

    /// Set the stroke width. Returns the clamped width actually applied.
    pub fn set_line_width(&mut self, width: f64) -> f64 {
        self.controller.set_line_width(width)
    }

    pub fn set_eraser(&mut self, erase: bool) {
        self.controller.set_eraser(erase);
    }

    pub fn toggle_eraser(&mut self) {
        self.controller.toggle_eraser();
    }

    // ─── History ─────────────────────────────────────────────────────────

    pub fn undo(&mut self) -> bool {
        self.controller.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.controller.redo()
    }

    pub fn can_undo(&self) -> bool {
        self.controller.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.controller.can_redo()
    }

    pub fn clear(&mut self) -> bool {
        self.controller.clear()
    }

    // ─── Image underlay and export ───────────────────────────────────────

    /// Use `file` as the underlay image. The canvas redraws once the image
    /// has loaded.
    pub fn upload_image(&mut self, file: Option<web_sys::File>) -> bool {
        let Some(file) = file else {
            log::debug!("No file selected");
            return false;
        };
        match web_sys::Url::create_object_url_with_blob(&file) {
            Ok(url) => {
                self.controller.set_underlay(Some(url));
                true
            }
            Err(e) => {
                log::warn!("Failed to create object URL: {e:?}");
                false
            }
        }
    }

    /// Save the canvas as a PNG through a temporary download link.
    pub fn download(&self, file_name: Option<String>) -> bool {
        let file_name =
            file_name.unwrap_or_else(|| self.controller.config().export_file_name.clone());
        match self.try_download(&file_name) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("PNG export failed: {e:?}");
                false
            }
        }
    }

    // ─── Frame ───────────────────────────────────────────────────────────

    /// Redraw if needed and mirror changes to storage. Call once per
    /// animation frame. Returns `true` if the canvas was redrawn.
    pub fn frame(&mut self) -> bool {
        if self.surface.take_underlay_loaded() {
            self.controller.request_redraw();
        }
        let redrawn = self.controller.render_if_dirty(&mut self.surface);
        if let Some(store) = &mut self.storage {
            self.controller.persist(store);
        }
        redrawn
    }

    /// Redraw immediately.
    pub fn render(&mut self) {
        self.controller.render(&mut self.surface);
    }
}

impl LessonCanvas {
    fn try_download(&self, file_name: &str) -> Result<(), JsValue> {
        let url = self.surface.canvas().to_data_url_with_type("image/png")?;
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let anchor = document
            .create_element("a")?
            .dyn_into::<HtmlAnchorElement>()
            .map_err(|_| JsValue::from_str("<a> is not an HtmlAnchorElement"))?;
        anchor.set_href(&url);
        anchor.set_download(file_name);
        anchor.click();
        Ok(())
    }
}

/// JSON description of the text-entry overlay for `target`.
fn overlay_json(target: Option<&Element>, font: &str) -> String {
    let Some(element) = target else {
        return "null".to_string();
    };
    let Some(coords) = element.coords() else {
        return "null".to_string();
    };
    serde_json::json!({
        "x": coords.x1,
        "y": coords.y1,
        "text": element.text().unwrap_or_default(),
        "color": element.stroke.color.to_hex(),
        "font": font,
    })
    .to_string()
}

// ─── Logging and panic hook for WASM debugging ───────────────────────────

fn console_logger_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        // A second canvas on the page finds the logger already installed.
        let _ = console_log::init_with_level(log::Level::Debug);
    }
}

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("Lesson canvas panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}
