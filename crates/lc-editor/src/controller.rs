//! Pointer interaction controller.
//!
//! Owns the element history and the interaction state machine. Every
//! DOM-level event is forwarded here; the controller decides how the
//! current tool and action interpret it, records the result in
//! `History`, and raises the redraw/persist flags the host polls once
//! per frame.
//!
//! Anything that draws or measures takes the surface as an explicit
//! `&mut dyn DrawingSurface` argument.

use crate::history::History;
use crate::input::{InputEvent, Modifiers};
use crate::shortcuts::{ShortcutAction, ShortcutMap};
use crate::storage::{KeyValueStore, load_elements, save_elements};
use crate::tools::{Action, ToolKind};
use kurbo::Vec2;
use lc_core::config::CanvasConfig;
use lc_core::geometry::{Position, adjust_element_coordinates, resized_coordinates};
use lc_core::id::ElementId;
use lc_core::model::{Color, Coords, Element, ElementKind, Shape, Stroke};
use lc_core::Point;
use lc_render::hit::{cursor_for_position, get_element_at_position};
use lc_render::paint::{RenderOptions, render_scene, stroke_sketch_segment};
use lc_render::surface::DrawingSurface;

/// How a grabbed element follows the pointer.
#[derive(Debug, Clone, PartialEq)]
pub enum Grab {
    /// Nothing to follow (freshly created elements).
    None,
    /// Pointer offset from (x1, y1).
    Offset(Vec2),
    /// Pointer offset from every point of a pencil stroke.
    PointOffsets(Vec<Vec2>),
}

/// The element under interaction, as it was when the gesture started.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedElement {
    pub element: Element,
    /// Where the selection tool grabbed it. `None` for new elements.
    pub position: Option<Position>,
    pub grab: Grab,
    /// Pointer position at pointer-down.
    pub anchor: Point,
}

impl SelectedElement {
    pub fn id(&self) -> ElementId {
        self.element.id
    }
}

pub struct CanvasController {
    config: CanvasConfig,
    history: History<Vec<Element>>,
    tool: ToolKind,
    action: Action,
    selected: Option<SelectedElement>,
    stroke: Stroke,
    primary: Color,
    secondary: Color,
    pointer_down: bool,
    underlay: Option<String>,
    cursor: &'static str,
    needs_redraw: bool,
    needs_persist: bool,
}

fn history_for(config: &CanvasConfig, initial: Vec<Element>) -> History<Vec<Element>> {
    match config.history_limit {
        Some(limit) => History::with_max_depth(initial, limit),
        None => History::new(initial),
    }
}

impl CanvasController {
    pub fn new(config: CanvasConfig) -> Self {
        let stroke = config.default_stroke();
        Self {
            history: history_for(&config, Vec::new()),
            tool: ToolKind::default(),
            action: Action::None,
            selected: None,
            stroke,
            primary: stroke.color,
            secondary: Color::WHITE,
            pointer_down: false,
            underlay: None,
            cursor: "default",
            needs_redraw: true,
            needs_persist: false,
            config,
        }
    }

    /// Build a controller from whatever `store` holds under the
    /// configured keys. Corrupt element data is logged and ignored.
    pub fn restore(config: CanvasConfig, store: &dyn KeyValueStore) -> Self {
        let mut controller = Self::new(config);
        match load_elements(store, &controller.config.elements_key) {
            Ok(Some(elements)) => {
                log::debug!("RESTORE {} elements", elements.len());
                controller.history = history_for(&controller.config, elements);
            }
            Ok(None) => {}
            Err(e) => log::warn!("Ignoring stored elements: {e}"),
        }
        controller.underlay = store.get(&controller.config.image_key);
        controller
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    /// The visible element list.
    pub fn elements(&self) -> &[Element] {
        self.history.current()
    }

    pub fn history(&self) -> &History<Vec<Element>> {
        &self.history
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn selected(&self) -> Option<&SelectedElement> {
        self.selected.as_ref()
    }

    pub fn stroke(&self) -> Stroke {
        self.stroke
    }

    pub fn primary_color(&self) -> Color {
        self.primary
    }

    pub fn secondary_color(&self) -> Color {
        self.secondary
    }

    pub fn underlay(&self) -> Option<&str> {
        self.underlay.as_deref()
    }

    /// CSS cursor for the last hover position.
    pub fn cursor(&self) -> &'static str {
        self.cursor
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    /// The text element being typed, if any. The host positions its
    /// text-entry overlay over this element.
    pub fn writing_target(&self) -> Option<&Element> {
        if self.action != Action::Writing {
            return None;
        }
        let id = self.selected.as_ref()?.id();
        self.elements().get(id.index())
    }

    // ─── Event dispatch ──────────────────────────────────────────────────

    /// Route a normalized input event. Returns `true` if state changed.
    pub fn handle(&mut self, event: &InputEvent, surface: &mut dyn DrawingSurface) -> bool {
        match event {
            InputEvent::PointerDown { x, y } => self.pointer_down(*x, *y, surface),
            InputEvent::PointerMove { x, y } => self.pointer_move(*x, *y, surface),
            InputEvent::PointerUp { x, y } => self.pointer_up(*x, *y, surface),
            InputEvent::Key { key, modifiers } => self.key(key, *modifiers).is_some(),
            InputEvent::TextBlur { text } => self.finish_text(text, surface),
        }
    }

    pub fn pointer_down(&mut self, x: f64, y: f64, surface: &mut dyn DrawingSurface) -> bool {
        if self.action == Action::Writing {
            return false;
        }
        self.pointer_down = true;
        let pointer = Point::new(x, y);

        let Some(kind) = self.tool.element_kind() else {
            return self.grab_element_at(pointer);
        };

        let id = ElementId::next_for(self.elements());
        let stroke = if kind == ElementKind::Pencil {
            self.stroke
        } else {
            Stroke {
                erase: false,
                ..self.stroke
            }
        };
        let element = Element::new(id, x, y, x, y, kind, stroke);
        let appended = element.clone();
        self.update_snapshot(false, move |elements| elements.push(appended));

        if kind == ElementKind::Pencil {
            surface.set_stroke(&self.stroke);
            surface.begin_path();
            surface.move_to(pointer);
        }

        self.set_action(Action::for_new_element(kind));
        self.selected = Some(SelectedElement {
            element,
            position: None,
            grab: Grab::None,
            anchor: pointer,
        });
        self.mark_changed();
        true
    }

    fn grab_element_at(&mut self, pointer: Point) -> bool {
        let Some((element, position)) =
            get_element_at_position(pointer.x, pointer.y, self.elements())
                .map(|hit| (hit.element.clone(), hit.position))
        else {
            log::debug!("No element at ({}, {})", pointer.x, pointer.y);
            return false;
        };

        let grab = match &element.shape {
            Shape::Pencil { points } => {
                Grab::PointOffsets(points.iter().map(|p| pointer - *p).collect())
            }
            _ => element
                .coords()
                .map_or(Grab::None, |c| Grab::Offset(pointer - c.start())),
        };

        // Open the history entry the rest of the gesture overwrites.
        self.update_snapshot(false, |_| {});
        self.set_action(if position.is_handle() {
            Action::Resizing
        } else {
            Action::Moving
        });
        self.selected = Some(SelectedElement {
            element,
            position: Some(position),
            grab,
            anchor: pointer,
        });
        self.mark_changed();
        true
    }

    pub fn pointer_move(&mut self, x: f64, y: f64, surface: &mut dyn DrawingSurface) -> bool {
        if self.tool == ToolKind::Selection {
            self.cursor = cursor_for_position(
                get_element_at_position(x, y, self.elements()).map(|hit| hit.position),
            );
        }
        if !self.pointer_down {
            return false;
        }
        let Some(selected) = self.selected.clone() else {
            return false;
        };
        let pointer = Point::new(x, y);
        let id = selected.id();

        match self.action {
            Action::Sketching => {
                let mut prev = None;
                self.update_snapshot(true, |elements| {
                    if let Some(Shape::Pencil { points }) =
                        elements.get_mut(id.index()).map(|e| &mut e.shape)
                    {
                        prev = points.last().copied();
                        points.push(pointer);
                    }
                });
                if let Some(prev) = prev {
                    stroke_sketch_segment(surface, prev, pointer);
                }
                // The preview segment is already on the surface.
                self.needs_persist = true;
                return true;
            }
            Action::Drawing => {
                let Some(c) = self.elements().get(id.index()).and_then(Element::coords) else {
                    log::warn!("Drawing target {id} is missing");
                    return false;
                };
                self.update_element(id, Coords::new(c.x1, c.y1, x, y), surface);
            }
            Action::Moving => match &selected.grab {
                Grab::PointOffsets(offsets) => {
                    let moved: Vec<Point> = offsets.iter().map(|o| pointer - *o).collect();
                    self.update_snapshot(true, move |elements| {
                        if let Some(Shape::Pencil { points }) =
                            elements.get_mut(id.index()).map(|e| &mut e.shape)
                        {
                            *points = moved;
                        }
                    });
                }
                Grab::Offset(offset) => {
                    let Some(c) = selected.element.coords() else {
                        return false;
                    };
                    self.update_element(id, c.moved_to(pointer - *offset), surface);
                }
                Grab::None => return false,
            },
            Action::Resizing => {
                let resized = selected.position.zip(selected.element.coords()).and_then(
                    |(position, coords)| resized_coordinates(x, y, position, coords),
                );
                let Some(coords) = resized else {
                    log::debug!("Ignoring resize of {id} without a handle");
                    return false;
                };
                self.update_element(id, coords, surface);
            }
            Action::None | Action::Writing => return false,
        }
        self.mark_changed();
        true
    }

    pub fn pointer_up(&mut self, x: f64, y: f64, surface: &mut dyn DrawingSurface) -> bool {
        self.pointer_down = false;

        if self.action == Action::Writing {
            return false;
        }

        if let Some(selected) = &self.selected
            && self.action == Action::Moving
            && selected.element.kind() == ElementKind::Text
            && selected.anchor == Point::new(x, y)
        {
            self.set_action(Action::Writing);
            self.mark_changed();
            return true;
        }

        match self.action {
            Action::Drawing | Action::Resizing => self.normalize_selected(surface),
            Action::Sketching => surface.close_path(),
            _ => {}
        }

        if self.action == Action::None && self.selected.is_none() {
            return false;
        }
        self.set_action(Action::None);
        self.selected = None;
        self.mark_changed();
        true
    }

    fn normalize_selected(&mut self, surface: &mut dyn DrawingSurface) {
        let Some(id) = self.selected.as_ref().map(SelectedElement::id) else {
            return;
        };
        let Some(element) = self.elements().get(id.index()) else {
            return;
        };
        if !matches!(element.kind(), ElementKind::Line | ElementKind::Rectangle) {
            return;
        }
        if let Some(coords) = adjust_element_coordinates(element) {
            self.update_element(id, coords, surface);
        }
    }

    /// Commit the typed payload of the element being written.
    ///
    /// The element's box is re-measured: width from the surface's text
    /// metrics, height from the configured line height.
    pub fn finish_text(&mut self, text: &str, surface: &mut dyn DrawingSurface) -> bool {
        if self.action != Action::Writing {
            log::debug!("Text blur outside of writing");
            return false;
        }
        let Some(selected) = self.selected.take() else {
            self.set_action(Action::None);
            return false;
        };
        let id = selected.id();
        let width = surface.measure_text(text, &self.config.font);
        let height = self.config.text_line_height;
        self.update_snapshot(true, |elements| {
            if let Some(Shape::Text(t)) = elements.get_mut(id.index()).map(|e| &mut e.shape) {
                t.text = text.to_string();
                t.x2 = t.x1 + width;
                t.y2 = t.y1 + height;
            }
        });
        self.set_action(Action::None);
        self.mark_changed();
        true
    }

    /// Resolve and apply a keyboard shortcut. Ignored while writing so
    /// keys reach the text-entry overlay.
    pub fn key(&mut self, key: &str, modifiers: Modifiers) -> Option<ShortcutAction> {
        if self.action == Action::Writing {
            return None;
        }
        let action = ShortcutMap::resolve(key, modifiers)?;
        log::debug!("SHORTCUT {}", action.name());
        match action {
            ShortcutAction::ToolSelection => self.set_tool(ToolKind::Selection),
            ShortcutAction::ToolLine => self.set_tool(ToolKind::Line),
            ShortcutAction::ToolRectangle => self.set_tool(ToolKind::Rectangle),
            ShortcutAction::ToolCircle => self.set_tool(ToolKind::Circle),
            ShortcutAction::ToolPencil => self.set_tool(ToolKind::Pencil),
            ShortcutAction::ToolText => self.set_tool(ToolKind::Text),
            ShortcutAction::Undo => {
                self.undo();
            }
            ShortcutAction::Redo => {
                self.redo();
            }
            ShortcutAction::ClearAll => {
                self.clear();
            }
            ShortcutAction::ToggleEraser => self.toggle_eraser(),
        }
        Some(action)
    }

    // ─── History ─────────────────────────────────────────────────────────

    /// Step back one history entry. No-op mid-gesture.
    pub fn undo(&mut self) -> bool {
        if self.action != Action::None {
            log::debug!("Undo ignored while {}", self.action.name());
            return false;
        }
        let moved = self.history.undo();
        if moved {
            self.mark_changed();
        }
        moved
    }

    /// Step forward one history entry. No-op mid-gesture.
    pub fn redo(&mut self) -> bool {
        if self.action != Action::None {
            log::debug!("Redo ignored while {}", self.action.name());
            return false;
        }
        let moved = self.history.redo();
        if moved {
            self.mark_changed();
        }
        moved
    }

    /// Remove every element as one undoable step and drop the underlay.
    pub fn clear(&mut self) -> bool {
        let had_elements = !self.elements().is_empty();
        let had_underlay = self.underlay.take().is_some();
        self.set_action(Action::None);
        self.selected = None;
        self.pointer_down = false;
        if had_elements {
            self.history.commit(Vec::new(), false);
        }
        if had_elements || had_underlay {
            self.mark_changed();
        }
        had_elements || had_underlay
    }

    // ─── Tools and paint state ───────────────────────────────────────────

    pub fn set_tool(&mut self, tool: ToolKind) {
        if tool != self.tool {
            log::debug!("TOOL {} -> {}", self.tool.name(), tool.name());
        }
        self.tool = tool;
        if tool != ToolKind::Selection {
            self.cursor = "default";
        }
    }

    /// Select a tool by its button name. Unknown names are ignored.
    pub fn set_tool_by_name(&mut self, name: &str) -> bool {
        match ToolKind::from_name(name) {
            Some(tool) => {
                self.set_tool(tool);
                true
            }
            None => {
                log::debug!("Unknown tool: {name}");
                false
            }
        }
    }

    /// Set the stroke color for new elements. Unparseable colors are
    /// ignored.
    pub fn set_color(&mut self, color: &str) -> bool {
        match Color::parse(color) {
            Some(c) => {
                self.stroke.color = c;
                self.request_redraw();
                true
            }
            None => {
                log::debug!("Ignoring unparseable color: {color}");
                false
            }
        }
    }

    pub fn set_primary_color(&mut self, color: &str) -> bool {
        let Some(c) = Color::parse(color) else {
            log::debug!("Ignoring unparseable color: {color}");
            return false;
        };
        self.primary = c;
        true
    }

    pub fn set_secondary_color(&mut self, color: &str) -> bool {
        let Some(c) = Color::parse(color) else {
            log::debug!("Ignoring unparseable color: {color}");
            return false;
        };
        self.secondary = c;
        true
    }

    /// Paint with the primary color slot.
    pub fn use_primary(&mut self) {
        self.stroke.color = self.primary;
        self.request_redraw();
    }

    /// Paint with the secondary color slot.
    pub fn use_secondary(&mut self) {
        self.stroke.color = self.secondary;
        self.request_redraw();
    }

    /// Set the stroke width, clamped to the configured range. Non-finite
    /// widths are ignored and the current width is returned.
    pub fn set_line_width(&mut self, width: f64) -> f64 {
        if !width.is_finite() {
            log::debug!("Ignoring non-finite line width: {width}");
            return self.stroke.width;
        }
        self.stroke.width = self.config.clamp_line_width(width);
        self.request_redraw();
        self.stroke.width
    }

    /// Only pencil strokes take the eraser flag.
    pub fn set_eraser(&mut self, erase: bool) {
        self.stroke.erase = erase;
        self.request_redraw();
    }

    pub fn toggle_eraser(&mut self) {
        self.set_eraser(!self.stroke.erase);
    }

    /// Replace (or remove) the image drawn beneath every element.
    pub fn set_underlay(&mut self, source: Option<String>) {
        log::debug!("UNDERLAY {:?}", source);
        self.underlay = source;
        self.mark_changed();
    }

    // ─── Rendering and persistence ───────────────────────────────────────

    /// Redraw everything now, skipping the element being written.
    pub fn render(&mut self, surface: &mut dyn DrawingSurface) {
        let hidden = self.writing_target().map(|e| e.id);
        render_scene(
            surface,
            self.history.current(),
            &RenderOptions {
                hidden,
                underlay: self.underlay.as_deref(),
                font: &self.config.font,
            },
        );
        self.needs_redraw = false;
    }

    /// Schedule a redraw without touching the element list, e.g. once
    /// the underlay image finishes loading.
    pub fn request_redraw(&mut self) {
        self.needs_redraw = true;
    }

    /// Redraw once if anything changed since the last redraw.
    pub fn render_if_dirty(&mut self, surface: &mut dyn DrawingSurface) -> bool {
        if !self.needs_redraw {
            return false;
        }
        self.render(surface);
        true
    }

    /// Mirror elements and underlay into `store` if they changed.
    /// Returns `true` when something was written.
    pub fn persist(&mut self, store: &mut dyn KeyValueStore) -> bool {
        if !self.needs_persist {
            return false;
        }
        if let Err(e) = save_elements(store, &self.config.elements_key, self.history.current()) {
            log::warn!("Failed to save elements: {e}");
            return false;
        }
        match &self.underlay {
            Some(source) => {
                if let Err(e) = store.set(&self.config.image_key, source) {
                    log::warn!("Failed to save underlay: {e}");
                    return false;
                }
            }
            None => store.remove(&self.config.image_key),
        }
        self.needs_persist = false;
        true
    }

    // ─── Internals ───────────────────────────────────────────────────────

    fn set_action(&mut self, action: Action) {
        if action != self.action {
            log::debug!("ACTION {} -> {}", self.action.name(), action.name());
        }
        self.action = action;
    }

    fn mark_changed(&mut self) {
        self.needs_redraw = true;
        self.needs_persist = true;
    }

    /// Commit a copy of the current snapshot with `f` applied.
    fn update_snapshot(&mut self, overwrite: bool, f: impl FnOnce(&mut Vec<Element>)) {
        self.history.commit_with(
            |prev| {
                let mut next = prev.clone();
                f(&mut next);
                next
            },
            overwrite,
        );
    }

    /// Overwrite the corners of element `id`. Text boxes are re-measured
    /// from their payload, keeping only the new (x1, y1).
    fn update_element(&mut self, id: ElementId, coords: Coords, surface: &mut dyn DrawingSurface) {
        let Some(element) = self.elements().get(id.index()) else {
            log::warn!("No element {id} to update");
            return;
        };
        let coords = match element.text() {
            Some(text) => Coords::new(
                coords.x1,
                coords.y1,
                coords.x1 + surface.measure_text(text, &self.config.font),
                coords.y1 + self.config.text_line_height,
            ),
            None => coords,
        };
        self.update_snapshot(true, |elements| {
            if let Some(element) = elements.get_mut(id.index()) {
                element.set_coords(coords);
            }
        });
    }
}
