pub mod hit;
pub mod paint;
pub mod surface;

pub use hit::{Hit, cursor_for_position, get_element_at_position, position_within_element};
pub use paint::{RenderOptions, draw_element, render_scene};
pub use surface::{DrawCall, DrawingSurface, RecordingSurface};
