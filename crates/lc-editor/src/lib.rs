pub mod controller;
pub mod history;
pub mod input;
pub mod shortcuts;
pub mod storage;
pub mod tools;

pub use controller::{CanvasController, Grab, SelectedElement};
pub use history::History;
pub use input::{InputEvent, Modifiers};
pub use shortcuts::{ShortcutAction, ShortcutMap};
pub use storage::{KeyValueStore, MemoryStore, load_elements, save_elements};
pub use tools::{Action, ToolKind};
