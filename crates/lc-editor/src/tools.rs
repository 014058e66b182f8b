//! Tools and interaction actions.
//!
//! The active tool decides what a pointer-down does; the current action
//! decides what the following pointer-moves do.
//!
//! | Tool | Pointer-down | Action entered |
//! |------|--------------|----------------|
//! | Selection | grab the element under the pointer | `Moving` or `Resizing` |
//! | Line / Rectangle / Circle | create a zero-size shape | `Drawing` |
//! | Pencil | start a freehand stroke | `Sketching` |
//! | Text | place an empty text box | `Writing` |

use lc_core::model::ElementKind;

/// The active tool determines how pointer events are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolKind {
    Selection,
    Line,
    Rectangle,
    Circle,
    #[default]
    Pencil,
    Text,
}

impl ToolKind {
    /// Look up a tool by the name the page's tool buttons use.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "selection" => Some(ToolKind::Selection),
            "line" => Some(ToolKind::Line),
            "rectangle" => Some(ToolKind::Rectangle),
            "circle" => Some(ToolKind::Circle),
            "pencil" => Some(ToolKind::Pencil),
            "text" => Some(ToolKind::Text),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Selection => "selection",
            ToolKind::Line => "line",
            ToolKind::Rectangle => "rectangle",
            ToolKind::Circle => "circle",
            ToolKind::Pencil => "pencil",
            ToolKind::Text => "text",
        }
    }

    /// Kind of element this tool creates, or `None` for the selection tool.
    pub fn element_kind(self) -> Option<ElementKind> {
        match self {
            ToolKind::Selection => None,
            ToolKind::Line => Some(ElementKind::Line),
            ToolKind::Rectangle => Some(ElementKind::Rectangle),
            ToolKind::Circle => Some(ElementKind::Circle),
            ToolKind::Pencil => Some(ElementKind::Pencil),
            ToolKind::Text => Some(ElementKind::Text),
        }
    }
}

/// What the current pointer gesture is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Action {
    #[default]
    None,
    Drawing,
    Moving,
    Resizing,
    Writing,
    Sketching,
}

impl Action {
    /// Action entered right after creating an element of `kind`.
    pub fn for_new_element(kind: ElementKind) -> Self {
        match kind {
            ElementKind::Text => Action::Writing,
            ElementKind::Pencil => Action::Sketching,
            ElementKind::Line | ElementKind::Rectangle | ElementKind::Circle => Action::Drawing,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Action::None => "none",
            Action::Drawing => "drawing",
            Action::Moving => "moving",
            Action::Resizing => "resizing",
            Action::Writing => "writing",
            Action::Sketching => "sketching",
        }
    }
}
