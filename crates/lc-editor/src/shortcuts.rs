//! Keyboard shortcuts for the lesson canvas.
//!
//! Tool keys work without modifiers; history and clear need Ctrl (⌘ on
//! macOS).

use crate::input::Modifiers;

/// What a bound key combination does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    // Tools
    ToolSelection,
    ToolLine,
    ToolRectangle,
    ToolCircle,
    ToolPencil,
    ToolText,

    // Editing
    Undo,
    Redo,
    /// Wipe the whole canvas (⌘Delete).
    ClearAll,
    ToggleEraser,
}

impl ShortcutAction {
    pub fn name(self) -> &'static str {
        match self {
            ShortcutAction::ToolSelection => "toolSelection",
            ShortcutAction::ToolLine => "toolLine",
            ShortcutAction::ToolRectangle => "toolRectangle",
            ShortcutAction::ToolCircle => "toolCircle",
            ShortcutAction::ToolPencil => "toolPencil",
            ShortcutAction::ToolText => "toolText",
            ShortcutAction::Undo => "undo",
            ShortcutAction::Redo => "redo",
            ShortcutAction::ClearAll => "clearAll",
            ShortcutAction::ToggleEraser => "toggleEraser",
        }
    }
}

/// Key binding table.
pub struct ShortcutMap;

impl ShortcutMap {
    /// Look up the binding for `key` (a `KeyboardEvent.key` value) held
    /// with `modifiers`. Unbound combinations give `None`.
    pub fn resolve(key: &str, modifiers: Modifiers) -> Option<ShortcutAction> {
        let cmd = modifiers.command();

        // Shift+command before plain command.
        if cmd && modifiers.shift {
            return match key {
                "z" | "Z" => Some(ShortcutAction::Redo),
                _ => None,
            };
        }

        if cmd {
            return match key {
                "z" | "Z" => Some(ShortcutAction::Undo),
                "y" | "Y" => Some(ShortcutAction::Redo),
                "Delete" | "Backspace" => Some(ShortcutAction::ClearAll),
                _ => None,
            };
        }

        if modifiers.shift || modifiers.alt {
            return None;
        }

        match key {
            "v" | "V" => Some(ShortcutAction::ToolSelection),
            "l" | "L" => Some(ShortcutAction::ToolLine),
            "r" | "R" => Some(ShortcutAction::ToolRectangle),
            "o" | "O" => Some(ShortcutAction::ToolCircle),
            "p" | "P" => Some(ShortcutAction::ToolPencil),
            "t" | "T" => Some(ShortcutAction::ToolText),
            "e" | "E" => Some(ShortcutAction::ToggleEraser),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctrl() -> Modifiers {
        Modifiers {
            ctrl: true,
            ..Modifiers::NONE
        }
    }

    fn meta() -> Modifiers {
        Modifiers {
            meta: true,
            ..Modifiers::NONE
        }
    }

    #[test]
    fn resolve_undo_redo() {
        assert_eq!(ShortcutMap::resolve("z", ctrl()), Some(ShortcutAction::Undo));
        assert_eq!(ShortcutMap::resolve("z", meta()), Some(ShortcutAction::Undo));
        assert_eq!(
            ShortcutMap::resolve(
                "Z",
                Modifiers {
                    shift: true,
                    ..meta()
                }
            ),
            Some(ShortcutAction::Redo)
        );
        assert_eq!(ShortcutMap::resolve("y", ctrl()), Some(ShortcutAction::Redo));
    }

    #[test]
    fn resolve_tools() {
        assert_eq!(
            ShortcutMap::resolve("v", Modifiers::NONE),
            Some(ShortcutAction::ToolSelection)
        );
        assert_eq!(
            ShortcutMap::resolve("o", Modifiers::NONE),
            Some(ShortcutAction::ToolCircle)
        );
        assert_eq!(
            ShortcutMap::resolve("P", Modifiers::NONE),
            Some(ShortcutAction::ToolPencil)
        );
    }

    #[test]
    fn resolve_clear_all() {
        assert_eq!(
            ShortcutMap::resolve("Backspace", meta()),
            Some(ShortcutAction::ClearAll)
        );
        assert_eq!(ShortcutMap::resolve("Backspace", Modifiers::NONE), None);
    }

    #[test]
    fn tool_keys_need_bare_keypress() {
        assert_eq!(ShortcutMap::resolve("z", Modifiers::NONE), None);
        assert_eq!(ShortcutMap::resolve("v", ctrl()), None);
    }

    #[test]
    fn unbound_keys_resolve_to_nothing() {
        assert_eq!(ShortcutMap::resolve("q", Modifiers::NONE), None);
        assert_eq!(ShortcutMap::resolve("7", Modifiers::NONE), None);
    }
}
