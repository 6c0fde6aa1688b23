//! Keyboard shortcut mapping.
//!
//! Maps key + modifier combos to semantic `ShortcutAction`s. Whether an
//! action is allowed right now (e.g. not while typing) is decided by the
//! session, not here.

use crate::input::Modifiers;
use lc_core::LayerAction;

/// Actions that keyboard shortcuts can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    // ── Edit ──
    Undo,
    Redo,
    Delete,
    Duplicate,

    // ── Z-order ──
    SendBackward,
    BringForward,
    SendToBack,
    BringToFront,

    // ── Text editing ──
    /// Ctrl/Cmd+Enter: finish in-place text editing and keep the draft.
    CommitText,

    // ── Selection ──
    /// Escape: discard a text draft, or clear the selection.
    Deselect,
}

impl ShortcutAction {
    /// The layering command behind a z-order shortcut.
    pub fn layer_action(self) -> Option<LayerAction> {
        match self {
            Self::SendBackward => Some(LayerAction::Backward),
            Self::BringForward => Some(LayerAction::Forward),
            Self::SendToBack => Some(LayerAction::Back),
            Self::BringToFront => Some(LayerAction::Front),
            _ => None,
        }
    }
}

/// Resolves key events into shortcut actions.
///
/// Platform-aware: on macOS `meta` is ⌘, elsewhere `ctrl` plays that role.
pub struct ShortcutMap;

impl ShortcutMap {
    /// Resolve a key event to an action.
    ///
    /// `key` is the `KeyboardEvent.key` value. Returns `None` if the combo
    /// has no binding.
    pub fn resolve(key: &str, modifiers: Modifiers) -> Option<ShortcutAction> {
        let cmd = modifiers.command();

        // ── Modifier combos first (most specific) ──
        if cmd && modifiers.shift {
            return match key {
                "z" | "Z" => Some(ShortcutAction::Redo),
                "[" | "{" => Some(ShortcutAction::SendToBack),
                "]" | "}" => Some(ShortcutAction::BringToFront),
                _ => None,
            };
        }

        if cmd {
            return match key {
                "z" | "Z" => Some(ShortcutAction::Undo),
                "y" | "Y" => Some(ShortcutAction::Redo),
                "d" | "D" => Some(ShortcutAction::Duplicate),
                "[" => Some(ShortcutAction::SendBackward),
                "]" => Some(ShortcutAction::BringForward),
                "Enter" => Some(ShortcutAction::CommitText),
                _ => None,
            };
        }

        // ── Single keys ──
        match key {
            "Delete" | "Backspace" => Some(ShortcutAction::Delete),
            "Escape" => Some(ShortcutAction::Deselect),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const META: Modifiers = Modifiers {
        meta: true,
        ..Modifiers::NONE
    };

    #[test]
    fn resolve_undo_redo() {
        assert_eq!(ShortcutMap::resolve("z", META), Some(ShortcutAction::Undo));
        assert_eq!(
            ShortcutMap::resolve("z", Modifiers::CMD),
            Some(ShortcutAction::Undo)
        );
        assert_eq!(
            ShortcutMap::resolve("Z", Modifiers::CMD_SHIFT),
            Some(ShortcutAction::Redo)
        );
        assert_eq!(
            ShortcutMap::resolve("y", Modifiers::CMD),
            Some(ShortcutAction::Redo)
        );
        assert_eq!(ShortcutMap::resolve("y", META), Some(ShortcutAction::Redo));
    }

    #[test]
    fn resolve_delete() {
        assert_eq!(
            ShortcutMap::resolve("Delete", Modifiers::NONE),
            Some(ShortcutAction::Delete)
        );
        assert_eq!(
            ShortcutMap::resolve("Backspace", Modifiers::NONE),
            Some(ShortcutAction::Delete)
        );
    }

    #[test]
    fn resolve_z_order() {
        assert_eq!(
            ShortcutMap::resolve("[", Modifiers::CMD),
            Some(ShortcutAction::SendBackward)
        );
        assert_eq!(
            ShortcutMap::resolve("]", Modifiers::CMD),
            Some(ShortcutAction::BringForward)
        );
        assert_eq!(
            ShortcutMap::resolve("[", Modifiers::CMD_SHIFT),
            Some(ShortcutAction::SendToBack)
        );
        // Shift+] reports "}" on US layouts.
        assert_eq!(
            ShortcutMap::resolve("}", Modifiers::CMD_SHIFT),
            Some(ShortcutAction::BringToFront)
        );
        assert_eq!(
            ShortcutAction::BringToFront.layer_action(),
            Some(LayerAction::Front)
        );
    }

    #[test]
    fn resolve_text_keys() {
        assert_eq!(
            ShortcutMap::resolve("Enter", Modifiers::CMD),
            Some(ShortcutAction::CommitText)
        );
        assert_eq!(ShortcutMap::resolve("Enter", Modifiers::NONE), None);
        assert_eq!(
            ShortcutMap::resolve("Escape", Modifiers::NONE),
            Some(ShortcutAction::Deselect)
        );
    }

    #[test]
    fn resolve_modifier_precedence() {
        assert_eq!(ShortcutMap::resolve("z", Modifiers::NONE), None);
        assert_eq!(ShortcutMap::resolve("d", Modifiers::NONE), None);
        assert_eq!(
            ShortcutMap::resolve("d", Modifiers::CMD),
            Some(ShortcutAction::Duplicate)
        );
    }
}
