//! Input abstraction layer.
//!
//! Normalizes browser keyboard events into the small set of facts the
//! editor cares about. Pointer positions are passed as `lc_core::Point`
//! in client coordinates.

/// Modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    /// Command on macOS.
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        ctrl: false,
        shift: false,
        alt: false,
        meta: false,
    };

    pub const CMD: Self = Self {
        ctrl: true,
        ..Self::NONE
    };

    pub const CMD_SHIFT: Self = Self {
        ctrl: true,
        shift: true,
        ..Self::NONE
    };

    /// Ctrl on Windows/Linux, Command on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// A key press as reported by `KeyboardEvent`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    /// The `KeyboardEvent.key` value (e.g. `"z"`, `"Delete"`, `"Escape"`).
    pub key: String,
    pub modifiers: Modifiers,
    /// Focus is inside a text input or textarea (including the in-place
    /// text editor).
    pub in_text_input: bool,
}

impl KeyEvent {
    pub fn new(key: &str, modifiers: Modifiers) -> Self {
        Self {
            key: key.to_owned(),
            modifiers,
            in_text_input: false,
        }
    }

    /// Mark the event as originating from a focused text input.
    #[must_use]
    pub fn in_text_input(mut self) -> Self {
        self.in_text_input = true;
        self
    }
}
