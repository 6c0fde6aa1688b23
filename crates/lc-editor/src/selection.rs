//! Selection and edit-mode state machine.
//!
//! ```text
//!            click asset                 double-click text asset
//!   Idle ───────────────▶ Selected(a) ─────────────────────────▶ TextEditing(a, draft)
//!    ▲  ◀─────────────────     │                                     │
//!    │     click canvas        │ Delete key                          │ blur / Ctrl+Enter (commit)
//!    │                         ▼                                     │ Escape (discard)
//!    └──────────────────────── Idle ◀────────────────────────────────┘
//! ```
//!
//! Asset ids are only unique within a page, so every state carries the page
//! its asset lives on.
//!
//! Leaving `TextEditing` any way other than Escape yields the draft, which
//! the session writes into the asset's `content` and commits. This type only
//! tracks state; it never touches the document.

use lc_core::{AssetId, PageId};

/// A text draft that has to be written back to its asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingText {
    pub page: PageId,
    pub asset: AssetId,
    pub content: String,
}

/// What is selected on the active page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Idle,
    Selected {
        page: PageId,
        asset: AssetId,
    },
    TextEditing {
        page: PageId,
        asset: AssetId,
        draft: String,
    },
}

impl Selection {
    /// The selected or text-edited asset and its page.
    pub fn target(&self) -> Option<(PageId, AssetId)> {
        match self {
            Self::Idle => None,
            Self::Selected { page, asset } | Self::TextEditing { page, asset, .. } => {
                Some((*page, *asset))
            }
        }
    }

    /// The selected or text-edited asset.
    pub fn asset(&self) -> Option<AssetId> {
        self.target().map(|(_, asset)| asset)
    }

    pub fn is_text_editing(&self) -> bool {
        matches!(self, Self::TextEditing { .. })
    }

    /// The in-progress draft, if text editing.
    pub fn draft(&self) -> Option<&str> {
        match self {
            Self::TextEditing { draft, .. } => Some(draft),
            _ => None,
        }
    }

    /// Leave any state for `Idle`, returning a draft to commit.
    pub fn clear(&mut self) -> Option<PendingText> {
        match std::mem::take(self) {
            Self::TextEditing { page, asset, draft } => Some(PendingText {
                page,
                asset,
                content: draft,
            }),
            _ => None,
        }
    }

    /// Select an asset. Selecting the asset already being edited keeps the
    /// edit going; selecting anything else finishes it.
    pub fn select(&mut self, page: PageId, asset: AssetId) -> Option<PendingText> {
        if self.is_text_editing() && self.target() == Some((page, asset)) {
            return None;
        }
        let pending = self.clear();
        *self = Self::Selected { page, asset };
        pending
    }

    /// Enter in-place text editing with `content` as the initial draft.
    /// A draft for a different asset is returned for committing.
    pub fn begin_text_edit(
        &mut self,
        page: PageId,
        asset: AssetId,
        content: &str,
    ) -> Option<PendingText> {
        if self.is_text_editing() && self.target() == Some((page, asset)) {
            return None;
        }
        let pending = self.clear();
        *self = Self::TextEditing {
            page,
            asset,
            draft: content.to_owned(),
        };
        pending
    }

    /// Replace the draft. Returns false when not text editing.
    pub fn set_draft(&mut self, text: &str) -> bool {
        match self {
            Self::TextEditing { draft, .. } => {
                text.clone_into(draft);
                true
            }
            _ => false,
        }
    }

    /// Escape: drop the draft and go idle. Returns false when not editing.
    pub fn cancel_text_edit(&mut self) -> bool {
        if self.is_text_editing() {
            *self = Self::Idle;
            true
        } else {
            false
        }
    }

    /// Drop any reference to an asset without committing (the asset is gone).
    pub fn forget(&mut self, page: PageId, asset: AssetId) {
        if self.target() == Some((page, asset)) {
            *self = Self::Idle;
        }
    }

    /// Drop the selection if it lives on `page`.
    pub fn forget_page(&mut self, page: PageId) {
        if self.target().is_some_and(|(p, _)| p == page) {
            *self = Self::Idle;
        }
    }
}
