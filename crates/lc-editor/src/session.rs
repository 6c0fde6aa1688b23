//! Editor session: the single owner of document, history and UI state.
//!
//! Every public mutation goes through here. The rules:
//!
//! - A mutation targeting a missing page or asset is a no-op and returns
//!   `false` / `None`. Nothing here returns an error.
//! - Discrete edits commit one history entry each.
//! - Pointer gestures write geometry on every move but commit once, at
//!   pointer-up, and only when the geometry actually changed.
//! - After any mutation the selection, the active page and the interaction
//!   never refer to something that is no longer in the document.

use crate::history::History;
use crate::input::KeyEvent;
use crate::interaction::{Interaction, InteractionMode};
use crate::selection::{PendingText, Selection};
use crate::shortcuts::{ShortcutAction, ShortcutMap};
use lc_core::{
    Asset, AssetField, AssetId, AssetKind, CanvasProfile, CanvasRect, Document, Gesture,
    LayerAction, PageId, PageMeta, PageRef, PhaseKey, Point,
};

/// Output of a content generator, written into an asset by
/// [`EditorSession::apply_generated`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratedContent {
    /// Body text for a text asset.
    Text(String),
    /// Media location for an image, video or audio asset.
    Url(String),
}

/// One open canvas: a document plus everything needed to edit it.
#[derive(Debug, Clone)]
pub struct EditorSession {
    document: Document,
    history: History,
    profile: CanvasProfile,
    active_page: Option<PageRef>,
    selection: Selection,
    interaction: Option<Interaction>,
}

impl EditorSession {
    /// Open `document` with the given profile. The first page becomes
    /// active and the document is the only history entry.
    pub fn new(document: Document, profile: CanvasProfile) -> Self {
        let history = History::with_capacity(&document, profile.history_capacity);
        let active_page = document.first_page();
        Self {
            document,
            history,
            profile,
            active_page,
            selection: Selection::Idle,
            interaction: None,
        }
    }

    /// Open a document from JSON, falling back to an empty document.
    pub fn open_json(text: &str, profile: CanvasProfile) -> Self {
        Self::new(Document::import_or_default(text), profile)
    }

    /// Replace the whole document and start a fresh history.
    pub fn load(&mut self, document: Document) {
        self.history.reset(&document);
        self.active_page = document.first_page();
        self.document = document;
        self.selection = Selection::Idle;
        self.interaction = None;
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn profile(&self) -> &CanvasProfile {
        &self.profile
    }

    pub fn active_page(&self) -> Option<PageRef> {
        self.active_page
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn interaction(&self) -> Option<&Interaction> {
        self.interaction.as_ref()
    }

    pub fn interaction_mode(&self) -> InteractionMode {
        self.interaction
            .as_ref()
            .map_or(InteractionMode::Idle, Interaction::mode)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Export the live document.
    pub fn to_json(&self) -> String {
        self.document.to_json()
    }

    // ─── Assets ──────────────────────────────────────────────────────────

    /// Add a default asset of `kind` on top of `page` and select it.
    pub fn create_asset(&mut self, kind: AssetKind, page: PageId) -> Option<AssetId> {
        self.document.page(page)?;
        // A pending draft lands in history before the new asset does.
        self.click_canvas();
        let asset = Asset::create(kind);
        let id = asset.id;
        self.document.page_mut(page)?.push_asset(asset);
        self.commit();
        self.selection = Selection::Selected { page, asset: id };
        Some(id)
    }

    /// Edit one field and commit.
    pub fn update_asset_field(&mut self, page: PageId, asset: AssetId, field: AssetField) -> bool {
        if !self.update_asset_field_transient(page, asset, field) {
            return false;
        }
        self.commit();
        true
    }

    /// Edit one field without recording history. Pair with [`Self::commit`]
    /// once the burst of edits is over.
    pub fn update_asset_field_transient(
        &mut self,
        page: PageId,
        asset: AssetId,
        field: AssetField,
    ) -> bool {
        let min = self.profile.min_size;
        let field = match field {
            AssetField::Width(w) => AssetField::Width(w.max(min)),
            AssetField::Height(h) => AssetField::Height(h.max(min)),
            other => other,
        };
        self.document
            .page_mut(page)
            .is_some_and(|p| p.update_asset(asset, field))
    }

    /// Record the live document as a new history entry.
    pub fn commit(&mut self) {
        self.history.commit(&self.document);
    }

    /// Remove an asset and commit. Any selection, draft or gesture on it is
    /// dropped.
    pub fn delete_asset(&mut self, page: PageId, asset: AssetId) -> bool {
        let Some(removed) = self
            .document
            .page_mut(page)
            .and_then(|p| p.remove_asset(asset))
        else {
            return false;
        };
        log::debug!("delete asset {} from {}", removed.id, page);
        self.selection.forget(page, asset);
        if self
            .interaction
            .as_ref()
            .is_some_and(|ix| ix.page == page && ix.asset == asset)
        {
            self.interaction = None;
        }
        self.commit();
        true
    }

    /// Copy an asset onto the top of its page, offset by the profile's copy
    /// offset. The copy becomes the selection.
    pub fn copy_asset(&mut self, page: PageId, asset: AssetId) -> Option<AssetId> {
        self.document.page(page)?.asset(asset)?;
        // The copy picks up a finished draft of its source.
        self.click_canvas();
        let offset = self.profile.copy_offset;
        let id = self.document.page_mut(page)?.copy_asset(asset, offset)?;
        self.commit();
        self.selection = Selection::Selected { page, asset: id };
        Some(id)
    }

    /// Move an asset in its page's stacking order. Commits when the order
    /// changed.
    pub fn change_layer(&mut self, page: PageId, asset: AssetId, action: LayerAction) -> bool {
        let changed = self
            .document
            .page_mut(page)
            .is_some_and(|p| p.change_layer(asset, action));
        if changed {
            log::trace!("layer {action:?} on {asset}");
            self.commit();
        }
        changed
    }

    /// Store a generation result: the prompt plus a text or URL payload.
    /// A payload that does not fit the asset kind leaves the asset untouched.
    pub fn apply_generated(
        &mut self,
        page: PageId,
        asset: AssetId,
        prompt: &str,
        content: GeneratedContent,
    ) -> bool {
        let Some(target) = self
            .document
            .page_mut(page)
            .and_then(|p| p.asset_mut(asset))
        else {
            return false;
        };
        let payload = match content {
            GeneratedContent::Text(text) => AssetField::Content(text),
            GeneratedContent::Url(url) => AssetField::Url(Some(url)),
        };
        let mut updated = target
            .clone()
            .with_field(AssetField::Prompt(Some(prompt.to_owned())));
        if !updated.set_field(payload) {
            return false;
        }
        *target = updated;
        self.commit();
        true
    }

    // ─── Pointer interactions ────────────────────────────────────────────

    /// Pointer-down on an asset body or handle. A leftover session from a
    /// lost pointer-up is discarded first.
    pub fn begin_interaction(
        &mut self,
        page: PageId,
        asset: AssetId,
        gesture: Gesture,
        pointer: Point,
        canvas: CanvasRect,
    ) -> bool {
        if let Some(stale) = self.interaction.take() {
            log::trace!("reset stale {:?} on {}", stale.mode(), stale.asset);
        }
        let Some(geometry) = self
            .document
            .page(page)
            .and_then(|p| p.asset(asset))
            .map(|a| a.geometry)
        else {
            return false;
        };
        self.select(page, asset);
        let ix = Interaction::new(page, asset, gesture, pointer, geometry, canvas);
        log::trace!("begin {:?} on {}", ix.mode(), asset);
        self.interaction = Some(ix);
        true
    }

    /// Pointer-down on the canvas body. Starts a drag on the front-most asset
    /// under the pointer, or deselects when nothing is hit.
    pub fn pointer_down(&mut self, pointer: Point, canvas: CanvasRect) -> Option<AssetId> {
        let Some(active) = self.active_page else {
            self.click_canvas();
            return None;
        };
        let hit = self
            .document
            .page(active.page)
            .and_then(|p| p.hit_test(canvas.to_page(pointer)));
        match hit {
            Some(asset) => {
                self.begin_interaction(active.page, asset, Gesture::Drag, pointer, canvas);
                Some(asset)
            }
            None => {
                self.interaction = None;
                self.click_canvas();
                None
            }
        }
    }

    /// Pointer-move. Rewrites the target's geometry without committing.
    pub fn update_interaction(&mut self, pointer: Point) -> bool {
        let Some(ix) = self.interaction.as_mut() else {
            return false;
        };
        let Some(target) = self
            .document
            .page_mut(ix.page)
            .and_then(|p| p.asset_mut(ix.asset))
        else {
            return false;
        };
        target.geometry = ix.update(pointer, self.profile.min_size);
        true
    }

    /// Pointer-up, wherever it lands. Commits if the gesture changed the
    /// asset.
    pub fn end_interaction(&mut self) -> bool {
        let Some(ix) = self.interaction.take() else {
            return false;
        };
        let alive = self.asset_exists(ix.page, ix.asset);
        log::trace!("end {:?} on {}", ix.mode(), ix.asset);
        if alive && ix.changed() {
            self.commit();
            true
        } else {
            false
        }
    }

    // ─── History ─────────────────────────────────────────────────────────

    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(doc) => {
                self.restore(doc);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(doc) => {
                self.restore(doc);
                true
            }
            None => false,
        }
    }

    fn restore(&mut self, doc: Document) {
        self.document = doc;
        self.interaction = None;
        if let Some((page, asset)) = self.selection.target() {
            // Drafts were typed against the replaced content.
            self.selection = if self.asset_exists(page, asset) {
                Selection::Selected { page, asset }
            } else {
                Selection::Idle
            };
        }
        if self
            .active_page
            .is_none_or(|r| !self.document.contains(r))
        {
            self.active_page = self.document.first_page();
        }
    }

    // ─── Pages ───────────────────────────────────────────────────────────

    /// Insert an empty page (at the end when `at` is `None`) and show it.
    pub fn add_page(&mut self, phase: PhaseKey, at: Option<usize>) -> PageId {
        let id = self
            .document
            .add_page(phase, at, self.profile.renumber_pages);
        self.commit();
        self.show_page(PageRef::new(phase, id));
        id
    }

    /// Remove a page and commit. Deleting the active page moves to the
    /// previous page, the next one, or the first page of another phase.
    pub fn delete_page(&mut self, phase: PhaseKey, page: PageId) -> bool {
        let Some((removed, index)) =
            self.document
                .remove_page(phase, page, self.profile.renumber_pages)
        else {
            return false;
        };
        log::debug!(
            "delete page {} ({} assets) from {}",
            removed.id,
            removed.assets.len(),
            phase
        );
        if self.interaction.as_ref().is_some_and(|ix| ix.page == page) {
            self.interaction = None;
        }
        self.selection.forget_page(removed.id);
        if self.active_page == Some(PageRef::new(phase, page)) {
            self.active_page = self.document.fallback_page(phase, index);
        }
        self.commit();
        true
    }

    /// Duplicate a page right after the original and show the copy.
    pub fn copy_page(&mut self, phase: PhaseKey, page: PageId) -> Option<PageId> {
        let id = self.document.copy_page(
            phase,
            page,
            self.profile.copy_offset,
            self.profile.renumber_pages,
        )?;
        self.commit();
        self.show_page(PageRef::new(phase, id));
        Some(id)
    }

    /// Replace a page's metadata and commit. Page numbers stay managed when
    /// the profile renumbers pages.
    pub fn update_page_meta(&mut self, phase: PhaseKey, page: PageId, meta: PageMeta) -> bool {
        let renumber = self.profile.renumber_pages;
        let Some(ph) = self.document.phase_mut(phase) else {
            return false;
        };
        let Some(idx) = ph.page_index(page) else {
            return false;
        };
        ph.pages[idx].meta = meta;
        if renumber {
            ph.renumber();
        }
        self.commit();
        true
    }

    /// Switch the visible page. Selection does not survive the switch.
    pub fn set_active_page(&mut self, phase: PhaseKey, page: PageId) -> bool {
        let target = PageRef::new(phase, page);
        if !self.document.contains(target) {
            return false;
        }
        if self.active_page != Some(target) {
            self.show_page(target);
        }
        true
    }

    fn show_page(&mut self, target: PageRef) {
        let pending = self.selection.clear();
        self.write_back(pending);
        self.interaction = None;
        self.active_page = Some(target);
    }

    // ─── Selection & text editing ────────────────────────────────────────

    /// Click on empty canvas: finish any text edit and deselect.
    pub fn click_canvas(&mut self) {
        let pending = self.selection.clear();
        self.write_back(pending);
    }

    /// Click on an asset body of the active page.
    pub fn click_asset(&mut self, asset: AssetId) -> bool {
        let Some(page) = self.on_active_page(asset) else {
            return false;
        };
        self.select(page, asset);
        true
    }

    /// Double-click: edit a text asset in place when the profile allows it,
    /// otherwise just select.
    pub fn double_click_asset(&mut self, asset: AssetId) -> bool {
        let Some(page) = self.on_active_page(asset) else {
            return false;
        };
        let content = self
            .document
            .page(page)
            .and_then(|p| p.asset(asset))
            .and_then(Asset::text)
            .map(|t| t.content.clone());
        match content {
            Some(content) if self.profile.text_edit_in_place => {
                let pending = self.selection.begin_text_edit(page, asset, &content);
                self.write_back(pending);
                true
            }
            _ => {
                self.select(page, asset);
                false
            }
        }
    }

    /// Replace the in-place editor's draft.
    pub fn set_text_draft(&mut self, text: &str) -> bool {
        self.selection.set_draft(text)
    }

    /// The in-place editor lost focus: keep the draft.
    pub fn blur_text(&mut self) -> bool {
        if !self.selection.is_text_editing() {
            return false;
        }
        let pending = self.selection.clear();
        self.write_back(pending);
        true
    }

    /// Drop the draft and leave text editing.
    pub fn cancel_text_edit(&mut self) -> bool {
        self.selection.cancel_text_edit()
    }

    fn select(&mut self, page: PageId, asset: AssetId) {
        let pending = self.selection.select(page, asset);
        self.write_back(pending);
    }

    /// Write a finished draft into its asset. Commits only when the content
    /// changed.
    fn write_back(&mut self, pending: Option<PendingText>) {
        let Some(PendingText {
            page,
            asset,
            content,
        }) = pending
        else {
            return;
        };
        let Some(target) = self
            .document
            .page_mut(page)
            .and_then(|p| p.asset_mut(asset))
        else {
            return;
        };
        if target.text().is_some_and(|t| t.content != content)
            && target.set_field(AssetField::Content(content))
        {
            self.commit();
        }
    }

    fn asset_exists(&self, page: PageId, asset: AssetId) -> bool {
        self.document
            .page(page)
            .is_some_and(|p| p.asset(asset).is_some())
    }

    /// The active page, if it holds `asset`. Ids repeat across pages, so
    /// clicks only ever resolve against the visible one.
    fn on_active_page(&self, asset: AssetId) -> Option<PageId> {
        let page = self.active_page?.page;
        self.asset_exists(page, asset).then_some(page)
    }

    // ─── Keyboard ────────────────────────────────────────────────────────

    /// Handle a key press. Returns the action that was carried out.
    ///
    /// While editing text only Escape and Ctrl/Cmd+Enter are consumed. Any
    /// other shortcut is ignored while a text input has focus.
    pub fn handle_key(&mut self, event: &KeyEvent) -> Option<ShortcutAction> {
        let action = ShortcutMap::resolve(&event.key, event.modifiers)?;

        if self.selection.is_text_editing() {
            let done = match action {
                ShortcutAction::Deselect => self.cancel_text_edit(),
                ShortcutAction::CommitText => self.blur_text(),
                _ => false,
            };
            return done.then_some(action);
        }
        if event.in_text_input {
            return None;
        }

        let done = match action {
            ShortcutAction::Undo => self.undo(),
            ShortcutAction::Redo => self.redo(),
            ShortcutAction::Delete => self
                .selected_on_page()
                .is_some_and(|(page, id)| self.delete_asset(page, id)),
            ShortcutAction::Duplicate => self
                .selected_on_page()
                .and_then(|(page, id)| self.copy_asset(page, id))
                .is_some(),
            ShortcutAction::Deselect => {
                let had = self.selection.asset().is_some();
                self.click_canvas();
                had
            }
            ShortcutAction::CommitText => false,
            ShortcutAction::SendBackward
            | ShortcutAction::BringForward
            | ShortcutAction::SendToBack
            | ShortcutAction::BringToFront => match action.layer_action() {
                Some(layer) => self
                    .selected_on_page()
                    .is_some_and(|(page, id)| self.change_layer(page, id, layer)),
                None => false,
            },
        };
        done.then_some(action)
    }

    /// The selected (not text-edited) asset and its page.
    fn selected_on_page(&self) -> Option<(PageId, AssetId)> {
        match &self.selection {
            Selection::Selected { page, asset } if self.asset_exists(*page, *asset) => {
                Some((*page, *asset))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Modifiers;
    use lc_core::{Handle, Surface};

    fn session() -> (EditorSession, PageId) {
        let doc = Document::with_phases(["warmup", "practice"]);
        let s = EditorSession::new(doc, CanvasProfile::slide());
        let page = s.active_page().unwrap().page;
        (s, page)
    }

    fn geometry(s: &EditorSession, page: PageId, id: AssetId) -> lc_core::Geometry {
        s.document().page(page).unwrap().asset(id).unwrap().geometry
    }

    #[test]
    fn create_asset_commits_and_selects() {
        let (mut s, page) = session();
        let id = s.create_asset(AssetKind::Image, page).unwrap();
        assert_eq!(s.selection().target(), Some((page, id)));
        assert_eq!(s.history().len(), 2);
        assert!(s.create_asset(AssetKind::Text, PageId::intern("nope")).is_none());
        assert_eq!(s.history().len(), 2);
    }

    #[test]
    fn drag_commits_once_at_pointer_up() {
        let (mut s, page) = session();
        let id = s.create_asset(AssetKind::Image, page).unwrap();
        let before = s.history().len();

        assert!(s.begin_interaction(
            page,
            id,
            Gesture::Drag,
            Point::new(200.0, 200.0),
            CanvasRect::default()
        ));
        assert_eq!(s.interaction_mode(), InteractionMode::Dragging);
        s.update_interaction(Point::new(210.0, 220.0));
        s.update_interaction(Point::new(230.0, 250.0));
        assert_eq!(s.history().len(), before);
        assert!(s.end_interaction());

        assert_eq!(s.history().len(), before + 1);
        let g = geometry(&s, page, id);
        assert_eq!((g.x, g.y), (130.0, 150.0));
        assert_eq!(s.interaction_mode(), InteractionMode::Idle);
    }

    #[test]
    fn click_without_movement_does_not_commit() {
        let (mut s, page) = session();
        let id = s.create_asset(AssetKind::Text, page).unwrap();
        let before = s.history().len();
        s.begin_interaction(
            page,
            id,
            Gesture::Resize(Handle::Se),
            Point::new(0.0, 0.0),
            CanvasRect::default(),
        );
        assert!(!s.end_interaction());
        assert_eq!(s.history().len(), before);
    }

    #[test]
    fn stale_interaction_is_replaced() {
        let (mut s, page) = session();
        let a = s.create_asset(AssetKind::Text, page).unwrap();
        let b = s.create_asset(AssetKind::Image, page).unwrap();
        s.begin_interaction(page, a, Gesture::Drag, Point::new(0.0, 0.0), CanvasRect::default());
        // Pointer-up was lost; next pointer-down starts over.
        s.begin_interaction(page, b, Gesture::Rotate, Point::new(0.0, 0.0), CanvasRect::default());
        assert_eq!(s.interaction().unwrap().asset, b);
        assert_eq!(s.interaction_mode(), InteractionMode::Rotating);
    }

    #[test]
    fn pointer_down_hits_front_most_asset() {
        let (mut s, page) = session();
        let _text = s.create_asset(AssetKind::Text, page).unwrap();
        let image = s.create_asset(AssetKind::Image, page).unwrap();
        let rect = CanvasRect::new(20.0, 30.0, 960.0, 540.0);

        // Page point (150, 150) in client space.
        assert_eq!(s.pointer_down(Point::new(170.0, 180.0), rect), Some(image));
        assert_eq!(s.interaction_mode(), InteractionMode::Dragging);
        s.end_interaction();

        assert_eq!(s.pointer_down(Point::new(25.0, 35.0), rect), None);
        assert_eq!(s.selection(), &Selection::Idle);
        assert_eq!(s.interaction_mode(), InteractionMode::Idle);
    }

    #[test]
    fn update_without_session_is_noop() {
        let (mut s, _) = session();
        assert!(!s.update_interaction(Point::new(5.0, 5.0)));
        assert!(!s.end_interaction());
    }

    #[test]
    fn undo_drops_selection_of_vanished_asset() {
        let (mut s, page) = session();
        let id = s.create_asset(AssetKind::Audio, page).unwrap();
        assert!(s.undo());
        assert_eq!(s.selection(), &Selection::Idle);
        assert!(s.redo());
        assert!(s.document().page(page).unwrap().asset(id).is_some());
    }

    #[test]
    fn text_edit_commits_on_blur_and_discards_on_escape() {
        let (mut s, page) = session();
        let id = s.create_asset(AssetKind::Text, page).unwrap();
        assert!(s.double_click_asset(id));
        s.set_text_draft("Photosynthesis");
        let before = s.history().len();
        assert!(s.blur_text());
        assert_eq!(s.history().len(), before + 1);
        let text = s.document().page(page).unwrap().asset(id).unwrap().text().unwrap();
        assert_eq!(text.content, "Photosynthesis");
        assert_eq!(s.selection(), &Selection::Idle);

        s.double_click_asset(id);
        s.set_text_draft("scrapped");
        let esc = KeyEvent::new("Escape", Modifiers::NONE).in_text_input();
        assert_eq!(s.handle_key(&esc), Some(ShortcutAction::Deselect));
        let text = s.document().page(page).unwrap().asset(id).unwrap().text().unwrap();
        assert_eq!(text.content, "Photosynthesis");
    }

    #[test]
    fn unchanged_draft_does_not_commit() {
        let (mut s, page) = session();
        let id = s.create_asset(AssetKind::Text, page).unwrap();
        s.double_click_asset(id);
        let before = s.history().len();
        s.click_canvas();
        assert_eq!(s.history().len(), before);
    }

    #[test]
    fn double_click_respects_profile() {
        let profile = CanvasProfile {
            text_edit_in_place: false,
            ..CanvasProfile::slide()
        };
        let mut s = EditorSession::new(Document::with_phases(["a"]), profile);
        let page = s.active_page().unwrap().page;
        let id = s.create_asset(AssetKind::Text, page).unwrap();
        assert!(!s.double_click_asset(id));
        assert_eq!(s.selection().target(), Some((page, id)));
    }

    #[test]
    fn delete_key_ignored_in_text_input() {
        let (mut s, page) = session();
        let id = s.create_asset(AssetKind::Image, page).unwrap();
        let typing = KeyEvent::new("Backspace", Modifiers::NONE).in_text_input();
        assert_eq!(s.handle_key(&typing), None);
        assert!(s.document().page(page).unwrap().asset(id).is_some());

        let key = KeyEvent::new("Delete", Modifiers::NONE);
        assert_eq!(s.handle_key(&key), Some(ShortcutAction::Delete));
        assert!(s.document().page(page).unwrap().asset(id).is_none());
        assert_eq!(s.selection(), &Selection::Idle);
    }

    #[test]
    fn layer_and_duplicate_shortcuts() {
        let (mut s, page) = session();
        let a = s.create_asset(AssetKind::Text, page).unwrap();
        let _b = s.create_asset(AssetKind::Image, page).unwrap();
        s.click_asset(a);

        let front = KeyEvent::new("]", Modifiers::CMD_SHIFT);
        assert_eq!(s.handle_key(&front), Some(ShortcutAction::BringToFront));
        assert_eq!(s.document().page(page).unwrap().assets.last().unwrap().id, a);
        // Already at the front: nothing happens.
        assert_eq!(s.handle_key(&front), None);

        let dup = KeyEvent::new("d", Modifiers::CMD);
        assert_eq!(s.handle_key(&dup), Some(ShortcutAction::Duplicate));
        let copy = s.selection().asset().unwrap();
        assert_ne!(copy, a);
        let (ga, gc) = (geometry(&s, page, a), geometry(&s, page, copy));
        assert_eq!((gc.x, gc.y), (ga.x + 20.0, ga.y + 20.0));
    }

    #[test]
    fn apply_generated_rejects_mismatched_payload() {
        let (mut s, page) = session();
        let text = s.create_asset(AssetKind::Text, page).unwrap();
        let image = s.create_asset(AssetKind::Image, page).unwrap();
        let before = s.history().len();

        assert!(!s.apply_generated(page, text, "a cat", GeneratedContent::Url("u".into())));
        assert_eq!(s.history().len(), before);
        let asset = s.document().page(page).unwrap().asset(text).unwrap();
        assert_eq!(asset.prompt, None);

        assert!(s.apply_generated(
            page,
            image,
            "a cat",
            GeneratedContent::Url("https://cdn.example/cat.png".into())
        ));
        let asset = s.document().page(page).unwrap().asset(image).unwrap();
        assert_eq!(asset.prompt.as_deref(), Some("a cat"));
        assert_eq!(
            asset.media().unwrap().url.as_deref(),
            Some("https://cdn.example/cat.png")
        );
    }

    #[test]
    fn delete_active_page_falls_back() {
        let profile = CanvasProfile::reading();
        assert_eq!(profile.surface, Surface::Reading);
        let mut s = EditorSession::new(Document::new(), profile);
        assert_eq!(s.active_page(), None);

        let phase = PhaseKey::intern("session_reading");
        let p1 = s.add_page(phase, None);
        let p2 = s.add_page(phase, None);
        assert_eq!(s.active_page(), Some(PageRef::new(phase, p2)));

        assert!(s.delete_page(phase, p2));
        assert_eq!(s.active_page(), Some(PageRef::new(phase, p1)));
        assert!(s.delete_page(phase, p1));
        assert_eq!(s.active_page(), None);
    }

    #[test]
    fn page_meta_keeps_managed_numbers() {
        let mut s = EditorSession::new(Document::new(), CanvasProfile::reading());
        let phase = PhaseKey::intern("session_meta");
        let page = s.add_page(phase, None);
        let meta = PageMeta {
            title: Some("Vocabulary".into()),
            page_number: Some(9),
            ..PageMeta::default()
        };
        assert!(s.update_page_meta(phase, page, meta));
        let stored = &s.document().page(page).unwrap().meta;
        assert_eq!(stored.title.as_deref(), Some("Vocabulary"));
        assert_eq!(stored.page_number, Some(1));
    }

    #[test]
    fn switching_pages_clears_selection() {
        let (mut s, page) = session();
        s.create_asset(AssetKind::Text, page).unwrap();
        let other = s.document().phases[1].pages[0].id;
        let phase = s.document().phases[1].key;
        assert!(s.set_active_page(phase, other));
        assert_eq!(s.selection(), &Selection::Idle);
        assert!(!s.set_active_page(phase, PageId::intern("ghost")));
    }

    #[test]
    fn size_fields_respect_profile_minimum() {
        let profile = CanvasProfile {
            min_size: 80.0,
            ..CanvasProfile::slide()
        };
        let mut s = EditorSession::new(Document::with_phases(["warmup"]), profile);
        let page = s.active_page().unwrap().page;
        let id = s.create_asset(AssetKind::Image, page).unwrap();

        assert!(s.update_asset_field(page, id, AssetField::Width(60.0)));
        assert!(s.update_asset_field_transient(page, id, AssetField::Height(10.0)));
        let g = geometry(&s, page, id);
        assert_eq!((g.width, g.height), (80.0, 80.0));

        s.update_asset_field(page, id, AssetField::Width(120.0));
        assert_eq!(geometry(&s, page, id).width, 120.0);
    }
}
