//! Document / container model: phases → pages → assets.
//!
//! A `Document` is an ordered list of phases, each keyed by a `PhaseKey` and
//! holding an ordered list of pages. Every page owns its assets; list order
//! is z-order (index 0 is the back-most asset).
//!
//! All types here are plain owned trees, so `Clone` is a full structural
//! deep copy: a cloned document, page or asset shares nothing with the
//! original. The `duplicate` helpers additionally assign fresh ids.

use crate::geometry::Point;
use crate::id::{AssetId, PageId, PhaseKey};
use crate::model::{Asset, AssetField};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

// ─── Page ────────────────────────────────────────────────────────────────

/// Descriptive metadata of a page.
///
/// Slide steps use `title`/`time`/`objective`; reading-material pages use
/// `page_number`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub objective: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_number: Option<u32>,
}

/// An ordered container of assets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: PageId,
    #[serde(flatten)]
    pub meta: PageMeta,
    /// Back-to-front stacking order.
    #[serde(default)]
    pub assets: Vec<Asset>,
}

impl Page {
    pub fn new(id: PageId) -> Self {
        Self {
            id,
            meta: PageMeta::default(),
            assets: Vec::new(),
        }
    }

    /// Create an empty page with a fresh id.
    pub fn create() -> Self {
        Self::new(PageId::fresh())
    }

    pub fn index_of(&self, id: AssetId) -> Option<usize> {
        self.assets.iter().position(|a| a.id == id)
    }

    pub fn asset(&self, id: AssetId) -> Option<&Asset> {
        self.assets.iter().find(|a| a.id == id)
    }

    pub fn asset_mut(&mut self, id: AssetId) -> Option<&mut Asset> {
        self.assets.iter_mut().find(|a| a.id == id)
    }

    /// Asset ids in z-order.
    pub fn asset_ids(&self) -> SmallVec<[AssetId; 8]> {
        self.assets.iter().map(|a| a.id).collect()
    }

    /// Append an asset on top of the stack.
    pub fn push_asset(&mut self, asset: Asset) {
        self.assets.push(asset);
    }

    /// Remove an asset, preserving the order of the rest.
    pub fn remove_asset(&mut self, id: AssetId) -> Option<Asset> {
        let idx = self.index_of(id)?;
        Some(self.assets.remove(idx))
    }

    /// Apply a field edit to one asset. Returns `false` if the asset is
    /// missing or the edit was rejected.
    pub fn update_asset(&mut self, id: AssetId, field: AssetField) -> bool {
        self.asset_mut(id).is_some_and(|a| a.set_field(field))
    }

    /// Copy an asset (fresh id, shifted by `offset`) onto the top of the
    /// stack. Returns the copy's id.
    pub fn copy_asset(&mut self, id: AssetId, offset: (f32, f32)) -> Option<AssetId> {
        let copy = self.asset(id)?.duplicate(offset.0, offset.1);
        let new_id = copy.id;
        self.assets.push(copy);
        Some(new_id)
    }

    /// Front-most asset whose unrotated box contains a page-local point.
    pub fn hit_test(&self, p: Point) -> Option<AssetId> {
        self.assets
            .iter()
            .rev()
            .find(|a| a.geometry.contains(p.x, p.y))
            .map(|a| a.id)
    }

    /// Deep copy with a fresh page id and fresh asset ids, every asset
    /// shifted by `offset`.
    pub fn duplicate(&self, offset: (f32, f32)) -> Self {
        Self {
            id: PageId::fresh(),
            meta: self.meta.clone(),
            assets: self
                .assets
                .iter()
                .map(|a| a.duplicate(offset.0, offset.1))
                .collect(),
        }
    }
}

// ─── Phase & Document ────────────────────────────────────────────────────

/// A lesson phase: a keyed, ordered list of pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phase {
    pub key: PhaseKey,
    #[serde(default)]
    pub pages: Vec<Page>,
}

impl Phase {
    pub fn new(key: PhaseKey) -> Self {
        Self {
            key,
            pages: Vec::new(),
        }
    }

    pub fn page_index(&self, id: PageId) -> Option<usize> {
        self.pages.iter().position(|p| p.id == id)
    }

    /// Rewrite `page_number` as 1-based position.
    pub fn renumber(&mut self) {
        for (i, page) in self.pages.iter_mut().enumerate() {
            page.meta.page_number = u32::try_from(i + 1).ok();
        }
    }
}

/// A reference to one page inside a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRef {
    pub phase: PhaseKey,
    pub page: PageId,
}

impl PageRef {
    pub const fn new(phase: PhaseKey, page: PageId) -> Self {
        Self { phase, page }
    }
}

/// The full editable content of a session.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub phases: Vec<Phase>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document with one empty page per phase key.
    pub fn with_phases<'a>(keys: impl IntoIterator<Item = &'a str>) -> Self {
        let phases = keys
            .into_iter()
            .map(|k| {
                let mut phase = Phase::new(PhaseKey::intern(k));
                phase.pages.push(Page::create());
                phase
            })
            .collect();
        Self { phases }
    }

    pub fn phase(&self, key: PhaseKey) -> Option<&Phase> {
        self.phases.iter().find(|p| p.key == key)
    }

    pub fn phase_mut(&mut self, key: PhaseKey) -> Option<&mut Phase> {
        self.phases.iter_mut().find(|p| p.key == key)
    }

    /// Find a phase by key, creating it at the end if missing.
    pub fn phase_or_insert(&mut self, key: PhaseKey) -> &mut Phase {
        let idx = match self.phases.iter().position(|p| p.key == key) {
            Some(idx) => idx,
            None => {
                self.phases.push(Phase::new(key));
                self.phases.len() - 1
            }
        };
        &mut self.phases[idx]
    }

    /// Look up a page by id across all phases.
    pub fn page(&self, id: PageId) -> Option<&Page> {
        self.phases
            .iter()
            .flat_map(|ph| ph.pages.iter())
            .find(|p| p.id == id)
    }

    pub fn page_mut(&mut self, id: PageId) -> Option<&mut Page> {
        self.phases
            .iter_mut()
            .flat_map(|ph| ph.pages.iter_mut())
            .find(|p| p.id == id)
    }

    /// Phase key that owns a page.
    pub fn phase_of(&self, id: PageId) -> Option<PhaseKey> {
        self.phases
            .iter()
            .find(|ph| ph.page_index(id).is_some())
            .map(|ph| ph.key)
    }

    /// All pages in document order, paired with their phase.
    pub fn page_refs(&self) -> impl Iterator<Item = PageRef> + '_ {
        self.phases
            .iter()
            .flat_map(|ph| ph.pages.iter().map(move |p| PageRef::new(ph.key, p.id)))
    }

    pub fn first_page(&self) -> Option<PageRef> {
        self.page_refs().next()
    }

    pub fn contains(&self, r: PageRef) -> bool {
        self.phase(r.phase)
            .is_some_and(|ph| ph.page_index(r.page).is_some())
    }

    /// Insert a new empty page. `at` past the end appends; a missing phase is
    /// created. When `renumber` is set the phase's page numbers are rewritten.
    pub fn add_page(&mut self, phase: PhaseKey, at: Option<usize>, renumber: bool) -> PageId {
        let ph = self.phase_or_insert(phase);
        let page = Page::create();
        let id = page.id;
        let idx = at.unwrap_or(ph.pages.len()).min(ph.pages.len());
        ph.pages.insert(idx, page);
        if renumber {
            ph.renumber();
        }
        id
    }

    /// Remove a page. Returns the removed page and the index it occupied.
    pub fn remove_page(
        &mut self,
        phase: PhaseKey,
        page: PageId,
        renumber: bool,
    ) -> Option<(Page, usize)> {
        let ph = self.phase_mut(phase)?;
        let idx = ph.page_index(page)?;
        let removed = ph.pages.remove(idx);
        if renumber {
            ph.renumber();
        }
        Some((removed, idx))
    }

    /// Deep-copy a page (fresh ids, assets shifted by `offset`) and insert the
    /// copy right after the original.
    pub fn copy_page(
        &mut self,
        phase: PhaseKey,
        page: PageId,
        offset: (f32, f32),
        renumber: bool,
    ) -> Option<PageId> {
        let ph = self.phase_mut(phase)?;
        let idx = ph.page_index(page)?;
        let copy = ph.pages[idx].duplicate(offset);
        let id = copy.id;
        ph.pages.insert(idx + 1, copy);
        if renumber {
            ph.renumber();
        }
        Some(id)
    }

    /// Choose the page to show after `removed_index` was deleted from
    /// `phase`: the previous page, else the page now at that index, else the
    /// first page of another non-empty phase.
    pub fn fallback_page(&self, phase: PhaseKey, removed_index: usize) -> Option<PageRef> {
        if let Some(ph) = self.phase(phase) {
            let candidate = if removed_index > 0 {
                ph.pages.get(removed_index - 1)
            } else {
                ph.pages.first()
            };
            if let Some(p) = candidate {
                return Some(PageRef::new(phase, p.id));
            }
        }
        self.phases
            .iter()
            .filter(|ph| ph.key != phase)
            .find_map(|ph| ph.pages.first().map(|p| PageRef::new(ph.key, p.id)))
    }

    /// Total number of assets across all pages.
    pub fn asset_count(&self) -> usize {
        self.phases
            .iter()
            .flat_map(|ph| ph.pages.iter())
            .map(|p| p.assets.len())
            .sum()
    }
}
