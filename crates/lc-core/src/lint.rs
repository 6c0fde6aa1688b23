//! Structural checks for documents.
//!
//! `lint_document` reports invariant violations without modifying anything.
//! `repair_document` fixes the same violations in place; the import path runs
//! it so that externally produced data can never put the editor into an
//! inconsistent state.

use crate::document::{Document, Page, Phase};
use crate::geometry::MIN_SIZE;
use crate::id::{AssetId, PageId, PhaseKey};
use crate::model::{AssetBody, FONT_SIZE_RANGE, TextBody, normalize_color};
use std::collections::HashSet;

// ─── Diagnostic types ────────────────────────────────────────────────────

/// Severity of a lint finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintSeverity {
    /// Breaks an invariant the editor relies on.
    Error,
    /// Tolerated, but the editor would never produce it.
    Warning,
}

/// What a diagnostic points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintTarget {
    Phase(PhaseKey),
    Page(PageId),
    Asset(PageId, AssetId),
}

/// A single lint diagnostic.
#[derive(Debug, Clone)]
pub struct LintDiagnostic {
    pub target: LintTarget,
    /// Human-readable message.
    pub message: String,
    pub severity: LintSeverity,
    /// Short rule identifier (e.g. "duplicate-id", "undersized").
    pub rule: &'static str,
}

// ─── Public API ───────────────────────────────────────────────────────────

/// Run all lint rules over the document and return diagnostics.
#[must_use]
pub fn lint_document(doc: &Document) -> Vec<LintDiagnostic> {
    let mut diags = Vec::new();
    lint_duplicate_phases(doc, &mut diags);
    lint_duplicate_pages(doc, &mut diags);
    for phase in &doc.phases {
        for page in &phase.pages {
            lint_page(page, &mut diags);
        }
        lint_page_numbers(&phase.pages, &mut diags);
    }
    diags
}

/// Fix every violation `lint_document` can report. Returns the number of
/// fixes applied.
pub fn repair_document(doc: &mut Document) -> usize {
    let mut fixes = merge_duplicate_phases(doc);
    let mut seen_pages = HashSet::new();
    for phase in &mut doc.phases {
        for page in &mut phase.pages {
            if !seen_pages.insert(page.id) {
                page.id = PageId::fresh();
                fixes += 1;
            }
            fixes += repair_page(page);
        }
        let numbered = phase.pages.iter().any(|p| p.meta.page_number.is_some());
        if numbered && !numbers_are_sequential(&phase.pages) {
            phase.renumber();
            fixes += 1;
        }
    }
    if fixes > 0 {
        log::warn!("repaired {fixes} structural issue(s) in document");
    }
    fixes
}

// ─── Rules ────────────────────────────────────────────────────────────────

fn lint_duplicate_phases(doc: &Document, diags: &mut Vec<LintDiagnostic>) {
    let mut seen = HashSet::new();
    for phase in &doc.phases {
        if !seen.insert(phase.key) {
            diags.push(LintDiagnostic {
                target: LintTarget::Phase(phase.key),
                message: format!("Phase `{}` appears more than once.", phase.key),
                severity: LintSeverity::Error,
                rule: "duplicate-phase-key",
            });
        }
    }
}

fn lint_duplicate_pages(doc: &Document, diags: &mut Vec<LintDiagnostic>) {
    let mut seen = HashSet::new();
    for page in doc.phases.iter().flat_map(|ph| ph.pages.iter()) {
        if !seen.insert(page.id) {
            diags.push(LintDiagnostic {
                target: LintTarget::Page(page.id),
                message: format!("Page id `{}` is used more than once.", page.id),
                severity: LintSeverity::Error,
                rule: "duplicate-page-id",
            });
        }
    }
}

fn lint_page(page: &Page, diags: &mut Vec<LintDiagnostic>) {
    let mut seen = HashSet::new();
    for asset in &page.assets {
        let target = LintTarget::Asset(page.id, asset.id);
        let mut push = |severity, rule, message: String| {
            diags.push(LintDiagnostic {
                target,
                message,
                severity,
                rule,
            });
        };

        if !seen.insert(asset.id) {
            push(
                LintSeverity::Error,
                "duplicate-id",
                format!("Asset id `{}` appears twice on page `{}`.", asset.id, page.id),
            );
        }
        let g = &asset.geometry;
        if g.width < MIN_SIZE || g.height < MIN_SIZE {
            push(
                LintSeverity::Error,
                "undersized",
                format!(
                    "Asset `{}` is {}×{}, below the {MIN_SIZE} minimum.",
                    asset.id, g.width, g.height
                ),
            );
        }
        match &asset.body {
            AssetBody::Text(t) => lint_text(t, &mut push),
            AssetBody::Audio(m) if m.reference_image.is_some() => push(
                LintSeverity::Warning,
                "misplaced-reference-image",
                format!("Audio asset `{}` carries a reference image.", asset.id),
            ),
            _ => {}
        }
    }
}

fn lint_text(t: &TextBody, push: &mut impl FnMut(LintSeverity, &'static str, String)) {
    let has_width = t.stroke_width.is_some_and(|w| w > 0.0);
    if has_width != t.stroke_color.is_some() || (t.stroke_width.is_some() && !has_width) {
        push(
            LintSeverity::Error,
            "partial-stroke",
            "Text outline must set both width and color, or neither.".into(),
        );
    }
    if !(FONT_SIZE_RANGE.0..=FONT_SIZE_RANGE.1).contains(&t.font_size) {
        push(
            LintSeverity::Warning,
            "font-size-range",
            format!("Font size {} is outside 8–200.", t.font_size),
        );
    }
    let colors = std::iter::once(t.color.as_str()).chain(t.stroke_color.as_deref());
    for c in colors {
        if normalize_color(c).is_none() {
            push(
                LintSeverity::Warning,
                "invalid-color",
                format!("`{c}` is not a hex color."),
            );
        }
    }
}

fn lint_page_numbers(pages: &[Page], diags: &mut Vec<LintDiagnostic>) {
    if !pages.iter().any(|p| p.meta.page_number.is_some()) {
        return;
    }
    for (i, page) in pages.iter().enumerate() {
        let expected = u32::try_from(i + 1).ok();
        if page.meta.page_number != expected {
            diags.push(LintDiagnostic {
                target: LintTarget::Page(page.id),
                message: format!(
                    "Page `{}` is numbered {:?}, expected {:?}.",
                    page.id, page.meta.page_number, expected
                ),
                severity: LintSeverity::Warning,
                rule: "page-number-gap",
            });
        }
    }
}

fn numbers_are_sequential(pages: &[Page]) -> bool {
    pages
        .iter()
        .enumerate()
        .all(|(i, p)| p.meta.page_number == u32::try_from(i + 1).ok())
}

/// Fold every repeated phase into the first phase with its key, keeping
/// page order. Returns the number of phases merged away.
fn merge_duplicate_phases(doc: &mut Document) -> usize {
    let mut merged: Vec<Phase> = Vec::with_capacity(doc.phases.len());
    let mut fixes = 0;
    for phase in doc.phases.drain(..) {
        match merged.iter_mut().find(|p| p.key == phase.key) {
            Some(first) => {
                first.pages.extend(phase.pages);
                fixes += 1;
            }
            None => merged.push(phase),
        }
    }
    doc.phases = merged;
    fixes
}

fn repair_page(page: &mut Page) -> usize {
    let mut fixes = 0;
    let mut seen = HashSet::new();
    for asset in &mut page.assets {
        if !seen.insert(asset.id) {
            asset.id = AssetId::with_prefix(asset.kind().id_prefix());
            seen.insert(asset.id);
            fixes += 1;
        }
        let g = &mut asset.geometry;
        if g.width < MIN_SIZE || g.height < MIN_SIZE {
            g.clamp_size(MIN_SIZE);
            fixes += 1;
        }
        match &mut asset.body {
            AssetBody::Text(t) => fixes += repair_text(t),
            AssetBody::Audio(m) if m.reference_image.is_some() => {
                m.reference_image = None;
                fixes += 1;
            }
            _ => {}
        }
    }
    fixes
}

fn repair_text(t: &mut TextBody) -> usize {
    let mut fixes = 0;
    match normalize_color(&t.color) {
        Some(hex) if hex == t.color => {}
        Some(hex) => t.color = hex,
        None => {
            t.color = TextBody::default().color;
            fixes += 1;
        }
    }
    let stroke_color = t.stroke_color.as_deref().and_then(normalize_color);
    match (t.stroke_width, stroke_color) {
        (Some(w), Some(c)) if w > 0.0 => t.stroke_color = Some(c),
        (None, None) if t.stroke_color.is_none() => {}
        _ => {
            t.stroke_width = None;
            t.stroke_color = None;
            fixes += 1;
        }
    }
    let clamped = t.font_size.clamp(FONT_SIZE_RANGE.0, FONT_SIZE_RANGE.1);
    if clamped != t.font_size {
        t.font_size = clamped;
        fixes += 1;
    }
    fixes
}

// ─── Tests ────────────────────────────────────────────────────────────────
