//! JSON import/export of documents.
//!
//! Imported payloads come from outside the editor (templates, navigation
//! state, other screens), so the reader is lenient: two top-level shapes are
//! accepted, missing ids are generated, unreadable pages and assets are
//! skipped with a warning, and the result is passed through
//! [`repair_document`] before it is handed to a session.
//!
//! Accepted shapes (phase order follows the JSON order):
//!
//! ```json
//! { "phases": [ { "key": "intro", "pages": [ ... ] } ] }
//! { "intro": [ ... ], "practice": [ ... ] }
//! ```

use crate::document::{Document, Page, Phase};
use crate::id::{AssetId, PageId, PhaseKey};
use crate::lint::repair_document;
use crate::model::Asset;
use serde_json::{Map, Value};
use thiserror::Error;

/// Why an import produced no document.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected a JSON object at the top level")]
    NotAnObject,
}

impl Document {
    /// Parse a document from JSON.
    ///
    /// # Errors
    /// Fails only when the text is not JSON or its top level is not an
    /// object; everything below that is repaired or skipped.
    pub fn from_json(text: &str) -> Result<Self, ImportError> {
        let value: Value = serde_json::from_str(text)?;
        let Value::Object(root) = value else {
            return Err(ImportError::NotAnObject);
        };

        let phases = match root.get("phases") {
            Some(Value::Array(list)) => list.iter().filter_map(read_phase_entry).collect(),
            _ => read_phase_map(&root),
        };
        let mut doc = Document { phases };
        repair_document(&mut doc);
        Ok(doc)
    }

    /// Parse a document, substituting an empty one when the payload is
    /// unusable.
    pub fn import_or_default(text: &str) -> Self {
        Self::from_json(text).unwrap_or_else(|err| {
            log::warn!("import failed, starting from an empty document: {err}");
            Document::default()
        })
    }

    /// Serialize to pretty-printed JSON in the `phases` shape.
    pub fn to_json(&self) -> String {
        // No map has non-string keys, so this cannot fail.
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

fn read_phase_entry(value: &Value) -> Option<Phase> {
    let obj = value.as_object()?;
    let Some(key) = obj.get("key").and_then(Value::as_str) else {
        log::warn!("skipping phase without a key");
        return None;
    };
    let pages = obj.get("pages").map(read_pages).unwrap_or_default();
    Some(Phase {
        key: PhaseKey::intern(key),
        pages,
    })
}

fn read_phase_map(root: &Map<String, Value>) -> Vec<Phase> {
    root.iter()
        .map(|(key, pages)| Phase {
            key: PhaseKey::intern(key),
            pages: read_pages(pages),
        })
        .collect()
}

fn read_pages(value: &Value) -> Vec<Page> {
    let Some(list) = value.as_array() else {
        log::warn!("expected a list of pages, got {value}");
        return Vec::new();
    };
    list.iter().filter_map(read_page).collect()
}

fn read_page(value: &Value) -> Option<Page> {
    let mut obj = value.as_object()?.clone();
    let assets = obj.remove("assets");
    obj.entry("id")
        .or_insert_with(|| Value::String(PageId::fresh().as_str().to_owned()));

    let mut page: Page = match serde_json::from_value(Value::Object(obj)) {
        Ok(page) => page,
        Err(err) => {
            log::warn!("skipping unreadable page: {err}");
            return None;
        }
    };
    page.assets = assets
        .as_ref()
        .and_then(Value::as_array)
        .map(|list| list.iter().filter_map(read_asset).collect())
        .unwrap_or_default();
    Some(page)
}

fn read_asset(value: &Value) -> Option<Asset> {
    let mut obj = value.as_object()?.clone();
    if !obj.contains_key("id") {
        let id = obj
            .get("type")
            .and_then(Value::as_str)
            .map_or_else(AssetId::anonymous, AssetId::with_prefix);
        obj.insert("id".into(), Value::String(id.as_str().to_owned()));
    }
    let (has_width, has_height) = (obj.contains_key("width"), obj.contains_key("height"));
    let mut asset: Asset = match serde_json::from_value(Value::Object(obj)) {
        Ok(asset) => asset,
        Err(err) => {
            log::warn!("skipping unreadable asset: {err}");
            return None;
        }
    };
    // A missing dimension takes the size a new asset of the same kind gets.
    let (width, height) = asset.kind().default_size();
    if !has_width {
        asset.geometry.width = width;
    }
    if !has_height {
        asset.geometry.height = height;
    }
    Some(asset)
}
