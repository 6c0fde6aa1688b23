//! Canvas capability profiles.
//!
//! The slide canvas and the reading-material canvas run the same engine;
//! what differs between them is captured here and handed to the editor
//! session at construction.

use crate::geometry::MIN_SIZE;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ─── Config ───────────────────────────────────────────────────────────────

/// Which UI surface a profile describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Surface {
    #[default]
    Slide,
    Reading,
}

/// Configuration for one paged canvas.
///
/// Plain deserialization fills missing fields from the slide preset;
/// [`CanvasProfile::from_json`] fills them from the preset of `surface`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CanvasProfile {
    pub surface: Surface,
    /// Page size in canvas units.
    pub page_width: f32,
    pub page_height: f32,
    /// Double-clicking a text asset edits it in place. Default: **true**.
    pub text_edit_in_place: bool,
    /// Rewrite `page_number` after page insertions and removals.
    pub renumber_pages: bool,
    /// Maximum history entries. `None` keeps everything.
    pub history_capacity: Option<usize>,
    /// Offset applied to copied assets and to the assets of a copied page.
    pub copy_offset: (f32, f32),
    /// Lower bound for asset width and height.
    pub min_size: f32,
}

impl Default for CanvasProfile {
    fn default() -> Self {
        Self::slide()
    }
}

impl CanvasProfile {
    /// 16:9 presentation slides.
    pub fn slide() -> Self {
        Self {
            surface: Surface::Slide,
            page_width: 960.0,
            page_height: 540.0,
            text_edit_in_place: true,
            renumber_pages: false,
            history_capacity: None,
            copy_offset: (20.0, 20.0),
            min_size: MIN_SIZE,
        }
    }

    /// Portrait A4-sized reading-material pages.
    pub fn reading() -> Self {
        Self {
            surface: Surface::Reading,
            page_width: 794.0,
            page_height: 1123.0,
            renumber_pages: true,
            ..Self::slide()
        }
    }

    /// The preset for a surface.
    pub fn preset(surface: Surface) -> Self {
        match surface {
            Surface::Slide => Self::slide(),
            Surface::Reading => Self::reading(),
        }
    }

    /// Parse a profile from JSON, filling gaps from the preset named by its
    /// `surface` (slide when absent).
    ///
    /// # Errors
    /// Returns the serde error when the input is not a JSON object of the
    /// expected shape.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let overrides: Map<String, Value> = serde_json::from_str(text)?;
        let surface = match overrides.get("surface") {
            Some(value) => Surface::deserialize(value)?,
            None => Surface::default(),
        };
        let mut merged = match serde_json::to_value(Self::preset(surface))? {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        merged.extend(overrides);
        let mut profile: Self = serde_json::from_value(Value::Object(merged))?;
        // Never below the model floor.
        profile.min_size = profile.min_size.max(MIN_SIZE);
        Ok(profile)
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reading_preset_renumbers() {
        let p = CanvasProfile::reading();
        assert_eq!(p.surface, Surface::Reading);
        assert!(p.renumber_pages);
        assert!(p.text_edit_in_place);
        assert!(p.page_height > p.page_width);
    }

    #[test]
    fn json_fills_missing_fields_from_its_surface() {
        let p = CanvasProfile::from_json(r#"{ "surface": "reading", "historyCapacity": 30 }"#)
            .unwrap();
        assert_eq!(p.surface, Surface::Reading);
        assert_eq!(p.history_capacity, Some(30));
        assert_eq!(p.copy_offset, (20.0, 20.0));
        assert_eq!(p.page_width, 794.0);
        assert_eq!(p.page_height, 1123.0);
        assert!(p.renumber_pages);
    }

    #[test]
    fn bare_reading_surface_is_the_reading_preset() {
        let p = CanvasProfile::from_json(r#"{ "surface": "reading" }"#).unwrap();
        assert_eq!(p, CanvasProfile::reading());
    }

    #[test]
    fn json_without_surface_is_based_on_slides() {
        let p = CanvasProfile::from_json(r#"{ "renumberPages": true }"#).unwrap();
        assert_eq!(p.surface, Surface::Slide);
        assert_eq!(p.page_width, 960.0);
        assert!(p.renumber_pages);
    }

    #[test]
    fn json_rejects_unknown_surface() {
        assert!(CanvasProfile::from_json(r#"{ "surface": "poster" }"#).is_err());
    }

    #[test]
    fn json_min_size_cannot_go_below_floor() {
        let p = CanvasProfile::from_json(r#"{ "minSize": 5 }"#).unwrap();
        assert_eq!(p.min_size, MIN_SIZE);
    }

    #[test]
    fn json_rejects_non_object() {
        assert!(CanvasProfile::from_json("42").is_err());
    }
}
