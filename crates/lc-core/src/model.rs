//! Asset model: the typed visual elements placed on a page.
//!
//! Every asset shares the same geometry contract (`Geometry`) and carries a
//! kind-specific body. Field edits go through `AssetField`, which is the only
//! mutation path and enforces the model's invariants:
//!
//! - width and height never drop below [`MIN_SIZE`];
//! - font size stays within `8..=200`;
//! - a text stroke is either fully specified (width > 0 and a color) or fully
//!   absent;
//! - a reference image only exists on image and video assets.
//!
//! Editing an asset never touches history; callers decide when to commit.

use crate::geometry::{Geometry, MIN_SIZE};
use crate::id::AssetId;
use serde::{Deserialize, Serialize};

/// Allowed font size range for text assets.
pub const FONT_SIZE_RANGE: (f32, f32) = (8.0, 200.0);

// ─── Colors ──────────────────────────────────────────────────────────────

/// 8-bit RGBA color, used to validate and canonicalize hex strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Parse a single hex digit.
fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Color {
    pub const BLACK: Self = Self::rgba(0, 0, 0, 255);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#RGB`, `#RGBA`, `#RRGGBB` or `#RRGGBBAA` (leading `#` optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();
        let short = |i: usize| hex_val(bytes[i]).map(|v| v * 17);
        let long = |i: usize| Some(hex_val(bytes[i])? << 4 | hex_val(bytes[i + 1])?);

        match bytes.len() {
            3 => Some(Self::rgba(short(0)?, short(1)?, short(2)?, 255)),
            4 => Some(Self::rgba(short(0)?, short(1)?, short(2)?, short(3)?)),
            6 => Some(Self::rgba(long(0)?, long(2)?, long(4)?, 255)),
            8 => Some(Self::rgba(long(0)?, long(2)?, long(4)?, long(6)?)),
            _ => None,
        }
    }

    /// Emit as `#RRGGBB`, or `#RRGGBBAA` when not fully opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

/// Canonicalize a user-supplied color string, or `None` if it is not hex.
pub fn normalize_color(input: &str) -> Option<String> {
    Color::from_hex(input).map(|c| c.to_hex())
}

// ─── Kinds & text styling ────────────────────────────────────────────────

/// The closed set of asset kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Text,
    Image,
    Video,
    Audio,
}

impl AssetKind {
    /// Default `(width, height)` for a newly created asset of this kind.
    pub fn default_size(self) -> (f32, f32) {
        match self {
            Self::Image | Self::Video => (300.0, 200.0),
            Self::Text | Self::Audio => (300.0, 100.0),
        }
    }

    /// Prefix used for generated ids (`text_3`, `image_12`).
    pub fn id_prefix(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Video => "video",
            Self::Audio => "audio",
        }
    }

    /// Whether assets of this kind may carry a reference image.
    pub fn accepts_reference_image(self) -> bool {
        matches!(self, Self::Image | Self::Video)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Content and styling of a text asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextBody {
    pub content: String,
    pub font_size: f32,
    pub font_weight: FontWeight,
    /// Canonical hex color.
    pub color: String,
    pub text_align: TextAlign,
    /// Outline width. `None` means no outline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f32>,
    /// Outline color. Present exactly when `stroke_width` is.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_color: Option<String>,
}

impl Default for TextBody {
    fn default() -> Self {
        Self {
            content: "Double-click to edit".into(),
            font_size: 24.0,
            font_weight: FontWeight::Normal,
            color: Color::BLACK.to_hex(),
            text_align: TextAlign::Left,
            stroke_width: None,
            stroke_color: None,
        }
    }
}

impl TextBody {
    /// The outline as `(width, color)` when enabled.
    pub fn stroke(&self) -> Option<(f32, &str)> {
        match (self.stroke_width, self.stroke_color.as_deref()) {
            (Some(w), Some(c)) if w > 0.0 => Some((w, c)),
            _ => None,
        }
    }

    fn clear_stroke(&mut self) {
        self.stroke_width = None;
        self.stroke_color = None;
    }
}

/// Resolved media reference for image, video, and audio assets.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MediaBody {
    /// Empty until generated or uploaded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Auxiliary image payload (image and video only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_image: Option<String>,
}

/// Kind-specific payload of an asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AssetBody {
    Text(TextBody),
    Image(MediaBody),
    Video(MediaBody),
    Audio(MediaBody),
}

impl AssetBody {
    /// Default body for a kind.
    pub fn for_kind(kind: AssetKind) -> Self {
        match kind {
            AssetKind::Text => Self::Text(TextBody::default()),
            AssetKind::Image => Self::Image(MediaBody::default()),
            AssetKind::Video => Self::Video(MediaBody::default()),
            AssetKind::Audio => Self::Audio(MediaBody::default()),
        }
    }

    pub fn kind(&self) -> AssetKind {
        match self {
            Self::Text(_) => AssetKind::Text,
            Self::Image(_) => AssetKind::Image,
            Self::Video(_) => AssetKind::Video,
            Self::Audio(_) => AssetKind::Audio,
        }
    }

    fn media_mut(&mut self) -> Option<&mut MediaBody> {
        match self {
            Self::Image(m) | Self::Video(m) | Self::Audio(m) => Some(m),
            Self::Text(_) => None,
        }
    }
}

// ─── Asset ───────────────────────────────────────────────────────────────

/// A positioned, typed visual element on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: AssetId,
    #[serde(flatten)]
    pub geometry: Geometry,
    /// Display label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Last generation instruction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(flatten)]
    pub body: AssetBody,
}

/// A single field edit. Carries the new value; `None` clears optional fields.
#[derive(Debug, Clone, PartialEq)]
pub enum AssetField {
    X(f32),
    Y(f32),
    Width(f32),
    Height(f32),
    Rotation(f32),
    Title(Option<String>),
    Prompt(Option<String>),
    ReferenceImage(Option<String>),
    Content(String),
    FontSize(f32),
    FontWeight(FontWeight),
    Color(String),
    TextAlign(TextAlign),
    StrokeWidth(Option<f32>),
    StrokeColor(Option<String>),
    Url(Option<String>),
}

impl Asset {
    /// Create an asset with the kind's default geometry and body.
    pub fn new(id: AssetId, kind: AssetKind) -> Self {
        let (width, height) = kind.default_size();
        Self {
            id,
            geometry: Geometry::new(100.0, 100.0, width, height),
            title: None,
            prompt: None,
            body: AssetBody::for_kind(kind),
        }
    }

    /// Create an asset with a freshly generated id.
    pub fn create(kind: AssetKind) -> Self {
        Self::new(AssetId::with_prefix(kind.id_prefix()), kind)
    }

    pub fn kind(&self) -> AssetKind {
        self.body.kind()
    }

    pub fn text(&self) -> Option<&TextBody> {
        match &self.body {
            AssetBody::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn media(&self) -> Option<&MediaBody> {
        match &self.body {
            AssetBody::Image(m) | AssetBody::Video(m) | AssetBody::Audio(m) => Some(m),
            AssetBody::Text(_) => None,
        }
    }

    /// Deep copy with a fresh id, shifted by `(dx, dy)`.
    pub fn duplicate(&self, dx: f32, dy: f32) -> Self {
        Self {
            id: AssetId::with_prefix(self.kind().id_prefix()),
            geometry: self.geometry.offset(dx, dy),
            ..self.clone()
        }
    }

    /// Pure form of [`Asset::set_field`].
    #[must_use]
    pub fn with_field(mut self, field: AssetField) -> Self {
        self.set_field(field);
        self
    }

    /// Apply a field edit in place.
    ///
    /// Returns `false` when the edit does not apply to this kind or the value
    /// is rejected (e.g. a non-hex color). Out-of-range numbers are clamped
    /// and still count as applied.
    pub fn set_field(&mut self, field: AssetField) -> bool {
        let g = &mut self.geometry;
        match field {
            AssetField::X(x) => g.x = x,
            AssetField::Y(y) => g.y = y,
            AssetField::Width(w) => g.width = w.max(MIN_SIZE),
            AssetField::Height(h) => g.height = h.max(MIN_SIZE),
            AssetField::Rotation(r) => g.rotation = r,
            AssetField::Title(t) => self.title = t,
            AssetField::Prompt(p) => self.prompt = p,
            AssetField::ReferenceImage(img) => {
                if !self.kind().accepts_reference_image() {
                    return false;
                }
                match self.body.media_mut() {
                    Some(m) => m.reference_image = img,
                    None => return false,
                }
            }
            AssetField::Url(url) => match self.body.media_mut() {
                Some(m) => m.url = url,
                None => return false,
            },
            other => {
                let AssetBody::Text(t) = &mut self.body else {
                    return false;
                };
                return set_text_field(t, other);
            }
        }
        true
    }
}

fn set_text_field(t: &mut TextBody, field: AssetField) -> bool {
    match field {
        AssetField::Content(c) => t.content = c,
        AssetField::FontSize(s) => t.font_size = s.clamp(FONT_SIZE_RANGE.0, FONT_SIZE_RANGE.1),
        AssetField::FontWeight(w) => t.font_weight = w,
        AssetField::TextAlign(a) => t.text_align = a,
        AssetField::Color(c) => match normalize_color(&c) {
            Some(hex) => t.color = hex,
            None => return false,
        },
        AssetField::StrokeWidth(Some(w)) if w > 0.0 => {
            t.stroke_width = Some(w);
            if t.stroke_color.is_none() {
                t.stroke_color = Some(Color::BLACK.to_hex());
            }
        }
        AssetField::StrokeWidth(_) | AssetField::StrokeColor(None) => t.clear_stroke(),
        AssetField::StrokeColor(Some(c)) => {
            // A color alone cannot enable the outline.
            if t.stroke_width.is_none() {
                return false;
            }
            match normalize_color(&c) {
                Some(hex) => t.stroke_color = Some(hex),
                None => return false,
            }
        }
        _ => return false,
    }
    true
}
