pub mod document;
pub mod geometry;
pub mod id;
pub mod import;
pub mod lint;
pub mod model;
pub mod profile;
pub mod transform;
pub mod zorder;

pub use document::{Document, Page, PageMeta, PageRef, Phase};
pub use geometry::{CanvasRect, Geometry, MIN_SIZE, Point};
pub use id::{AssetId, PageId, PhaseKey};
pub use import::ImportError;
pub use lint::{LintDiagnostic, LintSeverity, LintTarget, lint_document, repair_document};
pub use model::*;
pub use profile::{CanvasProfile, Surface};
pub use transform::{Gesture, GestureStart, Handle};
pub use zorder::LayerAction;
