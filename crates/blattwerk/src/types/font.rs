//! Fonts, colors, and the per-document registries that intern them.
//!
//! Characters reference fonts and colors by index so that equality checks
//! and frequency counting stay cheap; the registries keep the producer's
//! string identifiers for serialization.

use serde::{Deserialize, Serialize};

/// Index of a [`Font`] in the document's font registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FontId(pub usize);

/// Index of a [`Color`] in the document's color registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorId(pub usize);

/// A font as surfaced by the character producer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Font {
    /// Producer-assigned identifier, unique within the document.
    pub id: String,
    /// Normalized name (lowercased, subset prefix stripped).
    pub name: String,
    pub family_name: String,
    pub base_name: String,
    pub is_bold: bool,
    pub is_italic: bool,
    pub is_type3: bool,
}

/// An RGB color with a producer-assigned identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub id: String,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// A font at a concrete size in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FontFace {
    pub font: FontId,
    pub size: f32,
}

impl FontFace {
    pub fn new(font: FontId, size: f32) -> FontFace {
        FontFace { font, size }
    }

    /// Hashable identity for statistics: the font plus the size rounded to
    /// one decimal, so faces that differ only by sub-0.1pt rendering noise
    /// collapse into one bucket.
    pub fn key(&self) -> FontFaceKey {
        FontFaceKey {
            font: self.font,
            deci_size: (self.size * 10.0).round() as i32,
        }
    }
}

/// Value-equality key for [`FontFace`] with the size quantized to 0.1pt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FontFaceKey {
    pub font: FontId,
    pub deci_size: i32,
}

impl FontFaceKey {
    pub fn size(&self) -> f32 {
        self.deci_size as f32 / 10.0
    }
}
