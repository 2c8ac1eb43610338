//! Core types for layout analysis.

pub mod content;
pub mod font;
pub mod geometry;
pub mod roles;

pub use content::{
    Character, Document, DocumentStatistics, Figure, Page, Paragraph, Shape, TextBlock, TextLine, Word, WordRef,
};
pub use font::{Color, ColorId, Font, FontFace, FontFaceKey, FontId};
pub use geometry::{Baseline, Position, Rectangle};
pub use roles::{ExtractionUnit, SemanticRole};
