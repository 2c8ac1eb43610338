//! Caption detection by figure/shape adjacency.

use crate::error::Result;
use crate::semantic::SemanticModule;
use crate::semantic::ledger::RoleLedger;
use crate::types::content::Document;
use crate::types::geometry::Rectangle;
use crate::types::roles::SemanticRole;

/// Captions are short. Longer neighboring blocks are body text that
/// happens to sit next to a figure.
const MAX_LINES: usize = 4;

/// Tags unassigned blocks that sit directly above or below a figure or
/// shape as CAPTION.
#[derive(Debug, Clone, Copy)]
pub struct CaptionModule {
    /// Maximum vertical gap between block and graphic, in points.
    pub gap: f64,
}

impl SemanticModule for CaptionModule {
    fn name(&self) -> &'static str {
        "caption"
    }

    fn semanticize(&self, doc: &mut Document, ledger: &mut RoleLedger) -> Result<()> {
        let mut captions: Vec<(usize, usize)> = Vec::new();
        for (page_idx, page) in doc.pages.iter().enumerate() {
            let graphics: Vec<Rectangle> = page
                .figures
                .iter()
                .map(|f| f.position.rect)
                .chain(page.shapes.iter().map(|s| s.position.rect))
                .collect();
            if graphics.is_empty() {
                continue;
            }
            for (block_idx, block) in page.blocks.iter().enumerate() {
                if block.role.is_some() {
                    continue;
                }
                if !block.lines.is_empty() && block.lines.len() > MAX_LINES {
                    continue;
                }
                if graphics.iter().any(|g| self.is_adjacent(&block.rect, g)) {
                    captions.push((page_idx, block_idx));
                }
            }
        }
        for (page, block) in captions {
            ledger.assign(doc, page, block, SemanticRole::Caption);
        }
        Ok(())
    }
}

impl CaptionModule {
    /// Adjacent: horizontally overlapping and vertically within the gap
    /// (above or below the graphic).
    fn is_adjacent(&self, block: &Rectangle, graphic: &Rectangle) -> bool {
        if !block.overlaps_horizontally(graphic) {
            return false;
        }
        let below = graphic.min_y - block.max_y;
        let above = block.min_y - graphic.max_y;
        (0.0..=self.gap).contains(&below) || (0.0..=self.gap).contains(&above)
    }
}
