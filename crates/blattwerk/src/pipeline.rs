//! Pipeline orchestration.
//!
//! Stages run in dependency order: line tokenization and block
//! tokenization fan out per page (their inputs are disjoint), the
//! document-level statistics are finalized between them, and the
//! semanticizer and paragraph assembler run on the joined document.
//! Cancellation is honored at page boundaries and between semantic
//! modules; a cancelled run discards the document.

use rayon::prelude::*;
use std::sync::Arc;

use crate::cancel::CancelToken;
use crate::config::LayoutConfig;
use crate::error::Result;
use crate::observer::{Diagnostic, DiagnosticObserver, TracingObserver};
use crate::semantic;
use crate::stats;
use crate::tokenize::{Dictionary, assemble_paragraphs, tokenize_blocks, tokenize_lines};
use crate::types::content::Document;

/// Runs the layout-analysis stages over a produced document.
pub struct Pipeline {
    config: LayoutConfig,
    cancel: CancelToken,
    observer: Arc<dyn DiagnosticObserver>,
    dictionary: Option<Dictionary>,
}

impl Default for Pipeline {
    fn default() -> Self {
        Pipeline::new(LayoutConfig::default())
    }
}

impl Pipeline {
    pub fn new(config: LayoutConfig) -> Pipeline {
        Pipeline {
            config,
            cancel: CancelToken::new(),
            observer: Arc::new(TracingObserver),
            dictionary: None,
        }
    }

    /// Use an externally owned cancellation token.
    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Pipeline {
        self.cancel = cancel;
        self
    }

    /// Replace the default tracing observer.
    pub fn with_observer(mut self, observer: Arc<dyn DiagnosticObserver>) -> Pipeline {
        self.observer = observer;
        self
    }

    /// Supply a word list for dehyphenation.
    pub fn with_dictionary(mut self, dictionary: Dictionary) -> Pipeline {
        self.dictionary = Some(dictionary);
        self
    }

    /// Run all stages. The returned document carries lines, blocks,
    /// roles, paragraphs, and final statistics.
    pub fn run(&self, mut doc: Document) -> Result<Document> {
        if doc.is_empty() {
            self.observer.observe(Diagnostic::EmptyDocument);
        }

        let observer = &*self.observer;
        let cancel = &self.cancel;

        cancel.check()?;
        doc.pages.par_iter_mut().for_each(|page| {
            if cancel.is_cancelled() {
                return;
            }
            tokenize_lines(page, &self.config.line, observer);
        });
        cancel.check()?;

        let doc_pitch = stats::document_line_pitch(&doc.pages);
        let pages = &mut doc.pages;
        let fonts = &doc.fonts;
        pages.par_iter_mut().for_each(|page| {
            if cancel.is_cancelled() {
                return;
            }
            tokenize_blocks(page, fonts, &doc_pitch, &self.config.block, observer);
        });
        cancel.check()?;

        stats::finalize_statistics(&mut doc);

        semantic::semanticize(&mut doc, &self.config.semantic, cancel, observer)?;
        cancel.check()?;

        assemble_paragraphs(&mut doc, &self.config.paragraph, self.dictionary.as_ref());
        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExtractionError;
    use crate::types::content::Character;
    use crate::types::font::{Color, ColorId, Font, FontId};
    use crate::types::geometry::Rectangle;
    use crate::types::roles::SemanticRole;

    fn document_with_two_lines() -> Document {
        let mut doc = Document::default();
        doc.fonts = vec![Font {
            id: "font-0".to_string(),
            name: "cmr10".to_string(),
            family_name: "Computer Modern".to_string(),
            base_name: "CMR10".to_string(),
            is_bold: false,
            is_italic: false,
            is_type3: false,
        }];
        doc.colors = vec![Color {
            id: "color-0".to_string(),
            r: 0,
            g: 0,
            b: 0,
        }];
        let mut page = crate::types::content::Page::new(1, 612.0, 792.0);
        for (y, text) in [(700.0, "first line of text"), (688.0, "second line of text")] {
            for (i, ch) in text.chars().enumerate() {
                if ch == ' ' {
                    continue;
                }
                let x = 100.0 + i as f64 * 5.0;
                page.chars.push(Character {
                    glyph: ch.to_string(),
                    rect: Rectangle::from_corners(x, y, x + 5.0, y + 10.0),
                    baseline_y: y,
                    font: FontId(0),
                    font_size: 10.0,
                    color: ColorId(0),
                    rotation: 0.0,
                });
            }
        }
        doc.pages.push(page);
        doc
    }

    #[test]
    fn test_full_pipeline_produces_paragraphs() {
        let doc = Pipeline::default().run(document_with_two_lines()).unwrap();
        assert_eq!(doc.pages[0].lines.len(), 2);
        assert_eq!(doc.pages[0].blocks.len(), 1);
        assert_eq!(doc.paragraphs.len(), 1);
        assert_eq!(doc.paragraphs[0].role, SemanticRole::BodyText);
    }

    #[test]
    fn test_reading_order_preserved() {
        let doc = Pipeline::default().run(document_with_two_lines()).unwrap();
        let page = &doc.pages[0];
        let block_text: Vec<&str> = page.blocks.iter().map(|b| b.text.as_str()).collect();
        let line_text: Vec<&str> = page.lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(block_text.join(" "), line_text.join(" "));
    }

    #[test]
    fn test_empty_document_survives() {
        let doc = Pipeline::default().run(Document::default()).unwrap();
        assert!(doc.pages.is_empty());
        assert!(doc.paragraphs.is_empty());
    }

    #[test]
    fn test_cancellation_surfaces() {
        let token = CancelToken::new();
        token.cancel();
        let pipeline = Pipeline::default().with_cancel_token(token);
        let result = pipeline.run(document_with_two_lines());
        assert!(matches!(result, Err(ExtractionError::Cancelled)));
    }
}
