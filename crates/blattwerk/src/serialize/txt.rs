//! Plain-text back-end.
//!
//! Emits the text of the selected units in reading order: paragraphs
//! separated by blank lines, words and characters one per line. Units
//! without text (figures, shapes, pages) contribute nothing.

use super::{SerializeOptions, Serializer, included_paragraphs};
use crate::error::Result;
use crate::types::content::Document;
use crate::types::roles::ExtractionUnit;

pub struct TxtSerializer {
    options: SerializeOptions,
}

impl TxtSerializer {
    pub fn new() -> TxtSerializer {
        TxtSerializer {
            options: SerializeOptions::default(),
        }
    }

    pub fn with_options(options: SerializeOptions) -> TxtSerializer {
        TxtSerializer { options }
    }
}

impl Default for TxtSerializer {
    fn default() -> Self {
        TxtSerializer::new()
    }
}

impl Serializer for TxtSerializer {
    fn serialize(&self, doc: &Document) -> Result<Vec<u8>> {
        let paragraphs = included_paragraphs(doc, &self.options);
        let mut out = String::new();

        if self.options.includes_unit(ExtractionUnit::Paragraph) {
            for (i, paragraph) in paragraphs.iter().enumerate() {
                if i > 0 {
                    out.push('\n');
                }
                out.push_str(&paragraph.text);
                out.push('\n');
            }
        }

        if self.options.includes_unit(ExtractionUnit::Word) {
            for paragraph in &paragraphs {
                for wr in &paragraph.words {
                    out.push_str(&doc.pages[wr.page].words[wr.word].text);
                    out.push('\n');
                }
            }
        }

        if self.options.includes_unit(ExtractionUnit::Character) {
            for paragraph in &paragraphs {
                for wr in &paragraph.words {
                    let page = &doc.pages[wr.page];
                    for &ci in &page.words[wr.word].chars {
                        out.push_str(&page.chars[ci].glyph);
                        out.push('\n');
                    }
                }
            }
        }

        Ok(out.into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serialize::tests::{options, tiny_document};
    use crate::types::roles::SemanticRole;

    #[test]
    fn test_paragraph_text_with_trailing_newline() {
        let doc = tiny_document();
        let bytes = TxtSerializer::new().serialize(&doc).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "Hi\n");
    }

    #[test]
    fn test_empty_document_is_empty_output() {
        let doc = Document::default();
        let bytes = TxtSerializer::new().serialize(&doc).unwrap();
        assert!(bytes.is_empty());
    }

    #[test]
    fn test_word_unit_lists_words() {
        let doc = tiny_document();
        let bytes = TxtSerializer::with_options(options(&[ExtractionUnit::Word], &[SemanticRole::BodyText]))
            .serialize(&doc)
            .unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "Hi\n");
    }
}
