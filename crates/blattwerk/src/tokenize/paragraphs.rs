//! Block-to-paragraph assembly.
//!
//! Runs after the semanticizer, so roles are final. Consecutive blocks,
//! within a page and across page boundaries, join into one paragraph when
//! they share a primary role, or when the earlier block ends in a
//! hyphenated word that the later block continues in lowercase.

use ahash::AHashSet;

use crate::config::ParagraphConfig;
use crate::types::content::{Document, Paragraph, TextBlock, WordRef};
use crate::types::geometry::Position;
use crate::types::roles::SemanticRole;

/// Optional word list consulted before removing a hyphen.
pub type Dictionary = AHashSet<String>;

/// Populate `doc.paragraphs` from the blocks of all pages.
pub fn assemble_paragraphs(doc: &mut Document, config: &ParagraphConfig, dictionary: Option<&Dictionary>) {
    doc.paragraphs.clear();

    let mut current: Option<Paragraph> = None;
    let mut pending: Vec<Paragraph> = Vec::new();

    for (page_idx, page) in doc.pages.iter().enumerate() {
        for block in &page.blocks {
            let role = block.role.unwrap_or(SemanticRole::BodyText);
            let words = block_word_refs(page_idx, block, page);
            let position = Position {
                page: page.number,
                rect: block.rect,
            };

            match current.as_mut() {
                Some(paragraph) if joins(paragraph, role, &block.text) => {
                    paragraph.text = merge_texts(&paragraph.text, &block.text, config, dictionary);
                    paragraph.positions.push(position);
                    paragraph.words.extend(words);
                }
                _ => {
                    if let Some(done) = current.take() {
                        pending.push(done);
                    }
                    current = Some(Paragraph {
                        role,
                        positions: vec![position],
                        words,
                        text: block.text.clone(),
                    });
                }
            }
        }
    }
    if let Some(done) = current.take() {
        pending.push(done);
    }
    doc.paragraphs = pending;
}

fn block_word_refs(page_idx: usize, block: &TextBlock, page: &crate::types::content::Page) -> Vec<WordRef> {
    block
        .lines
        .iter()
        .flat_map(|&li| page.lines[li].words.iter().map(move |&wi| WordRef {
            page: page_idx,
            word: wi,
        }))
        .collect()
}

/// Continuity test: same role, or a hyphenated run-over.
fn joins(paragraph: &Paragraph, role: SemanticRole, next_text: &str) -> bool {
    paragraph.role == role || is_hyphen_continuation(&paragraph.text, next_text)
}

fn is_hyphen_continuation(text: &str, next_text: &str) -> bool {
    text.ends_with('-')
        && next_text
            .chars()
            .next()
            .map(|c| c.is_lowercase())
            .unwrap_or(false)
}

/// Join two block texts. A hyphenated run-over joins without a space; the
/// hyphen is removed when the rejoined token is a dictionary word or the
/// hyphen does not follow a digit ("B-12" keeps its hyphen, "exam-" +
/// "ple" loses it).
fn merge_texts(text: &str, next_text: &str, config: &ParagraphConfig, dictionary: Option<&Dictionary>) -> String {
    if config.dehyphenate && is_hyphen_continuation(text, next_text) {
        let stem = &text[..text.len() - 1];
        let rejoined = format!(
            "{}{}",
            stem.rsplit(char::is_whitespace).next().unwrap_or(""),
            next_text.split(char::is_whitespace).next().unwrap_or("")
        );
        let in_dictionary = dictionary
            .map(|d| d.contains(&rejoined.to_lowercase()))
            .unwrap_or(false);
        let digit_before_hyphen = stem.chars().last().map(|c| c.is_ascii_digit()).unwrap_or(false);
        if in_dictionary || !digit_before_hyphen {
            return format!("{}{}", stem, next_text);
        }
        return format!("{}{}", text, next_text);
    }
    format!("{} {}", text, next_text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{CharacterStatistic, LinePitchStatistic};
    use crate::types::content::Page;
    use crate::types::geometry::Rectangle;

    fn block(text: &str, role: SemanticRole) -> TextBlock {
        TextBlock {
            lines: Vec::new(),
            rect: Rectangle::from_corners(100.0, 100.0, 200.0, 120.0),
            stat: CharacterStatistic::default(),
            pitch_stat: LinePitchStatistic::default(),
            text: text.to_string(),
            role: Some(role),
            secondary_role: None,
        }
    }

    fn doc_with_blocks(blocks_per_page: Vec<Vec<TextBlock>>) -> Document {
        let mut doc = Document::default();
        for (i, blocks) in blocks_per_page.into_iter().enumerate() {
            let mut page = Page::new(i as u32 + 1, 612.0, 792.0);
            page.blocks = blocks;
            doc.pages.push(page);
        }
        doc
    }

    #[test]
    fn test_same_role_blocks_join() {
        let mut doc = doc_with_blocks(vec![vec![
            block("First part.", SemanticRole::BodyText),
            block("Second part.", SemanticRole::BodyText),
        ]]);
        assemble_paragraphs(&mut doc, &ParagraphConfig::default(), None);
        assert_eq!(doc.paragraphs.len(), 1);
        assert_eq!(doc.paragraphs[0].text, "First part. Second part.");
        assert_eq!(doc.paragraphs[0].positions.len(), 2);
    }

    #[test]
    fn test_role_change_starts_new_paragraph() {
        let mut doc = doc_with_blocks(vec![vec![
            block("Introduction", SemanticRole::Heading),
            block("Body follows.", SemanticRole::BodyText),
        ]]);
        assemble_paragraphs(&mut doc, &ParagraphConfig::default(), None);
        assert_eq!(doc.paragraphs.len(), 2);
        assert_eq!(doc.paragraphs[0].role, SemanticRole::Heading);
        assert_eq!(doc.paragraphs[1].role, SemanticRole::BodyText);
    }

    #[test]
    fn test_paragraph_spans_pages() {
        let mut doc = doc_with_blocks(vec![
            vec![block("Ends on page one", SemanticRole::BodyText)],
            vec![block("continues on page two.", SemanticRole::BodyText)],
        ]);
        assemble_paragraphs(&mut doc, &ParagraphConfig::default(), None);
        assert_eq!(doc.paragraphs.len(), 1);
        assert_eq!(doc.paragraphs[0].positions[0].page, 1);
        assert_eq!(doc.paragraphs[0].positions[1].page, 2);
    }

    #[test]
    fn test_dehyphenation_removes_plain_hyphen() {
        let mut doc = doc_with_blocks(vec![
            vec![block("A clever exam-", SemanticRole::BodyText)],
            vec![block("ple of wrapping.", SemanticRole::BodyText)],
        ]);
        assemble_paragraphs(&mut doc, &ParagraphConfig::default(), None);
        assert_eq!(doc.paragraphs[0].text, "A clever example of wrapping.");
    }

    #[test]
    fn test_digit_hyphen_preserved_without_dictionary() {
        let mut doc = doc_with_blocks(vec![
            vec![block("vitamin B-12-", SemanticRole::BodyText)],
            vec![block("rich diet.", SemanticRole::BodyText)],
        ]);
        assemble_paragraphs(&mut doc, &ParagraphConfig::default(), None);
        assert_eq!(doc.paragraphs[0].text, "vitamin B-12-rich diet.");
    }

    #[test]
    fn test_dictionary_wins_over_digit_rule() {
        let mut dict = Dictionary::default();
        dict.insert("b-12rich".to_string());
        // Contrived, but the dictionary is authoritative when it knows the
        // rejoined token.
        let mut doc = doc_with_blocks(vec![
            vec![block("vitamin B-12-", SemanticRole::BodyText)],
            vec![block("rich diet.", SemanticRole::BodyText)],
        ]);
        assemble_paragraphs(&mut doc, &ParagraphConfig::default(), Some(&dict));
        assert_eq!(doc.paragraphs[0].text, "vitamin B-12rich diet.");
    }

    #[test]
    fn test_hyphen_continuation_joins_across_roles() {
        let mut doc = doc_with_blocks(vec![
            vec![block("inter-", SemanticRole::BodyText)],
            vec![block("national", SemanticRole::Other)],
        ]);
        assemble_paragraphs(&mut doc, &ParagraphConfig::default(), None);
        assert_eq!(doc.paragraphs.len(), 1);
        assert_eq!(doc.paragraphs[0].text, "international");
        assert_eq!(doc.paragraphs[0].role, SemanticRole::BodyText);
    }

    #[test]
    fn test_uppercase_continuation_keeps_hyphen_and_splits() {
        let mut doc = doc_with_blocks(vec![
            vec![block("acme-", SemanticRole::BodyText)],
            vec![block("Corp announced.", SemanticRole::Caption)],
        ]);
        assemble_paragraphs(&mut doc, &ParagraphConfig::default(), None);
        assert_eq!(doc.paragraphs.len(), 2);
    }
}
