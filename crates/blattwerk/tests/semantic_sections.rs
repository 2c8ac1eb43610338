//! Section-range semantics over prepared block sequences and the full
//! pipeline.

mod helpers;

use blattwerk::semantic::{RoleLedger, SectionModule, SemanticModule};
use blattwerk::stats::{CharacterStatistic, LinePitchStatistic};
use blattwerk::types::content::Page;
use blattwerk::{Document, Pipeline, Rectangle, SemanticRole, TextBlock};
use helpers::{push_text_line, stock_registries};

fn block(role: Option<SemanticRole>, secondary: Option<SemanticRole>) -> TextBlock {
    TextBlock {
        lines: Vec::new(),
        rect: Rectangle::from_corners(100.0, 100.0, 300.0, 120.0),
        stat: CharacterStatistic::default(),
        pitch_stat: LinePitchStatistic::default(),
        text: String::new(),
        role,
        secondary_role: secondary,
    }
}

#[test]
fn test_abstract_runs_from_hinted_heading_to_next_heading() {
    // A heading, the abstract's heading, three body blocks, and a closing
    // heading without a secondary role.
    let mut doc = Document::default();
    let mut page = Page::new(1, 612.0, 792.0);
    page.blocks = vec![
        block(Some(SemanticRole::Heading), None),
        block(Some(SemanticRole::Heading), Some(SemanticRole::Abstract)),
        block(None, None),
        block(None, None),
        block(None, None),
        block(Some(SemanticRole::Heading), None),
    ];
    doc.pages.push(page);

    let module = SectionModule::new("abstract", SemanticRole::Abstract);
    let mut ledger = RoleLedger::new();
    ledger.begin_module("abstract");
    module.semanticize(&mut doc, &mut ledger).expect("module run");

    let roles: Vec<_> = doc.pages[0].blocks.iter().map(|b| b.role).collect();
    assert_eq!(
        roles,
        vec![
            Some(SemanticRole::Heading),
            Some(SemanticRole::Heading),
            Some(SemanticRole::Abstract),
            Some(SemanticRole::Abstract),
            Some(SemanticRole::Abstract),
            Some(SemanticRole::Heading),
        ]
    );
}

#[test]
fn test_every_block_between_hinted_heading_and_next_heading_is_tagged() {
    // The section-boundary property: blocks strictly between the hinted
    // heading and the next heading carry the section role; both headings
    // keep HEADING.
    let mut doc = Document::default();
    let mut p1 = Page::new(1, 612.0, 792.0);
    p1.blocks = vec![
        block(Some(SemanticRole::Heading), Some(SemanticRole::Reference)),
        block(None, None),
    ];
    let mut p2 = Page::new(2, 612.0, 792.0);
    p2.blocks = vec![block(None, None), block(Some(SemanticRole::Heading), None), block(None, None)];
    doc.pages = vec![p1, p2];

    let module = SectionModule::new("references", SemanticRole::Reference);
    let mut ledger = RoleLedger::new();
    ledger.begin_module("references");
    module.semanticize(&mut doc, &mut ledger).expect("module run");

    assert_eq!(doc.pages[0].blocks[0].role, Some(SemanticRole::Heading));
    assert_eq!(doc.pages[0].blocks[1].role, Some(SemanticRole::Reference));
    assert_eq!(doc.pages[1].blocks[0].role, Some(SemanticRole::Reference));
    assert_eq!(doc.pages[1].blocks[1].role, Some(SemanticRole::Heading));
    assert_eq!(doc.pages[1].blocks[2].role, None);
}

fn paper_document() -> Document {
    let mut builder = blattwerk::DocumentBuilder::new();
    let (font, color) = stock_registries(&mut builder);
    builder.start_page(612.0, 792.0);
    push_text_line(&mut builder, font, color, "Abstract", 100.0, 700.0, 14.0);
    push_text_line(&mut builder, font, color, "We present a layout engine.", 100.0, 686.0, 10.0);
    push_text_line(&mut builder, font, color, "It recovers reading structure.", 100.0, 674.0, 10.0);
    push_text_line(&mut builder, font, color, "References", 100.0, 640.0, 14.0);
    push_text_line(&mut builder, font, color, "[1] A. Author. A paper. 2001.", 100.0, 626.0, 10.0);
    builder.finish()
}

#[test]
fn test_full_pipeline_tags_abstract_and_references() {
    let doc = Pipeline::default().run(paper_document()).expect("pipeline run");
    let page = &doc.pages[0];
    let by_text: Vec<(&str, Option<SemanticRole>)> = page.blocks.iter().map(|b| (b.text.as_str(), b.role)).collect();

    assert!(by_text.contains(&("Abstract", Some(SemanticRole::Heading))));
    assert!(by_text.contains(&("References", Some(SemanticRole::Heading))));
    for (text, role) in &by_text {
        if text.starts_with("We present") || text.starts_with("It recovers") {
            assert_eq!(*role, Some(SemanticRole::Abstract), "block '{}'", text);
        }
        if text.starts_with("[1]") {
            assert_eq!(*role, Some(SemanticRole::Reference), "block '{}'", text);
        }
    }
}

#[test]
fn test_semanticizer_is_idempotent_on_pipeline_output() {
    let mut doc = Pipeline::default().run(paper_document()).expect("pipeline run");
    let first: Vec<_> = doc.pages[0].blocks.iter().map(|b| (b.role, b.secondary_role)).collect();

    blattwerk::semantic::semanticize(
        &mut doc,
        &blattwerk::SemanticConfig::default(),
        &blattwerk::CancelToken::new(),
        &blattwerk::NullObserver,
    )
    .expect("second semanticizer run");
    let second: Vec<_> = doc.pages[0].blocks.iter().map(|b| (b.role, b.secondary_role)).collect();
    assert_eq!(first, second);
}
