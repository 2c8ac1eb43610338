//! End-to-end block tokenization scenarios, driven from raw characters
//! through the full pipeline.

mod helpers;

use blattwerk::{Document, Pipeline};
use helpers::{push_text_line, stock_registries};

fn run(build: impl FnOnce(&mut blattwerk::DocumentBuilder)) -> Document {
    let mut builder = blattwerk::DocumentBuilder::new();
    build(&mut builder);
    Pipeline::default().run(builder.finish()).expect("pipeline run")
}

#[test]
fn test_oversized_pitch_opens_a_new_block() {
    let doc = run(|builder| {
        let (font, color) = stock_registries(builder);
        builder.start_page(612.0, 792.0);
        // Four lines at the regular 12pt pitch establish the expectation,
        // then a 50pt drop to the last line.
        push_text_line(builder, font, color, "line one of the paragraph", 100.0, 700.0, 10.0);
        push_text_line(builder, font, color, "line two of the paragraph", 100.0, 688.0, 10.0);
        push_text_line(builder, font, color, "line three of the paragraph", 100.0, 676.0, 10.0);
        push_text_line(builder, font, color, "line four of the paragraph", 100.0, 664.0, 10.0);
        push_text_line(builder, font, color, "a distant afterthought", 100.0, 614.0, 10.0);
    });

    let page = &doc.pages[0];
    assert_eq!(page.lines.len(), 5);
    assert_eq!(page.blocks.len(), 2);
    assert_eq!(page.blocks[1].text, "a distant afterthought");
}

#[test]
fn test_indented_line_between_flush_neighbors_opens_a_block() {
    let doc = run(|builder| {
        let (font, color) = stock_registries(builder);
        builder.start_page(612.0, 792.0);
        push_text_line(builder, font, color, "closing line of one paragraph", 100.0, 700.0, 10.0);
        push_text_line(builder, font, color, "an indented opening line", 110.0, 688.0, 10.0);
        push_text_line(builder, font, color, "continuing at the left margin", 100.0, 676.0, 10.0);
    });

    let page = &doc.pages[0];
    assert_eq!(page.blocks.len(), 2);
    assert_eq!(page.blocks[0].text, "closing line of one paragraph");
    assert_eq!(
        page.blocks[1].text,
        "an indented opening line continuing at the left margin"
    );
}

#[test]
fn test_reference_entries_split_but_continuation_joins() {
    let doc = run(|builder| {
        let (font, color) = stock_registries(builder);
        builder.start_page(612.0, 792.0);
        push_text_line(builder, font, color, "[1] Foo", 100.0, 700.0, 10.0);
        push_text_line(builder, font, color, "[2] Bar", 100.0, 688.0, 10.0);
        push_text_line(builder, font, color, "continuation", 100.0, 676.0, 10.0);
    });

    let page = &doc.pages[0];
    assert_eq!(page.blocks.len(), 2);
    assert_eq!(page.blocks[0].text, "[1] Foo");
    assert_eq!(page.blocks[1].text, "[2] Bar continuation");
}

#[test]
fn test_reading_order_is_preserved_through_blocks() {
    let doc = run(|builder| {
        let (font, color) = stock_registries(builder);
        builder.start_page(612.0, 792.0);
        push_text_line(builder, font, color, "alpha", 100.0, 700.0, 10.0);
        push_text_line(builder, font, color, "beta", 100.0, 688.0, 10.0);
        push_text_line(builder, font, color, "gamma", 100.0, 640.0, 10.0);
        push_text_line(builder, font, color, "delta", 100.0, 628.0, 10.0);
    });

    let page = &doc.pages[0];
    let from_blocks: Vec<&str> = page.blocks.iter().map(|b| b.text.as_str()).collect();
    let from_lines: Vec<&str> = page.lines.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(from_blocks.join(" "), from_lines.join(" "));
}

#[test]
fn test_block_rectangles_close_over_their_lines() {
    let doc = run(|builder| {
        let (font, color) = stock_registries(builder);
        builder.start_page(612.0, 792.0);
        push_text_line(builder, font, color, "short", 100.0, 700.0, 10.0);
        push_text_line(builder, font, color, "a noticeably longer line", 100.0, 688.0, 10.0);
    });

    let page = &doc.pages[0];
    for block in &page.blocks {
        let mut union: Option<blattwerk::Rectangle> = None;
        for line in page.block_lines(block) {
            assert!(block.rect.contains(&line.rect));
            union = Some(union.map(|u| u.union(&line.rect)).unwrap_or(line.rect));
        }
        assert_eq!(Some(block.rect), union);
    }
}

#[test]
fn test_monotone_baselines_in_reading_order() {
    let doc = run(|builder| {
        let (font, color) = stock_registries(builder);
        builder.start_page(612.0, 792.0);
        // Pushed out of visual order; the tokenizer must sort them.
        push_text_line(builder, font, color, "second", 100.0, 688.0, 10.0);
        push_text_line(builder, font, color, "first", 100.0, 700.0, 10.0);
        push_text_line(builder, font, color, "third", 100.0, 676.0, 10.0);
    });

    let baselines: Vec<f64> = doc.pages[0].lines.iter().filter_map(|l| l.baseline.map(|b| b.y)).collect();
    let mut sorted = baselines.clone();
    sorted.sort_by(|a, b| b.partial_cmp(a).expect("finite baselines"));
    assert_eq!(baselines, sorted);
}
