// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lazy and incremental layout.

use std::sync::Arc;

use rich_text::{Color, TextStyle};
use rich_text_dev::FixedMetrics;

use crate::util::{colors, edges, TestEnv, ADVANCE};

const BLACK: [u8; 4] = [0, 0, 0, 255];
const RED: [u8; 4] = [255, 0, 0, 255];
const BLUE: [u8; 4] = [0, 0, 255, 255];

#[test]
fn incremental_layout_runs_once() {
    let env = TestEnv::new();
    let mut text = env.text("Some text\nover two lines");
    assert_eq!(text.layout_generation(), 0);
    assert!(text.ensure_layout());
    assert!(!text.ensure_layout());
    text.geometry();
    text.local_bounds();
    assert_eq!(text.layout_generation(), 1);
}

#[test]
fn incremental_setters_are_lazy() {
    let env = TestEnv::new();
    let mut text = env.text("abc");
    text.geometry();
    text.set_fill_color(Color::from_rgba8(255, 0, 0, 255));
    text.set_letter_spacing_factor(2.0);
    assert_eq!(text.layout_generation(), 1);
    assert_eq!(colors(&text.geometry().glyphs), [RED; 3]);
    assert_eq!(text.layout_generation(), 2);
}

#[test]
fn incremental_character_limit_keeps_layout() {
    let env = TestEnv::new();
    let mut text = env.text("abc def");
    text.geometry();
    text.set_character_limit(2);
    text.visible_geometry();
    text.set_character_limit(5);
    text.visible_geometry();
    assert_eq!(text.layout_generation(), 1);
}

#[test]
fn incremental_id_color_only_relays_its_line() {
    let env = TestEnv::new();
    let markup = "First line\nSecond <id=3,c=red>colored</c> words\nThird";
    let mut text = env.text(markup);
    let before = text.geometry().clone();
    let checkpoints = text.checkpoints().to_vec();
    env.metrics.reset_counters();

    text.set_fill_color_for(3, Color::from_rgba8(0, 0, 255, 255));
    let geometry = text.geometry();
    assert_eq!(
        &geometry.glyphs.quads()[..9],
        &before.glyphs.quads()[..9],
        "lines before the touched one must not change"
    );
    let mut expected = vec![BLACK; 15];
    expected.extend([BLUE; 7]);
    expected.extend([BLACK; 10]);
    assert_eq!(colors(&geometry.glyphs), expected);
    assert_eq!(text.checkpoints(), &checkpoints[..]);
    assert_eq!(text.layout_generation(), 2);
    let partial_lookups = env.metrics.glyph_lookups();

    env.metrics.reset_counters();
    let mut fresh = env.text("First line\nSecond <id=3,c=blue>colored</c> words\nThird");
    assert_eq!(text.geometry(), fresh.geometry());
    assert!(
        partial_lookups < env.metrics.glyph_lookups(),
        "the first line must not be laid out again"
    );
}

#[test]
fn incremental_id_line_spacing_moves_later_lines() {
    let env = TestEnv::new();
    let mut text = env.text("a\n<id=1,lns=1>b\nc");
    text.geometry();
    text.set_line_spacing_factor_for(1, 2.0);
    text.geometry();
    let baselines: Vec<f32> = text.checkpoints().iter().map(|c| c.pen_y).collect();
    assert_eq!(baselines, [24.0, 48.0, 96.0]);
    let mut fresh = env.text("a\n<id=1,lns=2>b\nc");
    assert_eq!(text.geometry(), fresh.geometry());
}

#[test]
fn incremental_unknown_ids_are_ignored() {
    let env = TestEnv::new();
    let mut text = env.text("ab<id=1,c=red>cd");
    text.geometry();
    text.set_fill_color_for(2, Color::from_rgba8(0, 0, 255, 255));
    text.set_outline_thickness_for(1, 2.0);
    assert!(!text.ensure_layout());
    assert_eq!(text.layout_generation(), 1);
}

#[test]
fn incremental_events_past_the_end_never_relayout() {
    let env = TestEnv::new();
    let mut text = env.text("ab<id=5,c=red>");
    text.geometry();
    text.set_fill_color_for(5, Color::from_rgba8(0, 0, 255, 255));
    assert!(!text.ensure_layout());
    assert_eq!(text.layout_generation(), 1);
}

#[test]
fn incremental_placeholders_toggle() {
    let env = TestEnv::new();
    let mut text = env.text("ab<id=1,!c=red>cd</c>");
    assert_eq!(colors(&text.geometry().glyphs), [BLACK; 4]);
    text.set_fill_color_activated(1, true);
    assert_eq!(colors(&text.geometry().glyphs), [BLACK, BLACK, RED, RED]);
    text.set_fill_color_activated(1, false);
    assert_eq!(colors(&text.geometry().glyphs), [BLACK; 4]);

    // Setting a value switches the starter on.
    text.set_fill_color_for(1, Color::from_rgba8(0, 0, 255, 255));
    assert_eq!(colors(&text.geometry().glyphs), [BLACK, BLACK, BLUE, BLUE]);
}

#[test]
fn incremental_id_styles() {
    let env = TestEnv::new();
    let mut text = env.text("<id=2,b=0>ab</b>cd");
    let widths = |text: &mut rich_text::RichText| -> Vec<f32> {
        edges(&text.geometry().glyphs)
            .iter()
            .map(|[left, _, right, _]| right - left)
            .collect()
    };
    assert_eq!(widths(&mut text), [ADVANCE; 4]);

    text.set_style_for(2, TextStyle::BOLD);
    assert_eq!(widths(&mut text), [ADVANCE + 1.0, ADVANCE + 1.0, ADVANCE, ADVANCE]);
    let generation = text.layout_generation();

    // No italic starter carries the id.
    text.set_style_activated(2, TextStyle::ITALIC, false);
    assert!(!text.ensure_layout());
    assert_eq!(text.layout_generation(), generation);

    text.set_style_activated(2, TextStyle::BOLD, false);
    assert_eq!(widths(&mut text), [ADVANCE; 4]);
}

#[test]
fn incremental_id_outline_thickness() {
    let env = TestEnv::new();
    let mut text = env.text("<id=7,ot=1>ab</ot>cd");
    assert_eq!(text.geometry().glyph_outlines.len(), 2);
    text.set_outline_thickness_for(7, 0.0);
    assert!(text.geometry().glyph_outlines.is_empty());
    text.set_outline_thickness_for(7, 3.0);
    assert_eq!(text.geometry().glyph_outlines.len(), 2);
    text.set_outline_thickness_activated(7, false);
    assert!(text.geometry().glyph_outlines.is_empty());
}

#[test]
fn incremental_append_matches_full_parse() {
    let env = TestEnv::new();
    let mut text = env.text("<u>ab");
    text.geometry();
    text.append_string("cd</u>ef");
    assert_eq!(text.parsed_string(), "abcdef");
    let mut fresh = env.text("<u>abcd</u>ef");
    assert_eq!(text.geometry(), fresh.geometry());
    assert_eq!(text.layout_generation(), 2);
}

#[test]
fn incremental_append_only_relays_last_line() {
    let env = TestEnv::new();
    let mut text = env.text("one\ntwo");
    text.geometry();
    env.metrics.reset_counters();
    text.append_string(" more\nthree");
    text.geometry();
    let appended_lookups = env.metrics.glyph_lookups();

    env.metrics.reset_counters();
    let mut fresh = env.text("one\ntwo more\nthree");
    assert_eq!(text.geometry(), fresh.geometry());
    assert_eq!(text.checkpoints(), fresh.checkpoints());
    assert!(appended_lookups < env.metrics.glyph_lookups());
}

#[test]
fn incremental_font_swap() {
    let env = TestEnv::new();
    let mut text = env.text("ab");
    text.geometry();
    let other = Arc::new(FixedMetrics::new());
    text.set_font(Some(other.clone()));
    text.geometry();
    assert!(other.glyph_lookups() > 0);
    assert_eq!(text.layout_generation(), 2);

    text.set_font(None);
    assert!(!text.ensure_layout());
    assert!(text.draw_data().is_none());
    assert_eq!(text.layout_generation(), 2);
}

#[test]
fn incremental_resume_from_wrapped_line_matches_full_layout() {
    let env = TestEnv::new();
    let markup = "aaa <u> bbbb</u> <id=1,c=red>c</c>";
    let mut text = env.wrapped(markup, 60.0);
    let full = text.geometry().clone();
    assert_eq!(edges(&full.decorations), [[0.0, 50.0, 40.0, 51.0]]);
    // The second line starts where the word wrapped, not at a line break.
    assert_eq!(text.checkpoints()[1].offset, 5);

    text.set_fill_color_for(1, Color::from_rgba8(0, 0, 255, 255));
    let mut fresh = env.wrapped("aaa <u> bbbb</u> <id=1,c=blue>c</c>", 60.0);
    assert_eq!(text.geometry(), fresh.geometry());

    text.set_fill_color_for(1, Color::from_rgba8(255, 0, 0, 255));
    assert_eq!(text.geometry(), &full);
    assert_eq!(text.layout_generation(), 3);
}
