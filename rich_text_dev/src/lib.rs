// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! # Rich Text Dev
//!
//! This crate provides utilities for developing Rich Text: a glyph provider with simple,
//! predictable metrics and a few markup samples.

use std::sync::atomic::{AtomicUsize, Ordering};

use rich_text::{Glyph, GlyphProvider, GlyphRect, TextureHandle};

/// A glyph provider where every character has the same metrics.
///
/// At size `s`, characters advance by `s / 2` (one more when bold) and their bounds span the
/// advance minus one unit on each side, from `0.75 * s` above the baseline down to it. The only
/// kerned pairs are `AV` and `VA`, tightened by one unit.
///
/// Glyph lookups are counted, which lets tests check how much of a text was laid out again.
#[derive(Debug, Default)]
pub struct FixedMetrics {
    glyph_lookups: AtomicUsize,
}

impl FixedMetrics {
    /// Creates the provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of [`glyph`](GlyphProvider::glyph) calls since creation or the last reset.
    pub fn glyph_lookups(&self) -> usize {
        self.glyph_lookups.load(Ordering::Relaxed)
    }

    /// Resets the lookup counter.
    pub fn reset_counters(&self) {
        self.glyph_lookups.store(0, Ordering::Relaxed);
    }

    /// Advance of every regular weight character at `size`.
    pub fn advance(size: u32) -> f32 {
        size as f32 / 2.0
    }
}

impl GlyphProvider for FixedMetrics {
    fn glyph(&self, code: char, size: u32, bold: bool, outline_thickness: f32) -> Glyph {
        self.glyph_lookups.fetch_add(1, Ordering::Relaxed);
        let s = size as f32;
        let advance = Self::advance(size) + if bold { 1.0 } else { 0.0 };
        let ot = outline_thickness;
        let bounds = GlyphRect::new(
            1.0 - ot,
            -0.75 * s - ot,
            advance - 2.0 + 2.0 * ot,
            0.75 * s + 2.0 * ot,
        );
        // One atlas cell per character of the first plane, bold glyphs on a second sheet.
        let cell = u32::from(code) % 256;
        let sheet = if bold { 16.0 * s } else { 0.0 };
        let atlas_rect = GlyphRect::new(
            (cell % 16) as f32 * s,
            (cell / 16) as f32 * s + sheet,
            bounds.width,
            bounds.height,
        );
        Glyph {
            advance,
            bounds,
            atlas_rect,
        }
    }

    fn kerning(&self, previous: char, code: char, _size: u32) -> f32 {
        match (previous, code) {
            ('A', 'V') | ('V', 'A') => -1.0,
            _ => 0.0,
        }
    }

    fn line_spacing(&self, size: u32) -> f32 {
        size as f32 * 1.2
    }

    fn underline_position(&self, size: u32) -> f32 {
        size as f32 * 0.1
    }

    fn underline_thickness(&self, size: u32) -> f32 {
        (size as f32 / 20.0).max(1.0)
    }

    fn texture(&self, size: u32) -> TextureHandle {
        TextureHandle(u64::from(size))
    }
}

/// A sample to be used for development.
#[derive(Debug)]
pub struct Sample {
    /// The name of the sample.
    pub name: &'static str,
    /// The markup of the sample.
    pub markup: &'static str,
}

/// Markup samples exercising the different tags.
pub const SAMPLES: &[Sample] = &[
    Sample {
        name: "nested_colors",
        markup: "<c=#FF0000>Red<c=#00FF00>Green</c>Red2</c>Default",
    },
    Sample {
        name: "decorations",
        markup: "Some <u>underlined</u> and <s>struck through</s> words.",
    },
    Sample {
        name: "outlines",
        markup: "<ot=2,oc=black,c=white>Outlined <u>and underlined</u></ot,/oc,/c> text",
    },
    Sample {
        name: "modifiable",
        markup: "Keep <id=1,c=red>this</c> and <id=2,!b>that</b> in mind.\nSecond <id=1,u>line</u>.",
    },
    Sample {
        name: "paragraphs",
        markup: "Lorem ipsum dolor sit amet, consectetur adipiscing elit.\n\tInteger cursus \
                 interdum dui, in gravida ligula aliquam in.\nVivamus vitae metus pharetra.",
    },
];
