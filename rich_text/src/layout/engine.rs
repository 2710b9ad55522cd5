// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The layout pass.
//!
//! Glyphs and decorations of the word being scanned are built in a separate [`Word`] buffer and
//! only committed when a whitespace or line break ends the word. When a glyph pushes the pen past
//! the horizontal limit, the word (and whatever decoration is still open) is moved to the start
//! of the next line after the fact.

use peniko::Color;

use crate::context::LayoutContext;
use crate::geometry::Quad;
use crate::metrics::GlyphProvider;
use crate::resolve::VariableStyle;
use crate::style::{EventStore, Property};
use crate::util::snap;

use super::word::{glyph_quad, line_quad};
use super::{Checkpoint, Layout, StreamCounts, Word};

/// Shear applied to italic glyphs.
const ITALIC_SHEAR: f32 = 0.209;

/// Inputs of a layout pass that don't change while it runs.
#[derive(Copy, Clone)]
pub(crate) struct LayoutParams<'a> {
    pub(crate) font: &'a dyn GlyphProvider,
    pub(crate) size: u32,
    pub(crate) horizontal_limit: f32,
}

impl core::fmt::Debug for LayoutParams<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LayoutParams")
            .field("size", &self.size)
            .field("horizontal_limit", &self.horizontal_limit)
            .finish_non_exhaustive()
    }
}

/// Re-lays out `text` from the start of `start_line`, replacing the geometry of that line and
/// every line after it.
///
/// Returns `false` without doing anything if there is no checkpoint for `start_line`.
pub(crate) fn layout_from(
    params: &LayoutParams<'_>,
    text: &str,
    events: &mut EventStore,
    lcx: &mut LayoutContext,
    layout: &mut Layout,
    start_line: usize,
) -> bool {
    let Some((start, counts)) = layout.rewind(start_line) else {
        return false;
    };
    log::debug!(
        "layout from line {start_line} (character {}), keeping {} glyphs",
        start.offset,
        counts.glyphs
    );

    let LayoutContext { style, word } = lcx;
    style.rewind();
    word.clear();

    // Bring the style up to date with every event before the line.
    let mut cursor = 0;
    while let Some(event) = events.events().get(cursor).copied() {
        if event.offset > start.offset {
            break;
        }
        style.apply(&event);
        events.lower_seen(cursor, start_line);
        cursor += 1;
    }

    let mut pass = Pass::new(params, style, word, layout, &start);
    let mut previous = text
        .get(..start.byte_offset)
        .and_then(|before| before.chars().next_back());
    let rest = text.get(start.byte_offset..).unwrap_or_default();
    for (byte, c) in rest.char_indices() {
        pass.byte = start.byte_offset + byte;
        if events
            .events()
            .get(cursor)
            .is_some_and(|event| event.offset == pass.offset)
        {
            cursor = pass.apply_events(events, cursor);
        }
        match c {
            ' ' => pass.whitespace(pass.whitespace_width),
            '\t' => {
                let column = pass.whitespace_width * 8.0;
                let added = if column > 0.0 {
                    column - (pass.pen_x + column) % column
                } else {
                    0.0
                };
                pass.whitespace(added);
            }
            '\n' => pass.line_break(),
            c => pass.glyph(previous, c),
        }
        previous = Some(c);
        pass.offset += 1;
    }
    pass.finish(counts);
    true
}

/// Where the segment of each open decoration started.
#[derive(Copy, Clone, Debug, Default)]
struct OpenSegments {
    underline: f32,
    underline_outline: f32,
    strike_through: f32,
    strike_through_outline: f32,
}

impl OpenSegments {
    fn at(x: f32) -> Self {
        Self {
            underline: x,
            underline_outline: x,
            strike_through: x,
            strike_through_outline: x,
        }
    }

    fn start_mut(&mut self, decoration: Decoration, outline: bool) -> &mut f32 {
        match (decoration, outline) {
            (Decoration::Underline, false) => &mut self.underline,
            (Decoration::Underline, true) => &mut self.underline_outline,
            (Decoration::StrikeThrough, false) => &mut self.strike_through,
            (Decoration::StrikeThrough, true) => &mut self.strike_through_outline,
        }
    }

    fn translate(&mut self, dx: f32) {
        self.underline += dx;
        self.underline_outline += dx;
        self.strike_through += dx;
        self.strike_through_outline += dx;
    }
}

#[derive(Copy, Clone, Debug)]
enum Decoration {
    Underline,
    StrikeThrough,
}

/// State captured when the current word started.
#[derive(Copy, Clone, Debug)]
struct WordStart {
    line_spacing: f32,
    outline_thickness: f32,
    /// Width of the whitespace between the last committed word and this one.
    whitespace_width: f32,
    /// Number of whitespace characters from `offset` up to the word.
    whitespaces: usize,
    offset: usize,
    byte_offset: usize,
}

struct Pass<'a> {
    font: &'a dyn GlyphProvider,
    size: u32,
    horizontal_limit: f32,
    style: &'a mut VariableStyle,
    word: &'a mut Word,
    out: &'a mut Layout,

    offset: usize,
    byte: usize,
    line: usize,
    pen_x: f32,
    pen_y: f32,
    /// Pen position after the last committed word, zero on a fresh line.
    line_width: f32,
    /// Set until the first word of a line started by a line break is committed. Whitespace
    /// before that word is part of the line rather than of the gap before the word.
    intentional_break: bool,
    segments: OpenSegments,
    word_start: WordStart,

    whitespace_width: f32,
    letter_spacing: f32,
    line_spacing: f32,
    shear: f32,
    has_outline: bool,
    thickness: f32,
    underline_offset: f32,
    strike_through_offset: f32,
}

impl<'a> Pass<'a> {
    fn new(
        params: &LayoutParams<'a>,
        style: &'a mut VariableStyle,
        word: &'a mut Word,
        out: &'a mut Layout,
        start: &Checkpoint,
    ) -> Self {
        let font = params.font;
        let size = params.size;
        let x_bounds = font.glyph('x', size, false, 0.0).bounds;
        let mut pass = Self {
            font,
            size,
            horizontal_limit: params.horizontal_limit,
            style,
            word,
            out,
            offset: start.offset,
            byte: start.byte_offset,
            line: start.line,
            pen_x: 0.0,
            pen_y: start.pen_y,
            line_width: 0.0,
            intentional_break: true,
            segments: OpenSegments::default(),
            word_start: WordStart {
                line_spacing: 0.0,
                outline_thickness: 0.0,
                whitespace_width: 0.0,
                whitespaces: 0,
                offset: start.offset,
                byte_offset: start.byte_offset,
            },
            whitespace_width: 0.0,
            letter_spacing: 0.0,
            line_spacing: 0.0,
            shear: 0.0,
            has_outline: false,
            thickness: font.underline_thickness(size),
            underline_offset: font.underline_position(size),
            strike_through_offset: x_bounds.top + x_bounds.height * 0.4,
        };
        pass.refresh_letter_spacing();
        pass.refresh_line_spacing();
        pass.refresh_shear();
        pass.refresh_outline();
        pass.word_start.line_spacing = pass.line_spacing;
        pass.word_start.outline_thickness = pass.style.outline_thickness.top();
        pass
    }

    fn refresh_letter_spacing(&mut self) {
        let space = self.font.glyph(' ', self.size, false, 0.0).advance;
        self.letter_spacing = (space / 3.0) * (self.style.letter_spacing.top() - 1.0);
        self.whitespace_width = space + self.letter_spacing;
    }

    fn refresh_line_spacing(&mut self) {
        self.line_spacing = self.font.line_spacing(self.size) * self.style.line_spacing.top();
    }

    fn refresh_shear(&mut self) {
        self.shear = if self.style.italic.top() {
            ITALIC_SHEAR
        } else {
            0.0
        };
    }

    fn refresh_outline(&mut self) {
        self.has_outline = self.style.outline_thickness.top() != 0.0;
    }

    fn decorated(&self, decoration: Decoration) -> bool {
        match decoration {
            Decoration::Underline => self.style.underlined.top(),
            Decoration::StrikeThrough => self.style.strike_through.top(),
        }
    }

    /// Applies every event anchored at the current offset, closing and reopening the decoration
    /// segments whose appearance changed.
    fn apply_events(&mut self, events: &mut EventStore, mut cursor: usize) -> usize {
        let was_underlined = self.style.underlined.top();
        let was_struck = self.style.strike_through.top();
        let had_outline = self.has_outline;
        let old_fill = self.style.fill_color.top();
        let old_outline_thickness = self.style.outline_thickness.top();
        let old_outline_color = self.style.outline_color.top();

        let mut underline = false;
        let mut strike_through = false;
        let mut underline_outline = false;
        let mut strike_through_outline = false;

        while let Some(event) = events.events().get(cursor).copied() {
            if event.offset != self.offset {
                break;
            }
            events.set_seen(cursor, self.line);
            match self.style.apply(&event) {
                Some(Property::Italic) => self.refresh_shear(),
                Some(Property::Underlined) => {
                    underline = true;
                    underline_outline = true;
                }
                Some(Property::StrikeThrough) => {
                    strike_through = true;
                    strike_through_outline = true;
                }
                Some(Property::FillColor) => {
                    underline = true;
                    strike_through = true;
                }
                Some(Property::OutlineThickness) => {
                    underline_outline = true;
                    strike_through_outline = true;
                    self.refresh_outline();
                }
                Some(Property::OutlineColor) => {
                    underline_outline = true;
                    strike_through_outline = true;
                }
                Some(Property::LetterSpacing) => self.refresh_letter_spacing(),
                Some(Property::LineSpacing) => self.refresh_line_spacing(),
                Some(Property::Bold) | None => {}
            }
            cursor += 1;
        }

        let x = self.pen_x;
        for (decoration, was_on, fill_changed, outline_changed) in [
            (Decoration::Underline, was_underlined, underline, underline_outline),
            (Decoration::StrikeThrough, was_struck, strike_through, strike_through_outline),
        ] {
            let is_on = self.decorated(decoration);
            if fill_changed {
                if was_on {
                    let start = *self.segments.start_mut(decoration, false);
                    self.close_into_word(decoration, start, x, old_fill, None);
                }
                if is_on {
                    *self.segments.start_mut(decoration, false) = x;
                }
            }
            if outline_changed {
                if had_outline && was_on {
                    let start = *self.segments.start_mut(decoration, true);
                    let thickness = Some(old_outline_thickness);
                    self.close_into_word(decoration, start, x, old_outline_color, thickness);
                }
                if self.has_outline && is_on {
                    *self.segments.start_mut(decoration, true) = x;
                }
            }
        }
        cursor
    }

    fn whitespace(&mut self, width: f32) {
        if self.word.has_glyphs() {
            self.commit_word();
            self.intentional_break = false;
        }
        self.pen_x += width;
        // Leading whitespace leaves the line width at zero, so it never lets the first word wrap.
        if !self.intentional_break {
            self.word_start.whitespace_width += width;
        }
        self.word_start.whitespaces += 1;
    }

    fn line_break(&mut self) {
        self.commit_word();
        self.close_open_segments(self.pen_x, 0.0);

        self.pen_x = 0.0;
        self.pen_y += self.line_spacing;
        self.segments = OpenSegments::at(0.0);
        self.line_width = 0.0;
        self.line += 1;
        self.word_start.whitespaces += 1;
        self.record_checkpoint();
        self.intentional_break = true;
    }

    fn glyph(&mut self, previous: Option<char>, c: char) {
        if let Some(previous) = previous {
            self.pen_x += self.font.kerning(previous, c, self.size);
        }
        let bold = self.style.bold.top();
        let glyph = self.font.glyph(c, self.size, bold, 0.0);
        let fill = self.style.fill_color.top();
        self.word.glyphs.push(glyph_quad(
            self.pen_x, self.pen_y, &glyph, fill, self.shear, 0.0,
        ));
        if self.has_outline {
            let thickness = self.style.outline_thickness.top();
            let outline = self.font.glyph(c, self.size, bold, thickness);
            let color = self.style.outline_color.top();
            self.word.glyph_outlines.push(glyph_quad(
                self.pen_x, self.pen_y, &outline, color, self.shear, thickness,
            ));
            let owner = self.out.geometry.glyphs.len() + self.word.glyphs.len() - 1;
            self.word.outline_owners.push(owner);
        }
        self.pen_x += glyph.advance + self.letter_spacing;

        if self.line_width != 0.0 && self.pen_x > self.horizontal_limit {
            self.wrap();
        }
    }

    /// Moves the current word to the start of the next line.
    fn wrap(&mut self) {
        let line_width = self.line_width;
        let extended = line_width + self.word_start.whitespace_width;
        let outline = self.word_start.outline_thickness;
        let (dx, dy) = (-extended, self.word_start.line_spacing);

        // Decorations still open since before the word end on this line.
        self.close_open_segments(line_width, extended);

        // Closed decorations of the word that began before it are cut in two at the line end.
        // Whatever lies in the gap is dropped, so nothing reaches left of the new line.
        let (out, line) = (&mut *self.out, self.line);
        self.word.decorations.retain_mut(|quad| {
            let left = quad.upper_left()[0];
            if left < line_width {
                let mut kept = *quad;
                kept.set_right(snap(line_width));
                out.push_decoration(kept, line);
            }
            if quad.lower_right()[0] <= extended {
                return false;
            }
            if left < extended {
                quad.set_left(extended);
            }
            true
        });
        self.word.decoration_outlines.retain_mut(|quad| {
            let start = quad.upper_left()[0] + outline;
            if start < line_width {
                let mut kept = *quad;
                kept.set_right(snap(line_width + outline));
                out.push_decoration_outline(kept, line);
            }
            if quad.lower_right()[0] - outline <= extended {
                return false;
            }
            if start < extended {
                quad.set_left(extended - outline);
            }
            true
        });

        self.word.translate(dx, dy);
        self.pen_x += dx;
        self.pen_y += dy;
        self.segments.translate(dx);
        self.line_width = 0.0;
        self.line += 1;
        log::trace!(
            "wrapped word at character {} onto line {} (moved by {dx}, {dy})",
            self.word_start.offset + self.word_start.whitespaces,
            self.line
        );
        self.record_checkpoint();
    }

    /// Ends the pass: closes open decorations, commits the last word and snaps everything that
    /// was built to whole units.
    fn finish(mut self, first: StreamCounts) {
        let trailing = if self.word.has_glyphs() {
            0.0
        } else {
            self.word_start.whitespace_width
        };
        let end = self.pen_x - trailing;
        let fill = self.style.fill_color.top();
        let outline_color = self.style.outline_color.top();
        let thickness = self.style.outline_thickness.top();
        for decoration in [Decoration::Underline, Decoration::StrikeThrough] {
            if !self.decorated(decoration) {
                continue;
            }
            let start = *self.segments.start_mut(decoration, false);
            self.close_into_word(decoration, start, end, fill, None);
            if self.has_outline {
                let start = *self.segments.start_mut(decoration, true);
                self.close_into_word(decoration, start, end, outline_color, Some(thickness));
            }
        }
        self.out.commit(self.word, self.line);

        let geometry = &mut self.out.geometry;
        geometry.glyphs.snap_from(first.glyphs);
        geometry.glyph_outlines.snap_from(first.glyph_outlines);
        geometry.decorations.snap_from(first.decorations);
        geometry
            .decoration_outlines
            .snap_from(first.decoration_outlines);
        self.style.rewind();
    }

    fn commit_word(&mut self) {
        self.out.commit(self.word, self.line);
        self.line_width = self.pen_x;
        self.word_start = WordStart {
            line_spacing: self.line_spacing,
            outline_thickness: self.style.outline_thickness.top(),
            whitespace_width: 0.0,
            whitespaces: 0,
            offset: self.offset,
            byte_offset: self.byte,
        };
    }

    /// Closes the open decorations that started before `end` straight into the committed
    /// geometry and restarts them at `restart`.
    ///
    /// Decorations opened between `end` and `restart` move up to `restart` too.
    fn close_open_segments(&mut self, end: f32, restart: f32) {
        let fill = self.style.fill_color.top();
        let outline_color = self.style.outline_color.top();
        let thickness = self.style.outline_thickness.top();
        for decoration in [Decoration::Underline, Decoration::StrikeThrough] {
            if !self.decorated(decoration) {
                continue;
            }
            let start = *self.segments.start_mut(decoration, false);
            if start < end {
                let quad = self.line_segment(decoration, start, end, fill, 0.0);
                self.out.push_decoration(quad, self.line);
            }
            let start = *self.segments.start_mut(decoration, true);
            if self.has_outline && start < end {
                let quad = self.line_segment(decoration, start, end, outline_color, thickness);
                self.out.push_decoration_outline(quad, self.line);
            }
            for outline in [false, true] {
                let start = self.segments.start_mut(decoration, outline);
                if *start < end || *start < restart {
                    *start = restart;
                }
            }
        }
    }

    /// Closes a segment into the word buffer, as an outline when `outline` holds its thickness.
    ///
    /// Empty segments produce nothing.
    fn close_into_word(
        &mut self,
        decoration: Decoration,
        start: f32,
        end: f32,
        color: Color,
        outline: Option<f32>,
    ) {
        if start >= end {
            return;
        }
        match outline {
            Some(thickness) => {
                let quad = self.line_segment(decoration, start, end, color, thickness);
                self.word.decoration_outlines.push(quad);
            }
            None => {
                let quad = self.line_segment(decoration, start, end, color, 0.0);
                self.word.decorations.push(quad);
            }
        }
    }

    fn line_segment(
        &self,
        decoration: Decoration,
        start: f32,
        end: f32,
        color: Color,
        outline: f32,
    ) -> Quad {
        let y = self.pen_y
            + match decoration {
                Decoration::Underline => self.underline_offset,
                Decoration::StrikeThrough => self.strike_through_offset,
            };
        line_quad(start, y, end - start, color, self.thickness, outline)
    }

    fn record_checkpoint(&mut self) {
        let checkpoint = Checkpoint {
            line: self.line,
            offset: self.word_start.offset + self.word_start.whitespaces,
            // Every character counted in `whitespaces` is a single byte.
            byte_offset: self.word_start.byte_offset + self.word_start.whitespaces,
            pen_y: self.pen_y,
            glyph_count: self.out.geometry.glyphs.len(),
        };
        log::trace!(
            "checkpoint for line {} at character {}",
            checkpoint.line,
            checkpoint.offset
        );
        let counts = self.out.counts();
        self.out.checkpoints.record(checkpoint, counts);
    }
}
