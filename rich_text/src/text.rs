// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The rich text object.

use alloc::sync::Arc;

use peniko::kurbo::{Affine, Rect};
use peniko::Color;

use crate::context::LayoutContext;
use crate::error::Error;
use crate::geometry::{Geometry, Vertex};
use crate::layout::{build_partial, layout_from, Checkpoint, Layout, LayoutParams};
use crate::markup::Document;
use crate::metrics::{GlyphProvider, TextureHandle};
use crate::style::{Property, StyleEvent, StyleValue, TextStyle};

/// Default character size.
const DEFAULT_SIZE: u32 = 20;

/// Markup text laid out into geometry.
///
/// Setters never lay out by themselves. They record the first line they invalidate, and the
/// next query that needs geometry resumes layout from that line.
pub struct RichText {
    font: Option<Arc<dyn GlyphProvider>>,
    size: u32,
    document: Document,
    lcx: LayoutContext,
    layout: Layout,
    horizontal_limit: f32,
    character_limit: usize,
    transform: Affine,
    /// First line whose geometry is out of date.
    dirty_from: Option<usize>,
    /// Number of layout passes run so far.
    generation: u64,
    partial: Geometry,
    /// Character limit and generation `partial` was built for.
    partial_key: Option<(usize, u64)>,
}

/// What a renderer needs to draw a [`RichText`].
#[derive(Copy, Clone, Debug)]
pub struct DrawData<'a> {
    /// Atlas texture of the current character size.
    pub texture: TextureHandle,
    /// Placement of the text.
    pub transform: Affine,
    /// Vertex lists to draw in order: glyph outlines, decoration outlines, glyphs and
    /// decorations.
    pub layers: [&'a [Vertex]; 4],
}

impl Default for RichText {
    fn default() -> Self {
        Self {
            font: None,
            size: DEFAULT_SIZE,
            document: Document::default(),
            lcx: LayoutContext::default(),
            layout: Layout::default(),
            horizontal_limit: f32::INFINITY,
            character_limit: usize::MAX,
            transform: Affine::IDENTITY,
            dirty_from: Some(0),
            generation: 0,
            partial: Geometry::default(),
            partial_key: None,
        }
    }
}

impl RichText {
    /// Creates an empty text without a font.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a text from `markup`, laid out with `font` at `size`.
    pub fn with_font(font: Arc<dyn GlyphProvider>, markup: &str, size: u32) -> Self {
        let mut text = Self {
            font: Some(font),
            size,
            ..Self::default()
        };
        text.parse_string(markup);
        text
    }

    /// Replaces the text and its styles with those parsed from `markup`.
    pub fn parse_string(&mut self, markup: &str) {
        self.document.clear();
        self.document.parse(markup);
        self.mark_dirty(0);
    }

    /// Parses `markup` and appends it to the current text.
    ///
    /// Styles still open at the end of the current text carry over. Only the last line is laid
    /// out again.
    pub fn append_string(&mut self, markup: &str) {
        self.document.parse(markup);
        let last_line = self.layout.checkpoints.len().saturating_sub(1);
        self.mark_dirty(last_line);
    }

    /// The text with markup stripped.
    pub fn parsed_string(&self) -> &str {
        &self.document.text
    }

    /// The style events parsed from the markup, in offset order.
    pub fn style_events(&self) -> &[StyleEvent] {
        self.document.events.events()
    }

    /// Attaches the glyph provider, or detaches it with `None`.
    pub fn set_font(&mut self, font: Option<Arc<dyn GlyphProvider>>) {
        self.font = font;
        self.mark_dirty(0);
    }

    /// The glyph provider.
    pub fn font(&self) -> Option<&Arc<dyn GlyphProvider>> {
        self.font.as_ref()
    }

    /// Sets the character size passed to the glyph provider.
    pub fn set_character_size(&mut self, size: u32) {
        self.size = size;
        self.mark_dirty(0);
    }

    /// The character size.
    pub fn character_size(&self) -> u32 {
        self.size
    }

    /// Sets the boolean style of the whole text.
    pub fn set_style(&mut self, style: TextStyle) {
        self.lcx.style.set_base_style(style);
        self.mark_dirty(0);
    }

    /// The boolean style of the whole text.
    pub fn style(&self) -> TextStyle {
        self.lcx.style.base_style()
    }

    /// Sets the fill color of the whole text.
    pub fn set_fill_color(&mut self, color: Color) {
        self.lcx.style.fill_color.set_base(color);
        self.mark_dirty(0);
    }

    /// The fill color of the whole text.
    pub fn fill_color(&self) -> Color {
        self.lcx.style.fill_color.base()
    }

    /// Sets the outline color of the whole text.
    pub fn set_outline_color(&mut self, color: Color) {
        self.lcx.style.outline_color.set_base(color);
        self.mark_dirty(0);
    }

    /// The outline color of the whole text.
    pub fn outline_color(&self) -> Color {
        self.lcx.style.outline_color.base()
    }

    /// Sets the outline thickness of the whole text. Zero disables outlines.
    pub fn set_outline_thickness(&mut self, thickness: f32) {
        self.lcx.style.outline_thickness.set_base(thickness);
        self.mark_dirty(0);
    }

    /// The outline thickness of the whole text.
    pub fn outline_thickness(&self) -> f32 {
        self.lcx.style.outline_thickness.base()
    }

    /// Sets the letter spacing factor of the whole text.
    ///
    /// `1.0` keeps the font's spacing; each unit above adds a third of a space between letters.
    pub fn set_letter_spacing_factor(&mut self, factor: f32) {
        self.lcx.style.letter_spacing.set_base(factor);
        self.mark_dirty(0);
    }

    /// The letter spacing factor of the whole text.
    pub fn letter_spacing_factor(&self) -> f32 {
        self.lcx.style.letter_spacing.base()
    }

    /// Sets the factor applied to the font's line spacing for the whole text.
    pub fn set_line_spacing_factor(&mut self, factor: f32) {
        self.lcx.style.line_spacing.set_base(factor);
        self.mark_dirty(0);
    }

    /// The line spacing factor of the whole text.
    pub fn line_spacing_factor(&self) -> f32 {
        self.lcx.style.line_spacing.base()
    }

    /// Sets the width past which words wrap onto a new line.
    pub fn set_horizontal_limit(&mut self, limit: f32) {
        self.horizontal_limit = limit;
        self.mark_dirty(0);
    }

    /// The width past which words wrap.
    pub fn horizontal_limit(&self) -> f32 {
        self.horizontal_limit
    }

    /// Limits drawing to the first `limit` displayable characters.
    ///
    /// This never lays out again; the partial geometry is cut out of the full one.
    pub fn set_character_limit(&mut self, limit: usize) {
        self.character_limit = limit;
    }

    /// The character limit.
    pub fn character_limit(&self) -> usize {
        self.character_limit
    }

    /// The number of displayable characters, above which the character limit has no effect.
    pub fn max_effective_character_limit(&self) -> usize {
        self.document.displayable
    }

    /// Sets the boolean style of the regions tagged with `id`.
    ///
    /// Every bold, italic, underline and strike-through starter of the group is switched on and
    /// set to whether `style` contains its flag.
    pub fn set_style_for(&mut self, id: i32, style: TextStyle) {
        let dirty = self.document.events.modify(
            id,
            |property| property.style_flag().is_some(),
            |property, value, active| {
                let on = property.style_flag().is_some_and(|flag| style.contains(flag));
                *value = Some(StyleValue::Flag(on));
                *active = true;
            },
        );
        self.mark_dirty_opt(dirty);
    }

    /// Switches the boolean style starters tagged with `id` whose flag is in `style`.
    pub fn set_style_activated(&mut self, id: i32, style: TextStyle, activated: bool) {
        self.activate(
            id,
            |property| property.style_flag().is_some_and(|flag| style.contains(flag)),
            activated,
        );
    }

    /// Sets the fill color of the regions tagged with `id`.
    pub fn set_fill_color_for(&mut self, id: i32, color: Color) {
        self.set_value(id, Property::FillColor, StyleValue::Color(color));
    }

    /// Switches the fill color starters tagged with `id`.
    pub fn set_fill_color_activated(&mut self, id: i32, activated: bool) {
        self.activate(id, |property| property == Property::FillColor, activated);
    }

    /// Sets the outline color of the regions tagged with `id`.
    pub fn set_outline_color_for(&mut self, id: i32, color: Color) {
        self.set_value(id, Property::OutlineColor, StyleValue::Color(color));
    }

    /// Switches the outline color starters tagged with `id`.
    pub fn set_outline_color_activated(&mut self, id: i32, activated: bool) {
        self.activate(id, |property| property == Property::OutlineColor, activated);
    }

    /// Sets the outline thickness of the regions tagged with `id`.
    pub fn set_outline_thickness_for(&mut self, id: i32, thickness: f32) {
        self.set_value(id, Property::OutlineThickness, StyleValue::Number(thickness));
    }

    /// Switches the outline thickness starters tagged with `id`.
    pub fn set_outline_thickness_activated(&mut self, id: i32, activated: bool) {
        self.activate(
            id,
            |property| property == Property::OutlineThickness,
            activated,
        );
    }

    /// Sets the letter spacing factor of the regions tagged with `id`.
    pub fn set_letter_spacing_factor_for(&mut self, id: i32, factor: f32) {
        self.set_value(id, Property::LetterSpacing, StyleValue::Number(factor));
    }

    /// Switches the letter spacing starters tagged with `id`.
    pub fn set_letter_spacing_factor_activated(&mut self, id: i32, activated: bool) {
        self.activate(id, |property| property == Property::LetterSpacing, activated);
    }

    /// Sets the line spacing factor of the regions tagged with `id`.
    pub fn set_line_spacing_factor_for(&mut self, id: i32, factor: f32) {
        self.set_value(id, Property::LineSpacing, StyleValue::Number(factor));
    }

    /// Switches the line spacing starters tagged with `id`.
    pub fn set_line_spacing_factor_activated(&mut self, id: i32, activated: bool) {
        self.activate(id, |property| property == Property::LineSpacing, activated);
    }

    /// Sets the placement transform used by [`global_bounds`](Self::global_bounds) and handed
    /// out with the draw data.
    pub fn set_transform(&mut self, transform: Affine) {
        self.transform = transform;
    }

    /// The placement transform.
    pub fn transform(&self) -> Affine {
        self.transform
    }

    /// Lays out whatever is out of date.
    ///
    /// Returns whether a layout pass ran. Nothing happens without a font.
    pub fn ensure_layout(&mut self) -> bool {
        let Some(font) = self.font.as_deref() else {
            return false;
        };
        let Some(line) = self.dirty_from.take() else {
            return false;
        };
        if line == 0 {
            let first_baseline = font.line_spacing(self.size) * self.lcx.style.line_spacing.base();
            self.layout.reset(first_baseline);
        }
        let params = LayoutParams {
            font,
            size: self.size,
            horizontal_limit: self.horizontal_limit,
        };
        let ran = layout_from(
            &params,
            &self.document.text,
            &mut self.document.events,
            &mut self.lcx,
            &mut self.layout,
            line,
        );
        if ran {
            self.generation += 1;
            log::debug!(
                "layout pass {} done, {} lines",
                self.generation,
                self.layout.checkpoints.len()
            );
        }
        ran
    }

    /// The full geometry, laid out if needed.
    pub fn geometry(&mut self) -> &Geometry {
        self.ensure_layout();
        &self.layout.geometry
    }

    /// The geometry to draw: the full geometry, or the part of it within the character limit.
    pub fn visible_geometry(&mut self) -> &Geometry {
        self.ensure_layout();
        if self.character_limit >= self.document.displayable {
            return &self.layout.geometry;
        }
        let key = (self.character_limit, self.generation);
        if self.partial_key != Some(key) {
            build_partial(&self.layout, self.character_limit, &mut self.partial);
            self.partial_key = Some(key);
        }
        &self.partial
    }

    /// Everything a renderer needs to draw the text, or `None` without a font.
    pub fn draw_data(&mut self) -> Option<DrawData<'_>> {
        let texture = self.font.as_ref()?.texture(self.size);
        let transform = self.transform;
        let geometry = self.visible_geometry();
        Some(DrawData {
            texture,
            transform,
            layers: [
                geometry.glyph_outlines.vertices(),
                geometry.decoration_outlines.vertices(),
                geometry.glyphs.vertices(),
                geometry.decorations.vertices(),
            ],
        })
    }

    /// Bounds of the full geometry in local coordinates.
    pub fn local_bounds(&mut self) -> Rect {
        self.geometry().bounds()
    }

    /// Bounds of the full geometry after the placement transform.
    pub fn global_bounds(&mut self) -> Rect {
        let bounds = self.local_bounds();
        self.transform.transform_rect_bbox(bounds)
    }

    /// Bounds of the glyph of the displayable character at `index`, in local coordinates.
    ///
    /// The character limit is ignored.
    pub fn character_bounds(&mut self, index: usize) -> Result<Rect, Error> {
        let len = self.document.displayable;
        if index >= len {
            return Err(Error::character_out_of_range(index, len));
        }
        if self.font.is_none() {
            return Err(Error::missing_font(index, len));
        }
        self.geometry()
            .glyphs
            .quad(index)
            .map(|quad| quad.bounding_box())
            .ok_or(Error::character_out_of_range(index, len))
    }

    /// Line checkpoints of the last layout.
    pub fn checkpoints(&self) -> &[Checkpoint] {
        self.layout.checkpoints.as_slice()
    }

    /// Number of layout passes run so far.
    pub fn layout_generation(&self) -> u64 {
        self.generation
    }

    fn set_value(&mut self, id: i32, target: Property, new: StyleValue) {
        let dirty = self.document.events.modify(
            id,
            |property| property == target,
            |_, value, active| {
                *value = Some(new);
                *active = true;
            },
        );
        self.mark_dirty_opt(dirty);
    }

    fn activate(&mut self, id: i32, filter: impl Fn(Property) -> bool, activated: bool) {
        let dirty = self
            .document
            .events
            .modify(id, filter, |_, _, active| *active = activated);
        self.mark_dirty_opt(dirty);
    }

    fn mark_dirty_opt(&mut self, line: Option<usize>) {
        if let Some(line) = line {
            self.mark_dirty(line);
        }
    }

    /// Records that the geometry from `line` onward is out of date.
    fn mark_dirty(&mut self, line: usize) {
        self.dirty_from = Some(self.dirty_from.map_or(line, |dirty| dirty.min(line)));
    }
}

impl core::fmt::Debug for RichText {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RichText")
            .field("text", &self.document.text)
            .field("size", &self.size)
            .field("horizontal_limit", &self.horizontal_limit)
            .field("character_limit", &self.character_limit)
            .field("transform", &self.transform)
            .field("dirty_from", &self.dirty_from)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}
