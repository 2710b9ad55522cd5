// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The boundary to the font resource that supplies glyph metrics.

/// An axis-aligned rectangle in `left, top, width, height` form.
///
/// Used both for glyph bounds relative to the pen position (where `top` is usually negative,
/// since glyphs sit above the baseline) and for glyph locations inside a texture atlas.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct GlyphRect {
    /// Left edge.
    pub left: f32,
    /// Top edge.
    pub top: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl GlyphRect {
    /// Creates a rectangle from its left and top edges and its size.
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// The right edge.
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    /// The bottom edge.
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

/// Metrics of one rasterized glyph.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Glyph {
    /// Horizontal distance to advance the pen after this glyph.
    pub advance: f32,
    /// Bounding box relative to the pen position on the baseline.
    pub bounds: GlyphRect,
    /// Location of the rasterized glyph in the atlas texture.
    pub atlas_rect: GlyphRect,
}

/// Opaque identifier of the atlas texture for a character size.
///
/// It is handed through to the draw consumer untouched.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u64);

/// Source of glyph metrics and atlas locations for a font.
///
/// Every method must be a pure function of its inputs; implementations are free to cache
/// internally (using interior mutability). One provider is typically shared between many
/// [`RichText`](crate::RichText) instances.
pub trait GlyphProvider {
    /// Metrics of `code` at `size`, in bold weight when `bold` is set.
    ///
    /// A non-zero `outline_thickness` requests the metrics of the glyph's outline, whose bounds
    /// are grown by the thickness on every side.
    fn glyph(&self, code: char, size: u32, bold: bool, outline_thickness: f32) -> Glyph;

    /// Kerning adjustment to apply between `previous` and `code`.
    fn kerning(&self, previous: char, code: char, size: u32) -> f32;

    /// Default distance between two baselines.
    fn line_spacing(&self, size: u32) -> f32;

    /// Vertical offset of the underline from the baseline.
    fn underline_position(&self, size: u32) -> f32;

    /// Thickness of underline and strike-through decorations.
    fn underline_thickness(&self, size: u32) -> f32;

    /// The atlas texture containing the glyphs rasterized at `size`.
    fn texture(&self, size: u32) -> TextureHandle;
}
