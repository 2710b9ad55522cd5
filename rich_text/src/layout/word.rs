// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use peniko::Color;

use crate::geometry::{Quad, QuadBuffer};
use crate::metrics::Glyph;
use crate::util::floor;

/// Quads around glyphs extend this far past the glyph bounds, in both geometry and texture space.
const GLYPH_PADDING: f32 = 1.0;

/// Geometry of the word being scanned.
///
/// It only moves into the committed buffers once the word is known to stay on its line.
#[derive(Clone, Debug, Default)]
pub(crate) struct Word {
    pub(crate) glyphs: QuadBuffer,
    pub(crate) glyph_outlines: QuadBuffer,
    /// Index of the glyph each outline quad belongs to.
    pub(crate) outline_owners: Vec<usize>,
    pub(crate) decorations: QuadBuffer,
    pub(crate) decoration_outlines: QuadBuffer,
}

impl Word {
    pub(crate) fn clear(&mut self) {
        self.glyphs.clear();
        self.glyph_outlines.clear();
        self.outline_owners.clear();
        self.decorations.clear();
        self.decoration_outlines.clear();
    }

    /// Whether a glyph has been placed in the word.
    pub(crate) fn has_glyphs(&self) -> bool {
        !self.glyphs.is_empty()
    }

    pub(crate) fn translate(&mut self, dx: f32, dy: f32) {
        self.glyphs.translate(dx, dy);
        self.glyph_outlines.translate(dx, dy);
        self.decorations.translate(dx, dy);
        self.decoration_outlines.translate(dx, dy);
    }
}

/// The quad drawing `glyph` with its pen position at `(x, y)`.
///
/// `shear` slants the quad for italics. Outline quads pass the outline thickness, which shifts
/// them up and left so the grown outline bitmap is centered on the glyph.
pub(crate) fn glyph_quad(
    x: f32,
    y: f32,
    glyph: &Glyph,
    color: Color,
    shear: f32,
    outline: f32,
) -> Quad {
    let bounds = glyph.bounds;
    let left = bounds.left - GLYPH_PADDING;
    let top = bounds.top - GLYPH_PADDING;
    let right = bounds.right() + GLYPH_PADDING;
    let bottom = bounds.bottom() + GLYPH_PADDING;

    let atlas = glyph.atlas_rect;
    let u1 = atlas.left - GLYPH_PADDING;
    let v1 = atlas.top - GLYPH_PADDING;
    let u2 = atlas.right() + GLYPH_PADDING;
    let v2 = atlas.bottom() + GLYPH_PADDING;

    let x = x - outline;
    let y = y - outline;
    Quad::from_corners(
        [x + left - shear * top, y + top, u1, v1],
        [x + right - shear * top, y + top, u2, v1],
        [x + left - shear * bottom, y + bottom, u1, v2],
        [x + right - shear * bottom, y + bottom, u2, v2],
        color,
    )
}

/// The quad of a horizontal decoration line starting at `x` and centered on `y`.
///
/// Outline quads pass the outline thickness, which grows the quad on every side.
pub(crate) fn line_quad(
    x: f32,
    y: f32,
    length: f32,
    color: Color,
    thickness: f32,
    outline: f32,
) -> Quad {
    let top = floor(y - thickness / 2.0 + 0.5);
    let bottom = top + floor(thickness + 0.5);
    let left = x - outline;
    let right = x + length + outline;
    let top = top - outline;
    let bottom = bottom + outline;
    Quad::from_corners(
        [left, top, 1.0, 1.0],
        [right, top, 1.0, 1.0],
        [left, bottom, 1.0, 1.0],
        [right, bottom, 1.0, 1.0],
        color,
    )
}
