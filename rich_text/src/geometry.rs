// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Renderer-facing triangle geometry.

use alloc::vec::Vec;

use peniko::kurbo::Rect;
use peniko::Color;

use crate::util::snap;

/// Number of vertices in a [`Quad`]: two triangles.
pub const QUAD_VERTICES: usize = 6;

/// A positioned, colored and textured vertex.
///
/// Texture coordinates are in texels of the atlas returned by
/// [`GlyphProvider::texture`](crate::GlyphProvider::texture). Decoration vertices all sample
/// texel `(1, 1)`, which atlases are expected to keep opaque white.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[repr(C)]
pub struct Vertex {
    /// Position in local coordinates.
    pub position: [f32; 2],
    /// Straight-alpha RGBA8 color.
    pub color: [u8; 4],
    /// Atlas texel coordinates.
    pub tex_coords: [f32; 2],
}

impl Vertex {
    /// Creates a vertex.
    pub fn new(x: f32, y: f32, color: Color, u: f32, v: f32) -> Self {
        let rgba = color.to_rgba8();
        Self {
            position: [x, y],
            color: [rgba.r, rgba.g, rgba.b, rgba.a],
            tex_coords: [u, v],
        }
    }
}

/// Two triangles covering a rectangle (or, for italic glyphs, a parallelogram).
///
/// The vertex order is fixed: `0` is the upper left corner, `1` and `4` the upper right, `2` and
/// `3` the lower left and `5` the lower right corner.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[repr(transparent)]
pub struct Quad(pub [Vertex; QUAD_VERTICES]);

const LEFT: [usize; 3] = [0, 2, 3];
const RIGHT: [usize; 3] = [1, 4, 5];

impl Quad {
    /// Builds a quad from its four corners, sharing `color`.
    ///
    /// Corners are `[x, y, u, v]`.
    pub(crate) fn from_corners(
        top_left: [f32; 4],
        top_right: [f32; 4],
        bottom_left: [f32; 4],
        bottom_right: [f32; 4],
        color: Color,
    ) -> Self {
        let v = |[x, y, u, v]: [f32; 4]| Vertex::new(x, y, color, u, v);
        let tr = v(top_right);
        let bl = v(bottom_left);
        Self([v(top_left), tr, bl, bl, tr, v(bottom_right)])
    }

    /// The upper left corner.
    pub fn upper_left(&self) -> [f32; 2] {
        self.0[0].position
    }

    /// The lower right corner.
    pub fn lower_right(&self) -> [f32; 2] {
        self.0[5].position
    }

    /// The smallest axis-aligned rectangle containing every vertex.
    pub fn bounding_box(&self) -> Rect {
        let mut min = [f32::INFINITY; 2];
        let mut max = [f32::NEG_INFINITY; 2];
        for vertex in &self.0 {
            let [x, y] = vertex.position;
            min = [min[0].min(x), min[1].min(y)];
            max = [max[0].max(x), max[1].max(y)];
        }
        Rect::new(min[0].into(), min[1].into(), max[0].into(), max[1].into())
    }

    /// Moves the right edge to `x`.
    pub(crate) fn set_right(&mut self, x: f32) {
        for i in RIGHT {
            self.0[i].position[0] = x;
        }
    }

    /// Moves the left edge to `x`.
    pub(crate) fn set_left(&mut self, x: f32) {
        for i in LEFT {
            self.0[i].position[0] = x;
        }
    }

    pub(crate) fn translate(&mut self, dx: f32, dy: f32) {
        for vertex in &mut self.0 {
            vertex.position[0] += dx;
            vertex.position[1] += dy;
        }
    }

    fn snap(&mut self) {
        for vertex in &mut self.0 {
            vertex.position = vertex.position.map(snap);
        }
    }
}

/// An ordered list of quads, laid out as a flat vertex list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QuadBuffer {
    quads: Vec<Quad>,
}

impl QuadBuffer {
    /// Number of quads.
    pub fn len(&self) -> usize {
        self.quads.len()
    }

    /// Whether the buffer holds no quads.
    pub fn is_empty(&self) -> bool {
        self.quads.is_empty()
    }

    /// The quad at `index`.
    pub fn quad(&self, index: usize) -> Option<&Quad> {
        self.quads.get(index)
    }

    /// All quads in order.
    pub fn quads(&self) -> &[Quad] {
        &self.quads
    }

    /// All vertices in order, six per quad.
    pub fn vertices(&self) -> &[Vertex] {
        bytemuck::cast_slice(&self.quads)
    }

    pub(crate) fn push(&mut self, quad: Quad) {
        self.quads.push(quad);
    }

    /// Keeps the quads for which `keep` returns `true`, letting it edit them in place.
    pub(crate) fn retain_mut(&mut self, keep: impl FnMut(&mut Quad) -> bool) {
        self.quads.retain_mut(keep);
    }

    pub(crate) fn truncate(&mut self, len: usize) {
        self.quads.truncate(len);
    }

    pub(crate) fn clear(&mut self) {
        self.quads.clear();
    }

    pub(crate) fn append(&mut self, other: &mut Self) {
        self.quads.append(&mut other.quads);
    }

    pub(crate) fn extend_from_slice(&mut self, quads: &[Quad]) {
        self.quads.extend_from_slice(quads);
    }

    pub(crate) fn translate(&mut self, dx: f32, dy: f32) {
        for quad in &mut self.quads {
            quad.translate(dx, dy);
        }
    }

    /// Snaps every vertex of the quads from `first` onward to whole units.
    pub(crate) fn snap_from(&mut self, first: usize) {
        for quad in self.quads.iter_mut().skip(first) {
            quad.snap();
        }
    }

    /// Grows `bounds` by the upper left and lower right corner of every quad.
    fn accumulate_bounds(&self, bounds: &mut Option<[f32; 4]>) {
        for quad in &self.quads {
            let [x0, y0] = quad.upper_left();
            let [x1, y1] = quad.lower_right();
            *bounds = Some(match *bounds {
                Some([a, b, c, d]) => [a.min(x0), b.min(y0), c.max(x1), d.max(y1)],
                None => [x0, y0, x1, y1],
            });
        }
    }
}

/// The four geometry streams of a laid out text.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Geometry {
    /// Glyph fills, one quad per displayable character.
    pub glyphs: QuadBuffer,
    /// Glyph outlines, one quad per displayable character drawn with a non-zero outline.
    pub glyph_outlines: QuadBuffer,
    /// Underline and strike-through fills.
    pub decorations: QuadBuffer,
    /// Underline and strike-through outlines.
    pub decoration_outlines: QuadBuffer,
}

impl Geometry {
    /// Bounding rectangle spanned by the upper left and lower right corners of every quad.
    ///
    /// Empty geometry has zero bounds.
    pub fn bounds(&self) -> Rect {
        let mut bounds = None;
        for buffer in self.buffers() {
            buffer.accumulate_bounds(&mut bounds);
        }
        match bounds {
            Some([x0, y0, x1, y1]) => Rect::new(x0.into(), y0.into(), x1.into(), y1.into()),
            None => Rect::ZERO,
        }
    }

    /// Total number of quads across all streams.
    pub fn quad_count(&self) -> usize {
        self.buffers().iter().map(|b| b.len()).sum()
    }

    pub(crate) fn clear(&mut self) {
        self.glyphs.clear();
        self.glyph_outlines.clear();
        self.decorations.clear();
        self.decoration_outlines.clear();
    }

    fn buffers(&self) -> [&QuadBuffer; 4] {
        [
            &self.glyphs,
            &self.decorations,
            &self.glyph_outlines,
            &self.decoration_outlines,
        ]
    }
}
