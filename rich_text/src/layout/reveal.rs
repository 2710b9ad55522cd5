// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry of a partially revealed text.

use crate::geometry::{Geometry, QuadBuffer};
use crate::util::floor;

use super::Layout;

/// Fills `out` with the part of `layout` showing its first `limit` glyphs.
///
/// Decorations on lines before the last revealed glyph are kept whole. On its line they are cut
/// at the right edge of that glyph, and dropped when they start past it.
pub(crate) fn build_partial(layout: &Layout, limit: usize, out: &mut Geometry) {
    out.clear();
    if limit == 0 {
        return;
    }
    let geometry = &layout.geometry;
    let Some(last) = geometry.glyphs.quad(limit - 1) else {
        out.clone_from(geometry);
        return;
    };
    let right = last.lower_right()[0];
    let line = layout.checkpoints.line_of_glyph(limit - 1);

    let owned = layout.outline_owners.partition_point(|&owner| owner < limit);
    out.glyph_outlines
        .extend_from_slice(&geometry.glyph_outlines.quads()[..owned]);
    out.glyphs
        .extend_from_slice(&geometry.glyphs.quads()[..limit]);
    reveal_decorations(
        &geometry.decorations,
        &layout.decoration_lines,
        line,
        right,
        false,
        &mut out.decorations,
    );
    reveal_decorations(
        &geometry.decoration_outlines,
        &layout.decoration_outline_lines,
        line,
        right,
        true,
        &mut out.decoration_outlines,
    );
}

fn reveal_decorations(
    quads: &QuadBuffer,
    lines: &[usize],
    last_line: usize,
    right: f32,
    outline: bool,
    out: &mut QuadBuffer,
) {
    for (quad, &line) in quads.quads().iter().zip(lines) {
        if line > last_line {
            break;
        }
        let mut quad = *quad;
        if line == last_line {
            let [left, top] = quad.upper_left();
            if left >= right {
                continue;
            }
            let [end, bottom] = quad.lower_right();
            if end > right {
                // Outlines reach past the glyph by about half their height.
                let limit = if outline {
                    right + floor((bottom - top) / 2.0)
                } else {
                    right
                };
                quad.set_right(end.min(limit));
            }
        }
        out.push(quad);
    }
}
