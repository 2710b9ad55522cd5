// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Utility functions and types shared across tests.

pub(crate) mod env;

pub(crate) use env::TestEnv;

use rich_text::{QuadBuffer, Rect};

/// Character size used by every test.
pub(crate) const SIZE: u32 = 20;

/// Advance of a regular character at [`SIZE`].
pub(crate) const ADVANCE: f32 = 10.0;

/// Distance between baselines at [`SIZE`].
pub(crate) const LINE_SPACING: f32 = 24.0;

/// Baseline of line `line`.
pub(crate) fn baseline(line: usize) -> f32 {
    LINE_SPACING * (line + 1) as f32
}

/// `(left, top, right, bottom)` of every quad.
pub(crate) fn edges(buffer: &QuadBuffer) -> Vec<[f32; 4]> {
    buffer
        .quads()
        .iter()
        .map(|quad| {
            let [left, top] = quad.upper_left();
            let [right, bottom] = quad.lower_right();
            [left, top, right, bottom]
        })
        .collect()
}

/// The color of the first vertex of every quad.
pub(crate) fn colors(buffer: &QuadBuffer) -> Vec<[u8; 4]> {
    buffer.quads().iter().map(|quad| quad.0[0].color).collect()
}

/// Whether `inner` lies within `outer`.
pub(crate) fn contains(outer: Rect, inner: Rect) -> bool {
    outer.union(inner) == outer
}
