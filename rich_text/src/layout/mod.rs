// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Word-wrapping layout, line checkpoints and partial reveal.

mod engine;
mod reveal;
mod word;

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use crate::geometry::{Geometry, Quad};

pub(crate) use engine::{layout_from, LayoutParams};
pub(crate) use reveal::build_partial;
pub(crate) use word::Word;

/// Saved layout state at the start of a line.
///
/// Layout can resume from any checkpoint without re-scanning the lines before it.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Checkpoint {
    /// Index of the line.
    pub line: usize,
    /// Offset in characters of the first character laid out on the line.
    pub offset: usize,
    /// Byte offset matching `offset` in the parsed string.
    pub byte_offset: usize,
    /// Vertical pen position (the baseline) of the line.
    pub pen_y: f32,
    /// Number of glyph quads on the lines before this one.
    pub glyph_count: usize,
}

/// Quad counts of the four geometry streams.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct StreamCounts {
    pub(crate) glyphs: usize,
    pub(crate) glyph_outlines: usize,
    pub(crate) decorations: usize,
    pub(crate) decoration_outlines: usize,
}

impl StreamCounts {
    fn of(geometry: &Geometry) -> Self {
        Self {
            glyphs: geometry.glyphs.len(),
            glyph_outlines: geometry.glyph_outlines.len(),
            decorations: geometry.decorations.len(),
            decoration_outlines: geometry.decoration_outlines.len(),
        }
    }
}

/// One checkpoint per line.
///
/// Glyph counts are stored densely. The other streams are often empty, so their counts are only
/// stored for lines where they changed; the count at any line is that of the closest entry at or
/// before it.
#[derive(Clone, Debug, Default)]
pub(crate) struct Checkpoints {
    lines: Vec<Checkpoint>,
    glyph_outlines: BTreeMap<usize, usize>,
    decorations: BTreeMap<usize, usize>,
    decoration_outlines: BTreeMap<usize, usize>,
}

impl Checkpoints {
    pub(crate) fn reset(&mut self, pen_y: f32) {
        self.lines.clear();
        self.lines.push(Checkpoint {
            pen_y,
            ..Checkpoint::default()
        });
        for map in self.sparse_mut() {
            map.clear();
            map.insert(0, 0);
        }
    }

    pub(crate) fn as_slice(&self) -> &[Checkpoint] {
        &self.lines
    }

    pub(crate) fn len(&self) -> usize {
        self.lines.len()
    }

    pub(crate) fn record(&mut self, checkpoint: Checkpoint, counts: StreamCounts) {
        debug_assert_eq!(
            checkpoint.line,
            self.lines.len(),
            "checkpoints must be recorded line by line"
        );
        let line = checkpoint.line;
        record_sparse(&mut self.glyph_outlines, line, counts.glyph_outlines);
        record_sparse(&mut self.decorations, line, counts.decorations);
        record_sparse(&mut self.decoration_outlines, line, counts.decoration_outlines);
        self.lines.push(checkpoint);
    }

    /// Forgets every line after `line`, returning the checkpoint of `line` and the stream counts
    /// at its start.
    pub(crate) fn rewind(&mut self, line: usize) -> Option<(Checkpoint, StreamCounts)> {
        let checkpoint = *self.lines.get(line)?;
        self.lines.truncate(line + 1);
        for map in self.sparse_mut() {
            drop(map.split_off(&(line + 1)));
        }
        let counts = StreamCounts {
            glyphs: checkpoint.glyph_count,
            glyph_outlines: count_at(&self.glyph_outlines, line),
            decorations: count_at(&self.decorations, line),
            decoration_outlines: count_at(&self.decoration_outlines, line),
        };
        Some((checkpoint, counts))
    }

    /// The line holding the glyph at `index`, which must be below the glyph count.
    pub(crate) fn line_of_glyph(&self, index: usize) -> usize {
        self.lines
            .get(1..)
            .map_or(0, |rest| rest.partition_point(|c| c.glyph_count <= index))
    }

    fn sparse_mut(&mut self) -> [&mut BTreeMap<usize, usize>; 3] {
        [
            &mut self.glyph_outlines,
            &mut self.decorations,
            &mut self.decoration_outlines,
        ]
    }
}

fn record_sparse(map: &mut BTreeMap<usize, usize>, line: usize, count: usize) {
    if map.last_key_value().map(|(_, &c)| c) != Some(count) {
        map.insert(line, count);
    }
}

fn count_at(map: &BTreeMap<usize, usize>, line: usize) -> usize {
    map.range(..=line).next_back().map_or(0, |(_, &c)| c)
}

/// Committed geometry of a text along with the bookkeeping needed to resume and reveal it.
#[derive(Clone, Debug, Default)]
pub(crate) struct Layout {
    pub(crate) geometry: Geometry,
    /// Index of the glyph each outline glyph quad belongs to.
    pub(crate) outline_owners: Vec<usize>,
    /// Line of each decoration quad.
    pub(crate) decoration_lines: Vec<usize>,
    /// Line of each decoration outline quad.
    pub(crate) decoration_outline_lines: Vec<usize>,
    pub(crate) checkpoints: Checkpoints,
}

impl Layout {
    /// Drops all geometry, keeping a single checkpoint for the first line.
    pub(crate) fn reset(&mut self, first_baseline: f32) {
        self.geometry.clear();
        self.outline_owners.clear();
        self.decoration_lines.clear();
        self.decoration_outline_lines.clear();
        self.checkpoints.reset(first_baseline);
    }

    /// Drops the geometry of every line from `line` onward.
    pub(crate) fn rewind(&mut self, line: usize) -> Option<(Checkpoint, StreamCounts)> {
        let (checkpoint, counts) = self.checkpoints.rewind(line)?;
        self.geometry.glyphs.truncate(counts.glyphs);
        self.geometry.glyph_outlines.truncate(counts.glyph_outlines);
        self.outline_owners.truncate(counts.glyph_outlines);
        self.geometry.decorations.truncate(counts.decorations);
        self.decoration_lines.truncate(counts.decorations);
        self.geometry
            .decoration_outlines
            .truncate(counts.decoration_outlines);
        self.decoration_outline_lines
            .truncate(counts.decoration_outlines);
        Some((checkpoint, counts))
    }

    pub(crate) fn counts(&self) -> StreamCounts {
        StreamCounts::of(&self.geometry)
    }

    pub(crate) fn push_decoration(&mut self, quad: Quad, line: usize) {
        self.geometry.decorations.push(quad);
        self.decoration_lines.push(line);
    }

    pub(crate) fn push_decoration_outline(&mut self, quad: Quad, line: usize) {
        self.geometry.decoration_outlines.push(quad);
        self.decoration_outline_lines.push(line);
    }

    /// Moves the contents of `word` to the end of the committed geometry on `line`.
    pub(crate) fn commit(&mut self, word: &mut Word, line: usize) {
        self.geometry.glyphs.append(&mut word.glyphs);
        self.geometry.glyph_outlines.append(&mut word.glyph_outlines);
        self.outline_owners.append(&mut word.outline_owners);
        self.decoration_lines
            .extend(core::iter::repeat_n(line, word.decorations.len()));
        self.geometry.decorations.append(&mut word.decorations);
        self.decoration_outline_lines
            .extend(core::iter::repeat_n(line, word.decoration_outlines.len()));
        self.geometry
            .decoration_outlines
            .append(&mut word.decoration_outlines);
    }
}

#[cfg(test)]
mod tests {
    use super::{Checkpoint, Checkpoints, StreamCounts};

    fn checkpoint(line: usize, offset: usize, glyph_count: usize) -> Checkpoint {
        Checkpoint {
            line,
            offset,
            byte_offset: offset,
            pen_y: 10.0 * (line + 1) as f32,
            glyph_count,
        }
    }

    fn counts(glyphs: usize, decorations: usize) -> StreamCounts {
        StreamCounts {
            glyphs,
            decorations,
            ..StreamCounts::default()
        }
    }

    #[test]
    fn sparse_counts_resolve_to_closest_earlier_line() {
        let mut checkpoints = Checkpoints::default();
        checkpoints.reset(10.0);
        checkpoints.record(checkpoint(1, 4, 3), counts(3, 2));
        checkpoints.record(checkpoint(2, 8, 6), counts(6, 2));
        checkpoints.record(checkpoint(3, 12, 9), counts(9, 2));
        checkpoints.record(checkpoint(4, 16, 12), counts(12, 5));

        let (cp, at) = checkpoints.clone().rewind(3).unwrap();
        assert_eq!(cp.offset, 12);
        assert_eq!(at.decorations, 2);
        assert_eq!(at.glyph_outlines, 0);

        let (_, at) = checkpoints.clone().rewind(4).unwrap();
        assert_eq!(at.decorations, 5);

        let (_, at) = checkpoints.clone().rewind(0).unwrap();
        assert_eq!(at, StreamCounts::default());
    }

    #[test]
    fn rewind_forgets_later_lines() {
        let mut checkpoints = Checkpoints::default();
        checkpoints.reset(10.0);
        checkpoints.record(checkpoint(1, 4, 3), counts(3, 1));
        checkpoints.record(checkpoint(2, 8, 6), counts(6, 4));
        assert!(checkpoints.rewind(1).is_some());
        assert_eq!(checkpoints.len(), 2);
        checkpoints.record(checkpoint(2, 9, 7), counts(7, 1));
        let (cp, at) = checkpoints.rewind(2).unwrap();
        assert_eq!(cp.offset, 9);
        assert_eq!(at.decorations, 1);
        assert!(checkpoints.rewind(3).is_none());
    }

    #[test]
    fn glyph_lines() {
        let mut checkpoints = Checkpoints::default();
        checkpoints.reset(10.0);
        checkpoints.record(checkpoint(1, 4, 3), counts(3, 0));
        checkpoints.record(checkpoint(2, 8, 3), counts(3, 0));
        checkpoints.record(checkpoint(3, 12, 5), counts(5, 0));
        assert_eq!(checkpoints.line_of_glyph(0), 0);
        assert_eq!(checkpoints.line_of_glyph(2), 0);
        assert_eq!(checkpoints.line_of_glyph(3), 2);
        assert_eq!(checkpoints.line_of_glyph(4), 2);
        assert_eq!(checkpoints.line_of_glyph(5), 3);
    }
}
