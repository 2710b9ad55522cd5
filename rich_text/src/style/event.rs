// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use hashbrown::HashMap;

use super::{Property, StyleValue};

/// An instruction that starts or ends a property override at a character offset.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StyleEvent {
    /// The property this event changes.
    pub property: Property,
    /// Whether the event pushes or pops a value.
    pub kind: EventKind,
    /// Offset in characters into the parsed string.
    pub offset: usize,
    /// External identifier attached with an `id` tag, if any.
    pub id: Option<i32>,
}

/// Whether a [`StyleEvent`] opens or closes an override.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum EventKind {
    /// Pushes a value onto the property's stack.
    ///
    /// An inactive starter (or one without a value) re-pushes the current value, leaving the
    /// visible style untouched. Such placeholders can be switched on later through the
    /// `*_activated` setters.
    Starter {
        /// The value to push.
        value: Option<StyleValue>,
        /// Whether `value` is pushed.
        active: bool,
    },
    /// Pops one level off the property's stack, unless only the base level remains.
    Ender,
}

impl EventKind {
    /// An active starter pushing `value`.
    pub fn starter(value: StyleValue) -> Self {
        Self::Starter {
            value: Some(value),
            active: true,
        }
    }

    /// An inactive placeholder starter.
    pub fn placeholder() -> Self {
        Self::Starter {
            value: None,
            active: false,
        }
    }
}

/// Style events of one document, ordered by offset, plus the lookup tables used for mutation.
#[derive(Clone, Debug, Default)]
pub(crate) struct EventStore {
    events: Vec<StyleEvent>,
    /// The last line each event was applied on, `usize::MAX` when never reached.
    last_seen: Vec<usize>,
    groups: HashMap<i32, Vec<usize>>,
}

impl EventStore {
    pub(crate) fn clear(&mut self) {
        self.events.clear();
        self.last_seen.clear();
        self.groups.clear();
    }

    pub(crate) fn push(&mut self, event: StyleEvent) {
        debug_assert!(
            self.events.last().is_none_or(|e| e.offset <= event.offset),
            "style events must be pushed in offset order"
        );
        let index = self.events.len();
        if let Some(id) = event.id {
            self.groups.entry(id).or_default().push(index);
        }
        self.events.push(event);
        self.last_seen.push(usize::MAX);
    }

    pub(crate) fn events(&self) -> &[StyleEvent] {
        &self.events
    }

    /// Records that the event at `index` was applied while laying out `line`.
    pub(crate) fn set_seen(&mut self, index: usize, line: usize) {
        if let Some(seen) = self.last_seen.get_mut(index) {
            *seen = line;
        }
    }

    /// Lowers the recorded line of the event at `index` to at most `line`.
    pub(crate) fn lower_seen(&mut self, index: usize, line: usize) {
        if let Some(seen) = self.last_seen.get_mut(index) {
            *seen = (*seen).min(line);
        }
    }

    #[cfg(test)]
    pub(crate) fn last_seen(&self, index: usize) -> Option<usize> {
        self.last_seen.get(index).copied()
    }

    /// Applies `f` to every starter tagged with `id` whose property passes `filter`.
    ///
    /// Returns the earliest line on which any touched event was last applied, or `None` when no
    /// event was touched.
    pub(crate) fn modify(
        &mut self,
        id: i32,
        filter: impl Fn(Property) -> bool,
        mut f: impl FnMut(Property, &mut Option<StyleValue>, &mut bool),
    ) -> Option<usize> {
        let indices = self.groups.get(&id)?;
        let mut dirty = None;
        for &index in indices {
            let Some(event) = self.events.get_mut(index) else {
                continue;
            };
            if !filter(event.property) {
                continue;
            }
            let EventKind::Starter { value, active } = &mut event.kind else {
                continue;
            };
            f(event.property, value, active);
            let seen = self.last_seen.get(index).copied().unwrap_or(usize::MAX);
            dirty = Some(dirty.map_or(seen, |line: usize| line.min(seen)));
        }
        dirty
    }
}
