// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use smallvec::SmallVec;

use crate::style::{EventKind, StyleValue};

/// Value stack of a single property.
///
/// The base level is stored apart from the pushed levels so that the stack can never be popped
/// below it.
#[derive(Clone, Debug)]
pub(crate) struct PropertyStack<T> {
    base: T,
    levels: SmallVec<[T; 4]>,
}

impl<T: Copy + PartialEq> PropertyStack<T> {
    pub(crate) fn new(base: T) -> Self {
        Self {
            base,
            levels: SmallVec::new(),
        }
    }

    /// The current value.
    pub(crate) fn top(&self) -> T {
        self.levels.last().copied().unwrap_or(self.base)
    }

    pub(crate) fn base(&self) -> T {
        self.base
    }

    pub(crate) fn set_base(&mut self, value: T) {
        self.base = value;
    }

    /// Number of levels, including the base.
    #[cfg(test)]
    pub(crate) fn depth(&self) -> usize {
        self.levels.len() + 1
    }

    /// Collapses the stack to its base level.
    pub(crate) fn rewind(&mut self) {
        self.levels.clear();
    }

    /// Applies a starter or ender, returning whether the visible value changed.
    ///
    /// `extract` converts the event's value into this stack's value type; a starter whose value
    /// doesn't convert behaves like an inactive one.
    pub(crate) fn apply(&mut self, kind: &EventKind, extract: fn(StyleValue) -> Option<T>) -> bool {
        let previous = self.top();
        match *kind {
            EventKind::Ender => match self.levels.pop() {
                Some(popped) => popped != self.top(),
                None => false,
            },
            EventKind::Starter { value, active } => match value.and_then(extract) {
                Some(value) if active => {
                    self.levels.push(value);
                    value != previous
                }
                _ => {
                    self.levels.push(previous);
                    false
                }
            },
        }
    }
}
