// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Context for layout.

use crate::layout::Word;
use crate::resolve::VariableStyle;

/// Scratch state reused by every layout pass of a text.
///
/// The base level of each style stack is the document-wide style, so this also holds the
/// values set through the whole-document setters.
#[derive(Clone, Debug, Default)]
pub(crate) struct LayoutContext {
    pub(crate) style: VariableStyle,
    pub(crate) word: Word,
}
