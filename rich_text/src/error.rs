// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Error type for geometry queries on a [`RichText`](crate::RichText).
///
/// Carries a non-exhaustive [`ErrorKind`] plus the index that was requested and the number of
/// addressable characters at the time of the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Error {
    /// The non-exhaustive category describing this error.
    kind: ErrorKind,

    /// The character index provided by the caller.
    index: usize,

    /// The number of displayable characters when the error was raised.
    available: usize,
}

impl Error {
    /// The machine-readable category for this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The character index provided by the caller.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The number of displayable characters at the time of the error.
    pub fn available(&self) -> usize {
        self.available
    }

    pub(crate) fn character_out_of_range(index: usize, available: usize) -> Self {
        Self {
            kind: ErrorKind::CharacterOutOfRange,
            index,
            available,
        }
    }

    pub(crate) fn missing_font(index: usize, available: usize) -> Self {
        Self {
            kind: ErrorKind::MissingFont,
            index,
            available,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.kind {
            ErrorKind::CharacterOutOfRange => write!(
                f,
                "character {} does not exist; text has {} displayable characters",
                self.index, self.available
            ),
            ErrorKind::MissingFont => write!(
                f,
                "cannot locate character {}: no glyph provider is attached",
                self.index
            ),
        }
    }
}

impl core::error::Error for Error {}

/// The non-exhaustive category of an error.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The requested character index is not below the displayable character count.
    CharacterOutOfRange,

    /// Geometry was requested before a [`GlyphProvider`](crate::GlyphProvider) was attached.
    MissingFont,
}
