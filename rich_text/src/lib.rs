// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rich Text lays out markup-annotated text into renderer-agnostic triangle geometry.
//!
//! A [`RichText`] owns a display string parsed from lightweight markup such as
//! `"<b>bold</b>, <c=#FF0000,u>red and underlined</c,/u>"`, the style events the markup produced,
//! and four cached geometry streams (glyph fills, glyph outlines, decoration fills and decoration
//! outlines). Glyph metrics come from a caller-supplied [`GlyphProvider`].
//!
//! Geometry is rebuilt lazily: setters only record the earliest line they affect, and the next
//! read (bounds, character bounds or draw data) resumes layout from that line's checkpoint.
//! Style regions tagged with `id=<n>` in the markup can be modified after parsing through the
//! `*_for` and `*_activated` setters.
//!
//! ## Features
//!
//! - `std` (enabled by default): Get floating point functions from the standard library
//!   (likely using your target's libc).
//! - `libm`: Use floating point implementations from [libm].
//!
//! At least one of `std` and `libm` is required; `std` overrides `libm`.
//!
//! [libm]: https://crates.io/crates/libm

// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("rich_text requires either the `std` or `libm` feature to be enabled");

// Suppress the unused_crate_dependencies lint when both std and libm are specified.
#[cfg(all(feature = "std", feature = "libm"))]
use core_maths as _;

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod context;
mod error;
mod geometry;
mod impl_bytemuck;
mod markup;
mod metrics;
mod resolve;
mod text;
mod util;

pub mod layout;
pub mod style;

pub use peniko::kurbo::{Affine, Rect};
pub use peniko::Color;

pub use error::{Error, ErrorKind};
pub use geometry::{Geometry, Quad, QuadBuffer, Vertex, QUAD_VERTICES};
pub use layout::Checkpoint;
pub use metrics::{Glyph, GlyphProvider, GlyphRect, TextureHandle};
pub use style::{Property, TextStyle};
pub use text::{DrawData, RichText};
