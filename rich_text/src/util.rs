// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Misc helpers.

#[cfg(feature = "libm")]
#[allow(unused_imports, reason = "Unused when `std` is also enabled.")]
use core_maths::CoreFloat;

/// Rounds to the nearest whole unit, halves rounding up.
#[inline]
pub(crate) fn snap(x: f32) -> f32 {
    (x + 0.5).floor()
}

#[inline]
pub(crate) fn floor(x: f32) -> f32 {
    x.floor()
}
