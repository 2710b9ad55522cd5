// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `bytemuck` trait impls for the vertex types, so that geometry can be uploaded as raw bytes.

#![allow(
    unsafe_code,
    reason = "The `bytemuck` marker traits are `unsafe` and require `unsafe impl`."
)]

use crate::geometry::{Quad, Vertex};
use bytemuck::{Pod, Zeroable};

// Safety: `Vertex` is `repr(C)` and made of `f32` and `u8` arrays laid out without padding
// (8 + 4 + 8 bytes, 4-byte aligned). All bit patterns are valid.
unsafe impl Zeroable for Vertex {}

// Safety: See above.
unsafe impl Pod for Vertex {}

// Safety: `Quad` is `repr(transparent)` over `[Vertex; 6]`.
unsafe impl Zeroable for Quad {}

// Safety: See above.
unsafe impl Pod for Quad {}
