// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! This crate contains the integration test suite for `rich_text`.
//!
//! - The `util` module contains shared utility functions that are needed by different
//!   test methods.
//! - We do not use the default Rust test harness, but instead use this `mod.rs` file as the
//!   entry point to run all other tests, so that the shared utilities are only compiled once.
//! - If you want to add new tests, put them into the module matching their topic (markup,
//!   wrapping, decorations, incremental layout, reveal, bounds or samples), and start the test
//!   name with that topic.

#![allow(missing_docs, reason = "we don't need docs for testing")]
#![allow(clippy::cast_possible_truncation, reason = "not critical for testing")]

mod bounds;
mod incremental;

mod util;
