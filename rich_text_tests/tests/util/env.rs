// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::sync::Arc;

use rich_text::RichText;
use rich_text_dev::FixedMetrics;

use super::SIZE;

/// Builds texts sharing one glyph provider.
pub(crate) struct TestEnv {
    pub(crate) metrics: Arc<FixedMetrics>,
}

impl TestEnv {
    pub(crate) fn new() -> Self {
        Self {
            metrics: Arc::new(FixedMetrics::new()),
        }
    }

    /// A text laid out without a width limit.
    pub(crate) fn text(&self, markup: &str) -> RichText {
        RichText::with_font(self.metrics.clone(), markup, SIZE)
    }

    /// A text wrapped at `limit`.
    pub(crate) fn wrapped(&self, markup: &str, limit: f32) -> RichText {
        let mut text = self.text(markup);
        text.set_horizontal_limit(limit);
        text
    }
}
