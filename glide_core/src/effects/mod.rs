// Copyright 2026 the Glide Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The three effect derivations.
//!
//! Each submodule holds a config with the tuned constants, the pure
//! derivation function, and an [`Effect`](crate::tracker::Effect)
//! implementation wiring both into a [`Tracker`](crate::tracker::Tracker).
//! The constants are empirical; keep them literal.

pub mod cursor;
pub mod parallax;
pub mod scroll;

use crate::capability::Gate;

pub use cursor::{CursorConfig, CursorFollower, CursorFrame, CursorSample};
pub use parallax::{ParallaxConfig, ParallaxEffect};
pub use scroll::{
    DocumentMetrics, ScrollProgress, ScrollProgressEffect, ScrollSample, TimelineConfig,
    TimelineFrame,
};

/// Configuration for all effects of a page.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EffectsConfig {
    /// Cursor follower settings.
    pub cursor: CursorConfig,
    /// Scroll timeline settings.
    pub timeline: TimelineConfig,
    /// Hero parallax settings.
    pub parallax: ParallaxConfig,
}

impl EffectsConfig {
    /// The tuning used on the portfolio page.
    #[must_use]
    pub const fn portfolio() -> Self {
        Self {
            cursor: CursorConfig::portfolio(),
            timeline: TimelineConfig::portfolio(),
            parallax: ParallaxConfig::portfolio(),
        }
    }

    /// Returns the capability gates in
    /// [`EffectKind::ALL`](crate::timing::EffectKind::ALL) order.
    #[must_use]
    pub const fn gates(&self) -> [Gate; 3] {
        [self.cursor.gate, self.timeline.gate, self.parallax.gate]
    }
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self::portfolio()
    }
}
