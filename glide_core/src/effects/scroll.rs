// Copyright 2026 the Glide Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll-linked vertical timeline.
//!
//! The progress ratio is the scroll offset over the scrollable range,
//! clamped to `[0, 1]`. Document height is part of the [`DocumentMetrics`]
//! the host reads fresh in every frame, because content keeps reflowing
//! (images loading, responsive layout) while the user scrolls.

use crate::capability::Gate;
use crate::timing::{DriveMode, EffectKind};
use crate::tracker::Effect;

/// Raw scroll input.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollSample {
    /// Vertical scroll offset in CSS pixels.
    pub offset: f64,
}

/// Layout read in the frame callback.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DocumentMetrics {
    /// Total document height (`scrollHeight`).
    pub scroll_height: f64,
    /// Viewport height (`innerHeight`).
    pub viewport_height: f64,
}

impl DocumentMetrics {
    /// Largest reachable scroll offset; may be zero or negative for short
    /// documents.
    #[must_use]
    pub fn scrollable(&self) -> f64 {
        self.scroll_height - self.viewport_height
    }
}

/// Scroll progress ratio, always within `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
pub struct ScrollProgress(f64);

impl ScrollProgress {
    /// At the top.
    pub const START: Self = Self(0.0);
    /// At (or past) the bottom.
    pub const END: Self = Self(1.0);

    /// Clamps `ratio` into `[0, 1]`; non-finite input maps to `0`.
    #[must_use]
    pub fn new(ratio: f64) -> Self {
        if ratio.is_finite() {
            Self(ratio.clamp(0.0, 1.0))
        } else {
            Self::START
        }
    }

    /// Returns the ratio.
    #[must_use]
    pub const fn ratio(self) -> f64 {
        self.0
    }
}

/// `clamp(offset / (scroll_height - viewport_height), 0, 1)`.
///
/// A document that does not scroll (non-positive range) reports `0`, never
/// `NaN` or infinity.
#[must_use]
pub fn scroll_ratio(offset: f64, metrics: &DocumentMetrics) -> ScrollProgress {
    let range = metrics.scrollable();
    if range.is_finite() && range > 0.0 {
        ScrollProgress::new(offset / range)
    } else {
        ScrollProgress::START
    }
}

/// Tuning for the timeline indicator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimelineConfig {
    /// Dot travel starts this far below the viewport top.
    pub inset_top: f64,
    /// Dot travel ends this far above the viewport bottom.
    pub inset_bottom: f64,
    /// Dot opacity at the top.
    pub base_opacity: f64,
    /// Opacity added at full progress.
    pub opacity_gain: f64,
    /// Offset changes smaller than this (in pixels) do not cause a write.
    pub min_delta: f64,
    /// When the effect runs at all.
    pub gate: Gate,
}

impl TimelineConfig {
    /// The tuning used on the portfolio page.
    #[must_use]
    pub const fn portfolio() -> Self {
        Self {
            inset_top: 96.0,
            inset_bottom: 96.0,
            base_opacity: 0.3,
            opacity_gain: 0.4,
            min_delta: 2.0,
            gate: Gate::TIMELINE,
        }
    }
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self::portfolio()
    }
}

/// Presentation values for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimelineFrame {
    /// Progress bar fill (`scaleY`).
    pub progress: ScrollProgress,
    /// Dot offset from the viewport top, in pixels (`translateY`).
    pub dot_y: f64,
    /// Dot opacity.
    pub dot_opacity: f64,
}

impl TimelineConfig {
    /// Lays out the bar and dot for `progress` in a viewport of the given
    /// height.
    #[must_use]
    pub fn layout(&self, progress: ScrollProgress, viewport_height: f64) -> TimelineFrame {
        let travel = (viewport_height - self.inset_top - self.inset_bottom).max(0.0);
        let p = progress.ratio();
        TimelineFrame {
            progress,
            dot_y: self.inset_top + travel * p,
            dot_opacity: self.base_opacity + p * self.opacity_gain,
        }
    }
}

/// Scroll timeline derivation state.
#[derive(Clone, Copy, Debug)]
pub struct ScrollProgressEffect {
    config: TimelineConfig,
    last_offset: Option<f64>,
}

impl ScrollProgressEffect {
    /// Creates the effect; the first frame always writes.
    #[must_use]
    pub const fn new(config: TimelineConfig) -> Self {
        Self {
            config,
            last_offset: None,
        }
    }

    /// Offset of the last write, if any.
    #[must_use]
    pub const fn last_offset(&self) -> Option<f64> {
        self.last_offset
    }
}

impl Effect for ScrollProgressEffect {
    type Input = ScrollSample;
    type Scene = DocumentMetrics;
    type Output = TimelineFrame;

    const KIND: EffectKind = EffectKind::ScrollProgress;
    const MODE: DriveMode = DriveMode::OnDemand;

    fn derive(
        &mut self,
        input: Option<ScrollSample>,
        metrics: &DocumentMetrics,
    ) -> Option<TimelineFrame> {
        let offset = input?.offset;
        if let Some(last) = self.last_offset
            && (offset - last).abs() < self.config.min_delta
        {
            return None;
        }
        self.last_offset = Some(offset);
        let progress = scroll_ratio(offset, metrics);
        Some(self.config.layout(progress, metrics.viewport_height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 2000 px of scrollable range.
    const PAGE: DocumentMetrics = DocumentMetrics {
        scroll_height: 2800.0,
        viewport_height: 800.0,
    };

    #[test]
    fn ratio_at_known_offsets() {
        assert_eq!(scroll_ratio(0.0, &PAGE).ratio(), 0.0);
        assert_eq!(scroll_ratio(1000.0, &PAGE).ratio(), 0.5);
        assert_eq!(scroll_ratio(3000.0, &PAGE).ratio(), 1.0, "clamped past the end");
        assert_eq!(scroll_ratio(-50.0, &PAGE).ratio(), 0.0, "overscroll bounce");
    }

    #[test]
    fn short_documents_report_zero() {
        for (scroll_height, viewport_height) in [(800.0, 800.0), (600.0, 800.0), (0.0, 0.0)] {
            let m = DocumentMetrics {
                scroll_height,
                viewport_height,
            };
            for offset in [0.0, 10.0, -10.0, 1e9] {
                let r = scroll_ratio(offset, &m).ratio();
                assert_eq!(r, 0.0, "{m:?} offset={offset}");
            }
        }
    }

    #[test]
    fn ratio_always_in_unit_interval() {
        let heights = [0.0, 1.0, 799.0, 800.0, 801.0, 5000.0, f64::INFINITY, f64::NAN];
        let offsets = [-1e6, -1.0, 0.0, 0.5, 400.0, 4200.0, 1e12, f64::NAN, f64::INFINITY];
        for h in heights {
            for s in offsets {
                let m = DocumentMetrics {
                    scroll_height: h,
                    viewport_height: 800.0,
                };
                let r = scroll_ratio(s, &m).ratio();
                assert!((0.0..=1.0).contains(&r), "h={h} s={s} -> {r}");
            }
        }
    }

    #[test]
    fn document_growth_mid_scroll_stays_clamped() {
        let mut fx = ScrollProgressEffect::new(TimelineConfig::portfolio());
        let at_end = fx.derive(Some(ScrollSample { offset: 2000.0 }), &PAGE).unwrap();
        assert_eq!(at_end.progress, ScrollProgress::END);

        // Content collapses: same offset now exceeds the range.
        let shrunk = DocumentMetrics {
            scroll_height: 1800.0,
            viewport_height: 800.0,
        };
        let frame = fx.derive(Some(ScrollSample { offset: 2100.0 }), &shrunk).unwrap();
        assert_eq!(frame.progress, ScrollProgress::END);
    }

    #[test]
    fn dot_travels_between_insets() {
        let cfg = TimelineConfig::portfolio();
        let top = cfg.layout(ScrollProgress::START, 800.0);
        assert_eq!(top.dot_y, 96.0);
        assert!((top.dot_opacity - 0.3).abs() < 1e-12);

        let bottom = cfg.layout(ScrollProgress::END, 800.0);
        assert_eq!(bottom.dot_y, 800.0 - 96.0);
        assert!((bottom.dot_opacity - 0.7).abs() < 1e-12);

        let tiny = cfg.layout(ScrollProgress::END, 100.0);
        assert_eq!(tiny.dot_y, 96.0, "no negative travel");
    }

    #[test]
    fn small_scroll_deltas_skip_the_write() {
        let mut fx = ScrollProgressEffect::new(TimelineConfig::portfolio());
        assert!(fx.derive(Some(ScrollSample { offset: 0.0 }), &PAGE).is_some(), "first write");
        assert!(fx.derive(Some(ScrollSample { offset: 1.5 }), &PAGE).is_none());
        assert!(fx.derive(Some(ScrollSample { offset: 2.0 }), &PAGE).is_some());
        assert_eq!(fx.last_offset(), Some(2.0));
        assert!(fx.derive(None, &PAGE).is_none(), "nothing recorded");
    }
}
