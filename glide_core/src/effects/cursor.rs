// Copyright 2026 the Glide Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trailing custom cursor.
//!
//! The follower chases the pointer with a first-order low-pass filter,
//! `next = prev + (raw - prev) * k`, evaluated once per frame. It stays
//! hidden until the first pointer move and grows while hovering links and
//! buttons.

use kurbo::Point;

use crate::capability::Gate;
use crate::timing::{DriveMode, EffectKind};
use crate::tracker::Effect;

/// Tuning for [`CursorFollower`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CursorConfig {
    /// Fraction of the remaining distance covered per frame, in `(0, 1)`.
    pub smoothing: f64,
    /// Where the follower rests before the first pointer move (off screen).
    pub origin: Point,
    /// Opacity once the pointer has moved.
    pub visible_opacity: f64,
    /// Scale while hovering an interactive element.
    pub hover_scale: f64,
    /// When the effect runs at all.
    pub gate: Gate,
}

impl CursorConfig {
    /// The tuning used on the portfolio page.
    #[must_use]
    pub const fn portfolio() -> Self {
        Self {
            smoothing: 0.12,
            origin: Point::new(-100.0, -100.0),
            visible_opacity: 0.4,
            hover_scale: 1.3,
            gate: Gate::CURSOR,
        }
    }
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self::portfolio()
    }
}

/// Raw cursor input.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CursorSample {
    /// Pointer position in viewport coordinates.
    pub position: Point,
    /// Whether the pointer is over a link or button.
    pub hovering: bool,
}

/// Presentation values for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CursorFrame {
    /// Smoothed position (the element's `left`/`top`).
    pub position: Point,
    /// `0` before the first pointer move.
    pub opacity: f64,
    /// `1` at rest, larger while hovering.
    pub scale: f64,
}

/// One low-pass step from `prev` toward `target`.
///
/// For `k` in `(0, 1)` the result is strictly closer to `target` than `prev`
/// on each axis that differs, and never passes it.
#[inline]
#[must_use]
pub fn follow(prev: Point, target: Point, k: f64) -> Point {
    prev + (target - prev) * k
}

/// Smoothed cursor state.
#[derive(Clone, Copy, Debug)]
pub struct CursorFollower {
    config: CursorConfig,
    position: Point,
}

impl CursorFollower {
    /// Creates a follower resting at the configured origin.
    #[must_use]
    pub const fn new(config: CursorConfig) -> Self {
        Self {
            position: config.origin,
            config,
        }
    }

    /// Returns the current smoothed position.
    #[must_use]
    pub const fn position(&self) -> Point {
        self.position
    }
}

impl Effect for CursorFollower {
    type Input = CursorSample;
    type Scene = ();
    type Output = CursorFrame;

    const KIND: EffectKind = EffectKind::Cursor;
    const MODE: DriveMode = DriveMode::Continuous;

    fn derive(&mut self, input: Option<CursorSample>, _: &()) -> Option<CursorFrame> {
        let target = input.map_or(self.config.origin, |s| s.position);
        self.position = follow(self.position, target, self.config.smoothing);
        let (opacity, scale) = match input {
            None => (0.0, 1.0),
            Some(s) if s.hovering => (self.config.visible_opacity, self.config.hover_scale),
            Some(_) => (self.config.visible_opacity, 1.0),
        };
        Some(CursorFrame {
            position: self.position,
            opacity,
            scale,
        })
    }
}
