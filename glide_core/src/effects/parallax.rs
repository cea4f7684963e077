// Copyright 2026 the Glide Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mouse parallax on the hero image.
//!
//! The image shifts by a small fraction of the pointer's distance from the
//! center of the hero section. Frames run only while the pointer moves.

use kurbo::{Point, Rect, Vec2};

use crate::capability::Gate;
use crate::timing::{DriveMode, EffectKind};
use crate::tracker::Effect;

/// Tuning for [`ParallaxEffect`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParallaxConfig {
    /// Pixels of displacement per pixel of pointer distance from center.
    pub sensitivity: f64,
    /// When the effect runs at all.
    pub gate: Gate,
}

impl ParallaxConfig {
    /// The tuning used on the portfolio page.
    #[must_use]
    pub const fn portfolio() -> Self {
        Self {
            sensitivity: 0.01,
            gate: Gate::PARALLAX,
        }
    }
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self::portfolio()
    }
}

/// `(pointer - center(bounds)) * sensitivity`.
#[inline]
#[must_use]
pub fn parallax_offset(pointer: Point, bounds: Rect, sensitivity: f64) -> Vec2 {
    (pointer - bounds.center()) * sensitivity
}

/// Parallax derivation.
///
/// Input is the pointer position; the scene is the container's bounding box,
/// read fresh in the frame since the section scrolls and resizes.
#[derive(Clone, Copy, Debug)]
pub struct ParallaxEffect {
    config: ParallaxConfig,
}

impl ParallaxEffect {
    /// Creates the effect.
    #[must_use]
    pub const fn new(config: ParallaxConfig) -> Self {
        Self { config }
    }
}

impl Effect for ParallaxEffect {
    type Input = Point;
    type Scene = Rect;
    type Output = Vec2;

    const KIND: EffectKind = EffectKind::Parallax;
    const MODE: DriveMode = DriveMode::OnDemand;

    fn derive(&mut self, input: Option<Point>, bounds: &Rect) -> Option<Vec2> {
        input.map(|p| parallax_offset(p, *bounds, self.config.sensitivity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HERO: Rect = Rect::new(0.0, 80.0, 1200.0, 880.0);

    #[test]
    fn center_is_at_rest() {
        let v = parallax_offset(Point::new(600.0, 480.0), HERO, 0.01);
        assert_eq!(v, Vec2::ZERO);
    }

    #[test]
    fn offset_points_toward_pointer() {
        let v = parallax_offset(Point::new(1100.0, 80.0), HERO, 0.01);
        assert!((v.x - 5.0).abs() < 1e-12, "{v:?}");
        assert!((v.y + 4.0).abs() < 1e-12, "{v:?}");
    }

    #[test]
    fn displacement_stays_within_a_few_pixels() {
        let mut fx = ParallaxEffect::new(ParallaxConfig::portfolio());
        for corner in [HERO.origin(), Point::new(HERO.x1, HERO.y1)] {
            let v = fx.derive(Some(corner), &HERO).unwrap();
            assert!(v.x.abs() < 6.5 && v.y.abs() < 4.5, "{v:?}");
        }
        assert_eq!(fx.derive(None, &HERO), None);
    }
}
