// Copyright 2026 the Glide Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-slot input sampling.

/// Holds the most recent raw input value.
///
/// Input listeners call [`record`](Self::record) on every native event; the
/// frame callback reads the slot once per frame. Older unread values are
/// overwritten: only the latest sample matters, so there is no queue and no
/// backpressure.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Sampler<T> {
    latest: Option<T>,
    fresh: bool,
}

impl<T: Copy> Sampler<T> {
    /// Creates an empty sampler.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            latest: None,
            fresh: false,
        }
    }

    /// Creates a sampler that already holds `value`, marked fresh.
    #[must_use]
    pub const fn seeded(value: T) -> Self {
        Self {
            latest: Some(value),
            fresh: true,
        }
    }

    /// Stores `value`, replacing any prior sample.
    #[inline]
    pub fn record(&mut self, value: T) {
        self.latest = Some(value);
        self.fresh = true;
    }

    /// Returns the last recorded value, read or not.
    #[inline]
    #[must_use]
    pub fn latest(&self) -> Option<T> {
        self.latest
    }

    /// Returns the last recorded value if it arrived since the previous
    /// `take_fresh`, and marks it read.
    #[inline]
    pub fn take_fresh(&mut self) -> Option<T> {
        if core::mem::take(&mut self.fresh) {
            self.latest
        } else {
            None
        }
    }

    /// Returns `true` if a value was recorded since it was last taken.
    #[inline]
    #[must_use]
    pub fn is_fresh(&self) -> bool {
        self.fresh
    }

    /// Forgets the stored value.
    pub fn clear(&mut self) {
        self.latest = None;
        self.fresh = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_overwrites_unread_value() {
        let mut s = Sampler::new();
        s.record(1);
        s.record(2);
        s.record(3);
        assert_eq!(s.take_fresh(), Some(3), "only the latest sample survives");
        assert_eq!(s.take_fresh(), None, "taken samples are no longer fresh");
        assert_eq!(s.latest(), Some(3), "latest stays readable");
    }

    #[test]
    fn empty_sampler_has_nothing() {
        let mut s = Sampler::<f64>::new();
        assert_eq!(s.latest(), None);
        assert!(!s.is_fresh());
        assert_eq!(s.take_fresh(), None);
    }

    #[test]
    fn seeded_sampler_is_fresh() {
        let mut s = Sampler::seeded(7_u8);
        assert!(s.is_fresh());
        assert_eq!(s.take_fresh(), Some(7));
        s.clear();
        assert_eq!(s.latest(), None);
    }
}
