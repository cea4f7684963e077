// Copyright 2026 the Glide Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A presenter that records instead of drawing.

use alloc::vec::Vec;

use glide_core::backend::Presenter;

/// Keeps every value written to it.
///
/// A detached presenter behaves like a missing DOM element: writes are
/// refused and nothing is recorded.
#[derive(Clone, Debug)]
pub struct RecordingPresenter<T> {
    writes: Vec<T>,
    attached: bool,
    releases: u32,
}

impl<T> Default for RecordingPresenter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RecordingPresenter<T> {
    /// Creates an attached presenter.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            writes: Vec::new(),
            attached: true,
            releases: 0,
        }
    }

    /// Creates a presenter whose target does not exist.
    #[must_use]
    pub const fn detached() -> Self {
        Self {
            writes: Vec::new(),
            attached: false,
            releases: 0,
        }
    }

    /// Attaches or detaches the target.
    pub fn set_attached(&mut self, attached: bool) {
        self.attached = attached;
    }

    /// Returns every recorded write, oldest first.
    #[must_use]
    pub fn writes(&self) -> &[T] {
        &self.writes
    }

    /// Returns the most recent write.
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.writes.last()
    }

    /// Returns how often [`release`](Presenter::release) was called.
    #[must_use]
    pub fn releases(&self) -> u32 {
        self.releases
    }
}

impl<T: Clone> Presenter<T> for RecordingPresenter<T> {
    fn apply(&mut self, value: &T) -> bool {
        if !self.attached {
            return false;
        }
        self.writes.push(value.clone());
        true
    }

    fn release(&mut self) {
        self.releases += 1;
        self.attached = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detached_target_refuses_writes() {
        let mut p = RecordingPresenter::<u8>::detached();
        assert!(!p.apply(&1));
        assert!(p.writes().is_empty());

        p.set_attached(true);
        assert!(p.apply(&2));
        assert_eq!(p.last(), Some(&2));
    }

    #[test]
    fn release_counts_and_detaches() {
        let mut p = RecordingPresenter::<u8>::new();
        assert!(p.apply(&1));
        p.release();
        assert_eq!(p.releases(), 1);
        assert!(!p.apply(&3), "released target takes no writes");
        assert_eq!(p.writes(), [1]);
    }
}
