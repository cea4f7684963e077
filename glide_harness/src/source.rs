// Copyright 2026 the Glide Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A frame source that fires on command.

use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

use glide_core::timing::{FrameRequest, FrameSource};

/// Hands out sequential [`FrameRequest`]s and fires them when asked.
///
/// Like `requestAnimationFrame`, requests made while a batch fires belong to
/// the next batch.
#[derive(Debug, Default)]
pub struct ManualFrameSource {
    next: Cell<u32>,
    pending: RefCell<Vec<FrameRequest>>,
    cancelled: RefCell<Vec<FrameRequest>>,
    requested: Cell<u64>,
    max_pending: Cell<usize>,
}

impl ManualFrameSource {
    /// Creates a source with nothing pending.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes every pending request, as the browser does at the start of a
    /// frame. The caller runs one callback per returned request.
    pub fn fire(&self) -> Vec<FrameRequest> {
        core::mem::take(&mut *self.pending.borrow_mut())
    }

    /// Returns the requests that have not fired or been cancelled.
    #[must_use]
    pub fn pending(&self) -> Vec<FrameRequest> {
        self.pending.borrow().clone()
    }

    /// Returns `true` if at least one request is waiting.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.pending.borrow().is_empty()
    }

    /// Returns every cancelled request, in order, duplicates included.
    #[must_use]
    pub fn cancelled(&self) -> Vec<FrameRequest> {
        self.cancelled.borrow().clone()
    }

    /// Returns the number of requests ever made.
    #[must_use]
    pub fn requested(&self) -> u64 {
        self.requested.get()
    }

    /// Returns the largest number of requests that were ever pending at once.
    #[must_use]
    pub fn max_pending(&self) -> usize {
        self.max_pending.get()
    }
}

impl FrameSource for ManualFrameSource {
    fn request_frame(&self) -> FrameRequest {
        // Ids start at 1 like the browser's.
        let id = self.next.get().wrapping_add(1);
        self.next.set(id);
        self.requested.set(self.requested.get() + 1);

        let mut pending = self.pending.borrow_mut();
        pending.push(FrameRequest(id));
        self.max_pending.set(self.max_pending.get().max(pending.len()));
        FrameRequest(id)
    }

    fn cancel_frame(&self, request: FrameRequest) {
        self.pending.borrow_mut().retain(|r| *r != request);
        self.cancelled.borrow_mut().push(request);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_are_sequential_and_fire_once() {
        let src = ManualFrameSource::new();
        let a = src.request_frame();
        let b = src.request_frame();
        assert_eq!((a, b), (FrameRequest(1), FrameRequest(2)));
        assert_eq!(src.max_pending(), 2);

        assert_eq!(src.fire(), [a, b]);
        assert!(src.fire().is_empty(), "a request fires only once");
        assert_eq!(src.requested(), 2);
    }

    #[test]
    fn cancel_removes_from_pending() {
        let src = ManualFrameSource::new();
        let a = src.request_frame();
        src.cancel_frame(a);
        assert!(!src.has_pending());
        assert_eq!(src.cancelled(), [a]);
        assert!(src.fire().is_empty());
    }
}
