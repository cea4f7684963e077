// Copyright 2026 the Glide Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pending-frame bookkeeping for one effect instance.
//!
//! The [`FrameScheduler`] guarantees that at most one frame request is in
//! flight per effect instance, and that tearing an instance down cancels that
//! request exactly once. It does not know what a frame computes; see
//! [`Tracker`](crate::tracker::Tracker) for that.

use crate::timing::{DriveMode, FrameRequest, FrameSource};

/// Per-instance tracker state.
///
/// ```text
/// Idle --(input recorded)--> Sampled --(frame fires)--> Idle
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum TrackerState {
    /// No unread input.
    #[default]
    Idle,
    /// Input recorded since the last frame.
    Sampled,
}

/// Frame request bookkeeping with duplicate suppression and idempotent
/// teardown.
///
/// # Usage
///
/// ```rust,ignore
/// // Input path:
/// scheduler.mark_sampled();
/// scheduler.request(&source);
///
/// // Frame callback:
/// if scheduler.begin_frame() {
///     // derive + write ...
///     scheduler.end_frame(&source);
/// }
///
/// // Unmount:
/// scheduler.teardown(&source);
/// ```
#[derive(Debug)]
pub struct FrameScheduler {
    mode: DriveMode,
    pending: Option<FrameRequest>,
    state: TrackerState,
    torn_down: bool,
}

impl FrameScheduler {
    /// Creates an idle scheduler with nothing pending.
    #[must_use]
    pub const fn new(mode: DriveMode) -> Self {
        Self {
            mode,
            pending: None,
            state: TrackerState::Idle,
            torn_down: false,
        }
    }

    /// Returns the drive mode.
    #[must_use]
    pub const fn mode(&self) -> DriveMode {
        self.mode
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> TrackerState {
        self.state
    }

    /// Returns the pending request, if any.
    #[must_use]
    pub const fn pending(&self) -> Option<FrameRequest> {
        self.pending
    }

    /// Returns `true` once [`teardown`](Self::teardown) has run.
    #[must_use]
    pub const fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Moves to [`TrackerState::Sampled`]. Ignored after teardown.
    pub fn mark_sampled(&mut self) {
        if !self.torn_down {
            self.state = TrackerState::Sampled;
        }
    }

    /// Requests a frame from `source` unless one is already pending.
    ///
    /// Returns `true` if a new request was issued. A request while one is
    /// pending, or after teardown, is a no-op.
    pub fn request(&mut self, source: &dyn FrameSource) -> bool {
        if self.torn_down || self.pending.is_some() {
            return false;
        }
        self.pending = Some(source.request_frame());
        true
    }

    /// Called at the top of the frame callback.
    ///
    /// Clears the pending handle, since the request it names has now fired.
    /// Returns `false` if the instance was torn down and the frame must not
    /// touch the presentation target.
    pub fn begin_frame(&mut self) -> bool {
        self.pending = None;
        !self.torn_down
    }

    /// Called at the end of the frame callback.
    ///
    /// Returns to [`TrackerState::Idle`] and, in
    /// [`DriveMode::Continuous`], requests the next frame.
    pub fn end_frame(&mut self, source: &dyn FrameSource) {
        self.state = TrackerState::Idle;
        if self.mode == DriveMode::Continuous {
            self.request(source);
        }
    }

    /// Cancels the pending request, if any. Cancelling with nothing pending
    /// is a no-op.
    pub fn cancel(&mut self, source: &dyn FrameSource) {
        if let Some(request) = self.pending.take() {
            source.cancel_frame(request);
        }
    }

    /// Cancels any pending request and refuses all further scheduling.
    ///
    /// Returns `true` the first time; later calls do nothing and return
    /// `false`.
    pub fn teardown(&mut self, source: &dyn FrameSource) -> bool {
        if self.torn_down {
            return false;
        }
        self.cancel(source);
        self.torn_down = true;
        self.state = TrackerState::Idle;
        true
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;
    use core::cell::{Cell, RefCell};

    use super::*;

    #[derive(Default)]
    struct CountingSource {
        next: Cell<u32>,
        cancelled: RefCell<Vec<FrameRequest>>,
    }

    impl FrameSource for CountingSource {
        fn request_frame(&self) -> FrameRequest {
            let id = self.next.get() + 1;
            self.next.set(id);
            FrameRequest(id)
        }

        fn cancel_frame(&self, request: FrameRequest) {
            self.cancelled.borrow_mut().push(request);
        }
    }

    #[test]
    fn duplicate_request_is_noop() {
        let src = CountingSource::default();
        let mut s = FrameScheduler::new(DriveMode::OnDemand);
        assert!(s.request(&src));
        assert!(!s.request(&src), "second request while pending");
        assert_eq!(src.next.get(), 1, "only one request reached the source");
        assert_eq!(s.pending(), Some(FrameRequest(1)));
    }

    #[test]
    fn on_demand_does_not_reschedule() {
        let src = CountingSource::default();
        let mut s = FrameScheduler::new(DriveMode::OnDemand);
        s.mark_sampled();
        s.request(&src);
        assert_eq!(s.state(), TrackerState::Sampled);
        assert!(s.begin_frame());
        s.end_frame(&src);
        assert_eq!(s.state(), TrackerState::Idle);
        assert_eq!(s.pending(), None, "on-demand goes quiet after a frame");
    }

    #[test]
    fn continuous_reschedules_after_each_frame() {
        let src = CountingSource::default();
        let mut s = FrameScheduler::new(DriveMode::Continuous);
        s.request(&src);
        for expected in 2..5 {
            assert!(s.begin_frame());
            assert_eq!(s.pending(), None, "handle cleared before derive");
            s.end_frame(&src);
            assert_eq!(s.pending(), Some(FrameRequest(expected)));
        }
    }

    #[test]
    fn teardown_twice_cancels_once() {
        let src = CountingSource::default();
        let mut s = FrameScheduler::new(DriveMode::Continuous);
        s.request(&src);
        assert!(s.teardown(&src));
        assert!(!s.teardown(&src), "second teardown is a no-op");
        assert_eq!(&*src.cancelled.borrow(), &[FrameRequest(1)]);
        assert!(!s.request(&src), "no scheduling after teardown");
        assert!(!s.begin_frame(), "late frames are skipped");
    }

    #[test]
    fn cancel_without_pending_is_noop() {
        let src = CountingSource::default();
        let mut s = FrameScheduler::new(DriveMode::OnDemand);
        s.cancel(&src);
        assert!(s.teardown(&src));
        assert!(src.cancelled.borrow().is_empty());
    }
}
