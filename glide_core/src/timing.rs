// Copyright 2026 the Glide Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame timing types shared between hosts and trackers.
//!
//! - [`EffectKind`]: which effect instance a tick or event belongs to
//! - [`FrameTick`]: a frame opportunity delivered by the host
//! - [`FrameRequest`]: opaque handle of a pending frame request
//! - [`FrameSource`]: the host's "call me before the next repaint" API
//! - [`DriveMode`]: whether an effect animates continuously or on input
//!
//! # Data flow
//!
//! 1. An input listener records a sample into a
//!    [`Tracker`](crate::tracker::Tracker). On-demand effects request a frame
//!    from the [`FrameSource`] at this point.
//! 2. The host fires the frame callback and builds a [`FrameTick`] from its
//!    timestamp.
//! 3. [`Tracker::frame()`](crate::tracker::Tracker::frame) derives the new
//!    value, writes it through a [`Presenter`](crate::backend::Presenter)
//!    and, for continuous effects, requests the next frame.

use core::fmt;

use crate::time::HostTime;

/// Identifies one of the frame-synchronized effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EffectKind {
    /// Trailing custom cursor.
    Cursor,
    /// Scroll-linked vertical timeline indicator.
    ScrollProgress,
    /// Mouse parallax on the hero image.
    Parallax,
}

impl EffectKind {
    /// All effect kinds, in mount order.
    pub const ALL: [Self; 3] = [Self::Cursor, Self::ScrollProgress, Self::Parallax];

    /// Returns a short label for logs and trace output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cursor => "cursor",
            Self::ScrollProgress => "scroll-progress",
            Self::Parallax => "parallax",
        }
    }

    /// Index into per-effect arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Cursor => 0,
            Self::ScrollProgress => 1,
            Self::Parallax => 2,
        }
    }
}

/// How a tracker schedules its frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DriveMode {
    /// Request the next frame at the end of every frame, whether or not new
    /// input arrived. Used by effects that keep animating toward a target.
    Continuous,
    /// Request a frame only when input is recorded and none is pending. The
    /// effect goes quiet while the input is stationary.
    OnDemand,
}

/// A frame opportunity delivered by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameTick {
    /// Host time of the frame callback.
    pub now: HostTime,
    /// Monotonically increasing per-instance frame counter.
    pub frame_index: u64,
    /// Which effect instance this tick drives.
    pub effect: EffectKind,
}

/// Handle of a pending frame request, assigned by the [`FrameSource`].
///
/// Core code never interprets the value; it only hands it back to
/// [`FrameSource::cancel_frame`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameRequest(pub u32);

impl fmt::Debug for FrameRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FrameRequest({})", self.0)
    }
}

/// The host's frame-timing API.
///
/// Implemented over `requestAnimationFrame` by the web backend and by a
/// manual, test-driven source in `glide_harness`. Each request results in at
/// most one callback; which callback fires is fixed when the source is built,
/// so requests carry no payload.
pub trait FrameSource {
    /// Requests one callback before the next repaint.
    fn request_frame(&self) -> FrameRequest;

    /// Cancels a request previously returned by
    /// [`request_frame`](Self::request_frame).
    fn cancel_frame(&self, request: FrameRequest);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effect_indices_are_dense() {
        for (i, kind) in EffectKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i, "{kind:?} index");
        }
    }

    #[test]
    fn labels_are_distinct() {
        assert_ne!(EffectKind::Cursor.as_str(), EffectKind::Parallax.as_str());
        assert_eq!(EffectKind::ScrollProgress.as_str(), "scroll-progress");
    }
}
