// Copyright 2026 the Glide Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic headless host for glide effects.
//!
//! Everything a browser would provide is simulated in memory:
//!
//! - [`ManualFrameSource`]: frame requests that fire only when the test says
//!   so, with cancellation bookkeeping.
//! - [`RecordingPresenter`]: keeps every value written instead of styling an
//!   element.
//! - [`HeadlessPage`]: the three effects of a page behind a
//!   [`Gatekeeper`](glide_core::capability::Gatekeeper), driven by pointer,
//!   scroll and resize calls and a fixed 60 Hz clock.

#![no_std]

extern crate alloc;

mod page;
mod presenter;
mod source;

pub use page::{FRAME_INTERVAL, FrameReport, HeadlessPage, Mounted};
pub use presenter::RecordingPresenter;
pub use source::ManualFrameSource;
