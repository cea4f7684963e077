// Copyright 2026 the Glide Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser backend for glide.
//!
//! This crate wires `glide_core` trackers to browser APIs:
//!
//! - [`RafLoop`]: one-shot `requestAnimationFrame` frame source
//! - [`Listener`]: passive DOM event listener, removed on drop
//! - [`CursorPresenter`], [`TimelinePresenter`], [`ParallaxPresenter`]:
//!   direct inline style writes
//! - [`EffectHandle`]: one mounted effect instance
//! - [`EffectSet`]: all effects of a page, gated on viewport width and touch
//!   support and re-checked on every resize
//! - [`ConsoleSink`]: trace events to `console.info`/`console.debug`
//!
//! ```ignore
//! let window = web_sys::window().ok_or("no window")?;
//! let targets = EffectTargets { cursor: Some(cursor_el), ..Default::default() };
//! let effects = EffectSet::mount(window, targets, EffectsConfig::portfolio(), None)?;
//! ```

#![no_std]

extern crate alloc;

mod console;
pub mod host;
mod listener;
mod mount;
mod presenter;
mod raf;
mod set;

pub use console::ConsoleSink;
pub use glide_core::backend::Presenter;
pub use listener::Listener;
pub use mount::{EffectHandle, SharedSink};
pub use presenter::{CursorPresenter, ParallaxPresenter, TimelinePresenter};
pub use raf::RafLoop;
pub use set::{
    CursorHandle, EffectSet, EffectTargets, ParallaxHandle, TimelineHandle, mount_cursor,
    mount_parallax, mount_timeline,
};

use glide_core::time::{HostTime, Timebase};

/// Returns the current host time from `performance.now()`.
///
/// The returned [`HostTime`] is in microsecond ticks. Use [`timebase`] to
/// convert to nanoseconds.
#[must_use]
pub fn now() -> HostTime {
    HostTime::from_millis(raf::performance_now())
}

/// Returns the web [`Timebase`]: 1 tick = 1 µs = 1000 ns.
#[must_use]
pub fn timebase() -> Timebase {
    Timebase::MICROS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timebase_is_microsecond() {
        let tb = timebase();
        assert_eq!(tb.ticks_to_nanos(1), 1000);
        assert_eq!(tb.ticks_to_nanos(1_000_000), 1_000_000_000);
    }

    #[test]
    fn raf_timestamps_become_microsecond_ticks() {
        // A 60 Hz frame interval in DOMHighResTimeStamp milliseconds.
        let a = HostTime::from_millis(1000.0);
        let b = HostTime::from_millis(1016.5);
        assert_eq!((b - a).ticks(), 16_500);
        assert_eq!((b - a).to_nanos(timebase()), 16_500_000);
    }
}
