// Copyright 2026 the Glide Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend contract for host integrations.
//!
//! Glide splits host-specific work into *backend* crates. Each backend
//! provides the following pieces:
//!
//! - **Frame source**: Implements [`FrameSource`] over the host's
//!   "before next repaint" API (e.g. `requestAnimationFrame`) and turns each
//!   callback into a [`FrameTick`].
//!
//! - **Input listeners**: Register passive listeners for pointer, scroll and
//!   resize events. Listeners only call
//!   [`Tracker::record`](crate::tracker::Tracker::record); they never touch
//!   the presentation layer.
//!
//! - **Scene readers**: Read fresh layout inputs (document height, bounding
//!   boxes) inside the frame callback.
//!
//! - **Presenter**: Implements [`Presenter`] to write derived values
//!   directly into element styles, bypassing any declarative re-render.
//!
//! - **Capability probe**: Reads viewport width and touch support into
//!   [`Capabilities`](crate::capability::Capabilities) at mount and on
//!   resize.
//!
//! [`FrameSource`]: crate::timing::FrameSource
//! [`FrameTick`]: crate::timing::FrameTick

/// Writes derived values of type `T` into a presentation target.
///
/// A presenter may lose its target at any time (the element was never
/// mounted or was already removed). Writes to a missing target are skipped
/// silently and reported through the return value; they are never retried.
///
/// # Frame loop pseudocode
///
/// ```rust,ignore
/// fn on_frame(tick: FrameTick) {
///     let scene = read_scene();
///     tracker.frame(&tick, scene.as_ref(), &mut presenter, &source, &mut tracer);
/// }
/// ```
pub trait Presenter<T: ?Sized> {
    /// Writes `value` to the target. Returns `false` if the target is gone
    /// and nothing was written.
    fn apply(&mut self, value: &T) -> bool;

    /// Called once when the owning effect instance is torn down.
    fn release(&mut self) {}
}

impl<T: ?Sized, P: Presenter<T> + ?Sized> Presenter<T> for &mut P {
    fn apply(&mut self, value: &T) -> bool {
        (**self).apply(value)
    }

    fn release(&mut self) {
        (**self).release();
    }
}
