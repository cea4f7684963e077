// Copyright 2026 the Glide Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `requestAnimationFrame` frame source.
//!
//! [`RafLoop`] hands out one-shot frame requests through
//! [`FrameSource`]. Each callback receives a [`DOMHighResTimeStamp`][mdn]
//! (milliseconds from `performance.now()`), which is converted to
//! microsecond [`HostTime`] ticks.
//!
//! Unlike a free-running animation loop, a `RafLoop` never re-registers
//! itself: the [`Tracker`] that owns it decides after every frame whether
//! another one is needed.
//!
//! [mdn]: https://developer.mozilla.org/en-US/docs/Web/API/DOMHighResTimeStamp
//! [`Tracker`]: glide_core::tracker::Tracker

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::{Cell, RefCell};

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

use glide_core::time::HostTime;
use glide_core::timing::{EffectKind, FrameRequest, FrameSource, FrameTick};

// Direct global bindings instead of `web_sys::Window` methods, so the frame
// path never fetches (and unwraps) the Window object.
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = performance, js_name = "now")]
    pub(crate) fn performance_now() -> f64;

    #[wasm_bindgen(js_name = "requestAnimationFrame")]
    fn request_animation_frame(callback: &JsValue) -> u32;

    #[wasm_bindgen(js_name = "cancelAnimationFrame")]
    fn cancel_animation_frame(id: u32);
}

/// A `requestAnimationFrame` source that emits [`FrameTick`]s for one effect.
///
/// The JS closure is created once in [`new`](Self::new) and reused for every
/// request. Dropping the loop releases it; a request still in flight at that
/// point must have been cancelled by the owner.
pub struct RafLoop {
    inner: Rc<RafInner>,
}

type RafClosure = Closure<dyn FnMut(f64)>;

struct RafInner {
    /// The JS closure registered with `requestAnimationFrame`.
    ///
    /// Kept apart from `callback` so a request issued from inside the
    /// callback only borrows this cell.
    closure: RefCell<Option<RafClosure>>,

    /// Receives one [`FrameTick`] per fired request.
    callback: RefCell<Box<dyn FnMut(FrameTick)>>,

    /// Becomes `FrameTick::frame_index`.
    frame_counter: Cell<u64>,

    effect: EffectKind,
}

impl RafLoop {
    /// Creates a frame source for `effect`.
    ///
    /// Nothing is registered with the browser until
    /// [`request_frame`](FrameSource::request_frame) is called.
    pub fn new(effect: EffectKind, callback: impl FnMut(FrameTick) + 'static) -> Self {
        let inner = Rc::new(RafInner {
            closure: RefCell::new(None),
            callback: RefCell::new(Box::new(callback)),
            frame_counter: Cell::new(0),
            effect,
        });

        let this = Rc::clone(&inner);
        let closure = Closure::wrap(Box::new(move |timestamp_ms: f64| {
            let frame_index = this.frame_counter.get();
            this.frame_counter.set(frame_index + 1);

            let tick = FrameTick {
                now: HostTime::from_millis(timestamp_ms),
                frame_index,
                effect: this.effect,
            };

            // A re-entrant fire cannot happen (rAF callbacks are never
            // nested), but a busy callback must not turn into a panic.
            if let Ok(mut callback) = this.callback.try_borrow_mut() {
                callback(tick);
            }
        }) as Box<dyn FnMut(f64)>);
        *inner.closure.borrow_mut() = Some(closure);

        Self { inner }
    }

    /// Returns the effect this source serves.
    #[must_use]
    pub fn effect(&self) -> EffectKind {
        self.inner.effect
    }

    /// Returns the number of frames delivered so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.inner.frame_counter.get()
    }
}

impl FrameSource for RafLoop {
    fn request_frame(&self) -> FrameRequest {
        match &*self.inner.closure.borrow() {
            Some(closure) => FrameRequest(request_animation_frame(closure.as_ref().unchecked_ref())),
            // Only after drop; the browser never hands out id 0.
            None => FrameRequest(0),
        }
    }

    fn cancel_frame(&self, request: FrameRequest) {
        cancel_animation_frame(request.0);
    }
}

impl Drop for RafLoop {
    fn drop(&mut self) {
        // The closure holds an `Rc` to `inner`; dropping it breaks the cycle.
        self.inner.closure.borrow_mut().take();
    }
}

impl core::fmt::Debug for RafLoop {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RafLoop")
            .field("effect", &self.effect())
            .field("frames", &self.frames())
            .finish_non_exhaustive()
    }
}
