// Copyright 2026 the Glide Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One mounted effect: tracker, presenter, frame source and listeners.

use alloc::boxed::Box;
use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::RefCell;

use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget};

use glide_core::backend::Presenter;
use glide_core::timing::FrameTick;
use glide_core::trace::{TraceSink, Tracer};
use glide_core::tracker::{Effect, Tracker};

use crate::listener::Listener;
use crate::raf::RafLoop;

/// A trace sink shared by every instance of a page.
pub type SharedSink = Rc<RefCell<dyn TraceSink>>;

/// Runs `f` with a tracer over `sink`, or a silent one if the sink is absent
/// or already borrowed.
pub(crate) fn with_tracer<R>(sink: Option<&SharedSink>, f: impl FnOnce(&mut Tracer<'_>) -> R) -> R {
    match sink.map(|s| s.try_borrow_mut()) {
        Some(Ok(mut sink)) => f(&mut Tracer::new(&mut *sink)),
        _ => f(&mut Tracer::none()),
    }
}

struct Instance<E, P>
where
    E: Effect,
    E::Scene: Sized,
{
    tracker: RefCell<Tracker<E>>,
    presenter: RefCell<P>,
    scene: Box<dyn Fn() -> Option<E::Scene>>,
    raf: RafLoop,
    sink: Option<SharedSink>,
}

impl<E, P> Instance<E, P>
where
    E: Effect,
    E::Scene: Sized,
    P: Presenter<E::Output>,
{
    fn record(&self, input: E::Input) {
        // Lossy by contract: a sample arriving while the tracker is busy is
        // superseded by the next one anyway.
        let Ok(mut tracker) = self.tracker.try_borrow_mut() else {
            return;
        };
        with_tracer(self.sink.as_ref(), |tracer| {
            tracker.record(input, &self.raf, tracer);
        });
    }

    fn frame(&self, tick: &FrameTick) {
        let scene = (self.scene)();
        let (Ok(mut tracker), Ok(mut presenter)) =
            (self.tracker.try_borrow_mut(), self.presenter.try_borrow_mut())
        else {
            return;
        };
        with_tracer(self.sink.as_ref(), |tracer| {
            tracker.frame(tick, scene.as_ref(), &mut *presenter, &self.raf, tracer);
        });
    }
}

/// A mounted effect instance.
///
/// Owns its listeners and its share of the instance state. Dropping the
/// handle tears the instance down.
pub struct EffectHandle<E, P>
where
    E: Effect,
    E::Scene: Sized,
    P: Presenter<E::Output>,
{
    instance: Rc<Instance<E, P>>,
    listeners: Vec<Listener>,
}

impl<E, P> core::fmt::Debug for EffectHandle<E, P>
where
    E: Effect,
    E::Scene: Sized,
    P: Presenter<E::Output>,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EffectHandle")
            .field("kind", &E::KIND)
            .field("listeners", &self.listeners)
            .field("raf", &self.instance.raf)
            .finish_non_exhaustive()
    }
}

impl<E, P> EffectHandle<E, P>
where
    E: Effect + 'static,
    E::Scene: Sized,
    P: Presenter<E::Output> + 'static,
{
    /// Wires `tracker` to a fresh [`RafLoop`] and `presenter`.
    ///
    /// `scene` is called at the start of every frame to read layout; `None`
    /// skips the write. Nothing runs until [`start`](Self::start).
    pub fn new(
        tracker: Tracker<E>,
        presenter: P,
        scene: impl Fn() -> Option<E::Scene> + 'static,
        sink: Option<SharedSink>,
    ) -> Self {
        let instance = Rc::new_cyclic(|weak: &Weak<Instance<E, P>>| {
            let weak = weak.clone();
            Instance {
                tracker: RefCell::new(tracker),
                presenter: RefCell::new(presenter),
                scene: Box::new(scene),
                raf: RafLoop::new(E::KIND, move |tick| {
                    if let Some(instance) = weak.upgrade() {
                        instance.frame(&tick);
                    }
                }),
                sink,
            }
        });
        Self {
            instance,
            listeners: Vec::new(),
        }
    }

    /// Records whatever `sample` extracts from each `event` on `target`.
    ///
    /// `sample` also receives the previous sample, for inputs that carry
    /// state across events.
    ///
    /// # Errors
    ///
    /// Returns the exception thrown by `addEventListener`.
    pub fn listen(
        &mut self,
        target: &EventTarget,
        event: &'static str,
        sample: impl Fn(&Event, Option<E::Input>) -> Option<E::Input> + 'static,
    ) -> Result<(), JsValue> {
        let instance = Rc::clone(&self.instance);
        let listener = Listener::passive(target, event, move |event| {
            let previous = instance.tracker.try_borrow().ok().and_then(|t| t.latest());
            if let Some(input) = sample(&event, previous) {
                instance.record(input);
            }
        })?;
        self.listeners.push(listener);
        Ok(())
    }
}

impl<E, P> EffectHandle<E, P>
where
    E: Effect,
    E::Scene: Sized,
    P: Presenter<E::Output>,
{
    /// Starts the instance (first frame request).
    pub fn start(&self) {
        if let Ok(mut tracker) = self.instance.tracker.try_borrow_mut() {
            tracker.start(&self.instance.raf);
        }
    }

    /// Returns `true` once the instance has been torn down.
    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        self.instance
            .tracker
            .try_borrow()
            .is_ok_and(|t| t.is_torn_down())
    }

    /// Removes every listener, cancels the pending frame and releases the
    /// presenter. Idempotent.
    pub fn teardown(&mut self) {
        self.listeners.clear();
        let instance = &self.instance;
        if let (Ok(mut tracker), Ok(mut presenter)) = (
            instance.tracker.try_borrow_mut(),
            instance.presenter.try_borrow_mut(),
        ) {
            with_tracer(instance.sink.as_ref(), |tracer| {
                tracker.teardown(&instance.raf, &mut *presenter, tracer);
            });
        }
    }
}

impl<E, P> Drop for EffectHandle<E, P>
where
    E: Effect,
    E::Scene: Sized,
    P: Presenter<E::Output>,
{
    fn drop(&mut self) {
        self.teardown();
    }
}
