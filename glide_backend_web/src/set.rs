// Copyright 2026 the Glide Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The three effects of a page, mounted and unmounted by capability.

use alloc::rc::Rc;
use core::cell::RefCell;

use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlElement, Window};

use glide_core::capability::{Gatekeeper, Transition};
use glide_core::effects::{
    CursorConfig, CursorFollower, CursorSample, EffectsConfig, ParallaxConfig, ParallaxEffect,
    ScrollProgressEffect, ScrollSample, TimelineConfig,
};
use glide_core::timing::EffectKind;
use glide_core::tracker::Tracker;

use crate::host;
use crate::listener::Listener;
use crate::mount::{EffectHandle, SharedSink, with_tracer};
use crate::presenter::{CursorPresenter, ParallaxPresenter, TimelinePresenter};

/// Mounted cursor follower.
pub type CursorHandle = EffectHandle<CursorFollower, CursorPresenter>;
/// Mounted scroll timeline.
pub type TimelineHandle = EffectHandle<ScrollProgressEffect, TimelinePresenter>;
/// Mounted hero parallax.
pub type ParallaxHandle = EffectHandle<ParallaxEffect, ParallaxPresenter>;

/// Elements the effects write to (and, for the hero, read from).
///
/// Any of them may be absent; the matching writes are skipped.
#[derive(Clone, Debug, Default)]
pub struct EffectTargets {
    /// The cursor follower.
    pub cursor: Option<HtmlElement>,
    /// Timeline progress bar (filled with `scaleY`).
    pub timeline_bar: Option<HtmlElement>,
    /// Timeline dot.
    pub timeline_dot: Option<HtmlElement>,
    /// Hero section: pointer source and parallax reference box.
    pub hero: Option<HtmlElement>,
    /// Hero image that gets displaced.
    pub hero_image: Option<HtmlElement>,
}

/// Mounts the cursor follower: pointer and hover listeners on the
/// document, continuous frames.
///
/// # Errors
///
/// Returns the exception thrown while registering listeners, or an error if
/// the window has no document.
pub fn mount_cursor(
    window: &Window,
    element: Option<HtmlElement>,
    config: CursorConfig,
    sink: Option<SharedSink>,
) -> Result<CursorHandle, JsValue> {
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("window has no document"))?;
    let mut handle = EffectHandle::new(
        Tracker::new(CursorFollower::new(config)),
        CursorPresenter::new(element),
        || Some(()),
        sink,
    );
    handle.listen(&document, "mousemove", |event, previous| {
        Some(CursorSample {
            position: host::pointer(event)?,
            hovering: previous.is_some_and(|s| s.hovering),
        })
    })?;
    handle.listen(&document, "mouseover", |event, previous| {
        let position = host::pointer(event)?;
        let hovering = host::targets_interactive(event) || previous.is_some_and(|s| s.hovering);
        Some(CursorSample { position, hovering })
    })?;
    handle.listen(&document, "mouseout", |event, _| {
        Some(CursorSample {
            position: host::pointer(event)?,
            hovering: false,
        })
    })?;
    handle.start();
    Ok(handle)
}

/// Mounts the scroll timeline: one scroll listener, frames on demand, and
/// an initial frame for the offset at mount time.
///
/// # Errors
///
/// Returns the exception thrown while registering the listener.
pub fn mount_timeline(
    window: &Window,
    bar: Option<HtmlElement>,
    dot: Option<HtmlElement>,
    config: TimelineConfig,
    sink: Option<SharedSink>,
) -> Result<TimelineHandle, JsValue> {
    let initial = ScrollSample {
        offset: host::scroll_offset(window),
    };
    let scene_window = window.clone();
    let mut handle = EffectHandle::new(
        Tracker::with_sample(ScrollProgressEffect::new(config), initial),
        TimelinePresenter::new(bar, dot),
        move || host::document_metrics(&scene_window),
        sink,
    );
    let input_window = window.clone();
    handle.listen(window, "scroll", move |_, _| {
        Some(ScrollSample {
            offset: host::scroll_offset(&input_window),
        })
    })?;
    handle.start();
    Ok(handle)
}

/// Mounts the hero parallax: pointer moves over `hero`, frames on demand.
///
/// Without a hero element nothing is listened to and the handle stays idle.
///
/// # Errors
///
/// Returns the exception thrown while registering the listener.
pub fn mount_parallax(
    hero: Option<HtmlElement>,
    image: Option<HtmlElement>,
    config: ParallaxConfig,
    sink: Option<SharedSink>,
) -> Result<ParallaxHandle, JsValue> {
    let bounds: Option<Element> = hero.clone().map(Into::into);
    let mut handle = EffectHandle::new(
        Tracker::new(ParallaxEffect::new(config)),
        ParallaxPresenter::new(image),
        move || bounds.as_ref().and_then(host::bounding_rect),
        sink,
    );
    if let Some(hero) = &hero {
        handle.listen(hero, "mousemove", |event, _| host::pointer(event))?;
    }
    handle.start();
    Ok(handle)
}

struct PageState {
    window: Window,
    targets: EffectTargets,
    config: EffectsConfig,
    gatekeeper: Gatekeeper,
    cursor: Option<CursorHandle>,
    timeline: Option<TimelineHandle>,
    parallax: Option<ParallaxHandle>,
    sink: Option<SharedSink>,
}

impl PageState {
    /// Reads capabilities and applies every resulting transition.
    ///
    /// A mount that fails is rolled back in the gatekeeper so the next check
    /// retries it; the remaining transitions are still applied and the first
    /// error is returned.
    fn refresh(&mut self) -> Result<(), JsValue> {
        let caps = host::capabilities(&self.window);
        let transitions = with_tracer(self.sink.as_ref(), |tracer| {
            self.gatekeeper.reconcile(&caps, tracer)
        });
        // Unmount first so a failed mount below cannot leave a stale writer.
        for (kind, transition) in transitions.iter() {
            if transition == Transition::Unmount {
                self.unmount(kind);
            }
        }
        let mut first_err = None;
        for (kind, transition) in transitions.iter() {
            if transition == Transition::Mount
                && let Err(err) = self.mount(kind)
            {
                self.gatekeeper.set_active(kind, false);
                first_err.get_or_insert(err);
            }
        }
        match first_err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn mount(&mut self, kind: EffectKind) -> Result<(), JsValue> {
        let t = &self.targets;
        let sink = self.sink.clone();
        match kind {
            EffectKind::Cursor => {
                self.cursor = Some(mount_cursor(
                    &self.window,
                    t.cursor.clone(),
                    self.config.cursor,
                    sink,
                )?);
            }
            EffectKind::ScrollProgress => {
                self.timeline = Some(mount_timeline(
                    &self.window,
                    t.timeline_bar.clone(),
                    t.timeline_dot.clone(),
                    self.config.timeline,
                    sink,
                )?);
            }
            EffectKind::Parallax => {
                self.parallax = Some(mount_parallax(
                    t.hero.clone(),
                    t.hero_image.clone(),
                    self.config.parallax,
                    sink,
                )?);
            }
        }
        Ok(())
    }

    fn unmount(&mut self, kind: EffectKind) {
        match kind {
            EffectKind::Cursor => self.cursor = None,
            EffectKind::ScrollProgress => self.timeline = None,
            EffectKind::Parallax => self.parallax = None,
        }
    }

    fn is_mounted(&self, kind: EffectKind) -> bool {
        match kind {
            EffectKind::Cursor => self.cursor.is_some(),
            EffectKind::ScrollProgress => self.timeline.is_some(),
            EffectKind::Parallax => self.parallax.is_some(),
        }
    }
}

/// All effects of one page, kept in line with the device's capabilities.
///
/// Capabilities are read once at mount and again on every `resize`. Effects
/// that lose their gate are torn down inside the same resize handler.
/// Dropping the set tears everything down.
pub struct EffectSet {
    state: Rc<RefCell<PageState>>,
    resize: Option<Listener>,
}

impl core::fmt::Debug for EffectSet {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut s = f.debug_struct("EffectSet");
        if let Ok(state) = self.state.try_borrow() {
            for kind in EffectKind::ALL {
                s.field(kind.as_str(), &state.is_mounted(kind));
            }
        }
        s.field("listening", &self.resize.is_some()).finish()
    }
}

impl EffectSet {
    /// Performs the first capability check, mounts what it allows and starts
    /// listening for resizes.
    ///
    /// # Errors
    ///
    /// Returns the exception thrown while registering listeners.
    pub fn mount(
        window: Window,
        targets: EffectTargets,
        config: EffectsConfig,
        sink: Option<SharedSink>,
    ) -> Result<Self, JsValue> {
        let state = Rc::new(RefCell::new(PageState {
            gatekeeper: Gatekeeper::new(config.gates()),
            window: window.clone(),
            targets,
            config,
            cursor: None,
            timeline: None,
            parallax: None,
            sink,
        }));
        state.borrow_mut().refresh()?;

        let weak = Rc::downgrade(&state);
        let resize = Listener::passive(&window, "resize", move |_| {
            if let Some(state) = weak.upgrade()
                && let Ok(mut state) = state.try_borrow_mut()
                && let Err(err) = state.refresh()
            {
                web_sys::console::warn_2(&JsValue::from_str("[glide] mount failed:"), &err);
            }
        })?;

        Ok(Self {
            state,
            resize: Some(resize),
        })
    }

    /// Re-reads capabilities now, as a resize would.
    ///
    /// Does nothing if called from inside a resize handler that is already
    /// refreshing the set.
    ///
    /// # Errors
    ///
    /// Returns the first exception thrown while mounting an effect. Effects
    /// that failed to mount are retried on the next refresh.
    pub fn refresh(&self) -> Result<(), JsValue> {
        match self.state.try_borrow_mut() {
            Ok(mut state) => state.refresh(),
            Err(_) => Ok(()),
        }
    }

    /// Returns `true` if `kind` is currently mounted.
    #[must_use]
    pub fn is_mounted(&self, kind: EffectKind) -> bool {
        self.state
            .try_borrow()
            .is_ok_and(|state| state.is_mounted(kind))
    }

    /// Stops listening for resizes and tears down every mounted effect.
    /// Idempotent.
    pub fn teardown(&mut self) {
        self.resize = None;
        if let Ok(mut state) = self.state.try_borrow_mut() {
            for (kind, transition) in state.gatekeeper.unmount_all().iter() {
                if transition == Transition::Unmount {
                    state.unmount(kind);
                }
            }
        }
    }
}

impl Drop for EffectSet {
    fn drop(&mut self) {
        self.teardown();
    }
}
