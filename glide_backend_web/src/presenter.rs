// Copyright 2026 the Glide Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Direct style writes for the three effects.
//!
//! Each presenter holds the element(s) it writes to, checks that they are
//! still in the document before writing, and touches only inline style
//! properties. Nothing here reads layout.

use alloc::format;
use alloc::string::String;

use kurbo::{Point, Vec2};
use web_sys::HtmlElement;

use glide_core::backend::Presenter;
use glide_core::effects::{CursorFrame, TimelineFrame};

/// Returns the element if it is attached to a document.
fn connected(el: Option<&HtmlElement>) -> Option<&HtmlElement> {
    el.filter(|el| el.is_connected())
}

// ---------------------------------------------------------------------------
// CSS values
// ---------------------------------------------------------------------------

/// `"{v}px"`.
pub(crate) fn px(v: f64) -> String {
    format!("{v}px")
}

/// Cursor transform: centered on its `left`/`top`, then scaled.
pub(crate) fn cursor_transform(scale: f64) -> String {
    format!("translate(-50%, -50%) scale({scale})")
}

/// Progress bar fill, growing from the top.
pub(crate) fn scale_y(ratio: f64) -> String {
    format!("scaleY({ratio})")
}

/// Timeline dot position.
pub(crate) fn translate_y(y: f64) -> String {
    format!("translateY({y}px)")
}

/// Parallax displacement.
pub(crate) fn translate(offset: Vec2) -> String {
    format!("translate({}px, {}px)", offset.x, offset.y)
}

// ---------------------------------------------------------------------------
// Cursor
// ---------------------------------------------------------------------------

/// Writes [`CursorFrame`]s to the follower element.
///
/// Position is written every frame; opacity and scale only when they change.
pub struct CursorPresenter {
    element: Option<HtmlElement>,
    last_opacity: Option<f64>,
    last_scale: Option<f64>,
}

impl core::fmt::Debug for CursorPresenter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CursorPresenter")
            .field("element", &self.element.is_some())
            .field("last_opacity", &self.last_opacity)
            .field("last_scale", &self.last_scale)
            .finish()
    }
}

impl CursorPresenter {
    /// Takes over `element` and makes it displayable.
    #[must_use]
    pub fn new(element: Option<HtmlElement>) -> Self {
        if let Some(el) = &element {
            let s = el.style();
            let _ = s.remove_property("display");
            let _ = s.set_property("opacity", "0");
            let _ = s.set_property("will-change", "left, top, transform");
        }
        Self {
            element,
            last_opacity: None,
            last_scale: None,
        }
    }
}

impl Presenter<CursorFrame> for CursorPresenter {
    fn apply(&mut self, frame: &CursorFrame) -> bool {
        let Some(el) = connected(self.element.as_ref()) else {
            return false;
        };
        let s = el.style();
        let Point { x, y } = frame.position;
        let _ = s.set_property("left", &px(x));
        let _ = s.set_property("top", &px(y));
        if self.last_opacity != Some(frame.opacity) {
            let _ = s.set_property("opacity", &format!("{}", frame.opacity));
            self.last_opacity = Some(frame.opacity);
        }
        if self.last_scale != Some(frame.scale) {
            let _ = s.set_property("transform", &cursor_transform(frame.scale));
            self.last_scale = Some(frame.scale);
        }
        true
    }

    fn release(&mut self) {
        if let Some(el) = self.element.take() {
            let s = el.style();
            let _ = s.set_property("display", "none");
            let _ = s.remove_property("will-change");
        }
    }
}

// ---------------------------------------------------------------------------
// Timeline
// ---------------------------------------------------------------------------

/// Writes [`TimelineFrame`]s to the progress bar and its dot.
///
/// Either element may be missing; the other is still written.
pub struct TimelinePresenter {
    bar: Option<HtmlElement>,
    dot: Option<HtmlElement>,
}

impl core::fmt::Debug for TimelinePresenter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TimelinePresenter")
            .field("bar", &self.bar.is_some())
            .field("dot", &self.dot.is_some())
            .finish()
    }
}

impl TimelinePresenter {
    /// Takes over the bar and dot elements.
    #[must_use]
    pub fn new(bar: Option<HtmlElement>, dot: Option<HtmlElement>) -> Self {
        if let Some(bar) = &bar {
            let _ = bar.style().set_property("transform-origin", "top");
        }
        for el in [&bar, &dot].into_iter().flatten() {
            let _ = el.style().remove_property("display");
        }
        Self { bar, dot }
    }
}

impl Presenter<TimelineFrame> for TimelinePresenter {
    fn apply(&mut self, frame: &TimelineFrame) -> bool {
        let mut written = false;
        if let Some(bar) = connected(self.bar.as_ref()) {
            let _ = bar
                .style()
                .set_property("transform", &scale_y(frame.progress.ratio()));
            written = true;
        }
        if let Some(dot) = connected(self.dot.as_ref()) {
            let s = dot.style();
            let _ = s.set_property("transform", &translate_y(frame.dot_y));
            let _ = s.set_property("opacity", &format!("{}", frame.dot_opacity));
            written = true;
        }
        written
    }

    fn release(&mut self) {
        for el in [self.bar.take(), self.dot.take()].into_iter().flatten() {
            let s = el.style();
            let _ = s.set_property("display", "none");
            let _ = s.remove_property("transform");
        }
    }
}

// ---------------------------------------------------------------------------
// Parallax
// ---------------------------------------------------------------------------

/// Writes parallax offsets to the hero image.
pub struct ParallaxPresenter {
    image: Option<HtmlElement>,
}

impl core::fmt::Debug for ParallaxPresenter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ParallaxPresenter")
            .field("image", &self.image.is_some())
            .finish()
    }
}

impl ParallaxPresenter {
    /// Takes over the image element.
    #[must_use]
    pub fn new(image: Option<HtmlElement>) -> Self {
        Self { image }
    }
}

impl Presenter<Vec2> for ParallaxPresenter {
    fn apply(&mut self, offset: &Vec2) -> bool {
        let Some(image) = connected(self.image.as_ref()) else {
            return false;
        };
        let _ = image.style().set_property("transform", &translate(*offset));
        true
    }

    fn release(&mut self) {
        // Back to rest; the image itself stays visible.
        if let Some(image) = self.image.take() {
            let _ = image.style().remove_property("transform");
        }
    }
}
