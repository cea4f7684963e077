// Copyright 2026 the Glide Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reads from the host page: capabilities, layout and input details.

use kurbo::{Point, Rect};
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event, MouseEvent, Window};

use glide_core::capability::Capabilities;
use glide_core::effects::DocumentMetrics;

/// Selector for elements that make the cursor grow.
pub const INTERACTIVE_SELECTOR: &str = "a, button";

/// Reads viewport width and touch support.
///
/// A window that reports no width yields `0`, which no gate allows.
#[must_use]
pub fn capabilities(window: &Window) -> Capabilities {
    let viewport_width = window
        .inner_width()
        .ok()
        .and_then(|w| w.as_f64())
        .unwrap_or(0.0);
    let touch = js_sys::Reflect::has(window, &JsValue::from_str("ontouchstart")).unwrap_or(false)
        || window.navigator().max_touch_points() > 0;
    Capabilities {
        viewport_width,
        touch,
    }
}

/// Reads document and viewport height.
#[must_use]
pub fn document_metrics(window: &Window) -> Option<DocumentMetrics> {
    let root = window.document()?.document_element()?;
    let viewport_height = window.inner_height().ok()?.as_f64()?;
    Some(DocumentMetrics {
        scroll_height: f64::from(root.scroll_height()),
        viewport_height,
    })
}

/// Reads the vertical scroll offset.
#[must_use]
pub fn scroll_offset(window: &Window) -> f64 {
    window.scroll_y().unwrap_or(0.0)
}

/// Reads the viewport-relative bounding box of `el`, or `None` once it has
/// left the document.
#[must_use]
pub fn bounding_rect(el: &Element) -> Option<Rect> {
    if !el.is_connected() {
        return None;
    }
    let r = el.get_bounding_client_rect();
    Some(Rect::new(r.left(), r.top(), r.right(), r.bottom()))
}

/// Pointer position of a mouse event in viewport coordinates.
#[must_use]
pub fn pointer(event: &Event) -> Option<Point> {
    let mouse = event.dyn_ref::<MouseEvent>()?;
    Some(Point::new(
        f64::from(mouse.client_x()),
        f64::from(mouse.client_y()),
    ))
}

/// Returns `true` if the event target is a link or button, or inside one.
#[must_use]
pub fn targets_interactive(event: &Event) -> bool {
    event
        .target()
        .and_then(|t| t.dyn_into::<Element>().ok())
        .and_then(|el| el.closest(INTERACTIVE_SELECTOR).ok().flatten())
        .is_some()
}
