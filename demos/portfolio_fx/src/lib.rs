// Copyright 2026 the Glide Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web demo: the three portfolio effects on a generated page.
//!
//! Builds a hero section with an image, a few tall content sections, a fixed
//! timeline rail on the left and a cursor follower, then hands them to an
//! [`EffectSet`]. Resize the window below 1024 px and 768 px to watch effects
//! unmount; gate changes and teardowns are logged to the console.
//!
//! Build with: `wasm-pack build --target web demos/portfolio_fx`
//!
//! Then serve `demos/portfolio_fx/` and open `index.html` in a browser.
//!
//! [`EffectSet`]: glide_backend_web::EffectSet

// This crate only runs in the browser; suppress dead-code warnings when
// cargo-checking on a native host target.
#![no_std]
#![cfg_attr(
    not(target_arch = "wasm32"),
    allow(dead_code, reason = "this crate only runs in the browser")
)]

extern crate alloc;

use alloc::format;
use alloc::rc::Rc;
use core::cell::RefCell;

use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement};

use glide_backend_web::{ConsoleSink, EffectSet, EffectTargets, SharedSink};
use glide_core::effects::EffectsConfig;

const SECTIONS: [(&str, &str); 4] = [
    ("About", "#1e1e2e"),
    ("Projects", "#24273a"),
    ("Experience", "#1e1e2e"),
    ("Contact", "#24273a"),
];

/// Entry point, called automatically by `wasm_bindgen(start)`.
#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("no global window")?;
    let document = window.document().ok_or("no document")?;
    let body = document.body().ok_or("no body")?;
    let s = body.style();
    s.set_property("margin", "0")?;
    s.set_property("background", "#11111b")?;
    s.set_property("color", "#cdd6f4")?;
    s.set_property("font-family", "system-ui, sans-serif")?;

    let (hero, hero_image) = create_hero(&document)?;
    body.append_child(&hero)?;
    for (title, background) in SECTIONS {
        let section = create_section(&document, title, background)?;
        body.append_child(&section)?;
    }
    let (rail, bar, dot) = create_timeline(&document)?;
    body.append_child(&rail)?;
    let cursor = create_cursor(&document)?;
    body.append_child(&cursor)?;

    let targets = EffectTargets {
        cursor: Some(cursor),
        timeline_bar: Some(bar),
        timeline_dot: Some(dot),
        hero: Some(hero),
        hero_image: Some(hero_image),
    };
    let sink: SharedSink = Rc::new(RefCell::new(ConsoleSink::new()));
    let effects = EffectSet::mount(window, targets, EffectsConfig::portfolio(), Some(sink))?;

    // Keep the effects alive; the page never unloads them.
    core::mem::forget(effects);

    Ok(())
}

fn create_div(doc: &Document) -> Result<HtmlElement, JsValue> {
    Ok(doc.create_element("div")?.unchecked_into())
}

fn create_hero(doc: &Document) -> Result<(HtmlElement, HtmlElement), JsValue> {
    let hero = create_div(doc)?;
    let s = hero.style();
    s.set_property("position", "relative")?;
    s.set_property("height", "100vh")?;
    s.set_property("display", "flex")?;
    s.set_property("align-items", "center")?;
    s.set_property("justify-content", "center")?;
    s.set_property("overflow", "hidden")?;

    let image = create_div(doc)?;
    let s = image.style();
    s.set_property("width", "320px")?;
    s.set_property("height", "320px")?;
    s.set_property("border-radius", "50%")?;
    s.set_property(
        "background",
        "radial-gradient(circle at 30% 30%, #89b4fa, #cba6f7 60%, #313244)",
    )?;
    s.set_property("transition", "transform 0.1s ease-out")?;
    hero.append_child(&image)?;

    let link = doc.create_element("a")?;
    link.set_attribute("href", "#projects")?;
    link.set_text_content(Some("View projects"));
    link.set_attribute(
        "style",
        "position:absolute;bottom:15vh;color:#f5c2e7;font-size:20px",
    )?;
    hero.append_child(&link)?;

    Ok((hero, image))
}

fn create_section(doc: &Document, title: &str, background: &str) -> Result<HtmlElement, JsValue> {
    let section = create_div(doc)?;
    section.set_id(&title.to_lowercase());
    let s = section.style();
    s.set_property("min-height", "90vh")?;
    s.set_property("padding", "64px 128px")?;
    s.set_property("background", background)?;
    section.set_inner_html(&format!(
        "<h2>{title}</h2><p>Scroll to move the timeline.</p><button>Hover me</button>"
    ));
    Ok(section)
}

fn create_timeline(doc: &Document) -> Result<(HtmlElement, HtmlElement, HtmlElement), JsValue> {
    let rail = create_div(doc)?;
    let s = rail.style();
    s.set_property("position", "fixed")?;
    s.set_property("left", "32px")?;
    s.set_property("top", "96px")?;
    s.set_property("bottom", "96px")?;
    s.set_property("width", "2px")?;
    s.set_property("background", "rgba(205, 214, 244, 0.15)")?;

    let bar = create_div(doc)?;
    let s = bar.style();
    s.set_property("width", "100%")?;
    s.set_property("height", "100%")?;
    s.set_property("background", "#89b4fa")?;
    s.set_property("transform", "scaleY(0)")?;
    rail.append_child(&bar)?;

    let dot = create_div(doc)?;
    let s = dot.style();
    s.set_property("position", "fixed")?;
    s.set_property("left", "27px")?;
    s.set_property("top", "0")?;
    s.set_property("width", "12px")?;
    s.set_property("height", "12px")?;
    s.set_property("border-radius", "50%")?;
    s.set_property("background", "#89b4fa")?;
    s.set_property("box-shadow", "0 0 12px #89b4fa")?;
    s.set_property("opacity", "0")?;
    doc.body().ok_or("no body")?.append_child(&dot)?;

    Ok((rail, bar, dot))
}

fn create_cursor(doc: &Document) -> Result<HtmlElement, JsValue> {
    let cursor = create_div(doc)?;
    let s = cursor.style();
    s.set_property("position", "fixed")?;
    s.set_property("left", "-100px")?;
    s.set_property("top", "-100px")?;
    s.set_property("width", "32px")?;
    s.set_property("height", "32px")?;
    s.set_property("border", "2px solid #f5c2e7")?;
    s.set_property("border-radius", "50%")?;
    s.set_property("pointer-events", "none")?;
    s.set_property("z-index", "9999")?;
    s.set_property("transition", "transform 0.15s ease-out")?;
    // Until the first capability check passes.
    s.set_property("display", "none")?;
    Ok(cursor)
}
