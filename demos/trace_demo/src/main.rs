// Copyright 2026 the Glide Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless page run that exercises the tracing and diagnostics pipeline.
//!
//! Drives a [`HeadlessPage`] through a short session (pointer sweep over the
//! hero, a scroll to the bottom, a resize down to phone width) while
//! recording every event to both a
//! [`PrettyPrintSink`](glide_debug::pretty::PrettyPrintSink) and a
//! [`RecorderSink`](glide_debug::recorder::RecorderSink), then exports a
//! Chrome trace JSON file.

use std::cell::RefCell;
use std::fs::File;
use std::io::BufWriter;
use std::rc::Rc;

use kurbo::{Point, Rect};

use glide_core::capability::Capabilities;
use glide_core::effects::{DocumentMetrics, EffectsConfig};
use glide_core::time::Timebase;
use glide_core::trace::{FrameEvent, GateEvent, SampleEvent, TeardownEvent, TraceSink};
use glide_debug::pretty::PrettyPrintSink;
use glide_debug::recorder::RecorderSink;
use glide_harness::HeadlessPage;

const OUTPUT: &str = "glide_trace.json";

/// Forwards every event to a pretty printer and a shared recorder.
struct Tee {
    pretty: PrettyPrintSink,
    recorder: Rc<RefCell<RecorderSink>>,
}

impl TraceSink for Tee {
    fn on_sample(&mut self, e: &SampleEvent) {
        self.pretty.on_sample(e);
        self.recorder.borrow_mut().on_sample(e);
    }

    fn on_frame(&mut self, e: &FrameEvent) {
        self.pretty.on_frame(e);
        self.recorder.borrow_mut().on_frame(e);
    }

    fn on_gate(&mut self, e: &GateEvent) {
        self.pretty.on_gate(e);
        self.recorder.borrow_mut().on_gate(e);
    }

    fn on_teardown(&mut self, e: &TeardownEvent) {
        self.pretty.on_teardown(e);
        self.recorder.borrow_mut().on_teardown(e);
    }
}

fn main() -> std::io::Result<()> {
    let timebase = Timebase::MICROS;
    let recorder = Rc::new(RefCell::new(RecorderSink::new()));
    let tee = Tee {
        pretty: PrettyPrintSink::new(Box::new(std::io::stdout()), timebase),
        recorder: Rc::clone(&recorder),
    };

    let desktop = Capabilities {
        viewport_width: 1280.0,
        touch: false,
    };
    let metrics = DocumentMetrics {
        scroll_height: 4000.0,
        viewport_height: 800.0,
    };
    let mut page = HeadlessPage::new(EffectsConfig::portfolio(), desktop, metrics)
        .with_hero(Rect::new(0.0, 0.0, 1280.0, 800.0))
        .with_sink(Box::new(tee));
    page.mount();
    page.advance_frame();

    // Pointer sweep across the hero: several moves per frame.
    for step in 0..30 {
        let x = 100.0 + f64::from(step) * 35.0;
        page.pointer_move(Point::new(x, 400.0));
        page.pointer_move(Point::new(x + 10.0, 405.0));
        page.advance_frame();
    }

    // Scroll to the bottom in uneven steps.
    for step in 1..=20 {
        page.scroll_to(f64::from(step) * 160.0 + f64::from(step % 3));
        page.advance_frame();
    }
    page.run_frames(10);

    // Down to phone width: every effect unmounts in one step.
    page.resize(Capabilities {
        viewport_width: 500.0,
        ..desktop
    });
    page.run_frames(5);
    page.teardown();
    drop(page);

    let recorder = recorder.borrow();
    let file = File::create(OUTPUT)?;
    let mut writer = BufWriter::new(file);
    glide_debug::chrome::export(recorder.as_bytes(), timebase, &mut writer)?;
    eprintln!("wrote {OUTPUT} ({} bytes recorded)", recorder.as_bytes().len());
    Ok(())
}
