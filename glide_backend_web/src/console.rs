// Copyright 2026 the Glide Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trace sink that logs to the browser console.

use alloc::format;
use alloc::string::String;

use web_sys::console;

use glide_core::trace::{FrameEvent, GateEvent, SampleEvent, TeardownEvent, TraceSink};
use glide_core::tracker::FrameOutcome;

/// Logs gate changes and teardowns with `console.info`, and, when verbose,
/// every sample and frame with `console.debug`.
///
/// Events only reach it when `glide_core` is built with the `trace`
/// feature.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleSink {
    verbose: bool,
}

impl ConsoleSink {
    /// Logs lifecycle events only.
    #[must_use]
    pub const fn new() -> Self {
        Self { verbose: false }
    }

    /// Also logs every sample and every frame.
    #[must_use]
    pub const fn verbose() -> Self {
        Self { verbose: true }
    }
}

impl TraceSink for ConsoleSink {
    fn on_sample(&mut self, e: &SampleEvent) {
        if self.verbose {
            console::debug_1(
                &format!("[glide] sample {} requested={}", e.effect.as_str(), e.requested).into(),
            );
        }
    }

    fn on_frame(&mut self, e: &FrameEvent) {
        if !self.verbose {
            return;
        }
        let outcome = match e.outcome {
            FrameOutcome::Written => "written",
            FrameOutcome::Unchanged => "unchanged",
            FrameOutcome::NoTarget => "no-target",
            FrameOutcome::TornDown => "torn-down",
        };
        console::debug_1(
            &format!(
                "[glide] frame {} #{} t={}us {outcome}",
                e.effect.as_str(),
                e.frame_index,
                e.now.ticks(),
            )
            .into(),
        );
    }

    fn on_gate(&mut self, e: &GateEvent) {
        let action = if e.mounted { "mount" } else { "unmount" };
        console::info_1(
            &format!(
                "[glide] {action} {} (width={} touch={})",
                e.effect.as_str(),
                e.viewport_width,
                e.touch,
            )
            .into(),
        );
    }

    fn on_teardown(&mut self, e: &TeardownEvent) {
        let cancelled = match e.cancelled {
            Some(request) => format!("cancelled rAF {}", request.0),
            None => String::from("idle"),
        };
        console::info_1(&format!("[glide] teardown {} ({cancelled})", e.effect.as_str()).into());
    }
}
