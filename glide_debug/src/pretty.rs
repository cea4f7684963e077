// Copyright 2026 the Glide Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Timestamps
//! are converted to microseconds using a [`Timebase`].

use std::io::Write;

use glide_core::time::{HostTime, Timebase};
use glide_core::trace::{FrameEvent, GateEvent, SampleEvent, TeardownEvent, TraceSink};
use glide_core::tracker::FrameOutcome;

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
    timebase: Timebase,
    frames: bool,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink")
            .field("timebase", &self.timebase)
            .field("frames", &self.frames)
            .finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr(timebase: Timebase) -> Self {
        Self::new(Box::new(std::io::stderr()), timebase)
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>, timebase: Timebase) -> Self {
        Self::with_writer(writer, timebase)
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W, timebase: Timebase) -> Self {
        Self {
            writer,
            timebase,
            frames: true,
        }
    }

    /// Drops per-frame and per-sample lines, keeping lifecycle events.
    ///
    /// A continuous effect produces a line every frame, which drowns
    /// everything else.
    #[must_use]
    pub fn lifecycle_only(mut self) -> Self {
        self.frames = false;
        self
    }

    /// Consumes the sink and returns the writer.
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn host_us(&self, t: HostTime) -> f64 {
        self.timebase.ticks_to_nanos(t.ticks()) as f64 / 1000.0
    }
}

fn outcome_name(outcome: FrameOutcome) -> &'static str {
    match outcome {
        FrameOutcome::Written => "written",
        FrameOutcome::Unchanged => "unchanged",
        FrameOutcome::NoTarget => "no-target",
        FrameOutcome::TornDown => "torn-down",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_sample(&mut self, e: &SampleEvent) {
        if !self.frames {
            return;
        }
        let requested = if e.requested { " +request" } else { "" };
        let _ = writeln!(self.writer, "[sample] {}{requested}", e.effect.as_str());
    }

    fn on_frame(&mut self, e: &FrameEvent) {
        if !self.frames {
            return;
        }
        let _ = writeln!(
            self.writer,
            "[frame] {} #{} at {:.1}µs {}",
            e.effect.as_str(),
            e.frame_index,
            self.host_us(e.now),
            outcome_name(e.outcome),
        );
    }

    fn on_gate(&mut self, e: &GateEvent) {
        let action = if e.mounted { "mount" } else { "unmount" };
        let _ = writeln!(
            self.writer,
            "[gate] {action} {} width={} touch={}",
            e.effect.as_str(),
            e.viewport_width,
            e.touch,
        );
    }

    fn on_teardown(&mut self, e: &TeardownEvent) {
        match e.cancelled {
            Some(request) => {
                let _ = writeln!(
                    self.writer,
                    "[teardown] {} cancelled={}",
                    e.effect.as_str(),
                    request.0,
                );
            }
            None => {
                let _ = writeln!(self.writer, "[teardown] {} idle", e.effect.as_str());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glide_core::timing::{EffectKind, FrameRequest};

    fn frame_event() -> FrameEvent {
        FrameEvent {
            effect: EffectKind::Cursor,
            frame_index: 1,
            now: HostTime(16_500),
            outcome: FrameOutcome::Written,
        }
    }

    #[test]
    fn pretty_print_frame() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new(), Timebase::MICROS);
        sink.on_frame(&frame_event());
        let output = String::from_utf8(sink.into_writer()).unwrap();
        assert!(output.contains("[frame] cursor #1"), "got: {output}");
        assert!(output.contains("16500.0µs"), "got: {output}");
        assert!(output.contains("written"), "got: {output}");
    }

    #[test]
    fn lifecycle_only_skips_frames() {
        let mut sink =
            PrettyPrintSink::with_writer(Vec::<u8>::new(), Timebase::MICROS).lifecycle_only();
        sink.on_frame(&frame_event());
        sink.on_sample(&SampleEvent {
            effect: EffectKind::Cursor,
            requested: false,
        });
        sink.on_gate(&GateEvent {
            effect: EffectKind::ScrollProgress,
            mounted: false,
            viewport_width: 500.0,
            touch: false,
        });
        sink.on_teardown(&TeardownEvent {
            effect: EffectKind::ScrollProgress,
            cancelled: Some(FrameRequest(7)),
        });
        let output = String::from_utf8(sink.into_writer()).unwrap();
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(
            lines,
            [
                "[gate] unmount scroll-progress width=500 touch=false",
                "[teardown] scroll-progress cancelled=7",
            ]
        );
    }
}
