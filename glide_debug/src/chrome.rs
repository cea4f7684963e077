// Copyright 2026 the Glide Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes [Chrome Trace Event Format][format] JSON to the given writer.
//!
//! Each effect gets its own track (`tid`), so a continuous cursor and an
//! on-demand timeline can be compared side by side. Only frames carry a
//! timestamp; samples, gate changes and teardowns are placed at the time of
//! the most recent frame before them.
//!
//! [format]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use glide_core::time::Timebase;
use glide_core::timing::EffectKind;

use crate::recorder::{RecordedEvent, decode};

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
/// It starts with one `thread_name` metadata record per effect.
///
/// Timestamps are converted to microseconds using the provided [`Timebase`].
pub fn export(bytes: &[u8], timebase: Timebase, writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = EffectKind::ALL
        .iter()
        .map(|&kind| {
            json!({
                "ph": "M",
                "name": "thread_name",
                "pid": 0,
                "tid": kind.index(),
                "args": { "name": kind.as_str() },
            })
        })
        .collect();

    let mut ts = 0.0;
    for recorded in decode(bytes) {
        let tid = recorded.effect().index();
        match recorded {
            RecordedEvent::Sample(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Sample",
                    "cat": "Input",
                    "ts": ts,
                    "pid": 0,
                    "tid": tid,
                    "s": "t",
                    "args": {
                        "requested": e.requested,
                    }
                }));
            }
            RecordedEvent::Frame(e) => {
                ts = ticks_to_us(e.now.ticks(), timebase);
                events.push(json!({
                    "ph": "i",
                    "name": "Frame",
                    "cat": "Frame",
                    "ts": ts,
                    "pid": 0,
                    "tid": tid,
                    "s": "t",
                    "args": {
                        "frame_index": e.frame_index,
                        "outcome": format!("{:?}", e.outcome),
                    }
                }));
            }
            RecordedEvent::Gate(e) => {
                let name = if e.mounted { "Mount" } else { "Unmount" };
                events.push(json!({
                    "ph": "i",
                    "name": name,
                    "cat": "Gate",
                    "ts": ts,
                    "pid": 0,
                    "tid": tid,
                    "s": "g",
                    "args": {
                        "viewport_width": e.viewport_width,
                        "touch": e.touch,
                    }
                }));
            }
            RecordedEvent::Teardown(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Teardown",
                    "cat": "Gate",
                    "ts": ts,
                    "pid": 0,
                    "tid": tid,
                    "s": "t",
                    "args": {
                        "cancelled": e.cancelled.map(|r| r.0),
                    }
                }));
            }
        }
    }

    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}

fn ticks_to_us(ticks: u64, timebase: Timebase) -> f64 {
    timebase.ticks_to_nanos(ticks) as f64 / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::RecorderSink;
    use glide_core::time::HostTime;
    use glide_core::timing::FrameRequest;
    use glide_core::trace::{FrameEvent, GateEvent, SampleEvent, TeardownEvent, TraceSink};
    use glide_core::tracker::FrameOutcome;

    #[test]
    fn export_produces_valid_json() {
        let mut rec = RecorderSink::new();
        rec.on_sample(&SampleEvent {
            effect: EffectKind::ScrollProgress,
            requested: true,
        });
        rec.on_frame(&FrameEvent {
            effect: EffectKind::ScrollProgress,
            frame_index: 0,
            now: HostTime(2_000),
            outcome: FrameOutcome::Written,
        });
        rec.on_gate(&GateEvent {
            effect: EffectKind::ScrollProgress,
            mounted: false,
            viewport_width: 500.0,
            touch: false,
        });
        rec.on_teardown(&TeardownEvent {
            effect: EffectKind::ScrollProgress,
            cancelled: Some(FrameRequest(3)),
        });

        let mut out = Vec::new();
        export(rec.as_bytes(), Timebase::MICROS, &mut out).unwrap();
        let json_str = String::from_utf8(out).unwrap();

        let parsed: Vec<Value> = serde_json::from_str(&json_str).unwrap();
        assert_eq!(parsed.len(), 3 + 4, "metadata plus events");

        assert_eq!(parsed[1]["ph"], "M");
        assert_eq!(parsed[1]["args"]["name"], "scroll-progress");

        // Before any frame, the sample sits at zero.
        assert_eq!(parsed[3]["name"], "Sample");
        assert_eq!(parsed[3]["ts"], 0.0);
        assert_eq!(parsed[3]["tid"], 1);

        assert_eq!(parsed[4]["name"], "Frame");
        assert_eq!(parsed[4]["ts"], 2000.0);
        assert_eq!(parsed[4]["args"]["outcome"], "Written");

        // Lifecycle events inherit the last frame's timestamp.
        assert_eq!(parsed[5]["name"], "Unmount");
        assert_eq!(parsed[5]["ts"], 2000.0);
        assert_eq!(parsed[6]["name"], "Teardown");
        assert_eq!(parsed[6]["args"]["cancelled"], 3);
    }

    #[test]
    fn export_empty_recording() {
        let mut out = Vec::new();
        export(&[], Timebase::MICROS, &mut out).unwrap();
        let json_str = String::from_utf8(out).unwrap();
        let parsed: Vec<Value> = serde_json::from_str(&json_str).unwrap();
        assert_eq!(parsed.len(), EffectKind::ALL.len(), "only track names");
        assert!(parsed.iter().all(|e| e["ph"] == "M"));
    }
}
