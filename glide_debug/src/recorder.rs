// Copyright 2026 the Glide Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as fixed-size little-endian records. [`decode`] reads them back
//! as an iterator of [`RecordedEvent`].

use glide_core::time::HostTime;
use glide_core::timing::{EffectKind, FrameRequest};
use glide_core::trace::{FrameEvent, GateEvent, SampleEvent, TeardownEvent, TraceSink};
use glide_core::tracker::FrameOutcome;

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_SAMPLE: u8 = 1;
const TAG_FRAME: u8 = 2;
const TAG_GATE: u8 = 3;
const TAG_TEARDOWN: u8 = 4;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_bool(&mut self, v: bool) {
        self.write_u8(u8::from(v));
    }

    fn write_option_u32(&mut self, v: Option<u32>) {
        self.write_bool(v.is_some());
        self.write_u32(v.unwrap_or(0));
    }

    fn write_effect(&mut self, e: EffectKind) {
        self.write_u8(match e {
            EffectKind::Cursor => 0,
            EffectKind::ScrollProgress => 1,
            EffectKind::Parallax => 2,
        });
    }

    fn write_outcome(&mut self, o: FrameOutcome) {
        self.write_u8(match o {
            FrameOutcome::Written => 0,
            FrameOutcome::Unchanged => 1,
            FrameOutcome::NoTarget => 2,
            FrameOutcome::TornDown => 3,
        });
    }
}

impl TraceSink for RecorderSink {
    fn on_sample(&mut self, e: &SampleEvent) {
        self.write_u8(TAG_SAMPLE);
        self.write_effect(e.effect);
        self.write_bool(e.requested);
    }

    fn on_frame(&mut self, e: &FrameEvent) {
        self.write_u8(TAG_FRAME);
        self.write_effect(e.effect);
        self.write_u64(e.frame_index);
        self.write_u64(e.now.ticks());
        self.write_outcome(e.outcome);
    }

    fn on_gate(&mut self, e: &GateEvent) {
        self.write_u8(TAG_GATE);
        self.write_effect(e.effect);
        self.write_bool(e.mounted);
        self.write_u64(e.viewport_width.to_bits());
        self.write_bool(e.touch);
    }

    fn on_teardown(&mut self, e: &TeardownEvent) {
        self.write_u8(TAG_TEARDOWN);
        self.write_effect(e.effect);
        self.write_option_u32(e.cancelled.map(|r| r.0));
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Debug, PartialEq)]
pub enum RecordedEvent {
    /// A [`SampleEvent`].
    Sample(SampleEvent),
    /// A [`FrameEvent`].
    Frame(FrameEvent),
    /// A [`GateEvent`].
    Gate(GateEvent),
    /// A [`TeardownEvent`].
    Teardown(TeardownEvent),
}

impl RecordedEvent {
    /// Returns the effect the event belongs to.
    #[must_use]
    pub fn effect(&self) -> EffectKind {
        match self {
            Self::Sample(e) => e.effect,
            Self::Frame(e) => e.effect,
            Self::Gate(e) => e.effect,
            Self::Teardown(e) => e.effect,
        }
    }
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
///
/// Stops at the first truncated record or unknown tag.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn take<const N: usize>(&mut self) -> Option<[u8; N]> {
        let bytes = self.data.get(self.pos..self.pos + N)?.try_into().ok()?;
        self.pos += N;
        Some(bytes)
    }

    fn read_u8(&mut self) -> Option<u8> {
        self.take::<1>().map(|[b]| b)
    }

    fn read_u32(&mut self) -> Option<u32> {
        self.take().map(u32::from_le_bytes)
    }

    fn read_u64(&mut self) -> Option<u64> {
        self.take().map(u64::from_le_bytes)
    }

    fn read_bool(&mut self) -> Option<bool> {
        Some(self.read_u8()? != 0)
    }

    fn read_option_u32(&mut self) -> Option<Option<u32>> {
        let present = self.read_bool()?;
        let val = self.read_u32()?;
        Some(present.then_some(val))
    }

    fn read_effect(&mut self) -> Option<EffectKind> {
        Some(match self.read_u8()? {
            0 => EffectKind::Cursor,
            1 => EffectKind::ScrollProgress,
            2 => EffectKind::Parallax,
            _ => return None,
        })
    }

    fn read_outcome(&mut self) -> Option<FrameOutcome> {
        Some(match self.read_u8()? {
            0 => FrameOutcome::Written,
            1 => FrameOutcome::Unchanged,
            2 => FrameOutcome::NoTarget,
            _ => FrameOutcome::TornDown,
        })
    }

    fn decode_sample(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Sample(SampleEvent {
            effect: self.read_effect()?,
            requested: self.read_bool()?,
        }))
    }

    fn decode_frame(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Frame(FrameEvent {
            effect: self.read_effect()?,
            frame_index: self.read_u64()?,
            now: HostTime(self.read_u64()?),
            outcome: self.read_outcome()?,
        }))
    }

    fn decode_gate(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Gate(GateEvent {
            effect: self.read_effect()?,
            mounted: self.read_bool()?,
            viewport_width: f64::from_bits(self.read_u64()?),
            touch: self.read_bool()?,
        }))
    }

    fn decode_teardown(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Teardown(TeardownEvent {
            effect: self.read_effect()?,
            cancelled: self.read_option_u32()?.map(FrameRequest),
        }))
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        match self.read_u8()? {
            TAG_SAMPLE => self.decode_sample(),
            TAG_FRAME => self.decode_frame(),
            TAG_GATE => self.decode_gate(),
            TAG_TEARDOWN => self.decode_teardown(),
            _ => None, // unknown tag → stop iteration
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
