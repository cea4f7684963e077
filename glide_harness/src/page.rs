// Copyright 2026 the Glide Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A simulated page carrying all three effects.

use alloc::boxed::Box;

use kurbo::{Point, Rect};

use glide_core::capability::{Capabilities, Gatekeeper, Transition, Transitions};
use glide_core::effects::{
    CursorFollower, CursorSample, DocumentMetrics, EffectsConfig, ParallaxEffect,
    ScrollProgressEffect, ScrollSample,
};
use glide_core::time::{Duration, HostTime};
use glide_core::timing::{EffectKind, FrameTick};
use glide_core::trace::{TraceSink, Tracer};
use glide_core::tracker::{Effect, FrameOutcome, Tracker};

use crate::presenter::RecordingPresenter;
use crate::source::ManualFrameSource;

/// Time between simulated frames (60 Hz), in microsecond ticks.
pub const FRAME_INTERVAL: Duration = Duration(16_667);

fn tracer(sink: &mut Option<Box<dyn TraceSink>>) -> Tracer<'_> {
    match sink {
        Some(sink) => Tracer::new(&mut **sink),
        None => Tracer::none(),
    }
}

/// One mounted effect with its own frame source and recording target.
pub struct Mounted<E: Effect> {
    tracker: Tracker<E>,
    presenter: RecordingPresenter<E::Output>,
    source: ManualFrameSource,
    frames: u64,
}

impl<E: Effect> core::fmt::Debug for Mounted<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Mounted")
            .field("tracker", &self.tracker)
            .field("writes", &self.presenter.writes().len())
            .field("source", &self.source)
            .field("frames", &self.frames)
            .finish()
    }
}

impl<E> Mounted<E>
where
    E: Effect,
    E::Output: Clone,
{
    fn new(tracker: Tracker<E>) -> Self {
        Self {
            tracker,
            presenter: RecordingPresenter::new(),
            source: ManualFrameSource::new(),
            frames: 0,
        }
    }

    /// Returns the tracker.
    #[must_use]
    pub fn tracker(&self) -> &Tracker<E> {
        &self.tracker
    }

    /// Returns the recording target.
    #[must_use]
    pub fn presenter(&self) -> &RecordingPresenter<E::Output> {
        &self.presenter
    }

    /// Returns the recording target mutably (to detach it).
    pub fn presenter_mut(&mut self) -> &mut RecordingPresenter<E::Output> {
        &mut self.presenter
    }

    /// Returns the frame source.
    #[must_use]
    pub fn source(&self) -> &ManualFrameSource {
        &self.source
    }

    fn record(&mut self, input: E::Input, tracer: &mut Tracer<'_>) {
        self.tracker.record(input, &self.source, tracer);
    }

    /// Fires pending requests; `None` if nothing was requested.
    fn frame(
        &mut self,
        now: HostTime,
        scene: Option<&E::Scene>,
        tracer: &mut Tracer<'_>,
    ) -> Option<FrameOutcome> {
        let mut outcome = None;
        for _ in self.source.fire() {
            let tick = FrameTick {
                now,
                frame_index: self.frames,
                effect: E::KIND,
            };
            self.frames += 1;
            outcome = Some(self.tracker.frame(
                &tick,
                scene,
                &mut self.presenter,
                &self.source,
                tracer,
            ));
        }
        outcome
    }

    fn teardown(&mut self, tracer: &mut Tracer<'_>) -> bool {
        self.tracker
            .teardown(&self.source, &mut self.presenter, tracer)
    }
}

/// What each effect did in one simulated frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameReport([Option<FrameOutcome>; 3]);

impl FrameReport {
    /// Returns the outcome for `kind`, or `None` if it had no frame.
    #[must_use]
    pub const fn get(&self, kind: EffectKind) -> Option<FrameOutcome> {
        self.0[kind.index()]
    }

    /// Returns `true` if no effect ran a frame.
    #[must_use]
    pub fn is_quiet(&self) -> bool {
        self.0.iter().all(Option::is_none)
    }
}

/// A page with a cursor follower, a scroll timeline and a parallax hero.
///
/// Nothing is mounted until [`mount`](Self::mount) performs the first
/// capability check.
pub struct HeadlessPage {
    config: EffectsConfig,
    gatekeeper: Gatekeeper,
    caps: Capabilities,
    metrics: DocumentMetrics,
    hero: Option<Rect>,
    scroll: f64,
    pointer: Option<Point>,
    hovering: bool,
    now: HostTime,
    writes: [usize; 3],
    teardowns: [u32; 3],
    cursor: Option<Mounted<CursorFollower>>,
    timeline: Option<Mounted<ScrollProgressEffect>>,
    parallax: Option<Mounted<ParallaxEffect>>,
    sink: Option<Box<dyn TraceSink>>,
}

impl core::fmt::Debug for HeadlessPage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HeadlessPage")
            .field("caps", &self.caps)
            .field("metrics", &self.metrics)
            .field("scroll", &self.scroll)
            .field("now", &self.now)
            .field("cursor", &self.cursor)
            .field("timeline", &self.timeline)
            .field("parallax", &self.parallax)
            .finish_non_exhaustive()
    }
}

impl HeadlessPage {
    /// Creates a page with no hero section, scrolled to the top.
    #[must_use]
    pub fn new(config: EffectsConfig, caps: Capabilities, metrics: DocumentMetrics) -> Self {
        Self {
            gatekeeper: Gatekeeper::new(config.gates()),
            config,
            caps,
            metrics,
            hero: None,
            scroll: 0.0,
            pointer: None,
            hovering: false,
            now: HostTime(0),
            writes: [0; 3],
            teardowns: [0; 3],
            cursor: None,
            timeline: None,
            parallax: None,
            sink: None,
        }
    }

    /// Sets the hero section's viewport box.
    #[must_use]
    pub fn with_hero(mut self, hero: Rect) -> Self {
        self.hero = Some(hero);
        self
    }

    /// Sends trace events to `sink` (only with the `trace` feature).
    #[must_use]
    pub fn with_sink(mut self, sink: Box<dyn TraceSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// First capability check: mounts every effect the device allows.
    pub fn mount(&mut self) -> Transitions {
        self.reconcile()
    }

    /// Changes the reported capabilities and mounts or unmounts effects in
    /// the same step, like a resize handler.
    pub fn resize(&mut self, caps: Capabilities) -> Transitions {
        self.caps = caps;
        self.reconcile()
    }

    fn reconcile(&mut self) -> Transitions {
        let transitions = self
            .gatekeeper
            .reconcile(&self.caps, &mut tracer(&mut self.sink));
        for (kind, transition) in transitions.iter() {
            match transition {
                Transition::Mount => self.mount_effect(kind),
                Transition::Unmount => self.unmount_effect(kind),
                Transition::Keep => {}
            }
        }
        transitions
    }

    fn mount_effect(&mut self, kind: EffectKind) {
        let config = self.config;
        match kind {
            EffectKind::Cursor => {
                let mut m = Mounted::new(Tracker::new(CursorFollower::new(config.cursor)));
                m.tracker.start(&m.source);
                self.cursor = Some(m);
            }
            EffectKind::ScrollProgress => {
                let effect = ScrollProgressEffect::new(config.timeline);
                let initial = ScrollSample {
                    offset: self.scroll,
                };
                let mut m = Mounted::new(Tracker::with_sample(effect, initial));
                m.tracker.start(&m.source);
                self.timeline = Some(m);
            }
            EffectKind::Parallax => {
                let mut m = Mounted::new(Tracker::new(ParallaxEffect::new(config.parallax)));
                m.tracker.start(&m.source);
                self.parallax = Some(m);
            }
        }
    }

    fn unmount_effect(&mut self, kind: EffectKind) {
        let mut tracer = tracer(&mut self.sink);
        let torn_down = match kind {
            EffectKind::Cursor => self.cursor.take().map(|mut m| m.teardown(&mut tracer)),
            EffectKind::ScrollProgress => {
                self.timeline.take().map(|mut m| m.teardown(&mut tracer))
            }
            EffectKind::Parallax => self.parallax.take().map(|mut m| m.teardown(&mut tracer)),
        };
        if torn_down == Some(true) {
            self.teardowns[kind.index()] += 1;
        }
    }

    /// Unmounts everything, as when the page goes away. Idempotent.
    pub fn teardown(&mut self) {
        for (kind, transition) in self.gatekeeper.unmount_all().iter() {
            if transition == Transition::Unmount {
                self.unmount_effect(kind);
            }
        }
    }

    // -- input ---------------------------------------------------------------

    /// Moves the pointer. The cursor always sees it; the parallax only while
    /// it is over the hero.
    pub fn pointer_move(&mut self, p: Point) {
        self.pointer = Some(p);
        let mut tracer = tracer(&mut self.sink);
        if let Some(cursor) = &mut self.cursor {
            let sample = CursorSample {
                position: p,
                hovering: self.hovering,
            };
            cursor.record(sample, &mut tracer);
        }
        if let Some(parallax) = &mut self.parallax
            && self.hero.is_some_and(|hero| hero.contains(p))
        {
            parallax.record(p, &mut tracer);
        }
    }

    /// Pointer enters or leaves a link or button at its current position.
    pub fn set_hovering(&mut self, hovering: bool) {
        self.hovering = hovering;
        let mut tracer = tracer(&mut self.sink);
        if let (Some(cursor), Some(position)) = (&mut self.cursor, self.pointer) {
            cursor.record(CursorSample { position, hovering }, &mut tracer);
        }
    }

    /// Scrolls the document.
    pub fn scroll_to(&mut self, offset: f64) {
        self.scroll = offset;
        let mut tracer = tracer(&mut self.sink);
        if let Some(timeline) = &mut self.timeline {
            timeline.record(ScrollSample { offset }, &mut tracer);
        }
    }

    /// Changes the document height without any input event (content
    /// reflowing). Picked up by the next timeline frame.
    pub fn set_document_height(&mut self, scroll_height: f64) {
        self.metrics.scroll_height = scroll_height;
    }

    /// Moves, resizes or removes the hero section.
    pub fn set_hero(&mut self, hero: Option<Rect>) {
        self.hero = hero;
    }

    // -- frames --------------------------------------------------------------

    /// Advances the clock by one frame interval and fires every pending
    /// request.
    pub fn advance_frame(&mut self) -> FrameReport {
        self.now = HostTime(self.now.ticks() + FRAME_INTERVAL.ticks());
        let now = self.now;
        let mut tracer = tracer(&mut self.sink);
        let mut report = [None; 3];

        if let Some(cursor) = &mut self.cursor {
            report[EffectKind::Cursor.index()] = cursor.frame(now, Some(&()), &mut tracer);
        }
        if let Some(timeline) = &mut self.timeline {
            report[EffectKind::ScrollProgress.index()] =
                timeline.frame(now, Some(&self.metrics), &mut tracer);
        }
        if let Some(parallax) = &mut self.parallax {
            report[EffectKind::Parallax.index()] =
                parallax.frame(now, self.hero.as_ref(), &mut tracer);
        }

        for (count, outcome) in self.writes.iter_mut().zip(report) {
            if outcome == Some(FrameOutcome::Written) {
                *count += 1;
            }
        }
        FrameReport(report)
    }

    /// Runs `n` frames and returns the report of the last one.
    pub fn run_frames(&mut self, n: usize) -> FrameReport {
        let mut last = FrameReport::default();
        for _ in 0..n {
            last = self.advance_frame();
        }
        last
    }

    // -- inspection ----------------------------------------------------------

    /// Returns `true` if `kind` is mounted.
    #[must_use]
    pub fn is_mounted(&self, kind: EffectKind) -> bool {
        self.gatekeeper.is_active(kind)
    }

    /// Total writes by `kind` since the page was created, across remounts.
    #[must_use]
    pub fn writes(&self, kind: EffectKind) -> usize {
        self.writes[kind.index()]
    }

    /// Number of times `kind` was torn down.
    #[must_use]
    pub fn teardowns(&self, kind: EffectKind) -> u32 {
        self.teardowns[kind.index()]
    }

    /// Returns the current simulated time.
    #[must_use]
    pub fn now(&self) -> HostTime {
        self.now
    }

    /// Returns the mounted cursor follower.
    #[must_use]
    pub fn cursor(&self) -> Option<&Mounted<CursorFollower>> {
        self.cursor.as_ref()
    }

    /// Returns the mounted scroll timeline.
    #[must_use]
    pub fn timeline(&self) -> Option<&Mounted<ScrollProgressEffect>> {
        self.timeline.as_ref()
    }

    /// Returns the mounted parallax.
    #[must_use]
    pub fn parallax(&self) -> Option<&Mounted<ParallaxEffect>> {
        self.parallax.as_ref()
    }

    /// Returns the mounted parallax mutably.
    pub fn parallax_mut(&mut self) -> Option<&mut Mounted<ParallaxEffect>> {
        self.parallax.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glide_core::effects::ScrollProgress;
    use kurbo::Vec2;

    const PAGE: DocumentMetrics = DocumentMetrics {
        scroll_height: 2800.0,
        viewport_height: 800.0,
    };

    const HERO: Rect = Rect::new(0.0, 80.0, 1200.0, 880.0);

    fn desktop(width: f64) -> Capabilities {
        Capabilities {
            viewport_width: width,
            touch: false,
        }
    }

    fn page(width: f64) -> HeadlessPage {
        let mut page = HeadlessPage::new(EffectsConfig::portfolio(), desktop(width), PAGE)
            .with_hero(HERO);
        page.mount();
        page
    }

    #[test]
    fn nothing_runs_before_the_first_check() {
        let mut page = HeadlessPage::new(EffectsConfig::portfolio(), desktop(1280.0), PAGE);
        for kind in EffectKind::ALL {
            assert!(!page.is_mounted(kind), "{kind:?}");
        }
        page.pointer_move(Point::new(10.0, 10.0));
        page.scroll_to(500.0);
        assert!(page.run_frames(3).is_quiet());
    }

    #[test]
    fn resize_to_phone_unmounts_all_and_stops_writes() {
        let mut page = page(1024.0);
        for kind in EffectKind::ALL {
            assert!(page.is_mounted(kind), "{kind:?} mounted at 1024");
        }
        page.pointer_move(Point::new(300.0, 300.0));
        page.scroll_to(400.0);
        page.run_frames(5);
        let before = EffectKind::ALL.map(|k| page.writes(k));
        assert!(before.iter().all(|&n| n > 0), "{before:?}");

        let t = page.resize(desktop(500.0));
        for (kind, transition) in t.iter() {
            assert_eq!(transition, Transition::Unmount, "{kind:?}");
            assert_eq!(page.teardowns(kind), 1, "{kind:?}");
        }

        page.pointer_move(Point::new(320.0, 310.0));
        page.scroll_to(900.0);
        assert!(page.run_frames(10).is_quiet());
        assert_eq!(EffectKind::ALL.map(|k| page.writes(k)), before);
    }

    #[test]
    fn scroll_progress_at_known_offsets() {
        let mut page = page(1280.0);

        // Initial paint at mount, before any scroll event.
        let r = page.advance_frame();
        assert_eq!(r.get(EffectKind::ScrollProgress), Some(FrameOutcome::Written));
        let first = *page.timeline().unwrap().presenter().last().unwrap();
        assert_eq!(first.progress, ScrollProgress::START);
        assert_eq!(first.dot_y, 96.0);

        for (offset, expected) in [(1000.0, 0.5), (3000.0, 1.0), (0.0, 0.0)] {
            page.scroll_to(offset);
            page.advance_frame();
            let frame = *page.timeline().unwrap().presenter().last().unwrap();
            assert_eq!(frame.progress.ratio(), expected, "offset {offset}");
        }
    }

    #[test]
    fn dot_follows_progress() {
        let mut page = page(1280.0);
        page.scroll_to(1000.0);
        page.advance_frame();
        let frame = *page.timeline().unwrap().presenter().last().unwrap();
        // 96 + (800 - 192) * 0.5
        assert_eq!(frame.dot_y, 400.0);
        assert!((frame.dot_opacity - 0.5).abs() < 1e-12, "{frame:?}");
    }

    #[test]
    fn timeline_is_quiet_without_input() {
        let mut page = page(1280.0);
        page.advance_frame();
        let r = page.run_frames(5);
        assert_eq!(r.get(EffectKind::ScrollProgress), None, "no frame requested");
        assert_eq!(r.get(EffectKind::Parallax), None);
        assert!(r.get(EffectKind::Cursor).is_some(), "cursor keeps running");
    }

    #[test]
    fn tiny_scrolls_do_not_write() {
        let mut page = page(1280.0);
        page.advance_frame();
        let writes = page.writes(EffectKind::ScrollProgress);

        page.scroll_to(1.5);
        let r = page.advance_frame();
        assert_eq!(r.get(EffectKind::ScrollProgress), Some(FrameOutcome::Unchanged));
        assert_eq!(page.writes(EffectKind::ScrollProgress), writes);

        page.scroll_to(2.0);
        page.advance_frame();
        assert_eq!(page.writes(EffectKind::ScrollProgress), writes + 1);
        let timeline = page.timeline().unwrap().tracker().effect();
        assert_eq!(timeline.last_offset(), Some(2.0), "threshold measured from last write");
    }

    #[test]
    fn document_shrinking_mid_scroll_stays_clamped() {
        let mut page = page(1280.0);
        page.scroll_to(1800.0);
        page.advance_frame();
        page.set_document_height(1500.0);
        page.scroll_to(1805.0);
        page.advance_frame();
        let frame = *page.timeline().unwrap().presenter().last().unwrap();
        assert_eq!(frame.progress, ScrollProgress::END);
    }

    #[test]
    fn cursor_is_hidden_then_trails_the_pointer() {
        let mut page = page(1280.0);
        page.run_frames(3);
        let cursor = page.cursor().unwrap();
        assert!(cursor.presenter().writes().iter().all(|f| f.opacity == 0.0));
        assert_eq!(
            cursor.presenter().last().unwrap().position,
            Point::new(-100.0, -100.0)
        );

        let target = Point::new(400.0, 300.0);
        page.pointer_move(target);
        let mut prev = (target - Point::new(-100.0, -100.0)).hypot();
        for _ in 0..40 {
            page.advance_frame();
            let frame = *page.cursor().unwrap().presenter().last().unwrap();
            assert_eq!(frame.opacity, 0.4);
            let d = (target - frame.position).hypot();
            assert!(d < prev, "distance shrinks every frame: {d} !< {prev}");
            prev = d;
        }
        assert!(prev < 0.01 * 640.4, "within 1% of the initial distance: {prev}");
    }

    #[test]
    fn continuous_cursor_keeps_one_request_in_flight() {
        let mut page = page(1280.0);
        for i in 0..20 {
            page.pointer_move(Point::new(f64::from(i), 0.0));
            page.pointer_move(Point::new(f64::from(i) + 0.5, 0.0));
            page.advance_frame();
        }
        let source = page.cursor().unwrap().source();
        assert_eq!(source.max_pending(), 1);
        assert_eq!(source.pending().len(), 1);
    }

    #[test]
    fn hover_grows_the_cursor() {
        let mut page = page(1280.0);
        page.pointer_move(Point::new(50.0, 50.0));
        page.set_hovering(true);
        page.advance_frame();
        assert_eq!(page.cursor().unwrap().presenter().last().unwrap().scale, 1.3);
        page.set_hovering(false);
        page.advance_frame();
        assert_eq!(page.cursor().unwrap().presenter().last().unwrap().scale, 1.0);
    }

    #[test]
    fn pointer_burst_coalesces_into_one_parallax_frame() {
        let mut page = page(1280.0);
        for x in 0..10 {
            page.pointer_move(Point::new(600.0 + f64::from(x) * 50.0, 480.0));
        }
        let parallax = page.parallax().unwrap();
        assert_eq!(parallax.source().requested(), 1, "one request for the burst");

        let r = page.advance_frame();
        assert_eq!(r.get(EffectKind::Parallax), Some(FrameOutcome::Written));
        let parallax = page.parallax().unwrap();
        assert_eq!(parallax.presenter().writes().len(), 1);
        // Last pointer (1050, 480) against center (600, 480).
        let offset = *parallax.presenter().last().unwrap();
        assert!((offset - Vec2::new(4.5, 0.0)).hypot() < 1e-9, "{offset:?}");
    }

    #[test]
    fn pointer_outside_hero_is_ignored_by_parallax() {
        let mut page = page(1280.0);
        page.pointer_move(Point::new(600.0, 1200.0));
        assert_eq!(page.parallax().unwrap().source().requested(), 0);
    }

    #[test]
    fn missing_hero_skips_the_write() {
        let mut page = page(1280.0);
        page.pointer_move(Point::new(100.0, 100.0));
        page.set_hero(None);
        let r = page.advance_frame();
        assert_eq!(r.get(EffectKind::Parallax), Some(FrameOutcome::NoTarget));
        assert!(page.parallax().unwrap().presenter().writes().is_empty());
    }

    #[test]
    fn detached_image_skips_the_write() {
        let mut page = page(1280.0);
        if let Some(p) = page.parallax_mut() {
            p.presenter_mut().set_attached(false);
        }
        page.pointer_move(Point::new(100.0, 100.0));
        let r = page.advance_frame();
        assert_eq!(r.get(EffectKind::Parallax), Some(FrameOutcome::NoTarget));
    }

    #[test]
    fn touch_tablet_gets_everything_but_the_cursor() {
        let mut page = HeadlessPage::new(
            EffectsConfig::portfolio(),
            Capabilities {
                viewport_width: 1280.0,
                touch: true,
            },
            PAGE,
        );
        page.mount();
        assert!(!page.is_mounted(EffectKind::Cursor));
        assert!(page.is_mounted(EffectKind::ScrollProgress));
        assert!(page.is_mounted(EffectKind::Parallax));
    }

    #[test]
    fn remount_after_growing_starts_fresh() {
        let mut page = page(1280.0);
        page.scroll_to(1000.0);
        page.advance_frame();
        page.resize(desktop(900.0));
        assert!(!page.is_mounted(EffectKind::ScrollProgress));
        page.scroll_to(2000.0);
        page.resize(desktop(1280.0));
        page.advance_frame();
        let frame = *page.timeline().unwrap().presenter().last().unwrap();
        assert_eq!(frame.progress, ScrollProgress::END, "initial paint uses the current offset");
        assert_eq!(page.timeline().unwrap().presenter().writes().len(), 1);
    }

    #[test]
    fn teardown_twice_is_harmless() {
        let mut page = page(1280.0);
        page.run_frames(2);
        page.teardown();
        page.teardown();
        for kind in EffectKind::ALL {
            assert_eq!(page.teardowns(kind), 1, "{kind:?}");
            assert!(!page.is_mounted(kind));
        }
        assert!(page.run_frames(3).is_quiet());
    }
}
