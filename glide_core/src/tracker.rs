// Copyright 2026 the Glide Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One effect instance: sampler, frame scheduler and derivation.
//!
//! [`Effect`] is the per-effect part (what a frame computes). [`Tracker`]
//! is the shared part (when a frame runs, what it reads, where it writes).
//! Each mounted effect owns exactly one `Tracker`; nothing is shared between
//! instances.

use crate::backend::Presenter;
use crate::sampler::Sampler;
use crate::scheduler::{FrameScheduler, TrackerState};
use crate::timing::{DriveMode, EffectKind, FrameRequest, FrameSource, FrameTick};
use crate::trace::{FrameEvent, SampleEvent, TeardownEvent, Tracer};

/// A derivation from the latest raw input to a presentation value.
pub trait Effect {
    /// Raw input recorded by listeners.
    type Input: Copy;
    /// Layout inputs read fresh by the host in every frame.
    type Scene: ?Sized;
    /// Value written to the presentation target.
    type Output;

    /// Which effect this is.
    const KIND: EffectKind;
    /// How frames are scheduled.
    const MODE: DriveMode;

    /// Computes the value for this frame.
    ///
    /// `input` is the latest recorded sample, or `None` if nothing was
    /// recorded yet. Returning `None` skips the write for this frame.
    fn derive(
        &mut self,
        input: Option<Self::Input>,
        scene: &Self::Scene,
    ) -> Option<Self::Output>;
}

/// What happened in one frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FrameOutcome {
    /// A value was derived and written to the target.
    Written,
    /// The effect had nothing new to write.
    Unchanged,
    /// The target (or its layout) was unavailable; the write was skipped.
    NoTarget,
    /// The instance was torn down; the frame was ignored.
    TornDown,
}

/// Sampler, scheduler and derivation state of one effect instance.
pub struct Tracker<E: Effect> {
    effect: E,
    sampler: Sampler<E::Input>,
    scheduler: FrameScheduler,
}

impl<E: Effect> core::fmt::Debug for Tracker<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracker")
            .field("kind", &E::KIND)
            .field("sampled", &self.sampler.is_fresh())
            .field("scheduler", &self.scheduler)
            .finish_non_exhaustive()
    }
}

impl<E: Effect> Tracker<E> {
    /// Creates a tracker with no recorded input.
    #[must_use]
    pub const fn new(effect: E) -> Self {
        Self {
            effect,
            sampler: Sampler::new(),
            scheduler: FrameScheduler::new(E::MODE),
        }
    }

    /// Creates a tracker whose sampler already holds `input` (e.g. the
    /// scroll offset at mount time).
    #[must_use]
    pub const fn with_sample(effect: E, input: E::Input) -> Self {
        Self {
            effect,
            sampler: Sampler::seeded(input),
            scheduler: FrameScheduler::new(E::MODE),
        }
    }

    /// Returns the derivation state.
    #[must_use]
    pub fn effect(&self) -> &E {
        &self.effect
    }

    /// Returns the latest recorded input.
    #[must_use]
    pub fn latest(&self) -> Option<E::Input> {
        self.sampler.latest()
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> TrackerState {
        self.scheduler.state()
    }

    /// Returns the pending frame request, if any.
    #[must_use]
    pub fn pending(&self) -> Option<FrameRequest> {
        self.scheduler.pending()
    }

    /// Returns `true` once [`teardown`](Self::teardown) has run.
    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        self.scheduler.is_torn_down()
    }

    /// Starts the instance after mount.
    ///
    /// Continuous effects request their first frame. On-demand effects
    /// request one only if a sample is already waiting, which gives them a
    /// correct initial paint.
    pub fn start(&mut self, source: &dyn FrameSource) {
        match E::MODE {
            DriveMode::Continuous => {
                self.scheduler.request(source);
            }
            DriveMode::OnDemand => {
                if self.sampler.is_fresh() {
                    self.scheduler.mark_sampled();
                    self.scheduler.request(source);
                }
            }
        }
    }

    /// Records raw input. Called from input listeners.
    ///
    /// Never derives or writes. On-demand effects request a frame if none is
    /// pending.
    pub fn record(&mut self, input: E::Input, source: &dyn FrameSource, tracer: &mut Tracer<'_>) {
        if self.scheduler.is_torn_down() {
            return;
        }
        self.sampler.record(input);
        self.scheduler.mark_sampled();
        let requested = match E::MODE {
            DriveMode::OnDemand => self.scheduler.request(source),
            DriveMode::Continuous => false,
        };
        tracer.sample(&SampleEvent {
            effect: E::KIND,
            requested,
        });
    }

    /// Runs one frame: reads the latest sample, derives, writes, and
    /// reschedules if continuous.
    ///
    /// `scene` is `None` when the host could not read layout (the target is
    /// not mounted); the write is skipped but continuous effects keep
    /// running.
    pub fn frame<P>(
        &mut self,
        tick: &FrameTick,
        scene: Option<&E::Scene>,
        presenter: &mut P,
        source: &dyn FrameSource,
        tracer: &mut Tracer<'_>,
    ) -> FrameOutcome
    where
        P: Presenter<E::Output> + ?Sized,
    {
        let outcome = if self.scheduler.begin_frame() {
            // Read once: samples recorded after this point belong to the
            // next frame.
            let input = self.sampler.latest();
            self.sampler.take_fresh();
            let outcome = match scene {
                None => FrameOutcome::NoTarget,
                Some(scene) => match self.effect.derive(input, scene) {
                    None => FrameOutcome::Unchanged,
                    Some(value) => {
                        if presenter.apply(&value) {
                            FrameOutcome::Written
                        } else {
                            FrameOutcome::NoTarget
                        }
                    }
                },
            };
            self.scheduler.end_frame(source);
            outcome
        } else {
            FrameOutcome::TornDown
        };
        tracer.frame(&FrameEvent {
            effect: E::KIND,
            frame_index: tick.frame_index,
            now: tick.now,
            outcome,
        });
        outcome
    }

    /// Tears the instance down: cancels any pending frame, refuses further
    /// input and releases the presenter.
    ///
    /// Safe to call more than once; only the first call has any effect.
    pub fn teardown<P>(
        &mut self,
        source: &dyn FrameSource,
        presenter: &mut P,
        tracer: &mut Tracer<'_>,
    ) -> bool
    where
        P: Presenter<E::Output> + ?Sized,
    {
        let cancelled = self.scheduler.pending();
        if !self.scheduler.teardown(source) {
            return false;
        }
        self.sampler.clear();
        presenter.release();
        tracer.teardown(&TeardownEvent {
            effect: E::KIND,
            cancelled,
        });
        true
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;
    use core::cell::{Cell, RefCell};

    use super::*;
    use crate::time::HostTime;

    #[derive(Default)]
    struct Frames {
        next: Cell<u32>,
        cancelled: RefCell<Vec<FrameRequest>>,
    }

    impl FrameSource for Frames {
        fn request_frame(&self) -> FrameRequest {
            self.next.set(self.next.get() + 1);
            FrameRequest(self.next.get())
        }

        fn cancel_frame(&self, request: FrameRequest) {
            self.cancelled.borrow_mut().push(request);
        }
    }

    #[derive(Default)]
    struct Log {
        writes: Vec<i32>,
        released: u32,
        detached: bool,
    }

    impl Presenter<i32> for Log {
        fn apply(&mut self, value: &i32) -> bool {
            if self.detached {
                return false;
            }
            self.writes.push(*value);
            true
        }

        fn release(&mut self) {
            self.released += 1;
        }
    }

    /// Doubles the input.
    struct Double;

    impl Effect for Double {
        type Input = i32;
        type Scene = ();
        type Output = i32;
        const KIND: EffectKind = EffectKind::Parallax;
        const MODE: DriveMode = DriveMode::OnDemand;

        fn derive(&mut self, input: Option<i32>, _: &()) -> Option<i32> {
            input.map(|v| v * 2)
        }
    }

    /// Counts frames, continuously.
    struct Counter(i32);

    impl Effect for Counter {
        type Input = i32;
        type Scene = ();
        type Output = i32;
        const KIND: EffectKind = EffectKind::Cursor;
        const MODE: DriveMode = DriveMode::Continuous;

        fn derive(&mut self, _: Option<i32>, _: &()) -> Option<i32> {
            self.0 += 1;
            Some(self.0)
        }
    }

    fn tick(i: u64) -> FrameTick {
        FrameTick {
            now: HostTime(i * 16_667),
            frame_index: i,
            effect: EffectKind::Parallax,
        }
    }

    #[test]
    fn burst_of_input_coalesces_into_one_frame() {
        let src = Frames::default();
        let mut log = Log::default();
        let mut t = Tracker::new(Double);
        for v in 1..=5 {
            t.record(v, &src, &mut Tracer::none());
        }
        assert_eq!(src.next.get(), 1, "one request for the whole burst");
        assert_eq!(t.state(), TrackerState::Sampled);

        let out = t.frame(&tick(0), Some(&()), &mut log, &src, &mut Tracer::none());
        assert_eq!(out, FrameOutcome::Written);
        assert_eq!(log.writes, [10], "frame sees the latest sample");
        assert_eq!(t.state(), TrackerState::Idle);
        assert_eq!(t.pending(), None);
    }

    #[test]
    fn continuous_effect_keeps_one_frame_in_flight() {
        let src = Frames::default();
        let mut log = Log::default();
        let mut t = Tracker::new(Counter(0));
        t.start(&src);
        t.record(1, &src, &mut Tracer::none());
        assert_eq!(t.pending(), Some(FrameRequest(1)), "record does not add requests");
        for i in 0..3 {
            t.frame(&tick(i), Some(&()), &mut log, &src, &mut Tracer::none());
        }
        assert_eq!(log.writes, [1, 2, 3]);
        assert_eq!(t.pending(), Some(FrameRequest(4)));
    }

    #[test]
    fn missing_target_is_skipped_silently() {
        let src = Frames::default();
        let mut log = Log {
            detached: true,
            ..Log::default()
        };
        let mut t = Tracker::new(Double);
        t.record(3, &src, &mut Tracer::none());
        let out = t.frame(&tick(0), Some(&()), &mut log, &src, &mut Tracer::none());
        assert_eq!(out, FrameOutcome::NoTarget);

        t.record(4, &src, &mut Tracer::none());
        let out = t.frame(&tick(1), None, &mut log, &src, &mut Tracer::none());
        assert_eq!(out, FrameOutcome::NoTarget, "no layout, no write");
        assert!(log.writes.is_empty());
    }

    #[test]
    fn on_demand_start_paints_seeded_sample() {
        let src = Frames::default();
        let mut log = Log::default();
        let mut t = Tracker::with_sample(Double, 21);
        t.start(&src);
        assert_eq!(t.pending(), Some(FrameRequest(1)));
        t.frame(&tick(0), Some(&()), &mut log, &src, &mut Tracer::none());
        assert_eq!(log.writes, [42]);

        let mut idle = Tracker::new(Double);
        idle.start(&src);
        assert_eq!(idle.pending(), None, "nothing to paint yet");
    }

    #[test]
    fn teardown_is_idempotent_and_final() {
        let src = Frames::default();
        let mut log = Log::default();
        let mut t = Tracker::new(Counter(0));
        t.start(&src);
        assert!(t.teardown(&src, &mut log, &mut Tracer::none()));
        assert!(!t.teardown(&src, &mut log, &mut Tracer::none()));
        assert_eq!(&*src.cancelled.borrow(), &[FrameRequest(1)]);
        assert_eq!(log.released, 1, "presenter released once");

        // A callback that was already queued by the host must not write.
        let out = t.frame(&tick(0), Some(&()), &mut log, &src, &mut Tracer::none());
        assert_eq!(out, FrameOutcome::TornDown);
        t.record(9, &src, &mut Tracer::none());
        assert!(log.writes.is_empty());
        assert_eq!(t.pending(), None);
        assert_eq!(t.latest(), None);
    }
}
