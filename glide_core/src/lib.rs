// Copyright 2026 the Glide Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame-synchronized pointer and scroll effects.
//!
//! `glide_core` factors the "sample on input, derive once per frame" pattern
//! behind cosmetic effects such as a trailing cursor, a scroll-progress
//! indicator or a mouse-parallax offset into one reusable primitive. It is
//! `no_std` compatible (with `alloc`) and contains no platform calls: hosts
//! plug in through the [`FrameSource`](timing::FrameSource) and
//! [`Presenter`](backend::Presenter) traits.
//!
//! # Architecture
//!
//! ```text
//!   input event ──► Tracker::record() ──► Sampler (single slot)
//!                        │
//!                        ▼ (on-demand effects only)
//!                  FrameScheduler::request() ──► FrameSource
//!                                                    │
//!                 ┌──────────────────────────────────┘
//!                 ▼
//!   FrameTick ──► Tracker::frame() ──► Effect::derive() ──► Presenter::apply()
//!                        │
//!                        ▼ (continuous effects only)
//!                  FrameScheduler::request()
//! ```
//!
//! **[`sampler`]**: Single-slot, lossy holder for the latest raw input.
//!
//! **[`scheduler`]**: Pending-frame bookkeeping: at most one frame request
//! in flight, idempotent cancellation and teardown.
//!
//! **[`tracker`]**: The [`Effect`](tracker::Effect) trait and
//! [`Tracker`](tracker::Tracker), which owns one effect instance's sampler,
//! scheduler and derivation state.
//!
//! **[`effects`]**: The three derivations: cursor follower, scroll
//! progress and parallax offset, with their tuned constants.
//!
//! **[`capability`]**: Pure predicates deciding whether an effect runs at
//! all on the current device and viewport.
//!
//! **[`backend`]**: The [`Presenter`](backend::Presenter) trait that
//! backends implement to write derived values straight into the
//! presentation layer.
//!
//! **[`timing`]** / **[`time`]**: Frame ticks, frame-request handles and
//! monotonic host time.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types for
//! frame-loop instrumentation, with zero-overhead [`Tracer`](trace::Tracer)
//! wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod backend;
pub mod capability;
pub mod effects;
pub mod sampler;
pub mod scheduler;
pub mod time;
pub mod timing;
pub mod trace;
pub mod tracker;
