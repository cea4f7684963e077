// Copyright 2026 the Glide Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Device capability gating.
//!
//! Effects are cosmetic and only make sense with a fine pointer and enough
//! room. Whether one runs at all is a pure predicate over [`Capabilities`],
//! evaluated at mount and on every resize; it is never consulted on the
//! per-frame path.
//!
//! [`Gatekeeper`] remembers which effects are mounted and turns a fresh
//! capability reading into per-effect [`Transition`]s. The host applies all
//! of them in the same resize handler, so an effect that loses its gate is
//! torn down before any further frame can write.

use crate::timing::EffectKind;
use crate::trace::{GateEvent, Tracer};

/// What the host reports about the device and viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Capabilities {
    /// Layout viewport width in CSS pixels.
    pub viewport_width: f64,
    /// Whether the device is touch-capable.
    pub touch: bool,
}

/// Conditions under which an effect may run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gate {
    /// Smallest viewport width (inclusive) at which the effect runs.
    pub min_viewport_width: f64,
    /// Whether the effect runs on touch-capable devices.
    pub allow_touch: bool,
}

impl Gate {
    /// Custom cursor: desktop widths, never on touch devices.
    pub const CURSOR: Self = Self {
        min_viewport_width: 768.0,
        allow_touch: false,
    };

    /// Scroll timeline: wide desktop layouts only.
    pub const TIMELINE: Self = Self {
        min_viewport_width: 1024.0,
        allow_touch: true,
    };

    /// Hero parallax: tablet widths and up.
    pub const PARALLAX: Self = Self {
        min_viewport_width: 768.0,
        allow_touch: true,
    };

    /// Returns `true` if an effect guarded by this gate may run.
    ///
    /// A non-finite viewport width never passes.
    #[must_use]
    pub fn allows(&self, caps: &Capabilities) -> bool {
        if caps.touch && !self.allow_touch {
            return false;
        }
        caps.viewport_width >= self.min_viewport_width
    }
}

/// What to do with one effect after a capability check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Transition {
    /// The effect was off and may now run.
    Mount,
    /// The effect was running and must stop.
    Unmount,
    /// No change.
    Keep,
}

/// Per-effect transitions, indexed by [`EffectKind`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transitions([Transition; 3]);

impl Transitions {
    /// Returns the transition for `kind`.
    #[must_use]
    pub const fn get(&self, kind: EffectKind) -> Transition {
        self.0[kind.index()]
    }

    /// Iterates `(kind, transition)` pairs in mount order.
    pub fn iter(&self) -> impl Iterator<Item = (EffectKind, Transition)> + '_ {
        EffectKind::ALL
            .into_iter()
            .map(move |kind| (kind, self.get(kind)))
    }

    /// Returns `true` if nothing changes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|t| *t == Transition::Keep)
    }
}

/// Tracks which effects are mounted and reconciles them with capabilities.
///
/// Everything starts unmounted: until the first reading the host assumes a
/// device on which no effect runs, so nothing flashes on screen before the
/// check.
#[derive(Clone, Copy, Debug)]
pub struct Gatekeeper {
    gates: [Gate; 3],
    active: [bool; 3],
}

impl Gatekeeper {
    /// Creates a gatekeeper with one gate per [`EffectKind`], in
    /// [`EffectKind::ALL`] order.
    #[must_use]
    pub const fn new(gates: [Gate; 3]) -> Self {
        Self {
            gates,
            active: [false; 3],
        }
    }

    /// Returns the gate for `kind`.
    #[must_use]
    pub const fn gate(&self, kind: EffectKind) -> Gate {
        self.gates[kind.index()]
    }

    /// Returns `true` if `kind` is currently mounted.
    #[must_use]
    pub const fn is_active(&self, kind: EffectKind) -> bool {
        self.active[kind.index()]
    }

    /// Evaluates every gate against `caps`, records the new mounted set and
    /// returns what changed.
    pub fn reconcile(&mut self, caps: &Capabilities, tracer: &mut Tracer<'_>) -> Transitions {
        let mut out = [Transition::Keep; 3];
        for kind in EffectKind::ALL {
            let i = kind.index();
            let allowed = self.gates[i].allows(caps);
            out[i] = match (self.active[i], allowed) {
                (false, true) => Transition::Mount,
                (true, false) => Transition::Unmount,
                _ => continue,
            };
            self.active[i] = allowed;
            tracer.gate(&GateEvent {
                effect: kind,
                mounted: allowed,
                viewport_width: caps.viewport_width,
                touch: caps.touch,
            });
        }
        Transitions(out)
    }

    /// Overrides the mounted flag of `kind`.
    ///
    /// Hosts call this with `false` when applying a [`Transition::Mount`]
    /// failed, so the next [`reconcile`](Self::reconcile) retries the mount.
    pub fn set_active(&mut self, kind: EffectKind, active: bool) {
        self.active[kind.index()] = active;
    }

    /// Marks every effect unmounted and returns the transitions needed to get
    /// there (used when the whole page region goes away).
    pub fn unmount_all(&mut self) -> Transitions {
        let mut out = [Transition::Keep; 3];
        for (slot, active) in out.iter_mut().zip(self.active.iter_mut()) {
            if core::mem::take(active) {
                *slot = Transition::Unmount;
            }
        }
        Transitions(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desktop(width: f64) -> Capabilities {
        Capabilities {
            viewport_width: width,
            touch: false,
        }
    }

    fn keeper() -> Gatekeeper {
        Gatekeeper::new([Gate::CURSOR, Gate::TIMELINE, Gate::PARALLAX])
    }

    #[test]
    fn thresholds_are_inclusive() {
        assert!(Gate::CURSOR.allows(&desktop(768.0)));
        assert!(!Gate::CURSOR.allows(&desktop(767.0)));
        assert!(Gate::TIMELINE.allows(&desktop(1024.0)));
        assert!(!Gate::TIMELINE.allows(&desktop(1023.5)));
    }

    #[test]
    fn touch_disables_cursor_only() {
        let tablet = Capabilities {
            viewport_width: 1280.0,
            touch: true,
        };
        assert!(!Gate::CURSOR.allows(&tablet));
        assert!(Gate::TIMELINE.allows(&tablet));
        assert!(Gate::PARALLAX.allows(&tablet));
    }

    #[test]
    fn nan_width_never_passes() {
        assert!(!Gate::PARALLAX.allows(&desktop(f64::NAN)));
    }

    #[test]
    fn first_reading_mounts_allowed_effects() {
        let mut k = keeper();
        let t = k.reconcile(&desktop(900.0), &mut Tracer::none());
        assert_eq!(t.get(EffectKind::Cursor), Transition::Mount);
        assert_eq!(t.get(EffectKind::ScrollProgress), Transition::Keep);
        assert_eq!(t.get(EffectKind::Parallax), Transition::Mount);
        assert!(k.is_active(EffectKind::Cursor));
        assert!(!k.is_active(EffectKind::ScrollProgress));
    }

    #[test]
    fn shrinking_to_phone_unmounts_everything_at_once() {
        let mut k = keeper();
        let t = k.reconcile(&desktop(1024.0), &mut Tracer::none());
        assert!(t.iter().all(|(_, t)| t == Transition::Mount));

        let t = k.reconcile(&desktop(500.0), &mut Tracer::none());
        for (kind, tr) in t.iter() {
            assert_eq!(tr, Transition::Unmount, "{kind:?}");
            assert!(!k.is_active(kind));
        }

        let t = k.reconcile(&desktop(500.0), &mut Tracer::none());
        assert!(t.is_empty(), "steady state yields no transitions");
    }

    #[test]
    fn failed_mount_is_retried_on_next_reconcile() {
        let mut k = keeper();
        let t = k.reconcile(&desktop(1280.0), &mut Tracer::none());
        assert_eq!(t.get(EffectKind::Cursor), Transition::Mount);

        // The host could not wire up the cursor.
        k.set_active(EffectKind::Cursor, false);
        assert!(!k.is_active(EffectKind::Cursor));

        let t = k.reconcile(&desktop(1280.0), &mut Tracer::none());
        assert_eq!(t.get(EffectKind::Cursor), Transition::Mount, "mount retried");
        assert_eq!(t.get(EffectKind::ScrollProgress), Transition::Keep);
        assert_eq!(t.get(EffectKind::Parallax), Transition::Keep);
        assert!(k.is_active(EffectKind::Cursor));
    }

    #[test]
    fn unmount_all_only_touches_active() {
        let mut k = keeper();
        k.reconcile(&desktop(800.0), &mut Tracer::none());
        let t = k.unmount_all();
        assert_eq!(t.get(EffectKind::Cursor), Transition::Unmount);
        assert_eq!(t.get(EffectKind::ScrollProgress), Transition::Keep);
        assert!(k.unmount_all().is_empty());
    }
}
