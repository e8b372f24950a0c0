#![forbid(unsafe_code)]

//! A single in-flight height interpolation.
//!
//! [`HeightTween`] interpolates a row height between `from` and `to` over a
//! duration, advanced by caller-supplied deltas. Elapsed time is tracked as
//! [`Duration`] internally for precise accumulation across many small ticks
//! (no floating-point drift).

use std::time::Duration;

use crate::easing::{EasingFn, ease_out};

/// Interpolates a row height between `from` and `to` over a duration.
///
/// `height()` returns the current interpolated value rounded to whole rows;
/// the underlying progress is continuous, so a tween reversed mid-flight can
/// pick up from exactly where the previous one left off.
#[derive(Debug, Clone, Copy)]
pub struct HeightTween {
    from: u16,
    to: u16,
    elapsed: Duration,
    duration: Duration,
    easing: EasingFn,
}

impl HeightTween {
    /// Create a tween from `from` to `to` over `duration`.
    ///
    /// A zero duration is clamped to one nanosecond so progress math never
    /// divides by zero; callers wanting an instantaneous jump should not
    /// start a tween at all.
    pub fn new(from: u16, to: u16, duration: Duration) -> Self {
        Self {
            from,
            to,
            elapsed: Duration::ZERO,
            duration: if duration.is_zero() {
                Duration::from_nanos(1)
            } else {
                duration
            },
            easing: ease_out,
        }
    }

    /// Set the easing function (builder).
    #[must_use]
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }

    /// Advance the tween by `dt`.
    pub fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    /// Whether the tween has reached its target.
    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Raw linear progress (before easing), in [0.0, 1.0].
    pub fn raw_progress(&self) -> f32 {
        let t = self.elapsed.as_secs_f64() / self.duration.as_secs_f64();
        (t as f32).clamp(0.0, 1.0)
    }

    /// Current interpolated height in whole rows.
    pub fn height(&self) -> u16 {
        let t = (self.easing)(self.raw_progress());
        let range = f32::from(self.to) - f32::from(self.from);
        let h = f32::from(self.from) + range * t;
        h.round().clamp(0.0, f32::from(u16::MAX)) as u16
    }

    /// The height this tween started from.
    pub fn from(&self) -> u16 {
        self.from
    }

    /// The height this tween is heading toward.
    pub fn to(&self) -> u16 {
        self.to
    }

    /// Time elapsed past completion.
    pub fn overshoot(&self) -> Duration {
        self.elapsed.saturating_sub(self.duration)
    }
}
