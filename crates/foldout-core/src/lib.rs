#![forbid(unsafe_code)]

//! Core primitives for foldout: easing functions, the height tween, and the
//! expand/collapse transition state machine.
//!
//! Everything here is pure and deterministic. Time is advanced by the caller
//! via explicit [`Duration`](std::time::Duration) deltas; nothing reads a
//! wall clock, so tests can drive the machine frame by frame and always see
//! the same result.
//!
//! The split mirrors how the pieces are used:
//!
//! - [`easing`] — scalar curves mapping linear progress to eased progress.
//! - [`tween`] — a single in-flight height interpolation.
//! - [`machine`] — the state machine that owns the panel's lifecycle:
//!   collapsed, expanding, expanded, collapsing, or fixed open.
//!
//! Measurement of content (what height to expand *to*) lives upstream in
//! `foldout-widgets`; the machine only ever sees resolved row heights.

pub mod easing;
pub mod machine;
pub mod tween;

pub use easing::{EasingFn, ease_in, ease_in_out, ease_out, linear};
pub use machine::{
    Generation, HeightMachine, PanelEvent, PanelState, RetargetPolicy, TransitionConfig,
};
pub use tween::HeightTween;
