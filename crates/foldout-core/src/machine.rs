#![forbid(unsafe_code)]

//! The expand/collapse transition state machine.
//!
//! [`HeightMachine`] owns the panel lifecycle: collapsed, expanding,
//! expanded, collapsing, or fixed open. It never measures content itself —
//! callers resolve a natural row height upstream and pass it in — and it
//! never blocks: a transition is started, control returns immediately, and
//! completion arrives later either through [`HeightMachine::tick`] crossing
//! the configured duration or through an external
//! [`HeightMachine::notify_transition_end`] signal, whichever comes first.
//!
//! # Supersession
//!
//! Every transition start bumps a [`Generation`]. A completion signal
//! carrying a stale generation (its transition was superseded by a newer
//! action) is discarded without touching state. This replaces "cancel the
//! old timer and hope" with an explicit check at the single finalization
//! point, so the latest action always wins regardless of how late the old
//! completion arrives.
//!
//! # Reversal
//!
//! Toggling mid-transition reverses from the current interpolated height,
//! never from the original endpoint. Rapid double-toggles therefore animate
//! smoothly back down from wherever the panel visually is, with no jump.

use std::time::Duration;

use crate::easing::{EasingFn, ease_out};
use crate::tween::HeightTween;

/// Identifies one in-flight transition.
///
/// Monotonically increasing; only a completion signal whose generation
/// matches the machine's current generation may finalize a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(pub u64);

impl Generation {
    fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// What to do when the natural height changes while the panel is already
/// expanded (content swap or viewport resize).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RetargetPolicy {
    /// Jump to the new height without animating.
    Snap,
    /// Animate from the old height to the new one.
    #[default]
    Smooth,
}

/// Transition timing and behavior configuration.
#[derive(Debug, Clone, Copy)]
pub struct TransitionConfig {
    /// How long an expand or collapse takes.
    pub duration: Duration,
    /// Easing curve applied to the height interpolation.
    pub easing: EasingFn,
    /// Behavior when the target height changes while already expanded.
    pub retarget: RetargetPolicy,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(350),
            easing: ease_out,
            retarget: RetargetPolicy::default(),
        }
    }
}

impl TransitionConfig {
    /// Create a config with the default duration and easing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the transition duration (builder).
    #[must_use]
    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Set the easing curve (builder).
    #[must_use]
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }

    /// Set the retarget policy (builder).
    #[must_use]
    pub fn retarget(mut self, policy: RetargetPolicy) -> Self {
        self.retarget = policy;
        self
    }

    /// A config whose transitions complete instantaneously.
    ///
    /// Useful for hosts that must skip animation wholesale; every expand or
    /// collapse lands in its steady state within the same call.
    #[must_use]
    pub fn instant() -> Self {
        Self::default().duration(Duration::ZERO)
    }
}

/// The panel lifecycle. Exactly one variant is active at any instant.
///
/// `Expanded` and `FixedOpen` are the steady open states: content renders at
/// its intrinsic height. The tween-carrying variants are in flight and render
/// clipped to the interpolated height.
#[derive(Debug, Clone, Copy)]
pub enum PanelState {
    /// Closed; nothing rendered.
    Collapsed,
    /// Animating from a starting height toward a measured target.
    Expanding(HeightTween),
    /// Open at the natural height that was measured when expansion began.
    Expanded {
        /// Row height the expansion settled at; the starting point for the
        /// next collapse.
        natural: u16,
    },
    /// Animating down toward zero.
    Collapsing(HeightTween),
    /// Open at intrinsic height with no animation pending; entered through
    /// `fix` and left only through `toggle` or `close`.
    FixedOpen,
}

impl PanelState {
    /// Whether this is a steady state (no transition pending).
    pub fn is_settled(&self) -> bool {
        !matches!(self, Self::Expanding(_) | Self::Collapsing(_))
    }

    /// Whether content occupies any vertical space in this state.
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Collapsed)
    }

    /// Short name for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Collapsed => "collapsed",
            Self::Expanding(_) => "expanding",
            Self::Expanded { .. } => "expanded",
            Self::Collapsing(_) => "collapsing",
            Self::FixedOpen => "fixed-open",
        }
    }
}

/// Steady-state changes reported back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelEvent {
    /// An expansion finished; the panel is now `Expanded`.
    Opened,
    /// A collapse finished; the panel is now `Collapsed`.
    Closed,
    /// The panel was pinned open without animation (`FixedOpen`).
    Fixed,
    /// The target height of an open or opening panel changed.
    Retargeted,
}

/// The height transition state machine.
///
/// All operations are total: every call lands the machine in exactly one of
/// the five [`PanelState`] variants, and none of them panics.
#[derive(Debug, Clone, Copy)]
pub struct HeightMachine {
    state: PanelState,
    generation: Generation,
    config: TransitionConfig,
}

impl HeightMachine {
    /// Create a machine in the `Collapsed` state.
    #[must_use]
    pub fn new(config: TransitionConfig) -> Self {
        Self {
            state: PanelState::Collapsed,
            generation: Generation::default(),
            config,
        }
    }

    /// Create a machine already pinned open (`FixedOpen`), for hosts whose
    /// panel starts visible with no interaction.
    #[must_use]
    pub fn fixed_open(config: TransitionConfig) -> Self {
        Self {
            state: PanelState::FixedOpen,
            generation: Generation::default(),
            config,
        }
    }

    /// Current state.
    pub fn state(&self) -> &PanelState {
        &self.state
    }

    /// Generation of the current (or most recent) transition.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Active configuration.
    pub fn config(&self) -> &TransitionConfig {
        &self.config
    }

    /// Whether no transition is pending.
    pub fn is_settled(&self) -> bool {
        self.state.is_settled()
    }

    /// Whether content occupies any vertical space.
    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    /// The height content should currently render at, given the caller's
    /// up-to-date natural height for the intrinsic-size states.
    pub fn rendered_height(&self, auto_height: u16) -> u16 {
        match &self.state {
            PanelState::Collapsed => 0,
            PanelState::Expanding(tw) | PanelState::Collapsing(tw) => tw.height(),
            PanelState::Expanded { .. } | PanelState::FixedOpen => auto_height,
        }
    }

    /// Flip between open and closed.
    ///
    /// `natural` is the measured natural height of the current content, used
    /// as the expansion target. Mid-transition, the direction reverses from
    /// the current interpolated height and the in-flight transition is
    /// superseded.
    pub fn toggle(&mut self, natural: u16) -> Option<PanelEvent> {
        match self.state {
            PanelState::Collapsed => self.begin_expand(0, natural),
            PanelState::Expanding(tw) => self.begin_collapse(tw.height()),
            PanelState::Expanded { natural: settled } => self.begin_collapse(settled),
            PanelState::Collapsing(tw) => self.begin_expand(tw.height(), natural),
            PanelState::FixedOpen => self.begin_collapse(natural),
        }
    }

    /// Pin the panel open at intrinsic height with no transition latency.
    ///
    /// Cancels any in-flight transition. Idempotent: returns `None` when
    /// already fixed open.
    pub fn fix(&mut self) -> Option<PanelEvent> {
        if matches!(self.state, PanelState::FixedOpen) {
            return None;
        }
        if !self.state.is_settled() {
            self.generation = self.generation.next();
        }
        self.state = PanelState::FixedOpen;
        Some(PanelEvent::Fixed)
    }

    /// Force a collapse from any state, including `FixedOpen`.
    ///
    /// `natural` supplies the starting height when collapsing from
    /// `FixedOpen` (which is intrinsically sized and stores none). A panel
    /// already collapsed or collapsing is left alone.
    pub fn close(&mut self, natural: u16) -> Option<PanelEvent> {
        match self.state {
            PanelState::Collapsed | PanelState::Collapsing(_) => None,
            PanelState::Expanding(tw) => self.begin_collapse(tw.height()),
            PanelState::Expanded { natural: settled } => self.begin_collapse(settled),
            PanelState::FixedOpen => self.begin_collapse(natural),
        }
    }

    /// React to the natural height of the content changing while the panel
    /// is open or opening (content swap, viewport resize).
    ///
    /// In-flight expansions retarget from the current interpolated height —
    /// never collapse-then-reexpand. Settled expansions follow the
    /// configured [`RetargetPolicy`]. Collapsing, collapsed, and fixed-open
    /// panels are unaffected (fixed-open is intrinsically sized and follows
    /// content reflow on its own).
    pub fn retarget(&mut self, natural: u16) -> Option<PanelEvent> {
        match self.state {
            PanelState::Expanding(tw) if tw.to() != natural => {
                let _ = self.begin_expand(tw.height(), natural);
                Some(PanelEvent::Retargeted)
            }
            PanelState::Expanded { natural: settled } if settled != natural => {
                match self.config.retarget {
                    RetargetPolicy::Snap => {
                        self.state = PanelState::Expanded { natural };
                    }
                    RetargetPolicy::Smooth => {
                        let _ = self.begin_expand(settled, natural);
                    }
                }
                Some(PanelEvent::Retargeted)
            }
            _ => None,
        }
    }

    /// Advance an in-flight transition by `dt`, finalizing it when the
    /// accumulated elapsed time reaches the configured duration.
    pub fn tick(&mut self, dt: Duration) -> Option<PanelEvent> {
        match &mut self.state {
            PanelState::Expanding(tw) => {
                tw.tick(dt);
                if tw.is_complete() {
                    let natural = tw.to();
                    self.state = PanelState::Expanded { natural };
                    Some(PanelEvent::Opened)
                } else {
                    None
                }
            }
            PanelState::Collapsing(tw) => {
                tw.tick(dt);
                if tw.is_complete() {
                    self.state = PanelState::Collapsed;
                    Some(PanelEvent::Closed)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// External completion signal for the transition identified by
    /// `generation`.
    ///
    /// Stale generations (the transition was superseded) and duplicate
    /// signals (the transition already finalized) are no-ops; state is never
    /// touched by either.
    pub fn notify_transition_end(&mut self, generation: Generation) -> Option<PanelEvent> {
        if generation != self.generation {
            return None;
        }
        match self.state {
            PanelState::Expanding(tw) => {
                self.state = PanelState::Expanded { natural: tw.to() };
                Some(PanelEvent::Opened)
            }
            PanelState::Collapsing(_) => {
                self.state = PanelState::Collapsed;
                Some(PanelEvent::Closed)
            }
            _ => None,
        }
    }

    fn begin_expand(&mut self, from: u16, to: u16) -> Option<PanelEvent> {
        self.generation = self.generation.next();
        if self.config.duration.is_zero() {
            self.state = PanelState::Expanded { natural: to };
            return Some(PanelEvent::Opened);
        }
        self.state = PanelState::Expanding(
            HeightTween::new(from, to, self.config.duration).easing(self.config.easing),
        );
        None
    }

    fn begin_collapse(&mut self, from: u16) -> Option<PanelEvent> {
        self.generation = self.generation.next();
        if self.config.duration.is_zero() {
            self.state = PanelState::Collapsed;
            return Some(PanelEvent::Closed);
        }
        self.state = PanelState::Collapsing(
            HeightTween::new(from, 0, self.config.duration).easing(self.config.easing),
        );
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::linear;

    const DUR: Duration = Duration::from_millis(350);
    const HALF: Duration = Duration::from_millis(175);

    fn machine() -> HeightMachine {
        HeightMachine::new(TransitionConfig::new().easing(linear))
    }

    fn settled(m: &mut HeightMachine) -> Option<PanelEvent> {
        m.tick(Duration::from_secs(1))
    }

    // ---- toggle ----

    #[test]
    fn toggle_from_collapsed_starts_expansion() {
        let mut m = machine();
        assert!(m.toggle(10).is_none());
        assert!(matches!(m.state(), PanelState::Expanding(_)));
        assert!(!m.is_settled());
        assert!(m.is_open());
    }

    #[test]
    fn expansion_completes_into_expanded() {
        let mut m = machine();
        m.toggle(10);
        assert_eq!(settled(&mut m), Some(PanelEvent::Opened));
        assert!(matches!(m.state(), PanelState::Expanded { natural: 10 }));
    }

    #[test]
    fn toggle_from_expanded_collapses_from_natural() {
        let mut m = machine();
        m.toggle(10);
        settled(&mut m);
        assert!(m.toggle(10).is_none());
        match m.state() {
            PanelState::Collapsing(tw) => assert_eq!(tw.from(), 10),
            other => panic!("expected collapsing, got {}", other.name()),
        }
        assert_eq!(settled(&mut m), Some(PanelEvent::Closed));
        assert!(matches!(m.state(), PanelState::Collapsed));
    }

    #[test]
    fn toggle_mid_expansion_reverses_from_interpolated_height() {
        let mut m = machine();
        m.toggle(10);
        m.tick(HALF);
        let mid = m.rendered_height(10);
        assert_eq!(mid, 5);
        m.toggle(10);
        match m.state() {
            PanelState::Collapsing(tw) => {
                assert_eq!(tw.from(), mid);
                assert_eq!(tw.height(), mid);
            }
            other => panic!("expected collapsing, got {}", other.name()),
        }
    }

    #[test]
    fn toggle_mid_collapse_reverses_from_interpolated_height() {
        let mut m = machine();
        m.toggle(10);
        settled(&mut m);
        m.toggle(10);
        m.tick(HALF);
        let mid = m.rendered_height(10);
        m.toggle(10);
        match m.state() {
            PanelState::Expanding(tw) => {
                assert_eq!(tw.from(), mid);
                assert_eq!(tw.to(), 10);
            }
            other => panic!("expected expanding, got {}", other.name()),
        }
    }

    #[test]
    fn toggle_from_fixed_open_collapses() {
        let mut m = HeightMachine::fixed_open(TransitionConfig::new().easing(linear));
        assert!(m.toggle(8).is_none());
        match m.state() {
            PanelState::Collapsing(tw) => assert_eq!(tw.from(), 8),
            other => panic!("expected collapsing, got {}", other.name()),
        }
    }

    #[test]
    fn every_toggle_bumps_generation() {
        let mut m = machine();
        let g0 = m.generation();
        m.toggle(10);
        let g1 = m.generation();
        m.toggle(10);
        let g2 = m.generation();
        assert!(g0 < g1 && g1 < g2);
    }

    // ---- fix ----

    #[test]
    fn fix_opens_immediately_from_collapsed() {
        let mut m = machine();
        assert_eq!(m.fix(), Some(PanelEvent::Fixed));
        assert!(matches!(m.state(), PanelState::FixedOpen));
        assert!(m.is_settled());
        assert!(m.is_open());
    }

    #[test]
    fn fix_cancels_in_flight_transition() {
        let mut m = machine();
        m.toggle(10);
        let pending = m.generation();
        m.fix();
        assert!(matches!(m.state(), PanelState::FixedOpen));
        assert_ne!(m.generation(), pending);
        // The superseded completion must not collapse the fix.
        assert!(m.notify_transition_end(pending).is_none());
        assert!(matches!(m.state(), PanelState::FixedOpen));
    }

    #[test]
    fn fix_is_idempotent() {
        let mut m = machine();
        m.fix();
        assert!(m.fix().is_none());
        assert!(matches!(m.state(), PanelState::FixedOpen));
    }

    #[test]
    fn fix_from_expanded_keeps_panel_open() {
        let mut m = machine();
        m.toggle(10);
        settled(&mut m);
        assert_eq!(m.fix(), Some(PanelEvent::Fixed));
        assert!(m.is_open());
    }

    // ---- close ----

    #[test]
    fn close_from_expanded_collapses() {
        let mut m = machine();
        m.toggle(10);
        settled(&mut m);
        assert!(m.close(10).is_none());
        assert_eq!(settled(&mut m), Some(PanelEvent::Closed));
        assert!(matches!(m.state(), PanelState::Collapsed));
    }

    #[test]
    fn close_from_fixed_open_collapses_from_supplied_height() {
        let mut m = HeightMachine::fixed_open(TransitionConfig::new().easing(linear));
        m.close(12);
        match m.state() {
            PanelState::Collapsing(tw) => assert_eq!(tw.from(), 12),
            other => panic!("expected collapsing, got {}", other.name()),
        }
    }

    #[test]
    fn close_cancels_in_flight_expansion() {
        let mut m = machine();
        m.toggle(10);
        let pending = m.generation();
        m.tick(HALF);
        m.close(10);
        assert_ne!(m.generation(), pending);
        assert!(m.notify_transition_end(pending).is_none());
        assert!(matches!(m.state(), PanelState::Collapsing(_)));
    }

    #[test]
    fn close_when_already_collapsed_is_noop() {
        let mut m = machine();
        let r#gen = m.generation();
        assert!(m.close(10).is_none());
        assert_eq!(m.generation(), r#gen);
        assert!(matches!(m.state(), PanelState::Collapsed));
    }

    #[test]
    fn close_while_collapsing_is_noop() {
        let mut m = machine();
        m.toggle(10);
        settled(&mut m);
        m.toggle(10);
        let r#gen = m.generation();
        assert!(m.close(10).is_none());
        assert_eq!(m.generation(), r#gen);
    }

    // ---- completion signals ----

    #[test]
    fn matching_completion_signal_finalizes_early() {
        let mut m = machine();
        m.toggle(10);
        let r#gen = m.generation();
        m.tick(HALF);
        assert_eq!(m.notify_transition_end(r#gen), Some(PanelEvent::Opened));
        assert!(matches!(m.state(), PanelState::Expanded { natural: 10 }));
    }

    #[test]
    fn stale_completion_signal_is_ignored() {
        let mut m = machine();
        m.toggle(10);
        let old = m.generation();
        m.toggle(10); // supersedes
        assert!(m.notify_transition_end(old).is_none());
        assert!(matches!(m.state(), PanelState::Collapsing(_)));
    }

    #[test]
    fn duplicate_completion_signal_is_ignored() {
        let mut m = machine();
        m.toggle(10);
        let r#gen = m.generation();
        assert_eq!(m.notify_transition_end(r#gen), Some(PanelEvent::Opened));
        assert!(m.notify_transition_end(r#gen).is_none());
        assert!(matches!(m.state(), PanelState::Expanded { .. }));
    }

    #[test]
    fn tick_and_signal_agree_on_final_state() {
        let mut by_tick = machine();
        by_tick.toggle(10);
        settled(&mut by_tick);

        let mut by_signal = machine();
        by_signal.toggle(10);
        let r#gen = by_signal.generation();
        by_signal.notify_transition_end(r#gen);

        assert_eq!(by_tick.rendered_height(10), by_signal.rendered_height(10));
        assert!(matches!(by_signal.state(), PanelState::Expanded { .. }));
    }

    // ---- retarget ----

    #[test]
    fn retarget_mid_expansion_continues_from_current_height() {
        let mut m = machine();
        m.toggle(10);
        m.tick(HALF);
        let mid = m.rendered_height(10);
        assert_eq!(m.retarget(20), Some(PanelEvent::Retargeted));
        match m.state() {
            PanelState::Expanding(tw) => {
                assert_eq!(tw.from(), mid);
                assert_eq!(tw.to(), 20);
            }
            other => panic!("expected expanding, got {}", other.name()),
        }
    }

    #[test]
    fn retarget_expanded_smooth_animates_to_new_height() {
        let mut m = machine();
        m.toggle(10);
        settled(&mut m);
        assert_eq!(m.retarget(16), Some(PanelEvent::Retargeted));
        assert!(matches!(m.state(), PanelState::Expanding(_)));
        assert_eq!(settled(&mut m), Some(PanelEvent::Opened));
        assert!(matches!(m.state(), PanelState::Expanded { natural: 16 }));
    }

    #[test]
    fn retarget_expanded_snap_jumps_without_transition() {
        let mut m = HeightMachine::new(
            TransitionConfig::new()
                .easing(linear)
                .retarget(RetargetPolicy::Snap),
        );
        m.toggle(10);
        settled(&mut m);
        assert_eq!(m.retarget(16), Some(PanelEvent::Retargeted));
        assert!(matches!(m.state(), PanelState::Expanded { natural: 16 }));
        assert!(m.is_settled());
    }

    #[test]
    fn retarget_with_unchanged_height_is_noop() {
        let mut m = machine();
        m.toggle(10);
        settled(&mut m);
        let r#gen = m.generation();
        assert!(m.retarget(10).is_none());
        assert_eq!(m.generation(), r#gen);
    }

    #[test]
    fn retarget_while_collapsed_or_collapsing_is_noop() {
        let mut m = machine();
        assert!(m.retarget(10).is_none());
        m.toggle(10);
        settled(&mut m);
        m.toggle(10);
        assert!(m.retarget(20).is_none());
        assert!(matches!(m.state(), PanelState::Collapsing(_)));
    }

    #[test]
    fn retarget_fixed_open_is_noop() {
        let mut m = HeightMachine::fixed_open(TransitionConfig::default());
        assert!(m.retarget(42).is_none());
        assert!(matches!(m.state(), PanelState::FixedOpen));
    }

    // ---- rendered height ----

    #[test]
    fn rendered_height_tracks_lifecycle() {
        let mut m = machine();
        assert_eq!(m.rendered_height(10), 0);
        m.toggle(10);
        m.tick(HALF);
        assert_eq!(m.rendered_height(10), 5);
        settled(&mut m);
        assert_eq!(m.rendered_height(10), 10);
        // Intrinsic sizing after settle: reflowed content is not clipped.
        assert_eq!(m.rendered_height(14), 14);
    }

    #[test]
    fn fixed_open_renders_at_intrinsic_height() {
        let m = HeightMachine::fixed_open(TransitionConfig::default());
        assert_eq!(m.rendered_height(7), 7);
        assert_eq!(m.rendered_height(9), 9);
    }

    // ---- instant config ----

    #[test]
    fn instant_config_finalizes_within_the_call() {
        let mut m = HeightMachine::new(TransitionConfig::instant());
        assert_eq!(m.toggle(10), Some(PanelEvent::Opened));
        assert!(matches!(m.state(), PanelState::Expanded { natural: 10 }));
        assert_eq!(m.toggle(10), Some(PanelEvent::Closed));
        assert!(matches!(m.state(), PanelState::Collapsed));
    }

    #[test]
    fn instant_close_from_fixed_open() {
        let mut m = HeightMachine::fixed_open(TransitionConfig::instant());
        assert_eq!(m.close(10), Some(PanelEvent::Closed));
        assert!(matches!(m.state(), PanelState::Collapsed));
    }

    // ---- rapid double toggle ----

    #[test]
    fn rapid_double_toggle_settles_closed() {
        let mut m = machine();
        m.toggle(10);
        m.tick(Duration::from_millis(50));
        m.toggle(10); // before the first transition's duration elapsed
        assert_eq!(settled(&mut m), Some(PanelEvent::Closed));
        assert!(matches!(m.state(), PanelState::Collapsed));
        assert_eq!(m.rendered_height(10), 0);
    }

    #[test]
    fn triple_toggle_settles_open() {
        let mut m = machine();
        m.toggle(10);
        m.tick(Duration::from_millis(50));
        m.toggle(10);
        m.tick(Duration::from_millis(50));
        m.toggle(10);
        assert_eq!(settled(&mut m), Some(PanelEvent::Opened));
        assert!(matches!(m.state(), PanelState::Expanded { .. }));
    }

    #[test]
    fn reversal_never_jumps() {
        let mut m = machine();
        m.toggle(100);
        m.tick(HALF);
        let before = m.rendered_height(100);
        m.toggle(100);
        let after = m.rendered_height(100);
        assert_eq!(before, after);
    }

    // ---- duration boundary ----

    #[test]
    fn exact_duration_tick_completes() {
        let mut m = machine();
        m.toggle(10);
        assert_eq!(m.tick(DUR), Some(PanelEvent::Opened));
    }

    #[test]
    fn tick_in_steady_state_is_noop() {
        let mut m = machine();
        assert!(m.tick(DUR).is_none());
        m.fix();
        assert!(m.tick(DUR).is_none());
    }
}
