#![forbid(unsafe_code)]

//! The animated expand/collapse panel.
//!
//! [`AnimatedPanel`] wires the pieces together: the transition state machine
//! from `foldout-core`, the natural-height measurer, and the view binding.
//! Hosts drive it with the four public actions (`toggle`, `fix`, `close`,
//! `switch_view`), advance it with `tick`, and read it back through
//! `render`, `marker`, and `current_height`.
//!
//! Measurement failures never escape an action: the panel falls back to a
//! configured default height and logs a warning, so a toggle on a
//! zero-width or contentless panel still lands in a coherent state.

use std::time::Duration;

use tracing::{debug, warn};

use foldout_core::{Generation, HeightMachine, PanelEvent, PanelState, TransitionConfig};

use crate::binding::{BindError, BindOutcome, ViewBinding};
use crate::content::{ContentDescriptor, ViewId};
use crate::measure::{self, CacheStats, MeasureCache, MeasureError};

/// Marker identifying the animated content node, reported by
/// [`AnimatedPanel::marker`] whenever content is attached and the panel
/// occupies any vertical space.
pub const CONTENT_MARKER: &str = "animate-height-content";

/// Default height (rows) used when content cannot be measured.
const DEFAULT_FALLBACK_HEIGHT: u16 = 4;

/// An expand/collapse panel animating between zero and the natural height
/// of its bound content.
#[derive(Debug)]
pub struct AnimatedPanel {
    machine: HeightMachine,
    binding: ViewBinding,
    cache: MeasureCache,
    width: u16,
    fallback_height: u16,
}

impl AnimatedPanel {
    /// Create a collapsed panel constrained to `width` display columns.
    #[must_use]
    pub fn new(width: u16) -> Self {
        Self {
            machine: HeightMachine::new(TransitionConfig::default()),
            binding: ViewBinding::new(),
            cache: MeasureCache::default(),
            width,
            fallback_height: DEFAULT_FALLBACK_HEIGHT,
        }
    }

    /// Replace the transition configuration (builder).
    #[must_use]
    pub fn config(mut self, config: TransitionConfig) -> Self {
        let fixed = matches!(self.machine.state(), PanelState::FixedOpen);
        self.machine = if fixed {
            HeightMachine::fixed_open(config)
        } else {
            HeightMachine::new(config)
        };
        self
    }

    /// Set the height used when measurement fails (builder).
    #[must_use]
    pub fn fallback_height(mut self, rows: u16) -> Self {
        self.fallback_height = rows;
        self
    }

    /// Start pinned open at intrinsic height, as if `fix` had already been
    /// called (builder). For hosts whose panel is visible on load with no
    /// interaction.
    #[must_use]
    pub fn start_fixed(mut self) -> Self {
        self.machine = HeightMachine::fixed_open(*self.machine.config());
        self
    }

    /// Register a view (builder). The first registered view is bound.
    #[must_use]
    pub fn view(mut self, descriptor: ContentDescriptor) -> Self {
        self.binding.register(descriptor);
        self
    }

    /// Register a view after construction.
    pub fn register_view(&mut self, descriptor: ContentDescriptor) {
        self.binding.register(descriptor);
    }

    // ---- actions -----------------------------------------------------------

    /// Flip between open and closed, measuring the bound content for the
    /// expansion target. Mid-transition, reverses from the current height.
    pub fn toggle(&mut self) -> Option<PanelEvent> {
        let natural = self.measured_natural();
        self.machine.toggle(natural)
    }

    /// Pin the panel open immediately, with no animation.
    pub fn fix(&mut self) -> Option<PanelEvent> {
        self.machine.fix()
    }

    /// Collapse from any state, cancelling an in-flight transition.
    pub fn close(&mut self) -> Option<PanelEvent> {
        if !self.machine.is_open() {
            return None;
        }
        let natural = self.measured_natural();
        self.machine.close(natural)
    }

    /// Swap the displayed view.
    ///
    /// While open or opening, the panel re-measures and retargets to the new
    /// content's height — it never collapses and re-expands. Binding an
    /// unregistered id is a contract violation surfaced to the caller.
    pub fn switch_view(&mut self, id: ViewId) -> Result<Option<PanelEvent>, BindError> {
        match self.binding.bind(id)? {
            BindOutcome::Unchanged => Ok(None),
            BindOutcome::Bound { previous } => {
                if let Some(previous) = previous {
                    // The displaced view's measurements die with it.
                    self.cache.invalidate_view(previous);
                }
                if self.machine.is_open() {
                    let natural = self.measured_natural();
                    Ok(self.machine.retarget(natural))
                } else {
                    Ok(None)
                }
            }
        }
    }

    /// Change the constrained width, re-measuring and retargeting an open
    /// panel. Width is part of the measurement cache key, so no explicit
    /// invalidation is involved.
    pub fn set_width(&mut self, width: u16) -> Option<PanelEvent> {
        if width == self.width {
            return None;
        }
        self.width = width;
        if self.machine.is_open() && self.binding.current().is_some() {
            let natural = self.measured_natural();
            self.machine.retarget(natural)
        } else {
            None
        }
    }

    // ---- time --------------------------------------------------------------

    /// Advance an in-flight transition by `dt`.
    pub fn tick(&mut self, dt: Duration) -> Option<PanelEvent> {
        self.machine.tick(dt)
    }

    /// External completion signal for the transition identified by
    /// `generation`. Stale and duplicate signals are dropped.
    pub fn notify_transition_end(&mut self, generation: Generation) -> Option<PanelEvent> {
        if generation != self.machine.generation() {
            debug!(
                signal = generation.0,
                current = self.machine.generation().0,
                "stale transition completion dropped"
            );
            return None;
        }
        self.machine.notify_transition_end(generation)
    }

    // ---- observation -------------------------------------------------------

    /// The content marker, when present.
    ///
    /// Present iff content is attached and the panel occupies any vertical
    /// space (every state except `Collapsed`).
    pub fn marker(&self) -> Option<&'static str> {
        self.marker_present().then_some(CONTENT_MARKER)
    }

    /// Whether the content marker is present.
    pub fn marker_present(&self) -> bool {
        self.machine.is_open() && self.binding.current().is_some()
    }

    /// The rows currently visible: wrapped content clipped to the
    /// transitional height, the full content at intrinsic size when settled
    /// open, nothing when collapsed.
    pub fn render(&self) -> Vec<String> {
        let Some(content) = self.binding.current() else {
            return Vec::new();
        };
        let Ok(mut rows) = measure::wrap_lines(content.lines(), self.width) else {
            return Vec::new();
        };
        match self.machine.state() {
            PanelState::Collapsed => Vec::new(),
            PanelState::Expanded { .. } | PanelState::FixedOpen => rows,
            PanelState::Expanding(tw) | PanelState::Collapsing(tw) => {
                rows.truncate(tw.height() as usize);
                rows
            }
        }
    }

    /// The height content currently renders at, in rows.
    pub fn current_height(&self) -> u16 {
        self.machine.rendered_height(self.auto_height())
    }

    /// Current lifecycle state.
    pub fn state(&self) -> &PanelState {
        self.machine.state()
    }

    /// Generation of the current (or most recent) transition.
    pub fn generation(&self) -> Generation {
        self.machine.generation()
    }

    /// Whether no transition is pending.
    pub fn is_settled(&self) -> bool {
        self.machine.is_settled()
    }

    /// The currently bound view, if any.
    pub fn current_view(&self) -> Option<ViewId> {
        self.binding.current().map(ContentDescriptor::id)
    }

    /// Constrained width.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Measurement cache counters.
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    // ---- internal ----------------------------------------------------------

    /// Measure the bound content through the cache, falling back to the
    /// configured default height (with a diagnostic) when measurement fails.
    fn measured_natural(&mut self) -> u16 {
        let width = self.width;
        let Some(content) = self.binding.current() else {
            warn!(
                error = %MeasureError::Unbound,
                fallback = self.fallback_height,
                "height measurement failed, using fallback"
            );
            return self.fallback_height;
        };
        match self
            .cache
            .get_or_compute(content.id(), width, || measure::natural_height(content, width))
        {
            Ok(rows) => rows,
            Err(error) => {
                warn!(
                    %error,
                    fallback = self.fallback_height,
                    "height measurement failed, using fallback"
                );
                self.fallback_height
            }
        }
    }

    /// Intrinsic height for the settled-open states, without touching the
    /// cache (callable from `&self` observation paths).
    fn auto_height(&self) -> u16 {
        match self.binding.current() {
            Some(content) => {
                measure::natural_height(content, self.width).unwrap_or(self.fallback_height)
            }
            None => self.fallback_height,
        }
    }
}
