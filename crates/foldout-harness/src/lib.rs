#![forbid(unsafe_code)]

//! Deterministic scenario harness for the foldout panel.
//!
//! [`PanelSimulator`] stands in for a real host page: it owns a panel, a
//! virtual clock, and the button wiring (`Toggle`, `Fix`, `Close`,
//! `View N`), and exposes the two observations the end-to-end suites assert
//! on — marker visibility and on-screen text. Time only moves when the test
//! says so, in frame-sized steps, so every run is reproducible.

use std::time::Duration;

use foldout_core::PanelEvent;
use foldout_widgets::{AnimatedPanel, BindError, ViewId};

/// Default frame step: roughly one 60 Hz frame.
const FRAME: Duration = Duration::from_millis(16);

/// Safety bound for [`PanelSimulator::settle`]; no configured transition
/// needs anywhere near this many frames.
const MAX_SETTLE_FRAMES: u32 = 10_000;

/// Drives an [`AnimatedPanel`] with host-style actions and a virtual clock.
#[derive(Debug)]
pub struct PanelSimulator {
    panel: AnimatedPanel,
    frame: Duration,
    elapsed: Duration,
    events: Vec<PanelEvent>,
}

impl PanelSimulator {
    /// Wrap a panel with the default frame step.
    #[must_use]
    pub fn new(panel: AnimatedPanel) -> Self {
        Self {
            panel,
            frame: FRAME,
            elapsed: Duration::ZERO,
            events: Vec::new(),
        }
    }

    /// Use a custom frame step (builder).
    #[must_use]
    pub fn with_frame(mut self, frame: Duration) -> Self {
        self.frame = if frame.is_zero() { FRAME } else { frame };
        self
    }

    // ---- buttons -----------------------------------------------------------

    /// The `Toggle` button.
    pub fn press_toggle(&mut self) {
        let event = self.panel.toggle();
        self.record(event);
    }

    /// The `Fix` button.
    pub fn press_fix(&mut self) {
        let event = self.panel.fix();
        self.record(event);
    }

    /// The `Close` button.
    pub fn press_close(&mut self) {
        let event = self.panel.close();
        self.record(event);
    }

    /// A `View N` button: binds the view, opening the panel first if it is
    /// currently collapsed (host behavior in the reference pages).
    pub fn press_view(&mut self, id: ViewId) -> Result<(), BindError> {
        let event = self.panel.switch_view(id)?;
        self.record(event);
        if !self.panel.marker_present() {
            self.press_toggle();
        }
        Ok(())
    }

    // ---- clock -------------------------------------------------------------

    /// Advance the virtual clock by `dt`, ticking the panel frame by frame.
    pub fn advance(&mut self, dt: Duration) {
        let mut remaining = dt;
        while remaining > Duration::ZERO {
            let step = remaining.min(self.frame);
            let event = self.panel.tick(step);
            self.record(event);
            self.elapsed += step;
            remaining -= step;
        }
    }

    /// Advance until no transition is pending.
    pub fn settle(&mut self) {
        let mut frames = 0u32;
        while !self.panel.is_settled() && frames < MAX_SETTLE_FRAMES {
            self.advance(self.frame);
            frames += 1;
        }
    }

    /// Deliver the underlying completion signal for the current transition,
    /// as a host's transition-end callback would.
    pub fn deliver_transition_end(&mut self) {
        let generation = self.panel.generation();
        let event = self.panel.notify_transition_end(generation);
        self.record(event);
    }

    // ---- observations ------------------------------------------------------

    /// Whether the content marker is in the document.
    pub fn marker_visible(&self) -> bool {
        self.panel.marker_present()
    }

    /// The visible rows joined into one screen string.
    pub fn screen_text(&self) -> String {
        self.panel.render().join("\n")
    }

    /// Whether `needle` is visible anywhere on screen.
    pub fn sees(&self, needle: &str) -> bool {
        self.screen_text().contains(needle)
    }

    /// Virtual time elapsed so far.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Every event the panel has emitted, in order.
    pub fn events(&self) -> &[PanelEvent] {
        &self.events
    }

    /// The panel under test.
    pub fn panel(&self) -> &AnimatedPanel {
        &self.panel
    }

    /// Mutable access for direct manipulation mid-scenario.
    pub fn panel_mut(&mut self) -> &mut AnimatedPanel {
        &mut self.panel
    }

    fn record(&mut self, event: Option<PanelEvent>) {
        if let Some(event) = event {
            self.events.push(event);
        }
    }
}
