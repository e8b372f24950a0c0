#![forbid(unsafe_code)]

//! Foldout public facade crate.
//!
//! Re-exports the common types from the internal crates and offers a
//! lightweight prelude for day-to-day usage. Hosts typically need exactly
//! three things: build an [`AnimatedPanel`], drive it with the four actions,
//! and advance it with [`AnimatedPanel::tick`] from their frame loop.
//!
//! ```
//! use foldout::prelude::*;
//! use std::time::Duration;
//!
//! let mut panel = AnimatedPanel::new(60)
//!     .view(ContentDescriptor::from_text(ViewId(1), "hello"));
//! panel.toggle();
//! panel.tick(Duration::from_secs(1));
//! assert!(panel.marker_present());
//! ```

// --- Core re-exports -------------------------------------------------------

pub use foldout_core::easing::{EasingFn, ease_in, ease_in_out, ease_out, linear};
pub use foldout_core::machine::{
    Generation, HeightMachine, PanelEvent, PanelState, RetargetPolicy, TransitionConfig,
};
pub use foldout_core::tween::HeightTween;

// --- Widget re-exports -----------------------------------------------------

pub use foldout_widgets::binding::{BindError, BindOutcome, ViewBinding};
pub use foldout_widgets::content::{ContentDescriptor, ViewId};
pub use foldout_widgets::measure::{CacheStats, MeasureCache, MeasureError};
pub use foldout_widgets::panel::{AnimatedPanel, CONTENT_MARKER};

/// Commonly used types in one import.
pub mod prelude {
    pub use foldout_core::machine::{PanelEvent, PanelState, RetargetPolicy, TransitionConfig};
    pub use foldout_widgets::content::{ContentDescriptor, ViewId};
    pub use foldout_widgets::panel::AnimatedPanel;
}
