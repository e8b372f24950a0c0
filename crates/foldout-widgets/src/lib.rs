#![forbid(unsafe_code)]

//! The foldout panel component: content binding, height measurement, and the
//! public [`AnimatedPanel`] that hosts drive with `toggle` / `fix` / `close`
//! / `switch_view`.
//!
//! The panel is headless: content is text, heights are rows, and the
//! observable surface is [`AnimatedPanel::render`] (the rows currently
//! visible) plus [`AnimatedPanel::marker`] (present whenever content is
//! attached and the panel occupies any vertical space). Hosts own buttons,
//! layout, and scheduling; the panel owns the height lifecycle.

pub mod binding;
pub mod content;
pub mod measure;
pub mod panel;

pub use binding::{BindError, BindOutcome, ViewBinding};
pub use content::{ContentDescriptor, ViewId};
pub use measure::{CacheStats, MeasureCache, MeasureError};
pub use panel::{AnimatedPanel, CONTENT_MARKER};
