#![forbid(unsafe_code)]

//! View content binding: a registry of descriptors and the one currently
//! displayed.
//!
//! The binding knows nothing about heights or transitions; it only answers
//! "what is bound" and "did this bind actually change anything". The panel
//! layer reacts to a changed bind by invalidating the previous view's
//! measurements and retargeting.

use crate::content::{ContentDescriptor, ViewId};

/// Contract violation: a bind referenced a view that was never registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindError {
    /// The id is not in the registry.
    UnknownView(ViewId),
}

impl std::fmt::Display for BindError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownView(id) => write!(f, "cannot bind unregistered {id}"),
        }
    }
}

impl std::error::Error for BindError {}

/// What a successful bind did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindOutcome {
    /// The requested view was already bound; nothing changed.
    Unchanged,
    /// The bound view changed. `previous` is the view that was displaced,
    /// if any.
    Bound {
        /// Displaced view, `None` when nothing was bound before.
        previous: Option<ViewId>,
    },
}

/// Registry of switchable views plus the active one.
///
/// The first registered view becomes current automatically, so a
/// single-view panel needs no explicit bind.
#[derive(Debug, Clone, Default)]
pub struct ViewBinding {
    views: Vec<ContentDescriptor>,
    current: Option<usize>,
}

impl ViewBinding {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a view, replacing any previous descriptor with the same id.
    pub fn register(&mut self, descriptor: ContentDescriptor) {
        if let Some(slot) = self.views.iter_mut().find(|d| d.id() == descriptor.id()) {
            *slot = descriptor;
            return;
        }
        self.views.push(descriptor);
        if self.current.is_none() {
            self.current = Some(self.views.len() - 1);
        }
    }

    /// Bind `id`, making its descriptor the displayed content.
    pub fn bind(&mut self, id: ViewId) -> Result<BindOutcome, BindError> {
        let index = self
            .views
            .iter()
            .position(|d| d.id() == id)
            .ok_or(BindError::UnknownView(id))?;
        if self.current == Some(index) {
            return Ok(BindOutcome::Unchanged);
        }
        let previous = self.current.map(|i| self.views[i].id());
        self.current = Some(index);
        Ok(BindOutcome::Bound { previous })
    }

    /// The currently bound descriptor.
    pub fn current(&self) -> Option<&ContentDescriptor> {
        self.current.map(|i| &self.views[i])
    }

    /// Whether `id` is registered.
    pub fn contains(&self, id: ViewId) -> bool {
        self.views.iter().any(|d| d.id() == id)
    }

    /// Number of registered views.
    pub fn len(&self) -> usize {
        self.views.len()
    }

    /// Whether no views are registered.
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }
}
