#![forbid(unsafe_code)]

//! Content descriptors: what the panel is currently hosting.

/// Identifies a registered view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewId(pub u64);

impl ViewId {
    /// Create a view id.
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ViewId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "view-{}", self.0)
    }
}

/// A view's identity plus its body: the logical lines of text the panel
/// shows when this view is bound.
///
/// Logical lines are pre-wrap: the measurer re-flows them at the panel's
/// constrained width, so one logical line may occupy several rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentDescriptor {
    id: ViewId,
    lines: Vec<String>,
}

impl ContentDescriptor {
    /// Create a descriptor from logical lines.
    pub fn new(id: ViewId, lines: Vec<String>) -> Self {
        Self { id, lines }
    }

    /// Create a descriptor from a block of text, splitting on newlines.
    pub fn from_text(id: ViewId, text: &str) -> Self {
        Self {
            id,
            lines: text.lines().map(str::to_owned).collect(),
        }
    }

    /// The view this descriptor belongs to.
    pub fn id(&self) -> ViewId {
        self.id
    }

    /// The logical (unwrapped) lines.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}
