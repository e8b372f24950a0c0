#![forbid(unsafe_code)]

//! Natural-height measurement.
//!
//! The panel animates toward the height its content *would* occupy if left
//! unconstrained — a value that cannot be observed from the rendered panel
//! while it is collapsed or mid-transition. Measurement here is pure
//! computation against the descriptor: logical lines are wrapped at the
//! constrained width (grapheme-aware, display-width-aware) and the wrapped
//! rows are counted. Nothing is ever painted at the wrong size, so the
//! measurement can never flash.
//!
//! Results are memoized in [`MeasureCache`], keyed by view identity plus
//! width. Width is part of the key, so a viewport resize needs no explicit
//! invalidation — the new width simply misses. Content swaps invalidate by
//! view id; wholesale invalidation bumps a generation, making every existing
//! entry a miss without rehashing the map.

use std::collections::HashMap;

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::content::{ContentDescriptor, ViewId};

/// Why content could not be measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureError {
    /// The container width is zero; no wrapping is possible.
    ZeroWidth,
    /// No content is bound to the panel.
    Unbound,
}

impl std::fmt::Display for MeasureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroWidth => write!(f, "content container has zero width"),
            Self::Unbound => write!(f, "no content is bound to the panel"),
        }
    }
}

impl std::error::Error for MeasureError {}

/// Wrap logical lines at `width` display columns.
///
/// Breaks at word boundaries where possible; a word wider than the whole row
/// is hard-broken at grapheme boundaries. Whitespace falling on a break is
/// dropped rather than carried to the next row. An empty logical line still
/// occupies one row.
pub fn wrap_lines(lines: &[String], width: u16) -> Result<Vec<String>, MeasureError> {
    if width == 0 {
        return Err(MeasureError::ZeroWidth);
    }
    let width = width as usize;
    let mut rows = Vec::new();
    for line in lines {
        wrap_one(line, width, &mut rows);
    }
    Ok(rows)
}

fn wrap_one(line: &str, width: usize, rows: &mut Vec<String>) {
    if line.is_empty() {
        rows.push(String::new());
        return;
    }

    let rows_before = rows.len();
    let mut current = String::new();
    let mut used = 0usize;

    for word in line.split_word_bounds() {
        let w = UnicodeWidthStr::width(word);
        if w == 0 {
            // Zero-width segments (combining marks, ZWJ) stay with the row.
            current.push_str(word);
            continue;
        }
        if used + w <= width {
            current.push_str(word);
            used += w;
            continue;
        }
        if w <= width {
            rows.push(std::mem::take(&mut current));
            used = 0;
            if word.trim().is_empty() {
                continue;
            }
            current.push_str(word);
            used = w;
        } else {
            // Wider than a full row: hard-break at grapheme boundaries.
            for g in word.graphemes(true) {
                let gw = UnicodeWidthStr::width(g);
                if gw == 0 {
                    current.push_str(g);
                    continue;
                }
                if used + gw > width {
                    rows.push(std::mem::take(&mut current));
                    used = 0;
                }
                current.push_str(g);
                used += gw;
            }
        }
    }

    if !current.is_empty() || rows.len() == rows_before {
        rows.push(current);
    }
}

/// The natural row height of `content` wrapped at `width`.
pub fn natural_height(content: &ContentDescriptor, width: u16) -> Result<u16, MeasureError> {
    let rows = wrap_lines(content.lines(), width)?;
    Ok(rows.len().min(u16::MAX as usize) as u16)
}

// ---------------------------------------------------------------------------
// Cache
// ---------------------------------------------------------------------------

/// Cache key: view identity plus the width the measurement was taken at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CacheKey {
    view: ViewId,
    width: u16,
}

#[derive(Debug, Clone)]
struct CacheEntry {
    rows: u16,
    generation: u64,
    access_count: u32,
}

/// Cache performance counters.
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    /// Entries currently held (including stale-generation ones).
    pub entries: usize,
    /// Hits since creation.
    pub hits: u64,
    /// Misses since creation.
    pub misses: u64,
    /// Hits as a fraction of lookups, 0.0 when no lookups yet.
    pub hit_rate: f64,
}

/// Memoizes natural-height measurements.
///
/// Bounded capacity with least-frequently-used eviction. Measurement errors
/// are never cached; the next lookup recomputes.
#[derive(Debug)]
pub struct MeasureCache {
    entries: HashMap<CacheKey, CacheEntry>,
    generation: u64,
    max_entries: usize,
    hits: u64,
    misses: u64,
}

impl Default for MeasureCache {
    fn default() -> Self {
        Self::new(64)
    }
}

impl MeasureCache {
    /// Create a cache holding at most `max_entries` measurements.
    #[must_use]
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(max_entries.min(64)),
            generation: 0,
            max_entries: max_entries.max(1),
            hits: 0,
            misses: 0,
        }
    }

    /// Return the cached height for `(view, width)` or compute and cache it.
    ///
    /// Entries from before the last [`invalidate_all`](Self::invalidate_all)
    /// are treated as misses.
    pub fn get_or_compute<F>(
        &mut self,
        view: ViewId,
        width: u16,
        compute: F,
    ) -> Result<u16, MeasureError>
    where
        F: FnOnce() -> Result<u16, MeasureError>,
    {
        let key = CacheKey { view, width };
        if let Some(entry) = self.entries.get_mut(&key)
            && entry.generation == self.generation
        {
            entry.access_count = entry.access_count.saturating_add(1);
            self.hits += 1;
            return Ok(entry.rows);
        }

        self.misses += 1;
        let rows = compute()?;
        if self.entries.len() >= self.max_entries && !self.entries.contains_key(&key) {
            self.evict_one();
        }
        self.entries.insert(
            key,
            CacheEntry {
                rows,
                generation: self.generation,
                access_count: 1,
            },
        );
        Ok(rows)
    }

    /// Drop every measurement taken for `view`, at any width.
    pub fn invalidate_view(&mut self, view: ViewId) {
        self.entries.retain(|key, _| key.view != view);
    }

    /// Make every existing entry stale.
    pub fn invalidate_all(&mut self) {
        self.generation += 1;
    }

    /// Current counters.
    pub fn stats(&self) -> CacheStats {
        let lookups = self.hits + self.misses;
        CacheStats {
            entries: self.entries.len(),
            hits: self.hits,
            misses: self.misses,
            hit_rate: if lookups == 0 {
                0.0
            } else {
                self.hits as f64 / lookups as f64
            },
        }
    }

    /// Evict a least-frequently-used entry, preferring stale generations.
    fn evict_one(&mut self) {
        let victim = self
            .entries
            .iter()
            .min_by_key(|(_, e)| (e.generation == self.generation, e.access_count))
            .map(|(key, _)| *key);
        if let Some(key) = victim {
            self.entries.remove(&key);
        }
    }
}
