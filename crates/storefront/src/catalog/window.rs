//! Render-side chunked pagination over the filtered list.
//!
//! The Mini App grows the visible slice in fixed chunks as a sentinel
//! element scrolls into view, and snaps back to the first chunk whenever
//! the filtered list changes identity. Invariants: visible count never
//! exceeds the total, and never decreases except on reset.

/// An incrementally growing window over a list of known length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleWindow {
    chunk: usize,
    total: usize,
    visible: usize,
}

impl VisibleWindow {
    /// Create a window growing by `chunk` items at a time (minimum 1).
    #[must_use]
    pub const fn new(chunk: usize) -> Self {
        let chunk = if chunk == 0 { 1 } else { chunk };
        Self {
            chunk,
            total: 0,
            visible: 0,
        }
    }

    /// Reset for a new filtered list of `total` items: the visible count
    /// snaps back to the first chunk.
    pub const fn reset(&mut self, total: usize) {
        self.total = total;
        self.visible = if self.chunk < total { self.chunk } else { total };
    }

    /// Grow by one chunk (the sentinel became visible).
    pub const fn extend(&mut self) {
        let grown = self.visible + self.chunk;
        self.visible = if grown < self.total { grown } else { self.total };
    }

    /// Items currently visible.
    #[must_use]
    pub const fn visible(&self) -> usize {
        self.visible
    }

    /// Whether the whole list is visible (the sentinel can be removed).
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.visible >= self.total
    }
}
