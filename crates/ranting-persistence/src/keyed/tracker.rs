//! Tracks divergence between a displayed collection and its persisted copy.

use std::time::Instant;

/// Tracks whether an in-memory collection differs from what is persisted.
///
/// A failed save leaves the in-memory value in place, so the collection stays
/// dirty until a later save succeeds or an external refresh replaces it.
#[derive(Debug, Clone, Default)]
pub struct DirtyTracker {
    /// Whether memory holds changes the medium does not.
    dirty: bool,

    /// When the most recent local change was made.
    last_change: Option<Instant>,

    /// When the first unsaved change was made. Reset when saved.
    first_unsaved_change: Option<Instant>,

    /// Consecutive failed saves since the last success.
    failed_saves: u32,
}

impl DirtyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if there are unsaved changes.
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Consecutive failed saves since the last successful one.
    #[inline]
    pub fn failed_saves(&self) -> u32 {
        self.failed_saves
    }

    /// Record a local change to the in-memory value.
    pub fn mark_dirty(&mut self) {
        let now = Instant::now();
        self.dirty = true;
        self.last_change = Some(now);
        if self.first_unsaved_change.is_none() {
            self.first_unsaved_change = Some(now);
        }
    }

    /// Memory and medium agree again after a successful save.
    pub fn save_complete(&mut self) {
        self.dirty = false;
        self.first_unsaved_change = None;
        self.failed_saves = 0;
    }

    /// A save failed; memory keeps the attempted value.
    pub fn save_failed(&mut self) {
        self.failed_saves += 1;
    }

    /// Memory was overwritten from the medium; local edits are gone.
    pub fn discard(&mut self) {
        self.dirty = false;
        self.first_unsaved_change = None;
        self.failed_saves = 0;
    }

    /// Milliseconds since the first unsaved change.
    pub fn ms_since_first_unsaved(&self) -> Option<u64> {
        self.first_unsaved_change
            .map(|t| t.elapsed().as_millis() as u64)
    }

    /// Milliseconds since the last local change.
    pub fn ms_since_last_change(&self) -> Option<u64> {
        self.last_change.map(|t| t.elapsed().as_millis() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tracker_is_clean() {
        let tracker = DirtyTracker::new();
        assert!(!tracker.is_dirty());
        assert_eq!(tracker.failed_saves(), 0);
        assert_eq!(tracker.ms_since_last_change(), None);
    }

    #[test]
    fn test_failed_save_stays_dirty() {
        let mut tracker = DirtyTracker::new();
        tracker.mark_dirty();
        tracker.save_failed();
        tracker.save_failed();
        assert!(tracker.is_dirty());
        assert_eq!(tracker.failed_saves(), 2);
        assert!(tracker.ms_since_first_unsaved().is_some());

        tracker.save_complete();
        assert!(!tracker.is_dirty());
        assert_eq!(tracker.failed_saves(), 0);
        assert_eq!(tracker.ms_since_first_unsaved(), None);
    }

    #[test]
    fn test_discard_clears_unsaved_edits() {
        let mut tracker = DirtyTracker::new();
        tracker.mark_dirty();
        tracker.save_failed();
        tracker.discard();
        assert!(!tracker.is_dirty());
        assert!(tracker.ms_since_last_change().is_some());
    }
}
