//! Undo/redo bookkeeping for the canvas.
//!
//! The canvas only ever mutates its annotation list by appending, so the
//! history is a log of inverse actions rather than full-state snapshots.
//! Each entry records where an annotation was inserted and a copy of it,
//! which is everything needed to remove it again (undo) or put it back
//! (redo).

use crate::draw::Annotation;

/// One recorded canvas mutation.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    /// Position the annotation occupied in the z-ordered list.
    pub index: usize,
    /// Copy of the annotation itself.
    pub annotation: Annotation,
}

/// Inverse-action log with optional depth cap.
#[derive(Debug, Default)]
pub struct History {
    undo: Vec<HistoryEntry>,
    redo: Vec<HistoryEntry>,
    /// Maximum undo depth; 0 means unbounded.
    max_depth: usize,
}

impl History {
    pub fn new(max_depth: usize) -> Self {
        Self {
            undo: Vec::new(),
            redo: Vec::new(),
            max_depth,
        }
    }

    /// Records an append. Any redoable entries are discarded, since the
    /// timeline has forked.
    pub fn record(&mut self, index: usize, annotation: Annotation) {
        self.redo.clear();
        self.undo.push(HistoryEntry { index, annotation });
        if self.max_depth > 0 && self.undo.len() > self.max_depth {
            self.undo.remove(0);
        }
    }

    /// Moves the most recent entry to the redo stack and returns it.
    pub fn undo(&mut self) -> Option<&HistoryEntry> {
        let entry = self.undo.pop()?;
        self.redo.push(entry);
        self.redo.last()
    }

    /// Moves the most recently undone entry back and returns it.
    pub fn redo(&mut self) -> Option<&HistoryEntry> {
        let entry = self.redo.pop()?;
        self.undo.push(entry);
        self.undo.last()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::RED;

    fn line(x2: i32) -> Annotation {
        Annotation::Line {
            x1: 0,
            y1: 0,
            x2,
            y2: 10,
            color: RED,
            thickness: 2.0,
        }
    }

    #[test]
    fn undo_and_redo_walk_the_log() {
        let mut history = History::new(0);
        history.record(0, line(1));
        history.record(1, line(2));

        let entry = history.undo().unwrap();
        assert_eq!(entry.index, 1);
        assert!(history.can_redo());

        let entry = history.redo().unwrap();
        assert_eq!(entry.index, 1);
        assert!(!history.can_redo());
    }

    #[test]
    fn record_discards_redo_branch() {
        let mut history = History::new(0);
        history.record(0, line(1));
        history.undo();
        history.record(0, line(2));
        assert!(!history.can_redo());
        assert!(history.redo().is_none());
    }

    #[test]
    fn depth_cap_evicts_oldest_entry() {
        let mut history = History::new(2);
        history.record(0, line(1));
        history.record(1, line(2));
        history.record(2, line(3));

        assert_eq!(history.undo().unwrap().index, 2);
        assert_eq!(history.undo().unwrap().index, 1);
        assert!(history.undo().is_none());
    }

    #[test]
    fn zero_depth_is_unbounded() {
        let mut history = History::new(0);
        for i in 0..100 {
            history.record(i, line(i as i32));
        }
        for _ in 0..100 {
            assert!(history.undo().is_some());
        }
        assert!(!history.can_undo());
    }
}
