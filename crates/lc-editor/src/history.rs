//! Linear undo/redo history.
//!
//! History is an index-addressed sequence of snapshots. The visible state
//! is always `entries[index]`. Undo and redo only move the index; a new
//! (non-overwrite) commit drops everything after the index before
//! appending, so there is never a redo branch to fall back to.
//!
//! Snapshots are owned values. Callers build the next snapshot from a
//! copy of the current one and move it in, so two entries never share
//! storage, even after a truncation.
//!
//! Drag gestures rely on **overwrite commits**: the gesture opens one new
//! entry on pointer-down and overwrites it on every pointer-move, which
//! makes the whole gesture a single undo step.

/// Undo/redo history over snapshots of type `T`.
#[derive(Debug, Clone)]
pub struct History<T> {
    entries: Vec<T>,
    index: usize,
    /// Maximum number of entries kept. `None` = unbounded.
    max_depth: Option<usize>,
}

impl<T> History<T> {
    /// Start a history whose only entry is `initial`.
    pub fn new(initial: T) -> Self {
        Self {
            entries: vec![initial],
            index: 0,
            max_depth: None,
        }
    }

    /// Like `new`, but keeps at most `max_depth` entries (at least one),
    /// dropping the oldest first.
    pub fn with_max_depth(initial: T, max_depth: usize) -> Self {
        Self {
            max_depth: Some(max_depth.max(1)),
            ..Self::new(initial)
        }
    }

    /// The visible snapshot.
    pub fn current(&self) -> &T {
        &self.entries[self.index]
    }

    /// Record a new state.
    ///
    /// With `overwrite`, the snapshot at the current index is replaced in
    /// place and the index does not move. Otherwise every entry after the
    /// index is discarded, `state` is appended, and the index advances.
    pub fn commit(&mut self, state: T, overwrite: bool) {
        if overwrite {
            self.entries[self.index] = state;
            return;
        }

        self.entries.truncate(self.index + 1);
        self.entries.push(state);
        self.index += 1;

        if let Some(max) = self.max_depth
            && self.entries.len() > max
        {
            let excess = self.entries.len() - max;
            self.entries.drain(..excess);
            self.index -= excess;
        }
    }

    /// Functional form of `commit`: `f` builds the next state from the
    /// current one.
    pub fn commit_with(&mut self, f: impl FnOnce(&T) -> T, overwrite: bool) {
        let state = f(self.current());
        self.commit(state, overwrite);
    }

    /// Step back one entry. Returns `false` (no-op) at the oldest entry.
    pub fn undo(&mut self) -> bool {
        if self.index > 0 {
            self.index -= 1;
            true
        } else {
            false
        }
    }

    /// Step forward one entry. Returns `false` (no-op) at the newest entry.
    pub fn redo(&mut self) -> bool {
        if self.index + 1 < self.entries.len() {
            self.index += 1;
            true
        } else {
            false
        }
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    /// Number of entries, including the current one.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`: a history holds at least one entry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }
}
