//! Insertion log: keys typed during a capturing insert, replayed by `.`.

use core_events::KeyCode;
use smallvec::SmallVec;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordedKey {
    pub code: KeyCode,
    /// Shift state at the moment the key went down.
    pub shifted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertionLog {
    keys: SmallVec<[RecordedKey; 16]>,
    capacity: usize,
}

impl Default for InsertionLog {
    fn default() -> Self {
        Self::with_capacity(16)
    }
}

impl InsertionLog {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            keys: SmallVec::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.keys.len() >= self.capacity
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    /// Append a key; returns `false` (and records nothing) when full.
    pub fn push(&mut self, code: KeyCode, shifted: bool) -> bool {
        if self.is_full() {
            return false;
        }
        self.keys.push(RecordedKey { code, shifted });
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = RecordedKey> + '_ {
        self.keys.iter().copied()
    }
}
