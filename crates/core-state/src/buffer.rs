//! Command buffer: the characters of the command currently being typed.
//!
//! The buffer is bounded. Its longest legal content is `capacity - 1`
//! characters; the push that reaches that length reports `LimitReached` and the
//! caller abandons the parse (forced flush to insert mode). All parsing helpers
//! look at the characters *before* the final one, which is the command
//! character being dispatched.

use smallvec::SmallVec;
use std::fmt;

/// Inline storage; configured capacities above this spill to the heap.
pub const INLINE_CAPACITY: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    Appended,
    /// The buffer now holds its maximum length (or was already full and the
    /// character was dropped). The pending command must be abandoned.
    LimitReached,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandBuffer {
    chars: SmallVec<[char; INLINE_CAPACITY]>,
    capacity: usize,
}

impl Default for CommandBuffer {
    fn default() -> Self {
        Self::with_capacity(INLINE_CAPACITY)
    }
}

impl CommandBuffer {
    /// `capacity` counts the terminator slot of the fixed-size firmware
    /// buffer, so at most `capacity - 1` characters are ever held.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            chars: SmallVec::new(),
            capacity: capacity.max(2),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn max_len(&self) -> usize {
        self.capacity - 1
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn clear(&mut self) {
        self.chars.clear();
    }

    pub fn as_slice(&self) -> &[char] {
        &self.chars
    }

    /// The final (just typed) character.
    pub fn last(&self) -> Option<char> {
        self.chars.last().copied()
    }

    pub fn push(&mut self, ch: char) -> PushOutcome {
        if self.chars.len() >= self.max_len() {
            return PushOutcome::LimitReached;
        }
        self.chars.push(ch);
        if self.chars.len() == self.max_len() {
            PushOutcome::LimitReached
        } else {
            PushOutcome::Appended
        }
    }

    /// Replace the contents with a copy of `other` (capacity is kept).
    pub fn copy_from(&mut self, other: &CommandBuffer) {
        self.chars.clear();
        let take = other.len().min(self.max_len());
        self.chars.extend_from_slice(&other.chars[..take]);
    }

    fn before_last(&self) -> &[char] {
        &self.chars[..self.chars.len().saturating_sub(1)]
    }

    /// Numeric count typed before the final character.
    ///
    /// Every digit preceding the command character contributes, scanning from
    /// the right with increasing powers of ten (so `3dd`, `d3w` and `12j` yield
    /// 3, 3 and 12). Returns 0 when no digit is present; never exceeds `max`.
    pub fn scan_count(&self, max: u32) -> u32 {
        let mut value: u32 = 0;
        let mut place: u32 = 1;
        for digit in self.before_last().iter().rev().filter_map(|c| c.to_digit(10)) {
            value = value.saturating_add(digit.saturating_mul(place));
            place = place.saturating_mul(10);
        }
        value.min(max)
    }

    /// Nearest letter before the final character (operator prefix).
    pub fn prev_letter(&self) -> Option<char> {
        self.letters_before_last().next()
    }

    /// Second-nearest letter before the final character (operator in front of
    /// a doubled command such as `dgg`).
    pub fn second_prev_letter(&self) -> Option<char> {
        self.letters_before_last().nth(1)
    }

    /// Whether the nearest non-digit character before the final one is `marker`.
    pub fn preceded_by(&self, marker: char) -> bool {
        self.before_last()
            .iter()
            .rev()
            .find(|c| !c.is_ascii_digit())
            .is_some_and(|c| *c == marker)
    }

    fn letters_before_last(&self) -> impl Iterator<Item = char> + '_ {
        self.before_last()
            .iter()
            .rev()
            .copied()
            .filter(char::is_ascii_alphabetic)
    }
}

impl fmt::Display for CommandBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.chars.iter().try_for_each(|c| write!(f, "{c}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buf(s: &str) -> CommandBuffer {
        let mut b = CommandBuffer::default();
        for c in s.chars() {
            b.push(c);
        }
        b
    }

    #[test]
    fn count_absent_is_zero() {
        assert_eq!(buf("w").scan_count(500), 0);
        assert_eq!(buf("dw").scan_count(500), 0);
        assert_eq!(buf("").scan_count(500), 0);
    }

    #[test]
    fn count_prefix_and_infix() {
        assert_eq!(buf("12j").scan_count(500), 12);
        assert_eq!(buf("3dd").scan_count(500), 3);
        assert_eq!(buf("d3w").scan_count(500), 3);
        assert_eq!(buf("05x").scan_count(500), 5);
    }

    #[test]
    fn final_character_never_counts() {
        assert_eq!(buf("10").scan_count(500), 1);
        assert_eq!(buf("7").scan_count(500), 0);
    }

    #[test]
    fn count_is_clamped() {
        assert_eq!(buf("501j").scan_count(500), 500);
        assert_eq!(buf("99999999999999").scan_count(500), 500);
        assert_eq!(buf("20j").scan_count(7), 7);
    }

    #[test]
    fn prev_letters() {
        let b = buf("dgg");
        assert_eq!(b.prev_letter(), Some('g'));
        assert_eq!(b.second_prev_letter(), Some('d'));
        let b = buf("d3w");
        assert_eq!(b.prev_letter(), Some('d'));
        assert_eq!(b.second_prev_letter(), None);
        assert_eq!(buf("w").prev_letter(), None);
    }

    #[test]
    fn prev_letter_skips_symbols() {
        assert_eq!(buf(";w").prev_letter(), None);
        assert_eq!(buf("y;$").prev_letter(), Some('y'));
    }

    #[test]
    fn preceded_by_skips_digits_only() {
        assert!(buf(";w").preceded_by(';'));
        assert!(buf(";2q").preceded_by(';'));
        assert!(!buf("d;1dw").preceded_by(';'));
        assert!(!buf("w").preceded_by(';'));
    }

    #[test]
    fn push_reports_limit_at_capacity_minus_one() {
        let mut b = CommandBuffer::with_capacity(4);
        assert_eq!(b.push('1'), PushOutcome::Appended);
        assert_eq!(b.push('2'), PushOutcome::Appended);
        assert_eq!(b.push('3'), PushOutcome::LimitReached);
        assert_eq!(b.len(), 3);
        assert_eq!(b.push('4'), PushOutcome::LimitReached);
        assert_eq!(b.len(), 3, "never grows past capacity - 1");
    }

    #[test]
    fn default_buffer_holds_fifteen() {
        let mut b = CommandBuffer::default();
        for _ in 0..14 {
            assert_eq!(b.push('d'), PushOutcome::Appended);
        }
        assert_eq!(b.push('d'), PushOutcome::LimitReached);
        assert_eq!(b.len(), 15);
    }

    #[test]
    fn copy_and_display() {
        let src = buf("3cw");
        let mut dst = CommandBuffer::default();
        dst.copy_from(&src);
        assert_eq!(dst, src);
        assert_eq!(dst.to_string(), "3cw");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn with_count(count: u32, command: char) -> CommandBuffer {
        let mut b = CommandBuffer::default();
        for c in count.to_string().chars() {
            b.push(c);
        }
        b.push(command);
        b
    }

    proptest! {
        #[test]
        fn typed_count_is_read_back(count in 1u32..=500, command in prop::sample::select(vec!['j', 'x', 'w', 'G'])) {
            prop_assert_eq!(with_count(count, command).scan_count(500), count);
        }

        #[test]
        fn counts_above_ceiling_clamp(count in 501u32..1_000_000) {
            prop_assert_eq!(with_count(count, 'j').scan_count(500), 500);
        }

        #[test]
        fn push_never_exceeds_max_len(cap in 2usize..32, pushes in 0usize..64) {
            let mut b = CommandBuffer::with_capacity(cap);
            for _ in 0..pushes {
                b.push('d');
            }
            prop_assert!(b.len() <= b.max_len());
        }
    }
}
