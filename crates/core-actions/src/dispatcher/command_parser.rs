//! Structured view of the command buffer tail.
//!
//! Every interpretation pass re-derives the command from the whole buffer:
//! the final character is the command, the nearest preceding letter is the
//! operator prefix, and the digits before the final character form the count.
//! No side effects here; pure classification.

use core_state::CommandBuffer;

/// Operator prefix composing with a following motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Delete,
    Change,
    Yank,
}

impl Operator {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'd' => Some(Self::Delete),
            'c' => Some(Self::Change),
            'y' => Some(Self::Yank),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedCommand {
    /// The just-typed command character.
    pub last: char,
    pub prev: Option<char>,
    pub second_prev: Option<char>,
    /// Raw count, 0 when no digit was typed.
    pub count: u32,
    /// Buffer length including `last`.
    pub len: usize,
    /// `;` (standing in for `:`) directly precedes the command, digits aside.
    pub ex_prefix: bool,
}

impl ParsedCommand {
    pub fn parse(buffer: &CommandBuffer, max_count: u32) -> Option<Self> {
        let last = buffer.last()?;
        Some(Self {
            last,
            prev: buffer.prev_letter(),
            second_prev: buffer.second_prev_letter(),
            count: buffer.scan_count(max_count),
            len: buffer.len(),
            ex_prefix: buffer.preceded_by(';'),
        })
    }

    /// How many times to repeat the action; an absent count means once.
    pub fn repeat(&self) -> u32 {
        self.count.max(1)
    }

    pub fn operator(&self) -> Option<Operator> {
        self.prev.and_then(Operator::from_char)
    }
}
