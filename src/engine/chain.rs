// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Bounded continuation stack driving screen pagination
//!
//! The [Chain] holds references to pending [Formatter]s rather than
//! rendered content, so memory use is fixed however many fields an
//! operation carries. Slots below the cursor are retained so a backward
//! step re-runs the prior formatter without re-decoding. Exceeding the
//! provisioned depth is a fatal session error, never a silently shortened
//! chain, as a dropped screen is a dropped review field.

use static_assertions::const_assert;

use super::{format::Formatter, Error};

/// Formatter slots per chain, sized for the deepest operation
/// (SetOptions with every optional field present) plus its sentinel
pub const CHAIN_DEPTH: usize = 16;

// SetOptions renders up to twelve screens ahead of the sentinel
const_assert!(CHAIN_DEPTH >= 14);

/// Fixed-capacity formatter stack with a top-of-stack cursor
///
/// The formatter at the cursor renders the current screen and pushes its
/// own successor (or a `None` sentinel) at the slot above, see
/// [ReviewSession][super::ReviewSession] for the walk across elements.
pub struct Chain {
    slots: [Option<Formatter>; CHAIN_DEPTH],
    cursor: usize,
}

impl Chain {
    pub const fn new() -> Self {
        Self {
            slots: [None; CHAIN_DEPTH],
            cursor: 0,
        }
    }

    /// Clear all slots and load `entry` as the new base formatter
    pub fn reset(&mut self, entry: Formatter) {
        self.clear();
        self.slots[0] = Some(entry);
    }

    /// Clear all slots without loading a new entry point
    pub fn clear(&mut self) {
        self.slots = [None; CHAIN_DEPTH];
        self.cursor = 0;
    }

    /// Formatter at the cursor, `None` once the chain is exhausted
    pub fn current(&self) -> Option<Formatter> {
        self.slots[self.cursor]
    }

    /// Replace the formatter at the cursor, used when a formatter skips
    /// an absent optional field and resolves to a later chain step
    pub fn set_current(&mut self, f: Formatter) {
        self.slots[self.cursor] = Some(f);
    }

    /// Store the successor for the formatter at the cursor
    ///
    /// A `None` successor marks the end of the current element. Fails with
    /// [Error::StackOverflow] when the chain is deeper than provisioned.
    pub fn push(&mut self, next: Option<Formatter>) -> Result<(), Error> {
        if self.cursor + 1 >= CHAIN_DEPTH {
            return Err(Error::StackOverflow);
        }

        self.slots[self.cursor + 1] = next;
        Ok(())
    }

    /// Check whether a successor formatter is pending above the cursor
    pub fn has_next(&self) -> bool {
        self.cursor + 1 < CHAIN_DEPTH && self.slots[self.cursor + 1].is_some()
    }

    /// Move the cursor up to the previously pushed successor
    pub fn step_forward(&mut self) {
        debug_assert!(self.has_next());
        self.cursor += 1;
    }

    /// Move the cursor down one slot, returns false at the chain base
    pub fn step_back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }

        self.cursor -= 1;
        true
    }
}
