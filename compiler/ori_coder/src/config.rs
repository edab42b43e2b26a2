//! Coder configuration.

use crate::SLOT_SIZE;

/// Tunables of a [`Coder`](crate::Coder).
///
/// None of these change the produced code; they only trade memory for
/// fewer reallocations.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CoderConfig {
    /// Initial size of a new function body, in slots.
    pub initial_body_slots: usize,
    /// Initial capacity of each operand stack.
    pub stack_capacity: usize,
}

impl Default for CoderConfig {
    fn default() -> Self {
        CoderConfig {
            initial_body_slots: 1024,
            stack_capacity: 64,
        }
    }
}

impl CoderConfig {
    #[must_use]
    pub fn with_initial_body_slots(mut self, slots: usize) -> Self {
        self.initial_body_slots = slots;
        self
    }

    #[must_use]
    pub fn with_stack_capacity(mut self, capacity: usize) -> Self {
        self.stack_capacity = capacity;
        self
    }

    /// Initial body size in bytes.
    pub(crate) fn initial_body_bytes(&self) -> usize {
        self.initial_body_slots.saturating_mul(SLOT_SIZE)
    }
}
