//! Operand stacks.
//!
//! Two of these live in a [`Coder`](crate::Coder): one for finished
//! statements and one for finished expressions. Entries are opaque.

use smallvec::SmallVec;

use crate::{CodeError, CodeResult, StackKind};

/// Batch of popped entries, in push order.
pub(crate) type Popped<T> = SmallVec<[T; 8]>;

#[derive(Clone, Debug)]
pub(crate) struct OperandStack<T> {
    kind: StackKind,
    entries: Vec<T>,
}

impl<T: Copy> OperandStack<T> {
    pub fn with_capacity(kind: StackKind, capacity: usize) -> Self {
        OperandStack {
            kind,
            entries: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Push an entry, doubling the backing storage when full.
    pub fn push(&mut self, entry: T) {
        if self.entries.len() == self.entries.capacity() {
            self.entries.reserve(self.entries.capacity() + 1);
        }
        self.entries.push(entry);
    }

    pub fn pop(&mut self) -> CodeResult<T> {
        self.entries.pop().ok_or_else(|| self.underflow())
    }

    /// Top entry without removing it.
    pub fn peek(&self) -> CodeResult<T> {
        self.entries.last().copied().ok_or_else(|| self.underflow())
    }

    /// Entry `depth` places below the top.
    pub fn peek_at(&self, depth: usize) -> CodeResult<T> {
        self.entries
            .len()
            .checked_sub(depth + 1)
            .and_then(|index| self.entries.get(index))
            .copied()
            .ok_or_else(|| self.underflow())
    }

    /// Pop the top `count` entries, returned oldest first.
    pub fn pop_many(&mut self, count: usize) -> CodeResult<Popped<T>> {
        let start = self
            .entries
            .len()
            .checked_sub(count)
            .ok_or_else(|| self.underflow())?;
        Ok(self.entries.drain(start..).collect())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn underflow(&self) -> CodeError {
        CodeError::StackUnderflow { stack: self.kind }
    }
}
