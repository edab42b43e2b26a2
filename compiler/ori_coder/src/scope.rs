//! Interrupted constructions.
//!
//! Beginning a nested function literal suspends the enclosing one: its
//! write cursor and its pending function are saved here and restored when
//! the nested literal ends. The outermost literal saves an empty
//! continuation, so the stack depth equals the number of open literals.

use crate::body::{Body, SourceId};
use crate::{CodeError, CodeResult};

/// Function literal whose body is being coded.
#[derive(Debug)]
pub(crate) struct PendingFunction {
    pub arg_count: i32,
    pub local_count: u32,
    pub names: Vec<String>,
    pub body: Body,
}

impl PendingFunction {
    pub fn source(&self) -> SourceId {
        self.body.source()
    }
}

/// Saved state of a suspended construction.
#[derive(Debug)]
pub(crate) struct Continuation {
    pub cursor: usize,
    pub function: Option<PendingFunction>,
}

#[derive(Debug, Default)]
pub(crate) struct ScopeStack {
    saved: Vec<Continuation>,
}

impl ScopeStack {
    pub fn push(&mut self, continuation: Continuation) {
        self.saved.push(continuation);
    }

    pub fn pop(&mut self) -> CodeResult<Continuation> {
        self.saved.pop().ok_or(CodeError::ScopeUnderflow)
    }

    /// Number of open function literals.
    #[inline]
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    pub fn clear(&mut self) {
        self.saved.clear();
    }
}

#[cfg(test)]
mod tests;
