//! Coding errors.
//!
//! Every failure aborts the whole top-level construction: the coder drops
//! its open bodies and clears both operand stacks before returning the
//! error, so no partial function literal escapes.

use std::fmt;

use thiserror::Error;

use crate::Operand;

/// Which operand stack an underflow happened on.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StackKind {
    Statement,
    Expression,
}

impl fmt::Display for StackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StackKind::Statement => f.write_str("statement"),
            StackKind::Expression => f.write_str("expression"),
        }
    }
}

/// Error raised by a coding action.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CodeError {
    /// A node's byte size does not fit the header's size field.
    #[error("function too large for parser: {size} byte node exceeds the {max} byte limit")]
    FunctionTooLarge { size: usize, max: usize },

    /// The body grew past what a node offset can address.
    #[error("function body of {size} bytes cannot be addressed")]
    BodyOverflow { size: usize },

    /// A word outside the current body was addressed, typically through an
    /// operand left on the stacks by an enclosing literal.
    #[error("offset {offset} lies outside the current function body")]
    DanglingOperand { offset: usize },

    #[error("{stack} stack underflow")]
    StackUnderflow { stack: StackKind },

    /// An action that needs a current function literal ran outside one.
    #[error("no function literal is being coded")]
    NoOpenFunction,

    #[error("scope stack underflow")]
    ScopeUnderflow,

    #[error("coding ended with {statements} statement(s) and {expressions} expression(s) pending")]
    UnbalancedStacks {
        statements: usize,
        expressions: usize,
    },

    #[error("coding ended with {depth} function literal(s) still open")]
    UnclosedFunctions { depth: usize },

    /// A protocol marker (count, list position) was not an immediate integer.
    #[error("expected an immediate {what}, found {found:?}")]
    ExpectedImmediate { what: &'static str, found: Operand },

    /// Indexed list access with an index count the node family lacks.
    #[error("{action} takes 1 or 2 indices, got {count}")]
    UnsupportedArity { action: &'static str, count: usize },

    /// The host has no record name for an integer record component.
    #[error("integer {value} cannot name a record component")]
    InvalidRecordName { value: i64 },

    #[error("float literal index space exhausted")]
    FloatIndexExhausted,

    /// The host's numeric conversion rejected an eager float literal.
    #[error("cannot convert float literal `{text}`: {message}")]
    FloatConversion { text: String, message: String },

    #[error("malformed float literal `{text}`")]
    MalformedFloat { text: String },

    /// Saving the float registry while a construction is in progress.
    #[error("cannot snapshot the coder in the middle of a construction")]
    Busy,
}

/// Result of a coding action.
pub type CodeResult<T> = Result<T, CodeError>;

#[cfg(test)]
mod tests;
