//! Values table.
//!
//! Literals that do not fit an operand slot (large integers, strings,
//! pragma text, float literals, nested function literals) are appended to
//! the body's values table and referenced from nodes by index. The table is
//! append-only while the body is built and frozen with it.

use std::fmt;
use std::sync::Arc;

use crate::FunctionLiteral;

/// Index into a body's values table.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct ValueId(u32);

impl ValueId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        ValueId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for ValueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ValueId({})", self.0)
    }
}

/// A literal owned by a body's values table.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    /// Integer outside the immediate range.
    Int(i64),
    /// Integer outside the `i64` range, kept as decimal text.
    BigInt(Box<str>),
    String(Box<str>),
    Pragma(Box<str>),
    /// Eagerly converted float literal.
    Float(f64),
    /// Float literal text, kept for lazy conversion and for redisplay.
    FloatText(Box<str>),
    Function(Arc<FunctionLiteral>),
}

impl Value {
    /// Short kind name used in rendered bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Int(_) | Value::BigInt(_) => "int",
            Value::String(_) => "string",
            Value::Pragma(_) => "pragma",
            Value::Float(_) => "float",
            Value::FloatText(_) => "float-text",
            Value::Function(_) => "function",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(value) => write!(f, "{value}"),
            Value::BigInt(text) | Value::FloatText(text) => f.write_str(text),
            Value::String(text) | Value::Pragma(text) => write!(f, "{text:?}"),
            Value::Float(value) => write!(f, "{value:?}"),
            Value::Function(func) => write!(f, "<function/{}>", func.arg_count),
        }
    }
}

/// Append-only table under construction.
#[derive(Clone, Debug, Default)]
pub(crate) struct ValuesTable {
    values: Vec<Value>,
}

impl ValuesTable {
    /// Append a value and return its index. Equal values are not merged.
    pub fn push(&mut self, value: Value) -> ValueId {
        let id = ValueId::new(u32::try_from(self.values.len()).unwrap_or(u32::MAX));
        self.values.push(value);
        id
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Make the table immutable.
    pub fn freeze(self) -> Box<[Value]> {
        self.values.into_boxed_slice()
    }
}

#[cfg(test)]
mod tests;
