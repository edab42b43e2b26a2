//! Node offsets, variable references and operand slot encoding.
//!
//! Nodes are addressed by byte offset into their body, never by pointer:
//! the body buffer is resized (and therefore moved) while it is being
//! built, and an offset stays valid across every resize.
//!
//! # Slot encoding
//!
//! An operand slot is one 64-bit word. Node offsets are multiples of the
//! slot width, so the two low bits are free to tag immediates:
//!
//! | low bits | meaning                                |
//! |----------|----------------------------------------|
//! | `00`     | node offset (`0` = absent)             |
//! | `01`     | immediate integer, `value << 2`        |
//! | `11`     | local variable reference, `slot << 2`  |

use std::fmt;

/// Tag bits of an immediate integer.
const INT_TAG: u64 = 0b01;
/// Tag bits of a local variable reference.
const LOCAL_TAG: u64 = 0b11;
/// Mask selecting the tag bits.
const TAG_MASK: u64 = 0b11;

/// Smallest integer that can be coded as an immediate.
pub const IMMEDIATE_MIN: i64 = -(1 << 61);
/// Largest integer that can be coded as an immediate.
pub const IMMEDIATE_MAX: i64 = (1 << 61) - 1;

/// Byte offset of a node's first slot within its body.
///
/// Distinct from a values table index ([`ValueId`](crate::ValueId)); the two
/// never mix.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub const fn new(offset: u32) -> Self {
        NodeId(offset)
    }

    /// Byte offset into the body.
    #[inline]
    pub const fn offset(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId(@{})", self.0)
    }
}

/// Index of a local variable in the current function's frame.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct LocalVar(pub u32);

/// Variable of an enclosing function, addressed by nesting level and index.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct EnclosingVar {
    /// Number of function boundaries between the use and the definition.
    pub level: u16,
    pub index: u16,
}

impl EnclosingVar {
    #[inline]
    pub const fn new(level: u16, index: u16) -> Self {
        Self { level, index }
    }

    /// Raw slot value: level in the high half, index in the low half.
    #[inline]
    pub const fn raw(self) -> u64 {
        ((self.level as u64) << 16) | self.index as u64
    }

    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self {
            level: ((raw >> 16) & 0xFFFF) as u16,
            index: (raw & 0xFFFF) as u16,
        }
    }
}

/// Identifier of a global variable, resolved outside the coder.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct GlobalVar(pub u32);

/// Identifier of a record component name, resolved outside the coder.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct RecordName(pub u32);

/// Value of an operand slot or an operand stack entry.
///
/// Only [`Operand::Node`] refers to memory in the body. Code that follows an
/// operand into the body must match on it first; immediates have no header.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Operand {
    Node(NodeId),
    Int(i64),
    Local(LocalVar),
}

impl Operand {
    /// Immediate integer, if `value` is in the immediate range.
    #[inline]
    pub fn int(value: i64) -> Option<Operand> {
        fits_immediate(value).then_some(Operand::Int(value))
    }

    /// The node offset, or `None` for immediates.
    #[inline]
    pub fn node(self) -> Option<NodeId> {
        match self {
            Operand::Node(id) => Some(id),
            Operand::Int(_) | Operand::Local(_) => None,
        }
    }

    /// The immediate integer, or `None` for nodes and locals.
    #[inline]
    pub fn as_int(self) -> Option<i64> {
        match self {
            Operand::Int(value) => Some(value),
            Operand::Node(_) | Operand::Local(_) => None,
        }
    }

    /// Encode into a slot word.
    #[inline]
    #[allow(clippy::cast_sign_loss, reason = "two's complement bit pattern")]
    pub fn encode(self) -> u64 {
        match self {
            Operand::Node(id) => u64::from(id.raw()),
            Operand::Int(value) => ((value as u64) << 2) | INT_TAG,
            Operand::Local(LocalVar(slot)) => (u64::from(slot) << 2) | LOCAL_TAG,
        }
    }

    /// Decode a slot word. A zero word is an absent operand.
    #[inline]
    #[allow(clippy::cast_possible_wrap, reason = "arithmetic shift restores the sign")]
    pub fn decode(word: u64) -> Option<Operand> {
        match word & TAG_MASK {
            INT_TAG => Some(Operand::Int((word as i64) >> 2)),
            LOCAL_TAG => Some(Operand::Local(LocalVar((word >> 2) as u32))),
            _ if word == 0 => None,
            _ => u32::try_from(word).ok().map(|raw| Operand::Node(NodeId(raw))),
        }
    }
}

impl From<NodeId> for Operand {
    fn from(id: NodeId) -> Self {
        Operand::Node(id)
    }
}

impl From<LocalVar> for Operand {
    fn from(var: LocalVar) -> Self {
        Operand::Local(var)
    }
}

/// Returns `true` if `value` can be coded without a values table entry.
#[inline]
pub fn fits_immediate(value: i64) -> bool {
    (IMMEDIATE_MIN..=IMMEDIATE_MAX).contains(&value)
}

#[cfg(test)]
mod tests;
