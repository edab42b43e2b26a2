//! Function bodies.
//!
//! A [`Body`] is the growable buffer a function literal is coded into. It
//! starts with a fixed header followed by the packed node stream:
//!
//! ```text
//! offset  0  source id
//!         8  start line
//!        16  end line
//!        24  values table length
//!        32  header of the top-level sequence
//!        40  top-level sequence slots   <- FIRST_STATEMENT
//! ```
//!
//! The four header words are written when the literal is finished.
//!
//! Every access goes through a bounds check; an offset outside the body is
//! [`CodeError::DanglingOperand`], never a panic.
//!
//! Finished bodies are [`FrozenBody`] values owned by a [`FunctionLiteral`].

mod frozen;
mod render;

pub use frozen::{FrozenBody, FunctionLiteral};

use tracing::debug;

use crate::arena::Arena;
use crate::header::NodeHeader;
use crate::values::ValuesTable;
use crate::{CodeError, CodeResult, NodeId, NodeTag, Operand, Value, ValueId, SLOT_SIZE};
use crate::{NODE_HEADER_SIZE, MAX_NODE_SIZE};

/// Bytes taken by the body header.
pub const BODY_HEADER_SIZE: usize = 4 * SLOT_SIZE;

/// Offset of the top-level statement sequence of every body.
pub const FIRST_STATEMENT: usize = BODY_HEADER_SIZE + NODE_HEADER_SIZE;

/// Slots reserved for the top-level sequence when a literal begins.
pub const TOP_LEVEL_SLOTS: usize = 8;

const SOURCE_WORD: usize = 0;
const START_LINE_WORD: usize = SLOT_SIZE;
const END_LINE_WORD: usize = 2 * SLOT_SIZE;
const VALUES_LEN_WORD: usize = 3 * SLOT_SIZE;

/// Identity of the source file a body was read from. `0` means unknown.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct SourceId(pub u32);

/// Decoded body header.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct BodyHeader {
    pub source: SourceId,
    pub start_line: u32,
    pub end_line: u32,
    pub values_len: u32,
}

/// Body under construction.
#[derive(Debug)]
pub(crate) struct Body {
    arena: Arena,
    values: ValuesTable,
    source: SourceId,
    start_line: u32,
}

impl Body {
    /// Fresh body with `capacity` bytes.
    pub fn new(capacity: usize, source: SourceId, start_line: u32) -> Self {
        Body {
            arena: Arena::zeroed(capacity.max(BODY_HEADER_SIZE)),
            values: ValuesTable::default(),
            source,
            start_line,
        }
    }

    pub fn source(&self) -> SourceId {
        self.source
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.arena.len()
    }

    /// Make sure the body spans `end` bytes.
    ///
    /// Capacity doubles until it fits. Offsets handed out earlier stay
    /// valid.
    pub fn reserve(&mut self, end: usize) -> CodeResult<()> {
        let old = self.capacity();
        if end <= old {
            return Ok(());
        }
        if u32::try_from(end).is_err() {
            return Err(CodeError::BodyOverflow { size: end });
        }
        let mut new = if old == 0 { end } else { old };
        while new < end {
            new *= 2;
        }
        debug!(from = old, to = new, "growing function body");
        self.arena.resize(new);
        Ok(())
    }

    fn read_word(&self, offset: usize) -> CodeResult<u64> {
        self.arena
            .read_word(offset)
            .ok_or(CodeError::DanglingOperand { offset })
    }

    fn write_word(&mut self, offset: usize, word: u64) -> CodeResult<()> {
        self.arena
            .write_word(offset, word)
            .ok_or(CodeError::DanglingOperand { offset })
    }

    fn header_offset(node: NodeId) -> CodeResult<usize> {
        node.offset()
            .checked_sub(NODE_HEADER_SIZE)
            .ok_or(CodeError::DanglingOperand {
                offset: node.offset(),
            })
    }

    pub fn write_header(&mut self, node: NodeId, header: NodeHeader) -> CodeResult<()> {
        self.write_word(Self::header_offset(node)?, header.pack())
    }

    /// Header of a node; `None` when the word holds no known tag.
    pub fn header(&self, node: NodeId) -> CodeResult<Option<NodeHeader>> {
        self.read_word(Self::header_offset(node)?)
            .map(NodeHeader::unpack)
    }

    /// Tag of an operand; immediates report their pseudo-tags.
    pub fn tag_of(&self, operand: Operand) -> CodeResult<Option<NodeTag>> {
        match operand {
            Operand::Int(_) => Ok(Some(NodeTag::Int)),
            Operand::Local(_) => Ok(Some(NodeTag::RefLVar)),
            Operand::Node(node) => Ok(self.header(node)?.map(|h| h.tag)),
        }
    }

    #[inline]
    pub fn read_slot(&self, node: NodeId, index: usize) -> CodeResult<u64> {
        self.read_word(node.offset() + index * SLOT_SIZE)
    }

    #[inline]
    pub fn write_slot(&mut self, node: NodeId, index: usize, word: u64) -> CodeResult<()> {
        self.write_word(node.offset() + index * SLOT_SIZE, word)
    }

    pub fn add_value(&mut self, value: Value) -> ValueId {
        self.values.push(value)
    }

    /// Write the body header, trim to `used` bytes and freeze the values
    /// table.
    pub fn freeze(mut self, used: usize, end_line: u32) -> CodeResult<FrozenBody> {
        let header = BodyHeader {
            source: self.source,
            start_line: self.start_line,
            end_line,
            values_len: u32::try_from(self.values.len()).unwrap_or(u32::MAX),
        };
        self.write_word(SOURCE_WORD, u64::from(header.source.0))?;
        self.write_word(START_LINE_WORD, u64::from(header.start_line))?;
        self.write_word(END_LINE_WORD, u64::from(header.end_line))?;
        self.write_word(VALUES_LEN_WORD, u64::from(header.values_len))?;
        self.arena.shrink_to(used);
        Ok(FrozenBody::new(
            header,
            self.arena.into_bytes(),
            self.values.freeze(),
        ))
    }
}

/// Check a node payload size against the header field.
pub(crate) fn check_node_size(size: usize) -> CodeResult<u32> {
    if size > MAX_NODE_SIZE {
        return Err(CodeError::FunctionTooLarge {
            size,
            max: MAX_NODE_SIZE,
        });
    }
    u32::try_from(size).map_err(|_| CodeError::FunctionTooLarge {
        size,
        max: MAX_NODE_SIZE,
    })
}
