//! Node header word.
//!
//! Each node is preceded by one header word:
//!
//! ```text
//!  63      56 55                  32 31                   1   0
//! +----------+----------------------+----------------------+---+
//! |   tag    |      byte size       |     source line      | v |
//! +----------+----------------------+----------------------+---+
//! ```
//!
//! `v` is the visited flag, left clear by the coder and owned by tools that
//! walk finished bodies.

use crate::NodeTag;

/// Width of one slot (and of the header word) in bytes.
pub const SLOT_SIZE: usize = 8;

/// Bytes taken by a node header.
pub const NODE_HEADER_SIZE: usize = SLOT_SIZE;

/// Largest node payload the size field can hold.
pub const MAX_NODE_SIZE: usize = (1 << 24) - 1;

/// Largest line number the line field can hold; larger lines are clamped.
pub const MAX_LINE: u32 = (1 << 31) - 1;

const LINE_SHIFT: u32 = 1;
const SIZE_SHIFT: u32 = 32;
const TAG_SHIFT: u32 = 56;

/// Decoded node header.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct NodeHeader {
    pub visited: bool,
    pub line: u32,
    /// Payload size in bytes, excluding the header itself.
    pub size: u32,
    pub tag: NodeTag,
}

impl NodeHeader {
    /// Header for a freshly allocated node; clamps `line` to [`MAX_LINE`].
    ///
    /// `size` must already be checked against [`MAX_NODE_SIZE`].
    pub fn new(tag: NodeTag, size: u32, line: u32) -> Self {
        debug_assert!(size as usize <= MAX_NODE_SIZE);
        NodeHeader {
            visited: false,
            line: line.min(MAX_LINE),
            size,
            tag,
        }
    }

    /// Number of slots covered by the payload.
    #[inline]
    pub fn slot_count(self) -> usize {
        self.size as usize / SLOT_SIZE
    }

    pub fn pack(self) -> u64 {
        u64::from(self.visited)
            | (u64::from(self.line & MAX_LINE) << LINE_SHIFT)
            | ((u64::from(self.size) & MAX_NODE_SIZE as u64) << SIZE_SHIFT)
            | (u64::from(self.tag.raw()) << TAG_SHIFT)
    }

    /// Decode a header word. `None` if the tag byte is not a known tag.
    pub fn unpack(word: u64) -> Option<Self> {
        let tag = NodeTag::from_raw((word >> TAG_SHIFT) as u8)?;
        Some(NodeHeader {
            visited: word & 1 != 0,
            line: ((word >> LINE_SHIFT) & u64::from(MAX_LINE)) as u32,
            size: ((word >> SIZE_SHIFT) & MAX_NODE_SIZE as u64) as u32,
            tag,
        })
    }
}

/// Round a payload size up to whole slots.
#[inline]
pub(crate) fn padded(size: usize) -> usize {
    size.div_ceil(SLOT_SIZE) * SLOT_SIZE
}

#[cfg(test)]
mod tests;
