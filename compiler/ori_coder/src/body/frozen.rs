//! Finished function literals.

use crate::header::NodeHeader;
use crate::{
    BodyHeader, NodeId, NodeTag, Operand, SlotKind, Value, ValueId, FIRST_STATEMENT,
    NODE_HEADER_SIZE, SLOT_SIZE,
};

/// A coded function literal.
///
/// Nested literals are stored as [`Value::Function`] in the values table of
/// the enclosing body.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct FunctionLiteral {
    /// Number of arguments; negative for a variadic function, where the
    /// absolute value counts the final collecting argument too.
    pub arg_count: i32,
    pub local_count: u32,
    /// Names of the arguments followed by the locals.
    pub names: Vec<String>,
    pub body: FrozenBody,
}

impl FunctionLiteral {
    /// Frame size needed to run the literal.
    pub fn frame_size(&self) -> usize {
        self.arg_count.unsigned_abs() as usize + self.local_count as usize
    }
}

/// Immutable body of a finished function literal.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct FrozenBody {
    header: BodyHeader,
    bytes: Box<[u8]>,
    values: Box<[Value]>,
}

impl FrozenBody {
    pub(crate) fn new(header: BodyHeader, bytes: Box<[u8]>, values: Box<[Value]>) -> Self {
        FrozenBody {
            header,
            bytes,
            values,
        }
    }

    pub fn header(&self) -> BodyHeader {
        self.header
    }

    /// Raw body bytes, header words included.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// The top-level statement sequence.
    pub fn first_statement(&self) -> NodeId {
        NodeId::new(FIRST_STATEMENT as u32)
    }

    fn word(&self, offset: usize) -> Option<u64> {
        let bytes = self.bytes.get(offset..offset.checked_add(SLOT_SIZE)?)?;
        let mut word = [0; SLOT_SIZE];
        word.copy_from_slice(bytes);
        Some(u64::from_le_bytes(word))
    }

    /// Header of the node at `node`.
    pub fn node(&self, node: NodeId) -> Option<NodeHeader> {
        let offset = node.offset().checked_sub(NODE_HEADER_SIZE)?;
        NodeHeader::unpack(self.word(offset)?)
    }

    /// Tag of an operand; immediates report their pseudo-tags.
    pub fn tag_of(&self, operand: Operand) -> Option<NodeTag> {
        match operand {
            Operand::Int(_) => Some(NodeTag::Int),
            Operand::Local(_) => Some(NodeTag::RefLVar),
            Operand::Node(node) => self.node(node).map(|h| h.tag),
        }
    }

    /// Raw word of slot `index`, bounds-checked against the node's size.
    pub fn slot(&self, node: NodeId, index: usize) -> Option<u64> {
        let header = self.node(node)?;
        if index >= header.slot_count() {
            return None;
        }
        self.word(node.offset() + index * SLOT_SIZE)
    }

    /// Slot `index` decoded as an operand. `None` for holes, raw slots and
    /// value slots.
    pub fn operand(&self, node: NodeId, index: usize) -> Option<Operand> {
        let header = self.node(node)?;
        match header.tag.slot_kind(index, header.slot_count()) {
            SlotKind::Operand => Operand::decode(self.slot(node, index)?),
            SlotKind::Raw | SlotKind::Value => None,
        }
    }

    /// All operand slots of a node, holes included.
    pub fn operands(&self, node: NodeId) -> Vec<Option<Operand>> {
        let count = self.node(node).map_or(0, NodeHeader::slot_count);
        (0..count).map(|index| self.operand(node, index)).collect()
    }

    pub fn value(&self, id: ValueId) -> Option<&Value> {
        self.values.get(id.index())
    }

    /// The value referenced by slot `index`, if it is a value slot.
    pub fn value_at(&self, node: NodeId, index: usize) -> Option<&Value> {
        let header = self.node(node)?;
        match header.tag.slot_kind(index, header.slot_count()) {
            SlotKind::Value => {
                let raw = u32::try_from(self.slot(node, index)?).ok()?;
                self.value(ValueId::new(raw))
            }
            SlotKind::Operand | SlotKind::Raw => None,
        }
    }

    /// Serialize for the on-disk cache.
    #[cfg(feature = "cache")]
    pub fn to_cache_bytes(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    /// Deserialize from the on-disk cache.
    #[cfg(feature = "cache")]
    pub fn from_cache_bytes(bytes: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(bytes)
    }
}
