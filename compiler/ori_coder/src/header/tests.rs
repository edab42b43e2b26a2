use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_field_positions() {
    let header = NodeHeader::new(NodeTag::Sum, 16, 3);
    let word = header.pack();
    assert_eq!(word & 1, 0);
    assert_eq!((word >> 1) & 0x7FFF_FFFF, 3);
    assert_eq!((word >> 32) & 0xFF_FFFF, 16);
    assert_eq!(word >> 56, u64::from(NodeTag::Sum.raw()));
    assert_eq!(NodeHeader::unpack(word), Some(header));
}

#[test]
fn test_line_is_clamped() {
    let header = NodeHeader::new(NodeTag::Break, 0, u32::MAX);
    assert_eq!(header.line, MAX_LINE);
    assert_eq!(NodeHeader::unpack(header.pack()).map(|h| h.line), Some(MAX_LINE));
}

#[test]
fn test_visited_flag_is_independent() {
    let mut header = NodeHeader::new(NodeTag::If, 16, 9);
    header.visited = true;
    let back = NodeHeader::unpack(header.pack());
    assert_eq!(back, Some(header));
}

#[test]
fn test_max_size_fits() {
    let header = NodeHeader::new(NodeTag::SeqStat, MAX_NODE_SIZE as u32, 1);
    assert_eq!(
        NodeHeader::unpack(header.pack()).map(|h| h.size),
        Some(MAX_NODE_SIZE as u32)
    );
}

#[test]
fn test_unknown_tag_is_rejected() {
    assert_eq!(NodeHeader::unpack(u64::MAX), None);
}

#[test]
fn test_padding() {
    assert_eq!(padded(0), 0);
    assert_eq!(padded(1), 8);
    assert_eq!(padded(8), 8);
    assert_eq!(padded(17), 24);
}

#[test]
fn test_slot_count() {
    assert_eq!(NodeHeader::new(NodeTag::Perm, 24, 1).slot_count(), 3);
}
