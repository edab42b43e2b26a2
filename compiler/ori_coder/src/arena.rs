//! Relocatable body buffer.
//!
//! A plain byte buffer that is resized in place. Resizing may move the
//! storage, so callers hold byte offsets and go through [`Arena::read_word`]
//! and [`Arena::write_word`] for every access. Content and offsets survive
//! every resize; new space is zero-filled. A word that does not lie wholly
//! inside the buffer reads and writes as `None`.

use crate::SLOT_SIZE;

#[derive(Clone, Debug, Default)]
pub(crate) struct Arena {
    bytes: Vec<u8>,
}

impl Arena {
    /// Zero-filled arena of `len` bytes.
    pub fn zeroed(len: usize) -> Self {
        Arena {
            bytes: vec![0; len],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Grow or shrink to exactly `len` bytes, zero-filling new space.
    pub fn resize(&mut self, len: usize) {
        self.bytes.resize(len, 0);
    }

    /// Drop everything past `len` and release the spare capacity.
    pub fn shrink_to(&mut self, len: usize) {
        self.bytes.truncate(len);
        self.bytes.shrink_to_fit();
    }

    #[inline]
    pub fn read_word(&self, offset: usize) -> Option<u64> {
        let bytes = self.bytes.get(offset..offset.checked_add(SLOT_SIZE)?)?;
        let mut word = [0; SLOT_SIZE];
        word.copy_from_slice(bytes);
        Some(u64::from_le_bytes(word))
    }

    #[inline]
    pub fn write_word(&mut self, offset: usize, word: u64) -> Option<()> {
        let bytes = self
            .bytes
            .get_mut(offset..offset.checked_add(SLOT_SIZE)?)?;
        bytes.copy_from_slice(&word.to_le_bytes());
        Some(())
    }

    pub fn into_bytes(self) -> Box<[u8]> {
        self.bytes.into_boxed_slice()
    }
}
