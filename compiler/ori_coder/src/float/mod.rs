//! Float literal classification and the process-wide float literal registry.
//!
//! A float literal is either *eager* (it carries a precision suffix and is
//! converted while coding) or *lazy* (its text is kept and converted the
//! first time it is evaluated). Lazy literals get an index into a
//! process-wide cache of converted values; the indices for `0` and `1` are
//! reserved and shared by every literal that spells one of them.
//!
//! The registry counter is the only state shared between coders running on
//! different threads. It lives behind a `parking_lot` mutex that is held for
//! the increment only.

use parking_lot::{const_mutex, Mutex};

use crate::{CodeError, CodeResult};

/// Registry index shared by every literal spelling zero.
pub const FLOAT_ZERO_INDEX: u32 = 1;
/// Registry index shared by every literal spelling one.
pub const FLOAT_ONE_INDEX: u32 = 2;
/// First index handed out to other lazy literals.
pub const FIRST_FRESH_INDEX: u32 = 3;
/// Indices must stay below this bound.
pub const MAX_FLOAT_INDEX: u32 = (1 << 28) - 2;

static NEXT_INDEX: Mutex<u32> = const_mutex(FIRST_FRESH_INDEX);

/// Result of classifying a float literal's text.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FloatLiteral<'a> {
    /// Keep the text; convert at run time.
    Lazy { text: &'a str },
    /// Convert now. `text` has the suffix stripped; `mark` is the character
    /// after the `_`, if any.
    Eager { text: &'a str, mark: Option<char> },
}

impl<'a> FloatLiteral<'a> {
    /// Classify literal text.
    ///
    /// A trailing `_` (no mark) or a `_` followed by one mark character
    /// requests eager conversion.
    pub fn classify(text: &'a str) -> CodeResult<Self> {
        if text.is_empty() {
            return Err(CodeError::MalformedFloat {
                text: String::new(),
            });
        }
        if let Some(stripped) = text.strip_suffix('_') {
            return Ok(FloatLiteral::Eager {
                text: stripped,
                mark: None,
            });
        }
        let mut tail = text.char_indices().rev();
        if let (Some((_, mark)), Some((underscore, '_'))) = (tail.next(), tail.next()) {
            return Ok(FloatLiteral::Eager {
                text: &text[..underscore],
                mark: Some(mark),
            });
        }
        Ok(FloatLiteral::Lazy { text })
    }
}

/// Reserved registry index if `text` spells `0` or `1`.
///
/// Recognises leading zeros, a decimal point followed by zeros and, for
/// one, a zero exponent (`1.0e+00`). Other values (`0.5`, `2.0`) are not
/// deduplicated.
pub fn common_float_index(text: &str) -> Option<u32> {
    let bytes = text.as_bytes();
    let mut at = skip_zeros(bytes, 0);

    if bytes.get(at) == Some(&b'.') {
        at = skip_zeros(bytes, at + 1);
        if !bytes.get(at).is_some_and(u8::is_ascii_digit) {
            return Some(FLOAT_ZERO_INDEX);
        }
    }

    if bytes.get(at) != Some(&b'1') || bytes.get(at + 1) != Some(&b'.') {
        return None;
    }
    at = skip_zeros(bytes, at + 2);
    match bytes.get(at) {
        None => return Some(FLOAT_ONE_INDEX),
        Some(b) if b.is_ascii_alphabetic() => at += 1,
        Some(_) => return None,
    }
    if matches!(bytes.get(at), Some(b'+' | b'-')) {
        at += 1;
    }
    (skip_zeros(bytes, at) == bytes.len()).then_some(FLOAT_ONE_INDEX)
}

fn skip_zeros(bytes: &[u8], mut at: usize) -> usize {
    while bytes.get(at) == Some(&b'0') {
        at += 1;
    }
    at
}

/// Registry index for a lazy literal: a reserved one for `0`/`1`, otherwise
/// a fresh one.
pub(crate) fn lazy_index(text: &str) -> CodeResult<u32> {
    match common_float_index(text) {
        Some(index) => Ok(index),
        None => fresh_index(),
    }
}

fn fresh_index() -> CodeResult<u32> {
    let mut next = NEXT_INDEX.lock();
    if *next >= MAX_FLOAT_INDEX {
        return Err(CodeError::FloatIndexExhausted);
    }
    let index = *next;
    *next += 1;
    Ok(index)
}

/// The index the next fresh lazy literal will get.
///
/// Saved with a program image; see [`restore`].
pub fn next_index() -> u32 {
    *NEXT_INDEX.lock()
}

/// Restore the counter saved by [`next_index`].
///
/// Values below [`FIRST_FRESH_INDEX`] are raised to it so reserved indices
/// are never handed out.
pub fn restore(next: u32) {
    *NEXT_INDEX.lock() = next.max(FIRST_FRESH_INDEX);
}

#[cfg(test)]
mod tests;
