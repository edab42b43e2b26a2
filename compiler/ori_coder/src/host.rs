//! Services the coder needs from its embedder.

use crate::{CodeError, CodeResult, NodeTag, RecordName, SourceId};

/// External collaborators of a [`Coder`](crate::Coder).
///
/// Every method has a default, so a host only overrides what it provides.
pub trait CoderHost {
    /// Convert the text of an eager float literal.
    ///
    /// `mark` is the character after the `_` suffix, if any.
    fn convert_float(&mut self, text: &str, mark: Option<char>) -> Result<f64, String> {
        let _ = mark;
        text.parse::<f64>().map_err(|err| err.to_string())
    }

    /// Execution-coverage hook, called for every node the parser asked for.
    /// Nodes the coder synthesizes itself (implicit returns) are not reported.
    fn register_node(&mut self, source: SourceId, line: u32, tag: NodeTag) {
        let _ = (source, line, tag);
    }

    /// Record name for an integer used as a record component.
    ///
    /// The default names a component by the integer itself, so only
    /// integers in `0..=u32::MAX` are accepted; a host with a name table
    /// can intern any integer.
    fn record_name_for_int(&mut self, value: i64) -> CodeResult<RecordName> {
        u32::try_from(value)
            .map(RecordName)
            .map_err(|_| CodeError::InvalidRecordName { value })
    }
}

/// Host with every default.
#[derive(Copy, Clone, Debug, Default)]
pub struct DefaultHost;

impl CoderHost for DefaultHost {}

#[cfg(test)]
mod tests;
