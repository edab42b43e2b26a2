//! List and record literals.
//!
//! Each element leaves a pair on the expression stack: its position (list)
//! or name (record) as an immediate, then its value.

use super::Coder;
use crate::{CodeError, CodeResult, CoderHost, NodeTag, Operand, RecordName, SLOT_SIZE};

/// Form of a list literal.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ListShape {
    Plain,
    /// Outermost literal that refers to itself through `~`.
    Tilde,
    /// `[first..last]` or `[first, second..last]`.
    Range,
}

impl ListShape {
    fn tag(self) -> NodeTag {
        match self {
            ListShape::Plain => NodeTag::List,
            ListShape::Tilde => NodeTag::ListTilde,
            ListShape::Range => NodeTag::Range,
        }
    }
}

impl<H: CoderHost> Coder<H> {
    /// The next list element goes to `position` (1-based).
    pub fn list_begin_elm(&mut self, position: usize) -> CodeResult<()> {
        self.guard(|c| {
            c.push_marker(position);
            Ok(())
        })
    }

    /// Close a list literal of `elements` coded elements.
    ///
    /// The literal is as long as the last (largest) position; positions
    /// without an element are left as holes.
    pub fn list_end(&mut self, elements: usize, shape: ListShape) -> CodeResult<()> {
        self.guard(|c| {
            let len = if elements == 0 {
                0
            } else {
                let last = c.expressions.peek_at(1)?;
                list_position(last)?
            };
            let list = c.new_node(shape.tag(), len * SLOT_SIZE)?;
            for _ in 0..elements {
                let entry = c.pop_expr()?;
                let found = c.pop_expr()?;
                let position = list_position(found)?;
                if position > len {
                    return Err(CodeError::ExpectedImmediate {
                        what: "list position",
                        found,
                    });
                }
                c.write_slot(list, position - 1, entry.encode())?;
            }
            c.push_expr(list);
            Ok(())
        })
    }

    /// The next record component is named `name`.
    pub fn record_elm_name(&mut self, name: RecordName) -> CodeResult<()> {
        self.guard(|c| {
            c.push_expr(Operand::Int(i64::from(name.0)));
            Ok(())
        })
    }

    /// The next record component's name was given as an expression, now on
    /// the stack. An immediate integer becomes a record name.
    pub fn record_elm_expr(&mut self) -> CodeResult<()> {
        self.guard(|c| {
            let name = c.pop_expr()?;
            match name {
                Operand::Int(value) => {
                    let rnam = c.host.record_name_for_int(value)?;
                    c.push_expr(Operand::Int(i64::from(rnam.0)));
                }
                _ => c.push_expr(name),
            }
            Ok(())
        })
    }

    /// Close a record literal of `components` name/value pairs. `tilde`
    /// marks an outermost literal that refers to itself through `~`.
    pub fn record_end(&mut self, components: usize, tilde: bool) -> CodeResult<()> {
        self.guard(|c| {
            let tag = if tilde {
                NodeTag::RecTilde
            } else {
                NodeTag::Rec
            };
            c.expr_of(tag, 2 * components)
        })
    }
}

fn list_position(found: Operand) -> CodeResult<usize> {
    found
        .as_int()
        .and_then(|value| usize::try_from(value).ok())
        .filter(|&position| position > 0)
        .ok_or(CodeError::ExpectedImmediate {
            what: "list position",
            found,
        })
}
