//! Literal expressions.

use super::Coder;
use crate::float::{self, FloatLiteral};
use crate::{CodeError, CodeResult, CoderHost, NodeTag, Operand, Value};

impl<H: CoderHost> Coder<H> {
    /// Integer literal: an immediate when it fits, a values table entry
    /// otherwise.
    pub fn int(&mut self, value: i64) -> CodeResult<()> {
        self.guard(|c| {
            let expr = match Operand::int(value) {
                Some(immediate) => immediate,
                None => {
                    let id = c.value_slot(Value::Int(value))?;
                    c.node_with(NodeTag::IntPos, &[id])?.into()
                }
            };
            c.push_expr(expr);
            Ok(())
        })
    }

    /// Integer literal too large for `i64`, given as decimal text.
    pub fn big_int(&mut self, text: &str) -> CodeResult<()> {
        self.guard(|c| {
            let id = c.value_slot(Value::BigInt(text.into()))?;
            let expr = c.node_with(NodeTag::IntPos, &[id])?;
            c.push_expr(expr);
            Ok(())
        })
    }

    pub fn true_expr(&mut self) -> CodeResult<()> {
        self.guard(|c| c.leaf(NodeTag::True))
    }

    pub fn false_expr(&mut self) -> CodeResult<()> {
        self.guard(|c| c.leaf(NodeTag::False))
    }

    /// The `~` self-reference inside a list or record literal.
    pub fn tilde(&mut self) -> CodeResult<()> {
        self.guard(|c| c.leaf(NodeTag::Tilde))
    }

    pub fn char_expr(&mut self, ch: char) -> CodeResult<()> {
        self.guard(|c| {
            let expr = c.node_with(NodeTag::Char, &[u64::from(u32::from(ch))])?;
            c.push_expr(expr);
            Ok(())
        })
    }

    pub fn string(&mut self, text: &str) -> CodeResult<()> {
        self.guard(|c| {
            let id = c.value_slot(Value::String(text.into()))?;
            let expr = c.node_with(NodeTag::String, &[id])?;
            c.push_expr(expr);
            Ok(())
        })
    }

    /// Pragma comment; coded as a statement.
    pub fn pragma(&mut self, text: &str) -> CodeResult<()> {
        self.guard(|c| {
            let id = c.value_slot(Value::Pragma(text.into()))?;
            let stat = c.node_with(NodeTag::Pragma, &[id])?;
            c.push_stat(stat);
            Ok(())
        })
    }

    /// One permutation cycle of `elements` expressions.
    pub fn perm_cycle(&mut self, elements: usize) -> CodeResult<()> {
        self.guard(|c| c.expr_of(NodeTag::PermCycle, elements))
    }

    /// Permutation from the last `cycles` cycles.
    pub fn perm(&mut self, cycles: usize) -> CodeResult<()> {
        self.guard(|c| c.expr_of(NodeTag::Perm, cycles))
    }

    /// Float literal.
    ///
    /// Text ending in `_` or `_x` is converted now through the host;
    /// anything else is kept for conversion at run time.
    pub fn float(&mut self, text: &str) -> CodeResult<()> {
        self.guard(|c| match FloatLiteral::classify(text)? {
            FloatLiteral::Lazy { text } => c.lazy_float(text),
            FloatLiteral::Eager { text, mark } => c.eager_float(text, mark),
        })
    }

    fn lazy_float(&mut self, text: &str) -> CodeResult<()> {
        let index = float::lazy_index(text)?;
        let id = self.value_slot(Value::FloatText(text.into()))?;
        let expr = self.node_with(NodeTag::FloatLazy, &[u64::from(index), id])?;
        self.push_expr(expr);
        Ok(())
    }

    fn eager_float(&mut self, text: &str, mark: Option<char>) -> CodeResult<()> {
        let value = self
            .host
            .convert_float(text, mark)
            .map_err(|message| CodeError::FloatConversion {
                text: text.to_owned(),
                message,
            })?;
        let converted = self.value_slot(Value::Float(value))?;
        let text_slot = self.value_slot(Value::FloatText(text.into()))?;
        let mark = mark.map_or(0, |m| u64::from(u32::from(m)));
        let expr = self.node_with(NodeTag::FloatEager, &[converted, text_slot, mark])?;
        self.push_expr(expr);
        Ok(())
    }
}
