//! Unary and binary operators, with constant folding.

use super::Coder;
use crate::{CodeResult, CoderHost, NodeTag, Operand, IMMEDIATE_MIN};

/// Binary operators.
///
/// `and`/`or` are coded like any other binary operator; short-circuiting
/// is left to the evaluator.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Or,
    And,
    Eq,
    Ne,
    Lt,
    Ge,
    Gt,
    Le,
    In,
    Sum,
    Diff,
    Prod,
    Quo,
    Mod,
    Pow,
}

impl BinaryOp {
    pub fn tag(self) -> NodeTag {
        match self {
            BinaryOp::Or => NodeTag::Or,
            BinaryOp::And => NodeTag::And,
            BinaryOp::Eq => NodeTag::Eq,
            BinaryOp::Ne => NodeTag::Ne,
            BinaryOp::Lt => NodeTag::Lt,
            BinaryOp::Ge => NodeTag::Ge,
            BinaryOp::Gt => NodeTag::Gt,
            BinaryOp::Le => NodeTag::Le,
            BinaryOp::In => NodeTag::In,
            BinaryOp::Sum => NodeTag::Sum,
            BinaryOp::Diff => NodeTag::Diff,
            BinaryOp::Prod => NodeTag::Prod,
            BinaryOp::Quo => NodeTag::Quo,
            BinaryOp::Mod => NodeTag::Mod,
            BinaryOp::Pow => NodeTag::Pow,
        }
    }
}

impl<H: CoderHost> Coder<H> {
    /// `left op right`, both operands already pushed.
    pub fn binary(&mut self, op: BinaryOp) -> CodeResult<()> {
        self.guard(|c| c.expr_of(op.tag(), 2))
    }

    /// Logical negation. `not true` and `not false` fold to the opposite
    /// literal.
    pub fn not(&mut self) -> CodeResult<()> {
        self.guard(|c| {
            let operand = c.pop_expr()?;
            match c.tag_of(operand)? {
                Some(NodeTag::True) => c.leaf(NodeTag::False),
                Some(NodeTag::False) => c.leaf(NodeTag::True),
                _ => c.unary(NodeTag::Not, operand),
            }
        })
    }

    /// Arithmetic negation. Immediates fold, except the smallest one whose
    /// negation would leave the immediate range.
    pub fn negate(&mut self) -> CodeResult<()> {
        self.guard(|c| {
            let operand = c.pop_expr()?;
            match operand {
                Operand::Int(value) if value != IMMEDIATE_MIN => {
                    c.push_expr(Operand::Int(-value));
                    Ok(())
                }
                _ => c.unary(NodeTag::AInv, operand),
            }
        })
    }

    fn unary(&mut self, tag: NodeTag, operand: Operand) -> CodeResult<()> {
        let expr = self.node_of(tag, &[operand])?;
        self.push_expr(expr);
        Ok(())
    }
}
