//! Statements and control flow.

use super::Coder;
use crate::{CodeResult, CoderHost, NodeTag, Operand, SLOT_SIZE};

/// What the parser should do with the next part of an `if` statement.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[must_use]
pub enum IfBranch {
    Code,
    /// Parse but do not code: the body of a `false` branch, or every branch
    /// after a `true` one.
    Skip,
}

impl<H: CoderHost> Coder<H> {
    // Conditionals

    /// Start of the `else` branch; codes its implicit `true` condition.
    pub fn if_else(&mut self) -> CodeResult<()> {
        self.guard(|c| c.leaf(NodeTag::True))
    }

    /// The branch condition has been coded.
    ///
    /// A literal `false` condition is dropped and the body should be
    /// skipped; the skipped branch is not counted in [`Coder::if_end`].
    pub fn if_begin_body(&mut self) -> CodeResult<IfBranch> {
        self.guard(|c| {
            let cond = c.pop_expr()?;
            if c.tag_of(cond)? == Some(NodeTag::False) {
                return Ok(IfBranch::Skip);
            }
            c.push_expr(cond);
            Ok(IfBranch::Code)
        })
    }

    /// The branch body of `statements` statements has been coded.
    ///
    /// After a literal `true` condition the remaining branches should be
    /// skipped.
    pub fn if_end_body(&mut self, statements: usize) -> CodeResult<IfBranch> {
        self.guard(|c| {
            let body = c.pop_seq(statements)?;
            c.push_stat(body);
            let cond = c.expressions.peek()?;
            if c.tag_of(cond)? == Some(NodeTag::True) {
                Ok(IfBranch::Skip)
            } else {
                Ok(IfBranch::Code)
            }
        })
    }

    /// Close an `if` statement with `branches` coded branches.
    pub fn if_end(&mut self, branches: usize) -> CodeResult<()> {
        self.guard(|c| {
            if branches == 0 {
                let empty = c.new_node(NodeTag::Empty, 0)?;
                c.push_stat(empty);
                return Ok(());
            }

            let has_else = c.tag_of(c.expressions.peek()?)? == Some(NodeTag::True);
            if branches == 1 && has_else {
                // `if true then BODY fi` is just BODY
                c.pop_expr()?;
                return Ok(());
            }

            let tag = match (branches, has_else) {
                (1, _) => NodeTag::If,
                (2, true) => NodeTag::IfElse,
                (_, false) => NodeTag::IfElif,
                (_, true) => NodeTag::IfElifElse,
            };
            let mut words = Vec::with_capacity(2 * branches);
            let bodies = c.statements.pop_many(branches)?;
            let conds = c.pop_exprs(branches)?;
            for (cond, body) in conds.iter().zip(&bodies) {
                words.push(cond.encode());
                words.push(Operand::Node(*body).encode());
            }
            let stat = c.node_with(tag, &words)?;
            c.push_stat(stat);
            Ok(())
        })
    }

    // Loops

    /// `for VAR in LIST do BODY od`; variable and list are on the expression
    /// stack, the body's statements on the statement stack.
    ///
    /// Looping a local variable over a two-element range literal
    /// (`[a..b]`) gets the range tag.
    pub fn for_end_body(&mut self, statements: usize) -> CodeResult<()> {
        self.guard(|c| {
            let list = c.pop_expr()?;
            let var = c.pop_expr()?;
            let base = if matches!(var, Operand::Local(_)) && c.is_two_point_range(list)? {
                NodeTag::ForRange
            } else {
                NodeTag::For
            };
            let stat = c.pop_loop(base, 2, statements)?;
            c.write_slot(stat, 0, var.encode())?;
            c.write_slot(stat, 1, list.encode())?;
            c.push_stat(stat);
            Ok(())
        })
    }

    pub fn while_end_body(&mut self, statements: usize) -> CodeResult<()> {
        self.guard(|c| {
            let stat = c.pop_loop(NodeTag::While, 1, statements)?;
            let cond = c.pop_expr()?;
            c.write_slot(stat, 0, cond.encode())?;
            c.push_stat(stat);
            Ok(())
        })
    }

    /// End of a `repeat` body. The statement count waits on the expression
    /// stack until the `until` condition is coded.
    pub fn repeat_end_body(&mut self, statements: usize) -> CodeResult<()> {
        self.guard(|c| {
            c.push_marker(statements);
            Ok(())
        })
    }

    /// `until COND`: close the `repeat` loop.
    pub fn repeat_end(&mut self) -> CodeResult<()> {
        self.guard(|c| {
            let cond = c.pop_expr()?;
            let statements = c.pop_marker("repeat body count")?;
            let stat = c.pop_loop(NodeTag::Repeat, 1, statements)?;
            c.write_slot(stat, 0, cond.encode())?;
            c.push_stat(stat);
            Ok(())
        })
    }

    fn is_two_point_range(&self, list: Operand) -> CodeResult<bool> {
        let Operand::Node(node) = list else {
            return Ok(false);
        };
        Ok(self
            .header(node)?
            .is_some_and(|h| h.tag == NodeTag::Range && h.size as usize == 2 * SLOT_SIZE))
    }

    // Atomic blocks

    /// Start of an `atomic` body guarded by `exprs` qualified expressions.
    pub fn atomic_begin_body(&mut self, exprs: usize) -> CodeResult<()> {
        self.guard(|c| {
            c.push_marker(exprs);
            Ok(())
        })
    }

    /// `readonly`/`readwrite` qualifier of the next atomic expression.
    pub fn qualified_expr_begin(&mut self, qualifier: u32) -> CodeResult<()> {
        self.guard(|c| {
            c.push_expr(Operand::Int(i64::from(qualifier)));
            Ok(())
        })
    }

    /// End of an `atomic` body. Lock annotations are not coded: the
    /// qualified expressions are dropped and the body becomes a plain
    /// statement.
    pub fn atomic_end_body(&mut self, statements: usize) -> CodeResult<()> {
        self.guard(|c| {
            let body = c.pop_seq(statements)?;
            let exprs = c.pop_marker("atomic expression count")?;
            c.pop_exprs(2 * exprs)?;
            c.push_stat(body);
            Ok(())
        })
    }

    // Simple statements

    pub fn break_statement(&mut self) -> CodeResult<()> {
        self.guard(|c| c.simple_stat(NodeTag::Break))
    }

    pub fn continue_statement(&mut self) -> CodeResult<()> {
        self.guard(|c| c.simple_stat(NodeTag::Continue))
    }

    pub fn empty_statement(&mut self) -> CodeResult<()> {
        self.guard(|c| c.simple_stat(NodeTag::Empty))
    }

    pub fn return_void(&mut self) -> CodeResult<()> {
        self.guard(|c| c.simple_stat(NodeTag::ReturnVoid))
    }

    /// `return EXPR;`
    pub fn return_value(&mut self) -> CodeResult<()> {
        self.guard(|c| c.stat_of(NodeTag::ReturnObj, 1))
    }

    /// `Info(CLASS, LEVEL, ARGS...)` with `args` printable arguments.
    pub fn info_end(&mut self, args: usize) -> CodeResult<()> {
        self.guard(|c| c.stat_of(NodeTag::Info, args + 2))
    }

    /// `Assert(LEVEL, COND)`
    pub fn assert_end_2args(&mut self) -> CodeResult<()> {
        self.guard(|c| c.stat_of(NodeTag::Assert2Args, 2))
    }

    /// `Assert(LEVEL, COND, MESSAGE)`
    pub fn assert_end_3args(&mut self) -> CodeResult<()> {
        self.guard(|c| c.stat_of(NodeTag::Assert3Args, 3))
    }
}
