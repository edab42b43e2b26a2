//! Variable assignment, unbinding, reference and is-bound checks.
//!
//! Locals live in the current frame, enclosing variables in a frame further
//! out (addressed by level and index) and globals in the host's table. The
//! variable itself is always a raw slot.

use super::Coder;
use crate::{CodeResult, CoderHost, EnclosingVar, GlobalVar, LocalVar, NodeTag, Operand};

impl<H: CoderHost> Coder<H> {
    // Locals

    /// `lvar := EXPR;`
    pub fn assign_local(&mut self, var: LocalVar) -> CodeResult<()> {
        self.guard(|c| c.assign(NodeTag::AssLVar, u64::from(var.0)))
    }

    /// `Unbind(lvar);`
    pub fn unbind_local(&mut self, var: LocalVar) -> CodeResult<()> {
        self.guard(|c| c.raw_stat(NodeTag::UnbLVar, u64::from(var.0)))
    }

    /// Local variable reference; coded as an immediate, not a node.
    pub fn local(&mut self, var: LocalVar) -> CodeResult<()> {
        self.guard(|c| {
            c.push_expr(var);
            Ok(())
        })
    }

    /// `IsBound(lvar)`
    pub fn is_bound_local(&mut self, var: LocalVar) -> CodeResult<()> {
        self.guard(|c| c.raw_expr(NodeTag::IsbLVar, u64::from(var.0)))
    }

    // Enclosing ("higher") variables

    pub fn assign_enclosing(&mut self, var: EnclosingVar) -> CodeResult<()> {
        self.guard(|c| c.assign(NodeTag::AssHVar, var.raw()))
    }

    pub fn unbind_enclosing(&mut self, var: EnclosingVar) -> CodeResult<()> {
        self.guard(|c| c.raw_stat(NodeTag::UnbHVar, var.raw()))
    }

    pub fn enclosing(&mut self, var: EnclosingVar) -> CodeResult<()> {
        self.guard(|c| c.raw_expr(NodeTag::RefHVar, var.raw()))
    }

    pub fn is_bound_enclosing(&mut self, var: EnclosingVar) -> CodeResult<()> {
        self.guard(|c| c.raw_expr(NodeTag::IsbHVar, var.raw()))
    }

    // Globals

    pub fn assign_global(&mut self, var: GlobalVar) -> CodeResult<()> {
        self.guard(|c| c.assign(NodeTag::AssGVar, u64::from(var.0)))
    }

    pub fn unbind_global(&mut self, var: GlobalVar) -> CodeResult<()> {
        self.guard(|c| c.raw_stat(NodeTag::UnbGVar, u64::from(var.0)))
    }

    pub fn global(&mut self, var: GlobalVar) -> CodeResult<()> {
        self.guard(|c| c.raw_expr(NodeTag::RefGVar, u64::from(var.0)))
    }

    pub fn is_bound_global(&mut self, var: GlobalVar) -> CodeResult<()> {
        self.guard(|c| c.raw_expr(NodeTag::IsbGVar, u64::from(var.0)))
    }

    /// Assignment statement: raw variable slot, then the right-hand side.
    fn assign(&mut self, tag: NodeTag, var: u64) -> CodeResult<()> {
        let rhs = self.pop_expr()?;
        let stat = self.node_with(tag, &[var, rhs.encode()])?;
        self.push_stat(stat);
        Ok(())
    }

    fn raw_stat(&mut self, tag: NodeTag, raw: u64) -> CodeResult<()> {
        let stat = self.node_with(tag, &[raw])?;
        self.push_stat(stat);
        Ok(())
    }

    fn raw_expr(&mut self, tag: NodeTag, raw: u64) -> CodeResult<()> {
        let expr = self.node_with(tag, &[raw])?;
        self.push_expr(Operand::Node(expr));
        Ok(())
    }
}
