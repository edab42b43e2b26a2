//! Element and component access: lists, records, positional and component
//! objects.
//!
//! The container is coded first, then the selectors, then the right-hand
//! side of an assignment; slots keep that order. Record and component
//! names known at parse time are raw slots.

use super::Coder;
use crate::{CodeError, CodeResult, CoderHost, NodeTag, Operand, RecordName};

impl<H: CoderHost> Coder<H> {
    // Lists

    /// `list[pos] := rhs;` or `mat[row, col] := rhs;`
    pub fn assign_list(&mut self, indices: usize) -> CodeResult<()> {
        self.guard(|c| {
            let tag = pick_arity("list assignment", indices, NodeTag::AssList, NodeTag::AssMat)?;
            c.stat_of(tag, indices + 2)
        })
    }

    /// `list{poss} := rhss;`
    pub fn assign_list_many(&mut self) -> CodeResult<()> {
        self.guard(|c| c.stat_of(NodeTag::AsssList, 3))
    }

    /// Assignment through `level` nested list selections.
    pub fn assign_list_level(&mut self, indices: usize, level: u32) -> CodeResult<()> {
        self.guard(|c| c.with_level(NodeTag::AssListLev, indices + 2, level, true))
    }

    pub fn assign_list_many_level(&mut self, level: u32) -> CodeResult<()> {
        self.guard(|c| c.with_level(NodeTag::AsssListLev, 3, level, true))
    }

    /// `Unbind(list[pos, ...]);`
    pub fn unbind_list(&mut self, indices: usize) -> CodeResult<()> {
        self.guard(|c| c.stat_of(NodeTag::UnbList, indices + 1))
    }

    /// `list[pos]` or `mat[row, col]`
    pub fn element_list(&mut self, indices: usize) -> CodeResult<()> {
        self.guard(|c| {
            let tag = pick_arity("list selection", indices, NodeTag::ElmList, NodeTag::ElmMat)?;
            c.expr_of(tag, indices + 1)
        })
    }

    /// `list{poss}`
    pub fn elements_list(&mut self) -> CodeResult<()> {
        self.guard(|c| c.expr_of(NodeTag::ElmsList, 2))
    }

    pub fn element_list_level(&mut self, indices: usize, level: u32) -> CodeResult<()> {
        self.guard(|c| c.with_level(NodeTag::ElmListLev, indices + 1, level, false))
    }

    pub fn elements_list_level(&mut self, level: u32) -> CodeResult<()> {
        self.guard(|c| c.with_level(NodeTag::ElmsListLev, 2, level, false))
    }

    /// `IsBound(list[pos, ...])`
    pub fn is_bound_list(&mut self, indices: usize) -> CodeResult<()> {
        self.guard(|c| c.expr_of(NodeTag::IsbList, indices + 1))
    }

    // Records

    /// `rec.name := rhs;`
    pub fn assign_record_name(&mut self, name: RecordName) -> CodeResult<()> {
        self.guard(|c| c.assign_named(NodeTag::AssRecName, name))
    }

    /// `rec.(expr) := rhs;`
    pub fn assign_record_expr(&mut self) -> CodeResult<()> {
        self.guard(|c| c.stat_of(NodeTag::AssRecExpr, 3))
    }

    pub fn unbind_record_name(&mut self, name: RecordName) -> CodeResult<()> {
        self.guard(|c| c.named(NodeTag::UnbRecName, name, true))
    }

    pub fn unbind_record_expr(&mut self) -> CodeResult<()> {
        self.guard(|c| c.stat_of(NodeTag::UnbRecExpr, 2))
    }

    pub fn element_record_name(&mut self, name: RecordName) -> CodeResult<()> {
        self.guard(|c| c.named(NodeTag::ElmRecName, name, false))
    }

    pub fn element_record_expr(&mut self) -> CodeResult<()> {
        self.guard(|c| c.expr_of(NodeTag::ElmRecExpr, 2))
    }

    pub fn is_bound_record_name(&mut self, name: RecordName) -> CodeResult<()> {
        self.guard(|c| c.named(NodeTag::IsbRecName, name, false))
    }

    pub fn is_bound_record_expr(&mut self) -> CodeResult<()> {
        self.guard(|c| c.expr_of(NodeTag::IsbRecExpr, 2))
    }

    // Positional objects

    /// `obj![pos] := rhs;`
    pub fn assign_pos_obj(&mut self) -> CodeResult<()> {
        self.guard(|c| c.stat_of(NodeTag::AssPosObj, 3))
    }

    pub fn unbind_pos_obj(&mut self) -> CodeResult<()> {
        self.guard(|c| c.stat_of(NodeTag::UnbPosObj, 2))
    }

    pub fn element_pos_obj(&mut self) -> CodeResult<()> {
        self.guard(|c| c.expr_of(NodeTag::ElmPosObj, 2))
    }

    pub fn is_bound_pos_obj(&mut self) -> CodeResult<()> {
        self.guard(|c| c.expr_of(NodeTag::IsbPosObj, 2))
    }

    // Component objects

    /// `obj!.name := rhs;`
    pub fn assign_com_obj_name(&mut self, name: RecordName) -> CodeResult<()> {
        self.guard(|c| c.assign_named(NodeTag::AssComObjName, name))
    }

    pub fn assign_com_obj_expr(&mut self) -> CodeResult<()> {
        self.guard(|c| c.stat_of(NodeTag::AssComObjExpr, 3))
    }

    pub fn unbind_com_obj_name(&mut self, name: RecordName) -> CodeResult<()> {
        self.guard(|c| c.named(NodeTag::UnbComObjName, name, true))
    }

    pub fn unbind_com_obj_expr(&mut self) -> CodeResult<()> {
        self.guard(|c| c.stat_of(NodeTag::UnbComObjExpr, 2))
    }

    pub fn element_com_obj_name(&mut self, name: RecordName) -> CodeResult<()> {
        self.guard(|c| c.named(NodeTag::ElmComObjName, name, false))
    }

    pub fn element_com_obj_expr(&mut self) -> CodeResult<()> {
        self.guard(|c| c.expr_of(NodeTag::ElmComObjExpr, 2))
    }

    pub fn is_bound_com_obj_name(&mut self, name: RecordName) -> CodeResult<()> {
        self.guard(|c| c.named(NodeTag::IsbComObjName, name, false))
    }

    pub fn is_bound_com_obj_expr(&mut self) -> CodeResult<()> {
        self.guard(|c| c.expr_of(NodeTag::IsbComObjExpr, 2))
    }

    /// Node of `operands` popped slots followed by a raw level slot.
    fn with_level(
        &mut self,
        tag: NodeTag,
        operands: usize,
        level: u32,
        statement: bool,
    ) -> CodeResult<()> {
        let exprs = self.pop_exprs(operands)?;
        let mut words: Vec<u64> = exprs.iter().map(|op| op.encode()).collect();
        words.push(u64::from(level));
        let node = self.node_with(tag, &words)?;
        if statement {
            self.push_stat(node);
        } else {
            self.push_expr(node);
        }
        Ok(())
    }

    /// `[container, raw name, rhs]` assignment.
    fn assign_named(&mut self, tag: NodeTag, name: RecordName) -> CodeResult<()> {
        let rhs = self.pop_expr()?;
        let container = self.pop_expr()?;
        let stat = self.node_with(tag, &[container.encode(), u64::from(name.0), rhs.encode()])?;
        self.push_stat(stat);
        Ok(())
    }

    /// `[container, raw name]` unbind, selection or is-bound check.
    fn named(&mut self, tag: NodeTag, name: RecordName, statement: bool) -> CodeResult<()> {
        let container = self.pop_expr()?;
        let node = self.node_with(tag, &[container.encode(), u64::from(name.0)])?;
        if statement {
            self.push_stat(node);
        } else {
            self.push_expr(Operand::Node(node));
        }
        Ok(())
    }
}

/// Single-index or matrix form.
fn pick_arity(
    action: &'static str,
    indices: usize,
    single: NodeTag,
    matrix: NodeTag,
) -> CodeResult<NodeTag> {
    match indices {
        1 => Ok(single),
        2 => Ok(matrix),
        count => Err(CodeError::UnsupportedArity { action, count }),
    }
}
