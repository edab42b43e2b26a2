//! Function and procedure calls, with their options record.

use super::Coder;
use crate::{CodeResult, CoderHost, NodeId, NodeTag, Operand, RecordName};

impl<H: CoderHost> Coder<H> {
    /// Function call with `args` arguments, used as an expression.
    ///
    /// With `options` set, the options record coded by
    /// [`Coder::options_end`] sits on top of the arguments.
    pub fn func_call_end(&mut self, args: usize, options: bool) -> CodeResult<()> {
        self.guard(|c| {
            let call = c.call(NodeTag::func_call(args), NodeTag::FuncCallOpts, args, options)?;
            c.push_expr(call);
            Ok(())
        })
    }

    /// Procedure call with `args` arguments, used as a statement.
    pub fn proc_call_end(&mut self, args: usize, options: bool) -> CodeResult<()> {
        self.guard(|c| {
            let call = c.call(NodeTag::proc_call(args), NodeTag::ProcCallOpts, args, options)?;
            c.push_stat(call);
            Ok(())
        })
    }

    /// Name of the next option, as in `f(x : name := value)`.
    pub fn options_elm_name(&mut self, name: RecordName) -> CodeResult<()> {
        self.guard(|c| {
            c.push_expr(Operand::Int(i64::from(name.0)));
            Ok(())
        })
    }

    /// Value of an option given without one; it defaults to `true`.
    pub fn options_elm_empty(&mut self) -> CodeResult<()> {
        self.guard(|c| c.leaf(NodeTag::True))
    }

    /// Close the options record after `entries` name/value pairs.
    pub fn options_end(&mut self, entries: usize) -> CodeResult<()> {
        self.guard(|c| c.expr_of(NodeTag::Rec, 2 * entries))
    }

    /// Pop the options, the arguments and the callee; build the call.
    fn call(
        &mut self,
        tag: NodeTag,
        options_tag: NodeTag,
        args: usize,
        options: bool,
    ) -> CodeResult<NodeId> {
        let opts = if options {
            Some(self.pop_expr()?)
        } else {
            None
        };
        // callee first, then the arguments in source order
        let operands = self.pop_exprs(args + 1)?;
        let call = self.node_of(tag, &operands)?;
        match opts {
            Some(opts) => self.node_of(options_tag, &[opts, Operand::Node(call)]),
            None => Ok(call),
        }
    }
}
