//! Function literals.

use std::sync::Arc;

use tracing::debug;

use super::Coder;
use crate::body::{Body, SourceId, FIRST_STATEMENT, TOP_LEVEL_SLOTS};
use crate::header::NodeHeader;
use crate::scope::{Continuation, PendingFunction};
use crate::{
    CodeError, CodeResult, CoderHost, FunctionLiteral, NodeId, NodeTag, Operand, Value,
    BODY_HEADER_SIZE, SLOT_SIZE,
};

impl<H: CoderHost> Coder<H> {
    /// Begin a function literal.
    ///
    /// Suspends the literal being coded, if any. `arg_count` is negative
    /// for variadic functions; `names` lists arguments, then locals.
    pub fn func_begin(
        &mut self,
        arg_count: i32,
        local_count: u32,
        names: Vec<String>,
        source: SourceId,
        start_line: u32,
    ) -> CodeResult<()> {
        self.guard(|c| {
            c.scopes.push(Continuation {
                cursor: c.cursor,
                function: c.current.take(),
            });
            debug!(depth = c.scopes.depth(), arg_count, start_line, "function literal begins");

            let body = Body::new(c.config.initial_body_bytes(), source, start_line);
            c.current = Some(PendingFunction {
                arg_count,
                local_count,
                names,
                body,
            });
            c.cursor = BODY_HEADER_SIZE;

            let first = c.new_node(NodeTag::SeqStat, TOP_LEVEL_SLOTS * SLOT_SIZE)?;
            debug_assert_eq!(first.offset(), FIRST_STATEMENT);
            Ok(())
        })
    }

    /// End the current function literal after `statements` top-level
    /// statements.
    ///
    /// A missing final return is added. A nested literal becomes a `Func`
    /// expression in the enclosing body; the outermost one is kept for
    /// [`Coder::end`].
    pub fn func_end(&mut self, statements: usize, end_line: u32) -> CodeResult<()> {
        self.guard(|c| c.finish_function(statements, end_line))
    }

    fn finish_function(&mut self, statements: usize, end_line: u32) -> CodeResult<()> {
        let mut count = statements;
        if count == 0 {
            let stat = self.new_node(NodeTag::ReturnVoid, 0)?;
            self.push_stat(stat);
            count = 1;
        } else if !self.ends_with_return(self.statements.peek()?)? {
            let stat = self.new_synthetic_node(NodeTag::ReturnVoid, 0)?;
            self.push_stat(stat);
            count += 1;
        }

        if count > 7 {
            let rest = self.pop_seq(count - 6)?;
            self.push_stat(rest);
            count = 7;
        }

        let stats = self.statements.pop_many(count)?;
        let first = NodeId::new(FIRST_STATEMENT as u32);
        let line = self.header(first)?.map_or(0, |h| h.line);
        let tag = NodeTag::seq(count).unwrap_or(NodeTag::SeqStat);
        let size = u32::try_from(count * SLOT_SIZE).unwrap_or(0);
        let used = self.cursor;
        let function = self.function_mut()?;
        function
            .body
            .write_header(first, NodeHeader::new(tag, size, line))?;
        for (index, stat) in stats.iter().enumerate() {
            function
                .body
                .write_slot(first, index, Operand::Node(*stat).encode())?;
        }

        let continuation = self.scopes.pop()?;
        let finished = std::mem::replace(&mut self.current, continuation.function);
        self.cursor = continuation.cursor;
        let Some(finished) = finished else {
            return Err(CodeError::NoOpenFunction);
        };
        let literal = Arc::new(FunctionLiteral {
            arg_count: finished.arg_count,
            local_count: finished.local_count,
            names: finished.names,
            body: finished.body.freeze(used, end_line)?,
        });
        debug!(
            depth = self.scopes.depth(),
            bytes = used,
            values = literal.body.values().len(),
            "function literal finished"
        );

        if self.current.is_some() {
            let id = self.add_value(Value::Function(literal))?;
            let func = self.node_with(NodeTag::Func, &[u64::from(id.raw())])?;
            self.push_expr(func);
        } else {
            self.result = Some(literal);
        }
        Ok(())
    }

    /// Whether the statement, or the last statement of the innermost
    /// trailing sequence, is a return.
    fn ends_with_return(&self, stat: NodeId) -> CodeResult<bool> {
        let mut stat = stat;
        loop {
            let Some(header) = self.header(stat)? else {
                return Ok(false);
            };
            if !header.tag.is_seq() {
                return Ok(header.tag.is_return());
            }
            let last = header.slot_count().saturating_sub(1);
            match Operand::decode(self.read_slot(stat, last)?) {
                Some(Operand::Node(inner)) => stat = inner,
                _ => return Ok(false),
            }
        }
    }
}
