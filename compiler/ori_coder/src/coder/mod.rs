//! The coder: parser actions in, function literals out.
//!
//! Each action follows the same shape: pop a known number of operands,
//! try to fold, allocate a node, fill its slots and push the result. The
//! family modules hold the actions; this module holds the state and the
//! allocation and stack primitives they share.
//!
//! # Failure
//!
//! Every public action runs through [`Coder::guard`]. If it fails, the whole
//! construction is discarded before the error is returned.

mod access;
mod calls;
mod collections;
mod control;
mod function;
mod literals;
mod operators;
mod variables;

pub use collections::ListShape;
pub use control::IfBranch;
pub use operators::BinaryOp;

use std::sync::Arc;

use tracing::{trace, warn};

use crate::body::check_node_size;
use crate::header::{padded, NodeHeader};
use crate::scope::{PendingFunction, ScopeStack};
use crate::stack::{OperandStack, Popped};
use crate::{
    CodeError, CodeResult, CoderConfig, CoderHost, DefaultHost, FunctionLiteral, NodeId,
    NodeTag, Operand, StackKind, Value, ValueId, NODE_HEADER_SIZE, SLOT_SIZE,
};

/// Builds function literals from parser actions.
///
/// One coder serves one parse at a time; independent coders share nothing
/// except the float literal registry.
pub struct Coder<H: CoderHost = DefaultHost> {
    config: CoderConfig,
    host: H,
    /// Source line attached to new nodes.
    line: u32,
    /// Next free byte in the current body.
    cursor: usize,
    current: Option<PendingFunction>,
    scopes: ScopeStack,
    statements: OperandStack<NodeId>,
    expressions: OperandStack<Operand>,
    result: Option<Arc<FunctionLiteral>>,
}

impl Coder<DefaultHost> {
    pub fn new() -> Self {
        Self::with_host(DefaultHost)
    }
}

impl Default for Coder<DefaultHost> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: CoderHost> Coder<H> {
    pub fn with_host(host: H) -> Self {
        Self::with_config(CoderConfig::default(), host)
    }

    pub fn with_config(config: CoderConfig, host: H) -> Self {
        Coder {
            config,
            host,
            line: 0,
            cursor: 0,
            current: None,
            scopes: ScopeStack::default(),
            statements: OperandStack::with_capacity(StackKind::Statement, config.stack_capacity),
            expressions: OperandStack::with_capacity(
                StackKind::Expression,
                config.stack_capacity,
            ),
            result: None,
        }
    }

    pub fn config(&self) -> &CoderConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    /// Start a new top-level construction, dropping anything left over.
    pub fn begin(&mut self) {
        self.abort();
    }

    /// Finish the top-level construction.
    ///
    /// With `error` set (the parser gave up), everything is discarded and
    /// `Ok(None)` is returned. Otherwise both stacks must be empty and every
    /// literal closed; the outermost literal is handed over.
    pub fn end(&mut self, error: bool) -> CodeResult<Option<Arc<FunctionLiteral>>> {
        if error {
            self.abort();
            return Ok(None);
        }
        self.guard(|c| {
            if c.scopes.depth() != 0 {
                return Err(CodeError::UnclosedFunctions {
                    depth: c.scopes.depth(),
                });
            }
            if !c.statements.is_empty() || !c.expressions.is_empty() {
                return Err(CodeError::UnbalancedStacks {
                    statements: c.statements.len(),
                    expressions: c.expressions.len(),
                });
            }
            Ok(c.result.take())
        })
    }

    /// `true` when no construction is in progress and both stacks are empty.
    pub fn is_idle(&self) -> bool {
        self.statements.is_empty() && self.expressions.is_empty() && self.scopes.depth() == 0
    }

    /// Save the float registry counter for a program image.
    ///
    /// Refused while a construction is in progress.
    pub fn save_float_registry(&self) -> CodeResult<u32> {
        if self.is_idle() {
            Ok(crate::float::next_index())
        } else {
            Err(CodeError::Busy)
        }
    }

    /// Source line for the nodes coded next.
    pub fn set_line(&mut self, line: u32) {
        self.line = line;
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    /// Number of open function literals.
    pub fn depth(&self) -> usize {
        self.scopes.depth()
    }

    pub fn pending_statements(&self) -> usize {
        self.statements.len()
    }

    pub fn pending_expressions(&self) -> usize {
        self.expressions.len()
    }

    /// Run an action; on failure discard the construction.
    fn guard<T>(&mut self, action: impl FnOnce(&mut Self) -> CodeResult<T>) -> CodeResult<T> {
        let result = action(self);
        if let Err(err) = &result {
            warn!(%err, depth = self.scopes.depth(), "coding aborted");
            self.abort();
        }
        result
    }

    fn abort(&mut self) {
        self.statements.clear();
        self.expressions.clear();
        self.scopes.clear();
        self.current = None;
        self.cursor = 0;
        self.result = None;
    }

    fn function(&self) -> CodeResult<&PendingFunction> {
        self.current.as_ref().ok_or(CodeError::NoOpenFunction)
    }

    fn function_mut(&mut self) -> CodeResult<&mut PendingFunction> {
        self.current.as_mut().ok_or(CodeError::NoOpenFunction)
    }

    // Allocation

    /// Allocate a node of `size` payload bytes at the current line.
    fn new_node(&mut self, tag: NodeTag, size: usize) -> CodeResult<NodeId> {
        self.allocate(tag, size, self.line, true)
    }

    /// Allocate a node the parser did not ask for; not reported to the
    /// coverage hook and attributed to line 0.
    fn new_synthetic_node(&mut self, tag: NodeTag, size: usize) -> CodeResult<NodeId> {
        self.allocate(tag, size, 0, false)
    }

    fn allocate(
        &mut self,
        tag: NodeTag,
        size: usize,
        line: u32,
        report: bool,
    ) -> CodeResult<NodeId> {
        let size_field = check_node_size(size)?;
        let offset = self.cursor + NODE_HEADER_SIZE;
        let end = offset + padded(size);
        let function = self.current.as_mut().ok_or(CodeError::NoOpenFunction)?;
        function.body.reserve(end)?;
        let node = u32::try_from(offset)
            .map(NodeId::new)
            .map_err(|_| CodeError::BodyOverflow { size: end })?;
        function
            .body
            .write_header(node, NodeHeader::new(tag, size_field, line))?;
        let source = function.source();
        self.cursor = end;
        trace!(%tag, offset, size, line, "node");
        if report {
            self.host.register_node(source, line, tag);
        }
        Ok(node)
    }

    /// Push a zero-slot expression.
    fn leaf(&mut self, tag: NodeTag) -> CodeResult<()> {
        let expr = self.new_node(tag, 0)?;
        self.push_expr(expr);
        Ok(())
    }

    /// Allocate `tag` with one slot per word.
    fn node_with(&mut self, tag: NodeTag, words: &[u64]) -> CodeResult<NodeId> {
        let node = self.new_node(tag, words.len() * SLOT_SIZE)?;
        let body = &mut self.function_mut()?.body;
        for (index, word) in words.iter().enumerate() {
            body.write_slot(node, index, *word)?;
        }
        Ok(node)
    }

    /// Allocate `tag` with the given operands as its slots.
    fn node_of(&mut self, tag: NodeTag, operands: &[Operand]) -> CodeResult<NodeId> {
        let words: Popped<u64> = operands.iter().map(|op| op.encode()).collect();
        self.node_with(tag, &words)
    }

    fn write_slot(&mut self, node: NodeId, index: usize, word: u64) -> CodeResult<()> {
        self.function_mut()?.body.write_slot(node, index, word)
    }

    fn read_slot(&self, node: NodeId, index: usize) -> CodeResult<u64> {
        self.function()?.body.read_slot(node, index)
    }

    fn header(&self, node: NodeId) -> CodeResult<Option<NodeHeader>> {
        self.function()?.body.header(node)
    }

    /// Tag of an operand in the current body; immediates report their
    /// pseudo-tags.
    fn tag_of(&self, operand: Operand) -> CodeResult<Option<NodeTag>> {
        self.function()?.body.tag_of(operand)
    }

    fn add_value(&mut self, value: Value) -> CodeResult<ValueId> {
        Ok(self.function_mut()?.body.add_value(value))
    }

    /// Add a value and return the raw slot word referencing it.
    fn value_slot(&mut self, value: Value) -> CodeResult<u64> {
        self.add_value(value).map(|id| u64::from(id.raw()))
    }

    // Stacks

    fn push_stat(&mut self, stat: NodeId) {
        self.statements.push(stat);
    }

    fn pop_stat(&mut self) -> CodeResult<NodeId> {
        self.statements.pop()
    }

    fn push_expr(&mut self, expr: impl Into<Operand>) {
        self.expressions.push(expr.into());
    }

    fn pop_expr(&mut self) -> CodeResult<Operand> {
        self.expressions.pop()
    }

    /// Pop `count` expressions, oldest first.
    fn pop_exprs(&mut self, count: usize) -> CodeResult<Popped<Operand>> {
        self.expressions.pop_many(count)
    }

    /// Pop a protocol marker left on the expression stack as an immediate.
    fn pop_marker(&mut self, what: &'static str) -> CodeResult<usize> {
        let found = self.pop_expr()?;
        found
            .as_int()
            .and_then(|value| usize::try_from(value).ok())
            .ok_or(CodeError::ExpectedImmediate { what, found })
    }

    /// Push a count for a later action as an immediate.
    fn push_marker(&mut self, count: usize) {
        let marker = i64::try_from(count)
            .ok()
            .and_then(Operand::int)
            .unwrap_or(Operand::Int(0));
        self.push_expr(marker);
    }

    // Node shapes shared by the action families

    fn simple_stat(&mut self, tag: NodeTag) -> CodeResult<()> {
        let stat = self.new_node(tag, 0)?;
        self.push_stat(stat);
        Ok(())
    }

    /// Statement taking its `operands` slots from the expression stack.
    fn stat_of(&mut self, tag: NodeTag, operands: usize) -> CodeResult<()> {
        let exprs = self.pop_exprs(operands)?;
        let stat = self.node_of(tag, &exprs)?;
        self.push_stat(stat);
        Ok(())
    }

    /// Expression taking its `operands` slots from the expression stack.
    fn expr_of(&mut self, tag: NodeTag, operands: usize) -> CodeResult<()> {
        let exprs = self.pop_exprs(operands)?;
        let expr = self.node_of(tag, &exprs)?;
        self.push_expr(expr);
        Ok(())
    }

    // Statement packing

    /// Pack the top `count` statements into one statement.
    ///
    /// No statement becomes `Empty`, one stays as it is, two to seven get a
    /// size-specialised sequence and more get the generic sequence.
    fn pop_seq(&mut self, count: usize) -> CodeResult<NodeId> {
        match count {
            0 => self.new_node(NodeTag::Empty, 0),
            1 => self.pop_stat(),
            _ => {
                let tag = NodeTag::seq(count).unwrap_or(NodeTag::SeqStat);
                let stats = self.statements.pop_many(count)?;
                let words: Popped<u64> = stats.iter().map(|s| u64::from(s.raw())).collect();
                self.node_with(tag, &words)
            }
        }
    }

    /// Loop node with `extra` leading slots followed by the body statements.
    ///
    /// An empty body becomes one `Empty` statement and more than three
    /// statements are packed into a sequence, so at most three are inlined.
    /// The leading slots are left for the caller.
    fn pop_loop(&mut self, base: NodeTag, extra: usize, count: usize) -> CodeResult<NodeId> {
        let count = match count {
            0 => {
                let empty = self.new_node(NodeTag::Empty, 0)?;
                self.push_stat(empty);
                1
            }
            1..=3 => count,
            _ => {
                let seq = self.pop_seq(count)?;
                self.push_stat(seq);
                1
            }
        };
        debug_assert!(base.loop_with_body(1) == Some(base), "{base} is not a loop");
        let tag = base.loop_with_body(count).unwrap_or(base);
        let stats = self.statements.pop_many(count)?;
        let node = self.new_node(tag, (extra + count) * SLOT_SIZE)?;
        for (index, stat) in stats.iter().enumerate() {
            self.write_slot(node, extra + index, u64::from(stat.raw()))?;
        }
        Ok(node)
    }
}
