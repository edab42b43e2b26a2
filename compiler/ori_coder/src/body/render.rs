//! S-expression rendering of finished bodies.
//!
//! `return 1 + 2;` renders as `(seq (return (sum 1 2)))`. Immediate
//! integers print bare, local references as `(lvar N)`, list holes as `_`,
//! enclosing variables as `level:index`, and nested function literals
//! inline as `(fn ARGS BODY)`.

use std::fmt::Write;

use crate::{EnclosingVar, FrozenBody, NodeId, NodeTag, Operand, SlotKind, Value};

impl FrozenBody {
    /// Render the whole body, starting at the top-level sequence.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_operand(&mut out, Some(Operand::Node(self.first_statement())));
        out
    }

    /// Render the subtree rooted at `operand`.
    pub fn render_from(&self, operand: Operand) -> String {
        let mut out = String::new();
        self.render_operand(&mut out, Some(operand));
        out
    }

    fn render_operand(&self, out: &mut String, operand: Option<Operand>) {
        match operand {
            None => out.push('_'),
            Some(Operand::Int(value)) => {
                let _ = write!(out, "{value}");
            }
            Some(Operand::Local(var)) => {
                let _ = write!(out, "(lvar {})", var.0);
            }
            Some(Operand::Node(node)) => {
                ensure_sufficient_stack(|| self.render_node(out, node));
            }
        }
    }

    fn render_node(&self, out: &mut String, node: NodeId) {
        let Some(header) = self.node(node) else {
            let _ = write!(out, "<invalid @{}>", node.raw());
            return;
        };
        let count = header.slot_count();
        out.push('(');
        out.push_str(header.tag.name());
        for index in 0..count {
            out.push(' ');
            let word = self.slot(node, index).unwrap_or_default();
            match header.tag.slot_kind(index, count) {
                SlotKind::Operand => self.render_operand(out, Operand::decode(word)),
                SlotKind::Raw => render_raw(out, header.tag, index, word),
                SlotKind::Value => match self.value_at(node, index) {
                    Some(Value::Function(func)) => {
                        let _ = write!(out, "(fn {} ", func.arg_count);
                        out.push_str(&ensure_sufficient_stack(|| func.body.render()));
                        out.push(')');
                    }
                    Some(value) => {
                        let _ = write!(out, "{value}");
                    }
                    None => {
                        let _ = write!(out, "<value {word}>");
                    }
                },
            }
        }
        out.push(')');
    }
}

fn render_raw(out: &mut String, tag: NodeTag, index: usize, word: u64) {
    let enclosing = match tag {
        NodeTag::RefHVar | NodeTag::IsbHVar | NodeTag::UnbHVar => true,
        NodeTag::AssHVar => index == 0,
        _ => false,
    };
    if enclosing {
        let var = EnclosingVar::from_raw(word);
        let _ = write!(out, "{}:{}", var.level, var.index);
    } else {
        let _ = write!(out, "{word}");
    }
}

/// Minimum stack space to keep available while rendering.
#[cfg(not(target_arch = "wasm32"))]
const RED_ZONE: usize = 100 * 1024;

/// Stack space to allocate when growing.
#[cfg(not(target_arch = "wasm32"))]
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Grow the stack before recursing into deeply nested bodies.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
