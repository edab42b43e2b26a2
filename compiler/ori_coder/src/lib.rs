//! Ori Coder - incremental IR construction
//!
//! The parser drives a [`Coder`] through a flat action protocol (push a
//! literal, combine the last N operands, begin/end a nested construct) and
//! the coder emits a dense, directly interpretable node tree for each
//! function literal.
//!
//! # Layout
//!
//! - Nodes live in a byte buffer per function literal ([`FrozenBody`] once
//!   finished) and are addressed by byte offset ([`NodeId`]), never by pointer
//! - Small integers and local variable references are immediates
//!   ([`Operand`]) and have no node at all
//! - Literal values that do not fit a slot go to the body's values table
//!   ([`Value`], [`ValueId`])
//!
//! # Peephole folding
//!
//! Construction folds `not true`/`not false`, negation of immediates, dead
//! `if` branches and common float constants as it goes; there is no separate
//! optimisation pass.
//!
//! # Tracing
//!
//! Enable with `RUST_LOG=ori_coder=debug` (body growth, nested literals) or
//! `RUST_LOG=ori_coder=trace` (every node allocation).

mod arena;
mod body;
mod coder;
mod config;
mod error;
pub mod float;
mod header;
mod host;
mod operand;
mod scope;
mod stack;
mod tag;
mod values;

pub use body::{
    BodyHeader, FrozenBody, FunctionLiteral, SourceId, BODY_HEADER_SIZE, FIRST_STATEMENT,
    TOP_LEVEL_SLOTS,
};
pub use coder::{BinaryOp, Coder, IfBranch, ListShape};
pub use config::CoderConfig;
pub use error::{CodeError, CodeResult, StackKind};
pub use float::FloatLiteral;
pub use header::{NodeHeader, MAX_LINE, MAX_NODE_SIZE, NODE_HEADER_SIZE, SLOT_SIZE};
pub use host::{CoderHost, DefaultHost};
pub use operand::{
    fits_immediate, EnclosingVar, GlobalVar, LocalVar, NodeId, Operand, RecordName,
    IMMEDIATE_MAX, IMMEDIATE_MIN,
};
pub use tag::{NodeTag, SlotKind};
pub use values::{Value, ValueId};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Call this once at startup. Safe to call multiple times.
/// Only installs a subscriber when `RUST_LOG` is set.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
