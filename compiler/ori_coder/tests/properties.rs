//! Property-based tests for the coder.
//!
//! Random well-formed programs are driven through the action protocol the
//! way a parser would, and checked against an independent rendering of the
//! same program:
//! 1. Stack balance: every statement leaves exactly one entry behind
//! 2. Offset stability: tiny initial bodies force many reallocations, and
//!    the rendered tree must still match

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::uninlined_format_args,
    clippy::redundant_closure_for_method_calls,
    reason = "Proptest macros generate code with these patterns"
)]

use ori_coder::{
    fits_immediate, BinaryOp, CodeResult, Coder, CoderConfig, DefaultHost, GlobalVar, ListShape,
    LocalVar, SourceId,
};
use proptest::prelude::*;

// -- Programs --

#[derive(Clone, Debug)]
enum Expr {
    Int(i64),
    Local(u32),
    Bool(bool),
    Not(Box<Expr>),
    Neg(Box<Expr>),
    Binary((BinaryOp, &'static str), Box<Expr>, Box<Expr>),
    List(Vec<Expr>),
    Call(u32, Vec<Expr>),
}

#[derive(Clone, Debug)]
enum Stat {
    Assign(u32, Expr),
    Call(u32, Vec<Expr>),
    Return(Expr),
    /// Condition is always a local, so no branch is folded away.
    If(u32, Vec<Stat>),
    While(Expr, Vec<Stat>),
}

fn binary_op() -> impl Strategy<Value = (BinaryOp, &'static str)> {
    prop_oneof![
        Just((BinaryOp::Sum, "sum")),
        Just((BinaryOp::Diff, "diff")),
        Just((BinaryOp::Prod, "prod")),
        Just((BinaryOp::Eq, "eq")),
        Just((BinaryOp::Lt, "lt")),
        Just((BinaryOp::And, "and")),
        Just((BinaryOp::In, "in")),
    ]
}

fn expr_strategy() -> impl Strategy<Value = Expr> {
    let leaf = prop_oneof![
        (-50i64..50).prop_map(Expr::Int),
        any::<i64>().prop_map(Expr::Int),
        (1u32..8).prop_map(Expr::Local),
        any::<bool>().prop_map(Expr::Bool),
    ];
    leaf.prop_recursive(4, 32, 9, |inner| {
        prop_oneof![
            inner.clone().prop_map(|e| Expr::Not(Box::new(e))),
            inner.clone().prop_map(|e| Expr::Neg(Box::new(e))),
            (binary_op(), inner.clone(), inner.clone())
                .prop_map(|(op, a, b)| Expr::Binary(op, Box::new(a), Box::new(b))),
            prop::collection::vec(inner.clone(), 0..5).prop_map(Expr::List),
            (1u32..5, prop::collection::vec(inner, 0..9)).prop_map(|(g, args)| Expr::Call(g, args)),
        ]
    })
}

fn stat_strategy() -> impl Strategy<Value = Stat> {
    let leaf = prop_oneof![
        (1u32..8, expr_strategy()).prop_map(|(var, e)| Stat::Assign(var, e)),
        (1u32..5, prop::collection::vec(expr_strategy(), 0..8))
            .prop_map(|(g, args)| Stat::Call(g, args)),
        expr_strategy().prop_map(Stat::Return),
    ];
    leaf.prop_recursive(3, 48, 10, |inner| {
        prop_oneof![
            (1u32..8, prop::collection::vec(inner.clone(), 0..10))
                .prop_map(|(var, body)| Stat::If(var, body)),
            (expr_strategy(), prop::collection::vec(inner, 0..10))
                .prop_map(|(cond, body)| Stat::While(cond, body)),
        ]
    })
}

// -- Driving the coder --

fn code_expr(c: &mut Coder, expr: &Expr) -> CodeResult<()> {
    match expr {
        Expr::Int(value) => c.int(*value),
        Expr::Local(var) => c.local(LocalVar(*var)),
        Expr::Bool(true) => c.true_expr(),
        Expr::Bool(false) => c.false_expr(),
        Expr::Not(inner) => {
            code_expr(c, inner)?;
            c.not()
        }
        Expr::Neg(inner) => {
            code_expr(c, inner)?;
            c.negate()
        }
        Expr::Binary((op, _), left, right) => {
            code_expr(c, left)?;
            code_expr(c, right)?;
            c.binary(*op)
        }
        Expr::List(elements) => {
            for (index, element) in elements.iter().enumerate() {
                c.list_begin_elm(index + 1)?;
                code_expr(c, element)?;
            }
            c.list_end(elements.len(), ListShape::Plain)
        }
        Expr::Call(global, args) => {
            c.global(GlobalVar(*global))?;
            for arg in args {
                code_expr(c, arg)?;
            }
            c.func_call_end(args.len(), false)
        }
    }
}

fn code_stat(c: &mut Coder, stat: &Stat) -> CodeResult<()> {
    match stat {
        Stat::Assign(var, rhs) => {
            code_expr(c, rhs)?;
            c.assign_local(LocalVar(*var))
        }
        Stat::Call(global, args) => {
            c.global(GlobalVar(*global))?;
            for arg in args {
                code_expr(c, arg)?;
            }
            c.proc_call_end(args.len(), false)
        }
        Stat::Return(value) => {
            code_expr(c, value)?;
            c.return_value()
        }
        Stat::If(var, body) => {
            c.local(LocalVar(*var))?;
            assert_eq!(c.if_begin_body()?, ori_coder::IfBranch::Code);
            for stat in body {
                code_stat(c, stat)?;
            }
            assert_eq!(c.if_end_body(body.len())?, ori_coder::IfBranch::Code);
            c.if_end(1)
        }
        Stat::While(cond, body) => {
            code_expr(c, cond)?;
            for stat in body {
                code_stat(c, stat)?;
            }
            c.while_end_body(body.len())
        }
    }
}

// -- Expected rendering --

enum Folded {
    Int(i64),
    Text(String),
}

impl Folded {
    fn text(self) -> String {
        match self {
            Folded::Int(value) => value.to_string(),
            Folded::Text(text) => text,
        }
    }
}

fn expect_expr(expr: &Expr) -> Folded {
    match expr {
        Expr::Int(value) if fits_immediate(*value) => Folded::Int(*value),
        Expr::Int(value) => Folded::Text(format!("(int-value {value})")),
        Expr::Local(var) => Folded::Text(format!("(lvar {var})")),
        Expr::Bool(value) => Folded::Text(format!("({value})")),
        Expr::Not(inner) => match expect_expr(inner).text().as_str() {
            "(true)" => Folded::Text("(false)".into()),
            "(false)" => Folded::Text("(true)".into()),
            other => Folded::Text(format!("(not {other})")),
        },
        Expr::Neg(inner) => match expect_expr(inner) {
            Folded::Int(value) if value != ori_coder::IMMEDIATE_MIN => Folded::Int(-value),
            other => Folded::Text(format!("(ainv {})", other.text())),
        },
        Expr::Binary((_, name), left, right) => Folded::Text(format!(
            "({name} {} {})",
            expect_expr(left).text(),
            expect_expr(right).text()
        )),
        Expr::List(elements) => Folded::Text(node("list", elements.iter().map(expr_text))),
        Expr::Call(global, args) => {
            let operands = std::iter::once(format!("(gvar {global})")).chain(args.iter().map(expr_text));
            Folded::Text(node(&call_name("call", args.len()), operands))
        }
    }
}

fn expr_text(expr: &Expr) -> String {
    expect_expr(expr).text()
}

fn node(name: &str, operands: impl IntoIterator<Item = String>) -> String {
    let mut out = format!("({name}");
    for operand in operands {
        out.push(' ');
        out.push_str(&operand);
    }
    out.push(')');
    out
}

fn call_name(prefix: &str, args: usize) -> String {
    if args <= 6 {
        format!("{prefix}-{args}")
    } else {
        format!("{prefix}-x")
    }
}

fn seq_name(count: usize) -> String {
    if count == 1 || count > 7 {
        "seq".into()
    } else {
        format!("seq-{count}")
    }
}

/// Several statements packed into one.
fn expect_seq(stats: Vec<String>) -> String {
    match stats.len() {
        0 => "(empty)".into(),
        1 => stats.into_iter().next().unwrap_or_default(),
        count => node(&seq_name(count), stats),
    }
}

fn expect_stat(stat: &Stat) -> String {
    match stat {
        Stat::Assign(var, rhs) => format!("(ass-lvar {var} {})", expr_text(rhs)),
        Stat::Call(global, args) => {
            let operands = std::iter::once(format!("(gvar {global})")).chain(args.iter().map(expr_text));
            node(&call_name("proc-call", args.len()), operands)
        }
        Stat::Return(value) => format!("(return {})", expr_text(value)),
        Stat::If(var, body) => format!(
            "(if (lvar {var}) {})",
            expect_seq(body.iter().map(expect_stat).collect())
        ),
        Stat::While(cond, body) => {
            let stats: Vec<String> = body.iter().map(expect_stat).collect();
            let stats = match stats.len() {
                0 => vec!["(empty)".to_owned()],
                1..=3 => stats,
                _ => vec![expect_seq(stats)],
            };
            let name = match stats.len() {
                1 => "while".to_owned(),
                count => format!("while-{count}"),
            };
            node(&name, std::iter::once(expr_text(cond)).chain(stats))
        }
    }
}

fn expect_function(stats: &[Stat]) -> String {
    let mut top: Vec<String> = stats.iter().map(expect_stat).collect();
    if !matches!(stats.last(), Some(Stat::Return(_))) {
        top.push("(return-void)".into());
    }
    if top.len() > 7 {
        let rest = top.split_off(6);
        top.push(expect_seq(rest));
    }
    node(&seq_name(top.len()), top)
}

// -- Properties --

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn coded_program_matches_expected(
        stats in prop::collection::vec(stat_strategy(), 0..12),
        slots in 1usize..16,
    ) {
        let config = CoderConfig::default().with_initial_body_slots(slots);
        let mut c = Coder::with_config(config, DefaultHost);
        c.begin();
        c.func_begin(0, 8, Vec::new(), SourceId(1), 1).unwrap();
        for (index, stat) in stats.iter().enumerate() {
            code_stat(&mut c, stat).unwrap();
            prop_assert_eq!(c.pending_expressions(), 0);
            prop_assert_eq!(c.pending_statements(), index + 1);
        }
        c.func_end(stats.len(), 2).unwrap();
        prop_assert!(c.is_idle());

        let literal = c.end(false).unwrap().unwrap();
        prop_assert_eq!(literal.body.render(), expect_function(&stats));
    }

    #[test]
    fn expressions_leave_one_operand(expr in expr_strategy()) {
        let mut c = Coder::new();
        c.func_begin(0, 8, Vec::new(), SourceId(1), 1).unwrap();
        code_expr(&mut c, &expr).unwrap();
        prop_assert_eq!(c.pending_expressions(), 1);
        prop_assert_eq!(c.pending_statements(), 0);
        prop_assert_eq!(c.end(true), Ok(None));
    }
}
