//! Node tags.
//!
//! Every node in a body starts with a header whose top byte is a [`NodeTag`].
//! Several families are specialised by arity so the evaluator can dispatch
//! without reading a count:
//!
//! - statement sequences: `SeqStat` (1 or more than 7) and `SeqStat2..=SeqStat7`
//! - calls: `*Call0Args..=*Call6Args`, then `*CallXArgs`
//! - loops: one to three inlined body statements per loop kind
//!
//! Two tags never appear in a header: [`NodeTag::Int`] and
//! [`NodeTag::RefLVar`] describe immediate operands (see
//! [`Operand`](crate::Operand)).

use std::fmt;

/// How a slot of a node is interpreted.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SlotKind {
    /// An encoded [`Operand`](crate::Operand): node offset or immediate.
    Operand,
    /// A raw integer: variable index, record name, level, character code.
    Raw,
    /// An index into the body's values table.
    Value,
}

macro_rules! node_tags {
    ($($variant:ident => $name:literal,)*) => {
        /// Kind of a statement or expression node.
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
        #[repr(u8)]
        pub enum NodeTag {
            $($variant,)*
        }

        impl NodeTag {
            /// All tags, ordered by their raw value.
            pub const ALL: &'static [NodeTag] = &[$(NodeTag::$variant,)*];

            /// Stable lower-case name, used when rendering bodies.
            pub const fn name(self) -> &'static str {
                match self {
                    $(NodeTag::$variant => $name,)*
                }
            }
        }
    };
}

node_tags! {
    // Statements
    ProcCall0Args => "proc-call-0",
    ProcCall1Args => "proc-call-1",
    ProcCall2Args => "proc-call-2",
    ProcCall3Args => "proc-call-3",
    ProcCall4Args => "proc-call-4",
    ProcCall5Args => "proc-call-5",
    ProcCall6Args => "proc-call-6",
    ProcCallXArgs => "proc-call-x",
    ProcCallOpts => "proc-call-opts",
    Empty => "empty",
    SeqStat => "seq",
    SeqStat2 => "seq-2",
    SeqStat3 => "seq-3",
    SeqStat4 => "seq-4",
    SeqStat5 => "seq-5",
    SeqStat6 => "seq-6",
    SeqStat7 => "seq-7",
    If => "if",
    IfElse => "if-else",
    IfElif => "if-elif",
    IfElifElse => "if-elif-else",
    For => "for",
    For2 => "for-2",
    For3 => "for-3",
    ForRange => "for-range",
    ForRange2 => "for-range-2",
    ForRange3 => "for-range-3",
    While => "while",
    While2 => "while-2",
    While3 => "while-3",
    Repeat => "repeat",
    Repeat2 => "repeat-2",
    Repeat3 => "repeat-3",
    Break => "break",
    Continue => "continue",
    ReturnObj => "return",
    ReturnVoid => "return-void",
    AssLVar => "ass-lvar",
    UnbLVar => "unb-lvar",
    AssHVar => "ass-hvar",
    UnbHVar => "unb-hvar",
    AssGVar => "ass-gvar",
    UnbGVar => "unb-gvar",
    AssList => "ass-list",
    AssMat => "ass-mat",
    AsssList => "asss-list",
    AssListLev => "ass-list-lev",
    AsssListLev => "asss-list-lev",
    UnbList => "unb-list",
    AssRecName => "ass-rec-name",
    AssRecExpr => "ass-rec-expr",
    UnbRecName => "unb-rec-name",
    UnbRecExpr => "unb-rec-expr",
    AssPosObj => "ass-posobj",
    UnbPosObj => "unb-posobj",
    AssComObjName => "ass-comobj-name",
    AssComObjExpr => "ass-comobj-expr",
    UnbComObjName => "unb-comobj-name",
    UnbComObjExpr => "unb-comobj-expr",
    Info => "info",
    Assert2Args => "assert-2",
    Assert3Args => "assert-3",
    Pragma => "pragma",

    // Expressions
    FuncCall0Args => "call-0",
    FuncCall1Args => "call-1",
    FuncCall2Args => "call-2",
    FuncCall3Args => "call-3",
    FuncCall4Args => "call-4",
    FuncCall5Args => "call-5",
    FuncCall6Args => "call-6",
    FuncCallXArgs => "call-x",
    FuncCallOpts => "call-opts",
    Func => "func",
    Or => "or",
    And => "and",
    Not => "not",
    Eq => "eq",
    Ne => "ne",
    Lt => "lt",
    Ge => "ge",
    Gt => "gt",
    Le => "le",
    In => "in",
    Sum => "sum",
    AInv => "ainv",
    Diff => "diff",
    Prod => "prod",
    Quo => "quo",
    Mod => "mod",
    Pow => "pow",
    Int => "int",
    IntPos => "int-value",
    True => "true",
    False => "false",
    Tilde => "tilde",
    Char => "char",
    Perm => "perm",
    PermCycle => "perm-cycle",
    List => "list",
    ListTilde => "list-tilde",
    Range => "range",
    String => "string",
    Rec => "rec",
    RecTilde => "rec-tilde",
    FloatEager => "float-eager",
    FloatLazy => "float-lazy",
    RefLVar => "lvar",
    IsbLVar => "isb-lvar",
    RefHVar => "hvar",
    IsbHVar => "isb-hvar",
    RefGVar => "gvar",
    IsbGVar => "isb-gvar",
    ElmList => "elm-list",
    ElmMat => "elm-mat",
    ElmsList => "elms-list",
    ElmListLev => "elm-list-lev",
    ElmsListLev => "elms-list-lev",
    IsbList => "isb-list",
    ElmRecName => "elm-rec-name",
    ElmRecExpr => "elm-rec-expr",
    IsbRecName => "isb-rec-name",
    IsbRecExpr => "isb-rec-expr",
    ElmPosObj => "elm-posobj",
    IsbPosObj => "isb-posobj",
    ElmComObjName => "elm-comobj-name",
    ElmComObjExpr => "elm-comobj-expr",
    IsbComObjName => "isb-comobj-name",
    IsbComObjExpr => "isb-comobj-expr",
}

impl NodeTag {
    /// Raw header value.
    #[inline]
    pub const fn raw(self) -> u8 {
        self as u8
    }

    /// Decode a raw header value.
    #[inline]
    pub fn from_raw(raw: u8) -> Option<NodeTag> {
        Self::ALL.get(usize::from(raw)).copied()
    }

    /// The tag `steps` positions after `self` in a contiguous family.
    fn offset(self, steps: usize) -> Option<NodeTag> {
        let raw = usize::from(self.raw()) + steps;
        u8::try_from(raw).ok().and_then(Self::from_raw)
    }

    /// Size-specialised sequence tag for `count` statements (1..=7).
    ///
    /// `SeqStat` doubles as the generic tag for longer sequences; callers
    /// handle that case themselves.
    pub fn seq(count: usize) -> Option<NodeTag> {
        match count {
            1..=7 => NodeTag::SeqStat.offset(count - 1),
            _ => None,
        }
    }

    /// Arity-specialised function call tag.
    pub fn func_call(args: usize) -> NodeTag {
        NodeTag::FuncCall0Args
            .offset(args)
            .filter(|_| args <= 6)
            .unwrap_or(NodeTag::FuncCallXArgs)
    }

    /// Arity-specialised procedure call tag.
    pub fn proc_call(args: usize) -> NodeTag {
        NodeTag::ProcCall0Args
            .offset(args)
            .filter(|_| args <= 6)
            .unwrap_or(NodeTag::ProcCallXArgs)
    }

    /// Loop tag carrying `body` inlined statements (1..=3), starting from a
    /// base loop tag (`For`, `ForRange`, `While` or `Repeat`).
    pub fn loop_with_body(self, body: usize) -> Option<NodeTag> {
        if !matches!(
            self,
            NodeTag::For | NodeTag::ForRange | NodeTag::While | NodeTag::Repeat
        ) {
            return None;
        }
        match body {
            1..=3 => self.offset(body - 1),
            _ => None,
        }
    }

    /// Returns `true` for every statement sequence tag.
    #[inline]
    pub fn is_seq(self) -> bool {
        (NodeTag::SeqStat..=NodeTag::SeqStat7).contains(&self)
    }

    /// Returns `true` for both return statements.
    #[inline]
    pub fn is_return(self) -> bool {
        matches!(self, NodeTag::ReturnObj | NodeTag::ReturnVoid)
    }

    /// Returns `true` for statement tags, `false` for expression tags.
    #[inline]
    pub fn is_statement(self) -> bool {
        self <= NodeTag::Pragma
    }

    /// Returns `true` for the pseudo-tags of immediate operands.
    #[inline]
    pub fn is_immediate(self) -> bool {
        matches!(self, NodeTag::Int | NodeTag::RefLVar)
    }

    /// Interpretation of slot `index` of a node with `count` slots.
    pub fn slot_kind(self, index: usize, count: usize) -> SlotKind {
        use NodeTag as T;
        let last = index + 1 == count;
        match self {
            T::AssLVar | T::AssHVar | T::AssGVar if index == 0 => SlotKind::Raw,
            T::UnbLVar
            | T::UnbHVar
            | T::UnbGVar
            | T::IsbLVar
            | T::RefHVar
            | T::IsbHVar
            | T::RefGVar
            | T::IsbGVar
            | T::Char => SlotKind::Raw,
            T::AssListLev | T::AsssListLev | T::ElmListLev | T::ElmsListLev if last => {
                SlotKind::Raw
            }
            T::AssRecName
            | T::UnbRecName
            | T::AssComObjName
            | T::UnbComObjName
            | T::ElmRecName
            | T::IsbRecName
            | T::ElmComObjName
            | T::IsbComObjName
                if index == 1 =>
            {
                SlotKind::Raw
            }
            T::IntPos | T::String | T::Pragma | T::Func => SlotKind::Value,
            T::FloatLazy => {
                if index == 0 {
                    SlotKind::Raw
                } else {
                    SlotKind::Value
                }
            }
            T::FloatEager => {
                if index == 2 {
                    SlotKind::Raw
                } else {
                    SlotKind::Value
                }
            }
            _ => SlotKind::Operand,
        }
    }
}

impl fmt::Display for NodeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests;
