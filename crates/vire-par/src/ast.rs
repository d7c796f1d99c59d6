//! AST node definitions for the Vire frontend.
//!
//! `Var` declarations live in a single arena owned by the [`Program`]
//! (`Program::vars`), addressed everywhere else by the stable [`VarId`]
//! handle. This is the "arena-or-index" shape called for when a node needs
//! a non-owning back-reference into a declaration — a function body that
//! calls itself, or a later statement that reads an earlier local — without
//! building a cyclic ownership graph.

use vire_util::index_vec::{define_idx, IndexVec};
use vire_util::{Span, Symbol};

use vire_lex::{Keyword, Token, TokenKind};

define_idx!(VarId);

/// The parsed program: every namespace plus the single arena backing every
/// `Var` declared anywhere in it.
#[derive(Debug, Clone, Default)]
pub struct Program {
    pub namespaces: Vec<Namespace>,
    pub vars: IndexVec<VarId, Var>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone)]
pub struct Namespace {
    pub name: Symbol,
    pub block: StatementBlock,
    pub uses: Vec<Symbol>,
}

/// A sequence of statements sharing one scope frame.
///
/// `bytes` is the aggregate storage size of the locals declared directly in
/// this frame (`Σ size_of_type(var.type) * (is_arr ? arr.size : 1)`),
/// computed once the block closes.
#[derive(Debug, Clone, Default)]
pub struct StatementBlock {
    pub children: Vec<Node>,
    pub bytes: usize,
    pub is_fn: bool,
}

/// Left/right inclusivity flags for a `Range`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RangeFlags {
    pub left_inclusive: bool,
    pub right_inclusive: bool,
}

/// `rng`-introduced or array-bound range. Both bounds must be
/// constant-evaluable, hence the `ConstLeaf` typing rather than `Node`.
#[derive(Debug, Clone)]
pub struct Range {
    pub lo: ConstLeaf,
    pub hi: ConstLeaf,
    pub flags: RangeFlags,
}

impl Range {
    /// Element count spanned by this range (used for array storage sizing,
    /// where inclusivity does not change the count since the declaration
    /// form `[lo;hi)` is already half-open).
    pub fn size(&self) -> usize {
        let lo = self.lo.token.int_value.unwrap_or(0);
        let hi = self.hi.token.int_value.unwrap_or(0);
        hi.saturating_sub(lo) as usize
    }
}

/// A type-parameter name collected from `<T, U>` on a declaration. Not
/// semantically used at this layer — generic/template instantiation is out
/// of scope — but retained on the `Var` so a later pass can see it.
pub type TemplateParam = Symbol;

#[derive(Debug, Clone)]
pub struct Var {
    /// Fully qualified as `namespace.short_name`, except lambda parameters,
    /// which are declared bare when parsed in a function's parameter scope.
    pub name: Symbol,
    pub var_type: Keyword,
    pub mutable: bool,
    pub is_arr: bool,
    pub arr: Option<Range>,
    pub initial: Option<Box<Node>>,
    pub template_params: Vec<TemplateParam>,
    pub span: Span,
}

impl Var {
    pub fn new(name: Symbol, var_type: Keyword, span: Span) -> Self {
        Var {
            name,
            var_type,
            mutable: false,
            is_arr: false,
            arr: None,
            initial: None,
            template_params: Vec::new(),
            span,
        }
    }
}

/// `fn`-typed declaration's value. Lives in the declaring `Var`'s
/// `initial` slot as `Node::Lambda`; a `FnCall` reaches it indirectly via
/// `FnCall::func` (the declaring `Var`'s handle), never by owning a copy.
#[derive(Debug, Clone)]
pub struct Lambda {
    /// Parameter `Var`s, allocated in their own arena entries with bare
    /// (non-namespace-qualified) names.
    pub params: Vec<VarId>,
    pub ret_type: Keyword,
    /// Absent only mid-construction; assigned before the declaring
    /// statement returns.
    pub def: Option<StatementBlock>,
}

#[derive(Debug, Clone)]
pub struct IfStatement {
    pub condition: Node,
    pub then_b: StatementBlock,
    /// `else if` desugars to a single-child block wrapping the nested
    /// `If` node; a bare `else { ... }` is the block directly.
    pub else_b: Option<StatementBlock>,
}

#[derive(Debug, Clone)]
pub struct WhileLoop {
    pub condition: Node,
    pub body: StatementBlock,
}

/// Unary operator application. Also used for `ret expr;` and
/// `_asm { ... }`, whose "operator" token carries the `Ret`/`Asm` keyword
/// and whose operand is the return expression or the raw assembly string.
#[derive(Debug, Clone)]
pub struct UnOp {
    pub oper: Token,
    pub operand: Node,
}

/// Binary operator application.
///
/// For every operator except assignment, `l`/`r` preserve source order.
/// For assignment operators, `l` is always the mutable lvalue target and
/// `r` the value, which is what lets the shunting-yard reducer build
/// right-associative chains by swapping the usual pop order (see
/// `parser::expr`).
#[derive(Debug, Clone)]
pub struct BinOp {
    pub oper: Token,
    pub l: Node,
    pub r: Node,
}

/// `FnName(params...)`. `func` is a non-owning handle to the declaring
/// `Var`; its `Lambda` (arity, return type, body) is reached via
/// `vars[func].initial`.
#[derive(Debug, Clone)]
pub struct FnCall {
    pub fn_name: Token,
    pub func: VarId,
    pub params: Vec<Node>,
}

#[derive(Debug, Clone)]
pub struct ConstLeaf {
    pub token: Token,
}

#[derive(Debug, Clone)]
pub struct StrLeaf {
    pub token: Token,
}

/// Non-owning reference to a plain (non-array) variable.
#[derive(Debug, Clone)]
pub struct VarLeaf {
    pub var: VarId,
}

/// Non-owning reference to an array variable plus its index expression.
#[derive(Debug, Clone)]
pub struct ArrayLeaf {
    pub var: VarId,
    pub index: Node,
}

/// A node in the expression/statement tree. Every variant corresponds to
/// one of the data model's node kinds; there is no separate tag field; the
/// enum discriminant is the tag.
#[derive(Debug, Clone)]
pub enum Node {
    Block(Box<StatementBlock>),
    VarDecl(VarId),
    Lambda(Box<Lambda>),
    If(Box<IfStatement>),
    While(Box<WhileLoop>),
    UnOp(Box<UnOp>),
    BinOp(Box<BinOp>),
    FnCall(Box<FnCall>),
    Const(ConstLeaf),
    Str(StrLeaf),
    VarRef(VarLeaf),
    ArrayRef(Box<ArrayLeaf>),
    Range(Box<Range>),
}

/// Maps the token a numeric/boolean constant lexed as back to its type
/// keyword: the reverse of `vire_lex::width_suffix_kind`, plus `bool` for
/// `true`/`false`.
fn const_token_keyword(token: &Token) -> Keyword {
    match token.kind {
        TokenKind::Int8L => Keyword::I8,
        TokenKind::Int16L => Keyword::I16,
        TokenKind::Int32L => Keyword::I32,
        TokenKind::Int64L => Keyword::I64,
        TokenKind::Uint8L => Keyword::U8,
        TokenKind::Uint16L => Keyword::U16,
        TokenKind::Uint32L => Keyword::U32,
        TokenKind::Uint64L => Keyword::U64,
        _ => match token.keyword {
            Some(Keyword::True) | Some(Keyword::False) => Keyword::Bool,
            Some(Keyword::Null) => Keyword::Null,
            _ => Keyword::Last,
        },
    }
}

impl Node {
    /// Structural (non-virtual) dispatch for a node's type keyword, per the
    /// design notes ("every node exposes `type_keyword()` via structural
    /// match, not virtual dispatch"). Statement-only nodes (`If`, `While`,
    /// `Block`) have no expression type and return `Keyword::Last`.
    pub fn type_keyword(&self, vars: &IndexVec<VarId, Var>) -> Keyword {
        match self {
            Node::Const(leaf) => const_token_keyword(&leaf.token),
            Node::Str(_) => Keyword::Str16,
            Node::VarRef(leaf) => vars[leaf.var].var_type,
            Node::ArrayRef(leaf) => vars[leaf.var].var_type,
            Node::VarDecl(id) => vars[*id].var_type,
            Node::Lambda(_) => Keyword::Fn,
            Node::FnCall(call) => match vars[call.func].initial.as_deref() {
                Some(Node::Lambda(lambda)) => lambda.ret_type,
                _ => Keyword::Last,
            },
            Node::Range(_) => Keyword::Rng,
            Node::BinOp(bin) => bin_op_keyword(bin, vars),
            Node::UnOp(un) => un_op_keyword(un, vars),
            Node::If(_) | Node::While(_) | Node::Block(_) => Keyword::Last,
        }
    }

    /// True for the lvalue node kinds: a plain or array variable reference.
    pub fn is_lvalue(&self) -> bool {
        matches!(self, Node::VarRef(_) | Node::ArrayRef(_))
    }
}

fn bin_op_keyword(bin: &BinOp, vars: &IndexVec<VarId, Var>) -> Keyword {
    use TokenKind::*;
    match bin.oper.kind {
        OperLess | OperGreater | OperLEqual | OperGEqual | OperEqual | OperNEqual | OperLAnd
        | OperLOr => Keyword::Bool,
        kind if vire_lex::is_assignment(kind) => bin.r.type_keyword(vars),
        _ => bin.l.type_keyword(vars),
    }
}

fn un_op_keyword(un: &UnOp, vars: &IndexVec<VarId, Var>) -> Keyword {
    match un.oper.kind {
        TokenKind::OperLNot => Keyword::Bool,
        _ => match un.oper.keyword {
            Some(Keyword::Ret) | Some(Keyword::Asm) => Keyword::Last,
            _ => un.operand.type_keyword(vars),
        },
    }
}
