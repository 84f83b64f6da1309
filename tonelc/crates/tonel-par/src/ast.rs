//! Smalltalk AST node set.
//!
//! The tree is a tagged sum type rather than a trait-object hierarchy:
//! each node owns its children outright, there is no shared-subtree
//! aliasing, and a `MessageSend`'s receiver/arguments are themselves
//! owned `Expr`s.

use tonel_util::Span;

/// A node of the Smalltalk expression grammar.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// A bare identifier used as a value (`self`, `x`, `MyClass`, ...).
    Variable(Variable),
    Literal(Literal),
    /// `#(...)`: a compile-time literal array, itself built from
    /// [`LiteralArrayItem`]s rather than nested `Expr`s, since its contents
    /// are never evaluated as message sends.
    LiteralArray(LiteralArray),
    /// `#[...]`: a literal byte array; each element must fit in `0..=255`.
    ByteArray(ByteArray),
    /// `{...}`: a runtime-evaluated array of expressions.
    DynamicArray(DynamicArray),
    Block(Block),
    MessageSend(MessageSend),
    /// A chain of messages sent to one common receiver, joined by `;`.
    Cascade(Cascade),
    Assignment(Assignment),
    /// `^expr`.
    Return(Return),
    /// A standalone `| a b c |` temporary-variable declaration. Produced
    /// only when a sequence's or block's temporaries section is parsed in
    /// isolation (e.g. a bare temp-declaration with no following
    /// statements); [`Sequence`] and [`Block`] otherwise hold their own
    /// temporaries directly as a name list rather than wrapping them in
    /// this variant.
    TemporaryVariables(TemporaryVariables),
    Pragma(Pragma),
    /// The outermost node produced by parsing a full method body or block
    /// body: optional temporaries, then zero or more statements.
    Sequence(Sequence),
}

impl Expr {
    pub fn span(&self) -> Span {
        match self {
            Expr::Variable(v) => v.span,
            Expr::Literal(l) => l.span,
            Expr::LiteralArray(a) => a.span,
            Expr::ByteArray(a) => a.span,
            Expr::DynamicArray(a) => a.span,
            Expr::Block(b) => b.span,
            Expr::MessageSend(m) => m.span,
            Expr::Cascade(c) => c.span,
            Expr::Assignment(a) => a.span,
            Expr::Return(r) => r.span,
            Expr::TemporaryVariables(t) => t.span,
            Expr::Pragma(p) => p.span,
            Expr::Sequence(s) => s.span,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Variable {
    pub name: String,
    pub span: Span,
}

/// The kind of a scalar literal token, preserved as the token's exact text
/// rather than evaluated — the core never interprets a numeral's value or a
/// string's escapes, only validates its shape.
#[derive(Clone, Debug, PartialEq)]
pub enum LiteralKind {
    Integer,
    RadixInteger,
    Float,
    ScaledDecimal,
    String,
    Symbol,
    Char,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Literal {
    pub kind: LiteralKind,
    pub value: String,
    pub span: Span,
}

/// One element of a literal array. Nested identifiers, binary selectors,
/// `;`, and `,` are all interned as symbols by the literal-array grammar
/// — they are never parsed as message sends.
#[derive(Clone, Debug, PartialEq)]
pub enum LiteralArrayItem {
    Literal(Literal),
    /// A nested `#(...)` or bare `(...)` group, the latter treated as a
    /// nested literal array regardless of nesting depth.
    Nested(Vec<LiteralArrayItem>),
    Symbol(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct LiteralArray {
    pub items: Vec<LiteralArrayItem>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ByteArray {
    pub bytes: Vec<u8>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DynamicArray {
    pub elements: Vec<Expr>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Block {
    pub params: Vec<String>,
    pub temps: Vec<String>,
    pub body: Sequence,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MessageSend {
    pub receiver: Box<Expr>,
    pub selector: String,
    pub arguments: Vec<Expr>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CascadeMessage {
    pub selector: String,
    pub arguments: Vec<Expr>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Cascade {
    pub receiver: Box<Expr>,
    pub messages: Vec<CascadeMessage>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Assignment {
    pub target: String,
    pub value: Box<Expr>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Return {
    pub value: Box<Expr>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TemporaryVariables {
    pub names: Vec<String>,
    pub span: Span,
}

/// A pragma (`<selector arg*>`), including the primitive-call special case
/// (`<primitive: 60>`), which is syntactically just a pragma whose sole
/// argument is an integer literal.
#[derive(Clone, Debug, PartialEq)]
pub struct Pragma {
    pub selector: String,
    pub arguments: Vec<Expr>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Sequence {
    pub temps: Vec<String>,
    /// Pragmas declared before the first statement (`<primitive: 60>
    /// ^ self primitiveFailed` needs no `PERIOD` between the pragma and the
    /// statement that follows it — unlike statements, which do).
    pub pragmas: Vec<Pragma>,
    pub statements: Vec<Expr>,
    pub span: Span,
}
