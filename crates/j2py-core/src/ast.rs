//! Typed Java syntax tree consumed by the translator.
//!
//! The parser produces an untyped concrete syntax tree; [`crate::ast_bridge`]
//! lowers it into these variants so that translation dispatches over an
//! explicit node-kind enumeration instead of a chain of presence checks.
//! Constructs without a dedicated rule are carried as [`Stmt::Verbatim`] /
//! [`Expr::Verbatim`] so the lossy passthrough stays observable.

use serde::{Deserialize, Serialize};

/// Root node for one source file: package, imports and type declarations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompilationUnit {
    pub package: Option<String>,
    pub imports: Vec<String>,
    pub types: Vec<TypeDecl>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypeDecl {
    Class(ClassDecl),
    Interface(InterfaceDecl),
}

/// A class declaration. `extends` and `implements` names are merged into one
/// supertype list in source order; the emitter does not distinguish them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDecl {
    pub name: String,
    pub supertypes: Vec<String>,
    pub fields: Vec<FieldDecl>,
    pub constructors: Vec<ConstructorDecl>,
    pub methods: Vec<MethodDecl>,
}

/// One `Type a, b = 2;` field declaration with its raw Java type text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDecl {
    pub java_type: String,
    pub declarators: Vec<VariableDeclarator>,
}

/// A declared name with an optional initializer. `array_dims` records
/// C-style trailing dimensions (`int a[];`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDeclarator {
    pub name: String,
    pub array_dims: bool,
    pub init: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodDecl {
    pub name: String,
    pub params: Vec<Param>,
    /// Absent for abstract method declarations.
    pub body: Option<Block>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstructorDecl {
    pub params: Vec<Param>,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterfaceDecl {
    pub name: String,
    pub methods: Vec<InterfaceMethod>,
}

/// Interface methods keep their modifier tokens: name resolution for the
/// emitted stub consults the first keyword modifier when one is present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterfaceMethod {
    pub modifiers: Vec<String>,
    pub name: String,
    pub params: Vec<Param>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    pub java_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub statements: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Stmt {
    Block(Block),
    LocalVar {
        java_type: String,
        declarators: Vec<VariableDeclarator>,
    },
    If {
        condition: Expr,
        consequence: Box<Stmt>,
        alternative: Option<Box<Stmt>>,
    },
    Switch {
        scrutinee: Expr,
        groups: Vec<SwitchGroup>,
    },
    /// Classic three-clause `for`; lowered to init + `while` on emission.
    For {
        init: Option<ForInit>,
        condition: Option<Expr>,
        updates: Vec<Expr>,
        body: Box<Stmt>,
    },
    ForEach {
        variable: String,
        iterable: Expr,
        body: Box<Stmt>,
    },
    While {
        condition: Expr,
        body: Box<Stmt>,
    },
    DoWhile {
        body: Box<Stmt>,
        condition: Expr,
    },
    Try {
        body: Block,
        catches: Vec<CatchClause>,
        finally: Option<Block>,
    },
    Return(Option<Expr>),
    Break,
    Continue,
    Throw(Expr),
    Expr(Expr),
    Empty,
    /// Unsupported statement shape carried through as raw source text.
    Verbatim(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchGroup {
    /// Several labels may share one body (Java fallthrough grouping).
    pub labels: Vec<SwitchLabel>,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SwitchLabel {
    Case(Expr),
    Default,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatchClause {
    pub java_type: String,
    pub name: String,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ForInit {
    Decl {
        java_type: String,
        declarators: Vec<VariableDeclarator>,
    },
    Exprs(Vec<Expr>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    Assign {
        target: Box<Expr>,
        op: String,
        value: Box<Expr>,
    },
    Binary {
        left: Box<Expr>,
        op: String,
        right: Box<Expr>,
    },
    Unary {
        op: String,
        operand: Box<Expr>,
    },
    /// `++`/`--`; `prefix` is recorded but pre/post value semantics are
    /// collapsed to the same `+= 1` / `-= 1` rewrite on emission.
    Update {
        target: Box<Expr>,
        op: UpdateOp,
        prefix: bool,
    },
    Ternary {
        condition: Box<Expr>,
        consequence: Box<Expr>,
        alternative: Box<Expr>,
    },
    MethodCall {
        receiver: Option<Box<Expr>>,
        name: String,
        args: Vec<Expr>,
    },
    FieldAccess {
        object: Box<Expr>,
        field: String,
    },
    ArrayIndex {
        array: Box<Expr>,
        index: Box<Expr>,
    },
    /// The cast target type is dropped entirely on emission.
    Cast {
        value: Box<Expr>,
    },
    New {
        class: String,
        args: Vec<Expr>,
    },
    NewArray {
        /// `new T[]{...}` or a bare `{...}` initializer.
        init: Option<Vec<Expr>>,
        /// Dimension expressions for `new T[n][m]`.
        dims: Vec<Expr>,
    },
    Paren(Box<Expr>),
    This,
    Super,
    Ident(String),
    Literal(Literal),
    /// Unsupported expression shape carried through as raw source text.
    Verbatim(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpdateOp {
    Increment,
    Decrement,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    Null,
    /// Boolean token text as written in the source.
    Bool(String),
    /// Any other literal, passed through verbatim (numeric suffixes and
    /// string/char quoting are not renormalized).
    Other(String),
}
