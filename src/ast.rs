// Frenchy Abstract Syntax Tree

use std::fmt;

/// Element-type tag of a list, also used to declare a `pour chaque` variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementType {
    Integer,
    Float,
    Text,
    Boolean,
}

impl ElementType {
    pub fn keyword(self) -> &'static str {
        match self {
            ElementType::Integer => "entier",
            ElementType::Float   => "flottant",
            ElementType::Text    => "texte",
            ElementType::Boolean => "booleen",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    Integer,
    Decimal,
    Text,
    Boolean,
    Null,
}

/// A literal as it appeared in the source. Text literals still carry their quotes.
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    pub kind: LiteralKind,
    pub text: String,
}

impl Literal {
    pub fn new(kind: LiteralKind, text: impl Into<String>) -> Self {
        Literal { kind, text: text.into() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add, Sub, Mul, Div, Mod,
    Eq, NotEq, Gt, Lt, GtEq, LtEq,
}

impl BinOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add   => "+",
            BinOp::Sub   => "-",
            BinOp::Mul   => "*",
            BinOp::Div   => "/",
            BinOp::Mod   => "%",
            BinOp::Eq    => "==",
            BinOp::NotEq => "!=",
            BinOp::Gt    => ">",
            BinOp::Lt    => "<",
            BinOp::GtEq  => ">=",
            BinOp::LtEq  => "<=",
        }
    }

    /// Splits the operator into its arithmetic or comparison family.
    pub fn class(self) -> OpClass {
        match self {
            BinOp::Add   => OpClass::Arith(ArithOp::Add),
            BinOp::Sub   => OpClass::Arith(ArithOp::Sub),
            BinOp::Mul   => OpClass::Arith(ArithOp::Mul),
            BinOp::Div   => OpClass::Arith(ArithOp::Div),
            BinOp::Mod   => OpClass::Arith(ArithOp::Mod),
            BinOp::Eq    => OpClass::Cmp(CmpOp::Eq),
            BinOp::NotEq => OpClass::Cmp(CmpOp::NotEq),
            BinOp::Gt    => OpClass::Cmp(CmpOp::Gt),
            BinOp::Lt    => OpClass::Cmp(CmpOp::Lt),
            BinOp::GtEq  => OpClass::Cmp(CmpOp::GtEq),
            BinOp::LtEq  => OpClass::Cmp(CmpOp::LtEq),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Add, Sub, Mul, Div, Mod,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Eq, NotEq, Gt, Lt, GtEq, LtEq,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpClass {
    Arith(ArithOp),
    Cmp(CmpOp),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    // Literal token
    Constant(Literal),

    // Variable, constant or loop temporary
    Identifier(String),

    // Built-in call: name(args)
    Call(String, Vec<Expr>),

    // Typed list: entier[1, 2, 3]
    List(ElementType, Vec<Expr>),

    // Arithmetic and comparison
    Binary(Box<Expr>, BinOp, Box<Expr>),
}

impl Expr {
    pub fn int(n: i32) -> Expr {
        Expr::Constant(Literal::new(LiteralKind::Integer, n.to_string()))
    }

    pub fn ident(name: &str) -> Expr {
        Expr::Identifier(name.to_string())
    }

    pub fn binary(lhs: Expr, op: BinOp, rhs: Expr) -> Expr {
        Expr::Binary(Box::new(lhs), op, Box::new(rhs))
    }
}

/// `pendant que` keeps looping while the condition is true,
/// `jusqu'à` keeps looping while it is false.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    WhileTrue,
    WhileFalse,
}

impl Polarity {
    pub fn keeps_going(self, condition: bool) -> bool {
        match self {
            Polarity::WhileTrue  => condition,
            Polarity::WhileFalse => !condition,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub name: String,
    pub value: Expr,
}

impl Assignment {
    pub fn new(name: &str, value: Expr) -> Self {
        Assignment { name: name.to_string(), value }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfBlock {
    pub condition: Expr,
    pub then_block: Vec<Stmt>,
    pub otherwise: Option<ElseBranch>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ElseBranch {
    ElseIf(Box<IfBlock>),
    Else(Vec<Stmt>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    // name = expr
    Assign(Assignment),

    // Call used as a statement
    Expr(Expr),

    // si cond { } sinon si cond { } sinon { }
    If(IfBlock),

    // pendant que cond { }  /  jusqu'à cond { }
    While {
        polarity: Polarity,
        condition: Expr,
        body: Vec<Stmt>,
    },

    // pour (i = 0; i == 3; i = i + 1) { }
    For {
        init: Assignment,
        stop: Expr,
        step: Assignment,
        body: Vec<Stmt>,
    },

    // pour chaque (entier x dans liste) { }
    ForEach {
        element: ElementType,
        variable: String,
        list: String,
        body: Vec<Stmt>,
    },

    // { ... }
    Block(Vec<Stmt>),
}
