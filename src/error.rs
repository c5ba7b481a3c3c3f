// ═══════════════════════════════════════════════════════════
// Frenchy errors: syntax errors and run-terminating faults
// ═══════════════════════════════════════════════════════════

use thiserror::Error;

/// A run-terminating error raised by the evaluator. Nothing in the language
/// catches a fault: it unwinds every construct up to `Interpreter::run`.
#[derive(Debug, Error)]
pub enum Fault {
    #[error("name error: {0}")]
    Name(String),

    #[error("type mismatch: {0}")]
    TypeMismatch(String),

    #[error("division by zero: {0}")]
    DivideByZero(String),

    #[error("signature mismatch: {0}")]
    Signature(String),

    #[error("console error: {0}")]
    Io(#[from] std::io::Error),
}

impl Fault {
    pub fn undefined(name: &str) -> Self {
        Fault::Name(format!("variable '{}' is not defined", name))
    }

    pub fn not_boolean(kind: &str) -> Self {
        Fault::TypeMismatch(format!("value is not boolean (got {})", kind))
    }

    pub fn constant_redefinition(name: &str) -> Self {
        Fault::TypeMismatch(format!("cannot redefine constant '{}'", name))
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message} at line {line}, col {col}")]
pub struct SyntaxError {
    pub message: String,
    pub line: usize,
    pub col: usize,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, line: usize, col: usize) -> Self {
        SyntaxError { message: message.into(), line, col }
    }
}

/// Anything that can go wrong between reading source text and finishing a run.
#[derive(Debug, Error)]
pub enum FrenchyError {
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),

    #[error("runtime error: {0}")]
    Fault(#[from] Fault),
}
