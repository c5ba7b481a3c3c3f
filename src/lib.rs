// ═══════════════════════════════════════════════════════════
// Frenchy: a small French-keyword scripting language
// ═══════════════════════════════════════════════════════════

pub mod ast;
pub mod console;
pub mod error;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod scope;
pub mod stdlib;
pub mod value;

pub use console::{CapturedConsole, Console, StdConsole};
pub use error::{Fault, FrenchyError, SyntaxError};
pub use interpreter::Interpreter;
pub use value::{ListValue, Value};

/// Tokenizes and parses a whole program.
pub fn parse_source(source: &str) -> Result<Vec<ast::Stmt>, SyntaxError> {
    let tokens = lexer::Lexer::new(source).tokenize()?;
    parser::Parser::new(tokens).parse_program()
}

/// Parses and runs `source` in a fresh interpreter on the process console.
pub fn run_source(source: &str) -> Result<(), FrenchyError> {
    Interpreter::new().run_source(source)
}
