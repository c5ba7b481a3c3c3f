// ═══════════════════════════════════════════════════════════
// Frenchy Interpreter: tree-walking evaluator
// ═══════════════════════════════════════════════════════════

use tracing::{debug, trace};

use crate::ast::*;
use crate::console::{Console, StdConsole};
use crate::error::{Fault, FrenchyError};
use crate::scope::Scopes;
use crate::stdlib::{self, NativeContext};
use crate::value::{eval_binop, ListValue, Value};

type EvalResult = Result<Value, Fault>;
type ExecResult = Result<(), Fault>;

// ── Interpreter ───────────────────────────────────────────────────────────────

/// One evaluation run: a fresh scope store seeded with the built-ins, and the
/// console that `afficher` and `pause` talk to.
pub struct Interpreter<C: Console = StdConsole> {
    scopes: Scopes,
    console: C,
}

impl Interpreter<StdConsole> {
    pub fn new() -> Self {
        Self::with_console(StdConsole)
    }
}

impl Default for Interpreter<StdConsole> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Console> Interpreter<C> {
    pub fn with_console(console: C) -> Self {
        let mut scopes = Scopes::new();
        stdlib::register(&mut scopes);
        Interpreter { scopes, console }
    }

    pub fn scopes(&self) -> &Scopes {
        &self.scopes
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    pub fn into_console(self) -> C {
        self.console
    }

    /// Runs a program to completion or to its first fault. Output already
    /// printed before a fault stays printed.
    pub fn run(&mut self, stmts: &[Stmt]) -> ExecResult {
        debug!(statements = stmts.len(), "run");
        let result = self.exec_block(stmts);
        if let Err(fault) = &result {
            debug!(%fault, "run aborted");
        }
        result
    }

    /// Parses `source` and runs it against this interpreter's scopes.
    pub fn run_source(&mut self, source: &str) -> Result<(), FrenchyError> {
        let stmts = crate::parse_source(source)?;
        self.run(&stmts)?;
        Ok(())
    }

    // ── Statements ────────────────────────────────────────────────────────────

    fn exec_block(&mut self, stmts: &[Stmt]) -> ExecResult {
        for stmt in stmts {
            self.exec_stmt(stmt)?;
        }
        Ok(())
    }

    fn exec_stmt(&mut self, stmt: &Stmt) -> ExecResult {
        match stmt {
            Stmt::Assign(assignment) => self.assign(assignment),

            Stmt::Expr(expr) => {
                self.eval_expr(expr)?;
                Ok(())
            }

            Stmt::If(block) => self.exec_if(block),

            Stmt::While { polarity, condition, body } => {
                while polarity.keeps_going(self.condition(condition)?) {
                    self.exec_block(body)?;
                }
                Ok(())
            }

            Stmt::For { init, stop, step, body } => self.exec_for(init, stop, step, body),

            Stmt::ForEach { element, variable, list, body } => {
                self.exec_foreach(*element, variable, list, body)
            }

            Stmt::Block(stmts) => self.exec_block(stmts),
        }
    }

    /// Writes go where reads would resolve: constants are refused, an existing
    /// variable is updated, otherwise an open loop temporary is rebound, and
    /// failing both a new variable is created.
    fn assign(&mut self, assignment: &Assignment) -> ExecResult {
        let value = self.eval_expr(&assignment.value)?;
        let name = assignment.name.as_str();
        if self.scopes.variable(name).is_none() && self.scopes.temporary(name).is_some() {
            return self.scopes.set_temporary(name, value);
        }
        self.scopes.define(name, value)
    }

    fn condition(&mut self, expr: &Expr) -> Result<bool, Fault> {
        self.eval_expr(expr)?.as_bool()
    }

    fn exec_if(&mut self, block: &IfBlock) -> ExecResult {
        if self.condition(&block.condition)? {
            return self.exec_block(&block.then_block);
        }
        match &block.otherwise {
            Some(ElseBranch::ElseIf(next)) => self.exec_if(next),
            Some(ElseBranch::Else(stmts)) => self.exec_block(stmts),
            None => Ok(()),
        }
    }

    fn exec_for(&mut self, init: &Assignment, stop: &Expr, step: &Assignment, body: &[Stmt]) -> ExecResult {
        let start = self.eval_expr(&init.value)?;
        self.scopes.define_temporary(&init.name, start)?;
        debug!(variable = %init.name, "enter counting loop");

        let result = self.run_counting(stop, step, body);

        self.scopes.remove_temporary(&init.name);
        debug!(variable = %init.name, ok = result.is_ok(), "leave counting loop");
        result
    }

    fn run_counting(&mut self, stop: &Expr, step: &Assignment, body: &[Stmt]) -> ExecResult {
        let mut iteration = 0usize;
        while !self.condition(stop)? {
            trace!(iteration, "counting loop iteration");
            self.exec_block(body)?;
            if self.scopes.temporary(&step.name).is_some() {
                let next = self.eval_expr(&step.value)?;
                self.scopes.set_temporary(&step.name, next)?;
            } else {
                self.assign(step)?;
            }
            iteration += 1;
        }
        Ok(())
    }

    fn exec_foreach(&mut self, element: ElementType, variable: &str, list_name: &str, body: &[Stmt]) -> ExecResult {
        let (origin, list) = self.scopes.list(list_name)?;
        if list.element() != element {
            return Err(Fault::TypeMismatch(format!(
                "'{}' holds {} elements, loop variable '{}' is declared {}",
                list_name, list.element(), variable, element
            )));
        }
        let mut list = list.clone();
        debug!(list = list_name, len = list.len(), "enter list loop");

        let mut bound = false;
        let result = self.iterate(&mut list, variable, body, &mut bound);

        if bound {
            self.scopes.remove_temporary(variable);
        }
        debug!(list = list_name, ok = result.is_ok(), "leave list loop");
        result?;
        self.scopes.store_list(origin, list_name, list);
        Ok(())
    }

    fn iterate(&mut self, list: &mut ListValue, variable: &str, body: &[Stmt], bound: &mut bool) -> ExecResult {
        let items = list.items().to_vec();
        for (index, item) in items.into_iter().enumerate() {
            trace!(index, "list loop iteration");
            if *bound {
                self.scopes.set_temporary(variable, item)?;
            } else {
                self.scopes.define_temporary(variable, item)?;
                *bound = true;
            }

            self.exec_block(body)?;

            let current = self.scopes.temporary(variable)
                .cloned()
                .ok_or_else(|| Fault::undefined(variable))?;
            list.set(index, current)?;
        }
        Ok(())
    }

    // ── Expression evaluation ─────────────────────────────────────────────────

    pub fn eval_expr(&mut self, expr: &Expr) -> EvalResult {
        match expr {
            Expr::Constant(literal) => Value::from_literal(literal),

            Expr::Identifier(name) => self.scopes.lookup(name).cloned(),

            Expr::Call(name, args) => self.call(name, args),

            Expr::List(element, elems) => {
                let items = elems.iter()
                    .map(|e| self.eval_expr(e))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Value::List(ListValue::new(*element, items)?))
            }

            Expr::Binary(left, op, right) => {
                let l = self.eval_expr(left)?;
                let r = self.eval_expr(right)?;
                eval_binop(&l, *op, &r)
            }
        }
    }

    /// Callees resolve in Constants only, after every argument has been evaluated.
    fn call(&mut self, name: &str, args: &[Expr]) -> EvalResult {
        let args = args.iter()
            .map(|a| self.eval_expr(a))
            .collect::<Result<Vec<_>, _>>()?;

        let native = match self.scopes.constant(name) {
            Some(Value::Native(native)) => *native,
            Some(other) => {
                return Err(Fault::TypeMismatch(format!(
                    "'{}' is {}, not a function", name, other.kind_name()
                )));
            }
            None => return Err(Fault::Name(format!("function '{}' is not defined", name))),
        };
        debug!(function = native.name, args = args.len(), "native call");

        let mut ctx = NativeContext { scopes: &self.scopes, console: &mut self.console };
        stdlib::call_native(&native, args, &mut ctx)
    }
}
