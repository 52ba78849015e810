use std::cell::RefCell;
use std::collections::HashMap;
use std::io::{self, Write};
use std::rc::Rc;

use crate::ast::{Expr, FunctionStmt, Stmt};
use crate::lexer::{Token, TokenKind};
use crate::value::{repr, Class, Environment, Function, Instance, RuntimeError, Value};

mod eval;
mod exec;
mod ops;

pub use ops::is_equal;

/// Tree-walking evaluator. Executes statements against a chain of lexical
/// environments rooted at the global frame; PRINT output goes to an
/// injectable sink so hosts and tests can capture it.
pub struct Interpreter {
    globals: Rc<RefCell<Environment>>,
    environment: Rc<RefCell<Environment>>,
    out: Box<dyn Write>,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::with_output(Box::new(io::stdout()))
    }

    pub fn with_output(out: Box<dyn Write>) -> Self {
        let globals = Rc::new(RefCell::new(Environment::new()));
        Interpreter {
            globals: Rc::clone(&globals),
            environment: globals,
            out,
        }
    }

    /// Look up a name reachable from the global frame, so embedding hosts
    /// and tests can observe program state.
    pub fn get_global(&self, name: &str) -> Option<Value> {
        self.globals.borrow().get(name)
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
