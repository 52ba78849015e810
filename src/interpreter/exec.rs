use super::*;

impl Interpreter {
    /// Execute a program. A RETURN that unwinds all the way here had no
    /// enclosing call to stop at; it surfaces as the diagnostic carried by
    /// the signal's Display form.
    pub fn interpret(&mut self, statements: &[Stmt]) -> Result<(), RuntimeError> {
        for stmt in statements {
            self.exec_stmt(stmt)?;
        }
        Ok(())
    }

    /// Run `statements` with `env` as the current frame, restoring the
    /// previous frame afterwards even when unwinding.
    pub(super) fn exec_block(
        &mut self,
        statements: &[Stmt],
        env: Rc<RefCell<Environment>>,
    ) -> Result<(), RuntimeError> {
        let previous = std::mem::replace(&mut self.environment, env);
        let result = statements.iter().try_for_each(|stmt| self.exec_stmt(stmt));
        self.environment = previous;
        result
    }

    fn exec_stmt(&mut self, stmt: &Stmt) -> Result<(), RuntimeError> {
        match stmt {
            Stmt::Expression(expr) => {
                self.eval_expr(expr)?;
                Ok(())
            }
            Stmt::Print(expr) => {
                let value = self.eval_expr(expr)?;
                writeln!(self.out, "{}", repr(&value)).ok();
                Ok(())
            }
            Stmt::Return(value) => {
                let value = match value {
                    Some(expr) => self.eval_expr(expr)?,
                    None => Value::Null,
                };
                Err(RuntimeError::Return(Box::new(value)))
            }
            // IF and WHILE bodies run in the current frame: blocks in this
            // language are flat, only calls open a new scope.
            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                let branch = if self.eval_expr(condition)?.is_truthy() {
                    then_branch
                } else {
                    else_branch
                };
                for stmt in branch {
                    self.exec_stmt(stmt)?;
                }
                Ok(())
            }
            Stmt::While { condition, body } => {
                while self.eval_expr(condition)?.is_truthy() {
                    for stmt in body {
                        self.exec_stmt(stmt)?;
                    }
                }
                Ok(())
            }
            Stmt::Function(declaration) => {
                let function = Function {
                    declaration: Rc::clone(declaration),
                    closure: Rc::clone(&self.environment),
                };
                self.environment
                    .borrow_mut()
                    .define(&declaration.name.lexeme, Value::Function(Rc::new(function)));
                Ok(())
            }
            Stmt::Class {
                name,
                superclass,
                methods,
            } => self.exec_class(name, superclass.as_ref(), methods),
        }
    }

    fn exec_class(
        &mut self,
        name: &Token,
        superclass: Option<&Token>,
        methods: &[Rc<FunctionStmt>],
    ) -> Result<(), RuntimeError> {
        let parent = match superclass {
            Some(super_name) => {
                let value = self.environment.borrow().get(&super_name.lexeme).ok_or_else(|| {
                    RuntimeError::at(
                        super_name,
                        format!("Undefined variable '{}'.", super_name.lexeme),
                    )
                })?;
                match value {
                    Value::Class(class) => Some(class),
                    _ => return Err(RuntimeError::at(super_name, "Superclass must be a class.")),
                }
            }
            None => None,
        };

        // Methods close over the defining scope; with a superclass they get
        // one extra frame holding `super`.
        let class_env = match &parent {
            Some(super_class) => {
                let mut env = Environment::with_parent(Rc::clone(&self.environment));
                env.define("super", Value::Class(Rc::clone(super_class)));
                Rc::new(RefCell::new(env))
            }
            None => Rc::clone(&self.environment),
        };

        let mut table = HashMap::new();
        for method in methods {
            let function = Function {
                declaration: Rc::clone(method),
                closure: Rc::clone(&class_env),
            };
            table.insert(method.name.lexeme.clone(), Rc::new(function));
        }

        let class = Class {
            name: name.lexeme.clone(),
            superclass: parent,
            methods: table,
        };
        self.environment
            .borrow_mut()
            .define(&name.lexeme, Value::Class(Rc::new(class)));
        Ok(())
    }
}
