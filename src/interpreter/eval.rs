use super::*;

impl Interpreter {
    pub fn eval_expr(&mut self, expr: &Expr) -> Result<Value, RuntimeError> {
        match expr {
            Expr::Literal(token) => Self::literal_value(token),
            Expr::Variable(name) => self.lookup_variable(name),
            Expr::Assign { target, value } => self.eval_assign(target, value),
            Expr::Binary { left, op, right } => {
                let left = self.eval_expr(left)?;
                let right = self.eval_expr(right)?;
                self.eval_binary(op, left, right)
            }
            Expr::Call {
                callee,
                paren,
                args,
            } => self.eval_call(callee, paren, args),
            Expr::Get { object, name } => self.eval_get(object, name),
            Expr::ArrayAccess {
                array,
                bracket,
                index,
            } => self.eval_array_access(array, bracket, index),
            Expr::ArrayLit { elements, .. } => {
                let mut values = Vec::with_capacity(elements.len());
                for element in elements {
                    values.push(self.eval_expr(element)?);
                }
                Ok(Value::Array(Rc::new(RefCell::new(values))))
            }
            Expr::New { class_name, args } => self.eval_new(class_name, args),
        }
    }

    /// INTEGER and FLOAT lexemes collapse into the one numeric kind.
    fn literal_value(token: &Token) -> Result<Value, RuntimeError> {
        match token.kind {
            TokenKind::Integer | TokenKind::Float => token
                .lexeme
                .parse()
                .map(Value::Number)
                .map_err(|_| RuntimeError::at(token, "Invalid number literal.")),
            TokenKind::True => Ok(Value::Bool(true)),
            TokenKind::False => Ok(Value::Bool(false)),
            TokenKind::Str => Ok(Value::Str(token.lexeme.clone())),
            _ => Ok(Value::Null),
        }
    }

    fn lookup_variable(&self, name: &Token) -> Result<Value, RuntimeError> {
        self.environment.borrow().get(&name.lexeme).ok_or_else(|| {
            RuntimeError::at(name, format!("Undefined variable '{}'.", name.lexeme))
        })
    }

    /// Evaluate the right-hand side once, then dispatch on target shape.
    /// The expression's value is the assigned value.
    fn eval_assign(&mut self, target: &Expr, value: &Expr) -> Result<Value, RuntimeError> {
        let value = self.eval_expr(value)?;

        match target {
            Expr::Variable(name) => {
                // First assignment declares the name in the current frame;
                // later ones rebind wherever it was defined.
                let exists = self.environment.borrow().exists(&name.lexeme);
                if exists {
                    self.environment
                        .borrow_mut()
                        .assign(&name.lexeme, value.clone());
                } else {
                    self.environment
                        .borrow_mut()
                        .define(&name.lexeme, value.clone());
                }
            }
            Expr::Get { object, name } => {
                let object = self.eval_expr(object)?;
                match object {
                    Value::Instance(instance) => {
                        instance
                            .borrow_mut()
                            .fields
                            .insert(name.lexeme.clone(), value.clone());
                    }
                    _ => return Err(RuntimeError::at(name, "Only instances have properties.")),
                }
            }
            Expr::ArrayAccess {
                array,
                bracket,
                index,
            } => {
                let array_value = self.eval_expr(array)?;
                let Value::Array(items) = array_value else {
                    return Err(RuntimeError::at(bracket, "Can only index arrays."));
                };
                let index_value = self.eval_expr(index)?;
                let len = items.borrow().len();
                let idx = Self::check_index(bracket, &index_value, len)?;
                items.borrow_mut()[idx] = value.clone();
            }
            // The parser restricts targets; anything else is a malformed tree
            _ => {
                return Err(RuntimeError::at(
                    target.token(),
                    "Invalid assignment target.",
                ))
            }
        }

        Ok(value)
    }

    fn eval_call(
        &mut self,
        callee: &Expr,
        paren: &Token,
        args: &[Expr],
    ) -> Result<Value, RuntimeError> {
        let callee = self.eval_expr(callee)?;

        match callee {
            Value::Function(function) => {
                let args = self.eval_args(args)?;
                Self::check_arity(paren, function.arity(), args.len())?;
                self.call_function(&function, args)
            }
            Value::Class(class) => {
                let args = self.eval_args(args)?;
                Self::check_arity(paren, class.arity(), args.len())?;
                self.call_class(&class, args)
            }
            _ => Err(RuntimeError::at(
                paren,
                "Can only call functions and classes.",
            )),
        }
    }

    fn eval_get(&mut self, object: &Expr, name: &Token) -> Result<Value, RuntimeError> {
        let object = self.eval_expr(object)?;
        let Value::Instance(instance) = object else {
            return Err(RuntimeError::at(name, "Only instances have properties."));
        };

        if let Some(field) = instance.borrow().fields.get(&name.lexeme) {
            return Ok(field.clone());
        }

        // Methods come back bound to their instance so that calling them
        // later still sees `this`.
        let method = instance.borrow().class.find_method(&name.lexeme);
        match method {
            Some(method) => Ok(Value::Function(Rc::new(method.bind(Rc::clone(&instance))))),
            None => Err(RuntimeError::at(
                name,
                format!("Undefined property '{}'.", name.lexeme),
            )),
        }
    }

    fn eval_array_access(
        &mut self,
        array: &Expr,
        bracket: &Token,
        index: &Expr,
    ) -> Result<Value, RuntimeError> {
        let array_value = self.eval_expr(array)?;
        let index_value = self.eval_expr(index)?;

        let Value::Array(items) = array_value else {
            return Err(RuntimeError::at(bracket, "Can only index arrays."));
        };
        let items = items.borrow();
        let idx = Self::check_index(bracket, &index_value, items.len())?;
        Ok(items[idx].clone())
    }

    fn eval_new(&mut self, class_name: &Token, args: &[Expr]) -> Result<Value, RuntimeError> {
        let value = self.lookup_variable(class_name)?;
        let Value::Class(class) = value else {
            return Err(RuntimeError::at(class_name, "Can only instantiate classes."));
        };

        let args = self.eval_args(args)?;
        Self::check_arity(class_name, class.arity(), args.len())?;
        self.call_class(&class, args)
    }

    // -------------------------------------------------------------------------
    // Call machinery
    // -------------------------------------------------------------------------

    fn eval_args(&mut self, args: &[Expr]) -> Result<Vec<Value>, RuntimeError> {
        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            values.push(self.eval_expr(arg)?);
        }
        Ok(values)
    }

    fn check_arity(at: &Token, arity: usize, got: usize) -> Result<(), RuntimeError> {
        if got != arity {
            return Err(RuntimeError::at(
                at,
                format!("Expected {} arguments but got {}.", arity, got),
            ));
        }
        Ok(())
    }

    /// Run a function body in a fresh frame parented by the captured closure
    /// (not the caller's frame). The RETURN signal is caught here; normal
    /// completion yields Null.
    pub(super) fn call_function(
        &mut self,
        function: &Function,
        args: Vec<Value>,
    ) -> Result<Value, RuntimeError> {
        let mut env = Environment::with_parent(Rc::clone(&function.closure));
        for (param, arg) in function.declaration.params.iter().zip(args) {
            env.define(&param.lexeme, arg);
        }

        let result = self.exec_block(&function.declaration.body, Rc::new(RefCell::new(env)));
        match result {
            Ok(()) => Ok(Value::Null),
            Err(RuntimeError::Return(value)) => Ok(*value),
            Err(e) => Err(e),
        }
    }

    /// Construct an instance; if the class chain has a `constructor`, run it
    /// bound to the new instance. The instance is the result no matter what
    /// the constructor returns.
    pub(super) fn call_class(
        &mut self,
        class: &Rc<Class>,
        args: Vec<Value>,
    ) -> Result<Value, RuntimeError> {
        let instance = Rc::new(RefCell::new(Instance {
            class: Rc::clone(class),
            fields: HashMap::new(),
        }));

        if let Some(constructor) = class.find_method("constructor") {
            let bound = constructor.bind(Rc::clone(&instance));
            self.call_function(&bound, args)?;
        }

        Ok(Value::Instance(instance))
    }

    fn check_index(
        bracket: &Token,
        index: &Value,
        len: usize,
    ) -> Result<usize, RuntimeError> {
        let Value::Number(n) = index else {
            return Err(RuntimeError::at(bracket, "Array index must be a number."));
        };
        let idx = *n as i64; // truncate toward zero
        if idx < 0 || idx as usize >= len {
            return Err(RuntimeError::at(bracket, "Array index out of bounds."));
        }
        Ok(idx as usize)
    }
}
