use super::*;

impl Interpreter {
    pub(super) fn eval_binary(
        &self,
        op: &Token,
        left: Value,
        right: Value,
    ) -> Result<Value, RuntimeError> {
        match op.kind {
            TokenKind::Plus => match (&left, &right) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
                (Value::Str(a), Value::Str(b)) => Ok(Value::Str(format!("{}{}", a, b))),
                _ => Err(RuntimeError::at(
                    op,
                    "Operands must be two numbers or two strings.",
                )),
            },
            TokenKind::Minus => {
                let (a, b) = Self::number_operands(op, &left, &right)?;
                Ok(Value::Number(a - b))
            }
            TokenKind::Star => {
                let (a, b) = Self::number_operands(op, &left, &right)?;
                Ok(Value::Number(a * b))
            }
            TokenKind::Slash => {
                let (a, b) = Self::number_operands(op, &left, &right)?;
                if b == 0.0 {
                    Err(RuntimeError::at(op, "Division by zero."))
                } else {
                    Ok(Value::Number(a / b))
                }
            }
            TokenKind::Eq => Ok(Value::Bool(is_equal(&left, &right))),
            TokenKind::Lt => {
                let (a, b) = Self::number_operands(op, &left, &right)?;
                Ok(Value::Bool(a < b))
            }
            TokenKind::Lte => {
                let (a, b) = Self::number_operands(op, &left, &right)?;
                Ok(Value::Bool(a <= b))
            }
            TokenKind::Gt => {
                let (a, b) = Self::number_operands(op, &left, &right)?;
                Ok(Value::Bool(a > b))
            }
            TokenKind::Gte => {
                let (a, b) = Self::number_operands(op, &left, &right)?;
                Ok(Value::Bool(a >= b))
            }
            TokenKind::In => {
                let Value::Array(items) = &right else {
                    return Err(RuntimeError::at(
                        op,
                        "'IN' operator requires an array on the right.",
                    ));
                };
                let found = items.borrow().iter().any(|element| is_equal(&left, element));
                Ok(Value::Bool(found))
            }
            _ => Err(RuntimeError::at(op, "Unknown binary operator.")),
        }
    }

    fn number_operands(
        op: &Token,
        left: &Value,
        right: &Value,
    ) -> Result<(f64, f64), RuntimeError> {
        match (left, right) {
            (Value::Number(a), Value::Number(b)) => Ok((*a, *b)),
            _ => Err(RuntimeError::at(op, "Operands must be numbers.")),
        }
    }
}

/// Deep value equality within the same tag for null/number/string/boolean;
/// arrays, instances, and callables compare by identity. Mixed tags are
/// never equal.
pub fn is_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Number(x), Value::Number(y)) => x == y,
        (Value::Str(x), Value::Str(y)) => x == y,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Array(x), Value::Array(y)) => Rc::ptr_eq(x, y),
        (Value::Function(x), Value::Function(y)) => Rc::ptr_eq(x, y),
        (Value::Class(x), Value::Class(y)) => Rc::ptr_eq(x, y),
        (Value::Instance(x), Value::Instance(y)) => Rc::ptr_eq(x, y),
        _ => false,
    }
}
