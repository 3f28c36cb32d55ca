//! Float arithmetic. The piped operand comes last, so `{{ .age | sub 5 }}`
//! is `.age - 5`.

use super::{number_arg, Arity, Builtin, FuncError};
use crate::value::Value;

pub(super) const BUILTINS: &[Builtin] = &[
    builtin!("add", Arity::Exact(2), add),
    builtin!("sub", Arity::Exact(2), sub),
    builtin!("mul", Arity::Exact(2), mul),
    builtin!("div", Arity::Exact(2), div),
];

fn operands(args: &[Value]) -> Result<(f64, f64), FuncError> {
    let b = number_arg(args, 0)?;
    let a = number_arg(args, 1)?;
    Ok((a, b))
}

fn add(args: &[Value]) -> Result<Value, FuncError> {
    let (a, b) = operands(args)?;
    Ok(Value::from(a + b))
}

fn sub(args: &[Value]) -> Result<Value, FuncError> {
    let (a, b) = operands(args)?;
    Ok(Value::from(a - b))
}

fn mul(args: &[Value]) -> Result<Value, FuncError> {
    let (a, b) = operands(args)?;
    Ok(Value::from(a * b))
}

// Division by zero follows IEEE-754 and is not an error.
fn div(args: &[Value]) -> Result<Value, FuncError> {
    let (a, b) = operands(args)?;
    Ok(Value::from(a / b))
}
