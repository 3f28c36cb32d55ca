//! Shape predicates. Both accept any value, including null data.

use super::{Arity, Builtin, FuncError};
use crate::value::Value;

pub(super) const BUILTINS: &[Builtin] = &[
    builtin!("len", Arity::Exact(1), len),
    builtin!("empty", Arity::Exact(1), empty),
];

/// Byte length of a string, element count of a list, key count of a map and
/// zero for anything else. The count is an integer.
fn len(args: &[Value]) -> Result<Value, FuncError> {
    let n = match args.first() {
        Some(Value::String(s)) => s.len(),
        Some(Value::Array(items)) => items.len(),
        Some(Value::Object(map) | Value::Map(map)) => map.len(),
        _ => 0,
    };
    Ok(Value::from(n as i64))
}

/// Shapes without a notion of emptiness count as empty.
fn empty(args: &[Value]) -> Result<Value, FuncError> {
    let is_empty = match args.first() {
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(Value::Object(map) | Value::Map(map)) => map.is_empty(),
        _ => true,
    };
    Ok(Value::Bool(is_empty))
}
