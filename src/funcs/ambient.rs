//! Builtins reading ambient state through the active capabilities.

use chrono::DateTime;

use super::{layout, string_arg, with_capabilities, Arity, Builtin, FuncError};
use crate::constants::RFC3339;
use crate::value::Value;

pub(super) const BUILTINS: &[Builtin] = &[
    builtin!("env", Arity::Exact(1), env),
    builtin!("now", Arity::Exact(0), now),
    builtin!("date", Arity::Exact(2), date),
];

/// Unset variables read as the empty string.
fn env(args: &[Value]) -> Result<Value, FuncError> {
    let name = string_arg(args, 0)?;
    let value = with_capabilities(|_, environment| environment.var(name));
    Ok(Value::String(value.unwrap_or_default()))
}

fn now(_: &[Value]) -> Result<Value, FuncError> {
    let instant = with_capabilities(|clock, _| clock.now());
    Ok(Value::String(layout::format(&instant, RFC3339)))
}

/// Reformats an RFC3339 instant. An instant that does not parse yields the
/// empty string rather than an error.
fn date(args: &[Value]) -> Result<Value, FuncError> {
    let format = string_arg(args, 0)?;
    let instant = string_arg(args, 1)?;
    let formatted = match DateTime::parse_from_rfc3339(instant) {
        Ok(instant) => layout::format(&instant, format),
        Err(_) => String::new(),
    };
    Ok(Value::String(formatted))
}
