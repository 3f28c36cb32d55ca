//! String builtins. The string being operated on is always the last argument.

use regex::Regex;

use super::{int_arg, string_arg, Arity, Builtin, FuncError};
use crate::value::Value;

pub(super) const BUILTINS: &[Builtin] = &[
    builtin!("upper", Arity::Exact(1), upper),
    builtin!("lower", Arity::Exact(1), lower),
    builtin!("trim", Arity::Exact(1), trim),
    builtin!("trimleft", Arity::Exact(1), trim_left),
    builtin!("trimright", Arity::Exact(1), trim_right),
    builtin!("replace", Arity::Exact(3), replace),
    builtin!("contains", Arity::Exact(2), contains),
    builtin!("hasprefix", Arity::Exact(2), has_prefix),
    builtin!("hassuffix", Arity::Exact(2), has_suffix),
    builtin!("indexof", Arity::Exact(2), index_of),
    builtin!("lastindexof", Arity::Exact(2), last_index_of),
    builtin!("reverse", Arity::Exact(1), reverse),
    builtin!("substr", Arity::Exact(3), substr),
    builtin!("escapeString", Arity::Exact(1), escape_string),
    builtin!("regexFind", Arity::Exact(2), regex_find),
];

/// Simple case mapping: each character maps on its own, and characters that
/// would expand to several (`ß`) are kept as they are.
fn map_case<I>(s: &str, map: impl Fn(char) -> I) -> String
where
    I: Iterator<Item = char>,
{
    s.chars()
        .map(|c| {
            let mut mapped = map(c);
            match (mapped.next(), mapped.next()) {
                (Some(single), None) => single,
                _ => c,
            }
        })
        .collect()
}

fn upper(args: &[Value]) -> Result<Value, FuncError> {
    Ok(Value::String(map_case(string_arg(args, 0)?, char::to_uppercase)))
}

fn lower(args: &[Value]) -> Result<Value, FuncError> {
    Ok(Value::String(map_case(string_arg(args, 0)?, char::to_lowercase)))
}

fn trim(args: &[Value]) -> Result<Value, FuncError> {
    Ok(Value::String(string_arg(args, 0)?.trim().to_string()))
}

fn trim_left(args: &[Value]) -> Result<Value, FuncError> {
    Ok(Value::String(string_arg(args, 0)?.trim_start_matches(' ').to_string()))
}

fn trim_right(args: &[Value]) -> Result<Value, FuncError> {
    Ok(Value::String(string_arg(args, 0)?.trim_end_matches(' ').to_string()))
}

fn replace(args: &[Value]) -> Result<Value, FuncError> {
    let old = string_arg(args, 0)?;
    let new = string_arg(args, 1)?;
    let s = string_arg(args, 2)?;
    if old.is_empty() {
        // An empty pattern matches before every character and at the end.
        let mut out = String::with_capacity(s.len() + new.len() * (s.len() + 1));
        out.push_str(new);
        for c in s.chars() {
            out.push(c);
            out.push_str(new);
        }
        return Ok(Value::String(out));
    }
    Ok(Value::String(s.replace(old, new)))
}

fn contains(args: &[Value]) -> Result<Value, FuncError> {
    let substr = string_arg(args, 0)?;
    Ok(Value::Bool(string_arg(args, 1)?.contains(substr)))
}

fn has_prefix(args: &[Value]) -> Result<Value, FuncError> {
    let prefix = string_arg(args, 0)?;
    Ok(Value::Bool(string_arg(args, 1)?.starts_with(prefix)))
}

fn has_suffix(args: &[Value]) -> Result<Value, FuncError> {
    let suffix = string_arg(args, 0)?;
    Ok(Value::Bool(string_arg(args, 1)?.ends_with(suffix)))
}

fn index_of(args: &[Value]) -> Result<Value, FuncError> {
    let substr = string_arg(args, 0)?;
    let position = string_arg(args, 1)?.find(substr);
    Ok(Value::from(position.map_or(-1, |i| i as i64)))
}

fn last_index_of(args: &[Value]) -> Result<Value, FuncError> {
    let substr = string_arg(args, 0)?;
    let position = string_arg(args, 1)?.rfind(substr);
    Ok(Value::from(position.map_or(-1, |i| i as i64)))
}

fn reverse(args: &[Value]) -> Result<Value, FuncError> {
    Ok(Value::String(string_arg(args, 0)?.chars().rev().collect()))
}

/// Byte slice `s[start:start+count]`. Out of range bounds are an error, the
/// slice is never clamped.
fn substr(args: &[Value]) -> Result<Value, FuncError> {
    let start = int_arg(args, 0)?;
    let count = int_arg(args, 1)?;
    let s = string_arg(args, 2)?;

    let out_of_range = || {
        FuncError::Invalid(format!(
            "slice bounds out of range [{start}:{}] with length {}",
            start.saturating_add(count),
            s.len()
        ))
    };

    let begin = usize::try_from(start).map_err(|_| out_of_range())?;
    let end = start
        .checked_add(count)
        .and_then(|end| usize::try_from(end).ok())
        .filter(|end| *end >= begin && *end <= s.len())
        .ok_or_else(out_of_range)?;

    Ok(Value::String(String::from_utf8_lossy(&s.as_bytes()[begin..end]).into_owned()))
}

fn escape_string(args: &[Value]) -> Result<Value, FuncError> {
    let s = string_arg(args, 0)?;
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    Ok(Value::String(out))
}

fn regex_find(args: &[Value]) -> Result<Value, FuncError> {
    let pattern = string_arg(args, 0)?;
    let s = string_arg(args, 1)?;
    let re = Regex::new(pattern).map_err(|e| FuncError::Invalid(e.to_string()))?;
    Ok(Value::String(re.find(s).map_or("", |m| m.as_str()).to_string()))
}
