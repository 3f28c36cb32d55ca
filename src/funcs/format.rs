//! `printf`, following Go's `fmt` conventions for the values JSON data can
//! hold. Widths and precisions above [`MAX_WIDTH`] are rejected the way Go
//! rejects them, with a `%!(BADWIDTH)` or `%!(BADPREC)` marker.

use super::{string_arg, Arity, Builtin, FuncError};
use crate::value::{self, Value};

pub(super) const BUILTINS: &[Builtin] = &[builtin!("printf", Arity::AtLeast(1), printf)];

/// Largest width or precision a verb may ask for.
pub const MAX_WIDTH: usize = 1_000_000;

fn printf(args: &[Value]) -> Result<Value, FuncError> {
    let format = string_arg(args, 0)?;
    Ok(Value::String(sprintf(format, &args[1..])))
}

/// Type names as Go reports them in formatting errors.
fn go_type(value: &Value) -> &'static str {
    match value {
        Value::NoValue | Value::Nil => "<nil>",
        Value::Bool(_) => "bool",
        Value::Number(_) => "float64",
        Value::String(_) => "string",
        Value::Array(_) => "[]interface {}",
        _ => "map[string]interface {}",
    }
}

#[derive(Debug, Default)]
struct Directive {
    minus: bool,
    plus: bool,
    space: bool,
    zero: bool,
    width: Option<usize>,
    precision: Option<usize>,
}

impl Directive {
    fn pad(&self, body: String, numeric: bool) -> String {
        let Some(width) = self.width else {
            return body;
        };
        let len = body.chars().count();
        if len >= width {
            return body;
        }
        let fill = width - len;
        if self.minus {
            format!("{body}{}", " ".repeat(fill))
        } else if self.zero && numeric {
            let (sign, digits) = match body.strip_prefix(|c: char| c == '-' || c == '+') {
                Some(digits) => (&body[..1], digits),
                None => ("", body.as_str()),
            };
            format!("{sign}{}{digits}", "0".repeat(fill))
        } else {
            format!("{}{body}", " ".repeat(fill))
        }
    }

    fn sign(&self, n: f64, body: String) -> String {
        if n.is_sign_negative() || n.is_nan() {
            body
        } else if self.plus {
            format!("+{body}")
        } else if self.space {
            format!(" {body}")
        } else {
            body
        }
    }
}

fn bad_verb(verb: char, value: &Value) -> String {
    format!("%!{verb}({}={value})", go_type(value))
}

fn exponent(n: f64, precision: usize) -> String {
    let formatted = format!("{n:.precision$e}");
    match formatted.split_once('e') {
        Some((mantissa, exp)) => {
            let exp: i32 = exp.parse().unwrap_or(0);
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{mantissa}e{sign}{:02}", exp.abs())
        }
        None => formatted,
    }
}

fn format_one(directive: &Directive, verb: char, value: &Value) -> String {
    let number = value::as_f64(value);
    let integer = value::as_i64(value);
    match (verb, value) {
        ('v', _) => directive.pad(value.to_string(), false),
        ('s', Value::String(s)) => {
            let s = match directive.precision {
                Some(p) => s.chars().take(p).collect(),
                None => s.clone(),
            };
            directive.pad(s, false)
        }
        ('q', Value::String(s)) => directive.pad(format!("{s:?}"), false),
        ('t', Value::Bool(b)) => directive.pad(b.to_string(), false),
        ('d', _) if integer.is_some() => {
            let i = integer.unwrap_or_default();
            directive.pad(directive.sign(i as f64, i.to_string()), true)
        }
        ('f' | 'F', _) if number.is_some() => {
            let n = number.unwrap_or_default();
            let precision = directive.precision.unwrap_or(6);
            directive.pad(directive.sign(n, format!("{n:.precision$}")), true)
        }
        ('e', _) if number.is_some() => {
            let n = number.unwrap_or_default();
            let precision = directive.precision.unwrap_or(6);
            directive.pad(directive.sign(n, exponent(n, precision)), true)
        }
        ('g', _) if number.is_some() => {
            let n = number.unwrap_or_default();
            directive.pad(directive.sign(n, value.to_string()), true)
        }
        ('x' | 'X', _) if integer.is_some() => {
            let i = integer.unwrap_or_default();
            let digits = if verb == 'x' {
                format!("{:x}", i.unsigned_abs())
            } else {
                format!("{:X}", i.unsigned_abs())
            };
            let body = if i < 0 { format!("-{digits}") } else { digits };
            directive.pad(body, true)
        }
        ('x' | 'X', Value::String(s)) => {
            let hex: String = s
                .bytes()
                .map(|b| if verb == 'x' { format!("{b:02x}") } else { format!("{b:02X}") })
                .collect();
            directive.pad(hex, false)
        }
        _ => bad_verb(verb, value),
    }
}

fn digits(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> Option<usize> {
    let mut n: Option<usize> = None;
    while let Some(d) = chars.next_if(char::is_ascii_digit) {
        let digit = d.to_digit(10).unwrap_or(0) as usize;
        n = Some(n.unwrap_or(0).saturating_mul(10).saturating_add(digit));
    }
    n
}

/// Formats `args` according to a Go `printf` format string.
fn sprintf(format: &str, args: &[Value]) -> String {
    let mut out = String::with_capacity(format.len());
    let mut args = args.iter();
    let mut chars = format.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        let mut directive = Directive::default();
        while let Some(&flag) = chars.peek() {
            match flag {
                '-' => directive.minus = true,
                '+' => directive.plus = true,
                ' ' => directive.space = true,
                '0' => directive.zero = true,
                '#' => {}
                _ => break,
            }
            chars.next();
        }
        directive.width = digits(&mut chars);
        if directive.width.is_some_and(|width| width > MAX_WIDTH) {
            out.push_str("%!(BADWIDTH)");
            directive.width = None;
        }
        if chars.next_if_eq(&'.').is_some() {
            let precision = digits(&mut chars).unwrap_or(0);
            if precision > MAX_WIDTH {
                out.push_str("%!(BADPREC)");
            } else {
                directive.precision = Some(precision);
            }
        }

        let Some(verb) = chars.next() else {
            out.push_str("%!(NOVERB)");
            break;
        };
        if verb == '%' {
            out.push('%');
            continue;
        }
        match args.next() {
            Some(value) => out.push_str(&format_one(&directive, verb, value)),
            None => out.push_str(&format!("%!{verb}(MISSING)")),
        }
    }

    let extra: Vec<String> =
        args.map(|value| format!("{}={value}", go_type(value))).collect();
    if !extra.is_empty() {
        out.push_str(&format!("%!(EXTRA {})", extra.join(", ")));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &str) -> Value {
        Value::String(v.to_string())
    }

    fn n(v: f64) -> Value {
        Value::from(v)
    }

    #[test]
    fn test_sprintf_verbs() {
        assert_eq!(sprintf("%s is %d, %.2f", &[s("John"), n(30.0), n(2.5)]), "John is 30, 2.50");
        assert_eq!(sprintf("%v|%5s|%-5s|", &[n(1.0), s("ab"), s("cd")]), "1|   ab|cd   |");
        assert_eq!(sprintf("%03d %+d", &[n(7.0), Value::from(7i64)]), "007 +7");
        assert_eq!(sprintf("%x %X", &[n(255.0), s("hi")]), "ff 6869");
        assert_eq!(sprintf("%t %q", &[Value::Bool(true), s("a\"b")]), "true \"a\\\"b\"");
        assert_eq!(sprintf("%e", &[n(1234.5)]), "1.234500e+03");
        assert_eq!(sprintf("100%%", &[]), "100%");
    }

    #[test]
    fn test_sprintf_mismatches() {
        assert_eq!(sprintf("%d", &[s("x")]), "%!d(string=x)");
        assert_eq!(sprintf("%d", &[n(2.5)]), "%!d(float64=2.5)");
        assert_eq!(sprintf("%s %s", &[s("a")]), "a %!s(MISSING)");
        assert_eq!(sprintf("%s", &[s("a"), n(1.0)]), "a%!(EXTRA float64=1)");
    }

    #[test]
    fn test_sprintf_rejects_huge_widths() {
        assert_eq!(sprintf("%1000000000s", &[s("x")]), "%!(BADWIDTH)x");
        assert_eq!(sprintf("%.99999999999999999999f", &[n(1.5)]), "%!(BADPREC)1.500000");
        assert_eq!(sprintf("%1000000d|", &[n(1.0)]).len(), MAX_WIDTH + 1);
    }
}
