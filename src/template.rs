//! Parsing and execution of Go `text/template` sources.
//!
//! The grammar itself is handled by `gtmpl`. A [`Template`] registers every
//! builtin of a [`FunctionLibrary`] with the engine before parsing, and makes
//! the library's clock and environment active while it executes.

use gtmpl::Context;
use log::trace;
use thiserror::Error;

use crate::constants::MAX_NESTING_DEPTH;
use crate::funcs::FunctionLibrary;
use crate::value::Value;

/// A template that does not parse.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct ParseError {
    pub message: String,
}

impl ParseError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// A fault raised while executing a parsed template.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct ExecError {
    pub message: String,
}

impl ExecError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// A parsed template bound to a function library.
pub struct Template<'lib> {
    inner: gtmpl::Template,
    library: &'lib FunctionLibrary,
}

impl<'lib> Template<'lib> {
    /// Parses template source.
    ///
    /// # Arguments
    /// * `source` - Template text
    /// * `library` - Functions the template may call, on top of the
    ///   engine's own
    ///
    /// # Errors
    /// * `ParseError` if blocks or parentheses nest deeper than
    ///   [`MAX_NESTING_DEPTH`], or if the engine rejects the source
    pub fn parse(source: &str, library: &'lib FunctionLibrary) -> Result<Self, ParseError> {
        check_nesting(source)?;

        let mut inner = gtmpl::Template::default();
        for builtin in library.builtins() {
            inner.add_func(builtin.name, builtin.func());
        }
        inner.parse(source).map_err(|err| ParseError::new(err.to_string()))?;
        Ok(Self { inner, library })
    }

    /// Executes the template with `data` as both dot and `$`.
    ///
    /// # Returns
    /// * The complete output. Nothing is returned on failure.
    pub fn execute(&self, data: &Value) -> Result<String, ExecError> {
        let context =
            Context::from(data.clone()).map_err(|err| ExecError::new(err.to_string()))?;
        let _scope = self.library.enter();
        self.inner.render(&context).map_err(|err| ExecError::new(err.to_string()))
    }
}

const BLOCK_KEYWORDS: [&str; 5] = ["if", "range", "with", "block", "define"];

/// Rejects sources whose blocks or parenthesized pipelines nest deeper than
/// [`MAX_NESTING_DEPTH`]. The engine parses and executes recursively, so an
/// unbounded depth would exhaust the stack.
fn check_nesting(source: &str) -> Result<(), ParseError> {
    let mut blocks = 0usize;
    let mut offset = 0;

    while let Some(start) = source[offset..].find("{{") {
        let action_start = offset + start + 2;
        let action = &source[action_start..];
        let (parens, length) = scan_action(action);

        let too_deep = |what: &str| {
            let line = source[..action_start].matches('\n').count() + 1;
            ParseError::new(format!(
                "line {line}: {what} nested deeper than {MAX_NESTING_DEPTH} levels"
            ))
        };
        if parens > MAX_NESTING_DEPTH {
            return Err(too_deep("parentheses"));
        }
        match keyword(action) {
            Some("end") => blocks = blocks.saturating_sub(1),
            Some(word) if BLOCK_KEYWORDS.contains(&word) => {
                blocks += 1;
                if blocks > MAX_NESTING_DEPTH {
                    return Err(too_deep("blocks"));
                }
            }
            _ => {}
        }

        offset = action_start + length;
    }
    trace!("Template nesting is within {} levels", MAX_NESTING_DEPTH);
    Ok(())
}

/// The leading identifier of an action, after any trim marker.
fn keyword(action: &str) -> Option<&str> {
    let body = match action.strip_prefix('-') {
        Some(rest) if rest.starts_with(char::is_whitespace) => rest,
        _ => action,
    };
    let body = body.trim_start();
    let end = body.find(|c: char| !c.is_ascii_alphanumeric()).unwrap_or(body.len());
    (end > 0).then(|| &body[..end])
}

/// Walks one action starting right after its `{{`. Returns the deepest
/// parenthesis nesting inside it and its length up to and including the
/// closing `}}`. Quoted text and comments are skipped.
fn scan_action(action: &str) -> (usize, usize) {
    let bytes = action.as_bytes();
    let body = action.trim_start_matches('-').trim_start();
    if body.starts_with("/*") {
        let length = action.find("*/").and_then(|close| {
            action[close..].find("}}").map(|end| close + end + 2)
        });
        return (0, length.unwrap_or(bytes.len()));
    }

    let (mut depth, mut deepest) = (0usize, 0usize);
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'}' if bytes.get(i + 1) == Some(&b'}') => return (deepest, i + 2),
            b'(' => {
                depth += 1;
                deepest = deepest.max(depth);
            }
            b')' => depth = depth.saturating_sub(1),
            quote @ (b'"' | b'\'') => {
                i += 1;
                while i < bytes.len() && bytes[i] != quote {
                    if bytes[i] == b'\\' {
                        i += 1;
                    }
                    i += 1;
                }
            }
            b'`' => {
                i += 1;
                while i < bytes.len() && bytes[i] != b'`' {
                    i += 1;
                }
            }
            _ => {}
        }
        i += 1;
    }
    (deepest, bytes.len())
}
