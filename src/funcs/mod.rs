//! The function library injected into every template namespace.
//!
//! Builtins are registered once when a [`FunctionLibrary`] is built and the
//! registry is read-only afterwards. Functions meant for pipelining take the
//! piped value as their last argument, so `{{ .name | replace "a" "b" }}`
//! calls `replace("a", "b", .name)`.
//!
//! The grammar builtins (`and`, `eq`, `index`, `print` and the rest) come
//! with the template engine. This library adds its own functions on top and
//! replaces the engine's `len` and `printf`.
//!
//! `now` and `env` are the only builtins touching ambient state. Both read
//! the [`Clock`] and [`Environment`] of the library whose [`CapabilityScope`]
//! is active on the calling thread.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Local};
use gtmpl::Func;
use log::trace;
use thiserror::Error;

use crate::value::{self, Value};

/// Declares a [`Builtin`] along with the engine-facing adapter that checks
/// its arity and turns its error into text.
macro_rules! builtin {
    ($name:literal, $arity:expr, $call:path) => {{
        fn adapter(args: &[$crate::value::Value]) -> Result<$crate::value::Value, String> {
            $crate::funcs::invoke($name, $arity, $call, args).map_err(|err| err.to_string())
        }
        $crate::funcs::Builtin { name: $name, arity: $arity, call: $call, func: adapter }
    }};
}

mod ambient;
mod collections;
mod format;
pub mod layout;
mod math;
mod strings;

/// Errors a builtin reports back to the template.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FuncError {
    #[error("wrong number of args for {name}: want {want} got {got}")]
    Arity { name: String, want: Arity, got: usize },

    #[error("wrong type for value; expected {expected}; got {got}")]
    WrongType { expected: &'static str, got: &'static str },

    #[error("{0}")]
    Invalid(String),
}

/// Number of arguments a builtin accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    AtLeast(usize),
}

impl Arity {
    fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Exact(n) => count == n,
            Arity::AtLeast(n) => count >= n,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exact(n) => write!(f, "{n}"),
            Arity::AtLeast(n) => write!(f, "at least {n}"),
        }
    }
}

/// Signature every builtin implementation has.
pub type BuiltinFn = fn(&[Value]) -> Result<Value, FuncError>;

/// A named callable registered in the library.
#[derive(Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub arity: Arity,
    call: BuiltinFn,
    func: Func,
}

impl Builtin {
    /// The function handed to the template engine under [`Builtin::name`].
    pub fn func(&self) -> Func {
        self.func
    }
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builtin").field("name", &self.name).field("arity", &self.arity).finish()
    }
}

pub(crate) fn invoke(
    name: &str,
    arity: Arity,
    call: BuiltinFn,
    args: &[Value],
) -> Result<Value, FuncError> {
    if !arity.accepts(args.len()) {
        return Err(FuncError::Arity { name: name.to_string(), want: arity, got: args.len() });
    }
    trace!("Calling {} with {} argument(s)", name, args.len());
    call(args)
}

/// Source of the current instant for `now`.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// The local wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// A frozen instant is a clock that always reads the same time.
impl Clock for DateTime<FixedOffset> {
    fn now(&self) -> DateTime<FixedOffset> {
        *self
    }
}

/// Lookup of environment variables for `env`.
pub trait Environment: Send + Sync {
    fn var(&self, name: &str) -> Option<String>;
}

/// The environment of the running process.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var_os(name).map(|value| value.to_string_lossy().into_owned())
    }
}

impl Environment for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl Environment for BTreeMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

#[derive(Clone)]
struct Capabilities {
    clock: Arc<dyn Clock>,
    environment: Arc<dyn Environment>,
}

thread_local! {
    static ACTIVE: RefCell<Option<Capabilities>> = const { RefCell::new(None) };
}

/// Keeps a library's clock and environment active on the current thread
/// until dropped. Scopes nest; dropping one restores the previous library.
pub struct CapabilityScope {
    previous: Option<Capabilities>,
}

impl Drop for CapabilityScope {
    fn drop(&mut self) {
        let previous = self.previous.take();
        ACTIVE.with(|active| *active.borrow_mut() = previous);
    }
}

/// Runs `f` with the active capabilities, or the process clock and
/// environment when no scope is active.
fn with_capabilities<T>(f: impl FnOnce(&dyn Clock, &dyn Environment) -> T) -> T {
    let active = ACTIVE.with(|active| active.borrow().clone());
    match active {
        Some(capabilities) => f(&*capabilities.clock, &*capabilities.environment),
        None => f(&SystemClock, &ProcessEnvironment),
    }
}

/// Registry of the functions a template can call.
pub struct FunctionLibrary {
    capabilities: Capabilities,
    builtins: HashMap<&'static str, Builtin>,
}

impl FunctionLibrary {
    /// Builds the library around the given ambient capabilities.
    ///
    /// # Arguments
    /// * `clock` - Source of the instant returned by `now`
    /// * `environment` - Variable lookup used by `env`
    pub fn new(clock: impl Clock + 'static, environment: impl Environment + 'static) -> Self {
        let builtins = ambient::BUILTINS
            .iter()
            .chain(math::BUILTINS)
            .chain(strings::BUILTINS)
            .chain(collections::BUILTINS)
            .chain(format::BUILTINS)
            .map(|builtin| (builtin.name, *builtin))
            .collect();
        let capabilities =
            Capabilities { clock: Arc::new(clock), environment: Arc::new(environment) };

        Self { capabilities, builtins }
    }

    pub fn get(&self, name: &str) -> Option<&Builtin> {
        self.builtins.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.builtins.contains_key(name)
    }

    pub fn builtins(&self) -> impl Iterator<Item = &Builtin> {
        self.builtins.values()
    }

    /// Names of all registered builtins, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.builtins.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Makes this library's clock and environment the ones `now` and `env`
    /// read on the current thread, for as long as the scope lives.
    pub fn enter(&self) -> CapabilityScope {
        let current = self.capabilities.clone();
        let previous = ACTIVE.with(|active| active.borrow_mut().replace(current));
        CapabilityScope { previous }
    }

    /// Calls a builtin by name after checking its arity.
    ///
    /// # Errors
    /// * `FuncError::Invalid` if no builtin has that name
    /// * `FuncError::Arity` if the argument count does not match
    /// * Whatever the builtin itself reports
    pub fn call(&self, name: &str, args: &[Value]) -> Result<Value, FuncError> {
        let builtin = self
            .get(name)
            .ok_or_else(|| FuncError::Invalid(format!("function \"{name}\" not defined")))?;
        let _scope = self.enter();
        invoke(builtin.name, builtin.arity, builtin.call, args)
    }
}

impl Default for FunctionLibrary {
    fn default() -> Self {
        FunctionLibrary::new(SystemClock, ProcessEnvironment)
    }
}

impl fmt::Debug for FunctionLibrary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionLibrary").field("builtins", &self.names()).finish()
    }
}

fn arg(args: &[Value], index: usize) -> Result<&Value, FuncError> {
    args.get(index)
        .ok_or_else(|| FuncError::Invalid(format!("missing argument {}", index + 1)))
}

pub(crate) fn string_arg(args: &[Value], index: usize) -> Result<&str, FuncError> {
    let value = arg(args, index)?;
    value::as_str(value)
        .ok_or(FuncError::WrongType { expected: "string", got: value::kind(value) })
}

pub(crate) fn number_arg(args: &[Value], index: usize) -> Result<f64, FuncError> {
    let value = arg(args, index)?;
    value::as_f64(value)
        .ok_or(FuncError::WrongType { expected: "number", got: value::kind(value) })
}

pub(crate) fn int_arg(args: &[Value], index: usize) -> Result<i64, FuncError> {
    let value = arg(args, index)?;
    value::as_i64(value)
        .ok_or(FuncError::WrongType { expected: "integer", got: value::kind(value) })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scopes_nest() {
        let outer = FunctionLibrary::new(
            DateTime::parse_from_rfc3339("2020-01-01T00:00:00Z").unwrap(),
            HashMap::new(),
        );
        let inner = FunctionLibrary::new(
            DateTime::parse_from_rfc3339("2030-01-01T00:00:00Z").unwrap(),
            HashMap::new(),
        );
        let year = || with_capabilities(|clock, _| clock.now().format("%Y").to_string());

        let _outer = outer.enter();
        assert_eq!(year(), "2020");
        {
            let _inner = inner.enter();
            assert_eq!(year(), "2030");
        }
        assert_eq!(year(), "2020");
    }

    #[test]
    fn test_adapter_reports_text() {
        let library = FunctionLibrary::default();
        let upper = library.get("upper").unwrap().func();
        let err = upper(&[]).err();
        assert_eq!(err.as_deref(), Some("wrong number of args for upper: want 1 got 0"));
    }
}
