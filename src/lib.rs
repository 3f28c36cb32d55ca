//! gt renders Go `text/template` sources against JSON data.
//! It binds JSON into template values, runs templates through the `gtmpl`
//! engine, and adds a library of string, math, date and predicate functions
//! to every template.

/// Binding of raw JSON bytes into template values
pub mod binder;

/// Command-line interface module for the gt application
pub mod cli;

/// Common constants used across modules
pub mod constants;

/// Error types and handling for the gt application
pub mod error;

/// Builtin functions and the registry templates resolve names against
/// Includes the injectable clock and environment capabilities
pub mod funcs;

/// Reading template and data buffers from files or stdin
pub mod input;

/// Render façade tying binding, parsing and execution together
pub mod renderer;

/// Templates parsed against the function library
pub mod template;

/// Conversion of JSON into the values templates operate on
pub mod value;

pub use renderer::render;
