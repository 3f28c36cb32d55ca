//! Common constants used throughout gt.

/// Go reference layout for RFC3339 timestamps, used by `now`
pub const RFC3339: &str = "2006-01-02T15:04:05Z07:00";

/// Deepest nesting of control blocks, or of parentheses inside one action,
/// a template may use
pub const MAX_NESTING_DEPTH: usize = 100;
