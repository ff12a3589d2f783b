//! Diagnostics for lexical and syntax errors.
//!
//! - Error codes for searchability
//! - A message saying what went wrong
//! - A primary label saying where
//! - Notes and help saying what was expected and how to fix it
//!
//! [`ReportRenderer`] turns diagnostics into annotated source snippets.

mod diagnostic;
mod emitter;
mod error_code;

pub use diagnostic::{Diagnostic, Label};
pub use emitter::ReportRenderer;
pub use error_code::ErrorCode;
