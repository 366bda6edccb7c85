//! Re-export of the shared diagnostic type.
//!
//! The lexer and parser report through the same [`ember_common::Diagnostic`]
//! so a caller collects one combined list instead of juggling a lex-error
//! type and a parse-error type.

pub use ember_common::error::{Diagnostic, ErrorKind};
