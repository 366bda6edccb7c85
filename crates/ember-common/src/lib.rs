//! Shared data types for the Ember front end: spans and line indexing,
//! string interning, the boxed literal value type, the token vocabulary, and
//! the lexical/syntactic diagnostic taxonomy.
//!
//! `ember-lexer` and `ember-parser` both depend on this crate so they agree
//! on a single `Token`/`Diagnostic` representation; neither crate defines its
//! own copy.

pub mod error;
pub mod interner;
pub mod span;
pub mod token;
pub mod value;

pub use error::{Diagnostic, ErrorKind};
pub use interner::{Interner, Symbol};
pub use span::{LineIndex, Span};
pub use token::{keyword_from_str, Token, TokenKind};
pub use value::Value;
