//! Recursive-descent / Pratt parser turning Ember's token stream into a
//! tagged-variant AST.
//!
//! [`parse`] runs the lexer and parser back to back and returns the
//! top-level nodes, the interner populated along the way, and every
//! diagnostic collected from both passes.

pub mod ast;
pub mod error;
pub mod frame;
pub mod parser;
pub mod rules;

use ember_common::error::Diagnostic;
use ember_common::interner::Interner;

use ast::Node;
use ember_lexer::{Lexer, LexerConfig};
use parser::Parser;

pub struct ParseResult {
    pub nodes: Vec<Node>,
    pub interner: Interner,
    pub diagnostics: Vec<Diagnostic>,
    pub had_error: bool,
}

/// Lex and parse a complete source unit.
pub fn parse(source: &str) -> ParseResult {
    parse_with_config(source, LexerConfig::default())
}

pub fn parse_with_config(source: &str, config: LexerConfig) -> ParseResult {
    let mut interner = Interner::new();
    let (tokens, mut diagnostics) = Lexer::tokenize_with_config(source, &mut interner, config);
    let lexer_had_error = !diagnostics.is_empty();

    let mut parser = Parser::new(tokens, &mut interner);
    let nodes = parser.parse_program();
    let parser_had_error = parser.had_error;
    diagnostics.extend(parser.errors);

    ParseResult {
        nodes,
        interner,
        diagnostics,
        had_error: lexer_had_error || parser_had_error,
    }
}
