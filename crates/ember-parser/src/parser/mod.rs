pub mod classes;
pub mod expressions;
pub mod statements;

use ember_common::error::{Diagnostic, ErrorKind};
use ember_common::interner::Interner;
use ember_common::span::Span;
use ember_common::token::{Token, TokenKind};

use crate::ast::Node;
use crate::frame::FrameStack;

/// Recursive-descent / Pratt parser over a pre-scanned token stream.
///
/// The parser owns the whole token list up front (the lexer has already run
/// to completion) rather than pulling tokens lazily; this keeps lookahead
/// (`nth`) and the grouping-vs-lambda backtrack in expression parsing simple
/// index arithmetic instead of a buffered-iterator dance.
pub struct Parser<'a> {
    tokens: Vec<Token>,
    pos: usize,
    pub(crate) interner: &'a mut Interner,
    pub(crate) errors: Vec<Diagnostic>,
    pub(crate) had_error: bool,
    pub(crate) frames: FrameStack,
    /// Set once panic-mode recovery is synchronizing, so cascading errors
    /// from the same bad spot don't all get reported individually.
    panic_mode: bool,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: Vec<Token>, interner: &'a mut Interner) -> Self {
        Self {
            tokens,
            pos: 0,
            interner,
            errors: Vec::new(),
            had_error: false,
            frames: FrameStack::new(),
            panic_mode: false,
        }
    }

    // ── Lookahead ────────────────────────────────────────────────────────

    pub(crate) fn current(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    pub(crate) fn kind(&self) -> TokenKind {
        self.current().kind
    }

    /// Span of the most recently consumed token. Used after a helper like
    /// `parse_arg_list` has already advanced past a closing delimiter, to
    /// recover its span for merging into the enclosing node.
    pub(crate) fn prev_span(&self) -> Span {
        self.tokens[self.pos.saturating_sub(1)].span
    }

    pub(crate) fn nth(&self, n: usize) -> &Token {
        let idx = (self.pos + n).min(self.tokens.len() - 1);
        &self.tokens[idx]
    }

    pub(crate) fn nth_kind(&self, n: usize) -> TokenKind {
        self.nth(n).kind
    }

    pub(crate) fn at(&self, kind: TokenKind) -> bool {
        self.kind() == kind
    }

    pub(crate) fn at_any(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.kind())
    }

    pub(crate) fn is_eof(&self) -> bool {
        self.at(TokenKind::Eof)
    }

    // ── Consumption ──────────────────────────────────────────────────────

    pub(crate) fn advance(&mut self) -> Token {
        let tok = self.current().clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        tok
    }

    /// Consume the current token if it matches `kind`.
    pub(crate) fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Skip any run of newline tokens.
    pub(crate) fn eat_newlines(&mut self) {
        while self.at(TokenKind::NewLine) {
            self.advance();
        }
    }

    /// Consume `kind`, or report an error and return the current token
    /// without consuming it so the caller can keep going.
    pub(crate) fn expect(&mut self, kind: TokenKind, expected_desc: &str) -> Token {
        if self.at(kind) {
            self.advance()
        } else {
            let found = describe_token(self.kind());
            self.error(ErrorKind::ExpectedToken {
                expected: expected_desc.to_string(),
                found,
            });
            self.current().clone()
        }
    }

    // ── Error reporting ──────────────────────────────────────────────────

    pub(crate) fn error(&mut self, kind: ErrorKind) {
        self.error_at(self.current().span, kind);
    }

    pub(crate) fn error_at(&mut self, span: Span, kind: ErrorKind) {
        self.had_error = true;
        if self.panic_mode {
            return;
        }
        self.panic_mode = true;
        self.errors.push(Diagnostic::new(span, kind));
    }

    /// Leave panic mode so subsequent genuinely new errors get reported.
    /// Called once the parser has resynchronized at a statement boundary.
    pub(crate) fn clear_panic_mode(&mut self) {
        self.panic_mode = false;
    }

    // ── Top level ────────────────────────────────────────────────────────

    /// Parse a complete source unit into a flat list of top-level
    /// declarations/statements.
    pub fn parse_program(&mut self) -> Vec<Node> {
        let mut nodes = Vec::new();
        self.eat_newlines();
        while !self.is_eof() {
            nodes.push(self.parse_declaration());
            self.eat_newlines();
        }
        nodes
    }

    /// Skip tokens until we're at a likely statement/declaration boundary,
    /// so one error doesn't cascade into a wall of follow-on ones.
    pub(crate) fn synchronize(&mut self) {
        self.clear_panic_mode();
        while !self.is_eof() {
            if self.kind() == TokenKind::NewLine || self.kind() == TokenKind::Semicolon {
                self.advance();
                return;
            }
            if self.at_any(&[
                TokenKind::Class,
                TokenKind::Function,
                TokenKind::Var,
                TokenKind::Const,
                TokenKind::For,
                TokenKind::If,
                TokenKind::While,
                TokenKind::Return,
                TokenKind::Export,
            ]) {
                return;
            }
            self.advance();
        }
    }
}

pub(crate) fn describe_token(kind: TokenKind) -> String {
    format!("{kind:?}")
}
