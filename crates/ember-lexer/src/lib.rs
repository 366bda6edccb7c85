//! Hand-written scanner for Ember source text.
//!
//! The lexer is a single pass over the source string that produces a flat
//! stream of [`Token`](ember_common::Token)s plus a side list of
//! [`Diagnostic`](ember_common::Diagnostic)s for anything malformed. It never
//! stops at the first error: on a bad character, string, or number it emits
//! an `Error` token (or, for recoverable cases, the best-guess token) and
//! keeps going, so the parser can report more than one problem per run.
//!
//! String interpolation is the one place scanning isn't a flat loop. A
//! string literal like `$"total: {a + b}"` is split into a `String`/
//! `Interpolation` token for each literal chunk, with the `{...}` hole
//! scanned as ordinary tokens in between. The scanner tracks this with an
//! explicit state stack rather than recursion, since a hole can itself
//! contain a nested interpolated string.

pub mod cursor;

use ember_common::error::{Diagnostic, ErrorKind};
use ember_common::interner::Interner;
use ember_common::span::Span;
use ember_common::token::{keyword_from_str, Token, TokenKind};
use ember_common::value::Value;

use cursor::Cursor;

/// Default cap on how many interpolation holes may nest inside one another,
/// e.g. `"{a + "{b}"}"`.
pub const MAX_INTERPOLATION_NESTING: u32 = 8;

#[derive(Debug, Clone, Copy)]
pub struct LexerConfig {
    pub max_interpolation_nesting: u32,
}

impl Default for LexerConfig {
    fn default() -> Self {
        Self {
            max_interpolation_nesting: MAX_INTERPOLATION_NESTING,
        }
    }
}

/// The scanner's internal mode. `Normal` is the state outside of any string;
/// `InString` is scanning the literal text of a string chunk; `InHole` is
/// scanning ordinary tokens inside an interpolation's `{...}`.
#[derive(Debug, Clone, Copy, PartialEq)]
enum LexerState {
    InString { interpolated: bool },
    InHole { brace_depth: u32 },
}

pub struct Lexer<'src> {
    cursor: Cursor<'src>,
    config: LexerConfig,
    line: u32,
    state_stack: Vec<LexerState>,
    diagnostics: Vec<Diagnostic>,
    had_error: bool,
    emitted_eof: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self::with_config(source, LexerConfig::default())
    }

    pub fn with_config(source: &'src str, config: LexerConfig) -> Self {
        Self {
            cursor: Cursor::new(source),
            config,
            line: 1,
            state_stack: Vec::new(),
            diagnostics: Vec::new(),
            had_error: false,
            emitted_eof: false,
        }
    }

    pub fn had_error(&self) -> bool {
        self.had_error
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Scan the whole source, interning identifiers and string text into
    /// `interner`, and return the token stream together with the
    /// diagnostics collected along the way.
    pub fn tokenize(source: &'src str, interner: &mut Interner) -> (Vec<Token>, Vec<Diagnostic>) {
        Self::tokenize_with_config(source, interner, LexerConfig::default())
    }

    pub fn tokenize_with_config(
        source: &'src str,
        interner: &mut Interner,
        config: LexerConfig,
    ) -> (Vec<Token>, Vec<Diagnostic>) {
        let mut lexer = Self::with_config(source, config);
        let mut tokens = Vec::new();
        loop {
            let tok = lexer.next_token(interner);
            let done = tok.kind == TokenKind::Eof;
            tokens.push(tok);
            if done {
                break;
            }
        }
        (tokens, lexer.diagnostics)
    }

    fn push_error(&mut self, span: Span, kind: ErrorKind) {
        self.had_error = true;
        self.diagnostics.push(Diagnostic::new(span, kind));
    }

    fn interpolation_depth(&self) -> u32 {
        self.state_stack
            .iter()
            .filter(|s| matches!(s, LexerState::InHole { .. }))
            .count() as u32
    }

    /// Produce the next token. Returns an `Eof` token forever once the
    /// source is exhausted.
    pub fn next_token(&mut self, interner: &mut Interner) -> Token {
        if self.emitted_eof {
            return Token::new(TokenKind::Eof, Span::point(self.cursor.pos()), self.line);
        }

        match self.state_stack.last().copied() {
            Some(LexerState::InString { .. }) => self.scan_string_chunk(interner),
            _ => self.scan_normal(interner),
        }
    }

    // ── Normal-mode scanning ─────────────────────────────────────────────

    fn scan_normal(&mut self, interner: &mut Interner) -> Token {
        self.skip_whitespace_and_comments();

        let start = self.cursor.pos();
        let line = self.line;

        let Some(c) = self.cursor.peek() else {
            if matches!(self.state_stack.last(), Some(LexerState::InHole { .. })) {
                self.push_error(Span::point(start), ErrorKind::UnmatchedInterpolationBrace);
            }
            self.emitted_eof = true;
            return Token::new(TokenKind::Eof, Span::point(start), line);
        };

        if c == '\n' {
            self.cursor.advance();
            self.line += 1;
            return Token::new(TokenKind::NewLine, Span::new(start, self.cursor.pos()), line);
        }

        if c == '"' {
            return self.begin_string(false, start, line, interner);
        }
        if c == '$' && self.cursor.peek_next() == Some('"') {
            self.cursor.advance();
            return self.begin_string(true, start, line, interner);
        }

        if c.is_ascii_digit() {
            return self.scan_number(start, line);
        }

        if is_ident_start(c) {
            return self.scan_ident(start, line, interner);
        }

        // If we're inside an interpolation hole, watch the brace depth so
        // we know which `}` closes the hole rather than a nested block or
        // object literal.
        if c == '{' {
            self.cursor.advance();
            if let Some(LexerState::InHole { brace_depth }) = self.state_stack.last_mut() {
                *brace_depth += 1;
            }
            return Token::new(TokenKind::LBrace, Span::new(start, self.cursor.pos()), line);
        }
        if c == '}' {
            if let Some(LexerState::InHole { brace_depth }) = self.state_stack.last_mut() {
                if *brace_depth > 0 {
                    *brace_depth -= 1;
                    self.cursor.advance();
                    return Token::new(TokenKind::RBrace, Span::new(start, self.cursor.pos()), line);
                }
                // This `}` closes the hole itself: resume the string below it.
                self.cursor.advance();
                self.state_stack.pop();
                return self.next_token(interner);
            }
            self.cursor.advance();
            return Token::new(TokenKind::RBrace, Span::new(start, self.cursor.pos()), line);
        }

        self.scan_operator_or_delimiter(c, start, line)
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.cursor.peek() {
                Some(' ') | Some('\t') | Some('\r') => {
                    self.cursor.advance();
                }
                Some('/') if self.cursor.peek_next() == Some('/') => {
                    self.cursor.eat_while(|c| c != '\n');
                }
                Some('/') if self.cursor.peek_next() == Some('*') => {
                    self.skip_block_comment();
                }
                _ => break,
            }
        }
    }

    fn skip_block_comment(&mut self) {
        let start = self.cursor.pos();
        self.cursor.advance(); // '/'
        self.cursor.advance(); // '*'
        loop {
            match self.cursor.peek() {
                None => {
                    self.push_error(
                        Span::new(start, self.cursor.pos()),
                        ErrorKind::UnterminatedBlockComment,
                    );
                    return;
                }
                Some('\n') => {
                    self.cursor.advance();
                    self.line += 1;
                }
                Some('*') if self.cursor.peek_next() == Some('/') => {
                    self.cursor.advance();
                    self.cursor.advance();
                    return;
                }
                Some(_) => {
                    self.cursor.advance();
                }
            }
        }
    }

    fn scan_operator_or_delimiter(&mut self, c: char, start: u32, line: u32) -> Token {
        self.cursor.advance();
        let kind = match c {
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            ',' => TokenKind::Comma,
            ':' => TokenKind::Colon,
            ';' => TokenKind::Semicolon,
            '~' => TokenKind::Tilde,
            '.' => {
                if self.cursor.eat('.') {
                    if self.cursor.eat('.') {
                        TokenKind::DotDotDot
                    } else {
                        TokenKind::DotDot
                    }
                } else {
                    TokenKind::Dot
                }
            }
            '?' => {
                if self.cursor.eat('?') {
                    TokenKind::QuestionQuestion
                } else {
                    TokenKind::Question
                }
            }
            '=' => {
                if self.cursor.eat('=') {
                    TokenKind::EqEq
                } else if self.cursor.eat('>') {
                    TokenKind::FatArrow
                } else {
                    TokenKind::Eq
                }
            }
            '!' => {
                if self.cursor.eat('=') {
                    TokenKind::BangEq
                } else {
                    TokenKind::Bang
                }
            }
            '<' => {
                if self.cursor.eat('<') {
                    if self.cursor.eat('=') {
                        TokenKind::LtLtEq
                    } else {
                        TokenKind::LtLt
                    }
                } else if self.cursor.eat('=') {
                    TokenKind::LtEq
                } else {
                    TokenKind::Lt
                }
            }
            '>' => {
                if self.cursor.eat('>') {
                    if self.cursor.eat('=') {
                        TokenKind::GtGtEq
                    } else {
                        TokenKind::GtGt
                    }
                } else if self.cursor.eat('=') {
                    TokenKind::GtEq
                } else {
                    TokenKind::Gt
                }
            }
            '&' => {
                if self.cursor.eat('&') {
                    TokenKind::AmpAmp
                } else if self.cursor.eat('=') {
                    TokenKind::AmpEq
                } else {
                    TokenKind::Amp
                }
            }
            '|' => {
                if self.cursor.eat('|') {
                    TokenKind::PipePipe
                } else if self.cursor.eat('=') {
                    TokenKind::PipeEq
                } else {
                    TokenKind::Pipe
                }
            }
            '^' => {
                if self.cursor.eat('=') {
                    TokenKind::CaretEq
                } else {
                    TokenKind::Caret
                }
            }
            '+' => {
                if self.cursor.eat('+') {
                    TokenKind::PlusPlus
                } else if self.cursor.eat('=') {
                    TokenKind::PlusEq
                } else {
                    TokenKind::Plus
                }
            }
            '-' => {
                if self.cursor.eat('-') {
                    TokenKind::MinusMinus
                } else if self.cursor.eat('=') {
                    TokenKind::MinusEq
                } else if self.cursor.eat('>') {
                    TokenKind::Arrow
                } else {
                    TokenKind::Minus
                }
            }
            '*' => {
                if self.cursor.eat('*') {
                    TokenKind::StarStar
                } else if self.cursor.eat('=') {
                    TokenKind::StarEq
                } else {
                    TokenKind::Star
                }
            }
            '/' => {
                if self.cursor.eat('=') {
                    TokenKind::SlashEq
                } else {
                    TokenKind::Slash
                }
            }
            '%' => {
                if self.cursor.eat('=') {
                    TokenKind::PercentEq
                } else {
                    TokenKind::Percent
                }
            }
            '#' => TokenKind::Hash,
            other => {
                self.push_error(
                    Span::new(start, self.cursor.pos()),
                    ErrorKind::UnexpectedCharacter(other),
                );
                TokenKind::Error
            }
        };
        Token::new(kind, Span::new(start, self.cursor.pos()), line)
    }

    fn scan_ident(&mut self, start: u32, line: u32, interner: &mut Interner) -> Token {
        self.cursor.eat_while(is_ident_continue);
        let text = self.cursor.slice(start, self.cursor.pos());
        let span = Span::new(start, self.cursor.pos());
        if let Some(kind) = keyword_from_str(text) {
            return Token::new(kind, span, line);
        }
        let sym = interner.intern(text);
        Token::with_value(TokenKind::Identifier, span, line, Value::Str(sym))
    }

    fn scan_number(&mut self, start: u32, line: u32) -> Token {
        if self.cursor.peek() == Some('0')
            && matches!(self.cursor.peek_next(), Some('x') | Some('X'))
        {
            self.cursor.advance();
            self.cursor.advance();
            let digits_start = self.cursor.pos();
            self.cursor.eat_while(|c| c.is_ascii_hexdigit());
            let span = Span::new(start, self.cursor.pos());
            if self.cursor.pos() == digits_start {
                let text = self.cursor.slice(start, self.cursor.pos()).to_string();
                self.push_error(span, ErrorKind::InvalidNumberLiteral(text));
                return Token::new(TokenKind::Error, span, line);
            }
            let digits = self.cursor.slice(digits_start, self.cursor.pos());
            return match i64::from_str_radix(digits, 16) {
                Ok(value) => Token::with_value(TokenKind::Number, span, line, Value::Int(value)),
                Err(_) => {
                    let text = self.cursor.slice(start, self.cursor.pos()).to_string();
                    self.push_error(span, ErrorKind::InvalidNumberLiteral(text));
                    Token::new(TokenKind::Error, span, line)
                }
            };
        }

        if self.cursor.peek() == Some('0')
            && matches!(self.cursor.peek_next(), Some('b') | Some('B'))
        {
            self.cursor.advance();
            self.cursor.advance();
            let digits_start = self.cursor.pos();
            self.cursor.eat_while(|c| c == '0' || c == '1');
            let span = Span::new(start, self.cursor.pos());
            if self.cursor.pos() == digits_start {
                let text = self.cursor.slice(start, self.cursor.pos()).to_string();
                self.push_error(span, ErrorKind::InvalidNumberLiteral(text));
                return Token::new(TokenKind::Error, span, line);
            }
            let digits = self.cursor.slice(digits_start, self.cursor.pos());
            return match i64::from_str_radix(digits, 2) {
                Ok(value) => Token::with_value(TokenKind::Number, span, line, Value::Int(value)),
                Err(_) => {
                    let text = self.cursor.slice(start, self.cursor.pos()).to_string();
                    self.push_error(span, ErrorKind::InvalidNumberLiteral(text));
                    Token::new(TokenKind::Error, span, line)
                }
            };
        }

        self.cursor.eat_while(|c| c.is_ascii_digit());
        let mut is_float = false;
        if self.cursor.peek() == Some('.') && self.cursor.peek_next().is_some_and(|c| c.is_ascii_digit())
        {
            is_float = true;
            self.cursor.advance();
            self.cursor.eat_while(|c| c.is_ascii_digit());
        }
        let span = Span::new(start, self.cursor.pos());
        let text = self.cursor.slice(start, self.cursor.pos());
        if is_float {
            match text.parse::<f64>() {
                Ok(value) => Token::with_value(TokenKind::Number, span, line, Value::Number(value)),
                Err(_) => {
                    self.push_error(span, ErrorKind::InvalidNumberLiteral(text.to_string()));
                    Token::new(TokenKind::Error, span, line)
                }
            }
        } else {
            match text.parse::<i64>() {
                Ok(value) => Token::with_value(TokenKind::Number, span, line, Value::Int(value)),
                Err(_) => {
                    self.push_error(span, ErrorKind::InvalidNumberLiteral(text.to_string()));
                    Token::new(TokenKind::Error, span, line)
                }
            }
        }
    }

    // ── String / interpolation scanning ─────────────────────────────────

    fn begin_string(&mut self, interpolated: bool, start: u32, line: u32, interner: &mut Interner) -> Token {
        self.cursor.advance(); // opening quote
        self.state_stack.push(LexerState::InString { interpolated });
        self.scan_string_chunk_from(start, line, interner)
    }

    fn scan_string_chunk(&mut self, interner: &mut Interner) -> Token {
        let start = self.cursor.pos();
        let line = self.line;
        debug_assert!(matches!(
            self.state_stack.last(),
            Some(LexerState::InString { .. })
        ));
        self.scan_string_chunk_from(start, line, interner)
    }

    fn scan_string_chunk_from(&mut self, chunk_start: u32, line: u32, interner: &mut Interner) -> Token {
        let interpolated = matches!(
            self.state_stack.last(),
            Some(LexerState::InString { interpolated: true })
        );
        let mut buf = String::new();
        loop {
            match self.cursor.peek() {
                None => {
                    self.push_error(
                        Span::new(chunk_start, self.cursor.pos()),
                        ErrorKind::UnterminatedString,
                    );
                    self.state_stack.pop();
                    let span = Span::new(chunk_start, self.cursor.pos());
                    return Token::new(TokenKind::Error, span, line);
                }
                Some('"') => {
                    self.cursor.advance();
                    self.state_stack.pop();
                    let span = Span::new(chunk_start, self.cursor.pos());
                    return Token::with_value(
                        TokenKind::String,
                        span,
                        line,
                        Value::Str(interner.intern(&buf)),
                    );
                }
                Some('{') if interpolated => {
                    let depth = self.interpolation_depth();
                    if depth >= self.config.max_interpolation_nesting {
                        self.push_error(
                            Span::new(chunk_start, self.cursor.pos()),
                            ErrorKind::InterpolationNestingTooDeep {
                                limit: self.config.max_interpolation_nesting,
                            },
                        );
                        // Treat the brace as a literal character so scanning
                        // can continue instead of switching modes.
                        buf.push('{');
                        self.cursor.advance();
                        continue;
                    }
                    self.cursor.advance();
                    let span = Span::new(chunk_start, self.cursor.pos());
                    self.state_stack.push(LexerState::InHole { brace_depth: 0 });
                    return Token::with_value(
                        TokenKind::Interpolation,
                        span,
                        line,
                        Value::Str(interner.intern(&buf)),
                    );
                }
                Some('\\') => {
                    self.cursor.advance();
                    match self.scan_escape() {
                        Some(decoded) => buf.push(decoded),
                        None => {}
                    }
                }
                Some('\n') => {
                    buf.push('\n');
                    self.cursor.advance();
                    self.line += 1;
                }
                Some(c) => {
                    buf.push(c);
                    self.cursor.advance();
                }
            }
        }
    }

    /// Decode one escape sequence after the backslash has already been
    /// consumed. Returns `None` (and records a diagnostic) for anything not
    /// in the fixed escape set.
    fn scan_escape(&mut self) -> Option<char> {
        let esc_start = self.cursor.pos();
        let Some(c) = self.cursor.advance() else {
            self.push_error(Span::point(esc_start), ErrorKind::UnterminatedString);
            return None;
        };
        match c {
            '"' => Some('"'),
            '\\' => Some('\\'),
            '0' => Some('\0'),
            '{' => Some('{'),
            'a' => Some('\u{07}'),
            'b' => Some('\u{08}'),
            'f' => Some('\u{0C}'),
            'n' => Some('\n'),
            'r' => Some('\r'),
            't' => Some('\t'),
            'v' => Some('\u{0B}'),
            'e' => Some('\u{1B}'),
            other => {
                self.push_error(
                    Span::new(esc_start, self.cursor.pos()),
                    ErrorKind::InvalidEscapeSequence(other),
                );
                None
            }
        }
    }

}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
