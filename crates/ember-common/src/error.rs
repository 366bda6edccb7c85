use std::fmt;

use crate::span::Span;

/// A single lexical or syntactic problem found while processing a source
/// unit.
///
/// Lexer and parser both produce these through the same type so the CLI can
/// collect and sort one combined diagnostics list instead of juggling two
/// error enums.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub span: Span,
    pub kind: ErrorKind,
}

impl Diagnostic {
    pub fn new(span: Span, kind: ErrorKind) -> Self {
        Self { span, kind }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

impl std::error::Error for Diagnostic {}

/// Every distinct lexical or syntactic error the front end can report.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorKind {
    // ── Lexical ──────────────────────────────────────────────────────────
    UnexpectedCharacter(char),
    UnterminatedString,
    UnterminatedBlockComment,
    InvalidEscapeSequence(char),
    InvalidNumberLiteral(String),
    InterpolationNestingTooDeep { limit: u32 },
    UnmatchedInterpolationBrace,

    // ── Syntactic ────────────────────────────────────────────────────────
    ExpectedToken { expected: String, found: String },
    ExpectedExpression { found: String },
    InvalidAssignmentTarget,
    TooManyArguments { limit: usize },
    TooManyParameters { limit: usize },
    MultipleElseBranches,
    MissingLoopVariable,
    NoGetterAndSetter,
    SelfInheritedClass,
    StaticFieldsAfterMethods,
    StaticOperatorMethod,
    DuplicateParameterName(String),
    DefaultArgNotTrailing,
    BreakOutsideLoop,
    ContinueOutsideLoop,
    ReturnOutsideFunction,
    ThisOutsideMethod,
    SuperOutsideMethod,

    /// Catch-all for recovery-path messages that don't warrant their own
    /// variant (e.g. a synchronization notice).
    Other(String),
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::UnexpectedCharacter(c) => write!(f, "unexpected character '{c}'"),
            ErrorKind::UnterminatedString => write!(f, "unterminated string literal"),
            ErrorKind::UnterminatedBlockComment => write!(f, "unterminated block comment"),
            ErrorKind::InvalidEscapeSequence(c) => write!(f, "invalid escape sequence '\\{c}'"),
            ErrorKind::InvalidNumberLiteral(text) => write!(f, "invalid number literal '{text}'"),
            ErrorKind::InterpolationNestingTooDeep { limit } => {
                write!(f, "string interpolation nested more than {limit} levels deep")
            }
            ErrorKind::UnmatchedInterpolationBrace => {
                write!(f, "unmatched '}}' inside string interpolation")
            }
            ErrorKind::ExpectedToken { expected, found } => {
                write!(f, "expected {expected}, found {found}")
            }
            ErrorKind::ExpectedExpression { found } => {
                write!(f, "expected expression, found {found}")
            }
            ErrorKind::InvalidAssignmentTarget => write!(f, "invalid assignment target"),
            ErrorKind::TooManyArguments { limit } => {
                write!(f, "cannot have more than {limit} arguments")
            }
            ErrorKind::TooManyParameters { limit } => {
                write!(f, "cannot have more than {limit} parameters")
            }
            ErrorKind::MultipleElseBranches => write!(f, "cannot have more than one else branch"),
            ErrorKind::MissingLoopVariable => write!(f, "expected variable name in for-in loop"),
            ErrorKind::NoGetterAndSetter => {
                write!(f, "field must have at least a getter or a setter")
            }
            ErrorKind::SelfInheritedClass => write!(f, "a class cannot inherit from itself"),
            ErrorKind::StaticFieldsAfterMethods => {
                write!(f, "static fields must be declared before methods")
            }
            ErrorKind::StaticOperatorMethod => write!(f, "operator methods cannot be static"),
            ErrorKind::DuplicateParameterName(name) => {
                write!(f, "duplicate parameter name '{name}'")
            }
            ErrorKind::DefaultArgNotTrailing => {
                write!(f, "a parameter without a default cannot follow one that has a default")
            }
            ErrorKind::BreakOutsideLoop => write!(f, "cannot use 'break' outside of a loop"),
            ErrorKind::ContinueOutsideLoop => write!(f, "cannot use 'continue' outside of a loop"),
            ErrorKind::ReturnOutsideFunction => {
                write!(f, "cannot return from outside a function")
            }
            ErrorKind::ThisOutsideMethod => write!(f, "cannot use 'this' outside of a method"),
            ErrorKind::SuperOutsideMethod => write!(f, "cannot use 'super' outside of a method"),
            ErrorKind::Other(message) => write!(f, "{message}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostic_displays_its_kind() {
        let diag = Diagnostic::new(Span::new(0, 1), ErrorKind::UnterminatedString);
        assert_eq!(diag.to_string(), "unterminated string literal");
    }

    #[test]
    fn expected_token_message_includes_both_sides() {
        let kind = ErrorKind::ExpectedToken {
            expected: "';'".to_string(),
            found: "'if'".to_string(),
        };
        assert_eq!(kind.to_string(), "expected ';', found 'if'");
    }
}
