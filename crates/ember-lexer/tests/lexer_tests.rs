use ember_common::interner::Interner;
use ember_common::token::TokenKind;
use ember_common::value::Value;
use ember_lexer::{Lexer, LexerConfig};

fn kinds(source: &str) -> Vec<TokenKind> {
    let mut interner = Interner::new();
    let (tokens, _) = Lexer::tokenize(source, &mut interner);
    tokens.into_iter().map(|t| t.kind).collect()
}

#[test]
fn scans_simple_arithmetic() {
    let kinds = kinds("1 + 2 * 3");
    assert_eq!(
        kinds,
        vec![
            TokenKind::Number,
            TokenKind::Plus,
            TokenKind::Number,
            TokenKind::Star,
            TokenKind::Number,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn scans_keywords_and_identifiers() {
    let kinds = kinds("var x = function");
    assert_eq!(
        kinds,
        vec![
            TokenKind::Var,
            TokenKind::Identifier,
            TokenKind::Eq,
            TokenKind::Function,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn scans_hex_and_binary_literals() {
    let mut interner = Interner::new();
    let (tokens, diags) = Lexer::tokenize("0xFF 0b1010", &mut interner);
    assert!(diags.is_empty());
    assert_eq!(tokens[0].value, Some(Value::Int(255)));
    assert_eq!(tokens[1].value, Some(Value::Int(10)));
}

#[test]
fn hex_literal_overflow_reports_error() {
    let mut interner = Interner::new();
    let (tokens, diags) = Lexer::tokenize("0xFFFFFFFFFFFFFFFFF", &mut interner);
    assert_eq!(tokens[0].kind, TokenKind::Error);
    assert!(diags
        .iter()
        .any(|d| matches!(d.kind, ember_common::error::ErrorKind::InvalidNumberLiteral(_))));
}

#[test]
fn binary_literal_overflow_reports_error() {
    let mut interner = Interner::new();
    let digits = "0b".to_string() + &"1".repeat(100);
    let (tokens, diags) = Lexer::tokenize(&digits, &mut interner);
    assert_eq!(tokens[0].kind, TokenKind::Error);
    assert!(diags
        .iter()
        .any(|d| matches!(d.kind, ember_common::error::ErrorKind::InvalidNumberLiteral(_))));
}

#[test]
fn scans_float_literal() {
    let mut interner = Interner::new();
    let (tokens, _) = Lexer::tokenize("3.5", &mut interner);
    assert_eq!(tokens[0].value, Some(Value::Number(3.5)));
}

#[test]
fn plain_string_has_no_interpolation() {
    let kinds = kinds("\"hello world\"");
    assert_eq!(kinds, vec![TokenKind::String, TokenKind::Eof]);
}

#[test]
fn unterminated_string_reports_error() {
    let mut interner = Interner::new();
    let (tokens, diags) = Lexer::tokenize("\"oops", &mut interner);
    assert_eq!(tokens[0].kind, TokenKind::Error);
    assert_eq!(diags.len(), 1);
}

#[test]
fn interpolated_string_splits_into_chunks() {
    let kinds = kinds("$\"sum: {1 + 2}!\"");
    assert_eq!(
        kinds,
        vec![
            TokenKind::Interpolation,
            TokenKind::Number,
            TokenKind::Plus,
            TokenKind::Number,
            TokenKind::String,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn interpolation_hole_can_contain_nested_braces() {
    // the object literal's braces inside the hole must not be mistaken for
    // the hole's own closing brace
    let kinds = kinds("$\"{ {a: 1}.a }\"");
    assert_eq!(
        kinds,
        vec![
            TokenKind::Interpolation,
            TokenKind::LBrace,
            TokenKind::Identifier,
            TokenKind::Colon,
            TokenKind::Number,
            TokenKind::RBrace,
            TokenKind::Dot,
            TokenKind::Identifier,
            TokenKind::String,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn nested_interpolation_beyond_limit_is_reported() {
    let mut interner = Interner::new();
    let config = LexerConfig {
        max_interpolation_nesting: 1,
    };
    // one level is fine, a second nested nested interpolated string is not
    let source = "$\"a {$\"b {1}\"}\"";
    let (_, diags) = Lexer::tokenize_with_config(source, &mut interner, config);
    assert!(diags
        .iter()
        .any(|d| matches!(d.kind, ember_common::error::ErrorKind::InterpolationNestingTooDeep { .. })));
}

#[test]
fn unmatched_interpolation_brace_at_eof_is_reported() {
    let mut interner = Interner::new();
    let (tokens, diags) = Lexer::tokenize("$\"a {1 + 2", &mut interner);
    assert_eq!(tokens.last().unwrap().kind, TokenKind::Eof);
    assert!(diags
        .iter()
        .any(|d| matches!(d.kind, ember_common::error::ErrorKind::UnmatchedInterpolationBrace)));
}

#[test]
fn skips_line_and_block_comments() {
    let kinds = kinds("1 // comment\n/* block */ 2");
    assert_eq!(
        kinds,
        vec![
            TokenKind::Number,
            TokenKind::NewLine,
            TokenKind::Number,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn unterminated_block_comment_reports_error() {
    let mut interner = Interner::new();
    let (_, diags) = Lexer::tokenize("/* never closes", &mut interner);
    assert_eq!(diags.len(), 1);
}

#[test]
fn compound_assignment_operators() {
    let kinds = kinds("x += 1 <<= 2");
    assert_eq!(
        kinds,
        vec![
            TokenKind::Identifier,
            TokenKind::PlusEq,
            TokenKind::Number,
            TokenKind::LtLtEq,
            TokenKind::Number,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn unexpected_character_reports_error() {
    let mut interner = Interner::new();
    let (tokens, diags) = Lexer::tokenize("@", &mut interner);
    assert_eq!(tokens[0].kind, TokenKind::Error);
    assert_eq!(diags.len(), 1);
}
