//! Class body parsing: fields, getter/setter accessors, methods, and
//! operator-overload methods.

use ember_common::error::ErrorKind;
use ember_common::interner::Interner;
use ember_common::token::{Token, TokenKind};
use ember_common::value::Value;
use ember_common::Symbol;

use crate::ast::{Node, NodeKind};
use crate::frame::FrameKind;

use super::Parser;

fn symbol_of(tok: &Token, interner: &mut Interner) -> Symbol {
    match &tok.value {
        Some(Value::Str(s)) => *s,
        _ => interner.intern(""),
    }
}

/// An in-progress getter/setter pair for one field name, accumulated while
/// walking the class body so `get x { ... }` and `set x(v) { ... }` can
/// appear in either order (or alone) and still collapse into one
/// `FieldDecl`.
struct PendingAccessor {
    name: Symbol,
    is_static: bool,
    getter: Option<Box<Node>>,
    setter: Option<Box<Node>>,
    setter_param: Option<Symbol>,
    span: ember_common::span::Span,
}

impl<'a> Parser<'a> {
    pub(crate) fn parse_class(&mut self) -> Node {
        let start = self.current().span;
        self.advance(); // 'class'
        let name_tok = self.expect(TokenKind::Identifier, "class name");
        let name = symbol_of(&name_tok, self.interner);

        let parent = if self.eat(TokenKind::Colon) {
            let parent_tok = self.expect(TokenKind::Identifier, "superclass name");
            let parent_sym = symbol_of(&parent_tok, self.interner);
            if parent_sym == name {
                self.error_at(parent_tok.span, ErrorKind::SelfInheritedClass);
            }
            Some(parent_sym)
        } else {
            None
        };

        self.expect(TokenKind::LBrace, "'{'");
        self.eat_newlines();

        let mut members = Vec::new();
        let mut pending: Vec<PendingAccessor> = Vec::new();
        let mut seen_method = false;

        while !self.at(TokenKind::RBrace) && !self.is_eof() {
            let is_static = self.eat(TokenKind::Static);
            if is_static && seen_method {
                self.error(ErrorKind::StaticFieldsAfterMethods);
            }

            match self.kind() {
                TokenKind::Var => {
                    self.advance();
                    let field_tok = self.expect(TokenKind::Identifier, "field name");
                    let field_name = symbol_of(&field_tok, self.interner);
                    self.expect_terminator();
                    members.push(Node::new(
                        field_tok.span,
                        NodeKind::FieldDecl {
                            name: field_name,
                            getter: None,
                            setter: None,
                            setter_param: None,
                            is_static,
                        },
                    ));
                }
                TokenKind::Get => {
                    self.advance();
                    let field_tok = self.expect(TokenKind::Identifier, "getter name");
                    let field_name = symbol_of(&field_tok, self.interner);
                    self.frames.push(if is_static {
                        FrameKind::StaticMethod
                    } else {
                        FrameKind::Method
                    });
                    let body = self.parse_block_statement();
                    self.frames.pop();
                    let span = field_tok.span.merge(body.span);
                    self.upsert_accessor(&mut pending, field_name, is_static, span, Some(Box::new(body)), None, None);
                }
                TokenKind::Set => {
                    self.advance();
                    let field_tok = self.expect(TokenKind::Identifier, "setter name");
                    let field_name = symbol_of(&field_tok, self.interner);
                    self.frames.push(if is_static {
                        FrameKind::StaticMethod
                    } else {
                        FrameKind::Method
                    });
                    let params = self.parse_param_list();
                    let setter_param = params.first().map(|p| p.name);
                    let body = self.parse_block_statement();
                    self.frames.pop();
                    let span = field_tok.span.merge(body.span);
                    self.upsert_accessor(&mut pending, field_name, is_static, span, None, Some(Box::new(body)), setter_param);
                }
                TokenKind::Function => {
                    seen_method = true;
                    self.advance();
                    if self.at(TokenKind::Operator) {
                        members.push(self.parse_operator_method(is_static));
                    } else {
                        members.push(self.parse_method(is_static));
                    }
                }
                _ => {
                    let found = super::describe_token(self.kind());
                    self.error(ErrorKind::ExpectedToken {
                        expected: "a field, accessor, or method".to_string(),
                        found,
                    });
                    self.advance();
                }
            }
            self.eat_newlines();
        }

        for acc in pending {
            if acc.getter.is_none() && acc.setter.is_none() {
                self.error_at(acc.span, ErrorKind::NoGetterAndSetter);
            }
            members.push(Node::new(
                acc.span,
                NodeKind::FieldDecl {
                    name: acc.name,
                    getter: acc.getter,
                    setter: acc.setter,
                    setter_param: acc.setter_param,
                    is_static: acc.is_static,
                },
            ));
        }

        let close = self.expect(TokenKind::RBrace, "'}'");
        Node::new(
            start.merge(close.span),
            NodeKind::ClassDecl { name, parent, members },
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn upsert_accessor(
        &mut self,
        pending: &mut Vec<PendingAccessor>,
        name: Symbol,
        is_static: bool,
        span: ember_common::span::Span,
        getter: Option<Box<Node>>,
        setter: Option<Box<Node>>,
        setter_param: Option<Symbol>,
    ) {
        if let Some(existing) = pending
            .iter_mut()
            .find(|a| a.name == name && a.is_static == is_static)
        {
            existing.span = existing.span.merge(span);
            if getter.is_some() {
                existing.getter = getter;
            }
            if setter.is_some() {
                existing.setter = setter;
                existing.setter_param = setter_param;
            }
        } else {
            pending.push(PendingAccessor {
                name,
                is_static,
                getter,
                setter,
                setter_param,
                span,
            });
        }
    }

    fn parse_method(&mut self, is_static: bool) -> Node {
        let name_tok = self.advance();
        let name = symbol_of(&name_tok, self.interner);
        self.frames.push(if is_static {
            FrameKind::StaticMethod
        } else {
            FrameKind::Method
        });
        let params = self.parse_param_list();
        let body = self.parse_function_body();
        self.frames.pop();
        Node::new(
            name_tok.span.merge(body.span),
            NodeKind::MethodDecl {
                name,
                params,
                body: Box::new(body),
                is_static,
                is_operator: false,
            },
        )
    }

    fn parse_operator_method(&mut self, is_static: bool) -> Node {
        let start = self.current().span;
        self.advance(); // 'operator'
        if is_static {
            self.error_at(start, ErrorKind::StaticOperatorMethod);
        }
        let op_text = self.parse_operator_name();
        let name = self.interner.intern(op_text);
        self.frames.push(FrameKind::Method);
        let params = self.parse_param_list();
        let body = self.parse_function_body();
        self.frames.pop();
        Node::new(
            start.merge(body.span),
            NodeKind::MethodDecl {
                name,
                params,
                body: Box::new(body),
                is_static: false,
                is_operator: true,
            },
        )
    }

    fn parse_operator_name(&mut self) -> &'static str {
        if self.at(TokenKind::LBracket) && self.nth_kind(1) == TokenKind::RBracket {
            self.advance();
            self.advance();
            return "[]";
        }
        let kind = self.kind();
        let text = operator_text(kind);
        if text.is_empty() {
            let found = super::describe_token(kind);
            self.error(ErrorKind::ExpectedToken {
                expected: "an overloadable operator".to_string(),
                found,
            });
        } else {
            self.advance();
        }
        text
    }
}

fn operator_text(kind: TokenKind) -> &'static str {
    use TokenKind::*;
    match kind {
        Plus => "+",
        Minus => "-",
        Star => "*",
        Slash => "/",
        Percent => "%",
        StarStar => "**",
        EqEq => "==",
        BangEq => "!=",
        Lt => "<",
        LtEq => "<=",
        Gt => ">",
        GtEq => ">=",
        Amp => "&",
        Pipe => "|",
        Caret => "^",
        LtLt => "<<",
        GtGt => ">>",
        Bang => "!",
        Tilde => "~",
        _ => "",
    }
}
