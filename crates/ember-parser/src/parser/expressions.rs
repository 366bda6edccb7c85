//! Pratt (precedence-climbing) expression parsing.
//!
//! `parse_precedence` is the core loop: parse one prefix expression, then
//! keep folding in infix/postfix operators whose binding power is at least
//! `min_prec`. Call chains (`f(x).y[0]`) fall out for free because `.`, `(`,
//! and `[` all sit at `Precedence::Call` and the loop just keeps going.

use ember_common::error::ErrorKind;
use ember_common::token::TokenKind;
use ember_common::value::Value;

use crate::ast::{BinaryOp, Node, NodeKind, Param, UnaryOp};
use crate::frame::FrameKind;
use crate::rules::{rule_for, Precedence};

use super::{describe_token, Parser};

impl<'a> Parser<'a> {
    pub fn parse_expression(&mut self) -> Node {
        self.parse_precedence(Precedence::Assignment)
    }

    pub(crate) fn parse_precedence(&mut self, min_prec: Precedence) -> Node {
        let mut left = self.parse_prefix();
        loop {
            let rule = rule_for(self.kind());
            if !rule.infix || rule.precedence < min_prec {
                break;
            }
            left = self.parse_infix(left, rule.precedence);
        }
        left
    }

    fn parse_prefix(&mut self) -> Node {
        let tok = self.current().clone();
        match tok.kind {
            TokenKind::Number => {
                self.advance();
                Node::new(tok.span, NodeKind::Literal(tok.value.unwrap_or(Value::Null)))
            }
            TokenKind::String => {
                self.advance();
                Node::new(tok.span, NodeKind::Literal(tok.value.unwrap_or(Value::Null)))
            }
            TokenKind::Interpolation => self.parse_interpolation(),
            TokenKind::True => {
                self.advance();
                Node::new(tok.span, NodeKind::Literal(Value::Bool(true)))
            }
            TokenKind::False => {
                self.advance();
                Node::new(tok.span, NodeKind::Literal(Value::Bool(false)))
            }
            TokenKind::Null => {
                self.advance();
                Node::new(tok.span, NodeKind::Literal(Value::Null))
            }
            TokenKind::Identifier => {
                self.advance();
                let sym = match tok.value {
                    Some(Value::Str(s)) => s,
                    _ => unreachable!("identifier token always carries its interned symbol"),
                };
                Node::new(tok.span, NodeKind::Variable(sym))
            }
            TokenKind::This => {
                self.advance();
                if !self.frames.in_method() {
                    self.error_at(tok.span, ErrorKind::ThisOutsideMethod);
                }
                Node::new(tok.span, NodeKind::This)
            }
            TokenKind::Super => {
                self.advance();
                if !self.frames.in_method() {
                    self.error_at(tok.span, ErrorKind::SuperOutsideMethod);
                }
                let ignore_result = if self.at(TokenKind::Arrow) {
                    self.advance();
                    true
                } else {
                    self.expect(TokenKind::Dot, "'.'");
                    false
                };
                let name_tok = self.expect(TokenKind::Identifier, "method name");
                let method = match name_tok.value {
                    Some(Value::Str(s)) => s,
                    _ => self.interner.intern(""),
                };
                Node::new(tok.span, NodeKind::Super { method, ignore_result })
            }
            TokenKind::Minus => {
                self.advance();
                let right = self.parse_precedence(Precedence::Unary);
                Node::new(
                    tok.span.merge(right.span),
                    NodeKind::Unary {
                        right: Box::new(right),
                        op: UnaryOp::Neg,
                    },
                )
            }
            TokenKind::Bang => {
                self.advance();
                let right = self.parse_precedence(Precedence::Unary);
                Node::new(
                    tok.span.merge(right.span),
                    NodeKind::Unary {
                        right: Box::new(right),
                        op: UnaryOp::Not,
                    },
                )
            }
            TokenKind::Tilde => {
                self.advance();
                let right = self.parse_precedence(Precedence::Unary);
                Node::new(
                    tok.span.merge(right.span),
                    NodeKind::Unary {
                        right: Box::new(right),
                        op: UnaryOp::BNot,
                    },
                )
            }
            TokenKind::Hash => {
                self.advance();
                let right = self.parse_precedence(Precedence::Unary);
                Node::new(
                    tok.span.merge(right.span),
                    NodeKind::Unary {
                        right: Box::new(right),
                        op: UnaryOp::Len,
                    },
                )
            }
            TokenKind::Ref => {
                self.advance();
                let right = self.parse_precedence(Precedence::Unary);
                Node::new(
                    tok.span.merge(right.span),
                    NodeKind::Reference(Box::new(right)),
                )
            }
            TokenKind::LParen => self.parse_paren_or_lambda(),
            TokenKind::LBracket => self.parse_array_literal(),
            TokenKind::LBrace => self.parse_object_literal(),
            TokenKind::Function => self.parse_lambda_keyword(),
            TokenKind::New => self.parse_new(),
            _ => {
                let found = describe_token(tok.kind);
                self.error_at(tok.span, ErrorKind::ExpectedExpression { found });
                self.advance();
                Node::new(tok.span, NodeKind::Literal(Value::Null))
            }
        }
    }

    fn parse_infix(&mut self, left: Node, precedence: Precedence) -> Node {
        let tok = self.current().clone();
        match tok.kind {
            TokenKind::Dot | TokenKind::Arrow => self.parse_get(left),
            TokenKind::LParen => self.parse_call(left),
            TokenKind::LBracket => self.parse_subscript(left),
            TokenKind::Eq => self.parse_assign(left),
            TokenKind::PlusEq
            | TokenKind::MinusEq
            | TokenKind::StarEq
            | TokenKind::SlashEq
            | TokenKind::PercentEq
            | TokenKind::AmpEq
            | TokenKind::PipeEq
            | TokenKind::CaretEq
            | TokenKind::LtLtEq
            | TokenKind::GtGtEq => self.parse_compound_assign(left),
            TokenKind::PlusPlus | TokenKind::MinusMinus => self.parse_increment(left),
            TokenKind::Question => self.parse_ternary(left),
            TokenKind::DotDot | TokenKind::DotDotDot => self.parse_range(left),
            TokenKind::StarStar => {
                self.advance();
                // right-associative: rhs parsed at the same precedence
                let right = self.parse_precedence(Precedence::Factor);
                Node::new(
                    left.span.merge(right.span),
                    NodeKind::Binary {
                        left: Box::new(left),
                        right: Box::new(right),
                        op: BinaryOp::Pow,
                        ignore_left: false,
                    },
                )
            }
            _ => self.parse_binary(left, precedence),
        }
    }

    fn parse_binary(&mut self, left: Node, precedence: Precedence) -> Node {
        let tok = self.advance();
        let op = binary_op_for(tok.kind).expect("parse_infix only dispatches known operators");
        let right = self.parse_precedence(precedence.next());
        Node::new(
            left.span.merge(right.span),
            NodeKind::Binary {
                left: Box::new(left),
                right: Box::new(right),
                op,
                ignore_left: false,
            },
        )
    }

    fn parse_range(&mut self, left: Node) -> Node {
        self.advance();
        let right = self.parse_precedence(Precedence::Range.next());
        Node::new(
            left.span.merge(right.span),
            NodeKind::Range {
                from: Box::new(left),
                to: Box::new(right),
            },
        )
    }

    fn parse_ternary(&mut self, cond: Node) -> Node {
        self.advance(); // '?'
        if self.at_any(&[TokenKind::Dot, TokenKind::Arrow]) {
            let ignore_result = self.at(TokenKind::Arrow);
            self.advance();
            let name_tok = self.expect(TokenKind::Identifier, "field or method name");
            let name = match name_tok.value {
                Some(Value::Str(s)) => s,
                _ => self.interner.intern(""),
            };
            return Node::new(
                cond.span.merge(name_tok.span),
                NodeKind::Get {
                    receiver: Box::new(cond),
                    name,
                    jump: 0,
                    ignore_emit: false,
                    ignore_result,
                },
            );
        }
        let then_branch = self.parse_precedence(Precedence::Assignment);
        self.expect(TokenKind::Colon, "':'");
        let else_branch = self.parse_precedence(Precedence::Assignment);
        Node::new(
            cond.span.merge(else_branch.span),
            NodeKind::Ternary {
                cond: Box::new(cond),
                then_branch: Box::new(then_branch),
                else_branch: Box::new(else_branch),
            },
        )
    }

    fn parse_get(&mut self, receiver: Node) -> Node {
        let ignore_result = self.at(TokenKind::Arrow);
        self.advance(); // '.' or '->'
        let name_tok = self.expect(TokenKind::Identifier, "field or method name");
        let name = match name_tok.value {
            Some(Value::Str(s)) => s,
            _ => self.interner.intern(""),
        };
        Node::new(
            receiver.span.merge(name_tok.span),
            NodeKind::Get {
                receiver: Box::new(receiver),
                name,
                jump: -1,
                ignore_emit: false,
                ignore_result,
            },
        )
    }

    fn parse_call(&mut self, callee: Node) -> Node {
        let args = self.parse_arg_list();
        let end = self.prev_span();
        Node::new(
            callee.span.merge(end),
            NodeKind::Call {
                callee: Box::new(callee),
                args,
                objexpr: None,
            },
        )
    }

    pub(crate) fn parse_arg_list(&mut self) -> Vec<Node> {
        self.expect(TokenKind::LParen, "'('");
        self.eat_newlines();
        let mut args = Vec::new();
        const MAX_ARGS: usize = 255;
        if !self.at(TokenKind::RParen) {
            loop {
                if args.len() >= MAX_ARGS {
                    self.error(ErrorKind::TooManyArguments { limit: MAX_ARGS });
                }
                args.push(self.parse_expression());
                self.eat_newlines();
                if !self.eat(TokenKind::Comma) {
                    break;
                }
                self.eat_newlines();
            }
        }
        self.eat_newlines();
        self.expect(TokenKind::RParen, "')'");
        args
    }

    fn parse_subscript(&mut self, array: Node) -> Node {
        self.advance(); // '['
        let index = self.parse_expression();
        let close = self.expect(TokenKind::RBracket, "']'");
        Node::new(
            array.span.merge(close.span),
            NodeKind::Subscript {
                array: Box::new(array),
                index: Box::new(index),
            },
        )
    }

    fn parse_assign(&mut self, target: Node) -> Node {
        self.advance(); // '='
        let value = self.parse_precedence(Precedence::Assignment);
        self.build_assignment(target, value)
    }

    fn build_assignment(&mut self, target: Node, value: Node) -> Node {
        let span = target.span.merge(value.span);
        match target.kind {
            NodeKind::Get { ignore_result: true, .. } => {
                self.error_at(target.span, ErrorKind::InvalidAssignmentTarget);
                target
            }
            NodeKind::Get { receiver, name, .. } => Node::new(
                span,
                NodeKind::Set {
                    receiver,
                    name,
                    value: Box::new(value),
                },
            ),
            NodeKind::Variable(_) | NodeKind::Subscript { .. } => Node::new(
                span,
                NodeKind::Assign {
                    target: Box::new(target),
                    value: Box::new(value),
                },
            ),
            _ => {
                self.error_at(target.span, ErrorKind::InvalidAssignmentTarget);
                target
            }
        }
    }

    fn parse_compound_assign(&mut self, target: Node) -> Node {
        let tok = self.advance();
        let op = compound_op_for(tok.kind).expect("dispatch guarantees a compound-assign token");
        let rhs = self.parse_precedence(Precedence::Assignment);
        let desugared_binary = Node::new(
            target.span.merge(rhs.span),
            NodeKind::Binary {
                left: Box::new(target.clone()),
                right: Box::new(rhs),
                op,
                ignore_left: true,
            },
        );
        self.build_assignment(target, desugared_binary)
    }

    /// Desugar `x++` / `x--` to `x = x + 1` / `x = x - 1`.
    fn parse_increment(&mut self, target: Node) -> Node {
        let tok = self.advance();
        let op = if tok.kind == TokenKind::PlusPlus {
            BinaryOp::Add
        } else {
            BinaryOp::Sub
        };
        let one = Node::new(tok.span, NodeKind::Literal(Value::Int(1)));
        let desugared_binary = Node::new(
            target.span.merge(tok.span),
            NodeKind::Binary {
                left: Box::new(target.clone()),
                right: Box::new(one),
                op,
                ignore_left: true,
            },
        );
        self.build_assignment(target, desugared_binary)
    }

    fn parse_interpolation(&mut self) -> Node {
        let start = self.current().span;
        let mut parts = Vec::new();
        loop {
            let tok = self.advance();
            let text = match tok.value {
                Some(Value::Str(s)) => s,
                _ => self.interner.intern(""),
            };
            parts.push(Node::new(tok.span, NodeKind::Literal(Value::Str(text))));
            if tok.kind == TokenKind::String {
                break;
            }
            let expr = self.parse_expression();
            parts.push(expr);
            if !self.at(TokenKind::Interpolation) && !self.at(TokenKind::String) {
                let found = describe_token(self.kind());
                self.error(ErrorKind::ExpectedToken {
                    expected: "string continuation".to_string(),
                    found,
                });
                break;
            }
        }
        let end = parts.last().map(|n| n.span).unwrap_or(start);
        Node::new(start.merge(end), NodeKind::Interpolation(parts))
    }

    fn parse_array_literal(&mut self) -> Node {
        let start = self.current().span;
        self.advance(); // '['
        self.eat_newlines();
        let mut elements = Vec::new();
        if !self.at(TokenKind::RBracket) {
            loop {
                elements.push(self.parse_expression());
                self.eat_newlines();
                if !self.eat(TokenKind::Comma) {
                    break;
                }
                self.eat_newlines();
            }
        }
        self.eat_newlines();
        let close = self.expect(TokenKind::RBracket, "']'");
        Node::new(start.merge(close.span), NodeKind::Array(elements))
    }

    fn parse_object_literal(&mut self) -> Node {
        let start = self.current().span;
        self.advance(); // '{'
        self.eat_newlines();
        let mut keys = Vec::new();
        let mut values = Vec::new();
        if !self.at(TokenKind::RBrace) {
            loop {
                let key_tok = self.expect(TokenKind::Identifier, "object key");
                let key = match key_tok.value {
                    Some(Value::Str(s)) => s,
                    _ => self.interner.intern(""),
                };
                self.expect(TokenKind::Eq, "'='");
                let value = self.parse_expression();
                keys.push(key);
                values.push(value);
                self.eat_newlines();
                if !self.eat(TokenKind::Comma) {
                    break;
                }
                self.eat_newlines();
            }
        }
        self.eat_newlines();
        let close = self.expect(TokenKind::RBrace, "'}'");
        Node::new(start.merge(close.span), NodeKind::Object { keys, values })
    }

    fn parse_new(&mut self) -> Node {
        let start = self.current().span;
        self.advance(); // 'new'
        let name_tok = self.expect(TokenKind::Identifier, "class name");
        let name = match name_tok.value {
            Some(Value::Str(s)) => s,
            _ => self.interner.intern(""),
        };
        let callee = Node::new(name_tok.span, NodeKind::Variable(name));

        let had_args = self.at(TokenKind::LParen);
        let args = if had_args {
            self.parse_arg_list()
        } else {
            Vec::new()
        };

        let objexpr = if self.at(TokenKind::LBrace) {
            Some(Box::new(self.parse_object_literal()))
        } else {
            None
        };

        if !had_args && objexpr.is_none() {
            let found = describe_token(self.kind());
            self.error(ErrorKind::ExpectedToken {
                expected: "argument list for instance creation".to_string(),
                found,
            });
        }

        let end = objexpr
            .as_ref()
            .map(|o| o.span)
            .unwrap_or_else(|| if had_args { self.prev_span() } else { callee.span });
        Node::new(
            start.merge(end),
            NodeKind::Call {
                callee: Box::new(callee),
                args,
                objexpr,
            },
        )
    }

    /// Decide whether `(` opens a parenthesized expression or a lambda's
    /// parameter list, by scanning ahead (without mutating parser state)
    /// for the matching `)` and checking what follows it.
    fn looks_like_lambda(&self) -> bool {
        let mut depth = 0i32;
        let mut i = 0usize;
        loop {
            let k = self.nth_kind(i);
            match k {
                TokenKind::LParen => depth += 1,
                TokenKind::RParen => {
                    depth -= 1;
                    if depth == 0 {
                        let after = self.nth_kind(i + 1);
                        return after == TokenKind::FatArrow;
                    }
                }
                TokenKind::Eof => return false,
                _ => {}
            }
            i += 1;
        }
    }

    fn parse_paren_or_lambda(&mut self) -> Node {
        if self.looks_like_lambda() {
            return self.parse_lambda_params_and_body();
        }
        let start = self.current().span;
        self.advance(); // '('
        let inner = self.parse_expression();
        let close = self.expect(TokenKind::RParen, "')'");
        inner.with_span(start.merge(close.span))
    }

    fn parse_lambda_keyword(&mut self) -> Node {
        self.advance(); // 'function'
        self.parse_lambda_params_and_body()
    }

    fn parse_lambda_params_and_body(&mut self) -> Node {
        let start = self.current().span;
        let params = self.parse_param_list();
        self.frames.push(FrameKind::Lambda);
        let body = self.parse_function_body();
        self.frames.pop();
        let span = start.merge(body.span);
        Node::new(span, NodeKind::Lambda { params, body: Box::new(body) })
    }

    pub(crate) fn parse_param_list(&mut self) -> Vec<Param> {
        self.expect(TokenKind::LParen, "'('");
        self.eat_newlines();
        let mut params = Vec::new();
        const MAX_PARAMS: usize = 255;
        let mut seen_default = false;
        if !self.at(TokenKind::RParen) {
            loop {
                if params.len() >= MAX_PARAMS {
                    self.error(ErrorKind::TooManyParameters { limit: MAX_PARAMS });
                }
                let variadic = self.eat(TokenKind::DotDotDot);
                let name_tok = self.expect(TokenKind::Identifier, "parameter name");
                let name = match name_tok.value {
                    Some(Value::Str(s)) => s,
                    _ => self.interner.intern(""),
                };
                if params.iter().any(|p: &Param| p.name == name) {
                    self.error_at(
                        name_tok.span,
                        ErrorKind::DuplicateParameterName(self.interner.resolve(name).to_string()),
                    );
                }
                let default = if self.eat(TokenKind::Eq) {
                    Some(Box::new(self.parse_expression()))
                } else {
                    None
                };
                if default.is_some() {
                    seen_default = true;
                } else if seen_default && !variadic {
                    self.error_at(name_tok.span, ErrorKind::DefaultArgNotTrailing);
                }
                params.push(Param { name, default, variadic });
                if variadic {
                    break;
                }
                self.eat_newlines();
                if !self.eat(TokenKind::Comma) {
                    break;
                }
                self.eat_newlines();
            }
        }
        self.eat_newlines();
        self.expect(TokenKind::RParen, "')'");
        params
    }
}

impl Node {
    fn with_span(mut self, span: ember_common::span::Span) -> Node {
        self.span = span;
        self
    }
}

fn binary_op_for(kind: TokenKind) -> Option<BinaryOp> {
    use TokenKind::*;
    Some(match kind {
        Plus => BinaryOp::Add,
        Minus => BinaryOp::Sub,
        Star => BinaryOp::Mul,
        Slash => BinaryOp::Div,
        Percent => BinaryOp::Mod,
        EqEq => BinaryOp::Eq,
        BangEq => BinaryOp::NotEq,
        Lt => BinaryOp::Lt,
        LtEq => BinaryOp::LtEq,
        Gt => BinaryOp::Gt,
        GtEq => BinaryOp::GtEq,
        AmpAmp => BinaryOp::And,
        PipePipe => BinaryOp::Or,
        QuestionQuestion => BinaryOp::NullCoalesce,
        Amp => BinaryOp::BAnd,
        Pipe => BinaryOp::BOr,
        Caret => BinaryOp::BXor,
        LtLt => BinaryOp::Shl,
        GtGt => BinaryOp::Shr,
        Is => BinaryOp::Is,
        _ => return None,
    })
}

fn compound_op_for(kind: TokenKind) -> Option<BinaryOp> {
    use TokenKind::*;
    Some(match kind {
        PlusEq => BinaryOp::Add,
        MinusEq => BinaryOp::Sub,
        StarEq => BinaryOp::Mul,
        SlashEq => BinaryOp::Div,
        PercentEq => BinaryOp::Mod,
        AmpEq => BinaryOp::BAnd,
        PipeEq => BinaryOp::BOr,
        CaretEq => BinaryOp::BXor,
        LtLtEq => BinaryOp::Shl,
        GtGtEq => BinaryOp::Shr,
        _ => return None,
    })
}
