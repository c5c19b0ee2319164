//! Expression productions: assignment, ternary, precedence climbing over the
//! binary operators, then unary, postfix and primary forms.

use crate::{ParseError, Parser};
use kite_ir::ast::{
    Access, BinaryOp, Expr, ExprKind, ExprRange, FieldInit, FieldRange, UnaryOp, UpdateOp,
};
use kite_ir::{ExprId, Span, TokenKind, TypeTag};

/// Binding power of an infix token, higher binds tighter.
fn infix_op(kind: TokenKind) -> Option<(BinaryOp, u8)> {
    let entry = match kind {
        TokenKind::OrOr => (BinaryOp::Or, 1),
        TokenKind::AndAnd => (BinaryOp::And, 2),
        TokenKind::Pipe => (BinaryOp::BitOr, 3),
        TokenKind::Caret => (BinaryOp::BitXor, 4),
        TokenKind::Amp => (BinaryOp::BitAnd, 5),
        TokenKind::EqEq => (BinaryOp::Eq, 6),
        TokenKind::NotEq => (BinaryOp::NotEq, 6),
        TokenKind::Lt => (BinaryOp::Lt, 7),
        TokenKind::LtEq => (BinaryOp::LtEq, 7),
        TokenKind::Gt => (BinaryOp::Gt, 7),
        TokenKind::GtEq => (BinaryOp::GtEq, 7),
        TokenKind::Shl => (BinaryOp::Shl, 8),
        TokenKind::Shr => (BinaryOp::Shr, 8),
        TokenKind::Plus => (BinaryOp::Add, 9),
        TokenKind::Minus => (BinaryOp::Sub, 9),
        TokenKind::Star => (BinaryOp::Mul, 10),
        TokenKind::Slash => (BinaryOp::Div, 10),
        TokenKind::Percent => (BinaryOp::Mod, 10),
        _ => return None,
    };
    Some(entry)
}

/// `None` for plain `=`, the operator for compound forms.
fn assign_op(kind: TokenKind) -> Option<Option<BinaryOp>> {
    let op = match kind {
        TokenKind::Eq => None,
        TokenKind::PlusEq => Some(BinaryOp::Add),
        TokenKind::MinusEq => Some(BinaryOp::Sub),
        TokenKind::StarEq => Some(BinaryOp::Mul),
        TokenKind::SlashEq => Some(BinaryOp::Div),
        TokenKind::PercentEq => Some(BinaryOp::Mod),
        TokenKind::AmpEq => Some(BinaryOp::BitAnd),
        TokenKind::PipeEq => Some(BinaryOp::BitOr),
        TokenKind::CaretEq => Some(BinaryOp::BitXor),
        TokenKind::ShlEq => Some(BinaryOp::Shl),
        TokenKind::ShrEq => Some(BinaryOp::Shr),
        _ => return None,
    };
    Some(op)
}

impl Parser<'_> {
    pub(crate) fn parse_expr(&mut self) -> Result<ExprId, ParseError> {
        self.nested(Self::parse_assignment)
    }

    fn alloc(&mut self, kind: ExprKind, span: Span) -> ExprId {
        self.arena.alloc_expr(Expr::new(kind, span))
    }

    fn is_place(&self, id: ExprId) -> bool {
        self.arena.expr(id).kind.is_place()
    }

    pub(crate) fn parse_paren_expr(&mut self) -> Result<ExprId, ParseError> {
        self.cursor.expect(TokenKind::LParen)?;
        let expr = self.parse_expr()?;
        self.cursor.expect(TokenKind::RParen)?;
        Ok(expr)
    }

    fn parse_assignment(&mut self) -> Result<ExprId, ParseError> {
        let start = self.cursor.span();
        let target = self.parse_ternary()?;
        let Some(op) = assign_op(self.cursor.kind()) else {
            return Ok(target);
        };
        if !self.is_place(target) {
            return Err(ParseError::InvalidTarget {
                what: "assignment",
                span: self.arena.expr(target).span,
            });
        }
        self.cursor.advance();
        // Right-associative: `a = b = c`.
        let value = self.parse_expr()?;
        let span = self.cursor.span_from(start);
        Ok(self.alloc(ExprKind::Assign { target, op, value }, span))
    }

    fn parse_ternary(&mut self) -> Result<ExprId, ParseError> {
        let start = self.cursor.span();
        let cond = self.parse_binary(1)?;
        if !self.cursor.eat(TokenKind::Question) {
            return Ok(cond);
        }
        let then_expr = self.parse_expr()?;
        self.cursor.expect(TokenKind::Colon)?;
        let else_expr = self.parse_expr()?;
        let span = self.cursor.span_from(start);
        Ok(self.alloc(
            ExprKind::Ternary {
                cond,
                then_expr,
                else_expr,
            },
            span,
        ))
    }

    fn parse_binary(&mut self, min_power: u8) -> Result<ExprId, ParseError> {
        let start = self.cursor.span();
        let mut left = self.parse_unary()?;
        while let Some((op, power)) = infix_op(self.cursor.kind()) {
            if power < min_power {
                break;
            }
            self.cursor.advance();
            let right = self.nested(|p| p.parse_binary(power + 1))?;
            let span = self.cursor.span_from(start);
            left = self.alloc(ExprKind::Binary { op, left, right }, span);
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<ExprId, ParseError> {
        self.nested(Self::parse_unary_inner)
    }

    fn parse_unary_inner(&mut self) -> Result<ExprId, ParseError> {
        let start = self.cursor.span();
        match self.cursor.kind() {
            TokenKind::Minus => match self.cursor.peek_kind(1) {
                // Negative numeric literals stay literals.
                TokenKind::Int(value) => {
                    self.cursor.advance();
                    self.cursor.advance();
                    let span = self.cursor.span_from(start);
                    let literal = self.alloc(ExprKind::Int(value.wrapping_neg()), span);
                    self.parse_postfix_ops(literal, start)
                }
                TokenKind::Float(value) => {
                    self.cursor.advance();
                    self.cursor.advance();
                    let span = self.cursor.span_from(start);
                    let literal = self.alloc(ExprKind::Float(-value), span);
                    self.parse_postfix_ops(literal, start)
                }
                _ => self.parse_prefix(UnaryOp::Neg, start),
            },
            TokenKind::Plus => self.parse_prefix(UnaryOp::Plus, start),
            TokenKind::Bang => self.parse_prefix(UnaryOp::Not, start),
            TokenKind::Tilde => self.parse_prefix(UnaryOp::BitNot, start),
            TokenKind::PlusPlus | TokenKind::MinusMinus => {
                let op = if self.cursor.advance().kind == TokenKind::PlusPlus {
                    UpdateOp::Increment
                } else {
                    UpdateOp::Decrement
                };
                let target = self.parse_unary()?;
                self.update(op, true, target, start)
            }
            TokenKind::Amp => {
                self.cursor.advance();
                let inner = self.parse_unary()?;
                let span = self.cursor.span_from(start);
                Ok(self.alloc(ExprKind::Reference(inner), span))
            }
            TokenKind::LParen => match (self.cursor.peek_kind(1), self.cursor.peek_kind(2)) {
                (TokenKind::Type(ty), TokenKind::RParen) => self.parse_cast(ty, start),
                (TokenKind::Function, TokenKind::RParen) => {
                    self.parse_cast(TypeTag::Function, start)
                }
                _ => self.parse_postfix(),
            },
            _ => self.parse_postfix(),
        }
    }

    fn parse_prefix(&mut self, op: UnaryOp, start: Span) -> Result<ExprId, ParseError> {
        self.cursor.advance();
        let operand = self.parse_unary()?;
        let span = self.cursor.span_from(start);
        Ok(self.alloc(ExprKind::Unary { op, operand }, span))
    }

    fn parse_cast(&mut self, ty: TypeTag, start: Span) -> Result<ExprId, ParseError> {
        // `(` type `)`
        self.cursor.advance();
        self.cursor.advance();
        self.cursor.advance();
        let expr = self.parse_unary()?;
        let span = self.cursor.span_from(start);
        Ok(self.alloc(ExprKind::Cast { ty, expr }, span))
    }

    fn update(
        &mut self,
        op: UpdateOp,
        prefix: bool,
        target: ExprId,
        start: Span,
    ) -> Result<ExprId, ParseError> {
        if !self.is_place(target) {
            return Err(ParseError::InvalidTarget {
                what: op.as_symbol(),
                span: self.arena.expr(target).span,
            });
        }
        let span = self.cursor.span_from(start);
        Ok(self.alloc(ExprKind::Update { op, prefix, target }, span))
    }

    fn parse_postfix(&mut self) -> Result<ExprId, ParseError> {
        let start = self.cursor.span();
        let primary = self.parse_primary()?;
        self.parse_postfix_ops(primary, start)
    }

    fn parse_postfix_ops(&mut self, mut expr: ExprId, start: Span) -> Result<ExprId, ParseError> {
        loop {
            match self.cursor.kind() {
                TokenKind::LParen => {
                    let args = self.parse_args()?;
                    let span = self.cursor.span_from(start);
                    expr = self.alloc(ExprKind::Call { callee: expr, args }, span);
                }
                TokenKind::LBracket => {
                    self.cursor.advance();
                    let key = self.parse_expr()?;
                    self.cursor.expect(TokenKind::RBracket)?;
                    let span = self.cursor.span_from(start);
                    expr = self.alloc(
                        ExprKind::Index {
                            base: expr,
                            key,
                            access: Access::Element,
                        },
                        span,
                    );
                }
                TokenKind::Dot => {
                    self.cursor.advance();
                    let name_span = self.cursor.span();
                    let name = self.expect_ident()?;
                    if self.cursor.check(TokenKind::LParen) {
                        let args = self.parse_args()?;
                        let span = self.cursor.span_from(start);
                        expr = self.alloc(
                            ExprKind::MethodCall {
                                receiver: expr,
                                method: name,
                                args,
                            },
                            span,
                        );
                    } else {
                        let key = self.alloc(ExprKind::Str(name), name_span);
                        let span = self.cursor.span_from(start);
                        expr = self.alloc(
                            ExprKind::Index {
                                base: expr,
                                key,
                                access: Access::Field,
                            },
                            span,
                        );
                    }
                }
                TokenKind::PlusPlus | TokenKind::MinusMinus => {
                    let op = if self.cursor.advance().kind == TokenKind::PlusPlus {
                        UpdateOp::Increment
                    } else {
                        UpdateOp::Decrement
                    };
                    return self.update(op, false, expr, start);
                }
                _ => return Ok(expr),
            }
        }
    }

    /// `( expr, ... )`
    fn parse_args(&mut self) -> Result<ExprRange, ParseError> {
        self.cursor.expect(TokenKind::LParen)?;
        let mut args = Vec::new();
        while !self.cursor.check(TokenKind::RParen) {
            args.push(self.parse_expr()?);
            if !self.cursor.eat(TokenKind::Comma) {
                break;
            }
        }
        self.cursor.expect(TokenKind::RParen)?;
        Ok(self.arena.alloc_expr_list(args))
    }

    fn parse_primary(&mut self) -> Result<ExprId, ParseError> {
        let token = self.cursor.current();
        let start = token.span;
        let kind = match token.kind {
            TokenKind::Int(value) => ExprKind::Int(value),
            TokenKind::Float(value) => ExprKind::Float(value),
            TokenKind::Str(text) => ExprKind::Str(text),
            TokenKind::True => ExprKind::Bool(true),
            TokenKind::False => ExprKind::Bool(false),
            TokenKind::Null | TokenKind::Type(TypeTag::Void) => ExprKind::Void,
            TokenKind::File => ExprKind::File,
            TokenKind::Line => ExprKind::Line,
            TokenKind::Ident(name) => {
                if self.cursor.peek_kind(1) != TokenKind::DoubleColon {
                    ExprKind::Ident(name)
                } else {
                    self.cursor.advance();
                    self.cursor.advance();
                    let member = self.expect_ident()?;
                    let kind = if self.cursor.check(TokenKind::LParen) {
                        let args = self.parse_args()?;
                        ExprKind::StaticCall {
                            class: name,
                            member,
                            args,
                        }
                    } else {
                        ExprKind::StaticField {
                            class: name,
                            member,
                        }
                    };
                    let span = self.cursor.span_from(start);
                    return Ok(self.alloc(kind, span));
                }
            }
            TokenKind::LParen => {
                self.cursor.advance();
                let inner = self.parse_expr()?;
                self.cursor.expect(TokenKind::RParen)?;
                return Ok(inner);
            }
            TokenKind::LBracket => {
                self.cursor.advance();
                let fields = self.parse_entries(TokenKind::RBracket, false)?;
                let span = self.cursor.span_from(start);
                return Ok(self.alloc(ExprKind::ArrayLit(fields), span));
            }
            TokenKind::LBrace => {
                self.cursor.advance();
                let fields = self.parse_entries(TokenKind::RBrace, true)?;
                let span = self.cursor.span_from(start);
                return Ok(self.alloc(ExprKind::StructLit(fields), span));
            }
            TokenKind::New => {
                self.cursor.advance();
                let class = self.expect_ident()?;
                let args = if self.cursor.check(TokenKind::LParen) {
                    self.parse_args()?
                } else {
                    ExprRange::EMPTY
                };
                let span = self.cursor.span_from(start);
                return Ok(self.alloc(ExprKind::New { class, args }, span));
            }
            TokenKind::Function => {
                self.cursor.advance();
                let function = self.parse_function_rest(start, None, None)?;
                let span = self.cursor.span_from(start);
                return Ok(self.alloc(ExprKind::Lambda(function), span));
            }
            _ => return Err(self.cursor.unexpected("expression")),
        };
        self.cursor.advance();
        Ok(self.alloc(kind, start))
    }

    /// Entries of an array (`value` or `key: value`) or struct (`key: value`)
    /// literal, through the closing delimiter. A bare identifier key names a
    /// field.
    fn parse_entries(
        &mut self,
        close: TokenKind,
        keys_required: bool,
    ) -> Result<FieldRange, ParseError> {
        let mut entries = Vec::new();
        while !self.cursor.check(close) {
            let key = match (self.cursor.kind(), self.cursor.peek_kind(1)) {
                (TokenKind::Ident(name), TokenKind::Colon) => {
                    let span = self.cursor.advance().span;
                    self.cursor.advance();
                    Some(self.alloc(ExprKind::Str(name), span))
                }
                _ => {
                    let first = self.parse_expr()?;
                    if self.cursor.eat(TokenKind::Colon) {
                        Some(first)
                    } else if keys_required {
                        return Err(self.cursor.unexpected("`:`"));
                    } else {
                        entries.push(FieldInit {
                            key: None,
                            value: first,
                        });
                        if !self.cursor.eat(TokenKind::Comma) {
                            break;
                        }
                        continue;
                    }
                }
            };
            let value = self.parse_expr()?;
            entries.push(FieldInit { key, value });
            if !self.cursor.eat(TokenKind::Comma) {
                break;
            }
        }
        self.cursor.expect(close)?;
        Ok(self.arena.alloc_fields(entries))
    }
}
