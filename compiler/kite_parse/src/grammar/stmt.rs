//! Statement productions.

use crate::{ParseError, Parser};
use kite_ir::ast::{ClassDecl, Declarator, FunctionDecl, Param, Stmt, StmtKind, StmtRange, SwitchCase};
use kite_ir::{FunctionId, Name, Span, StmtId, TokenKind, TypeTag};

impl Parser<'_> {
    pub(crate) fn parse_program(&mut self) -> StmtRange {
        let mut stmts = Vec::new();
        while !self.cursor.is_at_end() {
            if let Some(stmt) = self.parse_stmt_recovering() {
                stmts.push(stmt);
            }
        }
        self.arena.alloc_stmt_list(stmts)
    }

    /// Parse one statement; on error record it and resynchronize.
    fn parse_stmt_recovering(&mut self) -> Option<StmtId> {
        match self.parse_stmt() {
            Ok(stmt) => Some(stmt),
            Err(err) => {
                tracing::trace!(error = %err, "recovering from parse error");
                self.errors.push(err);
                self.synchronize();
                None
            }
        }
    }

    /// Statements up to (not including) one of the `terminators` or `Eof`.
    fn parse_stmt_list(&mut self, terminators: &[TokenKind]) -> StmtRange {
        let mut stmts = Vec::new();
        while !self.cursor.is_at_end() && !terminators.contains(&self.cursor.kind()) {
            if let Some(stmt) = self.parse_stmt_recovering() {
                stmts.push(stmt);
            }
        }
        self.arena.alloc_stmt_list(stmts)
    }

    pub(crate) fn parse_stmt(&mut self) -> Result<StmtId, ParseError> {
        self.nested(Self::parse_stmt_inner)
    }

    fn parse_stmt_inner(&mut self) -> Result<StmtId, ParseError> {
        let start = self.cursor.span();
        let kind = match self.cursor.kind() {
            TokenKind::LBrace => return self.parse_block(),
            TokenKind::Semicolon => {
                self.cursor.advance();
                StmtKind::Empty
            }
            TokenKind::If => self.parse_if()?,
            TokenKind::While => {
                self.cursor.advance();
                let cond = self.parse_paren_expr()?;
                let body = self.parse_stmt()?;
                StmtKind::While { cond, body }
            }
            TokenKind::Do => {
                self.cursor.advance();
                let body = self.parse_stmt()?;
                self.cursor.expect(TokenKind::While)?;
                let cond = self.parse_paren_expr()?;
                self.cursor.expect(TokenKind::Semicolon)?;
                StmtKind::DoWhile { body, cond }
            }
            TokenKind::For => self.parse_for()?,
            TokenKind::Switch => self.parse_switch()?,
            TokenKind::Break => {
                self.cursor.advance();
                self.cursor.expect(TokenKind::Semicolon)?;
                StmtKind::Break
            }
            TokenKind::Continue => {
                self.cursor.advance();
                self.cursor.expect(TokenKind::Semicolon)?;
                StmtKind::Continue
            }
            TokenKind::Return => {
                self.cursor.advance();
                let value = if self.cursor.check(TokenKind::Semicolon) {
                    None
                } else {
                    Some(self.parse_expr()?)
                };
                self.cursor.expect(TokenKind::Semicolon)?;
                StmtKind::Return(value)
            }
            TokenKind::Try => {
                self.cursor.advance();
                let body = self.parse_block()?;
                self.cursor.expect(TokenKind::Catch)?;
                self.cursor.expect(TokenKind::LParen)?;
                let binding = self.expect_ident()?;
                self.cursor.expect(TokenKind::RParen)?;
                let handler = self.parse_block()?;
                StmtKind::Try {
                    body,
                    binding,
                    handler,
                }
            }
            TokenKind::Throw => {
                self.cursor.advance();
                let value = self.parse_expr()?;
                self.cursor.expect(TokenKind::Semicolon)?;
                StmtKind::Throw(value)
            }
            // `function (` starts a lambda expression statement.
            TokenKind::Function if self.cursor.peek_kind(1) != TokenKind::LParen => {
                StmtKind::Function(self.parse_function_decl()?)
            }
            TokenKind::Class => self.parse_class()?,
            TokenKind::Var => {
                self.cursor.advance();
                self.parse_declaration(None)?
            }
            TokenKind::Type(ty) if matches!(self.cursor.peek_kind(1), TokenKind::Ident(_)) => {
                self.cursor.advance();
                self.parse_declaration(Some(ty))?
            }
            _ => {
                let expr = self.parse_expr()?;
                self.cursor.expect(TokenKind::Semicolon)?;
                StmtKind::Expr(expr)
            }
        };
        let span = self.cursor.span_from(start);
        Ok(self.arena.alloc_stmt(Stmt::new(kind, span)))
    }

    fn parse_block(&mut self) -> Result<StmtId, ParseError> {
        let start = self.cursor.expect(TokenKind::LBrace)?.span;
        let body = self.parse_stmt_list(&[TokenKind::RBrace]);
        self.cursor.expect(TokenKind::RBrace)?;
        let span = self.cursor.span_from(start);
        Ok(self.arena.alloc_stmt(Stmt::new(StmtKind::Block(body), span)))
    }

    fn parse_if(&mut self) -> Result<StmtKind, ParseError> {
        self.cursor.expect(TokenKind::If)?;
        let cond = self.parse_paren_expr()?;
        let then_branch = self.parse_stmt()?;
        let else_branch = if self.cursor.eat(TokenKind::Else) {
            Some(self.parse_stmt()?)
        } else {
            None
        };
        Ok(StmtKind::If {
            cond,
            then_branch,
            else_branch,
        })
    }

    fn parse_for(&mut self) -> Result<StmtKind, ParseError> {
        self.cursor.expect(TokenKind::For)?;
        self.cursor.expect(TokenKind::LParen)?;

        let init = match self.cursor.kind() {
            TokenKind::Semicolon => {
                self.cursor.advance();
                None
            }
            TokenKind::Var | TokenKind::Type(_) => Some(self.parse_stmt()?),
            _ => {
                let start = self.cursor.span();
                let expr = self.parse_expr()?;
                self.cursor.expect(TokenKind::Semicolon)?;
                let span = self.cursor.span_from(start);
                Some(self.arena.alloc_stmt(Stmt::new(StmtKind::Expr(expr), span)))
            }
        };

        let cond = if self.cursor.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.cursor.expect(TokenKind::Semicolon)?;

        let step = if self.cursor.check(TokenKind::RParen) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.cursor.expect(TokenKind::RParen)?;

        let body = self.parse_stmt()?;
        Ok(StmtKind::For {
            init,
            cond,
            step,
            body,
        })
    }

    fn parse_switch(&mut self) -> Result<StmtKind, ParseError> {
        self.cursor.expect(TokenKind::Switch)?;
        let subject = self.parse_paren_expr()?;
        self.cursor.expect(TokenKind::LBrace)?;

        let arm_end = [TokenKind::Case, TokenKind::Default, TokenKind::RBrace];
        let mut cases = Vec::new();
        let mut default = None;
        loop {
            match self.cursor.kind() {
                TokenKind::Case => {
                    self.cursor.advance();
                    let label = self.parse_expr()?;
                    self.cursor.expect(TokenKind::Colon)?;
                    let body = self.parse_stmt_list(&arm_end);
                    let fallthrough = !self.ends_in_break(body);
                    cases.push(SwitchCase {
                        label,
                        body,
                        fallthrough,
                    });
                }
                TokenKind::Default => {
                    let span = self.cursor.advance().span;
                    self.cursor.expect(TokenKind::Colon)?;
                    let body = self.parse_stmt_list(&arm_end);
                    if default.replace(body).is_some() {
                        self.errors.push(ParseError::DuplicateDefault { span });
                    }
                }
                TokenKind::RBrace => {
                    self.cursor.advance();
                    break;
                }
                _ => return Err(self.cursor.unexpected("`case`, `default` or `}`")),
            }
        }

        Ok(StmtKind::Switch {
            subject,
            cases: self.arena.alloc_cases(cases),
            default,
        })
    }

    fn ends_in_break(&self, body: StmtRange) -> bool {
        self.arena
            .stmt_list(body)
            .last()
            .is_some_and(|&last| matches!(self.arena.stmt(last).kind, StmtKind::Break))
    }

    /// Declarators after `var` or a type keyword, through the `;`.
    fn parse_declaration(&mut self, ty: Option<TypeTag>) -> Result<StmtKind, ParseError> {
        let mut decls = Vec::new();
        loop {
            let span = self.cursor.span();
            let name = self.expect_ident()?;
            let init = if self.cursor.eat(TokenKind::Eq) {
                Some(self.parse_expr()?)
            } else {
                None
            };
            decls.push(Declarator {
                name,
                init,
                span: self.cursor.span_from(span),
            });
            if !self.cursor.eat(TokenKind::Comma) {
                break;
            }
        }
        self.cursor.expect(TokenKind::Semicolon)?;
        Ok(StmtKind::Declare {
            ty,
            decls: self.arena.alloc_decls(decls),
        })
    }

    /// `function [type] name(params) { ... }`
    fn parse_function_decl(&mut self) -> Result<FunctionId, ParseError> {
        let start = self.cursor.expect(TokenKind::Function)?.span;
        let return_ty = self.parse_type_annotation();
        let name = self.expect_ident()?;
        self.parse_function_rest(start, Some(name), return_ty)
    }

    /// Parameter list and body, shared by declarations and lambdas.
    pub(crate) fn parse_function_rest(
        &mut self,
        start: Span,
        name: Option<Name>,
        return_ty: Option<TypeTag>,
    ) -> Result<FunctionId, ParseError> {
        self.cursor.expect(TokenKind::LParen)?;
        let mut params = Vec::new();
        let mut variadic = false;
        while !self.cursor.check(TokenKind::RParen) {
            if variadic {
                return Err(ParseError::MisplacedEllipsis {
                    span: self.cursor.span(),
                });
            }
            if self.cursor.eat(TokenKind::Ellipsis) {
                variadic = true;
            } else {
                let span = self.cursor.span();
                let ty = self.parse_type_annotation();
                let name = self.expect_ident()?;
                params.push(Param {
                    name,
                    ty,
                    span: self.cursor.span_from(span),
                });
            }
            if !self.cursor.eat(TokenKind::Comma) {
                break;
            }
        }
        self.cursor.expect(TokenKind::RParen)?;
        let body = self.parse_block()?;
        let params = self.arena.alloc_params(params);
        let span = self.cursor.span_from(start);
        Ok(self.arena.alloc_function(FunctionDecl {
            name,
            params,
            variadic,
            return_ty,
            body,
            span,
        }))
    }

    /// Optional `var` or type keyword before a name. `var` means untyped.
    fn parse_type_annotation(&mut self) -> Option<TypeTag> {
        match self.cursor.kind() {
            TokenKind::Type(ty) => {
                self.cursor.advance();
                Some(ty)
            }
            TokenKind::Var => {
                self.cursor.advance();
                None
            }
            _ => None,
        }
    }

    fn parse_class(&mut self) -> Result<StmtKind, ParseError> {
        let start = self.cursor.expect(TokenKind::Class)?.span;
        let name = self.expect_ident()?;
        let parent = if self.cursor.eat(TokenKind::Extends) {
            Some(self.expect_ident()?)
        } else {
            None
        };
        self.cursor.expect(TokenKind::LBrace)?;
        let body = self.parse_stmt_list(&[TokenKind::RBrace]);
        self.cursor.expect(TokenKind::RBrace)?;
        let span = self.cursor.span_from(start);
        let id = self.arena.alloc_class(ClassDecl {
            name,
            parent,
            body,
            span,
        });
        Ok(StmtKind::Class(id))
    }
}
